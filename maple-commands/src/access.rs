use maple_core::{Context, Error};
use maple_utils::permissions::is_guild_admin;

use crate::embeds::{guild_only_message, missing_api_key_embed, permission_denied_message};

/// Guild-only + Administrator preamble shared by every command.
/// Replies and returns false when the invoker may not proceed.
pub async fn ensure_admin(ctx: &Context<'_>) -> Result<bool, Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(false);
    };

    if !is_guild_admin(ctx.http(), guild_id, ctx.author().id).await? {
        ctx.say(permission_denied_message()).await?;
        return Ok(false);
    }

    Ok(true)
}

/// Resolve the target universe: the explicit argument first, then the
/// configured default. Replies and returns `None` when neither exists.
pub async fn resolve_universe(
    ctx: &Context<'_>,
    explicit: Option<u64>,
) -> Result<Option<u64>, Error> {
    match explicit.or(ctx.data().default_universe) {
        Some(universe_id) => Ok(Some(universe_id)),
        None => {
            ctx.say("No universe id was given and no default universe is configured.")
                .await?;
            Ok(None)
        }
    }
}

/// Fetch the cached API key for a universe, prompting for registration
/// when absent. A missing key aborts the command but is not an error.
pub async fn require_api_key(ctx: &Context<'_>, universe_id: u64) -> Result<Option<String>, Error> {
    match ctx.data().keys.get(universe_id) {
        Some(key) => Ok(Some(key)),
        None => {
            ctx.send(
                poise::CreateReply::default()
                    .ephemeral(true)
                    .embed(missing_api_key_embed(universe_id)),
            )
            .await?;
            Ok(None)
        }
    }
}
