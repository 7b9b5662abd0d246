use tracing::error;

use crate::CommandMeta;
use crate::access::{ensure_admin, require_api_key, resolve_universe};
use crate::embeds::{action_status_embed, cloud_error_text, usage_message, warning_embed};
use maple_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "removefromboard",
    desc: "Remove a player's leaderboard entry by zeroing its value.",
    category: "leaderboard",
    usage: "!removefromboard <userId> <leaderboardName> [key] [universeId]",
};

const DEFAULT_SCOPE: &str = "global";

#[poise::command(prefix_command, slash_command, category = "Leaderboard")]
pub async fn removefromboard(
    ctx: Context<'_>,
    #[description = "Roblox user id whose entry to remove"] user_id: Option<u64>,
    #[description = "Ordered data store name"] leaderboard: Option<String>,
    #[description = "Entry key (defaults to the user id)"] key: Option<String>,
    #[description = "Universe id (defaults to the configured universe)"] universe: Option<u64>,
) -> Result<(), Error> {
    if !ensure_admin(&ctx).await? {
        return Ok(());
    }

    let (Some(user_id), Some(leaderboard)) = (user_id, leaderboard) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let Some(universe_id) = resolve_universe(&ctx, universe).await? else {
        return Ok(());
    };
    let Some(api_key) = require_api_key(&ctx, universe_id).await? else {
        return Ok(());
    };

    let entry_key = key.unwrap_or_else(|| user_id.to_string());
    let data = ctx.data();

    let existing = match data
        .cloud
        .get_ordered_entry(&api_key, universe_id, &leaderboard, DEFAULT_SCOPE, &entry_key)
        .await
    {
        Ok(entry) => entry,
        Err(cloud_err) if cloud_err.is_not_found() => {
            ctx.send(
                poise::CreateReply::default().embed(
                    warning_embed(
                        "Remove leaderboard entry",
                        format!("⚠️ Key `{entry_key}` was not found in `{leaderboard}`."),
                    )
                    .field("UserId", user_id.to_string(), true),
                ),
            )
            .await?;
            return Ok(());
        }
        Err(cloud_err) => {
            error!(?cloud_err, %entry_key, "leaderboard entry lookup failed");
            ctx.send(
                poise::CreateReply::default().embed(action_status_embed(
                    "Remove leaderboard entry",
                    "Unable to check the leaderboard entry",
                    false,
                    cloud_error_text(&cloud_err),
                )),
            )
            .await?;
            return Ok(());
        }
    };

    let removal = data
        .cloud
        .zero_ordered_entry(&api_key, universe_id, &leaderboard, DEFAULT_SCOPE, &entry_key)
        .await;

    let embed = match removal {
        Ok(()) => action_status_embed(
            "Remove leaderboard entry",
            format!(
                "Entry zeroed for user {user_id} (previous value: {}).\n\
                 The store has no delete primitive, so the entry stays \
                 visible with value 0.",
                existing.value
            ),
            true,
            "**Success**",
        )
        .field("Leaderboard", leaderboard.clone(), true)
        .field("Key", entry_key.clone(), true),
        Err(cloud_err) => {
            error!(?cloud_err, %entry_key, "leaderboard entry removal failed");
            action_status_embed(
                "Remove leaderboard entry",
                "Unable to remove the leaderboard entry",
                false,
                cloud_error_text(&cloud_err),
            )
        }
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
