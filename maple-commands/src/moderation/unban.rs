use tracing::{error, info};

use crate::CommandMeta;
use crate::access::{ensure_admin, require_api_key, resolve_universe};
use crate::embeds::{action_status_embed, cloud_error_text, usage_message};
use maple_core::{Context, Error};
use maple_database::impls::bans::delete_ban;

pub const META: CommandMeta = CommandMeta {
    name: "unban",
    desc: "Unban a player from the experience by user id.",
    category: "moderation",
    usage: "!unban <userId> [universeId]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "Roblox user id to unban"] user_id: Option<u64>,
    #[description = "Universe id (defaults to the configured universe)"] universe: Option<u64>,
) -> Result<(), Error> {
    if !ensure_admin(&ctx).await? {
        return Ok(());
    }

    let Some(user_id) = user_id else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let Some(universe_id) = resolve_universe(&ctx, universe).await? else {
        return Ok(());
    };
    let Some(api_key) = require_api_key(&ctx, universe_id).await? else {
        return Ok(());
    };

    let data = ctx.data();

    // Lifting a restriction that no longer exists is a normal outcome,
    // not a failure.
    let restriction_lifted = match data
        .cloud
        .lift_restriction(&api_key, universe_id, user_id)
        .await
    {
        Ok(()) => true,
        Err(cloud_err) if cloud_err.is_not_found() => false,
        Err(cloud_err) => {
            error!(?cloud_err, user_id, universe_id, "unban request failed");
            ctx.send(
                poise::CreateReply::default().embed(action_status_embed(
                    format!("Unban user: {user_id}"),
                    "Unable to unban the player",
                    false,
                    cloud_error_text(&cloud_err),
                )),
            )
            .await?;
            return Ok(());
        }
    };

    // The expiry sweep may have deleted the record already; that race is
    // expected.
    let record_removed = delete_ban(&data.db, user_id).await?;

    if !restriction_lifted && !record_removed {
        ctx.say(format!("UserId: {user_id} is not banned.")).await?;
        return Ok(());
    }

    info!(user_id, universe_id, restriction_lifted, record_removed, "unban completed");

    let description = if restriction_lifted {
        "Player unbanned from the experience"
    } else {
        "No active restriction remained; the stored ban record was cleared"
    };

    ctx.send(
        poise::CreateReply::default().embed(action_status_embed(
            format!("Unban user: {user_id}"),
            description,
            true,
            "**Success**",
        )),
    )
    .await?;

    Ok(())
}
