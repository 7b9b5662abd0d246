use tracing::error;

use crate::CommandMeta;
use crate::access::{ensure_admin, require_api_key, resolve_universe};
use crate::embeds::{action_status_embed, cloud_error_text, usage_message};
use maple_cloud::messaging::KICK_TOPIC;
use maple_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "kick",
    desc: "Kick a player from all live servers by user id.",
    category: "moderation",
    usage: "!kick <userId> <reason> [universeId]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "Roblox user id to kick"] user_id: Option<u64>,
    #[description = "Reason shown to the player"] reason: Option<String>,
    #[description = "Universe id (defaults to the configured universe)"] universe: Option<u64>,
) -> Result<(), Error> {
    if !ensure_admin(&ctx).await? {
        return Ok(());
    }

    let (Some(user_id), Some(reason)) = (user_id, reason) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let Some(universe_id) = resolve_universe(&ctx, universe).await? else {
        return Ok(());
    };
    let Some(api_key) = require_api_key(&ctx, universe_id).await? else {
        return Ok(());
    };

    // The game servers subscribe to the kick topic and remove the player
    // themselves; the bot only publishes the request.
    let payload = serde_json::json!({ "UserId": user_id, "Reason": reason }).to_string();
    let publish = ctx
        .data()
        .cloud
        .publish_message(&api_key, universe_id, KICK_TOPIC, &payload)
        .await;

    let embed = match publish {
        Ok(()) => action_status_embed(
            format!("Kick user: {user_id}"),
            "Player prompted to be kicked",
            true,
            "**Success**",
        )
        .field("Kick reason", reason, true),
        Err(cloud_err) => {
            error!(?cloud_err, user_id, universe_id, "kick publish failed");
            action_status_embed(
                format!("Kick user: {user_id}"),
                "Unable to kick the player",
                false,
                cloud_error_text(&cloud_err),
            )
        }
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
