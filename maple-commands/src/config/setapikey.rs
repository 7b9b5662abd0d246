use tracing::{info, warn};

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::access::ensure_admin;
use crate::embeds::{action_status_embed, cloud_error_text, usage_message, warning_embed};
use maple_core::{Context, Error};
use maple_utils::embed::SUCCESS_EMBED_COLOR;

pub const META: CommandMeta = CommandMeta {
    name: "setapikey",
    desc: "Cache the Open Cloud API key for a universe.",
    category: "config",
    usage: "!setapikey <universeId> <apiKey>",
};

#[poise::command(prefix_command, slash_command, ephemeral, category = "Config")]
pub async fn setapikey(
    ctx: Context<'_>,
    #[description = "Roblox universe id"] universe: Option<u64>,
    #[description = "Open Cloud API key for that universe"] api_key: Option<String>,
) -> Result<(), Error> {
    if !ensure_admin(&ctx).await? {
        return Ok(());
    }

    let (Some(universe_id), Some(api_key)) = (universe, api_key) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let api_key = api_key.trim().to_owned();
    if api_key.is_empty() {
        ctx.say("Invalid API key: please provide a non-empty key.")
            .await?;
        return Ok(());
    }

    let data = ctx.data();

    // Cache first so the probe exercises the same lookup path commands
    // use; evict again if the key turns out to be rejected.
    data.keys.set(universe_id, api_key.clone());

    match data.cloud.validate_key(&api_key, universe_id).await {
        Ok(()) => {
            info!(universe_id, "api key cached");
            let embed = serenity::CreateEmbed::new()
                .title("API Key Configured")
                .color(SUCCESS_EMBED_COLOR)
                .description(format!(
                    "The API key for universe **{universe_id}** has been cached."
                ))
                .footer(serenity::CreateEmbedFooter::new(
                    "Keys are held in bot memory only and are lost when the bot restarts.",
                ));
            ctx.send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await?;
        }
        Err(cloud_err) if cloud_err.is_auth() => {
            data.keys.clear(universe_id);
            warn!(universe_id, "rejected api key evicted");
            ctx.send(
                poise::CreateReply::default()
                    .ephemeral(true)
                    .embed(action_status_embed(
                        "API Key Rejected",
                        format!("The key was not accepted for universe {universe_id}."),
                        false,
                        cloud_error_text(&cloud_err),
                    )),
            )
            .await?;
        }
        Err(cloud_err) => {
            // Verification was inconclusive (network trouble, Roblox
            // outage). The key stays cached; the next real call will
            // tell.
            warn!(?cloud_err, universe_id, "api key validation inconclusive");
            ctx.send(
                poise::CreateReply::default()
                    .ephemeral(true)
                    .embed(warning_embed(
                        "API Key Stored, Not Verified",
                        format!(
                            "The key for universe **{universe_id}** was cached, but the \
                             validation probe failed: {cloud_err}"
                        ),
                    )),
            )
            .await?;
        }
    }

    Ok(())
}
