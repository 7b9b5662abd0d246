use tracing::{debug, error};

use crate::CommandMeta;
use crate::access::{ensure_admin, require_api_key, resolve_universe};
use crate::embeds::{action_status_embed, cloud_error_text, usage_message, warning_embed};
use maple_core::{Context, Error};
use maple_database::impls::bans::{NewBan, find_ban, record_ban};
use maple_database::model::bans::BanExpiry;
use maple_utils::formatting::format_compact_duration;
use maple_utils::parse::{RESTRICTION_PROFILE, parse_duration};
use maple_utils::time::now_unix_secs;

pub const META: CommandMeta = CommandMeta {
    name: "ban",
    desc: "Ban a player from the experience by user id.",
    category: "moderation",
    usage: "!ban <userId> <reason> [duration] [excludeAlts] [universeId]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "Roblox user id to ban"] user_id: Option<u64>,
    #[description = "Reason shown to the player"] reason: Option<String>,
    #[description = "Duration such as 7d, 1m, 1y (omit for permanent)"] duration: Option<String>,
    #[description = "Also restrict suspected alternate accounts"] exclude_alts: Option<bool>,
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

    let duration = duration
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty());
    let duration_seconds = match duration {
        Some(raw) => match parse_duration(raw, &RESTRICTION_PROFILE) {
            Ok(seconds) => Some(seconds),
            Err(parse_err) => {
                ctx.say(format!("{parse_err}. Example: `7d` for seven days."))
                    .await?;
                return Ok(());
            }
        },
        None => None,
    };

    let data = ctx.data();

    if let Some(existing) = find_ban(&data.db, user_id).await? {
        let until = match existing.expires {
            BanExpiry::Permanent => "permanently".to_owned(),
            BanExpiry::At(instant) => format!("until <t:{instant}:F>"),
        };
        ctx.send(
            poise::CreateReply::default().embed(warning_embed(
                "Already banned",
                format!(
                    "UserId **{user_id}** is already banned {until}.\nReason: {}",
                    existing.reason
                ),
            )),
        )
        .await?;
        return Ok(());
    }

    let display_name = match data.cloud.user_info(user_id).await {
        Ok(info) => info.name,
        Err(lookup_err) => {
            debug!(?lookup_err, user_id, "user lookup failed, using raw id");
            format!("User {user_id}")
        }
    };

    let exclude_alts = exclude_alts.unwrap_or(false);
    let restriction = data
        .cloud
        .set_restriction(
            &api_key,
            universe_id,
            user_id,
            &reason,
            duration_seconds,
            exclude_alts,
        )
        .await;

    if let Err(cloud_err) = restriction {
        error!(?cloud_err, user_id, universe_id, "ban request failed");
        ctx.send(
            poise::CreateReply::default().embed(action_status_embed(
                format!("Ban user: {display_name}"),
                "Unable to ban the player",
                false,
                cloud_error_text(&cloud_err),
            )),
        )
        .await?;
        return Ok(());
    }

    let now = now_unix_secs();
    let expires = match duration_seconds {
        Some(seconds) => BanExpiry::At(now + seconds),
        None => BanExpiry::Permanent,
    };

    record_ban(
        &data.db,
        NewBan {
            user_id,
            reason: &reason,
            duration,
            expires,
        },
        now,
    )
    .await?;

    let description = match expires {
        BanExpiry::Permanent => "Player banned permanently".to_owned(),
        BanExpiry::At(instant) => format!("Player banned until <t:{instant}:F>"),
    };
    let duration_label = match (duration, duration_seconds) {
        (Some(raw), Some(seconds)) => {
            format!("{raw} ({})", format_compact_duration(seconds))
        }
        _ => "permanent".to_owned(),
    };

    let mut embed = action_status_embed(
        format!("Ban user: {display_name}"),
        description,
        true,
        "**Success**",
    )
    .field("Ban reason", reason.clone(), true)
    .field("Ban duration", duration_label, true);
    if exclude_alts {
        embed = embed.field("Alternate accounts", "also restricted", true);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
