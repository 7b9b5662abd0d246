use poise::serenity_prelude as serenity;

use maple_cloud::CloudError;
use maple_utils::COMMAND_PREFIX;
use maple_utils::embed::{ERROR_EMBED_COLOR, SUCCESS_EMBED_COLOR, WARNING_EMBED_COLOR};

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn permission_denied_message() -> &'static str {
    "You need the Administrator permission to use this command."
}

/// Outcome embed shared by the remote-operation commands: success
/// coloring plus the execution-status field operators look for.
pub fn action_status_embed(
    title: impl Into<String>,
    description: impl Into<String>,
    success: bool,
    status: impl Into<String>,
) -> serenity::CreateEmbed {
    let status_name = if success {
        "✅ Command execution status"
    } else {
        "❌ Command execution status"
    };

    serenity::CreateEmbed::new()
        .title(title)
        .color(if success {
            SUCCESS_EMBED_COLOR
        } else {
            ERROR_EMBED_COLOR
        })
        .description(description)
        .field(status_name, status, false)
}

/// Degraded-outcome embed (missing keys, empty listings, absent
/// entries).
pub fn warning_embed(
    title: impl Into<String>,
    description: impl Into<String>,
) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .color(WARNING_EMBED_COLOR)
        .description(description)
}

/// Guidance shown when no API key is cached for the target universe.
pub fn missing_api_key_embed(universe_id: u64) -> serenity::CreateEmbed {
    warning_embed(
        "🔑 API Key Missing",
        format!(
            "No API key is cached for universe **{universe_id}**.\n\
             Register one with `{COMMAND_PREFIX}setapikey {universe_id} <apiKey>`."
        ),
    )
    .footer(serenity::CreateEmbedFooter::new(
        "Keys are held in bot memory only and are lost on restart.",
    ))
}

/// Short operator-facing text for a failed remote call.
pub fn cloud_error_text(err: &CloudError) -> String {
    format!("**Error:** {err}")
}
