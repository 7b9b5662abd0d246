use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x2B_6C_B0;
/// Successful remote operations.
pub const SUCCESS_EMBED_COLOR: u32 = 0x2E_9E_52;
/// Failed remote operations.
pub const ERROR_EMBED_COLOR: u32 = 0xC8_3A_2E;
/// Degraded-but-not-failed outcomes (empty listings, missing keys).
pub const WARNING_EMBED_COLOR: u32 = 0xD9_A4_1B;

/// Build the embed for one page of a remote ordered collection.
///
/// The footer says "(more available)" instead of a total page count
/// because the store only exposes opaque forward cursors, never a count.
pub fn build_board_page_embed(
    title: &str,
    description: impl Into<String>,
    scope: &str,
    page_index: usize,
    has_next: bool,
) -> serenity::CreateEmbed {
    let footer = if has_next {
        format!("Page {} (more available)", page_index + 1)
    } else {
        format!("Page {}", page_index + 1)
    };

    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .description(description)
        .field("Scope", scope.to_owned(), true)
        .footer(serenity::CreateEmbedFooter::new(footer))
}
