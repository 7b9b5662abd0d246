use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::access::{ensure_admin, require_api_key, resolve_universe};
use crate::embeds::{cloud_error_text, usage_message, warning_embed};
use maple_cloud::{CloudError, CloudService, OrderedEntry};
use maple_core::{Context, Error};
use maple_utils::embed::build_board_page_embed;
use maple_utils::pagination::{
    NAVIGATION_TIMEOUT_SECS, PAGE_SIZE, Page, PageControls, PageFetcher, PageNavigator,
    numbered_lines,
};

pub const META: CommandMeta = CommandMeta {
    name: "listleaderboard",
    desc: "Browse an ordered data store page by page.",
    category: "leaderboard",
    usage: "!listleaderboard <name> [universeId] [scope]",
};

const DEFAULT_SCOPE: &str = "global";

/// Bridges the navigator's fetch seam to the ordered data store API for
/// one command invocation.
struct BoardFetcher<'a> {
    cloud: &'a CloudService,
    api_key: String,
    universe_id: u64,
    datastore: &'a str,
    scope: &'a str,
}

#[async_trait]
impl PageFetcher for BoardFetcher<'_> {
    type Item = OrderedEntry;
    type Error = CloudError;

    async fn fetch(&mut self, page_token: Option<&str>) -> Result<Page<OrderedEntry>, CloudError> {
        let page = self
            .cloud
            .list_ordered_entries(
                &self.api_key,
                self.universe_id,
                self.datastore,
                self.scope,
                PAGE_SIZE as u32,
                page_token,
            )
            .await?;

        Ok(Page {
            items: page.entries,
            next_page_token: page.next_page_token,
        })
    }
}

fn board_embed(
    datastore: &str,
    scope: &str,
    navigator: &PageNavigator<BoardFetcher<'_>>,
) -> serenity::CreateEmbed {
    let description = numbered_lines(navigator.items(), navigator.page_index(), |entry| {
        format!("**{}** - Value: {}", entry.id, entry.value)
    });

    build_board_page_embed(
        &format!("Leaderboard: {datastore}"),
        description,
        scope,
        navigator.page_index(),
        navigator.has_next(),
    )
}

fn board_components(
    first_id: &str,
    prev_id: &str,
    next_id: &str,
    controls: PageControls,
) -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(first_id)
            .label("⏮ First")
            .disabled(!controls.first_enabled)
            .style(serenity::ButtonStyle::Secondary),
        serenity::CreateButton::new(prev_id)
            .label("◀ Previous")
            .disabled(!controls.previous_enabled)
            .style(serenity::ButtonStyle::Primary),
        serenity::CreateButton::new(next_id)
            .label("Next ▶")
            .disabled(!controls.next_enabled)
            .style(serenity::ButtonStyle::Primary),
    ])]
}

#[poise::command(prefix_command, slash_command, category = "Leaderboard")]
pub async fn listleaderboard(
    ctx: Context<'_>,
    #[description = "Ordered data store name"] name: Option<String>,
    #[description = "Universe id (defaults to the configured universe)"] universe: Option<u64>,
    #[description = "Data store scope (default: global)"] scope: Option<String>,
) -> Result<(), Error> {
    if !ensure_admin(&ctx).await? {
        return Ok(());
    }

    let Some(name) = name else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let Some(universe_id) = resolve_universe(&ctx, universe).await? else {
        return Ok(());
    };
    let Some(api_key) = require_api_key(&ctx, universe_id).await? else {
        return Ok(());
    };

    let scope = scope
        .as_deref()
        .map(str::trim)
        .filter(|scope| !scope.is_empty())
        .unwrap_or(DEFAULT_SCOPE)
        .to_owned();

    let fetcher = BoardFetcher {
        cloud: &ctx.data().cloud,
        api_key,
        universe_id,
        datastore: &name,
        scope: &scope,
    };

    let mut navigator = match PageNavigator::start(fetcher).await {
        Ok(navigator) => navigator,
        Err(cloud_err) => {
            let description = if cloud_err.is_not_found() {
                format!("No ordered data store `{name}` with scope `{scope}` was found.")
            } else {
                cloud_error_text(&cloud_err)
            };
            ctx.send(poise::CreateReply::default().embed(warning_embed("Leaderboard", description)))
                .await?;
            return Ok(());
        }
    };

    if navigator.items().is_empty() {
        ctx.send(poise::CreateReply::default().embed(warning_embed(
            format!("Leaderboard: {name}"),
            format!("No entries found in this ordered data store (scope `{scope}`)."),
        )))
        .await?;
        return Ok(());
    }

    let ctx_id = ctx.id();
    let first_button_id = format!("{}_first", ctx_id);
    let prev_button_id = format!("{}_prev", ctx_id);
    let next_button_id = format!("{}_next", ctx_id);

    let mut reply = poise::CreateReply::default().embed(board_embed(&name, &scope, &navigator));
    if navigator.controls().any_enabled() {
        reply = reply.components(board_components(
            &first_button_id,
            &prev_button_id,
            &next_button_id,
            navigator.controls(),
        ));
    }
    let sent = ctx.send(reply).await?;

    if !navigator.controls().any_enabled() {
        return Ok(());
    }

    let message = sent.message().await?;
    let message_id = message.id;
    let channel_id = message.channel_id;

    // Only the invoking user may drive this navigator; presses from
    // anyone else never reach it.
    while let Some(press) = serenity::collector::ComponentInteractionCollector::new(ctx)
        .filter({
            let prefix = format!("{}", ctx_id);
            let author_id = ctx.author().id;
            move |interaction| {
                interaction.data.custom_id.starts_with(&prefix)
                    && interaction.user.id == author_id
                    && interaction.message.id == message_id
            }
        })
        .timeout(Duration::from_secs(NAVIGATION_TIMEOUT_SECS))
        .await
    {
        let outcome = if press.data.custom_id == next_button_id {
            navigator.advance().await.map(|_| ())
        } else if press.data.custom_id == prev_button_id {
            navigator.retreat().await.map(|_| ())
        } else if press.data.custom_id == first_button_id {
            navigator.jump_to_first().await
        } else {
            continue;
        };

        match outcome {
            Ok(()) => {
                press
                    .create_response(
                        ctx.http(),
                        serenity::CreateInteractionResponse::UpdateMessage(
                            serenity::CreateInteractionResponseMessage::new()
                                .embed(board_embed(&name, &scope, &navigator))
                                .components(board_components(
                                    &first_button_id,
                                    &prev_button_id,
                                    &next_button_id,
                                    navigator.controls(),
                                )),
                        ),
                    )
                    .await?;
            }
            Err(cloud_err) => {
                // The rendered page stays as-is; only the presser sees
                // the failure.
                warn!(?cloud_err, datastore = %name, "leaderboard page fetch failed");
                press
                    .create_response(
                        ctx.http(),
                        serenity::CreateInteractionResponse::Message(
                            serenity::CreateInteractionResponseMessage::new()
                                .ephemeral(true)
                                .content(cloud_error_text(&cloud_err)),
                        ),
                    )
                    .await?;
            }
        }
    }

    // Idle for too long: drop the controls, keep the last page visible.
    let _ = channel_id
        .edit_message(
            ctx.http(),
            message_id,
            serenity::EditMessage::new().components(Vec::new()),
        )
        .await;

    Ok(())
}
