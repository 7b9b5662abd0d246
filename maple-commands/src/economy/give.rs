use tracing::error;

use crate::CommandMeta;
use crate::access::{ensure_admin, require_api_key, resolve_universe};
use crate::embeds::{action_status_embed, cloud_error_text, usage_message};
use maple_cloud::datastore::{CURRENCY_DATASTORE, currency_entry_key};
use maple_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "give",
    desc: "Give currency to a player by user id.",
    category: "economy",
    usage: "!give <userId> <amount> [universeId]",
};

#[poise::command(prefix_command, slash_command, category = "Economy")]
pub async fn give(
    ctx: Context<'_>,
    #[description = "Roblox user id to credit"] user_id: Option<u64>,
    #[description = "Amount of currency to give"] amount: Option<i64>,
    #[description = "Universe id (defaults to the configured universe)"] universe: Option<u64>,
) -> Result<(), Error> {
    if !ensure_admin(&ctx).await? {
        return Ok(());
    }

    let (Some(user_id), Some(amount)) = (user_id, amount) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if amount <= 0 {
        ctx.say("Please provide a positive amount.").await?;
        return Ok(());
    }

    let Some(universe_id) = resolve_universe(&ctx, universe).await? else {
        return Ok(());
    };
    let Some(api_key) = require_api_key(&ctx, universe_id).await? else {
        return Ok(());
    };

    let entry_key = currency_entry_key(user_id);
    let result = ctx
        .data()
        .cloud
        .increment_standard_entry(&api_key, universe_id, CURRENCY_DATASTORE, &entry_key, amount)
        .await;

    let embed = match result {
        Ok(new_total) => action_status_embed(
            format!("Give currency to {user_id}"),
            format!("Successfully awarded {amount} currency"),
            true,
            "**Success**",
        )
        .field("Amount given", amount.to_string(), true)
        .field("New total", new_total.to_string(), true),
        Err(cloud_err) => {
            error!(?cloud_err, user_id, universe_id, "currency increment failed");
            action_status_embed(
                format!("Give currency to {user_id}"),
                "Failed to award currency",
                false,
                cloud_error_text(&cloud_err),
            )
        }
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
