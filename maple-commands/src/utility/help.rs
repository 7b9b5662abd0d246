use poise::serenity_prelude as serenity;

use crate::{COMMANDS, CommandMeta};
use maple_core::{Context, Error};
use maple_utils::embed::DEFAULT_EMBED_COLOR;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "List all available commands.",
    category: "utility",
    usage: "!help",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let mut commands: Vec<&CommandMeta> = COMMANDS.iter().collect();
    commands.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    let mut description = String::new();
    let mut current_category = "";
    for command in commands {
        if command.category != current_category {
            if !description.is_empty() {
                description.push('\n');
            }
            description.push_str(&format!("**{}**\n", command.category));
            current_category = command.category;
        }
        description.push_str(&format!("`{}` - {}\n", command.usage, command.desc));
    }

    let embed = serenity::CreateEmbed::new()
        .title("Available Commands")
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
