pub mod config;
pub mod economy;
pub mod leaderboard;
pub mod moderation;
pub mod utility;

mod access;
mod embeds;

use maple_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    moderation::ban::META,
    moderation::unban::META,
    moderation::kick::META,
    economy::give::META,
    leaderboard::listleaderboard::META,
    leaderboard::removefromboard::META,
    config::setapikey::META,
    utility::help::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        moderation::ban::ban(),
        moderation::unban::unban(),
        moderation::kick::kick(),
        economy::give::give(),
        leaderboard::listleaderboard::listleaderboard(),
        leaderboard::removefromboard::removefromboard(),
        config::setapikey::setapikey(),
        utility::help::help(),
    ]
}
