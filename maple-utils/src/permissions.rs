use poise::serenity_prelude as serenity;

/// Whether a user may operate the bot's commands in a guild.
///
/// Every command is admin-gated, so this is the only permission check
/// the bot ever makes. The guild owner always qualifies; anyone else
/// needs a role carrying ADMINISTRATOR. Role permissions are resolved
/// over HTTP as the union of the member's roles plus @everyone.
pub async fn is_guild_admin(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<bool> {
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == user_id {
        return Ok(true);
    }

    let member = guild_id.member(http, user_id).await?;
    let roles = guild_id.roles(http).await?;
    let everyone_role_id = serenity::RoleId::new(guild_id.get());

    let mut resolved = serenity::Permissions::empty();
    for role in roles.values() {
        if role.id == everyone_role_id || member.roles.contains(&role.id) {
            resolved |= role.permissions;
        }
    }

    Ok(resolved.contains(serenity::Permissions::ADMINISTRATOR))
}
