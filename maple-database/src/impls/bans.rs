use anyhow::Context as _;

use crate::{
    database::Database,
    model::bans::{BanExpiry, BanRecord},
};

#[derive(sqlx::FromRow)]
struct BanRow {
    user_id: i64,
    reason: String,
    duration: Option<String>,
    expires_at: Option<i64>,
    created_at: i64,
}

impl BanRow {
    fn into_record(self) -> anyhow::Result<BanRecord> {
        Ok(BanRecord {
            user_id: u64::try_from(self.user_id).context("user_id row out of u64 range")?,
            reason: self.reason,
            duration: self.duration,
            expires: BanExpiry::from_column(self.expires_at),
            created_at: u64::try_from(self.created_at).context("created_at row out of u64 range")?,
        })
    }
}

pub struct NewBan<'a> {
    pub user_id: u64,
    pub reason: &'a str,
    pub duration: Option<&'a str>,
    pub expires: BanExpiry,
}

/// Persist a ban record. One row per user id; bans are recorded after
/// the double-ban check, so a conflict means a concurrent insert and is
/// surfaced as an error.
pub async fn record_ban(db: &Database, ban: NewBan<'_>, now: u64) -> anyhow::Result<()> {
    let user_id = i64::try_from(ban.user_id).context("user_id out of i64 range")?;
    let expires_at = match ban.expires {
        BanExpiry::Permanent => None,
        BanExpiry::At(secs) => {
            Some(i64::try_from(secs).context("expiry instant out of i64 range")?)
        }
    };
    let created_at = i64::try_from(now).context("created_at out of i64 range")?;

    sqlx::query(
        "INSERT INTO experience_bans (user_id, reason, duration, expires_at, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(ban.reason)
    .bind(ban.duration)
    .bind(expires_at)
    .bind(created_at)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Return the ban record for a user, if one exists.
pub async fn find_ban(db: &Database, user_id: u64) -> anyhow::Result<Option<BanRecord>> {
    let user_id = i64::try_from(user_id).context("user_id out of i64 range")?;

    let row: Option<BanRow> = sqlx::query_as(
        "SELECT user_id, reason, duration, expires_at, created_at
         FROM experience_bans
         WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(db.pool())
    .await?;

    row.map(BanRow::into_record).transpose()
}

/// Delete the ban record for a user. Returns whether a row existed; a
/// missing row is a normal outcome when the expiry sweep got there
/// first.
pub async fn delete_ban(db: &Database, user_id: u64) -> anyhow::Result<bool> {
    let user_id = i64::try_from(user_id).context("user_id out of i64 range")?;

    let result = sqlx::query("DELETE FROM experience_bans WHERE user_id = $1")
        .bind(user_id)
        .execute(db.pool())
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete every finite ban whose expiry has passed. Permanent bans
/// (NULL expiry) are never touched. Returns the number of rows removed.
pub async fn delete_expired_bans(db: &Database, now: u64) -> anyhow::Result<u64> {
    let now = i64::try_from(now).context("now out of i64 range")?;

    let result = sqlx::query(
        "DELETE FROM experience_bans
         WHERE expires_at IS NOT NULL AND expires_at <= $1",
    )
    .bind(now)
    .execute(db.pool())
    .await?;

    Ok(result.rows_affected())
}
