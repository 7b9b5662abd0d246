use std::time::Duration;

use tracing::{debug, warn};

use maple_database::{Database, impls::bans::delete_expired_bans};
use maple_utils::time::now_unix_secs;

pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 120;

/// Periodically delete ban records whose expiry has passed.
///
/// Runs unattended for the life of the process, so every failure is
/// logged and swallowed. Command handlers may race this task; a record
/// that disappears under a concurrent unban is a normal outcome on both
/// sides.
pub async fn run_ban_expiry_sweep(db: Database, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match delete_expired_bans(&db, now_unix_secs()).await {
            Ok(0) => {}
            Ok(removed) => debug!(removed, "expired ban records deleted"),
            Err(sweep_err) => warn!(?sweep_err, "ban expiry sweep failed"),
        }
    }
}
