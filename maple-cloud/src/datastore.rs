use crate::client::{API_KEY_HEADER, CloudService};
use crate::error::{CloudError, error_for_status};

/// Standard data store holding per-player currency balances.
pub const CURRENCY_DATASTORE: &str = "player_currency";

/// Entry key convention for currency balances.
pub fn currency_entry_key(user_id: u64) -> String {
    format!("player_{user_id}")
}

impl CloudService {
    /// Atomically add `delta` to a standard data store entry and return
    /// the new value. Missing entries start from zero, so this also
    /// creates the balance for first-time recipients.
    pub async fn increment_standard_entry(
        &self,
        api_key: &str,
        universe_id: u64,
        datastore: &str,
        entry_key: &str,
        delta: i64,
    ) -> Result<i64, CloudError> {
        let url = format!(
            "{}/datastores/v1/universes/{}/standard-datastores/datastore/entries/entry/increment",
            self.apis_base, universe_id
        );

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .query(&[
                ("datastoreName", datastore),
                ("entryKey", entry_key),
                ("incrementBy", &delta.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(
                status,
                &format!("incrementing `{entry_key}` in `{datastore}`"),
            ));
        }

        // The response body is the bare new value.
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::currency_entry_key;

    #[test]
    fn currency_keys_follow_the_player_convention() {
        assert_eq!(currency_entry_key(261), "player_261");
    }
}
