use serde::{Deserialize, Serialize};

use crate::client::{API_KEY_HEADER, CloudService};
use crate::error::{CloudError, error_for_status};

/// One entry of an ordered data store, listed in descending value order.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct OrderedEntry {
    pub id: String,
    pub value: i64,
}

/// A listing page plus the opaque cursor for the page after it.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedEntryPage {
    #[serde(default)]
    pub entries: Vec<OrderedEntry>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Serialize)]
struct EntryValueBody {
    value: i64,
}

impl CloudService {
    fn ordered_store_url(&self, universe_id: u64, datastore: &str, scope: &str) -> String {
        format!(
            "{}/ordered-data-stores/v1/universes/{}/orderedDataStores/{}/scopes/{}/entries",
            self.apis_base, universe_id, datastore, scope
        )
    }

    /// List one page of an ordered data store, descending by value.
    ///
    /// `page_token` of `None` requests the first page. The returned
    /// token is normalized so the last page always carries `None` (the
    /// API reports it as an empty string).
    pub async fn list_ordered_entries(
        &self,
        api_key: &str,
        universe_id: u64,
        datastore: &str,
        scope: &str,
        max_page_size: u32,
        page_token: Option<&str>,
    ) -> Result<OrderedEntryPage, CloudError> {
        let mut request = self
            .http
            .get(self.ordered_store_url(universe_id, datastore, scope))
            .header(API_KEY_HEADER, api_key)
            .query(&[
                ("max_page_size", max_page_size.to_string()),
                ("order_by", "desc".to_owned()),
            ]);

        if let Some(token) = page_token {
            request = request.query(&[("page_token", token)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(
                status,
                &format!("listing `{datastore}` (scope `{scope}`)"),
            ));
        }

        let mut page: OrderedEntryPage = response.json().await?;
        page.next_page_token = page.next_page_token.filter(|token| !token.is_empty());

        Ok(page)
    }

    /// Fetch a single ordered data store entry by key.
    pub async fn get_ordered_entry(
        &self,
        api_key: &str,
        universe_id: u64,
        datastore: &str,
        scope: &str,
        entry_id: &str,
    ) -> Result<OrderedEntry, CloudError> {
        let url = format!(
            "{}/{}",
            self.ordered_store_url(universe_id, datastore, scope),
            entry_id
        );

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(
                status,
                &format!("fetching `{entry_id}` from `{datastore}`"),
            ));
        }

        Ok(response.json().await?)
    }

    /// "Remove" an entry by writing value 0.
    ///
    /// The ordered data store API has no delete primitive, so the zeroed
    /// entry remains visible in listings. Callers surface that to the
    /// operator rather than pretending the key is gone.
    pub async fn zero_ordered_entry(
        &self,
        api_key: &str,
        universe_id: u64,
        datastore: &str,
        scope: &str,
        entry_id: &str,
    ) -> Result<(), CloudError> {
        let url = format!(
            "{}/{}",
            self.ordered_store_url(universe_id, datastore, scope),
            entry_id
        );

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(&EntryValueBody { value: 0 })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(error_for_status(
            status,
            &format!("zeroing `{entry_id}` in `{datastore}`"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedEntryPage;

    #[test]
    fn listing_payloads_deserialize() {
        let page: OrderedEntryPage = serde_json::from_str(
            r#"{
                "entries": [
                    {"path": "p", "id": "player_1", "value": 900},
                    {"path": "p", "id": "player_2", "value": 250}
                ],
                "nextPageToken": "tok-2"
            }"#,
        )
        .expect("well-formed page");

        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].id, "player_1");
        assert_eq!(page.entries[0].value, 900);
        assert_eq!(page.next_page_token.as_deref(), Some("tok-2"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let page: OrderedEntryPage = serde_json::from_str("{}").expect("empty page");
        assert!(page.entries.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
