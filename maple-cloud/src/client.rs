use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CloudError, error_for_status};

const APIS_BASE_URL: &str = "https://apis.roblox.com";
const USERS_BASE_URL: &str = "https://users.roblox.com";

pub(crate) const API_KEY_HEADER: &str = "x-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Roblox Open Cloud and public users APIs.
///
/// Universe-scoped calls take the per-universe API key explicitly; the
/// service itself holds no credentials.
#[derive(Clone, Debug)]
pub struct CloudService {
    pub(crate) http: reqwest::Client,
    pub(crate) apis_base: String,
    users_base: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GameJoinRestriction<'a> {
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<String>,
    private_reason: &'a str,
    display_reason: &'a str,
    exclude_alt_accounts: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRestrictionBody<'a> {
    game_join_restriction: GameJoinRestriction<'a>,
}

/// Public profile data from the users API.
#[derive(Clone, Debug, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl CloudService {
    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            apis_base: APIS_BASE_URL.to_owned(),
            users_base: USERS_BASE_URL.to_owned(),
        })
    }

    fn restriction_url(&self, universe_id: u64, user_id: u64) -> String {
        format!(
            "{}/cloud/v2/universes/{}/user-restrictions/{}",
            self.apis_base, universe_id, user_id
        )
    }

    /// Apply a game-join restriction (ban) to a user. `duration_seconds`
    /// of `None` restricts the user permanently.
    pub async fn set_restriction(
        &self,
        api_key: &str,
        universe_id: u64,
        user_id: u64,
        reason: &str,
        duration_seconds: Option<u64>,
        exclude_alt_accounts: bool,
    ) -> Result<(), CloudError> {
        let body = UserRestrictionBody {
            game_join_restriction: GameJoinRestriction {
                active: true,
                duration: duration_seconds.map(|secs| format!("{secs}s")),
                private_reason: reason,
                display_reason: reason,
                exclude_alt_accounts,
            },
        };

        let response = self
            .http
            .patch(self.restriction_url(universe_id, user_id))
            .query(&[("updateMask", "gameJoinRestriction")])
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(error_for_status(
            status,
            &format!("restricting user {user_id}"),
        ))
    }

    /// Clear the game-join restriction for a user. Returns `NotFound`
    /// when no restriction resource exists, which callers treat as an
    /// already-unbanned user.
    pub async fn lift_restriction(
        &self,
        api_key: &str,
        universe_id: u64,
        user_id: u64,
    ) -> Result<(), CloudError> {
        let body = UserRestrictionBody {
            game_join_restriction: GameJoinRestriction {
                active: false,
                duration: None,
                private_reason: "",
                display_reason: "",
                exclude_alt_accounts: false,
            },
        };

        let response = self
            .http
            .patch(self.restriction_url(universe_id, user_id))
            .query(&[("updateMask", "gameJoinRestriction")])
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(error_for_status(
            status,
            &format!("lifting the restriction for user {user_id}"),
        ))
    }

    /// Probe an API key against a universe-scoped endpoint.
    ///
    /// Only 401/403 mean the key was rejected; any other answer (even a
    /// 404 on the probe target) proves the key was accepted.
    pub async fn validate_key(&self, api_key: &str, universe_id: u64) -> Result<(), CloudError> {
        let url = format!(
            "{}/datastores/v1/universes/{}/standard-datastores",
            self.apis_base, universe_id
        );

        let response = self
            .http
            .get(url)
            .query(&[("limit", "1")])
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            401 | 403 => Err(error_for_status(status, "validating the API key")),
            _ => Ok(()),
        }
    }

    /// Look up public profile data for a user id. Requires no API key.
    pub async fn user_info(&self, user_id: u64) -> Result<UserInfo, CloudError> {
        let url = format!("{}/v1/users/{}", self.users_base, user_id);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(
                status,
                &format!("looking up user {user_id}"),
            ));
        }

        Ok(response.json().await?)
    }
}
