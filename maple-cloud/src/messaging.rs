use serde::Serialize;

use crate::client::{API_KEY_HEADER, CloudService};
use crate::error::{CloudError, error_for_status};

/// Topic the experience subscribes to for moderation kick requests.
pub const KICK_TOPIC: &str = "DiscordKick";

/// Messaging service cap on a published payload.
const MAX_MESSAGE_LEN: usize = 1024;

#[derive(Serialize)]
struct PublishBody<'a> {
    message: &'a str,
}

impl CloudService {
    /// Publish a payload on a messaging-service topic so the live game
    /// servers of the universe can react to it.
    pub async fn publish_message(
        &self,
        api_key: &str,
        universe_id: u64,
        topic: &str,
        payload: &str,
    ) -> Result<(), CloudError> {
        if payload.len() > MAX_MESSAGE_LEN {
            return Err(CloudError::InvalidInput(format!(
                "message payloads are capped at {MAX_MESSAGE_LEN} characters"
            )));
        }

        let url = format!(
            "{}/messaging-service/v1/universes/{}/topics/{}",
            self.apis_base, universe_id, topic
        );

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(&PublishBody { message: payload })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        if status.as_u16() == 403 {
            return Err(CloudError::Auth(
                "publishing is not allowed on this universe".to_owned(),
            ));
        }

        Err(error_for_status(
            status,
            &format!("publishing to topic `{topic}`"),
        ))
    }
}
