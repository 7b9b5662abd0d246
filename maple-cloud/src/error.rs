use reqwest::StatusCode;

/// Failure taxonomy for Open Cloud calls.
///
/// `NotFound` is a normal outcome for idempotent operations (lifting a
/// restriction that no longer exists, checking a missing leaderboard
/// key). Everything else is reported to the operator as-is; nothing is
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Auth(String),
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CloudError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Translate a non-success HTTP status into the taxonomy. `what`
/// describes the attempted operation, e.g. "listing `coins` (scope
/// `global`)".
pub(crate) fn error_for_status(status: StatusCode, what: &str) -> CloudError {
    match status.as_u16() {
        400 => CloudError::InvalidInput(format!("Roblox rejected the request while {what}")),
        401 => CloudError::Auth("the API key is not valid for this operation".to_owned()),
        403 => CloudError::Auth("access denied for this API key".to_owned()),
        404 => CloudError::NotFound(format!("nothing found while {what}")),
        429 => CloudError::Remote {
            status: 429,
            message: "rate limited by Roblox, try again shortly".to_owned(),
        },
        code @ 500..=599 => CloudError::Remote {
            status: code,
            message: format!("Roblox server error (HTTP {code}) while {what}"),
        },
        code => CloudError::Remote {
            status: code,
            message: format!("unexpected HTTP {code} while {what}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{CloudError, error_for_status};
    use reqwest::StatusCode;

    fn translate(code: u16) -> CloudError {
        error_for_status(
            StatusCode::from_u16(code).expect("valid status"),
            "testing",
        )
    }

    #[test]
    fn auth_statuses_map_to_auth() {
        assert!(translate(401).is_auth());
        assert!(translate(403).is_auth());
    }

    #[test]
    fn missing_targets_map_to_not_found() {
        assert!(translate(404).is_not_found());
    }

    #[test]
    fn bad_requests_map_to_invalid_input() {
        assert!(matches!(translate(400), CloudError::InvalidInput(_)));
    }

    #[test]
    fn other_statuses_keep_their_code() {
        for code in [429_u16, 500, 502, 503, 418] {
            match translate(code) {
                CloudError::Remote { status, .. } => assert_eq!(status, code),
                other => panic!("expected Remote for {code}, got {other:?}"),
            }
        }
    }
}
