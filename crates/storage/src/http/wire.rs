use reqwest::StatusCode;
use serde::Deserialize;

use crate::repository::StorageError;

/// Successful `register`/`login` reply.
#[derive(Debug, Deserialize)]
pub(crate) struct UserReply {
    pub username: String,
}

/// `{ "error": "..." }` body the backend attaches to refusals.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorReply {
    pub error: String,
}

pub(crate) fn transport(err: &reqwest::Error) -> StorageError {
    if err.is_decode() {
        StorageError::Serialization(err.to_string())
    } else {
        StorageError::Connection(err.to_string())
    }
}

/// Map a non-success reply to a `StorageError`.
///
/// An `{error}` body wins over the status code so refusals like a wrong
/// password reach the player verbatim.
pub(crate) fn classify_failure(status: StatusCode, body: &str) -> StorageError {
    if let Ok(reply) = serde_json::from_str::<ErrorReply>(body) {
        if status == StatusCode::UNAUTHORIZED && reply.error == "Not authenticated" {
            return StorageError::Unauthenticated;
        }
        return StorageError::Rejected(reply.error);
    }
    if status == StatusCode::UNAUTHORIZED {
        return StorageError::Unauthenticated;
    }
    StorageError::HttpStatus(status.as_u16())
}
