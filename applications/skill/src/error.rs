/// Skill error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pco_client::ClientError;
use pco_core::PcoError;
use pco_playback::PlaybackError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SkillError>;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Planning Center request failed: {0}")]
    Client(#[from] ClientError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Storage error: {0}")]
    Storage(#[from] PcoError),

    #[error("No handler for request: {0}")]
    UnhandledRequest(String),

    #[error("Account not linked")]
    AccountNotLinked,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<pco_storage::StorageError> for SkillError {
    fn from(err: pco_storage::StorageError) -> Self {
        SkillError::Storage(err.into())
    }
}

impl SkillError {
    /// Whether the user has to (re)link their Planning Center account
    pub fn needs_account_link(&self) -> bool {
        matches!(
            self,
            SkillError::AccountNotLinked | SkillError::Client(ClientError::AuthRequired)
        )
    }
}

impl IntoResponse for SkillError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            SkillError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            SkillError::UnhandledRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            SkillError::AccountNotLinked => {
                (StatusCode::UNAUTHORIZED, "Account not linked".to_string())
            }
            SkillError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
            SkillError::Client(ref e) => {
                tracing::error!("Planning Center error: {:?}", e);
                (StatusCode::BAD_GATEWAY, "Planning Center error".to_string())
            }
            SkillError::Playback(ref e) => {
                tracing::error!("Playback error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Playback error".to_string())
            }
            SkillError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
