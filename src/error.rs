//! Tipos de error del cliente

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// 401/403 del API. El logout forzado ya se aplicó cuando se construye.
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Slot {slot_id} on {date} is no longer free")]
    SlotConflict { date: String, slot_id: u8 },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl ApiError {
    /// Mensaje normalizado que se muestra en la UI
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { message, .. } | ApiError::Http { message, .. } => {
                message.clone()
            }
            ApiError::Network(message)
            | ApiError::Parse(message)
            | ApiError::Storage(message)
            | ApiError::Invalid(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
