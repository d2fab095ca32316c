use axum::http::StatusCode;
use thiserror::Error;

/// Outcome of a failed register/login. Shown inline on the login form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("username is already taken")]
    UsernameTaken,
    #[error("user not found")]
    UserNotFound,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed store: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid record for '{username}': {reason}")]
    InvalidRecord { username: String, reason: String },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
