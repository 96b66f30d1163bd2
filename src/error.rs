use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

pub const BOOKMARK_NOT_FOUND: &str = "This bookmark does not exist in your library";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Credentials taken")]
    CredentialsTaken,
    #[error("Credentials incorrect")]
    CredentialsIncorrect,
    #[error("{}", BOOKMARK_NOT_FOUND)]
    BookmarkNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::CredentialsTaken | Self::CredentialsIncorrect => StatusCode::FORBIDDEN,
            Self::BookmarkNotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Error");

        let body = match &self {
            Self::Validation(problems) => {
                json!({ "statusCode": code, "message": problems, "error": reason })
            }
            // 401 carries no detail about which check failed.
            Self::Unauthorized => json!({ "statusCode": code, "message": "Unauthorized" }),
            Self::CredentialsTaken | Self::CredentialsIncorrect | Self::BookmarkNotFound => {
                json!({ "statusCode": code, "message": self.to_string(), "error": reason })
            }
            Self::Store(err) => {
                error!(error = %err, "store failure");
                json!({ "statusCode": code, "message": "Internal server error" })
            }
            Self::Internal(err) => {
                error!(error = %err, "internal failure");
                json!({ "statusCode": code, "message": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}
