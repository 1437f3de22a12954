use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// ApiError
///
/// The single error type surfaced by every handler and by the `AuthUser`
/// extractor. Each variant maps to one HTTP status and one stable,
/// machine-readable code, so clients can branch on `error` without parsing
/// the human-readable `message`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no usable session: missing header, missing
    /// "Bearer " prefix, bad signature, expired token, or a token whose
    /// subject no longer exists.
    #[error("{0}")]
    AuthorizationFailed(&'static str),

    /// The session is valid but the caller may not act on this resource
    /// (e.g. editing a question they do not own).
    #[error("{0}")]
    PermissionDenied(&'static str),

    #[error("the requested question does not exist")]
    QuestionNotFound,

    #[error("the requested user does not exist")]
    UserNotFound,

    #[error("question content must not be empty")]
    EmptyContent,

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::AuthorizationFailed(_) => (StatusCode::UNAUTHORIZED, "authorization_failed"),
            ApiError::PermissionDenied(_) => (StatusCode::FORBIDDEN, "authorization_failed"),
            ApiError::QuestionNotFound => (StatusCode::NOT_FOUND, "question_not_found"),
            ApiError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
            ApiError::EmptyContent => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Storage failures are logged with their cause but surfaced to the
        // client as an opaque 500.
        if let ApiError::Database(e) = &self {
            tracing::error!("repository error: {e:?}");
        }

        let (status, code) = self.status_and_code();
        (
            status,
            Json(json!({
                "error": code,
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}
