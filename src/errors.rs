use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadReference(String),
    #[error("authentication required")]
    Unauthorized,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::BadReference(_) => StatusCode::BAD_REQUEST,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::Database(_) | Error::Migrate(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::Conflict(_) => "conflict",
            Error::BadReference(_) => "bad_reference",
            Error::Unauthorized => "unauthorized",
            Error::Database(_) | Error::Migrate(_) | Error::Io(_) => "internal_error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", &self);
        }
        (
            status,
            Json(json!({
                "error": self.code(),
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Error::Validation(err.to_string())
    }
}

/// Maps constraint violations on the write path: the unique index on
/// (user_id, job_id) is the authoritative duplicate guard, so a unique
/// violation surfaces as a conflict rather than an opaque database error.
pub fn classify_write_error(err: sqlx::Error) -> Error {
    use sqlx::error::ErrorKind;
    match err {
        sqlx::Error::Database(db) if matches!(db.kind(), ErrorKind::UniqueViolation) => {
            Error::Conflict("action for this job already exists for the user".into())
        }
        sqlx::Error::Database(db) if matches!(db.kind(), ErrorKind::ForeignKeyViolation) => {
            Error::BadReference("invalid job_id or user_id".into())
        }
        other => Error::Database(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn client_errors_map_to_client_statuses() {
        assert_eq!(
            Error::Validation("bad sort".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::BadReference("no such job".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Conflict("duplicate".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(Error::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    }

    #[traced_test]
    #[test]
    fn server_errors_are_opaque_and_logged() {
        let err = Error::Io(std::io::Error::other("connection reset"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(logs_contain("request failed"));
    }
}
