use std::borrow::Cow;

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(Cow<'static, str>),

    #[error("Token missing")]
    Unauthenticated,

    #[error("Invalid token")]
    InvalidCredential,

    /// Signin failures: unknown username or wrong password.
    #[error("{0}")]
    WrongCredentials(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    /// The store accepted the call but nothing changed.
    #[error("{0}")]
    NotApplied(&'static str),

    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        use AppError::*;
        match self {
            Validation(_) | NotApplied(_) => StatusCode::BAD_REQUEST,
            Unauthenticated | WrongCredentials(_) => StatusCode::UNAUTHORIZED,
            InvalidCredential | Forbidden(_) => StatusCode::FORBIDDEN,
            NotFound(_) => StatusCode::NOT_FOUND,
            Conflict(_) => StatusCode::CONFLICT,
            Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store { message, source } = &self {
            tracing::error!(error = ?source, "{message}");
        }

        (
            self.status(),
            Json(json!({ "result": false, "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Tags a fallible store call with the message the client will see.
pub trait StoreContext<T> {
    fn store_err(self, message: &'static str) -> AppResult<T>;
}

impl<T, E> StoreContext<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn store_err(self, message: &'static str) -> AppResult<T> {
        self.map_err(|err| AppError::Store { message, source: err.into() })
    }
}
