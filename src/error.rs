use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use thiserror::Error;

use crate::response::ApiResponse;
use crate::validation::ValidationError;

/// The book operation a request was performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    fn not_found_message(self) -> &'static str {
        match self {
            Action::Create | Action::Read => "Buku tidak ditemukan",
            Action::Update => "Gagal memperbarui buku. Id tidak ditemukan",
            Action::Delete => "Buku gagal dihapus. Id tidak ditemukan",
        }
    }

    fn persist_failure_message(self) -> &'static str {
        match self {
            Action::Create => "Buku gagal ditambahkan",
            Action::Read => "Buku gagal dimuat",
            Action::Update => "Buku gagal diperbarui",
            Action::Delete => "Buku gagal dihapus",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Action::Create => "Gagal menambahkan buku",
            Action::Read => "Gagal memuat buku",
            Action::Update => "Gagal memperbarui buku",
            Action::Delete => "Gagal menghapus buku",
        };
        f.write_str(prefix)
    }
}

/// Every way a book request can fail. The `Display` text is the message sent
/// to the client.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("{action}. {source}")]
    Invalid {
        action: Action,
        source: ValidationError,
    },

    #[error("{}", .action.not_found_message())]
    NotFound { action: Action },

    #[error("{}", .action.persist_failure_message())]
    PersistFailure { action: Action },

    #[error("Gagal memproses permintaan. {0}")]
    InvalidRequest(String),
}

impl BookError {
    pub fn invalid(action: Action) -> impl FnOnce(ValidationError) -> BookError {
        move |source| BookError::Invalid { action, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            BookError::Invalid { .. } | BookError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BookError::NotFound { .. } => StatusCode::NOT_FOUND,
            BookError::PersistFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BookError> for ApiResponse {
    fn from(err: BookError) -> Self {
        let code = err.status_code();
        match err {
            BookError::PersistFailure { .. } => ApiResponse::error(code, err.to_string()),
            _ => ApiResponse::fail(code, err.to_string()),
        }
    }
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        ApiResponse::from(self).into_response()
    }
}

impl From<JsonRejection> for BookError {
    fn from(rejection: JsonRejection) -> Self {
        BookError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for BookError {
    fn from(rejection: QueryRejection) -> Self {
        BookError::InvalidRequest(rejection.body_text())
    }
}
