//! Fintrack is a personal finance tracker for recording income and expenses.
//!
//! This library provides a JSON REST API backed by SQLite. Every record belongs
//! to exactly one user, and the API computes the monthly and per-category
//! aggregates and reports that clients display.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod auth;
mod database_id;
mod db;
mod endpoints;
mod extract;
mod logging;
mod record;
mod report;
mod response;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{PasswordHash, Session, User, UserID, ValidatedPassword, create_user};
pub use database_id::{DatabaseId, RecordId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use record::{
    Category, Expense, ExpenseCategory, Income, IncomeCategory, Record, RecordDraft, RecordKind,
    create_record,
};
pub use routing::build_router;
pub use timezone::{get_local_offset, local_today};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body or query string failed validation.
    ///
    /// The string is shown to the client as-is, so it should say which field
    /// was wrong and how to fix it.
    #[error("{0}")]
    Validation(String),

    /// The requested record does not exist.
    ///
    /// The string is the human readable name of the record kind, e.g.
    /// "expense" or "income entry".
    #[error("{} not found", capitalize(.0))]
    RecordNotFound(&'static str),

    /// The record exists but belongs to another user.
    ///
    /// This is deliberately a different error from [Error::RecordNotFound]
    /// so that clients can tell the two cases apart.
    #[error("Not authorized to {action} this {noun}")]
    NotOwner {
        /// What the user tried to do, e.g. "access", "update" or "delete".
        action: &'static str,
        /// The human readable name of the record kind.
        noun: &'static str,
    },

    /// The request did not carry a valid bearer token.
    #[error("Not authorized to access this route")]
    Unauthenticated,

    /// The email and password combination did not match a user.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A user with the given email address already exists.
    #[error("User already exists")]
    DuplicateEmail,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An access token could not be signed.
    #[error("could not create token: {0}")]
    TokenCreation(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The request body is larger than the server accepts.
    #[error("Request body is too large")]
    PayloadTooLarge,

    /// A report could not be written as CSV.
    #[error("could not write CSV: {0}")]
    CsvError(String),
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::DuplicateEmail | Error::TooWeak(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::RecordNotFound(_) | Error::NotFound => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::NotOwner { .. } | Error::Unauthenticated | Error::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Error::HashingError(_)
            | Error::TokenCreation(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::InvalidTimezoneError(_)
            | Error::CsvError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Any errors that are not handled above are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "Server Error".to_owned()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}
