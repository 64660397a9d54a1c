//! Finsight is a web app for tracking your personal finances.
//!
//! It records income and expense transactions, tracks savings goals, and
//! serves a dashboard with charts and heuristic spending insights. This
//! library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod account;
mod alert;
mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod forms;
mod goal;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;
mod user;

pub use account::{Account, create_account};
pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use goal::{Goal, create_goal};
pub use logging::logging_middleware;
pub use routing::build_router;
pub use transaction::{Transaction, TransactionType, create_transaction};
pub use user::{UserId, get_or_create_user};

use crate::{
    alert::AlertTemplate,
    internal_server_error::{InternalServerErrorPageTemplate, render_internal_server_error},
    not_found::get_404_not_found_response,
};

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
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A negative amount was used to create a transaction.
    ///
    /// Amounts are magnitudes. Whether money came in or went out is carried
    /// by the transaction type, never by the sign of the amount.
    #[error("amounts must not be negative, got {0}")]
    NegativeAmount(f64),

    /// A string could not be parsed as a transaction type.
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// An empty string was used to create a savings goal name.
    #[error("goal name cannot be empty")]
    EmptyGoalName,

    /// An empty string was used to create a bank account name.
    #[error("account name cannot be empty")]
    EmptyAccountName,

    /// The user already has an account with this name.
    #[error("an account named \"{0}\" already exists")]
    DuplicateAccountName(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => {
                render_internal_server_error(InternalServerErrorPageTemplate {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                })
            }
            Error::DatabaseLockError => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::FutureDate(date) => AlertTemplate::error(
                "Invalid transaction date",
                &format!("{date} is a date in the future, which is not allowed."),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::NegativeAmount(amount) => AlertTemplate::error(
                "Invalid amount",
                &format!(
                    "{amount} is negative. Enter the amount as a positive number \
                    and pick income or expense instead."
                ),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::InvalidTransactionType(text) => AlertTemplate::error(
                "Invalid transaction type",
                &format!("\"{text}\" is not a transaction type. Choose income or expense."),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::EmptyGoalName => AlertTemplate::error(
                "Invalid goal name",
                "The goal name cannot be empty. Give the goal a short, descriptive name.",
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::EmptyAccountName => AlertTemplate::error(
                "Invalid account name",
                "The account name cannot be empty. Give the account a short, descriptive name.",
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::DuplicateAccountName(name) => AlertTemplate::error(
                "Duplicate account name",
                &format!(
                    "An account named \"{name}\" already exists. \
                    Choose a different name for the new account."
                ),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::InvalidTimezoneError(timezone) => AlertTemplate::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            )
            .into_response(StatusCode::INTERNAL_SERVER_ERROR),
            _ => AlertTemplate::error(
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
