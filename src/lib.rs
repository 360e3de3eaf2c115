//! Extratify is a small web page for entering personal-finance transactions.
//!
//! The page shows a form for adding a transaction (type, date, description,
//! category, account and value) and a table listing the transactions added so
//! far. Transactions are kept in memory for as long as the server runs.
//!
//! This library provides the router that directly serves the HTML page and the
//! form endpoint.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod config;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::AppConfig;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    Column, Description, FormLayout, MIN_DESCRIPTION_LENGTH, TableColumns, Transaction,
    TransactionList, TransactionType, TransactionValue,
};

use crate::{alert::Alert, internal_server_error::InternalServerError};

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
///
/// The first four variants describe invalid form input. The transaction form
/// shows their messages next to the offending field, so they are written in
/// the page's language.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The description has fewer than [MIN_DESCRIPTION_LENGTH] characters.
    #[error("Descrição muito curta")]
    DescriptionTooShort,

    /// The value of a transaction was empty.
    #[error("Informe o valor da transação")]
    EmptyValue,

    /// The transaction type was not one of expense, income or transfer.
    #[error("Tipo de transação inválido")]
    InvalidTransactionType(String),

    /// The transaction date was missing or not an ISO 8601 calendar date.
    #[error("Data inválida")]
    InvalidDate(String),

    /// The lock guarding the transaction list was poisoned by a panicking
    /// request handler.
    #[error("could not acquire the transaction list lock")]
    TransactionListLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A table column name did not match any known column.
    #[error("unknown table column \"{0}\"")]
    UnknownColumn(String),

    /// A table column was listed more than once.
    #[error("the table column \"{0}\" is listed more than once")]
    DuplicateColumn(String),

    /// The table column list was empty.
    #[error("at least one table column must be configured")]
    NoColumns,

    /// A form layout name did not match any known layout.
    #[error("unknown form layout \"{0}\", expected \"inline\" or \"dialog\"")]
    UnknownFormLayout(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::TransactionListLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let alert = match self {
            Error::InvalidTimezoneError(timezone) => Alert::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            Error::TransactionListLockError => Alert::error(
                "Could not save transaction",
                "The transaction list is unavailable. Try again later or check the server logs.",
            ),
            _ => Alert::error(
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            ),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, alert.into_html()).into_response()
    }
}
