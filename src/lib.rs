//! Sales dashboard is a small analytics service over a single collection of
//! e-commerce sale records.
//!
//! It lists, filters and paginates transactions, and computes a price
//! histogram, a category breakdown and summary statistics for a calendar
//! month or an explicit date range. Results are served as JSON.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod analytics;
mod app_state;
mod db;
mod endpoints;
mod logging;
mod pagination;
mod response;
mod routing;
mod transaction;

pub use analytics::{
    CategoryCount, CombinedView, PriceBucket, SaleStatistics, category_breakdown, combined_view,
    histogram, statistics,
};
pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::{PageRequest, PaginationConfig};
pub use routing::build_router;
pub use transaction::{
    DateScope, FilterParams, NewTransaction, Pagination, ScopeRequirement, SoldFilter,
    Transaction, TransactionFilter, TransactionId, TransactionPage, build_filter,
    count_transactions, create_transaction, list_transactions, parse_transactions_json,
    replace_all_transactions,
};

use crate::response::ErrorBody;

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
    /// A request parameter violated one of its constraints, e.g. a month
    /// outside 1-12 or a malformed date.
    ///
    /// The string describes the violated constraint and is shown to the
    /// client as-is.
    #[error("{0}")]
    Validation(String),

    /// The requested data was not found.
    ///
    /// For the transaction listing this means the filter and page produced
    /// no rows. It is a "no data" signal, not a fault.
    #[error("{0}")]
    NotFound(String),

    /// A record passed to the ingestion step does not satisfy the
    /// invariants of a stored transaction.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// The ingestion input could not be parsed as JSON.
    #[error("could not parse transactions JSON: {0}")]
    InvalidJson(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(message) => ErrorBody::new(StatusCode::BAD_REQUEST, message),
            Error::NotFound(message) => ErrorBody::new(StatusCode::NOT_FOUND, message),
            error @ (Error::InvalidTransaction(_) | Error::InvalidJson(_)) => {
                ErrorBody::new(StatusCode::BAD_REQUEST, error.to_string())
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorBody::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, check the server logs for more details.",
                )
            }
        }
        .into_response()
    }
}
