//! Defines the route handler for listing transactions.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    db::lock_connection,
    pagination::{PageRequest, PaginationConfig},
    response::ApiResponse,
};

use super::{
    filter::{FilterParams, ScopeRequirement, build_filter},
    listing::list_transactions,
};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls page sizes.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The raw paging parameters of a listing request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    page: Option<String>,
    limit: Option<String>,
}

/// List the transactions that match the query's filters, one page at a time.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionsState>,
    filter_params: Result<Query<FilterParams>, QueryRejection>,
    page_params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(filter_params) = filter_params?;
    let Query(page_params) = page_params?;
    let filter = build_filter(&filter_params, ScopeRequirement::Optional)?;
    let page_request = PageRequest::parse(
        page_params.page.as_deref(),
        page_params.limit.as_deref(),
        &state.pagination_config,
    )?;

    let connection = lock_connection(&state.db_connection)?;
    let transaction_page = list_transactions(&filter, page_request, &connection)?;

    Ok(ApiResponse::ok("Transactions fetched successfully", transaction_page).into_response())
}
