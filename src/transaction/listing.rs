//! Pages through the transactions that match a filter.

use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error,
    pagination::{PageRequest, total_pages},
};

use super::{
    core::Transaction,
    filter::TransactionFilter,
    query::{count_matching_transactions, get_transaction_page},
};

/// One page of transactions plus how many there are in total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPage {
    /// The transactions on the requested page, in ID order.
    pub transactions: Vec<Transaction>,
    /// Where this page sits in the full result set.
    pub pagination: Pagination,
}

/// Page metadata for a [TransactionPage].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// The 1-based page number that was requested.
    pub current_page: u64,
    /// The number of transactions matching the filter across all pages.
    pub total_items: u64,
    /// `ceil(total_items / limit)`.
    pub total_pages: u64,
}

/// Get one page of the transactions that match `filter`.
///
/// # Errors
/// Returns:
/// - [Error::NotFound] if the page is empty, either because nothing matches
///   the filter or because the page is past the last one,
/// - [Error::SqlError] if a query fails.
pub fn list_transactions(
    filter: &TransactionFilter,
    page_request: PageRequest,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    let transactions = get_transaction_page(
        filter,
        page_request.offset(),
        page_request.limit,
        connection,
    )?;

    if transactions.is_empty() {
        return Err(Error::NotFound("No transactions found".to_owned()));
    }

    let total_items = count_matching_transactions(filter, connection)?;

    Ok(TransactionPage {
        transactions,
        pagination: Pagination {
            current_page: page_request.page,
            total_items,
            total_pages: total_pages(total_items, page_request.limit),
        },
    })
}
