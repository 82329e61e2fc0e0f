//! Summary totals for a set of transactions.

use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error,
    transaction::{Transaction, TransactionFilter, get_matching_transactions},
};

/// Sale totals for the transactions that match a filter.
///
/// An empty result is all zeros rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    /// The sum of the prices of the sold transactions.
    pub total_sale_amount: f64,
    /// The number of sold transactions.
    pub sold_items_count: u64,
    /// The number of unsold transactions.
    pub unsold_items_count: u64,
    /// The number of transactions.
    pub total_items_count: u64,
}

/// Compute [SaleStatistics] for the transactions that match `filter`.
///
/// # Errors
/// Returns [Error::SqlError] if the transactions cannot be queried.
pub fn statistics(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<SaleStatistics, Error> {
    let transactions = get_matching_transactions(filter, connection)?;

    Ok(summarize(&transactions))
}

/// Total up `transactions` in a single pass.
///
/// Only sold transactions contribute to the sale amount, but every
/// transaction is counted.
pub(super) fn summarize(transactions: &[Transaction]) -> SaleStatistics {
    transactions
        .iter()
        .fold(SaleStatistics::default(), |mut totals, transaction| {
            if transaction.sold {
                totals.total_sale_amount += transaction.price;
                totals.sold_items_count += 1;
            } else {
                totals.unsold_items_count += 1;
            }
            totals.total_items_count += 1;

            totals
        })
}
