//! Counts transactions per category for the pie chart.

use std::collections::HashMap;

use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error,
    transaction::{Transaction, TransactionFilter, get_matching_transactions},
};

/// The number of transactions in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category exactly as stored.
    #[serde(rename = "_id")]
    pub category: String,
    /// How many transactions have this category.
    pub count: u64,
}

/// Count the transactions that match `filter` per category.
///
/// # Errors
/// Returns [Error::SqlError] if the transactions cannot be queried.
pub fn category_breakdown(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    let transactions = get_matching_transactions(filter, connection)?;

    Ok(count_categories(&transactions))
}

/// Group `transactions` by category and count each group.
///
/// Categories are compared verbatim, so "Books" and "books" are different
/// categories. The largest groups come first, ties are broken by name.
pub(super) fn count_categories(transactions: &[Transaction]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();

    for transaction in transactions {
        *counts.entry(transaction.category.as_str()).or_insert(0) += 1;
    }

    let mut categories: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_owned(),
            count,
        })
        .collect();

    categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));

    categories
}
