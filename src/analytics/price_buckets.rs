//! Buckets transactions by price for the bar chart.

use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error,
    transaction::{Transaction, TransactionFilter, get_matching_transactions},
};

const BUCKET_WIDTH: f64 = 100.0;
const BUCKET_COUNT: usize = 10;
/// Prices from 900 upwards share the last bucket.
const TERMINAL_BUCKET: usize = BUCKET_COUNT - 1;
const TERMINAL_BUCKET_LABEL: &str = "901-above";

/// The number of transactions in one price range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBucket {
    /// The price range, e.g. "100-199" or "901-above".
    #[serde(rename = "_id")]
    pub range: String,
    /// How many transactions fall in the range.
    pub count: u64,
}

/// Count the transactions that match `filter` in each price bucket.
///
/// # Errors
/// Returns [Error::SqlError] if the transactions cannot be queried.
pub fn histogram(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<PriceBucket>, Error> {
    let transactions = get_matching_transactions(filter, connection)?;

    Ok(bucket_prices(&transactions))
}

/// Count `transactions` per price bucket.
///
/// Buckets are the half-open ranges `[0, 100)`, `[100, 200)`, ..., `[800, 900)`
/// plus `[900, ∞)`. All ten buckets are returned in ascending order, including
/// empty ones, so chart axes stay the same between requests.
pub(super) fn bucket_prices(transactions: &[Transaction]) -> Vec<PriceBucket> {
    let mut counts = [0u64; BUCKET_COUNT];

    for transaction in transactions {
        counts[bucket_index(transaction.price)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| PriceBucket {
            range: bucket_label(index),
            count,
        })
        .collect()
}

fn bucket_index(price: f64) -> usize {
    // Float to int casts saturate, so negative prices land in the first bucket.
    ((price / BUCKET_WIDTH).floor() as usize).min(TERMINAL_BUCKET)
}

fn bucket_label(index: usize) -> String {
    if index == TERMINAL_BUCKET {
        return TERMINAL_BUCKET_LABEL.to_owned();
    }

    let lower = index * BUCKET_WIDTH as usize;
    format!("{lower}-{}", lower + BUCKET_WIDTH as usize - 1)
}
