//! Replaces the stored record set with a new one.
//!
//! The swap runs in a single immediate SQLite transaction, so readers on
//! other connections see either the old record set or the new one, never a
//! mix of both.

use rusqlite::{Connection, TransactionBehavior};

use crate::Error;

use super::core::{NewTransaction, create_transaction};

/// Parse a JSON array of sale records.
///
/// # Errors
/// Returns [Error::InvalidJson] if `json` is not an array of records.
pub fn parse_transactions_json(json: &str) -> Result<Vec<NewTransaction>, Error> {
    serde_json::from_str(json).map_err(|error| Error::InvalidJson(error.to_string()))
}

/// Delete every stored transaction and insert `transactions` in their place.
///
/// Returns the number of transactions inserted. If any record is invalid or
/// an insert fails, the previous record set is left untouched.
///
/// # Errors
/// Returns:
/// - [Error::InvalidTransaction] if a record fails validation,
/// - [Error::SqlError] if the swap could not be committed.
pub fn replace_all_transactions(
    transactions: Vec<NewTransaction>,
    connection: &mut Connection,
) -> Result<usize, Error> {
    let snapshot = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let deleted = snapshot.execute("DELETE FROM sale_transaction", ())?;

    let count = transactions.len();
    for (index, transaction) in transactions.into_iter().enumerate() {
        create_transaction(transaction, &snapshot).inspect_err(|error| {
            tracing::warn!("rejecting import, record #{index} could not be stored: {error}")
        })?;
    }

    snapshot.commit()?;

    tracing::info!("replaced {deleted} transactions with {count} new transactions");

    Ok(count)
}
