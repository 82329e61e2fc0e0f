//! Sale transactions.
//!
//! This module contains everything related to the transaction records:
//! - The `Transaction` model and its table
//! - The filter builder shared by every view of the data
//! - Filtered queries, paginated listing, and bulk replacement of the record set
//! - The route handler for the transaction listing

mod core;
mod filter;
mod ingest;
mod listing;
mod query;
mod transactions_endpoint;

#[cfg(test)]
pub(crate) mod test_utils;

pub use self::core::{
    NewTransaction, Transaction, TransactionId, count_transactions, create_transaction,
    create_transaction_table,
};
pub use filter::{
    DateScope, FilterParams, ScopeRequirement, SoldFilter, TransactionFilter, build_filter,
};
pub use ingest::{parse_transactions_json, replace_all_transactions};
pub use listing::{Pagination, TransactionPage, list_transactions};
pub use transactions_endpoint::get_transactions_endpoint;

pub(crate) use query::get_matching_transactions;
