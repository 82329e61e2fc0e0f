//! Statistics and both charts computed from one scan.

use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error,
    transaction::{FilterParams, ScopeRequirement, build_filter, get_matching_transactions},
};

use super::{
    categories::{CategoryCount, count_categories},
    price_buckets::{PriceBucket, bucket_prices},
    totals::{SaleStatistics, summarize},
};

/// Everything the dashboard needs for one month or date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedView {
    /// Sale totals.
    pub statistics: SaleStatistics,
    /// Transactions per category.
    pub pie_chart: Vec<CategoryCount>,
    /// Transactions per price range.
    pub bar_chart: Vec<PriceBucket>,
}

/// Build one filter from `params` and compute statistics, the category
/// breakdown and the price histogram over the same set of transactions.
///
/// The transactions are read once, so the three results always agree with
/// each other even if the store changes during the call.
///
/// # Errors
/// Returns an [Error::Validation] if `params` do not describe a valid month
/// or date range, or an [Error::SqlError] if the transactions cannot be
/// queried. No partial result is returned.
pub fn combined_view(params: &FilterParams, connection: &Connection) -> Result<CombinedView, Error> {
    let filter = build_filter(params, ScopeRequirement::Required)?;
    let transactions = get_matching_transactions(&filter, connection)?;

    Ok(CombinedView {
        statistics: summarize(&transactions),
        pie_chart: count_categories(&transactions),
        bar_chart: bucket_prices(&transactions),
    })
}
