//! Aggregations over the transactions in a month or date range.
//!
//! Each aggregation reads the matching transactions and reduces them in
//! memory: a price histogram, a category breakdown and sale statistics.

mod categories;
mod combined;
mod handlers;
mod price_buckets;
mod totals;

pub use categories::{CategoryCount, category_breakdown};
pub use combined::{CombinedView, combined_view};
pub use handlers::{
    get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
    get_statistics_endpoint,
};
pub use price_buckets::{PriceBucket, histogram};
pub use totals::{SaleStatistics, statistics};
