//! The API endpoints URIs.

/// Liveness probe.
pub const HEALTH: &str = "/api/v1/health";
/// Paginated, filtered transaction listing.
pub const TRANSACTIONS: &str = "/api/v1/transactions";
/// Sale statistics plus the matching transactions.
pub const STATISTICS: &str = "/api/v1/statistics";
/// Price histogram.
pub const BAR_CHART: &str = "/api/v1/bar-chart";
/// Category breakdown.
pub const PIE_CHART: &str = "/api/v1/pie-chart";
/// Statistics, pie chart and bar chart in one response.
pub const COMBINED: &str = "/api/v1/combined";
