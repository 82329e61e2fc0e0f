//! Route handlers for the statistics and chart endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    db::lock_connection,
    response::ApiResponse,
    transaction::{
        FilterParams, ScopeRequirement, SoldFilter, Transaction, build_filter,
        get_matching_transactions,
    },
};

use super::{
    categories::category_breakdown,
    combined::combined_view,
    price_buckets::histogram,
    totals::{SaleStatistics, summarize},
};

/// The state needed by the analytics endpoints.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct StatisticsData {
    statistics: SaleStatistics,
    transactions: Vec<Transaction>,
}

/// Sale statistics for a month or date range, along with the transactions
/// they were computed from.
pub async fn get_statistics_endpoint(
    State(state): State<AnalyticsState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(params) = params?;
    let filter = build_filter(&params, ScopeRequirement::Required)?;

    let connection = lock_connection(&state.db_connection)?;
    let transactions = get_matching_transactions(&filter, &connection)?;
    let statistics = summarize(&transactions);

    let message = match filter.sold {
        SoldFilter::Sold => "Statistics fetched successfully (Sold)",
        SoldFilter::Unsold => "Statistics fetched successfully (Unsold)",
        SoldFilter::Both => "Statistics fetched successfully",
    };

    Ok(ApiResponse::ok(
        message,
        StatisticsData {
            statistics,
            transactions,
        },
    )
    .into_response())
}

/// The number of transactions per price range.
pub async fn get_bar_chart_endpoint(
    State(state): State<AnalyticsState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(params) = params?;
    let filter = build_filter(&params, ScopeRequirement::Required)?;

    let connection = lock_connection(&state.db_connection)?;
    let buckets = histogram(&filter, &connection)?;

    Ok(ApiResponse::ok("Bar chart data fetched successfully", buckets).into_response())
}

/// The number of transactions per category.
pub async fn get_pie_chart_endpoint(
    State(state): State<AnalyticsState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(params) = params?;
    let filter = build_filter(&params, ScopeRequirement::Required)?;

    let connection = lock_connection(&state.db_connection)?;
    let categories = category_breakdown(&filter, &connection)?;

    Ok(ApiResponse::ok("Pie chart data fetched successfully", categories).into_response())
}

/// Statistics and both charts in one response.
pub async fn get_combined_endpoint(
    State(state): State<AnalyticsState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(params) = params?;
    let connection = lock_connection(&state.db_connection)?;
    let view = combined_view(&params, &connection)?;

    Ok(ApiResponse::ok("Combined data fetched successfully", view).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use time::macros::datetime;

    use crate::{
        endpoints,
        transaction::test_utils::{get_test_connection, insert_sales, new_sale},
    };

    use super::{
        AnalyticsState, get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    };

    fn get_test_server() -> TestServer {
        let conn = get_test_connection();
        insert_sales(
            vec![
                new_sale(50.0, true, datetime!(2022-03-05 9:30 UTC), "electronics"),
                new_sale(150.0, false, datetime!(2022-03-12 14:00 UTC), "jewelery"),
                new_sale(950.0, true, datetime!(2022-03-28 18:45 UTC), "electronics"),
                new_sale(300.0, true, datetime!(2022-05-01 8:00 UTC), "men's clothing"),
            ],
            &conn,
        );

        let state = AnalyticsState {
            db_connection: Arc::new(Mutex::new(conn)),
        };
        let app = Router::new()
            .route(endpoints::STATISTICS, get(get_statistics_endpoint))
            .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
            .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
            .route(endpoints::COMBINED, get(get_combined_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn count_for(buckets: &Value, range: &str) -> u64 {
        buckets
            .as_array()
            .unwrap()
            .iter()
            .find(|bucket| bucket["_id"] == range)
            .unwrap_or_else(|| panic!("no bucket {range}"))["count"]
            .as_u64()
            .unwrap()
    }

    #[tokio::test]
    async fn statistics_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "3")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["success"], true);
        assert_eq!(
            body["data"]["statistics"],
            json!({
                "totalSaleAmount": 1000.0,
                "soldItemsCount": 2,
                "unsoldItemsCount": 1,
                "totalItemsCount": 3,
            })
        );
        assert_eq!(body["data"]["transactions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn statistics_for_sold_only() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "03")
            .add_query_param("sold", "true")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["message"], "Statistics fetched successfully (Sold)");
        assert_eq!(body["data"]["statistics"]["totalItemsCount"], 2);
        assert_eq!(body["data"]["statistics"]["unsoldItemsCount"], 0);
    }

    #[tokio::test]
    async fn statistics_for_empty_month_are_zero() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "11")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"]["statistics"]["totalSaleAmount"], 0.0);
        assert_eq!(body["data"]["statistics"]["totalItemsCount"], 0);
        assert_eq!(body["data"]["transactions"], json!([]));
    }

    #[tokio::test]
    async fn statistics_for_date_range() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("startDate", "2022-03-10")
            .add_query_param("endDate", "2022-05-01")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        // The end date includes the whole day.
        assert_eq!(body["data"]["statistics"]["totalItemsCount"], 3);
        assert_eq!(body["data"]["statistics"]["totalSaleAmount"], 1250.0);
    }

    #[tokio::test]
    async fn bar_chart_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::BAR_CHART)
            .add_query_param("month", "3")
            .await;

        response.assert_status_ok();
        let buckets = &response.json::<Value>()["data"];
        assert_eq!(buckets.as_array().unwrap().len(), 10);
        assert_eq!(count_for(buckets, "0-99"), 1);
        assert_eq!(count_for(buckets, "100-199"), 1);
        assert_eq!(count_for(buckets, "901-above"), 1);
        assert_eq!(count_for(buckets, "300-399"), 0);
    }

    #[tokio::test]
    async fn pie_chart_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::PIE_CHART)
            .add_query_param("month", "3")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["data"],
            json!([
                {"_id": "electronics", "count": 2},
                {"_id": "jewelery", "count": 1},
            ])
        );
    }

    #[tokio::test]
    async fn combined_for_month() {
        let server = get_test_server();

        let response = server
            .get(endpoints::COMBINED)
            .add_query_param("month", "5")
            .await;

        response.assert_status_ok();
        let data = &response.json::<Value>()["data"];
        assert_eq!(data["statistics"]["totalItemsCount"], 1);
        assert_eq!(data["pieChart"], json!([{"_id": "men's clothing", "count": 1}]));
        assert_eq!(count_for(&data["barChart"], "300-399"), 1);
    }

    #[tokio::test]
    async fn invalid_month_is_bad_request() {
        let server = get_test_server();

        for endpoint in [
            endpoints::STATISTICS,
            endpoints::BAR_CHART,
            endpoints::PIE_CHART,
            endpoints::COMBINED,
        ] {
            let response = server.get(endpoint).add_query_param("month", "13").await;

            response.assert_status_bad_request();
            let body = response.json::<Value>();
            assert_eq!(body["statusCode"], 400);
            assert_eq!(body["success"], false);
        }
    }

    #[tokio::test]
    async fn malformed_query_is_json_bad_request() {
        let server = get_test_server();

        for path in [
            "/api/v1/bar-chart?month=3&month=4",
            "/api/v1/statistics?startDate=2022-03-01&startOfMonth=2022-03-02&endDate=2022-03-31",
        ] {
            let response = server.get(path).await;

            response.assert_status_bad_request();
            let body = response.json::<Value>();
            assert_eq!(body["statusCode"], 400);
            assert_eq!(body["success"], false);
            assert!(body["message"].as_str().unwrap().contains("duplicate field"));
        }
    }

    #[tokio::test]
    async fn missing_scope_is_bad_request() {
        let server = get_test_server();

        let response = server
            .get(endpoints::BAR_CHART)
            .add_query_param("startDate", "2022-03-01")
            .await;

        response.assert_status_bad_request();
    }
}
