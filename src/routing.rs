//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState,
    analytics::{
        get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    },
    endpoints,
    response::{ApiResponse, ErrorBody},
    transaction::get_transactions_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED, get(get_combined_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_health() -> Response {
    ApiResponse::ok("Server is running", ()).into_response()
}

async fn get_404_not_found() -> Response {
    ErrorBody::new(StatusCode::NOT_FOUND, "Route not found").into_response()
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, endpoints, pagination::PaginationConfig};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        let state = AppState::new(conn, PaginationConfig::default()).unwrap();

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn health_check_succeeds() {
        let server = get_test_server();

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "statusCode": 200,
            "message": "Server is running",
            "data": null,
            "success": true,
        }));
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/v1/does-not-exist").await;

        response.assert_status_not_found();
        response.assert_json(&json!({
            "statusCode": 404,
            "message": "Route not found",
            "success": false,
        }));
    }

    #[tokio::test]
    async fn empty_store_listing_is_not_found() {
        let server = get_test_server();

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["message"], "No transactions found");
    }

    #[tokio::test]
    async fn empty_store_statistics_are_zero() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "1")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["data"]["statistics"]["totalItemsCount"],
            0
        );
    }

    #[tokio::test]
    async fn all_analytics_routes_are_mounted() {
        let server = get_test_server();

        for endpoint in [endpoints::BAR_CHART, endpoints::PIE_CHART, endpoints::COMBINED] {
            let response = server.get(endpoint).add_query_param("month", "6").await;

            response.assert_status_ok();
        }
    }
}
