//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    category::{
        archive_category_endpoint, create_category_endpoint, delete_category_endpoint,
        get_active_categories_endpoint, get_categories_endpoint, get_category_endpoint,
        unarchive_category_endpoint, update_category_endpoint,
    },
    endpoints,
    entry::{
        create_entry_endpoint, delete_entry_endpoint, get_entries_endpoint, get_entry_endpoint,
        update_entry_endpoint,
    },
    health::get_health_endpoint,
    not_found::get_404_not_found,
    report::{
        get_annual_hours_endpoint, get_category_distribution_endpoint, get_monthly_hours_endpoint,
        get_statistics_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let entry_routes = Router::new()
        .route(
            endpoints::ENTRIES,
            get(get_entries_endpoint).post(create_entry_endpoint),
        )
        .route(endpoints::ENTRY_STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::ANNUAL_HOURS, get(get_annual_hours_endpoint))
        .route(endpoints::MONTHLY_HOURS, get(get_monthly_hours_endpoint))
        .route(
            endpoints::ENTRY,
            get(get_entry_endpoint)
                .put(update_entry_endpoint)
                .delete(delete_entry_endpoint),
        );

    let category_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::ACTIVE_CATEGORIES,
            get(get_active_categories_endpoint),
        )
        .route(
            endpoints::CATEGORY_DISTRIBUTION,
            get(get_category_distribution_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(
            endpoints::ARCHIVE_CATEGORY,
            post(archive_category_endpoint).put(archive_category_endpoint),
        )
        .route(
            endpoints::UNARCHIVE_CATEGORY,
            post(unarchive_category_endpoint).put(unarchive_category_endpoint),
        );

    Router::new()
        .route(endpoints::HEALTH, get(get_health_endpoint))
        .merge(entry_routes)
        .merge(category_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, build_router, endpoints::format_endpoint, entry::TimeEntry};

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    async fn create_category(server: &TestServer, name: &str, color: &str) -> i64 {
        let response = server
            .post("/api/categories")
            .json(&json!({ "name": name, "color": color }))
            .await;
        response.assert_status(StatusCode::CREATED);

        response.json::<Value>()["id"]
            .as_i64()
            .expect("Category ID missing")
    }

    #[tokio::test]
    async fn create_entry_returns_created_with_location() {
        let server = get_test_server();
        let category_id = create_category(&server, "Development", "#3B82F6").await;

        let response = server
            .post("/api/entries")
            .json(&json!({
                "date": "2024-03-01",
                "hours": 8,
                "description": "Built the **login** page",
                "categoryId": category_id,
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let entry: TimeEntry = response.json();
        assert_eq!(
            response.header("location"),
            format_endpoint("/api/entries/{entry_id}", entry.id).as_str()
        );
        let body: Value = response.json();
        assert_eq!(body["date"], "2024-03-01");
        assert_eq!(body["categoryId"], category_id);
        assert_eq!(body["category"]["name"], "Development");
        assert_eq!(body["category"]["isArchived"], false);

        let fetched = server.get(&format!("/api/entries/{}", entry.id)).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<TimeEntry>(), entry);
    }

    #[tokio::test]
    async fn create_entry_with_invalid_hours_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post("/api/entries")
            .json(&json!({
                "date": "2024-03-01",
                "hours": 24.5,
                "description": "Too long",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post("/api/entries")
            .json(&json!({
                "date": "01/03/2024",
                "hours": 1,
                "description": "Bad date",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_with_mismatched_id_leaves_entry_unchanged() {
        let server = get_test_server();
        let created: TimeEntry = server
            .post("/api/entries")
            .json(&json!({
                "date": "2024-03-01",
                "hours": 2,
                "description": "Original",
            }))
            .await
            .json();

        let response = server
            .put(&format!("/api/entries/{}", created.id))
            .json(&json!({
                "id": created.id + 1,
                "date": "2024-03-02",
                "hours": 3,
                "description": "Changed",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "ID_MISMATCH");
        let fetched: TimeEntry = server
            .get(&format!("/api/entries/{}", created.id))
            .await
            .json();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn update_and_delete_return_no_content() {
        let server = get_test_server();
        let created: TimeEntry = server
            .post("/api/entries")
            .json(&json!({
                "date": "2024-03-01",
                "hours": 2,
                "description": "Original",
            }))
            .await
            .json();
        let path = format!("/api/entries/{}", created.id);

        server
            .put(&path)
            .json(&json!({
                "id": created.id,
                "date": "2024-03-02",
                "hours": 3,
                "description": "Changed",
            }))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .delete(&path)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&path)
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&path)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn leap_year_month_listing() {
        let server = get_test_server();
        for date in ["2024-02-28", "2024-02-29", "2024-03-01", "2023-02-28"] {
            server
                .post("/api/entries")
                .json(&json!({ "date": date, "hours": 1, "description": "Work" }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let entries: Vec<TimeEntry> = server
            .get("/api/entries")
            .add_query_params(json!({ "year": 2024, "month": 2 }))
            .await
            .json();

        let dates: Vec<String> = entries.iter().map(|entry| entry.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-02-28", "2024-02-29"]);
    }

    #[tokio::test]
    async fn month_without_year_is_bad_request() {
        let server = get_test_server();

        let response = server
            .get("/api/entries/statistics")
            .add_query_params(json!({ "month": 3 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn annual_series_has_twelve_points() {
        let server = get_test_server();
        server
            .post("/api/entries")
            .json(&json!({ "date": "2024-03-15", "hours": 4, "description": "Work" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get("/api/entries/annual")
            .add_query_params(json!({ "year": 2024 }))
            .await;

        response.assert_status_ok();
        let points: Vec<Value> = response.json();
        assert_eq!(points.len(), 12);
        assert_eq!(points[2]["label"], "Mar");
        assert_eq!(points[2]["hours"], 4.0);
        assert_eq!(points[0]["hours"], 0.0);
    }

    #[tokio::test]
    async fn archived_category_stays_in_distribution() {
        let server = get_test_server();
        let category_id = create_category(&server, "Research", "#F59E0B").await;
        server
            .post("/api/entries")
            .json(&json!({
                "date": "2024-03-15",
                "hours": 4,
                "description": "Reading",
                "categoryId": category_id,
            }))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .post(&format!("/api/categories/{category_id}/archive"))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .put(&format!("/api/categories/{category_id}/archive"))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let active: Vec<Value> = server.get("/api/categories/active").await.json();
        assert!(active.is_empty());
        let active: Vec<Value> = server
            .get("/api/categories")
            .add_query_params(json!({ "active": true }))
            .await
            .json();
        assert!(active.is_empty());
        let all: Vec<Value> = server.get("/api/categories").await.json();
        assert_eq!(all.len(), 1);

        let distribution: Vec<Value> = server
            .get("/api/categories/distribution")
            .add_query_params(json!({ "year": 2024, "month": 3 }))
            .await
            .json();
        assert_eq!(distribution.len(), 1);
        assert_eq!(distribution[0]["categoryName"], "Research");
        assert_eq!(distribution[0]["percentage"], 100.0);
    }

    #[tokio::test]
    async fn deleting_category_uncategorizes_entries() {
        let server = get_test_server();
        let category_id = create_category(&server, "Admin", "#A855F7").await;
        let entry: TimeEntry = server
            .post("/api/entries")
            .json(&json!({
                "date": "2024-03-05",
                "hours": 7,
                "description": "Expenses",
                "categoryId": category_id,
            }))
            .await
            .json();

        server
            .delete(&format!("/api/categories/{category_id}"))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let fetched: Value = server
            .get(&format!("/api/entries/{}", entry.id))
            .await
            .json();
        assert_eq!(fetched["categoryId"], Value::Null);
        assert_eq!(fetched["category"], Value::Null);
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/unknown").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn health_check_is_ok() {
        let server = get_test_server();

        let response = server.get("/api/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn non_integer_path_id_is_json_bad_request() {
        let server = get_test_server();

        let response = server.get("/api/entries/abc").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn overflowing_path_id_is_json_bad_request() {
        let server = get_test_server();

        let response = server.delete("/api/categories/99999999999999999999").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_category_without_archived_flag_unarchives_it() {
        let server = get_test_server();
        let category_id = create_category(&server, "A", "#222222").await;
        server
            .post(&format!("/api/categories/{category_id}/archive"))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .put(&format!("/api/categories/{category_id}"))
            .json(&json!({ "name": "B", "color": "#111111" }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let category: Value = server
            .get(&format!("/api/categories/{category_id}"))
            .await
            .json();
        assert_eq!(category["name"], "B");
        assert_eq!(category["color"], "#111111");
        assert_eq!(category["isArchived"], false);
    }

    #[tokio::test]
    async fn update_entry_without_category_clears_it() {
        let server = get_test_server();
        let category_id = create_category(&server, "Meetings", "#10B981").await;
        let created: TimeEntry = server
            .post("/api/entries")
            .json(&json!({
                "date": "2024-03-04",
                "hours": 1.5,
                "description": "Standup",
                "categoryId": category_id,
            }))
            .await
            .json();

        server
            .put(&format!("/api/entries/{}", created.id))
            .json(&json!({
                "date": "2024-03-04",
                "hours": 1.5,
                "description": "Standup",
            }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let fetched: Value = server
            .get(&format!("/api/entries/{}", created.id))
            .await
            .json();
        assert_eq!(fetched["categoryId"], Value::Null);
        assert_eq!(fetched["category"], Value::Null);
        assert_eq!(fetched["description"], "Standup");
    }
}
