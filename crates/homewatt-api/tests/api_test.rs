// Integration tests for `EnergyApi` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use homewatt_api::transport::TransportConfig;
use homewatt_api::{EnergyApi, Error, FetchOutcome};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, EnergyApi) {
    let server = MockServer::start().await;
    let url = server.uri().parse().expect("mock server URL");
    let api = EnergyApi::new(url, &TransportConfig::default()).expect("client");
    (server, api)
}

fn data<T>(outcome: FetchOutcome<T>) -> T {
    outcome.into_data().expect("expected authenticated outcome")
}

// ── Fetch adapters ──────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_stats_happy_path() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_usage": 1.25,
            "today_usage": 4.5,
            "monthly_usage": 38.75,
            "total_usage": 412.0,
        })))
        .mount(&server)
        .await;

    let stats = data(api.dashboard_stats().await.expect("fetch"));
    assert!((stats.current_usage - 1.25).abs() < f64::EPSILON);
    assert!((stats.monthly_usage - 38.75).abs() < f64::EPSILON);
}

#[tokio::test]
async fn dashboard_stats_tolerates_partial_payload() {
    let (server, api) = setup().await;

    // Older backend revisions emit only two counters, plus an alert list
    // this client ignores.
    Mock::given(method("GET"))
        .and(path("/api/dashboard-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_usage": "2.5",
            "monthly_usage": 30,
            "alerts": [],
        })))
        .mount(&server)
        .await;

    let stats = data(api.dashboard_stats().await.expect("fetch"));
    assert!((stats.current_usage - 2.5).abs() < f64::EPSILON);
    assert!(stats.today_usage.abs() < f64::EPSILON);
    assert!(stats.total_usage.abs() < f64::EPSILON);
}

#[tokio::test]
async fn room_usage_parses_nested_appliances() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/room-usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "room_id": 1,
            "room_name": "Kitchen",
            "total_power": 640.0,
            "appliances": [
                {
                    "appliance_id": 4,
                    "appliance_name": "Fridge",
                    "quantity": 1,
                    "min_power_rating_watt": 80,
                    "max_power_rating_watt": 250,
                    "current_usage": 1.1,
                    "status": "Active",
                },
                // old spelling, mistyped number
                { "id": 5, "name": "Kettle", "min_power": "1200", "status": "off" },
            ],
        }])))
        .mount(&server)
        .await;

    let rooms = data(api.room_usage().await.expect("fetch"));
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].room_name, "Kitchen");
    assert_eq!(rooms[0].appliances.len(), 2);
    assert_eq!(rooms[0].appliances[1].appliance_id, 5);
    assert!((rooms[0].appliances[1].min_power_rating_watt - 1200.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn alerts_accept_both_field_generations() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "level": "High", "message": "Fridge overuse", "date": "2024-01-01" },
            { "type": "warning", "message": "Energy usage reached Warning level", "timestamp": "2024-01-02 08:00:00" },
        ])))
        .mount(&server)
        .await;

    let alerts = data(api.alerts().await.expect("fetch"));
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].level.as_deref(), Some("High"));
    assert_eq!(alerts[0].date.as_deref(), Some("2024-01-01"));
    assert_eq!(alerts[1].kind.as_deref(), Some("warning"));
}

#[tokio::test]
async fn appliances_pass_room_id_query() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/appliances"))
        .and(query_param("room_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let appliances = data(api.appliances(3).await.expect("fetch"));
    assert!(appliances.is_empty());
}

// ── Authentication signal ───────────────────────────────────────────

#[tokio::test]
async fn login_redirect_yields_unauthenticated() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "/login?next=%2Fapi%2Falerts"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let outcome = api.alerts().await.expect("fetch");
    assert_eq!(outcome, FetchOutcome::Unauthenticated);
}

#[tokio::test]
async fn mutation_behind_login_redirect_is_auth_error() {
    let (server, api) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/delete-room/9"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = api.delete_room(9).await.expect_err("should fail");
    assert!(err.is_auth_required());
}

#[tokio::test]
async fn login_success_and_failure() {
    let (server, api) = setup().await;

    // Success: redirect away from the login page.
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string_contains("username=alice"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/dashboard"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    api.login("alice", "hunter2").await.expect("login");

    // Failure: the login page is re-rendered in place.
    let (server2, api2) = setup().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad credentials</html>"))
        .mount(&server2)
        .await;

    let err = api2.login("alice", "wrong").await.expect_err("should fail");
    assert!(matches!(err, Error::LoginFailed { .. }));
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn add_room_posts_form_and_unwraps_ack() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/add-room"))
        .and(body_string_contains("room_name=Garage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Room added successfully",
            "room": { "room_id": 7, "room_name": "Garage" },
        })))
        .mount(&server)
        .await;

    let ack = api.add_room("Garage").await.expect("mutation");
    assert_eq!(ack.message, "Room added successfully");
}

#[tokio::test]
async fn rejected_mutation_carries_server_message() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/add-room"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "A room with this name already exists",
        })))
        .mount(&server)
        .await;

    let err = api.add_room("Garage").await.expect_err("should fail");
    assert_eq!(
        err.server_message(),
        Some("A room with this name already exists")
    );
}

#[tokio::test]
async fn non_ok_without_envelope_is_request_failed() {
    let (server, api) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/delete-usage-log/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = api.delete_usage_log(1).await.expect_err("should fail");
    assert!(matches!(err, Error::RequestFailed { status: 500, .. }));
}

#[tokio::test]
async fn simulate_alerts_reports_usage_figure() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/simulate-alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Generated 1 alerts",
            "current_usage": 36.4,
            "warning_threshold": 30,
            "critical_threshold": 35,
        })))
        .mount(&server)
        .await;

    let ack = api.simulate_alerts().await.expect("mutation");
    assert_eq!(ack.current_usage_kwh, Some(36.4));
}

#[tokio::test]
async fn edit_appliance_sends_json_body() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/edit-appliance/4"))
        .and(body_string_contains("\"appliance_name\":\"Fridge XL\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Appliance updated" })),
        )
        .mount(&server)
        .await;

    let update = homewatt_api::models::ApplianceUpdate {
        appliance_name: "Fridge XL".into(),
        quantity: 1,
        min_power_rating_watt: 90.0,
        max_power_rating_watt: 260.0,
    };
    let ack = api.edit_appliance(4, &update).await.expect("mutation");
    assert_eq!(ack.message, "Appliance updated");
}
