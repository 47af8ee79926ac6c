// Integration tests for the `Dashboard` controller using wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use homewatt_core::{Dashboard, DashboardConfig, ViewState};

// ── Helpers ─────────────────────────────────────────────────────────

fn config(server: &MockServer, poll_interval: Duration) -> DashboardConfig {
    DashboardConfig {
        base_url: server.uri().parse().expect("mock server URL"),
        credentials: None,
        timeout: Duration::from_secs(5),
        poll_interval,
    }
}

/// Mount happy-path responses for all five fetch adapters.
async fn mount_views(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/dashboard-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_usage": 1.5, "today_usage": 3.0,
            "monthly_usage": 42.0, "total_usage": 410.0,
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/room-usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "room_id": 1, "room_name": "Kitchen", "total_power": 500.0,
            "appliances": [{
                "appliance_id": 4, "appliance_name": "Fridge", "quantity": 1,
                "min_power_rating_watt": 80, "max_power_rating_watt": 250,
                "current_usage": 1.1, "status": "Active",
            }],
        }])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/usage-history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 9, "appliance": "Fridge", "energy": 1.1, "duration": 2.0,
              "timestamp": "2024-01-01 10:00:00" },
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/energy-readings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "appliance_name": "Fridge", "current_power": 1.1,
              "status": "Active", "timestamp": "2024-01-01 10:00:00" },
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

async fn count_requests(server: &MockServer, req_path: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .filter(|r| r.url.path() == req_path)
        .count()
}

// ── Initial render ──────────────────────────────────────────────────

#[tokio::test]
async fn refresh_all_populates_every_slot() {
    let server = MockServer::start().await;
    mount_views(&server).await;

    let dashboard = Dashboard::new(config(&server, Duration::ZERO)).expect("dashboard");
    dashboard.refresh_all().await;

    let store = dashboard.store();
    assert!(store.stats().is_ready());
    assert!(store.rooms().is_ready());
    assert!(store.history().is_ready());
    assert!(store.readings().is_ready());
    assert!(store.alerts().is_ready());
    assert!(store.last_refresh().is_some());

    let rooms = store.rooms();
    let rooms = rooms.data().expect("rooms data");
    assert_eq!(rooms[0].appliances[0].name, "Fridge");
}

// ── Partial auth degradation ────────────────────────────────────────

#[tokio::test]
async fn auth_redirect_degrades_only_the_affected_view() {
    let server = MockServer::start().await;

    // Alerts alone bounce to the login page. Mounted before the happy-path
    // mocks so it wins the first-match for its path.
    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    mount_views(&server).await;

    let dashboard = Dashboard::new(config(&server, Duration::ZERO)).expect("dashboard");
    dashboard.refresh_all().await;

    let store = dashboard.store();
    assert_eq!(store.alerts(), ViewState::Unauthenticated);
    assert!(store.stats().is_ready());
    assert!(store.rooms().is_ready());
}

#[tokio::test]
async fn fetch_failure_is_recorded_in_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/usage-history"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_views(&server).await;

    let dashboard = Dashboard::new(config(&server, Duration::ZERO)).expect("dashboard");
    dashboard.refresh_all().await;

    match dashboard.store().history() {
        ViewState::Failed(reason) => assert!(reason.contains("500")),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(dashboard.store().stats().is_ready());
}

// ── Mutation refresh fan-out ────────────────────────────────────────

#[tokio::test]
async fn room_deletion_refreshes_all_four_affected_views() {
    let server = MockServer::start().await;
    mount_views(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/delete-room/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "message": "Room and associated items deleted",
        })))
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(config(&server, Duration::ZERO)).expect("dashboard");
    let ack = dashboard.delete_room(1).await.expect("delete");
    assert_eq!(ack.message, "Room and associated items deleted");

    assert_eq!(count_requests(&server, "/api/room-usage").await, 1);
    assert_eq!(count_requests(&server, "/api/usage-history").await, 1);
    assert_eq!(count_requests(&server, "/api/energy-readings").await, 1);
    assert_eq!(count_requests(&server, "/api/dashboard-stats").await, 1);
    // Alerts are unaffected by a room delete.
    assert_eq!(count_requests(&server, "/api/alerts").await, 0);
}

#[tokio::test]
async fn rename_room_refreshes_rooms_only() {
    let server = MockServer::start().await;
    mount_views(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/edit-room/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Room updated" })),
        )
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(config(&server, Duration::ZERO)).expect("dashboard");
    dashboard.rename_room(1, "Pantry").await.expect("rename");

    assert_eq!(count_requests(&server, "/api/room-usage").await, 1);
    assert_eq!(count_requests(&server, "/api/dashboard-stats").await, 0);
    assert_eq!(count_requests(&server, "/api/usage-history").await, 0);
}

#[tokio::test]
async fn rejected_mutation_surfaces_server_message_and_skips_refresh() {
    let server = MockServer::start().await;
    mount_views(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/add-room"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false, "message": "A room with this name already exists",
        })))
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(config(&server, Duration::ZERO)).expect("dashboard");
    let err = dashboard.add_room("Kitchen").await.expect_err("rejected");
    assert_eq!(
        err.notification_message(),
        "A room with this name already exists"
    );
    // The failed mutation must not trigger any re-fetch.
    assert_eq!(count_requests(&server, "/api/room-usage").await, 0);
}

// ── Polling scheduler ───────────────────────────────────────────────

#[tokio::test]
async fn restarting_the_poller_never_duplicates_the_timer() {
    let server = MockServer::start().await;
    mount_views(&server).await;

    let period = Duration::from_millis(100);
    let dashboard = Dashboard::new(config(&server, period)).expect("dashboard");

    // Start twice in a row: the second call must replace, not add.
    dashboard.start_polling().await;
    dashboard.start_polling().await;
    assert!(dashboard.is_polling().await);

    tokio::time::sleep(Duration::from_millis(550)).await;
    dashboard.stop_polling().await;
    assert!(!dashboard.is_polling().await);

    // A single 100ms loop fits ~5 passes in 550ms; a duplicated loop
    // would have produced roughly twice that.
    let passes = count_requests(&server, "/api/dashboard-stats").await;
    assert!((3..=7).contains(&passes), "unexpected pass count {passes}");

    // Stopped: no further passes accumulate.
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(
        count_requests(&server, "/api/dashboard-stats").await,
        passes
    );
}

#[tokio::test]
async fn simulate_data_pauses_and_restarts_polling() {
    let server = MockServer::start().await;
    mount_views(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/simulate-data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "success": true,
                    "message": "Simulation data generated successfully",
                }))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    // Long period: the poller itself won't tick during the test.
    let dashboard =
        Dashboard::new(config(&server, Duration::from_secs(60))).expect("dashboard");
    dashboard.start_polling().await;

    let ack = dashboard.simulate_data().await.expect("simulate");
    assert_eq!(ack.message, "Simulation data generated successfully");

    // Polling resumed after the slow mutation.
    assert!(dashboard.is_polling().await);
    // The success path refreshed every view once.
    assert_eq!(count_requests(&server, "/api/alerts").await, 1);
    assert_eq!(count_requests(&server, "/api/room-usage").await, 1);

    dashboard.stop_polling().await;
}

#[tokio::test]
async fn simulate_data_without_polling_leaves_it_off() {
    let server = MockServer::start().await;
    mount_views(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/simulate-data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "ok" })),
        )
        .mount(&server)
        .await;

    let dashboard =
        Dashboard::new(config(&server, Duration::from_secs(60))).expect("dashboard");
    dashboard.simulate_data().await.expect("simulate");
    assert!(!dashboard.is_polling().await);
}

// ── One-shot fetches ────────────────────────────────────────────────

#[tokio::test]
async fn fetch_rooms_and_appliance_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "room_id": 1, "room_name": "Kitchen" },
            { "room_id": 2, "room_name": "" },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/room-usage/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "room_id": 1, "room_name": "Kitchen", "total_power": 500.0,
            "appliances": [],
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/appliance/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appliance_id": 4, "appliance_name": "Fridge", "quantity": 0,
            "min_power_rating_watt": 80, "max_power_rating_watt": 250,
        })))
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(config(&server, Duration::ZERO)).expect("dashboard");

    let rooms = dashboard.fetch_rooms().await.expect("rooms");
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[1].name, "Unknown"); // placeholder for the blank name

    // The single-room endpoint answers with the full room; only the
    // reference fields survive into the prefill type.
    let room = dashboard.fetch_room(1).await.expect("room");
    assert_eq!(room.name, "Kitchen");

    let appliance = dashboard.fetch_appliance(4).await.expect("appliance");
    assert_eq!(appliance.name, "Fridge");
    assert_eq!(appliance.quantity, 1); // zero quantity normalizes to one unit
}
