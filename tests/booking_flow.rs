//! End-to-end booking flow
//!
//! Drives the REST client, reference data cache, draft, submission and login
//! flow together against a wiremock booking service.

use std::sync::Arc;

use api_client::{ApiClientConfig, BookingStatus, RestClient, TokenStore};
use app_core::{
    iso_departure, BookingDraft, BookingHistory, BookingSubmission, ErrorKind, LoginFlow,
    LoginForm, LoginOutcome,
};
use app_state::{LoadStatus, ReferenceDataCache};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_reference_data(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "data": [
                {"_id": "E", "name": "Earth", "distanceFromSun": 150},
                {"_id": "M", "name": "Mars", "distanceFromSun": 228},
                {"_id": "J", "name": "Jupiter", "distanceFromSun": 778}
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transportation-modes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "data": [{"_id": "S1", "name": "SpaceX", "pricePerKm": 2}]
        })))
        .mount(server)
        .await;
}

async fn loaded_cache(client: &RestClient) -> ReferenceDataCache {
    let mut cache = ReferenceDataCache::new();
    let (locations, modes) = cache.fetch_all(client, client).await;
    assert_eq!(locations, Ok(3));
    assert_eq!(modes, Ok(1));
    cache
}

fn earth_to_mars() -> BookingDraft {
    let mut draft = BookingDraft::new();
    draft.set_origin("E");
    draft.set_destination("M");
    draft.set_mode("S1");
    draft
}

#[tokio::test]
async fn test_book_earth_to_mars() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(body_json(json!({
            "departureTime": "2160-01-01T00:00:00.000Z",
            "totalPrice": 156.0,
            "transportationMode": "SpaceX",
            "from": "Earth",
            "to": "Mars",
            "status": "pending"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": 201,
            "message": "Booking created",
            "data": {"_id": "b-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(RestClient::new(ApiClientConfig::new(server.uri())).unwrap());
    let cache = loaded_cache(&client).await;
    assert!(cache.is_ready());

    let draft = earth_to_mars();
    assert_eq!(draft.current_price(&cache), Some(156.0));

    let outcome = BookingSubmission::new(client.clone())
        .submit(&draft, &cache, iso_departure)
        .await;

    let confirmation = outcome.confirmation().expect("booking should succeed");
    assert_eq!(confirmation.origin_name, "Earth");
    assert_eq!(confirmation.destination_name, "Mars");
    assert_eq!(confirmation.mode_name, "SpaceX");
    assert_eq!(confirmation.price, 156.0);
    assert_eq!(confirmation.departure_display().as_deref(), Some("Tue Jan 01 2160"));
}

#[tokio::test]
async fn test_created_without_body_is_confirmed() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(RestClient::new(ApiClientConfig::new(server.uri())).unwrap());
    let cache = loaded_cache(&client).await;

    let outcome = BookingSubmission::new(client.clone())
        .submit(&earth_to_mars(), &cache, iso_departure)
        .await;

    assert!(outcome.is_success(), "unexpected outcome: {:?}", outcome);
    assert_eq!(outcome.confirmation().map(|c| c.price), Some(156.0));
}

#[tokio::test]
async fn test_rejected_booking_surfaces_service_message() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": 400,
            "message": "slot unavailable"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(RestClient::new(ApiClientConfig::new(server.uri())).unwrap());
    let cache = loaded_cache(&client).await;

    let outcome = BookingSubmission::new(client.clone())
        .submit(&earth_to_mars(), &cache, iso_departure)
        .await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::RemoteRejected));
    assert_eq!(outcome.message(), Some("slot unavailable"));
}

#[tokio::test]
async fn test_incomplete_draft_sends_nothing() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = Arc::new(RestClient::new(ApiClientConfig::new(server.uri())).unwrap());
    let cache = loaded_cache(&client).await;

    let mut draft = earth_to_mars();
    draft.clear_mode();

    let outcome = BookingSubmission::new(client.clone())
        .submit(&draft, &cache, iso_departure)
        .await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidState));
}

#[tokio::test]
async fn test_failed_mode_fetch_keeps_locations_usable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "E", "name": "Earth", "distanceFromSun": 150},
                {"_id": "M", "name": "Mars", "distanceFromSun": 228}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transportation-modes"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = RestClient::new(ApiClientConfig::new(server.uri())).unwrap();
    let mut cache = ReferenceDataCache::new();
    let (locations, modes) = cache.fetch_all(&client, &client).await;

    assert_eq!(locations, Ok(2));
    assert!(modes.is_err());
    assert_eq!(cache.location_status(), &LoadStatus::Loaded);
    assert!(cache.mode_status().failure_reason().is_some());
    assert!(!cache.is_ready());

    let draft = earth_to_mars();
    let options: Vec<&str> = draft
        .destination_options(&cache)
        .iter()
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(options, vec!["M"]);
    assert!(!draft.is_ready_to_submit(&cache));
}

#[tokio::test]
async fn test_login_then_history_uses_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "hunter2"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("access_token", "acc-1")
                .insert_header("refresh_token", "ref-1")
                .set_body_json(json!({"status": 200, "message": "Logged in"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(header("authorization", "Bearer acc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "data": [
                {
                    "_id": "b-1",
                    "from": "Earth",
                    "to": "Mars",
                    "transportationMode": "SpaceX",
                    "departureTime": "2160-01-01T00:00:00.000Z",
                    "totalPrice": 156,
                    "status": "upcoming"
                },
                {
                    "_id": "b-2",
                    "from": "Mars",
                    "to": "Earth",
                    "transportationMode": "SpaceX",
                    "departureTime": "2159-06-01T00:00:00.000Z",
                    "status": "completed"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(TokenStore::new());
    let client = Arc::new(
        RestClient::with_tokens(ApiClientConfig::new(server.uri()), Arc::clone(&tokens)).unwrap(),
    );

    let login = LoginFlow::new(client.clone(), Arc::clone(&tokens));
    let outcome = login
        .login(&LoginForm::new("ada@example.com", "hunter2"))
        .await;
    assert_eq!(outcome, LoginOutcome::Success);
    assert_eq!(tokens.access_token().as_deref(), Some("acc-1"));

    let history = BookingHistory::load(client.as_ref()).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.count(BookingStatus::Upcoming), 1);
    assert_eq!(history.with_status(BookingStatus::Completed)[0].to, "Earth");
}
