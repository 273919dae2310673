mod common;

use std::{sync::Arc, time::Duration};

use common::{gemini_reply, itinerary_json, API_KEY, GENERATE_PATH};
use mockito::Server;
use tokio_test::{assert_err, assert_ok};
use trip_itinerary_rs::{
    server::build_router, BudgetLevel, Interest, ItineraryApiClient, ItineraryPlanner,
    ServiceConfig, TripRequest, ViewState,
};

/// Serve the router on an ephemeral port and return the API root
async fn spawn_api(gemini_url: String) -> String {
    let config = ServiceConfig::new(API_KEY, gemini_url);
    let planner = ItineraryPlanner::new(Arc::new(config.gemini_client().unwrap()));
    let app = build_router(Arc::new(planner));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn goa_form() -> TripRequest {
    let start = chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
    TripRequest::from_form(
        "Goa",
        start,
        end,
        &[Interest::Beaches, Interest::Food],
        BudgetLevel::Medium,
    )
}

#[tokio::test]
async fn test_form_submission_reaches_results_view() {
    let mut gemini = Server::new_async().await;
    let _mock = gemini
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(gemini_reply(&itinerary_json(4).to_string()))
        .create_async()
        .await;

    let api = spawn_api(gemini.url()).await;
    let client = assert_ok!(ItineraryApiClient::new(api, Duration::from_secs(10)));

    let health = assert_ok!(client.health().await);
    assert_eq!(health.message, "Server is running");

    let request = goa_form();
    assert_eq!(request.days, Some(4));
    let state = client.submit(ViewState::Form, request.clone()).await;

    match state {
        ViewState::Results(result) => {
            assert_eq!(result.request, request);
            assert_eq!(result.itinerary.itinerary.len(), 4);
            assert_eq!(result.itinerary.budget.currency, "INR");
        }
        other => panic!("expected results view, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_becomes_error_view() {
    let gemini = Server::new_async().await;
    let api = spawn_api(gemini.url()).await;
    let client = ItineraryApiClient::new(api, Duration::from_secs(10)).unwrap();

    let mut request = goa_form();
    request.budget = None;
    let state = client.submit(ViewState::Form, request).await;

    match state {
        ViewState::Error(message) => assert!(message.starts_with("Missing required fields")),
        other => panic!("expected error view, got {other:?}"),
    }

    // Reset returns to the form
    let state = ViewState::Error("x".to_string()).transition(trip_itinerary_rs::ViewEvent::Reset);
    assert_eq!(state, ViewState::Form);
}

#[tokio::test]
async fn test_unreachable_service_is_reported() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ItineraryApiClient::new(format!("http://{addr}/api"), Duration::from_secs(2)).unwrap();
    let err = assert_err!(client.generate(&goa_form()).await);
    assert_eq!(err.client_message(), "Failed to reach the itinerary service");
}
