//! HTTP surface of the itinerary service.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use crate::{
    config::ServiceConfig,
    core::{ItineraryPlanner, PipelineStage},
    error::{PlannerError, Result},
    types::{
        response::{HealthResponse, ItineraryEnvelope},
        trip::TripRequest,
    },
};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Converts any pipeline failure into the `{ "error": ... }` envelope.
#[derive(Debug)]
pub struct AppError(PlannerError);

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status: StatusCode = self.0.status_code();
        let body = ItineraryEnvelope::failure(self.0.client_message());
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(planner: Arc<ItineraryPlanner>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/generate-itinerary", post(generate_itinerary))
        .layer(CorsLayer::permissive())
        .with_state(planner)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(config: &ServiceConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let client = config.gemini_client()?;
    info!(
        target: "itinerary::server",
        model = client.model(),
        strict_shape = config.strict_shape,
        "using model provider at {}",
        config.base_url
    );

    let planner = ItineraryPlanner::new(Arc::new(client)).with_strict_shape(config.strict_shape);
    let app = build_router(Arc::new(planner));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| PlannerError::Config(format!("failed to bind {addr}: {err}")))?;
    info!(target: "itinerary::server", "Server running on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| PlannerError::Config(format!("server error: {err}")))?;
    info!(target: "itinerary::server", "server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(target: "itinerary::server", error = %err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn generate_itinerary(
    State(planner): State<Arc<ItineraryPlanner>>,
    payload: std::result::Result<Json<TripRequest>, JsonRejection>,
) -> std::result::Result<Json<ItineraryEnvelope>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        PlannerError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let planned = planner.plan(&request).await?;
    debug!(
        target: "itinerary::pipeline",
        stage = %PipelineStage::Responded,
        days = planned.trip.days
    );
    Ok(Json(ItineraryEnvelope::success(planned.data)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
