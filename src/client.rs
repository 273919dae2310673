//! HTTP client for the itinerary API, driving the client view states.

use std::time::Duration;

use tracing::{debug, warn};

use crate::{
    core::view::{ViewEvent, ViewState},
    error::{PlannerError, Result},
    types::{
        itinerary::ItineraryDocument,
        response::{HealthResponse, ItineraryEnvelope},
        trip::TripRequest,
    },
};

#[derive(Debug, Clone)]
pub struct ItineraryApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ItineraryApiClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PlannerError::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        self.http
            .get(&url)
            .send()
            .await
            .map_err(unreachable_service)?
            .json::<HealthResponse>()
            .await
            .map_err(|err| PlannerError::Client(format!("Unexpected health response: {err}")))
    }

    /// POST the request and unwrap the envelope into a document
    pub async fn generate(&self, request: &TripRequest) -> Result<ItineraryDocument> {
        let url = format!("{}/generate-itinerary", self.base_url);
        debug!(target: "itinerary::client", %url, "submitting trip request");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(unreachable_service)?;
        let status = response.status();

        let envelope = response.json::<ItineraryEnvelope>().await.map_err(|err| {
            warn!(target: "itinerary::client", %status, error = %err, "response body is not an envelope");
            PlannerError::Client("Failed to generate itinerary".to_string())
        })?;
        envelope.into_document()
    }

    /// Submit from the form view and settle into results or error.
    ///
    /// Any state other than the form is returned untouched without a request.
    pub async fn submit(&self, state: ViewState, request: TripRequest) -> ViewState {
        if !matches!(state, ViewState::Form) {
            return state.transition(ViewEvent::Submit(request));
        }

        let loading = state.transition(ViewEvent::Submit(request.clone()));
        let settled = match self.generate(&request).await {
            Ok(document) => loading.transition(ViewEvent::Succeeded(Box::new(document))),
            Err(err) => loading.transition(ViewEvent::Failed(err.client_message())),
        };
        debug!(target: "itinerary::client", view = settled.name(), "request settled");
        settled
    }
}

fn unreachable_service(err: reqwest::Error) -> PlannerError {
    warn!(target: "itinerary::client", error = %err, "itinerary service unreachable");
    PlannerError::Client("Failed to reach the itinerary service".to_string())
}
