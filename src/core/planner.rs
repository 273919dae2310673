use crate::{
    core::stage::PipelineStage,
    error::{PlannerError, Result},
    schemas::{
        deserialize_structured, validate_structured_payload, ShapeReport, StructuredOutput,
    },
    services::{
        extraction::extract_json_object, gemini_client::ItineraryModel,
        prompt::build_itinerary_prompt,
    },
    types::{
        itinerary::ItineraryDocument,
        trip::{PlannedTrip, TripRequest},
    },
};
use serde_json::Value;
use std::{sync::Arc, time::Instant};
use tracing::{debug, info, warn};

/// A successfully generated itinerary
#[derive(Debug, Clone)]
pub struct PlannedItinerary {
    pub trip: PlannedTrip,
    /// Typed view of the extracted object
    pub document: ItineraryDocument,
    /// The extracted object exactly as the model produced it
    pub data: Value,
    pub shape: ShapeReport,
}

/// Stateless request pipeline: validate, prompt, call the model, extract.
#[derive(Debug, Clone)]
pub struct ItineraryPlanner {
    model: Arc<dyn ItineraryModel>,
    strict_shape: bool,
}

impl ItineraryPlanner {
    pub fn new(model: Arc<dyn ItineraryModel>) -> Self {
        Self {
            model,
            strict_shape: false,
        }
    }

    /// Reject documents whose counts or totals differ from what was asked for
    pub fn with_strict_shape(mut self, strict_shape: bool) -> Self {
        self.strict_shape = strict_shape;
        self
    }

    pub async fn plan(&self, request: &TripRequest) -> Result<PlannedItinerary> {
        let started = Instant::now();
        debug!(target: "itinerary::pipeline", stage = %PipelineStage::Received);

        let trip = request
            .validate()
            .map_err(|err| failed(PipelineStage::Validated, err))?;
        if trip.days_diverge_from_dates() {
            warn!(
                target: "itinerary::pipeline",
                date_span = trip.date_span,
                days = trip.days,
                "date range falls outside the supported trip length; planning clamped day count"
            );
        }
        debug!(
            target: "itinerary::pipeline",
            stage = %PipelineStage::Validated,
            destination = %trip.destination,
            days = trip.days
        );

        let prompt = build_itinerary_prompt(&trip);
        debug!(
            target: "itinerary::pipeline",
            stage = %PipelineStage::Prompted,
            prompt_chars = prompt.len()
        );

        debug!(target: "itinerary::pipeline", stage = %PipelineStage::AwaitingUpstream);
        let raw = self
            .model
            .generate(&prompt)
            .await
            .map_err(|err| failed(PipelineStage::AwaitingUpstream, err))?;

        let (data, document, shape) = self
            .extract(&raw, trip.days)
            .map_err(|err| failed(PipelineStage::Extracted, err))?;

        info!(
            target: "itinerary::pipeline",
            stage = %PipelineStage::Extracted,
            destination = %trip.destination,
            days = trip.days,
            shape_issues = shape.issues.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "itinerary generated"
        );

        Ok(PlannedItinerary {
            trip,
            document,
            data,
            shape,
        })
    }

    fn extract(&self, raw: &str, days: u32) -> Result<(Value, ItineraryDocument, ShapeReport)> {
        let data = extract_json_object(raw)?;

        let document = validate_structured_payload(ItineraryDocument::schema(), &data)
            .and_then(|_| deserialize_structured::<ItineraryDocument>(&data))
            .map_err(|err| {
                warn!(target: "itinerary::extract", error = %err, "extracted object is not an itinerary");
                PlannerError::extraction()
            })?;

        let shape = ShapeReport::check(&document, days);
        if !shape.is_clean() {
            warn!(
                target: "itinerary::extract",
                issues = %shape.summary(),
                strict = self.strict_shape,
                "itinerary departs from the requested shape"
            );
            if self.strict_shape {
                return Err(PlannerError::extraction());
            }
        }

        Ok((data, document, shape))
    }
}

fn failed(stage: PipelineStage, err: PlannerError) -> PlannerError {
    warn!(
        target: "itinerary::pipeline",
        stage = %PipelineStage::Failed,
        failed_at = %stage,
        code = err.error_code(),
        error = %err,
        "itinerary request failed"
    );
    err
}
