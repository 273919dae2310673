//! trip-itinerary-rs: day-by-day travel itineraries generated by Gemini
//!
//! A trip request is validated, turned into a prompt, sent to the model, and
//! the JSON object embedded in the reply is extracted and checked against the
//! itinerary schema before being returned to the caller.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trip_itinerary_rs::{ItineraryPlanner, ServiceConfig, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::from_lookup(|key| std::env::var(key).ok())?;
//!     let planner = ItineraryPlanner::new(Arc::new(config.gemini_client()?));
//!
//!     let request = TripRequest {
//!         destination: Some("Goa".to_string()),
//!         start_date: Some("2025-03-01".to_string()),
//!         end_date: Some("2025-03-04".to_string()),
//!         days: Some(4),
//!         interests: Some(vec!["beaches".to_string(), "food".to_string()]),
//!         budget: Some("medium".to_string()),
//!     };
//!     let planned = planner.plan(&request).await?;
//!     println!("{}", planned.data);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod schemas;
pub mod server;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::ItineraryApiClient;
pub use config::ServiceConfig;
pub use crate::core::{
    ItineraryPlanner, PipelineStage, PlannedItinerary, TripResult, ViewEvent, ViewState,
};
pub use error::{PlannerError, Result, EXTRACTION_FAILED_MESSAGE};
pub use schemas::{SchemaHandle, ShapeReport, StructuredOutput};
pub use services::{GeminiClient, ItineraryModel};
pub use types::{
    BudgetLevel, Interest, ItineraryDocument, ItineraryEnvelope, PlannedTrip, TripRequest,
};

#[cfg(feature = "cli")]
pub mod cli;
