use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    schemas::deserialize_structured,
    types::itinerary::ItineraryDocument,
};

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Server is running".to_string(),
        }
    }
}

/// Body of `POST /api/generate-itinerary`, success or failure.
///
/// Success is `{ "success": true, "data": ... }`; failures carry only
/// `{ "error": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEnvelope {
    #[serde(default, skip_serializing_if = "is_false")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl ItineraryEnvelope {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Turn a received envelope into the document or the server's message
    pub fn into_document(self) -> Result<ItineraryDocument> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => deserialize_structured::<ItineraryDocument>(&data),
            (_, _, Some(error)) => Err(PlannerError::Client(error)),
            _ => Err(PlannerError::Client(
                "Failed to generate itinerary".to_string(),
            )),
        }
    }
}
