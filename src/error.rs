use axum::http::StatusCode;
use thiserror::Error;

/// Fixed message returned to clients when the model output cannot be turned
/// into an itinerary. The raw model text is only ever logged.
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to parse itinerary data";

/// Main error type for the itinerary service and client
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Client error: {0}")]
    Client(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Extraction failure carrying the fixed client-facing message
    pub fn extraction() -> Self {
        PlannerError::Extraction(EXTRACTION_FAILED_MESSAGE.to_string())
    }

    /// Get the error code for structured responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::Upstream(_) => "UPSTREAM_ERROR",
            PlannerError::Extraction(_) => "EXTRACTION_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Client(_) => "CLIENT_ERROR",
        }
    }

    /// HTTP status the endpoint answers with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the end user.
    ///
    /// Serialization and configuration details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            PlannerError::Validation(msg)
            | PlannerError::Upstream(msg)
            | PlannerError::Extraction(msg)
            | PlannerError::Client(msg) => msg.clone(),
            PlannerError::Config(_) | PlannerError::Serialization(_) => {
                "Failed to generate itinerary".to_string()
            }
        }
    }
}
