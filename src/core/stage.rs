use serde::Serialize;
use std::fmt;

/// Checkpoints a single itinerary request passes through.
///
/// `Validated`, `AwaitingUpstream` and `Extracted` are the fallible steps; a
/// failure at any of them ends the request in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Received,
    Validated,
    Prompted,
    AwaitingUpstream,
    Extracted,
    Responded,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Received => "received",
            PipelineStage::Validated => "validated",
            PipelineStage::Prompted => "prompted",
            PipelineStage::AwaitingUpstream => "awaiting_upstream",
            PipelineStage::Extracted => "extracted",
            PipelineStage::Responded => "responded",
            PipelineStage::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
