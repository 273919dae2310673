pub mod planner;
pub mod stage;
pub mod view;

pub use planner::{ItineraryPlanner, PlannedItinerary};
pub use stage::PipelineStage;
pub use view::{TripResult, ViewEvent, ViewState};
