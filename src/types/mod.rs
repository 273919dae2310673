pub mod itinerary;
pub mod response;
pub mod trip;

pub use itinerary::{
    BudgetBreakdown, DailyCost, DayPlan, Highlights, ItineraryDocument, LumpSumCost, NightlyCost,
    Recommendation, TimeSlot, PLAN_CURRENCY,
};
pub use response::{HealthResponse, ItineraryEnvelope};
pub use trip::{BudgetLevel, Interest, PlannedTrip, TripRequest, MAX_TRIP_DAYS, MIN_TRIP_DAYS};
