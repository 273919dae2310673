use crate::schemas::{schema_handle_for, SchemaHandle, StructuredOutput};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Currency every amount in the plan is quoted in
pub const PLAN_CURRENCY: &str = "INR";

/// Structured multi-day plan returned by the itinerary model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDocument {
    /// Headline attractions and hidden gems for the destination
    pub highlights: Highlights,
    /// One entry per planned day, in order
    pub itinerary: Vec<DayPlan>,
    /// Cost breakdown for the whole trip
    pub budget: BudgetBreakdown,
}

impl StructuredOutput for ItineraryDocument {
    fn schema() -> &'static SchemaHandle {
        static HANDLE: OnceLock<SchemaHandle> = OnceLock::new();
        HANDLE.get_or_init(|| schema_handle_for::<Self>("itinerary_document"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    /// Exactly five must-see places matched to the traveller's interests
    pub top_attractions: Vec<Recommendation>,
    /// Exactly two lesser-known places
    pub offbeat_recommendations: Vec<Recommendation>,
}

/// A named place plus a one-sentence reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    pub name: String,
    pub reason: String,
}

/// A single day of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based day counter
    pub day: u32,
    /// Theme of the day
    pub title: String,
    pub morning: TimeSlot,
    pub afternoon: TimeSlot,
    pub evening: TimeSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl DayPlan {
    /// Slots in chronological order with their display names
    pub fn slots(&self) -> [(&'static str, &TimeSlot); 3] {
        [
            ("Morning", &self.morning),
            ("Afternoon", &self.afternoon),
            ("Evening", &self.evening),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub activity: String,
    pub location: String,
    pub duration: String,
    pub travel_time: String,
}

/// Trip costs grouped by category. Amounts are in [`PLAN_CURRENCY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub currency: String,
    pub accommodation: NightlyCost,
    pub food: DailyCost,
    pub transport: DailyCost,
    pub activities: LumpSumCost,
    pub grand_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

impl BudgetBreakdown {
    /// Sum of the four category totals
    pub fn category_sum(&self) -> f64 {
        self.accommodation.total + self.food.total + self.transport.total + self.activities.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NightlyCost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_night: Option<f64>,
    pub total: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyCost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_day: Option<f64>,
    pub total: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LumpSumCost {
    pub total: f64,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_itinerary_json;

    #[test]
    fn test_document_reads_camel_case_payload() {
        let doc: ItineraryDocument = serde_json::from_value(sample_itinerary_json(3)).unwrap();
        assert_eq!(doc.itinerary.len(), 3);
        assert_eq!(doc.highlights.top_attractions.len(), 5);
        assert_eq!(doc.itinerary[0].morning.travel_time, "15 min from hotel");
        assert_eq!(doc.budget.accommodation.per_night, Some(3500.0));
        assert_eq!(doc.budget.currency, PLAN_CURRENCY);
    }

    #[test]
    fn test_category_sum_matches_sample_total() {
        let doc: ItineraryDocument = serde_json::from_value(sample_itinerary_json(3)).unwrap();
        assert_eq!(doc.budget.category_sum(), doc.budget.grand_total);
    }

    #[test]
    fn test_schema_uses_wire_field_names() {
        let schema = ItineraryDocument::schema();
        assert_eq!(schema.schema_name(), "itinerary_document");

        let rendered = schema.schema_json().to_string();
        assert!(rendered.contains("topAttractions"));
        assert!(rendered.contains("grandTotal"));
        assert!(rendered.contains("travelTime"));
        assert!(!rendered.contains("travel_time"));
    }
}
