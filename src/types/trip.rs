use crate::error::{PlannerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shortest trip the planner will produce, in days
pub const MIN_TRIP_DAYS: u32 = 3;
/// Longest trip the planner will produce, in days
pub const MAX_TRIP_DAYS: u32 = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trip parameters as submitted by the client.
///
/// Every field is optional on the wire so that missing values surface as a
/// validation error listing them, instead of a generic body rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

/// Interest tags offered by the trip form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Beaches,
    History,
    Nightlife,
    Nature,
    Food,
    Adventure,
    Culture,
    Shopping,
}

impl Interest {
    pub const ALL: [Interest; 8] = [
        Interest::Beaches,
        Interest::History,
        Interest::Nightlife,
        Interest::Nature,
        Interest::Food,
        Interest::Adventure,
        Interest::Culture,
        Interest::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::Beaches => "beaches",
            Interest::History => "history",
            Interest::Nightlife => "nightlife",
            Interest::Nature => "nature",
            Interest::Food => "food",
            Interest::Adventure => "adventure",
            Interest::Culture => "culture",
            Interest::Shopping => "shopping",
        }
    }

    /// Display label used by the form
    pub fn label(&self) -> &'static str {
        match self {
            Interest::Beaches => "Beaches",
            Interest::History => "History",
            Interest::Nightlife => "Nightlife",
            Interest::Nature => "Nature",
            Interest::Food => "Food",
            Interest::Adventure => "Adventure",
            Interest::Culture => "Culture",
            Interest::Shopping => "Shopping",
        }
    }
}

impl FromStr for Interest {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        let needle = value.trim().to_ascii_lowercase();
        Interest::ALL
            .iter()
            .copied()
            .find(|interest| interest.as_str() == needle)
            .ok_or_else(|| PlannerError::Validation(format!("Unknown interest: {}", value.trim())))
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spending level requested for the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Low,
    Medium,
    High,
}

impl BudgetLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetLevel::Low => "low",
            BudgetLevel::Medium => "medium",
            BudgetLevel::High => "high",
        }
    }

    /// Display label used by the form and results view
    pub fn label(&self) -> &'static str {
        match self {
            BudgetLevel::Low => "Budget",
            BudgetLevel::Medium => "Moderate",
            BudgetLevel::High => "Luxury",
        }
    }

    /// How the level is explained to the model
    pub fn meaning(&self) -> &'static str {
        match self {
            BudgetLevel::Low => "budget-friendly",
            BudgetLevel::Medium => "moderate spending",
            BudgetLevel::High => "luxury",
        }
    }
}

impl FromStr for BudgetLevel {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(BudgetLevel::Low),
            "medium" => Ok(BudgetLevel::Medium),
            "high" => Ok(BudgetLevel::High),
            other => Err(PlannerError::Validation(format!(
                "Unknown budget level: {} (expected low, medium or high)",
                other
            ))),
        }
    }
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated trip with its day count resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedTrip {
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Number of days the itinerary covers, always within [3, 5]
    pub days: u32,
    /// Inclusive span of the submitted date range, when both dates were given
    pub date_span: Option<u32>,
    pub interests: Vec<Interest>,
    pub budget: BudgetLevel,
}

impl PlannedTrip {
    /// Interests joined the way they are shown to the model and the user
    pub fn interests_phrase(&self) -> String {
        self.interests
            .iter()
            .map(Interest::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// True when the planned day count differs from the submitted date range
    pub fn days_diverge_from_dates(&self) -> bool {
        self.date_span.is_some_and(|span| span != self.days)
    }
}

/// Inclusive number of calendar days between two dates, order-insensitive
pub fn inclusive_span(start: NaiveDate, end: NaiveDate) -> u32 {
    let diff = (end - start).num_days().unsigned_abs();
    u32::try_from(diff).unwrap_or(u32::MAX).saturating_add(1)
}

/// Clamp any day count into the supported trip length
pub fn clamp_days(days: i64) -> u32 {
    days.clamp(MIN_TRIP_DAYS as i64, MAX_TRIP_DAYS as i64) as u32
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        PlannerError::Validation(format!("Invalid {}: expected YYYY-MM-DD", field))
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl TripRequest {
    /// Build a request the way the trip form does: the day count is derived
    /// from the date range and clamped before it is sent.
    pub fn from_form(
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interests: &[Interest],
        budget: BudgetLevel,
    ) -> Self {
        let days = clamp_days(inclusive_span(start_date, end_date) as i64);
        Self {
            destination: Some(destination.into()),
            start_date: Some(start_date.format(DATE_FORMAT).to_string()),
            end_date: Some(end_date.format(DATE_FORMAT).to_string()),
            days: Some(days as i64),
            interests: Some(interests.iter().map(|i| i.as_str().to_string()).collect()),
            budget: Some(budget.as_str().to_string()),
        }
    }

    /// Names of required fields that are absent or empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if non_blank(&self.destination).is_none() {
            missing.push("destination");
        }
        if self.interests.as_ref().map_or(true, |list| list.is_empty()) {
            missing.push("interests");
        }
        if non_blank(&self.budget).is_none() {
            missing.push("budget");
        }
        if self.days.map_or(true, |days| days == 0) {
            missing.push("days");
        }
        missing
    }

    /// Validate the request and resolve the number of days to plan.
    pub fn validate(&self) -> Result<PlannedTrip> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(PlannerError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let destination = non_blank(&self.destination).unwrap_or_default().to_string();
        let budget: BudgetLevel = non_blank(&self.budget).unwrap_or_default().parse()?;

        let mut interests = Vec::new();
        for raw in self.interests.iter().flatten() {
            let interest: Interest = raw.parse()?;
            if !interests.contains(&interest) {
                interests.push(interest);
            }
        }

        let start_date = non_blank(&self.start_date)
            .map(|value| parse_date("startDate", value))
            .transpose()?;
        let end_date = non_blank(&self.end_date)
            .map(|value| parse_date("endDate", value))
            .transpose()?;

        let date_span = match (start_date, end_date) {
            (Some(start), Some(end)) => {
                if end < start {
                    return Err(PlannerError::Validation(
                        "endDate must not be before startDate".to_string(),
                    ));
                }
                Some(inclusive_span(start, end))
            }
            _ => None,
        };

        let days = match date_span {
            Some(span) => clamp_days(span as i64),
            None => clamp_days(self.days.unwrap_or_default()),
        };

        Ok(PlannedTrip {
            destination,
            start_date,
            end_date,
            days,
            date_span,
            interests,
            budget,
        })
    }
}
