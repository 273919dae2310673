use crate::types::itinerary::{ItineraryDocument, PLAN_CURRENCY};
use std::fmt;

pub const EXPECTED_TOP_ATTRACTIONS: usize = 5;
pub const EXPECTED_OFFBEAT_RECOMMENDATIONS: usize = 2;

/// Largest gap between grandTotal and the category sum still treated as equal
const TOTAL_TOLERANCE_INR: f64 = 1.0;

/// One way an extracted document departs from the shape the prompt asked for
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeIssue {
    TopAttractionCount { found: usize },
    OffbeatCount { found: usize },
    DayCount { expected: u32, found: usize },
    DayNumbering { position: usize, found: u32 },
    Currency { found: String },
    GrandTotal { stated: f64, computed: f64 },
}

impl fmt::Display for ShapeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeIssue::TopAttractionCount { found } => write!(
                f,
                "expected {} top attractions, found {}",
                EXPECTED_TOP_ATTRACTIONS, found
            ),
            ShapeIssue::OffbeatCount { found } => write!(
                f,
                "expected {} offbeat recommendations, found {}",
                EXPECTED_OFFBEAT_RECOMMENDATIONS, found
            ),
            ShapeIssue::DayCount { expected, found } => {
                write!(f, "expected {} itinerary days, found {}", expected, found)
            }
            ShapeIssue::DayNumbering { position, found } => write!(
                f,
                "itinerary entry {} is numbered day {}",
                position + 1,
                found
            ),
            ShapeIssue::Currency { found } => {
                write!(f, "expected currency {}, found {}", PLAN_CURRENCY, found)
            }
            ShapeIssue::GrandTotal { stated, computed } => write!(
                f,
                "grandTotal {} does not equal category sum {}",
                stated, computed
            ),
        }
    }
}

/// Result of checking a document against the requested shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeReport {
    pub issues: Vec<ShapeIssue>,
}

impl ShapeReport {
    /// Compare counts, numbering, currency and arithmetic with what was asked for.
    pub fn check(document: &ItineraryDocument, expected_days: u32) -> Self {
        let mut issues = Vec::new();

        let top = document.highlights.top_attractions.len();
        if top != EXPECTED_TOP_ATTRACTIONS {
            issues.push(ShapeIssue::TopAttractionCount { found: top });
        }

        let offbeat = document.highlights.offbeat_recommendations.len();
        if offbeat != EXPECTED_OFFBEAT_RECOMMENDATIONS {
            issues.push(ShapeIssue::OffbeatCount { found: offbeat });
        }

        if document.itinerary.len() != expected_days as usize {
            issues.push(ShapeIssue::DayCount {
                expected: expected_days,
                found: document.itinerary.len(),
            });
        }

        for (position, day) in document.itinerary.iter().enumerate() {
            if day.day as usize != position + 1 {
                issues.push(ShapeIssue::DayNumbering {
                    position,
                    found: day.day,
                });
            }
        }

        if !document.budget.currency.eq_ignore_ascii_case(PLAN_CURRENCY) {
            issues.push(ShapeIssue::Currency {
                found: document.budget.currency.clone(),
            });
        }

        let computed = document.budget.category_sum();
        if (document.budget.grand_total - computed).abs() > TOTAL_TOLERANCE_INR {
            issues.push(ShapeIssue::GrandTotal {
                stated: document.budget.grand_total,
                computed,
            });
        }

        Self { issues }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues joined into one line for logs and strict-mode errors
    pub fn summary(&self) -> String {
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
