//! Plain-text rendering of the client views for the terminal.

use std::fmt::Write as _;

use crate::{
    core::view::{TripResult, ViewState},
    types::{
        itinerary::{BudgetBreakdown, DayPlan, Recommendation},
        trip::{BudgetLevel, Interest},
    },
};

/// Format a rupee amount with Indian digit grouping, e.g. `₹1,20,400`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, last_three) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        if end > 0 {
            groups.push(&head[..end]);
        }
        groups.reverse();
        format!("{},{}", groups.join(","), last_three)
    };

    format!("{sign}₹{grouped}")
}

/// Render whichever view the client is in.
pub fn render_view(state: &ViewState) -> String {
    match state {
        ViewState::Form => "Enter your destination, dates, interests and budget to plan a trip.\n"
            .to_string(),
        ViewState::Loading { request } => format!(
            "Crafting your itinerary for {}...\n",
            request.destination.as_deref().unwrap_or("your trip")
        ),
        ViewState::Results(result) => render_results(result),
        ViewState::Error(message) => render_error(message),
    }
}

pub fn render_error(message: &str) -> String {
    format!(
        "Oops! Something went wrong\n{}\n\nRun the command again to start over.\n",
        message
    )
}

pub fn render_results(result: &TripResult) -> String {
    let mut out = String::new();
    let request = &result.request;
    let doc = &result.itinerary;
    let destination = request.destination.as_deref().unwrap_or("Your trip");
    let days = doc.itinerary.len();

    let budget_label = request
        .budget
        .as_deref()
        .and_then(|raw| raw.parse::<BudgetLevel>().ok())
        .map(|level| level.label().to_string())
        .unwrap_or_else(|| request.budget.clone().unwrap_or_default());
    let interests = request
        .interests
        .iter()
        .flatten()
        .map(|raw| {
            raw.parse::<Interest>()
                .map(|interest| interest.label().to_string())
                .unwrap_or_else(|_| raw.clone())
        })
        .collect::<Vec<_>>()
        .join(", ");

    let _ = writeln!(out, "== {} ==", destination);
    if let (Some(start), Some(end)) = (&request.start_date, &request.end_date) {
        let _ = writeln!(out, "{} to {}", start, end);
    }
    let _ = writeln!(out, "{} days | {} | {}", days, budget_label, interests);

    let _ = writeln!(out, "\nTop Attractions");
    write_recommendations(&mut out, &doc.highlights.top_attractions);
    let _ = writeln!(out, "\nOffbeat Recommendations");
    write_recommendations(&mut out, &doc.highlights.offbeat_recommendations);

    for day in &doc.itinerary {
        write_day(&mut out, day);
    }

    write_budget(&mut out, &doc.budget, days, destination);
    out
}

fn write_recommendations(out: &mut String, items: &[Recommendation]) {
    for (idx, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} - {}", idx + 1, item.name, item.reason);
    }
}

fn write_day(out: &mut String, day: &DayPlan) {
    let _ = writeln!(out, "\nDay {}: {}", day.day, day.title);
    for (label, slot) in day.slots() {
        let _ = writeln!(out, "  {:<10}{} @ {}", label, slot.activity, slot.location);
        let _ = writeln!(
            out,
            "  {:<10}{} | travel: {}",
            "",
            slot.duration,
            slot.travel_time
        );
    }
    if let Some(tip) = &day.tip {
        let _ = writeln!(out, "  Tip: {}", tip);
    }
}

fn write_budget(out: &mut String, budget: &BudgetBreakdown, days: usize, destination: &str) {
    let _ = writeln!(out, "\nBudget Breakdown ({})", budget.currency);

    let accommodation_rate = budget
        .accommodation
        .per_night
        .map(|rate| format!(" ({}/night)", format_inr(rate)))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "  Accommodation {}{} - {}",
        format_inr(budget.accommodation.total),
        accommodation_rate,
        budget.accommodation.description
    );

    for (label, cost) in [("Food", &budget.food), ("Transport", &budget.transport)] {
        let rate = cost
            .per_day
            .map(|rate| format!(" ({}/day)", format_inr(rate)))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {} {}{} - {}",
            label,
            format_inr(cost.total),
            rate,
            cost.description
        );
    }

    let _ = writeln!(
        out,
        "  Activities {} - {}",
        format_inr(budget.activities.total),
        budget.activities.description
    );
    let _ = writeln!(
        out,
        "  Estimated Total {} {} for {} days in {}",
        format_inr(budget.grand_total),
        budget.currency,
        days,
        destination
    );
    if let Some(tips) = &budget.tips {
        let _ = writeln!(out, "  Budget Tips: {}", tips);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_itinerary_json;
    use crate::types::trip::TripRequest;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(3500.0), "₹3,500");
        assert_eq!(format_inr(20400.0), "₹20,400");
        assert_eq!(format_inr(120400.0), "₹1,20,400");
        assert_eq!(format_inr(12345678.4), "₹1,23,45,678");
        assert_eq!(format_inr(-1500.0), "-₹1,500");
    }

    #[test]
    fn test_results_view_lists_plan() {
        let result = TripResult {
            request: TripRequest {
                destination: Some("Goa".to_string()),
                start_date: Some("2025-03-01".to_string()),
                end_date: Some("2025-03-03".to_string()),
                days: Some(3),
                interests: Some(vec!["beaches".to_string(), "food".to_string()]),
                budget: Some("low".to_string()),
            },
            itinerary: serde_json::from_value(sample_itinerary_json(3)).unwrap(),
        };

        let text = render_view(&ViewState::Results(Box::new(result)));
        assert!(text.contains("== Goa =="));
        assert!(text.contains("3 days | Budget | Beaches, Food"));
        assert!(text.contains("Day 3: Day 3 theme"));
        assert!(text.contains("Hidden Gem 2"));
        assert!(text.contains("₹3,500/night"));
        assert!(text.contains("for 3 days in Goa"));
    }

    #[test]
    fn test_error_view_shows_message() {
        let text = render_view(&ViewState::Error("Failed to parse itinerary data".to_string()));
        assert!(text.starts_with("Oops! Something went wrong"));
        assert!(text.contains("Failed to parse itinerary data"));
    }
}
