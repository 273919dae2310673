//! Fixtures shared by unit tests

use serde_json::{json, Value};

/// A well-formed itinerary payload covering `days` days, totals consistent.
pub(crate) fn sample_itinerary_json(days: u32) -> Value {
    let attractions: Vec<Value> = (1..=5)
        .map(|n| json!({ "name": format!("Attraction {n}"), "reason": "Matches your interests" }))
        .collect();
    let offbeat: Vec<Value> = (1..=2)
        .map(|n| json!({ "name": format!("Hidden Gem {n}"), "reason": "Few tourists know it" }))
        .collect();
    let itinerary: Vec<Value> = (1..=days)
        .map(|day| {
            json!({
                "day": day,
                "title": format!("Day {day} theme"),
                "morning": {
                    "activity": "Breakfast walk",
                    "location": "Old Town",
                    "duration": "2 hours",
                    "travelTime": "15 min from hotel"
                },
                "afternoon": {
                    "activity": "Museum visit",
                    "location": "City Museum",
                    "duration": "3 hours",
                    "travelTime": "20 min from morning location"
                },
                "evening": {
                    "activity": "Dinner by the water",
                    "location": "Harbour Front",
                    "duration": "2-3 hours",
                    "travelTime": "10 min"
                },
                "tip": "Carry cash for small vendors"
            })
        })
        .collect();

    let nights = days.saturating_sub(1).max(1) as f64;
    let accommodation = 3500.0 * nights;
    let food = 1500.0 * days as f64;
    let transport = 800.0 * days as f64;
    let activities = 3000.0;

    json!({
        "highlights": {
            "topAttractions": attractions,
            "offbeatRecommendations": offbeat
        },
        "itinerary": itinerary,
        "budget": {
            "currency": "INR",
            "accommodation": {
                "perNight": 3500,
                "total": accommodation,
                "description": "3-star hotel in central area"
            },
            "food": { "perDay": 1500, "total": food, "description": "Local restaurants" },
            "transport": { "perDay": 800, "total": transport, "description": "Metro and taxis" },
            "activities": { "total": activities, "description": "Entry fees" },
            "grandTotal": accommodation + food + transport + activities,
            "tips": "Book trains early"
        }
    })
}
