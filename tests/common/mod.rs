#![allow(dead_code)]

use serde_json::{json, Value};

pub const API_KEY: &str = "test-key";
pub const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

/// A consistent itinerary object for `days` days
pub fn itinerary_json(days: u32) -> Value {
    let slot = |activity: &str| {
        json!({
            "activity": activity,
            "location": "Calangute",
            "duration": "2 hours",
            "travelTime": "15 min"
        })
    };
    let itinerary: Vec<Value> = (1..=days)
        .map(|day| {
            json!({
                "day": day,
                "title": format!("Coastal day {day}"),
                "morning": slot("Beach walk"),
                "afternoon": slot("Spice farm tour"),
                "evening": slot("Seafood dinner"),
                "tip": "Start early to beat the heat"
            })
        })
        .collect();

    let days_f = days as f64;
    let accommodation = 3500.0 * days_f;
    let food = 1500.0 * days_f;
    let transport = 800.0 * days_f;
    json!({
        "highlights": {
            "topAttractions": (1..=5)
                .map(|n| json!({"name": format!("Beach {n}"), "reason": "Great sunsets"}))
                .collect::<Vec<_>>(),
            "offbeatRecommendations": [
                {"name": "Divar Island", "reason": "Quiet village life"},
                {"name": "Chorao bird sanctuary", "reason": "Mangrove birding"}
            ]
        },
        "itinerary": itinerary,
        "budget": {
            "currency": "INR",
            "accommodation": {"perNight": 3500, "total": accommodation, "description": "Beach hut"},
            "food": {"perDay": 1500, "total": food, "description": "Shacks and cafes"},
            "transport": {"perDay": 800, "total": transport, "description": "Scooter rental"},
            "activities": {"total": 3000, "description": "Entry fees"},
            "grandTotal": accommodation + food + transport + 3000.0,
            "tips": "Travel in shoulder season"
        }
    })
}

/// A `generateContent` response whose single candidate says `text`
pub fn gemini_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": text}]
            },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

pub fn goa_request() -> Value {
    json!({
        "destination": "Goa",
        "startDate": "2025-03-01",
        "endDate": "2025-03-04",
        "days": 4,
        "interests": ["beaches", "food"],
        "budget": "medium"
    })
}
