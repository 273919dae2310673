pub mod extraction;
pub mod gemini_client;
pub mod prompt;

pub use extraction::{extract_json_object, locate_json_object, ExtractionSource};
pub use gemini_client::{GeminiClient, GenerationConfig, ItineraryModel};
pub use prompt::{build_itinerary_prompt, sanitize_user_text};
