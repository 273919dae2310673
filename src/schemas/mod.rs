//! JSON schemas and shape checks for documents the model is asked to produce

pub mod schema;
pub mod shape;
pub mod validation;

pub use schema::{schema_handle_for, SchemaHandle, StructuredOutput};
pub use shape::{ShapeIssue, ShapeReport};
pub use validation::{deserialize_structured, validate_structured_payload};
