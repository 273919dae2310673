use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Cached JSON schema handle associated with a model output type.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    schema_json: Arc<Value>,
}

impl SchemaHandle {
    pub fn new(schema_name: &'static str, schema_json: Value) -> Self {
        Self {
            schema_name,
            schema_json: Arc::new(schema_json),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }
}

/// A document the model is asked to produce, with its cached schema.
pub trait StructuredOutput: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

/// Generate a schema handle from a type's `JsonSchema` derive.
pub fn schema_handle_for<T: JsonSchema>(schema_name: &'static str) -> SchemaHandle {
    let root = schema_for!(T);
    // RootSchema is plain data; serializing it cannot fail.
    let schema_json = serde_json::to_value(root).unwrap_or(Value::Null);
    SchemaHandle::new(schema_name, schema_json)
}
