//! Parsed tool-call arguments.

use serde::de::DeserializeOwned;

use crate::error::{PondwireError, Result};

/// Arguments passed to a tool, parsed from the server's raw JSON string.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    /// Wrap an already-parsed JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Parse the raw argument string carried by a function-call request.
    ///
    /// Fails with [`PondwireError::ArgumentParse`] on malformed JSON or a
    /// non-object payload.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| PondwireError::ArgumentParse(format!("malformed JSON: {e}")))?;
        if !value.is_object() {
            return Err(PondwireError::ArgumentParse(format!(
                "tool arguments must be a JSON object: {raw}"
            )));
        }
        Ok(Self { value })
    }

    /// The underlying JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a required string field.
    pub fn get_str(&self, name: &str) -> Result<&str> {
        self.value
            .get(name)
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                PondwireError::ArgumentParse(format!("missing required string field '{name}'"))
            })
    }

    /// Get an optional string field.
    pub fn get_str_opt(&self, name: &str) -> Option<&str> {
        self.value.get(name).and_then(|v| v.as_str())
    }

    /// Deserialize the arguments into a typed shape.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.value.clone())
            .map_err(|e| PondwireError::ArgumentParse(e.to_string()))
    }
}
