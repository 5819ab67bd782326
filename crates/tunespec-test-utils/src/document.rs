//! Spec document builders for tests.
//!
//! [`SpecDocumentBuilder`] produces JSON spec documents as plain strings, so
//! it can feed both the parser and on-disk fixtures.
//!
//! ```ignore
//! let doc = SpecDocumentBuilder::new()
//!     .slider("Spacing", 175.0, 10.0, 300.0)
//!     .switch("Enabled", false)
//!     .build();
//! ```

use serde_json::{Map, Value, json};

/// Fluent builder for spec documents.
#[derive(Debug, Default)]
pub struct SpecDocumentBuilder {
    records: Vec<Value>,
}

impl SpecDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slider record with explicit bounds.
    pub fn slider(mut self, key: &str, value: f64, min: f64, max: f64) -> Self {
        self.records.push(json!({
            "key": key,
            "sliderValue": value,
            "sliderMinValue": min,
            "sliderMaxValue": max,
        }));
        self
    }

    /// A slider record relying on the default `0..=1` bounds.
    pub fn minimal_slider(mut self, key: &str, value: f64) -> Self {
        self.records.push(json!({ "key": key, "sliderValue": value }));
        self
    }

    pub fn switch(mut self, key: &str, value: bool) -> Self {
        self.records.push(json!({ "key": key, "switchValue": value }));
        self
    }

    /// Give the most recently added record a label.
    pub fn label(mut self, label: &str) -> Self {
        if let Some(Value::Object(record)) = self.records.last_mut() {
            record.insert("label".to_string(), json!(label));
        }
        self
    }

    /// An arbitrary record, for malformed-input tests.
    pub fn raw(mut self, record: Map<String, Value>) -> Self {
        self.records.push(Value::Object(record));
        self
    }

    pub fn build(self) -> String {
        Value::Array(self.records).to_string()
    }
}

/// The two-entry document used throughout the tests: a `Spacing` slider
/// (175 in 10..=300) and an `Enabled` switch (off).
pub fn scenario_document() -> String {
    SpecDocumentBuilder::new()
        .slider("Spacing", 175.0, 10.0, 300.0)
        .switch("Enabled", false)
        .build()
}
