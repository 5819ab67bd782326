//! Spec document codec.
//!
//! A spec document is a JSON array of records. Each record names a key and
//! carries either a slider value (with optional bounds) or a switch value:
//!
//! ```json
//! [
//!   { "key": "GridSpacing", "label": "Grid Spacing",
//!     "sliderValue": 175, "sliderMinValue": 10, "sliderMaxValue": 300 },
//!   { "key": "EnableClickySounds", "switchValue": false }
//! ]
//! ```
//!
//! [`parse`] validates the records into [`Entry`] values and [`serialize`]
//! writes entries back out in the same shape.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entry::{Control, DEFAULT_SLIDER_MAX, DEFAULT_SLIDER_MIN, Entry};
use crate::error::DocumentError;

/// One record as it appears on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    slider_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    slider_min_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    slider_max_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    switch_value: Option<bool>,
}

/// Parse a spec document from raw bytes.
pub fn parse(document: &[u8]) -> Result<Vec<Entry>, DocumentError> {
    let records: Vec<Record> = serde_json::from_slice(document)?;
    entries_from_records(records)
}

/// Parse a spec document from a string.
pub fn parse_str(document: &str) -> Result<Vec<Entry>, DocumentError> {
    parse(document.as_bytes())
}

/// Serialize entries to a pretty-printed spec document.
pub fn serialize(entries: &[Entry]) -> Result<String, DocumentError> {
    let records: Vec<Record> = entries.iter().map(record_from_entry).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Serialize entries to a single-line spec document.
pub fn serialize_compact(entries: &[Entry]) -> Result<String, DocumentError> {
    let records: Vec<Record> = entries.iter().map(record_from_entry).collect();
    Ok(serde_json::to_string(&records)?)
}

fn entries_from_records(records: Vec<Record>) -> Result<Vec<Entry>, DocumentError> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut entries = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let entry = entry_from_record(index, record)?;
        if !seen.insert(entry.key().to_string()) {
            return Err(DocumentError::DuplicateKey {
                index,
                key: entry.key().to_string(),
            });
        }
        entries.push(entry);
    }

    Ok(entries)
}

fn entry_from_record(index: usize, record: Record) -> Result<Entry, DocumentError> {
    let key = record.key.ok_or(DocumentError::MissingKey { index })?;
    if key.is_empty() {
        return Err(DocumentError::EmptyKey { index });
    }

    let entry = match (record.slider_value, record.switch_value) {
        (Some(value), None) => {
            let min = record.slider_min_value.unwrap_or(DEFAULT_SLIDER_MIN);
            let max = record.slider_max_value.unwrap_or(DEFAULT_SLIDER_MAX);
            if min <= max && (value < min || value > max) {
                warn!(key = %key, value, min, max, "Slider value outside its bounds, clamping");
            }
            Entry::slider(key, value, min, max)?
        }
        (None, Some(value)) => Entry::switch(key, value),
        _ => return Err(DocumentError::AmbiguousOrMissingKind { index, key }),
    };

    Ok(match record.label {
        Some(label) => entry.with_label(label),
        None => entry,
    })
}

fn record_from_entry(entry: &Entry) -> Record {
    let mut record = Record {
        key: Some(entry.key().to_string()),
        label: entry.explicit_label().map(str::to_string),
        ..Record::default()
    };
    match *entry.control() {
        Control::Slider { value, min, max } => {
            record.slider_value = Some(value);
            record.slider_min_value = Some(min);
            record.slider_max_value = Some(max);
        }
        Control::Switch { value } => record.switch_value = Some(value),
    }
    record
}
