//! Spec entries: one key's value, its control kind, and slider bounds.

use crate::error::{DocumentError, SpecError};
use crate::value::{Value, ValueKind};

/// Lower slider bound used when a record omits `sliderMinValue`.
pub const DEFAULT_SLIDER_MIN: f64 = 0.0;

/// Upper slider bound used when a record omits `sliderMaxValue`.
pub const DEFAULT_SLIDER_MAX: f64 = 1.0;

/// The control that edits an entry, carrying its current value.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// A numeric value constrained to `min..=max`.
    Slider { value: f64, min: f64, max: f64 },
    /// A boolean value.
    Switch { value: bool },
}

/// A single tunable entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    key: String,
    label: Option<String>,
    control: Control,
}

/// Result of storing a value into an entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Stored {
    pub value: Value,
    pub clamped: bool,
    pub changed: bool,
}

impl Entry {
    /// Create a slider entry. The value is clamped into `min..=max`.
    ///
    /// Fails when the value or a bound is not finite, or when `min > max`.
    pub fn slider(
        key: impl Into<String>,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<Self, DocumentError> {
        let key = key.into();
        if !(value.is_finite() && min.is_finite() && max.is_finite()) {
            return Err(DocumentError::NonFiniteNumber { key });
        }
        if min > max {
            return Err(DocumentError::InvalidBounds { key, min, max });
        }
        Ok(Self {
            key,
            label: None,
            control: Control::Slider {
                value: value.clamp(min, max),
                min,
                max,
            },
        })
    }

    /// Create a switch entry.
    pub fn switch(key: impl Into<String>, value: bool) -> Self {
        Self {
            key: key.into(),
            label: None,
            control: Control::Switch { value },
        }
    }

    /// Attach an explicit display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display label, falling back to the key.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    /// The label as written in the source document, if any.
    pub fn explicit_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn kind(&self) -> ValueKind {
        match self.control {
            Control::Slider { .. } => ValueKind::Number,
            Control::Switch { .. } => ValueKind::Bool,
        }
    }

    pub fn value(&self) -> Value {
        match self.control {
            Control::Slider { value, .. } => Value::Number(value),
            Control::Switch { value } => Value::Bool(value),
        }
    }

    /// Slider bounds as `(min, max)`; `None` for switches.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.control {
            Control::Slider { min, max, .. } => Some((min, max)),
            Control::Switch { .. } => None,
        }
    }

    /// Store a new value, clamping numbers into the slider range.
    pub(crate) fn store(&mut self, value: Value) -> Result<Stored, SpecError> {
        let expected = self.kind();
        match (&mut self.control, value) {
            (Control::Slider { value: current, min, max }, Value::Number(n)) => {
                if n.is_nan() {
                    return Err(SpecError::NonFiniteValue(self.key.clone()));
                }
                let next = n.clamp(*min, *max);
                let changed = *current != next;
                *current = next;
                Ok(Stored {
                    value: Value::Number(next),
                    clamped: next != n,
                    changed,
                })
            }
            (Control::Switch { value: current }, Value::Bool(b)) => {
                let changed = *current != b;
                *current = b;
                Ok(Stored {
                    value: Value::Bool(b),
                    clamped: false,
                    changed,
                })
            }
            _ => Err(SpecError::TypeMismatch {
                key: self.key.clone(),
                expected,
                actual: value.kind(),
            }),
        }
    }
}
