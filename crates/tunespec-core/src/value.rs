//! Tunable values and the typed accessor trait.

use std::fmt;

use serde::Serialize;

/// The kind of value an entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Floating-point value driven by a slider.
    Number,
    /// Boolean value driven by a switch.
    Bool,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Number => f.write_str("number"),
            ValueKind::Bool => f.write_str("bool"),
        }
    }
}

/// A stored tunable value.
///
/// Serializes untagged so the metrics mapping renders as plain JSON
/// numbers and booleans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Bool(bool),
}

impl Value {
    pub fn kind(self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
        }
    }

    pub fn as_number(self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n),
            Value::Bool(_) => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            Value::Number(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A Rust type that can be read from, or bound to, a tunable entry.
///
/// Implemented for `f64`, `f32` (the graphics-float form) and `bool`.
/// The accessor and binding APIs dispatch on this trait instead of
/// overloading by return type.
pub trait Tunable: Copy + 'static {
    /// The entry kind this type reads from.
    const KIND: ValueKind;

    /// Convert a stored value; `None` when the kinds disagree.
    fn from_value(value: Value) -> Option<Self>;
}

impl Tunable for f64 {
    const KIND: ValueKind = ValueKind::Number;

    fn from_value(value: Value) -> Option<Self> {
        value.as_number()
    }
}

impl Tunable for f32 {
    const KIND: ValueKind = ValueKind::Number;

    fn from_value(value: Value) -> Option<Self> {
        value.as_number().map(|n| n as f32)
    }
}

impl Tunable for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::Number(1.0).kind(), ValueKind::Number);
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
    }

    #[test]
    fn test_tunable_conversion() {
        assert_eq!(f64::from_value(Value::Number(2.5)), Some(2.5));
        assert_eq!(f32::from_value(Value::Number(2.5)), Some(2.5_f32));
        assert_eq!(bool::from_value(Value::Bool(true)), Some(true));
        assert_eq!(bool::from_value(Value::Number(1.0)), None);
        assert_eq!(f64::from_value(Value::Bool(false)), None);
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_string(&vec![Value::Number(3.5), Value::Bool(false)]).unwrap();
        assert_eq!(json, "[3.5,false]");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(175.0).to_string(), "175");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(ValueKind::Number.to_string(), "number");
    }
}
