//! Live readout fed through spec bindings.
//!
//! The control surface binds a [`LiveReadout`] to every entry, so the value
//! column shows what bound application code would see rather than reading
//! the store directly.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tunespec_core::{SpecError, TunableSpec, Value, ValueKind};

/// Last value delivered for a key and how many deliveries it has seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delivered {
    pub value: Value,
    pub deliveries: usize,
}

/// Owner object for the surface's bindings.
#[derive(Debug, Default)]
pub struct LiveReadout {
    delivered: RefCell<HashMap<String, Delivered>>,
}

impl LiveReadout {
    /// Create a readout and bind it to every entry of `spec`.
    pub fn attach(spec: &mut TunableSpec) -> Result<Rc<Self>, SpecError> {
        let readout = Rc::new(Self::default());
        let keys: Vec<(String, ValueKind)> = spec
            .entries()
            .iter()
            .map(|e| (e.key().to_string(), e.kind()))
            .collect();

        for (key, kind) in keys {
            let slot = key.clone();
            match kind {
                ValueKind::Number => spec.with_key(&key, &readout, move |r: &LiveReadout, v: f64| {
                    r.record(&slot, Value::Number(v))
                })?,
                ValueKind::Bool => spec.with_key(&key, &readout, move |r: &LiveReadout, v: bool| {
                    r.record(&slot, Value::Bool(v))
                })?,
            }
        }
        Ok(readout)
    }

    fn record(&self, key: &str, value: Value) {
        let mut delivered = self.delivered.borrow_mut();
        let slot = delivered.entry(key.to_string()).or_insert(Delivered {
            value,
            deliveries: 0,
        });
        slot.value = value;
        slot.deliveries += 1;
    }

    pub fn get(&self, key: &str) -> Option<Delivered> {
        self.delivered.borrow().get(key).copied()
    }
}
