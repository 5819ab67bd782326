//! Live bindings from spec keys to owner-scoped callbacks.
//!
//! A binding holds only a [`Weak`] handle to its owner, so registering a
//! callback never keeps the owner alive. Once the owner is dropped the
//! binding is skipped and removed on the next fan-out for its key (or by an
//! explicit [`BindingRegistry::prune`]); the callback and everything it
//! captured are dropped with it.

use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::value::{Tunable, Value};

/// Outcome of delivering a value to one binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delivery {
    Delivered,
    OwnerGone,
}

struct Binding {
    notify: Box<dyn FnMut(Value) -> Delivery>,
    alive: Box<dyn Fn() -> bool>,
}

/// Registry of (key, weak owner, callback) associations.
///
/// Callbacks for one key run in registration order.
#[derive(Default)]
pub struct BindingRegistry {
    bindings: HashMap<String, Vec<Binding>>,
}

impl fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .bindings
            .iter()
            .map(|(key, list)| (key.as_str(), list.len()))
            .collect();
        f.debug_struct("BindingRegistry")
            .field("bindings", &counts)
            .finish()
    }
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `key` and invoke it once with `current`.
    ///
    /// The caller is responsible for checking that `current` has the kind
    /// `T` expects; a value of the wrong kind is not delivered.
    pub fn bind<O, T, F>(&mut self, key: &str, current: Value, owner: &Rc<O>, mut callback: F)
    where
        O: 'static,
        T: Tunable,
        F: FnMut(&O, T) + 'static,
    {
        if let Some(value) = T::from_value(current) {
            callback(owner, value);
        }

        let weak: Weak<O> = Rc::downgrade(owner);
        let probe = weak.clone();
        let binding = Binding {
            notify: Box::new(move |value| match weak.upgrade() {
                Some(owner) => {
                    if let Some(value) = T::from_value(value) {
                        callback(&owner, value);
                    }
                    Delivery::Delivered
                }
                None => Delivery::OwnerGone,
            }),
            alive: Box::new(move || probe.strong_count() > 0),
        };

        self.bindings
            .entry(key.to_string())
            .or_default()
            .push(binding);
    }

    /// Deliver `value` to every live binding for `key`, dropping bindings
    /// whose owner is gone. Returns the number of callbacks invoked.
    pub fn fan_out(&mut self, key: &str, value: Value) -> usize {
        let Some(list) = self.bindings.get_mut(key) else {
            return 0;
        };

        let before = list.len();
        let mut delivered = 0;
        list.retain_mut(|binding| match (binding.notify)(value) {
            Delivery::Delivered => {
                delivered += 1;
                true
            }
            Delivery::OwnerGone => false,
        });

        let pruned = before - list.len();
        if pruned > 0 {
            trace!(key, pruned, "Dropped bindings whose owner was reclaimed");
        }
        if list.is_empty() {
            self.bindings.remove(key);
        }
        delivered
    }

    /// Number of bindings held for `key`, including any whose owner is gone
    /// but which have not been pruned yet.
    pub fn binding_count(&self, key: &str) -> usize {
        self.bindings.get(key).map_or(0, Vec::len)
    }

    /// Number of bindings for `key` whose owner is still alive.
    pub fn live_binding_count(&self, key: &str) -> usize {
        self.bindings
            .get(key)
            .map_or(0, |list| list.iter().filter(|b| (b.alive)()).count())
    }

    /// Total number of bindings held across all keys.
    pub fn len(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Eagerly drop every binding whose owner is gone. Returns how many
    /// were removed.
    pub fn prune(&mut self) -> usize {
        let mut pruned = 0;
        self.bindings.retain(|_, list| {
            let before = list.len();
            list.retain(|b| (b.alive)());
            pruned += before - list.len();
            !list.is_empty()
        });
        if pruned > 0 {
            trace!(pruned, "Pruned bindings whose owner was reclaimed");
        }
        pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Label {
        text: RefCell<String>,
        updates: Cell<usize>,
    }

    #[test]
    fn test_bind_invokes_immediately() {
        let mut registry = BindingRegistry::new();
        let label = Rc::new(Label::default());

        registry.bind("Spacing", Value::Number(175.0), &label, |owner: &Label, v: f64| {
            *owner.text.borrow_mut() = format!("{v}");
            owner.updates.set(owner.updates.get() + 1);
        });

        assert_eq!(*label.text.borrow(), "175");
        assert_eq!(label.updates.get(), 1);
        assert_eq!(registry.binding_count("Spacing"), 1);
    }

    #[test]
    fn test_fan_out_delivers_in_registration_order() {
        let mut registry = BindingRegistry::new();
        let owner = Rc::new(RefCell::new(Vec::<(&'static str, bool)>::new()));

        registry.bind("Enabled", Value::Bool(false), &owner, |log, v: bool| {
            log.borrow_mut().push(("first", v));
        });
        registry.bind("Enabled", Value::Bool(false), &owner, |log, v: bool| {
            log.borrow_mut().push(("second", v));
        });
        owner.borrow_mut().clear();

        assert_eq!(registry.fan_out("Enabled", Value::Bool(true)), 2);
        assert_eq!(*owner.borrow(), vec![("first", true), ("second", true)]);
    }

    #[test]
    fn test_fan_out_unknown_key_is_noop() {
        let mut registry = BindingRegistry::new();
        assert_eq!(registry.fan_out("Nope", Value::Bool(true)), 0);
    }

    #[test]
    fn test_dropped_owner_is_pruned_lazily() {
        let mut registry = BindingRegistry::new();
        let calls = Rc::new(Cell::new(0));
        let owner = Rc::new(());

        let counter = Rc::clone(&calls);
        registry.bind("Spacing", Value::Number(1.0), &owner, move |_, _: f64| {
            counter.set(counter.get() + 1);
        });
        assert_eq!(calls.get(), 1);

        drop(owner);
        assert_eq!(registry.binding_count("Spacing"), 1);
        assert_eq!(registry.live_binding_count("Spacing"), 0);

        assert_eq!(registry.fan_out("Spacing", Value::Number(2.0)), 0);
        assert_eq!(calls.get(), 1);
        assert_eq!(registry.binding_count("Spacing"), 0);
        // The callback, and the counter it captured, are gone.
        assert_eq!(Rc::strong_count(&calls), 1);
    }

    #[test]
    fn test_binding_does_not_keep_owner_alive() {
        let mut registry = BindingRegistry::new();
        let owner = Rc::new(Label::default());
        registry.bind("Spacing", Value::Number(1.0), &owner, |_, _: f64| {});
        assert_eq!(Rc::strong_count(&owner), 1);
        assert_eq!(Rc::weak_count(&owner), 2);
    }

    #[test]
    fn test_prune_removes_only_dead_bindings() {
        let mut registry = BindingRegistry::new();
        let alive = Rc::new(());
        let dead = Rc::new(());
        registry.bind("A", Value::Bool(true), &alive, |_, _: bool| {});
        registry.bind("A", Value::Bool(true), &dead, |_, _: bool| {});
        registry.bind("B", Value::Bool(true), &dead, |_, _: bool| {});
        drop(dead);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.prune(), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.live_binding_count("A"), 1);
        assert_eq!(registry.binding_count("B"), 0);
    }

    #[test]
    fn test_mismatched_value_is_not_delivered() {
        let mut registry = BindingRegistry::new();
        let owner = Rc::new(Cell::new(0usize));
        registry.bind("Flag", Value::Number(1.0), &owner, |count, _: bool| {
            count.set(count.get() + 1);
        });
        assert_eq!(owner.get(), 0);
    }
}
