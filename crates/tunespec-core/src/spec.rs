//! The tunable store: a named, loaded spec document with typed accessors
//! and live bindings.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use tracing::{debug, info};

use crate::binding::BindingRegistry;
use crate::document;
use crate::entry::Entry;
use crate::error::{DocumentError, LoadError, SpecError};
use crate::resource::ResourceResolver;
use crate::value::{Tunable, Value};

/// A loaded spec: tunable entries in document order, their live bindings,
/// and whether the control surface is currently showing.
///
/// Keys are fixed at load time. Values change only through [`set`](Self::set),
/// which clamps numbers into their slider range and notifies bindings.
///
/// `TunableSpec` is single-threaded (bindings hold `Rc`/`Weak` handles) and
/// is therefore neither `Send` nor `Sync`.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tunespec_core::TunableSpec;
///
/// let doc = r#"[{ "key": "Spacing", "sliderValue": 175, "sliderMinValue": 10, "sliderMaxValue": 300 }]"#;
/// let mut spec = TunableSpec::from_document("MainSpec", doc.as_bytes()).unwrap();
///
/// let width = Rc::new(Cell::new(0.0));
/// spec.with_key("Spacing", &width, |w: &Cell<f64>, v: f64| w.set(v)).unwrap();
/// assert_eq!(width.get(), 175.0);
///
/// spec.set("Spacing", 1000.0).unwrap();
/// assert_eq!(width.get(), 300.0);
/// ```
#[derive(Debug)]
pub struct TunableSpec {
    name: String,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    bindings: BindingRegistry,
    controls_visible: bool,
}

impl TunableSpec {
    /// Resolve `name` through `resolver` and parse the document.
    pub fn load(name: &str, resolver: &dyn ResourceResolver) -> Result<Self, LoadError> {
        let bytes = resolver.resolve(name)?;
        Ok(Self::from_document(name, &bytes)?)
    }

    /// Load a spec that must exist and be valid.
    ///
    /// Spec documents ship with the application, so a missing or invalid
    /// one is a build defect rather than a runtime condition.
    ///
    /// # Panics
    ///
    /// Panics if the document cannot be resolved or parsed.
    pub fn named(name: &str, resolver: &dyn ResourceResolver) -> Self {
        Self::load(name, resolver)
            .unwrap_or_else(|err| panic!("failed to load spec named {name:?}: {err}"))
    }

    /// Build a spec from document bytes.
    pub fn from_document(name: &str, document: &[u8]) -> Result<Self, DocumentError> {
        let entries = document::parse(document)?;
        let spec = Self::from_entries(name, entries)?;
        info!(spec = %spec.name, entries = spec.entries.len(), "Loaded tunable spec");
        Ok(spec)
    }

    /// Build a spec from entries in document order.
    ///
    /// A key appearing twice is a [`DocumentError::DuplicateKey`].
    pub fn from_entries(name: &str, entries: Vec<Entry>) -> Result<Self, DocumentError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.key().to_string(), i).is_some() {
                return Err(DocumentError::DuplicateKey {
                    index: i,
                    key: entry.key().to_string(),
                });
            }
        }
        Ok(Self {
            name: name.to_string(),
            entries,
            index,
            bindings: BindingRegistry::new(),
            controls_visible: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ── Reading values ────────────────────────────────────────────

    /// Read a value as `T` (`f64`, `f32`, or `bool`).
    pub fn get<T: Tunable>(&self, key: &str) -> Result<T, SpecError> {
        let entry = self.entry_or_err(key)?;
        T::from_value(entry.value()).ok_or_else(|| SpecError::TypeMismatch {
            key: key.to_string(),
            expected: T::KIND,
            actual: entry.kind(),
        })
    }

    /// Read a value without committing to a type.
    pub fn value(&self, key: &str) -> Result<Value, SpecError> {
        Ok(self.entry_or_err(key)?.value())
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// All entries in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key → current value, suitable as a metrics table for layout code.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.entries
            .iter()
            .map(|e| (e.key().to_string(), e.value()))
            .collect()
    }

    // ── Changing values ───────────────────────────────────────────

    /// Store a new value for `key` and notify its bindings.
    ///
    /// Numbers are clamped into the slider's `[min, max]`. Bindings are
    /// notified only when the stored value actually changes. Returns the
    /// value as stored.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<Value, SpecError> {
        let value = value.into();
        let index = *self
            .index
            .get(key)
            .ok_or_else(|| SpecError::UnknownKey(key.to_string()))?;
        let stored = self.entries[index].store(value)?;

        if stored.clamped {
            debug!(spec = %self.name, key, requested = %value, stored = %stored.value, "Clamped tuned value");
        }
        if stored.changed {
            let notified = self.bindings.fan_out(key, stored.value);
            debug!(spec = %self.name, key, value = %stored.value, notified, "Tuned value changed");
        }
        Ok(stored.value)
    }

    // ── Live bindings ─────────────────────────────────────────────

    /// Bind `callback` to `key` for as long as `owner` is alive.
    ///
    /// The callback runs once immediately with the current value and again
    /// after every change. Only a weak handle to `owner` is kept: once the
    /// last strong reference is dropped the callback never runs again.
    pub fn with_key<O, T, F>(&mut self, key: &str, owner: &Rc<O>, callback: F) -> Result<(), SpecError>
    where
        O: 'static,
        T: Tunable,
        F: FnMut(&O, T) + 'static,
    {
        let entry = self.entry_or_err(key)?;
        if entry.kind() != T::KIND {
            return Err(SpecError::TypeMismatch {
                key: key.to_string(),
                expected: T::KIND,
                actual: entry.kind(),
            });
        }
        let current = entry.value();
        self.bindings.bind(key, current, owner, callback);
        Ok(())
    }

    /// Bindings held for `key`, including unpruned ones whose owner is gone.
    pub fn binding_count(&self, key: &str) -> usize {
        self.bindings.binding_count(key)
    }

    /// Bindings for `key` whose owner is still alive.
    pub fn live_binding_count(&self, key: &str) -> usize {
        self.bindings.live_binding_count(key)
    }

    /// Drop bindings whose owner is gone. Returns how many were removed.
    pub fn prune_bindings(&mut self) -> usize {
        self.bindings.prune()
    }

    // ── Control surface state ─────────────────────────────────────

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }

    /// Flip control visibility and return the new state.
    pub fn toggle_controls(&mut self) -> bool {
        self.controls_visible = !self.controls_visible;
        self.controls_visible
    }

    // ── Export ────────────────────────────────────────────────────

    /// Serialize the current values as a spec document.
    pub fn export(&self) -> Result<String, DocumentError> {
        document::serialize(&self.entries)
    }

    fn entry_or_err(&self, key: &str) -> Result<&Entry, SpecError> {
        self.entry(key)
            .ok_or_else(|| SpecError::UnknownKey(key.to_string()))
    }
}
