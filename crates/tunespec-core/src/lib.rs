#![deny(unsafe_code)]

//! tunespec core: live-tunable values backed by a JSON spec document.
//!
//! A [`TunableSpec`] is loaded by name through a [`ResourceResolver`],
//! exposes typed getters, and keeps owner-scoped live bindings that are
//! re-run whenever a value is tuned. The [`document`] codec reads and
//! writes the spec format, so an edited spec can be exported and checked
//! back into source control.

/// Owner-scoped live bindings.
pub mod binding;
/// Spec document parsing and serialization.
pub mod document;
/// Entries and their slider/switch controls.
pub mod entry;
/// Load, resolve, and access errors.
pub mod error;
/// In-memory log collector for the control surface.
pub mod logging;
/// Spec name → document resolution.
pub mod resource;
/// The tunable store.
pub mod spec;
/// Values and typed access.
pub mod value;

pub use binding::BindingRegistry;
pub use entry::{Control, Entry};
pub use error::{DocumentError, LoadError, ResolveError, SpecError};
pub use logging::{LogCollector, LogEntry, LogReader};
pub use resource::{DirectoryResolver, EmbeddedResolver, ResourceResolver};
pub use spec::TunableSpec;
pub use value::{Tunable, Value, ValueKind};
