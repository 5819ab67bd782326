//! Spec name → document resolution.
//!
//! A spec is loaded by name; where the bytes come from is up to the
//! [`ResourceResolver`]. [`DirectoryResolver`] mirrors an application
//! resource bundle (`<dir>/<name>.json`) and [`EmbeddedResolver`] serves
//! documents compiled into the binary or built in tests.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ResolveError;

/// File extension of spec documents on disk.
pub const SPEC_EXTENSION: &str = "json";

/// Resolves a spec name to its document bytes.
pub trait ResourceResolver {
    fn resolve(&self, name: &str) -> Result<Vec<u8>, ResolveError>;
}

/// Resolves `<root>/<name>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path a spec name maps to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{SPEC_EXTENSION}"))
    }
}

impl ResourceResolver for DirectoryResolver {
    fn resolve(&self, name: &str) -> Result<Vec<u8>, ResolveError> {
        let path = self.path_for(name);
        debug!(path = %path.display(), "Resolving spec document");
        std::fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ResolveError::NotFound {
                name: name.to_string(),
                path,
            },
            _ => ResolveError::Io { path, source },
        })
    }
}

/// In-memory table of named documents.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResolver {
    documents: HashMap<String, Cow<'static, [u8]>>,
}

impl EmbeddedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, document: impl Into<Cow<'static, [u8]>>) {
        self.documents.insert(name.into(), document.into());
    }

    /// Builder form of [`insert`](Self::insert), handy with `include_str!`.
    pub fn with_document(mut self, name: impl Into<String>, document: &'static str) -> Self {
        self.insert(name, document.as_bytes());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }
}

impl ResourceResolver for EmbeddedResolver {
    fn resolve(&self, name: &str) -> Result<Vec<u8>, ResolveError> {
        self.documents
            .get(name)
            .map(|doc| doc.to_vec())
            .ok_or_else(|| ResolveError::NotEmbedded(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_directory_resolver_reads_named_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("MainSpec.json"), b"[]").unwrap();

        let resolver = DirectoryResolver::new(tmp.path());
        assert_eq!(resolver.resolve("MainSpec").unwrap(), b"[]".to_vec());
    }

    #[test]
    fn test_directory_resolver_missing_file() {
        let tmp = TempDir::new().unwrap();
        let resolver = DirectoryResolver::new(tmp.path());
        let err = resolver.resolve("Missing").unwrap_err();
        match err {
            ResolveError::NotFound { name, path } => {
                assert_eq!(name, "Missing");
                assert_eq!(path, tmp.path().join("Missing.json"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_resolver_reports_io_errors() {
        let tmp = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as bytes.
        std::fs::create_dir(tmp.path().join("Dir.json")).unwrap();
        let resolver = DirectoryResolver::new(tmp.path());
        assert!(matches!(
            resolver.resolve("Dir").unwrap_err(),
            ResolveError::Io { .. }
        ));
    }

    #[test]
    fn test_embedded_resolver() {
        let mut resolver = EmbeddedResolver::new().with_document("A", "[]");
        resolver.insert("B", b"[1]".to_vec());

        assert!(resolver.contains("A"));
        assert_eq!(resolver.resolve("B").unwrap(), b"[1]".to_vec());
        assert!(matches!(
            resolver.resolve("C").unwrap_err(),
            ResolveError::NotEmbedded(name) if name == "C"
        ));
    }
}
