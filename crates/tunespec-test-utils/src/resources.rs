//! Temporary resource directories holding spec documents.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tunespec_core::DirectoryResolver;

/// A temp directory laid out like a spec resource bundle.
///
/// The directory is deleted when this value is dropped, even on panic.
pub struct TestResources {
    dir: TempDir,
}

impl TestResources {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Write `<name>.json` with the given document.
    pub fn write_spec(&self, name: &str, document: &str) -> PathBuf {
        let path = self.dir.path().join(format!("{name}.json"));
        std::fs::write(&path, document).expect("failed to write spec document");
        path
    }

    /// Write a `tunespec.toml` pointing its resource and export dirs here.
    pub fn write_config(&self, extra_toml: &str) -> PathBuf {
        let dir = self.dir.path().display();
        let path = self.dir.path().join("tunespec.toml");
        let content = format!(
            "[resources]\ndir = \"{dir}\"\n\n[export]\ndir = \"{dir}\"\n\n{extra_toml}"
        );
        std::fs::write(&path, content).expect("failed to write test config");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn resolver(&self) -> DirectoryResolver {
        DirectoryResolver::new(self.dir.path())
    }
}

impl Default for TestResources {
    fn default() -> Self {
        Self::new()
    }
}
