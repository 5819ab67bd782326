//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values without
//! repeating boilerplate across crate boundaries.

use std::path::Path;

use tunespec_config::AppConfig;

/// Fluent builder for [`AppConfig`] in tests.
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .resources_dir(resources.path())
///     .steps(20, 4)
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn resources_dir(mut self, dir: &Path) -> Self {
        self.config.resources.dir = dir.to_path_buf();
        self
    }

    pub fn export_dir(mut self, dir: &Path) -> Self {
        self.config.export.dir = dir.to_path_buf();
        self
    }

    pub fn pretty_export(mut self, pretty: bool) -> Self {
        self.config.export.pretty = pretty;
        self
    }

    pub fn controls_visible(mut self, visible: bool) -> Self {
        self.config.controls.visible_on_start = visible;
        self
    }

    /// Fine and coarse slider step counts.
    pub fn steps(mut self, fine: u32, coarse: u32) -> Self {
        self.config.controls.fine_steps = fine;
        self.config.controls.coarse_steps = coarse;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
