//! Shared configuration loader for the unpage toolchain.
//!
//! `defaults/unpage.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`UnpageConfig`],
//! then turn it into a ready [`Exporter`] with [`UnpageConfig::exporter`].
//!
//! The rule table built from a configuration is fixed once the exporter exists.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use unpage_core::common::compile_selectors;
use unpage_core::{
    default_escapes, Cleanup, EscapeTable, ExportError, Exporter, Filter, FragmentMarkers,
    PackRegistry, PageLayout, ReflowScheduler, Serializer, Warning,
};

const DEFAULT_TOML: &str = include_str!("../defaults/unpage.default.toml");

/// Top-level configuration consumed by unpage applications.
#[derive(Debug, Clone, Deserialize)]
pub struct UnpageConfig {
    pub markers: MarkersConfig,
    pub pages: PagesConfig,
    pub cleanup: CleanupConfig,
    pub rules: RulesConfig,
    pub reflow: ReflowConfig,
}

/// How fragments of one element are recognised.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkersConfig {
    pub reference: String,
    pub split_prefix: String,
}

impl From<&MarkersConfig> for FragmentMarkers {
    fn from(config: &MarkersConfig) -> Self {
        FragmentMarkers::new(config.reference.as_str(), config.split_prefix.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesConfig {
    pub page: String,
    pub content: String,
    pub number_attr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    pub root_tag: String,
    pub scaffold: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    pub packs: Vec<String>,
    pub default_escapes: bool,
    pub escapes: Vec<EscapeConfig>,
    pub opaque: Vec<String>,
}

/// One escape substitution: a regex and its replacement.
#[derive(Debug, Clone, Deserialize)]
pub struct EscapeConfig {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReflowConfig {
    pub delay_ms: u64,
}

impl UnpageConfig {
    /// Page layout and cleanup stages. Malformed selectors are left out and reported.
    pub fn layout(&self) -> (PageLayout, Cleanup, Vec<Warning>) {
        let (layout, mut warnings) = PageLayout::from_selectors(
            &self.pages.page,
            &self.pages.content,
            &self.pages.number_attr,
        );
        let (cleanup, cleanup_warnings) =
            Cleanup::from_selectors(&self.pages.content, self.cleanup.scaffold.as_slice());
        warnings.extend(cleanup_warnings);
        (
            layout,
            cleanup.with_root_tag(self.cleanup.root_tag.as_str()),
            warnings,
        )
    }

    /// The escape table: the built-in one (if enabled) followed by the configured entries.
    pub fn escapes(&self) -> (EscapeTable, Vec<Warning>) {
        let mut table = if self.rules.default_escapes {
            default_escapes()
        } else {
            EscapeTable::empty()
        };
        let mut warnings = Vec::new();
        for escape in &self.rules.escapes {
            if let Err(err) = table.push(&escape.pattern, escape.replacement.as_str()) {
                warnings.push(Warning::malformed_selector(
                    escape.pattern.as_str(),
                    err.to_string(),
                ));
            }
        }
        (table, warnings)
    }

    /// Build an exporter from the packs found in `registry`.
    ///
    /// An unknown pack name is an error. Malformed selectors and escape patterns are not:
    /// they are skipped and returned as warnings.
    pub fn exporter(
        &self,
        registry: &PackRegistry,
    ) -> Result<(Exporter, Vec<Warning>), ExportError> {
        let (layout, cleanup, mut warnings) = self.layout();
        let (escapes, escape_warnings) = self.escapes();
        warnings.extend(escape_warnings);

        let mut rules = registry.build_rule_set(self.rules.packs.as_slice(), escapes)?;
        let (opaque, opaque_warnings) = compile_selectors(self.rules.opaque.as_slice());
        warnings.extend(opaque_warnings);
        for selector in opaque {
            rules.protect(Filter::Selector(selector));
        }

        let exporter = Exporter::new(
            cleanup,
            FragmentMarkers::from(&self.markers),
            layout,
            Serializer::new(rules),
        );
        Ok((exporter, warnings))
    }

    pub fn scheduler(&self) -> ReflowScheduler {
        ReflowScheduler::new(Duration::from_millis(self.reflow.delay_ms))
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<UnpageConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<UnpageConfig, ConfigError> {
    Loader::new().build()
}
