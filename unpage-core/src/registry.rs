//! Rule pack registry
//!
//! This module provides a centralized registry for all available rule packs.
//! Packs are registered by name and assembled into a [`RuleSet`] in a chosen order.

use crate::error::ExportError;
use crate::pack::RulePack;
use crate::rules::{EscapeTable, RuleSet};
use std::collections::HashMap;

/// Pack order used when the configuration does not name one.
pub const DEFAULT_PACK_ORDER: &[&str] = &[
    "commonmark",
    "typography",
    "annotations",
    "columns",
    "shortcodes",
    "breaks",
    "footnotes",
];

/// Registry of rule packs
///
/// # Examples
///
/// ```ignore
/// let registry = PackRegistry::default();
/// let rules = registry.build_rule_set(&["commonmark", "breaks"], default_escapes())?;
/// let serializer = Serializer::new(rules);
/// ```
pub struct PackRegistry {
    packs: HashMap<String, Box<dyn RulePack>>,
}

impl PackRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        PackRegistry {
            packs: HashMap::new(),
        }
    }

    /// Register a pack
    ///
    /// If a pack with the same name already exists, it will be replaced.
    pub fn register<P: RulePack + 'static>(&mut self, pack: P) {
        self.packs.insert(pack.name().to_string(), Box::new(pack));
    }

    /// Get a pack by name
    pub fn get(&self, name: &str) -> Result<&dyn RulePack, ExportError> {
        self.packs
            .get(name)
            .map(|p| p.as_ref())
            .ok_or_else(|| ExportError::PackNotFound(name.to_string()))
    }

    /// Check if a pack exists
    pub fn has(&self, name: &str) -> bool {
        self.packs.contains_key(name)
    }

    /// List all available pack names (sorted)
    pub fn list_packs(&self) -> Vec<String> {
        let mut names: Vec<_> = self.packs.keys().cloned().collect();
        names.sort();
        names
    }

    /// Install the named packs, in order, into a new rule set.
    ///
    /// Unknown names are an error: the rule table is fixed at startup, so a typo in the
    /// configuration should stop the program rather than silently drop a pack.
    pub fn build_rule_set<S: AsRef<str>>(
        &self,
        order: &[S],
        escapes: EscapeTable,
    ) -> Result<RuleSet, ExportError> {
        let mut rules = RuleSet::new(escapes);
        for name in order {
            let pack = self.get(name.as_ref())?;
            pack.install(&mut rules);
            log::debug!("installed rule pack '{}'", pack.name());
        }
        Ok(rules)
    }

    /// Create a registry with the built-in packs
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::packs::CommonMarkPack);
        registry.register(crate::packs::TypographyPack);
        registry.register(crate::packs::AnnotationsPack);
        registry.register(crate::packs::ColumnsPack);
        registry.register(crate::packs::ShortcodesPack);
        registry.register(crate::packs::BreaksPack);
        registry.register(crate::packs::FootnotesPack);

        registry
    }
}

impl Default for PackRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
