//! Rule pack trait definition
//!
//! A rule pack is a composable set of serialization rules for one concern (footnotes,
//! breaks, typography, ...). Packs are installed into a [`RuleSet`] in a configured order;
//! since later rules win, a pack installed after another can override its output for the
//! elements both of them match.

use crate::rules::{Filter, Rule, RuleSet};

/// Trait for rule packs
///
/// # Examples
///
/// ```ignore
/// struct KbdPack;
///
/// impl RulePack for KbdPack {
///     fn name(&self) -> &str {
///         "kbd"
///     }
///
///     fn rules(&self) -> Vec<Rule> {
///         vec![Rule::new("kbd", Filter::tag("kbd"), |content, _, _| {
///             format!("<kbd>{content}</kbd>")
///         })]
///     }
///
///     fn opaque(&self) -> Vec<Filter> {
///         vec![Filter::tag("kbd")]
///     }
/// }
/// ```
pub trait RulePack: Send + Sync {
    /// The name of this pack (e.g., "footnotes", "breaks")
    fn name(&self) -> &str;

    /// Optional description of this pack
    fn description(&self) -> &str {
        ""
    }

    /// Rules in registration order: within a pack, later rules also win.
    fn rules(&self) -> Vec<Rule>;

    /// Elements this pack marks opaque.
    fn opaque(&self) -> Vec<Filter> {
        Vec::new()
    }

    /// Add this pack's rules and protections to a rule set.
    fn install(&self, rules: &mut RuleSet) {
        rules.add_rules(self.rules());
        for filter in self.opaque() {
            rules.protect(filter);
        }
    }
}
