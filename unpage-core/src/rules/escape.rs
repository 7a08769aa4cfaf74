//! Escaping of literal text
//!
//! Text that reaches the output outside any opaque element must not be re-read as markup.
//! The table is an ordered list of regex substitutions applied one after the other, so a
//! rule can rely on what earlier rules did. Backslashes come first: every later rule
//! introduces a backslash, and those must not be doubled.
//!
//! Patterns anchored with `^` apply at the start of a text node, where a line can start.
//! Besides markdown itself, the table covers what the packs write: shortcode and break
//! openers (`{%`), annotation sigils (`==`, `++`, `~~`) and entity references.

use crate::error::Warning;
use regex::Regex;

/// Substitutions applied to text outside opaque elements.
pub const DEFAULT_ESCAPES: &[(&str, &str)] = &[
    (r"\\", r"\\"),
    (r"\*", r"\*"),
    (r"&", r"\&"),
    (r"\{%", r"{\%"),
    (r"==", r"=\="),
    (r"\+\+", r"+\+"),
    (r"~", r"\~"),
    (r"^-", r"\-"),
    (r"^\+ ", r"\+ "),
    (r"^(=+)", r"\${1}"),
    (r"^(#{1,6}) ", r"\${1} "),
    (r"`", r"\`"),
    (r"\[", r"\["),
    (r"\]", r"\]"),
    (r"^>", r"\>"),
    (r"<", r"\<"),
    (r"_", r"\_"),
    (r"^(\d+)\. ", r"${1}\. "),
];

#[derive(Debug, Clone)]
struct Escape {
    pattern: Regex,
    replacement: String,
}

#[derive(Debug, Clone, Default)]
pub struct EscapeTable {
    escapes: Vec<Escape>,
}

impl EscapeTable {
    /// A table that leaves text untouched.
    pub fn empty() -> Self {
        EscapeTable::default()
    }

    /// Build a table from `(pattern, replacement)` pairs, in order.
    ///
    /// Patterns that fail to compile are left out and reported.
    pub fn from_pairs<P, R>(pairs: impl IntoIterator<Item = (P, R)>) -> (Self, Vec<Warning>)
    where
        P: AsRef<str>,
        R: Into<String>,
    {
        let mut table = EscapeTable::empty();
        let mut warnings = Vec::new();
        for (pattern, replacement) in pairs {
            if let Err(err) = table.push(pattern.as_ref(), replacement) {
                warnings.push(Warning::malformed_selector(pattern.as_ref(), err.to_string()));
            }
        }
        (table, warnings)
    }

    /// Append one substitution after the existing ones.
    pub fn push(&mut self, pattern: &str, replacement: impl Into<String>) -> Result<(), regex::Error> {
        self.escapes.push(Escape {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.escapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.escapes.is_empty()
    }

    pub fn escape(&self, text: &str) -> String {
        let mut out = text.to_string();
        for escape in &self.escapes {
            out = escape
                .pattern
                .replace_all(&out, escape.replacement.as_str())
                .into_owned();
        }
        out
    }
}

/// The markdown escape table.
pub fn default_escapes() -> EscapeTable {
    EscapeTable::from_pairs(DEFAULT_ESCAPES.iter().copied()).0
}
