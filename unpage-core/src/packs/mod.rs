//! Built-in rule packs
//!
//! Each pack covers one concern and can be installed on its own. The default order puts the
//! generic markdown rules first so every later pack can override them:
//!
//!     commonmark → typography → annotations → columns → shortcodes → breaks → footnotes

pub mod annotations;
pub mod breaks;
pub mod columns;
pub mod commonmark;
pub mod footnotes;
pub mod shortcodes;
pub mod typography;

pub use annotations::AnnotationsPack;
pub use breaks::BreaksPack;
pub use columns::ColumnsPack;
pub use commonmark::CommonMarkPack;
pub use footnotes::FootnotesPack;
pub use shortcodes::ShortcodesPack;
pub use typography::TypographyPack;

/// Surround a block with blank lines.
pub(crate) fn block(content: &str) -> String {
    format!("\n\n{content}\n\n")
}

/// Wrap inline content in delimiters, keeping edge whitespace outside of them.
///
/// `"  word "` wrapped in `**` gives `"  **word** "`; empty content gives nothing.
pub(crate) fn wrap_inline(content: &str, open: &str, close: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return content.to_string();
    }
    let leading = &content[..content.len() - content.trim_start().len()];
    let trailing = &content[content.trim_end().len()..];
    format!("{leading}{open}{trimmed}{close}{trailing}")
}

/// Collapse every whitespace run to one space and trim the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Quote a value for a `key="value"` attribute in shortcode or tag output.
pub(crate) fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_inline_moves_whitespace_out() {
        assert_eq!(wrap_inline(" word  ", "**", "**"), " **word**  ");
        assert_eq!(wrap_inline("word", "==", "=="), "==word==");
        assert_eq!(wrap_inline("   ", "*", "*"), "   ");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\n b\tc "), "a b c");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
    }
}
