//! Tree transformations shared by every export path
//!
//!     Both the whole-document and the page-range export run the same stages over a working
//!     copy of the rendered tree:
//!
//!         extract (range only) → cleanup → collect fragments → reconstruct → serialize
//!
//!     Each stage lives in its own module and mutates the working copy in place. None of them
//!     touch the caller's tree: the export entry points clone before the first stage.

pub mod cleanup;
pub mod extract;
pub mod fragments;
pub mod reconstruct;

use crate::dom::Selector;
use crate::error::Warning;

pub use cleanup::Cleanup;
pub use extract::{PageLayout, PageSelection, PageSpan};
pub use fragments::{FragmentGroup, FragmentMarkers};

/// Parse a list of selectors, keeping the valid ones.
///
/// Each malformed entry becomes a warning and is left out.
pub fn compile_selectors<S: AsRef<str>>(sources: &[S]) -> (Vec<Selector>, Vec<Warning>) {
    let mut selectors = Vec::new();
    let mut warnings = Vec::new();
    for source in sources {
        match Selector::parse(source.as_ref()) {
            Ok(selector) => selectors.push(selector),
            Err(err) => warnings.push(Warning::malformed_selector(err.selector, err.reason)),
        }
    }
    (selectors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_selectors_skips_malformed() {
        let (selectors, warnings) = compile_selectors(&[".pagedjs_bleed", "div >", ".pagedjs_sheet"]);
        assert_eq!(selectors.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            Warning::MalformedSelector { selector, .. } if selector == "div >"
        ));
    }
}
