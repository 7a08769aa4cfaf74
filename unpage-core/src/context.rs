//! Per-operation state threaded through the pipeline.

use crate::error::Warning;

/// Collects the warnings of one export or edit operation.
///
/// Each call creates its own context and drops it at the end, so nothing leaks from one
/// export into the next. Every warning is logged as it is recorded and handed back to the
/// caller with the output.
#[derive(Debug, Default)]
pub struct ExportContext {
    warnings: Vec<Warning>,
}

impl ExportContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn extend(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        for warning in warnings {
            self.warn(warning);
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
