//! Unified editing view and deferred reflow
//!
//! An element split across pages is edited as one: [`unified_view`] merges its fragments in
//! a copy of the tree and returns the merged element as its own document. After the caller
//! edits that view, the layout engine must lay the document out again. That reflow is
//! scheduled as a one-shot task after a short delay, so the engine can settle first.
//!
//! The scheduled task is fire-and-forget: no handle, no result, no retry, no cancellation.
//! Nothing on the export path waits for it.

use crate::common::fragments::{collect, FragmentMarkers};
use crate::common::reconstruct::merge_group;
use crate::context::ExportContext;
use crate::dom::Document;
use crate::error::Warning;
use std::thread;
use std::time::Duration;

pub const DEFAULT_REFLOW_DELAY: Duration = Duration::from_millis(50);

/// The fragments of `reference` merged into one element, as a standalone document.
///
/// Returns `None` when no element carries the reference id.
pub fn unified_view(
    doc: &Document,
    reference: &str,
    markers: &FragmentMarkers,
) -> (Option<Document>, Vec<Warning>) {
    let mut ctx = ExportContext::new();
    let mut working = doc.clone();
    let root = working.root();
    let group = collect(&working, root, markers)
        .into_iter()
        .find(|group| group.reference == reference);

    let Some(group) = group else {
        ctx.warn(Warning::missing_target("fragment group", reference));
        return (None, ctx.into_warnings());
    };

    let element = if group.is_fragmented() {
        merge_group(&mut working, &group, markers, &mut ctx)
    } else {
        group.members.first().copied()
    };
    let view = element.map(|id| working.clone_subtree(id));
    (view, ctx.into_warnings())
}

/// Runs reflow callbacks after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflowScheduler {
    delay: Duration,
}

impl ReflowScheduler {
    pub fn new(delay: Duration) -> Self {
        ReflowScheduler { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `trigger` once, `delay` from now, on its own thread. Returns immediately.
    pub fn schedule<F>(&self, trigger: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        log::debug!("reflow scheduled in {delay:?}");
        thread::spawn(move || {
            thread::sleep(delay);
            trigger();
        });
    }
}

impl Default for ReflowScheduler {
    fn default() -> Self {
        ReflowScheduler::new(DEFAULT_REFLOW_DELAY)
    }
}

/// Apply an edit to a unified view, then schedule the reflow.
pub fn edit_unified<E, F>(view: &mut Document, edit: E, scheduler: &ReflowScheduler, trigger: F)
where
    E: FnOnce(&mut Document),
    F: FnOnce() + Send + 'static,
{
    edit(view);
    scheduler.schedule(trigger);
}
