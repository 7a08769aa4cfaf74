//! Export pipeline
//!
//!     Every export works on a deep copy of the caller's tree and runs the same stages:
//!
//!         whole document:  clone → cleanup → reconstruct → serialize
//!         page range:      extract (copies) → cleanup → reconstruct → serialize
//!
//!     The [`Exporter`] bundles the stage configuration and is fixed once built. Each call
//!     creates its own [`ExportContext`], so calls are independent and can run concurrently
//!     from several threads.
//!
//!     Triggers from the outside ("export whole document", "export page range") are mapped
//!     to one [`Payload`] handed to a [`Sink`]. A range that selects nothing produces no
//!     payload, and the sink is not called.

use crate::common::reconstruct::reconstruct_all;
use crate::common::{Cleanup, FragmentMarkers, PageLayout, PageSelection};
use crate::context::ExportContext;
use crate::dom::{parse_html, Document};
use crate::error::{ExportError, Warning};
use crate::registry::{PackRegistry, DEFAULT_PACK_ORDER};
use crate::rules::{default_escapes, EscapeTable, Serializer};
use serde::Serialize;
use std::convert::Infallible;

pub const MARKDOWN_MIME: &str = "text/markdown";

/// Serialized text of one export plus everything that was skipped on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportOutput {
    pub text: String,
    pub warnings: Vec<Warning>,
}

/// A request coming from the authoring surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    ExportDocument { filename: String },
    ExportRange { filename: String, selection: PageSelection },
}

impl Trigger {
    pub fn filename(&self) -> &str {
        match self {
            Trigger::ExportDocument { filename } | Trigger::ExportRange { filename, .. } => filename,
        }
    }
}

/// Content ready to be saved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub content: String,
    pub filename: String,
    pub mime: String,
}

/// Where payloads go: a file writer, a download prompt, a test buffer.
pub trait Sink {
    type Error;

    fn emit(&mut self, payload: Payload) -> Result<(), Self::Error>;
}

impl Sink for Vec<Payload> {
    type Error = Infallible;

    fn emit(&mut self, payload: Payload) -> Result<(), Self::Error> {
        self.push(payload);
        Ok(())
    }
}

/// The export stages, configured once.
#[derive(Debug, Clone)]
pub struct Exporter {
    cleanup: Cleanup,
    markers: FragmentMarkers,
    layout: PageLayout,
    serializer: Serializer,
}

impl Exporter {
    pub fn new(
        cleanup: Cleanup,
        markers: FragmentMarkers,
        layout: PageLayout,
        serializer: Serializer,
    ) -> Self {
        Exporter {
            cleanup,
            markers,
            layout,
            serializer,
        }
    }

    /// Default conventions with the named packs, in order, and the given escape table.
    pub fn with_packs<S: AsRef<str>>(
        registry: &PackRegistry,
        order: &[S],
        escapes: EscapeTable,
    ) -> Result<Self, ExportError> {
        let rules = registry.build_rule_set(order, escapes)?;
        Ok(Exporter::new(
            Cleanup::default(),
            FragmentMarkers::default(),
            PageLayout::default(),
            Serializer::new(rules),
        ))
    }

    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn markers(&self) -> &FragmentMarkers {
        &self.markers
    }

    /// Cleanup and fragment merge over a working copy the caller already owns.
    fn prepare(&self, working: &mut Document, ctx: &mut ExportContext) {
        self.cleanup.apply(working);
        let merged = reconstruct_all(working, &self.markers, ctx);
        log::debug!("export: reconstructed {merged} fragment groups");
    }

    /// Serialize the whole document, recording warnings in `ctx`.
    pub fn render_document(&self, doc: &Document, ctx: &mut ExportContext) -> String {
        let mut working = doc.clone();
        self.prepare(&mut working, ctx);
        self.serializer.serialize_document(&working, ctx)
    }

    /// Serialize the selected pages, or `None` when the selection matches nothing.
    pub fn render_range(
        &self,
        doc: &Document,
        selection: &PageSelection,
        ctx: &mut ExportContext,
    ) -> Option<String> {
        let mut working = self.layout.extract(doc, selection, ctx)?;
        self.prepare(&mut working, ctx);
        Some(self.serializer.serialize_document(&working, ctx))
    }

    pub fn export_document(&self, doc: &Document) -> ExportOutput {
        let mut ctx = ExportContext::new();
        let text = self.render_document(doc, &mut ctx);
        ExportOutput {
            text,
            warnings: ctx.into_warnings(),
        }
    }

    /// Export the selected pages. `None` means nothing was selected; the reason has been
    /// logged and no file should be produced.
    pub fn export_range(&self, doc: &Document, selection: &PageSelection) -> Option<ExportOutput> {
        let mut ctx = ExportContext::new();
        let text = self.render_range(doc, selection, &mut ctx)?;
        Some(ExportOutput {
            text,
            warnings: ctx.into_warnings(),
        })
    }

    /// Parse rendered HTML and export all of it.
    pub fn export_html(&self, source: &str) -> Result<ExportOutput, ExportError> {
        let doc = parse_html(source)?;
        Ok(self.export_document(&doc))
    }

    /// The cleaned and merged tree, before serialization.
    pub fn reconstruct(&self, doc: &Document) -> (Document, Vec<Warning>) {
        let mut ctx = ExportContext::new();
        let mut working = doc.clone();
        self.prepare(&mut working, &mut ctx);
        (working, ctx.into_warnings())
    }

    /// Run a trigger and build its payload.
    pub fn handle(&self, doc: &Document, trigger: &Trigger) -> (Option<Payload>, Vec<Warning>) {
        let mut ctx = ExportContext::new();
        let content = match trigger {
            Trigger::ExportDocument { .. } => Some(self.render_document(doc, &mut ctx)),
            Trigger::ExportRange { selection, .. } => self.render_range(doc, selection, &mut ctx),
        };
        let payload = content.map(|content| Payload {
            content,
            filename: trigger.filename().to_string(),
            mime: MARKDOWN_MIME.to_string(),
        });
        (payload, ctx.into_warnings())
    }

    /// Run a trigger and hand the payload, if any, to the sink.
    pub fn deliver<S: Sink>(
        &self,
        doc: &Document,
        trigger: &Trigger,
        sink: &mut S,
    ) -> Result<Vec<Warning>, S::Error> {
        let (payload, warnings) = self.handle(doc, trigger);
        if let Some(payload) = payload {
            sink.emit(payload)?;
        }
        Ok(warnings)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        let registry = PackRegistry::with_defaults();
        let rules = registry
            .build_rule_set(DEFAULT_PACK_ORDER, default_escapes())
            .unwrap_or_else(|_| crate::rules::RuleSet::new(default_escapes()));
        Exporter::new(
            Cleanup::default(),
            FragmentMarkers::default(),
            PageLayout::default(),
            Serializer::new(rules),
        )
    }
}
