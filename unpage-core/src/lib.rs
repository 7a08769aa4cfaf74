//! Semantic export for paginated documents
//!
//!     A pagination engine cuts block content at page boundaries: a paragraph that does not
//!     fit becomes two or three elements on consecutive pages, each wrapped in sheets, page
//!     boxes and margin boxes. This crate recovers the logical document from that output and
//!     serializes it to markdown through pluggable rule packs.
//!
//!     This is a pure lib: it powers unpage-cli but never prints, reads files or looks at the
//!     environment. Everything that goes wrong without stopping the export comes back to the
//!     caller as a [`Warning`]; warnings are also sent to the `log` facade.
//!
//! Architecture
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ExportError and Warning
//!     ├── context.rs              # Per-operation warning collection
//!     ├── dom                     # Arena tree, HTML in/out, positions, selectors
//!     ├── common                  # Pipeline stages
//!     │   ├── cleanup.rs          # Scaffold removal, content lifting
//!     │   ├── fragments.rs        # Fragment collection
//!     │   ├── reconstruct.rs      # Fragment merge
//!     │   └── extract.rs          # Page range extraction
//!     ├── rules                   # Filters, rule sets, escaping, the serializer
//!     ├── pack.rs                 # RulePack trait
//!     ├── registry.rs             # PackRegistry
//!     ├── packs                   # Built-in packs
//!     ├── export.rs               # Exporter, triggers, payloads, sinks
//!     ├── reflow.rs               # Unified view and deferred reflow
//!     └── lib.rs
//!
//! Core Algorithms
//!
//!     Reconstruction: every element carrying a reference id (`data-ref`) is grouped with the
//!     others sharing it, in document order. Each group of two or more is merged: the children
//!     of all members, in order, move under the first member, which drops its split markers;
//!     the other members are detached. Order comes from tree positions only.
//!
//!     Serialization: children first, then the last-registered rule whose filter matches the
//!     element renders it from the children's text. Text is escaped unless an opaque element
//!     encloses it. See rules/engine.rs.
//!
//! Testing
//!     tests
//!     ├── common                  # Fixture loading, shared builders
//!     ├── export                  # Pipeline scenarios and properties
//!     ├── packs                   # One file per rule pack
//!     └── fixtures                # Rendered HTML samples
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are
//!     included from tests/lib.rs.

pub mod common;
pub mod context;
pub mod dom;
pub mod error;
pub mod export;
pub mod pack;
pub mod packs;
pub mod reflow;
pub mod registry;
pub mod rules;

pub use common::{Cleanup, FragmentGroup, FragmentMarkers, PageLayout, PageSelection, PageSpan};
pub use context::ExportContext;
pub use dom::{parse_html, Document, NodeId};
pub use error::{ExportError, Warning};
pub use export::{ExportOutput, Exporter, Payload, Sink, Trigger, MARKDOWN_MIME};
pub use pack::RulePack;
pub use reflow::{edit_unified, unified_view, ReflowScheduler};
pub use registry::{PackRegistry, DEFAULT_PACK_ORDER};
pub use rules::{default_escapes, EscapeTable, Filter, Rule, RuleSet, Serializer};
