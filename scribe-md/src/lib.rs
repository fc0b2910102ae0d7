//! Markdown rendering for finished document trees
//!
//!     This crate turns a fully-resolved, in-memory document tree (sections, titles, paragraphs,
//!     lists, code blocks, API signatures, inline spans) into Markdown-flavored text.
//!
//!     TLDR:
//!         - Input is a [`Node`] tree, usually deserialized from JSON with serde.
//!         - One render pass walks the tree once, depth-first, and returns the whole text.
//!         - Unknown node kinds are dropped with their subtree and reported, never fatal.
//!         - Structural contract violations abort the pass with a [`RenderError`].
//!
//! Architecture
//!
//!     This is a pure lib: it powers the scribe cli but is shell agnostic, so no code here
//!     prints, reads env vars or touches files, with the single exception of ./publish.rs.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # RenderError, PublishError
//!     ├── diagnostics.rs          # Sink for skipped nodes
//!     ├── options.rs              # RenderOptions (line terminator, heading marker, labels)
//!     ├── registry.rs             # NodeKind -> Handler dispatch table
//!     ├── publish.rs              # Render and write to memory, a file or an outdir
//!     ├── ir                      # The document tree (Node, NodeKind, AttrValue)
//!     ├── common
//!     │   ├── traversal.rs        # Depth-first walk with enter/leave and skip control
//!     │   └── frames.rs           # The frame stack
//!     └── formats
//!         └── markdown
//!             ├── translator.rs   # Per-pass state, dispatch through the registry
//!             └── handlers.rs     # One enter/leave pair per node kind
//!
//! Core Algorithm
//!
//!     Output is not written as it is produced. Every structural node opens a frame on entry and
//!     closes it on exit; closing folds the frame into indented line groups and hands them to
//!     the parent. That is what allows a list marker or heading prefix to be attached to the
//!     first line of a block after the block is complete, and what makes nested blocks land at
//!     the sum of their ancestors' indents. See ./common/frames.rs for the details.
//!
//! Concurrency
//!
//!     A render pass owns all of its mutable state. The tree, options and registry are only
//!     borrowed, so independent passes can run on separate threads without coordination.

pub mod common;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod ir;
pub mod options;
pub mod publish;
pub mod registry;

pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
pub use error::{PublishError, RenderError};
pub use formats::markdown::MarkdownWriter;
pub use ir::{AttrValue, Node, NodeKind};
pub use options::{LineTerminator, RenderOptions};
pub use registry::{Handler, HandlerRegistry};

/// Renders a document tree with the default handlers.
///
/// Shorthand for `MarkdownWriter::new(options.clone()).translate(document)`.
pub fn render(document: &Node, options: &RenderOptions) -> Result<String, RenderError> {
    MarkdownWriter::new(options.clone()).translate(document)
}
