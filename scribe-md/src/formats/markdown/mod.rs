//! Markdown rendering of document trees
//!
//! This module turns a finished document tree into Markdown-flavored text.
//!
//! # Element Mapping Table
//!
//! | Node kind                    | Markdown output                   | Notes                                      |
//! |------------------------------|-----------------------------------|--------------------------------------------|
//! | section / title              | `#`-prefixed heading              | One marker per enclosing section           |
//! | title (non-section parent)   | Plain line                        | Inside admonitions: inline `Title: `       |
//! | paragraph                    | Paragraph + blank line            |                                            |
//! | literal-block                | Fenced code (```` ``` ````)       | `language` attribute → info string         |
//! | bullet-list / list-item      | `*   item`                        | Body indented 4                            |
//! | enumerated-list / list-item  | `N.  item`                        | Numbering from `start`, body indented N+4  |
//! | definition-list              | `**term**` + indented definition  | Items open no frame                        |
//! | field-list                   | `**name**:` + indented body       |                                            |
//! | description-signature        | Heading one level below section   | `class ` / `exception ` word by `objtype`  |
//! | description-name             | `` **`name`** ``                  |                                            |
//! | description-addname          | `` `prefix` ``                    |                                            |
//! | description-parameter-list   | `` (_`a, b`_) ``                  | Flattened, children not walked             |
//! | emphasis / literal-emphasis  | `_text_`                          |                                            |
//! | strong / literal-strong      | `**text**`                        |                                            |
//! | literal / reference          | `` `text` ``                      | References are already display text        |
//! | admonitions                  | `Label: text`                     | Paragraphs merged, except in `seealso`     |
//! | index / target / comment     | Nothing                           | Silently dropped                           |
//! | anything else                | Nothing                           | Reported to the diagnostic sink            |
//!
//! # Lossy Conversions
//!
//! - Unknown node kinds are dropped together with their whole subtree.
//! - Parameter lists lose per-parameter markup; only their flattened text is kept.
//! - Admonition paragraphs are merged into one block.
//!
//! # Architecture Notes
//!
//! The [`Translator`] is driven by [`walk`] and dispatches every node through a
//! [`HandlerRegistry`]. Output is assembled on the frame stack (`common::frames`), which is
//! what lets a handler decide a list marker or heading prefix only after the block's content
//! has been collected.

pub(crate) mod handlers;
pub mod translator;

pub use translator::{ListCounter, Translator};

use crate::common::traversal::walk;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::RenderError;
use crate::ir::Node;
use crate::options::RenderOptions;
use crate::registry::HandlerRegistry;

/// Renders document trees to Markdown with a fixed set of options.
///
/// The writer holds no per-pass state, so one writer can serve any number of passes,
/// including concurrent ones from different threads.
#[derive(Debug, Clone, Default)]
pub struct MarkdownWriter {
    options: RenderOptions,
    registry: HandlerRegistry,
}

impl MarkdownWriter {
    pub fn new(options: RenderOptions) -> Self {
        Self::with_registry(options, HandlerRegistry::with_defaults())
    }

    pub fn with_registry(options: RenderOptions, registry: HandlerRegistry) -> Self {
        MarkdownWriter { options, registry }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    /// Render `document`, logging skipped nodes through `tracing`.
    pub fn translate(&self, document: &Node) -> Result<String, RenderError> {
        let mut sink = TracingSink;
        self.translate_with_sink(document, &mut sink)
    }

    /// Render `document`, reporting skipped nodes to `sink`.
    pub fn translate_with_sink(
        &self,
        document: &Node,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<String, RenderError> {
        tracing::debug!(kind = %document.kind, nodes = document.size(), "render pass started");
        let mut translator = Translator::new(&self.options, &self.registry, sink);
        walk(document, &mut translator)?;
        let output = translator.finish()?;
        tracing::debug!(bytes = output.len(), "render pass finished");
        Ok(output)
    }
}
