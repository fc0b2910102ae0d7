//! Render-pass state and node dispatch.
//!
//! A [`Translator`] owns everything that changes during one pass: the frame stack, the
//! section level and the list counters. Nothing here is shared between passes; the tree and
//! the options are only borrowed.

use crate::common::frames::{CloseOptions, FrameStack, FrameStats};
use crate::common::traversal::{NodeRef, Visit, Visitor};
use crate::diagnostics::DiagnosticSink;
use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::registry::HandlerRegistry;

/// Kind of the innermost active list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCounter {
    Bullet,
    Definition,
    /// Number of the current item; starts one below the list's first number.
    Enumerated(usize),
}

pub struct Translator<'a> {
    options: &'a RenderOptions,
    registry: &'a HandlerRegistry,
    sink: &'a mut dyn DiagnosticSink,
    frames: FrameStack,
    section_level: usize,
    list_counters: Vec<ListCounter>,
}

impl<'a> Translator<'a> {
    pub fn new(
        options: &'a RenderOptions,
        registry: &'a HandlerRegistry,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Translator {
            options,
            registry,
            sink,
            frames: FrameStack::new(),
            section_level: 1,
            list_counters: Vec::new(),
        }
    }

    pub fn options(&self) -> &'a RenderOptions {
        self.options
    }

    pub fn open_frame(&mut self, indent: usize) {
        self.frames.open(indent);
    }

    pub fn emit(&mut self, text: impl Into<String>) {
        self.frames.emit(text);
    }

    pub fn close_frame(
        &mut self,
        node: &NodeRef<'_>,
        options: CloseOptions<'_>,
    ) -> Result<(), RenderError> {
        self.frames
            .close(options)
            .map_err(|err| RenderError::structure(node, err.to_string()))
    }

    /// Frames currently on the stack, root included.
    pub fn frame_depth(&self) -> usize {
        self.frames.depth()
    }

    pub fn frame_stats(&self) -> FrameStats {
        self.frames.stats()
    }

    /// Starts at 1 and counts one more for every open section.
    pub fn section_level(&self) -> usize {
        self.section_level
    }

    /// Number of sections currently open.
    pub fn section_depth(&self) -> usize {
        self.section_level - 1
    }

    pub fn enter_section(&mut self) {
        self.section_level += 1;
    }

    pub fn leave_section(&mut self, node: &NodeRef<'_>) -> Result<(), RenderError> {
        if self.section_level <= 1 {
            return Err(RenderError::structure(node, "section level underflow"));
        }
        self.section_level -= 1;
        Ok(())
    }

    pub fn push_list(&mut self, counter: ListCounter) {
        self.list_counters.push(counter);
    }

    pub fn pop_list(&mut self, node: &NodeRef<'_>) -> Result<ListCounter, RenderError> {
        self.list_counters
            .pop()
            .ok_or_else(|| RenderError::structure(node, "list closed without being opened"))
    }

    pub fn current_list(&self) -> Option<ListCounter> {
        self.list_counters.last().copied()
    }

    pub fn current_list_mut(&mut self) -> Option<&mut ListCounter> {
        self.list_counters.last_mut()
    }

    /// Fold the root frame into the finished text.
    ///
    /// Fails if any section, list or frame is still open.
    pub fn finish(self) -> Result<String, RenderError> {
        if self.section_level != 1 {
            return Err(RenderError::Unbalanced(format!(
                "section level is {} at end of pass",
                self.section_level
            )));
        }
        if !self.list_counters.is_empty() {
            return Err(RenderError::Unbalanced(format!(
                "{} list(s) still open at end of pass",
                self.list_counters.len()
            )));
        }
        let terminator = self.options.line_terminator.as_str();
        self.frames
            .finish(terminator)
            .map_err(|err| RenderError::Unbalanced(err.to_string()))
    }

    fn skip_unknown(&mut self, node: &NodeRef<'_>) -> Visit {
        self.sink.unknown_node(node.kind().as_str(), node.depth);
        Visit::SkipNode
    }
}

impl Visitor for Translator<'_> {
    type Error = RenderError;

    fn enter(&mut self, node: &NodeRef<'_>) -> Result<Visit, RenderError> {
        match self.registry.get(node.kind()) {
            Some(handler) => (handler.enter)(self, node),
            None => Ok(self.skip_unknown(node)),
        }
    }

    fn leave(&mut self, node: &NodeRef<'_>) -> Result<(), RenderError> {
        match self.registry.get(node.kind()) {
            Some(handler) => (handler.leave)(self, node),
            None => Ok(()),
        }
    }
}
