//! Handler registry for node-kind dispatch
//!
//! This module maps each [`NodeKind`] to the pair of callbacks that render it.
//! Handlers can be registered and retrieved by kind; kinds without an entry fall
//! back to the translator's skip-and-report policy.

use std::collections::HashMap;
use std::fmt;

use crate::common::traversal::{NodeRef, Visit};
use crate::error::RenderError;
use crate::formats::markdown::{handlers, Translator};
use crate::ir::NodeKind;

/// Called when the walk enters a node.
pub type EnterFn = fn(&mut Translator<'_>, &NodeRef<'_>) -> Result<Visit, RenderError>;

/// Called when the walk leaves a node.
pub type LeaveFn = fn(&mut Translator<'_>, &NodeRef<'_>) -> Result<(), RenderError>;

/// The enter/leave pair for one node kind.
#[derive(Clone, Copy)]
pub struct Handler {
    pub enter: EnterFn,
    pub leave: LeaveFn,
}

impl Handler {
    pub fn new(enter: EnterFn, leave: LeaveFn) -> Self {
        Handler { enter, leave }
    }

    /// A handler with nothing to do on leave.
    pub fn enter_only(enter: EnterFn) -> Self {
        Handler {
            enter,
            leave: leave_nothing,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

fn leave_nothing(_: &mut Translator<'_>, _: &NodeRef<'_>) -> Result<(), RenderError> {
    Ok(())
}

/// Registry of node handlers
///
/// # Examples
///
/// ```ignore
/// let mut registry = HandlerRegistry::with_defaults();
/// registry.register(NodeKind::from("sidebar"), Handler::new(open_sidebar, close_sidebar));
///
/// assert!(registry.has(&NodeKind::from("sidebar")));
/// ```
#[derive(Debug, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<NodeKind, Handler>,
}

impl HandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        HandlerRegistry {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler
    ///
    /// If the kind already has a handler, it will be replaced.
    pub fn register(&mut self, kind: NodeKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    /// Get the handler for a kind
    pub fn get(&self, kind: &NodeKind) -> Option<Handler> {
        self.handlers.get(kind).copied()
    }

    /// Check if a kind has a handler
    pub fn has(&self, kind: &NodeKind) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Remove the handler for a kind, so it falls back to the unknown-node policy
    pub fn unregister(&mut self, kind: &NodeKind) -> Option<Handler> {
        self.handlers.remove(kind)
    }

    /// List all handled kinds (sorted)
    pub fn list_kinds(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .handlers
            .keys()
            .map(|kind| kind.as_str().to_string())
            .collect();
        names.sort();
        names
    }

    /// Create a registry with every built-in handler
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        handlers::register_defaults(&mut registry);
        registry
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
