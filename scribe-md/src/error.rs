//! Error types for rendering and publishing

use std::fmt;
use std::path::PathBuf;

use crate::common::traversal::NodeRef;

/// Errors that can occur during a render pass
///
/// A pass is all-or-nothing: when one of these is returned no partial output is exposed.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The tree breaks a structural contract the renderer relies on
    Structure { path: String, message: String },
    /// An attribute is present but unusable
    InvalidAttribute {
        path: String,
        name: String,
        message: String,
    },
    /// The pass ended with state left over (open frames, sections, lists)
    Unbalanced(String),
}

impl RenderError {
    pub fn structure(node: &NodeRef<'_>, message: impl Into<String>) -> Self {
        RenderError::Structure {
            path: node.path(),
            message: message.into(),
        }
    }

    pub fn invalid_attribute(
        node: &NodeRef<'_>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RenderError::InvalidAttribute {
            path: node.path(),
            name: name.into(),
            message: message.into(),
        }
    }

    /// Path of the offending node, when the error is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            RenderError::Structure { path, .. } | RenderError::InvalidAttribute { path, .. } => {
                Some(path)
            }
            RenderError::Unbalanced(_) => None,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Structure { path, message } => {
                write!(f, "Structure error at {path}: {message}")
            }
            RenderError::InvalidAttribute {
                path,
                name,
                message,
            } => write!(f, "Invalid attribute '{name}' at {path}: {message}"),
            RenderError::Unbalanced(msg) => write!(f, "Unbalanced render pass: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Errors raised while handing rendered text to its destination
#[derive(Debug)]
pub enum PublishError {
    /// Rendering failed before anything was written
    Render(RenderError),
    /// Writing the output failed
    Io { path: PathBuf, source: std::io::Error },
    /// The request cannot be satisfied as given
    InvalidSpec(String),
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Render(err) => write!(f, "{err}"),
            PublishError::Io { path, source } => {
                write!(f, "Error writing file '{}': {source}", path.display())
            }
            PublishError::InvalidSpec(msg) => write!(f, "Invalid publish request: {msg}"),
        }
    }
}

impl std::error::Error for PublishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PublishError::Render(err) => Some(err),
            PublishError::Io { source, .. } => Some(source),
            PublishError::InvalidSpec(_) => None,
        }
    }
}

impl From<RenderError> for PublishError {
    fn from(err: RenderError) -> Self {
        PublishError::Render(err)
    }
}
