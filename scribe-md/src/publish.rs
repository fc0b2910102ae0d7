//! Document publishing pipeline.
//!
//! Provides a high-level API for rendering a document tree and handing the text to its
//! destination. This is the only part of the crate that touches the filesystem; the renderer
//! itself never performs I/O.
//!
//! For more control over the render pass, use [`MarkdownWriter`] directly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PublishError;
use crate::formats::markdown::MarkdownWriter;
use crate::ir::Node;

/// Default extension of written documents.
pub const DEFAULT_SUFFIX: &str = "md";

/// Where a rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Return the text without writing anything.
    Memory,
    /// Write to exactly this file.
    File(PathBuf),
    /// Write `<dir>/<docname>.<suffix>`.
    Directory(PathBuf),
}

/// Specifies how to publish a document.
///
/// ```ignore
/// let spec = PublishSpec::new(&document, "index")
///     .with_outdir("build/markdown")
///     .with_suffix("markdown");
/// ```
///
/// Without a destination the rendered text is returned in memory.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    /// The finished document tree to render.
    pub document: &'a Node,
    /// Base name of the output file, used with an output directory.
    pub docname: String,
    pub destination: Destination,
    /// Extension appended to `docname`, without the dot.
    pub suffix: String,
}

impl<'a> PublishSpec<'a> {
    pub fn new(document: &'a Node, docname: impl Into<String>) -> Self {
        Self {
            document,
            docname: docname.into(),
            destination: Destination::Memory,
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }

    /// Write to this exact path.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.destination = Destination::File(path.as_ref().to_path_buf());
        self
    }

    /// Write into `dir`, naming the file after the document.
    pub fn with_outdir(mut self, dir: impl AsRef<Path>) -> Self {
        self.destination = Destination::Directory(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// The file this spec writes to, if any.
    pub fn target_path(&self) -> Result<Option<PathBuf>, PublishError> {
        match &self.destination {
            Destination::Memory => Ok(None),
            Destination::File(path) => Ok(Some(path.clone())),
            Destination::Directory(dir) => {
                let docname = self.docname.trim();
                if docname.is_empty() {
                    return Err(PublishError::InvalidSpec(
                        "an output directory needs a document name".to_string(),
                    ));
                }
                let suffix = self.suffix.trim_start_matches('.');
                let file_name = if suffix.is_empty() {
                    docname.to_string()
                } else {
                    format!("{docname}.{suffix}")
                };
                Ok(Some(dir.join(file_name)))
            }
        }
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Content held in memory (no destination was given).
    InMemory(String),
    /// Path to the written file.
    File(PathBuf),
}

/// Result of a publish operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
}

/// Renders a document and writes it according to the specification.
///
/// # Errors
///
/// Returns [`PublishError`] if:
/// - The render pass fails (nothing is written in that case)
/// - An output directory is given without a document name
/// - File I/O fails
pub fn publish(
    spec: PublishSpec<'_>,
    writer: &MarkdownWriter,
) -> Result<PublishResult, PublishError> {
    let target = spec.target_path()?;
    let text = writer.translate(spec.document)?;
    match target {
        None => Ok(PublishResult {
            artifact: PublishArtifact::InMemory(text),
        }),
        Some(path) => write_to_path(path, text).map(|path| PublishResult {
            artifact: PublishArtifact::File(path),
        }),
    }
}

fn write_to_path(path: PathBuf, text: String) -> Result<PathBuf, PublishError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PublishError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, text.as_bytes()).map_err(|source| PublishError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = text.len(), "document written");
    Ok(path)
}
