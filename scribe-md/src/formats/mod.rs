//! Format implementations
//!
//! Each output format lives in its own module and owns its handlers.

pub mod markdown;

pub use markdown::MarkdownWriter;
