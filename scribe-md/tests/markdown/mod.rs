//! Markdown renderer tests
//!
//! Whole-document exports and generated-tree properties.

mod export;
mod properties;
