//! Format-agnostic machinery shared by every render pass.

pub mod frames;
pub mod traversal;
