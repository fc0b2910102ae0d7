//! Document tree representation.
//!
//! The renderer consumes a finished tree produced upstream: references already rewritten to
//! display text, merged documents already combined, numbering already attached as attributes.
//! This module only describes that tree; it never validates or rewrites it.

pub mod kinds;
pub mod nodes;

pub use kinds::NodeKind;
pub use nodes::{AttrValue, Node};
