//! Node kind tags.
//!
//! The set of kinds is closed: every tag the renderer knows about has its own variant, and any
//! other tag read from an input tree is kept as [`NodeKind::Unknown`] so that it reaches the
//! unknown-node fallback at render time instead of failing deserialization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tag identifying what a [`Node`](super::nodes::Node) represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Document,
    Section,
    Title,
    Paragraph,
    Text,
    Compound,
    StartOfFile,

    LiteralBlock,
    Literal,
    Reference,
    TitleReference,
    Emphasis,
    Strong,
    LiteralEmphasis,
    LiteralStrong,

    BulletList,
    EnumeratedList,
    DefinitionList,
    ListItem,
    DefinitionListItem,
    Term,
    Definition,

    FieldList,
    Field,
    FieldName,
    FieldBody,

    Description,
    DescriptionSignature,
    DescriptionName,
    DescriptionAddname,
    DescriptionParameterList,
    DescriptionParameter,
    DescriptionType,
    DescriptionReturns,
    DescriptionOptional,
    DescriptionAnnotation,
    DescriptionContent,

    Admonition,
    Note,
    Warning,
    Tip,
    Important,
    Caution,
    SeeAlso,

    Index,
    Target,
    Comment,

    /// A tag outside the known set, kept verbatim.
    Unknown(String),
}

impl NodeKind {
    /// Every known kind, in declaration order.
    pub const KNOWN: &'static [NodeKind] = &[
        NodeKind::Document,
        NodeKind::Section,
        NodeKind::Title,
        NodeKind::Paragraph,
        NodeKind::Text,
        NodeKind::Compound,
        NodeKind::StartOfFile,
        NodeKind::LiteralBlock,
        NodeKind::Literal,
        NodeKind::Reference,
        NodeKind::TitleReference,
        NodeKind::Emphasis,
        NodeKind::Strong,
        NodeKind::LiteralEmphasis,
        NodeKind::LiteralStrong,
        NodeKind::BulletList,
        NodeKind::EnumeratedList,
        NodeKind::DefinitionList,
        NodeKind::ListItem,
        NodeKind::DefinitionListItem,
        NodeKind::Term,
        NodeKind::Definition,
        NodeKind::FieldList,
        NodeKind::Field,
        NodeKind::FieldName,
        NodeKind::FieldBody,
        NodeKind::Description,
        NodeKind::DescriptionSignature,
        NodeKind::DescriptionName,
        NodeKind::DescriptionAddname,
        NodeKind::DescriptionParameterList,
        NodeKind::DescriptionParameter,
        NodeKind::DescriptionType,
        NodeKind::DescriptionReturns,
        NodeKind::DescriptionOptional,
        NodeKind::DescriptionAnnotation,
        NodeKind::DescriptionContent,
        NodeKind::Admonition,
        NodeKind::Note,
        NodeKind::Warning,
        NodeKind::Tip,
        NodeKind::Important,
        NodeKind::Caution,
        NodeKind::SeeAlso,
        NodeKind::Index,
        NodeKind::Target,
        NodeKind::Comment,
    ];

    /// The tag string used in serialized trees and diagnostics.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Section => "section",
            NodeKind::Title => "title",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Text => "text",
            NodeKind::Compound => "compound",
            NodeKind::StartOfFile => "start-of-file",
            NodeKind::LiteralBlock => "literal-block",
            NodeKind::Literal => "literal",
            NodeKind::Reference => "reference",
            NodeKind::TitleReference => "title-reference",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::LiteralEmphasis => "literal-emphasis",
            NodeKind::LiteralStrong => "literal-strong",
            NodeKind::BulletList => "bullet-list",
            NodeKind::EnumeratedList => "enumerated-list",
            NodeKind::DefinitionList => "definition-list",
            NodeKind::ListItem => "list-item",
            NodeKind::DefinitionListItem => "definition-list-item",
            NodeKind::Term => "term",
            NodeKind::Definition => "definition",
            NodeKind::FieldList => "field-list",
            NodeKind::Field => "field",
            NodeKind::FieldName => "field-name",
            NodeKind::FieldBody => "field-body",
            NodeKind::Description => "description",
            NodeKind::DescriptionSignature => "description-signature",
            NodeKind::DescriptionName => "description-name",
            NodeKind::DescriptionAddname => "description-addname",
            NodeKind::DescriptionParameterList => "description-parameter-list",
            NodeKind::DescriptionParameter => "description-parameter",
            NodeKind::DescriptionType => "description-type",
            NodeKind::DescriptionReturns => "description-returns",
            NodeKind::DescriptionOptional => "description-optional",
            NodeKind::DescriptionAnnotation => "description-annotation",
            NodeKind::DescriptionContent => "description-content",
            NodeKind::Admonition => "admonition",
            NodeKind::Note => "note",
            NodeKind::Warning => "warning",
            NodeKind::Tip => "tip",
            NodeKind::Important => "important",
            NodeKind::Caution => "caution",
            NodeKind::SeeAlso => "seealso",
            NodeKind::Index => "index",
            NodeKind::Target => "target",
            NodeKind::Comment => "comment",
            NodeKind::Unknown(tag) => tag,
        }
    }

    /// Resolve a tag string. Unrecognized tags become [`NodeKind::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        NodeKind::KNOWN
            .iter()
            .find(|kind| kind.as_str() == tag)
            .cloned()
            .unwrap_or_else(|| NodeKind::Unknown(tag.to_string()))
    }

    /// Admonition-like containers change how their titles and paragraphs render.
    pub fn is_admonition(&self) -> bool {
        matches!(
            self,
            NodeKind::Admonition
                | NodeKind::Note
                | NodeKind::Warning
                | NodeKind::Tip
                | NodeKind::Important
                | NodeKind::Caution
                | NodeKind::SeeAlso
        )
    }

    /// Separator placed between children when flattening a subtree to text.
    pub fn child_text_separator(&self) -> &'static str {
        match self {
            NodeKind::DescriptionParameterList => ", ",
            _ => "",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NodeKind::from_tag(s))
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match NodeKind::from_tag(&tag) {
            NodeKind::Unknown(_) => NodeKind::Unknown(tag),
            known => known,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        NodeKind::from_tag(tag)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}
