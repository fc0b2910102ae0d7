//! Built-in enter/leave handlers, one pair per node kind.
//!
//! Handlers only touch the translator's buffer stack and counters. Anything a handler opens
//! on enter it closes on leave; a handler that returns [`Visit::SkipNode`] must not open
//! anything, since its leave will never run.

use crate::common::frames::{CloseOptions, Group};
use crate::common::traversal::{NodeRef, Visit};
use crate::error::RenderError;
use crate::ir::NodeKind;
use crate::registry::{Handler, HandlerRegistry};

use super::translator::{ListCounter, Translator};

type EnterResult = Result<Visit, RenderError>;
type LeaveResult = Result<(), RenderError>;

const BULLET_MARKER: &str = "*   ";
const FENCE: &str = "```";
const FIELD_BODY_INDENT: usize = 4;

pub(crate) fn register_defaults(registry: &mut HandlerRegistry) {
    registry.register(NodeKind::Document, Handler::new(open_block, close_block));
    registry.register(NodeKind::Section, Handler::new(visit_section, depart_section));
    registry.register(NodeKind::Title, Handler::new(visit_title, depart_title));
    registry.register(
        NodeKind::Paragraph,
        Handler::new(visit_paragraph, depart_paragraph),
    );
    registry.register(NodeKind::Text, Handler::enter_only(visit_text));
    registry.register(
        NodeKind::LiteralBlock,
        Handler::new(open_block, depart_literal_block),
    );

    for kind in [
        NodeKind::Emphasis,
        NodeKind::Strong,
        NodeKind::LiteralEmphasis,
        NodeKind::LiteralStrong,
        NodeKind::Literal,
        NodeKind::Reference,
        NodeKind::TitleReference,
        NodeKind::DescriptionName,
        NodeKind::DescriptionAddname,
        NodeKind::DescriptionType,
        NodeKind::DescriptionOptional,
    ] {
        registry.register(kind, Handler::new(visit_span, depart_span));
    }

    registry.register(NodeKind::BulletList, Handler::new(visit_bullet_list, depart_list));
    registry.register(
        NodeKind::EnumeratedList,
        Handler::new(visit_enumerated_list, depart_list),
    );
    registry.register(
        NodeKind::DefinitionList,
        Handler::new(visit_definition_list, depart_list),
    );
    registry.register(
        NodeKind::ListItem,
        Handler::new(visit_list_item, depart_list_item),
    );
    registry.register(NodeKind::Term, Handler::new(visit_term, depart_term));
    registry.register(
        NodeKind::Definition,
        Handler::new(open_indented_block, close_block),
    );
    registry.register(
        NodeKind::FieldName,
        Handler::new(visit_field_name, depart_field_name),
    );
    registry.register(
        NodeKind::FieldBody,
        Handler::new(open_indented_block, close_block),
    );

    registry.register(
        NodeKind::DescriptionSignature,
        Handler::new(visit_desc_signature, depart_desc_signature),
    );
    registry.register(
        NodeKind::DescriptionParameterList,
        Handler::new(visit_desc_parameterlist, depart_desc_parameterlist),
    );
    registry.register(
        NodeKind::DescriptionReturns,
        Handler::enter_only(visit_desc_returns),
    );
    registry.register(
        NodeKind::DescriptionContent,
        Handler::new(open_block, close_block),
    );

    for kind in [
        NodeKind::Admonition,
        NodeKind::Note,
        NodeKind::Warning,
        NodeKind::Tip,
        NodeKind::Important,
        NodeKind::Caution,
        NodeKind::SeeAlso,
    ] {
        registry.register(kind, Handler::new(visit_admonition, close_block));
    }

    for kind in [
        NodeKind::Compound,
        NodeKind::StartOfFile,
        NodeKind::Description,
        NodeKind::DescriptionParameter,
        NodeKind::DescriptionAnnotation,
        NodeKind::FieldList,
        NodeKind::Field,
        NodeKind::DefinitionListItem,
    ] {
        registry.register(kind, Handler::enter_only(pass_through));
    }

    for kind in [NodeKind::Index, NodeKind::Target, NodeKind::Comment] {
        registry.register(kind, Handler::enter_only(skip_silently));
    }
}

// ---------------------------------------------------------------------------
// Generic blocks
// ---------------------------------------------------------------------------

fn open_block(t: &mut Translator<'_>, _node: &NodeRef<'_>) -> EnterResult {
    t.open_frame(0);
    Ok(Visit::Continue)
}

fn open_indented_block(t: &mut Translator<'_>, _node: &NodeRef<'_>) -> EnterResult {
    t.open_frame(FIELD_BODY_INDENT);
    Ok(Visit::Continue)
}

fn close_block(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    t.close_frame(node, CloseOptions::new())
}

fn pass_through(_t: &mut Translator<'_>, _node: &NodeRef<'_>) -> EnterResult {
    Ok(Visit::Continue)
}

fn skip_silently(_t: &mut Translator<'_>, _node: &NodeRef<'_>) -> EnterResult {
    Ok(Visit::SkipNode)
}

fn visit_text(t: &mut Translator<'_>, node: &NodeRef<'_>) -> EnterResult {
    if let Some(text) = &node.node.text {
        t.emit(text.as_str());
    }
    Ok(Visit::Continue)
}

// ---------------------------------------------------------------------------
// Sections, titles, paragraphs
// ---------------------------------------------------------------------------

fn visit_section(t: &mut Translator<'_>, _node: &NodeRef<'_>) -> EnterResult {
    t.enter_section();
    Ok(Visit::Continue)
}

fn depart_section(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    t.leave_section(node)
}

fn visit_title(t: &mut Translator<'_>, node: &NodeRef<'_>) -> EnterResult {
    let parent = node
        .parent
        .ok_or_else(|| RenderError::structure(node, "title has no enclosing container"))?;
    if parent.kind.is_admonition() {
        t.emit(format!("{}: ", node.node.astext()));
        return Ok(Visit::SkipNode);
    }
    t.open_frame(0);
    Ok(Visit::Continue)
}

fn depart_title(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    if node.parent_is(&NodeKind::Section) {
        let prefix = t.options().heading_prefix(t.section_depth());
        t.close_frame(node, CloseOptions::new().first_line_prefix(&prefix))
    } else {
        t.close_frame(node, CloseOptions::new())
    }
}

/// Paragraphs directly inside an admonition flow into the admonition's own block, except in
/// `seealso` where each keeps its frame.
fn paragraph_has_frame(node: &NodeRef<'_>) -> bool {
    match node.parent_kind() {
        Some(kind) if kind.is_admonition() => !merges_paragraphs(kind),
        _ => true,
    }
}

fn merges_paragraphs(admonition: &NodeKind) -> bool {
    admonition != &NodeKind::SeeAlso
}

fn visit_paragraph(t: &mut Translator<'_>, node: &NodeRef<'_>) -> EnterResult {
    if paragraph_has_frame(node) {
        t.open_frame(0);
    } else if follows_paragraph(node) {
        t.emit(" ");
    }
    Ok(Visit::Continue)
}

fn depart_paragraph(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    if paragraph_has_frame(node) {
        t.close_frame(node, CloseOptions::new())
    } else {
        Ok(())
    }
}

fn follows_paragraph(node: &NodeRef<'_>) -> bool {
    match (node.parent, node.index.checked_sub(1)) {
        (Some(parent), Some(previous)) => parent
            .children
            .get(previous)
            .is_some_and(|sibling| sibling.kind == NodeKind::Paragraph),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Code blocks
// ---------------------------------------------------------------------------

fn depart_literal_block(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    let opening = match node.node.attr_str("language") {
        Some(language) if !language.is_empty() => format!("{FENCE}{language}"),
        _ => FENCE.to_string(),
    };
    t.close_frame(
        node,
        CloseOptions::new().wrap(move |groups| fence_first_group(groups, opening)),
    )
}

/// Put the fence lines around the first group, keeping its trailing blank line outside.
fn fence_first_group(mut groups: Vec<Group>, opening: String) -> Vec<Group> {
    if let Some(first) = groups.first_mut() {
        first.lines.insert(0, opening);
        let closing_at = first.lines.len() - 1;
        first.lines.insert(closing_at, FENCE.to_string());
    }
    groups
}

// ---------------------------------------------------------------------------
// Inline spans
// ---------------------------------------------------------------------------

fn span_markers(kind: &NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Emphasis | NodeKind::LiteralEmphasis => ("_", "_"),
        NodeKind::Strong | NodeKind::LiteralStrong => ("**", "**"),
        NodeKind::Literal
        | NodeKind::Reference
        | NodeKind::TitleReference
        | NodeKind::DescriptionAddname
        | NodeKind::DescriptionType => ("`", "`"),
        NodeKind::DescriptionName => ("**`", "`**"),
        NodeKind::DescriptionOptional => ("[", "]"),
        _ => ("", ""),
    }
}

fn visit_span(t: &mut Translator<'_>, node: &NodeRef<'_>) -> EnterResult {
    let (open, _) = span_markers(node.kind());
    t.emit(open);
    Ok(Visit::Continue)
}

fn depart_span(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    let (_, close) = span_markers(node.kind());
    t.emit(close);
    Ok(())
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

fn visit_bullet_list(t: &mut Translator<'_>, _node: &NodeRef<'_>) -> EnterResult {
    t.push_list(ListCounter::Bullet);
    Ok(Visit::Continue)
}

fn visit_definition_list(t: &mut Translator<'_>, _node: &NodeRef<'_>) -> EnterResult {
    t.push_list(ListCounter::Definition);
    Ok(Visit::Continue)
}

fn visit_enumerated_list(t: &mut Translator<'_>, node: &NodeRef<'_>) -> EnterResult {
    let start = match node.node.attr("start") {
        None => 1,
        Some(value) => value.as_int().ok_or_else(|| {
            RenderError::invalid_attribute(node, "start", "expected an integer")
        })?,
    };
    if start < 1 {
        return Err(RenderError::structure(
            node,
            format!("enumerated list counter underflow: start {start} is below 1"),
        ));
    }
    let seed = usize::try_from(start - 1)
        .map_err(|_| RenderError::invalid_attribute(node, "start", "out of range"))?;
    t.push_list(ListCounter::Enumerated(seed));
    Ok(Visit::Continue)
}

fn depart_list(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    t.pop_list(node).map(|_| ())
}

/// Indent of an enumerated item's body.
fn enumerated_indent(number: usize) -> usize {
    number.to_string().len() + 4
}

fn visit_list_item(t: &mut Translator<'_>, node: &NodeRef<'_>) -> EnterResult {
    let indent = match t.current_list_mut() {
        None => return Err(RenderError::structure(node, "list item outside of a list")),
        Some(ListCounter::Bullet) => Some(BULLET_MARKER.len()),
        Some(ListCounter::Enumerated(number)) => {
            *number += 1;
            Some(enumerated_indent(*number))
        }
        Some(ListCounter::Definition) => None,
    };
    if let Some(indent) = indent {
        t.open_frame(indent);
    }
    Ok(Visit::Continue)
}

fn depart_list_item(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    let marker = match t.current_list() {
        None => return Err(RenderError::structure(node, "list item outside of a list")),
        Some(ListCounter::Bullet) => BULLET_MARKER.to_string(),
        Some(ListCounter::Enumerated(number)) => format!("{number}.  "),
        Some(ListCounter::Definition) => return Ok(()),
    };
    t.close_frame(node, CloseOptions::new().first_line_prefix(&marker))
}

fn visit_term(t: &mut Translator<'_>, _node: &NodeRef<'_>) -> EnterResult {
    t.open_frame(0);
    t.emit("**");
    Ok(Visit::Continue)
}

fn depart_term(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    t.emit("**");
    t.close_frame(node, CloseOptions::new().no_blank_line())
}

// ---------------------------------------------------------------------------
// Field lists
// ---------------------------------------------------------------------------

fn visit_field_name(t: &mut Translator<'_>, _node: &NodeRef<'_>) -> EnterResult {
    t.open_frame(0);
    t.emit("**");
    Ok(Visit::Continue)
}

fn depart_field_name(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    t.emit("**:");
    t.close_frame(node, CloseOptions::new().no_blank_line())
}

// ---------------------------------------------------------------------------
// API descriptions
// ---------------------------------------------------------------------------

fn visit_desc_signature(t: &mut Translator<'_>, node: &NodeRef<'_>) -> EnterResult {
    t.open_frame(0);
    let kind_word = node
        .parent
        .and_then(|owner| owner.attr_str("objtype"))
        .and_then(|objtype| t.options().objtype_title(objtype))
        .map(|title| format!("{title} "));
    if let Some(word) = kind_word {
        t.emit(word);
    }
    Ok(Visit::Continue)
}

fn depart_desc_signature(t: &mut Translator<'_>, node: &NodeRef<'_>) -> LeaveResult {
    let prefix = t.options().heading_prefix(t.section_level());
    t.close_frame(node, CloseOptions::new().first_line_prefix(&prefix))
}

fn visit_desc_parameterlist(t: &mut Translator<'_>, node: &NodeRef<'_>) -> EnterResult {
    t.emit("(");
    let args = node.node.astext();
    if !args.is_empty() {
        t.emit(format!("_`{args}`_"));
    }
    Ok(Visit::SkipChildren)
}

fn depart_desc_parameterlist(t: &mut Translator<'_>, _node: &NodeRef<'_>) -> LeaveResult {
    t.emit(")");
    Ok(())
}

fn visit_desc_returns(t: &mut Translator<'_>, _node: &NodeRef<'_>) -> EnterResult {
    t.emit(" -> ");
    Ok(Visit::Continue)
}

// ---------------------------------------------------------------------------
// Admonitions
// ---------------------------------------------------------------------------

fn visit_admonition(t: &mut Translator<'_>, node: &NodeRef<'_>) -> EnterResult {
    t.open_frame(0);
    if let Some(label) = t.options().admonition_label(node.kind().as_str()) {
        // A label standing on its own line carries no trailing space.
        if merges_paragraphs(node.kind()) {
            t.emit(format!("{label}: "));
        } else {
            t.emit(format!("{label}:"));
        }
    }
    Ok(Visit::Continue)
}
