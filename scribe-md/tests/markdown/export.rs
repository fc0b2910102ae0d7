//! Export tests for the Markdown renderer (document tree → Markdown)
//!
//! Whole documents are rendered and either snapshotted or parsed back with Comrak to check
//! that the output has the Markdown structure intended.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};
use insta::assert_snapshot;
use scribe_md::{
    render, CollectingSink, LineTerminator, MarkdownWriter, Node, NodeKind, RenderOptions,
};

const KITCHENSINK: &str = include_str!("fixtures/kitchensink.json");

fn kitchensink() -> Node {
    Node::from_json(KITCHENSINK).expect("fixture should deserialize")
}

fn to_markdown(tree: &Node) -> String {
    render(tree, &RenderOptions::default()).expect("render should succeed")
}

/// Helper to render a tree and parse the result into a Comrak AST
fn to_comrak_ast<'a>(tree: &Node, arena: &'a Arena<AstNode<'a>>) -> &'a AstNode<'a> {
    let md = to_markdown(tree);
    parse_document(arena, &md, &Options::default())
}

fn collect_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        _ => {}
    }
    for child in node.children() {
        collect_text(child, out);
    }
}

fn heading_levels<'a>(root: &'a AstNode<'a>) -> Vec<u8> {
    root.descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Heading(heading) => Some(heading.level),
            _ => None,
        })
        .collect()
}

fn doc(children: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Document).with_children(children)
}

fn para(text: &str) -> Node {
    Node::with_text(NodeKind::Paragraph, text)
}

fn item(text: &str) -> Node {
    Node::new(NodeKind::ListItem).with_child(para(text))
}

#[test]
fn test_kitchensink_snapshot() {
    let md = to_markdown(&kitchensink());
    assert_snapshot!(md, @r###"
# Scribe Guide

Scribe renders **document trees** to _Markdown_.

## Install

```sh
cargo install scribe-cli
```

*   fast

*   small

Note: Needs Rust 1.70.

## API

### class `pool.`**`Worker`**(_`size`_)

A worker.
"###);
}

#[test]
fn test_kitchensink_reports_only_the_sidebar() {
    let mut sink = CollectingSink::new();
    MarkdownWriter::default()
        .translate_with_sink(&kitchensink(), &mut sink)
        .unwrap();
    assert_eq!(sink.kinds(), vec!["sidebar"]);
    assert_eq!(sink.events[0].depth, 3);
}

#[test]
fn test_kitchensink_structure() {
    let arena = Arena::new();
    let root = to_comrak_ast(&kitchensink(), &arena);

    assert_eq!(heading_levels(root), vec![1, 2, 2, 3]);

    let code: Vec<(String, String)> = root
        .descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::CodeBlock(block) => Some((block.info.clone(), block.literal.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        code,
        vec![("sh".to_string(), "cargo install scribe-cli\n".to_string())]
    );

    let mut text = String::new();
    collect_text(root, &mut text);
    assert!(text.contains("Needs Rust 1.70."));
    assert!(!text.contains("dropped"), "unknown subtree leaked: {text}");
}

#[test]
fn test_heading_depth_follows_section_nesting() {
    let leaf = Node::new(NodeKind::Section).with_child(Node::with_text(NodeKind::Title, "T"));
    let middle = Node::new(NodeKind::Section)
        .with_child(Node::with_text(NodeKind::Title, "T"))
        .with_child(leaf);
    let outer = Node::new(NodeKind::Section)
        .with_child(Node::with_text(NodeKind::Title, "T"))
        .with_child(middle);
    let tree = doc([outer]);

    assert_eq!(to_markdown(&tree), "# T\n\n## T\n\n### T\n");

    let arena = Arena::new();
    assert_eq!(heading_levels(to_comrak_ast(&tree, &arena)), vec![1, 2, 3]);
}

#[test]
fn test_heading_and_paragraph_separation() {
    let tree = doc([Node::new(NodeKind::Section)
        .with_child(Node::with_text(NodeKind::Title, "Title"))
        .with_child(para("Body text."))]);

    let arena = Arena::new();
    let root = to_comrak_ast(&tree, &arena);
    let mut kinds = Vec::new();
    for child in root.children() {
        let mut text = String::new();
        collect_text(child, &mut text);
        match child.data.borrow().value {
            NodeValue::Heading(_) => kinds.push(("heading", text)),
            NodeValue::Paragraph => kinds.push(("paragraph", text)),
            _ => kinds.push(("other", text)),
        }
    }
    assert_eq!(
        kinds,
        vec![
            ("heading", "Title".to_string()),
            ("paragraph", "Body text.".to_string())
        ]
    );
}

#[test]
fn test_code_fence_is_exact() {
    let tree = doc([Node::with_text(NodeKind::LiteralBlock, "a\nb"), para("next")]);
    let md = to_markdown(&tree);
    let lines: Vec<&str> = md.split('\n').collect();
    assert_eq!(lines, vec!["```", "a", "b", "```", "", "next", ""]);
}

#[test]
fn test_code_fence_keeps_indentation_and_blank_lines() {
    let code = "fn main() {\n    println!(\"hi\");\n}";
    let tree = doc([Node::with_text(NodeKind::LiteralBlock, code).with_attr("language", "rust")]);

    let arena = Arena::new();
    let root = to_comrak_ast(&tree, &arena);
    let block = root
        .children()
        .find_map(|node| match &node.data.borrow().value {
            NodeValue::CodeBlock(block) => Some(block.clone()),
            _ => None,
        })
        .expect("code block");
    assert!(block.fenced);
    assert_eq!(block.info, "rust");
    assert_eq!(block.literal, format!("{code}\n"));
}

#[test]
fn test_enumerated_list_numbering() {
    let list = Node::new(NodeKind::EnumeratedList)
        .with_attr("start", 3)
        .with_children([item("one"), item("two"), item("three")]);
    let tree = doc([list]);
    assert_eq!(to_markdown(&tree), "3.  one\n\n4.  two\n\n5.  three\n");

    let arena = Arena::new();
    let root = to_comrak_ast(&tree, &arena);
    let list = root
        .children()
        .find_map(|node| match &node.data.borrow().value {
            NodeValue::List(list) => Some(*list),
            _ => None,
        })
        .expect("ordered list");
    assert_eq!(list.list_type, ListType::Ordered);
    assert_eq!(list.start, 3);
    let first = root.first_child().expect("list node");
    assert_eq!(first.children().count(), 3);
}

#[test]
fn test_enumerated_list_nested_in_bullet_list() {
    let inner = Node::new(NodeKind::EnumeratedList)
        .with_attr("start", "3")
        .with_children([item("one"), item("two"), item("three")]);
    let outer = Node::new(NodeKind::BulletList).with_child(
        Node::new(NodeKind::ListItem)
            .with_child(para("steps"))
            .with_child(inner),
    );
    assert_snapshot!(to_markdown(&doc([outer])), @r###"
*   steps

    3.  one

    4.  two

    5.  three
"###);
}

#[test]
fn test_bullet_list_parses_as_list() {
    let tree = doc([Node::new(NodeKind::BulletList).with_children([item("fast"), item("small")])]);

    let arena = Arena::new();
    let root = to_comrak_ast(&tree, &arena);
    let list = root.first_child().expect("list");
    match &list.data.borrow().value {
        NodeValue::List(list) => assert_eq!(list.list_type, ListType::Bullet),
        other => panic!("expected list, got {other:?}"),
    }
    assert_eq!(list.children().count(), 2);
}

#[test]
fn test_inline_spans_parse_back() {
    let paragraph = Node::new(NodeKind::Paragraph)
        .with_child(Node::text("Use "))
        .with_child(Node::with_text(NodeKind::Literal, "render"))
        .with_child(Node::text(", "))
        .with_child(Node::with_text(NodeKind::Strong, "always"))
        .with_child(Node::text(" and "))
        .with_child(Node::with_text(NodeKind::Emphasis, "gently"))
        .with_child(Node::text("."));
    let tree = doc([paragraph]);
    assert_eq!(
        to_markdown(&tree),
        "Use `render`, **always** and _gently_.\n"
    );

    let arena = Arena::new();
    let root = to_comrak_ast(&tree, &arena);
    let mut found = Vec::new();
    for node in root.descendants() {
        match node.data.borrow().value {
            NodeValue::Strong => found.push("strong"),
            NodeValue::Emph => found.push("emph"),
            NodeValue::Code(_) => found.push("code"),
            _ => {}
        }
    }
    assert_eq!(found, vec!["code", "strong", "emph"]);
}

#[test]
fn test_method_signature_under_section() {
    let signature = Node::new(NodeKind::DescriptionSignature)
        .with_child(Node::with_text(NodeKind::DescriptionAddname, "Worker."))
        .with_child(Node::with_text(NodeKind::DescriptionName, "run"))
        .with_child(
            Node::new(NodeKind::DescriptionParameterList)
                .with_child(Node::with_text(NodeKind::DescriptionParameter, "x"))
                .with_child(Node::with_text(NodeKind::DescriptionParameter, "y")),
        );
    let description = Node::new(NodeKind::Description)
        .with_attr("objtype", "method")
        .with_child(signature);
    let tree = doc([Node::new(NodeKind::Section)
        .with_child(Node::with_text(NodeKind::Title, "Workers"))
        .with_child(description)]);

    let md = to_markdown(&tree);
    assert!(md.contains("\n## `Worker.`**`run`**(_`x, y`_)\n"), "{md}");

    let arena = Arena::new();
    assert_eq!(heading_levels(to_comrak_ast(&tree, &arena)), vec![1, 2]);
}

#[test]
fn test_definition_and_field_lists() {
    let definitions = Node::new(NodeKind::DefinitionList).with_child(
        Node::new(NodeKind::DefinitionListItem)
            .with_child(Node::with_text(NodeKind::Term, "frame"))
            .with_child(Node::new(NodeKind::Definition).with_child(para("A buffer."))),
    );
    let fields = Node::new(NodeKind::FieldList).with_child(
        Node::new(NodeKind::Field)
            .with_child(Node::with_text(NodeKind::FieldName, "Version"))
            .with_child(Node::new(NodeKind::FieldBody).with_child(para("0.1"))),
    );
    assert_snapshot!(to_markdown(&doc([definitions, fields])), @r###"
**frame**
    A buffer.

**Version**:
    0.1
"###);
}

#[test]
fn test_admonitions_flow_into_one_block() {
    let warning = Node::new(NodeKind::Warning)
        .with_child(para("Back up first."))
        .with_child(para("Then upgrade."));
    let tip = Node::new(NodeKind::Admonition)
        .with_child(Node::with_text(NodeKind::Title, "Pro tip"))
        .with_child(para("Use a lockfile."));
    assert_eq!(
        to_markdown(&doc([warning, tip])),
        "Warning: Back up first. Then upgrade.\n\nPro tip: Use a lockfile.\n"
    );
}

#[test]
fn test_crlf_output() {
    let options = RenderOptions {
        line_terminator: LineTerminator::Crlf,
        ..RenderOptions::default()
    };
    let lf = to_markdown(&kitchensink());
    let crlf = render(&kitchensink(), &options).unwrap();
    assert_eq!(crlf, lf.replace('\n', "\r\n"));
}

#[test]
fn test_silent_kinds_are_not_reported() {
    let tree = doc([
        Node::new(NodeKind::Comment).with_child(Node::text("internal")),
        Node::new(NodeKind::Target),
        para("Visible."),
    ]);
    let mut sink = CollectingSink::new();
    let md = MarkdownWriter::default()
        .translate_with_sink(&tree, &mut sink)
        .unwrap();
    assert_eq!(md, "Visible.\n");
    assert!(sink.events.is_empty());
}

#[test]
fn test_empty_document_renders_empty_text() {
    assert_eq!(to_markdown(&doc([])), "");
}
