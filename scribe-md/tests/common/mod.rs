//! Tests for the shared machinery: the frame stack and the tree walker.

use proptest::prelude::*;
use scribe_md::common::frames::{fold_raw_run, CloseOptions, FrameStack};
use scribe_md::common::traversal::{walk, NodeRef, Visit, Visitor};
use scribe_md::{Node, NodeKind};

/// A generated frame layout: either text for the enclosing frame or a nested frame.
#[derive(Debug, Clone)]
enum Layout {
    Text(String),
    Frame { indent: usize, blank: bool, items: Vec<Layout> },
}

fn layout() -> impl Strategy<Value = Layout> {
    let leaf = "[a-z]{1,6}".prop_map(Layout::Text);
    leaf.prop_recursive(5, 40, 5, |inner| {
        (0usize..6, any::<bool>(), prop::collection::vec(inner, 0..5))
            .prop_map(|(indent, blank, items)| Layout::Frame { indent, blank, items })
    })
}

fn drive(stack: &mut FrameStack, item: &Layout, words: &mut String) {
    match item {
        Layout::Text(text) => {
            stack.emit(text.as_str());
            words.push_str(text);
        }
        Layout::Frame { indent, blank, items } => {
            stack.open(*indent);
            for child in items {
                drive(stack, child, words);
            }
            let options = if *blank {
                CloseOptions::new()
            } else {
                CloseOptions::new().no_blank_line()
            };
            stack.close(options).unwrap();
        }
    }
}

proptest! {
    #[test]
    fn balanced_layouts_keep_text_in_order(items in prop::collection::vec(layout(), 0..6)) {
        let mut stack = FrameStack::new();
        let mut words = String::new();
        for item in &items {
            drive(&mut stack, item, &mut words);
        }

        prop_assert_eq!(stack.depth(), 1);
        let stats = stack.stats();
        prop_assert_eq!(stats.opened, stats.closed);

        let text = stack.finish("\n").unwrap();
        let squeezed: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(squeezed, words);
    }

    #[test]
    fn raw_runs_keep_every_line(lines in prop::collection::vec("[a-z ]{0,5}[a-z]", 1..8)) {
        prop_assert_eq!(fold_raw_run(&lines.join("\n")), lines);
    }

    #[test]
    fn frame_indent_is_applied_to_every_line(indent in 0usize..12, lines in prop::collection::vec("[a-z]{1,6}", 1..6)) {
        let mut stack = FrameStack::new();
        stack.open(indent);
        stack.emit(lines.join("\n"));
        stack.close(CloseOptions::new().no_blank_line()).unwrap();
        let text = stack.finish("\n").unwrap();
        let pad = " ".repeat(indent);
        let expected: Vec<String> = lines.iter().map(|line| format!("{pad}{line}")).collect();
        prop_assert_eq!(text.lines().map(str::to_string).collect::<Vec<_>>(), expected);
    }
}

#[test]
fn hanging_prefix_lines_up_nested_bodies() {
    let mut stack = FrameStack::new();
    stack.open(4);
    stack.open(0);
    stack.emit("outer");
    stack.close(CloseOptions::new()).unwrap();
    stack.open(5);
    stack.open(0);
    stack.emit("inner");
    stack.close(CloseOptions::new()).unwrap();
    stack
        .close(CloseOptions::new().first_line_prefix("1.  "))
        .unwrap();
    stack
        .close(CloseOptions::new().first_line_prefix("*   "))
        .unwrap();
    assert_eq!(stack.finish("\n").unwrap(), "*   outer\n\n    1.  inner\n");
}

struct Counter {
    entered: usize,
    left: usize,
    max_depth: usize,
    paths: Vec<String>,
}

impl Visitor for Counter {
    type Error = String;

    fn enter(&mut self, node: &NodeRef<'_>) -> Result<Visit, String> {
        self.entered += 1;
        self.max_depth = self.max_depth.max(node.depth);
        if node.kind() == &NodeKind::Text {
            self.paths.push(node.path());
        }
        Ok(Visit::Continue)
    }

    fn leave(&mut self, _node: &NodeRef<'_>) -> Result<(), String> {
        self.left += 1;
        Ok(())
    }
}

#[test]
fn walk_visits_every_node_once() {
    let tree = Node::new(NodeKind::Document)
        .with_child(
            Node::new(NodeKind::Section)
                .with_child(Node::with_text(NodeKind::Title, "Intro"))
                .with_child(Node::with_text(NodeKind::Paragraph, "Body")),
        )
        .with_child(Node::with_text(NodeKind::Paragraph, "Tail"));

    let mut counter = Counter {
        entered: 0,
        left: 0,
        max_depth: 0,
        paths: Vec::new(),
    };
    walk(&tree, &mut counter).unwrap();

    assert_eq!(counter.entered, tree.size());
    assert_eq!(counter.left, tree.size());
    assert_eq!(counter.max_depth, 3);
    assert_eq!(
        counter.paths,
        vec![
            "document/section[0]/title[0]/text[0]",
            "document/section[0]/paragraph[1]/text[0]",
            "document/paragraph[1]/text[0]",
        ]
    );
}
