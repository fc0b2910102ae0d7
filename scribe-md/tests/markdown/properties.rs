//! Property tests for the render pass over generated trees.

use proptest::prelude::*;
use regex::Regex;
use scribe_md::common::traversal::walk;
use scribe_md::formats::markdown::Translator;
use scribe_md::{
    render, CollectingSink, HandlerRegistry, LineTerminator, Node, NodeKind, RenderOptions,
};

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Block-level trees mixing sections, lists, code and unknown markup.
fn block() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        word().prop_map(|w| Node::with_text(NodeKind::Paragraph, w)),
        word().prop_map(|w| Node::with_text(NodeKind::LiteralBlock, w)),
        word().prop_map(|w| {
            Node::new("sidebar").with_child(Node::with_text(NodeKind::Paragraph, w))
        }),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            (word(), prop::collection::vec(inner.clone(), 0..4)).prop_map(|(title, children)| {
                Node::new(NodeKind::Section)
                    .with_child(Node::with_text(NodeKind::Title, title))
                    .with_children(children)
            }),
            prop::collection::vec(inner.clone(), 1..4).prop_map(|items| {
                Node::new(NodeKind::BulletList).with_children(
                    items
                        .into_iter()
                        .map(|item| Node::new(NodeKind::ListItem).with_child(item)),
                )
            }),
            (1i64..200, prop::collection::vec(inner, 1..4)).prop_map(|(start, items)| {
                Node::new(NodeKind::EnumeratedList)
                    .with_attr("start", start)
                    .with_children(
                        items
                            .into_iter()
                            .map(|item| Node::new(NodeKind::ListItem).with_child(item)),
                    )
            }),
        ]
    })
}

fn document() -> impl Strategy<Value = Node> {
    prop::collection::vec(block(), 0..5)
        .prop_map(|children| Node::new(NodeKind::Document).with_children(children))
}

fn nested_sections(depth: usize) -> Node {
    let mut node = Node::new(NodeKind::Section).with_child(Node::with_text(NodeKind::Title, "T"));
    for _ in 1..depth {
        node = Node::new(NodeKind::Section)
            .with_child(Node::with_text(NodeKind::Title, "T"))
            .with_child(node);
    }
    Node::new(NodeKind::Document).with_child(node)
}

proptest! {
    #[test]
    fn frames_and_sections_balance(tree in document()) {
        let options = RenderOptions::default();
        let registry = HandlerRegistry::with_defaults();
        let mut sink = CollectingSink::new();
        let mut translator = Translator::new(&options, &registry, &mut sink);

        prop_assert_eq!(translator.frame_depth(), 1);
        prop_assert_eq!(translator.section_level(), 1);
        prop_assert!(walk(&tree, &mut translator).is_ok());

        let stats = translator.frame_stats();
        prop_assert_eq!(stats.opened, stats.closed);
        prop_assert_eq!(translator.frame_depth(), 1);
        prop_assert_eq!(translator.section_level(), 1);
        prop_assert_eq!(translator.current_list(), None);
        prop_assert!(translator.finish().is_ok());
    }

    #[test]
    fn heading_markers_match_section_depth(depth in 1usize..8) {
        let md = render(&nested_sections(depth), &RenderOptions::default()).unwrap();
        let heading = Regex::new(r"^(#+) T$").unwrap();
        let counts: Vec<usize> = md
            .lines()
            .filter_map(|line| heading.captures(line).map(|caps| caps[1].len()))
            .collect();
        prop_assert_eq!(counts, (1..=depth).collect::<Vec<_>>());
    }

    #[test]
    fn nested_identical_spans_double_markers(depth in 1usize..10, text in word()) {
        let mut span = Node::text(text.clone());
        for _ in 0..depth {
            span = Node::new(NodeKind::Strong).with_child(span);
        }
        let tree = Node::new(NodeKind::Document)
            .with_child(Node::new(NodeKind::Paragraph).with_child(span));
        let md = render(&tree, &RenderOptions::default()).unwrap();
        let markers = "*".repeat(depth * 2);
        prop_assert_eq!(md, format!("{markers}{text}{markers}\n"));
    }

    #[test]
    fn enumerated_markers_count_up_from_start(start in 1i64..10_000, count in 1usize..12) {
        let items = (0..count).map(|i| {
            Node::new(NodeKind::ListItem)
                .with_child(Node::with_text(NodeKind::Paragraph, format!("item {i}")))
        });
        let list = Node::new(NodeKind::EnumeratedList)
            .with_attr("start", start)
            .with_children(items);
        let tree = Node::new(NodeKind::Document).with_child(list);
        let md = render(&tree, &RenderOptions::default()).unwrap();

        let marker = Regex::new(r"^(\d+)\.  item (\d+)$").unwrap();
        let found: Vec<(i64, usize)> = md
            .lines()
            .filter_map(|line| marker.captures(line))
            .map(|caps| (caps[1].parse().unwrap(), caps[2].parse().unwrap()))
            .collect();
        let expected: Vec<(i64, usize)> = (0..count).map(|i| (start + i as i64, i)).collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn unknown_subtrees_never_reach_output(tree in document(), secret in "[A-Z]{12}") {
        let hidden = Node::new("sidebar")
            .with_child(Node::with_text(NodeKind::Paragraph, secret.clone()));
        let tree = tree.with_child(hidden);
        let md = render(&tree, &RenderOptions::default()).unwrap();
        prop_assert!(!md.contains(&secret));
    }

    #[test]
    fn crlf_only_changes_terminators(tree in document()) {
        let lf = render(&tree, &RenderOptions::default()).unwrap();
        let options = RenderOptions {
            line_terminator: LineTerminator::Crlf,
            ..RenderOptions::default()
        };
        let crlf = render(&tree, &options).unwrap();
        prop_assert_eq!(crlf, lf.replace('\n', "\r\n"));
    }
}
