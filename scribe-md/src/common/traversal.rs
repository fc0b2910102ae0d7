//! Pre-order walk over a document tree with enter/leave callbacks.
//!
//! # The High-Level Concept
//!
//! Renderers never get random access to the tree. They see each node twice, once on the way
//! down and once on the way back up, and must keep whatever state they need between those two
//! calls. The walker owns the recursion; the [`Visitor`] owns the state.
//!
//! # The Algorithm
//!
//! 1. **Enter:** call [`Visitor::enter`] with a [`NodeRef`] describing the node, its parent,
//!    its depth and its path from the root.
//! 2. **Descend:** depending on the returned [`Visit`]:
//!    - `Continue` walks every child in order,
//!    - `SkipChildren` walks nothing but still leaves the node,
//!    - `SkipNode` walks nothing and does not leave the node either.
//! 3. **Leave:** call [`Visitor::leave`] with the same [`NodeRef`].
//!
//! The first error returned by a callback stops the walk and is handed back unchanged.

use std::fmt;

use crate::ir::{Node, NodeKind};

/// What the walker should do after entering a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    SkipChildren,
    SkipNode,
}

/// Callback table driven by [`walk`].
pub trait Visitor {
    type Error;

    fn enter(&mut self, node: &NodeRef<'_>) -> Result<Visit, Self::Error>;

    fn leave(&mut self, _node: &NodeRef<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Position of a node in the walk.
///
/// Gives read-only access to the node and to its parent, one hop only. The path is kept as a
/// chain of stack-allocated links and only formatted when someone asks for it.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    pub node: &'a Node,
    pub parent: Option<&'a Node>,
    pub depth: usize,
    pub index: usize,
    trail: &'a Trail<'a>,
}

struct Trail<'a> {
    kind: &'a NodeKind,
    index: usize,
    up: Option<&'a Trail<'a>>,
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> &'a NodeKind {
        &self.node.kind
    }

    pub fn parent_kind(&self) -> Option<&'a NodeKind> {
        self.parent.map(|parent| &parent.kind)
    }

    pub fn parent_is(&self, kind: &NodeKind) -> bool {
        self.parent_kind() == Some(kind)
    }

    /// Slash-separated path from the root, e.g. `document/section[0]/paragraph[2]`.
    pub fn path(&self) -> String {
        let mut segments = Vec::with_capacity(self.depth + 1);
        let mut link = Some(self.trail);
        while let Some(current) = link {
            if current.up.is_some() {
                segments.push(format!("{}[{}]", current.kind, current.index));
            } else {
                segments.push(current.kind.to_string());
            }
            link = current.up;
        }
        segments.reverse();
        segments.join("/")
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("kind", &self.node.kind)
            .field("depth", &self.depth)
            .field("path", &self.path())
            .finish()
    }
}

/// Walk `root` depth-first, dispatching to `visitor`.
pub fn walk<V>(root: &Node, visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    let trail = Trail {
        kind: &root.kind,
        index: 0,
        up: None,
    };
    walk_node(
        NodeRef {
            node: root,
            parent: None,
            depth: 0,
            index: 0,
            trail: &trail,
        },
        visitor,
    )
}

fn walk_node<V>(at: NodeRef<'_>, visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    match visitor.enter(&at)? {
        Visit::SkipNode => return Ok(()),
        Visit::SkipChildren => {}
        Visit::Continue => {
            for (index, child) in at.node.children.iter().enumerate() {
                let trail = Trail {
                    kind: &child.kind,
                    index,
                    up: Some(at.trail),
                };
                walk_node(
                    NodeRef {
                        node: child,
                        parent: Some(at.node),
                        depth: at.depth + 1,
                        index,
                        trail: &trail,
                    },
                    visitor,
                )?;
            }
        }
    }
    visitor.leave(&at)
}
