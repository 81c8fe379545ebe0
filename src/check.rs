use compare::Compare;
use std::error;
use std::fmt;

use crate::node::{Colour, NodeId, NodeStore, NIL};

/// A broken structural invariant, reported by [`RbTreeMap::validate`](crate::RbTreeMap::validate).
///
/// Nodes are identified by their slot index.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Violation {
    /// The sentinel is red.
    RedSentinel,
    /// The sentinel's parent or left link points somewhere other than itself.
    SentinelLinks,
    /// The root is red.
    RedRoot,
    /// A red node has a red child.
    RedChild { parent: usize, child: usize },
    /// Two subtrees of a node have different black heights.
    BlackHeight { node: usize, left: usize, right: usize },
    /// A child does not point back at its parent.
    ParentLink { node: usize },
    /// A released slot is still reachable from the root.
    VacantNode { node: usize },
    /// Two neighbours in the in-order walk are not strictly increasing.
    OutOfOrder { node: usize },
    /// The element counter disagrees with the number of reachable nodes.
    Length { counted: usize, recorded: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Violation::RedSentinel => write!(f, "the sentinel is red"),
            Violation::SentinelLinks => write!(f, "the sentinel is not self-linked"),
            Violation::RedRoot => write!(f, "the root is red"),
            Violation::RedChild { parent, child } => {
                write!(f, "red node {} has red child {}", parent, child)
            }
            Violation::BlackHeight { node, left, right } => write!(
                f,
                "node {} has black height {} on the left and {} on the right",
                node, left, right
            ),
            Violation::ParentLink { node } => write!(f, "node {} has a wrong parent link", node),
            Violation::VacantNode { node } => write!(f, "released slot {} is still linked", node),
            Violation::OutOfOrder { node } => write!(f, "node {} is out of order", node),
            Violation::Length { counted, recorded } => write!(
                f,
                "{} nodes are reachable but the length is {}",
                counted, recorded
            ),
        }
    }
}

impl error::Error for Violation {}

impl<K, V> NodeStore<K, V> {
    /// Checks every invariant of the tree and returns its black height.
    pub fn check<C: Compare<K>>(&self, cmp: &C, length: usize) -> Result<usize, Violation> {
        if self.colour(NIL) != Colour::Black {
            return Err(Violation::RedSentinel);
        }
        if !self.parent(NIL).is_nil() || !self.left(NIL).is_nil() {
            return Err(Violation::SentinelLinks);
        }

        let root = self.root();
        if !root.is_nil() {
            if !self.parent(root).is_nil() {
                return Err(Violation::ParentLink { node: root.index() });
            }
            if self.colour(root) == Colour::Red {
                return Err(Violation::RedRoot);
            }
        }

        let mut counted = 0;
        let height = self.check_subtree(root, &mut counted)?;
        if counted != length {
            return Err(Violation::Length { counted, recorded: length });
        }

        let mut prev = NIL;
        let mut node = self.successor(NIL);
        while !node.is_nil() {
            if !prev.is_nil() && !cmp.compares_lt(self.key(prev), self.key(node)) {
                return Err(Violation::OutOfOrder { node: node.index() });
            }
            prev = node;
            node = self.successor(node);
        }

        Ok(height)
    }

    fn check_subtree(&self, node: NodeId, counted: &mut usize) -> Result<usize, Violation> {
        if node.is_nil() {
            return Ok(0);
        }
        if !self.is_occupied(node) {
            return Err(Violation::VacantNode { node: node.index() });
        }

        let (left, right) = (self.left(node), self.right(node));
        for child in [left, right] {
            if child.is_nil() {
                continue;
            }
            if self.parent(child) != node {
                return Err(Violation::ParentLink { node: child.index() });
            }
            if self.is_red(node) && self.is_red(child) {
                return Err(Violation::RedChild {
                    parent: node.index(),
                    child: child.index(),
                });
            }
        }

        let left_height = self.check_subtree(left, counted)?;
        let right_height = self.check_subtree(right, counted)?;
        if left_height != right_height {
            return Err(Violation::BlackHeight {
                node: node.index(),
                left: left_height,
                right: right_height,
            });
        }

        *counted += 1;
        Ok(left_height + if self.is_red(node) { 0 } else { 1 })
    }
}
