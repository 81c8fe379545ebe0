// Restoring the red-black invariants after a structural change:
//
// 1. every node is red or black, and the sentinel is black;
// 2. the root is black;
// 3. a red node has no red child;
// 4. every path from a node down to the sentinel crosses the same number of black nodes.
//
// Ordering (the fifth) is never disturbed here: rotations and swaps preserve in-order sequence.

use log::trace;

use crate::node::{Colour, Dir, NodeId, NodeStore};

/// Restructuring of a three-node chain `top -> mid -> low`, named after the sides the two links
/// leave from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rotation {
    LeftLeft,
    RightRight,
    LeftRight,
    RightLeft,
}

impl Rotation {
    pub fn classify(mid_side: Dir, low_side: Dir) -> Rotation {
        match (mid_side, low_side) {
            (Dir::Left, Dir::Left) => Rotation::LeftLeft,
            (Dir::Right, Dir::Right) => Rotation::RightRight,
            (Dir::Left, Dir::Right) => Rotation::LeftRight,
            (Dir::Right, Dir::Left) => Rotation::RightLeft,
        }
    }

    /// The single rotation that lifts `top`'s `side` child.
    pub fn straight(side: Dir) -> Rotation {
        Rotation::classify(side, side)
    }
}

impl<K, V> NodeStore<K, V> {
    /// Applies `rotation` below `top` and returns the node that now heads the subtree: `mid` for
    /// the straight cases, `low` for the zigzags.
    pub fn restructure(&mut self, top: NodeId, rotation: Rotation) -> NodeId {
        match rotation {
            Rotation::LeftLeft => self.rotate(top, Dir::Right),
            Rotation::RightRight => self.rotate(top, Dir::Left),
            Rotation::LeftRight => {
                let mid = self.left(top);
                self.rotate(mid, Dir::Left);
                self.rotate(top, Dir::Right)
            }
            Rotation::RightLeft => {
                let mid = self.right(top);
                self.rotate(mid, Dir::Right);
                self.rotate(top, Dir::Left)
            }
        }
    }

    /// Repairs a red-red violation between the freshly attached red `node` and its parent.
    pub fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            let parent = self.parent(node);
            if parent.is_nil() {
                self.set_colour(node, Colour::Black);
                return;
            }
            if !self.is_red(parent) {
                return;
            }

            // A red parent is never the root, so the grandparent is real.
            let grandparent = self.parent(parent);
            let parent_side = self.side_of(parent);
            let uncle = self.child(grandparent, !parent_side);

            if self.is_red(uncle) {
                trace!("insert fixup: recolour below {:?}", grandparent);
                self.set_colour(parent, Colour::Black);
                self.set_colour(uncle, Colour::Black);
                self.set_colour(grandparent, Colour::Red);
                node = grandparent;
                continue;
            }

            let rotation = Rotation::classify(parent_side, self.side_of(node));
            trace!("insert fixup: {:?} at {:?}", rotation, grandparent);
            let top = self.restructure(grandparent, rotation);
            self.set_colour(top, Colour::Black);
            self.set_colour(grandparent, Colour::Red);
            return;
        }
    }

    /// Unlinks `node` from the tree and rebalances. The slot itself is left for the caller to
    /// release; no other node changes slot.
    pub fn detach(&mut self, node: NodeId) {
        let left = self.left(node);
        if !left.is_nil() && !self.right(node).is_nil() {
            // Trade places with the in-order predecessor, which has no right child.
            let pred = self.rightmost(left);
            self.swap_with_descendant(node, pred);
        }

        let child = if self.left(node).is_nil() {
            self.right(node)
        } else {
            self.left(node)
        };
        let parent = self.parent(node);
        let side = self.side_of(node);
        self.set_child(parent, side, child);
        self.set_parent(child, parent);

        if self.is_red(node) || self.is_red(child) {
            self.set_colour(child, Colour::Black);
        } else {
            self.erase_fixup(parent, side);
        }
    }

    /// Resolves a double black: the subtree in `parent`'s `side` slot (possibly just the
    /// sentinel) carries one black node fewer on each path than its sibling subtree.
    fn erase_fixup(&mut self, mut parent: NodeId, mut side: Dir) {
        loop {
            if parent.is_nil() {
                // The deficit reached the root, where it shortens every path alike.
                return;
            }

            let mut sibling = self.child(parent, !side);
            debug_assert!(!sibling.is_nil());

            if self.is_red(sibling) {
                trace!("erase fixup: red sibling {:?}", sibling);
                self.restructure(parent, Rotation::straight(!side));
                self.set_colour(sibling, Colour::Black);
                self.set_colour(parent, Colour::Red);
                sibling = self.child(parent, !side);
            }

            let outer = self.child(sibling, !side);
            let inner = self.child(sibling, side);

            if self.is_red(outer) || self.is_red(inner) {
                let rotation = if self.is_red(outer) {
                    Rotation::straight(!side)
                } else {
                    Rotation::classify(!side, side)
                };
                trace!("erase fixup: {:?} at {:?}", rotation, parent);
                let colour = self.colour(parent);
                let top = self.restructure(parent, rotation);
                self.set_colour(top, colour);
                let (left, right) = (self.left(top), self.right(top));
                self.set_colour(left, Colour::Black);
                self.set_colour(right, Colour::Black);
                return;
            }

            trace!("erase fixup: recolour sibling {:?}", sibling);
            self.set_colour(sibling, Colour::Red);
            if self.is_red(parent) {
                self.set_colour(parent, Colour::Black);
                return;
            }
            side = self.side_of(parent);
            parent = self.parent(parent);
        }
    }
}
