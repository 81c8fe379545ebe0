// Links and entries are kept in two parallel vectors so that traversal can read links while
// entries are mutably borrowed (see `IterMut`). The sentinel never holds an entry.

use std::collections::TryReserveError;
use std::ops::Not;

/// Index of a slot in the arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

/// The sentinel.
pub const NIL: NodeId = NodeId(0);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_nil(self) -> bool {
        self == NIL
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Colour {
    Red,
    Black,
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dir {
    Left,
    Right,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Links {
    parent: NodeId,
    left: NodeId,
    right: NodeId,
    colour: Colour,
}

impl Links {
    const fn detached(colour: Colour) -> Self {
        Links {
            parent: NIL,
            left: NIL,
            right: NIL,
            colour,
        }
    }

    fn child(&self, dir: Dir) -> NodeId {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    fn child_mut(&mut self, dir: Dir) -> &mut NodeId {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }
}

pub fn root(links: &[Links]) -> NodeId {
    links[NIL.0].right
}

pub fn leftmost(links: &[Links], mut node: NodeId) -> NodeId {
    if node.is_nil() {
        return NIL;
    }
    while !links[node.0].left.is_nil() {
        node = links[node.0].left;
    }
    node
}

pub fn rightmost(links: &[Links], mut node: NodeId) -> NodeId {
    if node.is_nil() {
        return NIL;
    }
    while !links[node.0].right.is_nil() {
        node = links[node.0].right;
    }
    node
}

/// In-order successor. The sentinel is both ends of the sequence: the successor of the maximum
/// is the sentinel, and the successor of the sentinel is the minimum.
pub fn successor(links: &[Links], node: NodeId) -> NodeId {
    if node.is_nil() {
        return leftmost(links, root(links));
    }
    let right = links[node.0].right;
    if !right.is_nil() {
        return leftmost(links, right);
    }
    let mut cur = node;
    let mut parent = links[cur.0].parent;
    while !parent.is_nil() && links[parent.0].right == cur {
        cur = parent;
        parent = links[cur.0].parent;
    }
    parent
}

/// In-order predecessor, the mirror of `successor`. The predecessor of the sentinel is the
/// maximum.
pub fn predecessor(links: &[Links], node: NodeId) -> NodeId {
    if node.is_nil() {
        return rightmost(links, root(links));
    }
    let left = links[node.0].left;
    if !left.is_nil() {
        return rightmost(links, left);
    }
    let mut cur = node;
    let mut parent = links[cur.0].parent;
    while !parent.is_nil() && links[parent.0].left == cur {
        cur = parent;
        parent = links[cur.0].parent;
    }
    parent
}

pub struct NodeStore<K, V> {
    links: Vec<Links>,
    entries: Vec<Option<(K, V)>>,
    // Released slots form a chain through their `right` links.
    free: NodeId,
}

impl<K, V> NodeStore<K, V> {
    pub fn new() -> Self {
        NodeStore {
            links: vec![Links::detached(Colour::Black)],
            entries: vec![None],
            free: NIL,
        }
    }

    pub fn root(&self) -> NodeId {
        root(&self.links)
    }

    pub fn parent(&self, node: NodeId) -> NodeId {
        self.links[node.0].parent
    }

    pub fn left(&self, node: NodeId) -> NodeId {
        self.links[node.0].left
    }

    pub fn right(&self, node: NodeId) -> NodeId {
        self.links[node.0].right
    }

    pub fn child(&self, node: NodeId, dir: Dir) -> NodeId {
        self.links[node.0].child(dir)
    }

    pub fn colour(&self, node: NodeId) -> Colour {
        self.links[node.0].colour
    }

    pub fn is_red(&self, node: NodeId) -> bool {
        self.colour(node) == Colour::Red
    }

    pub fn set_colour(&mut self, node: NodeId, colour: Colour) {
        // The sentinel is black for good.
        if !node.is_nil() {
            self.links[node.0].colour = colour;
        }
    }

    pub fn set_parent(&mut self, node: NodeId, parent: NodeId) {
        if !node.is_nil() {
            self.links[node.0].parent = parent;
        }
    }

    /// Points `parent`'s `dir` slot at `child`. On the sentinel only the right slot, the root
    /// anchor, is ever written.
    pub fn set_child(&mut self, parent: NodeId, dir: Dir, child: NodeId) {
        debug_assert!(!parent.is_nil() || dir == Dir::Right);
        *self.links[parent.0].child_mut(dir) = child;
    }

    /// The side of its parent that `node` hangs from. The root hangs from the sentinel's right.
    pub fn side_of(&self, node: NodeId) -> Dir {
        let parent = self.parent(node);
        if !parent.is_nil() && self.left(parent) == node {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    /// Hangs the detached `node` from `parent`'s empty `dir` slot.
    pub fn attach(&mut self, parent: NodeId, dir: Dir, node: NodeId) {
        debug_assert!(self.child(parent, dir).is_nil());
        self.set_child(parent, dir, node);
        self.links[node.0].parent = parent;
    }

    pub fn is_occupied(&self, node: NodeId) -> bool {
        matches!(self.entries.get(node.0), Some(Some(_)))
    }

    pub fn entry(&self, node: NodeId) -> Option<&(K, V)> {
        self.entries.get(node.0)?.as_ref()
    }

    pub fn entry_mut(&mut self, node: NodeId) -> Option<&mut (K, V)> {
        self.entries.get_mut(node.0)?.as_mut()
    }

    /// Key of a node known to be linked into the tree.
    pub fn key(&self, node: NodeId) -> &K {
        match &self.entries[node.0] {
            Some((key, _)) => key,
            None => unreachable!("vacant slot {:?} reached through tree links", node),
        }
    }

    pub fn value_mut(&mut self, node: NodeId) -> &mut V {
        match &mut self.entries[node.0] {
            Some((_, value)) => value,
            None => unreachable!("vacant slot {:?} reached through tree links", node),
        }
    }

    pub fn leftmost(&self, node: NodeId) -> NodeId {
        leftmost(&self.links, node)
    }

    pub fn rightmost(&self, node: NodeId) -> NodeId {
        rightmost(&self.links, node)
    }

    pub fn successor(&self, node: NodeId) -> NodeId {
        successor(&self.links, node)
    }

    pub fn predecessor(&self, node: NodeId) -> NodeId {
        predecessor(&self.links, node)
    }

    /// Makes sure the next `alloc` will not need to grow the arena.
    pub fn try_reserve(&mut self) -> Result<(), TryReserveError> {
        if !self.free.is_nil() {
            return Ok(());
        }
        self.links.try_reserve(1)?;
        self.entries.try_reserve(1)
    }

    /// Creates a red, detached node holding `key` and `value`.
    pub fn alloc(&mut self, key: K, value: V) -> NodeId {
        if self.free.is_nil() {
            let node = NodeId(self.links.len());
            self.links.push(Links::detached(Colour::Red));
            self.entries.push(Some((key, value)));
            node
        } else {
            let node = self.free;
            self.free = self.links[node.0].right;
            self.links[node.0] = Links::detached(Colour::Red);
            self.entries[node.0] = Some((key, value));
            node
        }
    }

    /// Returns a node that has already been unlinked from the tree to the free chain.
    pub fn release(&mut self, node: NodeId) -> (K, V) {
        debug_assert!(!node.is_nil());
        let entry = match self.entries[node.0].take() {
            Some(entry) => entry,
            None => unreachable!("slot {:?} released twice", node),
        };
        self.links[node.0] = Links::detached(Colour::Black);
        self.links[node.0].right = self.free;
        self.free = node;
        entry
    }

    pub fn clear(&mut self) {
        self.links.truncate(1);
        self.entries.truncate(1);
        self.links[NIL.0] = Links::detached(Colour::Black);
        self.free = NIL;
    }

    /// Number of slots in the arena, the sentinel and released slots included.
    #[cfg(test)]
    pub fn slot_count(&self) -> usize {
        self.links.len()
    }

    pub fn into_parts(self) -> (Vec<Links>, Vec<Option<(K, V)>>) {
        (self.links, self.entries)
    }

    pub fn parts(&self) -> (&[Links], &[Option<(K, V)>]) {
        (&self.links, &self.entries)
    }

    pub fn parts_mut(&mut self) -> (&[Links], &mut [Option<(K, V)>]) {
        (&self.links, &mut self.entries)
    }

    /// Rotates the subtree rooted at `top` towards `dir`: the child on the opposite side takes
    /// `top`'s place, `top` becomes its `dir` child and the riser's inner subtree moves across.
    /// Colours are left alone. Returns the new subtree root.
    pub fn rotate(&mut self, top: NodeId, dir: Dir) -> NodeId {
        let riser = self.child(top, !dir);
        debug_assert!(!riser.is_nil());
        let inner = self.child(riser, dir);
        let parent = self.parent(top);
        let side = self.side_of(top);

        self.set_child(top, !dir, inner);
        self.set_parent(inner, top);

        self.set_child(riser, dir, top);
        self.links[top.0].parent = riser;

        self.links[riser.0].parent = parent;
        self.set_child(parent, side, riser);

        riser
    }

    /// Exchanges the structural positions of `node` and `desc`, a strict descendant of `node`.
    /// Links and colours move; entries stay in their slots, so handles to either entry remain
    /// valid.
    pub fn swap_with_descendant(&mut self, node: NodeId, desc: NodeId) {
        debug_assert!(!node.is_nil() && !desc.is_nil() && node != desc);

        let a = self.links[node.0];
        let b = self.links[desc.0];
        let a_side = self.side_of(node);
        let b_side = self.side_of(desc);

        // Redirect the neighbours of each node to the other one.
        for child in [a.left, a.right] {
            if child != desc {
                self.set_parent(child, desc);
            }
        }
        self.set_child(a.parent, a_side, desc);

        for child in [b.left, b.right] {
            self.set_parent(child, node);
        }
        if b.parent != node {
            self.set_child(b.parent, b_side, node);
        }

        // Exchange the link records, turning references to each other around.
        let flip = |id: NodeId| {
            if id == node {
                desc
            } else if id == desc {
                node
            } else {
                id
            }
        };
        self.links[desc.0] = Links {
            parent: flip(a.parent),
            left: flip(a.left),
            right: flip(a.right),
            colour: a.colour,
        };
        self.links[node.0] = Links {
            parent: flip(b.parent),
            left: flip(b.left),
            right: flip(b.right),
            colour: b.colour,
        };
    }
}
