use compare::Compare;
use std::cmp::Ordering;

use crate::node::{Dir, NodeId, NodeStore, NIL};

use self::SearchResult::*;

pub enum SearchResult {
    Found(NodeId),
    /// The key is absent; it belongs in the empty `Dir` slot of the given parent.
    GoDown(NodeId, Dir),
}

pub fn search_tree<K, V, C, Q: ?Sized>(store: &NodeStore<K, V>, cmp: &C, key: &Q) -> SearchResult
where
    C: Compare<Q, K>,
{
    let mut parent = NIL;
    let mut dir = Dir::Right;
    let mut node = store.root();
    while !node.is_nil() {
        match cmp.compare(key, store.key(node)) {
            Ordering::Less => dir = Dir::Left,
            Ordering::Greater => dir = Dir::Right,
            Ordering::Equal => return Found(node),
        }
        parent = node;
        node = store.child(node, dir);
    }
    GoDown(parent, dir)
}

/// First node whose key is not ordered before `key`, or the sentinel.
pub fn lower_bound<K, V, C, Q: ?Sized>(store: &NodeStore<K, V>, cmp: &C, key: &Q) -> NodeId
where
    C: Compare<Q, K>,
{
    descend_bound(store, |node_key| cmp.compare(key, node_key) != Ordering::Greater)
}

/// First node whose key is ordered strictly after `key`, or the sentinel.
pub fn upper_bound<K, V, C, Q: ?Sized>(store: &NodeStore<K, V>, cmp: &C, key: &Q) -> NodeId
where
    C: Compare<Q, K>,
{
    descend_bound(store, |node_key| cmp.compare(key, node_key) == Ordering::Less)
}

// `is_candidate` must hold for a suffix of the in-order sequence; returns the first node of
// that suffix.
fn descend_bound<K, V, F>(store: &NodeStore<K, V>, is_candidate: F) -> NodeId
where
    F: Fn(&K) -> bool,
{
    let mut best = NIL;
    let mut node = store.root();
    while !node.is_nil() {
        if is_candidate(store.key(node)) {
            best = node;
            node = store.left(node);
        } else {
            node = store.right(node);
        }
    }
    best
}
