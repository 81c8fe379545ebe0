//! An ordered map on a red-black tree, with stable positions.
//!
//! [`RbTreeMap`] keeps unique keys in comparator order and hands out [`Position`]s that survive
//! every insertion and every removal except that of their own entry.

// The tree is laid out as
//
// ```
// struct RbTreeMap<K, V> {
//     links: Vec<Links>,             // slot 0 is the sentinel
//     entries: Vec<Option<(K, V)>>,  // parallel to `links`
//     length: usize,
// }
//
// struct Links {
//     parent: NodeId,
//     left: NodeId,
//     right: NodeId,
//     colour: Colour,
// }
// ```
//
// The sentinel is black and stands in for every missing child; its right link is the root.
// An empty tree is a sentinel whose links all point back at itself.
// Nodes refer to each other by slot index, so there is no unsafety in the tree itself, and a
// node keeps its slot for as long as its entry lives.

mod check;
mod cursor;
mod error;
pub mod iter;
mod map;
mod node;
mod rebalance;
mod search;

pub use check::Violation;
pub use cursor::{Cursor, CursorMut};
pub use error::Error;
pub use iter::{IntoIter, Iter, IterMut, Keys, Range, Values, ValuesMut};
pub use map::{Position, RbTreeMap, ValueCompare};
