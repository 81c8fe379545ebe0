//! Iterators over the entries of an [`RbTreeMap`](crate::RbTreeMap).
//!
//! All of them walk the tree links in order, one successor (or predecessor) step at a time;
//! no stack of pending nodes is kept.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::node::{predecessor, successor, Links, NodeId, NodeStore, NIL};

/// An iterator over a map's entries, in key order.
pub struct Iter<'a, K: 'a, V: 'a> {
    links: &'a [Links],
    entries: &'a [Option<(K, V)>],
    front: NodeId,
    back: NodeId,
    length: usize,
}

impl<'a, K: 'a, V: 'a> Iter<'a, K, V> {
    pub(crate) fn new(store: &'a NodeStore<K, V>, length: usize) -> Self {
        let (links, entries) = store.parts();
        Iter {
            links,
            entries,
            front: store.leftmost(store.root()),
            back: store.rightmost(store.root()),
            length,
        }
    }
}

impl<'a, K: 'a, V: 'a> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.length == 0 {
            return None;
        }
        let node = self.front;
        self.front = successor(self.links, node);
        self.length -= 1;
        let entries = self.entries;
        entries[node.index()].as_ref().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length, Some(self.length))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.length == 0 {
            return None;
        }
        let node = self.back;
        self.back = predecessor(self.links, node);
        self.length -= 1;
        let entries = self.entries;
        entries[node.index()].as_ref().map(|(k, v)| (k, v))
    }
}

impl<'a, K: 'a, V: 'a> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K: 'a, V: 'a> FusedIterator for Iter<'a, K, V> {}

/// An iterator over a map's entries with mutable access to the values, in key order.
pub struct IterMut<'a, K: 'a, V: 'a> {
    links: &'a [Links],
    entries: *mut Option<(K, V)>,
    front: NodeId,
    back: NodeId,
    length: usize,
    _marker: PhantomData<&'a mut (K, V)>,
}

impl<'a, K: 'a, V: 'a> IterMut<'a, K, V> {
    pub(crate) fn new(store: &'a mut NodeStore<K, V>, length: usize) -> Self {
        let front = store.leftmost(store.root());
        let back = store.rightmost(store.root());
        let (links, entries) = store.parts_mut();
        IterMut {
            links,
            entries: entries.as_mut_ptr(),
            front,
            back,
            length,
            _marker: PhantomData,
        }
    }

    fn take(&mut self, node: NodeId) -> Option<(&'a K, &'a mut V)> {
        // SAFETY: `node` indexes a live slot of the entry vector, which the iterator borrows
        // mutably for 'a. The length counter stops the walk before any slot comes up twice, so
        // the returned references never alias.
        let entry = unsafe { &mut *self.entries.add(node.index()) };
        entry.as_mut().map(|(k, v)| (&*k, v))
    }
}

impl<'a, K: 'a, V: 'a> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        if self.length == 0 {
            return None;
        }
        let node = self.front;
        self.front = successor(self.links, node);
        self.length -= 1;
        self.take(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length, Some(self.length))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
        if self.length == 0 {
            return None;
        }
        let node = self.back;
        self.back = predecessor(self.links, node);
        self.length -= 1;
        self.take(node)
    }
}

impl<'a, K: 'a, V: 'a> ExactSizeIterator for IterMut<'a, K, V> {}

impl<'a, K: 'a, V: 'a> FusedIterator for IterMut<'a, K, V> {}

/// An owning iterator over a map's entries, in key order.
pub struct IntoIter<K, V> {
    links: Vec<Links>,
    entries: Vec<Option<(K, V)>>,
    front: NodeId,
    back: NodeId,
    length: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(store: NodeStore<K, V>, length: usize) -> Self {
        let front = store.leftmost(store.root());
        let back = store.rightmost(store.root());
        let (links, entries) = store.into_parts();
        IntoIter {
            links,
            entries,
            front,
            back,
            length,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        if self.length == 0 {
            return None;
        }
        let node = self.front;
        // Links are left intact, so the walk can continue past a taken entry.
        self.front = successor(&self.links, node);
        self.length -= 1;
        self.entries[node.index()].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length, Some(self.length))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        if self.length == 0 {
            return None;
        }
        let node = self.back;
        self.back = predecessor(&self.links, node);
        self.length -= 1;
        self.entries[node.index()].take()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An iterator over the entries between two positions of a map: the first inclusive, the last
/// exclusive.
pub struct Range<'a, K: 'a, V: 'a> {
    links: &'a [Links],
    entries: &'a [Option<(K, V)>],
    front: NodeId,
    back: NodeId,
}

impl<'a, K: 'a, V: 'a> Range<'a, K, V> {
    /// A bound whose entry is gone stands for the end position.
    pub(crate) fn new(store: &'a NodeStore<K, V>, front: NodeId, back: NodeId) -> Self {
        let live = |node: NodeId| if store.is_occupied(node) { node } else { NIL };
        let (links, entries) = store.parts();
        Range {
            links,
            entries,
            front: live(front),
            back: live(back),
        }
    }
}

impl<'a, K: 'a, V: 'a> Clone for Range<'a, K, V> {
    fn clone(&self) -> Self {
        Range { ..*self }
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.front == self.back || self.front.is_nil() {
            return None;
        }
        let node = self.front;
        self.front = successor(self.links, node);
        let entries = self.entries;
        entries[node.index()].as_ref().map(|(k, v)| (k, v))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.front == self.back {
            return None;
        }
        self.back = predecessor(self.links, self.back);
        if self.back.is_nil() {
            self.front = self.back;
            return None;
        }
        let entries = self.entries;
        entries[self.back.index()].as_ref().map(|(k, v)| (k, v))
    }
}

impl<'a, K: 'a, V: 'a> FusedIterator for Range<'a, K, V> {}

/// An iterator over a map's keys, in order.
pub struct Keys<'a, K: 'a, V: 'a> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K: 'a, V: 'a> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<'a, K: 'a, V: 'a> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K: 'a, V: 'a> FusedIterator for Keys<'a, K, V> {}

/// An iterator over a map's values, in key order.
pub struct Values<'a, K: 'a, V: 'a> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K: 'a, V: 'a> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<'a, K: 'a, V: 'a> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K: 'a, V: 'a> FusedIterator for Values<'a, K, V> {}

/// An iterator over mutable references to a map's values, in key order.
pub struct ValuesMut<'a, K: 'a, V: 'a> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K: 'a, V: 'a> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a mut V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<'a, K: 'a, V: 'a> ExactSizeIterator for ValuesMut<'a, K, V> {}

impl<'a, K: 'a, V: 'a> FusedIterator for ValuesMut<'a, K, V> {}
