use compare::{Compare, Natural};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::Index;

use log::debug;

use crate::check::Violation;
use crate::cursor::{Cursor, CursorMut};
use crate::error::Error;
use crate::iter::{IntoIter, Iter, IterMut, Keys, Range, Values, ValuesMut};
use crate::node::{Dir, Links, NodeId, NodeStore, NIL};
use crate::search::{self, SearchResult::*};

/// An ordered map based on a red-black tree.
///
/// Every entry lives in its own node, and nodes never move once created: inserting or erasing
/// one entry leaves every other entry where it was. A [`Position`] obtained from the map
/// therefore keeps referring to the same entry until that entry is erased, which makes it
/// usable the way an iterator into a node-based C++ container is used: it can be stepped
/// forwards and backwards through the map, handed back to `erase`, and compared against
/// [`end`](RbTreeMap::end).
///
/// Keys are unique and ordered by the comparator `C`, which defaults to the keys' natural
/// order. Searches, insertions and removals take O(log n) comparisons; the tree is kept
/// balanced by the usual red-black colouring rules.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the comparator, changes while it is in the map. This is
/// normally only possible through `Cell`, `RefCell`, global state, I/O, or unsafe code.
pub struct RbTreeMap<K, V, C = Natural<K>>
where
    C: Compare<K>,
{
    store: NodeStore<K, V>,
    length: usize,
    cmp: C,
}

/// A stable reference to an entry of an [`RbTreeMap`], or to the map's end.
///
/// Positions are plain handles: they do not borrow the map, and they stay valid across
/// insertions and removals of other entries. A position to an erased entry is stale; using it
/// is a logic error that is not detected (it may refer to no entry, or to a later entry that
/// reused the node).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position(NodeId);

impl Position {
    /// Returns true if this is the past-the-end position.
    pub fn is_end(self) -> bool {
        self.0.is_nil()
    }
}

/// Orders `(key, value)` pairs by key alone, using the map's comparator.
#[derive(Clone, Copy, Debug)]
pub struct ValueCompare<C> {
    cmp: C,
}

impl<K, V, C> Compare<(K, V)> for ValueCompare<C>
where
    C: Compare<K>,
{
    fn compare(&self, l: &(K, V), r: &(K, V)) -> Ordering {
        self.cmp.compare(&l.0, &r.0)
    }
}

impl<K: Ord, V> RbTreeMap<K, V> {
    /// Makes a new empty map ordered by the keys' natural order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn new() -> Self {
        RbTreeMap::with_cmp(compare::natural())
    }
}

impl<K, V, C> RbTreeMap<K, V, C>
where
    C: Compare<K>,
{
    /// Makes a new empty map ordered by the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{natural, Compare};
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::with_cmp(natural().rev());
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, [2, 1]);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        RbTreeMap {
            store: NodeStore::new(),
            length: 0,
            cmp,
        }
    }

    /// Builds a map from a sequence of pairs with the given comparator. Later duplicates of a key
    /// are ignored.
    pub fn from_iter_with_cmp<I>(iter: I, cmp: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = RbTreeMap::with_cmp(cmp);
        map.extend(iter);
        map
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut a = RbTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The largest number of entries a map of this type could ever hold.
    pub fn max_size(&self) -> usize {
        let node = mem::size_of::<Links>() + mem::size_of::<Option<(K, V)>>();
        isize::MAX as usize / node.max(1) - 1
    }

    /// Returns a reference to the comparator ordering the keys.
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// Returns a comparator for `(key, value)` pairs that looks at the keys only.
    pub fn value_cmp(&self) -> ValueCompare<C>
    where
        C: Clone,
    {
        ValueCompare {
            cmp: self.cmp.clone(),
        }
    }

    /// Returns the position of the entry with the given key, or [`end`](RbTreeMap::end) if there
    /// is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.key_value_at(map.find(&1)), Some((&1, &"a")));
    /// assert_eq!(map.find(&2), map.end());
    /// ```
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Position
    where
        C: Compare<Q, K>,
    {
        match search::search_tree(&self.store, &self.cmp, key) {
            Found(node) => Position(node),
            GoDown(..) => self.end(),
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        C: Compare<Q, K>,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the key-value pair corresponding to the key.
    pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
    where
        C: Compare<Q, K>,
    {
        self.key_value_at(self.find(key))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        C: Compare<Q, K>,
    {
        let position = self.find(key);
        self.value_mut_at(position)
    }

    /// Returns true if the map contains a value for the specified key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        C: Compare<Q, K>,
    {
        !self.find(key).is_end()
    }

    /// Number of entries with the given key: 1 or 0, keys being unique.
    pub fn count<Q: ?Sized>(&self, key: &Q) -> usize
    where
        C: Compare<Q, K>,
    {
        self.contains_key(key) as usize
    }

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.key_value_at(self.begin())
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.key_value_at(self.prev_position(self.end()))
    }

    /// Inserts a key-value pair unless the key is already present.
    ///
    /// Returns the position of the entry with that key and whether it was newly inserted. An
    /// existing entry is left untouched, value included; `value` is dropped in that case. Use
    /// [`insert_or_assign`](RbTreeMap::insert_or_assign) to overwrite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// let (first, inserted) = map.insert(37, "a");
    /// assert!(inserted);
    ///
    /// let (again, inserted) = map.insert(37, "b");
    /// assert!(!inserted);
    /// assert_eq!(again, first);
    /// assert_eq!(map[&37], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        match search::search_tree(&self.store, &self.cmp, &key) {
            Found(node) => (Position(node), false),
            GoDown(parent, dir) => (Position(self.link_new(parent, dir, key, value)), true),
        }
    }

    /// Like [`insert`](RbTreeMap::insert), but reports allocation failure instead of aborting.
    /// The map is unchanged when an error is returned.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(Position, bool), Error> {
        match search::search_tree(&self.store, &self.cmp, &key) {
            Found(node) => Ok((Position(node), false)),
            GoDown(parent, dir) => {
                self.reserve_node()?;
                Ok((Position(self.link_new(parent, dir, key, value)), true))
            }
        }
    }

    /// Inserts with a placement hint. The hint is accepted for interface compatibility and
    /// ignored; the key is placed by a full search.
    pub fn insert_hint(&mut self, _hint: Position, key: K, value: V) -> Position {
        self.insert(key, value).0
    }

    /// Inserts a key-value pair, replacing the value of an existing entry with the same key.
    /// Returns the replaced value.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Option<V> {
        match search::search_tree(&self.store, &self.cmp, &key) {
            Found(node) => Some(mem::replace(self.store.value_mut(node), value)),
            GoDown(parent, dir) => {
                self.link_new(parent, dir, key, value);
                None
            }
        }
    }

    /// Returns the value for `key`, inserting `default()` first if the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let node = match search::search_tree(&self.store, &self.cmp, &key) {
            Found(node) => node,
            GoDown(parent, dir) => self.link_new(parent, dir, key, default()),
        };
        self.store.value_mut(node)
    }

    /// Returns the value for `key`, inserting `V::default()` first if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut counts: RbTreeMap<&str, i32> = RbTreeMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts[&"a"], 2);
    /// assert_eq!(counts[&"b"], 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Like [`get_or_insert_with`](RbTreeMap::get_or_insert_with), but reports allocation
    /// failure instead of aborting.
    pub fn try_get_or_insert_with<F>(&mut self, key: K, default: F) -> Result<&mut V, Error>
    where
        F: FnOnce() -> V,
    {
        let node = match search::search_tree(&self.store, &self.cmp, &key) {
            Found(node) => node,
            GoDown(parent, dir) => {
                self.reserve_node()?;
                self.link_new(parent, dir, key, default())
            }
        };
        Ok(self.store.value_mut(node))
    }

    fn reserve_node(&mut self) -> Result<(), Error> {
        self.store.try_reserve().map_err(|err| {
            debug!("node allocation failed with {} entries: {}", self.length, err);
            Error::Alloc(err)
        })
    }

    // Every search has finished by the time this runs, so a panicking comparator cannot leave
    // the tree half-linked.
    fn link_new(&mut self, parent: NodeId, dir: Dir, key: K, value: V) -> NodeId {
        let node = self.store.alloc(key, value);
        self.store.attach(parent, dir, node);
        self.store.insert_fixup(node);
        self.length += 1;
        node
    }

    /// Removes the entry at `position` and returns it. Returns `None` for the end position or a
    /// position whose entry is already gone.
    ///
    /// Only positions to the erased entry are invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map: RbTreeMap<_, _> = (1..=3).map(|k| (k, k * 10)).collect();
    /// let three = map.find(&3);
    /// assert_eq!(map.erase(map.find(&2)), Some((2, 20)));
    /// assert_eq!(map.key_value_at(three), Some((&3, &30)));
    /// assert_eq!(map.erase(map.end()), None);
    /// ```
    pub fn erase(&mut self, position: Position) -> Option<(K, V)> {
        if !self.store.is_occupied(position.0) {
            return None;
        }
        Some(self.unlink(position.0))
    }

    fn unlink(&mut self, node: NodeId) -> (K, V) {
        self.store.detach(node);
        self.length -= 1;
        self.store.release(node)
    }

    /// Removes the entry with the given key, returning how many entries were removed (0 or 1).
    pub fn erase_key<Q: ?Sized>(&mut self, key: &Q) -> usize
    where
        C: Compare<Q, K>,
    {
        self.remove_entry(key).is_some() as usize
    }

    /// Removes a key from the map, returning the value at the key if the key was previously in
    /// the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
    where
        C: Compare<Q, K>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value.
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
    where
        C: Compare<Q, K>,
    {
        let position = self.find(key);
        self.erase(position)
    }

    /// Removes every entry from `first` up to, but not including, `last`. Returns the number of
    /// entries removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map: RbTreeMap<_, _> = (0..10).map(|k| (k, ())).collect();
    /// let removed = map.erase_range(map.lower_bound(&3), map.lower_bound(&7));
    /// assert_eq!(removed, 4);
    /// assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [0, 1, 2, 7, 8, 9]);
    /// ```
    pub fn erase_range(&mut self, first: Position, last: Position) -> usize {
        let mut removed = 0;
        let mut node = first.0;
        while node != last.0 && self.store.is_occupied(node) {
            // Step past the entry before it goes; its successor's node is not disturbed.
            let next = self.store.successor(node);
            self.unlink(node);
            removed += 1;
            node = next;
        }
        debug!("erased {} entries by range", removed);
        removed
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.erase(self.begin())
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.erase(self.prev_position(self.end()))
    }

    /// Keeps only the entries for which `f` returns true, visiting them in key order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut node = self.store.successor(NIL);
        while !node.is_nil() {
            let next = self.store.successor(node);
            let keep = match self.store.entry_mut(node) {
                Some((k, v)) => f(&*k, v),
                None => true,
            };
            if !keep {
                self.unlink(node);
            }
            node = next;
        }
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut a = RbTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing {} entries", self.length);
        self.store.clear();
        self.length = 0;
    }

    /// Exchanges the contents and comparators of two maps. Positions follow their entries into
    /// the other map.
    pub fn swap(&mut self, other: &mut Self) {
        debug!("swapping maps of {} and {} entries", self.length, other.length);
        mem::swap(self, other);
    }

    /// Position of the entry with the smallest key, or the end position if the map is empty.
    pub fn begin(&self) -> Position {
        Position(self.store.leftmost(self.store.root()))
    }

    /// The past-the-end position.
    pub fn end(&self) -> Position {
        Position(NIL)
    }

    /// The position after `position` in key order. Stepping past the largest entry gives the end
    /// position, and stepping from the end wraps around to [`begin`](RbTreeMap::begin).
    pub fn next_position(&self, position: Position) -> Position {
        if !position.is_end() && !self.store.is_occupied(position.0) {
            return self.end();
        }
        Position(self.store.successor(position.0))
    }

    /// The position before `position` in key order. Stepping back from the end gives the largest
    /// entry, and stepping back from the smallest entry gives the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let map: RbTreeMap<_, _> = [(1, "a"), (2, "b")].into_iter().collect();
    /// let last = map.prev_position(map.end());
    /// assert_eq!(map.key_value_at(last), Some((&2, &"b")));
    /// assert_eq!(map.prev_position(map.begin()), map.end());
    /// ```
    pub fn prev_position(&self, position: Position) -> Position {
        if !position.is_end() && !self.store.is_occupied(position.0) {
            return self.end();
        }
        Position(self.store.predecessor(position.0))
    }

    /// The entry at `position`, or `None` at the end position.
    pub fn key_value_at(&self, position: Position) -> Option<(&K, &V)> {
        self.store.entry(position.0).map(|(k, v)| (k, v))
    }

    /// Mutable access to the value at `position`, or `None` at the end position.
    pub fn value_mut_at(&mut self, position: Position) -> Option<&mut V> {
        self.store.entry_mut(position.0).map(|(_, v)| v)
    }

    /// Position of the first entry whose key is not ordered before `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let map: RbTreeMap<_, _> = [(3, ()), (5, ()), (7, ())].into_iter().collect();
    /// assert_eq!(map.lower_bound(&5), map.find(&5));
    /// assert_eq!(map.lower_bound(&6), map.find(&7));
    /// assert_eq!(map.lower_bound(&8), map.end());
    /// ```
    pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Position
    where
        C: Compare<Q, K>,
    {
        Position(search::lower_bound(&self.store, &self.cmp, key))
    }

    /// Position of the first entry whose key is ordered after `key`.
    pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Position
    where
        C: Compare<Q, K>,
    {
        Position(search::upper_bound(&self.store, &self.cmp, key))
    }

    /// The half-open span of entries whose key is equivalent to `key`: `(lower_bound(key),
    /// upper_bound(key))`. It holds at most one entry.
    pub fn equal_range<Q: ?Sized>(&self, key: &Q) -> (Position, Position)
    where
        C: Compare<Q, K>,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// A read-only cursor starting at `position`.
    pub fn cursor(&self, position: Position) -> Cursor<'_, K, V, C> {
        Cursor::new(self, position)
    }

    /// A cursor starting at `position` that can modify values and remove entries.
    pub fn cursor_mut(&mut self, position: Position) -> CursorMut<'_, K, V, C> {
        CursorMut::new(self, position)
    }

    /// A read-only cursor at the smallest entry.
    pub fn cursor_front(&self) -> Cursor<'_, K, V, C> {
        self.cursor(self.begin())
    }

    /// A read-only cursor at the largest entry.
    pub fn cursor_back(&self) -> Cursor<'_, K, V, C> {
        self.cursor(self.prev_position(self.end()))
    }

    /// Gets an iterator over the entries of the map, in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{}: {}", key, value);
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// let (last_key, _) = map.iter().next_back().unwrap();
    /// assert_eq!(*last_key, 3);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.store, self.length)
    }

    /// Gets an iterator over the entries of the map with mutable values, in key order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.store, self.length)
    }

    /// Gets an iterator over the keys of the map, in order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets an iterator over mutable references to the values of the map, in key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Iterates from `first` up to, but not including, `last`. `first` must not come after
    /// `last`. A position whose entry has been erased counts as the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let map: RbTreeMap<_, _> = (0..10).map(|k| (k, k)).collect();
    /// let (lo, hi) = (map.lower_bound(&2), map.upper_bound(&5));
    /// let keys: Vec<_> = map.range(lo, hi).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [2, 3, 4, 5]);
    /// ```
    pub fn range(&self, first: Position, last: Position) -> Range<'_, K, V> {
        Range::new(&self.store, first.0, last.0)
    }

    /// Checks the red-black invariants and the bookkeeping of the map.
    ///
    /// A correct map always passes; this exists for tests and debugging.
    pub fn validate(&self) -> Result<(), Violation> {
        self.store.check(&self.cmp, self.length).map(|_| ())
    }
}

impl<K: Debug, V: Debug, C: Compare<K>> RbTreeMap<K, V, C> {
    /// Logs the shape of the tree, one node per line, at debug level.
    pub fn dump(&self) {
        fn dump_node<K: Debug, V: Debug>(store: &NodeStore<K, V>, node: NodeId, depth: usize) {
            if node.is_nil() {
                return;
            }
            dump_node(store, store.right(node), depth + 1);
            if let Some((k, v)) = store.entry(node) {
                debug!(
                    "{:indent$}{:?} {:?}: {:?}",
                    "",
                    store.colour(node),
                    k,
                    v,
                    indent = depth * 2
                );
            }
            dump_node(store, store.left(node), depth + 1);
        }
        debug!("tree of {} entries:", self.length);
        dump_node(&self.store, self.store.root(), 0);
    }
}

impl<K, V, C> Clone for RbTreeMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Compare<K> + Clone,
{
    fn clone(&self) -> Self {
        let pairs = self.iter().map(|(k, v)| (k.clone(), v.clone()));
        RbTreeMap::from_iter_with_cmp(pairs, self.cmp.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.cmp = source.cmp.clone();
        self.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

impl<K, V, C> Default for RbTreeMap<K, V, C>
where
    C: Compare<K> + Default,
{
    fn default() -> Self {
        RbTreeMap::with_cmp(C::default())
    }
}

impl<K: Debug, V: Debug, C: Compare<K>> Debug for RbTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C: Compare<K>> PartialEq for RbTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C: Compare<K>> Eq for RbTreeMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C: Compare<K>> PartialOrd for RbTreeMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, C: Compare<K>> Ord for RbTreeMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Hash, V: Hash, C: Compare<K>> Hash for RbTreeMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

impl<K, V, C> FromIterator<(K, V)> for RbTreeMap<K, V, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RbTreeMap::from_iter_with_cmp(iter, C::default())
    }
}

/// Inserts each pair in turn; pairs whose key is already present are dropped.
impl<K, V, C> Extend<(K, V)> for RbTreeMap<K, V, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C> Extend<(&'a K, &'a V)> for RbTreeMap<K, V, C>
where
    K: Copy + 'a,
    V: Copy + 'a,
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&k, &v)| (k, v)));
    }
}

impl<K, V, C, Q: ?Sized> Index<&Q> for RbTreeMap<K, V, C>
where
    C: Compare<K> + Compare<Q, K>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no entry found for key"),
        }
    }
}

impl<'a, K: 'a, V: 'a, C: Compare<K>> IntoIterator for &'a RbTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K: 'a, V: 'a, C: Compare<K>> IntoIterator for &'a mut RbTreeMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C: Compare<K>> IntoIterator for RbTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.store, self.length)
    }
}
