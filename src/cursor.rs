use compare::Compare;

use crate::map::{Position, RbTreeMap};

/// A cursor over an [`RbTreeMap`], pointing at an entry or at the end position.
///
/// Moving past either end lands on the end position; moving again from there wraps around to
/// the other end of the map.
pub struct Cursor<'a, K: 'a, V: 'a, C: Compare<K> + 'a> {
    map: &'a RbTreeMap<K, V, C>,
    position: Position,
}

impl<'a, K: 'a, V: 'a, C: Compare<K> + 'a> Clone for Cursor<'a, K, V, C> {
    fn clone(&self) -> Self {
        Cursor {
            map: self.map,
            position: self.position,
        }
    }
}

impl<'a, K: 'a, V: 'a, C: Compare<K> + 'a> Cursor<'a, K, V, C> {
    pub(crate) fn new(map: &'a RbTreeMap<K, V, C>, position: Position) -> Self {
        Cursor { map, position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, v)| v)
    }

    /// The entry under the cursor, or `None` at the end position.
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.map.key_value_at(self.position)
    }

    pub fn move_next(&mut self) {
        self.position = self.map.next_position(self.position);
    }

    pub fn move_prev(&mut self) {
        self.position = self.map.prev_position(self.position);
    }

    /// The entry `move_next` would land on, without moving.
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        self.map.key_value_at(self.map.next_position(self.position))
    }

    /// The entry `move_prev` would land on, without moving.
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        self.map.key_value_at(self.map.prev_position(self.position))
    }
}

/// A cursor over an [`RbTreeMap`] that can change values and remove entries.
pub struct CursorMut<'a, K: 'a, V: 'a, C: Compare<K> + 'a> {
    map: &'a mut RbTreeMap<K, V, C>,
    position: Position,
}

impl<'a, K: 'a, V: 'a, C: Compare<K> + 'a> CursorMut<'a, K, V, C> {
    pub(crate) fn new(map: &'a mut RbTreeMap<K, V, C>, position: Position) -> Self {
        CursorMut { map, position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn key(&self) -> Option<&K> {
        self.key_value().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&V> {
        self.key_value().map(|(_, v)| v)
    }

    pub fn key_value(&self) -> Option<(&K, &V)> {
        self.map.key_value_at(self.position)
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.map.value_mut_at(self.position)
    }

    pub fn move_next(&mut self) {
        self.position = self.map.next_position(self.position);
    }

    pub fn move_prev(&mut self) {
        self.position = self.map.prev_position(self.position);
    }

    pub fn peek_next(&self) -> Option<(&K, &V)> {
        self.map.key_value_at(self.map.next_position(self.position))
    }

    pub fn peek_prev(&self) -> Option<(&K, &V)> {
        self.map.key_value_at(self.map.prev_position(self.position))
    }

    /// Removes the entry under the cursor and moves on to the next one. Does nothing at the end
    /// position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RbTreeMap;
    ///
    /// let mut map: RbTreeMap<_, _> = (1..=5).map(|k| (k, ())).collect();
    /// let mut cursor = map.cursor_mut(map.find(&2));
    /// while cursor.key().map_or(false, |&k| k < 4) {
    ///     cursor.remove_current();
    /// }
    /// assert_eq!(cursor.key(), Some(&4));
    /// assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [1, 4, 5]);
    /// ```
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        if self.position.is_end() {
            return None;
        }
        let next = self.map.next_position(self.position);
        let entry = self.map.erase(self.position);
        self.position = next;
        entry
    }

    /// A read-only view of this cursor, borrowing it.
    pub fn as_cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self.map, self.position)
    }
}
