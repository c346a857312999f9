//! Selection state kept by key, independent of pool slots.
//!
//! Keys are the persisted view; indexes are derived and rebuilt whenever the data source
//! changes. Both are stored in selection order and mutated together, so
//! `keys()[i]` is always the key of the item at `indices()[i]`.

use crate::key::{ItemKeyBound, KeySet};

#[derive(Clone, Debug)]
pub struct Selection<K> {
    keys: Vec<K>,
    indices: Vec<usize>,
    lookup: KeySet<K>,
    /// Direction of the last range: `true` when the terminal was above the origin.
    range_up: bool,
    /// Terminal of the last selection gesture; keyboard navigation moves from here.
    cursor: Option<usize>,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            indices: Vec::new(),
            lookup: KeySet::default(),
            range_up: false,
            cursor: None,
        }
    }
}

impl<K: ItemKeyBound> Selection<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Selected keys in selection order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Selected indexes in selection order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.lookup.contains(key)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Removes everything. Returns `false` when the selection was already empty.
    pub(crate) fn clear(&mut self) -> bool {
        self.cursor = None;
        self.range_up = false;
        if self.keys.is_empty() {
            return false;
        }
        self.keys.clear();
        self.indices.clear();
        self.lookup.clear();
        true
    }

    /// Adds one item. Returns `false` when the key was already selected.
    pub(crate) fn insert(&mut self, index: usize, key: K) -> bool {
        self.cursor = Some(index);
        if !self.lookup.insert(key.clone()) {
            return false;
        }
        self.keys.push(key);
        self.indices.push(index);
        true
    }

    /// Removes the item at `index`. Returns `false` when it was not selected.
    pub(crate) fn remove_index(&mut self, index: usize) -> bool {
        let Some(pos) = self.indices.iter().position(|&i| i == index) else {
            return false;
        };
        self.indices.remove(pos);
        let key = self.keys.remove(pos);
        self.lookup.remove(&key);
        if self.cursor == Some(index) {
            self.cursor = self.indices.last().copied();
        }
        true
    }

    /// Flips membership of one item. Always changes the selection.
    pub(crate) fn toggle(&mut self, index: usize, key: K) {
        if self.lookup.contains(&key) {
            self.remove_index(index);
            self.cursor = Some(index);
        } else {
            self.insert(index, key);
        }
    }

    /// The fixed end of a shift-extension: the most extreme selected index opposite to the
    /// direction of the last range.
    pub fn range_origin(&self) -> Option<usize> {
        if self.range_up {
            self.indices.iter().copied().max()
        } else {
            self.indices.iter().copied().min()
        }
    }

    /// Replaces the selection with the inclusive span between `origin` and `terminal`.
    ///
    /// Indexes for which `key_for` yields nothing are skipped.
    pub(crate) fn select_range(
        &mut self,
        origin: usize,
        terminal: usize,
        mut key_for: impl FnMut(usize) -> Option<K>,
    ) {
        self.clear();
        let (lo, hi) = if origin <= terminal {
            (origin, terminal)
        } else {
            (terminal, origin)
        };
        for index in lo..=hi {
            if let Some(key) = key_for(index) {
                self.insert(index, key);
            }
        }
        self.range_up = terminal < origin;
        self.cursor = Some(terminal);
    }

    /// Re-derives indexes from keys after the data source changed.
    ///
    /// Keys that no longer resolve are dropped. Returns `true` when membership changed.
    pub(crate) fn rebuild(&mut self, mut index_of: impl FnMut(&K) -> Option<usize>) -> bool {
        let cursor_key = self
            .cursor
            .and_then(|c| self.indices.iter().position(|&i| i == c))
            .map(|pos| self.keys[pos].clone());

        let before = self.keys.len();
        let mut keys = Vec::with_capacity(before);
        let mut indices = Vec::with_capacity(before);
        for key in self.keys.drain(..) {
            if let Some(index) = index_of(&key) {
                keys.push(key);
                indices.push(index);
            } else {
                self.lookup.remove(&key);
            }
        }
        self.keys = keys;
        self.indices = indices;

        self.cursor = cursor_key
            .and_then(|k| index_of(&k))
            .or_else(|| self.indices.last().copied());
        self.keys.len() != before
    }
}
