//! Tree → flat sequence projection driven by an expand-set.
//!
//! The flattened sequence is an ordinary [`ItemSource`], so a tree is windowed and recycled
//! exactly like a flat list. Indentation is left to the bind callback via
//! [`FlatNode::depth`].

use std::sync::Arc;

use crate::error::{ListError, Result};
use crate::key::{ItemKeyBound, KeySet};
use crate::{ItemKey, ItemSource};

/// A node of the source tree.
#[derive(Debug)]
pub struct TreeItem<T, K = ItemKey> {
    key: K,
    data: T,
    children: Vec<Arc<TreeItem<T, K>>>,
}

impl<T, K> TreeItem<T, K> {
    pub fn new(key: K, data: T) -> Self {
        Self {
            key,
            data,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeItem<T, K>>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn children(&self) -> &[Arc<TreeItem<T, K>>] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// One entry of the flattened sequence.
#[derive(Debug)]
pub struct FlatNode<T, K = ItemKey> {
    key: K,
    depth: usize,
    node: Arc<TreeItem<T, K>>,
}

impl<T, K: Clone> Clone for FlatNode<T, K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            depth: self.depth,
            node: Arc::clone(&self.node),
        }
    }
}

impl<T, K> FlatNode<T, K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Nesting level; roots are at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn node(&self) -> &Arc<TreeItem<T, K>> {
        &self.node
    }

    pub fn data(&self) -> &T {
        &self.node.data
    }
}

/// A forest plus its expand-set, kept flattened.
///
/// A node is present in [`FlatTree::nodes`] iff every one of its ancestors is expanded.
#[derive(Debug)]
pub struct FlatTree<T, K = ItemKey> {
    roots: Vec<Arc<TreeItem<T, K>>>,
    expanded: KeySet<K>,
    flat: Vec<FlatNode<T, K>>,
}

impl<T, K: ItemKeyBound> FlatTree<T, K> {
    /// Builds a fully collapsed tree.
    pub fn new(roots: impl IntoIterator<Item = TreeItem<T, K>>) -> Self {
        Self::from_shared(roots.into_iter().map(Arc::new).collect())
    }

    pub fn from_shared(roots: Vec<Arc<TreeItem<T, K>>>) -> Self {
        let mut tree = Self {
            roots,
            expanded: KeySet::default(),
            flat: Vec::new(),
        };
        tree.rebuild();
        tree
    }

    pub fn with_expanded(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.set_expanded(keys);
        self
    }

    /// Replaces the expand-set and re-flattens.
    pub fn set_expanded(&mut self, keys: impl IntoIterator<Item = K>) {
        self.expanded = keys.into_iter().collect();
        self.rebuild();
    }

    pub fn roots(&self) -> &[Arc<TreeItem<T, K>>] {
        &self.roots
    }

    /// Replaces the forest, keeping the expand-set.
    pub fn set_roots(&mut self, roots: Vec<Arc<TreeItem<T, K>>>) {
        self.roots = roots;
        self.rebuild();
    }

    pub fn nodes(&self) -> &[FlatNode<T, K>] {
        &self.flat
    }

    pub fn is_expanded(&self, key: &K) -> bool {
        self.expanded.contains(key)
    }

    pub fn expanded_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.expanded.iter()
    }

    pub fn position_of(&self, key: &K) -> Option<usize> {
        self.flat.iter().position(|n| &n.key == key)
    }

    /// Inserts the visible descendants of `key` right after it.
    ///
    /// Returns `Ok(false)` when the node is already expanded or has no children. A node that is
    /// currently hidden (collapsed ancestor) is only recorded in the expand-set.
    pub fn expand(&mut self, key: &K) -> Result<bool> {
        let Some(pos) = self.position_of(key) else {
            let node = self.find(key).ok_or(ListError::KeyNotFound)?;
            if !node.has_children() {
                return Ok(false);
            }
            return Ok(self.expanded.insert(key.clone()));
        };

        let entry = &self.flat[pos];
        if !entry.node.has_children() || self.expanded.contains(key) {
            return Ok(false);
        }
        let node = Arc::clone(&entry.node);
        let depth = entry.depth;
        self.expanded.insert(key.clone());

        let mut inserted = Vec::new();
        for child in node.children() {
            push_visible(&mut inserted, child, depth + 1, &self.expanded);
        }
        rdebug!(at = pos, rows = inserted.len(), "expand");
        self.flat.splice(pos + 1..pos + 1, inserted);
        Ok(true)
    }

    /// Removes the contiguous run of descendants following `key`.
    pub fn collapse(&mut self, key: &K) -> Result<bool> {
        let Some(pos) = self.position_of(key) else {
            if self.find(key).is_none() {
                return Err(ListError::KeyNotFound);
            }
            return Ok(self.expanded.remove(key));
        };
        if !self.expanded.remove(key) {
            return Ok(false);
        }

        let depth = self.flat[pos].depth;
        let end = self.flat[pos + 1..]
            .iter()
            .position(|n| n.depth <= depth)
            .map_or(self.flat.len(), |off| pos + 1 + off);
        rdebug!(at = pos, rows = end - pos - 1, "collapse");
        self.flat.drain(pos + 1..end);
        Ok(true)
    }

    /// Flips the expanded state. Returns whether the flattened sequence changed.
    pub fn toggle(&mut self, key: &K) -> Result<bool> {
        if self.expanded.contains(key) {
            self.collapse(key)
        } else {
            self.expand(key)
        }
    }

    pub fn expand_all(&mut self) {
        let mut stack: Vec<&Arc<TreeItem<T, K>>> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            if node.has_children() {
                self.expanded.insert(node.key.clone());
                stack.extend(node.children.iter());
            }
        }
        self.rebuild();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.rebuild();
    }

    /// Re-flattens from scratch; depths are recomputed from the tree.
    pub fn rebuild(&mut self) {
        self.flat.clear();
        for root in &self.roots {
            push_visible(&mut self.flat, root, 0, &self.expanded);
        }
    }

    fn find(&self, key: &K) -> Option<&Arc<TreeItem<T, K>>> {
        let mut stack: Vec<&Arc<TreeItem<T, K>>> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            if &node.key == key {
                return Some(node);
            }
            stack.extend(node.children.iter());
        }
        None
    }
}

fn push_visible<T, K: ItemKeyBound>(
    out: &mut Vec<FlatNode<T, K>>,
    node: &Arc<TreeItem<T, K>>,
    depth: usize,
    expanded: &KeySet<K>,
) {
    out.push(FlatNode {
        key: node.key.clone(),
        depth,
        node: Arc::clone(node),
    });
    if expanded.contains(&node.key) {
        for child in &node.children {
            push_visible(out, child, depth + 1, expanded);
        }
    }
}

impl<T, K> ItemSource for FlatTree<T, K> {
    type Item = FlatNode<T, K>;

    fn len(&self) -> usize {
        self.flat.len()
    }

    fn item(&self, index: usize) -> Option<&FlatNode<T, K>> {
        self.flat.get(index)
    }
}
