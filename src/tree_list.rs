//! Hierarchical list: a [`FlatTree`] windowed by a [`RecyclingList`].

use std::sync::Arc;

use crate::error::{ListError, Result};
use crate::key::ItemKeyBound;
use crate::tree::{FlatNode, FlatTree, TreeItem};
use crate::{ItemKey, ListOptions, RecyclingList, TreeViewState};

fn node_key<T, K: Clone>(node: &FlatNode<T, K>, _index: usize) -> K {
    node.key().clone()
}

impl<T: 'static, R, K: Clone + 'static> ListOptions<FlatNode<T, K>, R, K> {
    /// Options keyed by tree node key, so selection and focus follow nodes across
    /// expand/collapse.
    pub fn for_tree() -> Self {
        Self::new_with_key(node_key::<T, K>)
    }
}

/// A recycling list over the visible nodes of a tree.
///
/// Rows are bound with [`FlatNode`]s; indentation is up to the bind callback via
/// [`FlatNode::depth`].
#[derive(Debug)]
pub struct TreeList<T, R, K = ItemKey> {
    list: RecyclingList<FlatTree<T, K>, R, K>,
}

impl<T, R, K: ItemKeyBound> TreeList<T, R, K> {
    pub fn new(options: ListOptions<FlatNode<T, K>, R, K>, tree: FlatTree<T, K>) -> Self {
        Self {
            list: RecyclingList::with_source(options, tree),
        }
    }

    pub fn list(&self) -> &RecyclingList<FlatTree<T, K>, R, K> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut RecyclingList<FlatTree<T, K>, R, K> {
        &mut self.list
    }

    pub fn into_list(self) -> RecyclingList<FlatTree<T, K>, R, K> {
        self.list
    }

    pub fn tree(&self) -> Option<&FlatTree<T, K>> {
        self.list.source()
    }

    /// Expands the node with `key`. Returns whether the expand-set changed.
    ///
    /// Expanding a leaf, or an already expanded node, is a no-op returning `Ok(false)`.
    pub fn expand(&mut self, key: &K) -> Result<bool> {
        self.edit(|tree| tree.expand(key))
    }

    /// Collapses the node with `key`. Selected descendants that become hidden are dropped
    /// from the selection.
    pub fn collapse(&mut self, key: &K) -> Result<bool> {
        self.edit(|tree| tree.collapse(key))
    }

    pub fn toggle(&mut self, key: &K) -> Result<bool> {
        self.edit(|tree| tree.toggle(key))
    }

    pub fn expand_all(&mut self) {
        self.list.edit_source(|tree| {
            tree.expand_all();
            ((), true)
        });
    }

    pub fn collapse_all(&mut self) {
        self.list.edit_source(|tree| {
            tree.collapse_all();
            ((), true)
        });
    }

    pub fn is_expanded(&self, key: &K) -> bool {
        self.tree().is_some_and(|tree| tree.is_expanded(key))
    }

    /// Nesting level of the visible node at `index`.
    pub fn depth(&self, index: usize) -> Option<usize> {
        self.list.item(index).map(FlatNode::depth)
    }

    /// Replaces the forest, keeping the expand-set, selection and focus by key.
    pub fn set_roots(&mut self, roots: Vec<Arc<TreeItem<T, K>>>) {
        self.list.edit_source(|tree| {
            tree.set_roots(roots);
            ((), true)
        });
    }

    pub fn view_state(&self) -> TreeViewState<K> {
        TreeViewState {
            view: self.list.view_state(),
            expanded: self
                .tree()
                .map(|tree| tree.expanded_keys().cloned().collect())
                .unwrap_or_default(),
        }
    }

    /// Restores the expand-set first so that selected keys inside expanded subtrees resolve.
    pub fn restore_view_state(&mut self, state: &TreeViewState<K>) {
        let expanded = state.expanded.iter().cloned();
        self.list.batch_update(|list| {
            list.edit_source(|tree| {
                tree.set_expanded(expanded);
                ((), true)
            });
            list.restore_view_state(&state.view);
        });
    }

    fn edit(&mut self, f: impl FnOnce(&mut FlatTree<T, K>) -> Result<bool>) -> Result<bool> {
        self.list
            .edit_source(|tree| {
                let out = f(tree);
                let changed = matches!(out, Ok(true));
                (out, changed)
            })
            .unwrap_or(Err(ListError::KeyNotFound))
    }
}
