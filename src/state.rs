use crate::ItemKey;

/// A lightweight, serializable snapshot of a list's scroll offset and selection.
///
/// Selection is stored by key so that a snapshot survives reconstruction of the data source.
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewState<K = ItemKey> {
    pub scroll_offset: f32,
    pub selected_keys: Vec<K>,
}

/// [`ViewState`] plus the expand-set of a tree.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeViewState<K = ItemKey> {
    pub view: ViewState<K>,
    pub expanded: Vec<K>,
}
