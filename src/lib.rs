//! A headless list virtualization and row recycling engine.
//!
//! A small, bounded pool of caller-created rows represents an arbitrarily large data source.
//! As the host scrolls, the pool is rotated rather than rebuilt: a row keeps its identity while
//! its binding moves to a new index, and rows whose index did not change are never rebound.
//!
//! On top of the windowing core the crate tracks selection by stable key (single, multiple and
//! range policies), maps keyboard intents to selection changes, keeps focus attached to a data
//! index across recycling, and flattens expandable trees into the same windowing mechanism.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a row factory plus bind/unbind callbacks
//! - viewport size and scroll offset
//! - key events translated into [`NavIntent`]s (or [`Key`]s)
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod focus;
mod key;
mod list;
mod navigation;
mod options;
mod pool;
mod selection;
mod source;
mod state;
mod tree;
mod tree_list;
mod types;
mod viewport;


pub use error::{ListError, Result};
pub use focus::ChildPath;
pub use list::RecyclingList;
pub use navigation::{Key, NavAction, NavContext, NavIntent, intent_for_key, navigate};
pub use options::{
    BindRowCallback, FocusCallback, ItemKeyCallback, ItemsCallback, ListOptions,
    MakeRowCallback, StyleRowCallback, UnbindRowCallback,
};
pub use selection::Selection;
pub use source::ItemSource;
pub use state::{TreeViewState, ViewState};
pub use tree::{FlatNode, FlatTree, TreeItem};
pub use tree_list::TreeList;
pub use types::{Align, IndexRange, ItemKey, Modifiers, RowRef, RowState, SelectionType};
pub use viewport::{Viewport, WindowLayout, snap_row_height};

#[doc(hidden)]
pub use key::ItemKeyBound;
