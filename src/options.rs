use std::sync::Arc;

use crate::focus::ChildPath;
use crate::{ItemKey, RowState, SelectionType};

/// Creates a structurally independent row. Called once per pool growth.
pub type MakeRowCallback<R> = Arc<dyn Fn() -> R + Send + Sync>;

/// Fills a row with the item at `index`.
pub type BindRowCallback<R, T> = Arc<dyn Fn(&mut R, usize, &T) + Send + Sync>;

/// Called with the previous index before a row's binding is discarded.
pub type UnbindRowCallback<R> = Arc<dyn Fn(&mut R, usize) + Send + Sync>;

/// Applies selection highlighting (and any other per-row presentation state).
pub type StyleRowCallback<R> = Arc<dyn Fn(&mut R, RowState) + Send + Sync>;

/// Moves keyboard focus to (or away from) the element at a child path inside a row.
pub type FocusCallback<R> = Arc<dyn Fn(&mut R, &ChildPath) + Send + Sync>;

/// Receives the currently selected items, in selection order.
pub type ItemsCallback<T> = Arc<dyn Fn(&[&T]) + Send + Sync>;

/// Maps an item (and its index) to a stable key.
pub type ItemKeyCallback<T, K> = Arc<dyn Fn(&T, usize) -> K + Send + Sync>;

/// Configuration for [`crate::RecyclingList`].
///
/// Cheap to clone: callbacks are stored in `Arc`s. Without `make_row` and `bind_row` the list
/// is considered unconfigured and rendering/selection operations are silent no-ops.
pub struct ListOptions<T, R, K = ItemKey> {
    /// Row height in logical pixels. Snapped to device pixels before any position math.
    pub row_height: f32,
    pub device_pixel_ratio: f32,
    /// Extra rows kept below the visible ones.
    pub overscan: usize,
    pub selection_type: SelectionType,

    pub make_row: Option<MakeRowCallback<R>>,
    pub bind_row: Option<BindRowCallback<R, T>>,
    pub unbind_row: Option<UnbindRowCallback<R>>,
    pub style_row: Option<StyleRowCallback<R>>,
    pub get_item_key: ItemKeyCallback<T, K>,

    pub apply_focus: Option<FocusCallback<R>>,
    pub blur_focus: Option<FocusCallback<R>>,

    /// Fired at most once per logical selection mutation.
    pub on_selection_changed: Option<ItemsCallback<T>>,
    /// Fired on submit and double-activation.
    pub on_items_chosen: Option<ItemsCallback<T>>,
}

impl<T, R, K> Clone for ListOptions<T, R, K> {
    fn clone(&self) -> Self {
        Self {
            row_height: self.row_height,
            device_pixel_ratio: self.device_pixel_ratio,
            overscan: self.overscan,
            selection_type: self.selection_type,
            make_row: self.make_row.clone(),
            bind_row: self.bind_row.clone(),
            unbind_row: self.unbind_row.clone(),
            style_row: self.style_row.clone(),
            get_item_key: Arc::clone(&self.get_item_key),
            apply_focus: self.apply_focus.clone(),
            blur_focus: self.blur_focus.clone(),
            on_selection_changed: self.on_selection_changed.clone(),
            on_items_chosen: self.on_items_chosen.clone(),
        }
    }
}

impl<T, R> ListOptions<T, R, ItemKey> {
    /// Creates options for a list keyed by index.
    ///
    /// With index keys the selection follows positions, not items: inserting or removing items
    /// shifts what is selected. Use [`ListOptions::new_with_key`] when the data source can be
    /// mutated and selection should follow identity.
    pub fn new() -> Self {
        Self::new_with_key(|_, i| i as u64)
    }
}

impl<T, R> Default for ListOptions<T, R, ItemKey> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R, K> ListOptions<T, R, K> {
    /// Creates options with a stable key function.
    ///
    /// Keys must be unique among the items of one data source; duplicates make selection
    /// membership ambiguous.
    pub fn new_with_key(get_item_key: impl Fn(&T, usize) -> K + Send + Sync + 'static) -> Self {
        Self {
            row_height: 20.0,
            device_pixel_ratio: 1.0,
            overscan: 2,
            selection_type: SelectionType::default(),
            make_row: None,
            bind_row: None,
            unbind_row: None,
            style_row: None,
            get_item_key: Arc::new(get_item_key),
            apply_focus: None,
            blur_focus: None,
            on_selection_changed: None,
            on_items_chosen: None,
        }
    }

    /// Nominal row height. A non-positive or non-finite value is not rejected here; the list
    /// treats its geometry as unavailable (no rows) until a valid height is set through
    /// [`crate::RecyclingList::set_row_height`].
    pub fn with_row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    /// Same fallback as [`Self::with_row_height`] for an invalid ratio.
    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_selection_type(mut self, selection_type: SelectionType) -> Self {
        self.selection_type = selection_type;
        self
    }

    pub fn with_make_row(mut self, make_row: impl Fn() -> R + Send + Sync + 'static) -> Self {
        self.make_row = Some(Arc::new(make_row));
        self
    }

    pub fn with_bind_row(
        mut self,
        bind_row: impl Fn(&mut R, usize, &T) + Send + Sync + 'static,
    ) -> Self {
        self.bind_row = Some(Arc::new(bind_row));
        self
    }

    pub fn with_unbind_row(
        mut self,
        unbind_row: Option<impl Fn(&mut R, usize) + Send + Sync + 'static>,
    ) -> Self {
        self.unbind_row = unbind_row.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_style_row(
        mut self,
        style_row: Option<impl Fn(&mut R, RowState) + Send + Sync + 'static>,
    ) -> Self {
        self.style_row = style_row.map(|f| Arc::new(f) as _);
        self
    }

    /// Sets the callbacks used to restore and drop focus when rows are recycled.
    pub fn with_focus_callbacks(
        mut self,
        apply: impl Fn(&mut R, &ChildPath) + Send + Sync + 'static,
        blur: impl Fn(&mut R, &ChildPath) + Send + Sync + 'static,
    ) -> Self {
        self.apply_focus = Some(Arc::new(apply));
        self.blur_focus = Some(Arc::new(blur));
        self
    }

    pub fn with_on_selection_changed(
        mut self,
        on_selection_changed: Option<impl Fn(&[&T]) + Send + Sync + 'static>,
    ) -> Self {
        self.on_selection_changed = on_selection_changed.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_items_chosen(
        mut self,
        on_items_chosen: Option<impl Fn(&[&T]) + Send + Sync + 'static>,
    ) -> Self {
        self.on_items_chosen = on_items_chosen.map(|f| Arc::new(f) as _);
        self
    }

    /// Whether the callbacks needed to render rows are present.
    pub fn can_render(&self) -> bool {
        self.make_row.is_some() && self.bind_row.is_some()
    }
}

impl<T, R, K> core::fmt::Debug for ListOptions<T, R, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("row_height", &self.row_height)
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .field("overscan", &self.overscan)
            .field("selection_type", &self.selection_type)
            .field("make_row", &self.make_row.is_some())
            .field("bind_row", &self.bind_row.is_some())
            .finish_non_exhaustive()
    }
}
