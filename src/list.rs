use std::collections::hash_map::Entry;

use crate::error::{ListError, Result};
use crate::focus::{ChildPath, FocusTracker};
use crate::key::{ItemKeyBound, KeyIndexMap};
use crate::navigation::{Key, NavAction, NavContext, NavIntent, intent_for_key, navigate};
use crate::pool::{RowBinder, RowPool, SlotId};
use crate::viewport::{Viewport, WindowLayout, snap_row_height};
use crate::{
    Align, IndexRange, ItemKey, ItemSource, ListOptions, Modifiers, RowRef, RowState, Selection,
    SelectionType, ViewState,
};

/// A virtualized, recycling list.
///
/// The list owns its data source, a bounded pool of caller-created rows and the selection. The
/// host drives it with geometry ([`Self::set_viewport_size`]) and scroll offsets
/// ([`Self::set_scroll_offset`]); rows are created, bound, unbound and styled through the
/// callbacks in [`ListOptions`]. Everything runs synchronously on the caller's thread.
pub struct RecyclingList<S: ItemSource, R, K = ItemKey> {
    options: ListOptions<S::Item, R, K>,
    source: Option<S>,
    viewport: Viewport,
    pool: RowPool<R, K>,
    selection: Selection<K>,
    focus: FocusTracker,
    layout: Option<WindowLayout>,

    notify_depth: usize,
    notify_pending: bool,
}

impl<S: ItemSource, R, K> core::fmt::Debug for RecyclingList<S, R, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecyclingList")
            .field("options", &self.options)
            .field("count", &self.source.as_ref().map_or(0, |s| s.len()))
            .field("viewport", &self.viewport)
            .field("pool", &self.pool)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

struct Binder<'a, S: ItemSource, R, K> {
    options: &'a ListOptions<S::Item, R, K>,
    source: Option<&'a S>,
    selection: &'a Selection<K>,
    focus: &'a mut FocusTracker,
}

impl<S: ItemSource, R, K: ItemKeyBound> RowBinder<R, K> for Binder<'_, S, R, K> {
    fn key_for(&self, index: usize) -> Option<K> {
        let item = self.source?.item(index)?;
        Some((self.options.get_item_key)(item, index))
    }

    fn bind(&mut self, slot: SlotId, row: &mut R, index: usize, key: &K) {
        if let (Some(bind), Some(item)) = (
            self.options.bind_row.as_deref(),
            self.source.and_then(|s| s.item(index)),
        ) {
            bind(row, index, item);
        }
        if let Some(style) = self.options.style_row.as_deref() {
            style(
                row,
                RowState {
                    index,
                    selected: self.selection.contains_key(key),
                },
            );
        }
        if let Some(path) = self.focus.on_bind(slot, index) {
            if let Some(apply) = self.options.apply_focus.as_deref() {
                apply(row, path);
            }
        }
    }

    fn unbind(&mut self, slot: SlotId, row: &mut R, index: usize) {
        if let Some(path) = self.focus.on_release(slot) {
            if let Some(blur) = self.options.blur_focus.as_deref() {
                blur(row, path);
            }
        }
        if let Some(unbind) = self.options.unbind_row.as_deref() {
            unbind(row, index);
        }
    }
}

macro_rules! binder {
    ($list:expr) => {
        Binder {
            options: &$list.options,
            source: $list.source.as_ref(),
            selection: &$list.selection,
            focus: &mut $list.focus,
        }
    };
}

impl<S: ItemSource, R, K: ItemKeyBound> RecyclingList<S, R, K> {
    /// Creates an empty list. An invalid initial row height or pixel ratio is kept as is and
    /// leaves the geometry unavailable, so no rows are created until
    /// [`Self::set_row_height`] / [`Self::set_device_pixel_ratio`] supply valid values.
    pub fn new(options: ListOptions<S::Item, R, K>) -> Self {
        rdebug!(
            row_height = options.row_height,
            overscan = options.overscan,
            "RecyclingList::new"
        );
        Self {
            viewport: Viewport::new(options.row_height, options.device_pixel_ratio),
            options,
            source: None,
            pool: RowPool::default(),
            selection: Selection::new(),
            focus: FocusTracker::default(),
            layout: None,
            notify_depth: 0,
            notify_pending: false,
        }
    }

    pub fn with_source(options: ListOptions<S::Item, R, K>, source: S) -> Self {
        let mut list = Self::new(options);
        list.source = Some(source);
        list
    }

    pub fn options(&self) -> &ListOptions<S::Item, R, K> {
        &self.options
    }

    /// Replaces the options. A new row factory tears the pool down and rebuilds it; any other
    /// change re-windows and rebinds in place.
    pub fn set_options(&mut self, options: ListOptions<S::Item, R, K>) -> Result<()> {
        snap_row_height(options.row_height, 1.0)
            .ok_or(ListError::InvalidRowHeight(options.row_height))?;
        check_pixel_ratio(options.device_pixel_ratio)?;

        let factory_changed = match (&self.options.make_row, &options.make_row) {
            (Some(a), Some(b)) => !std::sync::Arc::ptr_eq(a, b),
            (None, None) => false,
            _ => true,
        };
        let focused = self.focused_key();
        let selection_type = options.selection_type;
        self.options = options;
        self.viewport.set_row_height(self.options.row_height);
        self.viewport.set_pixel_ratio(self.options.device_pixel_ratio);

        self.batch_update(|list| {
            list.apply_selection_type(selection_type);
            list.reconcile(focused, factory_changed);
        });
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to [`Self::set_options`].
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut ListOptions<S::Item, R, K>),
    ) -> Result<()> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Whether a data source and the rendering callbacks are present.
    pub fn is_configured(&self) -> bool {
        self.source.is_some() && self.options.can_render()
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Replaces the data source wholesale: selection is re-derived by key and the pool is torn
    /// down and rebuilt.
    pub fn set_source(&mut self, source: S) {
        let focused = self.focused_key();
        rdebug!(count = source.len(), "set_source");
        self.source = Some(source);
        self.reconcile(focused, true);
    }

    pub fn take_source(&mut self) -> Option<S> {
        self.drop_window();
        self.focus.focus_out();
        let source = self.source.take();
        if self.selection.clear() {
            self.notify_selection_changed();
        }
        source
    }

    /// Mutates the data source in place, then re-derives selection and rebinds visible rows.
    pub fn update_source<U>(&mut self, f: impl FnOnce(&mut S) -> U) -> Option<U> {
        self.edit_source(|s| (f(s), true))
    }

    /// Like [`Self::update_source`], but `f` reports whether anything changed.
    pub(crate) fn edit_source<U>(&mut self, f: impl FnOnce(&mut S) -> (U, bool)) -> Option<U> {
        let focused = self.focused_key();
        let source = self.source.as_mut()?;
        let (out, changed) = f(source);
        if changed {
            self.reconcile(focused, false);
        }
        Some(out)
    }

    /// Notifies the list that the contents of its source changed. Rows stay allocated but
    /// every visible one is rebound.
    pub fn items_changed(&mut self) {
        let focused = self.focused_key();
        self.reconcile(focused, false);
    }

    /// Tears down and rebuilds the whole pool.
    pub fn refresh(&mut self) {
        let focused = self.focused_key();
        self.reconcile(focused, true);
    }

    pub fn count(&self) -> usize {
        self.source.as_ref().map_or(0, |s| s.len())
    }

    pub fn item(&self, index: usize) -> Option<&S::Item> {
        self.source.as_ref()?.item(index)
    }

    pub fn key_for(&self, index: usize) -> Option<K> {
        let item = self.item(index)?;
        Some((self.options.get_item_key)(item, index))
    }

    /// Linear search for the index of `key` in the current source.
    pub fn index_of_key(&self, key: &K) -> Result<usize> {
        (0..self.count())
            .find(|&i| self.key_for(i).as_ref() == Some(key))
            .ok_or(ListError::KeyNotFound)
    }

    // ---------------------------------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Layout of the current window, `None` until geometry is available.
    pub fn layout(&self) -> Option<WindowLayout> {
        self.layout
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        if self.viewport.width() == width && self.viewport.height() == height {
            return;
        }
        rtrace!(width, height, "set_viewport_size");
        self.viewport.set_size(width, height);
        self.sync_window();
    }

    pub fn scroll_offset(&self) -> f32 {
        self.viewport.scroll_offset()
    }

    /// Applies a scroll offset (clamped to the content) and re-windows.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.viewport.set_scroll_offset(offset, self.count());
        self.sync_window();
    }

    pub fn set_row_height(&mut self, row_height: f32) -> Result<()> {
        snap_row_height(row_height, 1.0).ok_or(ListError::InvalidRowHeight(row_height))?;
        self.options.row_height = row_height;
        self.viewport.set_row_height(row_height);
        self.sync_window();
        Ok(())
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f32) -> Result<()> {
        check_pixel_ratio(ratio)?;
        self.options.device_pixel_ratio = ratio;
        self.viewport.set_pixel_ratio(ratio);
        self.sync_window();
        Ok(())
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
        self.sync_window();
    }

    pub fn first_visible_index(&self) -> Option<usize> {
        self.layout.map(|l| l.first_visible)
    }

    /// Padding above the first pooled row, `first_visible * row_height`.
    pub fn leading_padding(&self) -> f32 {
        self.layout.map_or(0.0, |l| l.leading_padding)
    }

    pub fn content_height(&self) -> f32 {
        self.layout.map_or(0.0, |l| l.content_height)
    }

    /// Scrolls so that `index` is visible with the given alignment.
    ///
    /// Does nothing (successfully) while the list is unconfigured or geometry is unavailable.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Result<()> {
        if !self.is_configured() {
            return Ok(());
        }
        self.check_index(index)?;
        let Some(offset) = self.viewport.offset_for_index(index, self.count(), align) else {
            return Ok(());
        };
        self.set_scroll_offset(offset);
        Ok(())
    }

    // ---------------------------------------------------------------------------------------
    // Pool
    // ---------------------------------------------------------------------------------------

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Indexes covered by the pool as a half-open range.
    pub fn bound_range(&self) -> IndexRange {
        let Some(layout) = self.layout else {
            return IndexRange::default();
        };
        let start = layout.first_visible.min(self.count());
        IndexRange {
            start_index: start,
            end_index: start.saturating_add(layout.pool_len).min(self.count()),
        }
    }

    /// Indexes bound to the pool, in on-screen order. Hidden slots are skipped.
    pub fn bound_indices(&self) -> Vec<usize> {
        self.pool.iter().filter_map(|(_, _, slot)| slot.index).collect()
    }

    /// Visits every pooled row in on-screen order.
    pub fn for_each_row<'a>(&'a self, mut f: impl FnMut(RowRef<'a, R>)) {
        let (Some(layout), Some(row_height)) =
            (self.layout, self.viewport.effective_row_height())
        else {
            return;
        };
        for (position, _, slot) in self.pool.iter() {
            f(RowRef {
                position,
                index: slot.index,
                top: layout.leading_padding + position as f32 * row_height,
                row: &slot.row,
            });
        }
    }

    /// Collects [`Self::for_each_row`] into a vector.
    pub fn collect_rows(&self) -> Vec<RowRef<'_, R>> {
        let mut rows = Vec::with_capacity(self.pool.len());
        self.for_each_row(|row| rows.push(row));
        rows
    }

    /// The row currently bound to `index`, if it is inside the window.
    pub fn row_for_index(&self, index: usize) -> Option<&R> {
        let id = self.pool.slot_for_index(index)?;
        self.pool.slot(id).map(|slot| &slot.row)
    }

    // ---------------------------------------------------------------------------------------
    // Focus
    // ---------------------------------------------------------------------------------------

    /// Records that the element at `path` inside the row at pool `position` received focus.
    ///
    /// Returns `false` when the position is empty or hidden.
    pub fn focus_in(&mut self, position: usize, path: ChildPath) -> bool {
        let Some(id) = self.pool.slot_at(position) else {
            return false;
        };
        let Some(index) = self.pool.slot(id).and_then(|slot| slot.index) else {
            return false;
        };
        self.focus.focus_in(id, index, path);
        true
    }

    pub fn focus_out(&mut self) {
        self.focus.focus_out();
    }

    /// Recorded focus as `(data index, child path)`.
    pub fn focused(&self) -> Option<(usize, &ChildPath)> {
        self.focus.recorded()
    }

    /// Pool position of the row currently showing focus.
    pub fn focused_position(&self) -> Option<usize> {
        let id = self.focus.holder()?;
        self.pool.position_of(id)
    }

    // ---------------------------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------------------------

    pub fn selection(&self) -> &Selection<K> {
        &self.selection
    }

    pub fn selection_type(&self) -> SelectionType {
        self.options.selection_type
    }

    pub fn set_selection_type(&mut self, selection_type: SelectionType) {
        self.options.selection_type = selection_type;
        self.apply_selection_type(selection_type);
    }

    pub fn selected_indices(&self) -> &[usize] {
        self.selection.indices()
    }

    pub fn selected_keys(&self) -> &[K] {
        self.selection.keys()
    }

    pub fn selected_items(&self) -> Vec<&S::Item> {
        let Some(source) = self.source.as_ref() else {
            return Vec::new();
        };
        self.selection
            .indices()
            .iter()
            .filter_map(|&i| source.item(i))
            .collect()
    }

    /// Whether the item at `index` is selected, resolved through its key.
    pub fn is_selected(&self, index: usize) -> bool {
        self.key_for(index)
            .is_some_and(|key| self.selection.contains_key(&key))
    }

    /// Replaces the selection with `indices` (deduplicated) and notifies once.
    ///
    /// In single-selection mode only the last index is kept.
    pub fn set_selection(&mut self, indices: impl IntoIterator<Item = usize>) -> Result<()> {
        if !self.can_select() {
            return Ok(());
        }
        let indices = self.checked_indices(indices)?;
        self.selection.clear();
        self.insert_indices(&indices);
        self.selection_changed();
        Ok(())
    }

    /// Adds `indices` to the selection, notifying at most once.
    pub fn add_to_selection(&mut self, indices: impl IntoIterator<Item = usize>) -> Result<()> {
        if !self.can_select() {
            return Ok(());
        }
        let indices = self.checked_indices(indices)?;
        if indices.is_empty() {
            return Ok(());
        }
        let changed = if self.options.selection_type == SelectionType::Single {
            let before = self.selection.indices().to_vec();
            self.selection.clear();
            self.insert_indices(&indices);
            before != self.selection.indices()
        } else {
            self.insert_indices(&indices)
        };
        if changed {
            self.selection_changed();
        }
        Ok(())
    }

    pub fn remove_from_selection(&mut self, index: usize) -> Result<()> {
        if !self.can_select() {
            return Ok(());
        }
        self.check_index(index)?;
        if self.selection.remove_index(index) {
            self.selection_changed();
        }
        Ok(())
    }

    /// Clears the selection. A no-op, without notification, when it is already empty.
    pub fn clear_selection(&mut self) {
        if !self.is_configured() {
            return;
        }
        if self.selection.clear() {
            self.selection_changed();
        }
    }

    /// Selects every item. Only available in multiple-selection mode.
    pub fn select_all(&mut self) {
        if !self.can_select() || self.options.selection_type != SelectionType::Multiple {
            return;
        }
        let all: Vec<usize> = (0..self.count()).collect();
        self.selection.clear();
        self.insert_indices(&all);
        self.selection_changed();
    }

    /// Selects the inclusive range between the current range origin and `index`.
    ///
    /// Falls back to a plain selection when nothing is selected or outside multiple mode.
    pub fn extend_selection_to(&mut self, index: usize) -> Result<()> {
        if !self.can_select() {
            return Ok(());
        }
        self.check_index(index)?;
        let origin = match self.options.selection_type {
            SelectionType::Multiple => self.selection.range_origin(),
            _ => None,
        };
        match origin {
            Some(origin) => {
                let Self {
                    selection,
                    source,
                    options,
                    ..
                } = self;
                let Some(source) = source.as_ref() else {
                    return Ok(());
                };
                selection.select_range(origin, index, |i| {
                    source.item(i).map(|item| (options.get_item_key)(item, i))
                });
            }
            None => {
                self.selection.clear();
                self.insert_indices(&[index]);
            }
        }
        self.selection_changed();
        Ok(())
    }

    /// Applies the click policy: plain click replaces, action-click toggles, shift-click
    /// extends from the range origin.
    pub fn click(&mut self, index: usize, modifiers: Modifiers) -> Result<()> {
        if !self.can_select() {
            return Ok(());
        }
        self.check_index(index)?;
        let multiple = self.options.selection_type == SelectionType::Multiple;
        if multiple && modifiers.action {
            if let Some(key) = self.key_for(index) {
                self.selection.toggle(index, key);
                self.selection_changed();
            }
            Ok(())
        } else if multiple && modifiers.shift && !self.selection.is_empty() {
            self.extend_selection_to(index)
        } else {
            self.set_selection([index])
        }
    }

    /// Double-activation: makes sure `index` is selected, then fires items-chosen.
    pub fn activate(&mut self, index: usize) -> Result<()> {
        if !self.is_configured() {
            return Ok(());
        }
        self.check_index(index)?;
        if !self.is_selected(index) {
            self.set_selection([index])?;
        }
        self.submit();
        Ok(())
    }

    /// Fires items-chosen with the current selection.
    pub fn submit(&self) {
        if !self.is_configured() {
            return;
        }
        if let Some(cb) = self.options.on_items_chosen.as_deref() {
            let items = self.selected_items();
            cb(&items);
        }
    }

    /// Batches several mutations into a single selection-changed notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.notify_depth = self.notify_depth.saturating_add(1);
        f(self);
        debug_assert!(self.notify_depth > 0, "notify_depth underflow");
        self.notify_depth = self.notify_depth.saturating_sub(1);
        if self.notify_depth == 0 && core::mem::take(&mut self.notify_pending) {
            self.emit_selection_changed();
        }
    }

    // ---------------------------------------------------------------------------------------
    // Keyboard
    // ---------------------------------------------------------------------------------------

    /// Applies a navigation intent. Returns `true` when the intent was handled and the input
    /// event should be consumed.
    pub fn handle_intent(&mut self, intent: NavIntent, modifiers: Modifiers) -> bool {
        if !self.is_configured() {
            return false;
        }
        let ctx = NavContext {
            selection_type: self.options.selection_type,
            count: self.count(),
            page_size: self.viewport.rows_per_page().unwrap_or(1),
            cursor: self.selection.cursor(),
            has_selection: !self.selection.is_empty(),
        };
        let Some(action) = navigate(ctx, intent, modifiers) else {
            return false;
        };
        rtrace!(?intent, ?action, "handle_intent");

        let applied = match action {
            NavAction::Select(i) => self.set_selection([i]),
            NavAction::ExtendTo(i) => self.extend_selection_to(i),
            NavAction::SelectAll => {
                self.select_all();
                Ok(())
            }
            NavAction::Clear => {
                self.clear_selection();
                Ok(())
            }
            NavAction::Submit => {
                self.submit();
                Ok(())
            }
        };
        if applied.is_err() {
            return false;
        }
        if let Some(target) = action.target() {
            if self.scroll_to_index(target, Align::Auto).is_err() {
                return false;
            }
        }
        true
    }

    /// Translates `key` with the default bindings and applies it.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        intent_for_key(key, modifiers).is_some_and(|intent| self.handle_intent(intent, modifiers))
    }

    // ---------------------------------------------------------------------------------------
    // View state
    // ---------------------------------------------------------------------------------------

    pub fn view_state(&self) -> ViewState<K> {
        ViewState {
            scroll_offset: self.viewport.scroll_offset(),
            selected_keys: self.selection.keys().to_vec(),
        }
    }

    /// Restores scroll offset and selection. Keys missing from the current source are ignored.
    pub fn restore_view_state(&mut self, state: &ViewState<K>) {
        let index = self.key_index();
        let indices: Vec<usize> = state
            .selected_keys
            .iter()
            .filter_map(|k| index.get(k).copied())
            .collect();
        self.batch_update(|list| {
            if list.can_select() && list.selection.indices() != indices.as_slice() {
                list.selection.clear();
                list.insert_indices(&indices);
                list.selection_changed();
            }
            list.set_scroll_offset(state.scroll_offset);
        });
    }

    // ---------------------------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------------------------

    fn can_select(&self) -> bool {
        self.is_configured() && self.options.selection_type != SelectionType::None
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let count = self.count();
        if index >= count {
            return Err(ListError::IndexOutOfRange { index, count });
        }
        Ok(())
    }

    fn checked_indices(&self, indices: impl IntoIterator<Item = usize>) -> Result<Vec<usize>> {
        let indices: Vec<usize> = indices.into_iter().collect();
        for &index in &indices {
            self.check_index(index)?;
        }
        Ok(indices)
    }

    /// Inserts already validated indexes. Single mode keeps only the last one.
    fn insert_indices(&mut self, indices: &[usize]) -> bool {
        let indices = match self.options.selection_type {
            SelectionType::Single => indices.last().map(core::slice::from_ref).unwrap_or(&[]),
            _ => indices,
        };
        let mut changed = false;
        for &index in indices {
            if let Some(key) = self.key_for(index) {
                changed |= self.selection.insert(index, key);
            }
        }
        changed
    }

    fn apply_selection_type(&mut self, selection_type: SelectionType) {
        let changed = match selection_type {
            SelectionType::None => self.selection.clear(),
            SelectionType::Single if self.selection.len() > 1 => {
                let keep = self.selection.indices().last().copied();
                self.selection.clear();
                if let Some(index) = keep {
                    self.insert_indices(&[index]);
                }
                true
            }
            _ => false,
        };
        if changed {
            self.selection_changed();
        }
    }

    fn selection_changed(&mut self) {
        self.restyle();
        self.notify_selection_changed();
    }

    fn notify_selection_changed(&mut self) {
        if self.notify_depth > 0 {
            self.notify_pending = true;
            return;
        }
        self.emit_selection_changed();
    }

    fn emit_selection_changed(&self) {
        if let Some(cb) = self.options.on_selection_changed.as_deref() {
            let items = self.selected_items();
            cb(&items);
        }
    }

    /// Re-applies selection highlighting to every bound row.
    fn restyle(&mut self) {
        let Some(style) = self.options.style_row.as_deref() else {
            return;
        };
        let selection = &self.selection;
        self.pool.for_each_mut(|_, slot| {
            if let (Some(index), Some(key)) = (slot.index, slot.key.as_ref()) {
                style(
                    &mut slot.row,
                    RowState {
                        index,
                        selected: selection.contains_key(key),
                    },
                );
            }
        });
    }

    fn focused_key(&self) -> Option<K> {
        let (index, _) = self.focus.recorded()?;
        self.key_for(index)
    }

    fn key_index(&self) -> KeyIndexMap<K> {
        let mut map = KeyIndexMap::default();
        let Some(source) = self.source.as_ref() else {
            return map;
        };
        for index in 0..source.len() {
            let Some(item) = source.item(index) else {
                continue;
            };
            match map.entry((self.options.get_item_key)(item, index)) {
                Entry::Occupied(_) => {
                    rwarn!(index, "duplicate item key; keeping the first occurrence");
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }
        map
    }

    /// Re-derives key-based state after the source changed and rebinds (or rebuilds) the pool.
    fn reconcile(&mut self, focused: Option<K>, teardown: bool) {
        let index = self.key_index();
        self.batch_update(|list| {
            if list.selection.rebuild(|k| index.get(k).copied()) {
                list.notify_selection_changed();
            }

            let mut binder = binder!(list);
            if teardown {
                list.pool.clear(&mut binder);
            } else {
                list.pool.invalidate(&mut binder);
            }
            list.focus
                .remap(focused.as_ref().and_then(|k| index.get(k).copied()));
            list.sync_window();
        });
    }

    /// Recomputes the window and brings the pool in line with it.
    fn sync_window(&mut self) {
        let count = self.count();
        self.viewport.reclamp(count);
        let layout = if self.is_configured() {
            self.viewport.layout(count, self.options.overscan)
        } else {
            None
        };
        let (Some(layout), Some(make_row)) = (layout, self.options.make_row.as_deref()) else {
            self.drop_window();
            return;
        };

        let mut binder = binder!(self);
        self.pool.resize(layout.pool_len, make_row, &mut binder);
        self.pool.rewindow(layout.first_visible, count, &mut binder);
        self.layout = Some(layout);
    }

    /// Releases every row; used while unconfigured or without geometry.
    fn drop_window(&mut self) {
        let mut binder = binder!(self);
        self.pool.clear(&mut binder);
        self.layout = None;
    }
}

fn check_pixel_ratio(ratio: f32) -> Result<()> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(())
    } else {
        Err(ListError::InvalidPixelRatio(ratio))
    }
}
