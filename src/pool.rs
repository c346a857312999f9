//! Bounded pool of recycled rows.
//!
//! Rows live in a slot arena; a separate `order` deque maps on-screen position to slot. Scrolling
//! rotates the deque instead of moving rows around, so a row keeps its identity (and the host's
//! scene-graph node) while its binding changes.

use std::collections::VecDeque;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Stable identity of a pooled row. Survives rotation; invalidated when the row is dropped.
    pub struct SlotId;
}

pub(crate) struct Slot<R, K> {
    pub(crate) row: R,
    pub(crate) index: Option<usize>,
    pub(crate) key: Option<K>,
}

/// Callbacks the pool drives while assigning indexes to slots.
pub(crate) trait RowBinder<R, K> {
    /// `None` when the index no longer resolves to an item.
    fn key_for(&self, index: usize) -> Option<K>;
    fn bind(&mut self, slot: SlotId, row: &mut R, index: usize, key: &K);
    fn unbind(&mut self, slot: SlotId, row: &mut R, index: usize);
}

impl<R, K> Slot<R, K> {
    /// Binds the slot to `index`. Returns `false` when it was already bound there or the index
    /// has no item (the slot is left hidden).
    fn assign(&mut self, id: SlotId, index: usize, binder: &mut dyn RowBinder<R, K>) -> bool {
        if self.index == Some(index) {
            return false;
        }
        self.release(id, binder);
        let Some(key) = binder.key_for(index) else {
            return false;
        };
        self.index = Some(index);
        binder.bind(id, &mut self.row, index, &key);
        self.key = Some(key);
        true
    }

    fn release(&mut self, id: SlotId, binder: &mut dyn RowBinder<R, K>) {
        self.key = None;
        if let Some(old) = self.index.take() {
            binder.unbind(id, &mut self.row, old);
        }
    }
}

pub(crate) struct RowPool<R, K> {
    slots: SlotMap<SlotId, Slot<R, K>>,
    order: VecDeque<SlotId>,
    first: usize,
}

impl<R, K> Default for RowPool<R, K> {
    fn default() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: VecDeque::new(),
            first: 0,
        }
    }
}

impl<R, K> core::fmt::Debug for RowPool<R, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RowPool")
            .field("len", &self.order.len())
            .field("first", &self.first)
            .finish_non_exhaustive()
    }
}

impl<R, K> RowPool<R, K> {
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Grows (via `make_row`) or shrinks (from the tail) to exactly `len` slots.
    ///
    /// New slots start unbound; call [`Self::rewindow`] afterwards to bind them.
    pub(crate) fn resize(
        &mut self,
        len: usize,
        make_row: &(dyn Fn() -> R + Send + Sync),
        binder: &mut dyn RowBinder<R, K>,
    ) {
        let before = self.order.len();
        while self.order.len() > len {
            let Some(id) = self.order.pop_back() else {
                break;
            };
            if let Some(mut slot) = self.slots.remove(id) {
                slot.release(id, binder);
            }
        }
        while self.order.len() < len {
            let id = self.slots.insert(Slot {
                row: make_row(),
                index: None,
                key: None,
            });
            self.order.push_back(id);
        }
        if before != len {
            rdebug!(from = before, to = len, "pool resized");
        }
    }

    /// Moves the window so that position 0 shows `first`, rotating slots instead of rebinding
    /// them where possible. Positions past `count` are hidden (unbound).
    ///
    /// Returns the number of slots that were (re)bound.
    pub(crate) fn rewindow(
        &mut self,
        first: usize,
        count: usize,
        binder: &mut dyn RowBinder<R, K>,
    ) -> usize {
        let len = self.order.len();
        if first < self.first {
            // Scrolling up: tail slots move to the head.
            self.order.rotate_right((self.first - first).min(len));
        } else if first > self.first {
            // Scrolling down: head slots move to the tail.
            self.order.rotate_left((first - self.first).min(len));
        }
        self.first = first;

        let mut rebound = 0usize;
        for (pos, &id) in self.order.iter().enumerate() {
            let Some(slot) = self.slots.get_mut(id) else {
                continue;
            };
            let target = first.saturating_add(pos);
            if target < count {
                if slot.assign(id, target, binder) {
                    rebound += 1;
                }
            } else {
                slot.release(id, binder);
            }
        }
        if rebound > 0 {
            rtrace!(first, count, rebound, "rewindow");
        }
        rebound
    }

    /// Unbinds every slot but keeps the rows, so the next [`Self::rewindow`] rebinds all of them.
    pub(crate) fn invalidate(&mut self, binder: &mut dyn RowBinder<R, K>) {
        for &id in &self.order {
            if let Some(slot) = self.slots.get_mut(id) {
                slot.release(id, binder);
            }
        }
    }

    /// Unbinds and drops every row.
    pub(crate) fn clear(&mut self, binder: &mut dyn RowBinder<R, K>) {
        self.invalidate(binder);
        self.order.clear();
        self.slots.clear();
        self.first = 0;
    }

    pub(crate) fn slot(&self, id: SlotId) -> Option<&Slot<R, K>> {
        self.slots.get(id)
    }

    pub(crate) fn slot_at(&self, position: usize) -> Option<SlotId> {
        self.order.get(position).copied()
    }

    pub(crate) fn position_of(&self, id: SlotId) -> Option<usize> {
        self.order.iter().position(|&s| s == id)
    }

    /// Slots in on-screen order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, SlotId, &Slot<R, K>)> + '_ {
        self.order
            .iter()
            .enumerate()
            .filter_map(|(pos, &id)| self.slots.get(id).map(|slot| (pos, id, slot)))
    }

    /// Visits every slot mutably in on-screen order.
    pub(crate) fn for_each_mut(&mut self, mut f: impl FnMut(SlotId, &mut Slot<R, K>)) {
        for &id in &self.order {
            if let Some(slot) = self.slots.get_mut(id) {
                f(id, slot);
            }
        }
    }

    pub(crate) fn slot_for_index(&self, index: usize) -> Option<SlotId> {
        let pos = index.checked_sub(self.first)?;
        let id = self.slot_at(pos)?;
        (self.slots.get(id)?.index == Some(index)).then_some(id)
    }
}
