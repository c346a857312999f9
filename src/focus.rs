//! Keeps keyboard focus attached to a data index rather than to a recycled row.

use crate::pool::SlotId;

/// Path from a row's root element to a focused descendant (child positions, outermost first).
pub type ChildPath = Vec<usize>;

#[derive(Clone, Debug, Default)]
pub(crate) struct FocusTracker {
    recorded: Option<(usize, ChildPath)>,
    /// Slot currently showing the focused element.
    holder: Option<SlotId>,
}

impl FocusTracker {
    pub(crate) fn focus_in(&mut self, slot: SlotId, index: usize, path: ChildPath) {
        self.recorded = Some((index, path));
        self.holder = Some(slot);
    }

    pub(crate) fn focus_out(&mut self) {
        self.recorded = None;
        self.holder = None;
    }

    pub(crate) fn recorded(&self) -> Option<(usize, &ChildPath)> {
        self.recorded.as_ref().map(|(i, p)| (*i, p))
    }

    pub(crate) fn holder(&self) -> Option<SlotId> {
        self.holder
    }

    /// Called before `slot` drops its binding. Returns the path to blur when the slot was
    /// holding focus.
    pub(crate) fn on_release(&mut self, slot: SlotId) -> Option<&ChildPath> {
        if self.holder != Some(slot) {
            return None;
        }
        self.holder = None;
        self.recorded.as_ref().map(|(_, p)| p)
    }

    /// Called after `slot` is bound to `index`. Returns the path to focus when the recorded
    /// index has come back into the pool.
    pub(crate) fn on_bind(&mut self, slot: SlotId, index: usize) -> Option<&ChildPath> {
        let (recorded, path) = self.recorded.as_ref()?;
        if *recorded != index || self.holder.is_some() {
            return None;
        }
        self.holder = Some(slot);
        Some(path)
    }

    /// Remaps the recorded index after the data source changed. Drops focus when the item is gone.
    pub(crate) fn remap(&mut self, index: Option<usize>) {
        match (index, self.recorded.as_mut()) {
            (Some(i), Some((recorded, _))) => *recorded = i,
            (None, Some(_)) => self.focus_out(),
            _ => {}
        }
    }
}
