/// Stable item key used when no custom key function is configured.
pub type ItemKey = u64;

/// Where a row should land when scrolled into view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Scroll as little as possible; no-op when the row is already fully visible.
    #[default]
    Auto,
}

/// Selection policy of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionType {
    /// Selection is always empty and every mutator is a no-op.
    None,
    /// Selecting an item replaces the previous selection.
    #[default]
    Single,
    /// Toggle, contiguous range and select-all are available.
    Multiple,
}

/// Modifier state accompanying a click or navigation intent.
///
/// `action` is the platform's toggle modifier (Ctrl on most platforms, Cmd on macOS).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    pub shift: bool,
    pub action: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        action: false,
    };
    pub const SHIFT: Self = Self {
        shift: true,
        action: false,
    };
    pub const ACTION: Self = Self {
        shift: false,
        action: true,
    };
}

/// A half-open range of item indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl IndexRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// Presentation state handed to the styling callback whenever a row is bound or the
/// selection changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowState {
    pub index: usize,
    pub selected: bool,
}

/// A view of one pooled row, in on-screen order.
#[derive(Debug)]
pub struct RowRef<'a, R> {
    /// Position of the slot within the pool (0 = topmost).
    pub position: usize,
    /// Bound data index, `None` for a hidden slot.
    pub index: Option<usize>,
    /// Top edge of the row in content coordinates.
    pub top: f32,
    pub row: &'a R,
}
