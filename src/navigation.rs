//! Keyboard navigation as a pure function.
//!
//! Hosts translate their own key events into [`NavIntent`]s (see [`intent_for_key`]) and the
//! list applies whatever [`navigate`] decides. Nothing here looks at live event objects.

use crate::{Modifiers, SelectionType};

/// Abstract navigation intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavIntent {
    Next,
    Previous,
    PageUp,
    PageDown,
    Begin,
    End,
    SelectAll,
    Submit,
    Cancel,
}

/// Host-independent key identities understood by [`intent_for_key`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Escape,
    Char(char),
}

/// Default key bindings for vertical lists.
pub fn intent_for_key(key: Key, modifiers: Modifiers) -> Option<NavIntent> {
    match key {
        Key::ArrowDown => Some(NavIntent::Next),
        Key::ArrowUp => Some(NavIntent::Previous),
        Key::PageUp => Some(NavIntent::PageUp),
        Key::PageDown => Some(NavIntent::PageDown),
        Key::Home => Some(NavIntent::Begin),
        Key::End => Some(NavIntent::End),
        Key::Enter => Some(NavIntent::Submit),
        Key::Escape => Some(NavIntent::Cancel),
        Key::Char('a' | 'A') if modifiers.action => Some(NavIntent::SelectAll),
        Key::Char(_) => None,
    }
}

/// What the controller needs to know about the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavContext {
    pub selection_type: SelectionType,
    pub count: usize,
    /// Whole rows per viewport, used for PageUp/PageDown.
    pub page_size: usize,
    /// Terminal of the last selection gesture.
    pub cursor: Option<usize>,
    pub has_selection: bool,
}

/// Selection change decided by [`navigate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    /// Replace the selection with a single index.
    Select(usize),
    /// Replace the selection with the range from the current origin to this index.
    ExtendTo(usize),
    SelectAll,
    Clear,
    /// Fire the items-chosen notification with the current selection.
    Submit,
}

impl NavAction {
    /// The index that should be scrolled into view after applying the action.
    pub fn target(&self) -> Option<usize> {
        match *self {
            Self::Select(i) | Self::ExtendTo(i) => Some(i),
            Self::SelectAll | Self::Clear | Self::Submit => None,
        }
    }
}

/// Maps an intent to an action. `None` means the intent is not handled and the originating
/// event should not be consumed (e.g. `Next` on the last row lets focus leave the list).
///
/// A missing cursor behaves as if it sat just above the first row: forward moves start at
/// index 0, backward moves are unhandled.
pub fn navigate(ctx: NavContext, intent: NavIntent, modifiers: Modifiers) -> Option<NavAction> {
    match intent {
        NavIntent::Submit => return Some(NavAction::Submit),
        NavIntent::Cancel => return ctx.has_selection.then_some(NavAction::Clear),
        _ => {}
    }
    if ctx.selection_type == SelectionType::None || ctx.count == 0 {
        return None;
    }

    let last = ctx.count - 1;
    let page = ctx.page_size.max(1);
    let cursor = ctx.cursor.map(|c| c.min(last));

    let target = match intent {
        NavIntent::SelectAll => {
            return (ctx.selection_type == SelectionType::Multiple).then_some(NavAction::SelectAll);
        }
        NavIntent::Next => match cursor {
            Some(c) if c >= last => return None,
            Some(c) => c + 1,
            None => 0,
        },
        NavIntent::Previous => match cursor {
            Some(c) if c > 0 => c - 1,
            _ => return None,
        },
        NavIntent::PageDown => match cursor {
            Some(c) if c >= last => return None,
            Some(c) => c.saturating_add(page).min(last),
            None => (page - 1).min(last),
        },
        NavIntent::PageUp => match cursor {
            Some(c) if c > 0 => c.saturating_sub(page),
            _ => return None,
        },
        NavIntent::Begin => 0,
        NavIntent::End => last,
        NavIntent::Submit | NavIntent::Cancel => return None,
    };

    let extend =
        ctx.selection_type == SelectionType::Multiple && modifiers.shift && ctx.has_selection;
    Some(if extend {
        NavAction::ExtendTo(target)
    } else {
        NavAction::Select(target)
    })
}
