//! Error types for list operations.

/// Argument-validation failures reported to callers.
///
/// Missing configuration and pending geometry are not errors: operations that need them
/// return `Ok` and do nothing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListError {
    /// An explicit index was outside `[0, count)`.
    #[error("index {index} is out of range for a list of {count} items")]
    IndexOutOfRange { index: usize, count: usize },
    /// No item in the current data source has the requested key.
    #[error("no item with the requested key")]
    KeyNotFound,
    /// Row heights must be positive and finite.
    #[error("row height must be a positive finite value, got {0}")]
    InvalidRowHeight(f32),
    /// Device pixel ratios must be positive and finite.
    #[error("device pixel ratio must be a positive finite value, got {0}")]
    InvalidPixelRatio(f32),
}

pub type Result<T, E = ListError> = core::result::Result<T, E>;
