use thiserror::Error;

use crate::ListMode;

/// Misuse of the list API. These indicate a bug in the caller and are never
/// retried by the list itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// The delegate reports the item as not selectable.
    #[error("attempt to select non-selectable item at index {index}")]
    NotSelectable { index: usize },

    /// Selection index past the end of the list.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Operation only valid for fixed-height modes.
    #[error("only supported in fixed height items modes, list is in {mode} mode")]
    FixedHeightOnly { mode: ListMode },
}
