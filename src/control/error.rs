//! Error types for the memo cell.

use thiserror::Error;

/// Errors reported by [`Lazy`](super::Lazy) and the lazy state engine.
///
/// Forcing never fails on its own; the only reportable condition is a cell
/// whose initializer panicked during an earlier force.
///
/// # Examples
///
/// ```rust
/// use stateflow::control::MemoError;
///
/// assert_eq!(
///     MemoError::Poisoned.to_string(),
///     "lazy value was poisoned by a panic during an earlier force"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoError {
    /// The initializer panicked; the cell caches that failure.
    #[error("lazy value was poisoned by a panic during an earlier force")]
    Poisoned,
}
