//! Control structures for deferred evaluation.
//!
//! - [`Lazy`]: a memoizing, single-assignment cell
//! - [`MemoError`]: the error reported when a cell has been poisoned
//!
//! # Examples
//!
//! ```rust
//! use stateflow::control::Lazy;
//!
//! let lazy = Lazy::new(|| {
//!     println!("Computing...");
//!     42
//! });
//! // "Computing..." is not printed yet
//!
//! let value = lazy.force();
//! // Now "Computing..." is printed and value is 42
//! assert_eq!(*value, 42);
//! ```

mod error;
mod lazy;

pub use error::MemoError;
pub use lazy::Lazy;
