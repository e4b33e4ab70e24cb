//! # stateflow
//!
//! Computations that thread a single state value through a sequence of
//! steps, without the caller passing the state in and out of every step.
//!
//! ## Overview
//!
//! - **Strict engine** ([`effect::State`]): a shared function `S -> (S, A)`.
//!   Composition builds a new function; running it threads the state.
//! - **Lazy engine** ([`effect::LazyState`]): a memoized, deferred wrapper
//!   around a strict computation. Composition builds an inert description;
//!   the strict computation is built once, on first demand.
//! - **Memo cell** ([`control::Lazy`]): the single-assignment cache the lazy
//!   engine is built on.
//!
//! ## Feature Flags
//!
//! - `control`: the memo cell
//! - `effect`: both engines and the [`state!`] macro (implies `control`)
//!
//! ## Example
//!
//! ```rust
//! use stateflow::prelude::*;
//!
//! let step = |x: i32| State::modify(move |total: i32| total + x).then(State::inject(x * x));
//! let squares = State::traverse(vec![1, 2, 3], step);
//! assert_eq!(squares.run_state(0), (6, vec![1, 4, 9]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use stateflow::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "effect")]
pub mod effect;
