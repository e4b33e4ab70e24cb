//! Stateful computations, strict and lazy.
//!
//! - [`State`]: a computation `S -> (S, A)` that threads state as it runs
//! - [`LazyState`]: the same computation, built on first demand and memoized
//! - [`state!`](crate::state): do-notation over `bind`, for either engine
//!
//! Both engines expose the same operations (`inject`, `bind`, `map`,
//! `apply`, `sequence`, `fold_m`, `get`, `put`, `modify`, `discard`,
//! `run_state`, ...) and satisfy the same laws. They differ only in when the
//! work of composing happens.
//!
//! # Examples
//!
//! ```rust
//! use stateflow::effect::{LazyState, State};
//!
//! let push = |x: i32| {
//!     State::modify(move |mut log: Vec<i32>| {
//!         log.push(x);
//!         log
//!     })
//!     .then(State::inject(x))
//! };
//! let strict = State::sequence(vec![push(1), push(2), push(3)]);
//! assert_eq!(strict.run_state(Vec::new()), (vec![1, 2, 3], vec![1, 2, 3]));
//!
//! let lazy = LazyState::sequence(vec![push(1), push(2), push(3)].into_iter().map(LazyState::from));
//! assert_eq!(lazy.run_state(Vec::new()), strict.run_state(Vec::new()));
//! ```

mod lazy_state;
mod state;
mod state_macro;

pub use lazy_state::LazyState;
pub use state::State;
