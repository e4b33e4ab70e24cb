//! `state!` macro for do-notation style chaining.
//!
//! The macro rewrites a block of bind steps into nested `bind` calls, so it
//! works for both [`State`](crate::effect::State) and
//! [`LazyState`](crate::effect::LazyState).
//!
//! # Syntax
//!
//! - `pattern <= expression;` - Bind: runs a computation and names its result
//! - `let pattern = expression;` - Pure let binding
//! - `expression` - Final expression (must be a computation)
//!
//! `<=` stands in for `<-`, which is not a valid token sequence in macro
//! patterns.
//!
//! Every continuation is a `move` closure that may run more than once, so
//! bound values that are used in later steps must be `Clone` or `Copy`.
//!
//! # Examples
//!
//! ```rust
//! use stateflow::effect::State;
//! use stateflow::state;
//!
//! let counter: State<i32, i32> = state! {
//!     before <= State::get();
//!     _ <= State::put(before + 1);
//!     let doubled = before * 2;
//!     State::inject(doubled)
//! };
//! assert_eq!(counter.run_state(5), (6, 10));
//! ```

#![forbid(unsafe_code)]

/// Do-notation for state computations.
///
/// See the [module documentation](crate::effect) for syntax.
#[macro_export]
macro_rules! state {
    ($result:expr) => {
        $result
    };

    ($pattern:ident <= $computation:expr ; $($rest:tt)+) => {
        $computation.bind(move |$pattern| {
            $crate::state!($($rest)+)
        })
    };

    (($($pattern:tt)*) <= $computation:expr ; $($rest:tt)+) => {
        $computation.bind(move |($($pattern)*)| {
            $crate::state!($($rest)+)
        })
    };

    (_ <= $computation:expr ; $($rest:tt)+) => {
        $computation.bind(move |_| {
            $crate::state!($($rest)+)
        })
    };

    (let $pattern:ident = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern = $expr;
            $crate::state!($($rest)+)
        }
    };

    (let ($($pattern:tt)*) = $expr:expr ; $($rest:tt)+) => {
        {
            let ($($pattern)*) = $expr;
            $crate::state!($($rest)+)
        }
    };
}
