//! Lazy State Monad - deferred, memoized stateful computation.
//!
//! A `LazyState<S, A>` is a [`Lazy`] cell around a strict [`State<S, A>`].
//! Building a `LazyState` with any constructor or combinator performs no
//! work: it only records how to build the strict computation. The first time
//! the value is forced (directly with [`LazyState::force`], or through
//! [`LazyState::run_state`]) the strict computation is built, forcing the lazy
//! computations it is composed from, and cached. Later forces reuse it.
//!
//! For a given initial state, a `LazyState` produces exactly the same
//! `(state, value)` pair as the structurally equivalent `State`.
//!
//! # Poisoning
//!
//! If building the strict computation panics, the panic propagates to the
//! caller once and the cell stays poisoned: later forces panic without
//! re-running the thunk, and [`LazyState::try_force`] reports
//! [`MemoError::Poisoned`].
//!
//! # Examples
//!
//! ```rust
//! use stateflow::effect::LazyState;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let builds = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&builds);
//! let computation: LazyState<i32, i32> = LazyState::defer(move || {
//!     counter.set(counter.get() + 1);
//!     stateflow::effect::State::new(|s: i32| (s + 1, s))
//! })
//! .map(|x| x * 10);
//!
//! assert_eq!(builds.get(), 0);
//! assert_eq!(computation.run_state(4), (5, 40));
//! assert_eq!(computation.run_state(4), (5, 40));
//! assert_eq!(builds.get(), 1);
//! ```

use std::rc::Rc;

use super::State;
use crate::control::{Lazy, MemoError};

type Thunk<S, A> = Box<dyn FnOnce() -> State<S, A>>;

/// A deferred, memoized [`State`] computation.
///
/// Clones share the memo cell, so forcing any clone forces them all.
pub struct LazyState<S, A>
where
    S: 'static,
    A: 'static,
{
    cell: Rc<Lazy<State<S, A>, Thunk<S, A>>>,
}

static_assertions::assert_not_impl_any!(LazyState<i32, i32>: Send, Sync);

impl<S, A> LazyState<S, A>
where
    S: 'static,
    A: 'static,
{
    /// Wraps a thunk that builds the strict computation on first demand.
    pub fn defer<F>(thunk: F) -> Self
    where
        F: FnOnce() -> State<S, A> + 'static,
    {
        let thunk: Thunk<S, A> = Box::new(thunk);
        Self {
            cell: Rc::new(Lazy::new(thunk)),
        }
    }

    /// Wraps an already-built strict computation. The result is forced.
    pub fn from_state(state: State<S, A>) -> Self {
        Self {
            cell: Rc::new(Lazy::new_with_value(state)),
        }
    }

    /// Lifts a state transition function, deferring its wrapping.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(S) -> (S, A) + 'static,
    {
        Self::defer(move || State::new(function))
    }

    /// Forces the cell and returns the strict computation.
    ///
    /// # Panics
    ///
    /// Panics if building the computation panics, or if an earlier force
    /// poisoned the cell.
    pub fn force(&self) -> State<S, A> {
        State::clone(&self.cell.force())
    }

    /// Forces the cell, reporting a poisoned cell as an error.
    ///
    /// # Errors
    ///
    /// Returns [`MemoError::Poisoned`] if an earlier force panicked.
    pub fn try_force(&self) -> Result<State<S, A>, MemoError> {
        self.cell.try_force().map(|state| State::clone(&state))
    }

    /// Returns whether the strict computation has been built.
    pub fn is_forced(&self) -> bool {
        self.cell.is_initialized()
    }

    /// Returns whether building the strict computation panicked.
    pub fn is_poisoned(&self) -> bool {
        self.cell.is_poisoned()
    }

    /// Forces the computation and runs it with the given initial state.
    ///
    /// # Panics
    ///
    /// Panics if forcing panics or the cell is poisoned; panics from the
    /// computation itself propagate unchanged.
    pub fn run_state(&self, initial_state: S) -> (S, A) {
        tracing::trace!(forced = self.is_forced(), "running lazy state computation");
        self.force().run_state(initial_state)
    }

    /// Runs the computation and returns only the result.
    pub fn eval_state(&self, initial_state: S) -> A {
        let (_, result) = self.run_state(initial_state);
        result
    }

    /// Runs the computation and returns only the final state.
    pub fn exec_state(&self, initial_state: S) -> S {
        let (final_state, _) = self.run_state(initial_state);
        final_state
    }

    /// Deferred [`State::inject`].
    pub fn inject(value: A) -> Self
    where
        A: Clone,
    {
        Self::defer(move || State::inject(value))
    }

    /// Alias for [`LazyState::inject`].
    pub fn pure(value: A) -> Self
    where
        A: Clone,
    {
        Self::inject(value)
    }

    /// Deferred [`State::map`].
    pub fn map<B, F>(self, function: F) -> LazyState<S, B>
    where
        F: Fn(A) -> B + 'static,
        B: 'static,
    {
        LazyState::defer(move || self.force().map(function))
    }

    /// Deferred [`State::bind`].
    ///
    /// Forcing the result forces `self`. The computation returned by
    /// `function` is forced each time the built computation reaches it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::LazyState;
    ///
    /// let chained: LazyState<i32, i32> = LazyState::get()
    ///     .bind(|current: i32| LazyState::put(current * 2).then(LazyState::inject(current)));
    ///
    /// assert!(!chained.is_forced());
    /// assert_eq!(chained.run_state(21), (42, 21));
    /// assert!(chained.is_forced());
    /// ```
    pub fn bind<B, F>(self, function: F) -> LazyState<S, B>
    where
        F: Fn(A) -> LazyState<S, B> + 'static,
        B: 'static,
    {
        LazyState::defer(move || self.force().bind(move |value| function(value).force()))
    }

    /// Alias for [`LazyState::bind`].
    pub fn flat_map<B, F>(self, function: F) -> LazyState<S, B>
    where
        F: Fn(A) -> LazyState<S, B> + 'static,
        B: 'static,
    {
        self.bind(function)
    }

    /// Alias for [`LazyState::bind`].
    pub fn and_then<B, F>(self, function: F) -> LazyState<S, B>
    where
        F: Fn(A) -> LazyState<S, B> + 'static,
        B: 'static,
    {
        self.bind(function)
    }

    /// Deferred [`State::then`].
    #[must_use]
    pub fn then<B>(self, next: LazyState<S, B>) -> LazyState<S, B>
    where
        B: 'static,
    {
        LazyState::defer(move || self.force().then(next.force()))
    }

    /// Deferred [`State::map2`]. Forces `self` before `other`.
    pub fn map2<B, C, F>(self, other: LazyState<S, B>, function: F) -> LazyState<S, C>
    where
        F: Fn(A, B) -> C + 'static,
        B: 'static,
        C: 'static,
    {
        LazyState::defer(move || {
            let first = self.force();
            first.map2(other.force(), function)
        })
    }

    /// Deferred [`State::product`].
    #[must_use]
    pub fn product<B>(self, other: LazyState<S, B>) -> LazyState<S, (A, B)>
    where
        B: 'static,
    {
        self.map2(other, |a, b| (a, b))
    }

    /// Deferred [`State::discard`].
    #[must_use]
    pub fn discard(self) -> Self
    where
        S: Clone,
    {
        Self::defer(move || self.force().discard())
    }

    /// Deferred [`State::fold_m`].
    ///
    /// `elements` is collected immediately; `step` is only called while the
    /// built computation runs.
    pub fn fold_m<X, F, I>(step: F, seed: A, elements: I) -> Self
    where
        F: Fn(A, X) -> Self + 'static,
        I: IntoIterator<Item = X>,
        A: Clone,
        X: Clone + 'static,
    {
        let elements: Vec<X> = elements.into_iter().collect();
        Self::defer(move || {
            State::fold_m(
                move |accumulator, element| step(accumulator, element).force(),
                seed,
                elements,
            )
        })
    }

    /// Deferred [`State::gets`].
    pub fn gets<F>(projection: F) -> Self
    where
        F: Fn(&S) -> A + 'static,
    {
        Self::defer(move || State::gets(projection))
    }
}

impl<S, F> LazyState<S, F>
where
    S: 'static,
    F: 'static,
{
    /// Deferred [`State::apply`]. Forces `self` before `argument`.
    pub fn apply<A, B>(self, argument: LazyState<S, A>) -> LazyState<S, B>
    where
        F: Fn(A) -> B,
        A: 'static,
        B: 'static,
    {
        LazyState::defer(move || {
            let function = self.force();
            function.apply(argument.force())
        })
    }
}

impl<S, A> LazyState<S, Vec<A>>
where
    S: 'static,
    A: 'static,
{
    /// Deferred [`State::sequence`].
    ///
    /// The input iterator is drained now, but no element is forced until the
    /// result is.
    pub fn sequence<I>(computations: I) -> Self
    where
        I: IntoIterator<Item = LazyState<S, A>>,
    {
        let computations: Vec<LazyState<S, A>> = computations.into_iter().collect();
        Self::defer(move || State::sequence(computations.iter().map(LazyState::force)))
    }

    /// Deferred [`State::traverse`].
    pub fn traverse<X, I, F>(elements: I, function: F) -> Self
    where
        I: IntoIterator<Item = X>,
        F: Fn(X) -> LazyState<S, A> + 'static,
        X: Clone + 'static,
    {
        let elements: Vec<X> = elements.into_iter().collect();
        Self::defer(move || State::traverse(elements, move |element| function(element).force()))
    }
}

impl<St> LazyState<St, St>
where
    St: Clone + 'static,
{
    /// Deferred [`State::get`].
    #[must_use]
    pub fn get() -> Self {
        Self::defer(State::get)
    }
}

impl<S> LazyState<S, ()>
where
    S: 'static,
{
    /// Deferred [`State::put`].
    pub fn put(new_state: S) -> Self
    where
        S: Clone,
    {
        Self::defer(move || State::put(new_state))
    }

    /// Deferred [`State::modify`].
    pub fn modify<F>(modifier: F) -> Self
    where
        F: Fn(S) -> S + 'static,
    {
        Self::defer(move || State::modify(modifier))
    }
}

impl<S, A> From<State<S, A>> for LazyState<S, A>
where
    S: 'static,
    A: 'static,
{
    fn from(state: State<S, A>) -> Self {
        Self::from_state(state)
    }
}

impl<S, A> Clone for LazyState<S, A>
where
    S: 'static,
    A: 'static,
{
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<S, A> std::fmt::Display for LazyState<S, A>
where
    S: 'static,
    A: 'static,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<LazyState>")
    }
}
