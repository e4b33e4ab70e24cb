//! State Monad - strict stateful computation.
//!
//! The State monad represents computations that thread a state through
//! a sequence of operations without the caller passing it around by hand.
//!
//! # Overview
//!
//! A `State<S, A>` encapsulates a function `S -> (S, A)`, where `S` is the
//! state type and `A` is the result type. The function takes the current
//! state and returns a potentially modified state together with a result.
//!
//! Composing two computations builds a new function; the state is threaded
//! between them each time the composed computation is run.
//!
//! # Laws
//!
//! ## Functor Laws
//!
//! - Identity: `state.map(|x| x) == state`
//! - Composition: `state.map(f).map(g) == state.map(|x| g(f(x)))`
//!
//! ## Monad Laws
//!
//! - Left Identity: `State::inject(a).bind(f) == f(a)`
//! - Right Identity: `m.bind(State::inject) == m`
//! - Associativity: `m.bind(f).bind(g) == m.bind(|x| f(x).bind(g))`
//!
//! ## `MonadState` Laws
//!
//! - Put Get Law: `put(s).then(get())` returns `s`
//! - Put Put Law: `put(s1).then(put(s2)) == put(s2)`
//! - Modify Composition: `modify(f).then(modify(g)) == modify(|s| g(f(s)))`
//!
//! # Examples
//!
//! ```rust
//! use stateflow::effect::State;
//!
//! fn increment() -> State<i32, ()> {
//!     State::modify(|count| count + 1)
//! }
//!
//! let computation = increment()
//!     .then(increment())
//!     .then(increment())
//!     .then(State::get());
//!
//! assert_eq!(computation.run_state(0), (3, 3));
//! ```

use std::rc::Rc;

/// A monad for computations that thread state through a sequence of operations.
///
/// `State<S, A>` represents a computation that, given an initial state of type `S`,
/// produces a new state of type `S` and a result of type `A`.
///
/// Cloning a `State` is cheap: the transition function is shared.
///
/// # Examples
///
/// ```rust
/// use stateflow::effect::State;
///
/// let computation: State<i32, i32> = State::get()
///     .bind(|current: i32| State::put(current + 1).then(State::inject(current)));
///
/// assert_eq!(computation.run_state(10), (11, 10));
/// ```
pub struct State<S, A>
where
    S: 'static,
    A: 'static,
{
    run_function: Rc<dyn Fn(S) -> (S, A)>,
}

static_assertions::assert_not_impl_any!(State<i32, i32>: Send, Sync);

impl<S, A> State<S, A>
where
    S: 'static,
    A: 'static,
{
    /// Creates a new State from a state transition function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s + 1, s * 2));
    /// assert_eq!(state.run_state(10), (11, 20));
    /// ```
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(S) -> (S, A) + 'static,
    {
        Self {
            run_function: Rc::new(function),
        }
    }

    /// Runs the computation with the given initial state.
    ///
    /// Returns the final state and the result.
    pub fn run_state(&self, initial_state: S) -> (S, A) {
        (self.run_function)(initial_state)
    }

    /// Runs the computation and returns only the result.
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s + 1, s * 2));
    /// assert_eq!(state.eval_state(10), 20);
    /// ```
    pub fn eval_state(&self, initial_state: S) -> A {
        let (_, result) = self.run_state(initial_state);
        result
    }

    /// Runs the computation and returns only the final state.
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s + 1, s * 2));
    /// assert_eq!(state.exec_state(10), 11);
    /// ```
    pub fn exec_state(&self, initial_state: S) -> S {
        let (final_state, _) = self.run_state(initial_state);
        final_state
    }

    /// Creates a State that returns a constant value without modifying the state.
    ///
    /// This is the identity element for `bind`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state: State<i32, &str> = State::inject("constant");
    /// assert_eq!(state.run_state(42), (42, "constant"));
    /// ```
    pub fn inject(value: A) -> Self
    where
        A: Clone,
    {
        Self::new(move |state| (state, value.clone()))
    }

    /// Alias for [`State::inject`], matching the Applicative name.
    pub fn pure(value: A) -> Self
    where
        A: Clone,
    {
        Self::inject(value)
    }

    /// Maps a function over the result of this State.
    ///
    /// The state passes through untouched relative to `self` alone.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state: State<i32, i32> = State::get();
    /// let mapped = state.map(|value| value * 2);
    /// assert_eq!(mapped.run_state(21), (21, 42));
    /// ```
    pub fn map<B, F>(self, function: F) -> State<S, B>
    where
        F: Fn(A) -> B + 'static,
        B: 'static,
    {
        let original_function = self.run_function;
        State::new(move |state| {
            let (new_state, result) = (original_function)(state);
            (new_state, function(result))
        })
    }

    /// Chains this State with a function that produces another State.
    ///
    /// Runs `self` on the incoming state, feeds its result to `function`,
    /// and runs the produced computation on the intermediate state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state: State<i32, i32> = State::new(|s: i32| (s + 1, s));
    /// let chained = state.bind(|value| State::new(move |s: i32| (s * 2, value + s)));
    /// // First: (11, 10), then with state 11: (22, 10 + 11)
    /// assert_eq!(chained.run_state(10), (22, 21));
    /// ```
    pub fn bind<B, F>(self, function: F) -> State<S, B>
    where
        F: Fn(A) -> State<S, B> + 'static,
        B: 'static,
    {
        let original_function = self.run_function;
        State::new(move |state| {
            let (intermediate_state, result) = (original_function)(state);
            function(result).run_state(intermediate_state)
        })
    }

    /// Alias for [`State::bind`].
    pub fn flat_map<B, F>(self, function: F) -> State<S, B>
    where
        F: Fn(A) -> State<S, B> + 'static,
        B: 'static,
    {
        self.bind(function)
    }

    /// Alias for [`State::bind`] to match Rust's naming conventions.
    pub fn and_then<B, F>(self, function: F) -> State<S, B>
    where
        F: Fn(A) -> State<S, B> + 'static,
        B: 'static,
    {
        self.bind(function)
    }

    /// Sequences two States, discarding the first result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let first: State<i32, ()> = State::modify(|s| s + 10);
    /// let sequenced = first.then(State::inject("result"));
    /// assert_eq!(sequenced.run_state(42), (52, "result"));
    /// ```
    #[must_use]
    pub fn then<B>(self, next: State<S, B>) -> State<S, B>
    where
        B: 'static,
    {
        self.bind(move |_| next.clone())
    }

    /// Combines two States using a binary function.
    ///
    /// `self` runs first, `other` runs on the state it leaves behind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state1: State<i32, i32> = State::new(|s: i32| (s + 1, s));
    /// let state2: State<i32, i32> = State::new(|s: i32| (s + 1, s * 2));
    /// let combined = state1.map2(state2, |a, b| a + b);
    /// // state1: (11, 10), state2 with 11: (12, 22)
    /// assert_eq!(combined.run_state(10), (12, 32));
    /// ```
    pub fn map2<B, C, F>(self, other: State<S, B>, function: F) -> State<S, C>
    where
        F: Fn(A, B) -> C + 'static,
        B: 'static,
        C: 'static,
    {
        let self_function = self.run_function;
        let other_function = other.run_function;
        State::new(move |state| {
            let (intermediate_state, result_a) = (self_function)(state);
            let (final_state, result_b) = (other_function)(intermediate_state);
            (final_state, function(result_a, result_b))
        })
    }

    /// Combines two States into a tuple.
    #[must_use]
    pub fn product<B>(self, other: State<S, B>) -> State<S, (A, B)>
    where
        B: 'static,
    {
        self.map2(other, |a, b| (a, b))
    }

    /// Runs `self` and keeps its result, but restores the state to what it
    /// was before `self` ran.
    ///
    /// `self` is still executed; only its state change is rolled back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let scratch: State<i32, i32> = State::modify(|s: i32| s * 100).then(State::get());
    /// assert_eq!(scratch.discard().run_state(3), (3, 300));
    /// ```
    #[must_use]
    pub fn discard(self) -> Self
    where
        S: Clone,
    {
        let original_function = self.run_function;
        Self::new(move |state: S| {
            let (_, result) = (original_function)(state.clone());
            (state, result)
        })
    }

    /// Left fold over `elements`, threading the state and an accumulator
    /// through `step` in element order.
    ///
    /// `fold_m(step, seed, [])` is `inject(seed)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let total = State::fold_m(
    ///     |sum: i32, x: i32| State::modify(move |calls: u32| calls + 1).then(State::inject(sum + x)),
    ///     0,
    ///     vec![1, 2, 3],
    /// );
    /// assert_eq!(total.run_state(0), (3, 6));
    /// ```
    pub fn fold_m<X, F, I>(step: F, seed: A, elements: I) -> Self
    where
        F: Fn(A, X) -> Self + 'static,
        I: IntoIterator<Item = X>,
        A: Clone,
        X: Clone + 'static,
    {
        let elements: Vec<X> = elements.into_iter().collect();
        Self::new(move |state| {
            elements
                .iter()
                .fold((state, seed.clone()), |(state, accumulator), element| {
                    step(accumulator, element.clone()).run_state(state)
                })
        })
    }

    /// Creates a State that projects a value from the current state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state: State<Vec<i32>, usize> = State::gets(Vec::len);
    /// assert_eq!(state.run_state(vec![1, 2, 3]), (vec![1, 2, 3], 3));
    /// ```
    pub fn gets<F>(projection: F) -> Self
    where
        F: Fn(&S) -> A + 'static,
    {
        Self::new(move |state| {
            let result = projection(&state);
            (state, result)
        })
    }
}

// =============================================================================
// Applicative apply
// =============================================================================

impl<S, F> State<S, F>
where
    S: 'static,
    F: 'static,
{
    /// Applies the function produced by `self` to the value produced by
    /// `argument`.
    ///
    /// `self` runs first against the incoming state, then `argument` runs
    /// against the state `self` leaves behind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let function: State<i32, fn(i32) -> i32> =
    ///     State::modify(|s: i32| s + 1).then(State::inject((|x: i32| x * 10) as fn(i32) -> i32));
    /// let argument: State<i32, i32> = State::get();
    ///
    /// // The argument sees the state left by the function side.
    /// assert_eq!(function.apply(argument).run_state(1), (2, 20));
    /// ```
    pub fn apply<A, B>(self, argument: State<S, A>) -> State<S, B>
    where
        F: Fn(A) -> B,
        A: 'static,
        B: 'static,
    {
        self.map2(argument, |function, value| function(value))
    }
}

// =============================================================================
// Collection operations
// =============================================================================

impl<S, A> State<S, Vec<A>>
where
    S: 'static,
    A: 'static,
{
    /// Runs each computation in order, threading the state left to right and
    /// collecting the results in the same order.
    ///
    /// `sequence([])` is `inject(vec![])`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let tick = || State::new(|s: i32| (s + 1, s));
    /// let all = State::sequence(vec![tick(), tick(), tick()]);
    /// assert_eq!(all.run_state(0), (3, vec![0, 1, 2]));
    /// ```
    pub fn sequence<I>(computations: I) -> Self
    where
        I: IntoIterator<Item = State<S, A>>,
    {
        let computations: Vec<State<S, A>> = computations.into_iter().collect();
        Self::new(move |state| {
            computations.iter().fold(
                (state, Vec::with_capacity(computations.len())),
                |(state, mut results), computation| {
                    let (next_state, result) = computation.run_state(state);
                    results.push(result);
                    (next_state, results)
                },
            )
        })
    }

    /// Maps every element to a computation and sequences them.
    ///
    /// `function` is called while the computation runs, once per element and
    /// in element order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let labelled = State::traverse(vec!["a", "b"], |name: &'static str| {
    ///     State::new(move |n: u32| (n + 1, format!("{name}{n}")))
    /// });
    /// assert_eq!(labelled.run_state(0), (2, vec!["a0".to_string(), "b1".to_string()]));
    /// ```
    pub fn traverse<X, I, F>(elements: I, function: F) -> Self
    where
        I: IntoIterator<Item = X>,
        F: Fn(X) -> State<S, A> + 'static,
        X: Clone + 'static,
    {
        let elements: Vec<X> = elements.into_iter().collect();
        Self::new(move |state| {
            elements.iter().fold(
                (state, Vec::with_capacity(elements.len())),
                |(state, mut results), element| {
                    let (next_state, result) = function(element.clone()).run_state(state);
                    results.push(result);
                    (next_state, results)
                },
            )
        })
    }
}

// =============================================================================
// MonadState Operations (as inherent methods)
// =============================================================================

impl<St> State<St, St>
where
    St: Clone + 'static,
{
    /// Creates a State that returns the current state without modifying it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state: State<i32, i32> = State::get();
    /// assert_eq!(state.run_state(42), (42, 42));
    /// ```
    #[must_use]
    pub fn get() -> Self {
        Self::new(|state: St| (state.clone(), state))
    }
}

impl<S> State<S, ()>
where
    S: 'static,
{
    /// Creates a State that replaces the current state with a new value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state: State<i32, ()> = State::put(100);
    /// assert_eq!(state.run_state(42), (100, ()));
    /// ```
    pub fn put(new_state: S) -> Self
    where
        S: Clone,
    {
        Self::new(move |_| (new_state.clone(), ()))
    }

    /// Creates a State that modifies the current state using a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::effect::State;
    ///
    /// let state: State<i32, ()> = State::modify(|x| x * 2);
    /// assert_eq!(state.run_state(21), (42, ()));
    /// ```
    pub fn modify<F>(modifier: F) -> Self
    where
        F: Fn(S) -> S + 'static,
    {
        Self::new(move |state| (modifier(state), ()))
    }
}

impl<S, A> Clone for State<S, A>
where
    S: 'static,
    A: 'static,
{
    fn clone(&self) -> Self {
        Self {
            run_function: Rc::clone(&self.run_function),
        }
    }
}

impl<S, A> std::fmt::Display for State<S, A>
where
    S: 'static,
    A: 'static,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<State>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn test_display_state() {
        let state: State<i32, i32> = State::new(|s: i32| (s + 1, s * 2));
        assert_eq!(format!("{state}"), "<State>");
    }

    #[rstest]
    fn state_new_and_run() {
        let state: State<i32, i32> = State::new(|s: i32| (s + 1, s * 2));
        assert_eq!(state.run_state(10), (11, 20));
        assert_eq!(state.eval_state(10), 20);
        assert_eq!(state.exec_state(10), 11);
    }

    #[rstest]
    #[case(0, 7)]
    #[case(42, 7)]
    #[case(-3, 7)]
    fn state_inject_does_not_modify_state(#[case] initial: i32, #[case] value: i32) {
        let state: State<i32, i32> = State::inject(value);
        assert_eq!(state.run_state(initial), (initial, value));
    }

    #[rstest]
    fn state_put_then_get_round_trip() {
        let state: State<i32, i32> = State::put(5).bind(|()| State::get());
        assert_eq!(state.run_state(-1), (5, 5));
    }

    #[rstest]
    fn state_modify_composes_in_order() {
        let state: State<i32, ()> = State::modify(|x: i32| x + 1).bind(|()| State::modify(|x| x * 10));
        assert_eq!(state.run_state(2), (30, ()));
    }

    #[rstest]
    fn state_discard_restores_state() {
        let mutating: State<Vec<i32>, usize> = State::modify(|mut log: Vec<i32>| {
            log.push(9);
            log
        })
        .then(State::gets(Vec::len));

        assert_eq!(mutating.discard().run_state(vec![1]), (vec![1], 2));
    }

    #[rstest]
    fn state_discard_still_runs_the_computation() {
        let calls = Rc::new(Cell::new(0));
        let counted_calls = Rc::clone(&calls);
        let counted: State<i32, i32> = State::new(move |s| {
            counted_calls.set(counted_calls.get() + 1);
            (s + 1, s)
        });

        let _ = counted.discard().run_state(0);
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn state_sequence_empty_is_inject() {
        let state: State<i32, Vec<i32>> = State::sequence(Vec::new());
        assert_eq!(state.run_state(4), (4, Vec::new()));
    }

    #[rstest]
    fn state_fold_m_empty_is_inject_seed() {
        let state = State::fold_m(|acc: i32, x: i32| State::inject(acc + x), 17, Vec::new());
        assert_eq!(state.run_state("unchanged"), ("unchanged", 17));
    }

    #[rstest]
    fn state_clone_shares_behaviour() {
        let state: State<i32, i32> = State::new(|s: i32| (s + 1, s * 2));
        let cloned = state.clone();
        assert_eq!(state.run_state(10), cloned.run_state(10));
    }
}
