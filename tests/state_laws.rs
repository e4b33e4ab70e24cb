#![cfg(feature = "effect")]
//! Property-based tests for the strict State laws.
//!
//! ## Functor Laws
//! - Identity: state.map(|x| x) == state
//! - Composition: state.map(f).map(g) == state.map(|x| g(f(x)))
//!
//! ## Monad Laws
//! - Left Identity: inject(a).bind(f) == f(a)
//! - Right Identity: m.bind(inject) == m
//! - Associativity: m.bind(f).bind(g) == m.bind(|x| f(x).bind(g))
//!
//! ## MonadState Laws
//! - Put Get Law: put(s1).bind(|_| get()) runs to (s1, s1)
//! - Put Put Law: put(s1).then(put(s2)) == put(s2)
//! - Modify Composition: modify(f1).bind(|_| modify(f2)) runs to (f2(f1(s0)), ())
//! - Discard: m.discard() runs to (s0, value of m from s0)

use proptest::prelude::*;
use stateflow::effect::State;

fn step(s: i32) -> (i32, i32) {
    (s.wrapping_add(1), s.wrapping_mul(2))
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_state_functor_identity(initial_state in -1000i32..1000i32) {
        let state: State<i32, i32> = State::new(step);
        let mapped: State<i32, i32> = State::new(step).map(|x| x);

        prop_assert_eq!(state.run_state(initial_state), mapped.run_state(initial_state));
    }

    #[test]
    fn prop_state_functor_composition(initial_state in -100i32..100i32) {
        let function1 = |x: i32| x.wrapping_add(1);
        let function2 = |x: i32| x.wrapping_mul(2);

        let left = State::new(step).map(function1).map(function2);
        let right = State::new(step).map(move |x| function2(function1(x)));

        prop_assert_eq!(left.run_state(initial_state), right.run_state(initial_state));
    }

    /// map is bind followed by inject
    #[test]
    fn prop_state_map_is_bind_inject(initial_state in -1000i32..1000i32) {
        let via_map = State::new(step).map(|x| x.wrapping_sub(3));
        let via_bind = State::new(step).bind(|x| State::inject(x.wrapping_sub(3)));

        prop_assert_eq!(via_map.run_state(initial_state), via_bind.run_state(initial_state));
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_state_monad_left_identity(value in -1000i32..1000i32, initial_state in -1000i32..1000i32) {
        let function = |a: i32| State::new(move |s: i32| (s.wrapping_add(1), a.wrapping_add(s)));

        let left: State<i32, i32> = State::inject(value).bind(function);
        let right: State<i32, i32> = function(value);

        prop_assert_eq!(left.run_state(initial_state), right.run_state(initial_state));
    }

    #[test]
    fn prop_state_monad_right_identity(initial_state in -1000i32..1000i32) {
        let state: State<i32, i32> = State::new(step);
        let right_identity: State<i32, i32> = State::new(step).bind(State::inject);

        prop_assert_eq!(state.run_state(initial_state), right_identity.run_state(initial_state));
    }

    #[test]
    fn prop_state_monad_associativity(initial_state in -100i32..100i32) {
        let function1 = |a: i32| State::new(move |s: i32| (s.wrapping_add(1), a.wrapping_add(s)));
        let function2 = |b: i32| State::new(move |s: i32| (s.wrapping_mul(2), b.wrapping_mul(s)));

        let left = State::new(step).bind(function1).bind(function2);
        let right = State::new(step).bind(move |x| function1(x).bind(function2));

        prop_assert_eq!(left.run_state(initial_state), right.run_state(initial_state));
    }
}

// =============================================================================
// MonadState Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_state_put_get_round_trip(initial_state in -1000i32..1000i32, new_state in -1000i32..1000i32) {
        let put_get: State<i32, i32> = State::put(new_state).bind(|()| State::get());

        prop_assert_eq!(put_get.run_state(initial_state), (new_state, new_state));
    }

    #[test]
    fn prop_state_put_put_law(initial_state in -1000i32..1000i32, state1 in -1000i32..1000i32, state2 in -1000i32..1000i32) {
        let put_put: State<i32, ()> = State::put(state1).then(State::put(state2));
        let single_put: State<i32, ()> = State::put(state2);

        prop_assert_eq!(put_put.run_state(initial_state), single_put.run_state(initial_state));
    }

    #[test]
    fn prop_state_modify_composition_law(initial_state in -50i32..50i32) {
        let modifier_f = |s: i32| s.wrapping_add(10);
        let modifier_g = |s: i32| s.wrapping_mul(2);

        let chained: State<i32, ()> = State::modify(modifier_f).bind(move |()| State::modify(modifier_g));

        prop_assert_eq!(chained.run_state(initial_state), (modifier_g(modifier_f(initial_state)), ()));
    }

    #[test]
    fn prop_state_discard_isolates_state(initial_state in -1000i32..1000i32) {
        let mutating: State<i32, i32> = State::new(step).bind(|x| State::put(x).then(State::inject(x)));
        let expected_value = mutating.eval_state(initial_state);

        prop_assert_eq!(mutating.discard().run_state(initial_state), (initial_state, expected_value));
    }

    #[test]
    fn prop_state_get_gets_equivalence(initial_state in -1000i32..1000i32) {
        let via_get: State<i32, i32> = State::get().map(|s: i32| s.wrapping_mul(2));
        let via_gets: State<i32, i32> = State::gets(|s: &i32| s.wrapping_mul(2));

        prop_assert_eq!(via_get.run_state(initial_state), via_gets.run_state(initial_state));
    }
}

// =============================================================================
// Applicative and Collection Laws
// =============================================================================

proptest! {
    /// apply runs the function side before the argument side
    #[test]
    fn prop_state_apply_is_left_to_right(initial_state in -1000i32..1000i32) {
        let function: State<i32, fn(i32) -> i32> =
            State::new(|s: i32| (s.wrapping_add(1), (|x: i32| x.wrapping_neg()) as fn(i32) -> i32));
        let argument: State<i32, i32> = State::get();

        let expected = initial_state.wrapping_add(1);
        prop_assert_eq!(
            function.apply(argument).run_state(initial_state),
            (expected, expected.wrapping_neg())
        );
    }

    /// sequence threads state through every element and keeps order
    #[test]
    fn prop_state_sequence_matches_manual_threading(values in prop::collection::vec(-100i32..100i32, 0..16)) {
        let computations = values
            .iter()
            .map(|&value| State::new(move |s: i32| (s.wrapping_add(value), s)));
        let sequenced = State::sequence(computations);

        let mut expected_values = Vec::with_capacity(values.len());
        let mut expected_state = 0i32;
        for value in &values {
            expected_values.push(expected_state);
            expected_state = expected_state.wrapping_add(*value);
        }

        prop_assert_eq!(sequenced.run_state(0), (expected_state, expected_values));
    }

    /// fold_m over a list agrees with an ordinary left fold
    #[test]
    fn prop_state_fold_m_matches_fold(values in prop::collection::vec(-100i32..100i32, 0..16)) {
        let folded = State::fold_m(
            |accumulator: i32, value: i32| {
                State::modify(|count: usize| count + 1).then(State::inject(accumulator.wrapping_add(value)))
            },
            0,
            values.clone(),
        );

        let expected = values.iter().fold(0i32, |accumulator, value| accumulator.wrapping_add(*value));
        prop_assert_eq!(folded.run_state(0), (values.len(), expected));
    }
}
