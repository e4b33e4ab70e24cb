//! Lazy evaluation with memoization.
//!
//! This module provides the `Lazy<T, F>` memo cell: a single-assignment cache
//! that is either still holding its initializer, holding the computed value,
//! or poisoned because the initializer panicked.
//!
//! The cell is the only interior-mutable piece of the crate. `LazyState`
//! stores the strict computation it builds in one of these.
//!
//! # Examples
//!
//! ```rust
//! use stateflow::control::Lazy;
//!
//! let lazy = Lazy::new(|| 40 + 2);
//! assert!(!lazy.is_initialized());
//!
//! assert_eq!(*lazy.force(), 42);
//! assert!(lazy.is_initialized());
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;

use super::MemoError;

/// Internal state of a `Lazy` cell.
///
/// Transitions only ever go `Pending -> Forced` or `Pending -> Poisoned`.
enum Memo<T, F> {
    Pending(F),
    Forced(T),
    Poisoned,
}

/// A lazily evaluated value with memoization.
///
/// `Lazy<T, F>` defers computation until the value is first accessed via `force()`.
/// Once computed, the value is cached and subsequent calls to `force()` return
/// the cached value without recomputation.
///
/// # Type Parameters
///
/// * `T` - The type of the computed value
/// * `F` - The type of the initialization function (defaults to `fn() -> T`)
///
/// # Thread Safety
///
/// This type is NOT thread-safe. It is built on `RefCell` and is `!Sync`.
///
/// # Examples
///
/// ```rust
/// use stateflow::control::Lazy;
/// use std::cell::Cell;
///
/// let call_count = Cell::new(0);
/// let lazy = Lazy::new(|| {
///     call_count.set(call_count.get() + 1);
///     42
/// });
///
/// assert_eq!(call_count.get(), 0);
///
/// let _ = lazy.force();
/// let _ = lazy.force();
/// assert_eq!(call_count.get(), 1);
/// ```
pub struct Lazy<T, F = fn() -> T> {
    state: RefCell<Memo<T, F>>,
}

impl<T, F: FnOnce() -> T> Lazy<T, F> {
    /// Creates a new lazy value with the given initialization function.
    ///
    /// The function will not be called until `force()` is invoked.
    #[inline]
    pub const fn new(initializer: F) -> Self {
        Self {
            state: RefCell::new(Memo::Pending(initializer)),
        }
    }

    /// Forces evaluation of the lazy value and returns a reference to it.
    ///
    /// If the value has not been computed yet, the initialization function
    /// is called and the result is cached. Subsequent calls return the
    /// cached value.
    ///
    /// # Panics
    ///
    /// - If the initialization function panics. The cell is poisoned and the
    ///   panic propagates unchanged.
    /// - If the cell was poisoned by an earlier force.
    /// - If called re-entrantly from inside its own initializer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::control::Lazy;
    ///
    /// let lazy = Lazy::new(|| 42);
    /// assert_eq!(*lazy.force(), 42);
    /// ```
    pub fn force(&self) -> Ref<'_, T> {
        match self.try_force() {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }

    /// Forces evaluation, reporting a poisoned cell as an error.
    ///
    /// A panic raised by the initializer itself still propagates; only a
    /// cell that was poisoned by an *earlier* force yields `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoError::Poisoned`] if a previous initialization panicked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::control::{Lazy, MemoError};
    /// use std::panic::{AssertUnwindSafe, catch_unwind};
    ///
    /// let lazy: Lazy<i32, _> = Lazy::new(|| panic!("boom"));
    /// let _ = catch_unwind(AssertUnwindSafe(|| lazy.force().clone()));
    ///
    /// assert_eq!(lazy.try_force().err(), Some(MemoError::Poisoned));
    /// ```
    pub fn try_force(&self) -> Result<Ref<'_, T>, MemoError> {
        // Short borrow so that the initializer can run without an outstanding Ref.
        let needs_initialization = match &*self.state.borrow() {
            Memo::Forced(_) => false,
            Memo::Pending(_) => true,
            Memo::Poisoned => {
                tracing::warn!("forced a poisoned lazy cell");
                return Err(MemoError::Poisoned);
            }
        };

        if needs_initialization {
            self.initialize();
        }

        Ok(Ref::map(self.state.borrow(), |state| match state {
            Memo::Forced(value) => value,
            _ => unreachable!("lazy cell is initialized at this point"),
        }))
    }

    /// Runs the initializer.
    ///
    /// The cell is switched to `Poisoned` before the initializer runs, so a
    /// panicking initializer leaves it poisoned.
    fn initialize(&self) {
        let mut state = self.state.borrow_mut();

        let Memo::Pending(initializer) = std::mem::replace(&mut *state, Memo::Poisoned) else {
            unreachable!("initialize is only called on a pending cell")
        };

        tracing::trace!("forcing lazy cell");
        let value = initializer();
        *state = Memo::Forced(value);
        tracing::trace!("lazy cell forced");
    }
}

impl<T, F> Lazy<T, F> {
    /// Creates a new lazy value that is already initialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::control::Lazy;
    ///
    /// let lazy: Lazy<i32> = Lazy::new_with_value(42);
    /// assert!(lazy.is_initialized());
    /// ```
    #[inline]
    pub const fn new_with_value(value: T) -> Self {
        Self {
            state: RefCell::new(Memo::Forced(value)),
        }
    }

    /// Returns a reference to the value if it has been initialized.
    ///
    /// Unlike `force()`, this method does not trigger initialization.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::control::Lazy;
    ///
    /// let lazy = Lazy::new(|| 42);
    /// assert!(lazy.get().is_none());
    ///
    /// let _ = lazy.force();
    /// assert_eq!(*lazy.get().unwrap(), 42);
    /// ```
    pub fn get(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.state.borrow(), |state| match state {
            Memo::Forced(value) => Some(value),
            _ => None,
        })
        .ok()
    }

    /// Returns whether the value has been initialized.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        matches!(&*self.state.borrow(), Memo::Forced(_))
    }

    /// Returns whether the lazy value has been poisoned.
    ///
    /// A lazy value becomes poisoned if the initialization function panics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::control::Lazy;
    /// use std::panic::{AssertUnwindSafe, catch_unwind};
    ///
    /// let lazy: Lazy<i32, _> = Lazy::new(|| panic!("initialization failed"));
    ///
    /// let _ = catch_unwind(AssertUnwindSafe(|| *lazy.force()));
    ///
    /// assert!(lazy.is_poisoned());
    /// ```
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        matches!(&*self.state.borrow(), Memo::Poisoned)
    }
}

impl<T> Lazy<T, fn() -> T> {
    /// Lifts a value into an already-forced cell.
    ///
    /// ```rust
    /// use stateflow::control::Lazy;
    ///
    /// let lazy = Lazy::pure(42);
    /// assert_eq!(*lazy.force(), 42);
    /// ```
    #[inline]
    pub const fn pure(value: T) -> Self {
        Self::new_with_value(value)
    }
}

impl<T, F: FnOnce() -> T> Lazy<T, F> {
    /// Consumes the Lazy and returns the inner value, forcing it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`MemoError::Poisoned`] if a previous initialization panicked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::control::Lazy;
    ///
    /// let lazy = Lazy::new(|| 42);
    /// assert_eq!(lazy.into_inner(), Ok(42));
    /// ```
    pub fn into_inner(self) -> Result<T, MemoError> {
        match self.state.into_inner() {
            Memo::Forced(value) => Ok(value),
            Memo::Pending(initializer) => Ok(initializer()),
            Memo::Poisoned => Err(MemoError::Poisoned),
        }
    }

    fn into_forced(self) -> T {
        match self.into_inner() {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

// =============================================================================
// Functor-like Operations (map, flat_map)
// =============================================================================

impl<T, F: FnOnce() -> T> Lazy<T, F> {
    /// Applies a function to the lazy value, producing a new lazy value.
    ///
    /// ```rust
    /// use stateflow::control::Lazy;
    ///
    /// let doubled = Lazy::new(|| 21).map(|x| x * 2);
    /// assert_eq!(*doubled.force(), 42);
    /// ```
    pub fn map<U, G>(self, function: G) -> Lazy<U, impl FnOnce() -> U>
    where
        G: FnOnce(T) -> U,
    {
        Lazy::new(move || function(self.into_forced()))
    }

    /// Applies a function that returns a Lazy, then flattens the result.
    ///
    /// ```rust
    /// use stateflow::control::Lazy;
    ///
    /// let result = Lazy::new(|| 21).flat_map(|x| Lazy::new(move || x * 2));
    /// assert_eq!(*result.force(), 42);
    /// ```
    pub fn flat_map<U, FunctionResult, G>(self, function: G) -> Lazy<U, impl FnOnce() -> U>
    where
        FunctionResult: FnOnce() -> U,
        G: FnOnce(T) -> Lazy<U, FunctionResult>,
    {
        Lazy::new(move || function(self.into_forced()).into_forced())
    }

    /// Combines two lazy values into a lazy tuple.
    pub fn zip<U, OtherFunction>(
        self,
        other: Lazy<U, OtherFunction>,
    ) -> Lazy<(T, U), impl FnOnce() -> (T, U)>
    where
        OtherFunction: FnOnce() -> U,
    {
        self.zip_with(other, |first, second| (first, second))
    }

    /// Combines two lazy values using a function. `self` is forced first.
    ///
    /// ```rust
    /// use stateflow::control::Lazy;
    ///
    /// let sum = Lazy::new(|| 20).zip_with(Lazy::new(|| 22), |a, b| a + b);
    /// assert_eq!(*sum.force(), 42);
    /// ```
    pub fn zip_with<U, V, OtherFunction, CombineFunction>(
        self,
        other: Lazy<U, OtherFunction>,
        function: CombineFunction,
    ) -> Lazy<V, impl FnOnce() -> V>
    where
        OtherFunction: FnOnce() -> U,
        CombineFunction: FnOnce(T, U) -> V,
    {
        Lazy::new(move || {
            let first = self.into_forced();
            let second = other.into_forced();
            function(first, second)
        })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T: Default> Default for Lazy<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Lazy<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.borrow() {
            Memo::Forced(value) => formatter.debug_tuple("Lazy").field(value).finish(),
            Memo::Pending(_) => formatter.debug_tuple("Lazy").field(&"<uninit>").finish(),
            Memo::Poisoned => formatter.debug_tuple("Lazy").field(&"<poisoned>").finish(),
        }
    }
}

// Deref is not implemented: force() hands out a Ref<'_, T>, not a &T.

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[rstest]
    fn test_lazy_basic_creation() {
        let lazy = Lazy::new(|| 42);
        assert!(!lazy.is_initialized());
        assert!(!lazy.is_poisoned());
    }

    #[rstest]
    fn test_lazy_memoization() {
        let call_count = Cell::new(0);
        let lazy = Lazy::new(|| {
            call_count.set(call_count.get() + 1);
            42
        });

        assert_eq!(call_count.get(), 0);
        let _ = lazy.force();
        let _ = lazy.force();
        assert_eq!(call_count.get(), 1);
    }

    #[rstest]
    fn test_lazy_poisoned_after_panic() {
        let call_count = Cell::new(0);
        let lazy: Lazy<i32, _> = Lazy::new(|| {
            call_count.set(call_count.get() + 1);
            panic!("initializer failed")
        });

        let first = catch_unwind(AssertUnwindSafe(|| *lazy.force()));
        assert!(first.is_err());
        assert!(lazy.is_poisoned());

        let second = catch_unwind(AssertUnwindSafe(|| *lazy.force()));
        assert!(second.is_err());
        assert_eq!(lazy.try_force().err(), Some(MemoError::Poisoned));
        assert_eq!(call_count.get(), 1);
    }

    #[rstest]
    fn test_lazy_map_is_deferred() {
        let call_count = Cell::new(0);
        let lazy = Lazy::new(|| {
            call_count.set(call_count.get() + 1);
            21
        })
        .map(|x| x * 2);

        assert_eq!(call_count.get(), 0);
        assert_eq!(*lazy.force(), 42);
        assert_eq!(call_count.get(), 1);
    }

    #[rstest]
    fn test_lazy_debug_states() {
        let lazy = Lazy::new(|| 7);
        assert_eq!(format!("{lazy:?}"), "Lazy(\"<uninit>\")");
        let _ = lazy.force();
        assert_eq!(format!("{lazy:?}"), "Lazy(7)");
    }
}
