//! Condition-selected acquisition: an if/else for scoped resources.
//!
//! [`EitherScope`] holds two resources and a boolean fixed at construction;
//! acquiring it acquires only the selected branch, and releasing it releases
//! that same branch. [`Conditional`] is the single-branch form whose false
//! path acquires a no-op resource yielding nothing.
//!
//! Both branches are constructed eagerly - shape errors surface at
//! construction - but acquisition-time side effects stay deferred and hit
//! only the selected branch.

use std::fmt;

use crate::either::Either;
use crate::null::NullScope;
use crate::scoped::{Exit, Scoped, Suppression};

/// A two-branch scoped-resource selector.
///
/// The boolean decides at construction which branch a block will run over;
/// the other branch is held but never acquired and never released. The
/// acquired value comes back tagged: `Either::Left` from the true branch,
/// `Either::Right` from the false branch. When both branches yield the same
/// type, [`Either::into_inner`](crate::Either::into_inner) drops the tag.
///
/// Both branches must share an error type; errors and suppression decisions
/// from the selected branch pass through unchanged.
///
/// # Example
///
/// ```rust
/// use floodgate::{EitherScope, NullScope, Scoped};
///
/// let verbose = false;
/// let scope = EitherScope::new(
///     verbose,
///     NullScope::<_, String>::new("full log"),
///     NullScope::<_, String>::new("summary"),
/// );
/// let result = scope.with(|line| Ok(line.into_inner().to_uppercase()));
/// assert_eq!(result, Ok(Some("SUMMARY".to_string())));
/// ```
pub struct EitherScope<A, B> {
    condition: bool,
    when_true: A,
    when_false: B,
}

impl<A, B> EitherScope<A, B>
where
    A: Scoped,
    B: Scoped<Error = A::Error>,
{
    /// Select `when_true` if `condition` holds, `when_false` otherwise.
    pub fn new(condition: bool, when_true: A, when_false: B) -> Self {
        EitherScope {
            condition,
            when_true,
            when_false,
        }
    }

    /// The selecting condition, fixed at construction.
    pub fn condition(&self) -> bool {
        self.condition
    }
}

impl<A, B> fmt::Debug for EitherScope<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EitherScope")
            .field("condition", &self.condition)
            .finish_non_exhaustive()
    }
}

impl<A, B> Scoped for EitherScope<A, B>
where
    A: Scoped,
    B: Scoped<Error = A::Error>,
{
    type Output = Either<A::Output, B::Output>;
    type Error = A::Error;

    /// Acquires only the selected branch; the other branch is untouched.
    fn acquire(&mut self) -> Result<Self::Output, Self::Error> {
        if self.condition {
            self.when_true.acquire().map(Either::Left)
        } else {
            self.when_false.acquire().map(Either::Right)
        }
    }

    /// Releases the branch selected at construction, same one acquire used.
    fn release(&mut self, exit: Exit<'_, Self::Error>) -> Result<Suppression, Self::Error> {
        if self.condition {
            self.when_true.release(exit)
        } else {
            self.when_false.release(exit)
        }
    }
}

/// A single-branch conditional scope.
///
/// `Conditional::new(condition, scoped)` behaves like
/// [`EitherScope::new(condition, scoped, NullScope::default())`](EitherScope)
/// and indeed is built on it: when the condition is false a no-op resource
/// is acquired instead and the block sees `None`; the wrapped resource is
/// never touched.
///
/// # Example
///
/// ```rust
/// use floodgate::{Conditional, NullScope, Scoped};
///
/// let scope = Conditional::new(true, NullScope::<_, String>::new("handle"));
/// let result = scope.with(|maybe| Ok(maybe.is_some()));
/// assert_eq!(result, Ok(Some(true)));
///
/// let scope = Conditional::new(false, NullScope::<_, String>::new("handle"));
/// let result = scope.with(|maybe| Ok(maybe.is_some()));
/// assert_eq!(result, Ok(Some(false)));
/// ```
pub struct Conditional<S: Scoped> {
    inner: EitherScope<S, NullScope<(), S::Error>>,
}

impl<S: Scoped> Conditional<S> {
    /// Acquire `scoped` only if `condition` holds.
    pub fn new(condition: bool, scoped: S) -> Self {
        Conditional {
            inner: EitherScope::new(condition, scoped, NullScope::new(())),
        }
    }

    /// The selecting condition, fixed at construction.
    pub fn condition(&self) -> bool {
        self.inner.condition()
    }
}

impl<S: Scoped> fmt::Debug for Conditional<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditional")
            .field("condition", &self.inner.condition())
            .finish_non_exhaustive()
    }
}

impl<S: Scoped> Scoped for Conditional<S> {
    type Output = Option<S::Output>;
    type Error = S::Error;

    /// `Some` on the true path, `None` (no placeholder) on the false path.
    fn acquire(&mut self) -> Result<Self::Output, Self::Error> {
        Ok(self.inner.acquire()?.into_left())
    }

    fn release(&mut self, exit: Exit<'_, Self::Error>) -> Result<Suppression, Self::Error> {
        self.inner.release(exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SpyScope;
    use crate::{with_scoped, Scoped};

    #[test]
    fn true_branch_only_is_acquired() {
        let a = SpyScope::<_, String>::new("left");
        let b = SpyScope::<_, String>::new("right");
        let (log_a, log_b) = (a.log(), b.log());

        let mut scope = EitherScope::new(true, a, b);
        assert_eq!(scope.acquire(), Ok(Either::Left("left")));
        assert_eq!(log_a.acquires(), 1);
        assert_eq!(log_b.acquires(), 0);
    }

    #[test]
    fn false_branch_only_is_acquired() {
        let a = SpyScope::<_, String>::new("left");
        let b = SpyScope::<_, String>::new("right");
        let (log_a, log_b) = (a.log(), b.log());

        let mut scope = EitherScope::new(false, a, b);
        assert_eq!(scope.acquire(), Ok(Either::Right("right")));
        assert_eq!(log_a.acquires(), 0);
        assert_eq!(log_b.acquires(), 1);
    }

    #[test]
    fn release_hits_the_acquired_branch_only() {
        for condition in [true, false] {
            let a = SpyScope::<_, String>::new(());
            let b = SpyScope::<_, String>::new(());
            let (log_a, log_b) = (a.log(), b.log());

            let scope = EitherScope::new(condition, a, b);
            let result = with_scoped(scope, |_| Ok(()));
            assert_eq!(result, Ok(Some(())));

            let counts = (log_a.releases(), log_b.releases());
            assert_eq!(counts, if condition { (1, 0) } else { (0, 1) });
        }
    }

    #[test]
    fn release_after_error_stays_on_selected_branch() {
        let a = SpyScope::<_, String>::new(());
        let b = SpyScope::<_, String>::new(());
        let (log_a, log_b) = (a.log(), b.log());

        let scope = EitherScope::new(true, a, b);
        let result: Result<Option<()>, _> = with_scoped(scope, |_| Err("boom".to_string()));

        assert_eq!(result, Err("boom".to_string()));
        assert_eq!((log_a.releases(), log_b.releases()), (1, 0));
        assert_eq!(log_a.error_exits(), 1);
    }

    #[test]
    fn selected_branch_error_propagates() {
        let bad = SpyScope::<(), String>::failing_acquire("no fd".to_string());
        let good = SpyScope::<(), String>::new(());
        let good_log = good.log();

        let mut scope = EitherScope::new(true, bad, good);
        assert_eq!(scope.acquire(), Err("no fd".to_string()));
        assert_eq!(good_log.acquires(), 0);
    }

    #[test]
    fn suppression_passes_through_selected_branch() {
        let suppressing = SpyScope::<_, String>::new(()).suppress_errors();
        let other = SpyScope::<_, String>::new(());

        let scope = EitherScope::new(true, suppressing, other);
        let result: Result<Option<()>, _> = with_scoped(scope, |_| Err("boom".to_string()));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn conditional_true_acquires_delegate() {
        let spy = SpyScope::<_, String>::new("handle");
        let log = spy.log();

        let mut scope = Conditional::new(true, spy);
        assert!(scope.condition());
        assert_eq!(scope.acquire(), Ok(Some("handle")));
        assert_eq!(log.acquires(), 1);
    }

    #[test]
    fn conditional_false_yields_absent_and_skips_delegate() {
        let spy = SpyScope::<_, String>::new("handle");
        let log = spy.log();

        let scope = Conditional::new(false, spy);
        let result = with_scoped(scope, |maybe| {
            assert_eq!(maybe, None);
            Ok(())
        });

        assert_eq!(result, Ok(Some(())));
        assert_eq!(log.acquires(), 0);
        assert_eq!(log.releases(), 0);
    }

    #[test]
    fn conditional_false_release_never_suppresses() {
        let spy = SpyScope::<_, String>::new("handle").suppress_errors();

        // Delegate would suppress, but it is not the selected branch.
        let scope = Conditional::new(false, spy);
        let result: Result<Option<()>, _> = with_scoped(scope, |_| Err("boom".to_string()));
        assert_eq!(result, Err("boom".to_string()));
    }

    #[test]
    fn debug_shows_condition() {
        let scope = EitherScope::new(
            true,
            NullScope::<i32, String>::new(1),
            NullScope::<i32, String>::new(2),
        );
        assert!(format!("{:?}", scope).contains("condition: true"));
    }
}
