//! Testing utilities for code built on scoped resources.
//!
//! [`SpyScope`] is a call-counting stand-in resource: it records every
//! acquire and release through a shared [`ScopeLog`] handle, and can be told
//! to suppress in-flight errors or to fail either operation. The assertion
//! macros check the shape of a [`with_scoped`](crate::with_scoped) result.
//!
//! # Examples
//!
//! ## Counting calls with SpyScope
//!
//! ```rust
//! use floodgate::testing::SpyScope;
//! use floodgate::with_scoped;
//!
//! let spy = SpyScope::<_, String>::new("opened");
//! let log = spy.log();
//!
//! let result = with_scoped(spy, |v| Ok(v.len()));
//! assert_eq!(result, Ok(Some(6)));
//! assert_eq!(log.acquires(), 1);
//! assert_eq!(log.releases(), 1);
//! ```
//!
//! ## Assertion macros
//!
//! ```rust
//! use floodgate::{assert_completed, assert_suppressed, with_scoped};
//! use floodgate::testing::SpyScope;
//!
//! let ok = with_scoped(SpyScope::<_, String>::new(1), |n| Ok(n));
//! assert_completed!(ok);
//!
//! let spy = SpyScope::<_, String>::new(1).suppress_errors();
//! let suppressed: Result<Option<i32>, _> = with_scoped(spy, |_| Err("e".to_string()));
//! assert_suppressed!(suppressed);
//! ```

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::scoped::{Exit, Scoped, Suppression};

#[derive(Debug, Default)]
struct LogInner {
    acquires: AtomicUsize,
    releases: AtomicUsize,
    error_exits: AtomicUsize,
    panic_exits: AtomicUsize,
}

/// Shared handle onto a [`SpyScope`]'s call counters.
///
/// Clone it out of the spy before handing the spy to a wrapper; the handle
/// keeps observing after the spy has been moved or dropped.
#[derive(Debug, Clone, Default)]
pub struct ScopeLog {
    inner: Arc<LogInner>,
}

impl ScopeLog {
    /// How many times acquire was attempted (failed attempts count).
    pub fn acquires(&self) -> usize {
        self.inner.acquires.load(Ordering::SeqCst)
    }

    /// How many times release was attempted (failed attempts count).
    pub fn releases(&self) -> usize {
        self.inner.releases.load(Ordering::SeqCst)
    }

    /// How many releases observed an in-flight error.
    pub fn error_exits(&self) -> usize {
        self.inner.error_exits.load(Ordering::SeqCst)
    }

    /// How many releases observed an unwinding panic.
    pub fn panic_exits(&self) -> usize {
        self.inner.panic_exits.load(Ordering::SeqCst)
    }
}

/// A stand-in scoped resource that records how it is driven.
///
/// Builder methods configure behavior:
///
/// - [`suppress_errors`](SpyScope::suppress_errors) - release answers
///   [`Suppression::Suppress`] on error exits.
/// - [`fail_release`](SpyScope::fail_release) - the next release fails.
/// - [`failing_acquire`](SpyScope::failing_acquire) - acquire fails instead
///   of yielding a value.
#[derive(Debug)]
pub struct SpyScope<T, E = Infallible> {
    value: Option<T>,
    log: ScopeLog,
    suppress: bool,
    acquire_error: Option<E>,
    release_error: Option<E>,
}

impl<T, E> SpyScope<T, E> {
    /// A spy whose acquisition yields `value`.
    pub fn new(value: T) -> Self {
        SpyScope {
            value: Some(value),
            log: ScopeLog::default(),
            suppress: false,
            acquire_error: None,
            release_error: None,
        }
    }

    /// A spy whose acquisition fails with `error`.
    pub fn failing_acquire(error: E) -> Self {
        SpyScope {
            value: None,
            log: ScopeLog::default(),
            suppress: false,
            acquire_error: Some(error),
            release_error: None,
        }
    }

    /// Make release answer [`Suppression::Suppress`] on error exits.
    pub fn suppress_errors(mut self) -> Self {
        self.suppress = true;
        self
    }

    /// Make the next release fail with `error` (after counting the call).
    pub fn fail_release(mut self, error: E) -> Self {
        self.release_error = Some(error);
        self
    }

    /// A counter handle that outlives the spy.
    pub fn log(&self) -> ScopeLog {
        self.log.clone()
    }
}

impl<T, E> Scoped for SpyScope<T, E> {
    type Output = T;
    type Error = E;

    fn acquire(&mut self) -> Result<T, E> {
        self.log.inner.acquires.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.acquire_error.take() {
            return Err(err);
        }
        Ok(self
            .value
            .take()
            .expect("SpyScope acquired twice; value already consumed"))
    }

    fn release(&mut self, exit: Exit<'_, E>) -> Result<Suppression, E> {
        self.log.inner.releases.fetch_add(1, Ordering::SeqCst);
        match exit {
            Exit::Error(_) => {
                self.log.inner.error_exits.fetch_add(1, Ordering::SeqCst);
            }
            Exit::Panic => {
                self.log.inner.panic_exits.fetch_add(1, Ordering::SeqCst);
            }
            Exit::Normal => {}
        }
        if let Some(err) = self.release_error.take() {
            return Err(err);
        }
        Ok(if self.suppress {
            Suppression::Suppress
        } else {
            Suppression::Propagate
        })
    }
}

/// Assert that a scoped block completed with a value.
///
/// Panics on a suppressed error (`Ok(None)`) or a propagated error.
///
/// # Example
///
/// ```rust
/// use floodgate::{assert_completed, with_scoped, NullScope};
///
/// let result = with_scoped(NullScope::<_, String>::new(1), |n| Ok(n));
/// assert_completed!(result);
/// ```
#[macro_export]
macro_rules! assert_completed {
    ($result:expr) => {
        match $result {
            Ok(Some(_)) => {}
            Ok(None) => panic!("Expected completed block, got suppressed error"),
            Err(e) => panic!("Expected completed block, got error: {:?}", e),
        }
    };
}

/// Assert that a scoped block's error was suppressed by release.
///
/// Panics on a completed block or a propagated error.
///
/// # Example
///
/// ```rust
/// use floodgate::{assert_suppressed, with_scoped};
/// use floodgate::testing::SpyScope;
///
/// let spy = SpyScope::<_, String>::new(()).suppress_errors();
/// let result: Result<Option<()>, _> = with_scoped(spy, |_| Err("e".to_string()));
/// assert_suppressed!(result);
/// ```
#[macro_export]
macro_rules! assert_suppressed {
    ($result:expr) => {
        match $result {
            Ok(None) => {}
            Ok(Some(_)) => panic!("Expected suppressed error, block completed"),
            Err(e) => panic!("Expected suppressed error, got propagated error: {:?}", e),
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
use crate::either::Either;

#[cfg(feature = "proptest")]
impl<L, R> Arbitrary for Either<L, R>
where
    L: Arbitrary + std::fmt::Debug,
    R: Arbitrary + std::fmt::Debug,
{
    type Parameters = (L::Parameters, R::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (l_params, r_params) = args;
        prop_oneof![
            any_with::<L>(l_params).prop_map(Either::left),
            any_with::<R>(r_params).prop_map(Either::right),
        ]
        .boxed()
    }
}
