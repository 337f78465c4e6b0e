//! Flag-driven acquisition: use the resource, or yield a fallback.
//!
//! [`Optional`] wraps a scoped resource together with an engaged flag. When
//! engaged it is a transparent passthrough; when bypassed the delegate is
//! never acquired and never released, and the block sees a caller-supplied
//! fallback value instead.

use std::fmt;

use crate::scoped::{Exit, Scoped, Suppression};

/// A scoped resource that may be bypassed.
///
/// The engaged flag is fixed at construction. The documented default is
/// **engaged**: [`Optional::new`] always acquires its delegate. Bypassing is
/// explicit, via [`Optional::bypassed`] or the flag-driven
/// [`Optional::when`].
///
/// When bypassed, releasing is a no-op that never suppresses an in-flight
/// error; the delegate is held untouched for the wrapper's lifetime.
///
/// # Example
///
/// ```rust
/// use floodgate::{NullScope, Optional, Scoped};
///
/// let dry_run = true;
/// let scope = Optional::when(!dry_run, NullScope::<_, String>::new("live"), "dry");
/// let result = scope.with(|mode| Ok(mode.to_string()));
/// assert_eq!(result, Ok(Some("dry".to_string())));
/// ```
pub struct Optional<S: Scoped> {
    scoped: S,
    engaged: bool,
    fallback: Option<S::Output>,
}

impl<S: Scoped> Optional<S> {
    /// Wrap `scoped`, engaged: acquisition goes to the delegate.
    pub fn new(scoped: S) -> Self {
        Optional {
            scoped,
            engaged: true,
            fallback: None,
        }
    }

    /// Wrap `scoped`, bypassed: acquisition yields `fallback`, the delegate
    /// is never touched.
    pub fn bypassed(scoped: S, fallback: S::Output) -> Self {
        Optional {
            scoped,
            engaged: false,
            fallback: Some(fallback),
        }
    }

    /// Engage the delegate only if `engaged` holds; otherwise yield
    /// `fallback`. The flag is fixed at construction.
    pub fn when(engaged: bool, scoped: S, fallback: S::Output) -> Self {
        if engaged {
            Optional::new(scoped)
        } else {
            Optional::bypassed(scoped, fallback)
        }
    }

    /// Returns `true` if acquisition will go to the delegate.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}

impl<S: Scoped> fmt::Debug for Optional<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optional")
            .field("engaged", &self.engaged)
            .finish_non_exhaustive()
    }
}

impl<S: Scoped> Scoped for Optional<S> {
    type Output = S::Output;
    type Error = S::Error;

    /// Delegates when engaged; otherwise yields the fallback directly.
    ///
    /// # Panics
    ///
    /// Panics if a bypassed instance is acquired twice; the fallback is
    /// consumed by the first acquisition.
    fn acquire(&mut self) -> Result<Self::Output, Self::Error> {
        if self.engaged {
            self.scoped.acquire()
        } else {
            Ok(self
                .fallback
                .take()
                .expect("bypassed Optional acquired twice; fallback already consumed"))
        }
    }

    /// Delegates when engaged; a bypassed release is a no-op that never
    /// suppresses.
    fn release(&mut self, exit: Exit<'_, Self::Error>) -> Result<Suppression, Self::Error> {
        if self.engaged {
            self.scoped.release(exit)
        } else {
            Ok(Suppression::Propagate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SpyScope;
    use crate::with_scoped;

    #[test]
    fn engaged_delegates_acquire_and_release() {
        let spy = SpyScope::<_, String>::new("opened");
        let log = spy.log();

        let scope = Optional::new(spy);
        assert!(scope.is_engaged());

        let result = with_scoped(scope, |v| Ok(v.to_string()));
        assert_eq!(result, Ok(Some("opened".to_string())));
        assert_eq!(log.acquires(), 1);
        assert_eq!(log.releases(), 1);
    }

    #[test]
    fn bypassed_yields_fallback_and_skips_delegate() {
        let spy = SpyScope::<_, String>::new("opened");
        let log = spy.log();

        let scope = Optional::bypassed(spy, "fallback");
        assert!(!scope.is_engaged());

        let result = with_scoped(scope, |v| Ok(v.to_string()));
        assert_eq!(result, Ok(Some("fallback".to_string())));
        assert_eq!(log.acquires(), 0);
        assert_eq!(log.releases(), 0);
    }

    #[test]
    fn when_selects_by_flag() {
        let engaged = Optional::when(true, SpyScope::<_, String>::new(1), 0);
        assert!(engaged.is_engaged());

        let bypassed = Optional::when(false, SpyScope::<_, String>::new(1), 0);
        assert!(!bypassed.is_engaged());
    }

    #[test]
    fn bypassed_release_never_suppresses() {
        // Delegate would suppress, but it is bypassed.
        let spy = SpyScope::<_, String>::new(()).suppress_errors();
        let scope = Optional::bypassed(spy, ());

        let result: Result<Option<()>, _> = with_scoped(scope, |_| Err("boom".to_string()));
        assert_eq!(result, Err("boom".to_string()));
    }

    #[test]
    fn engaged_suppression_passes_through() {
        let spy = SpyScope::<_, String>::new(()).suppress_errors();
        let scope = Optional::new(spy);

        let result: Result<Option<()>, _> = with_scoped(scope, |_| Err("boom".to_string()));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn engaged_error_exit_releases_delegate_once() {
        let spy = SpyScope::<_, String>::new(());
        let log = spy.log();

        let scope = Optional::new(spy);
        let result: Result<Option<()>, _> = with_scoped(scope, |_| Err("boom".to_string()));

        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(log.releases(), 1);
        assert_eq!(log.error_exits(), 1);
    }

    #[test]
    #[should_panic(expected = "acquired twice")]
    fn bypassed_double_acquire_panics() {
        let mut scope = Optional::bypassed(SpyScope::<_, String>::new(1), 0);
        let _ = scope.acquire();
        let _ = scope.acquire();
    }
}
