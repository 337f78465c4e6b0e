//! Normalizing arbitrary values into scoped resources.
//!
//! [`AsScoped`] lets one binding hold either a real managed resource or a
//! plain value, deciding at construction which it is. The plain path wraps
//! the value in a [`NullScope`], so downstream code drives both cases through
//! the same [`Scoped`] capability without caring which it got.

use std::fmt;

use crate::null::NullScope;
use crate::scoped::{Exit, Scoped, Suppression};

/// A resource-like value normalized to the [`Scoped`] capability.
///
/// The two constructors are the capability check: [`AsScoped::managed`]
/// stores a value that already satisfies [`Scoped`] as-is, while
/// [`AsScoped::plain`] wraps a plain value in a [`NullScope`]. Which variant
/// a value takes is fixed at construction and never changes.
///
/// `AsScoped` itself satisfies [`Scoped`], so normalizing an already
/// normalized value nests as `Managed(AsScoped(..))` - a single extra
/// delegation step, never a second `Plain` layer.
///
/// # Example
///
/// ```rust
/// use floodgate::{AsScoped, NullScope, Scoped};
///
/// // A plain value, adapted so it can be driven like a resource.
/// let mut plain = AsScoped::<NullScope<&str, String>>::plain("just a value");
/// assert_eq!(plain.acquire(), Ok("just a value"));
///
/// // A managed resource passes through untouched.
/// let mut managed = AsScoped::managed(NullScope::<_, String>::new(7));
/// assert_eq!(managed.acquire(), Ok(7));
/// ```
pub enum AsScoped<S: Scoped> {
    /// The input already satisfied the scoped-resource capability.
    Managed(S),
    /// The input was a plain value, wrapped by a no-op scope.
    Plain(NullScope<S::Output, S::Error>),
}

impl<S: Scoped> AsScoped<S> {
    /// Normalize a value that already satisfies [`Scoped`].
    pub fn managed(scoped: S) -> Self {
        AsScoped::Managed(scoped)
    }

    /// Normalize a plain value by wrapping it in a [`NullScope`].
    pub fn plain(value: S::Output) -> Self {
        AsScoped::Plain(NullScope::new(value))
    }

    /// Returns `true` if the inner resource is managed rather than a
    /// wrapped plain value.
    pub fn is_managed(&self) -> bool {
        matches!(self, AsScoped::Managed(_))
    }
}

impl<S: Scoped> From<S> for AsScoped<S> {
    fn from(scoped: S) -> Self {
        AsScoped::Managed(scoped)
    }
}

impl<S: Scoped> fmt::Debug for AsScoped<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsScoped::Managed(_) => f.write_str("AsScoped::Managed(..)"),
            AsScoped::Plain(_) => f.write_str("AsScoped::Plain(..)"),
        }
    }
}

impl<S: Scoped> Scoped for AsScoped<S> {
    type Output = S::Output;
    type Error = S::Error;

    fn acquire(&mut self) -> Result<S::Output, S::Error> {
        match self {
            AsScoped::Managed(inner) => inner.acquire(),
            AsScoped::Plain(inner) => inner.acquire(),
        }
    }

    fn release(&mut self, exit: Exit<'_, S::Error>) -> Result<Suppression, S::Error> {
        match self {
            AsScoped::Managed(inner) => inner.release(exit),
            AsScoped::Plain(inner) => inner.release(exit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SpyScope;
    use crate::with_scoped;

    #[test]
    fn plain_value_passes_through_unchanged() {
        let mut scope = AsScoped::<NullScope<_, String>>::plain(vec![1, 2, 3]);
        assert!(!scope.is_managed());
        assert_eq!(scope.acquire(), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn managed_resource_delegates_both_operations() {
        let spy = SpyScope::<_, String>::new("opened");
        let log = spy.log();
        let mut scope = AsScoped::managed(spy);

        assert!(scope.is_managed());
        assert_eq!(scope.acquire(), Ok("opened"));

        let err = "boom".to_string();
        assert_eq!(scope.release(Exit::Error(&err)), Ok(Suppression::Propagate));
        assert_eq!(log.acquires(), 1);
        assert_eq!(log.releases(), 1);
        assert_eq!(log.error_exits(), 1);
    }

    #[test]
    fn suppression_decision_passes_through() {
        let spy = SpyScope::<_, String>::new(()).suppress_errors();
        let scope = AsScoped::managed(spy);

        let result: Result<Option<()>, _> = with_scoped(scope, |_| Err("boom".to_string()));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn renormalizing_does_not_double_wrap() {
        let once = AsScoped::<NullScope<_, String>>::plain("v");
        let mut twice = AsScoped::managed(once);

        // Still a single Plain layer underneath; behavior unchanged.
        assert!(twice.is_managed());
        assert_eq!(twice.acquire(), Ok("v"));
    }

    #[test]
    fn from_managed() {
        let scope: AsScoped<NullScope<i32, String>> = NullScope::new(9).into();
        assert!(scope.is_managed());
    }
}
