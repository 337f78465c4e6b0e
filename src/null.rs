//! A scoped resource that does nothing.
//!
//! [`NullScope`] is the leaf the rest of the crate bottoms out on: acquiring
//! it yields a caller-supplied placeholder, releasing it is a no-op that
//! never fails and never suppresses an in-flight error.

use std::convert::Infallible;
use std::marker::PhantomData;

use crate::scoped::{Exit, Scoped, Suppression};

/// A no-op scoped resource yielding a placeholder value.
///
/// The error type parameter exists only so a `NullScope` can stand in for a
/// real resource inside [`EitherScope`](crate::EitherScope) or
/// [`Optional`](crate::Optional), which require both sides to share an error
/// type; it defaults to [`Infallible`] because a `NullScope` alone can never
/// fail.
///
/// `NullScope::<Option<V>, E>::default()` is the "no placeholder" form: its
/// acquisition yields `None`.
///
/// # Example
///
/// ```rust
/// use floodgate::{NullScope, Scoped};
///
/// let mut scope = NullScope::<_, String>::new("fallback");
/// assert_eq!(scope.acquire(), Ok("fallback"));
/// ```
#[derive(Debug)]
pub struct NullScope<T, E = Infallible> {
    placeholder: Option<T>,
    _error: PhantomData<fn() -> E>,
}

// Manual impl: cloning a no-op scope should not demand a cloneable error type.
impl<T: Clone, E> Clone for NullScope<T, E> {
    fn clone(&self) -> Self {
        NullScope {
            placeholder: self.placeholder.clone(),
            _error: PhantomData,
        }
    }
}

impl<T, E> NullScope<T, E> {
    /// Create a no-op scope yielding `placeholder` on acquisition.
    pub fn new(placeholder: T) -> Self {
        NullScope {
            placeholder: Some(placeholder),
            _error: PhantomData,
        }
    }

    /// The placeholder, if not yet yielded by acquisition.
    pub fn placeholder(&self) -> Option<&T> {
        self.placeholder.as_ref()
    }
}

impl<T: Default, E> Default for NullScope<T, E> {
    fn default() -> Self {
        NullScope::new(T::default())
    }
}

impl<T, E> From<T> for NullScope<T, E> {
    fn from(placeholder: T) -> Self {
        NullScope::new(placeholder)
    }
}

impl<T, E> Scoped for NullScope<T, E> {
    type Output = T;
    type Error = E;

    /// Yields the placeholder unchanged.
    ///
    /// # Panics
    ///
    /// Panics if acquired twice; the placeholder is consumed by the first
    /// acquisition.
    fn acquire(&mut self) -> Result<T, E> {
        Ok(self
            .placeholder
            .take()
            .expect("NullScope acquired twice; placeholder already consumed"))
    }

    /// No-op: never fails, never suppresses an in-flight error.
    fn release(&mut self, _exit: Exit<'_, E>) -> Result<Suppression, E> {
        Ok(Suppression::Propagate)
    }
}
