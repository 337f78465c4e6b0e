//! The scoped-resource capability and the block drivers that exercise it.
//!
//! A [`Scoped`] value knows how to acquire itself and how to release itself
//! when the block it was acquired for exits. [`with_scoped`] is the block
//! driver: it acquires, runs the body, and guarantees release on every exit
//! path, forwarding exit information to the resource and honoring its
//! suppression decision. [`with_scoped_unwind`] additionally survives panics
//! in the body.
//!
//! # Example
//!
//! ```rust
//! use floodgate::{with_scoped, NullScope};
//!
//! let scope = NullScope::<_, String>::new("placeholder");
//! let result = with_scoped(scope, |value| {
//!     assert_eq!(value, "placeholder");
//!     Ok(value.len())
//! });
//! assert_eq!(result, Ok(Some(11)));
//! ```

/// How a scoped-acquisition block exited.
///
/// Passed to [`Scoped::release`] so a resource can react differently to a
/// clean exit, an in-flight error, or an unwinding panic.
#[derive(Debug)]
pub enum Exit<'a, E> {
    /// The block ran to completion.
    Normal,
    /// The block failed; the in-flight error is borrowed here.
    Error(&'a E),
    /// The block panicked. Release still runs before the panic resumes.
    Panic,
}

// Manual impls: the borrow is copyable whether or not E itself is.
impl<E> Clone for Exit<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Exit<'_, E> {}

impl<'a, E> Exit<'a, E> {
    /// Returns `true` for an error or panic exit.
    #[inline]
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Exit::Normal)
    }

    /// The in-flight error, if this is an error exit.
    #[inline]
    pub fn error(&self) -> Option<&'a E> {
        match self {
            Exit::Error(e) => Some(e),
            Exit::Normal | Exit::Panic => None,
        }
    }
}

/// A release's answer about an in-flight error.
///
/// Only consulted on [`Exit::Error`]: `Suppress` swallows the error and the
/// block yields nothing, `Propagate` lets it keep propagating. Panics are
/// never suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suppression {
    /// Swallow the in-flight error.
    Suppress,
    /// Let the in-flight error keep propagating.
    Propagate,
}

impl Suppression {
    /// Returns `true` if this decision swallows the in-flight error.
    #[inline]
    pub fn is_suppress(self) -> bool {
        matches!(self, Suppression::Suppress)
    }
}

/// The scoped-resource capability: acquire once, release once.
///
/// Anything implementing `Scoped` can be driven by [`with_scoped`] or wrapped
/// by the combinators in this crate ([`AsScoped`](crate::AsScoped),
/// [`EitherScope`](crate::EitherScope), [`Conditional`](crate::Conditional),
/// [`Optional`](crate::Optional)). The trait bound *is* the capability check:
/// a plain value enters the system by being wrapped in a
/// [`NullScope`](crate::NullScope) instead.
///
/// Implementations must be transparent: never swallow a delegate's error and
/// never invent a suppression decision the delegate did not make.
///
/// # Example
///
/// ```rust
/// use floodgate::{Exit, Scoped, Suppression};
///
/// struct Connection {
///     open: bool,
/// }
///
/// impl Scoped for Connection {
///     type Output = String;
///     type Error = String;
///
///     fn acquire(&mut self) -> Result<String, String> {
///         self.open = true;
///         Ok("session".to_string())
///     }
///
///     fn release(&mut self, _exit: Exit<'_, String>) -> Result<Suppression, String> {
///         self.open = false;
///         Ok(Suppression::Propagate)
///     }
/// }
///
/// let conn = Connection { open: false };
/// let result = conn.with(|session| Ok(session.to_uppercase()));
/// assert_eq!(result, Ok(Some("SESSION".to_string())));
/// ```
pub trait Scoped {
    /// What acquisition yields.
    type Output;
    /// How acquisition or release can fail.
    type Error;

    /// Acquire the resource, yielding its output value.
    ///
    /// Called at most once per instance; a second call on a consumed
    /// instance is a contract violation and may panic.
    fn acquire(&mut self) -> Result<Self::Output, Self::Error>;

    /// Release the resource, observing how the block exited.
    ///
    /// Returns the suppression decision for an in-flight error. A failing
    /// release propagates its own error to the caller of the block.
    fn release(&mut self, exit: Exit<'_, Self::Error>) -> Result<Suppression, Self::Error>;

    /// Run one scoped-acquisition block over this resource.
    ///
    /// Equivalent to [`with_scoped(self, body)`](with_scoped).
    fn with<T, F>(self, body: F) -> Result<Option<T>, Self::Error>
    where
        Self: Sized,
        Self::Error: std::fmt::Debug,
        F: FnOnce(Self::Output) -> Result<T, Self::Error>,
    {
        with_scoped(self, body)
    }
}

/// Run a scoped-acquisition block: acquire, run `body`, always release.
///
/// The same instance that was acquired is released, exactly once, on both
/// the normal and the error path. Return shape:
///
/// - `Ok(Some(t))` - the body completed with `t` and release succeeded.
/// - `Ok(None)` - the body failed but the resource's release answered
///   [`Suppression::Suppress`], swallowing the error.
/// - `Err(e)` - acquisition failed, the body failed without suppression, or
///   release itself failed.
///
/// A release failure on the error path replaces the in-flight error; the
/// discarded error is logged so the information is not silently lost.
/// Suppression itself is not logged by default - it is the resource's
/// explicit decision and is already visible as `Ok(None)` - though the
/// `tracing` feature emits a debug-level event for it.
///
/// # Example
///
/// ```rust
/// use floodgate::{with_scoped, NullScope};
///
/// let result = with_scoped(NullScope::<_, String>::new(21), |n| Ok(n * 2));
/// assert_eq!(result, Ok(Some(42)));
/// ```
pub fn with_scoped<S, T, F>(mut scoped: S, body: F) -> Result<Option<T>, S::Error>
where
    S: Scoped,
    S::Error: std::fmt::Debug,
    F: FnOnce(S::Output) -> Result<T, S::Error>,
{
    let value = scoped.acquire()?;

    match body(value) {
        Ok(out) => {
            // Nothing in flight, so the suppression decision is moot.
            scoped.release(Exit::Normal)?;
            Ok(Some(out))
        }
        Err(err) => match scoped.release(Exit::Error(&err)) {
            Ok(Suppression::Suppress) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = ?err, "scoped release suppressed in-flight error");
                Ok(None)
            }
            Ok(Suppression::Propagate) => Err(err),
            Err(release_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = ?err, "release failed; in-flight error discarded");
                #[cfg(not(feature = "tracing"))]
                eprintln!("release failed; in-flight error discarded: {:?}", err);
                Err(release_err)
            }
        },
    }
}

/// Panic-safe variant of [`with_scoped`].
///
/// If the body panics, the resource is still released (seeing
/// [`Exit::Panic`]) before the panic resumes. Panics are never suppressed;
/// the release's suppression decision applies only to error exits.
///
/// # Example
///
/// ```rust
/// use floodgate::{with_scoped_unwind, NullScope};
///
/// let result = with_scoped_unwind(NullScope::<_, String>::new("v"), |v| Ok(v.to_string()));
/// assert_eq!(result, Ok(Some("v".to_string())));
/// ```
pub fn with_scoped_unwind<S, T, F>(mut scoped: S, body: F) -> Result<Option<T>, S::Error>
where
    S: Scoped,
    S::Error: std::fmt::Debug,
    F: FnOnce(S::Output) -> Result<T, S::Error>,
{
    let value = scoped.acquire()?;

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| body(value)));

    match outcome {
        Ok(Ok(out)) => {
            scoped.release(Exit::Normal)?;
            Ok(Some(out))
        }
        Ok(Err(err)) => match scoped.release(Exit::Error(&err)) {
            Ok(Suppression::Suppress) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = ?err, "scoped release suppressed in-flight error");
                Ok(None)
            }
            Ok(Suppression::Propagate) => Err(err),
            Err(release_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = ?err, "release failed; in-flight error discarded");
                #[cfg(not(feature = "tracing"))]
                eprintln!("release failed; in-flight error discarded: {:?}", err);
                Err(release_err)
            }
        },
        Err(payload) => {
            if let Err(release_err) = scoped.release(Exit::Panic) {
                #[cfg(feature = "tracing")]
                tracing::error!(error = ?release_err, "release failed after panic");
                #[cfg(not(feature = "tracing"))]
                eprintln!("release failed after panic: {:?}", release_err);
            }
            std::panic::resume_unwind(payload)
        }
    }
}
