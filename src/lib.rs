//! # Floodgate
//!
//! > *Open the gate, let the work flow through, close the gate behind it.*
//!
//! A small set of scoped-resource combinators for when a caller does not
//! know in advance whether it holds a real resource or a plain value, or
//! which of two resources to acquire:
//!
//! - [`NullScope`] - a no-op resource yielding a placeholder value
//! - [`AsScoped`] - wraps an arbitrary value as a scoped resource
//! - [`EitherScope`] / [`Conditional`] - an if/else for resource acquisition
//! - [`Optional`] - acquire only if a flag is set, else yield a fallback
//!
//! Everything is driven through the [`Scoped`] capability (acquire once,
//! release once, release sees how the block exited) by [`with_scoped`],
//! which guarantees release on every exit path. The wrappers are purely
//! transparent: they never catch, transform, or suppress an error unless the
//! underlying resource's release says so.
//!
//! ## Quick Example
//!
//! ```rust
//! use floodgate::{with_scoped, EitherScope, NullScope};
//! use floodgate::testing::SpyScope;
//!
//! // A real resource on one side, a plain fallback on the other.
//! let primary = SpyScope::<_, String>::new("opened");
//! let log = primary.log();
//!
//! let scope = EitherScope::new(true, primary, NullScope::new("fallback"));
//! let result = with_scoped(scope, |value| Ok(value.into_inner().to_string()));
//!
//! assert_eq!(result, Ok(Some("opened".to_string())));
//! assert_eq!(log.acquires(), 1);
//! assert_eq!(log.releases(), 1);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod adapt;
pub mod branch;
pub mod either;
pub mod null;
pub mod optional;
pub mod scoped;
pub mod testing;

// Re-exports
pub use adapt::AsScoped;
pub use branch::{Conditional, EitherScope};
pub use either::Either;
pub use null::NullScope;
pub use optional::Optional;
pub use scoped::{with_scoped, with_scoped_unwind, Exit, Scoped, Suppression};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapt::AsScoped;
    pub use crate::branch::{Conditional, EitherScope};
    pub use crate::either::Either;
    pub use crate::null::NullScope;
    pub use crate::optional::Optional;
    pub use crate::scoped::{with_scoped, with_scoped_unwind, Exit, Scoped, Suppression};
}
