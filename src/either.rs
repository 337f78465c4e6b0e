//! A semantically neutral sum type for one of two possible values.
//!
//! [`EitherScope`](crate::EitherScope) yields its acquired value through
//! `Either` so the caller can still tell which branch produced it. Neither
//! variant implies an error condition; when both branches yield the same
//! type, [`Either::into_inner`] collapses the tag away.
//!
//! # Example
//!
//! ```rust
//! use floodgate::Either;
//!
//! let e: Either<i32, &str> = Either::left(42);
//! let description = e.fold(
//!     |n| format!("number: {}", n),
//!     |s| format!("string: {}", s),
//! );
//! assert_eq!(description, "number: 42");
//! ```

/// A value that is either `Left(L)` or `Right(R)`.
///
/// In this crate `Left` is the true-branch value of an
/// [`EitherScope`](crate::EitherScope) and `Right` the false-branch value,
/// but the type itself carries no such semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The left variant.
    Left(L),
    /// The right variant.
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Create a Left value.
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a Right value.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Returns the left value if present, consuming self.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Returns the right value if present, consuming self.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Convert to `Either<&L, &R>`.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform the left value, passing right values through unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use floodgate::Either;
    ///
    /// let left: Either<i32, &str> = Either::left(21);
    /// assert_eq!(left.map_left(|x| x * 2), Either::left(42));
    /// ```
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform the right value, passing left values through unchanged.
    #[inline]
    pub fn map_right<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Collapse both variants into a single value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use floodgate::Either;
    ///
    /// let e: Either<i32, &str> = Either::right("hello");
    /// assert_eq!(e.fold(|n| n.to_string(), |s| s.to_string()), "hello");
    /// ```
    #[inline]
    pub fn fold<T, FL, FR>(self, on_left: FL, on_right: FR) -> T
    where
        FL: FnOnce(L) -> T,
        FR: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }
}

impl<T> Either<T, T> {
    /// Extract the value when both variants hold the same type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use floodgate::Either;
    ///
    /// let e: Either<&str, &str> = Either::left("opened");
    /// assert_eq!(e.into_inner(), "opened");
    /// ```
    #[inline]
    pub fn into_inner(self) -> T {
        match self {
            Either::Left(v) | Either::Right(v) => v,
        }
    }
}
