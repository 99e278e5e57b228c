/// The result of checking out an instance from a [`RecyclingPool`][crate::RecyclingPool].
///
/// Running out of capacity is an expected steady-state condition under load, not an error,
/// so it is reported as a regular variant that the caller can branch on.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub enum Checkout<T> {
    /// An instance owned by the pool. Hand it back via
    /// [`enqueue()`][crate::RecyclingPool::enqueue] when done.
    Pooled(T),

    /// An untracked stand-in created because the pool was exhausted. The caller owns it and is
    /// responsible for destroying it.
    Placeholder(T),

    /// The pool was at its max size with nothing idle and its policy is to return nothing.
    Exhausted,
}

impl<T> Checkout<T> {
    /// Whether the checkout produced an instance owned by the pool.
    #[must_use]
    pub fn is_pooled(&self) -> bool {
        matches!(self, Self::Pooled(_))
    }

    /// Whether the checkout produced an untracked placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Whether the checkout produced nothing at all.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// The produced value, whether pooled or a placeholder.
    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        match self {
            Self::Pooled(value) | Self::Placeholder(value) => Some(value),
            Self::Exhausted => None,
        }
    }

    /// The produced value only if it is owned by the pool.
    #[must_use]
    pub fn into_pooled(self) -> Option<T> {
        match self {
            Self::Pooled(value) => Some(value),
            Self::Placeholder(_) | Self::Exhausted => None,
        }
    }

    /// Borrows the produced value, if any.
    #[must_use]
    pub fn as_ref(&self) -> Checkout<&T> {
        match self {
            Self::Pooled(value) => Checkout::Pooled(value),
            Self::Placeholder(value) => Checkout::Placeholder(value),
            Self::Exhausted => Checkout::Exhausted,
        }
    }
}
