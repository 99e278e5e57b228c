/// What happened to an instance handed back to the pool.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ReturnOutcome {
    /// The instance was reset and pushed to the back of the idle queue.
    Recycled,

    /// The pool was above its override size, so the instance was removed from the pool and
    /// destroyed.
    Destroyed,

    /// The instance was already idle. Nothing was done.
    AlreadyIdle,

    /// The instance did not belong to the pool and was destroyed.
    ///
    /// Only reported by [`RecyclingPool::enqueue_or_destroy()`][crate::RecyclingPool::enqueue_or_destroy].
    DestroyedForeign,
}

impl ReturnOutcome {
    /// Whether the instance remains owned by the pool after the return.
    #[must_use]
    pub fn is_retained(self) -> bool {
        matches!(self, Self::Recycled | Self::AlreadyIdle)
    }
}
