/// Determines what a checkout produces when the pool is at its max size and nothing is idle.
///
/// By default, the pool hands out an untracked placeholder object.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum ExhaustedPolicy {
    /// The checkout reports [`Checkout::Exhausted`][crate::Checkout::Exhausted]. The caller
    /// decides how to proceed.
    ReturnNothing,

    /// The checkout creates a bare placeholder object at the requested placement. This is the
    /// default.
    ///
    /// The placeholder is not tracked by the pool and the caller is responsible for destroying
    /// it. Returning it to the pool is treated as a foreign return. This allows call sites that
    /// always expect a usable handle to degrade gracefully under load.
    #[default]
    EmptyPlaceholder,
}
