/// One instance owned by a pool, together with the serial number it was created under.
///
/// Serial numbers are assigned in creation order and are never reused within one pool, so they
/// remain meaningful after other entries have been removed. They are only used for diagnostics;
/// membership is always determined by comparing instance handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PooledEntry<I> {
    instance: I,
    serial: u64,
}

impl<I> PooledEntry<I> {
    pub(crate) fn new(instance: I, serial: u64) -> Self {
        Self { instance, serial }
    }

    /// The handle to the managed instance.
    #[must_use]
    pub fn instance(&self) -> &I {
        &self.instance
    }

    /// The creation-order serial number of the entry.
    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

impl<I: PartialEq> PooledEntry<I> {
    pub(crate) fn holds(&self, instance: &I) -> bool {
        self.instance == *instance
    }
}

/// An instance checked out together with a typed view of it.
///
/// Returned by [`RecyclingPool::checkout_facet()`][1]. Return the [`instance()`][2] to the pool
/// when done; the facet itself is not known to the pool.
///
/// [1]: crate::RecyclingPool::checkout_facet
/// [2]: Self::instance
#[derive(Clone, Debug)]
pub struct FacetView<I, F> {
    instance: I,
    facet: F,
}

impl<I, F> FacetView<I, F> {
    pub(crate) fn new(instance: I, facet: F) -> Self {
        Self { instance, facet }
    }

    /// The handle to the checked out instance.
    #[must_use]
    pub fn instance(&self) -> &I {
        &self.instance
    }

    /// The typed view of the instance.
    #[must_use]
    pub fn facet(&self) -> &F {
        &self.facet
    }

    /// Mutable access to the typed view of the instance.
    #[must_use]
    pub fn facet_mut(&mut self) -> &mut F {
        &mut self.facet
    }

    /// Splits the view into the instance handle and the facet.
    #[must_use]
    pub fn into_parts(self) -> (I, F) {
        (self.instance, self.facet)
    }
}
