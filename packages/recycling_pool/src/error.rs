use std::fmt::Debug;

use thiserror::Error;

/// An instance was handed to a pool that does not own it.
///
/// The instance is handed back untouched; the caller retains ownership and is responsible
/// for it. Use [`RecyclingPool::enqueue_or_destroy()`][1] to have the pool destroy foreign
/// instances instead.
///
/// [1]: crate::RecyclingPool::enqueue_or_destroy
#[derive(Debug, Error)]
#[error("instance {instance:?} does not belong to pool '{pool}'")]
pub struct ForeignInstance<I: Debug> {
    instance: I,
    pool: String,
}

impl<I: Debug> ForeignInstance<I> {
    pub(crate) fn new(instance: I, pool: &str) -> Self {
        Self {
            instance,
            pool: pool.to_owned(),
        }
    }

    /// The instance that was rejected.
    #[must_use]
    pub fn instance(&self) -> &I {
        &self.instance
    }

    /// Takes back ownership of the rejected instance.
    #[must_use]
    pub fn into_instance(self) -> I {
        self.instance
    }
}

/// A typed view was requested that instances of the pool's template do not expose.
///
/// Checkouts of such a facet fail closed: no instance leaves the pool.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("template of pool '{pool}' does not expose the facet {facet}")]
pub struct MissingFacet {
    facet: &'static str,
    pool: String,
}

impl MissingFacet {
    pub(crate) fn new(facet: &'static str, pool: &str) -> Self {
        Self {
            facet,
            pool: pool.to_owned(),
        }
    }

    /// The type name of the facet that was requested.
    #[must_use]
    pub fn facet(&self) -> &'static str {
        self.facet
    }
}
