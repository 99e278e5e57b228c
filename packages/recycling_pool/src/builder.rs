use std::any::type_name;
use std::fmt;

use crate::{ExhaustedPolicy, HoldingRoot, Host, RecyclingPool};

const DEFAULT_START_SIZE: u16 = 100;
const DEFAULT_MAX_SIZE: u16 = u16::MAX;

/// Builder for creating an instance of [`RecyclingPool`].
///
/// The host and the template are mandatory and are provided when the builder is created via
/// [`RecyclingPool::builder()`]. Everything else is optional:
///
/// * `start_size` (default 100) - the resting override size, populated when the pool is enabled.
/// * `max_size` (default [`u16::MAX`]) - the hard ceiling on instances owned by the pool.
/// * `exhausted_policy` (default [`ExhaustedPolicy::EmptyPlaceholder`]) - what a checkout
///   produces at capacity.
/// * `persist_across_reset` (default `false`) - whether the pool survives
///   [`on_host_reset()`][RecyclingPool::on_host_reset].
/// * `holding_root` (default: private to the pool) - the shared area idle instances are parked
///   under.
/// * `name` (default: the template type name) - used in log events and holding area labels.
#[must_use]
pub struct RecyclingPoolBuilder<H: Host> {
    pub(crate) host: H,
    pub(crate) template: H::Template,
    pub(crate) name: String,
    pub(crate) start_size: u16,
    pub(crate) max_size: u16,
    pub(crate) exhausted_policy: ExhaustedPolicy,
    pub(crate) persist_across_reset: bool,
    pub(crate) holding_root: Option<HoldingRoot<H::Area>>,
}

impl<H: Host> fmt::Debug for RecyclingPoolBuilder<H> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclingPoolBuilder")
            .field("host_type", &format_args!("{}", type_name::<H>()))
            .field("name", &self.name)
            .field("start_size", &self.start_size)
            .field("max_size", &self.max_size)
            .field("exhausted_policy", &self.exhausted_policy)
            .field("persist_across_reset", &self.persist_across_reset)
            .field("holding_root", &self.holding_root)
            .finish_non_exhaustive()
    }
}

impl<H: Host> RecyclingPoolBuilder<H> {
    pub(crate) fn new(host: H, template: H::Template) -> Self {
        Self {
            host,
            template,
            name: type_name::<H::Template>().to_owned(),
            start_size: DEFAULT_START_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            exhausted_policy: ExhaustedPolicy::default(),
            persist_across_reset: false,
            holding_root: None,
        }
    }

    /// Sets the name of the pool, used to identify it in log events and as the label of its
    /// holding area in the host.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the number of idle instances created when the pool is enabled. This is also the
    /// override size restored by [`reset_override_size()`][RecyclingPool::reset_override_size].
    pub fn start_size(mut self, start_size: u16) -> Self {
        self.start_size = start_size;
        self
    }

    /// Sets the maximum number of instances the pool will ever own at the same time.
    pub fn max_size(mut self, max_size: u16) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the [policy][ExhaustedPolicy] for checkouts made while the pool is at capacity.
    pub fn exhausted_policy(mut self, policy: ExhaustedPolicy) -> Self {
        self.exhausted_policy = policy;
        self
    }

    /// Sets whether the pool keeps its instances across a host-level reset boundary.
    pub fn persist_across_reset(mut self, persist: bool) -> Self {
        self.persist_across_reset = persist;
        self
    }

    /// Parks the holding area of the pool under a root shared with other pools.
    pub fn holding_root(mut self, root: &HoldingRoot<H::Area>) -> Self {
        self.holding_root = Some(root.clone());
        self
    }

    /// Builds the pool with the specified configuration.
    ///
    /// The pool starts disabled. It is enabled by [`RecyclingPool::enable()`] or implicitly by
    /// the first checkout or return.
    ///
    /// # Panics
    ///
    /// Panics if the start size is greater than the max size.
    #[must_use]
    pub fn build(self) -> RecyclingPool<H> {
        RecyclingPool::new_inner(self)
    }
}
