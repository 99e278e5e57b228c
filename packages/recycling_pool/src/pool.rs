use std::any::{TypeId, type_name};
use std::collections::VecDeque;
use std::fmt;

use foldhash::HashMap;
use tracing::{debug, error, trace, warn};

use crate::{
    Capacity, Checkout, ExhaustedPolicy, Facet, FacetView, ForeignInstance, HoldingRoot, Host,
    MissingFacet, PooledEntry, RecyclingPoolBuilder, ResizeStep, Resettable, ReturnOutcome,
};

/// A bounded pool of reusable host objects with an adjustable soft size target.
///
/// Callers check instances out with [`checkout()`][1] and hand them back with [`enqueue()`][2]
/// instead of creating and destroying objects on every use. The pool tracks every instance it
/// owns in a registry and keeps the ones available for checkout in a FIFO idle queue.
///
/// # Sizing
///
/// Three sizes govern how many instances exist:
///
/// * The **max size** is a hard ceiling. The pool never owns more instances than this.
/// * The **override size** is the soft target the pool actively maintains. Raising it
///   instantiates new idle entries immediately. Lowering it destroys idle entries immediately,
///   while entries that are checked out are destroyed one by one as they are returned.
/// * The **start size** is the override size applied whenever the pool is enabled.
///
/// A checkout with nothing idle creates a new instance on demand as long as the max size has not
/// been reached, even if that takes the pool above its override size. Such surplus entries are
/// destroyed when returned.
///
/// # Lifecycle
///
/// The pool starts disabled. [`enable()`][3] creates its holding area in the host and populates
/// the start size worth of idle instances. [`disable()`][4] destroys every idle instance and
/// forgets instances that are still checked out. Checkouts, returns and resizes on a disabled
/// pool enable it first. Dropping the pool disables it.
///
/// # Failure handling
///
/// Nothing that can happen during normal operation panics or corrupts the pool:
///
/// * Checkouts at capacity produce [`Checkout::Exhausted`] or an untracked placeholder,
///   depending on the [`ExhaustedPolicy`].
/// * Returning an instance the pool does not own hands it back as a [`ForeignInstance`] error.
/// * Returning an instance twice is a logged no-op.
/// * Idle instances destroyed behind the pool's back are detected and purged at checkout.
///
/// # Thread safety
///
/// The pool is meant to be driven by a single owner thread. It is not thread-safe and operations
/// must not interleave. It is not thread-mobile either, because the holding root it shares with
/// other pools is reference-counted for single-threaded use.
///
/// [1]: Self::checkout
/// [2]: Self::enqueue
/// [3]: Self::enable
/// [4]: Self::disable
pub struct RecyclingPool<H: Host> {
    name: String,
    host: H,
    template: H::Template,

    capacity: Capacity,
    exhausted_policy: ExhaustedPolicy,
    persist_across_reset: bool,

    root: HoldingRoot<H::Area>,

    /// The area idle instances are parked in. This being `Some` is what makes the pool enabled.
    holding_area: Option<H::Area>,

    /// Every instance the pool owns, idle or checked out, in creation order.
    registry: Vec<PooledEntry<H::Instance>>,

    /// The instances available for checkout. Always a subset of `registry`, without duplicates.
    idle: VecDeque<H::Instance>,

    next_serial: u64,

    /// Whether the template exposes a given facet type. Validated once per facet type.
    facet_support: HashMap<TypeId, bool>,
}

impl<H: Host> fmt::Debug for RecyclingPool<H> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclingPool")
            .field("host_type", &format_args!("{}", type_name::<H>()))
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("exhausted_policy", &self.exhausted_policy)
            .field("persist_across_reset", &self.persist_across_reset)
            .field("holding_area", &self.holding_area)
            .field("registry", &self.registry)
            .field("idle", &self.idle)
            .finish_non_exhaustive()
    }
}

impl<H: Host> RecyclingPool<H> {
    /// Starts building a new [`RecyclingPool`] that creates instances from `template` in `host`.
    pub fn builder(host: H, template: H::Template) -> RecyclingPoolBuilder<H> {
        RecyclingPoolBuilder::new(host, template)
    }

    pub(crate) fn new_inner(builder: RecyclingPoolBuilder<H>) -> Self {
        let capacity = Capacity::new(builder.start_size, builder.max_size);

        Self {
            name: builder.name,
            host: builder.host,
            template: builder.template,
            capacity,
            exhausted_policy: builder.exhausted_policy,
            persist_across_reset: builder.persist_across_reset,
            root: builder.holding_root.unwrap_or_default(),
            holding_area: None,
            registry: Vec::with_capacity(usize::from(builder.start_size)),
            idle: VecDeque::with_capacity(usize::from(builder.start_size)),
            next_serial: 0,
            facet_support: HashMap::default(),
        }
    }

    /// The name of the pool, as used in log events.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The host the pool creates its instances in.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Exclusive access to the host the pool creates its instances in.
    ///
    /// Instances may be destroyed through the host behind the pool's back. The pool tolerates
    /// this and purges such instances lazily.
    #[must_use]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The template new instances are created from.
    #[must_use]
    pub fn template(&self) -> &H::Template {
        &self.template
    }

    /// The override size applied whenever the pool is enabled.
    #[must_use]
    pub fn start_size(&self) -> u16 {
        self.capacity.start_size()
    }

    /// The maximum number of instances the pool will own at the same time.
    #[must_use]
    pub fn max_size(&self) -> u16 {
        self.capacity.max_size()
    }

    /// The soft size target the pool currently maintains. Zero while disabled.
    #[must_use]
    pub fn override_size(&self) -> u16 {
        self.capacity.override_size()
    }

    /// What a checkout produces while the pool is at capacity.
    #[must_use]
    pub fn exhausted_policy(&self) -> ExhaustedPolicy {
        self.exhausted_policy
    }

    /// Whether the pool keeps its instances across [`on_host_reset()`][Self::on_host_reset].
    #[must_use]
    pub fn persists_across_reset(&self) -> bool {
        self.persist_across_reset
    }

    /// Whether the pool is enabled, i.e. it has a holding area and tracks instances.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.holding_area.is_some()
    }

    /// The number of instances owned by the pool, idle or checked out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether the pool owns no instances at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The number of instances available for checkout.
    #[must_use]
    pub fn idle_len(&self) -> usize {
        self.idle.len()
    }

    /// The number of instances owned by the pool that are currently checked out.
    #[must_use]
    pub fn in_use_len(&self) -> usize {
        self.registry.len().saturating_sub(self.idle.len())
    }

    /// Whether the instance is owned by the pool.
    #[must_use]
    pub fn contains(&self, instance: &H::Instance) -> bool {
        self.registry.iter().any(|entry| entry.holds(instance))
    }

    /// Whether the instance is owned by the pool and currently available for checkout.
    #[must_use]
    pub fn is_idle(&self, instance: &H::Instance) -> bool {
        self.idle.contains(instance)
    }

    /// Every instance owned by the pool, in creation order.
    pub fn entries(&self) -> impl Iterator<Item = &PooledEntry<H::Instance>> {
        self.registry.iter()
    }

    /// Enables the pool: creates its holding area and populates the start size worth of idle
    /// instances.
    ///
    /// Does nothing if the pool is already enabled.
    pub fn enable(&mut self) {
        if self.is_enabled() {
            return;
        }

        let root = self.root.acquire(&mut self.host);
        self.holding_area = Some(self.host.create_area(&self.name, Some(&root)));

        self.registry.clear();
        self.idle.clear();
        self.capacity.commit(0);

        debug!(
            pool = %self.name,
            start_size = self.capacity.start_size(),
            max_size = self.capacity.max_size(),
            "enabling pool"
        );

        self.resize(self.capacity.start_size());
    }

    /// Disables the pool: destroys every idle instance and its holding area.
    ///
    /// Instances that are checked out at this point are forgotten. Returning them later is
    /// treated as a foreign return.
    ///
    /// Does nothing if the pool is already disabled.
    pub fn disable(&mut self) {
        if !self.is_enabled() {
            return;
        }

        self.resize(0);

        // Idle entries never outnumber the override size, so the full shrink empties the queue.
        debug_assert!(self.idle.is_empty());

        let forgotten = self.registry.len();
        self.registry.clear();

        if let Some(area) = self.holding_area.take() {
            self.host.destroy_area(area);
        }

        self.root.release(&mut self.host);

        debug!(pool = %self.name, forgotten, "disabled pool");
    }

    /// Signals that the host crossed a reset boundary, such as unloading the current scene.
    ///
    /// Pools configured to persist across resets are not affected. Other pools are disabled and
    /// will enable themselves again on next use.
    pub fn on_host_reset(&mut self) {
        if self.persist_across_reset {
            trace!(pool = %self.name, "pool persists across host reset");
            return;
        }

        self.disable();
    }

    /// Checks out an instance and moves it to `placement`.
    ///
    /// The longest-idle instance is preferred. With nothing idle, a new instance is created if
    /// the max size allows it. Otherwise, the [`ExhaustedPolicy`] decides the result.
    pub fn checkout(&mut self, placement: &H::Placement) -> Checkout<H::Instance> {
        self.ensure_enabled();

        while let Some(instance) = self.idle.pop_front() {
            if !self.host.is_alive(&instance) {
                self.remove_from_registry(&instance);
                debug!(pool = %self.name, ?instance, "purged idle instance destroyed outside the pool");
                continue;
            }

            self.host.place(&instance, placement);
            self.host.set_active(&instance, true);

            trace!(pool = %self.name, ?instance, "checked out idle instance");
            return Checkout::Pooled(instance);
        }

        if self.capacity.has_room(self.registry.len()) {
            let instance = self.instantiate_entry();

            self.host.place(&instance, placement);
            self.host.set_active(&instance, true);

            trace!(pool = %self.name, ?instance, len = self.registry.len(), "checked out new instance");
            return Checkout::Pooled(instance);
        }

        match self.exhausted_policy {
            ExhaustedPolicy::ReturnNothing => {
                trace!(pool = %self.name, "pool exhausted, returning nothing");
                Checkout::Exhausted
            }
            ExhaustedPolicy::EmptyPlaceholder => {
                let placeholder = self.host.create_placeholder(placement);

                trace!(pool = %self.name, ?placeholder, "pool exhausted, returning placeholder");
                Checkout::Placeholder(placeholder)
            }
        }
    }

    /// Checks out an instance at the default placement.
    pub fn checkout_default(&mut self) -> Checkout<H::Instance>
    where
        H::Placement: Default,
    {
        self.checkout(&H::Placement::default())
    }

    /// Checks out an instance together with a typed view of it.
    ///
    /// Whether the template exposes `F` is validated the first time `F` is requested and the
    /// answer is remembered. If it does not, every checkout of `F` fails without any instance
    /// leaving the pool.
    ///
    /// A placeholder that does not expose `F` is destroyed and the result is
    /// [`Checkout::Exhausted`]. The same applies to a pooled instance that unexpectedly does not
    /// expose `F`, except that it is returned to the pool instead of destroyed.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFacet`] if instances of the template do not expose `F`.
    pub fn checkout_facet<F>(
        &mut self,
        placement: &H::Placement,
    ) -> Result<Checkout<FacetView<H::Instance, F>>, MissingFacet>
    where
        F: Facet<H> + 'static,
    {
        if !self.is_facet_exposed::<F>() {
            return Err(MissingFacet::new(type_name::<F>(), &self.name));
        }

        let checkout = match self.checkout(placement) {
            Checkout::Pooled(instance) => match F::view(&self.host, &instance) {
                Some(facet) => Checkout::Pooled(FacetView::new(instance, facet)),
                None => {
                    warn!(pool = %self.name, ?instance, facet = type_name::<F>(), "pooled instance does not expose facet, returning it to the pool");
                    _ = self.accept_return(instance);
                    Checkout::Exhausted
                }
            },
            Checkout::Placeholder(placeholder) => match F::view(&self.host, &placeholder) {
                Some(facet) => Checkout::Placeholder(FacetView::new(placeholder, facet)),
                None => {
                    self.host.destroy(placeholder);
                    Checkout::Exhausted
                }
            },
            Checkout::Exhausted => Checkout::Exhausted,
        };

        Ok(checkout)
    }

    /// Returns an instance to the pool.
    ///
    /// The instance is recycled into the idle queue unless the pool currently owns more
    /// instances than its override size, in which case it is destroyed. Returning an instance
    /// that is already idle does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ForeignInstance`] with the instance inside if the pool does not own it.
    pub fn enqueue(
        &mut self,
        instance: H::Instance,
    ) -> Result<ReturnOutcome, ForeignInstance<H::Instance>> {
        self.ensure_enabled();

        if !self.contains(&instance) {
            error!(pool = %self.name, ?instance, "attempted to return an instance to a pool that does not own it");
            return Err(ForeignInstance::new(instance, &self.name));
        }

        Ok(self.accept_return(instance))
    }

    /// Returns an instance to the pool, destroying it if the pool does not own it.
    ///
    /// Otherwise behaves like [`enqueue()`][Self::enqueue].
    pub fn enqueue_or_destroy(&mut self, instance: H::Instance) -> ReturnOutcome {
        self.ensure_enabled();

        if !self.contains(&instance) {
            trace!(pool = %self.name, ?instance, "destroying foreign instance");
            self.host.destroy(instance);
            return ReturnOutcome::DestroyedForeign;
        }

        self.accept_return(instance)
    }

    /// Moves the soft size target to `new_size`, clamped to the max size.
    ///
    /// Growing instantiates the difference as idle instances right away, never exceeding the
    /// max size. Shrinking destroys up to the difference from the front of the idle queue right
    /// away; checked out instances are never touched and are trimmed as they are returned.
    pub fn set_override_size(&mut self, new_size: u16) {
        self.ensure_enabled();
        self.resize(new_size);
    }

    /// Restores the override size to the start size.
    pub fn reset_override_size(&mut self) {
        self.set_override_size(self.capacity.start_size());
    }

    /// Raises the override size to the max size.
    pub fn max_override_size(&mut self) {
        self.set_override_size(self.capacity.max_size());
    }

    fn ensure_enabled(&mut self) {
        if !self.is_enabled() {
            debug!(pool = %self.name, "pool used while disabled, enabling it");
            self.enable();
        }
    }

    fn resize(&mut self, requested: u16) {
        let plan = self
            .capacity
            .plan_resize(requested, self.registry.len(), self.idle.len());

        match plan.step {
            ResizeStep::Grow(count) => {
                for _ in 0..count {
                    let instance = self.instantiate_entry();
                    self.host.set_active(&instance, false);
                    self.park(&instance);
                    self.idle.push_back(instance);
                }
            }
            ResizeStep::Shrink(count) => {
                for _ in 0..count {
                    let Some(instance) = self.idle.pop_front() else {
                        break;
                    };

                    self.remove_from_registry(&instance);
                    self.host.destroy(instance);
                }

                self.sweep_dead_entries();
            }
            ResizeStep::Unchanged => {}
        }

        // Committed last, the old target stays in effect if a host call above panics.
        self.capacity.commit(plan.target);

        debug!(
            pool = %self.name,
            requested,
            override_size = plan.target,
            len = self.registry.len(),
            idle = self.idle.len(),
            "resized pool"
        );
    }

    /// The recycle-or-destroy decision for an instance known to be owned by the pool.
    fn accept_return(&mut self, instance: H::Instance) -> ReturnOutcome {
        if self.is_idle(&instance) {
            warn!(pool = %self.name, ?instance, "instance returned while already idle");
            return ReturnOutcome::AlreadyIdle;
        }

        if !self.capacity.keeps_returned_entry(self.registry.len()) {
            self.remove_from_registry(&instance);

            trace!(
                pool = %self.name,
                ?instance,
                len = self.registry.len(),
                override_size = self.capacity.override_size(),
                "destroying returned instance above override size"
            );

            self.host.destroy(instance);
            return ReturnOutcome::Destroyed;
        }

        self.host.set_active(&instance, false);
        self.host.restore_defaults(&instance, &self.template);

        let mut resets: usize = 0;
        self.host.for_each_resettable(&instance, &mut |hook: &mut dyn Resettable| {
            hook.reset_state();
            resets = resets.saturating_add(1);
        });

        self.park(&instance);

        trace!(pool = %self.name, ?instance, resets, "recycled returned instance");
        self.idle.push_back(instance);

        ReturnOutcome::Recycled
    }

    fn instantiate_entry(&mut self) -> H::Instance {
        let instance = self.host.instantiate(&self.template);

        let serial = self.next_serial;
        self.next_serial = self.next_serial.wrapping_add(1);

        self.registry.push(PooledEntry::new(instance.clone(), serial));

        instance
    }

    fn park(&mut self, instance: &H::Instance) {
        if let Some(area) = &self.holding_area {
            self.host.park(instance, area);
        }
    }

    /// Removes the entry by identity, preserving the creation order of the others.
    fn remove_from_registry(&mut self, instance: &H::Instance) {
        if let Some(index) = self.registry.iter().position(|entry| entry.holds(instance)) {
            self.registry.remove(index);
        }
    }

    /// Compacts out entries whose instances were destroyed outside the pool.
    fn sweep_dead_entries(&mut self) {
        let host = &self.host;
        let len_before = self.registry.len();

        self.registry.retain(|entry| host.is_alive(entry.instance()));
        self.idle.retain(|instance| host.is_alive(instance));

        let swept = len_before.saturating_sub(self.registry.len());

        if swept > 0 {
            debug!(pool = %self.name, swept, "swept instances destroyed outside the pool");
        }
    }

    fn is_facet_exposed<F>(&mut self) -> bool
    where
        F: Facet<H> + 'static,
    {
        let key = TypeId::of::<F>();

        if let Some(&exposed) = self.facet_support.get(&key) {
            return exposed;
        }

        let exposed = F::is_exposed_by(&self.host, &self.template);

        if !exposed {
            error!(pool = %self.name, facet = type_name::<F>(), "template does not expose the requested facet");
        }

        self.facet_support.insert(key, exposed);
        exposed
    }
}

impl<H: Host> Drop for RecyclingPool<H> {
    fn drop(&mut self) {
        self.disable();
    }
}
