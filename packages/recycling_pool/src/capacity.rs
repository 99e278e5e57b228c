/// The size parameters of a pool and the arithmetic that reconciles them with the actual
/// number of entries.
///
/// * `start_size` is the resting target applied whenever the pool is enabled.
/// * `max_size` is the hard ceiling on the number of entries. Never exceeded.
/// * `override_size` is the current soft target, always `<= max_size`.
///
/// This type only plans; the pool applies the plan to its registry and idle queue and then
/// commits the new target via [`commit()`][Self::commit].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Capacity {
    start_size: u16,
    max_size: u16,
    override_size: u16,
}

/// What a call to `set_override_size()` needs to do to the pool structure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ResizePlan {
    /// The override size to commit once the structural change has been applied.
    pub(crate) target: u16,

    pub(crate) step: ResizeStep,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ResizeStep {
    /// Instantiate this many new idle entries.
    Grow(usize),

    /// Destroy this many entries from the front of the idle queue.
    Shrink(usize),

    Unchanged,
}

impl Capacity {
    /// # Panics
    ///
    /// Panics if `start_size` is greater than `max_size`.
    pub(crate) fn new(start_size: u16, max_size: u16) -> Self {
        assert!(
            start_size <= max_size,
            "pool start size {start_size} must not exceed max size {max_size}"
        );

        Self {
            start_size,
            max_size,
            override_size: 0,
        }
    }

    pub(crate) fn start_size(&self) -> u16 {
        self.start_size
    }

    pub(crate) fn max_size(&self) -> u16 {
        self.max_size
    }

    pub(crate) fn override_size(&self) -> u16 {
        self.override_size
    }

    /// Whether another entry may be instantiated given the current registry length.
    pub(crate) fn has_room(&self, registry_len: usize) -> bool {
        registry_len < usize::from(self.max_size)
    }

    /// The recycle-or-destroy decision for an entry coming back from a caller.
    ///
    /// While the registry is above the soft target, returned entries are destroyed so that the
    /// pool converges back toward the target as in-use entries trickle back.
    pub(crate) fn keeps_returned_entry(&self, registry_len: usize) -> bool {
        registry_len <= usize::from(self.override_size)
    }

    /// Plans the structural change required to move the soft target to `requested`.
    ///
    /// The requested size is clamped to the max size. Growth is additionally limited by the
    /// remaining room below the max size, because the registry may already hold more entries
    /// than the current target (on-demand checkouts are allowed to exceed it). Shrinking only
    /// ever touches idle entries, so it is limited by the idle queue length.
    pub(crate) fn plan_resize(
        &mut self,
        requested: u16,
        registry_len: usize,
        idle_len: usize,
    ) -> ResizePlan {
        // A target left above the ceiling is not something we ever commit but we still
        // normalize it first, so the deltas below are computed from a consistent state.
        if self.override_size > self.max_size {
            self.override_size = self.max_size;
        }

        let target = requested.min(self.max_size);

        let step = if target > self.override_size {
            let wanted = usize::from(target.saturating_sub(self.override_size));
            let room = usize::from(self.max_size).saturating_sub(registry_len);

            ResizeStep::Grow(wanted.min(room))
        } else if target < self.override_size {
            let wanted = usize::from(self.override_size.saturating_sub(target));

            ResizeStep::Shrink(wanted.min(idle_len))
        } else {
            ResizeStep::Unchanged
        };

        ResizePlan { target, step }
    }

    pub(crate) fn commit(&mut self, target: u16) {
        debug_assert!(target <= self.max_size);

        self.override_size = target;
    }
}
