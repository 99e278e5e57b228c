use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::Host;

/// The label of the shared area that all pool holding areas are nested under.
const ROOT_LABEL: &str = "Pools";

/// A shared root area under which every enabled pool parks its own holding area.
///
/// The root area is created lazily in the host when the first pool that uses it is enabled
/// and destroyed again when the last such pool is disabled. Clones refer to the same root.
///
/// Every pool gets a private root by default. Share one between pools via
/// [`RecyclingPoolBuilder::holding_root()`][1] to group them under a single area in the host.
///
/// [1]: crate::RecyclingPoolBuilder::holding_root
pub struct HoldingRoot<A> {
    state: Rc<RefCell<RootState<A>>>,
}

struct RootState<A> {
    area: Option<A>,

    /// How many enabled pools currently hold a lease on the root area.
    leases: usize,
}

impl<A: Clone> HoldingRoot<A> {
    /// Creates a root that does not yet exist in any host.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(RootState {
                area: None,
                leases: 0,
            })),
        }
    }

    /// Whether the root area currently exists in the host.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.state.borrow().area.is_some()
    }

    /// The number of enabled pools that currently use the root area.
    #[must_use]
    pub fn lease_count(&self) -> usize {
        self.state.borrow().leases
    }

    /// Returns the root area, creating it in the host first if no pool holds a lease.
    pub(crate) fn acquire<H>(&self, host: &mut H) -> A
    where
        H: Host<Area = A> + ?Sized,
    {
        let mut state = self.state.borrow_mut();

        state.leases = state
            .leases
            .checked_add(1)
            .expect("lease count cannot realistically overflow - each lease is an enabled pool");

        if let Some(area) = &state.area {
            return area.clone();
        }

        let area = host.create_area(ROOT_LABEL, None);
        state.area = Some(area.clone());
        area
    }

    /// Gives up one lease. The last lease to be released destroys the root area.
    pub(crate) fn release<H>(&self, host: &mut H)
    where
        H: Host<Area = A> + ?Sized,
    {
        let mut state = self.state.borrow_mut();

        state.leases = state
            .leases
            .checked_sub(1)
            .expect("released a holding root lease that was never acquired");

        if state.leases == 0 {
            if let Some(area) = state.area.take() {
                host.destroy_area(area);
            }
        }
    }
}

impl<A: Clone> Default for HoldingRoot<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for HoldingRoot<A> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for HoldingRoot<A> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();

        f.debug_struct("HoldingRoot")
            .field("area", &state.area)
            .field("leases", &state.leases)
            .finish()
    }
}
