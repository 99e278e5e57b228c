#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A bounded object pool that recycles host-owned instances instead of creating and destroying
//! them on every use.
//!
//! The objects themselves live in a host environment (a scene graph, an entity store, a GPU
//! resource table...) that the pool accesses through the [`Host`] trait. The pool only decides
//! how many instances exist and whether each one is idle or checked out.
//!
//! # Key Features
//!
//! - **Hard ceiling**: the pool never owns more instances than its max size
//! - **Adjustable soft target**: the override size can be raised or lowered at runtime, with
//!   idle instances trimmed immediately and checked out ones trimmed as they come back
//! - **Graceful exhaustion**: at capacity, checkouts report nothing or hand out an untracked
//!   placeholder, as configured via [`ExhaustedPolicy`]
//! - **Tolerant returns**: foreign instances are rejected (or destroyed on request), double
//!   returns are no-ops and idle instances destroyed out of band are purged lazily
//! - **Reset hooks**: every [`Resettable`] capability of an instance is invoked when it is
//!   recycled
//! - **Typed views**: [`RecyclingPool::checkout_facet()`] checks out an instance together with a
//!   typed [`Facet`] of it, validated once against the template
//!
//! # Example
//!
//! ```rust
//! use recycling_pool::{Checkout, Host, RecyclingPool, ReturnOutcome};
//!
//! /// A host whose objects are slots in a vector, identified by index.
//! #[derive(Debug, Default)]
//! struct Slots {
//!     alive: Vec<bool>,
//! }
//!
//! impl Host for Slots {
//!     type Template = ();
//!     type Instance = usize;
//!     type Placement = ();
//!     type Area = ();
//!
//!     fn instantiate(&mut self, _template: &()) -> usize {
//!         self.alive.push(true);
//!         self.alive.len() - 1
//!     }
//!
//!     fn destroy(&mut self, instance: usize) {
//!         self.alive[instance] = false;
//!     }
//!
//!     fn is_alive(&self, instance: &usize) -> bool {
//!         self.alive[*instance]
//!     }
//!
//!     fn create_placeholder(&mut self, _placement: &()) -> usize {
//!         self.instantiate(&())
//!     }
//!
//!     fn place(&mut self, _instance: &usize, _placement: &()) {}
//!     fn set_active(&mut self, _instance: &usize, _active: bool) {}
//!     fn restore_defaults(&mut self, _instance: &usize, _template: &()) {}
//!     fn park(&mut self, _instance: &usize, _area: &()) {}
//!     fn create_area(&mut self, _label: &str, _parent: Option<&()>) {}
//!     fn destroy_area(&mut self, _area: ()) {}
//! }
//!
//! let mut pool = RecyclingPool::builder(Slots::default(), ())
//!     .start_size(2)
//!     .max_size(4)
//!     .build();
//!
//! // The first checkout enables the pool, which creates the two start instances.
//! let Checkout::Pooled(instance) = pool.checkout(&()) else {
//!     panic!("pool has idle instances");
//! };
//! assert_eq!(pool.len(), 2);
//! assert_eq!(pool.idle_len(), 1);
//!
//! // Handing the instance back makes it available again.
//! assert_eq!(pool.enqueue(instance).unwrap(), ReturnOutcome::Recycled);
//! assert_eq!(pool.idle_len(), 2);
//! ```

mod builder;
mod capacity;
mod checkout;
mod entry;
mod error;
mod exhausted_policy;
mod holding;
mod host;
mod pool;
mod returned;

#[cfg(test)]
mod test_host;

pub use builder::*;
pub(crate) use capacity::*;
pub use checkout::*;
pub use entry::*;
pub use error::*;
pub use exhausted_policy::*;
pub use holding::*;
pub use host::*;
pub use pool::RecyclingPool;
pub use returned::*;
