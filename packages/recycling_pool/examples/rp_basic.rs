//! Basic usage of the `recycling_pool` crate:
//!
//! * Plugging a host environment into a pool.
//! * Checking instances out and returning them.
//! * Adjusting the override size at runtime.

use recycling_pool::{Checkout, ExhaustedPolicy, Host, RecyclingPool};

/// A toy particle system. Particles are identified by their index and never reused.
#[derive(Debug, Default)]
struct Particles {
    alive: Vec<bool>,
    positions: Vec<(f32, f32)>,
}

impl Particles {
    fn live_count(&self) -> usize {
        self.alive.iter().filter(|alive| **alive).count()
    }
}

impl Host for Particles {
    type Template = ();
    type Instance = usize;
    type Placement = (f32, f32);
    type Area = ();

    fn instantiate(&mut self, _template: &()) -> usize {
        self.alive.push(true);
        self.positions.push((0.0, 0.0));
        self.alive.len() - 1
    }

    fn destroy(&mut self, instance: usize) {
        if let Some(alive) = self.alive.get_mut(instance) {
            *alive = false;
        }
    }

    fn is_alive(&self, instance: &usize) -> bool {
        self.alive.get(*instance).copied().unwrap_or(false)
    }

    fn place(&mut self, instance: &usize, placement: &(f32, f32)) {
        if let Some(position) = self.positions.get_mut(*instance) {
            *position = *placement;
        }
    }

    fn set_active(&mut self, _instance: &usize, _active: bool) {}

    fn restore_defaults(&mut self, _instance: &usize, _template: &()) {}

    fn park(&mut self, _instance: &usize, _area: &()) {}

    fn create_placeholder(&mut self, placement: &(f32, f32)) -> usize {
        let instance = self.instantiate(&());
        self.place(&instance, placement);
        instance
    }

    fn create_area(&mut self, _label: &str, _parent: Option<&()>) {}

    fn destroy_area(&mut self, _area: ()) {}
}

fn main() {
    let mut pool = RecyclingPool::builder(Particles::default(), ())
        .name("sparks")
        .start_size(4)
        .max_size(8)
        .exhausted_policy(ExhaustedPolicy::ReturnNothing)
        .build();

    pool.enable();
    println!(
        "Enabled pool with {} idle particles (override size {})",
        pool.idle_len(),
        pool.override_size()
    );

    // Drain the pool completely. The first four come from the idle queue, the next four are
    // created on demand, after which the max size has been reached.
    let mut burst = Vec::new();
    loop {
        match pool.checkout(&(1.0, 2.0)) {
            Checkout::Pooled(particle) => burst.push(particle),
            Checkout::Placeholder(_) => unreachable!("policy is to return nothing"),
            Checkout::Exhausted => break,
        }
    }
    println!("Checked out {} particles before exhausting the pool", burst.len());

    // The pool is above its override size now, so half of these are destroyed on return.
    for particle in burst {
        let outcome = pool
            .enqueue(particle)
            .expect("every particle came from this pool");
        println!("Returned particle {particle}: {outcome:?}");
    }

    println!(
        "Pool owns {} particles, host has {} alive",
        pool.len(),
        pool.host().live_count()
    );

    // Prepare for a big explosion: keep everything pre-instantiated.
    pool.max_override_size();
    println!("After max_override_size(): {} idle", pool.idle_len());

    pool.reset_override_size();
    println!("After reset_override_size(): {} idle", pool.idle_len());
}
