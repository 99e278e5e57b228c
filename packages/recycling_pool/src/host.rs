use std::fmt::Debug;

/// The host environment that owns the actual objects managed by a [`RecyclingPool`][1].
///
/// The pool never decides what an instance is. It only tracks handles to instances and decides
/// how many exist and whether each one is idle or checked out. Everything that touches the
/// objects themselves (creating, destroying, positioning, activating) is delegated to the host.
///
/// Instance handles are compared by equality to determine pool membership, so two handles must
/// compare equal if and only if they refer to the same host object.
///
/// [1]: crate::RecyclingPool
pub trait Host {
    /// The blueprint that new instances are created from.
    type Template;

    /// A handle to one host object. Cheap to clone, compared by identity.
    type Instance: Clone + Debug + PartialEq;

    /// Where and under what parent an instance is placed when it is checked out.
    type Placement;

    /// A container in the host's object hierarchy. Idle instances are parked in one.
    type Area: Clone + Debug;

    /// Creates a new, independent instance from the template.
    fn instantiate(&mut self, template: &Self::Template) -> Self::Instance;

    /// Permanently destroys an instance. Must tolerate instances that are already dead.
    fn destroy(&mut self, instance: Self::Instance);

    /// Whether the instance still exists, i.e. it has not been destroyed behind the pool's back.
    fn is_alive(&self, instance: &Self::Instance) -> bool;

    /// Moves the instance to the given placement.
    fn place(&mut self, instance: &Self::Instance, placement: &Self::Placement);

    /// Toggles whether the instance participates in the host's update loop.
    fn set_active(&mut self, instance: &Self::Instance, active: bool);

    /// Restores the canonical default transform of the instance, as defined by the template.
    fn restore_defaults(&mut self, instance: &Self::Instance, template: &Self::Template);

    /// Re-parents the instance into a holding area.
    fn park(&mut self, instance: &Self::Instance, area: &Self::Area);

    /// Creates a bare stand-in object at the given placement. The pool does not track it.
    fn create_placeholder(&mut self, placement: &Self::Placement) -> Self::Instance;

    /// Creates an inactive holding area, optionally nested under another one.
    fn create_area(&mut self, label: &str, parent: Option<&Self::Area>) -> Self::Area;

    /// Destroys a holding area created by [`create_area()`][Self::create_area].
    fn destroy_area(&mut self, area: Self::Area);

    /// Invokes `visit` once for every reset capability attached to the instance.
    ///
    /// The default implementation reports no capabilities.
    fn for_each_resettable(
        &mut self,
        instance: &Self::Instance,
        visit: &mut dyn FnMut(&mut dyn Resettable),
    ) {
        _ = instance;
        _ = visit;
    }
}

/// A capability attached to a host object that restores it to a reusable state.
///
/// The pool invokes every attached capability when an instance is recycled, before it re-enters
/// the idle queue.
pub trait Resettable {
    /// Clears any state accumulated while the instance was checked out.
    fn reset_state(&mut self);
}

/// A typed view of an instance, such as one specific component of a host object.
///
/// Used with [`RecyclingPool::checkout_facet()`][1] to check out an instance together with a
/// typed handle to one of its parts.
///
/// [1]: crate::RecyclingPool::checkout_facet
pub trait Facet<H: Host + ?Sized>: Sized {
    /// Whether instances created from `template` expose this facet.
    fn is_exposed_by(host: &H, template: &H::Template) -> bool;

    /// Obtains the facet from a specific instance, if it exposes one.
    fn view(host: &H, instance: &H::Instance) -> Option<Self>;
}
