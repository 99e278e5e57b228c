//! A recording in-memory host used by the unit tests.
#![cfg_attr(coverage_nightly, coverage(off))]

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::{Facet, Host, Resettable};

#[derive(Clone, Debug, Default)]
pub(crate) struct TestTemplate {
    pub(crate) scale: u32,

    /// How many reset capabilities each instance carries.
    pub(crate) reset_hooks: usize,

    /// Whether instances expose the [`Body`] facet.
    pub(crate) has_body: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TestPlacement {
    pub(crate) position: i32,
    pub(crate) parent: Option<u32>,
}

impl TestPlacement {
    pub(crate) fn at(position: i32) -> Self {
        Self {
            position,
            parent: None,
        }
    }
}

#[derive(Debug, Default)]
struct ResetCounter {
    resets: u32,
}

impl Resettable for ResetCounter {
    fn reset_state(&mut self) {
        self.resets += 1;
    }
}

#[derive(Debug)]
struct TestObject {
    alive: bool,
    active: bool,
    placeholder: bool,
    has_body: bool,
    position: i32,
    parent: Option<u32>,
    scale: u32,
    hooks: Vec<ResetCounter>,
}

#[derive(Debug)]
struct TestArea {
    label: String,
    parent: Option<u32>,
    alive: bool,
}

/// Objects and areas are identified by their index. Indexes are never reused.
#[derive(Debug, Default)]
pub(crate) struct TestHost {
    objects: Vec<TestObject>,
    areas: Vec<TestArea>,
    destroy_calls: usize,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn object(&self, id: u32) -> &TestObject {
        self.objects
            .get(id as usize)
            .expect("test referenced an object that was never created")
    }

    fn object_mut(&mut self, id: u32) -> &mut TestObject {
        self.objects
            .get_mut(id as usize)
            .expect("test referenced an object that was never created")
    }

    fn spawn(&mut self, object: TestObject) -> u32 {
        self.objects.push(object);
        u32::try_from(self.objects.len() - 1).expect("tests never create this many objects")
    }

    /// Creates an object that no pool knows about.
    pub(crate) fn spawn_foreign(&mut self) -> u32 {
        self.spawn(TestObject {
            alive: true,
            active: true,
            placeholder: false,
            has_body: false,
            position: 0,
            parent: None,
            scale: 1,
            hooks: Vec::new(),
        })
    }

    /// Destroys an object behind the pool's back.
    pub(crate) fn destroy_externally(&mut self, id: u32) {
        self.object_mut(id).alive = false;
    }

    /// Detaches the [`Body`] facet from an object.
    pub(crate) fn remove_body(&mut self, id: u32) {
        self.object_mut(id).has_body = false;
    }

    pub(crate) fn created_count(&self) -> usize {
        self.objects.iter().filter(|o| !o.placeholder).count()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.objects.iter().filter(|o| o.alive).count()
    }

    pub(crate) fn destroy_calls(&self) -> usize {
        self.destroy_calls
    }

    pub(crate) fn is_alive_object(&self, id: u32) -> bool {
        self.object(id).alive
    }

    pub(crate) fn is_active(&self, id: u32) -> bool {
        self.object(id).active
    }

    pub(crate) fn is_placeholder(&self, id: u32) -> bool {
        self.object(id).placeholder
    }

    pub(crate) fn position(&self, id: u32) -> i32 {
        self.object(id).position
    }

    pub(crate) fn parent(&self, id: u32) -> Option<u32> {
        self.object(id).parent
    }

    pub(crate) fn scale(&self, id: u32) -> u32 {
        self.object(id).scale
    }

    pub(crate) fn set_scale(&mut self, id: u32, scale: u32) {
        self.object_mut(id).scale = scale;
    }

    /// Reset invocations of every hook attached to the object, in attachment order.
    pub(crate) fn resets(&self, id: u32) -> Vec<u32> {
        self.object(id).hooks.iter().map(|h| h.resets).collect()
    }

    pub(crate) fn live_area_count(&self) -> usize {
        self.areas.iter().filter(|a| a.alive).count()
    }

    pub(crate) fn area_label(&self, area: u32) -> Option<&str> {
        self.areas
            .get(area as usize)
            .filter(|a| a.alive)
            .map(|a| a.label.as_str())
    }

    pub(crate) fn area_parent(&self, area: u32) -> Option<u32> {
        self.areas.get(area as usize).and_then(|a| a.parent)
    }
}

impl Host for TestHost {
    type Template = TestTemplate;
    type Instance = u32;
    type Placement = TestPlacement;
    type Area = u32;

    fn instantiate(&mut self, template: &TestTemplate) -> u32 {
        self.spawn(TestObject {
            alive: true,
            active: true,
            placeholder: false,
            has_body: template.has_body,
            position: 0,
            parent: None,
            scale: template.scale,
            hooks: (0..template.reset_hooks)
                .map(|_| ResetCounter::default())
                .collect(),
        })
    }

    fn destroy(&mut self, instance: u32) {
        self.destroy_calls += 1;
        self.object_mut(instance).alive = false;
    }

    fn is_alive(&self, instance: &u32) -> bool {
        self.object(*instance).alive
    }

    fn place(&mut self, instance: &u32, placement: &TestPlacement) {
        let object = self.object_mut(*instance);
        object.position = placement.position;
        object.parent = placement.parent;
    }

    fn set_active(&mut self, instance: &u32, active: bool) {
        self.object_mut(*instance).active = active;
    }

    fn restore_defaults(&mut self, instance: &u32, template: &TestTemplate) {
        self.object_mut(*instance).scale = template.scale;
    }

    fn park(&mut self, instance: &u32, area: &u32) {
        self.object_mut(*instance).parent = Some(*area);
    }

    fn create_placeholder(&mut self, placement: &TestPlacement) -> u32 {
        self.spawn(TestObject {
            alive: true,
            active: true,
            placeholder: true,
            has_body: false,
            position: placement.position,
            parent: placement.parent,
            scale: 1,
            hooks: Vec::new(),
        })
    }

    fn create_area(&mut self, label: &str, parent: Option<&u32>) -> u32 {
        self.areas.push(TestArea {
            label: label.to_owned(),
            parent: parent.copied(),
            alive: true,
        });
        u32::try_from(self.areas.len() - 1).expect("tests never create this many areas")
    }

    fn destroy_area(&mut self, area: u32) {
        self.areas
            .get_mut(area as usize)
            .expect("test destroyed an area that was never created")
            .alive = false;
    }

    fn for_each_resettable(
        &mut self,
        instance: &u32,
        visit: &mut dyn FnMut(&mut dyn Resettable),
    ) {
        for hook in &mut self.object_mut(*instance).hooks {
            visit(hook);
        }
    }
}

/// A [`TestHost`] that multiple pools can share.
#[derive(Clone, Debug, Default)]
pub(crate) struct SharedTestHost(Rc<RefCell<TestHost>>);

impl SharedTestHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn borrow(&self) -> Ref<'_, TestHost> {
        self.0.borrow()
    }
}

impl Host for SharedTestHost {
    type Template = TestTemplate;
    type Instance = u32;
    type Placement = TestPlacement;
    type Area = u32;

    fn instantiate(&mut self, template: &TestTemplate) -> u32 {
        self.0.borrow_mut().instantiate(template)
    }

    fn destroy(&mut self, instance: u32) {
        self.0.borrow_mut().destroy(instance);
    }

    fn is_alive(&self, instance: &u32) -> bool {
        self.0.borrow().is_alive(instance)
    }

    fn place(&mut self, instance: &u32, placement: &TestPlacement) {
        self.0.borrow_mut().place(instance, placement);
    }

    fn set_active(&mut self, instance: &u32, active: bool) {
        self.0.borrow_mut().set_active(instance, active);
    }

    fn restore_defaults(&mut self, instance: &u32, template: &TestTemplate) {
        self.0.borrow_mut().restore_defaults(instance, template);
    }

    fn park(&mut self, instance: &u32, area: &u32) {
        self.0.borrow_mut().park(instance, area);
    }

    fn create_placeholder(&mut self, placement: &TestPlacement) -> u32 {
        self.0.borrow_mut().create_placeholder(placement)
    }

    fn create_area(&mut self, label: &str, parent: Option<&u32>) -> u32 {
        self.0.borrow_mut().create_area(label, parent)
    }

    fn destroy_area(&mut self, area: u32) {
        self.0.borrow_mut().destroy_area(area);
    }

    fn for_each_resettable(
        &mut self,
        instance: &u32,
        visit: &mut dyn FnMut(&mut dyn Resettable),
    ) {
        self.0.borrow_mut().for_each_resettable(instance, visit);
    }
}

/// A facet exposed by objects created from a template with `has_body` set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Body(pub(crate) u32);

impl Facet<TestHost> for Body {
    fn is_exposed_by(_host: &TestHost, template: &TestTemplate) -> bool {
        template.has_body
    }

    fn view(host: &TestHost, instance: &u32) -> Option<Self> {
        host.object(*instance).has_body.then_some(Self(*instance))
    }
}

/// A facet that no test template exposes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Wheel;

impl Facet<TestHost> for Wheel {
    fn is_exposed_by(_host: &TestHost, _template: &TestTemplate) -> bool {
        false
    }

    fn view(_host: &TestHost, _instance: &u32) -> Option<Self> {
        None
    }
}
