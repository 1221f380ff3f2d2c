use crate::core::BodyHandle;
use crate::collision::Contact;
use crate::math::Vector3;
use crate::shapes::ShapeType;
use std::collections::VecDeque;

/// A collision detected during the last `advance` call
#[derive(Debug, Clone, Copy)]
pub struct CollisionEvent {
    /// The first body in the collision (the plane, if one is involved)
    pub body_a: BodyHandle,

    /// The second body in the collision
    pub body_b: BodyHandle,

    /// Shapes of the two bodies, in the same order
    pub shapes: (ShapeType, ShapeType),

    /// The contact normal, pointing from `body_a` toward `body_b`
    pub normal: Vector3,

    /// How deep the bodies overlapped when detected
    pub penetration: f32,
}

impl From<&Contact> for CollisionEvent {
    fn from(contact: &Contact) -> Self {
        Self {
            body_a: contact.body_a,
            body_b: contact.body_b,
            shapes: contact.shapes,
            normal: contact.normal,
            penetration: contact.penetration,
        }
    }
}

/// Types of body events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEventType {
    /// A body has been added to the world
    Added,

    /// A body has been removed from the world
    Removed,
}

/// An event related to a single body
#[derive(Debug, Clone)]
pub struct BodyEvent {
    /// The type of body event
    pub event_type: BodyEventType,

    /// The body that the event refers to
    pub body: BodyHandle,
}

/// A queue of physics events
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Collision events
    collision_events: VecDeque<CollisionEvent>,

    /// Body events
    body_events: VecDeque<BodyEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collision event to the queue
    pub fn add_collision_event(&mut self, event: CollisionEvent) {
        self.collision_events.push_back(event);
    }

    /// Adds a body event to the queue
    pub fn add_body_event(&mut self, event: BodyEvent) {
        self.body_events.push_back(event);
    }

    /// Returns the collision events in detection order
    pub fn collision_events(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter()
    }

    /// Returns the body events in the order they happened
    pub fn body_events(&self) -> impl Iterator<Item = &BodyEvent> {
        self.body_events.iter()
    }

    /// Removes and returns the oldest collision event
    pub fn pop_collision_event(&mut self) -> Option<CollisionEvent> {
        self.collision_events.pop_front()
    }

    /// Removes and returns the oldest body event
    pub fn pop_body_event(&mut self) -> Option<BodyEvent> {
        self.body_events.pop_front()
    }

    /// Drops all collision events
    pub fn clear_collision_events(&mut self) {
        self.collision_events.clear();
    }

    /// Drops every queued event
    pub fn clear(&mut self) {
        self.collision_events.clear();
        self.body_events.clear();
    }

    /// Returns true if no events are queued
    pub fn is_empty(&self) -> bool {
        self.collision_events.is_empty() && self.body_events.is_empty()
    }
}
