//! Physics engine boundary
//!
//! The game only needs to add bodies, add the drag constraint, step, and read
//! bodies back. The playable engine is `RapierWorld`. `World` is the
//! in-memory double used by tests: it integrates gravity and drives the drag
//! constraint but resolves no contacts, so bodies fall straight through walls.

use glam::Vec2;

use super::body::{Body, BodyId, BodySpec};
use super::input::DragConstraint;
use crate::consts::GRAVITY;

/// What the game core needs from a physics engine
pub trait PhysicsEngine {
    fn add_body(&mut self, spec: BodySpec) -> BodyId;

    /// Insert a batch of bodies in one go
    fn add_bodies(&mut self, specs: Vec<BodySpec>) -> Vec<BodyId> {
        specs.into_iter().map(|spec| self.add_body(spec)).collect()
    }

    fn add_constraint(&mut self, constraint: DragConstraint);

    /// Update the pointer for every drag constraint (`None` = released)
    fn set_pointer(&mut self, pointer: Option<Vec2>);

    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f32);

    /// All bodies, in insertion order
    fn bodies(&self) -> &[Body];
}

/// In-memory engine: gravity plus drag, no contacts
#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<Body>,
    constraints: Vec<DragConstraint>,
    gravity: Vec2,
    next_id: u32,
    time_ticks: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with_gravity(Vec2::new(0.0, GRAVITY))
    }

    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            constraints: Vec::new(),
            gravity,
            next_id: 1,
            time_ticks: 0,
        }
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn constraints(&self) -> &[DragConstraint] {
        &self.constraints
    }

    /// Completed steps
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    fn apply_drag(&mut self) {
        let mut constraints = std::mem::take(&mut self.constraints);
        for constraint in &mut constraints {
            let Some((id, pointer)) = constraint.update_grab(&self.bodies) else {
                continue;
            };
            if let Some(body) = self.body_mut(id) {
                body.position += (pointer - body.position) * constraint.stiffness;
                body.velocity = Vec2::ZERO;
            }
        }
        self.constraints = constraints;
    }
}

impl PhysicsEngine for World {
    fn add_body(&mut self, spec: BodySpec) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::from_spec(id, spec));
        id
    }

    fn add_constraint(&mut self, constraint: DragConstraint) {
        self.constraints.push(constraint);
    }

    fn set_pointer(&mut self, pointer: Option<Vec2>) {
        for constraint in &mut self.constraints {
            constraint.pointer = pointer;
        }
    }

    fn step(&mut self, dt: f32) {
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.velocity += self.gravity * dt;
            body.position += body.velocity * dt;
        }
        self.apply_drag();
        self.time_ticks += 1;
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }
}
