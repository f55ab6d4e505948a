//! rapier2d-backed engine
//!
//! Positions cross the `PhysicsEngine` boundary in pixels with y pointing
//! down and live inside rapier in meters. Collision filters become
//! `InteractionGroups` (category as membership, mask as filter), which is the
//! same symmetric test `CollisionFilter::can_collide` applies. Contact
//! friction combines by minimum and restitution by maximum.

use glam::Vec2;
use rapier2d::na as nalgebra;
use rapier2d::prelude::{
    CCDSolver, CoefficientCombineRule, ColliderBuilder, ColliderSet, DefaultBroadPhase, Group,
    ImpulseJointSet, IntegrationParameters, InteractionGroups, IslandManager, MultibodyJointSet,
    NarrowPhase, PhysicsPipeline, Real, RigidBodyBuilder, RigidBodyHandle, RigidBodySet, Vector,
    vector,
};

use super::body::{Body, BodyId, BodySpec, Shape};
use super::collision::CollisionFilter;
use super::engine::PhysicsEngine;
use super::input::DragConstraint;
use crate::consts::GRAVITY;

/// World pixels per rapier meter
pub const PIXELS_PER_METER: f32 = 100.0;

/// Rapier groups for a body's filter.
///
/// Non-zero `group` values are not mapped; no role in the game sets one.
pub fn interaction_groups(filter: &CollisionFilter) -> InteractionGroups {
    InteractionGroups::new(Group::from(filter.category), Group::from(filter.mask))
}

#[inline]
fn to_meters(v: Vec2) -> Vector<Real> {
    vector![v.x / PIXELS_PER_METER, v.y / PIXELS_PER_METER]
}

#[inline]
fn to_pixels(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y) * PIXELS_PER_METER
}

/// Engine with real contacts
pub struct RapierWorld {
    bodies: Vec<Body>,
    handles: Vec<RigidBodyHandle>,
    constraints: Vec<DragConstraint>,
    next_id: u32,
    time_ticks: u64,

    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl RapierWorld {
    pub fn new() -> Self {
        Self::with_gravity(Vec2::new(0.0, GRAVITY))
    }

    /// `gravity` in pixels per second squared
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            handles: Vec::new(),
            constraints: Vec::new(),
            next_id: 1,
            time_ticks: 0,

            gravity: to_meters(gravity),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn constraints(&self) -> &[DragConstraint] {
        &self.constraints
    }

    /// Completed steps
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Drive grabbed bodies toward the pointer through their velocity
    fn apply_drag(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let mut constraints = std::mem::take(&mut self.constraints);
        for constraint in &mut constraints {
            let Some((id, pointer)) = constraint.update_grab(&self.bodies) else {
                continue;
            };
            let Some(index) = self.bodies.iter().position(|b| b.id == id) else {
                continue;
            };
            let gap = (pointer - self.bodies[index].position) * constraint.stiffness;
            if let Some(rb) = self.rigid_bodies.get_mut(self.handles[index]) {
                rb.set_linvel(to_meters(gap / dt), true);
            }
        }
        self.constraints = constraints;
    }

    /// Copy rapier's poses back into the body list
    fn sync_bodies(&mut self) {
        for (body, handle) in self.bodies.iter_mut().zip(&self.handles) {
            if body.is_static {
                continue;
            }
            if let Some(rb) = self.rigid_bodies.get(*handle) {
                body.position = to_pixels(rb.translation());
                body.velocity = to_pixels(rb.linvel());
                body.angle = rb.rotation().angle();
            }
        }
    }
}

impl PhysicsEngine for RapierWorld {
    fn add_body(&mut self, spec: BodySpec) -> BodyId {
        let builder = if spec.is_static {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic().ccd_enabled(true)
        };
        let rigid_body = builder
            .translation(to_meters(spec.position))
            .rotation(spec.angle)
            .build();

        let collider = match spec.shape {
            Shape::Circle { radius } => ColliderBuilder::ball(radius / PIXELS_PER_METER),
            Shape::Rectangle { width, height } => ColliderBuilder::cuboid(
                width * 0.5 / PIXELS_PER_METER,
                height * 0.5 / PIXELS_PER_METER,
            ),
        }
        .friction(spec.friction)
        .friction_combine_rule(CoefficientCombineRule::Min)
        .restitution(spec.restitution)
        .restitution_combine_rule(CoefficientCombineRule::Max)
        // Density is given per square pixel
        .density(spec.density * PIXELS_PER_METER * PIXELS_PER_METER)
        .collision_groups(interaction_groups(&spec.filter))
        .build();

        let handle = self.rigid_bodies.insert(rigid_body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.rigid_bodies);

        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::from_spec(id, spec));
        self.handles.push(handle);
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
        self.apply_drag(dt);

        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.sync_bodies();
        self.time_ticks += 1;
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }
}
