//! Pointer drag handle
//!
//! The host supplies a drag constraint bound to its pointer device; the engine
//! uses it to pull whichever dynamic body is under the pointer.

use glam::Vec2;

use super::body::{Body, BodyId, pick};
use super::builder::BuildError;
use crate::consts::DRAG_STIFFNESS;

/// Spring between the pointer and a grabbed body
#[derive(Debug, Clone, PartialEq)]
pub struct DragConstraint {
    /// Fraction of the pointer-body gap closed per step
    pub stiffness: f32,
    pub visible: bool,
    /// Pointer position in world space while the button is held
    pub pointer: Option<Vec2>,
    pub grabbed: Option<BodyId>,
}

impl DragConstraint {
    pub fn new(stiffness: f32) -> Self {
        Self {
            stiffness: stiffness.clamp(0.0, 1.0),
            visible: false,
            pointer: None,
            grabbed: None,
        }
    }
}

impl DragConstraint {
    /// Settle the grab for this step: drop it on release, pick on press.
    ///
    /// Returns the held body and where the pointer wants it.
    pub fn update_grab(&mut self, bodies: &[Body]) -> Option<(BodyId, Vec2)> {
        let Some(pointer) = self.pointer else {
            self.grabbed = None;
            return None;
        };
        if self.grabbed.is_none() {
            self.grabbed = pick(bodies, pointer);
        }
        self.grabbed.map(|id| (id, pointer))
    }
}

impl Default for DragConstraint {
    fn default() -> Self {
        Self::new(DRAG_STIFFNESS)
    }
}

/// Source of the drag constraint (a canvas with a mouse, or nothing at all)
pub trait InputConstraint {
    fn drag_constraint(&mut self) -> Result<DragConstraint, BuildError>;
}

/// Input for hosts without a pointer device
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPointer;

impl InputConstraint for NoPointer {
    fn drag_constraint(&mut self) -> Result<DragConstraint, BuildError> {
        Ok(DragConstraint::default())
    }
}
