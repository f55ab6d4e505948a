//! Body descriptions and live bodies
//!
//! `BodySpec` is what the game hands to the engine; `Body` is what the engine
//! hands back when queried.

use glam::Vec2;

use super::collision::{CollisionFilter, Role};
use crate::consts::SAND_LABEL;

/// Engine-assigned body handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
}

impl Shape {
    /// Half extents of the unrotated shape
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius),
            Shape::Rectangle { width, height } => Vec2::new(width, height) * 0.5,
        }
    }

    /// Whether `point` lies inside the shape centered at `center` (rotation ignored)
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        match *self {
            Shape::Circle { radius } => center.distance_squared(point) <= radius * radius,
            Shape::Rectangle { .. } => {
                let d = (point - center).abs();
                let half = self.half_extents();
                d.x <= half.x && d.y <= half.y
            }
        }
    }
}

/// Image drawn over a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: &'static str,
    pub x_scale: f32,
    pub y_scale: f32,
}

impl Sprite {
    pub const fn uniform(texture: &'static str, scale: f32) -> Self {
        Self {
            texture,
            x_scale: scale,
            y_scale: scale,
        }
    }
}

/// How a body is drawn (presentation only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderStyle {
    Fill(&'static str),
    Sprite(Sprite),
    Hidden,
}

/// Everything needed to create a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub shape: Shape,
    pub position: Vec2,
    /// Radians
    pub angle: f32,
    pub is_static: bool,
    pub friction: f32,
    pub restitution: f32,
    pub density: f32,
    pub label: Option<&'static str>,
    pub filter: CollisionFilter,
    pub render: RenderStyle,
}

impl BodySpec {
    fn new(shape: Shape, position: Vec2) -> Self {
        Self {
            shape,
            position,
            angle: 0.0,
            is_static: false,
            friction: 0.1,
            restitution: 0.0,
            density: 0.001,
            label: None,
            filter: CollisionFilter::NONE,
            render: RenderStyle::Hidden,
        }
    }

    pub fn rectangle(position: Vec2, width: f32, height: f32) -> Self {
        Self::new(Shape::Rectangle { width, height }, position)
    }

    pub fn circle(position: Vec2, radius: f32) -> Self {
        Self::new(Shape::Circle { radius }, position)
    }

    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn rotated(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.filter = CollisionFilter::for_role(role);
        self
    }

    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_render(mut self, render: RenderStyle) -> Self {
        self.render = render;
        self
    }

    pub fn with_material(mut self, friction: f32, restitution: f32, density: f32) -> Self {
        self.friction = friction;
        self.restitution = restitution;
        self.density = density;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }
}

/// A body living inside the engine
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub shape: Shape,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub is_static: bool,
    pub friction: f32,
    pub restitution: f32,
    pub density: f32,
    pub label: Option<&'static str>,
    pub filter: CollisionFilter,
    pub render: RenderStyle,
}

impl Body {
    pub fn from_spec(id: BodyId, spec: BodySpec) -> Self {
        Self {
            id,
            shape: spec.shape,
            position: spec.position,
            velocity: Vec2::ZERO,
            angle: spec.angle,
            is_static: spec.is_static,
            friction: spec.friction,
            restitution: spec.restitution,
            density: spec.density,
            label: spec.label,
            filter: spec.filter,
            render: spec.render,
        }
    }

    /// Counts toward game over when below the threshold
    #[inline]
    pub fn is_sand(&self) -> bool {
        self.label == Some(SAND_LABEL)
    }

    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Rectangle { .. } => None,
        }
    }
}

/// Topmost dynamic body under `point` (last inserted wins)
pub fn pick(bodies: &[Body], point: Vec2) -> Option<BodyId> {
    bodies
        .iter()
        .rev()
        .filter(|b| !b.is_static)
        .find(|b| b.shape.contains(b.position, point))
        .map(|b| b.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_defaults() {
        let spec = BodySpec::circle(Vec2::new(1.0, 2.0), 5.0);
        assert!(!spec.is_static);
        assert_eq!(spec.filter, CollisionFilter::NONE);
        assert_eq!(spec.label, None);
        assert_eq!(spec.render, RenderStyle::Hidden);
    }

    #[test]
    fn test_from_spec_keeps_fields() {
        let spec = BodySpec::rectangle(Vec2::new(10.0, 20.0), 4.0, 2.0)
            .fixed()
            .rotated(0.5)
            .with_role(Role::Wall)
            .with_render(RenderStyle::Fill("black"));
        let body = Body::from_spec(BodyId(7), spec);
        assert_eq!(body.id, BodyId(7));
        assert!(body.is_static);
        assert_eq!(body.angle, 0.5);
        assert_eq!(body.filter, CollisionFilter::for_role(Role::Wall));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.radius(), None);
        assert!(!body.is_sand());
    }

    #[test]
    fn test_shape_contains() {
        let c = Shape::Circle { radius: 2.0 };
        assert!(c.contains(Vec2::ZERO, Vec2::new(1.0, 1.0)));
        assert!(!c.contains(Vec2::ZERO, Vec2::new(2.0, 2.0)));

        let r = Shape::Rectangle { width: 4.0, height: 2.0 };
        assert!(r.contains(Vec2::ZERO, Vec2::new(1.9, -0.9)));
        assert!(!r.contains(Vec2::ZERO, Vec2::new(0.0, 1.5)));
    }
}
