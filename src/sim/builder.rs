//! Playfield construction
//!
//! Runs once at startup and fills an empty engine with the static course, the
//! threshold sensor, the side chamber and its inhabitants, and the drag handle.

use thiserror::Error;

use super::body::{BodyId, BodySpec, RenderStyle, Sprite};
use super::collision::Role;
use super::engine::PhysicsEngine;
use super::geometry::{
    CHAMBER_HORIZONTALS, CHAMBER_SPRITE, CHAMBER_VERTICALS, FUNNEL_WALLS, OBSTACLES, SpriteProp,
    THRESHOLD, WallShape,
};
use super::input::InputConstraint;

/// Fatal playfield initialization failure
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("render target `{0}` not found")]
    MissingElement(String),
    #[error("render target `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("2d drawing context unavailable")]
    NoContext,
}

/// Static wall body
pub fn wall_spec(wall: &WallShape) -> BodySpec {
    BodySpec::rectangle(wall.center(), wall.width, wall.height)
        .fixed()
        .rotated(wall.angle())
        .with_role(Role::Wall)
        .with_render(RenderStyle::Fill(wall.color))
}

/// 1x1 static body that only exists to carry a sprite
pub fn sprite_spec(prop: &SpriteProp) -> BodySpec {
    BodySpec::rectangle(prop.center(), 1.0, 1.0)
        .fixed()
        .with_role(Role::Decoration)
        .with_render(RenderStyle::Sprite(Sprite::uniform(prop.texture, prop.scale)))
}

/// Populate `engine` with the playfield.
///
/// Returns the ids of every inserted body in insertion order.
pub fn build_world<E, I>(engine: &mut E, input: &mut I) -> Result<Vec<BodyId>, BuildError>
where
    E: PhysicsEngine + ?Sized,
    I: InputConstraint + ?Sized,
{
    // Ask for the drag handle first so a missing render target leaves the engine untouched
    let drag = input.drag_constraint()?;

    let mut ids = engine.add_bodies(FUNNEL_WALLS.iter().map(wall_spec).collect());

    let threshold = BodySpec::rectangle(THRESHOLD.center(), THRESHOLD.width, THRESHOLD.height)
        .fixed()
        .with_role(Role::BorderLine)
        .with_render(RenderStyle::Fill(THRESHOLD.color));
    ids.push(engine.add_body(threshold));

    ids.extend(engine.add_bodies(
        CHAMBER_VERTICALS
            .iter()
            .chain(CHAMBER_HORIZONTALS.iter())
            .map(wall_spec)
            .collect(),
    ));

    ids.push(engine.add_body(sprite_spec(&CHAMBER_SPRITE)));

    ids.extend(
        engine.add_bodies(
            OBSTACLES
                .iter()
                .map(|o| {
                    BodySpec::circle(o.center(), o.radius)
                        .with_restitution(o.restitution)
                        .with_role(Role::Obstacle)
                        .with_render(RenderStyle::Sprite(Sprite::uniform(o.texture, o.scale)))
                })
                .collect(),
        ),
    );

    engine.add_constraint(drag);

    log::info!("Playfield built: {} bodies", ids.len());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::{Category, CollisionFilter};
    use crate::sim::engine::World;
    use crate::sim::geometry::THRESHOLD;
    use crate::sim::input::{DragConstraint, NoPointer};

    struct MissingCanvas;

    impl InputConstraint for MissingCanvas {
        fn drag_constraint(&mut self) -> Result<DragConstraint, BuildError> {
            Err(BuildError::MissingElement("#canvas".into()))
        }
    }

    #[test]
    fn test_build_order_and_counts() {
        let mut world = World::new();
        let ids = build_world(&mut world, &mut NoPointer).expect("build");
        // 5 funnel + 1 line + 4 chamber + 1 sprite + 2 obstacles
        assert_eq!(ids.len(), 13);
        assert_eq!(world.bodies().len(), 13);
        assert_eq!(world.constraints().len(), 1);

        let bodies = world.bodies();
        assert!(bodies[..5].iter().all(|b| b.filter.is(Category::Wall) && b.is_static));
        assert!(bodies[5].filter.is(Category::BorderLine));
        assert_eq!(bodies[5].position.y, THRESHOLD.y);
        assert!(bodies[6..10].iter().all(|b| b.filter.is(Category::Wall)));
        assert_eq!(bodies[10].filter, CollisionFilter::NONE);
        assert!(bodies[11..].iter().all(|b| !b.is_static && b.restitution > 1.0));
    }

    #[test]
    fn test_no_sand_before_spawn() {
        let mut world = World::new();
        build_world(&mut world, &mut NoPointer).expect("build");
        assert!(world.bodies().iter().all(|b| !b.is_sand()));
    }

    #[test]
    fn test_borderline_is_inert() {
        let mut world = World::new();
        build_world(&mut world, &mut NoPointer).expect("build");
        let line = world
            .bodies()
            .iter()
            .find(|b| b.filter.is(Category::BorderLine))
            .expect("threshold body");
        assert_eq!(line.filter.mask, 0);
        for other in world.bodies() {
            assert!(!CollisionFilter::can_collide(&line.filter, &other.filter));
        }
    }

    #[test]
    fn test_missing_target_is_fatal() {
        let mut world = World::new();
        let err = build_world(&mut world, &mut MissingCanvas).unwrap_err();
        assert!(matches!(err, BuildError::MissingElement(_)));
        assert_eq!(err.to_string(), "render target `#canvas` not found");
        assert!(world.bodies().is_empty());
    }
}
