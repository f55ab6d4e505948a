//! Sand batch spawning
//!
//! The first spawn trigger drops a 12x12 stack of sand above the upper funnel.
//! Cells are packed flush against each other; the engine's contact solver
//! pushes overlapping grains apart on the first step.

use glam::Vec2;
use rand::Rng;

use super::body::{BodyId, BodySpec, RenderStyle, Sprite};
use super::collision::Role;
use super::engine::PhysicsEngine;
use super::geometry::{SAND_SPRITE_SCALE, SAND_TEXTURES, SPAWN_GRID, SpawnGrid};
use super::state::GameState;
use crate::consts::SAND_LABEL;

pub const SAND_FRICTION: f32 = 0.00001;
pub const SAND_RESTITUTION: f32 = 0.5;
pub const SAND_DENSITY: f32 = 0.001;

/// One sand grain with a random size and look
pub fn sand_spec<R: Rng>(position: Vec2, radius: f32, rng: &mut R) -> BodySpec {
    let texture = if rng.random_bool(0.5) {
        SAND_TEXTURES[1]
    } else {
        SAND_TEXTURES[0]
    };
    BodySpec::circle(position, radius)
        .with_material(SAND_FRICTION, SAND_RESTITUTION, SAND_DENSITY)
        .with_label(SAND_LABEL)
        .with_role(Role::Sand)
        .with_render(RenderStyle::Sprite(Sprite::uniform(
            texture,
            radius * SAND_SPRITE_SCALE,
        )))
}

/// Lay out a full grid of sand grains.
///
/// Each grain sits right of the previous one in its row; each row starts
/// below the largest grain of the row above.
pub fn stack<R: Rng>(grid: &SpawnGrid, rng: &mut R) -> Vec<BodySpec> {
    let mut specs = Vec::with_capacity(grid.cell_count());
    let mut y = grid.origin_y;

    for _ in 0..grid.rows {
        let mut x = grid.origin_x;
        let mut row_height: f32 = 0.0;

        for _ in 0..grid.columns {
            let radius = rng.random_range(grid.radius_min..=grid.radius_max);
            let center = Vec2::new(x + radius, y + radius);
            specs.push(sand_spec(center, radius, rng));

            x += radius * 2.0 + grid.column_gap;
            row_height = row_height.max(radius * 2.0);
        }

        y += row_height + grid.row_gap;
    }

    specs
}

/// Drop the sand batch if the game hasn't started yet.
///
/// Returns the new body ids, or `None` when the trigger was ignored.
pub fn spawn_particles<E, R>(
    state: &mut GameState,
    engine: &mut E,
    rng: &mut R,
) -> Option<Vec<BodyId>>
where
    E: PhysicsEngine + ?Sized,
    R: Rng,
{
    if !state.start() {
        log::debug!("Spawn trigger ignored ({:?})", state.phase());
        return None;
    }

    let ids = engine.add_bodies(stack(&SPAWN_GRID, rng));
    log::info!("Spawned {} sand particles", ids.len());
    Some(ids)
}
