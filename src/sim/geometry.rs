//! Playfield layout
//!
//! Two funnel chutes stacked above a catch basin on the left, a closed side
//! chamber on the right. The red threshold line sits between the chutes; sand
//! that ends up below it counts toward game over.

use glam::Vec2;

/// Horizontal inset of the funnel walls from the playfield edges
pub const FUNNEL_SIDE: f32 = 220.0;

/// A static rectangular wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Clockwise rotation in degrees
    pub rotation_deg: f32,
    pub color: &'static str,
}

const fn wall(x: f32, y: f32, width: f32, height: f32, rotation_deg: f32) -> WallShape {
    WallShape {
        x,
        y,
        width,
        height,
        rotation_deg,
        color: "black",
    }
}

impl WallShape {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.rotation_deg.to_radians()
    }
}

/// Horizontal sensor line; sand below `y` counts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdLine {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: &'static str,
}

impl ThresholdLine {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A fixed image with no physical presence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteProp {
    pub x: f32,
    pub y: f32,
    pub texture: &'static str,
    pub scale: f32,
}

impl SpriteProp {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A bouncy scenery ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleShape {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub restitution: f32,
    pub texture: &'static str,
    pub scale: f32,
}

impl ObstacleShape {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Spawn grid for the sand batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnGrid {
    pub origin_x: f32,
    pub origin_y: f32,
    pub columns: usize,
    pub rows: usize,
    pub column_gap: f32,
    pub row_gap: f32,
    pub radius_min: f32,
    pub radius_max: f32,
}

impl SpawnGrid {
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }
}

/// Upper and lower funnel plus the basin floor
pub static FUNNEL_WALLS: [WallShape; 5] = [
    wall(FUNNEL_SIDE, 260.0, 500.0, 10.0, 60.0),
    wall(800.0 - FUNNEL_SIDE, 260.0, 500.0, 10.0, -60.0),
    wall(FUNNEL_SIDE, 690.0, 500.0, 10.0, -60.0),
    wall(800.0 - FUNNEL_SIDE, 690.0, 500.0, 10.0, 60.0),
    wall(400.0, 900.0, 620.0, 10.0, 0.0),
];

pub const THRESHOLD: ThresholdLine = ThresholdLine {
    x: 400.0,
    y: 650.0,
    width: 500.0,
    height: 10.0,
    color: "red",
};

/// Left and right side-chamber walls
pub static CHAMBER_VERTICALS: [WallShape; 2] = [
    wall(1000.0, 400.0, 400.0, 50.0, 90.0),
    wall(1400.0, 400.0, 400.0, 50.0, 90.0),
];

/// Side-chamber ceiling and floor
pub static CHAMBER_HORIZONTALS: [WallShape; 2] = [
    wall(1200.0, 200.0, 400.0, 50.0, 0.0),
    wall(1200.0, 600.0, 400.0, 50.0, 0.0),
];

pub const CHAMBER_SPRITE: SpriteProp = SpriteProp {
    x: 1200.0,
    y: 400.0,
    texture: "./images/mama.png",
    scale: 0.7,
};

pub static OBSTACLES: [ObstacleShape; 2] = [
    ObstacleShape {
        x: 1200.0,
        y: 400.0,
        radius: 10.0,
        restitution: 1.3,
        texture: "./images/yopparai.png",
        scale: 0.3,
    },
    ObstacleShape {
        x: 1200.0,
        y: 400.0,
        radius: 10.0,
        restitution: 1.4,
        texture: "./images/yopparai.png",
        scale: 0.3,
    },
];

pub const GAME_OVER_SPRITE: SpriteProp = SpriteProp {
    x: 800.0,
    y: 400.0,
    texture: "./images/gameover.png",
    scale: 1.5,
};

/// Sand starts above the top of the screen, over the upper funnel
pub const SPAWN_GRID: SpawnGrid = SpawnGrid {
    origin_x: 240.0,
    origin_y: -250.0,
    columns: 12,
    rows: 12,
    column_gap: 0.0,
    row_gap: 0.0,
    radius_min: 10.0,
    radius_max: 20.0,
};

/// The two sand looks, picked by coin flip
pub const SAND_TEXTURES: [&str; 2] = ["./images/popcorn.png", "./images/poteto.png"];

/// Sprite scale per unit of particle radius
pub const SAND_SPRITE_SCALE: f32 = 0.02;

/// Every wall in insertion order
pub fn all_walls() -> impl Iterator<Item = &'static WallShape> {
    FUNNEL_WALLS
        .iter()
        .chain(CHAMBER_VERTICALS.iter())
        .chain(CHAMBER_HORIZONTALS.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

    #[test]
    fn test_funnels_are_mirrored() {
        for pair in [(0, 1), (2, 3)] {
            let (a, b) = (FUNNEL_WALLS[pair.0], FUNNEL_WALLS[pair.1]);
            assert_eq!(a.y, b.y);
            assert_eq!(a.x + b.x, 800.0);
            assert_eq!(a.rotation_deg, -b.rotation_deg);
        }
    }

    #[test]
    fn test_threshold_between_chutes() {
        let upper = FUNNEL_WALLS[0].y;
        let lower = FUNNEL_WALLS[2].y;
        assert!(THRESHOLD.y > upper && THRESHOLD.y < lower);
        assert!(THRESHOLD.y < WORLD_HEIGHT);
    }

    #[test]
    fn test_spawn_grid_above_screen() {
        assert_eq!(SPAWN_GRID.cell_count(), 144);
        assert!(SPAWN_GRID.origin_y < 0.0);
        let widest = SPAWN_GRID.columns as f32 * SPAWN_GRID.radius_max * 2.0;
        assert!(SPAWN_GRID.origin_x + widest < WORLD_WIDTH);
    }

    #[test]
    fn test_obstacles_sit_in_chamber() {
        for obstacle in &OBSTACLES {
            assert_eq!(obstacle.center(), CHAMBER_SPRITE.center());
            assert!(obstacle.restitution > 1.0);
        }
    }

    #[test]
    fn test_wall_angles() {
        assert!((FUNNEL_WALLS[0].angle() - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
        assert_eq!(all_walls().count(), 9);
    }
}
