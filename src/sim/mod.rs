//! Simulation core
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The physics engine, audio output and pointer device are reached through
//! the `PhysicsEngine`, `AudioPlayer` and `InputConstraint` traits.

pub mod body;
pub mod builder;
pub mod collision;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod monitor;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::{Body, BodyId, BodySpec, RenderStyle, Shape, Sprite};
pub use builder::{BuildError, build_world};
pub use collision::{Category, CollisionFilter, Role};
pub use engine::{PhysicsEngine, World};
pub use input::{DragConstraint, InputConstraint, NoPointer};
pub use monitor::{GameEvent, GameMonitor, count_settled};
pub use physics::RapierWorld;
pub use spawner::spawn_particles;
pub use state::{GamePhase, GameState};
pub use tick::{Game, TickInput};
