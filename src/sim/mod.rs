//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order per collection)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod cpu;
pub mod effect;
pub mod entity;
pub mod event;
pub mod geometry;
pub mod laser;
pub mod overlay;
pub mod player;
pub mod ship;
pub mod state;
pub mod tick;
pub mod view;

pub use asteroid::{Asteroid, AsteroidKind, Asteroids, Palette, Shape, Tier};
pub use collision::{CollisionResult, check_collision, intersects};
pub use cpu::{Action, CpuBrain, TargetRef};
pub use effect::{Effects, Explosion, ExplosionVariant};
pub use entity::{Entity, Simulatable, UpdateContext};
pub use event::{GameEvent, GameOutcome};
pub use laser::{Laser, LaserColor, Lasers};
pub use overlay::Overlay;
pub use player::Player;
pub use ship::{Ship, ShipType, Ships};
pub use state::{GamePhase, GameState};
pub use tick::{ControlIntent, TickInput, tick};
pub use view::{Sprite, SpriteKey};
