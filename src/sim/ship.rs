//! Player ships and the collection that owns them

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroids;
use super::collision::intersects;
use super::cpu::CpuBrain;
use super::effect::Effects;
use super::entity::{Entity, Simulatable, UpdateContext};
use super::event::{Events, GameEvent};
use super::player::{self, Player};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::SimError;
use crate::heading;

/// Sprite dimensions
pub const SHIP_WIDTH: f32 = 99.0;
pub const SHIP_HEIGHT: f32 = 106.0;

/// Degrees turned per tick while a rotate control is held
pub const ROTATION_SPEED: f32 = 9.0;

/// Velocity gained per tick while thrusting
pub const SPEED_RATE: f32 = 0.25;

/// Velocity multiplier applied every tick
pub const SPEED_DECAY: f32 = 0.995;

const OUTLINE_SHIP: &[Vec2] = &[
    Vec2::new(-8.0, -45.0),
    Vec2::new(22.0, -49.0),
    Vec2::new(22.0, -43.0),
    Vec2::new(14.0, -35.0),
    Vec2::new(28.0, -11.0),
    Vec2::new(54.0, -7.0),
    Vec2::new(54.0, 9.0),
    Vec2::new(28.0, 13.0),
    Vec2::new(14.0, 37.0),
    Vec2::new(22.0, 46.0),
    Vec2::new(22.0, 50.0),
    Vec2::new(-9.0, 47.0),
    Vec2::new(-11.0, 15.0),
    Vec2::new(-21.0, 7.0),
    Vec2::new(-21.0, -6.0),
    Vec2::new(-11.0, -12.0),
];

/// Who flies the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipType {
    Human,
    Cpu,
}

impl ShipType {
    /// The other seat
    pub fn opponent(&self) -> ShipType {
        match self {
            ShipType::Human => ShipType::Cpu,
            ShipType::Cpu => ShipType::Human,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub entity: Entity,
    pub kind: ShipType,
    thrust: bool,
    /// Decision state, present only on the cpu ship
    pub brain: Option<CpuBrain>,
}

impl Ship {
    /// New ship facing east in the middle of the screen
    pub fn new(id: u32, kind: ShipType) -> Self {
        let mut entity = Entity::new(id, OUTLINE_SHIP, SHIP_WIDTH, SHIP_HEIGHT);
        entity.set_position(Self::start_position());
        let brain = match kind {
            ShipType::Human => None,
            ShipType::Cpu => Some(CpuBrain::default()),
        };
        Self {
            entity,
            kind,
            thrust: false,
            brain,
        }
    }

    /// Top-left corner that centers a ship on screen
    pub fn start_position() -> Vec2 {
        Vec2::new(
            SCREEN_WIDTH / 2.0 - SHIP_WIDTH / 2.0,
            SCREEN_HEIGHT / 2.0 - SHIP_HEIGHT / 2.0,
        )
    }

    #[inline]
    pub fn has_thrust(&self) -> bool {
        self.thrust
    }

    /// Returns true when the flag actually changed
    pub fn set_thrust(&mut self, thrust: bool) -> bool {
        let changed = self.thrust != thrust;
        self.thrust = thrust;
        changed
    }

    pub fn rotate_left(&mut self) {
        self.entity.rotation_speed = -ROTATION_SPEED;
    }

    pub fn rotate_right(&mut self) {
        self.entity.rotation_speed = ROTATION_SPEED;
    }

    pub fn rotate_reset(&mut self) {
        self.entity.rotation_speed = 0.0;
    }

    /// Zero velocity, thrust and rotation speed
    pub fn stop(&mut self) {
        self.entity.stop();
        self.thrust = false;
    }
}

impl Simulatable for Ship {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn update(&mut self, _ctx: &UpdateContext) {
        self.entity.spin();

        if self.thrust {
            self.entity.vel += heading(self.entity.rotation()) * SPEED_RATE;
        }
        self.entity.vel *= SPEED_DECAY;

        self.entity.update_location();
    }
}

/// Every ship in the session, at most one per `ShipType`
#[derive(Debug, Clone)]
pub struct Ships {
    list: Vec<Ship>,
    next_id: u32,
}

impl Default for Ships {
    fn default() -> Self {
        Self::new()
    }
}

impl Ships {
    pub fn new() -> Self {
        Self {
            list: Vec::new(),
            next_id: 1,
        }
    }

    /// Add (or replace) the ship for `kind`; returns its id
    pub fn add(&mut self, kind: ShipType) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.list.retain(|s| s.kind != kind);
        self.list.push(Ship::new(id, kind));
        id
    }

    pub fn get(&self, kind: ShipType) -> Option<&Ship> {
        self.list.iter().find(|s| s.kind == kind)
    }

    pub fn get_mut(&mut self, kind: ShipType) -> Option<&mut Ship> {
        self.list.iter_mut().find(|s| s.kind == kind)
    }

    pub fn require(&self, kind: ShipType) -> Result<&Ship, SimError> {
        self.get(kind).ok_or(SimError::MissingShip(kind))
    }

    pub fn require_mut(&mut self, kind: ShipType) -> Result<&mut Ship, SimError> {
        self.get_mut(kind).ok_or(SimError::MissingShip(kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// No ship left alive (true for an empty collection)
    pub fn all_dead(&self) -> bool {
        self.list.iter().all(|s| s.is_dead())
    }

    /// Advance live ships, then resolve asteroid hits against them
    ///
    /// A ship touched by an asteroid is destroyed and its player loses a
    /// life; losing the human ship also requests a haptic pulse.
    pub fn update(
        &mut self,
        ctx: &UpdateContext,
        asteroids: &mut Asteroids,
        players: &mut [Player],
        effects: &mut Effects,
        events: &mut Events,
        rng: &mut impl Rng,
    ) -> Result<(), SimError> {
        for ship in self.list.iter_mut().filter(|s| !s.is_dead()) {
            ship.update(ctx);

            let hit = asteroids
                .as_mut_slice()
                .iter_mut()
                .any(|asteroid| intersects(&mut asteroid.entity, &ship.entity, false));
            if !hit {
                continue;
            }

            ship.entity.set_dead(true);
            effects.explode(&ship.entity, rng);
            events.push(GameEvent::Explosion);

            let player = player::find_mut(players, ship.kind)?;
            player.lose_life();
            log::debug!(
                "{:?} ship hit by asteroid, {} lives left",
                ship.kind,
                player.lives()
            );
            events.push(GameEvent::ShipLost {
                ship: ship.kind,
                lives_left: player.lives(),
            });
            if ship.kind == ShipType::Human {
                events.vibrate();
            }
        }
        Ok(())
    }

    /// Center every ship on screen and stop it
    pub fn place_middle(&mut self) {
        for ship in &mut self.list {
            ship.entity.set_position(Ship::start_position());
            ship.stop();
        }
    }

    /// Put human and cpu ships in opposite corners along a random diagonal
    pub fn place_opposite_corners(&mut self, rng: &mut impl Rng) -> Result<(), SimError> {
        let (human, cpu) = if rng.random_bool(0.5) {
            (
                Vec2::ZERO,
                Vec2::new(SCREEN_WIDTH - SHIP_HEIGHT, SCREEN_HEIGHT - SHIP_HEIGHT),
            )
        } else {
            (
                Vec2::new(0.0, SCREEN_HEIGHT - SHIP_WIDTH),
                Vec2::new(SCREEN_WIDTH - SHIP_HEIGHT, 0.0),
            )
        };
        self.require_mut(ShipType::Human)?.entity.set_position(human);
        self.require_mut(ShipType::Cpu)?.entity.set_position(cpu);
        Ok(())
    }

    /// Zero velocity, thrust and rotation speed of every ship
    pub fn stop_all(&mut self) {
        for ship in &mut self.list {
            ship.stop();
        }
    }

    /// Bring the ship for `kind` back to life, if present
    pub fn revive(&mut self, kind: ShipType) {
        if let Some(ship) = self.get_mut(kind) {
            ship.entity.set_dead(false);
            if let Some(brain) = ship.brain.as_mut() {
                brain.forget();
            }
        }
    }
}
