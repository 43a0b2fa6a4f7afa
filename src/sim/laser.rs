//! Laser shots and combat resolution
//!
//! Lasers are the only thing that deals damage: in classic and coop they
//! break asteroids, in versus they destroy the opposing ship.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroids;
use super::collision::intersects;
use super::effect::Effects;
use super::entity::{Entity, Simulatable, UpdateContext};
use super::event::{Events, GameEvent};
use super::player::{self, Player};
use super::ship::{Ship, ShipType, Ships};
use crate::consts::VERSUS_KILL_SCORE;
use crate::error::SimError;
use crate::heading;
use crate::settings::GameMode;

/// Sprite dimensions
pub const LASER_WIDTH: f32 = 13.0;
pub const LASER_HEIGHT: f32 = 54.0;

/// Distance travelled per tick
pub const LASER_VELOCITY: f32 = 33.0625;

/// Lifetime of a shot (milliseconds)
pub const LASER_DURATION_MS: u64 = 850;

/// Shots a single ship may have in flight at once
pub const LASER_LIMIT: usize = 1;

const OUTLINE_LASER: &[Vec2] = &[
    Vec2::new(-27.0, -6.0),
    Vec2::new(27.0, -6.0),
    Vec2::new(27.0, 6.0),
    Vec2::new(-27.0, 6.0),
];

/// Sprite colour, one per shooter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaserColor {
    Blue,
    Green,
}

impl From<ShipType> for LaserColor {
    fn from(source: ShipType) -> Self {
        match source {
            ShipType::Human => LaserColor::Blue,
            ShipType::Cpu => LaserColor::Green,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Laser {
    pub entity: Entity,
    pub source: ShipType,
    pub color: LaserColor,
    created_ms: u64,
}

impl Laser {
    /// Shot leaving the center of `ship` along its heading
    pub fn new(id: u32, ship: &Ship, now_ms: u64) -> Self {
        let mut entity = Entity::new(id, OUTLINE_LASER, LASER_WIDTH, LASER_HEIGHT);
        entity.set_rotation(ship.entity.rotation());
        entity.center_on(ship.entity.center());
        entity.vel = heading(entity.rotation()) * LASER_VELOCITY;
        Self {
            entity,
            source: ship.kind,
            color: ship.kind.into(),
            created_ms: now_ms,
        }
    }

    /// Whether the shot has outlived its duration at `now_ms`
    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_ms) >= LASER_DURATION_MS
    }
}

impl Simulatable for Laser {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn update(&mut self, ctx: &UpdateContext) {
        self.entity.update_location();
        if self.expired(ctx.now_ms) {
            self.entity.set_dead(true);
        }
    }
}

/// Everything a laser can hit or change when it connects
pub struct Battlefield<'a, R: Rng> {
    pub mode: GameMode,
    pub asteroids: &'a mut Asteroids,
    pub ships: &'a mut Ships,
    pub players: &'a mut [Player],
    pub effects: &'a mut Effects,
    pub events: &'a mut Events,
    pub rng: &'a mut R,
}

/// Every laser in flight
#[derive(Debug, Clone)]
pub struct Lasers {
    list: Vec<Laser>,
    next_id: u32,
}

impl Default for Lasers {
    fn default() -> Self {
        Self::new()
    }
}

impl Lasers {
    pub fn new() -> Self {
        Self {
            list: Vec::new(),
            next_id: 1,
        }
    }

    /// Shots from `source` still in flight
    pub fn alive_from(&self, source: ShipType) -> usize {
        self.list
            .iter()
            .filter(|l| l.source == source && !l.is_dead())
            .count()
    }

    /// Fire from `ship`, unless it is dead or already at the limit
    ///
    /// Returns the new laser's id. A rejected shot is not an error.
    pub fn fire(&mut self, ship: &Ship, now_ms: u64) -> Option<u32> {
        if ship.is_dead() {
            return None;
        }
        if self.alive_from(ship.kind) >= LASER_LIMIT {
            log::debug!("{:?} laser rejected, limit reached", ship.kind);
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.list.push(Laser::new(id, ship, now_ms));
        Some(id)
    }

    /// Advance every shot and resolve what it hits
    pub fn update<R: Rng>(
        &mut self,
        ctx: &UpdateContext,
        field: &mut Battlefield<'_, R>,
    ) -> Result<(), SimError> {
        self.list.retain(|l| !l.is_dead());

        let mut clear_all = false;
        for laser in &mut self.list {
            laser.update(ctx);
            if laser.is_dead() {
                continue;
            }

            let cleared = if field.mode.is_versus() {
                Self::hit_ship(laser, field)?
            } else {
                Self::hit_asteroid(laser, field)?;
                false
            };
            if cleared {
                clear_all = true;
                break;
            }
        }

        if clear_all {
            self.list.clear();
        } else {
            self.list.retain(|l| !l.is_dead());
        }
        Ok(())
    }

    /// Classic/coop: break the first asteroid the laser touches
    fn hit_asteroid<R: Rng>(
        laser: &mut Laser,
        field: &mut Battlefield<'_, R>,
    ) -> Result<(), SimError> {
        let Some(asteroid) = field
            .asteroids
            .as_mut_slice()
            .iter_mut()
            .find(|a| intersects(&mut laser.entity, &a.entity, true))
        else {
            return Ok(());
        };

        asteroid.entity.set_dead(true);
        laser.entity.set_dead(true);
        let (kind, center) = (asteroid.kind, asteroid.entity.center());

        field.effects.explode(&laser.entity, &mut *field.rng);
        field.events.push(GameEvent::Explosion);
        player::find_mut(field.players, laser.source)?.add_score(kind.tier().score());
        field.asteroids.spawn_children(kind, center, &mut *field.rng)?;
        Ok(())
    }

    /// Versus: destroy the opposing ship; returns true when it was hit
    fn hit_ship<R: Rng>(
        laser: &mut Laser,
        field: &mut Battlefield<'_, R>,
    ) -> Result<bool, SimError> {
        let target = laser.source.opponent();
        let ship = field.ships.require_mut(target)?;
        if ship.is_dead() || !intersects(&mut laser.entity, &ship.entity, true) {
            return Ok(false);
        }

        ship.entity.set_dead(true);
        laser.entity.set_dead(true);
        field.effects.explode(&ship.entity, &mut *field.rng);
        field.events.push(GameEvent::Explosion);

        let victim = player::find_mut(field.players, target)?;
        victim.lose_life();
        let lives_left = victim.lives();
        player::find_mut(field.players, laser.source)?.add_score(VERSUS_KILL_SCORE);

        log::debug!("{:?} ship shot down, {} lives left", target, lives_left);
        field.events.push(GameEvent::ShipLost {
            ship: target,
            lives_left,
        });
        Ok(true)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Laser> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::asteroid::{AsteroidKind, Palette, Shape, Tier};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct World {
        asteroids: Asteroids,
        ships: Ships,
        players: Vec<Player>,
        effects: Effects,
        events: Events,
        rng: Pcg32,
    }

    impl World {
        fn new() -> Self {
            let mut ships = Ships::new();
            ships.add(ShipType::Human);
            ships.add(ShipType::Cpu);
            Self {
                asteroids: Asteroids::new(),
                ships,
                players: vec![
                    Player::new(ShipType::Human, 3),
                    Player::new(ShipType::Cpu, 3),
                ],
                effects: Effects::new(),
                events: Events::new(false),
                rng: Pcg32::seed_from_u64(21),
            }
        }

        fn update(&mut self, lasers: &mut Lasers, mode: GameMode, now_ms: u64) {
            let mut field = Battlefield {
                mode,
                asteroids: &mut self.asteroids,
                ships: &mut self.ships,
                players: &mut self.players,
                effects: &mut self.effects,
                events: &mut self.events,
                rng: &mut self.rng,
            };
            let ctx = UpdateContext { now_ms, dt_ms: 33 };
            lasers.update(&ctx, &mut field).unwrap();
        }
    }

    #[test]
    fn test_laser_leaves_ship_center_along_heading() {
        let mut ship = Ship::new(1, ShipType::Human);
        ship.entity.set_rotation(90.0);
        let laser = Laser::new(1, &ship, 0);
        assert!((laser.entity.center() - ship.entity.center()).length() < 1e-3);
        assert!(laser.entity.vel.x.abs() < 1e-3);
        assert!((laser.entity.vel.y - LASER_VELOCITY).abs() < 1e-3);
        assert_eq!(laser.color, LaserColor::Blue);
        assert_eq!(laser.entity.rotation(), 90.0);
    }

    #[test]
    fn test_limit_per_source() {
        let human = Ship::new(1, ShipType::Human);
        let cpu = Ship::new(2, ShipType::Cpu);
        let mut lasers = Lasers::new();

        assert!(lasers.fire(&human, 0).is_some());
        assert!(lasers.fire(&human, 10).is_none());
        assert_eq!(lasers.alive_from(ShipType::Human), 1);

        // The other ship has its own allowance
        assert!(lasers.fire(&cpu, 10).is_some());
        assert_eq!(lasers.len(), 2);
    }

    #[test]
    fn test_dead_ship_cannot_fire() {
        let mut ship = Ship::new(1, ShipType::Human);
        ship.entity.set_dead(true);
        let mut lasers = Lasers::new();
        assert!(lasers.fire(&ship, 0).is_none());
        assert!(lasers.is_empty());
    }

    #[test]
    fn test_expired_laser_frees_the_slot() {
        let mut world = World::new();
        let human = world.ships.require(ShipType::Human).unwrap().clone();
        let mut lasers = Lasers::new();
        lasers.fire(&human, 0);

        world.update(&mut lasers, GameMode::Classic, LASER_DURATION_MS - 1);
        assert_eq!(lasers.len(), 1);
        world.update(&mut lasers, GameMode::Classic, LASER_DURATION_MS);
        assert!(lasers.is_empty());
        assert!(lasers.fire(&human, LASER_DURATION_MS).is_some());
    }

    #[test]
    fn test_big_asteroid_hit_splits_and_scores() {
        let mut world = World::new();
        let human = world.ships.require(ShipType::Human).unwrap().clone();
        let kind = AsteroidKind::new(Palette::Grey, Shape::Big1);
        let rng = &mut world.rng;
        world.asteroids.add(kind, Vec2::ZERO, rng);
        {
            let rock = &mut world.asteroids.as_mut_slice()[0];
            rock.entity.vel = Vec2::ZERO;
            rock.entity.center_on(human.entity.center() + Vec2::new(80.0, 0.0));
        }

        let mut lasers = Lasers::new();
        lasers.fire(&human, 0);
        world.update(&mut lasers, GameMode::Classic, 33);

        assert!(lasers.is_empty());
        world.asteroids.prune();
        assert_eq!(world.asteroids.len(), 2);
        assert!(world.asteroids.iter().all(|a| a.tier() == Tier::Medium));
        assert!(
            world
                .asteroids
                .iter()
                .all(|a| a.kind.palette == Palette::Grey)
        );
        assert_eq!(world.players[0].score(), Tier::Big.score());
        assert_eq!(world.players[1].score(), 0);
        assert_eq!(world.effects.len(), 1);
    }

    #[test]
    fn test_versus_hit_clears_every_laser() {
        let mut world = World::new();
        {
            let cpu = world.ships.require_mut(ShipType::Cpu).unwrap();
            cpu.entity.set_position(Vec2::new(500.0, 187.0));
        }
        let human = world.ships.require(ShipType::Human).unwrap().clone();
        let cpu = world.ships.require(ShipType::Cpu).unwrap().clone();

        let mut lasers = Lasers::new();
        // Human faces east toward the cpu; cpu faces east away from the human
        lasers.fire(&human, 0);
        lasers.fire(&cpu, 0);

        let mut hit = false;
        for tick in 1..10 {
            world.update(&mut lasers, GameMode::Versus, tick * 33);
            if world.ships.require(ShipType::Cpu).unwrap().is_dead() {
                hit = true;
                break;
            }
        }

        assert!(hit);
        assert!(lasers.is_empty());
        assert_eq!(world.players[1].lives(), 2);
        assert_eq!(world.players[0].score(), VERSUS_KILL_SCORE);
        assert!(world.events.pending().contains(&GameEvent::ShipLost {
            ship: ShipType::Cpu,
            lives_left: 2
        }));
    }

    proptest! {
        #[test]
        fn laser_dies_exactly_at_duration(created in 0u64..100_000, age in 0u64..2_000) {
            let ship = Ship::new(1, ShipType::Cpu);
            let mut laser = Laser::new(1, &ship, created);
            laser.update(&UpdateContext { now_ms: created + age, dt_ms: 33 });
            prop_assert_eq!(laser.is_dead(), age >= LASER_DURATION_MS);
        }
    }
}
