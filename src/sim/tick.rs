//! Fixed timestep simulation tick
//!
//! One call advances the session by `dt_ms`. While the overlay is between
//! rounds the field is frozen and only the overlay timer runs.

use glam::Vec2;

use super::cpu::{Command, TargetRef};
use super::entity::{Simulatable, UpdateContext};
use super::event::GameEvent;
use super::laser::Battlefield;
use super::overlay;
use super::ship::ShipType;
use super::state::{GamePhase, GameState};
use crate::error::SimError;

/// Controls held (or pressed) for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    /// Fire once this tick
    pub fire: bool,
}

/// Discrete control change from an event-style producer (buttons, keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlIntent {
    RotateLeft,
    RotateRight,
    StopRotating,
    ThrustOn,
    ThrustOff,
    Fire,
}

impl TickInput {
    /// Fold an intent into the held controls
    pub fn apply(&mut self, intent: ControlIntent) {
        match intent {
            ControlIntent::RotateLeft => {
                self.rotate_left = true;
                self.rotate_right = false;
            }
            ControlIntent::RotateRight => {
                self.rotate_right = true;
                self.rotate_left = false;
            }
            ControlIntent::StopRotating => {
                self.rotate_left = false;
                self.rotate_right = false;
            }
            ControlIntent::ThrustOn => self.thrust = true,
            ControlIntent::ThrustOff => self.thrust = false,
            ControlIntent::Fire => self.fire = true,
        }
    }

    /// Controls carried into the next tick: holds stay, the shot is spent
    pub fn held(&self) -> TickInput {
        TickInput {
            fire: false,
            ..*self
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) -> Result<(), SimError> {
    if state.phase != GamePhase::Playing {
        return Ok(());
    }

    state.time_ms += dt_ms;
    state.ticks += 1;
    let ctx = UpdateContext {
        now_ms: state.time_ms,
        dt_ms,
    };

    if state.overlay.is_complete() {
        apply_input(state, input, ctx.now_ms);

        state.ships.update(
            &ctx,
            &mut state.asteroids,
            &mut state.players,
            &mut state.effects,
            &mut state.events,
            &mut state.rng,
        )?;
        cpu_turn(state, ctx.now_ms)?;

        state.asteroids.update(&ctx);

        let mut field = Battlefield {
            mode: state.settings.mode,
            asteroids: &mut state.asteroids,
            ships: &mut state.ships,
            players: &mut state.players,
            effects: &mut state.effects,
            events: &mut state.events,
            rng: &mut state.rng,
        };
        state.lasers.update(&ctx, &mut field)?;
        // Rocks broken this tick must not linger into the overlay check
        state.asteroids.prune();

        state.effects.update(&ctx);
    }

    overlay::update(state, dt_ms)
}

/// Steer the human ship from the held controls
fn apply_input(state: &mut GameState, input: &TickInput, now_ms: u64) {
    let Some(ship) = state.ships.get_mut(ShipType::Human) else {
        return;
    };
    if ship.is_dead() {
        return;
    }

    match (input.rotate_left, input.rotate_right) {
        (true, false) => ship.rotate_left(),
        (false, true) => ship.rotate_right(),
        _ => ship.rotate_reset(),
    }

    if ship.set_thrust(input.thrust) {
        state.events.push(if input.thrust {
            GameEvent::ThrustStarted
        } else {
            GameEvent::ThrustStopped
        });
    }

    if input.fire && state.lasers.fire(ship, now_ms).is_some() {
        state.events.push(GameEvent::LaserFired {
            source: ShipType::Human,
        });
    }
}

/// Let the cpu ship think and act
fn cpu_turn(state: &mut GameState, now_ms: u64) -> Result<(), SimError> {
    let targets: Vec<(TargetRef, Vec2)> = if state.settings.mode.is_versus() {
        state
            .ships
            .get(ShipType::Human)
            .filter(|s| !s.is_dead())
            .map(|s| (TargetRef::Ship(ShipType::Human), s.entity.center()))
            .into_iter()
            .collect()
    } else {
        state
            .asteroids
            .iter()
            .filter(|a| !a.is_dead())
            .map(|a| (TargetRef::Asteroid(a.entity.id), a.entity.center()))
            .collect()
    };

    let Some(cpu) = state.ships.get_mut(ShipType::Cpu) else {
        return Ok(());
    };
    if cpu.is_dead() {
        return Ok(());
    }
    let Some(mut brain) = cpu.brain else {
        return Ok(());
    };

    let command = brain.step(cpu, &targets)?;
    cpu.brain = Some(brain);

    if command == Some(Command::Fire) && state.lasers.fire(cpu, now_ms).is_some() {
        state.events.push(GameEvent::LaserFired {
            source: ShipType::Cpu,
        });
    }
    Ok(())
}
