//! Round sequencing
//!
//! Between rounds the overlay shows a message for `TRANSITION_DELAY_MS` while
//! the field is frozen. Once the delay has passed the round starts, and from
//! then on the overlay watches for a cleared field or lost ships to decide
//! what comes next: another wave, a respawn, or the end of the game.

use glam::Vec2;

use super::event::{GameEvent, GameOutcome};
use super::player;
use super::ship::ShipType;
use super::state::{GamePhase, GameState};
use crate::consts::TRANSITION_DELAY_MS;
use crate::error::SimError;
use crate::settings::GameMode;

/// Transition timer, wave counter and the message shown between rounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Current wave (starts at 1)
    pub wave: u32,
    elapsed_ms: u64,
    message: String,
}

impl Overlay {
    pub fn new(mode: GameMode) -> Self {
        let mut overlay = Self {
            wave: 1,
            elapsed_ms: 0,
            message: String::new(),
        };
        overlay.restart(mode);
        overlay
    }

    /// Transition finished, the round is live
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= TRANSITION_DELAY_MS
    }

    /// Message to draw over the frozen field, if transitioning
    pub fn message(&self) -> Option<&str> {
        (!self.is_complete()).then_some(self.message.as_str())
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Start a new transition with the message for `mode`
    pub fn restart(&mut self, mode: GameMode) {
        self.elapsed_ms = 0;
        self.message = match mode {
            GameMode::Classic | GameMode::Coop => format!("Wave: {}", self.wave),
            GameMode::Versus => "Get Ready".to_string(),
        };
    }

    /// Jump to the end of the transition without starting a round
    pub fn skip(&mut self) {
        self.elapsed_ms = TRANSITION_DELAY_MS;
    }

    fn advance(&mut self, dt_ms: u64) {
        if !self.is_complete() {
            self.elapsed_ms = (self.elapsed_ms + dt_ms).min(TRANSITION_DELAY_MS);
        }
    }
}

/// Advance the transition timer and react to the state of the field
pub fn update(state: &mut GameState, dt_ms: u64) -> Result<(), SimError> {
    let was_complete = state.overlay.is_complete();
    state.overlay.advance(dt_ms);

    if !was_complete && state.overlay.is_complete() {
        begin_round(state)
    } else if state.overlay.is_complete() {
        match state.settings.mode {
            GameMode::Classic | GameMode::Coop => watch_field(state),
            GameMode::Versus => watch_duel(state),
        }
    } else {
        Ok(())
    }
}

/// Transition just ended: lay out the field and bring the ships in
fn begin_round(state: &mut GameState) -> Result<(), SimError> {
    match state.settings.mode {
        GameMode::Classic | GameMode::Coop => {
            if state.asteroids.is_empty() {
                state
                    .asteroids
                    .spawn_wave(state.overlay.wave, &mut state.rng)?;
            }
            state.ships.place_middle();
        }
        GameMode::Versus => state.ships.place_opposite_corners(&mut state.rng)?,
    }

    revive_survivors(state);
    state.ships.stop_all();
    log::info!(
        "Round started ({}, wave {})",
        state.settings.mode.as_str(),
        state.overlay.wave
    );
    Ok(())
}

/// Classic/coop: next wave once the field is clear, respawn once every ship is down
fn watch_field(state: &mut GameState) -> Result<(), SimError> {
    if state.asteroids.is_empty() {
        state.events.vibrate();
        state.overlay.wave += 1;
        state.events.push(GameEvent::WaveCleared {
            wave: state.overlay.wave,
        });
        log::info!("Wave cleared, next wave {}", state.overlay.wave);

        state.ships.place_middle();
        state.overlay.restart(state.settings.mode);
        revive_survivors(state);
        state.ships.stop_all();
        return Ok(());
    }

    if state.ships.all_dead() {
        round_lost(state)?;
    }
    Ok(())
}

/// Versus: a round ends as soon as either ship is down
fn watch_duel(state: &mut GameState) -> Result<(), SimError> {
    let human_dead = state.ships.require(ShipType::Human)?.entity.is_dead();
    let cpu_dead = state.ships.require(ShipType::Cpu)?.entity.is_dead();
    if human_dead || cpu_dead {
        round_lost(state)?;
    }
    Ok(())
}

/// Ships went down: end the game or set up the respawn
fn round_lost(state: &mut GameState) -> Result<(), SimError> {
    state.lasers.clear();
    state.ships.stop_all();

    let outcome = game_over_check(state)?;
    state.overlay.restart(state.settings.mode);

    if let Some(outcome) = outcome {
        finish(state, outcome)?;
        return Ok(());
    }

    match state.settings.mode {
        GameMode::Classic | GameMode::Coop => {
            state.asteroids.move_all_to(Vec2::ZERO);
            state.ships.place_middle();
        }
        GameMode::Versus => state.ships.place_opposite_corners(&mut state.rng)?,
    }
    revive_survivors(state);
    log::info!("Round lost, respawning");
    Ok(())
}

/// Whether the session is over, and how
pub fn game_over_check(state: &GameState) -> Result<Option<GameOutcome>, SimError> {
    let human = player::find(&state.players, ShipType::Human)?;
    let outcome = match state.settings.mode {
        GameMode::Classic => human.is_eliminated().then_some(GameOutcome::Over),
        GameMode::Coop => {
            let cpu = player::find(&state.players, ShipType::Cpu)?;
            (human.is_eliminated() && cpu.is_eliminated()).then_some(GameOutcome::Over)
        }
        GameMode::Versus => {
            let cpu = player::find(&state.players, ShipType::Cpu)?;
            if human.is_eliminated() {
                Some(GameOutcome::Lose)
            } else if cpu.is_eliminated() {
                Some(GameOutcome::Win)
            } else {
                None
            }
        }
    };
    Ok(outcome)
}

fn finish(state: &mut GameState, outcome: GameOutcome) -> Result<(), SimError> {
    let score = player::find(&state.players, ShipType::Human)?.score();
    state.overlay.skip();
    state.effects.clear();
    state.lasers.clear();
    state.phase = GamePhase::GameOver(outcome);
    state.events.push(GameEvent::GameOver { outcome, score });
    log::info!("{} - score {}", outcome.headline(), score);
    Ok(())
}

/// Revive the ship of every player with lives left
fn revive_survivors(state: &mut GameState) {
    for player in state.players.iter().filter(|p| !p.is_eliminated()) {
        state.ships.revive(player.ship);
    }
    state.events.push(GameEvent::ThrustStopped);
}
