//! Game state and session lifecycle
//!
//! Everything one play session needs lives here: the entity collections,
//! players, the round overlay, the event queue and the seeded RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::asteroid::Asteroids;
use super::effect::Effects;
use super::event::{Events, GameEvent, GameOutcome};
use super::laser::Lasers;
use super::overlay::Overlay;
use super::player::{self, Player};
use super::ship::{ShipType, Ships};
use super::tick::{TickInput, tick};
use crate::consts::TICK_MS;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Rounds are being played (including transitions between them)
    Playing,
    /// Session ended normally
    GameOver(GameOutcome),
    /// Session stopped after an internal error
    Aborted,
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Settings captured when the session started
    pub settings: Settings,
    pub phase: GamePhase,
    /// Simulated time since the session started (milliseconds)
    pub time_ms: u64,
    /// Ticks simulated so far
    pub ticks: u64,
    pub ships: Ships,
    pub asteroids: Asteroids,
    pub lasers: Lasers,
    pub effects: Effects,
    pub players: Vec<Player>,
    pub overlay: Overlay,
    pub events: Events,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Start a session: players and ships for the mode, first transition pending
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mode = settings.mode;
        let lives = settings.lives.lives();

        let mut ships = Ships::new();
        let mut players = Vec::with_capacity(2);
        ships.add(ShipType::Human);
        players.push(Player::new(ShipType::Human, lives));
        if mode.has_cpu() {
            ships.add(ShipType::Cpu);
            players.push(Player::new(ShipType::Cpu, lives));
        }

        log::info!(
            "New session: mode={} lives={} seed={}",
            mode.as_str(),
            lives,
            seed
        );

        Self {
            seed,
            settings: settings.clone(),
            phase: GamePhase::Playing,
            time_ms: 0,
            ticks: 0,
            ships,
            asteroids: Asteroids::new(),
            lasers: Lasers::new(),
            effects: Effects::new(),
            players,
            overlay: Overlay::new(mode),
            events: Events::new(settings.vibrate),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Tear the session down and start over with the same seed and settings
    pub fn reset(&mut self) {
        let settings = self.settings.clone();
        *self = Self::new(self.seed, &settings);
    }

    /// Run one fixed tick
    ///
    /// Errors end the session: they are logged and the phase becomes
    /// `Aborted`. Ticks after that do nothing.
    pub fn advance(&mut self, input: &TickInput) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if let Err(err) = tick(self, input, TICK_MS) {
            log::error!("Session aborted at tick {}: {}", self.ticks, err);
            self.phase = GamePhase::Aborted;
        }
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn player(&self, ship: ShipType) -> Option<&Player> {
        player::find(&self.players, ship).ok()
    }

    pub fn is_over(&self) -> bool {
        !matches!(self.phase, GamePhase::Playing)
    }
}
