//! Fire-and-forget notifications for audio, haptics and the screen layer
//!
//! The simulation pushes events while it runs; the host drains them after
//! each tick. Nothing the simulation does depends on whether they are consumed.

use serde::{Deserialize, Serialize};

use super::ship::ShipType;
use crate::consts::VIBRATION_MS;

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Classic/coop: every seat ran out of lives
    Over,
    /// Versus: the cpu ran out of lives
    Win,
    /// Versus: the human ran out of lives
    Lose,
}

impl GameOutcome {
    /// Headline for the game over screen
    pub fn headline(&self) -> &'static str {
        match self {
            GameOutcome::Over => "Game Over",
            GameOutcome::Win => "You win",
            GameOutcome::Lose => "You lose",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LaserFired { source: ShipType },
    Explosion,
    ThrustStarted,
    ThrustStopped,
    /// Every asteroid destroyed; `wave` is the wave about to start
    WaveCleared { wave: u32 },
    ShipLost { ship: ShipType, lives_left: u32 },
    GameOver { outcome: GameOutcome, score: u32 },
    Vibrate { duration_ms: u64 },
}

/// Event queue for one session
#[derive(Debug, Clone, Default)]
pub struct Events {
    queue: Vec<GameEvent>,
    vibrate: bool,
}

impl Events {
    /// `vibrate` gates haptic pulses for the whole session
    pub fn new(vibrate: bool) -> Self {
        Self {
            queue: Vec::new(),
            vibrate,
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    /// Request a haptic pulse if the session allows it
    pub fn vibrate(&mut self) {
        if self.vibrate {
            self.queue.push(GameEvent::Vibrate {
                duration_ms: VIBRATION_MS,
            });
        }
    }

    /// Take every pending event
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.queue
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
