//! Player bookkeeping: score and lives for each seat

use super::ship::ShipType;
use crate::error::SimError;

/// Digits the score is padded to on the HUD
const SCORE_DIGITS: usize = 8;
/// Digits the lives counter is padded to on the HUD
const LIVES_DIGITS: usize = 2;

/// One seat in the session, human or cpu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub ship: ShipType,
    score: u32,
    lives: u32,
}

impl Player {
    pub fn new(ship: ShipType, lives: u32) -> Self {
        let name = match ship {
            ShipType::Human => "Human",
            ShipType::Cpu => "Cpu",
        };
        Self {
            name: name.to_string(),
            ship,
            score: 0,
            lives,
        }
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    #[inline]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Take one life; never drops below zero
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Out of lives
    pub fn is_eliminated(&self) -> bool {
        self.lives == 0
    }

    /// HUD line, e.g. `Score: 00001250      03 x`
    pub fn description(&self) -> String {
        format!(
            "Score: {:0sw$}      {:0lw$} x",
            self.score,
            self.lives,
            sw = SCORE_DIGITS,
            lw = LIVES_DIGITS
        )
    }
}

/// The player seated in `ship`
pub fn find(players: &[Player], ship: ShipType) -> Result<&Player, SimError> {
    players
        .iter()
        .find(|p| p.ship == ship)
        .ok_or(SimError::MissingPlayer(ship))
}

/// Mutable access to the player seated in `ship`
pub fn find_mut(players: &mut [Player], ship: ShipType) -> Result<&mut Player, SimError> {
    players
        .iter_mut()
        .find(|p| p.ship == ship)
        .ok_or(SimError::MissingPlayer(ship))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lives_clamp_at_zero() {
        let mut p = Player::new(ShipType::Human, 1);
        p.lose_life();
        assert_eq!(p.lives(), 0);
        assert!(p.is_eliminated());
        p.lose_life();
        assert_eq!(p.lives(), 0);
    }

    #[test]
    fn test_description_padding() {
        let mut p = Player::new(ShipType::Cpu, 3);
        p.add_score(1250);
        assert_eq!(p.description(), "Score: 00001250      03 x");
        assert_eq!(p.name, "Cpu");
    }

    #[test]
    fn test_find_missing_player() {
        let players = vec![Player::new(ShipType::Human, 3)];
        assert!(find(&players, ShipType::Human).is_ok());
        assert_eq!(
            find(&players, ShipType::Cpu).unwrap_err(),
            SimError::MissingPlayer(ShipType::Cpu)
        );
    }
}
