//! Render view
//!
//! Flattens the live entities into sprite descriptions a renderer can draw
//! without knowing anything about the simulation types.

use glam::Vec2;
use serde::Serialize;

use super::asteroid::AsteroidKind;
use super::effect::ExplosionVariant;
use super::entity::{Entity, Simulatable};
use super::laser::LaserColor;
use super::ship::ShipType;
use super::state::GameState;
use crate::consts::{RENDER_ROTATION_OFFSET, ROTATION_MAX};

/// Which image to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKey {
    Asteroid(AsteroidKind),
    Ship { ship: ShipType, thrust: bool },
    Laser(LaserColor),
    Explosion { variant: ExplosionVariant, frame: u32 },
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub key: SpriteKey,
    /// Top-left corner
    pub position: Vec2,
    pub size: Vec2,
    /// Degrees; sprites are authored facing up, so this is offset from the heading
    pub rotation: f32,
}

impl Sprite {
    fn new(key: SpriteKey, entity: &Entity) -> Self {
        Self {
            key,
            position: entity.pos,
            size: Vec2::new(entity.width, entity.height),
            rotation: (entity.rotation() + RENDER_ROTATION_OFFSET) % ROTATION_MAX,
        }
    }
}

/// Sprites for every live entity, back to front
pub fn sprites(state: &GameState) -> Vec<Sprite> {
    let asteroids = state
        .asteroids
        .iter()
        .filter(|a| !a.is_dead())
        .map(|a| Sprite::new(SpriteKey::Asteroid(a.kind), &a.entity));

    let lasers = state
        .lasers
        .iter()
        .filter(|l| !l.is_dead())
        .map(|l| Sprite::new(SpriteKey::Laser(l.color), &l.entity));

    let ships = state.ships.iter().filter(|s| !s.is_dead()).map(|s| {
        let key = SpriteKey::Ship {
            ship: s.kind,
            thrust: s.has_thrust(),
        };
        Sprite::new(key, &s.entity)
    });

    let effects = state.effects.iter().filter(|e| !e.is_dead()).map(|e| {
        let key = SpriteKey::Explosion {
            variant: e.variant,
            frame: e.frame(),
        };
        Sprite::new(key, &e.entity)
    });

    asteroids.chain(lasers).chain(ships).chain(effects).collect()
}

/// Text drawn over the frozen field between rounds
pub fn overlay_message(state: &GameState) -> Option<&str> {
    if state.is_over() {
        return None;
    }
    state.overlay.message()
}

/// One HUD line per player
pub fn hud(state: &GameState) -> Vec<String> {
    state
        .players
        .iter()
        .map(|p| format!("{} {}", p.name, p.description()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_MS;
    use crate::settings::{GameMode, Settings};
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_sprite_rotation_offset() {
        let state = GameState::new(1, &Settings::default());
        let sprites = sprites(&state);
        assert_eq!(sprites.len(), 1);
        assert_eq!(
            sprites[0].key,
            SpriteKey::Ship {
                ship: ShipType::Human,
                thrust: false
            }
        );
        assert_eq!(sprites[0].rotation, 90.0);
        assert_eq!(sprites[0].size, Vec2::new(99.0, 106.0));
    }

    #[test]
    fn test_dead_ship_not_drawn() {
        let mut state = GameState::new(1, &Settings::for_mode(GameMode::Coop));
        state
            .ships
            .require_mut(ShipType::Cpu)
            .unwrap()
            .entity
            .set_dead(true);
        let sprites = sprites(&state);
        assert_eq!(sprites.len(), 1);
    }

    #[test]
    fn test_overlay_message_while_transitioning() {
        let mut state = GameState::new(1, &Settings::for_mode(GameMode::Versus));
        assert_eq!(overlay_message(&state), Some("Get Ready"));
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), TICK_MS).unwrap();
        }
        assert_eq!(overlay_message(&state), None);
    }

    #[test]
    fn test_sprites_json() {
        let state = GameState::new(1, &Settings::default());
        let json = serde_json::to_value(sprites(&state)).unwrap();
        let ship = &json[0];
        assert_eq!(ship["key"]["Ship"]["ship"], "Human");
        assert_eq!(ship["key"]["Ship"]["thrust"], false);
        assert_eq!(ship["rotation"], 90.0);
        assert_eq!(ship["size"], serde_json::json!([99.0, 106.0]));
    }

    #[test]
    fn test_hud_lines() {
        let state = GameState::new(1, &Settings::for_mode(GameMode::Coop));
        let hud = hud(&state);
        assert_eq!(hud.len(), 2);
        assert_eq!(hud[0], "Human Score: 00000000      03 x");
    }
}
