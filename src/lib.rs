//! Rock Raiders - an Asteroids-style arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves)
//! - `audio`: Maps simulation events to sound cues
//! - `platform`: Haptics and other fire-and-forget collaborators
//! - `settings`: Session parameters chosen before a game starts

pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{GameMode, LivesOption, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Fixed simulation timestep in milliseconds (~30 Hz)
    pub const TICK_MS: u64 = 33;

    /// Collision regions are clipped to the screen grown by this fraction on every side
    pub const CLIP_MARGIN: f32 = 0.25;

    /// Time the overlay message is shown between rounds
    pub const TRANSITION_DELAY_MS: u64 = 1500;

    /// Length of the vibration pulse on wave clear / ship loss
    pub const VIBRATION_MS: u64 = 500;

    /// Rotation range (degrees)
    pub const ROTATION_MIN: f32 = 0.0;
    pub const ROTATION_MAX: f32 = 360.0;

    /// Added to an entity's rotation when drawing its sprite (sprites face up)
    pub const RENDER_ROTATION_OFFSET: f32 = 90.0;

    /// Score awarded for destroying the opposing ship in versus mode
    pub const VERSUS_KILL_SCORE: u32 = 1000;
}

/// Unit vector for a heading given in degrees
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Rotate a local offset by `radians` around the origin
#[inline]
pub fn rotate_offset(offset: Vec2, radians: f32) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(
        offset.x * cos - offset.y * sin,
        offset.x * sin + offset.y * cos,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_axes() {
        let east = heading(0.0);
        assert!((east.x - 1.0).abs() < 1e-6 && east.y.abs() < 1e-6);

        let south = heading(90.0);
        assert!(south.x.abs() < 1e-6 && (south.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_offset_quarter_turn() {
        let p = rotate_offset(Vec2::new(10.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - 10.0).abs() < 1e-4);
    }
}
