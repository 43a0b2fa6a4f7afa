//! Shared entity state: position, motion, rotation and collision outline

use glam::Vec2;

use crate::consts::{ROTATION_MAX, ROTATION_MIN, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::rotate_offset;

/// Per-tick timing handed to every entity update
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateContext {
    /// Session clock after this tick (milliseconds)
    pub now_ms: u64,
    /// Length of this tick (milliseconds)
    pub dt_ms: u64,
}

/// Position, velocity and outline shared by ships, asteroids, lasers and effects
///
/// `pos` is the top-left corner of the entity's bounding box; the outline is
/// authored relative to the box center.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    /// Degrees added to the rotation every update
    pub rotation_speed: f32,
    rotation: f32,
    dead: bool,
    /// Local outline offsets from the center
    shape: &'static [Vec2],
    /// World-space outline for the current position and rotation
    outline: Vec<Vec2>,
}

impl Entity {
    pub fn new(id: u32, shape: &'static [Vec2], width: f32, height: f32) -> Self {
        let mut entity = Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            width,
            height,
            rotation_speed: 0.0,
            rotation: 0.0,
            dead: false,
            shape,
            outline: Vec::with_capacity(shape.len()),
        };
        entity.rebuild_outline();
        entity
    }

    /// Center of the bounding box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) * 0.5
    }

    /// Current rotation in degrees, always within [0, 360)
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Assign the rotation (degrees)
    ///
    /// Out-of-range values are corrected in a single step rather than by
    /// modulo: anything below 0 becomes 359 and anything at or above 360 becomes 1.
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = if rotation < ROTATION_MIN {
            ROTATION_MAX - 1.0
        } else if rotation >= ROTATION_MAX {
            ROTATION_MIN + 1.0
        } else {
            rotation
        };
        self.rebuild_outline();
    }

    /// Apply one step of the rotation speed
    pub fn spin(&mut self) {
        self.set_rotation(self.rotation + self.rotation_speed);
    }

    /// Move the top-left corner
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.rebuild_outline();
    }

    /// Place the entity so its center sits on `center`
    pub fn center_on(&mut self, center: Vec2) {
        self.set_position(center - Vec2::new(self.width, self.height) * 0.5);
    }

    /// Advance by the velocity, wrapping to the opposite edge once fully off screen
    pub fn update_location(&mut self) {
        self.pos += self.vel;

        if self.pos.x < -self.width {
            self.pos.x = SCREEN_WIDTH;
        }
        if self.pos.x > SCREEN_WIDTH {
            self.pos.x = -self.width;
        }
        if self.pos.y < -self.height {
            self.pos.y = SCREEN_HEIGHT;
        }
        if self.pos.y > SCREEN_HEIGHT {
            self.pos.y = -self.height;
        }

        self.rebuild_outline();
    }

    /// Zero the velocity and rotation speed
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
        self.rotation_speed = 0.0;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn set_dead(&mut self, dead: bool) {
        self.dead = dead;
    }

    /// World-space collision outline
    #[inline]
    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }

    /// Distance between the centers of two entities
    pub fn distance_to(&self, other: &Entity) -> f32 {
        self.center().distance(other.center())
    }

    /// Recompute the world outline from the local shape, rotation and center
    fn rebuild_outline(&mut self) {
        let radians = self.rotation.to_radians();
        let center = self.center();
        self.outline.clear();
        self.outline
            .extend(self.shape.iter().map(|p| center + rotate_offset(*p, radians)));
    }
}

/// Common capability of everything the simulation advances each tick
pub trait Simulatable {
    fn entity(&self) -> &Entity;

    /// Advance one tick
    fn update(&mut self, ctx: &UpdateContext);

    fn is_dead(&self) -> bool {
        self.entity().is_dead()
    }

    fn outline(&self) -> &[Vec2] {
        self.entity().outline()
    }
}
