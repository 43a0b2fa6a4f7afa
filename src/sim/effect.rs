//! Explosion effects
//!
//! Purely visual: effects never collide and never affect gameplay, they only
//! play through their animation and disappear.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Simulatable, UpdateContext};

/// Time each animation frame is shown (milliseconds)
pub const FRAME_MS: u64 = 100;

/// The three explosion animations on the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExplosionVariant {
    Large,
    Medium,
    Small,
}

impl ExplosionVariant {
    pub const ALL: [ExplosionVariant; 3] = [
        ExplosionVariant::Large,
        ExplosionVariant::Medium,
        ExplosionVariant::Small,
    ];

    pub fn frames(&self) -> u32 {
        match self {
            ExplosionVariant::Large => 13,
            ExplosionVariant::Medium => 9,
            ExplosionVariant::Small => 12,
        }
    }

    /// Total animation length in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.frames() as u64 * FRAME_MS
    }
}

/// A one-shot explosion animation
#[derive(Debug, Clone)]
pub struct Explosion {
    pub entity: Entity,
    pub variant: ExplosionVariant,
    elapsed_ms: u64,
}

impl Explosion {
    /// Explosion sitting on `source`, sized to its shorter side
    pub fn new(id: u32, source: &Entity, variant: ExplosionVariant) -> Self {
        let side = source.width.min(source.height);
        let mut entity = Entity::new(id, &[], side, side);
        entity.set_position(source.pos);
        Self {
            entity,
            variant,
            elapsed_ms: 0,
        }
    }

    /// Animation frame currently shown
    pub fn frame(&self) -> u32 {
        ((self.elapsed_ms / FRAME_MS) as u32).min(self.variant.frames() - 1)
    }

    pub fn finished(&self) -> bool {
        self.elapsed_ms >= self.variant.duration_ms()
    }
}

impl Simulatable for Explosion {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn update(&mut self, ctx: &UpdateContext) {
        // Last frame stays up for one tick before the effect goes away
        if self.finished() {
            self.entity.set_dead(true);
        }
        self.elapsed_ms += ctx.dt_ms;
    }
}

/// Every explosion currently playing
#[derive(Debug, Clone)]
pub struct Effects {
    list: Vec<Explosion>,
    next_id: u32,
}

impl Default for Effects {
    fn default() -> Self {
        Self::new()
    }
}

impl Effects {
    pub fn new() -> Self {
        Self {
            list: Vec::new(),
            next_id: 1,
        }
    }

    /// Start an explosion with a random animation on `source`
    pub fn explode(&mut self, source: &Entity, rng: &mut impl Rng) {
        let variant = ExplosionVariant::ALL[rng.random_range(0..ExplosionVariant::ALL.len())];
        let id = self.next_id;
        self.next_id += 1;
        self.list.push(Explosion::new(id, source, variant));
    }

    pub fn update(&mut self, ctx: &UpdateContext) {
        for explosion in &mut self.list {
            explosion.update(ctx);
        }
        self.list.retain(|e| !e.is_dead());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Explosion> {
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
