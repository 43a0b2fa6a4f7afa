//! Asteroids: kind taxonomy, spinning rocks and the collection that owns them
//!
//! Every kind pairs a palette with a hand-authored shape. Shapes come in four
//! size tiers; destroying a rock spawns two rocks of the next smaller tier in
//! the same palette until the tiny tier is reached.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Simulatable, UpdateContext};
use crate::error::SimError;

/// Maximum absolute velocity component of a freshly spawned asteroid
pub const VELOCITY_MAX: f32 = 5.0;

/// Maximum absolute spin (degrees per tick)
pub const ROTATE_SPEED_MAX: f32 = 9.0;

/// Number of rocks a destroyed asteroid splits into
pub const CHILDREN_PER_SPLIT: usize = 2;

/// Size tier, largest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Big,
    Medium,
    Small,
    Tiny,
}

impl Tier {
    /// The tier a destroyed rock of this tier splits into
    pub fn next_smaller(&self) -> Option<Tier> {
        match self {
            Tier::Big => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Small),
            Tier::Small => Some(Tier::Tiny),
            Tier::Tiny => None,
        }
    }

    /// Points for destroying a rock of this tier
    pub fn score(&self) -> u32 {
        match self {
            Tier::Big => 20,
            Tier::Medium => 50,
            Tier::Small => 100,
            Tier::Tiny => 200,
        }
    }

    /// Shapes available in this tier
    pub fn shapes(&self) -> &'static [Shape] {
        match self {
            Tier::Big => &[Shape::Big1, Shape::Big2, Shape::Big3, Shape::Big4],
            Tier::Medium => &[Shape::Med1, Shape::Med2],
            Tier::Small => &[Shape::Small1, Shape::Small2],
            Tier::Tiny => &[Shape::Tiny1, Shape::Tiny2],
        }
    }
}

/// Sprite palette; children keep their parent's palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Palette {
    Brown,
    Grey,
}

impl Palette {
    pub const ALL: [Palette; 2] = [Palette::Brown, Palette::Grey];
}

/// Hand-authored rock silhouette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Big1,
    Big2,
    Big3,
    Big4,
    Med1,
    Med2,
    Small1,
    Small2,
    Tiny1,
    Tiny2,
}

impl Shape {
    pub fn tier(&self) -> Tier {
        match self {
            Shape::Big1 | Shape::Big2 | Shape::Big3 | Shape::Big4 => Tier::Big,
            Shape::Med1 | Shape::Med2 => Tier::Medium,
            Shape::Small1 | Shape::Small2 => Tier::Small,
            Shape::Tiny1 | Shape::Tiny2 => Tier::Tiny,
        }
    }

    /// Sprite dimensions (width, height)
    pub fn size(&self) -> (f32, f32) {
        match self {
            Shape::Big1 => (101.0, 84.0),
            Shape::Big2 => (120.0, 98.0),
            Shape::Big3 => (89.0, 82.0),
            Shape::Big4 => (98.0, 96.0),
            Shape::Med1 => (43.0, 43.0),
            Shape::Med2 => (45.0, 40.0),
            Shape::Small1 => (28.0, 28.0),
            Shape::Small2 => (29.0, 26.0),
            Shape::Tiny1 => (18.0, 18.0),
            Shape::Tiny2 => (16.0, 15.0),
        }
    }

    /// Collision outline, offsets from the sprite center
    pub fn outline(&self) -> &'static [Vec2] {
        match self {
            Shape::Big1 => OUTLINE_BIG1,
            Shape::Big2 => OUTLINE_BIG2,
            Shape::Big3 => OUTLINE_BIG3,
            Shape::Big4 => OUTLINE_BIG4,
            Shape::Med1 => OUTLINE_MED1,
            Shape::Med2 => OUTLINE_MED2,
            Shape::Small1 => OUTLINE_SMALL1,
            Shape::Small2 => OUTLINE_SMALL2,
            Shape::Tiny1 => OUTLINE_TINY1,
            Shape::Tiny2 => OUTLINE_TINY2,
        }
    }
}

const OUTLINE_BIG1: &[Vec2] = &[
    Vec2::new(-42.0, -20.0),
    Vec2::new(-9.0, -50.0),
    Vec2::new(42.0, -33.0),
    Vec2::new(42.0, 25.0),
    Vec2::new(2.0, 51.0),
    Vec2::new(-32.0, 36.0),
    Vec2::new(-28.0, 11.0),
];
const OUTLINE_BIG2: &[Vec2] = &[
    Vec2::new(-49.0, -26.0),
    Vec2::new(-27.0, -53.0),
    Vec2::new(4.0, -60.0),
    Vec2::new(41.0, -40.0),
    Vec2::new(49.0, 8.0),
    Vec2::new(30.0, 60.0),
    Vec2::new(-18.0, 46.0),
    Vec2::new(-32.0, -9.0),
];
const OUTLINE_BIG3: &[Vec2] = &[
    Vec2::new(-34.0, -28.0),
    Vec2::new(-15.0, -41.0),
    Vec2::new(19.0, -44.0),
    Vec2::new(41.0, -9.0),
    Vec2::new(30.0, 30.0),
    Vec2::new(0.0, 45.0),
    Vec2::new(-41.0, 22.0),
];
const OUTLINE_BIG4: &[Vec2] = &[
    Vec2::new(-48.0, -19.0),
    Vec2::new(-40.0, -49.0),
    Vec2::new(34.0, -35.0),
    Vec2::new(48.0, 17.0),
    Vec2::new(12.0, 49.0),
    Vec2::new(-42.0, 31.0),
];
const OUTLINE_MED1: &[Vec2] = &[
    Vec2::new(-21.0, 1.0),
    Vec2::new(-14.0, -14.0),
    Vec2::new(5.0, -21.0),
    Vec2::new(21.0, -9.0),
    Vec2::new(20.0, 18.0),
    Vec2::new(-6.0, 22.0),
];
const OUTLINE_MED2: &[Vec2] = &[
    Vec2::new(-17.0, -8.0),
    Vec2::new(-4.0, -22.0),
    Vec2::new(15.0, -15.0),
    Vec2::new(19.0, 11.0),
    Vec2::new(3.0, 23.0),
    Vec2::new(-20.0, 8.0),
];
const OUTLINE_SMALL1: &[Vec2] = &[
    Vec2::new(-9.0, -9.0),
    Vec2::new(3.0, -14.0),
    Vec2::new(12.0, -7.0),
    Vec2::new(13.0, 10.0),
    Vec2::new(-4.0, 14.0),
    Vec2::new(-14.0, 0.0),
];
const OUTLINE_SMALL2: &[Vec2] = &[
    Vec2::new(-11.0, -5.0),
    Vec2::new(-2.0, -14.0),
    Vec2::new(10.0, -9.0),
    Vec2::new(12.0, 7.0),
    Vec2::new(2.0, 15.0),
    Vec2::new(-11.0, 6.0),
];
const OUTLINE_TINY1: &[Vec2] = &[
    Vec2::new(-7.0, -3.0),
    Vec2::new(1.0, -9.0),
    Vec2::new(9.0, -1.0),
    Vec2::new(5.0, 9.0),
    Vec2::new(-7.0, 6.0),
];
const OUTLINE_TINY2: &[Vec2] = &[
    Vec2::new(-7.0, 8.0),
    Vec2::new(1.0, -8.0),
    Vec2::new(8.0, 0.0),
    Vec2::new(3.0, 8.0),
];

/// Palette plus shape; also the sprite key for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AsteroidKind {
    pub palette: Palette,
    pub shape: Shape,
}

impl AsteroidKind {
    pub fn new(palette: Palette, shape: Shape) -> Self {
        Self { palette, shape }
    }

    #[inline]
    pub fn tier(&self) -> Tier {
        self.shape.tier()
    }

    /// Pick one of the eight big kinds uniformly
    pub fn random_big(rng: &mut impl Rng) -> Result<Self, SimError> {
        let shapes = Tier::Big.shapes();
        let index = rng.random_range(0..shapes.len() * Palette::ALL.len());
        let palette = Palette::ALL[index / shapes.len()];
        let shape = shapes
            .get(index % shapes.len())
            .copied()
            .ok_or(SimError::UnknownAsteroidKind {
                table: "big",
                index,
            })?;
        Ok(Self { palette, shape })
    }

    /// Kind of one child when this rock is destroyed (None for the tiny tier)
    pub fn random_child(&self, rng: &mut impl Rng) -> Result<Option<Self>, SimError> {
        let Some(tier) = self.tier().next_smaller() else {
            return Ok(None);
        };
        let shapes = tier.shapes();
        let index = rng.random_range(0..shapes.len());
        let shape = shapes
            .get(index)
            .copied()
            .ok_or(SimError::UnknownAsteroidKind {
                table: "children",
                index,
            })?;
        Ok(Some(Self {
            palette: self.palette,
            shape,
        }))
    }
}

/// A spinning, drifting rock
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub entity: Entity,
    pub kind: AsteroidKind,
}

impl Asteroid {
    /// Create a rock at `pos` (top-left) with random drift and spin
    pub fn new(id: u32, kind: AsteroidKind, pos: Vec2, rng: &mut impl Rng) -> Self {
        let (width, height) = kind.shape.size();
        let mut entity = Entity::new(id, kind.shape.outline(), width, height);
        entity.set_position(pos);
        entity.vel = Vec2::new(
            rng.random_range(-VELOCITY_MAX..=VELOCITY_MAX),
            rng.random_range(-VELOCITY_MAX..=VELOCITY_MAX),
        );
        entity.rotation_speed = rng.random_range(-ROTATE_SPEED_MAX..=ROTATE_SPEED_MAX);
        Self { entity, kind }
    }

    #[inline]
    pub fn tier(&self) -> Tier {
        self.kind.tier()
    }
}

impl Simulatable for Asteroid {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn update(&mut self, _ctx: &UpdateContext) {
        // Always spinning
        self.entity.spin();
        self.entity.update_location();
    }
}

/// Owns every asteroid in play
#[derive(Debug, Clone)]
pub struct Asteroids {
    list: Vec<Asteroid>,
    next_id: u32,
}

impl Default for Asteroids {
    fn default() -> Self {
        Self::new()
    }
}

impl Asteroids {
    pub fn new() -> Self {
        Self {
            list: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a rock of `kind` with its top-left corner at `pos`; returns its id
    pub fn add(&mut self, kind: AsteroidKind, pos: Vec2, rng: &mut impl Rng) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.list.push(Asteroid::new(id, kind, pos, rng));
        id
    }

    /// Spawn `count` random big rocks in the top-left corner
    pub fn spawn_wave(&mut self, count: u32, rng: &mut impl Rng) -> Result<(), SimError> {
        for _ in 0..count {
            let kind = AsteroidKind::random_big(rng)?;
            self.add(kind, Vec2::ZERO, rng);
        }
        log::debug!("Spawned {} big asteroids", count);
        Ok(())
    }

    /// Spawn the children of a destroyed rock, centered where the parent was
    ///
    /// Returns the number of children created (0 for the tiny tier).
    pub fn spawn_children(
        &mut self,
        parent: AsteroidKind,
        parent_center: Vec2,
        rng: &mut impl Rng,
    ) -> Result<usize, SimError> {
        let mut spawned = 0;
        for _ in 0..CHILDREN_PER_SPLIT {
            let Some(child) = parent.random_child(rng)? else {
                break;
            };
            let (w, h) = child.shape.size();
            self.add(child, parent_center - Vec2::new(w, h) * 0.5, rng);
            spawned += 1;
        }
        Ok(spawned)
    }

    /// Remove destroyed rocks, then advance the rest
    pub fn update(&mut self, ctx: &UpdateContext) {
        self.prune();
        for asteroid in &mut self.list {
            asteroid.update(ctx);
        }
    }

    /// Drop every rock flagged dead
    pub fn prune(&mut self) {
        self.list.retain(|a| !a.is_dead());
    }

    /// Move every rock's top-left corner to `pos`
    pub fn move_all_to(&mut self, pos: Vec2) {
        for asteroid in &mut self.list {
            asteroid.entity.set_position(pos);
        }
    }

    pub fn get(&self, id: u32) -> Option<&Asteroid> {
        self.list.iter().find(|a| a.entity.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asteroid> {
        self.list.iter()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Asteroid] {
        &mut self.list
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
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    const ALL_SHAPES: [Shape; 10] = [
        Shape::Big1,
        Shape::Big2,
        Shape::Big3,
        Shape::Big4,
        Shape::Med1,
        Shape::Med2,
        Shape::Small1,
        Shape::Small2,
        Shape::Tiny1,
        Shape::Tiny2,
    ];

    #[test]
    fn test_tier_chain() {
        assert_eq!(Tier::Big.next_smaller(), Some(Tier::Medium));
        assert_eq!(Tier::Medium.next_smaller(), Some(Tier::Small));
        assert_eq!(Tier::Small.next_smaller(), Some(Tier::Tiny));
        assert_eq!(Tier::Tiny.next_smaller(), None);
    }

    #[test]
    fn test_shapes_listed_under_their_tier() {
        for shape in ALL_SHAPES {
            assert!(shape.tier().shapes().contains(&shape));
            assert!(shape.outline().len() >= 4);
        }
    }

    #[test]
    fn test_new_asteroid_randomized_within_bounds() {
        let mut rng = rng();
        for i in 0..200 {
            let kind = AsteroidKind::random_big(&mut rng).unwrap();
            assert_eq!(kind.tier(), Tier::Big);
            let a = Asteroid::new(i, kind, Vec2::ZERO, &mut rng);
            assert!(a.entity.vel.x.abs() <= VELOCITY_MAX);
            assert!(a.entity.vel.y.abs() <= VELOCITY_MAX);
            assert!(a.entity.rotation_speed.abs() <= ROTATE_SPEED_MAX);
        }
    }

    #[test]
    fn test_split_produces_two_children_of_next_tier() {
        let mut rng = rng();
        for palette in Palette::ALL {
            for shape in ALL_SHAPES {
                let parent = AsteroidKind::new(palette, shape);
                let mut asteroids = Asteroids::new();
                let spawned = asteroids
                    .spawn_children(parent, Vec2::new(300.0, 200.0), &mut rng)
                    .unwrap();

                match parent.tier().next_smaller() {
                    Some(child_tier) => {
                        assert_eq!(spawned, 2);
                        assert_eq!(asteroids.len(), 2);
                        for child in asteroids.iter() {
                            assert_eq!(child.tier(), child_tier);
                            assert_eq!(child.kind.palette, palette);
                            assert!(
                                (child.entity.center() - Vec2::new(300.0, 200.0)).length()
                                    < 1e-3
                            );
                        }
                    }
                    None => {
                        assert_eq!(spawned, 0);
                        assert!(asteroids.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn test_spawn_wave_places_big_rocks_in_corner() {
        let mut rng = rng();
        let mut asteroids = Asteroids::new();
        asteroids.spawn_wave(3, &mut rng).unwrap();
        assert_eq!(asteroids.len(), 3);
        for a in asteroids.iter() {
            assert_eq!(a.tier(), Tier::Big);
            assert_eq!(a.entity.pos, Vec2::ZERO);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = rng();
        let mut asteroids = Asteroids::new();
        asteroids.spawn_wave(5, &mut rng).unwrap();
        let mut ids: Vec<u32> = asteroids.iter().map(|a| a.entity.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_update_prunes_dead_and_spins_live() {
        let mut rng = rng();
        let mut asteroids = Asteroids::new();
        let keep = asteroids.add(
            AsteroidKind::new(Palette::Grey, Shape::Med1),
            Vec2::new(100.0, 100.0),
            &mut rng,
        );
        asteroids.add(
            AsteroidKind::new(Palette::Grey, Shape::Med2),
            Vec2::new(300.0, 100.0),
            &mut rng,
        );
        asteroids.as_mut_slice()[1].entity.set_dead(true);

        let before = asteroids.get(keep).unwrap().entity.pos;
        asteroids.update(&UpdateContext::default());

        assert_eq!(asteroids.len(), 1);
        let after = asteroids.get(keep).unwrap();
        assert_eq!(after.entity.pos, before + after.entity.vel);
    }
}
