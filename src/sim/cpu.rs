//! Cpu pilot
//!
//! The cpu ship picks the nearest target, decides whether to approach,
//! attack or avoid it based on distance, turns to the matching heading and
//! then carries the action out once. After that it forgets the target and
//! picks again on the next tick.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::ship::{ROTATION_SPEED, SHIP_HEIGHT, Ship, ShipType};
use crate::consts::ROTATION_MAX;
use crate::error::SimError;

/// Targets at least this far away are approached
pub const DISTANCE_APPROACH: f32 = SHIP_HEIGHT * 5.0;

/// Targets this close or closer are avoided
pub const DISTANCE_AVOID: f32 = SHIP_HEIGHT * 2.5;

/// Beyond this many degrees the other way around is shorter
const HALF_CIRCLE: f32 = 180.0;

/// What the cpu is aiming at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRef {
    Asteroid(u32),
    Ship(ShipType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Far away: fly toward it
    Approach,
    /// In range: shoot it
    Attack,
    /// Too close: fly away from it
    Avoid,
}

/// Something the ship cannot do on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CpuBrain {
    /// No target
    #[default]
    Idle,
    /// Target picked, action not decided yet
    Seeking {
        target: TargetRef,
        at: Vec2,
        distance: f32,
    },
    /// Turning toward `facing` (degrees)
    Rotating {
        target: TargetRef,
        action: Action,
        facing: f32,
    },
    /// Facing the target, carry out the action
    Executing { target: TargetRef, action: Action },
}

impl CpuBrain {
    /// Drop the current plan
    pub fn forget(&mut self) {
        *self = CpuBrain::Idle;
    }

    pub fn target(&self) -> Option<TargetRef> {
        match *self {
            CpuBrain::Idle => None,
            CpuBrain::Seeking { target, .. }
            | CpuBrain::Rotating { target, .. }
            | CpuBrain::Executing { target, .. } => Some(target),
        }
    }

    /// Run one tick of decisions for `ship`
    ///
    /// `targets` holds the candidate targets and their centers. Movement
    /// changes are applied to the ship directly; firing is returned as a
    /// command for the caller to carry out.
    pub fn step(
        &mut self,
        ship: &mut Ship,
        targets: &[(TargetRef, Vec2)],
    ) -> Result<Option<Command>, SimError> {
        let center = ship.entity.center();

        if let CpuBrain::Idle = *self {
            if let Some((target, at, distance)) = nearest(center, targets) {
                *self = CpuBrain::Seeking {
                    target,
                    at,
                    distance,
                };
            }
        }

        if let CpuBrain::Seeking {
            target,
            at,
            distance,
        } = *self
        {
            let action = classify(distance)?;
            *self = CpuBrain::Rotating {
                target,
                action,
                facing: facing_angle(center, at, action),
            };
        }

        if let CpuBrain::Rotating {
            target,
            action,
            facing,
        } = *self
        {
            ship.set_thrust(false);
            if ship.entity.rotation() != facing {
                turn_toward(ship, facing);
            } else {
                *self = CpuBrain::Executing { target, action };
            }
        }

        if let CpuBrain::Executing { action, .. } = *self {
            *self = CpuBrain::Idle;
            match action {
                Action::Approach | Action::Avoid => {
                    ship.set_thrust(true);
                }
                Action::Attack => return Ok(Some(Command::Fire)),
            }
        }

        Ok(None)
    }
}

/// Closest candidate to `from`, with its distance
fn nearest(from: Vec2, targets: &[(TargetRef, Vec2)]) -> Option<(TargetRef, Vec2, f32)> {
    targets
        .iter()
        .map(|&(target, at)| (target, at, from.distance(at)))
        .fold(None, |best, candidate| match best {
            Some((_, _, d)) if d <= candidate.2 => best,
            _ => Some(candidate),
        })
}

/// Pick the action for a target `distance` away
pub fn classify(distance: f32) -> Result<Action, SimError> {
    if distance >= DISTANCE_APPROACH {
        Ok(Action::Approach)
    } else if distance < DISTANCE_APPROACH && distance > DISTANCE_AVOID {
        Ok(Action::Attack)
    } else if distance <= DISTANCE_AVOID {
        Ok(Action::Avoid)
    } else {
        Err(SimError::UnclassifiedDistance { distance })
    }
}

/// Heading (degrees, [0, 360)) the ship needs for `action` against a target at `to`
pub fn facing_angle(from: Vec2, to: Vec2, action: Action) -> f32 {
    let (dx, dy) = (to.x - from.x, to.y - from.y);

    let mut angle = if dx == 0.0 && dy == 0.0 {
        0.0
    } else {
        (dy / dx).atan()
    };
    if dx < 0.0 {
        angle += PI;
    }
    if action == Action::Avoid {
        angle += PI;
    }
    if angle >= TAU {
        angle -= TAU;
    }
    if angle < 0.0 {
        angle += TAU;
    }

    let degrees = angle.to_degrees();
    // f32 rounding can land exactly on a full turn
    if degrees >= ROTATION_MAX { 0.0 } else { degrees }
}

/// Turn one step toward `facing`, snapping once within a single step
fn turn_toward(ship: &mut Ship, facing: f32) {
    let rotation = ship.entity.rotation();
    let diff = (rotation - facing).abs();

    if diff <= ROTATION_SPEED {
        ship.entity.set_rotation(facing);
        ship.rotate_reset();
    } else if rotation > facing {
        if diff > HALF_CIRCLE {
            ship.rotate_right();
        } else {
            ship.rotate_left();
        }
    } else if diff > HALF_CIRCLE {
        ship.rotate_left();
    } else {
        ship.rotate_right();
    }
}
