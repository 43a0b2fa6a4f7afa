//! Simulation error types
//!
//! Every variant signals an invariant violation: the entity taxonomy or the
//! cpu decision table reached a case it has no handling for. They end the
//! current session at the tick boundary instead of panicking.

use thiserror::Error;

use crate::sim::ShipType;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// An index into the asteroid kind table had no entry
    #[error("asteroid kind not set up: index {index} in {table}")]
    UnknownAsteroidKind { table: &'static str, index: usize },

    /// A cpu target distance fell outside every decision band
    #[error("cpu cannot classify target distance {distance}")]
    UnclassifiedDistance { distance: f32 },

    /// A ship the session relies on was never added
    #[error("no {0:?} ship in this session")]
    MissingShip(ShipType),

    /// No player owns the given ship
    #[error("no player controls the {0:?} ship")]
    MissingPlayer(ShipType),
}
