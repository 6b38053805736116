//! Errors raised by placement, propagation and result mutation.

use crate::models::game::GameId;
use crate::models::pair::PairId;
use thiserror::Error;

/// Errors that can occur while building or updating a draw.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DrawError {
    /// A count or size that can never describe a draw (zero, not a power of two, too many seeds).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The declared draw size disagrees with the round actually being filled.
    #[error("Declared draw size {declared} does not match the round's {actual} slots")]
    StructuralMismatch { declared: usize, actual: usize },

    /// Seed placement hit a slot that already holds an entrant.
    #[error("Slot {slot} is already occupied")]
    OccupiedSlot { slot: usize },

    /// More placements are required than there are empty slots.
    #[error("Not enough empty slots: {required} required, {available} available")]
    CapacityExceeded { required: usize, available: usize },

    /// Configuration problems, collected so they can be reported together.
    #[error("Invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("Game {0} not found")]
    GameNotFound(GameId),

    /// Only games between two real pairs can carry a score.
    #[error("Game {0} does not have two pairs to play it")]
    GameNotPlayable(GameId),

    #[error("Pair {0} registered more than once")]
    DuplicatePair(PairId),

    #[error("Could not import pairs: {0}")]
    Import(String),
}

/// Result type for draw operations
pub type DrawResult<T> = Result<T, DrawError>;
