//! Data structures for the draw: pairs, games, rounds, pools, configuration, tournament.

mod config;
mod error;
mod game;
mod pair;
mod round;
mod stage;
mod tournament;

pub use config::{DrawMode, TournamentConfig, TournamentFormat};
pub use error::{DrawError, DrawResult};
pub use game::{Game, GameId, Score, SetScore, Side};
pub use pair::{sort_by_strength, Entrant, PairId, PlayerPair};
pub use round::{Pool, Round};
pub use stage::{Stage, MAX_DRAW_SIZE, MAX_QUALIFICATION_ROUNDS};
pub use tournament::{Tournament, TournamentId};
