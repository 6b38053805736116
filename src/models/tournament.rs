//! Tournament: the aggregate holding configuration, registered pairs and rounds.

use crate::models::config::TournamentConfig;
use crate::models::error::{DrawError, DrawResult};
use crate::models::game::{Game, GameId, Score};
use crate::models::pair::{Entrant, PairId, PlayerPair};
use crate::models::round::Round;
use crate::models::stage::Stage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state. Rounds are created once by the builder and then only their
/// slot contents change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub config: TournamentConfig,
    /// Every registered pair, in registration order.
    pub pairs: Vec<PlayerPair>,
    /// Rounds in progression order (qualifying or pools first, then the main draw).
    pub rounds: Vec<Round>,
    /// First main-draw round slot reserved for each qualifier; index k holds ordinal k + 1.
    #[serde(default)]
    pub qualifier_slots: Vec<usize>,
}

impl Tournament {
    /// Create an empty tournament for a configuration.
    pub fn new(config: TournamentConfig, pairs: Vec<PlayerPair>) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            pairs,
            rounds: Vec::new(),
            qualifier_slots: Vec::new(),
        }
    }

    pub fn pair(&self, id: PairId) -> Option<&PlayerPair> {
        self.pairs.iter().find(|p| p.id == id)
    }

    /// Human-readable label for a slot entrant.
    pub fn entrant_name(&self, entrant: Entrant) -> String {
        match entrant {
            Entrant::Pair(id) => self
                .pair(id)
                .map(PlayerPair::name)
                .unwrap_or_else(|| id.to_string()),
            Entrant::Bye => "BYE".to_string(),
            Entrant::Qualifier(n) => format!("Q{}", n),
        }
    }

    pub fn round(&self, stage: Stage) -> Option<&Round> {
        self.rounds.iter().find(|r| r.stage == stage)
    }

    pub fn pool_round(&self) -> Option<&Round> {
        self.round(Stage::Groups)
    }

    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.rounds.iter().flat_map(|r| r.games.iter()).find(|g| g.id == id)
    }

    pub fn game_mut(&mut self, id: GameId) -> Option<&mut Game> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.games.iter_mut())
            .find(|g| g.id == id)
    }

    /// Record a result. Only games between two real pairs can be scored.
    /// Call `propagate_winners` afterwards to move the result forward.
    pub fn set_score(&mut self, id: GameId, score: Score) -> DrawResult<()> {
        let game = self.game_mut(id).ok_or(DrawError::GameNotFound(id))?;
        if !game.is_playable() {
            return Err(DrawError::GameNotPlayable(id));
        }
        game.score = Some(score);
        Ok(())
    }

    /// Remove a result. Downstream slots are emptied by the next propagation.
    pub fn clear_score(&mut self, id: GameId) -> DrawResult<()> {
        let game = self.game_mut(id).ok_or(DrawError::GameNotFound(id))?;
        game.score = None;
        Ok(())
    }

    /// Overall winner, once the final is decided.
    pub fn champion(&self) -> Option<&PlayerPair> {
        let winner = self.round(Stage::Final)?.games.first()?.winner()?;
        self.pair(winner.pair_id()?)
    }
}
