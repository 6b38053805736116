//! Game (one match between two slots), Side, and the Score the engine reads a winner from.

use crate::models::pair::Entrant;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// Which slot of a game.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Side a slot index lands on: even slots are team A, odd slots team B.
    pub fn of_slot(slot: usize) -> Self {
        if slot % 2 == 0 {
            Side::A
        } else {
            Side::B
        }
    }
}

/// Games won by each side in one set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u8,
    pub b: u8,
}

/// Match score. Format rules (best of three, super tie-break...) live outside the engine;
/// only the winning side is read here.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub sets: Vec<SetScore>,
    /// Side awarded the game without it being played out.
    #[serde(default)]
    pub walkover: Option<Side>,
}

impl Score {
    /// Build a score from (a, b) set results.
    pub fn sets(sets: &[(u8, u8)]) -> Self {
        Self {
            sets: sets.iter().map(|&(a, b)| SetScore { a, b }).collect(),
            walkover: None,
        }
    }

    pub fn walkover(side: Side) -> Self {
        Self {
            sets: Vec::new(),
            walkover: Some(side),
        }
    }

    /// Side that won more sets, or the walkover side. None when empty or level.
    pub fn winner(&self) -> Option<Side> {
        if let Some(side) = self.walkover {
            return Some(side);
        }
        let won_by_a = self.sets.iter().filter(|s| s.a > s.b).count();
        let won_by_b = self.sets.iter().filter(|s| s.b > s.a).count();
        match won_by_a.cmp(&won_by_b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A single game: two slots and an optional score.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    /// None until placed or propagated.
    pub team_a: Option<Entrant>,
    pub team_b: Option<Entrant>,
    /// None if not yet played.
    pub score: Option<Score>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Empty game with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            team_a: None,
            team_b: None,
            score: None,
        }
    }

    /// Game between two entrants (used for round-robin fixtures).
    pub fn between(team_a: Entrant, team_b: Entrant) -> Self {
        Self {
            team_a: Some(team_a),
            team_b: Some(team_b),
            ..Self::new()
        }
    }

    pub fn team(&self, side: Side) -> Option<Entrant> {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Option<Entrant> {
        match side {
            Side::A => &mut self.team_a,
            Side::B => &mut self.team_b,
        }
    }

    /// Winner of the game, if decided.
    ///
    /// A BYE loses to anything without a score being entered (BYE vs BYE yields a BYE,
    /// so the next opponent also advances). Otherwise the score decides.
    pub fn winner(&self) -> Option<Entrant> {
        let (a, b) = (self.team_a?, self.team_b?);
        match (a, b) {
            (Entrant::Bye, other) | (other, Entrant::Bye) => Some(other),
            _ => match self.score.as_ref()?.winner()? {
                Side::A => Some(a),
                Side::B => Some(b),
            },
        }
    }

    /// Both slots filled and a winner determined.
    pub fn is_decided(&self) -> bool {
        self.winner().is_some()
    }

    /// Both slots hold real pairs, so a score can be recorded.
    pub fn is_playable(&self) -> bool {
        matches!(
            (self.team_a, self.team_b),
            (Some(Entrant::Pair(_)), Some(Entrant::Pair(_)))
        )
    }

    pub fn involves(&self, entrant: Entrant) -> bool {
        self.team_a == Some(entrant) || self.team_b == Some(entrant)
    }
}
