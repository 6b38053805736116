//! PlayerPair (a registered team of two) and Entrant (what a bracket slot holds).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a registered pair (used in slots, pools and lookups).
pub type PairId = Uuid;

/// A registered team of two players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerPair {
    pub id: PairId,
    pub player1: String,
    pub player2: String,
    /// Seed rank; 0 means unseeded.
    #[serde(default)]
    pub seed: u32,
}

impl PlayerPair {
    /// Create an unseeded pair with a fresh id.
    pub fn new(player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            player1: player1.into(),
            player2: player2.into(),
            seed: 0,
        }
    }

    /// Same pair with the given seed rank.
    pub fn with_seed(self, seed: u32) -> Self {
        Self { seed, ..self }
    }

    pub fn is_seeded(&self) -> bool {
        self.seed > 0
    }

    /// Display name, e.g. "Lebron / Galan".
    pub fn name(&self) -> String {
        format!("{} / {}", self.player1, self.player2)
    }
}

/// Content of one bracket slot: a real pair or a structural placeholder.
///
/// BYE and QUALIFIER never carry player identities; a real pair is only ever
/// referenced by id, so its identity stays stable for the tournament's life.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Entrant {
    Pair(PairId),
    Bye,
    /// Slot reserved for the n-th qualifier (1-based ordinal).
    Qualifier(usize),
}

impl Entrant {
    pub fn is_bye(&self) -> bool {
        matches!(self, Entrant::Bye)
    }

    pub fn is_qualifier(&self) -> bool {
        matches!(self, Entrant::Qualifier(_))
    }

    pub fn pair_id(&self) -> Option<PairId> {
        match self {
            Entrant::Pair(id) => Some(*id),
            _ => None,
        }
    }
}

/// Order entrants by strength: seeded pairs by ascending seed, then unseeded pairs
/// in the order they were given.
pub fn sort_by_strength(pairs: &[PlayerPair]) -> Vec<PlayerPair> {
    let mut sorted = pairs.to_vec();
    // Stable sort keeps input order among unseeded pairs.
    sorted.sort_by_key(|p| if p.is_seeded() { p.seed } else { u32::MAX });
    sorted
}
