//! Stage: named rounds in tournament progression order.

use serde::{Deserialize, Serialize};

/// Named round of a tournament. Declaration order is progression order, so the derived
/// `Ord` compares stages the way a tournament advances.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Groups,
    Q1,
    Q2,
    Q3,
    Q4,
    R128,
    R64,
    R32,
    R16,
    Quarters,
    Semis,
    Final,
}

/// Most qualifying rounds a draw can have.
pub const MAX_QUALIFICATION_ROUNDS: usize = 4;

/// Largest supported knockout draw.
pub const MAX_DRAW_SIZE: usize = 128;

impl Stage {
    /// Main-draw stage for a round with `nb_teams` slots (2 → FINAL, 4 → SEMIS, ...).
    pub fn from_nb_teams(nb_teams: usize) -> Option<Stage> {
        match nb_teams {
            2 => Some(Stage::Final),
            4 => Some(Stage::Semis),
            8 => Some(Stage::Quarters),
            16 => Some(Stage::R16),
            32 => Some(Stage::R32),
            64 => Some(Stage::R64),
            128 => Some(Stage::R128),
            _ => None,
        }
    }

    /// The n-th qualifying round (1-based).
    pub fn qualification(round: usize) -> Option<Stage> {
        match round {
            1 => Some(Stage::Q1),
            2 => Some(Stage::Q2),
            3 => Some(Stage::Q3),
            4 => Some(Stage::Q4),
            _ => None,
        }
    }

    /// Slot count of a main-draw stage.
    pub fn nb_teams(&self) -> Option<usize> {
        match self {
            Stage::Final => Some(2),
            Stage::Semis => Some(4),
            Stage::Quarters => Some(8),
            Stage::R16 => Some(16),
            Stage::R32 => Some(32),
            Stage::R64 => Some(64),
            Stage::R128 => Some(128),
            _ => None,
        }
    }

    pub fn is_qualification(&self) -> bool {
        matches!(self, Stage::Q1 | Stage::Q2 | Stage::Q3 | Stage::Q4)
    }

    pub fn is_groups(&self) -> bool {
        *self == Stage::Groups
    }

    /// True for main-draw stages reachable in a main draw of `draw_size` slots.
    pub fn is_main_draw(&self, draw_size: usize) -> bool {
        self.nb_teams().is_some_and(|n| n <= draw_size)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Stage::Groups => "Groups",
            Stage::Q1 => "Q1",
            Stage::Q2 => "Q2",
            Stage::Q3 => "Q3",
            Stage::Q4 => "Q4",
            Stage::R128 => "Round of 128",
            Stage::R64 => "Round of 64",
            Stage::R32 => "Round of 32",
            Stage::R16 => "Round of 16",
            Stage::Quarters => "Quarter-finals",
            Stage::Semis => "Semi-finals",
            Stage::Final => "Final",
        };
        write!(f, "{}", label)
    }
}
