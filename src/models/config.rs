//! TournamentConfig: the draw parameters set once before building.

use serde::{Deserialize, Serialize};

/// Overall shape of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentFormat {
    /// One main draw.
    #[default]
    Knockout,
    /// Qualifying draw whose winners fill reserved main-draw slots.
    QualifKo,
    /// Round-robin pools whose top finishers play a knockout.
    GroupsKo,
}

/// How entrants other than seeds and byes are laid out.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawMode {
    /// Automatic draw: seed tiers shuffled, remaining entrants placed at random.
    #[default]
    Seeded,
    /// Organiser-controlled: canonical seed slots, entrants placed in the given order.
    Manual,
}

/// Draw parameters. Counts irrelevant to the chosen format are ignored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Main-draw slots (power of two).
    pub main_draw_size: usize,
    /// Qualifying-draw slots (0 or power of two).
    pub pre_qual_draw_size: usize,
    /// Main-draw slots reserved for qualifiers.
    pub nb_qualifiers: usize,
    /// Seeds in the main draw (or across the pools for GROUPS_KO).
    pub nb_seeds: usize,
    /// Seeds in the qualifying draw.
    pub nb_seeds_qualify: usize,
    pub nb_pools: usize,
    pub nb_pairs_per_pool: usize,
    pub nb_qualified_by_pool: usize,
    pub format: TournamentFormat,
    pub draw_mode: DrawMode,
}

impl TournamentConfig {
    /// Plain knockout of `main_draw_size` slots with `nb_seeds` seeds.
    pub fn knockout(main_draw_size: usize, nb_seeds: usize) -> Self {
        Self {
            main_draw_size,
            nb_seeds,
            format: TournamentFormat::Knockout,
            ..Self::default()
        }
    }

    /// Qualifying draw feeding `nb_qualifiers` slots of the main draw.
    pub fn qualif_ko(
        main_draw_size: usize,
        nb_seeds: usize,
        pre_qual_draw_size: usize,
        nb_qualifiers: usize,
        nb_seeds_qualify: usize,
    ) -> Self {
        Self {
            main_draw_size,
            nb_seeds,
            pre_qual_draw_size,
            nb_qualifiers,
            nb_seeds_qualify,
            format: TournamentFormat::QualifKo,
            ..Self::default()
        }
    }

    /// Pools feeding a knockout of `nb_pools * nb_qualified_by_pool` slots.
    pub fn groups_ko(
        nb_pools: usize,
        nb_pairs_per_pool: usize,
        nb_qualified_by_pool: usize,
        nb_seeds: usize,
    ) -> Self {
        Self {
            nb_pools,
            nb_pairs_per_pool,
            nb_qualified_by_pool,
            nb_seeds,
            main_draw_size: nb_pools.saturating_mul(nb_qualified_by_pool),
            format: TournamentFormat::GroupsKo,
            ..Self::default()
        }
    }

    pub fn with_draw_mode(self, draw_mode: DrawMode) -> Self {
        Self { draw_mode, ..self }
    }

    /// Slots of the knockout that follows the pools; None when the product overflows.
    pub fn group_knockout_size(&self) -> Option<usize> {
        self.nb_pools.checked_mul(self.nb_qualified_by_pool)
    }
}
