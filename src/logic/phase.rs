//! Phase: the closed set of tournament phases behind one set of operations.

use crate::logic::groups::{GroupPhase, PoolRanking};
use crate::logic::knockout::{KnockoutPhase, PhaseKind};
use crate::models::{
    sort_by_strength, DrawMode, DrawResult, PlayerPair, Round, Tournament, TournamentConfig,
    TournamentFormat,
};
use rand::Rng;

/// One phase of a tournament, selected by the configured format.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Knockout(KnockoutPhase),
    /// Pools together with the knockout they feed.
    Groups(GroupPhase),
}

impl Phase {
    /// Phases of a tournament, in dependency order.
    pub fn for_config(config: &TournamentConfig) -> Vec<Phase> {
        match config.format {
            TournamentFormat::Knockout => vec![Phase::Knockout(KnockoutPhase::main_draw(
                config.main_draw_size,
                config.nb_seeds,
                0,
            ))],
            TournamentFormat::QualifKo => vec![
                Phase::Knockout(KnockoutPhase::qualifs(config)),
                Phase::Knockout(KnockoutPhase::main_draw(
                    config.main_draw_size,
                    config.nb_seeds,
                    config.nb_qualifiers,
                )),
            ],
            TournamentFormat::GroupsKo => vec![Phase::Groups(GroupPhase::new(config))],
        }
    }

    pub fn validate(&self) -> Vec<String> {
        match self {
            Phase::Knockout(k) => k.validate(),
            Phase::Groups(g) => g.validate(),
        }
    }

    /// Empty rounds for this phase.
    pub fn initialize(&self) -> DrawResult<Vec<Round>> {
        match self {
            Phase::Knockout(k) => k.initialize(),
            Phase::Groups(g) => g.initialize(),
        }
    }

    pub fn is_qualification(&self) -> bool {
        matches!(self, Phase::Knockout(k) if k.kind == PhaseKind::Qualifs)
    }

    /// Seeds of this phase. Pools take their seeds on the pool round and report no slots.
    pub fn place_seed_teams(
        &self,
        round: &mut Round,
        entrants: &[PlayerPair],
        mode: DrawMode,
        rng: &mut impl Rng,
    ) -> DrawResult<Vec<usize>> {
        match self {
            Phase::Knockout(k) => k.place_seed_teams(round, &sort_by_strength(entrants), mode, rng),
            Phase::Groups(g) => {
                g.place_seed_teams(round, &sort_by_strength(entrants))?;
                Ok(Vec::new())
            }
        }
    }

    /// Byes of this phase. Pools have none.
    pub fn place_bye_teams(&self, round: &mut Round, total_real_pairs: usize, seed_slots: &[usize]) -> DrawResult<usize> {
        match self {
            Phase::Knockout(k) => k.place_bye_teams(round, total_real_pairs, seed_slots),
            Phase::Groups(_) => Ok(0),
        }
    }

    /// Fill the phase's first round with its entrants.
    pub fn populate(
        &self,
        tournament: &mut Tournament,
        entrants: &[PlayerPair],
        mode: DrawMode,
        rng: &mut impl Rng,
    ) -> DrawResult<()> {
        match self {
            Phase::Knockout(k) => k.populate(tournament, entrants, mode, rng),
            Phase::Groups(g) => g.populate(tournament, entrants, mode, rng),
        }
    }

    /// Propagate results inside this phase (and, for pools, into their knockout).
    pub fn propagate_winners(&self, tournament: &mut Tournament, ranker: &impl PoolRanking) {
        match self {
            Phase::Knockout(k) => k.propagate_winners(tournament),
            Phase::Groups(g) => g.propagate_winners(tournament, ranker),
        }
    }
}
