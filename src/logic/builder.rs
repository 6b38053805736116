//! Tournament builder: compose the phases of a format, place entrants, and drive
//! propagation across phase boundaries.

use crate::logic::groups::{PoolRanking, RankByWins};
use crate::logic::knockout::write_slot;
use crate::logic::phase::Phase;
use crate::logic::validation::{validate, validate_entries};
use crate::models::{
    sort_by_strength, DrawError, DrawResult, Entrant, Game, GameId, PlayerPair, Score, Tournament,
    TournamentConfig, TournamentFormat,
};
use rand::Rng;
use std::collections::HashSet;

/// Split entrants between phases, aligned with `Phase::for_config`.
///
/// QUALIF_KO sends the weakest pairs to qualifying: those that do not fit directly in the
/// main draw, and at least half the qualifying draw so no qualifying game is BYE vs BYE.
/// The strongest remaining pairs enter the main draw directly.
pub fn split_entrants(config: &TournamentConfig, pairs: &[PlayerPair]) -> Vec<Vec<PlayerPair>> {
    let sorted = sort_by_strength(pairs);
    match config.format {
        TournamentFormat::Knockout | TournamentFormat::GroupsKo => vec![sorted],
        TournamentFormat::QualifKo => {
            let total = sorted.len();
            let direct_places = config.main_draw_size.saturating_sub(config.nb_qualifiers);
            let nb_qualifying = total
                .saturating_sub(direct_places)
                .max(config.pre_qual_draw_size / 2)
                .min(total);
            let (direct, qualifying) = sorted.split_at(total - nb_qualifying);
            vec![qualifying.to_vec(), direct.to_vec()]
        }
    }
}

/// Build a tournament: validate, create every round, and fill the first round of each phase
/// (seeds, then byes, then the rest). Later rounds start empty; call `propagate_winners`
/// to advance byes and results.
pub fn setup_and_populate_tournament(
    config: TournamentConfig,
    pairs: Vec<PlayerPair>,
    rng: &mut impl Rng,
) -> DrawResult<Tournament> {
    let mut seen = HashSet::new();
    if let Some(dup) = pairs.iter().find(|p| !seen.insert(p.id)) {
        return Err(DrawError::DuplicatePair(dup.id));
    }
    let mut errors = validate(&config);
    errors.extend(validate_entries(&config, pairs.len()));
    if !errors.is_empty() {
        return Err(DrawError::InvalidConfig(errors));
    }

    let phases = Phase::for_config(&config);
    let entrants = split_entrants(&config, &pairs);
    let mode = config.draw_mode;
    let mut tournament = Tournament::new(config, pairs);
    for phase in &phases {
        tournament.rounds.extend(phase.initialize()?);
    }
    for (phase, entrants) in phases.iter().zip(&entrants) {
        phase.populate(&mut tournament, entrants, mode, rng)?;
    }

    log::info!(
        "Built {:?} tournament {}: {} pairs, {} rounds",
        tournament.config.format,
        tournament.id,
        tournament.pairs.len(),
        tournament.rounds.len()
    );
    Ok(tournament)
}

/// Propagate every result, ranking pools by wins.
pub fn propagate_winners(tournament: &mut Tournament) {
    propagate_with_ranking(tournament, &RankByWins);
}

/// Propagate every result in dependency order: qualifying, then its winners into the
/// reserved main-draw slots, then the main draw; or pools, then their knockout.
///
/// Converges to the same rounds for the same results however often it runs.
pub fn propagate_with_ranking(tournament: &mut Tournament, ranker: &impl PoolRanking) {
    for phase in Phase::for_config(&tournament.config) {
        phase.propagate_winners(tournament, ranker);
        if phase.is_qualification() {
            propagate_qualifiers(tournament);
        }
    }
}

/// Write each qualifying-final winner into the main-draw slot of its ordinal.
///
/// Game k of the last qualifying round feeds ordinal k + 1, wherever that slot is. An
/// undecided game puts the QUALIFIER placeholder back, so a changed or cleared result
/// replaces the earlier winner in place.
pub fn propagate_qualifiers(tournament: &mut Tournament) {
    let Some(last_qualifying) = tournament.rounds.iter().rposition(|r| r.stage.is_qualification()) else {
        return;
    };
    let Some(first_main) = tournament.rounds.iter().position(|r| r.stage.nb_teams().is_some()) else {
        return;
    };
    let winners: Vec<Entrant> = (0..tournament.qualifier_slots.len())
        .map(|k| {
            tournament.rounds[last_qualifying]
                .games
                .get(k)
                .and_then(Game::winner)
                .unwrap_or(Entrant::Qualifier(k + 1))
        })
        .collect();
    let slots = tournament.qualifier_slots.clone();
    let main = &mut tournament.rounds[first_main];
    for (slot, winner) in slots.into_iter().zip(winners) {
        if write_slot(main, slot, Some(winner)) {
            log::debug!("Qualifier slot {} now holds {:?}", slot, winner);
        }
    }
}

/// Record (or clear, with `None`) a game's score, then propagate.
pub fn update_score(tournament: &mut Tournament, game: GameId, score: Option<Score>) -> DrawResult<()> {
    match score {
        Some(score) => tournament.set_score(game, score)?,
        None => tournament.clear_score(game)?,
    }
    propagate_winners(tournament);
    Ok(())
}
