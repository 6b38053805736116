//! Knockout phase: one elimination ladder (qualifying draw or main draw).
//!
//! The first round is filled once by placement (seeds, byes, qualifier placeholders, the
//! rest); every later round is written only by propagation.

use crate::logic::byes::place_byes;
use crate::logic::draw_math::{is_power_of_two, nb_rounds, round_sizes};
use crate::logic::random_placement::{place_in_order, place_randomly};
use crate::logic::seeding::place_seed_pairs;
use crate::models::{
    sort_by_strength, DrawError, DrawMode, DrawResult, Entrant, PlayerPair, Round, Stage,
    Tournament, TournamentConfig, MAX_DRAW_SIZE, MAX_QUALIFICATION_ROUNDS,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which ladder a knockout phase is.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseKind {
    Qualifs,
    MainDraw,
}

/// An elimination ladder of `draw_size` slots.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KnockoutPhase {
    pub kind: PhaseKind,
    pub draw_size: usize,
    pub nb_seeds: usize,
    /// Qualifying draw: how many winners it produces (games in its last round).
    /// Main draw: how many first-round slots are reserved for qualifiers.
    pub nb_qualifiers: usize,
}

impl KnockoutPhase {
    /// Qualifying ladder of a QUALIF_KO tournament.
    pub fn qualifs(config: &TournamentConfig) -> Self {
        Self {
            kind: PhaseKind::Qualifs,
            draw_size: config.pre_qual_draw_size,
            nb_seeds: config.nb_seeds_qualify,
            nb_qualifiers: config.nb_qualifiers,
        }
    }

    /// Main draw; reserves qualifier slots when `nb_qualifiers > 0`.
    pub fn main_draw(draw_size: usize, nb_seeds: usize, nb_qualifiers: usize) -> Self {
        Self {
            kind: PhaseKind::MainDraw,
            draw_size,
            nb_seeds,
            nb_qualifiers,
        }
    }

    /// Collect every problem with this ladder's parameters.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let label = match self.kind {
            PhaseKind::Qualifs => "Qualifying draw",
            PhaseKind::MainDraw => "Main draw",
        };
        if self.draw_size < 2 || !is_power_of_two(self.draw_size) {
            errors.push(format!("{} size {} must be a power of two of at least 2", label, self.draw_size));
        } else if self.draw_size > MAX_DRAW_SIZE {
            errors.push(format!("{} size {} exceeds the maximum of {}", label, self.draw_size, MAX_DRAW_SIZE));
        }
        if self.nb_seeds > self.draw_size {
            errors.push(format!("{} has {} seeds for only {} slots", label, self.nb_seeds, self.draw_size));
        }
        match self.kind {
            PhaseKind::Qualifs => {
                if self.nb_qualifiers == 0 {
                    errors.push("Number of qualifiers must be at least 1".to_string());
                } else if self.nb_qualifiers >= self.draw_size
                    || self.draw_size % self.nb_qualifiers != 0
                    || !is_power_of_two(self.draw_size / self.nb_qualifiers)
                {
                    errors.push(format!(
                        "Qualifying draw of {} cannot produce {} qualifiers (ratio must be a power of two of at least 2)",
                        self.draw_size, self.nb_qualifiers
                    ));
                } else if self.nb_rounds() > MAX_QUALIFICATION_ROUNDS {
                    errors.push(format!(
                        "Qualifying draw needs {} rounds, at most {} are supported",
                        self.nb_rounds(),
                        MAX_QUALIFICATION_ROUNDS
                    ));
                }
            }
            PhaseKind::MainDraw if self.nb_qualifiers > 0 => {
                if self.nb_qualifiers >= self.draw_size {
                    errors.push(format!(
                        "{} qualifiers leave no direct entries in a main draw of {}",
                        self.nb_qualifiers, self.draw_size
                    ));
                } else if self.nb_seeds.saturating_add(self.nb_qualifiers) > self.draw_size {
                    errors.push(format!(
                        "{} seeds and {} qualifiers do not fit in a main draw of {}",
                        self.nb_seeds, self.nb_qualifiers, self.draw_size
                    ));
                }
            }
            PhaseKind::MainDraw => {}
        }
        errors
    }

    /// Number of rounds in this ladder.
    pub fn nb_rounds(&self) -> usize {
        match self.kind {
            PhaseKind::Qualifs => nb_rounds(self.draw_size / self.nb_qualifiers.max(1)),
            PhaseKind::MainDraw => nb_rounds(self.draw_size),
        }
    }

    /// Empty rounds from `draw_size` slots down to the last round of the ladder.
    pub fn initialize(&self) -> DrawResult<Vec<Round>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(DrawError::InvalidConfig(errors));
        }
        let last_round_games = match self.kind {
            PhaseKind::Qualifs => self.nb_qualifiers,
            PhaseKind::MainDraw => 1,
        };
        round_sizes(self.draw_size, last_round_games)
            .into_iter()
            .enumerate()
            .map(|(i, games)| {
                let stage = match self.kind {
                    PhaseKind::Qualifs => Stage::qualification(i + 1),
                    PhaseKind::MainDraw => Stage::from_nb_teams(games * 2),
                };
                stage
                    .map(|s| Round::knockout(s, games))
                    .ok_or_else(|| DrawError::InvalidArgument(format!("no stage for round {} of {}", i + 1, self.draw_size)))
            })
            .collect()
    }

    /// Indices into `tournament.rounds` of this ladder's rounds, in order.
    pub fn round_indices(&self, tournament: &Tournament) -> Vec<usize> {
        tournament
            .rounds
            .iter()
            .enumerate()
            .filter(|(_, r)| match self.kind {
                PhaseKind::Qualifs => r.stage.is_qualification(),
                PhaseKind::MainDraw => r.stage.is_main_draw(self.draw_size),
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Seeds into their template slots. `entrants` sorted by strength; returns seed slots.
    pub fn place_seed_teams(
        &self,
        round: &mut Round,
        entrants: &[PlayerPair],
        mode: DrawMode,
        rng: &mut impl Rng,
    ) -> DrawResult<Vec<usize>> {
        let nb_seeds = self.nb_seeds.min(entrants.len());
        place_seed_pairs(round, &entrants[..nb_seeds], nb_seeds, self.draw_size, mode, rng)
    }

    /// Byes for every slot neither a real pair nor a qualifier will take.
    pub fn place_bye_teams(&self, round: &mut Round, total_real_pairs: usize, seed_slots: &[usize]) -> DrawResult<usize> {
        let reserved = match self.kind {
            PhaseKind::MainDraw => self.nb_qualifiers,
            PhaseKind::Qualifs => 0,
        };
        place_byes(round, total_real_pairs, seed_slots, self.draw_size, reserved, false)
    }

    /// QUALIFIER placeholders 1..=n; returns the slot of each ordinal.
    pub fn place_qualifier_placeholders(
        &self,
        round: &mut Round,
        mode: DrawMode,
        rng: &mut impl Rng,
    ) -> DrawResult<Vec<usize>> {
        if self.kind != PhaseKind::MainDraw || self.nb_qualifiers == 0 {
            return Ok(Vec::new());
        }
        let available = round.empty_slots().len();
        if self.nb_qualifiers > available {
            return Err(DrawError::CapacityExceeded {
                required: self.nb_qualifiers,
                available,
            });
        }
        let placeholders: Vec<Entrant> = (1..=self.nb_qualifiers).map(Entrant::Qualifier).collect();
        match mode {
            DrawMode::Seeded => place_randomly(round, &placeholders, rng),
            DrawMode::Manual => place_in_order(round, &placeholders),
        };
        placeholders
            .iter()
            .map(|&q| {
                round.find_slot(q).ok_or(DrawError::CapacityExceeded {
                    required: self.nb_qualifiers,
                    available,
                })
            })
            .collect()
    }

    /// Everyone not seeded into the remaining empty slots. Fails rather than drop a pair.
    pub fn place_remaining_teams(
        &self,
        round: &mut Round,
        entrants: &[PlayerPair],
        mode: DrawMode,
        rng: &mut impl Rng,
    ) -> DrawResult<()> {
        let available = round.empty_slots().len();
        if entrants.len() > available {
            return Err(DrawError::CapacityExceeded {
                required: entrants.len(),
                available,
            });
        }
        let remaining: Vec<Entrant> = entrants.iter().map(|p| Entrant::Pair(p.id)).collect();
        match mode {
            DrawMode::Seeded => place_randomly(round, &remaining, rng),
            DrawMode::Manual => place_in_order(round, &remaining),
        };
        Ok(())
    }

    /// Fill the first round of this ladder: seeds, byes, qualifier placeholders, then the rest.
    ///
    /// Qualifier slots are recorded on the tournament so cross-phase propagation can find
    /// them by ordinal.
    pub fn populate(
        &self,
        tournament: &mut Tournament,
        entrants: &[PlayerPair],
        mode: DrawMode,
        rng: &mut impl Rng,
    ) -> DrawResult<()> {
        let first = *self
            .round_indices(tournament)
            .first()
            .ok_or_else(|| DrawError::InvalidArgument("knockout phase has no rounds".to_string()))?;
        let sorted = sort_by_strength(entrants);
        let round = &mut tournament.rounds[first];

        let seed_slots = self.place_seed_teams(round, &sorted, mode, rng)?;
        let byes = self.place_bye_teams(round, sorted.len(), &seed_slots)?;
        let qualifier_slots = self.place_qualifier_placeholders(round, mode, rng)?;
        self.place_remaining_teams(round, &sorted[seed_slots.len()..], mode, rng)?;

        log::debug!(
            "{} populated: {} seeds, {} byes, {} qualifier slots, {} pairs",
            round.stage,
            seed_slots.len(),
            byes,
            qualifier_slots.len(),
            sorted.len()
        );
        if self.kind == PhaseKind::MainDraw && !qualifier_slots.is_empty() {
            tournament.qualifier_slots = qualifier_slots;
        }
        Ok(())
    }

    /// Move every decided winner to its slot in the next round, and empty the slot of every
    /// undecided game. Re-running without a result change leaves the rounds unchanged.
    pub fn propagate_winners(&self, tournament: &mut Tournament) {
        let indices = self.round_indices(tournament);
        for pair in indices.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let (head, tail) = tournament.rounds.split_at_mut(next);
            advance(&head[current], &mut tail[0]);
        }
    }
}

/// Game `i` of `current` feeds slot `i` of `next` (game `i / 2`, side A when `i` is even).
fn advance(current: &Round, next: &mut Round) {
    for (i, game) in current.games.iter().enumerate() {
        write_slot(next, i, game.winner());
    }
}

/// Set a slot, discarding the score of its game when the occupant changes.
/// Returns true if the slot changed.
pub(crate) fn write_slot(round: &mut Round, slot: usize, entrant: Option<Entrant>) -> bool {
    if slot >= round.slot_count() || round.slot(slot) == entrant {
        return false;
    }
    round.set_slot(slot, entrant);
    let game = &mut round.games[slot / 2];
    if game.score.take().is_some() {
        log::warn!("{} game {}: occupant changed, recorded score discarded", round.stage, game.id);
    }
    true
}
