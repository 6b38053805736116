//! Group phase: round-robin pools whose top finishers feed a knockout.

use crate::logic::knockout::{write_slot, KnockoutPhase};
use crate::logic::random_placement::{place_in_order, place_randomly};
use crate::logic::seeding::place_seeds_in_pools;
use crate::models::{
    sort_by_strength, DrawError, DrawMode, DrawResult, Entrant, Game, PairId, PlayerPair, Pool,
    Round, Stage, Tournament, TournamentConfig,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Orders the pairs of a finished pool, best first.
///
/// Tie-break rules belong to the caller; the engine only consumes the order.
pub trait PoolRanking {
    fn rank(&self, pool: &Pool, games: &[Game]) -> Vec<PairId>;
}

/// Ranks by wins only. Pairs on equal wins keep their pool order.
#[derive(Clone, Copy, Debug, Default)]
pub struct RankByWins;

impl PoolRanking for RankByWins {
    fn rank(&self, pool: &Pool, games: &[Game]) -> Vec<PairId> {
        let wins = count_wins(pool, games);
        let mut ranked = pool.pairs.clone();
        ranked.sort_by_key(|id| std::cmp::Reverse(wins.get(id).copied().unwrap_or(0)));
        ranked
    }
}

fn count_wins(pool: &Pool, games: &[Game]) -> HashMap<PairId, usize> {
    let mut wins = HashMap::new();
    for game in games.iter().filter(|g| pool.owns(g)) {
        if let Some(id) = game.winner().and_then(|w| w.pair_id()) {
            *wins.entry(id).or_insert(0) += 1;
        }
    }
    wins
}

/// One row of a pool table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub pair: PairId,
    pub played: usize,
    pub wins: usize,
    pub losses: usize,
}

/// Pool tables, in the order `RankByWins` ranks them.
pub fn pool_standings(tournament: &Tournament) -> Vec<(String, Vec<Standing>)> {
    let Some(round) = tournament.pool_round() else {
        return Vec::new();
    };
    round
        .pools
        .iter()
        .map(|pool| {
            let rows = RankByWins
                .rank(pool, &round.games)
                .into_iter()
                .map(|pair| standing(pair, pool, &round.games))
                .collect();
            (pool.name.clone(), rows)
        })
        .collect()
}

fn standing(pair: PairId, pool: &Pool, games: &[Game]) -> Standing {
    let entrant = Entrant::Pair(pair);
    let decided: Vec<&Game> = games
        .iter()
        .filter(|g| pool.owns(g) && g.involves(entrant) && g.is_decided())
        .collect();
    let wins = decided.iter().filter(|g| g.winner() == Some(entrant)).count();
    Standing {
        pair,
        played: decided.len(),
        wins,
        losses: decided.len() - wins,
    }
}

/// Position `rank` (1-based) of pool `pool`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PoolSeat {
    pub pool: usize,
    pub rank: usize,
}

/// First knockout round fixtures, in game order.
///
/// Pools pair up consecutively (0 with 1, 2 with 3, ...). One qualifier per pool gives
/// 1A v 1B; two give 1A v 2B then 1B v 2A so pool mates do not meet straight away.
/// A single pool sends 1A v 2A.
pub fn knockout_template(nb_pools: usize, nb_qualified_by_pool: usize) -> Vec<(PoolSeat, PoolSeat)> {
    let seat = |pool, rank| PoolSeat { pool, rank };
    if nb_pools == 1 && nb_qualified_by_pool == 2 {
        return vec![(seat(0, 1), seat(0, 2))];
    }
    let mut fixtures = Vec::new();
    for a in (0..nb_pools.saturating_sub(1)).step_by(2) {
        let b = a + 1;
        match nb_qualified_by_pool {
            1 => fixtures.push((seat(a, 1), seat(b, 1))),
            2 => {
                fixtures.push((seat(a, 1), seat(b, 2)));
                fixtures.push((seat(b, 1), seat(a, 2)));
            }
            _ => {}
        }
    }
    fixtures
}

/// Every pairing of `n` pool members, as index pairs.
pub fn round_robin_pairings(n: usize) -> Vec<(usize, usize)> {
    let mut pairings = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            pairings.push((i, j));
        }
    }
    pairings
}

/// Pools of round-robin play followed by a knockout of `nb_pools * nb_qualified_by_pool` slots.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupPhase {
    pub nb_pools: usize,
    pub nb_pairs_per_pool: usize,
    pub nb_qualified_by_pool: usize,
    pub nb_seeds: usize,
    pub knockout: KnockoutPhase,
}

impl GroupPhase {
    pub fn new(config: &TournamentConfig) -> Self {
        Self {
            nb_pools: config.nb_pools,
            nb_pairs_per_pool: config.nb_pairs_per_pool,
            nb_qualified_by_pool: config.nb_qualified_by_pool,
            nb_seeds: config.nb_seeds,
            knockout: KnockoutPhase::main_draw(config.group_knockout_size().unwrap_or(0), 0, 0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.nb_pools.saturating_mul(self.nb_pairs_per_pool)
    }

    /// Collect every problem with the pool layout.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.nb_pools == 0 {
            errors.push("Number of pools must be at least 1".to_string());
        }
        if self.nb_pairs_per_pool < 2 {
            errors.push("Pools need at least 2 pairs".to_string());
        }
        if !(1..=2).contains(&self.nb_qualified_by_pool) {
            errors.push(format!(
                "{} qualified by pool is not supported (1 or 2)",
                self.nb_qualified_by_pool
            ));
        }
        if self.nb_qualified_by_pool > self.nb_pairs_per_pool {
            errors.push(format!(
                "{} qualified by pool exceeds the {} pairs per pool",
                self.nb_qualified_by_pool, self.nb_pairs_per_pool
            ));
        }
        if self.nb_pools.checked_mul(self.nb_pairs_per_pool).is_none() {
            errors.push(format!(
                "Pool layout too large: {} pools of {} pairs",
                self.nb_pools, self.nb_pairs_per_pool
            ));
        }
        match self.nb_pools.checked_mul(self.nb_qualified_by_pool) {
            None => errors.push(format!(
                "Pool layout too large: {} pools x {} qualified",
                self.nb_pools, self.nb_qualified_by_pool
            )),
            Some(size) if size < 2 || !size.is_power_of_two() => errors.push(format!(
                "{} pools x {} qualified = {} is not a power of two of at least 2",
                self.nb_pools, self.nb_qualified_by_pool, size
            )),
            Some(_) => errors.extend(self.knockout.validate()),
        }
        if self.nb_pools > 1 && self.nb_pools % 2 != 0 {
            errors.push(format!("{} pools cannot be paired for the knockout", self.nb_pools));
        }
        if self.nb_seeds > self.capacity() {
            errors.push(format!("{} seeds exceed the {} pool places", self.nb_seeds, self.capacity()));
        }
        errors
    }

    /// The pool round followed by the knockout rounds it feeds.
    pub fn initialize(&self) -> DrawResult<Vec<Round>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(DrawError::InvalidConfig(errors));
        }
        let mut rounds = vec![Round::pools(self.nb_pools, self.nb_pairs_per_pool)];
        rounds.extend(self.knockout.initialize()?);
        Ok(rounds)
    }

    fn pool_round_index(tournament: &Tournament) -> Option<usize> {
        tournament.rounds.iter().position(|r| r.stage == Stage::Groups)
    }

    /// Strongest `nb_seeds` of `sorted` spread over the pools; returns how many were seeded.
    pub fn place_seed_teams(&self, round: &mut Round, sorted: &[PlayerPair]) -> DrawResult<usize> {
        let nb_seeds = self.nb_seeds.min(sorted.len());
        place_seeds_in_pools(&mut round.pools, &sorted[..nb_seeds])?;
        Ok(nb_seeds)
    }

    /// Seeds across pools, the rest balanced over the pools, then the round-robin fixtures.
    pub fn populate(
        &self,
        tournament: &mut Tournament,
        entrants: &[PlayerPair],
        mode: DrawMode,
        rng: &mut impl Rng,
    ) -> DrawResult<()> {
        let index = Self::pool_round_index(tournament)
            .ok_or_else(|| DrawError::InvalidArgument("group phase has no pool round".to_string()))?;
        let round = &mut tournament.rounds[index];
        if entrants.len() > self.capacity() {
            return Err(DrawError::CapacityExceeded {
                required: entrants.len(),
                available: self.capacity(),
            });
        }
        let sorted = sort_by_strength(entrants);
        let nb_seeds = self.place_seed_teams(round, &sorted)?;
        let remaining: Vec<Entrant> = sorted[nb_seeds..].iter().map(|p| Entrant::Pair(p.id)).collect();
        match mode {
            DrawMode::Seeded => place_randomly(round, &remaining, rng),
            DrawMode::Manual => place_in_order(round, &remaining),
        };
        generate_round_robin(round);
        log::debug!(
            "{} pools populated with {} pairs, {} games",
            round.pools.len(),
            sorted.len(),
            round.games.len()
        );
        Ok(())
    }

    /// Fill the knockout from finished pools, then run the knockout's own propagation.
    ///
    /// A pool feeds its knockout slots only once all its games are decided; until then
    /// (or again after a result is cleared) those slots are empty. A finished pool that is
    /// short of a ranked position sends a BYE in its place, so an empty pool sends only BYEs.
    pub fn propagate_winners(&self, tournament: &mut Tournament, ranker: &impl PoolRanking) {
        let Some(pool_index) = Self::pool_round_index(tournament) else {
            return;
        };
        let Some(&first_knockout) = self.knockout.round_indices(tournament).first() else {
            return;
        };

        let rankings: Vec<Option<Vec<PairId>>> = {
            let round = &tournament.rounds[pool_index];
            round
                .pools
                .iter()
                .map(|pool| {
                    let finished = round.games.iter().filter(|g| pool.owns(g)).all(Game::is_decided);
                    finished.then(|| ranker.rank(pool, &round.games))
                })
                .collect()
        };

        let knockout = &mut tournament.rounds[first_knockout];
        for (game, (seat_a, seat_b)) in knockout_template(self.nb_pools, self.nb_qualified_by_pool)
            .into_iter()
            .enumerate()
        {
            for (slot, seat) in [(game * 2, seat_a), (game * 2 + 1, seat_b)] {
                let entrant = rankings.get(seat.pool).and_then(Option::as_ref).map(|ranked| {
                    ranked
                        .get(seat.rank - 1)
                        .map(|&id| Entrant::Pair(id))
                        .unwrap_or(Entrant::Bye)
                });
                write_slot(knockout, slot, entrant);
            }
        }

        self.knockout.propagate_winners(tournament);
    }
}

/// Replace the round's games with every pairing inside each pool.
/// A pool of `k` pairs gives `k * (k - 1) / 2` games.
pub fn generate_round_robin(round: &mut Round) {
    let games: Vec<Game> = round
        .pools
        .iter()
        .flat_map(|pool| {
            round_robin_pairings(pool.pairs.len())
                .into_iter()
                .map(|(i, j)| Game::between(Entrant::Pair(pool.pairs[i]), Entrant::Pair(pool.pairs[j])))
                .collect::<Vec<_>>()
        })
        .collect();
    round.games = games;
}
