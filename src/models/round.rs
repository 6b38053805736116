//! Round (a bracket round or the pool round) and Pool.

use crate::models::game::{Game, Side};
use crate::models::pair::{Entrant, PairId};
use crate::models::stage::Stage;
use serde::{Deserialize, Serialize};

/// A named group playing round-robin.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    /// e.g. "Pool A".
    pub name: String,
    pub pairs: Vec<PairId>,
    pub capacity: usize,
}

impl Pool {
    /// Empty pool named after its index: 0 → "Pool A", 1 → "Pool B", ...
    pub fn new(index: usize, capacity: usize) -> Self {
        Self {
            name: format!("Pool {}", pool_letter(index)),
            pairs: Vec::new(),
            capacity,
        }
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.pairs.len())
    }

    pub fn is_full(&self) -> bool {
        self.remaining_capacity() == 0
    }

    pub fn contains(&self, pair: PairId) -> bool {
        self.pairs.contains(&pair)
    }

    /// True if the game is a fixture between two members of this pool.
    pub fn owns(&self, game: &Game) -> bool {
        let member = |e: Option<Entrant>| e.and_then(|e| e.pair_id()).is_some_and(|id| self.contains(id));
        member(game.team_a) && member(game.team_b)
    }
}

fn pool_letter(index: usize) -> String {
    let mut index = index;
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// One round of the tournament.
///
/// Knockout rounds keep their slots in `games` (slot `s` is game `s / 2`, side A when `s`
/// is even) and have no pools. The pool round keeps its slots in `pools`; its `games` are
/// the round-robin fixtures derived from them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub stage: Stage,
    pub games: Vec<Game>,
    #[serde(default)]
    pub pools: Vec<Pool>,
}

impl Round {
    /// Knockout round of `nb_games` empty games.
    pub fn knockout(stage: Stage, nb_games: usize) -> Self {
        Self {
            stage,
            games: (0..nb_games).map(|_| Game::new()).collect(),
            pools: Vec::new(),
        }
    }

    /// Pool round of `nb_pools` empty pools of `capacity` each.
    pub fn pools(nb_pools: usize, capacity: usize) -> Self {
        Self {
            stage: Stage::Groups,
            games: Vec::new(),
            pools: (0..nb_pools).map(|i| Pool::new(i, capacity)).collect(),
        }
    }

    pub fn is_pool_round(&self) -> bool {
        self.stage.is_groups()
    }

    /// Number of bracket slots (two per game).
    pub fn slot_count(&self) -> usize {
        self.games.len() * 2
    }

    pub fn slot(&self, slot: usize) -> Option<Entrant> {
        self.games.get(slot / 2).and_then(|g| g.team(Side::of_slot(slot)))
    }

    pub fn is_slot_empty(&self, slot: usize) -> bool {
        self.slot(slot).is_none()
    }

    /// Write an entrant into a slot. Out-of-range slots are ignored.
    pub fn set_slot(&mut self, slot: usize, entrant: Option<Entrant>) {
        if let Some(game) = self.games.get_mut(slot / 2) {
            *game.team_mut(Side::of_slot(slot)) = entrant;
        }
    }

    /// Indices of the empty slots, in bracket order.
    pub fn empty_slots(&self) -> Vec<usize> {
        (0..self.slot_count()).filter(|&s| self.is_slot_empty(s)).collect()
    }

    /// Slot holding the given entrant, if any.
    pub fn find_slot(&self, entrant: Entrant) -> Option<usize> {
        (0..self.slot_count()).find(|&s| self.slot(s) == Some(entrant))
    }

    /// Slot playing against `slot` in the same game.
    pub fn opposite(slot: usize) -> usize {
        slot ^ 1
    }

    /// Real pairs present in this round (slots and pools).
    pub fn pair_ids(&self) -> Vec<PairId> {
        if self.is_pool_round() {
            return self.pools.iter().flat_map(|p| p.pairs.iter().copied()).collect();
        }
        self.games
            .iter()
            .flat_map(|g| [g.team_a, g.team_b])
            .filter_map(|e| e.and_then(|e| e.pair_id()))
            .collect()
    }
}
