//! Fill the slots left after seeds and byes, either shuffled or in the given order.
//!
//! Only empty slots are written, so earlier placements survive. Surplus entrants are not
//! placed (no error); an empty entrant list is a no-op.

use crate::models::{Entrant, PairId, Pool, Round};
use rand::seq::SliceRandom;
use rand::Rng;

/// Place entrants into the empty slots (or pools) of a round in random order.
/// Returns how many were placed.
pub fn place_randomly(round: &mut Round, entrants: &[Entrant], rng: &mut impl Rng) -> usize {
    if entrants.is_empty() {
        return 0;
    }
    if round.is_pool_round() {
        let mut pairs = pair_ids(entrants);
        pairs.shuffle(rng);
        return fill_pools(&mut round.pools, &pairs);
    }
    let mut slots = round.empty_slots();
    slots.shuffle(rng);
    fill_slots(round, entrants, &slots)
}

/// Place entrants into the empty slots (or pools) of a round, first empty slot first.
/// Returns how many were placed.
pub fn place_in_order(round: &mut Round, entrants: &[Entrant]) -> usize {
    if entrants.is_empty() {
        return 0;
    }
    if round.is_pool_round() {
        return fill_pools(&mut round.pools, &pair_ids(entrants));
    }
    let slots = round.empty_slots();
    fill_slots(round, entrants, &slots)
}

fn fill_slots(round: &mut Round, entrants: &[Entrant], slots: &[usize]) -> usize {
    let mut placed = 0;
    for (&slot, &entrant) in slots.iter().zip(entrants) {
        round.set_slot(slot, Some(entrant));
        placed += 1;
    }
    if entrants.len() > placed {
        log::debug!("{} entrant(s) left without a slot", entrants.len() - placed);
    }
    placed
}

fn pair_ids(entrants: &[Entrant]) -> Vec<PairId> {
    entrants.iter().filter_map(Entrant::pair_id).collect()
}

/// Each pair goes to the least filled pool that still has room (lowest index on ties),
/// which keeps pool sizes within one of each other.
fn fill_pools(pools: &mut [Pool], pairs: &[PairId]) -> usize {
    let mut placed = 0;
    for &pair in pairs {
        let target = pools
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_full())
            .min_by_key(|(i, p)| (p.pairs.len(), *i))
            .map(|(i, _)| i);
        match target {
            Some(i) => {
                pools[i].pairs.push(pair);
                placed += 1;
            }
            None => break,
        }
    }
    placed
}
