//! Seed placement: the canonical seed-slot template and writing seeds into a round or pools.

use crate::logic::draw_math::check_draw_size;
use crate::models::{DrawError, DrawMode, DrawResult, Entrant, PlayerPair, Pool, Round};
use rand::seq::SliceRandom;
use rand::Rng;

/// Canonical slots for seeds 1..=nb_seeds in a draw of `draw_size`.
///
/// Seed 1 sits at slot 0 and seed 2 at the last slot. Each following tier (3-4, 5-8,
/// 9-16, ...) mirrors the seeds already placed: seed `j` of tier `t` takes the slot
/// symmetric to seed `t + 1 - j` inside a segment of `draw_size / (t / 2)` slots, so it
/// lands in the other half of that seed's section and cannot meet a stronger seed early.
pub fn seed_positions(draw_size: usize, nb_seeds: usize) -> DrawResult<Vec<usize>> {
    check_draw_size(draw_size)?;
    if nb_seeds > draw_size {
        return Err(DrawError::InvalidArgument(format!(
            "{} seeds do not fit in a draw of {}",
            nb_seeds, draw_size
        )));
    }
    let mut positions = Vec::with_capacity(nb_seeds);
    if nb_seeds == 0 {
        return Ok(positions);
    }
    positions.push(0);
    if nb_seeds >= 2 {
        positions.push(draw_size - 1);
    }

    let mut tier = 4;
    while positions.len() < nb_seeds {
        let segment = draw_size / (tier / 2);
        for seed in (tier / 2 + 1)..=tier {
            if positions.len() == nb_seeds {
                break;
            }
            let partner = positions[tier - seed];
            let start = partner / segment * segment;
            positions.push(start + segment - 1 - (partner - start));
        }
        tier *= 2;
    }
    Ok(positions)
}

/// Seed slots with the order inside each tier (3-4, 5-8, ...) shuffled.
///
/// The set of slots a tier occupies is unchanged; only which seed of the tier gets which
/// of them is random. Seeds 1 and 2 never move.
pub fn randomized_seed_positions(
    draw_size: usize,
    nb_seeds: usize,
    rng: &mut impl Rng,
) -> DrawResult<Vec<usize>> {
    let mut positions = seed_positions(draw_size, nb_seeds)?;
    let mut tier_start = 2;
    while tier_start < positions.len() {
        let tier_end = (tier_start * 2).min(positions.len());
        positions[tier_start..tier_end].shuffle(rng);
        tier_start *= 2;
    }
    Ok(positions)
}

/// Write the strongest `nb_seeds` pairs into their seed slots.
///
/// `pairs` must be sorted by seed ascending; pair `i` goes to the `i`-th seed slot.
/// Returns the slots used, in seed order, so byes can be placed against them.
pub fn place_seed_pairs(
    round: &mut Round,
    pairs: &[PlayerPair],
    nb_seeds: usize,
    draw_size: usize,
    mode: DrawMode,
    rng: &mut impl Rng,
) -> DrawResult<Vec<usize>> {
    let positions = match mode {
        DrawMode::Seeded => randomized_seed_positions(draw_size, nb_seeds, rng)?,
        DrawMode::Manual => seed_positions(draw_size, nb_seeds)?,
    };
    if round.slot_count() != draw_size {
        return Err(DrawError::StructuralMismatch {
            declared: draw_size,
            actual: round.slot_count(),
        });
    }

    let placed: Vec<usize> = positions.into_iter().take(pairs.len()).collect();
    if let Some(&slot) = placed.iter().find(|&&s| !round.is_slot_empty(s)) {
        return Err(DrawError::OccupiedSlot { slot });
    }
    for (pair, &slot) in pairs.iter().zip(&placed) {
        log::debug!("Seed {} ({}) placed at slot {}", pair.seed, pair.name(), slot);
        round.set_slot(slot, Some(Entrant::Pair(pair.id)));
    }
    Ok(placed)
}

/// Spread seeds over pools in seed order: seed 1 to pool 0, seed 2 to pool 1, wrapping.
/// A full pool is skipped and the seed goes to the next pool with room.
pub fn place_seeds_in_pools(pools: &mut [Pool], seeds: &[PlayerPair]) -> DrawResult<()> {
    if seeds.is_empty() {
        return Ok(());
    }
    if pools.is_empty() {
        return Err(DrawError::CapacityExceeded {
            required: seeds.len(),
            available: 0,
        });
    }
    let available: usize = pools.iter().map(Pool::remaining_capacity).sum();
    if seeds.len() > available {
        return Err(DrawError::CapacityExceeded {
            required: seeds.len(),
            available,
        });
    }

    let nb_pools = pools.len();
    for (i, pair) in seeds.iter().enumerate() {
        let target = (0..nb_pools)
            .map(|offset| (i + offset) % nb_pools)
            .find(|&p| !pools[p].is_full())
            .ok_or(DrawError::CapacityExceeded {
                required: seeds.len(),
                available: 0,
            })?;
        log::debug!("Seed {} ({}) placed in {}", pair.seed, pair.name(), pools[target].name);
        pools[target].pairs.push(pair.id);
    }
    Ok(())
}
