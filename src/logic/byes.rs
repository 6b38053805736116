//! Bye placement: fill the slots no real pair will occupy, strongest seeds first.

use crate::logic::seeding::seed_positions;
use crate::models::{DrawError, DrawResult, Entrant, Round};

/// Byes a draw needs once real pairs and reserved qualifier slots are counted.
pub fn needed_byes(draw_size: usize, total_real_pairs: usize, reserved_qualifier_slots: usize) -> usize {
    draw_size.saturating_sub(total_real_pairs.saturating_add(reserved_qualifier_slots))
}

/// Place the byes of a knockout round.
///
/// 1. Against each seed, in seed order (`seed_slots` as returned by seed placement),
///    while the opposite slot is empty.
/// 2. Then over the rest of the draw in canonical slot order, never next to another
///    BYE unless `allow_bye_vs_bye`.
/// 3. Only if byes are still left, any empty slot (BYE vs BYE).
///
/// Returns the number of byes placed.
pub fn place_byes(
    round: &mut Round,
    total_real_pairs: usize,
    seed_slots: &[usize],
    draw_size: usize,
    reserved_qualifier_slots: usize,
    allow_bye_vs_bye: bool,
) -> DrawResult<usize> {
    if round.slot_count() != draw_size || draw_size < 2 || !draw_size.is_power_of_two() {
        return Err(DrawError::StructuralMismatch {
            declared: draw_size,
            actual: round.slot_count(),
        });
    }

    let needed = needed_byes(draw_size, total_real_pairs, reserved_qualifier_slots);
    if needed == 0 {
        return Ok(0);
    }
    let available = round.empty_slots().len();
    if needed > available {
        return Err(DrawError::CapacityExceeded {
            required: needed,
            available,
        });
    }

    let mut remaining = needed;
    for &seed_slot in seed_slots {
        if remaining == 0 {
            break;
        }
        let opposite = Round::opposite(seed_slot);
        if round.is_slot_empty(opposite) {
            round.set_slot(opposite, Some(Entrant::Bye));
            remaining -= 1;
        }
    }

    // Canonical order spreads the rest over every section of the draw.
    let canonical = seed_positions(draw_size, draw_size)?;
    for &anchor in &canonical {
        if remaining == 0 {
            break;
        }
        let target = Round::opposite(anchor);
        let anchor_is_bye = round.slot(anchor).is_some_and(|e| e.is_bye());
        if round.is_slot_empty(target) && (allow_bye_vs_bye || !anchor_is_bye) {
            round.set_slot(target, Some(Entrant::Bye));
            remaining -= 1;
        }
    }

    if remaining > 0 {
        log::warn!(
            "Draw of {} with {} real pairs needs {} BYE vs BYE slot(s)",
            draw_size,
            total_real_pairs,
            remaining
        );
        for slot in round.empty_slots().into_iter().take(remaining) {
            round.set_slot(slot, Some(Entrant::Bye));
            remaining -= 1;
        }
    }

    Ok(needed - remaining)
}
