//! Draw arithmetic: powers of two and round counts.

use crate::models::{DrawError, DrawResult};

pub fn is_power_of_two(n: usize) -> bool {
    n.is_power_of_two()
}

/// Floor of log2; 0 for 0 and 1.
pub fn log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - 1 - n.leading_zeros()) as usize
    }
}

/// Rounds needed to reduce `draw_size` slots to one winner (or a draw to its qualifiers,
/// given slots per qualifier).
pub fn nb_rounds(draw_size: usize) -> usize {
    log2(draw_size)
}

/// Games in each round of a ladder from `draw_size` slots down to `last_round_games` games.
pub fn round_sizes(draw_size: usize, last_round_games: usize) -> Vec<usize> {
    let mut games = draw_size / 2;
    let mut sizes = Vec::new();
    while games >= last_round_games.max(1) && games > 0 {
        sizes.push(games);
        games /= 2;
    }
    sizes
}

/// Check a draw size is a usable knockout size (a power of two of at least 2).
pub fn check_draw_size(draw_size: usize) -> DrawResult<()> {
    if draw_size < 2 || !is_power_of_two(draw_size) {
        return Err(DrawError::InvalidArgument(format!(
            "draw size {} is not a power of two of at least 2",
            draw_size
        )));
    }
    Ok(())
}
