//! Draw engine: placement (seeds, byes, the rest), phases, and propagation.

pub mod draw_math;
mod builder;
mod byes;
mod groups;
mod import;
mod knockout;
mod phase;
mod random_placement;
mod seeding;
mod validation;

pub use builder::{
    propagate_qualifiers, propagate_winners, propagate_with_ranking, setup_and_populate_tournament,
    split_entrants, update_score,
};
pub use byes::{needed_byes, place_byes};
pub use groups::{
    generate_round_robin, knockout_template, pool_standings, round_robin_pairings, GroupPhase,
    PoolRanking, PoolSeat, RankByWins, Standing,
};
pub use import::read_pairs_csv;
pub use knockout::{KnockoutPhase, PhaseKind};
pub use phase::Phase;
pub use random_placement::{place_in_order, place_randomly};
pub use seeding::{place_seed_pairs, place_seeds_in_pools, randomized_seed_positions, seed_positions};
pub use validation::{validate, validate_entries};
