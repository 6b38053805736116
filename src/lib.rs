//! Padel tournament draw engine: library with models and draw logic.

pub mod logic;
pub mod models;

pub use logic::{
    generate_round_robin, knockout_template, needed_byes, place_byes, place_in_order,
    place_randomly, place_seed_pairs, place_seeds_in_pools, pool_standings, propagate_qualifiers,
    propagate_winners, propagate_with_ranking, randomized_seed_positions, read_pairs_csv,
    round_robin_pairings, seed_positions, setup_and_populate_tournament, split_entrants,
    update_score, validate, validate_entries, GroupPhase, KnockoutPhase, Phase, PhaseKind,
    PoolRanking, PoolSeat, RankByWins, Standing,
};
pub use models::{
    sort_by_strength, DrawError, DrawMode, DrawResult, Entrant, Game, GameId, PairId, PlayerPair,
    Pool, Round, Score, SetScore, Side, Stage, Tournament, TournamentConfig, TournamentFormat,
    TournamentId, MAX_DRAW_SIZE, MAX_QUALIFICATION_ROUNDS,
};
