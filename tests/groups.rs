//! Integration tests for the group phase: pools, round-robin fixtures, standings and the
//! cross-pool knockout template.

use padel_draw_web::{
    generate_round_robin, knockout_template, pool_standings, propagate_winners,
    propagate_with_ranking, setup_and_populate_tournament, validate, validate_entries, DrawMode,
    Entrant, Game,
    PairId, PlayerPair, Pool, PoolRanking, PoolSeat, Round, Score, Stage, Tournament,
    TournamentConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn pairs(n: usize, nb_seeded: usize) -> Vec<PlayerPair> {
    (0..n)
        .map(|i| {
            let p = PlayerPair::new(format!("A{i}"), format!("B{i}"));
            if i < nb_seeded {
                p.with_seed(i as u32 + 1)
            } else {
                p
            }
        })
        .collect()
}

fn groups_tournament(
    nb_pools: usize,
    per_pool: usize,
    qualified: usize,
    nb_pairs: usize,
    mode: DrawMode,
) -> Tournament {
    let config =
        TournamentConfig::groups_ko(nb_pools, per_pool, qualified, nb_pools).with_draw_mode(mode);
    let mut rng = StdRng::seed_from_u64(21);
    setup_and_populate_tournament(config, pairs(nb_pairs, nb_pools), &mut rng).unwrap()
}

fn pool(t: &Tournament, index: usize) -> Pool {
    t.pool_round().unwrap().pools[index].clone()
}

/// Play every game of the given pools so that pool order is the final ranking.
fn play_pools_in_pool_order(t: &mut Tournament, pools: &[usize]) {
    let round = t.pool_round().unwrap().clone();
    for &p in pools {
        let pool = &round.pools[p];
        for game in round.games.iter().filter(|g| pool.owns(g)) {
            let pos = |e: Option<Entrant>| {
                let id = e.and_then(|e| e.pair_id()).unwrap();
                pool.pairs.iter().position(|&x| x == id).unwrap()
            };
            let score = if pos(game.team_a) < pos(game.team_b) {
                Score::sets(&[(6, 2), (6, 2)])
            } else {
                Score::sets(&[(2, 6), (2, 6)])
            };
            t.set_score(game.id, score).unwrap();
        }
    }
    propagate_winners(t);
}

#[test]
fn template_pairs_consecutive_pools() {
    let seat = |pool, rank| PoolSeat { pool, rank };
    assert_eq!(
        knockout_template(4, 1),
        vec![(seat(0, 1), seat(1, 1)), (seat(2, 1), seat(3, 1))]
    );
    assert_eq!(
        knockout_template(4, 2),
        vec![
            (seat(0, 1), seat(1, 2)),
            (seat(1, 1), seat(0, 2)),
            (seat(2, 1), seat(3, 2)),
            (seat(3, 1), seat(2, 2)),
        ]
    );
    assert_eq!(knockout_template(1, 2), vec![(seat(0, 1), seat(0, 2))]);
}

#[test]
fn rounds_are_pools_then_knockout() {
    let t = groups_tournament(4, 4, 2, 16, DrawMode::Manual);
    let stages: Vec<Stage> = t.rounds.iter().map(|r| r.stage).collect();
    assert_eq!(stages, vec![Stage::Groups, Stage::Quarters, Stage::Semis, Stage::Final]);
    let pools = &t.pool_round().unwrap().pools;
    let names: Vec<&str> = pools.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Pool A", "Pool B", "Pool C", "Pool D"]);
}

#[test]
fn seeds_head_their_pools() {
    let t = groups_tournament(4, 4, 2, 16, DrawMode::Seeded);
    let by_seed: Vec<PairId> = {
        let mut seeded: Vec<&PlayerPair> = t.pairs.iter().filter(|p| p.is_seeded()).collect();
        seeded.sort_by_key(|p| p.seed);
        seeded.iter().map(|p| p.id).collect()
    };
    for (i, id) in by_seed.iter().enumerate() {
        assert_eq!(pool(&t, i).pairs[0], *id, "seed {} not in pool {}", i + 1, i);
    }
    for p in &t.pool_round().unwrap().pools {
        assert_eq!(p.pairs.len(), 4);
    }
}

#[test]
fn every_pool_plays_round_robin() {
    let t = groups_tournament(4, 4, 2, 16, DrawMode::Seeded);
    let round = t.pool_round().unwrap();
    assert_eq!(round.games.len(), 4 * 6);
    for p in &round.pools {
        assert_eq!(round.games.iter().filter(|g| p.owns(g)).count(), 6);
    }
}

#[test]
fn round_robin_count_for_five_pairs() {
    let mut round = Round::pools(1, 5);
    round.pools[0].pairs = pairs(5, 0).iter().map(|p| p.id).collect();
    generate_round_robin(&mut round);
    assert_eq!(round.games.len(), 10);
    assert!(round.games.iter().all(Game::is_playable));
}

#[test]
fn two_qualified_by_pool_cross_seed() {
    let mut t = groups_tournament(4, 4, 2, 16, DrawMode::Manual);
    play_pools_in_pool_order(&mut t, &[0, 1, 2, 3]);

    let (a, b, c, d) = (pool(&t, 0), pool(&t, 1), pool(&t, 2), pool(&t, 3));
    let quarters = t.round(Stage::Quarters).unwrap();
    let pair = |id: PairId| Some(Entrant::Pair(id));
    assert_eq!(quarters.games[0].team_a, pair(a.pairs[0]));
    assert_eq!(quarters.games[0].team_b, pair(b.pairs[1]));
    assert_eq!(quarters.games[1].team_a, pair(b.pairs[0]));
    assert_eq!(quarters.games[1].team_b, pair(a.pairs[1]));
    assert_eq!(quarters.games[2].team_a, pair(c.pairs[0]));
    assert_eq!(quarters.games[2].team_b, pair(d.pairs[1]));
    assert_eq!(quarters.games[3].team_a, pair(d.pairs[0]));
    assert_eq!(quarters.games[3].team_b, pair(c.pairs[1]));
}

#[test]
fn one_qualified_by_pool_sends_winners() {
    let mut t = groups_tournament(4, 3, 1, 12, DrawMode::Manual);
    play_pools_in_pool_order(&mut t, &[0, 1, 2, 3]);
    let semis = t.round(Stage::Semis).unwrap();
    assert_eq!(semis.games[0].team_a, Some(Entrant::Pair(pool(&t, 0).pairs[0])));
    assert_eq!(semis.games[0].team_b, Some(Entrant::Pair(pool(&t, 1).pairs[0])));
    assert_eq!(semis.games[1].team_a, Some(Entrant::Pair(pool(&t, 2).pairs[0])));
}

#[test]
fn unfinished_pool_leaves_its_slots_empty() {
    let mut t = groups_tournament(4, 4, 2, 16, DrawMode::Manual);
    play_pools_in_pool_order(&mut t, &[1, 2, 3]);
    let quarters = t.round(Stage::Quarters).unwrap();
    // Pool A feeds slot 0 (1A) and slot 3 (2A).
    assert_eq!(quarters.slot(0), None);
    assert_eq!(quarters.slot(3), None);
    assert!(quarters.slot(1).is_some());
    assert!(quarters.slot(2).is_some());

    play_pools_in_pool_order(&mut t, &[0]);
    assert!(t.round(Stage::Quarters).unwrap().empty_slots().is_empty());
}

#[test]
fn clearing_a_pool_result_withdraws_its_qualifiers() {
    let mut t = groups_tournament(4, 4, 2, 16, DrawMode::Manual);
    play_pools_in_pool_order(&mut t, &[0, 1, 2, 3]);
    let pool_a = pool(&t, 0);
    let game = t
        .pool_round()
        .unwrap()
        .games
        .iter()
        .find(|g| pool_a.owns(g))
        .unwrap()
        .id;
    t.clear_score(game).unwrap();
    propagate_winners(&mut t);
    let quarters = t.round(Stage::Quarters).unwrap();
    assert_eq!(quarters.slot(0), None);
    assert_eq!(quarters.slot(3), None);
}

struct ReversePoolOrder;

impl PoolRanking for ReversePoolOrder {
    fn rank(&self, pool: &Pool, _games: &[Game]) -> Vec<PairId> {
        pool.pairs.iter().rev().copied().collect()
    }
}

#[test]
fn caller_supplied_ranking_decides_qualifiers() {
    let mut t = groups_tournament(2, 3, 1, 6, DrawMode::Manual);
    play_pools_in_pool_order(&mut t, &[0, 1]);
    propagate_with_ranking(&mut t, &ReversePoolOrder);
    let final_game = &t.round(Stage::Final).unwrap().games[0];
    assert_eq!(final_game.team_a, Some(Entrant::Pair(pool(&t, 0).pairs[2])));
    assert_eq!(final_game.team_b, Some(Entrant::Pair(pool(&t, 1).pairs[2])));
}

#[test]
fn standings_rank_by_wins() {
    let mut t = groups_tournament(2, 4, 1, 8, DrawMode::Manual);
    play_pools_in_pool_order(&mut t, &[0]);
    let standings = pool_standings(&t);
    assert_eq!(standings.len(), 2);
    let (name, rows) = &standings[0];
    assert_eq!(name, "Pool A");
    let wins: Vec<usize> = rows.iter().map(|r| r.wins).collect();
    assert_eq!(wins, vec![3, 2, 1, 0]);
    assert!(rows.iter().all(|r| r.played == 3));
    assert!(standings[1].1.iter().all(|r| r.played == 0));
}

#[test]
fn group_layout_problems_are_collected() {
    let config = TournamentConfig::groups_ko(3, 2, 3, 0);
    let errors = validate(&config);
    assert!(errors.iter().any(|e| e.contains("not supported")));
    assert!(errors.iter().any(|e| e.contains("exceeds the 2 pairs per pool")));
    assert!(errors.iter().any(|e| e.contains("not a power of two")));
    assert!(errors.iter().any(|e| e.contains("cannot be paired")));
}

#[test]
fn oversized_pool_layout_is_reported_not_panicking() {
    let config: TournamentConfig = serde_json::from_str(
        r#"{"format":"GROUPS_KO","nb_pools":18446744073709551615,"nb_pairs_per_pool":4,"nb_qualified_by_pool":2}"#,
    )
    .unwrap();
    let errors = validate(&config);
    assert!(errors.iter().any(|e| e.contains("Pool layout too large")), "{errors:?}");

    let config = TournamentConfig::groups_ko(usize::MAX, usize::MAX, 2, 0);
    assert!(!validate(&config).is_empty());
    assert!(!validate_entries(&config, 1).is_empty());
}

#[test]
fn empty_pool_sends_byes() {
    let mut t = groups_tournament(2, 3, 1, 6, DrawMode::Manual);
    let round = t.rounds.iter_mut().find(|r| r.stage == Stage::Groups).unwrap();
    round.pools[1].pairs.clear();
    generate_round_robin(round);

    play_pools_in_pool_order(&mut t, &[0]);
    let winner = pool(&t, 0).pairs[0];
    let final_game = &t.round(Stage::Final).unwrap().games[0];
    assert_eq!(final_game.team_a, Some(Entrant::Pair(winner)));
    assert_eq!(final_game.team_b, Some(Entrant::Bye));
    assert_eq!(t.champion().map(|p| p.id), Some(winner));
}
