//! Integration tests for building whole tournaments and driving them to a champion.

use padel_draw_web::{
    propagate_winners, setup_and_populate_tournament, split_entrants, update_score, validate,
    DrawError, DrawMode, Entrant, GameId, PairId, PlayerPair, Score, Side, Stage, Tournament,
    TournamentConfig, TournamentFormat,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

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

fn count(t: &Tournament, stage: Stage, pred: impl Fn(Entrant) -> bool) -> usize {
    let round = t.round(stage).unwrap();
    (0..round.slot_count())
        .filter(|&s| round.slot(s).is_some_and(&pred))
        .count()
}

/// Score every playable game at random until nothing is left to play.
fn play_out(t: &mut Tournament, rng: &mut StdRng) {
    loop {
        propagate_winners(t);
        let next: Option<GameId> = t
            .rounds
            .iter()
            .flat_map(|r| r.games.iter())
            .find(|g| g.is_playable() && !g.is_decided())
            .map(|g| g.id);
        let Some(id) = next else { break };
        let side = if rng.gen_bool(0.5) { Side::A } else { Side::B };
        t.set_score(id, Score::walkover(side)).unwrap();
    }
}

fn assert_no_pair_twice_in_a_round(t: &Tournament) {
    for round in &t.rounds {
        let ids = round.pair_ids();
        let unique: HashSet<PairId> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len(), "{} holds a pair twice", round.stage);
    }
}

#[test]
fn qualifying_tournament_layout() {
    let config = TournamentConfig::qualif_ko(64, 16, 32, 16, 0);
    let mut rng = StdRng::seed_from_u64(64);
    let t = setup_and_populate_tournament(config, pairs(40, 16), &mut rng).unwrap();

    let stages: Vec<Stage> = t.rounds.iter().map(|r| r.stage).collect();
    assert_eq!(
        stages,
        vec![
            Stage::Q1,
            Stage::R64,
            Stage::R32,
            Stage::R16,
            Stage::Quarters,
            Stage::Semis,
            Stage::Final
        ]
    );
    assert_eq!(count(&t, Stage::R64, |e| e.is_qualifier()), 16);
    assert_eq!(count(&t, Stage::R64, |e| e.is_bye()), 24);
    assert_eq!(count(&t, Stage::R64, |e| e.pair_id().is_some()), 24);
    assert_eq!(count(&t, Stage::Q1, |e| e.is_bye()), 16);
    assert_eq!(t.qualifier_slots.len(), 16);

    let r64 = t.round(Stage::R64).unwrap();
    for seeded in t.pairs.iter().filter(|p| p.is_seeded()) {
        let slot = r64.find_slot(Entrant::Pair(seeded.id)).unwrap();
        assert_eq!(r64.slot(slot ^ 1), Some(Entrant::Bye), "seed {} has an opponent", seeded.seed);
    }
    assert_no_pair_twice_in_a_round(&t);
}

#[test]
fn bye_decided_qualifying_fills_every_placeholder() {
    let config = TournamentConfig::qualif_ko(64, 16, 32, 16, 0);
    let mut rng = StdRng::seed_from_u64(65);
    let mut t = setup_and_populate_tournament(config, pairs(40, 16), &mut rng).unwrap();
    propagate_winners(&mut t);
    assert_eq!(count(&t, Stage::R64, |e| e.is_qualifier()), 0);
    assert_eq!(count(&t, Stage::R64, |e| e.pair_id().is_some()), 40);
}

#[test]
fn weakest_pairs_play_qualifying() {
    let config = TournamentConfig::qualif_ko(8, 0, 8, 2, 0);
    let entrants = pairs(14, 0);
    let split = split_entrants(&config, &entrants);
    assert_eq!(split.len(), 2);
    let qualifying: Vec<PairId> = split[0].iter().map(|p| p.id).collect();
    let direct: Vec<PairId> = split[1].iter().map(|p| p.id).collect();
    assert_eq!(qualifying, entrants[6..].iter().map(|p| p.id).collect::<Vec<_>>());
    assert_eq!(direct, entrants[..6].iter().map(|p| p.id).collect::<Vec<_>>());
}

struct Qualifying {
    t: Tournament,
    ids: Vec<PairId>,
}

/// Main draw of 8 with 2 qualifiers (slots 0 and 1) fed by a qualifying draw of 8.
fn manual_qualifying() -> Qualifying {
    let config = TournamentConfig::qualif_ko(8, 0, 8, 2, 0).with_draw_mode(DrawMode::Manual);
    let entrants = pairs(14, 0);
    let ids = entrants.iter().map(|p| p.id).collect();
    let mut rng = StdRng::seed_from_u64(0);
    let t = setup_and_populate_tournament(config, entrants, &mut rng).unwrap();
    Qualifying { t, ids }
}

fn game(t: &Tournament, stage: Stage, index: usize) -> GameId {
    t.round(stage).unwrap().games[index].id
}

/// Side A wins every first-round qualifying game.
fn win_first_round(t: &mut Tournament) {
    for i in 0..4 {
        let id = game(t, Stage::Q1, i);
        update_score(t, id, Some(Score::sets(&[(6, 4), (6, 4)]))).unwrap();
    }
}

#[test]
fn qualifier_placeholders_are_numbered_by_slot() {
    let Qualifying { t, ids } = manual_qualifying();
    assert_eq!(t.qualifier_slots, vec![0, 1]);
    let r8 = t.round(Stage::Quarters).unwrap();
    assert_eq!(r8.slot(0), Some(Entrant::Qualifier(1)));
    assert_eq!(r8.slot(1), Some(Entrant::Qualifier(2)));
    assert_eq!(r8.slot(2), Some(Entrant::Pair(ids[0])));
    let q1 = t.round(Stage::Q1).unwrap();
    assert_eq!(q1.slot(0), Some(Entrant::Pair(ids[6])));
}

#[test]
fn qualifying_winner_takes_its_ordinal_slot() {
    let Qualifying { mut t, ids } = manual_qualifying();
    win_first_round(&mut t);
    let q2 = game(&t, Stage::Q2, 0);
    update_score(&mut t, q2, Some(Score::sets(&[(6, 4), (6, 4)]))).unwrap();

    let r8 = t.round(Stage::Quarters).unwrap();
    assert_eq!(r8.slot(0), Some(Entrant::Pair(ids[6])));
    assert_eq!(r8.slot(1), Some(Entrant::Qualifier(2)));
}

#[test]
fn changed_qualifying_result_replaces_in_place() {
    let Qualifying { mut t, ids } = manual_qualifying();
    win_first_round(&mut t);
    let q2 = game(&t, Stage::Q2, 0);
    update_score(&mut t, q2, Some(Score::sets(&[(6, 4), (6, 4)]))).unwrap();
    update_score(&mut t, q2, Some(Score::sets(&[(4, 6), (4, 6)]))).unwrap();

    let r8 = t.round(Stage::Quarters).unwrap();
    assert_eq!(r8.slot(0), Some(Entrant::Pair(ids[8])));
    assert!(r8.find_slot(Entrant::Pair(ids[6])).is_none());

    update_score(&mut t, q2, None).unwrap();
    let r8 = t.round(Stage::Quarters).unwrap();
    assert_eq!(r8.slot(0), Some(Entrant::Qualifier(1)));
}

#[test]
fn qualifier_order_does_not_depend_on_play_order() {
    let Qualifying { mut t, ids } = manual_qualifying();
    // Second qualifying final first.
    for i in [3, 2] {
        let id = game(&t, Stage::Q1, i);
        update_score(&mut t, id, Some(Score::walkover(Side::B))).unwrap();
    }
    let id = game(&t, Stage::Q2, 1);
    update_score(&mut t, id, Some(Score::walkover(Side::A))).unwrap();
    let r8 = t.round(Stage::Quarters).unwrap();
    assert_eq!(r8.slot(0), Some(Entrant::Qualifier(1)));
    assert_eq!(r8.slot(1), Some(Entrant::Pair(ids[11])));
}

#[test]
fn invalid_configuration_reports_every_problem() {
    let config = TournamentConfig::qualif_ko(12, 0, 8, 6, 0);
    let errors = validate(&config);
    assert!(errors.len() >= 2, "{errors:?}");

    let mut rng = StdRng::seed_from_u64(1);
    match setup_and_populate_tournament(config, pairs(8, 0), &mut rng) {
        Err(DrawError::InvalidConfig(reported)) => assert!(reported.len() >= errors.len()),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn qualifier_overflow_is_reported_once() {
    let errors = validate(&TournamentConfig::qualif_ko(16, 0, 4, 4, 0));
    assert_eq!(errors.len(), 1, "{errors:?}");
}

#[test]
fn entrants_have_display_names() {
    let Qualifying { t, ids } = manual_qualifying();
    assert_eq!(t.entrant_name(Entrant::Pair(ids[0])), "A0 / B0");
    assert_eq!(t.entrant_name(Entrant::Bye), "BYE");
    assert_eq!(t.entrant_name(Entrant::Qualifier(2)), "Q2");
}

#[test]
fn too_many_pairs_for_the_draw() {
    let mut rng = StdRng::seed_from_u64(1);
    let result = setup_and_populate_tournament(TournamentConfig::knockout(8, 2), pairs(9, 2), &mut rng);
    assert!(matches!(result, Err(DrawError::InvalidConfig(_))));
}

#[test]
fn duplicate_pair_is_rejected() {
    let mut entrants = pairs(4, 0);
    entrants.push(entrants[1].clone());
    let dup = entrants[1].id;
    let mut rng = StdRng::seed_from_u64(1);
    let result = setup_and_populate_tournament(TournamentConfig::knockout(8, 0), entrants, &mut rng);
    assert_eq!(result.err(), Some(DrawError::DuplicatePair(dup)));
}

#[test]
fn setup_leaves_later_rounds_empty() {
    let mut rng = StdRng::seed_from_u64(2);
    let t = setup_and_populate_tournament(TournamentConfig::knockout(16, 4), pairs(12, 4), &mut rng)
        .unwrap();
    assert_eq!(t.round(Stage::R16).unwrap().empty_slots().len(), 0);
    assert_eq!(t.round(Stage::Quarters).unwrap().empty_slots().len(), 8);
}

#[test]
fn random_play_reaches_a_champion_without_duplicates() {
    let mut rng = StdRng::seed_from_u64(40);
    for config in [
        TournamentConfig::knockout(32, 8),
        TournamentConfig::qualif_ko(64, 16, 32, 16, 0),
        TournamentConfig::qualif_ko(16, 4, 16, 4, 2),
        TournamentConfig::groups_ko(4, 4, 2, 4),
    ] {
        let nb = match config.format {
            TournamentFormat::Knockout => 27,
            TournamentFormat::QualifKo => {
                config.main_draw_size - config.nb_qualifiers + config.pre_qual_draw_size / 2
            }
            TournamentFormat::GroupsKo => 15,
        };
        let mut t = setup_and_populate_tournament(config, pairs(nb, 4), &mut rng).unwrap();
        play_out(&mut t, &mut rng);
        assert_no_pair_twice_in_a_round(&t);
        assert!(t.champion().is_some(), "{:?} ended without a champion", t.config.format);
    }
}
