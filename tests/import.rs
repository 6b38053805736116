//! Integration tests for CSV import of registered pairs.

use padel_draw_web::{read_pairs_csv, DrawError};

#[test]
fn reads_pairs_with_optional_seed() {
    let data = "player1,player2,seed\nAna, Bea ,1\nCarla,Dora,\nEva,Fay,2\n";
    let pairs = read_pairs_csv(data.as_bytes()).unwrap();
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0].name(), "Ana / Bea");
    assert_eq!(pairs[0].seed, 1);
    assert!(!pairs[1].is_seeded());
    assert_eq!(pairs[2].seed, 2);
}

#[test]
fn seed_column_may_be_absent() {
    let data = "player1,player2\nAna,Bea\nCarla,Dora\n";
    let pairs = read_pairs_csv(data.as_bytes()).unwrap();
    assert_eq!(pairs.len(), 2);
    assert!(pairs.iter().all(|p| !p.is_seeded()));
    assert_ne!(pairs[0].id, pairs[1].id);
}

#[test]
fn empty_player_name_is_rejected_with_its_row() {
    let data = "player1,player2,seed\nAna,Bea,\n ,Dora,\n";
    match read_pairs_csv(data.as_bytes()) {
        Err(DrawError::Import(msg)) => assert!(msg.starts_with("row 3"), "{msg}"),
        other => panic!("expected an import error, got {other:?}"),
    }
}

#[test]
fn malformed_seed_is_rejected() {
    let data = "player1,player2,seed\nAna,Bea,first\n";
    assert!(matches!(read_pairs_csv(data.as_bytes()), Err(DrawError::Import(_))));
}

#[test]
fn header_only_gives_no_pairs() {
    let pairs = read_pairs_csv("player1,player2,seed\n".as_bytes()).unwrap();
    assert!(pairs.is_empty());
}
