//! CSV import of registered pairs: `player1,player2[,seed]` with a header row.

use crate::models::{DrawError, DrawResult, PlayerPair};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct PairRecord {
    player1: String,
    player2: String,
    #[serde(default)]
    seed: Option<u32>,
}

/// Parse pairs from CSV. Rows keep their order, which is the strength order used for
/// unseeded pairs.
pub fn read_pairs_csv<R: Read>(reader: R) -> DrawResult<Vec<PlayerPair>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut pairs = Vec::new();
    for (i, record) in rdr.deserialize::<PairRecord>().enumerate() {
        // Row 1 is the header.
        let row = i + 2;
        let record = record.map_err(|e| DrawError::Import(format!("row {}: {}", row, e)))?;
        if record.player1.is_empty() || record.player2.is_empty() {
            return Err(DrawError::Import(format!("row {}: both player names are required", row)));
        }
        pairs.push(PlayerPair::new(record.player1, record.player2).with_seed(record.seed.unwrap_or(0)));
    }
    Ok(pairs)
}
