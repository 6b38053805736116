//! Configuration diagnostics: every problem is collected so a caller can report them at once.

use crate::logic::phase::Phase;
use crate::models::{TournamentConfig, TournamentFormat};

/// All problems with a configuration; empty when it can be built.
pub fn validate(config: &TournamentConfig) -> Vec<String> {
    let mut errors: Vec<String> = Phase::for_config(config)
        .iter()
        .flat_map(Phase::validate)
        .collect();
    errors.dedup();
    errors
}

/// Problems with registering `nb_pairs` pairs into a configuration.
pub fn validate_entries(config: &TournamentConfig, nb_pairs: usize) -> Vec<String> {
    let mut errors = Vec::new();
    if nb_pairs < 2 {
        errors.push(format!("At least 2 pairs are needed, {} registered", nb_pairs));
    }
    match config.format {
        TournamentFormat::Knockout => {
            if nb_pairs > config.main_draw_size {
                errors.push(format!(
                    "{} pairs do not fit in a main draw of {}",
                    nb_pairs, config.main_draw_size
                ));
            }
        }
        TournamentFormat::QualifKo => {
            let capacity = config
                .main_draw_size
                .saturating_sub(config.nb_qualifiers)
                .saturating_add(config.pre_qual_draw_size);
            if nb_pairs > capacity {
                errors.push(format!(
                    "{} pairs exceed the {} places of the main and qualifying draws",
                    nb_pairs, capacity
                ));
            }
            let minimum = config.pre_qual_draw_size / 2;
            if nb_pairs < minimum {
                errors.push(format!(
                    "A qualifying draw of {} needs at least {} pairs, {} registered",
                    config.pre_qual_draw_size, minimum, nb_pairs
                ));
            }
        }
        TournamentFormat::GroupsKo => {
            let capacity = config.nb_pools.saturating_mul(config.nb_pairs_per_pool);
            if nb_pairs > capacity {
                errors.push(format!("{} pairs exceed the {} pool places", nb_pairs, capacity));
            }
            let minimum = config.nb_pools.saturating_mul(config.nb_qualified_by_pool);
            if nb_pairs < minimum {
                errors.push(format!(
                    "{} pools with {} qualified each need at least {} pairs, {} registered",
                    config.nb_pools, config.nb_qualified_by_pool, minimum, nb_pairs
                ));
            }
        }
    }
    errors
}
