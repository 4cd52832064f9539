//! # Option Shuffling
//!
//! Cosmetic reordering of answer options, applied once when a catalog is
//! loaded. The engine never shuffles; it shows options in catalog order.
//!
//! A fixed seed gives a reproducible order (`StdRng::seed_from_u64`), which
//! is what tests and demos use.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use stagegate_core::{CatalogError, StageCatalog};

/// Draw a fresh seed for a session that did not configure one.
#[must_use]
pub fn draw_seed() -> u64 {
    rand::random()
}

/// Shuffle the options of every question with a seeded generator.
///
/// Questions are visited in catalog order, so the same seed always yields
/// the same layout for the same catalog.
pub fn shuffle_options(catalog: StageCatalog, seed: u64) -> Result<StageCatalog, CatalogError> {
    let mut rng = StdRng::seed_from_u64(seed);
    catalog.map_questions(|mut question| {
        question.options.shuffle(&mut rng);
        question
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSource;
    use std::collections::BTreeSet;

    fn options_of(catalog: &StageCatalog) -> Vec<Vec<String>> {
        catalog
            .iter()
            .flat_map(|stage| stage.questions.iter().map(|q| q.options.clone()))
            .collect()
    }

    #[test]
    fn same_seed_same_order() {
        let catalog = CatalogSource::Builtin.load().expect("catalog");
        let first = shuffle_options(catalog.clone(), 42).expect("shuffle");
        let second = shuffle_options(catalog, 42).expect("shuffle");
        assert_eq!(options_of(&first), options_of(&second));
    }

    #[test]
    fn shuffling_keeps_every_option() {
        let catalog = CatalogSource::Builtin.load().expect("catalog");
        let shuffled = shuffle_options(catalog.clone(), draw_seed()).expect("shuffle");

        for (before, after) in options_of(&catalog).iter().zip(options_of(&shuffled).iter()) {
            let before: BTreeSet<_> = before.iter().collect();
            let after: BTreeSet<_> = after.iter().collect();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn shuffling_keeps_questions_and_answers() {
        let catalog = CatalogSource::Builtin.load().expect("catalog");
        let shuffled = shuffle_options(catalog.clone(), 7).expect("shuffle");

        for (a, b) in catalog.iter().zip(shuffled.iter()) {
            assert_eq!(a.id, b.id);
            for (qa, qb) in a.questions.iter().zip(b.questions.iter()) {
                assert_eq!(qa.id, qb.id);
                assert_eq!(qa.correct_answer, qb.correct_answer);
            }
        }
    }
}
