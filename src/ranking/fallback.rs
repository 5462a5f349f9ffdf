//! Seeded similarity scores for when the remote ranking is unavailable.
//!
//! The generator is reseeded on every call, so two requests with the same
//! number of stored ideas get the same score sequence. Tests rely on this.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::{IdeaRecord, RankingResult};

const MIN_SIMILARITY: u32 = 10;
const MAX_SIMILARITY: u32 = 95;

/// Score each record with one draw from `10..=95`, then sort highest first.
/// Ties keep input order.
pub fn fallback_rankings(records: &[IdeaRecord], seed: u64) -> Vec<RankingResult> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut results: Vec<RankingResult> = records
        .iter()
        .map(|record| RankingResult {
            username: record.username.clone(),
            idea: record.idea.clone(),
            similarity: rng.gen_range(MIN_SIMILARITY..=MAX_SIMILARITY),
        })
        .collect();

    // stable
    results.sort_by(|a, b| b.similarity.cmp(&a.similarity));
    results
}
