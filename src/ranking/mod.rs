//! Ranking service: one remote ranking attempt with a seeded fallback.
//!
//! ```text
//!   records + new idea
//!          │
//!          ├── no API key ───────────────┐
//!          ▼                             │
//!   build prompt → chat completion       │
//!          │                             │
//!          ├── call/parse failure ──────►├── use_fallback? ── no ──► RankError
//!          ▼                             ▼
//!   join to records (model order)   seeded scores, sorted
//!          │                             │
//!          ▼                             ▼
//!   Ranking { source: Remote }      Ranking { source: Fallback }
//! ```

pub mod error;
pub mod fallback;

pub use error::RankError;

use crate::config::MatcherConfig;
use crate::llm::chat;
use crate::llm::prompt::{build_ranking_prompt, parse_ranking_response};
use crate::models::{IdeaRecord, Ranking, RankingResult, RankingSource};

/// Rank `records` by similarity to `new_idea`.
///
/// Makes at most one remote call. Whether the result came from the model or
/// from the fallback generator is reported in [`Ranking::source`].
pub async fn rank_ideas(
    client: &reqwest::Client,
    config: &MatcherConfig,
    records: &[IdeaRecord],
    new_idea: &str,
) -> Result<Ranking, RankError> {
    if records.is_empty() {
        return Err(RankError::EmptyInput);
    }

    if !config.has_api_key() {
        if config.use_fallback {
            tracing::warn!("No API key configured, using fallback rankings");
            return Ok(fallback_ranking(records, config));
        }
        return Err(RankError::MissingCredential);
    }

    match remote_rankings(client, config, records, new_idea).await {
        Ok(rankings) => {
            tracing::info!(
                "Remote ranking returned {} of {} ideas",
                rankings.len(),
                records.len()
            );
            Ok(Ranking {
                source: RankingSource::Remote,
                rankings,
            })
        }
        Err(e) if config.use_fallback => {
            tracing::warn!("Remote ranking failed, using fallback rankings: {e}");
            Ok(fallback_ranking(records, config))
        }
        Err(e) => Err(e),
    }
}

async fn remote_rankings(
    client: &reqwest::Client,
    config: &MatcherConfig,
    records: &[IdeaRecord],
    new_idea: &str,
) -> Result<Vec<RankingResult>, RankError> {
    let prompt = build_ranking_prompt(records, new_idea);
    let content = chat::complete(client, config, &prompt)
        .await
        .map_err(|e| RankError::RemoteCallFailed(format!("{e:#}")))?;
    parse_ranking_response(&content, records)
}

fn fallback_ranking(records: &[IdeaRecord], config: &MatcherConfig) -> Ranking {
    Ranking {
        source: RankingSource::Fallback,
        rankings: fallback::fallback_rankings(records, config.random_seed),
    }
}
