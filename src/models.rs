use serde::{Deserialize, Serialize};

/// A previously submitted idea. `username` is the identity used to join
/// model output back to the stored text; it is not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaRecord {
    pub username: String,
    pub idea: String,
}

impl IdeaRecord {
    pub fn new(username: impl Into<String>, idea: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            idea: idea.into(),
        }
    }
}

/// On-disk layout of the idea store, also returned by `GET /api/ideas`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdeaStore {
    pub ideas: Vec<IdeaRecord>,
}

/// A stored idea together with its similarity to the new idea (0-100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingResult {
    pub username: String,
    pub idea: String,
    pub similarity: u32,
}

/// Which path produced a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub source: RankingSource,
    pub rankings: Vec<RankingResult>,
}

/// Match request. `new_idea` is optional so a missing field is reported
/// with our own message instead of an extractor rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub new_idea: Option<String>,
}

/// Match response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub new_idea: String,
    pub rankings: Vec<RankingResult>,
    pub source: RankingSource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetApiKeyRequest {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Matcher config update request
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfigUpdate {
    // base_url intentionally omitted: immutable at runtime so the key
    // cannot be redirected to another host
    pub model: Option<String>,
    pub use_fallback: Option<bool>,
    pub api_key: Option<String>,
}
