//! Prompt and reply schema for similarity ranking.
//!
//! The prompt asks the model for exactly this shape, and the reply is
//! validated against it:
//!
//! ```text
//! [
//!   {"username": "<stored identity>", "similarity": <0-100>},
//!   ...
//! ]
//! ```
//!
//! Entries are expected highest similarity first. The reply may be wrapped in
//! a markdown code fence.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use crate::models::{IdeaRecord, RankingResult};
use crate::ranking::RankError;

/// One element of the model's reply.
#[derive(Debug, Deserialize)]
struct ModelRanking {
    username: String,
    similarity: f64,
}

/// Build the ranking prompt listing every stored idea as `"{n}. {username}: {idea}"`.
pub fn build_ranking_prompt(records: &[IdeaRecord], new_idea: &str) -> String {
    let count = records.len();
    let mut listing = String::new();
    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(listing, "{}. {}: {}", i + 1, record.username, record.idea);
    }

    format!(
        "You compare hackathon ideas and judge how similar they are.\n\n\
         Existing ideas ({count}):\n{listing}\n\
         New idea: \"{new_idea}\"\n\n\
         Rate how similar each of the {count} existing ideas is to the new idea, \
         taking into account:\n\
         - the problem domain\n\
         - overlap in technology stack\n\
         - the target audience\n\
         - the implementation approach\n\
         - how related the overall concept is\n\n\
         Give every existing idea a similarity from 0 to 100 and reply with ONLY a JSON \
         array in this format, highest similarity first:\n\n\
         [\n  {{\"username\": \"username1\", \"similarity\": 85}},\n  \
         {{\"username\": \"username2\", \"similarity\": 72}}\n]\n\n\
         Include each of the {count} usernames exactly once. No explanation, no other text."
    )
}

/// Remove an optional markdown code fence around the reply.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut content = raw.trim();
    if let Some(rest) = content.strip_prefix("```json") {
        content = rest;
    } else if let Some(rest) = content.strip_prefix("```") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("```") {
        content = rest;
    }
    content.trim()
}

/// Parse the model's reply and join it back to the stored ideas.
///
/// Keeps the model's order. Usernames that are not in `records` are dropped,
/// as are repeats of a username already ranked. When a username is stored
/// more than once the last stored idea is used.
pub fn parse_ranking_response(
    raw: &str,
    records: &[IdeaRecord],
) -> Result<Vec<RankingResult>, RankError> {
    let content = strip_code_fence(raw);
    let rankings: Vec<ModelRanking> = serde_json::from_str(content)
        .map_err(|e| RankError::ResponseParseFailed(format!("invalid ranking JSON: {e}")))?;

    let ideas_by_user: HashMap<&str, &str> = records
        .iter()
        .map(|r| (r.username.as_str(), r.idea.as_str()))
        .collect();

    let mut seen = HashSet::new();
    let mut results = Vec::with_capacity(rankings.len());
    for ranking in rankings {
        let Some(idea) = ideas_by_user.get(ranking.username.as_str()) else {
            tracing::debug!("Dropping ranking for unknown username '{}'", ranking.username);
            continue;
        };
        let similarity = validate_similarity(&ranking)?;
        if !seen.insert(ranking.username.clone()) {
            tracing::debug!("Dropping repeated ranking for '{}'", ranking.username);
            continue;
        }
        results.push(RankingResult {
            username: ranking.username,
            idea: idea.to_string(),
            similarity,
        });
    }

    Ok(results)
}

fn validate_similarity(ranking: &ModelRanking) -> Result<u32, RankError> {
    let value = ranking.similarity;
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(RankError::ResponseParseFailed(format!(
            "similarity for '{}' out of range: {value}",
            ranking.username
        )));
    }
    Ok(value.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice_and_bob() -> Vec<IdeaRecord> {
        vec![
            IdeaRecord::new("alice", "AI-powered fitness tracker"),
            IdeaRecord::new("bob", "Blockchain voting system"),
        ]
    }

    #[test]
    fn test_prompt_lists_every_record_in_order() {
        let prompt = build_ranking_prompt(&alice_and_bob(), "Nutrition app");
        let alice = prompt.find("1. alice: AI-powered fitness tracker\n").unwrap();
        let bob = prompt.find("2. bob: Blockchain voting system\n").unwrap();
        assert!(alice < bob);
        assert!(prompt.contains("New idea: \"Nutrition app\""));
        assert!(prompt.contains("\"similarity\""));
        assert!(prompt.contains("Existing ideas (2)"));
    }

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("  ```\n[1]\n```  "), "[1]");
        assert_eq!(strip_code_fence("[1]"), "[1]");
        assert_eq!(strip_code_fence("[1]\n```"), "[1]");
    }

    #[test]
    fn test_parse_fenced_reply_drops_missing_usernames() {
        let raw = "```json\n[{\"username\":\"alice\",\"similarity\":85}]\n```";
        let results = parse_ranking_response(raw, &alice_and_bob()).unwrap();
        assert_eq!(
            results,
            vec![RankingResult {
                username: "alice".to_string(),
                idea: "AI-powered fitness tracker".to_string(),
                similarity: 85,
            }]
        );
    }

    #[test]
    fn test_parse_keeps_model_order() {
        let raw = r#"[{"username":"bob","similarity":10},{"username":"alice","similarity":90}]"#;
        let results = parse_ranking_response(raw, &alice_and_bob()).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, ["bob", "alice"]);
    }

    #[test]
    fn test_parse_drops_unknown_usernames() {
        let raw = r#"[{"username":"mallory","similarity":99},{"username":"bob","similarity":40}]"#;
        let results = parse_ranking_response(raw, &alice_and_bob()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].username, "bob");
    }

    #[test]
    fn test_parse_duplicate_identity_uses_last_stored_idea() {
        let records = vec![IdeaRecord::new("a", "first"), IdeaRecord::new("a", "second")];
        let results = parse_ranking_response(r#"[{"username":"a","similarity":50}]"#, &records).unwrap();
        assert_eq!(results[0].idea, "second");
    }

    #[test]
    fn test_parse_keeps_first_of_repeated_usernames() {
        let raw = r#"[{"username":"bob","similarity":70},{"username":"bob","similarity":20}]"#;
        let results = parse_ranking_response(raw, &alice_and_bob()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].similarity, 70);
    }

    #[test]
    fn test_parse_ignores_score_of_unknown_username() {
        let raw = r#"[{"username":"alice","similarity":80},{"username":"ghost","similarity":150}]"#;
        let results = parse_ranking_response(raw, &alice_and_bob()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].username, "alice");
        assert_eq!(results[0].similarity, 80);
    }

    #[test]
    fn test_parse_rounds_fractional_similarity() {
        let raw = r#"[{"username":"alice","similarity":72.6}]"#;
        let results = parse_ranking_response(raw, &alice_and_bob()).unwrap();
        assert_eq!(results[0].similarity, 73);
    }

    #[test]
    fn test_parse_invalid_json_is_an_error() {
        let err = parse_ranking_response("Sure! Here are the rankings.", &alice_and_bob()).unwrap_err();
        assert!(matches!(err, RankError::ResponseParseFailed(_)));
    }

    #[test]
    fn test_parse_missing_field_is_an_error() {
        let err = parse_ranking_response(r#"[{"username":"alice"}]"#, &alice_and_bob()).unwrap_err();
        assert!(matches!(err, RankError::ResponseParseFailed(ref m) if m.contains("similarity")));

        let err = parse_ranking_response(r#"[{"similarity":3}]"#, &alice_and_bob()).unwrap_err();
        assert!(matches!(err, RankError::ResponseParseFailed(ref m) if m.contains("username")));
    }

    #[test]
    fn test_parse_object_instead_of_array_is_an_error() {
        let err = parse_ranking_response(r#"{"username":"alice","similarity":1}"#, &alice_and_bob())
            .unwrap_err();
        assert!(matches!(err, RankError::ResponseParseFailed(_)));
    }

    #[test]
    fn test_parse_out_of_range_similarity_is_an_error() {
        let err = parse_ranking_response(r#"[{"username":"alice","similarity":140}]"#, &alice_and_bob())
            .unwrap_err();
        assert!(matches!(err, RankError::ResponseParseFailed(_)));

        let err = parse_ranking_response(r#"[{"username":"alice","similarity":-5}]"#, &alice_and_bob())
            .unwrap_err();
        assert!(matches!(err, RankError::ResponseParseFailed(_)));
    }

    #[test]
    fn test_parse_empty_array() {
        let results = parse_ranking_response("[]", &alice_and_bob()).unwrap();
        assert!(results.is_empty());
    }
}
