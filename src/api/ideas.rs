use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::models::{IdeaRecord, IdeaStore, MatchRequest, MatchResponse};
use crate::ranking::rank_ideas;
use crate::state::AppState;
use crate::storage::load_ideas;

fn stored_ideas(state: &AppState) -> Result<Vec<IdeaRecord>, ApiError> {
    load_ideas(&state.config.ideas_path).map_err(|e| ApiError::Storage(format!("{e:#}")))
}

/// GET /api/ideas - All stored ideas in store order
pub async fn list_ideas(State(state): State<AppState>) -> Result<Json<IdeaStore>, ApiError> {
    let ideas = stored_ideas(&state)?;
    Ok(Json(IdeaStore { ideas }))
}

/// POST /api/match - Rank stored ideas by similarity to `new_idea`
pub async fn match_ideas(
    State(state): State<AppState>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, ApiError> {
    let Json(req) = payload?;
    let new_idea = req
        .new_idea
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing required field: new_idea".to_string()))?;

    let ideas = stored_ideas(&state)?;
    if ideas.is_empty() {
        return Err(ApiError::BadRequest("No ideas found in database".to_string()));
    }

    let matcher = state.matcher_snapshot();
    let ranking = rank_ideas(&state.http_client, &matcher, &ideas, &new_idea).await?;

    Ok(Json(MatchResponse {
        new_idea,
        rankings: ranking.rankings,
        source: ranking.source,
    }))
}
