use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::config::{validate_api_key, MatcherConfig};
use crate::models::{MatcherConfigUpdate, MessageResponse, SetApiKeyRequest};
use crate::state::AppState;

/// Matcher config response with API key redacted
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct MatcherConfigResponse {
    pub model: String,
    pub base_url: String,
    pub use_fallback: bool,
    pub random_seed: u64,
    pub timeout_secs: u64,
    pub has_api_key: bool,
}

impl From<&MatcherConfig> for MatcherConfigResponse {
    fn from(config: &MatcherConfig) -> Self {
        Self {
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            use_fallback: config.use_fallback,
            random_seed: config.random_seed,
            timeout_secs: config.timeout_secs,
            has_api_key: config.has_api_key(),
        }
    }
}

/// GET /api/config - Current matcher config (API key redacted)
pub async fn get_config(State(state): State<AppState>) -> Json<MatcherConfigResponse> {
    let config = state.matcher.read();
    Json(MatcherConfigResponse::from(&*config))
}

/// PUT /api/config - Update model, fallback flag or API key
pub async fn update_config(
    State(state): State<AppState>,
    payload: Result<Json<MatcherConfigUpdate>, JsonRejection>,
) -> Result<Json<MatcherConfigResponse>, ApiError> {
    let Json(update) = payload?;
    // Validate before taking the lock so a bad key leaves everything unchanged
    let api_key = update.api_key.as_deref().map(validate_api_key).transpose()?;

    let mut config = state.matcher.write();
    if let Some(model) = update.model {
        config.model = model;
    }
    if let Some(use_fallback) = update.use_fallback {
        config.use_fallback = use_fallback;
    }
    if let Some(api_key) = api_key {
        config.api_key = Some(api_key);
    }

    tracing::info!(
        "Matcher config updated: model={}, use_fallback={}",
        config.model,
        config.use_fallback
    );
    Ok(Json(MatcherConfigResponse::from(&*config)))
}

/// POST /api/set-api-key - Replace the API key
pub async fn set_api_key(
    State(state): State<AppState>,
    payload: Result<Json<SetApiKeyRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    let api_key = req
        .api_key
        .ok_or_else(|| ApiError::BadRequest("API key required".to_string()))?;
    let api_key = validate_api_key(&api_key)?;

    state.matcher.write().api_key = Some(api_key);
    tracing::info!("API key updated");

    Ok(Json(MessageResponse {
        message: "API key set successfully".to_string(),
    }))
}
