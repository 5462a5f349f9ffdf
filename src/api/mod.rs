pub mod config;
pub mod error;
pub mod ideas;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// All JSON routes, bound to `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ideas", get(ideas::list_ideas))
        .route("/api/match", post(ideas::match_ideas))
        .route("/api/set-api-key", post(config::set_api_key))
        .route("/api/config", get(config::get_config).put(config::update_config))
        .with_state(state)
}
