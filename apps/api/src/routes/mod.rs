pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::route_not_found;
use crate::gamification::handlers as gamification;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Registry & static tables
        .route("/api/v1/characters", get(profile::handle_list_characters))
        .route(
            "/api/v1/characters/:name/dialogue",
            get(profile::handle_dialogue),
        )
        .route("/api/v1/levels", get(gamification::handle_list_levels))
        .route("/api/v1/levels/:xp", get(gamification::handle_level_for_xp))
        .route(
            "/api/v1/achievements",
            get(gamification::handle_list_achievements),
        )
        // Scoring
        .route("/api/v1/profile/report", post(gamification::handle_report))
        .route(
            "/api/v1/profile/completion",
            post(profile::handle_completion),
        )
        .route("/api/v1/profile/xp", post(gamification::handle_xp))
        .route(
            "/api/v1/profile/achievements",
            post(gamification::handle_achievements),
        )
        .route(
            "/api/v1/profile/progress",
            post(gamification::handle_progress),
        )
        .fallback(route_not_found)
        .with_state(state)
}
