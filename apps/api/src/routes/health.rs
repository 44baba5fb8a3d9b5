use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and where the scoring rules came from.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let rules_source = match &state.config.scoring_rules_path {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "profile-api",
        "rules": rules_source
    }))
}
