use std::sync::Arc;

use crate::config::Config;
use crate::gamification::ScoringRules;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Scoring tables, loaded once at startup and read-only afterwards.
    pub rules: Arc<ScoringRules>,
}

impl AppState {
    pub fn new(config: Config, rules: ScoringRules) -> Self {
        Self {
            config,
            rules: Arc::new(rules),
        }
    }
}
