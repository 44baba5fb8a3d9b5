//! Axum route handlers for XP, levels, achievements and full profile reports.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gamification::achievements::{
    group_by_rarity, partition_achievements, Achievement, AchievementPartition, Rarity,
};
use crate::gamification::levels::{Level, XpProgress};
use crate::gamification::progress::{diff_progress, ProgressDelta};
use crate::gamification::xp::XpBreakdown;
use crate::gamification::{build_report, Evaluation, ProfileReport, ScoreInput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LevelResponse {
    pub xp: u32,
    pub level: Level,
    pub progress: XpProgress,
}

#[derive(Debug, Serialize)]
pub struct RarityGroup {
    pub rarity: Rarity,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub previous: ScoreInput,
    pub current: ScoreInput,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/levels
pub async fn handle_list_levels(State(state): State<AppState>) -> Json<Vec<Level>> {
    Json(state.rules.levels.levels().to_vec())
}

/// GET /api/v1/levels/:xp
pub async fn handle_level_for_xp(
    State(state): State<AppState>,
    Path(xp): Path<u32>,
) -> Json<LevelResponse> {
    Json(LevelResponse {
        xp,
        level: state.rules.level_for(xp).clone(),
        progress: state.rules.xp_progress(xp),
    })
}

/// GET /api/v1/achievements
///
/// Full catalog, rarest group first.
pub async fn handle_list_achievements(State(state): State<AppState>) -> Json<Vec<RarityGroup>> {
    let groups = group_by_rarity(&state.rules.achievements)
        .into_iter()
        .map(|(rarity, achievements)| RarityGroup {
            rarity,
            achievements,
        })
        .collect();
    Json(groups)
}

/// POST /api/v1/profile/report
pub async fn handle_report(
    State(state): State<AppState>,
    Json(input): Json<ScoreInput>,
) -> Json<ProfileReport> {
    let report = build_report(&state.rules, &input);
    debug!(
        overall = report.overall_completion,
        xp = report.xp.total,
        level = report.level.level,
        unlocked = report.achievements.unlocked.len(),
        "Built profile report"
    );
    Json(report)
}

/// POST /api/v1/profile/xp
pub async fn handle_xp(
    State(state): State<AppState>,
    Json(input): Json<ScoreInput>,
) -> Json<XpBreakdown> {
    let eval = Evaluation::new(&state.rules, &input);
    let xp = eval.xp().clone();
    debug!(xp = xp.total, lines = xp.breakdown.len(), "Calculated XP");
    Json(xp)
}

/// POST /api/v1/profile/achievements
pub async fn handle_achievements(
    State(state): State<AppState>,
    Json(input): Json<ScoreInput>,
) -> Json<AchievementPartition> {
    let eval = Evaluation::new(&state.rules, &input);
    let partition = partition_achievements(&eval);
    debug!(
        unlocked = partition.unlocked.len(),
        locked = partition.locked.len(),
        "Partitioned achievements"
    );
    Json(partition)
}

/// POST /api/v1/profile/progress
///
/// Diffs two snapshots so the client knows what to celebrate.
pub async fn handle_progress(
    State(state): State<AppState>,
    Json(req): Json<ProgressRequest>,
) -> Json<ProgressDelta> {
    let delta = diff_progress(&state.rules, &req.previous, &req.current);
    debug!(
        xp_gained = delta.xp_gained,
        completed = delta.completed_characters.len(),
        "Computed progress delta"
    );
    Json(delta)
}
