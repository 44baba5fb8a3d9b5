use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::gamification::{Evaluation, ScoreInput};
use crate::profile::characters::{CharacterConfig, CharacterName};
use crate::profile::completion::CharacterCompletion;
use crate::profile::models::ProfileItems;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub completions: Vec<CharacterCompletion>,
    pub overall_completion: u8,
    pub next_character: Option<CharacterName>,
}

#[derive(Debug, Deserialize)]
pub struct DialogueQuery {
    #[serde(default)]
    pub percent: u8,
    #[serde(default)]
    pub complete: bool,
}

#[derive(Debug, Serialize)]
pub struct DialogueResponse {
    pub character: CharacterName,
    pub line: String,
}

/// GET /api/v1/characters
pub async fn handle_list_characters(State(state): State<AppState>) -> Json<Vec<CharacterConfig>> {
    Json(state.rules.characters.clone())
}

/// GET /api/v1/characters/:name/dialogue
pub async fn handle_dialogue(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<DialogueQuery>,
) -> Result<Json<DialogueResponse>, AppError> {
    if query.percent > 100 {
        return Err(AppError::Validation(
            "percent must be between 0 and 100".to_string(),
        ));
    }
    let character = CharacterName::parse(&name)
        .and_then(|parsed| state.rules.character(parsed))
        .ok_or_else(|| AppError::NotFound(format!("Character '{name}' not found")))?;

    Ok(Json(DialogueResponse {
        character: character.name,
        line: character
            .dialogue_line(query.percent, query.complete)
            .to_string(),
    }))
}

/// POST /api/v1/profile/completion
pub async fn handle_completion(
    State(state): State<AppState>,
    Json(items): Json<ProfileItems>,
) -> Json<CompletionResponse> {
    let input = ScoreInput {
        items,
        ..ScoreInput::default()
    };
    let eval = Evaluation::new(&state.rules, &input);
    debug!(overall = eval.overall, "Evaluated profile completion");

    Json(CompletionResponse {
        next_character: eval.next_incomplete().map(|c| c.name),
        overall_completion: eval.overall,
        completions: eval.completions,
    })
}
