use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::profile::characters::{CharacterConfig, CharacterName, Requirement};
use crate::profile::models::{ProfileField, ProfileItems};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterCompletion {
    pub name: CharacterName,
    pub is_complete: bool,
    pub percent: u8,
    pub data: Map<String, Value>,
    pub missing: Vec<String>,
}

fn items_json(items: &ProfileItems, field: ProfileField) -> Value {
    serde_json::to_value(items.get(field)).unwrap_or(Value::Null)
}

fn shortfall(count: usize, noun: &str) -> String {
    let suffix = if count > 1 { "s" } else { "" };
    format!("{count} more {noun}{suffix}")
}

/// Scores one character against the current profile.
///
/// Optional characters (no requirements) are always 100% and only surface
/// whatever data exists for their fields.
pub fn evaluate_character(
    character: &CharacterConfig,
    items: &ProfileItems,
) -> CharacterCompletion {
    let mut data = Map::new();
    let mut missing = Vec::new();
    let mut satisfied = 0usize;

    for requirement in &character.requirements {
        match requirement {
            Requirement::MinCount { field, count } => {
                let have = items.count(*field);
                data.insert(field.to_string(), items_json(items, *field));
                data.insert(format!("{field}_count"), json!(have));
                if have >= *count {
                    satisfied += 1;
                } else {
                    missing.push(shortfall(count - have, field.noun()));
                }
            }
            Requirement::AtLeastOne { field } => match items.first_value(*field) {
                Some(value) => {
                    data.insert(field.to_string(), json!(value));
                    satisfied += 1;
                }
                None => missing.push(field.to_string()),
            },
        }
    }

    for field in &character.profile_fields {
        if !character.is_required(*field) && items.has(*field) {
            data.insert(field.to_string(), items_json(items, *field));
        }
    }

    let total = character.requirements.len();
    let percent = if total == 0 {
        100
    } else {
        ((satisfied as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
    };

    CharacterCompletion {
        name: character.name,
        is_complete: percent == 100,
        percent,
        data,
        missing,
    }
}

/// Scores every character, preserving registry order.
pub fn evaluate_all(
    characters: &[CharacterConfig],
    items: &ProfileItems,
) -> Vec<CharacterCompletion> {
    characters
        .iter()
        .map(|character| evaluate_character(character, items))
        .collect()
}

/// Weighted mean of per-character percentages, from already computed completions.
///
/// `completions` must be in the same order as `characters`.
pub fn weighted_completion(
    characters: &[CharacterConfig],
    completions: &[CharacterCompletion],
) -> u8 {
    let total_weight: u32 = characters.iter().map(|c| c.weight).sum();
    if total_weight == 0 {
        return 0;
    }
    let weighted_sum: f64 = characters
        .iter()
        .zip(completions)
        .map(|(character, completion)| {
            f64::from(completion.percent) / 100.0 * f64::from(character.weight)
        })
        .sum();
    ((weighted_sum / f64::from(total_weight)) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8
}

pub fn overall_completion(characters: &[CharacterConfig], items: &ProfileItems) -> u8 {
    weighted_completion(characters, &evaluate_all(characters, items))
}

/// First character, in registry order, that still has something missing.
pub fn next_incomplete_character<'a>(
    characters: &'a [CharacterConfig],
    items: &ProfileItems,
) -> Option<&'a CharacterConfig> {
    characters
        .iter()
        .find(|character| !evaluate_character(character, items).is_complete)
}
