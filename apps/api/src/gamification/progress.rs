use serde::{Deserialize, Serialize};

use crate::gamification::achievements::{unlocked_achievements, Achievement};
use crate::gamification::levels::Level;
use crate::gamification::{Evaluation, ScoreInput, ScoringRules};
use crate::profile::characters::{CharacterName, ALL_COMPLETE_MESSAGE};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Celebration {
    pub character: CharacterName,
    pub message: String,
}

/// What changed between two snapshots of the same profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressDelta {
    pub completed_characters: Vec<Celebration>,
    pub all_complete_message: Option<String>,
    pub new_achievements: Vec<Achievement>,
    pub xp_gained: i64,
    pub level_up: Option<Level>,
    pub completion_delta: i16,
}

/// Compares two snapshots and reports what the user just earned.
///
/// Optional characters are complete from the start and never celebrated.
pub fn diff_progress(
    rules: &ScoringRules,
    previous: &ScoreInput,
    current: &ScoreInput,
) -> ProgressDelta {
    let before = Evaluation::new(rules, previous);
    let after = Evaluation::new(rules, current);

    let completed_characters = rules
        .characters
        .iter()
        .zip(before.completions.iter().zip(&after.completions))
        .filter(|(character, (was, now))| {
            !character.is_optional() && !was.is_complete && now.is_complete
        })
        .map(|(character, _)| Celebration {
            character: character.name,
            message: character.completion_message.clone(),
        })
        .collect();

    let all_complete_message =
        (before.overall < 100 && after.overall == 100).then(|| ALL_COMPLETE_MESSAGE.to_string());

    let already: Vec<String> = unlocked_achievements(&before)
        .into_iter()
        .map(|a| a.id)
        .collect();
    let new_achievements = unlocked_achievements(&after)
        .into_iter()
        .filter(|a| !already.contains(&a.id))
        .collect();

    let level_before = before.level();
    let level_after = after.level();
    let level_up = (level_after.level > level_before.level).then(|| level_after.clone());

    ProgressDelta {
        completed_characters,
        all_complete_message,
        new_achievements,
        xp_gained: i64::from(after.xp().total) - i64::from(before.xp().total),
        level_up,
        completion_delta: i16::from(after.overall) - i16::from(before.overall),
    }
}
