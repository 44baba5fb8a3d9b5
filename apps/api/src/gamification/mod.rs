//! Gamification layer on top of profile completion: XP, levels, achievements.
//!
//! All tuning tables live in [`ScoringRules`], built once at startup and handed
//! to every evaluator. An [`Evaluation`] derives completions, overall percent and
//! XP from a single [`ScoreInput`] so each is computed at most once per request.

pub mod achievements;
pub mod handlers;
pub mod levels;
pub mod progress;
pub mod xp;

use std::cell::OnceCell;
use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gamification::achievements::{
    default_achievements, partition_achievements, Achievement, AchievementPartition,
};
use crate::gamification::levels::{Level, LevelTable, XpProgress};
use crate::gamification::xp::{calculate_xp, default_xp_rules, Counter, XpBreakdown, XpRule};
use crate::profile::characters::{default_characters, CharacterConfig, CharacterName};
use crate::profile::completion::{evaluate_all, weighted_completion, CharacterCompletion};
use crate::profile::models::ProfileItems;

#[derive(Debug, Error, PartialEq)]
pub enum RulesError {
    #[error("level table is empty")]
    EmptyLevelTable,

    #[error("level {level} is out of order: thresholds and level numbers must ascend")]
    UnorderedLevels { level: u32 },

    #[error("character {0} is configured more than once")]
    DuplicateCharacter(CharacterName),

    #[error("character {0} is missing from the registry")]
    MissingCharacter(CharacterName),

    #[error("character {0} has a zero weight")]
    ZeroWeight(CharacterName),

    #[error("achievement id '{0}' is used more than once")]
    DuplicateAchievement(String),

    #[error("XP rules can award up to {max} XP, more than a u32 total can hold")]
    XpOverflow { max: u64 },
}

/// Every tunable table the scoring core reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringRules {
    pub characters: Vec<CharacterConfig>,
    pub xp_rules: Vec<XpRule>,
    pub levels: LevelTable,
    pub achievements: Vec<Achievement>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            characters: default_characters(),
            xp_rules: default_xp_rules(),
            levels: LevelTable::default(),
            achievements: default_achievements(),
        }
    }
}

impl ScoringRules {
    /// Loads a full rules document from JSON and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring rules from {}", path.display()))?;
        let rules: ScoringRules = serde_json::from_str(&raw)
            .with_context(|| format!("Scoring rules in {} are not valid JSON", path.display()))?;
        rules
            .validate()
            .with_context(|| format!("Scoring rules in {} are inconsistent", path.display()))?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        self.levels.validate()?;

        let mut seen = HashSet::new();
        for character in &self.characters {
            if !seen.insert(character.name) {
                return Err(RulesError::DuplicateCharacter(character.name));
            }
            if character.weight == 0 {
                return Err(RulesError::ZeroWeight(character.name));
            }
        }
        if let Some(missing) = CharacterName::ALL.into_iter().find(|name| !seen.contains(name)) {
            return Err(RulesError::MissingCharacter(missing));
        }

        // Lines must always add up to the total, so the total may never saturate.
        let scored = self.characters.iter().filter(|c| !c.is_optional()).count();
        let max = self
            .xp_rules
            .iter()
            .map(|rule| rule.max_award(scored))
            .fold(0u64, u64::saturating_add);
        if max > u64::from(u32::MAX) {
            return Err(RulesError::XpOverflow { max });
        }

        let mut ids = HashSet::new();
        for achievement in &self.achievements {
            if !ids.insert(achievement.id.as_str()) {
                return Err(RulesError::DuplicateAchievement(achievement.id.clone()));
            }
        }
        Ok(())
    }

    pub fn character(&self, name: CharacterName) -> Option<&CharacterConfig> {
        self.characters.iter().find(|c| c.name == name)
    }

    pub fn level_for(&self, xp: u32) -> &Level {
        self.levels.level_for(xp)
    }

    pub fn xp_progress(&self, xp: u32) -> XpProgress {
        self.levels.progress(xp)
    }
}

/// The full input of every scoring operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreInput {
    #[serde(default)]
    pub items: ProfileItems,
    #[serde(default)]
    pub saved_jobs_count: u32,
    #[serde(default)]
    pub assessments_count: u32,
}

impl ScoreInput {
    pub fn counter(&self, counter: Counter) -> u32 {
        match counter {
            Counter::SavedJobs => self.saved_jobs_count,
            Counter::Assessments => self.assessments_count,
        }
    }
}

/// One scoring pass over a [`ScoreInput`]. Derived values are computed on demand
/// and cached for the lifetime of the pass.
pub struct Evaluation<'a> {
    pub rules: &'a ScoringRules,
    pub input: &'a ScoreInput,
    pub completions: Vec<CharacterCompletion>,
    pub overall: u8,
    xp: OnceCell<XpBreakdown>,
}

impl<'a> Evaluation<'a> {
    pub fn new(rules: &'a ScoringRules, input: &'a ScoreInput) -> Self {
        let completions = evaluate_all(&rules.characters, &input.items);
        let overall = weighted_completion(&rules.characters, &completions);
        Self {
            rules,
            input,
            completions,
            overall,
            xp: OnceCell::new(),
        }
    }

    pub fn xp(&self) -> &XpBreakdown {
        self.xp.get_or_init(|| calculate_xp(self))
    }

    pub fn level(&self) -> &'a Level {
        self.rules.level_for(self.xp().total)
    }

    pub fn next_incomplete(&self) -> Option<&'a CharacterConfig> {
        self.rules
            .characters
            .iter()
            .zip(&self.completions)
            .find(|(_, completion)| !completion.is_complete)
            .map(|(character, _)| character)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileReport {
    pub completions: Vec<CharacterCompletion>,
    pub overall_completion: u8,
    pub next_character: Option<CharacterName>,
    pub xp: XpBreakdown,
    pub level: Level,
    pub progress: XpProgress,
    pub achievements: AchievementPartition,
}

pub fn build_report(rules: &ScoringRules, input: &ScoreInput) -> ProfileReport {
    let eval = Evaluation::new(rules, input);
    let xp = eval.xp().clone();
    let level = eval.level().clone();
    let progress = rules.xp_progress(xp.total);
    let achievements = partition_achievements(&eval);

    ProfileReport {
        next_character: eval.next_incomplete().map(|c| c.name),
        overall_completion: eval.overall,
        completions: eval.completions,
        xp,
        level,
        progress,
        achievements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::ProfileField;

    #[test]
    fn test_default_rules_validate() {
        assert_eq!(ScoringRules::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_duplicates_and_zero_weight() {
        let mut rules = ScoringRules::default();
        rules.characters.push(rules.characters[0].clone());
        assert_eq!(
            rules.validate(),
            Err(RulesError::DuplicateCharacter(CharacterName::Repo))
        );

        let mut rules = ScoringRules::default();
        rules.characters[2].weight = 0;
        assert_eq!(rules.validate(), Err(RulesError::ZeroWeight(CharacterName::Velo)));

        let mut rules = ScoringRules::default();
        rules.characters.truncate(1);
        assert_eq!(
            rules.validate(),
            Err(RulesError::MissingCharacter(CharacterName::Trinity))
        );

        let mut rules = ScoringRules::default();
        rules.achievements.push(rules.achievements[0].clone());
        assert_eq!(
            rules.validate(),
            Err(RulesError::DuplicateAchievement("first_steps".to_string()))
        );
    }

    fn role_award(xp: u32) -> XpRule {
        XpRule::FieldPresent {
            field: ProfileField::Role,
            xp,
            category: "Target Role".to_string(),
            description: "Direction defined".to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_xp_tables_that_overflow_the_total() {
        let mut rules = ScoringRules::default();
        rules.xp_rules = vec![role_award(u32::MAX), role_award(10)];
        assert!(matches!(
            rules.validate(),
            Err(RulesError::XpOverflow { max }) if max == u64::from(u32::MAX) + 10
        ));

        let mut rules = ScoringRules::default();
        rules.xp_rules = vec![XpRule::PerCounter {
            counter: Counter::SavedJobs,
            xp_each: 2,
            cap: None,
            category: "Saved Jobs".to_string(),
            noun: "job".to_string(),
            verb: "saved".to_string(),
        }];
        assert!(matches!(rules.validate(), Err(RulesError::XpOverflow { .. })));
    }

    #[test]
    fn test_largest_valid_xp_table_sums_exactly() {
        let mut rules = ScoringRules::default();
        rules.xp_rules = vec![role_award(u32::MAX - 10), role_award(10)];
        assert_eq!(rules.validate(), Ok(()));

        let input = ScoreInput {
            items: ProfileItems::new().with_values(ProfileField::Role, ["Caster"]),
            ..ScoreInput::default()
        };
        let report = build_report(&rules, &input);
        let sum: u64 = report.xp.breakdown.iter().map(|l| u64::from(l.xp)).sum();
        assert_eq!(sum, u64::from(report.xp.total));
        assert_eq!(report.xp.total, u32::MAX);
    }

    #[test]
    fn test_empty_profile_report() {
        let rules = ScoringRules::default();
        let report = build_report(&rules, &ScoreInput::default());

        assert_eq!(report.overall_completion, 20);
        assert_eq!(report.xp.total, 0);
        assert_eq!(report.level.level, 1);
        assert_eq!(report.next_character, Some(CharacterName::Repo));
        assert!(report.achievements.unlocked.is_empty());
        assert_eq!(report.progress.current, 0);
        assert_eq!(report.progress.needed, 100);
    }

    #[test]
    fn test_report_is_idempotent() {
        let rules = ScoringRules::default();
        let input = ScoreInput {
            items: ProfileItems::new()
                .with_values(ProfileField::Skill, ["Valorant IGL", "Scouting"])
                .with_values(ProfileField::Location, ["Toronto"]),
            saved_jobs_count: 3,
            assessments_count: 1,
        };
        let first = serde_json::to_string(&build_report(&rules, &input)).unwrap();
        let second = serde_json::to_string(&build_report(&rules, &input)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rules_round_trip_through_json_file() {
        let mut rules = ScoringRules::default();
        rules.characters[1].weight = 40;

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), serde_json::to_string_pretty(&rules).unwrap()).unwrap();

        let loaded = ScoringRules::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, rules);
    }

    #[test]
    fn test_invalid_rules_file_is_rejected() {
        let mut rules = ScoringRules::default();
        rules.characters[0].weight = 0;

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), serde_json::to_string(&rules).unwrap()).unwrap();

        let err = ScoringRules::from_json_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("zero weight"));
    }
}
