//! Achievement catalog and unlock evaluation.
//!
//! Unlocked state is never stored: every call re-evaluates each rule against
//! the current profile and counters, so the catalog always splits cleanly into
//! unlocked and locked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::gamification::Evaluation;
use crate::profile::characters::CharacterName;
use crate::profile::models::ProfileField;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Badge color used unless an achievement overrides it.
    pub fn color(&self) -> &'static str {
        match self {
            Rarity::Common => "#6b7280",
            Rarity::Uncommon => "#22c55e",
            Rarity::Rare => "#3b82f6",
            Rarity::Epic => "#f59e0b",
            Rarity::Legendary => "#ffd700",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnlockRule {
    FieldCountAtLeast { field: ProfileField, count: usize },
    /// Leading integer of the field's first entry, e.g. "5+" reads as 5.
    FieldNumberAtLeast { field: ProfileField, value: u32 },
    CharacterComplete { character: CharacterName },
    FullProfile,
    SavedJobsAtLeast { count: u32 },
    AssessmentsAtLeast { count: u32 },
    LevelAtLeast { level: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub rarity: Rarity,
    pub unlock: UnlockRule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AchievementPartition {
    pub unlocked: Vec<Achievement>,
    pub locked: Vec<Achievement>,
}

fn leading_number(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    // An all-digit run only fails to parse on overflow.
    Some(digits.parse().unwrap_or(u32::MAX))
}

impl UnlockRule {
    pub fn is_met(&self, eval: &Evaluation<'_>) -> bool {
        let input = eval.input;
        match self {
            UnlockRule::FieldCountAtLeast { field, count } => input.items.count(*field) >= *count,
            UnlockRule::FieldNumberAtLeast { field, value } => input
                .items
                .first_value(*field)
                .and_then(leading_number)
                .is_some_and(|n| n >= *value),
            UnlockRule::CharacterComplete { character } => eval
                .completions
                .iter()
                .any(|c| c.name == *character && c.is_complete),
            UnlockRule::FullProfile => eval.overall == 100,
            UnlockRule::SavedJobsAtLeast { count } => input.saved_jobs_count >= *count,
            UnlockRule::AssessmentsAtLeast { count } => input.assessments_count >= *count,
            UnlockRule::LevelAtLeast { level } => eval.level().level >= *level,
        }
    }
}

/// Splits the catalog in one pass, keeping catalog order within each side.
pub fn partition_achievements(eval: &Evaluation<'_>) -> AchievementPartition {
    let (unlocked, locked): (Vec<_>, Vec<_>) = eval
        .rules
        .achievements
        .iter()
        .cloned()
        .partition(|achievement| achievement.unlock.is_met(eval));
    AchievementPartition { unlocked, locked }
}

pub fn unlocked_achievements(eval: &Evaluation<'_>) -> Vec<Achievement> {
    partition_achievements(eval).unlocked
}

pub fn locked_achievements(eval: &Evaluation<'_>) -> Vec<Achievement> {
    partition_achievements(eval).locked
}

/// Groups achievements by rarity, rarest first.
pub fn group_by_rarity(achievements: &[Achievement]) -> Vec<(Rarity, Vec<Achievement>)> {
    let mut groups: BTreeMap<Rarity, Vec<Achievement>> = BTreeMap::new();
    for achievement in achievements {
        groups
            .entry(achievement.rarity)
            .or_default()
            .push(achievement.clone());
    }
    groups.into_iter().rev().collect()
}

fn achievement(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    rarity: Rarity,
    unlock: UnlockRule,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        color: rarity.color().to_string(),
        rarity,
        unlock,
    }
}

fn count_at_least(field: ProfileField, count: usize) -> UnlockRule {
    UnlockRule::FieldCountAtLeast { field, count }
}

fn character_complete(character: CharacterName) -> UnlockRule {
    UnlockRule::CharacterComplete { character }
}

impl Achievement {
    fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }
}

pub fn default_achievements() -> Vec<Achievement> {
    use Rarity::*;

    vec![
        achievement(
            "first_steps",
            "First Steps",
            "Set your location",
            "👣",
            Common,
            count_at_least(ProfileField::Location, 1),
        ),
        achievement(
            "goal_setter",
            "Goal Setter",
            "Define your target role",
            "🎯",
            Common,
            count_at_least(ProfileField::Role, 1),
        ),
        achievement(
            "skill_collector",
            "Skill Collector",
            "Add 3 skills to your profile",
            "🧩",
            Uncommon,
            count_at_least(ProfileField::Skill, 3),
        ),
        achievement(
            "skill_master",
            "Skill Master",
            "Add 5 skills to your profile",
            "🎭",
            Rare,
            count_at_least(ProfileField::Skill, 5),
        ),
        achievement(
            "visionary",
            "Visionary",
            "Set a career goal",
            "🔮",
            Uncommon,
            count_at_least(ProfileField::CareerGoal, 1),
        ),
        achievement(
            "veteran",
            "Veteran",
            "Have 5+ years experience",
            "🎖️",
            Rare,
            UnlockRule::FieldNumberAtLeast {
                field: ProfileField::ExperienceYears,
                value: 5,
            },
        ),
        achievement(
            "repo_unlocked",
            "Foundation Solid",
            "Complete the Repo character",
            "🏛️",
            Uncommon,
            character_complete(CharacterName::Repo),
        )
        .with_color("#22d3ee"),
        achievement(
            "trinity_unlocked",
            "Identity Revealed",
            "Complete the Trinity character",
            "🔮",
            Rare,
            character_complete(CharacterName::Trinity),
        )
        .with_color("#a855f7"),
        achievement(
            "velo_unlocked",
            "Momentum Building",
            "Complete the Velo character",
            "🚀",
            Rare,
            character_complete(CharacterName::Velo),
        )
        .with_color("#ff00aa"),
        achievement(
            "all_characters",
            "Full Squad",
            "Unlock all 4 characters",
            "👑",
            Epic,
            UnlockRule::FullProfile,
        ),
        achievement(
            "job_hunter",
            "Job Hunter",
            "Save your first job",
            "📌",
            Common,
            UnlockRule::SavedJobsAtLeast { count: 1 },
        ),
        achievement(
            "opportunity_seeker",
            "Opportunity Seeker",
            "Save 5 jobs",
            "🔍",
            Uncommon,
            UnlockRule::SavedJobsAtLeast { count: 5 },
        ),
        achievement(
            "strategic_player",
            "Strategic Player",
            "Complete 3 job assessments",
            "📊",
            Rare,
            UnlockRule::AssessmentsAtLeast { count: 3 },
        ),
        achievement(
            "market_analyst",
            "Market Analyst",
            "Complete 10 job assessments",
            "📈",
            Epic,
            UnlockRule::AssessmentsAtLeast { count: 10 },
        ),
        achievement(
            "mvp",
            "MVP",
            "Reach Level 8",
            "🌟",
            Legendary,
            UnlockRule::LevelAtLeast { level: 8 },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::gamification::{ScoreInput, ScoringRules};
    use crate::profile::models::ProfileItems;

    fn partition(items: ProfileItems, saved: u32, assessed: u32) -> AchievementPartition {
        let rules = ScoringRules::default();
        let input = ScoreInput {
            items,
            saved_jobs_count: saved,
            assessments_count: assessed,
        };
        partition_achievements(&Evaluation::new(&rules, &input))
    }

    fn ids(list: &[Achievement]) -> Vec<&str> {
        list.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_empty_profile_unlocks_nothing() {
        let result = partition(ProfileItems::new(), 0, 0);
        assert!(result.unlocked.is_empty());
        assert_eq!(result.locked.len(), default_achievements().len());
    }

    #[test]
    fn test_partition_is_exact() {
        let catalog: HashSet<String> = default_achievements().into_iter().map(|a| a.id).collect();
        let items = ProfileItems::new()
            .with_values(ProfileField::Skill, ["a", "b", "c"])
            .with_values(ProfileField::Location, ["Paris"]);
        for saved in [0, 1, 5] {
            for assessed in [0, 3, 10] {
                let result = partition(items.clone(), saved, assessed);
                let unlocked: HashSet<_> = result.unlocked.iter().map(|a| a.id.clone()).collect();
                let locked: HashSet<_> = result.locked.iter().map(|a| a.id.clone()).collect();
                assert!(unlocked.is_disjoint(&locked));
                assert_eq!(unlocked.len() + locked.len(), catalog.len());
                assert_eq!(&unlocked | &locked, catalog);
            }
        }
    }

    #[test]
    fn test_assessment_threshold_flips_exactly() {
        for assessed in 0..15u32 {
            let result = partition(ProfileItems::new(), 0, assessed);
            let unlocked = ids(&result.unlocked).contains(&"strategic_player");
            assert_eq!(unlocked, assessed >= 3, "at {assessed} assessments");
        }
    }

    #[test]
    fn test_veteran_reads_leading_number() {
        let five_plus = ProfileItems::new().with_values(ProfileField::ExperienceYears, ["5+"]);
        assert!(ids(&partition(five_plus, 0, 0).unlocked).contains(&"veteran"));

        let four = ProfileItems::new().with_values(ProfileField::ExperienceYears, ["4"]);
        assert!(!ids(&partition(four, 0, 0).unlocked).contains(&"veteran"));

        let words = ProfileItems::new().with_values(ProfileField::ExperienceYears, ["a decade"]);
        assert!(!ids(&partition(words, 0, 0).unlocked).contains(&"veteran"));
    }

    #[test]
    fn test_oversized_number_saturates() {
        assert_eq!(leading_number("99999999999"), Some(u32::MAX));
        assert_eq!(leading_number(" 12 years"), Some(12));
        assert_eq!(leading_number("years: 12"), None);

        let huge = ProfileItems::new().with_values(ProfileField::ExperienceYears, ["99999999999"]);
        assert!(ids(&partition(huge, 0, 0).unlocked).contains(&"veteran"));
    }

    #[test]
    fn test_badge_colors_default_to_rarity() {
        let catalog = default_achievements();
        let color = |id: &str| catalog.iter().find(|a| a.id == id).unwrap().color.clone();
        assert_eq!(color("first_steps"), Rarity::Common.color());
        assert_eq!(color("mvp"), Rarity::Legendary.color());
        assert_eq!(color("trinity_unlocked"), "#a855f7");
    }

    #[test]
    fn test_character_achievements_follow_completion() {
        let items = ProfileItems::new()
            .with_values(ProfileField::Location, ["Stockholm"])
            .with_values(ProfileField::Role, ["Community Manager"]);
        let unlocked = partition(items, 0, 0).unlocked;
        let unlocked = ids(&unlocked);
        assert!(unlocked.contains(&"repo_unlocked"));
        assert!(!unlocked.contains(&"trinity_unlocked"));
        assert!(!unlocked.contains(&"all_characters"));
    }

    fn maxed_profile() -> ProfileItems {
        ProfileItems::new()
            .with_values(ProfileField::Location, ["LA"])
            .with_values(ProfileField::Role, ["Designer"])
            .with_values(ProfileField::Skill, ["a", "b", "c", "d", "e"])
            .with_values(ProfileField::CareerGoal, ["Lead designer"])
            .with_values(ProfileField::ExperienceYears, ["8"])
            .with_values(ProfileField::CareerHistory, ["a", "b", "c", "d"])
    }

    #[test]
    fn test_default_table_caps_out_below_mvp() {
        // Every capped rule maxed: 650 profile + 300 characters + 200 full + 200 + 250 = 1600.
        let result = partition(maxed_profile(), 10, 5);
        let unlocked = ids(&result.unlocked);
        assert!(unlocked.contains(&"all_characters"));
        assert!(!unlocked.contains(&"market_analyst"));
        assert!(!unlocked.contains(&"mvp"));
    }

    #[test]
    fn test_mvp_unlocks_at_top_level() {
        let mut rules = ScoringRules::default();
        let mut levels = rules.levels.levels().to_vec();
        if let Some(top) = levels.last_mut() {
            top.min_xp = 1600;
        }
        rules.levels = crate::gamification::levels::LevelTable::new(levels).unwrap();

        let input = ScoreInput {
            items: maxed_profile(),
            saved_jobs_count: 10,
            assessments_count: 5,
        };
        let result = partition_achievements(&Evaluation::new(&rules, &input));
        assert!(ids(&result.unlocked).contains(&"mvp"));
    }

    #[test]
    fn test_views_match_partition() {
        let rules = ScoringRules::default();
        let input = ScoreInput {
            items: ProfileItems::new().with_values(ProfileField::Role, ["Caster"]),
            saved_jobs_count: 2,
            assessments_count: 0,
        };
        let eval = Evaluation::new(&rules, &input);
        let whole = partition_achievements(&eval);
        assert_eq!(unlocked_achievements(&eval), whole.unlocked);
        assert_eq!(locked_achievements(&eval), whole.locked);
    }

    #[test]
    fn test_group_by_rarity_rarest_first() {
        let groups = group_by_rarity(&default_achievements());
        let order: Vec<Rarity> = groups.iter().map(|(r, _)| *r).collect();
        assert_eq!(
            order,
            vec![Rarity::Legendary, Rarity::Epic, Rarity::Rare, Rarity::Uncommon, Rarity::Common]
        );
        let total: usize = groups.iter().map(|(_, list)| list.len()).sum();
        assert_eq!(total, 15);
    }
}
