//! Character registry — the four thematic groupings a profile is scored against.
//!
//! Each character draws on a handful of profile fields and gates completion on a
//! list of [`Requirement`]s. Registry order is significant: it is the recommended
//! completion sequence used for onboarding guidance.

use serde::{Deserialize, Serialize};

use crate::profile::models::ProfileField;

pub const ALL_COMPLETE_MESSAGE: &str =
    "All characters unlocked! You're ready to find your perfect role!";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharacterName {
    Repo,
    Trinity,
    Velo,
    Reach,
}

impl CharacterName {
    pub const ALL: [CharacterName; 4] = [
        CharacterName::Repo,
        CharacterName::Trinity,
        CharacterName::Velo,
        CharacterName::Reach,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterName::Repo => "Repo",
            CharacterName::Trinity => "Trinity",
            CharacterName::Velo => "Velo",
            CharacterName::Reach => "Reach",
        }
    }

    /// Case-insensitive lookup, used for path parameters.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "repo" => Some(CharacterName::Repo),
            "trinity" => Some(CharacterName::Trinity),
            "velo" => Some(CharacterName::Velo),
            "reach" => Some(CharacterName::Reach),
            _ => None,
        }
    }
}

impl std::fmt::Display for CharacterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completion gate of a character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    /// Satisfied by a single entry.
    AtLeastOne { field: ProfileField },
    /// Satisfied once the field holds `count` entries.
    MinCount { field: ProfileField, count: usize },
}

impl Requirement {
    pub fn field(&self) -> ProfileField {
        match self {
            Requirement::AtLeastOne { field } | Requirement::MinCount { field, .. } => *field,
        }
    }
}

/// What a character says, keyed by how far along it is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dialogue {
    pub empty: String,
    pub partial: String,
    pub complete: String,
    pub default: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterConfig {
    pub name: CharacterName,
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    pub color: String,
    pub profile_fields: Vec<ProfileField>,
    /// Empty for optional characters, which are always complete.
    pub requirements: Vec<Requirement>,
    pub weight: u32,
    pub completion_message: String,
    pub dialogue: Dialogue,
}

impl CharacterConfig {
    pub fn is_optional(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn is_required(&self, field: ProfileField) -> bool {
        self.requirements.iter().any(|r| r.field() == field)
    }

    /// Picks the dialogue line for the given completion state.
    pub fn dialogue_line(&self, percent: u8, is_complete: bool) -> &str {
        let line = if is_complete {
            &self.dialogue.complete
        } else if percent == 0 {
            &self.dialogue.empty
        } else {
            &self.dialogue.partial
        };
        if line.is_empty() {
            &self.dialogue.default
        } else {
            line
        }
    }
}

fn dialogue(empty: &str, partial: &str, complete: &str, default: &str) -> Dialogue {
    Dialogue {
        empty: empty.to_string(),
        partial: partial.to_string(),
        complete: complete.to_string(),
        default: default.to_string(),
    }
}

/// The built-in registry: Repo, Trinity, Velo, Reach.
pub fn default_characters() -> Vec<CharacterConfig> {
    vec![
        CharacterConfig {
            name: CharacterName::Repo,
            title: "Your Foundation".to_string(),
            subtitle: "Where are you?".to_string(),
            icon: "🏛️".to_string(),
            color: "#22d3ee".to_string(),
            profile_fields: vec![ProfileField::Location, ProfileField::Role],
            requirements: vec![
                Requirement::AtLeastOne {
                    field: ProfileField::Location,
                },
                Requirement::AtLeastOne {
                    field: ProfileField::Role,
                },
            ],
            weight: 25,
            completion_message: "Repo is set - your foundation is solid!".to_string(),
            dialogue: dialogue(
                "Where in the world are you? Let's establish your base of operations!",
                "Good start! Now tell me what role you're targeting...",
                "Your foundation is SOLID. I know exactly where you stand!",
                "I am Repo, guardian of your foundation.",
            ),
        },
        CharacterConfig {
            name: CharacterName::Trinity,
            title: "Your Identity".to_string(),
            subtitle: "Who are you?".to_string(),
            icon: "🔮".to_string(),
            color: "#a855f7".to_string(),
            profile_fields: vec![ProfileField::Skill, ProfileField::CareerGoal],
            requirements: vec![Requirement::MinCount {
                field: ProfileField::Skill,
                count: 2,
            }],
            weight: 35,
            completion_message: "Trinity unlocked - I know your strengths!".to_string(),
            dialogue: dialogue(
                "Show me your skills, warrior! What powers do you possess?",
                "Impressive skills! But what's your ultimate goal?",
                "I see your TRUE identity now. Your skills are legendary!",
                "I am Trinity, keeper of your identity.",
            ),
        },
        CharacterConfig {
            name: CharacterName::Velo,
            title: "Your Velocity".to_string(),
            subtitle: "How fast are you moving?".to_string(),
            icon: "🚀".to_string(),
            color: "#ff00aa".to_string(),
            profile_fields: vec![ProfileField::ExperienceYears, ProfileField::CareerHistory],
            requirements: vec![Requirement::AtLeastOne {
                field: ProfileField::ExperienceYears,
            }],
            weight: 20,
            completion_message: "Velo activated - your momentum is clear!".to_string(),
            dialogue: dialogue(
                "How long have you been in the game? Your experience matters!",
                "Good momentum! Track your career milestones to boost velocity!",
                "MAXIMUM VELOCITY! Your career trajectory is UNSTOPPABLE!",
                "I am Velo, master of momentum.",
            ),
        },
        CharacterConfig {
            name: CharacterName::Reach,
            title: "Your Network".to_string(),
            subtitle: "How far can you go?".to_string(),
            icon: "🌐".to_string(),
            color: "#ffd700".to_string(),
            profile_fields: vec![ProfileField::SavedJobs, ProfileField::NetworkVisibility],
            requirements: vec![],
            weight: 20,
            completion_message: "Reach expanded - you're connected!".to_string(),
            dialogue: dialogue(
                "Your network is your net worth! Start saving jobs you're interested in.",
                "Nice connections! Keep assessing jobs to expand your reach.",
                "Your reach extends FAR and WIDE! Opportunities await!",
                "I am Reach, architect of your network.",
            ),
        },
    ]
}
