//! XP calculator — turns profile richness and engagement counters into points.
//!
//! The scoring table is a list of [`XpRule`]s. Every rule that awards points
//! produces exactly one [`XpLine`], so the breakdown always sums to the total.

use serde::{Deserialize, Serialize};

use crate::gamification::Evaluation;
use crate::profile::models::ProfileField;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    SavedJobs,
    Assessments,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum XpRule {
    /// Flat award once the field has any entry.
    FieldPresent {
        field: ProfileField,
        xp: u32,
        category: String,
        description: String,
    },
    /// Award per entry of a field, optionally capped.
    PerItem {
        field: ProfileField,
        xp_each: u32,
        cap: Option<u32>,
        category: String,
        noun: String,
        verb: String,
    },
    /// Award per unit of an engagement counter, optionally capped.
    PerCounter {
        counter: Counter,
        xp_each: u32,
        cap: Option<u32>,
        category: String,
        noun: String,
        verb: String,
    },
    /// Award for each completed character that has requirements.
    CharacterComplete { xp: u32 },
    /// Award when overall completion reaches 100%.
    FullProfile {
        xp: u32,
        category: String,
        description: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct XpLine {
    pub category: String,
    pub description: String,
    pub xp: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct XpBreakdown {
    pub total: u32,
    pub breakdown: Vec<XpLine>,
}

impl XpBreakdown {
    fn push(&mut self, category: impl Into<String>, description: impl Into<String>, xp: u32) {
        if xp == 0 {
            return;
        }
        self.total = self.total.saturating_add(xp);
        self.breakdown.push(XpLine {
            category: category.into(),
            description: description.into(),
            xp,
        });
    }
}

impl XpRule {
    /// Largest award this rule can ever grant, given how many characters earn a bonus.
    pub fn max_award(&self, scored_characters: usize) -> u64 {
        match self {
            XpRule::FieldPresent { xp, .. } | XpRule::FullProfile { xp, .. } => u64::from(*xp),
            XpRule::PerItem { xp_each, cap, .. } | XpRule::PerCounter { xp_each, cap, .. } => {
                let raw = u64::from(*xp_each) * u64::from(u32::MAX);
                cap.map_or(raw, |cap| raw.min(u64::from(cap)))
            }
            XpRule::CharacterComplete { xp } => {
                u64::from(*xp).saturating_mul(scored_characters as u64)
            }
        }
    }
}

fn scaled(count: usize, xp_each: u32, cap: Option<u32>) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    let raw = count.saturating_mul(xp_each);
    cap.map_or(raw, |cap| raw.min(cap))
}

fn counted(count: usize, noun: &str, verb: &str) -> String {
    let suffix = if count > 1 { "s" } else { "" };
    format!("{count} {noun}{suffix} {verb}")
}

pub fn calculate_xp(eval: &Evaluation<'_>) -> XpBreakdown {
    let items = &eval.input.items;
    let mut result = XpBreakdown::default();

    for rule in &eval.rules.xp_rules {
        match rule {
            XpRule::FieldPresent {
                field,
                xp,
                category,
                description,
            } => {
                if items.has(*field) {
                    result.push(category, description, *xp);
                }
            }
            XpRule::PerItem {
                field,
                xp_each,
                cap,
                category,
                noun,
                verb,
            } => {
                let count = items.count(*field);
                if count > 0 {
                    let xp = scaled(count, *xp_each, *cap);
                    result.push(category, counted(count, noun, verb), xp);
                }
            }
            XpRule::PerCounter {
                counter,
                xp_each,
                cap,
                category,
                noun,
                verb,
            } => {
                let count = eval.input.counter(*counter) as usize;
                if count > 0 {
                    let xp = scaled(count, *xp_each, *cap);
                    result.push(category, counted(count, noun, verb), xp);
                }
            }
            XpRule::CharacterComplete { xp } => {
                let scored = eval.rules.characters.iter().zip(&eval.completions);
                for (character, completion) in scored {
                    if completion.is_complete && !character.is_optional() {
                        result.push(
                            format!("{} Complete", character.name),
                            "Character unlocked!",
                            *xp,
                        );
                    }
                }
            }
            XpRule::FullProfile {
                xp,
                category,
                description,
            } => {
                if eval.overall == 100 {
                    result.push(category, description, *xp);
                }
            }
        }
    }

    result
}

fn field_present(field: ProfileField, xp: u32, category: &str, description: &str) -> XpRule {
    XpRule::FieldPresent {
        field,
        xp,
        category: category.to_string(),
        description: description.to_string(),
    }
}

fn per_item(
    field: ProfileField,
    xp_each: u32,
    cap: u32,
    category: &str,
    noun: &str,
    verb: &str,
) -> XpRule {
    XpRule::PerItem {
        field,
        xp_each,
        cap: Some(cap),
        category: category.to_string(),
        noun: noun.to_string(),
        verb: verb.to_string(),
    }
}

fn per_counter(
    counter: Counter,
    xp_each: u32,
    cap: u32,
    category: &str,
    noun: &str,
    verb: &str,
) -> XpRule {
    XpRule::PerCounter {
        counter,
        xp_each,
        cap: Some(cap),
        category: category.to_string(),
        noun: noun.to_string(),
        verb: verb.to_string(),
    }
}

pub fn default_xp_rules() -> Vec<XpRule> {
    vec![
        field_present(ProfileField::Location, 50, "Location Set", "Foundation established"),
        field_present(ProfileField::Role, 75, "Target Role", "Direction defined"),
        per_item(ProfileField::Skill, 50, 250, "Skills", "skill", "added"),
        field_present(ProfileField::CareerGoal, 100, "Career Goal", "Vision articulated"),
        field_present(ProfileField::ExperienceYears, 75, "Experience", "Journey tracked"),
        per_item(
            ProfileField::CareerHistory,
            25,
            100,
            "Career History",
            "milestone",
            "recorded",
        ),
        per_counter(Counter::SavedJobs, 20, 200, "Saved Jobs", "job", "saved"),
        per_counter(Counter::Assessments, 50, 250, "Job Assessments", "job", "assessed"),
        XpRule::CharacterComplete { xp: 100 },
        XpRule::FullProfile {
            xp: 200,
            category: "Full Profile".to_string(),
            description: "All characters unlocked!".to_string(),
        },
    ]
}
