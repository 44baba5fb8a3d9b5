use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Every kind of fact the profile agent can record about a user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Skill,
    Role,
    Location,
    ExperienceYears,
    CareerGoal,
    CareerHistory,
    SavedJobs,
    NetworkVisibility,
}

impl ProfileField {
    pub const ALL: [ProfileField; 8] = [
        ProfileField::Skill,
        ProfileField::Role,
        ProfileField::Location,
        ProfileField::ExperienceYears,
        ProfileField::CareerGoal,
        ProfileField::CareerHistory,
        ProfileField::SavedJobs,
        ProfileField::NetworkVisibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Skill => "skill",
            ProfileField::Role => "role",
            ProfileField::Location => "location",
            ProfileField::ExperienceYears => "experience_years",
            ProfileField::CareerGoal => "career_goal",
            ProfileField::CareerHistory => "career_history",
            ProfileField::SavedJobs => "saved_jobs",
            ProfileField::NetworkVisibility => "network_visibility",
        }
    }

    /// Singular noun used in "N more ..." guidance.
    pub fn noun(&self) -> &'static str {
        match self {
            ProfileField::Skill => "skill",
            ProfileField::Role => "role",
            ProfileField::Location => "location",
            ProfileField::ExperienceYears => "experience detail",
            ProfileField::CareerGoal => "career goal",
            ProfileField::CareerHistory => "milestone",
            ProfileField::SavedJobs => "saved job",
            ProfileField::NetworkVisibility => "network setting",
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fact about a user. Owned by the profile store; the scoring core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileItem {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProfileItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            metadata: None,
            confirmed: None,
            created_at: None,
        }
    }
}

/// Profile items keyed by field. A missing key reads as an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ProfileItems(BTreeMap<ProfileField, Vec<ProfileItem>>);

impl ProfileItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ProfileField) -> &[ProfileItem] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, field: ProfileField) -> usize {
        self.get(field).len()
    }

    pub fn has(&self, field: ProfileField) -> bool {
        !self.get(field).is_empty()
    }

    pub fn first_value(&self, field: ProfileField) -> Option<&str> {
        self.get(field).first().map(|item| item.value.as_str())
    }

    pub fn push(&mut self, field: ProfileField, item: ProfileItem) {
        self.0.entry(field).or_default().push(item);
    }

    /// Builder used by tests and fixtures.
    pub fn with_values<I, S>(mut self, field: ProfileField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.push(field, ProfileItem::new(value));
        }
        self
    }
}
