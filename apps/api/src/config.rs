use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::gamification::ScoringRules;

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup only fails on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON document replacing the built-in scoring tables.
    pub scoring_rules_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scoring_rules_path: optional_env("SCORING_RULES_PATH").map(PathBuf::from),
        })
    }

    /// Built-in rules unless `SCORING_RULES_PATH` points at an override.
    pub fn load_rules(&self) -> Result<ScoringRules> {
        match &self.scoring_rules_path {
            Some(path) => {
                let rules = ScoringRules::from_json_file(path)?;
                info!("Loaded scoring rules from {}", path.display());
                Ok(rules)
            }
            None => {
                info!("Using built-in scoring rules");
                Ok(ScoringRules::default())
            }
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(path: Option<PathBuf>) -> Config {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            scoring_rules_path: path,
        }
    }

    #[test]
    fn test_defaults_to_built_in_rules() {
        let rules = config(None).load_rules().unwrap();
        assert_eq!(rules, ScoringRules::default());
    }

    #[test]
    fn test_loads_override_file() {
        let mut custom = ScoringRules::default();
        custom.characters[1].weight = 50;
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), serde_json::to_string(&custom).unwrap()).unwrap();

        let rules = config(Some(file.path().to_path_buf())).load_rules().unwrap();
        assert_eq!(rules.characters.len(), 4);
        assert_eq!(rules.characters[1].weight, 50);
    }

    #[test]
    fn test_override_missing_a_character_is_rejected() {
        let mut custom = ScoringRules::default();
        custom.characters.truncate(2);
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), serde_json::to_string(&custom).unwrap()).unwrap();

        let err = config(Some(file.path().to_path_buf()))
            .load_rules()
            .unwrap_err();
        assert!(format!("{err:#}").contains("Velo is missing"));
    }

    #[test]
    fn test_missing_override_file_is_an_error() {
        let err = config(Some(PathBuf::from("/nonexistent/rules.json")))
            .load_rules()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read scoring rules"));
    }
}
