use serde::{Deserialize, Serialize};

use crate::gamification::RulesError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Level {
    pub level: u32,
    pub title: String,
    pub min_xp: u32,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct XpProgress {
    /// XP earned since entering the current level.
    pub current: u32,
    /// Span of the current level; 0 at the top level.
    pub needed: u32,
    /// XP still missing to reach the next level; 0 at the top level.
    pub remaining: u32,
    pub percent: u8,
}

/// Levels ordered by ascending XP threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct LevelTable(Vec<Level>);

impl LevelTable {
    pub fn new(levels: Vec<Level>) -> Result<Self, RulesError> {
        let table = Self(levels);
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.0.is_empty() {
            return Err(RulesError::EmptyLevelTable);
        }
        for pair in self.0.windows(2) {
            if pair[1].min_xp <= pair[0].min_xp || pair[1].level <= pair[0].level {
                return Err(RulesError::UnorderedLevels {
                    level: pair[1].level,
                });
            }
        }
        Ok(())
    }

    pub fn levels(&self) -> &[Level] {
        &self.0
    }

    /// Highest level whose threshold is at or below `xp`; the lowest level otherwise.
    pub fn level_for(&self, xp: u32) -> &Level {
        let idx = self.index_for(xp);
        &self.0[idx]
    }

    pub fn progress(&self, xp: u32) -> XpProgress {
        let idx = self.index_for(xp);
        let level = &self.0[idx];
        let current = xp.saturating_sub(level.min_xp);

        match self.0.get(idx + 1) {
            None => XpProgress {
                current,
                needed: 0,
                remaining: 0,
                percent: 100,
            },
            Some(next) => {
                let needed = next.min_xp - level.min_xp;
                let percent = ((f64::from(current) / f64::from(needed)) * 100.0)
                    .round()
                    .clamp(0.0, 100.0) as u8;
                XpProgress {
                    current,
                    needed,
                    remaining: next.min_xp.saturating_sub(xp),
                    percent,
                }
            }
        }
    }

    fn index_for(&self, xp: u32) -> usize {
        // Thresholds are ascending, so the partition point is the count of levels reached.
        self.0
            .partition_point(|level| level.min_xp <= xp)
            .saturating_sub(1)
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        let rows: [(u32, &str, u32, &str, &str); 8] = [
            (1, "Newcomer", 0, "🌱", "#6b7280"),
            (2, "Explorer", 100, "🔍", "#22c55e"),
            (3, "Contender", 250, "⚔️", "#3b82f6"),
            (4, "Challenger", 450, "🏆", "#8b5cf6"),
            (5, "Pro Player", 700, "⭐", "#f59e0b"),
            (6, "Elite", 1000, "💎", "#ef4444"),
            (7, "Legend", 1350, "👑", "#ec4899"),
            (8, "MVP", 1750, "🌟", "#ffd700"),
        ];
        Self(
            rows.into_iter()
                .map(|(level, title, min_xp, icon, color)| Level {
                    level,
                    title: title.to_string(),
                    min_xp,
                    icon: icon.to_string(),
                    color: color.to_string(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_xp_is_lowest_level() {
        let table = LevelTable::default();
        assert_eq!(table.level_for(0).level, 1);
        assert_eq!(table.level_for(0).title, "Newcomer");
    }

    #[test]
    fn test_threshold_boundaries() {
        let table = LevelTable::default();
        assert_eq!(table.level_for(99).level, 1);
        assert_eq!(table.level_for(100).level, 2);
        assert_eq!(table.level_for(1749).level, 7);
        assert_eq!(table.level_for(1750).level, 8);
        assert_eq!(table.level_for(u32::MAX).level, 8);
    }

    #[test]
    fn test_below_first_threshold_returns_lowest_level() {
        let table = LevelTable::new(vec![
            Level {
                level: 1,
                title: "Rookie".to_string(),
                min_xp: 10,
                icon: String::new(),
                color: String::new(),
            },
            Level {
                level: 2,
                title: "Regular".to_string(),
                min_xp: 20,
                icon: String::new(),
                color: String::new(),
            },
        ])
        .unwrap();
        assert_eq!(table.level_for(5).title, "Rookie");
        assert_eq!(table.progress(5).current, 0);
    }

    #[test]
    fn test_level_is_monotonic_in_xp() {
        let table = LevelTable::default();
        let mut previous = 0;
        for xp in 0..2500 {
            let level = table.level_for(xp).level;
            assert!(level >= previous, "level dropped at {xp} XP");
            previous = level;
        }
    }

    #[test]
    fn test_progress_mid_level() {
        let table = LevelTable::default();
        let progress = table.progress(175);
        assert_eq!(progress.current, 75);
        assert_eq!(progress.needed, 150);
        assert_eq!(progress.remaining, 75);
        assert_eq!(progress.percent, 50);
    }

    #[test]
    fn test_progress_at_max_level_is_terminal() {
        let table = LevelTable::default();
        let progress = table.progress(2000);
        assert_eq!(progress.current, 250);
        assert_eq!(progress.needed, 0);
        assert_eq!(progress.remaining, 0);
        assert_eq!(progress.percent, 100);
    }

    #[test]
    fn test_progress_percent_is_bounded() {
        let table = LevelTable::default();
        for xp in 0..2000 {
            assert!(table.progress(xp).percent <= 100);
        }
    }

    #[test]
    fn test_rejects_unordered_or_empty_tables() {
        assert!(matches!(
            LevelTable::new(vec![]),
            Err(RulesError::EmptyLevelTable)
        ));

        let mut levels = LevelTable::default().levels().to_vec();
        levels.swap(2, 3);
        assert!(matches!(
            LevelTable::new(levels),
            Err(RulesError::UnorderedLevels { .. })
        ));
    }
}
