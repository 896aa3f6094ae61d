//! Built-in achievement catalog.
//!
//! Definitions are static; unlock state lives in `PlayerStats.badges`.
//! An id present in `badges` is permanently unlocked.

use crate::{PlayerStats, Rarity};
use once_cell::sync::Lazy;

/// XP reward amounts, shared with the progression engine.
pub mod xp {
    pub const EXERCISE_COMPLETE: u32 = 10;
    pub const WORKOUT_COMPLETE: u32 = 50;
    pub const PR_ACHIEVED: u32 = 100;
    pub const PERFECT_DIET_DAY: u32 = 75;
    pub const STREAK_3: u32 = 25;
    pub const STREAK_7: u32 = 100;
    pub const STREAK_30: u32 = 500;
    pub const STREAK_100: u32 = 1000;
    pub const FIRST_WORKOUT: u32 = 50;
    pub const FIRST_PR: u32 = 100;
    pub const BADGE_COMMON: u32 = 25;
    pub const BADGE_RARE: u32 = 50;
    pub const BADGE_EPIC: u32 = 100;
    pub const BADGE_LEGENDARY: u32 = 200;
    pub const LEVEL_UP_BONUS_PER_LEVEL: u32 = 25;
}

/// An achievement definition: immutable metadata plus an unlock predicate.
#[derive(Clone)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_reward: u32,
    pub rarity: Rarity,
    pub condition: fn(&PlayerStats) -> bool,
}

impl std::fmt::Debug for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Achievement")
            .field("id", &self.id)
            .field("xp_reward", &self.xp_reward)
            .field("rarity", &self.rarity)
            .finish()
    }
}

/// Cached catalog - built once and reused across all operations
static CATALOG: Lazy<Vec<Achievement>> = Lazy::new(build_catalog);

/// The built-in achievement catalog.
pub fn catalog() -> &'static [Achievement] {
    &CATALOG
}

/// Look up one achievement by id.
pub fn find(id: &str) -> Option<&'static Achievement> {
    catalog().iter().find(|a| a.id == id)
}

/// Achievements already unlocked for these stats.
pub fn unlocked(stats: &PlayerStats) -> Vec<&'static Achievement> {
    catalog().iter().filter(|a| stats.has_badge(a.id)).collect()
}

/// Achievements still locked for these stats.
pub fn locked(stats: &PlayerStats) -> Vec<&'static Achievement> {
    catalog()
        .iter()
        .filter(|a| !stats.has_badge(a.id))
        .collect()
}

/// Unlocked achievements of one rarity tier.
pub fn unlocked_by_rarity(stats: &PlayerStats, rarity: Rarity) -> Vec<&'static Achievement> {
    catalog()
        .iter()
        .filter(|a| a.rarity == rarity && stats.has_badge(a.id))
        .collect()
}

fn build_catalog() -> Vec<Achievement> {
    vec![
        // Workout milestones
        Achievement {
            id: "first_blood",
            name: "First Blood",
            description: "Complete your first workout",
            icon: "🥇",
            xp_reward: xp::FIRST_WORKOUT,
            rarity: Rarity::Common,
            condition: |s| s.total_workouts >= 1,
        },
        Achievement {
            id: "workout_warrior",
            name: "Workout Warrior",
            description: "Complete 10 workouts",
            icon: "⚔️",
            xp_reward: xp::BADGE_COMMON,
            rarity: Rarity::Common,
            condition: |s| s.total_workouts >= 10,
        },
        Achievement {
            id: "fitness_beast",
            name: "Fitness Beast",
            description: "Complete 50 workouts",
            icon: "🦁",
            xp_reward: xp::BADGE_RARE,
            rarity: Rarity::Rare,
            condition: |s| s.total_workouts >= 50,
        },
        Achievement {
            id: "iron_god",
            name: "Iron God",
            description: "Complete 100 workouts",
            icon: "⚡",
            xp_reward: xp::BADGE_EPIC,
            rarity: Rarity::Epic,
            condition: |s| s.total_workouts >= 100,
        },
        // Streak milestones
        Achievement {
            id: "on_fire",
            name: "On Fire!",
            description: "Hold a 3-day streak",
            icon: "🔥",
            xp_reward: xp::STREAK_3,
            rarity: Rarity::Common,
            condition: |s| s.current_streak >= 3,
        },
        Achievement {
            id: "unstoppable",
            name: "Unstoppable Force",
            description: "Hold a 7-day streak",
            icon: "🌟",
            xp_reward: xp::STREAK_7,
            rarity: Rarity::Rare,
            condition: |s| s.current_streak >= 7,
        },
        Achievement {
            id: "legendary_streak",
            name: "Legendary Streak",
            description: "Hold a 30-day streak",
            icon: "👑",
            xp_reward: xp::STREAK_30,
            rarity: Rarity::Legendary,
            condition: |s| s.current_streak >= 30,
        },
        // Strength milestones
        Achievement {
            id: "record_breaker",
            name: "Record Breaker",
            description: "Set your first personal record",
            icon: "💥",
            xp_reward: xp::FIRST_PR,
            rarity: Rarity::Common,
            condition: |s| s.total_prs >= 1,
        },
        Achievement {
            id: "strength_machine",
            name: "Strength Machine",
            description: "Collect 10 personal records",
            icon: "🤖",
            xp_reward: xp::BADGE_RARE,
            rarity: Rarity::Rare,
            condition: |s| s.total_prs >= 10,
        },
        Achievement {
            id: "pr_master",
            name: "PR Master",
            description: "Collect 25 personal records",
            icon: "👑",
            xp_reward: xp::BADGE_EPIC,
            rarity: Rarity::Epic,
            condition: |s| s.total_prs >= 25,
        },
        // Diet milestones
        Achievement {
            id: "nutrition_ninja",
            name: "Nutrition Ninja",
            description: "Log 7 compliant diet days",
            icon: "🥷",
            xp_reward: xp::BADGE_COMMON,
            rarity: Rarity::Common,
            condition: |s| s.total_diet_days >= 7,
        },
        Achievement {
            id: "diet_destroyer",
            name: "Diet Destroyer",
            description: "Log 30 compliant diet days",
            icon: "⚡",
            xp_reward: xp::BADGE_EPIC,
            rarity: Rarity::Epic,
            condition: |s| s.total_diet_days >= 30,
        },
        // Special milestones
        Achievement {
            id: "consistency_king",
            name: "Consistency King",
            description: "Reach a 100-day longest streak",
            icon: "👑",
            xp_reward: xp::STREAK_100,
            rarity: Rarity::Legendary,
            condition: |s| s.longest_streak >= 100,
        },
        Achievement {
            id: "level_ten",
            name: "Elite Athlete",
            description: "Reach level 10",
            icon: "🌟",
            xp_reward: xp::BADGE_EPIC,
            rarity: Rarity::Epic,
            condition: |s| s.current_level >= 10,
        },
        Achievement {
            id: "level_twenty",
            name: "Fitness Legend",
            description: "Reach level 20",
            icon: "🏆",
            xp_reward: xp::BADGE_LEGENDARY,
            rarity: Rarity::Legendary,
            condition: |s| s.current_level >= 20,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<_> = catalog().iter().map(|a| a.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_find_known_and_unknown() {
        assert!(find("first_blood").is_some());
        assert!(find("does_not_exist").is_none());
    }

    #[test]
    fn test_conditions_match_stats() {
        let mut stats = PlayerStats::default();
        assert!(!(find("first_blood").unwrap().condition)(&stats));

        stats.total_workouts = 1;
        assert!((find("first_blood").unwrap().condition)(&stats));
        assert!(!(find("workout_warrior").unwrap().condition)(&stats));
    }

    #[test]
    fn test_unlocked_and_locked_partition_catalog() {
        let mut stats = PlayerStats::default();
        stats.badges = vec!["first_blood".into(), "on_fire".into()];

        let unlocked = unlocked(&stats);
        let locked = locked(&stats);
        assert_eq!(unlocked.len(), 2);
        assert_eq!(unlocked.len() + locked.len(), catalog().len());
    }

    #[test]
    fn test_unlocked_by_rarity_filters() {
        let mut stats = PlayerStats::default();
        stats.badges = vec!["first_blood".into(), "unstoppable".into()];

        let rare = unlocked_by_rarity(&stats, Rarity::Rare);
        assert_eq!(rare.len(), 1);
        assert_eq!(rare[0].id, "unstoppable");
    }
}
