//! XP, level, and achievement progression engine.
//!
//! Single source of truth for `PlayerStats`. The level is always derived
//! from cumulative XP with `floor(sqrt(xp / 100)) + 1`: level 1 costs 0 XP,
//! level N costs `(N-1)^2 * 100`, so early levels are cheap and later ones
//! quadratically slower.

use crate::achievements::{self, Achievement};
use crate::{keys, KeyValueStore, PlayerStats, Result, XPEvent, XPEventKind};
use chrono::Utc;

pub use crate::achievements::xp;

/// Level for a cumulative XP total.
pub fn calculate_level(total_xp: u32) -> u32 {
    (f64::from(total_xp) / 100.0).sqrt().floor() as u32 + 1
}

/// Cumulative XP required to reach a level.
pub fn xp_for_level(level: u32) -> u32 {
    level.saturating_sub(1).pow(2) * 100
}

/// XP still missing to the next level.
pub fn xp_to_next_level(total_xp: u32) -> u32 {
    let next = xp_for_level(calculate_level(total_xp) + 1);
    next.saturating_sub(total_xp)
}

impl XPEventKind {
    /// Base XP from the fixed reward table.
    pub fn base_xp(&self) -> u32 {
        match self {
            XPEventKind::ExerciseComplete => xp::EXERCISE_COMPLETE,
            XPEventKind::WorkoutComplete => xp::WORKOUT_COMPLETE,
            XPEventKind::PrAchieved => xp::PR_ACHIEVED,
            XPEventKind::DietPerfect => xp::PERFECT_DIET_DAY,
            XPEventKind::StreakMilestone => xp::STREAK_7,
            XPEventKind::BadgeEarned | XPEventKind::LevelUp => xp::BADGE_COMMON,
        }
    }

    fn describe(&self, xp: u32) -> String {
        match self {
            XPEventKind::ExerciseComplete => format!("Exercise completed! (+{xp} XP)"),
            XPEventKind::WorkoutComplete => format!("Workout crushed! (+{xp} XP)"),
            XPEventKind::PrAchieved => format!("NEW PERSONAL RECORD! (+{xp} XP)"),
            XPEventKind::DietPerfect => format!("Perfect diet day! (+{xp} XP)"),
            XPEventKind::StreakMilestone => format!("Streak milestone reached! (+{xp} XP)"),
            XPEventKind::BadgeEarned => format!("New achievement unlocked! (+{xp} XP)"),
            XPEventKind::LevelUp => format!("Level up! (+{xp} XP)"),
        }
    }
}

/// Progression engine over an explicit store handle.
///
/// Every mutation is a synchronous load-modify-save of the stats blob, so
/// callers see a consistent value as long as all writes come from one
/// execution context.
pub struct ProgressionEngine<'a, S: KeyValueStore> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore> ProgressionEngine<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Load stats, or defaults when nothing (or something unreadable) is
    /// persisted. Derived fields are always recomputed from `total_xp`.
    pub fn player_stats(&self) -> PlayerStats {
        let mut stats = match self.store.get(keys::PLAYER_STATS) {
            Some(raw) => match serde_json::from_str::<PlayerStats>(&raw) {
                Ok(stats) => stats,
                Err(e) => {
                    tracing::warn!("Corrupt player stats: {}. Using defaults.", e);
                    PlayerStats::default()
                }
            },
            None => PlayerStats::default(),
        };

        stats.current_level = calculate_level(stats.total_xp);
        stats.xp_to_next_level = xp_to_next_level(stats.total_xp);
        stats
    }

    fn save(&mut self, stats: &mut PlayerStats) -> Result<()> {
        stats.last_updated = Utc::now();
        self.store
            .set(keys::PLAYER_STATS, &serde_json::to_string(stats)?)?;
        tracing::debug!(
            "Saved player stats: {} XP, level {}",
            stats.total_xp,
            stats.current_level
        );
        Ok(())
    }

    /// Add XP for an event and persist the result.
    ///
    /// `custom_amount` overrides the reward table for the primary event.
    /// Crossing one or more level thresholds appends a bonus event worth
    /// `25 XP × levels gained`. Events are returned in award order.
    pub fn award_xp(
        &mut self,
        kind: XPEventKind,
        custom_amount: Option<u32>,
    ) -> Result<Vec<XPEvent>> {
        let mut stats = self.player_stats();
        let mut events = Vec::new();

        let amount = custom_amount.unwrap_or_else(|| kind.base_xp());
        let old_level = stats.current_level;

        stats.total_xp += amount;
        events.push(XPEvent {
            kind,
            xp: amount,
            description: kind.describe(amount),
            timestamp: Utc::now(),
        });

        let new_level = calculate_level(stats.total_xp);
        if new_level > old_level {
            let bonus = (new_level - old_level) * xp::LEVEL_UP_BONUS_PER_LEVEL;
            stats.total_xp += bonus;
            events.push(XPEvent {
                kind: XPEventKind::LevelUp,
                xp: bonus,
                description: format!("LEVEL UP! You are now level {new_level}! (+{bonus} XP bonus)"),
                timestamp: Utc::now(),
            });
            tracing::info!("Level up: {} -> {}", old_level, new_level);
        }

        stats.current_level = calculate_level(stats.total_xp);
        stats.xp_to_next_level = xp_to_next_level(stats.total_xp);
        self.save(&mut stats)?;
        Ok(events)
    }

    /// Unlock every achievement whose condition now holds and award its XP.
    ///
    /// Idempotent: an id already in `badges` is never re-evaluated, so a
    /// second call with unchanged stats returns an empty list.
    pub fn check_achievements(&mut self) -> Result<Vec<&'static Achievement>> {
        let mut stats = self.player_stats();
        let mut unlocked = Vec::new();

        for achievement in achievements::catalog() {
            if stats.has_badge(achievement.id) {
                continue;
            }
            if (achievement.condition)(&stats) {
                stats.badges.push(achievement.id.to_string());
                stats.total_xp += achievement.xp_reward;
                unlocked.push(achievement);
                tracing::info!(
                    "Achievement unlocked: {} (+{} XP)",
                    achievement.id,
                    achievement.xp_reward
                );
            }
        }

        if !unlocked.is_empty() {
            stats.current_level = calculate_level(stats.total_xp);
            stats.xp_to_next_level = xp_to_next_level(stats.total_xp);
            self.save(&mut stats)?;
        }

        Ok(unlocked)
    }

    /// Count one completed workout.
    pub fn record_workout_completed(&mut self) -> Result<PlayerStats> {
        let mut stats = self.player_stats();
        stats.total_workouts += 1;
        self.save(&mut stats)?;
        Ok(stats)
    }

    /// Count one compliant diet day.
    pub fn record_diet_day(&mut self) -> Result<PlayerStats> {
        let mut stats = self.player_stats();
        stats.total_diet_days += 1;
        self.save(&mut stats)?;
        Ok(stats)
    }

    /// Count one personal record.
    pub fn record_pr(&mut self) -> Result<PlayerStats> {
        let mut stats = self.player_stats();
        stats.total_prs += 1;
        self.save(&mut stats)?;
        Ok(stats)
    }

    /// Set the current streak; the longest streak only ever rises.
    pub fn update_streaks(&mut self, current_streak: u32) -> Result<PlayerStats> {
        let mut stats = self.player_stats();
        stats.current_streak = current_streak;
        if current_streak > stats.longest_streak {
            stats.longest_streak = current_streak;
        }
        self.save(&mut stats)?;
        Ok(stats)
    }
}
