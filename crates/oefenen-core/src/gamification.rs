//! Streaks, badges and attempt history for a learner.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::report::FeedbackReport;

/// An achievement earned once and kept forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FirstExercise,
    PerfectScore,
    TenExercises,
    ThreeDayStreak,
    SevenDayStreak,
}

impl Badge {
    pub fn title(&self) -> &'static str {
        match self {
            Badge::FirstExercise => "Eerste stap",
            Badge::PerfectScore => "Foutloos",
            Badge::TenExercises => "Doorzetter",
            Badge::ThreeDayStreak => "Drie dagen op rij",
            Badge::SevenDayStreak => "Een week op rij",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One completed exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: Uuid,
    pub exercise_id: String,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

/// Everything tracked about a learner between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerProgress {
    pub learner: String,
    #[serde(default)]
    pub attempts: Vec<AttemptRecord>,
    /// Consecutive days with at least one attempt, ending at `last_active`.
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_active: Option<NaiveDate>,
    #[serde(default)]
    pub badges: Vec<Badge>,
}

impl LearnerProgress {
    pub fn new(learner: impl Into<String>) -> Self {
        Self {
            learner: learner.into(),
            attempts: Vec::new(),
            current_streak: 0,
            longest_streak: 0,
            last_active: None,
            badges: Vec::new(),
        }
    }

    /// Record a graded exercise and return the badges it earned.
    pub fn record_attempt(
        &mut self,
        exercise_id: &str,
        report: &FeedbackReport,
        now: DateTime<Utc>,
    ) -> Vec<Badge> {
        self.attempts.push(AttemptRecord {
            id: Uuid::new_v4(),
            exercise_id: exercise_id.to_string(),
            score: report.score,
            completed_at: now,
        });
        self.update_streak(now.date_naive());

        let mut earned = Vec::new();
        let mut award = |badge: Badge, condition: bool, badges: &mut Vec<Badge>| {
            if condition && !badges.contains(&badge) {
                badges.push(badge);
                earned.push(badge);
            }
        };

        award(Badge::FirstExercise, !self.attempts.is_empty(), &mut self.badges);
        award(Badge::PerfectScore, report.score == 100, &mut self.badges);
        award(Badge::TenExercises, self.attempts.len() >= 10, &mut self.badges);
        award(Badge::ThreeDayStreak, self.current_streak >= 3, &mut self.badges);
        award(Badge::SevenDayStreak, self.current_streak >= 7, &mut self.badges);

        if !earned.is_empty() {
            tracing::info!(learner = %self.learner, ?earned, "badges earned");
        }
        earned
    }

    fn update_streak(&mut self, today: NaiveDate) {
        self.current_streak = match self.last_active {
            Some(last) if last == today => self.current_streak.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.current_streak + 1,
            // Clock moved backwards: keep the streak as is.
            Some(last) if last > today => return,
            _ => 1,
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_active = Some(today);
    }

    /// Best score reached on an exercise, if it was ever attempted.
    pub fn best_score(&self, exercise_id: &str) -> Option<u32> {
        self.attempts
            .iter()
            .filter(|a| a.exercise_id == exercise_id)
            .map(|a| a.score)
            .max()
    }

    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }
}
