//! Ordered sequences of exercises for one CEFR level.

use serde::{Deserialize, Serialize};

use crate::cefr::CefrLevel;
use crate::gamification::LearnerProgress;

/// Score a step needs unless it sets its own.
pub const DEFAULT_PASS_SCORE: u32 = 60;

fn default_pass_score() -> u32 {
    DEFAULT_PASS_SCORE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub exercise_id: String,
    pub title: String,
    #[serde(default = "default_pass_score")]
    pub pass_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub id: String,
    pub name: String,
    pub level: CefrLevel,
    #[serde(default)]
    pub steps: Vec<PathStep>,
}

/// How far a learner got along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathProgress<'a> {
    pub completed: usize,
    pub total: usize,
    /// Rounded percentage of completed steps; 0 for an empty path.
    pub percent: u32,
    /// First step not yet passed.
    pub next: Option<&'a PathStep>,
}

impl LearningPath {
    /// A step counts as done once the learner's best score reaches its
    /// pass score. Steps may be done out of order.
    pub fn progress<'a>(&'a self, learner: &LearnerProgress) -> PathProgress<'a> {
        let is_done = |step: &PathStep| {
            learner
                .best_score(&step.exercise_id)
                .is_some_and(|best| best >= step.pass_score)
        };

        let completed = self.steps.iter().filter(|s| is_done(*s)).count();
        let total = self.steps.len();

        PathProgress {
            completed,
            total,
            percent: crate::report::score_percentage(completed, total),
            next: self.steps.iter().find(|s| !is_done(*s)),
        }
    }

    pub fn is_complete(&self, learner: &LearnerProgress) -> bool {
        self.progress(learner).next.is_none()
    }
}
