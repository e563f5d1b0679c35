//! Feedback report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::feedback;
use crate::model::AnswerValue;

/// Grading result for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionFeedback {
    pub question_id: String,
    pub is_correct: bool,
    /// The answer as submitted; empty when nothing was submitted.
    pub user_answer: AnswerValue,
    pub correct_answer: AnswerValue,
    pub explanation: String,
}

/// Aggregate result of one grading pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    /// Percentage of correct answers, rounded.
    pub score: u32,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub question_feedback: Vec<QuestionFeedback>,
    pub general_feedback: String,
    pub tips: Vec<String>,
}

/// `round(100 * correct / total)`, or 0 for an empty exercise.
pub fn score_percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * correct as f64 / total as f64).round() as u32
}

impl FeedbackReport {
    /// Build the report from per-question results, deriving the counts,
    /// the score and the narrative feedback.
    pub fn from_feedback(question_feedback: Vec<QuestionFeedback>) -> Self {
        let total_questions = question_feedback.len();
        let correct_answers = question_feedback.iter().filter(|f| f.is_correct).count();
        let score = score_percentage(correct_answers, total_questions);
        let (general_feedback, tips) = feedback::compose(score);

        Self {
            score,
            total_questions,
            correct_answers,
            question_feedback,
            general_feedback,
            tips,
        }
    }

    /// Question results the learner got wrong.
    pub fn mistakes(&self) -> impl Iterator<Item = &QuestionFeedback> {
        self.question_feedback.iter().filter(|f| !f.is_correct)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: FeedbackReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Score:** {}% ({} van {} goed)\n\n",
            self.score, self.correct_answers, self.total_questions
        ));
        md.push_str(&format!("{}\n\n", self.general_feedback));

        if !self.question_feedback.is_empty() {
            md.push_str("| Vraag | Resultaat | Jouw antwoord | Juiste antwoord |\n");
            md.push_str("|-------|-----------|---------------|-----------------|\n");
            for f in &self.question_feedback {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    f.question_id,
                    if f.is_correct { "goed" } else { "fout" },
                    escape_cell(&f.user_answer.display()),
                    escape_cell(&f.correct_answer.display()),
                ));
            }
            md.push('\n');
        }

        if !self.tips.is_empty() {
            md.push_str("### Tips\n\n");
            for tip in &self.tips {
                md.push_str(&format!("- {tip}\n"));
            }
        }

        md
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
