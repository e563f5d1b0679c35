//! Exercise file parser.
//!
//! Loads exercises from TOML or JSON files and directories, loads learner
//! answer files and learning paths, and validates exercises for common
//! authoring mistakes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cefr::CefrLevel;
use crate::learning_path::LearningPath;
use crate::model::{
    AnswerValue, ExerciseData, ExerciseQuestion, MemoryPair, QuestionKind, QuestionType,
    SwipeItem, UserAnswers, EXERCISE_QUESTION_COUNT,
};

/// Intermediate structure for parsing exercise files.
#[derive(Debug, Deserialize)]
struct RawExerciseFile {
    exercise: RawExerciseHeader,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawExerciseHeader {
    id: String,
    title: String,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    topic: String,
    #[serde(default)]
    introduction: String,
    #[serde(default)]
    explanation: String,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: String,
    #[serde(rename = "type")]
    question_type: String,
    question: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: AnswerValue,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    items: Vec<SwipeItem>,
    #[serde(default)]
    targets: Vec<String>,
    #[serde(default)]
    pairs: Vec<MemoryPair>,
    #[serde(default)]
    pieces: Vec<String>,
    #[serde(default)]
    correct_order: Vec<i64>,
    #[serde(default)]
    parts: Vec<String>,
    #[serde(default)]
    audio_text: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl RawQuestion {
    fn into_question(self) -> ExerciseQuestion {
        let question_type: QuestionType = match self.question_type.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        };

        let kind = match question_type {
            QuestionType::Fill => QuestionKind::Fill,
            QuestionType::MultipleChoice => QuestionKind::MultipleChoice,
            QuestionType::Checkbox => QuestionKind::Checkbox,
            QuestionType::SwipeSort => QuestionKind::SwipeSort {
                items: self.items,
                targets: self.targets,
            },
            QuestionType::MemoryMatch => QuestionKind::MemoryMatch { pairs: self.pairs },
            QuestionType::Jigsaw => QuestionKind::Jigsaw {
                pieces: self.pieces,
                correct_order: self.correct_order,
            },
            QuestionType::Dictation => QuestionKind::Dictation {
                audio_text: self.audio_text,
            },
            QuestionType::ImageDescription => QuestionKind::ImageDescription {
                image_url: self.image_url,
            },
            QuestionType::Transformation => QuestionKind::Transformation,
            QuestionType::WordMath => QuestionKind::WordMath { parts: self.parts },
            QuestionType::Other => {
                tracing::debug!(
                    "question '{}' has unknown type '{}', grading as text",
                    self.id,
                    self.question_type
                );
                QuestionKind::Other
            }
        };

        ExerciseQuestion {
            id: self.id,
            kind,
            question: self.question,
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
        }
    }
}

/// Parse a single exercise file. `.json` files are read as JSON, anything
/// else as TOML.
pub fn parse_exercise(path: &Path) -> Result<ExerciseData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exercise file: {}", path.display()))?;

    parse_exercise_str(&content, path)
}

/// Parse exercise file contents; the format is chosen by the extension of
/// `source_path`.
pub fn parse_exercise_str(content: &str, source_path: &Path) -> Result<ExerciseData> {
    let parsed: RawExerciseFile = if is_json(source_path) {
        serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?
    } else {
        toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?
    };

    let level = parsed
        .exercise
        .level
        .map(|l| l.parse::<CefrLevel>().map_err(|e| anyhow::anyhow!("{}", e)))
        .transpose()
        .with_context(|| format!("invalid level in {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(RawQuestion::into_question)
        .collect();

    Ok(ExerciseData {
        id: parsed.exercise.id,
        title: parsed.exercise.title,
        level,
        topic: parsed.exercise.topic,
        introduction: parsed.exercise.introduction,
        explanation: parsed.exercise.explanation,
        questions,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn is_exercise_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "toml" || ext == "json")
}

/// Recursively load all exercise files from a directory.
pub fn load_exercise_directory(dir: &Path) -> Result<Vec<ExerciseData>> {
    let mut exercises = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            exercises.extend(load_exercise_directory(&path)?);
        } else if is_exercise_file(&path) {
            match parse_exercise(&path) {
                Ok(exercise) => exercises.push(exercise),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(exercises)
}

/// Parse a learning path file; `.json` files are read as JSON, anything
/// else as TOML.
pub fn parse_learning_path(path: &Path) -> Result<LearningPath> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read learning path: {}", path.display()))?;

    if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("failed to parse TOML: {}", path.display()))
    }
}

/// Load a learner's answers from a JSON object keyed by question id.
pub fn parse_answers(path: &Path) -> Result<UserAnswers> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
}

/// A warning from exercise validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate an exercise for common issues.
pub fn validate_exercise(exercise: &ExerciseData) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if exercise.questions.len() != EXERCISE_QUESTION_COUNT {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "expected {EXERCISE_QUESTION_COUNT} questions, found {}",
                exercise.questions.len()
            ),
        });
    }

    let mut seen_ids = std::collections::HashSet::new();
    for q in &exercise.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("duplicate question ID: {}", q.id),
            ));
        }
    }

    for q in &exercise.questions {
        if q.question.trim().is_empty() {
            warnings.push(ValidationWarning::question(&q.id, "question text is empty"));
        }

        match &q.kind {
            QuestionKind::Checkbox if q.correct_answer.as_list().is_none() => {
                warnings.push(ValidationWarning::question(
                    &q.id,
                    "checkbox correct_answer should be a list",
                ));
            }
            QuestionKind::SwipeSort { items, .. } if items.is_empty() => {
                warnings.push(ValidationWarning::question(&q.id, "swipe-sort has no items"));
            }
            QuestionKind::MemoryMatch { pairs } if pairs.is_empty() => {
                warnings.push(ValidationWarning::question(&q.id, "memory-match has no pairs"));
            }
            QuestionKind::Jigsaw { correct_order, .. } if correct_order.is_empty() => {
                warnings.push(ValidationWarning::question(
                    &q.id,
                    "jigsaw has no correct_order",
                ));
            }
            QuestionKind::WordMath { parts } if parts.is_empty() => {
                warnings.push(ValidationWarning::question(&q.id, "word-math has no parts"));
            }
            QuestionKind::Other => {
                warnings.push(ValidationWarning::question(
                    &q.id,
                    "unknown question type, graded as text",
                ));
            }
            _ => {}
        }
    }

    warnings
}
