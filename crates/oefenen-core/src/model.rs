//! Core data model types for oefenen.
//!
//! These are the types the grader, the loader and the CLI share to represent
//! exercises, questions and learner answers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::cefr::CefrLevel;

/// Number of questions in a well-formed exercise.
pub const EXERCISE_QUESTION_COUNT: usize = 10;

/// A submitted or expected answer.
///
/// Exercise files and answer files write these untagged: a plain string,
/// a number, or an array. Array entries may be strings or numbers; numbers
/// are stored in their decimal form, so `[0, 2, 1]` reads as `["0", "2", "1"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Number(f64),
    List(#[serde(deserialize_with = "scalar_list")] Vec<String>),
}

fn scalar_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(f64),
    }

    let items = Vec::<Scalar>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .map(|item| match item {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
        })
        .collect())
}

impl AnswerValue {
    /// Stringify the value. Lists are joined with `,`.
    pub fn to_text(&self) -> String {
        match self {
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::Number(n) => n.to_string(),
            AnswerValue::List(items) => items.join(","),
        }
    }

    /// The value as a scalar string; `None` for lists.
    pub fn as_scalar(&self) -> Option<String> {
        match self {
            AnswerValue::Text(s) => Some(s.clone()),
            AnswerValue::Number(n) => Some(n.to_string()),
            AnswerValue::List(_) => None,
        }
    }

    /// The value as a sequence; `None` for scalars.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Human-readable form used in explanations (lists joined with `, `).
    pub fn display(&self) -> String {
        match self {
            AnswerValue::List(items) => items.join(", "),
            other => other.to_text(),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        AnswerValue::List(items.into_iter().map(String::from).collect())
    }
}

/// The grading strategy tag of a question, without its auxiliary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Fill,
    MultipleChoice,
    Checkbox,
    SwipeSort,
    MemoryMatch,
    Jigsaw,
    Dictation,
    ImageDescription,
    Transformation,
    WordMath,
    Other,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            QuestionType::Fill => "fill",
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::Checkbox => "checkbox",
            QuestionType::SwipeSort => "swipe-sort",
            QuestionType::MemoryMatch => "memory-match",
            QuestionType::Jigsaw => "jigsaw",
            QuestionType::Dictation => "dictation",
            QuestionType::ImageDescription => "image-description",
            QuestionType::Transformation => "transformation",
            QuestionType::WordMath => "word-math",
            QuestionType::Other => "other",
        };
        f.write_str(tag)
    }
}

impl FromStr for QuestionType {
    type Err = std::convert::Infallible;

    /// Unknown tags parse as [`QuestionType::Other`] and are graded as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "fill" => QuestionType::Fill,
            "multiple-choice" => QuestionType::MultipleChoice,
            "checkbox" => QuestionType::Checkbox,
            "swipe-sort" => QuestionType::SwipeSort,
            "memory-match" => QuestionType::MemoryMatch,
            "jigsaw" => QuestionType::Jigsaw,
            "dictation" => QuestionType::Dictation,
            "image-description" => QuestionType::ImageDescription,
            "transformation" => QuestionType::Transformation,
            "word-math" => QuestionType::WordMath,
            _ => QuestionType::Other,
        })
    }
}

/// One card in a swipe-sort question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeItem {
    /// The word or phrase shown on the card.
    pub text: String,
    /// The label this card belongs to. When absent the positional value of
    /// the correct answer is used.
    #[serde(default)]
    pub target: Option<String>,
}

/// A pair of cards that belong together in a memory-match question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryPair {
    pub left: String,
    pub right: String,
}

/// A question type together with the data only that type needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    Fill,
    MultipleChoice,
    Checkbox,
    SwipeSort {
        #[serde(default)]
        items: Vec<SwipeItem>,
        #[serde(default)]
        targets: Vec<String>,
    },
    MemoryMatch {
        #[serde(default)]
        pairs: Vec<MemoryPair>,
    },
    Jigsaw {
        #[serde(default)]
        pieces: Vec<String>,
        #[serde(default)]
        correct_order: Vec<i64>,
    },
    Dictation {
        #[serde(default)]
        audio_text: Option<String>,
    },
    ImageDescription {
        #[serde(default)]
        image_url: Option<String>,
    },
    Transformation,
    WordMath {
        #[serde(default)]
        parts: Vec<String>,
    },
    #[serde(other)]
    Other,
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::Fill => QuestionType::Fill,
            QuestionKind::MultipleChoice => QuestionType::MultipleChoice,
            QuestionKind::Checkbox => QuestionType::Checkbox,
            QuestionKind::SwipeSort { .. } => QuestionType::SwipeSort,
            QuestionKind::MemoryMatch { .. } => QuestionType::MemoryMatch,
            QuestionKind::Jigsaw { .. } => QuestionType::Jigsaw,
            QuestionKind::Dictation { .. } => QuestionType::Dictation,
            QuestionKind::ImageDescription { .. } => QuestionType::ImageDescription,
            QuestionKind::Transformation => QuestionType::Transformation,
            QuestionKind::WordMath { .. } => QuestionType::WordMath,
            QuestionKind::Other => QuestionType::Other,
        }
    }
}

/// One graded item of an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseQuestion {
    /// Identifier, unique within the exercise.
    pub id: String,
    /// Grading strategy and type-specific data.
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// The prompt shown to the learner.
    pub question: String,
    /// Selectable options, for choice-style questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// The answer key.
    pub correct_answer: AnswerValue,
    /// Why the answer is what it is.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// An exercise: a fixed run of questions plus introductory text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseData {
    pub id: String,
    pub title: String,
    /// Difficulty on the CEFR scale.
    #[serde(default)]
    pub level: Option<CefrLevel>,
    #[serde(default)]
    pub topic: String,
    /// Text shown before the first question.
    #[serde(default)]
    pub introduction: String,
    /// Grammar or vocabulary explanation that goes with the exercise.
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub questions: Vec<ExerciseQuestion>,
}

/// Answers submitted by a learner, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAnswers(BTreeMap<String, AnswerValue>);

impl UserAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, answer: impl Into<AnswerValue>) {
        self.0.insert(question_id.into(), answer.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, AnswerValue)> for UserAnswers {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
