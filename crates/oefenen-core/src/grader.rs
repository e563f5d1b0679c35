//! Answer grading.
//!
//! Each question is graded on its own by a comparison rule chosen by its
//! [`QuestionKind`]. Grading never fails: missing or mistyped answers are
//! compared as empty and come out incorrect.

use crate::model::{
    AnswerValue, ExerciseData, ExerciseQuestion, QuestionKind, SwipeItem, UserAnswers,
};
use crate::report::{FeedbackReport, QuestionFeedback};

/// Characters ignored when comparing dictation answers.
const DICTATION_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Separator between the parts of a word-math answer.
const WORD_MATH_SEPARATOR: char = '|';

/// Grade every question of an exercise and compose the report.
pub fn grade_exercise(exercise: &ExerciseData, answers: &UserAnswers) -> FeedbackReport {
    let question_feedback: Vec<QuestionFeedback> = exercise
        .questions
        .iter()
        .map(|q| grade_question(q, answers.get(&q.id)))
        .collect();

    let report = FeedbackReport::from_feedback(question_feedback);
    tracing::debug!(
        exercise = %exercise.id,
        score = report.score,
        correct = report.correct_answers,
        total = report.total_questions,
        "graded exercise"
    );
    report
}

/// Grade a single question against the learner's answer, if any.
pub fn grade_question(question: &ExerciseQuestion, answer: Option<&AnswerValue>) -> QuestionFeedback {
    let correct = &question.correct_answer;

    let is_correct = match &question.kind {
        QuestionKind::Checkbox => sets_match(list_or_empty(answer), correct.as_list().unwrap_or(&[])),
        QuestionKind::SwipeSort { items, .. } => {
            swipe_sort_matches(list_or_empty(answer), correct.as_list().unwrap_or(&[]), items)
        }
        QuestionKind::MemoryMatch { .. } => {
            list_or_empty(answer) == correct.as_list().unwrap_or(&[])
        }
        QuestionKind::Jigsaw { correct_order, .. } => {
            parse_indices(list_or_empty(answer)) == *correct_order
        }
        QuestionKind::Dictation { .. } => {
            normalize_dictation(&scalar_or_empty(answer)) == normalize_dictation(&correct.to_text())
        }
        QuestionKind::WordMath { .. } => {
            split_word_math(&scalar_or_empty(answer)) == split_word_math(&correct.to_text())
        }
        QuestionKind::Fill
        | QuestionKind::MultipleChoice
        | QuestionKind::Transformation
        | QuestionKind::ImageDescription { .. }
        | QuestionKind::Other => normalize(&scalar_or_empty(answer)) == normalize(&correct.to_text()),
    };

    let user_answer = match answer {
        Some(a) => a.clone(),
        None if matches!(question.kind, QuestionKind::Checkbox) => AnswerValue::List(Vec::new()),
        None => AnswerValue::Text(String::new()),
    };

    let explanation = question
        .explanation
        .clone()
        .unwrap_or_else(|| format!("Het juiste antwoord is: {}", correct.display()));

    QuestionFeedback {
        question_id: question.id.clone(),
        is_correct,
        user_answer,
        correct_answer: correct.clone(),
        explanation,
    }
}

fn list_or_empty(answer: Option<&AnswerValue>) -> &[String] {
    answer.and_then(AnswerValue::as_list).unwrap_or(&[])
}

fn scalar_or_empty(answer: Option<&AnswerValue>) -> String {
    answer.and_then(AnswerValue::as_scalar).unwrap_or_default()
}

/// Order-independent comparison.
fn sets_match(user: &[String], correct: &[String]) -> bool {
    if user.len() != correct.len() {
        return false;
    }
    let mut user = user.to_vec();
    let mut correct = correct.to_vec();
    user.sort();
    correct.sort();
    user == correct
}

fn swipe_sort_matches(user: &[String], correct: &[String], items: &[SwipeItem]) -> bool {
    if user.len() != correct.len() {
        return false;
    }
    items.iter().enumerate().all(|(i, item)| {
        let expected = item.target.as_deref().or(correct.get(i).map(String::as_str));
        match (user.get(i), expected) {
            (Some(got), Some(expected)) => got == expected,
            _ => false,
        }
    })
}

/// Piece indices as submitted; entries that are not integers are dropped.
fn parse_indices(user: &[String]) -> Vec<i64> {
    user.iter().filter_map(|s| s.trim().parse::<i64>().ok()).collect()
}

fn normalize(s: &str) -> String {
    s.to_lowercase().trim().to_string()
}

fn normalize_dictation(s: &str) -> String {
    normalize(s)
        .chars()
        .filter(|c| !DICTATION_PUNCTUATION.contains(c))
        .collect()
}

fn split_word_math(s: &str) -> Vec<String> {
    normalize(s)
        .split(WORD_MATH_SEPARATOR)
        .map(|part| part.trim().to_string())
        .collect()
}
