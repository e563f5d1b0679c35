//! oefenen-core: exercise model, answer grading and feedback.
//!
//! This crate defines the exercise data model, the per-question-type
//! grading rules, score-band feedback, and the learner progress types the
//! rest of oefenen builds on.

pub mod cefr;
pub mod feedback;
pub mod gamification;
pub mod grader;
pub mod learning_path;
pub mod model;
pub mod parser;
pub mod progress;
pub mod report;
