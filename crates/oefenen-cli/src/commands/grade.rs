//! The `oefenen grade` command.

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Utc;

use oefenen_core::grader::grade_exercise;
use oefenen_core::model::ExerciseData;
use oefenen_core::parser::{parse_answers, parse_exercise};
use oefenen_core::progress::{load_progress, save_progress, JsonFileStore};
use oefenen_core::report::FeedbackReport;

pub fn execute(
    exercise_path: PathBuf,
    answers_path: PathBuf,
    format: String,
    learner: Option<String>,
    progress_dir: PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    if !matches!(format.as_str(), "text" | "json" | "markdown" | "md") {
        bail!("unknown format: {format} (expected text, json or markdown)");
    }

    let exercise = parse_exercise(&exercise_path)?;
    let answers = parse_answers(&answers_path)?;

    let report = grade_exercise(&exercise, &answers);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => print_summary(&exercise, &report),
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Report written to {}", path.display());
    }

    if let Some(learner) = learner {
        let store = JsonFileStore::new(progress_dir);
        let mut progress = load_progress(&store, &learner)?;
        let earned = progress.record_attempt(&exercise.id, &report, Utc::now());
        save_progress(&store, &progress)?;

        eprintln!(
            "\n{learner}: {} oefening(en), reeks van {} dag(en)",
            progress.attempts.len(),
            progress.current_streak
        );
        for badge in earned {
            eprintln!("  Nieuwe badge: {badge}");
        }
    }

    Ok(())
}

fn print_summary(exercise: &ExerciseData, report: &FeedbackReport) {
    use comfy_table::{Cell, Table};

    let level = exercise
        .level
        .map(|l| format!(" [{l}]"))
        .unwrap_or_default();
    println!("{}{level}", exercise.title);
    println!(
        "Score: {}% ({} van {} goed)",
        report.score, report.correct_answers, report.total_questions
    );

    let mut table = Table::new();
    table.set_header(vec!["Vraag", "Resultaat", "Jouw antwoord", "Juiste antwoord"]);

    for q in &report.question_feedback {
        table.add_row(vec![
            Cell::new(&q.question_id),
            Cell::new(if q.is_correct { "goed" } else { "fout" }),
            Cell::new(q.user_answer.display()),
            Cell::new(q.correct_answer.display()),
        ]);
    }

    println!("\n{table}");

    let mistakes: Vec<_> = report.mistakes().collect();
    if !mistakes.is_empty() {
        println!("\nUitleg:");
        for q in mistakes {
            println!("  {}: {}", q.question_id, q.explanation);
        }
    }

    println!("\n{}", report.general_feedback);
    for tip in &report.tips {
        println!("  - {tip}");
    }
}
