//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EXERCISE: &str = "../../exercises/kennismaken-a1.toml";
const PARTIAL_ANSWERS: &str = "../../answers/kennismaken-partial.json";
const PERFECT_ANSWERS: &str = "../../answers/kennismaken-perfect.json";
const LEARNING_PATH: &str = "../../paths/a1-basis.toml";

fn oefenen() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("oefenen").unwrap()
}

#[test]
fn validate_valid_exercise() {
    oefenen()
        .arg("validate")
        .arg("--exercise")
        .arg(EXERCISE)
        .assert()
        .success()
        .stdout(predicate::str::contains("10 questions, A1"))
        .stdout(predicate::str::contains("All exercises valid"));
}

#[test]
fn validate_directory() {
    oefenen()
        .arg("validate")
        .arg("--exercise")
        .arg("../../exercises")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kennismaken"))
        .stdout(predicate::str::contains("De of het?"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.toml");
    std::fs::write(
        &path,
        r#"
[exercise]
id = "kort"
title = "Kort"

[[questions]]
id = "q1"
type = "checkbox"
question = "Kies."
correct_answer = "a"
"#,
    )
    .unwrap();

    oefenen()
        .arg("validate")
        .arg("--exercise")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("expected 10 questions, found 1"))
        .stdout(predicate::str::contains("[q1] WARNING"))
        .stdout(predicate::str::contains("2 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    oefenen()
        .arg("validate")
        .arg("--exercise")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn grade_text_summary() {
    oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg(PARTIAL_ANSWERS)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kennismaken [A1]"))
        .stdout(predicate::str::contains("Score: 70% (7 van 10 goed)"))
        .stdout(predicate::str::contains("Niet slecht"))
        .stdout(predicate::str::contains("Fiets en pad").not());
}

#[test]
fn grade_json_output() {
    let output = oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg(PARTIAL_ANSWERS)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["score"], 70);
    assert_eq!(report["total_questions"], 10);
    assert_eq!(report["correct_answers"], 7);
    assert_eq!(report["tips"].as_array().unwrap().len(), 3);

    let feedback = report["question_feedback"].as_array().unwrap();
    let q9 = feedback.iter().find(|f| f["question_id"] == "q9").unwrap();
    assert_eq!(q9["is_correct"], false);
    assert_eq!(q9["user_answer"], "");
    assert_eq!(
        q9["explanation"],
        "Het juiste antwoord is: Woon jij in Leiden?"
    );
}

#[test]
fn grade_markdown_output() {
    oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg(PERFECT_ANSWERS)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("**Score:** 100% (10 van 10 goed)"))
        .stdout(predicate::str::contains("Uitstekend"))
        .stdout(predicate::str::contains("### Tips"));
}

#[test]
fn grade_rejects_unknown_format() {
    oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg(PERFECT_ANSWERS)
        .arg("--format")
        .arg("html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: html"));
}

#[test]
fn grade_writes_report_file() {
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("reports/kennismaken.json");

    oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg(PERFECT_ANSWERS)
        .arg("--output")
        .arg(&report_path)
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(saved["score"], 100);
}

#[test]
fn grade_records_learner_progress() {
    let dir = TempDir::new().unwrap();

    oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg(PERFECT_ANSWERS)
        .arg("--learner")
        .arg("sanne")
        .arg("--progress-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("sanne: 1 oefening(en)"))
        .stderr(predicate::str::contains("Nieuwe badge: Eerste stap"))
        .stderr(predicate::str::contains("Nieuwe badge: Foutloos"));

    let saved = std::fs::read_to_string(dir.path().join("progress-sanne.json")).unwrap();
    let progress: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(progress["attempts"].as_array().unwrap().len(), 1);
    assert_eq!(progress["current_streak"], 1);

    // A second attempt the same day earns nothing new.
    oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg(PARTIAL_ANSWERS)
        .arg("--learner")
        .arg("sanne")
        .arg("--progress-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("sanne: 2 oefening(en)"))
        .stderr(predicate::str::contains("Nieuwe badge").not());
}

#[test]
fn grade_records_learner_with_spaces_in_name() {
    let dir = TempDir::new().unwrap();

    oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg(PERFECT_ANSWERS)
        .arg("--learner")
        .arg("Anna de Vries")
        .arg("--progress-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Anna de Vries: 1 oefening(en)"));

    let saved =
        std::fs::read_to_string(dir.path().join("progress-Anna-20de-20Vries.json")).unwrap();
    let progress: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(progress["learner"], "Anna de Vries");
}

#[test]
fn grade_rejects_blank_learner() {
    let dir = TempDir::new().unwrap();

    oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg(PERFECT_ANSWERS)
        .arg("--learner")
        .arg("  ")
        .arg("--progress-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("learner name is empty"));
}

#[test]
fn grade_missing_answers_file() {
    oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg("no_such_answers.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read answers file"));
}

#[test]
fn levels_lists_all_six() {
    oefenen()
        .arg("levels")
        .assert()
        .success()
        .stdout(predicate::str::contains("A1"))
        .stdout(predicate::str::contains("C2"))
        .stdout(predicate::str::contains("basisgebruiker"))
        .stdout(predicate::str::contains("vaardige gebruiker"));
}

#[test]
fn path_shows_progress_and_next_step() {
    let dir = TempDir::new().unwrap();

    oefenen()
        .arg("path")
        .arg("--file")
        .arg(LEARNING_PATH)
        .arg("--learner")
        .arg("sanne")
        .arg("--progress-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Basis A1 [A1]"))
        .stdout(predicate::str::contains("sanne: 0 van 2 stappen gehaald (0%)"))
        .stdout(predicate::str::contains("Volgende oefening: Kennismaken (kennismaken)"));

    oefenen()
        .arg("grade")
        .arg("--exercise")
        .arg(EXERCISE)
        .arg("--answers")
        .arg(PARTIAL_ANSWERS)
        .arg("--learner")
        .arg("sanne")
        .arg("--progress-dir")
        .arg(dir.path())
        .assert()
        .success();

    oefenen()
        .arg("path")
        .arg("--file")
        .arg(LEARNING_PATH)
        .arg("--learner")
        .arg("sanne")
        .arg("--progress-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("gehaald"))
        .stdout(predicate::str::contains("70%"))
        .stdout(predicate::str::contains("sanne: 1 van 2 stappen gehaald (50%)"))
        .stdout(predicate::str::contains("Volgende oefening: De of het? (lidwoorden)"));
}

#[test]
fn path_missing_file_fails() {
    oefenen()
        .arg("path")
        .arg("--file")
        .arg("no_such_path.toml")
        .arg("--learner")
        .arg("sanne")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read learning path"));
}

#[test]
fn serve_with_missing_config_fails() {
    oefenen()
        .arg("serve")
        .arg("--config")
        .arg("no_such_config.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    oefenen()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created oefenen.toml"))
        .stdout(predicate::str::contains("Created exercises/example.toml"));

    assert!(dir.path().join("oefenen.toml").exists());
    assert!(dir.path().join("exercises/example.toml").exists());

    oefenen()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--exercise")
        .arg("exercises/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All exercises valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    oefenen()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    oefenen()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    oefenen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dutch language practice toolkit"));
}

#[test]
fn version_output() {
    oefenen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("oefenen"));
}
