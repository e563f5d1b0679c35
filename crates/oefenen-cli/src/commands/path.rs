//! The `oefenen path` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use oefenen_core::parser::parse_learning_path;
use oefenen_core::progress::{load_progress, JsonFileStore};

pub fn execute(file: PathBuf, learner: String, progress_dir: PathBuf) -> Result<()> {
    let learning_path = parse_learning_path(&file)?;
    let store = JsonFileStore::new(progress_dir);
    let progress = load_progress(&store, &learner)?;

    println!("{} [{}]", learning_path.name, learning_path.level);

    let mut table = Table::new();
    table.set_header(vec!["Stap", "Oefening", "Beste score", "Nodig", "Status"]);

    for (i, step) in learning_path.steps.iter().enumerate() {
        let best = progress.best_score(&step.exercise_id);
        let status = match best {
            Some(score) if score >= step.pass_score => "gehaald",
            Some(_) => "bezig",
            None => "open",
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&step.title),
            Cell::new(best.map(|s| format!("{s}%")).unwrap_or_else(|| "-".to_string())),
            Cell::new(format!("{}%", step.pass_score)),
            Cell::new(status),
        ]);
    }

    println!("\n{table}");

    let summary = learning_path.progress(&progress);
    println!(
        "\n{learner}: {} van {} stappen gehaald ({}%)",
        summary.completed, summary.total, summary.percent
    );
    match summary.next {
        Some(step) => println!("Volgende oefening: {} ({})", step.title, step.exercise_id),
        None => println!("Leerpad voltooid!"),
    }

    Ok(())
}
