//! oefenen CLI: grade exercises, check exercise files, follow learning
//! paths and run the web proxy.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "oefenen", version, about = "Dutch language practice toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a learner's answers against an exercise
    Grade {
        /// Path to the exercise file (.toml or .json)
        #[arg(long)]
        exercise: PathBuf,

        /// Path to the answers JSON file
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Record the attempt in this learner's progress
        #[arg(long)]
        learner: Option<String>,

        /// Directory holding learner progress files
        #[arg(long, default_value = "./oefenen-progress")]
        progress_dir: PathBuf,

        /// Also write the JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate exercise files
    Validate {
        /// Path to an exercise file or directory
        #[arg(long)]
        exercise: PathBuf,
    },

    /// List CEFR levels
    Levels,

    /// Show a learner's progress along a learning path
    Path {
        /// Path to the learning path file (.toml or .json)
        #[arg(long)]
        file: PathBuf,

        /// Learner whose progress to show
        #[arg(long)]
        learner: String,

        /// Directory holding learner progress files
        #[arg(long, default_value = "./oefenen-progress")]
        progress_dir: PathBuf,
    },

    /// Run the chat and news proxy server
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the listen address, e.g. 0.0.0.0:8080
        #[arg(long)]
        bind: Option<String>,
    },

    /// Create a starter config and example exercise
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("oefenen=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            exercise,
            answers,
            format,
            learner,
            progress_dir,
            output,
        } => commands::grade::execute(exercise, answers, format, learner, progress_dir, output),
        Commands::Validate { exercise } => commands::validate::execute(exercise),
        Commands::Levels => commands::levels::execute(),
        Commands::Path {
            file,
            learner,
            progress_dir,
        } => commands::path::execute(file, learner, progress_dir),
        Commands::Serve { config, bind } => commands::serve::execute(config, bind).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
