use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use services::{AppServices, CatalogConfig, Clock, GeneratorConfig, WorkflowError};
use study_core::model::Syllabus;
use study_core::SessionPhase;
use tracing_subscriber::EnvFilter;

mod error;
mod interactive;
mod render;

use error::CliError;
use interactive::QuizRun;

#[derive(Parser)]
#[command(name = "studyai")]
#[command(about = "Turn a syllabus into a study plan and quiz")]
#[command(version)]
struct Cli {
    /// SQLite database holding saved sessions
    #[arg(
        long,
        global = true,
        env = "STUDYAI_DB_URL",
        default_value = "sqlite://studyai.sqlite3"
    )]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a plan and quiz, then take the quiz
    Generate {
        /// Course syllabus text
        #[arg(short, long)]
        syllabus: String,

        /// Save the plan before answering
        #[arg(long)]
        save: bool,

        /// Print the plan only
        #[arg(long)]
        no_quiz: bool,
    },
    /// Show saved sessions, most recent first
    History {
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// List quizzes published on the backend
    Quizzes,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its directory exist.
fn prepare_sqlite_file(db_url: &str) -> Result<(), CliError> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || CliError::InvalidDbUrl {
        raw: db_url.to_string(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let db_url = normalize_sqlite_url(&cli.db);
    prepare_sqlite_file(&db_url)?;

    let generator = GeneratorConfig::from_env()?;
    let catalog = CatalogConfig::from_env()?;
    let app = AppServices::new_sqlite(&db_url, Clock::system(), generator, catalog).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Generate {
            syllabus,
            save,
            no_quiz,
        } => {
            if !app.generation_enabled() {
                return Err(CliError::GenerationDisabled);
            }
            let syllabus = Syllabus::new(syllabus).map_err(study_core::Error::from)?;
            let mut flow = app.workflow();

            if flow.generate(syllabus).await? == SessionPhase::Failed {
                if let Some(message) = flow.session().failure_message() {
                    writeln!(out, "{message}")?;
                }
                return Ok(());
            }
            if let Some(result) = flow.session().result() {
                render::plan(&mut out, result)?;
            }
            if save && flow.save_plan().await? {
                writeln!(out, "Plan and quizzes saved!")?;
            }
            if no_quiz {
                return Ok(());
            }

            let stdin = io::stdin();
            let mut input = stdin.lock();
            match interactive::take_quiz(&mut flow, &mut input, &mut out).await? {
                QuizRun::Submitted(outcome) if outcome.saved => {
                    writeln!(out, "Result saved to history.")?;
                }
                QuizRun::Submitted(_) => {}
                QuizRun::Abandoned => writeln!(out, "Quiz not submitted.")?,
            }
            Ok(())
        }
        Command::History { limit } => {
            let mut sessions = app
                .history()
                .list()
                .await
                .map_err(WorkflowError::from)?;
            if let Some(limit) = limit {
                sessions.truncate(limit);
            }
            render::history(&mut out, &sessions)?;
            Ok(())
        }
        Command::Quizzes => {
            let quizzes = app.catalog().load_or_empty().await;
            render::quiz_list(&mut out, &quizzes)?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_sqlite_urls() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/a.sqlite3"),
            "sqlite:///tmp/a.sqlite3"
        );
    }

    #[test]
    fn absolutizes_plain_paths() {
        assert_eq!(normalize_sqlite_url("/var/db.sqlite3"), "sqlite:///var/db.sqlite3");
        let relative = normalize_sqlite_url("sqlite:data/db.sqlite3");
        assert!(relative.starts_with("sqlite:///"));
        assert!(relative.ends_with("data/db.sqlite3"));
    }

    #[test]
    fn rejects_urls_without_path() {
        assert!(matches!(
            prepare_sqlite_file("postgres://x"),
            Err(CliError::InvalidDbUrl { .. })
        ));
        assert!(matches!(
            prepare_sqlite_file("sqlite://?mode=rwc"),
            Err(CliError::InvalidDbUrl { .. })
        ));
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::try_parse_from(["studyai", "generate", "-s", "Graphs", "--save"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Generate { ref syllabus, save: true, no_quiz: false } if syllabus == "Graphs"
        ));
    }
}
