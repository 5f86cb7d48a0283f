use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flexquest::catalog::{Category, DataProvider, Difficulty, ExerciseFilter};
use flexquest::progress::{leaderboard, missing_prerequisites, standings};
use flexquest::scoring::{SimulatedRunner, check_answer};
use flexquest::{Config, ExerciseSession, QuestError, report};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flexquest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List exercises
    List {
        /// Only this category (e.g. flexbox, grid)
        #[arg(short, long)]
        category: Option<Category>,
        /// Only this difficulty (e.g. beginner, expert)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        /// Search titles, descriptions and tags
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show an exercise
    Show {
        /// Exercise id or part of its title
        exercise: String,
        /// Also print the hints
        #[arg(long)]
        hints: bool,
    },
    /// Submit a solution and run the (simulated) tests
    Run {
        /// Exercise id or part of its title
        exercise: String,
        /// File containing the solution
        #[arg(long)]
        code: Option<PathBuf>,
        /// Seconds spent on the exercise
        #[arg(short, long, default_value_t = 0)]
        elapsed: u64,
        /// Number of runs to perform (later runs count as retries)
        #[arg(short, long, default_value_t = 1)]
        attempts: u32,
        /// Seed for the simulated runner
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Answer a quiz
    Answer {
        /// Exercise id or part of its title
        exercise: String,
        /// The option text or its number in the list
        choice: String,
    },
    /// Show level and rank for an XP total
    Level { xp: u64 },
    /// Show the leaderboard
    Leaderboard,
    /// Show your profile
    Profile,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flexquest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<QuestError>() {
            // Mistyped ids and options get a plain message and a usage exit code
            Some(err) if err.is_user_error() => {
                eprintln!("{}", err);
                ExitCode::from(2)
            }
            _ => {
                eprintln!("Error: {:?}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let catalog = config.load_catalog()?;
    let levels = config.level_calculator()?;
    let user = catalog.current_user();
    let mut learner = user.clone();

    match cli.command {
        Commands::List { category, difficulty, search } => {
            let filter = ExerciseFilter { category, difficulty, ..Default::default() }
                .with_query(search.unwrap_or_default());
            let views = filter.apply(catalog.exercises(), &user.completed);
            print!("{}", report::exercise_list(&views));
        }
        Commands::Show { exercise, hints } => {
            let exercise = catalog.resolve(&exercise)?;
            let missing = missing_prerequisites(&exercise.prerequisites, &user.completed);
            print!("{}", report::exercise_detail(exercise, &missing));
            if hints {
                println!("\nHints:");
                for (idx, hint) in exercise.hints.iter().enumerate() {
                    println!("  {}. {}", idx + 1, hint);
                }
            }
        }
        Commands::Run { exercise, code, elapsed, attempts, seed } => {
            let exercise = catalog.resolve(&exercise)?;
            let id = exercise.id;
            let missing = missing_prerequisites(&exercise.prerequisites, &user.completed);
            if !missing.is_empty() {
                tracing::warn!("Exercise {} is still locked (needs {:?})", id, missing);
            }

            let code = match code {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read solution from {:?}", path))?,
                None => String::new(),
            };

            let mut runner = match seed {
                Some(seed) => SimulatedRunner::seeded(config.runner.pass_rate, seed),
                None => config.simulated_runner(),
            };
            let mut session = ExerciseSession::new(exercise.clone())
                .with_calculator(config.score_calculator())
                .with_run_delay(config.run_delay())
                .with_next_exercise(catalog.next_after(id).map(|e| e.id));

            let cancel = CancellationToken::new();
            let ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    ctrl_c.cancel();
                }
            });

            let elapsed = Duration::from_secs(elapsed);
            for _ in 0..attempts.max(1) {
                println!("Running tests for #{} {}...", exercise.id, exercise.title);
                let outcome = match session.run_tests(&mut runner, &code, elapsed, &cancel).await {
                    Ok(outcome) => outcome,
                    Err(QuestError::Cancelled) => {
                        println!("Run cancelled.");
                        break;
                    }
                    Err(e) => return Err(e.into()),
                };
                print!("{}", report::outcome(&outcome, elapsed));
                if let Some(event) = &outcome.completion {
                    let levelled_up = learner.record_completion(id, event.score, &levels);
                    let info = learner.level(&levels);
                    print!("{}", report::xp_gain(&learner, event.score, &info, levelled_up));
                    break;
                }
            }
        }
        Commands::Answer { exercise, choice } => {
            let exercise = catalog.resolve(&exercise)?;
            let verdict = check_answer(exercise, &choice, &config.score_calculator())?;
            print!("{}", report::verdict(&verdict));
            if verdict.correct {
                let levelled_up = learner.record_completion(exercise.id, verdict.score, &levels);
                let info = learner.level(&levels);
                print!("{}", report::xp_gain(&learner, verdict.score, &info, levelled_up));
            }
        }
        Commands::Level { xp } => {
            print!("{}", report::level(xp, &levels.compute(xp)));
        }
        Commands::Leaderboard => {
            let board = standings(catalog.leaderboard(), &levels);
            print!("{}", report::leaderboard(&board));
            if let Some(position) = leaderboard::current_user_position(&board) {
                println!("\nYou are #{} of {}", position, board.len());
            }
        }
        Commands::Profile => {
            print!(
                "{}",
                report::profile(user, &user.level(&levels), catalog.exercises().len())
            );
        }
    }

    Ok(())
}
