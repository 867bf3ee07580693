use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use business_mri::scoring::{compute_score_with, default_questions, parse_assignments};
use business_mri::session::QuizSession;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the interactive quiz (default if no subcommand)
    Quiz,
    /// Score a set of answers without the interactive view
    Score {
        /// Answer as question_id=value, e.g. industry=finance or execution_rate=70%
        #[arg(short = 'a', long = "answer", value_name = "ID=VALUE")]
        answers: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the questions and their answer keys
    Questions,
    /// Write a commented default config file
    Init {
        /// Overwrite an existing file without asking
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "business-mri")]
#[command(about = "Six-question business health quiz with live scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/business-mri/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Quiz);
    let start_time = Instant::now();

    if let Err(e) = business_mri::logging::init(cli.verbose) {
        eprintln!("Logging setup failed: {}", e);
    }

    let config_path = cli.config.map(PathBuf::from);

    // Init must work even when the existing config is broken
    if let Commands::Init { force } = command {
        match business_mri::config::write_default_config(config_path, force) {
            Ok(path) => {
                println!("Wrote config to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Load config
    let config = match business_mri::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = business_mri::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let questions = default_questions();
    if let Err(errors) = business_mri::scoring::validate_question_bank(&questions) {
        eprintln!("Question bank errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let rules = config.scoring();
    let benchmarks = config.benchmark_table();
    tracing::debug!(
        questions = questions.len(),
        industries = benchmarks.len(),
        "configuration ready"
    );

    let use_colors = business_mri::output::should_use_colors();

    match command {
        Commands::Quiz => {
            // Both were checked by validate_config
            let (hero_counters, exit_intent_delay) =
                match (config.hero_counters(), config.exit_intent_delay()) {
                    (Ok(c), Ok(d)) => (c, d),
                    (Err(e), _) | (_, Err(e)) => {
                        eprintln!("Config error: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                };

            let theme = business_mri::tui::resolve_theme(config.theme());
            let session = QuizSession::new(questions, benchmarks, rules);
            let app = business_mri::tui::App::new(session, theme, hero_counters, exit_intent_delay);

            if let Err(e) = business_mri::tui::run_tui(app, config.tick_rate_ms()).await {
                eprintln!("TUI error: {}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
        Commands::Score { answers, json } => {
            let record = match parse_assignments(&answers, &questions) {
                Ok(r) => r,
                Err(errors) => {
                    eprintln!("Answer errors:");
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                    std::process::exit(EXIT_USAGE);
                }
            };

            let result = compute_score_with(&record, &questions, &benchmarks, &rules);

            if json {
                match business_mri::output::format_json(&result) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        std::process::exit(EXIT_FAILURE);
                    }
                }
            } else {
                println!(
                    "{}",
                    business_mri::output::format_report(&result, use_colors, cli.verbose)
                );
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Scored {} of {} questions in {:?}",
                    record.answered_count(&questions),
                    questions.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Questions => {
            println!(
                "{}",
                business_mri::output::format_question_list(&questions, use_colors)
            );
        }
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
