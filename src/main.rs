use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use majorpick::scoring::ScoreError;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score the catalog against a student profile and print the ranking
    Score {
        /// Path to a YAML profile file (one value per criterion id)
        profile: PathBuf,

        /// Also print the per-criterion normalized score table
        #[arg(long)]
        detail: bool,

        /// Emit ranking and detail as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// List the configured majors and their attributes (default if no subcommand)
    Catalog,
    /// Write the default config file (stock criteria, anchors, and catalog)
    Init {
        /// Overwrite an existing config file without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "majorpick")]
#[command(about = "Academic major recommendation CLI (SAW scoring)", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/majorpick/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Catalog);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = command {
        if let Err(e) = majorpick::config::write_default_config(config_path, force) {
            eprintln!("Init error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match majorpick::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded {} criteria and {} alternatives from config",
            config.scoring.criteria.len(),
            config.catalog.len()
        );
        for criterion in &config.scoring.criteria {
            eprintln!(
                "  Criterion {}: {:?}, weight {}",
                criterion.id, criterion.kind, criterion.weight
            );
        }
    }

    let use_colors = majorpick::output::should_use_colors();

    match command {
        Commands::Score {
            profile,
            detail,
            json,
        } => {
            let profile = match majorpick::config::load_profile(&profile) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Profile error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let (ranking, score_table) =
                match majorpick::scoring::score(&profile, &config.catalog, &config.scoring) {
                    Ok(result) => result,
                    Err(ScoreError::Validation(violations)) => {
                        eprintln!("Invalid profile:");
                        for violation in violations {
                            eprintln!("  - {}", violation);
                        }
                        std::process::exit(EXIT_INPUT);
                    }
                    Err(e @ ScoreError::Configuration(_)) => {
                        eprintln!("{}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                };

            if json {
                let payload = serde_json::json!({
                    "ranking": ranking,
                    "detail": score_table,
                });
                match serde_json::to_string_pretty(&payload) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Failed to serialize results: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                }
            } else {
                println!(
                    "{}",
                    majorpick::output::format_ranking(&ranking, use_colors)
                );
                if detail {
                    println!();
                    println!(
                        "{}",
                        majorpick::output::format_detail(&score_table, use_colors)
                    );
                }
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Ranked {} alternatives in {:?}",
                    ranking.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Catalog => {
            println!(
                "{}",
                majorpick::output::format_catalog(&config.catalog, use_colors)
            );
        }
        Commands::Init { .. } => unreachable!("handled above"),
    }

    std::process::exit(EXIT_SUCCESS);
}
