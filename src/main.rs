use clap::{Parser, Subcommand};
use std::path::PathBuf;

use effcalc::assessment::{AssessmentInput, AssessmentState};
use effcalc::output;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the configured hierarchy with default weights (default if no subcommand)
    Show,
    /// Write a starter config file with the built-in hierarchy
    Init,
    /// Compute scores for a recorded assessment
    Score {
        /// Path to the assessment input YAML
        #[arg(short, long)]
        input: PathBuf,

        /// Emit tab-separated category scores for scripting
        #[arg(long, conflicts_with = "json")]
        tsv: bool,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "effcalc")]
#[command(about = "Organization efficiency scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/effcalc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Show);
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = effcalc::config::write_starter_config(config_path.clone()) {
            eprintln!("Init error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match effcalc::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate the hierarchy at startup
    if let Err(errors) = effcalc::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        let subcategories: usize = config.categories.iter().map(|c| c.subcategories.len()).sum();
        let metrics: usize = config
            .categories
            .iter()
            .flat_map(|c| c.subcategories.iter())
            .map(|s| s.metrics.len())
            .sum();
        eprintln!(
            "Loaded {} categories, {} subcategories, {} metrics",
            config.categories.len(),
            subcategories,
            metrics
        );
    }

    let use_colors = output::should_use_colors();

    match command {
        Commands::Init => unreachable!("handled above"),
        Commands::Show => {
            println!("{}", output::format_hierarchy(&config, use_colors));
        }
        Commands::Score { input, tsv, json } => {
            let input = match AssessmentInput::load(&input) {
                Ok(i) => i,
                Err(e) => {
                    eprintln!("Input error: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            if cli.verbose {
                eprintln!(
                    "Assessment '{}': {} weight edits, {} metric selections",
                    input.organization,
                    input.weights.len(),
                    input.implemented.len()
                );
            }

            let mut state = AssessmentState::new(&config);
            if let Err(e) = state.apply(&input) {
                eprintln!("Input error: {}", e);
                std::process::exit(EXIT_INPUT);
            }

            let report =
                match output::Report::build(&input.organization, &state, input.ratings.as_deref()) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("Input error: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                };

            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize report: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            } else if tsv {
                println!("{}", output::format_tsv(&report));
            } else {
                println!("{}", output::format_report(&report, use_colors));
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
