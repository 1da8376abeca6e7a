//! Main CLI application for the Letterboxed solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use letterboxed::{
    config::{CliOverrides, Settings},
    letterbox::{create_example_files, parse_sides},
    solve::LetterboxProblem,
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "letterboxed")]
#[command(about = "Letterboxed word-chain puzzle solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Puzzle options shared by every command that builds a puzzle
#[derive(clap::Args, Debug, Clone)]
struct PuzzleArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Puzzle sides, e.g. "nom-ize-stb-yla" (overrides config)
    #[arg(short, long)]
    sides: Option<String>,

    /// Word list file (overrides config)
    #[arg(short, long)]
    wordlist: Option<PathBuf>,

    /// Minimum word length (overrides config)
    #[arg(long)]
    min_length: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find word chains that cover every letter on the square
    Solve {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Maximum number of words in a chain (overrides config)
        #[arg(short, long)]
        max_length: Option<usize>,

        /// Maximum solutions to find (overrides config)
        #[arg(short = 'n', long)]
        solution_limit: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save solutions to the output directory
        #[arg(long)]
        save: bool,

        /// Show each word's side sequence
        #[arg(long)]
        show_sides: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and word list files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a chain of words against the puzzle
    Validate {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Words of the chain, in order
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Report word list and transition graph statistics
    Analyze {
        #[command(flatten)]
        puzzle: PuzzleArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Solve { verbose: true, .. });
    init_logging(verbose);

    match cli.command {
        Commands::Solve {
            puzzle, max_length, solution_limit, output,
            save, show_sides, verbose
        } => {
            solve_command(
                puzzle, max_length, solution_limit,
                output, save, show_sides, verbose
            )
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
        Commands::Validate { puzzle, words } => {
            validate_command(puzzle, words)
        }
        Commands::Analyze { puzzle } => {
            analyze_command(puzzle)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "letterboxed=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the config file (or defaults) and apply command line overrides
fn load_settings(puzzle: &PuzzleArgs, mut overrides: CliOverrides) -> Result<Settings> {
    let mut settings = if puzzle.config.exists() {
        Settings::from_file(&puzzle.config)
            .with_context(|| format!("Failed to load config from {}", puzzle.config.display()))?
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", puzzle.config.display()
        )));
        Settings::default()
    };

    if let Some(ref sides) = puzzle.sides {
        overrides.sides = Some(parse_sides(sides)?);
    }
    overrides.wordlist_file = puzzle.wordlist.clone();
    overrides.min_word_length = puzzle.min_length;
    settings.merge_with_cli(&overrides);

    settings.validate()
        .context("Configuration validation failed")?;

    Ok(settings)
}

fn solve_command(
    puzzle: PuzzleArgs,
    max_length: Option<usize>,
    solution_limit: Option<usize>,
    output_dir: Option<PathBuf>,
    save: bool,
    show_sides: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🔤 Starting Letterboxed Solver"));

    let cli_overrides = CliOverrides {
        max_chain_length: max_length,
        solution_limit,
        output_dir,
        save_solutions: save,
        ..Default::default()
    };
    let settings = load_settings(&puzzle, cli_overrides)?;

    if verbose {
        println!("Configuration:");
        println!("  Sides: {}", settings.puzzle.sides.join("-"));
        println!("  Word length: >= {}", settings.search.min_word_length);
        println!("  Max chain length: {}", settings.search.max_chain_length);
        println!("  Solution limit: {}", settings.search.solution_limit);
        println!("  Word list: {}", settings.input.wordlist_file.display());
        println!();
    }

    let start_time = Instant::now();
    let problem = LetterboxProblem::new(settings.clone())
        .context("Failed to create puzzle")?;

    if verbose {
        println!("{}", SolutionFormatter::format_square(problem.side_map()));
        println!("{}", problem.statistics());
        println!();
    }

    println!("{}", ColorOutput::info("Searching for solutions...."));
    let solutions = problem.solve()
        .context("Failed to solve puzzle")?;

    let total_time = start_time.elapsed();

    if solutions.is_empty() {
        println!("{}", ColorOutput::warning("No valid solutions found."));
        return Ok(());
    }

    println!("{}", ColorOutput::success(&format!(
        "Found {} solutions in {:.3}s:",
        solutions.len(),
        total_time.as_secs_f64()
    )));

    for (i, solution) in solutions.iter().enumerate() {
        println!("{}", SolutionFormatter::format_solution_line(i + 1, solution));
        if show_sides {
            for word in &solution.words {
                println!("    {:<12} {}", word.as_str(),
                         SolutionFormatter::format_side_trace(word, problem.side_map()));
            }
        }
    }

    if settings.output.save_solutions {
        println!("\n{}", ColorOutput::info("💾 Saving solutions..."));
        SolutionFormatter::save_solutions(&solutions, &settings.output.output_directory, &settings.output.format)
            .context("Failed to save solutions")?;

        println!("{}", ColorOutput::success(&format!(
            "Solutions saved to {}",
            settings.output.output_directory.display()
        )));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings.to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let wordlist_path = input_dir.join("wordlist.txt");
    if !wordlist_path.exists() || force {
        create_example_files(&input_dir)
            .context("Failed to create example word list")?;
        println!("Created: {}", wordlist_path.display());
    } else {
        println!("Skipped: {} (already exists)", wordlist_path.display());
    }

    // Example configuration variants
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut quick_config = Settings::default();
    quick_config.search.max_chain_length = 3;
    quick_config.search.solution_limit = 1;
    quick_config.to_file(examples_dir.join("quick.yaml"))?;

    let mut thorough_config = Settings::default();
    thorough_config.search.max_chain_length = 8;
    thorough_config.search.solution_limit = 50;
    thorough_config.output.save_solutions = true;
    thorough_config.output.format = letterboxed::config::OutputFormat::Json;
    thorough_config.to_file(examples_dir.join("thorough.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Replace {} with a full dictionary", wordlist_path.display());
    println!("2. Set today's sides in {}", config_path.display());
    println!("3. Run: letterboxed solve --config config/default.yaml");

    Ok(())
}

fn validate_command(puzzle: PuzzleArgs, words: Vec<String>) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating chain..."));

    let settings = load_settings(&puzzle, CliOverrides::default())?;
    let problem = LetterboxProblem::new(settings)
        .context("Failed to create puzzle")?;

    let result = problem.check_chain(&words)?;
    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("✅ Chain solves the puzzle!"));
    } else {
        println!("{}", ColorOutput::error("❌ Chain does not solve the puzzle"));
        if let Some(error) = result.error_message {
            println!("Error: {}", error);
        }
    }

    Ok(())
}

fn analyze_command(puzzle: PuzzleArgs) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing puzzle..."));

    let settings = load_settings(&puzzle, CliOverrides::default())?;
    let problem = LetterboxProblem::new(settings)
        .context("Failed to create puzzle for analysis")?;

    println!("{}", SolutionFormatter::format_square(problem.side_map()));

    let stats = problem.statistics();
    println!("{}", stats);

    if !stats.is_solvable_in_principle() {
        println!("{}", ColorOutput::warning("No chain can cover every letter with this word list"));
    }

    Ok(())
}
