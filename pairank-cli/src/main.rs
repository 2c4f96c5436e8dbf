mod config;
mod output;
mod simulate;

use clap::Parser;
use pairank_core::{unordered_pair_count, Session, SessionConfig, SessionEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "pairank", version, about = "Rank items by choosing the better of two, over and over")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Rank items interactively: pick one of two per line on stdin
    Rank(RankArgs),
    /// Rank items with an automated voter that knows the true order
    Simulate(SimulateArgs),
    /// Create a default config file at ~/.config/pairank/config.toml
    Init,
}

#[derive(clap::Args)]
struct SessionArgs {
    /// File with one item per line, or a JSON array of strings
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// Number of comparisons
    #[arg(long)]
    rounds: Option<usize>,

    /// Rating points exchanged per comparison
    #[arg(long)]
    k_factor: Option<f64>,

    /// Seed for pair selection, for a reproducible sequence of pairs
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Show debug logs on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/pairank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct RankArgs {
    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Parser)]
struct SimulateArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Probability that the voter picks the truly better item
    #[arg(long, default_value_t = 0.9)]
    accuracy: f64,
}

/// A line typed in answer to a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    First,
    Second,
    End,
}

fn parse_choice(line: &str) -> Option<Choice> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "a" => Some(Choice::First),
        "2" | "b" => Some(Choice::Second),
        "q" | "quit" | "end" => Some(Choice::End),
        _ => None,
    }
}

/// Parse a string as either a JSON array of strings or plain text (one item per line).
fn parse_items_from_str(content: &str) -> Vec<String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        let items: Vec<String> = serde_json::from_str(trimmed)
            .unwrap_or_else(|e| bail(format!("File looks like JSON but failed to parse: {e}")));
        items.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
    } else {
        trimmed
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Load items from --items file and --item inline args.
/// Stdin is only read when `allow_stdin` (it carries votes during `rank`).
fn load_items(args: &SessionArgs, allow_stdin: bool) -> Vec<String> {
    let mut items = Vec::new();

    if let Some(ref path) = args.items {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        items = parse_items_from_str(&content);
    }

    items.extend(args.inline_items.iter().cloned());

    if items.is_empty() && allow_stdin {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            bail("No items provided. Use --items <file>, --item <name>, or pipe items via stdin.");
        }
        let content = io::read_to_string(stdin)
            .unwrap_or_else(|e| bail(format!("Failed to read items from stdin: {e}")));
        items = parse_items_from_str(&content);
    }

    if items.len() < 2 {
        bail(format!("Need at least 2 items to rank, got {}", items.len()));
    }
    items
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Merge config file and CLI args (CLI wins) into a validated session config.
fn resolve_session_config(args: &SessionArgs) -> SessionConfig {
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);
    let session_config = cfg.session_config(args.rounds, args.k_factor);
    session_config
        .validate()
        .unwrap_or_else(|e| bail(format!("{e} (check {} and CLI flags)", config_path.display())));
    session_config
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Simulate(args) => run_simulate(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default rounds, K-factor, etc.");
        }
    }
}

fn run_rank(args: RankArgs) {
    let args = args.session;
    init_logging(args.verbose);

    let session_config = resolve_session_config(&args);
    let items = load_items(&args, false);

    let distinct_pairs = unordered_pair_count(items.len());
    if session_config.total_rounds > distinct_pairs {
        eprintln!(
            "Warning: {} rounds but only {} distinct pairs; some pairs will be shown twice.",
            session_config.total_rounds, distinct_pairs,
        );
    }

    let mut session = Session::new(&items, session_config.clone(), make_rng(args.seed))
        .unwrap_or_else(|e| bail(e));

    eprintln!(
        "Ranking {} items over {} comparisons. Type 1 or 2 to pick, q to finish early.",
        items.len(),
        session_config.total_rounds,
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stderr = io::stderr();

    let mut event = session.request_initial_pair().unwrap_or_else(|e| bail(e));
    let rankings = loop {
        match event {
            SessionEvent::Finished { rankings } => break rankings,
            SessionEvent::PairReady { pair, round, total_rounds } => {
                eprintln!("\nComparison {} of {}", round + 1, total_rounds);
                eprintln!("  [1] {}", pair.first);
                eprintln!("  [2] {}", pair.second);

                let choice = loop {
                    eprint!("> ");
                    let _ = stderr.flush();
                    match lines.next() {
                        None => break Choice::End,
                        Some(Ok(line)) => match parse_choice(&line) {
                            Some(choice) => break choice,
                            None => eprintln!("Type 1 for \"{}\", 2 for \"{}\", or q to finish.", pair.first, pair.second),
                        },
                        Some(Err(e)) => bail(format!("Failed to read from stdin: {e}")),
                    }
                };

                let next = match choice {
                    Choice::First => session.vote_and_advance(&pair.first),
                    Choice::Second => session.vote_and_advance(&pair.second),
                    Choice::End => session.request_end(),
                };
                event = next.unwrap_or_else(|e| bail(e));
            }
        }
    };
    eprintln!();

    if args.json {
        output::print_json(&rankings, session.round(), &session_config, None);
    } else {
        output::print_table(&rankings, session.round(), session_config.total_rounds);
    }
}

fn run_simulate(args: SimulateArgs) {
    init_logging(args.session.verbose);

    if !(0.0..=1.0).contains(&args.accuracy) {
        bail(format!("--accuracy must be between 0.0 and 1.0, got {}", args.accuracy));
    }

    let session_config = resolve_session_config(&args.session);
    let items = load_items(&args.session, true);

    let (voter_rng, session_rng) = match args.session.seed {
        Some(seed) => (StdRng::seed_from_u64(seed), StdRng::seed_from_u64(seed.wrapping_add(1))),
        None => (StdRng::from_os_rng(), StdRng::from_os_rng()),
    };

    let report = simulate::run_simulation(
        &items,
        session_config.clone(),
        args.accuracy,
        voter_rng,
        session_rng,
    )
    .unwrap_or_else(|e| bail(e));

    if args.session.json {
        output::print_json(&report.rankings, report.comparisons, &session_config, Some(report.kendall_tau));
    } else {
        output::print_table(&report.rankings, report.comparisons, session_config.total_rounds);
        println!("Kendall's tau vs. input order: {:.3}", report.kendall_tau);
    }
}
