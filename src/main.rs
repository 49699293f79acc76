//! Main entry point for the Swiss Arena tournament simulator
//!
//! Runs single tournaments or Monte Carlo simulations from the command
//! line, with configuration from a TOML file, environment variables and
//! flag overrides.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swiss_arena::config::AppConfig;
use swiss_arena::metrics::RankingEvaluator;
use swiss_arena::simulation::Simulation;
use swiss_arena::strength::StrengthDistribution;
use swiss_arena::types::{RankingSummary, ResultTable};
use swiss_arena::Tournament;
use tracing::info;

/// Swiss Arena - Swiss tournament ranking-recovery simulator
#[derive(Parser)]
#[command(
    name = "swiss-arena",
    version,
    about = "Simulate Swiss-system tournaments and measure ranking recovery",
    long_about = "Swiss Arena simulates multi-round Swiss tournaments over competitors with \
                 latent strengths drawn from a configurable distribution, pairs rounds via \
                 maximum-weight perfect matching with rematch exclusion, and scores how well \
                 the final win-count ranking recovers the true strength ranking."
)]
struct Args {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (TOML format)")]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(short, long, value_name = "LEVEL", help = "Override log level (trace, debug, info, warn, error)")]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without running")]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single tournament and print its result table and summary
    Run(RunArgs),
    /// Run many tournaments and print the aggregated summary
    Simulate(SimulateArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    #[command(flatten)]
    tournament: TournamentArgs,

    /// Emit JSON instead of a text table
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct SimulateArgs {
    #[command(flatten)]
    tournament: TournamentArgs,

    /// Number of tournament runs to aggregate
    #[arg(short, long, value_name = "N")]
    trials: Option<usize>,

    /// Emit JSON instead of a text table
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct TournamentArgs {
    /// Number of competitors (must be even)
    #[arg(short = 'n', long, value_name = "N")]
    teams: Option<usize>,

    /// Number of rounds
    #[arg(short = 'r', long, value_name = "R")]
    rounds: Option<u32>,

    /// Base seed (omit for system entropy)
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Strength distribution tag (exponential, uniform, lognormal, beta, gamma)
    #[arg(short, long, value_name = "TAG")]
    distribution: Option<String>,

    /// Error on unknown distribution tags instead of falling back to lognormal
    #[arg(long)]
    strict_distribution: bool,

    /// Pairing cost scale parameter
    #[arg(long, value_name = "ALPHA")]
    alpha: Option<i64>,

    /// Pairing cost dispersion parameter
    #[arg(long, value_name = "BETA")]
    beta: Option<i64>,

    /// Relevant-set size for top-k ranking metrics
    #[arg(short = 'k', long, value_name = "K")]
    top_k: Option<usize>,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Merge CLI tournament overrides into the loaded configuration
fn apply_overrides(config: &mut AppConfig, args: &TournamentArgs) -> Result<()> {
    if let Some(teams) = args.teams {
        config.tournament.n_teams = teams;
    }
    if let Some(rounds) = args.rounds {
        config.tournament.n_rounds = rounds;
    }
    if let Some(seed) = args.seed {
        config.tournament.seed = Some(seed);
    }
    if let Some(tag) = &args.distribution {
        config.tournament.distribution =
            StrengthDistribution::parse_tag(tag, args.strict_distribution)?;
    }
    if let Some(alpha) = args.alpha {
        config.tournament.alpha = alpha;
    }
    if let Some(beta) = args.beta {
        config.tournament.beta = beta;
    }
    if let Some(top_k) = args.top_k {
        config.tournament.top_k = top_k;
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_toml_file(path)?,
        None => AppConfig::from_env()?,
    };
    if let Some(level) = &args.log_level {
        config.service.log_level = level.clone();
    }
    Ok(config)
}

fn print_result_table(table: &ResultTable) {
    println!("{:>5} {:>12} {:>6}", "team", "strength", "wins");
    println!("{}", "-".repeat(26));
    for (team, row) in table.rows().iter().enumerate() {
        println!("{:>5} {:>12.4} {:>6}", team, row.strength, row.wins);
    }
}

fn print_summary(summary: &RankingSummary) {
    println!();
    println!("=== Ranking summary ===");
    println!("undefeated champion: {}", summary.undefeated_champion);
    println!("top-ranked champion: {}", summary.top_ranked_champion);
    println!("top-k recovery:      {:.4}", summary.top_k_recovery);
    println!("r-precision:         {:.4}", summary.precision);
    println!("precision@k:         {:.4}", summary.precision_at_k);
    println!("average precision:   {:.4}", summary.avg_precision);
    println!("dcg@k:               {:.4}", summary.dcg);
    println!("ndcg@k:              {:.4}", summary.ndcg);
    println!("kendall tau:         {:.4} (p = {:.4})", summary.tau, summary.tau_p_value);
    println!("spearman rho:        {:.4} (p = {:.4})", summary.rho, summary.rho_p_value);
}

fn run_single(config: AppConfig, json: bool) -> Result<()> {
    let mut tournament = Tournament::new(config.tournament.clone())?;
    info!(
        teams = config.tournament.n_teams,
        rounds = config.tournament.n_rounds,
        seed = tournament.seed(),
        distribution = %config.tournament.distribution,
        "running tournament"
    );

    let result = tournament.run()?;
    let evaluator = RankingEvaluator::new(config.tournament.n_rounds, config.tournament.top_k);
    let summary = evaluator.evaluate(result.table())?;

    if json {
        let payload = serde_json::json!({
            "seed": tournament.seed(),
            "table": result.table(),
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_result_table(result.table());
        print_summary(&summary);
    }
    Ok(())
}

fn run_simulation(config: AppConfig, json: bool) -> Result<()> {
    let mut simulation = Simulation::new(&config)?;
    let report = simulation.run()?;
    let aggregate = &report.aggregate;

    if json {
        println!("{}", serde_json::to_string_pretty(aggregate)?);
    } else {
        println!("=== Aggregate over {} trials ===", aggregate.trials);
        println!("undefeated champion rate: {:.4}", aggregate.undefeated_champion_rate);
        println!("top-ranked champion rate: {:.4}", aggregate.top_ranked_champion_rate);
        println!("top-k recovery:           {:.4}", aggregate.top_k_recovery);
        println!("r-precision:              {:.4}", aggregate.precision);
        println!("precision@k:              {:.4}", aggregate.precision_at_k);
        println!("average precision:        {:.4}", aggregate.avg_precision);
        println!("dcg@k:                    {:.4}", aggregate.dcg);
        println!("ndcg@k:                   {:.4}", aggregate.ndcg);
        println!(
            "kendall tau / spearman rho: {:.4} / {:.4} (defined in {}/{} trials)",
            aggregate.tau, aggregate.rho, aggregate.defined_correlations, aggregate.trials
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(&args)?;

    match &args.command {
        Command::Run(run_args) => apply_overrides(&mut config, &run_args.tournament)?,
        Command::Simulate(sim_args) => {
            apply_overrides(&mut config, &sim_args.tournament)?;
            if let Some(trials) = sim_args.trials {
                config.simulation.trials = trials;
            }
        }
    }

    init_logging(&config.service.log_level)?;
    swiss_arena::config::validate_config(&config)?;

    if args.dry_run {
        info!("configuration valid, exiting (dry run)");
        return Ok(());
    }

    match args.command {
        Command::Run(run_args) => run_single(config, run_args.json),
        Command::Simulate(sim_args) => run_simulation(config, sim_args.json),
    }
}
