/*!
 * Josephus - Command Line Entry Point
 *
 * Runs one elimination and prints the survivor, plus the elimination order
 * for the streaming strategy.
 */

use clap::{Parser, ValueEnum};
use josephus_engine::{init_tracing, Engine, EngineConfig, Strategy};
use miette::IntoDiagnostic;
use tracing::info;

/// Solve the generalized Josephus problem
#[derive(Parser, Debug)]
#[command(name = "josephus", version, about, long_about = None)]
struct Args {
    /// Number of participants in the circle
    n: usize,

    /// Every k-th living participant is eliminated
    k: usize,

    /// Execution model
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Stream)]
    strategy: StrategyArg,

    /// Worker threads for the concurrent strategies
    #[arg(short, long)]
    workers: Option<usize>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Sequential,
    Counter,
    Stream,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => Strategy::Sequential,
            StrategyArg::Counter => Strategy::Counter,
            StrategyArg::Stream => Strategy::Stream,
        }
    }
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = EngineConfig::from_env();
    if let Some(workers) = args.workers {
        config = config.with_worker_threads(workers);
    }
    info!(n = args.n, k = args.k, strategy = ?args.strategy, workers = config.worker_threads, "Starting run");

    let engine = Engine::new(config)?;
    let outcome = engine.run(args.strategy.into(), args.n, args.k)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome).into_diagnostic()?);
    } else {
        println!("survivor: {}", outcome.survivor);
        if let Some(order) = &outcome.order {
            println!("order: {}", order);
        }
    }
    Ok(())
}
