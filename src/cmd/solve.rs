use clap::Args;
use sweepcore::board::GridBuilder;
use sweepcore::config::Config;
use sweepcore::error::SwResult;
use sweepcore::policy::{DecisionPolicy, Outcome};
use sweepcore::risk::AdjacencyEstimator;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub config: Config,

    /// Board CSV (headerless token grid).
    #[arg(short, long)]
    pub board: String,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Initial risk threshold for the confidence tracker.
    #[arg(long)]
    pub tau: Option<f64>,
}

pub fn run(args: SolveArgs, config_path: Option<&str>) -> SwResult<()> {
    let config = match config_path {
        Some(path) => Config::load_from_file(path)?,
        None => args.config.clone(),
    };

    println!("🧩 Loading board: {}", args.board);
    let mut grid = GridBuilder::from_csv(&args.board)?;
    println!(
        "   {}x{} cells, {} hazards",
        grid.rows(),
        grid.cols(),
        grid.hazard_count()
    );

    let mut policy = DecisionPolicy::new(config.policy.clone())
        .with_estimator(Box::new(AdjacencyEstimator::new(config.risk.clone())));
    if let Some(s) = args.seed {
        policy = policy.with_seed(s);
    }
    if let Some(tau) = args.tau {
        policy.confidence_mut().set_threshold(tau)?;
    }

    let outcome = policy.run(&mut grid)?;
    match outcome {
        Outcome::Solved => println!("✅ Solved"),
        Outcome::Collapsed { row, col } => {
            println!("💥 Collapsed on hazard at ({}, {})", row, col)
        }
        Outcome::NoMove => println!("🛑 No move available"),
        Outcome::Stalled => println!("🛑 Stalled without progress"),
        Outcome::BudgetExhausted => println!("⏱️  Move budget exhausted"),
    }
    println!(
        "   revealed {}, flagged {}, calibration mean {:.3}",
        grid.revealed_count(),
        grid.flagged_count(),
        policy.confidence().mean()
    );
    Ok(())
}
