// ===== sweepcore/src/main.rs =====
use clap::{Parser, Subcommand};
use std::process;

mod cmd;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional JSON config file; replaces the flag-supplied parameters.
    #[arg(global = true, long)]
    config: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one decision-policy loop over a board.
    Solve(cmd::solve::SolveArgs),
    /// Fan out independent solver lanes and aggregate their outcomes.
    Explore(cmd::explore::ExploreArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve(args) => cmd::solve::run(args, cli.config.as_deref()),
        Commands::Explore(args) => cmd::explore::run(args, cli.config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}
