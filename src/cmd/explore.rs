use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use sweepcore::board::GridBuilder;
use sweepcore::config::Config;
use sweepcore::error::SwResult;
use sweepcore::explore::explore;

#[derive(Args, Debug, Clone)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub config: Config,

    /// Board CSV (headerless token grid).
    #[arg(short, long)]
    pub board: String,

    #[arg(short, long, default_value_t = 8)]
    pub lanes: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: ExploreArgs, config_path: Option<&str>) -> SwResult<()> {
    let config = match config_path {
        Some(path) => Config::load_from_file(path)?,
        None => args.config.clone(),
    };

    println!("🧩 Loading board: {}", args.board);
    let grid = GridBuilder::from_csv(&args.board)?;
    println!("🔀 Fanning out {} lanes", args.lanes);

    let summary = explore(&grid, &config, args.lanes, args.seed);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Lane", "Status", "Revealed", "Quality"]);
    for lane in &summary.lanes {
        table.add_row(vec![
            Cell::new(lane.lane),
            Cell::new(lane.status),
            Cell::new(lane.revealed),
            Cell::new(
                lane.quality
                    .map(|q| format!("{:.3}", q))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    println!("{table}");

    let collapsed = summary.collapsed_lanes();
    println!(
        "💥 Collapsed lanes: {:?} ({} of {})",
        collapsed,
        collapsed.len(),
        summary.lanes.len()
    );
    match summary.mean_quality() {
        Some(q) => println!("📊 Mean lane quality: {:.3}", q),
        None => println!("📊 No lane produced a quality score"),
    }
    Ok(())
}
