use anyhow::Result;
use clap::Parser as ClapParser;
use log::{debug, info};

use fpviz::io;
use fpviz::io::cli::Cli;
use fpviz::pipeline::visualize;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(io::log_level_from_env()?)?;

    let config = io::config_from_env()?;
    debug!("[MAIN] using config: {config:?}");

    let summary = visualize(&args.testcase, &args.placement, &args.output, &config)?;
    info!(
        "[MAIN] {} modules drawn, {} placements skipped",
        summary.stats.n_placed, summary.stats.n_unmatched
    );

    println!("Saved to {}", summary.output.display());
    Ok(())
}
