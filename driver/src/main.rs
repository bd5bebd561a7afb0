use anyhow::{ensure, Context};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use workflow::config::RunConfig;
use workflow::runner::{RunOptions, Runner};

mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Global aggregation stage of the tiled stereo pipeline")]
struct Args {
    /// Load the run (output directory and tile list) from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output directory; overrides the one in --config
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Tile directory, repeat once per tile
    #[arg(long = "tile")]
    tiles: Vec<PathBuf>,
    /// Stereo pairs per tile when tiles are given on the command line
    #[arg(long, default_value_t = 1)]
    pairs: usize,
    #[arg(long, default_value_t = false)]
    skip_pointing: bool,
    #[arg(long, default_value_t = false)]
    skip_intensity: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut run_config = if let Some(path) = args.config {
        RunConfig::load(path)?
    } else {
        let out_dir = args
            .out_dir
            .clone()
            .context("--out-dir is required without --config")?;
        ensure!(!args.tiles.is_empty(), "at least one --tile is required");
        RunConfig::from_args(out_dir, args.tiles, args.pairs)
    };
    if let Some(out_dir) = args.out_dir {
        run_config.out_dir = out_dir;
    }

    info!(
        "aggregating {} tiles into {}",
        run_config.tiles.len(),
        run_config.out_dir.display()
    );
    let options = RunOptions {
        pointing: !args.skip_pointing,
        intensity: !args.skip_intensity,
    };
    let report = Runner::new(run_config).execute(options)?;

    println!(
        "Aggregation -> pointing outputs {}, intensity range {}, inputs read {}",
        report.pointing_outputs.len(),
        report
            .intensity
            .map(|range| format!("[{}, {}]", range.min, range.max))
            .unwrap_or_else(|| "skipped".into()),
        report.metrics.inputs_read
    );
    for path in &report.pointing_outputs {
        println!("  {}", path.display());
    }

    Ok(())
}
