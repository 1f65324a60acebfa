use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::logging;
use grid_snake::modes::HumanMode;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a wrap-around grid, in your terminal")]
struct Cli {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length in cells (overrides the config file)
    #[arg(long)]
    grid_size: Option<usize>,

    /// Simulation ticks per second (overrides the config file)
    #[arg(long)]
    tick_rate: Option<f64>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(num_rows) = self.grid_size {
            config.num_rows = num_rows;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate = tick_rate;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    info!(
        num_rows = config.num_rows,
        tick_rate = config.tick_rate,
        seed = ?cli.seed,
        "starting"
    );

    HumanMode::new(config, cli.seed).run().await
}
