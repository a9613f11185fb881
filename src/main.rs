use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_arcade::config::load_config;
use snake_arcade::game::{GameConfig, SpeedLevel};
use snake_arcade::logging::init_file_logging;
use snake_arcade::modes::PlayMode;
use tracing::info;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Classic Snake for the terminal")]
struct Cli {
    /// Which flavour of the game to play
    #[arg(long, value_enum, default_value = "deluxe")]
    variant: Variant,

    /// Grid width in cells (overrides the variant and config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells (overrides the variant and config file)
    #[arg(long)]
    height: Option<usize>,

    /// Starting speed level, 1-5
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    speed: Option<u8>,

    /// Seed for food placement and effects, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with settings applied on top of the variant
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append logs to this file (the terminal is used by the game itself)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    /// Fixed 100ms ticks, food anywhere on the board
    Classic,
    /// Menu-selected speed, pause screen and particle effects
    Deluxe,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let base = match self.variant {
            Variant::Classic => GameConfig::classic(),
            Variant::Deluxe => GameConfig::deluxe(),
        };

        let mut config = match &self.config {
            Some(path) => load_config(path, base)?,
            None => base,
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(speed) = self.speed {
            config.speed_level = SpeedLevel::new(speed);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config = cli.game_config()?;
    info!(variant = ?cli.variant, seed = ?cli.seed, "starting");

    let mut play_mode = PlayMode::new(config, cli.seed)?;
    play_mode.run().await?;

    Ok(())
}
