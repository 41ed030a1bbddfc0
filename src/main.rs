use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use twenty48::game::GameConfig;
use twenty48::modes::HumanMode;

#[derive(Parser)]
#[command(name = "twenty48")]
#[command(version, about = "2048 sliding-tile game in the terminal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Animation ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Board pixels a sliding tile moves per tick
    #[arg(long)]
    velocity: Option<u32>,

    /// Seed for tile placement, for repeatable games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is owned by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Tracing filter, e.g. "info", "twenty48=debug"
    #[arg(long, default_value = "info")]
    log: String,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with the keyboard
    Human,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(velocity) = self.velocity {
            config.move_velocity = velocity;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::new(&cli.log))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;
    tracing::info!(?config, seed = ?cli.seed, "starting");

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.seed)?;
            human_mode.run().await?;
        }
    }

    Ok(())
}
