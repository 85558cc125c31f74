use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use snake_arcade::game::{GameConfig, GameLoop};
use snake_arcade::modes::HumanMode;
use snake_arcade::persistence::FileHighScoreStore;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Grid snake arcade game")]
struct Cli {
    /// Rule set to play with
    #[arg(long, default_value = "classic")]
    variant: Variant,

    /// JSON file with game settings; overrides --variant
    #[arg(long)]
    config: Option<PathBuf>,

    /// File holding the high score
    #[arg(long, default_value = "highscore.txt")]
    high_score_file: PathBuf,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes while the terminal is in use
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,
}

#[derive(Clone, ValueEnum)]
enum Variant {
    /// Speed 5, one step faster per level
    Classic,
    /// Speed 10, five steps faster per level
    Leveled,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => match cli.variant {
            Variant::Classic => GameConfig::classic(),
            Variant::Leveled => GameConfig::leveled(),
        },
    };

    let store = FileHighScoreStore::new(&cli.high_score_file);
    info!("High scores in {:?}", store.path());

    let game = match cli.seed {
        Some(seed) => GameLoop::with_rng(config, store, StdRng::seed_from_u64(seed))?,
        None => GameLoop::new(config, store)?,
    };
    HumanMode::with_game(game).run().await?;

    Ok(())
}
