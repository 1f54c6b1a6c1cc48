use anyhow::Result;
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use grid_snake::SnakeError;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a walled grid, in the terminal")]
struct Cli {
    /// Grid width in cells, walls included
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells, walls included
    #[arg(long)]
    height: Option<usize>,

    /// JSON file with a game configuration; --width and --height override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<SnakeError>().map_or(1, SnakeError::code);
            error!("{err:#}");
            eprintln!("rc={code} {err:#}");
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.game_config()?;
    info!(
        "starting on a {}x{} grid",
        config.grid_width, config.grid_height
    );

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
