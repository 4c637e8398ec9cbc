mod broadcaster;
mod config;
mod input;
mod render;

use std::path::PathBuf;

use clap::Parser;
use snake_engine::{SessionRng, SnakeSession, log, logger};

use broadcaster::LogBroadcaster;
use config::{Config, get_config_manager, get_config_path};
use input::{AutopilotInput, StdinInput};

#[derive(Parser)]
#[command(name = "snake_host")]
struct Args {
    /// Path to the YAML config; defaults to a file next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    use_log_prefix: bool,
    /// Let the built-in bot steer.
    #[arg(long)]
    autopilot: bool,
    /// Print the board after every tick.
    #[arg(long)]
    draw: bool,
    /// Fixed RNG seed, overrides the config file.
    #[arg(long)]
    seed: Option<u64>,
    /// Write the default config to the config path and exit.
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Host".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_path = get_config_path(args.config);
    let config_manager = get_config_manager(config_path.clone());

    if args.write_default_config {
        config_manager.set_config(&Config::default())?;
        log!("Default config written to {}", config_path.display());
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    log!("Using config {}", config_path.display());

    if args.draw {
        config.draw_board = true;
    }
    if args.autopilot {
        config.autopilot.enabled = true;
    }
    if args.seed.is_some() {
        config.game.seed = args.seed;
    }

    let (width_px, height_px) = config.game.board_pixel_size();
    log!(
        "Board {}x{} cells, {}x{} px",
        config.game.columns,
        config.game.rows,
        width_px,
        height_px
    );

    let mut session = SnakeSession::start(config.game.clone(), LogBroadcaster::new(config.draw_board))?;
    session.attach_input(StdinInput::new());
    if config.autopilot.enabled {
        let pilot = AutopilotInput::new(
            session.subscribe(),
            config.autopilot.restart_on_game_over,
            SessionRng::from_optional_seed(config.game.seed),
        );
        session.attach_input(pilot);
    }

    log!("Commands: up/down/left/right (or ArrowUp...), touchstart x y, touchmove x y, touchend, reset, quit");

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                log!("Failed to listen for Ctrl+C: {}", e);
            }
            log!("Shutdown signal received");
        }
        _ = session.finished() => {
            log!("Session ended");
        }
    }

    session.shutdown().await;
    log!("Host shut down gracefully");

    Ok(())
}
