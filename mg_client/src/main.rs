//! A terminal memory game.
//!
//! The client fetches a roster of characters from a public API, deals them
//! as shuffled cards and scores each card picked only once.

use anyhow::{Context, Result};
use pico_args::Arguments;
use std::{path::PathBuf, sync::Arc};

use memory_game::Session;
use mg_client::{
    api_client::ApiClient,
    config::{CliOverrides, ClientConfig},
    logging, plain,
    tui_app::TuiApp,
};

const HELP: &str = "\
Play the memory game in your terminal

USAGE:
  mg_client [OPTIONS]

OPTIONS:
  --api-url URL         Character listing URL     [default: env MEMORY_GAME_API_URL or https://dattebayo-api.onrender.com/characters]
  --cards N             Number of cards to deal   [default: env MEMORY_GAME_CARDS or 8]
  --reset-delay-ms MS   Pause between rounds      [default: env MEMORY_GAME_RESET_DELAY_MS or 2000]
  --log-file PATH       Append logs to PATH       [default: env MEMORY_GAME_LOG_FILE, memory_game.log in TUI mode]
  --seed N              Fixed shuffle seed        [default: env MEMORY_GAME_SEED or random]

FLAGS:
  --plain               Use the line-oriented mode instead of the TUI
  -h, --help            Print help information

ENVIRONMENT:
  RUST_LOG              Log filter (e.g., debug, memory_game=debug)
";

const DEFAULT_TUI_LOG_FILE: &str = "memory_game.log";

struct Args {
    overrides: CliOverrides,
    plain: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        plain: pargs.contains("--plain"),
        overrides: CliOverrides {
            api_url: pargs.opt_value_from_str("--api-url")?,
            roster_size: pargs.opt_value_from_str("--cards")?,
            reset_delay_ms: pargs.opt_value_from_str("--reset-delay-ms")?,
            log_file: pargs.opt_value_from_str("--log-file")?,
            seed: pargs.opt_value_from_str("--seed")?,
        },
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {remaining:?}. Try --help");
    }

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let config = ClientConfig::from_env(args.overrides).context("Invalid configuration")?;

    let log_file = match (&config.log_file, args.plain) {
        (Some(path), _) => Some(path.clone()),
        (None, false) => Some(PathBuf::from(DEFAULT_TUI_LOG_FILE)),
        (None, true) => None,
    };
    logging::init(log_file.as_deref())?;

    tracing::info!(
        api_url = %config.api_url,
        cards = config.roster_size,
        reset_delay_ms = config.reset_delay.as_millis() as u64,
        "Starting memory game"
    );

    let source = Arc::new(ApiClient::new(config.api_url.clone()));
    let session = Session::mount(source, config.session_settings());

    if args.plain {
        plain::run(session).await?;
    } else {
        let terminal = ratatui::init();
        let result = TuiApp::new(session).run(terminal).await;
        ratatui::restore();
        result?;
    }

    tracing::info!("Memory game closed");
    Ok(())
}
