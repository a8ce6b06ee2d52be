//! Headless console driver for DreamStory.
//!
//! Wires configuration, logging and the session actor to a line-based
//! console on stdin, standing in for a graphical presentation layer.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `dreamstory-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing), `RUST_LOG` first, then the
//!    configured level
//! 3. Build the shared catalog and situation registry
//! 4. Spawn the session actor with an event-logging tick callback
//! 5. Read commands from stdin until `quit` or end of input
//! 6. Shut the actor down and log the final clock

mod console;
mod error;
mod log_callback;

use std::path::Path;
use std::sync::Arc;

use dreamstory_core::catalog::Catalog;
use dreamstory_core::clock::ClockTime;
use dreamstory_core::config::DreamStoryConfig;
use dreamstory_core::scheduler::spawn_session;
use dreamstory_core::session::Session;
use dreamstory_core::situations::SituationRegistry;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleCommand;
use crate::error::EngineError;
use crate::log_callback::EventLogCallback;

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "dreamstory-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the config is invalid, stdin fails or the session
/// actor dies.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, from_file) = load_config(Path::new(CONFIG_FILE))?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("dreamstory-engine starting");
    info!(
        from_file,
        seed = config.world.seed,
        base_interval_ms = config.tick.base_interval_ms,
        hours_per_tick = config.tick.hours_per_tick,
        situation_chance = config.situations.chance,
        "Configuration loaded"
    );

    // 3. Shared registries.
    let config = Arc::new(config);
    let catalog = Arc::new(Catalog::standard());
    let situations = Arc::new(SituationRegistry::standard(config.situations.chance));

    // 4. Session actor.
    let session = Session::with_registries(
        Arc::clone(&config),
        catalog,
        Arc::clone(&situations),
    );
    let handle = spawn_session(session, Box::new(EventLogCallback::new(situations)));

    // 5. Console loop.
    println!("{}", console::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.map_err(EngineError::from)? {
        let command = match console::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "Rejected console line");
                println!("{e}");
                continue;
            }
        };

        match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => println!("{}", console::HELP),
            ConsoleCommand::Status => println!("{}", console::render_status(&handle.snapshot())),
            ConsoleCommand::Objects => {
                let views = handle.room_view().await.map_err(EngineError::from)?;
                println!("{}", console::render_objects(&views));
            }
            other => {
                let Some(intent) = other.into_intent(&config.speed) else {
                    continue;
                };
                let outcome = handle.send(intent).await.map_err(EngineError::from)?;
                println!("{}", console::render_outcome(&outcome));
            }
        }
    }

    // 6. Shutdown.
    let session = handle.shutdown().await.map_err(EngineError::from)?;
    info!(
        session = %session.id(),
        started_at = %session.started_at(),
        clock = %ClockTime::of(session.state()),
        "dreamstory-engine shutdown complete"
    );

    Ok(())
}

/// Load the configuration from `path`, falling back to defaults when the
/// file does not exist.
///
/// The flag is `true` when the file was read.
fn load_config(path: &Path) -> Result<(DreamStoryConfig, bool), EngineError> {
    if path.exists() {
        Ok((DreamStoryConfig::from_file(path)?, true))
    } else {
        Ok((DreamStoryConfig::parse("")?, false))
    }
}
