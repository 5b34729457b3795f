//! # bistro-cli: Command-Line Front End
//!
//! Wires configuration, logging, the JSON menu store and the ordering core
//! together behind the `bistro` binary.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()          RUST_LOG or "info", logs on stderr         │
//! │  2. Command::parse(args)    usage errors exit with code 2              │
//! │  3. AppConfig::load()       defaults → bistro.toml → BISTRO_* env      │
//! │  4. execute(command)        invoices and receipts on stdout            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;

use std::io;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use commands::{execute, Command, USAGE};
pub use config::{AppConfig, ConfigError};
pub use error::{CliError, CliResult};

/// Runs the CLI with the arguments after the program name and returns the
/// process exit code.
pub fn run(args: Vec<String>) -> i32 {
    init_tracing();

    match try_run(&args) {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            if matches!(e, CliError::Usage(_)) {
                eprintln!();
                eprintln!("{}", USAGE);
            }
            e.exit_code()
        }
    }
}

fn try_run(args: &[String]) -> CliResult<()> {
    let command = Command::parse(args)?;
    let config = AppConfig::load()?;
    info!(?command, menu = %config.menu_path.display(), "Running command");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&command, &config, &mut out)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show order mutations and store I/O
/// - `RUST_LOG=bistro_core=trace` - Core crate only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Ignore a second initialization (tests, embedding).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
