//! # Cinder Engine
//!
//! Headless runner for the Cinder particle emitter.
//!
//! Loads a run configuration (first argument, or `cinder.toml` in the
//! working directory), builds emitters from presets and steps them at a
//! fixed rate, logging statistics as it goes. `cinder --init [path]`
//! writes the default configuration instead.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod sim;
mod stats;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{RunConfig, CONFIG_FILE};
use crate::sim::Simulation;

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("cinder=info".parse()?))
        .init();

    info!("Cinder starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1).peekable();
    let init = args.next_if(|arg| arg == "--init").is_some();
    let path = args.next().unwrap_or_else(|| CONFIG_FILE.to_string());

    if init {
        RunConfig::default().save_to(&path)?;
        info!("Wrote default configuration to {}", path);
        return Ok(());
    }

    let mut config = RunConfig::load_from(&path);
    config.validate();

    let mut simulation = Simulation::new(config)?;
    let summary = simulation.run();

    info!("{}", summary.format_line());
    info!(
        "Finished after {} frames with {} emitters, anchor at {:?}",
        simulation.frame(),
        simulation.bundle().len(),
        simulation.anchor().position
    );
    Ok(())
}
