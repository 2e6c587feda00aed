//! Spiral galaxy with a debug panel.
//!
//! Run with: `cargo run --example galaxy -- [config.json]`
//!
//! Drag to orbit, scroll to zoom, space to pause the spin. Edits in the
//! panel rebuild the galaxy when a slider is released.

use pointfield::prelude::*;
use std::path::PathBuf;

fn main() {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = DemoConfig::load_or(config_path.as_deref(), DemoConfig::galaxy());

    if let Err(e) = Demo::from_config(config).run() {
        eprintln!("galaxy: {e}");
        std::process::exit(1);
    }
}
