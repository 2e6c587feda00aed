//! A field of scattered particles riding a sine wave.
//!
//! Run with: `cargo run --example particles -- [config.json]`
//!
//! Every frame each point's height is set to `sin(t + x)`.

use pointfield::prelude::*;
use std::path::PathBuf;

fn main() {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = DemoConfig::load_or(config_path.as_deref(), DemoConfig::scatter());

    if let Err(e) = Demo::from_config(config).run() {
        eprintln!("particles: {e}");
        std::process::exit(1);
    }
}
