// SPDX-License-Identifier: MIT

//!
//! Lay out a timeline from the command line, printing what would be drawn as
//! JSON
//!

use clap::Parser;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::path::PathBuf;
use timeline_bands_core::{EventSet, load_event_document_file, parse_date_time};
use timeline_bands_layout::TrayConfig;

#[macro_use]
extern crate log;
extern crate simplelog;

#[derive(Parser, Debug)]
#[command(version, about = "Lay out timeline bands and print the result as JSON")]
struct Cli {
    /// Event document (JSON)
    #[arg(long)]
    events: Option<PathBuf>,

    /// Tray config (JSON).  Defaults are used if not given
    #[arg(long)]
    config: Option<PathBuf>,

    /// Date to centre on, instead of the config's initial date
    #[arg(long)]
    anchor: Option<String>,

    /// Columns to zoom out by (negative to zoom in)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    zoom: i32,

    /// Pixels to drag the main band to the right (negative to go forward in
    /// time)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    drag: f64,

    /// Log debug messages
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // Setup logging (stdout is kept for the JSON)
    let config_log = ConfigBuilder::new()
        .add_filter_allow_str("timeline_bands")
        .build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    CombinedLogger::init(vec![TermLogger::new(
        level,
        config_log,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])?;

    let config = match &args.config {
        Some(path) => TrayConfig::load(path)?,
        None => TrayConfig::default(),
    };
    let mut tray = config.build()?;

    let events = match &args.events {
        Some(path) => load_event_document_file(path)?,
        None => EventSet::default(),
    };
    tray.set_events(events)?;

    if let Some(anchor) = &args.anchor {
        tray.set_current_date(parse_date_time(anchor)?);
    }
    for _ in 0..args.zoom.unsigned_abs() {
        if args.zoom > 0 {
            tray.zoom_out()?;
        } else {
            tray.zoom_in()?;
        }
    }
    if args.drag != 0.0 {
        tray.drag(tray.main_index(), args.drag)?;
    }

    info!(
        "{} events, current date {}",
        tray.events().len(),
        tray.current_date()
    );
    println!("{}", serde_json::to_string_pretty(&tray.snapshot())?);
    Ok(())
}
