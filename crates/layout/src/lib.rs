// SPDX-License-Identifier: MIT

//!
//! This crate lays out timeline bands.  Given events and the size of each
//! band it works out:
//!
//! - Which calendar units are shown as columns, and where
//! - Which row each event is drawn in
//! - Which events are visible, and where they are drawn
//!
//! Drawing is left to the host, which can work from a [`TraySnapshot`] or
//! from the individual [`Band`]s.
//!

mod band;
mod config;
pub mod engine;
mod tray;

pub use band::*;
pub use config::*;
pub use tray::*;
