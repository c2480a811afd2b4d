//! # CLI Behavior
//!
//! This is **one possible UI client** for infrapipe, not the engine itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## One Invocation, One Session
//!
//! A map user builds up exclusions by clicking controls. The CLI replays the
//! same clicks from flags:
//!
//! - `infrapipe filter --data pipeline.geojson --exclude origin=Council`
//!   hides every Council-originated project and prints the count line.
//! - `--exclude-all start-year --exclude start-year=2024` hides every year,
//!   then re-shows 2024.
//! - `--output json` prints the filtered FeatureCollection instead, ready to
//!   hand to any GeoJSON consumer.
//!
//! ### Waiting for the Dataset
//!
//! `--wait` polls the data file under the configured bounded policy
//! (`dataset_poll_interval_ms` × `dataset_max_attempts`) instead of failing
//! immediately. Without it a missing or malformed file is an error.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup, dispatch and per-command handlers
//! - `render`: Output formatting (checklists, tables, colors)
//! - `setup`: Argument parsing via clap, help text
//! - `styles`: Terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
