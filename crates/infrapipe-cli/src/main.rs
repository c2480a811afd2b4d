//! # Infrapipe CLI Architecture
//!
//! Infrapipe ships with a command-line client, but the binary is intentionally
//! thin: the CLI lives in `src/cli/`, while this file only invokes `cli::run()`
//! and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/infrapipe/`: filter engine, UI agnostic
//! - `crates/infrapipe-cli/`: this CLI tool, depends on the `infrapipe` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/infrapipe-cli/src/cli/)                  │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Dataset loading + flag replay (commands.rs)              │
//! │  - Terminal rendering via console styles (render.rs)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/infrapipe/src/api.rs)                    │
//! │  - Toggle → recompute → publish                             │
//! │  - Memory surface and counter stand in for the map          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (crates/infrapipe/src/{engine,session,dimensions})  │
//! │  - Pure evaluation, no knowledge of stdout or exits         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Engine**: unit and scenario tests in the library crate.
//! - **CLI parsing and rendering**: unit tests beside `setup.rs` and `render.rs`,
//!   rendering with colors forced off.
//! - **End to end** (`tests/`): `assert_cmd` runs the binary against GeoJSON
//!   written to a temp dir.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
