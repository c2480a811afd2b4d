//! # Infrapipe Architecture
//!
//! Infrapipe is the **filter engine behind an infrastructure pipeline map**.
//! It takes a GeoJSON feature collection of capital-works projects, exposes
//! one filter control set per categorical attribute, and recomputes the
//! visible subset every time a control is toggled. The map itself, popups,
//! geocoding and file exporters are collaborators that plug in at the edges.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clients (infrapipe-cli, a map front-end, ...)              │
//! │  - Own terminal / DOM / map concerns                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Toggle → recompute → publish                             │
//! │  - Readiness waits for dataset and render surface           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session + Engine (session.rs, engine.rs, controls.rs)      │
//! │  - Active Selection Sets per dimension                      │
//! │  - Pure evaluation: dataset × selections → retained indices │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Dimensions (dimensions/)                                   │
//! │  - Registry of 13 attribute descriptors                     │
//! │  - Display value normalization ("Blank" sentinel)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exclusionary Selections
//!
//! Activating a value **hides** the features carrying it. A feature is shown
//! iff no dimension's active set contains its value for that dimension. Empty
//! active sets impose nothing.
//!
//! ## Failure Model
//!
//! Nothing on the recompute path returns an error. A missing dataset or an
//! unavailable render surface skips the cycle and logs through `tracing`;
//! malformed features simply read as `Blank`. Errors ([`error::InfraError`])
//! are reserved for I/O, parsing, configuration and unknown keys or values.
//!
//! ## Testing Strategy
//!
//! - **Dimensions, controls, engine**: thorough unit tests beside the code.
//! - **API**: dispatch tests against `MemorySurface` / `MemoryCounter`.
//! - **Integration** (`tests/`): end-to-end filter scenarios over parsed GeoJSON.
//!
//! ## Module Overview
//!
//! - [`api`]: facade owning session and collaborators
//! - [`config`]: layered configuration
//! - [`controls`]: per-dimension filter control sets
//! - [`dataset`]: the full feature collection and its sources
//! - [`dimensions`]: registry, normalization, exclusion rules
//! - [`engine`]: evaluation and publishing
//! - [`readiness`]: bounded and unbounded retry policies
//! - [`report`]: export rows for the current result
//! - [`search`]: local feature search
//! - [`session`]: filter state
//! - [`surface`]: render surface and count display collaborators

pub mod api;
pub mod config;
pub mod controls;
pub mod dataset;
pub mod dimensions;
pub mod engine;
pub mod error;
pub mod readiness;
pub mod report;
pub mod search;
pub mod session;
pub mod surface;
