//! # API Facade
//!
//! The API layer is a **thin facade** tying the session to its render
//! collaborators. It is the single entry point for UI clients.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Owns** the [`FilterSession`], the render surface and the count display
//! - **Dispatches** toggles to the session and then recomputes, so every
//!   toggle is immediately reflected on the surface (no batching)
//! - **Returns structured types** (`Result<Publish>`, `Report`, suggestions)
//!
//! ## What the API Does NOT Do
//!
//! - **Filter logic**: that belongs in `engine.rs` and `dimensions/`
//! - **Presentation**: no terminal or HTML output
//!
//! ## Generic Over Surfaces
//!
//! `FilterApi<S: RenderSurface, C: CountDisplay>` is generic over its
//! collaborators. Production clients plug in their map source; tests and the
//! CLI use [`MemorySurface`] and [`MemoryCounter`].
//!
//! [`MemorySurface`]: crate::surface::MemorySurface
//! [`MemoryCounter`]: crate::surface::MemoryCounter

use crate::config::InfraConfig;
use crate::controls::FilterControlSet;
use crate::dataset::{Dataset, DatasetSource};
use crate::engine::{self, Evaluation, Publish};
use crate::error::Result;
use crate::readiness::{self, Readiness, Sleeper};
use crate::report::Report;
use crate::search::{self, Suggestion};
use crate::session::FilterSession;
use crate::surface::{CountDisplay, RenderSurface};

pub struct FilterApi<S: RenderSurface, C: CountDisplay> {
    session: FilterSession,
    surface: S,
    counter: C,
    config: InfraConfig,
}

impl<S: RenderSurface, C: CountDisplay> FilterApi<S, C> {
    pub fn new(session: FilterSession, surface: S, counter: C, config: InfraConfig) -> Self {
        Self {
            session,
            surface,
            counter,
            config,
        }
    }

    pub fn session(&self) -> &FilterSession {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    pub fn config(&self) -> &InfraConfig {
        &self.config
    }

    /// Load a dataset that is already in hand, then publish the unfiltered result.
    pub fn load(&mut self, dataset: Dataset) -> Publish {
        self.session.load(dataset);
        self.recompute()
    }

    /// Wait for the dataset under the configured bounded policy, then publish.
    ///
    /// Giving up is not an error; it is reported through [`Readiness::GaveUp`].
    pub fn initialize<D, Z>(&mut self, source: &mut D, sleeper: &mut Z) -> Readiness<usize>
    where
        D: DatasetSource + ?Sized,
        Z: Sleeper + ?Sized,
    {
        let outcome = readiness::initialize(
            &mut self.session,
            source,
            self.config.dataset_policy(),
            sleeper,
        );
        if outcome.is_ready() {
            self.recompute_when_ready(sleeper);
        }
        outcome
    }

    /// Flip one value control and recompute.
    pub fn toggle(&mut self, dimension: &str, value: &str) -> Result<Publish> {
        self.session.toggle(dimension, value)?;
        Ok(self.recompute())
    }

    /// Toggle a dimension's select-all control and recompute.
    pub fn toggle_all(&mut self, dimension: &str) -> Result<Publish> {
        self.session.toggle_all(dimension)?;
        Ok(self.recompute())
    }

    /// Filter a dimension's control labels. Display-only; nothing is recomputed.
    pub fn search_controls(&mut self, dimension: &str, query: &str) -> Result<&FilterControlSet> {
        self.session.search_controls(dimension, query)?;
        self.session.controls(dimension)
    }

    pub fn controls(&self, dimension: &str) -> Result<&FilterControlSet> {
        self.session.controls(dimension)
    }

    /// Evaluate without publishing.
    pub fn evaluate(&self) -> Evaluation {
        engine::evaluate(&self.session)
    }

    /// Evaluate and publish once; skipped if the surface is not ready.
    pub fn recompute(&mut self) -> Publish {
        engine::recompute(&self.session, &mut self.surface, &mut self.counter)
    }

    /// Evaluate and publish, retrying until the surface is ready.
    pub fn recompute_when_ready<Z: Sleeper + ?Sized>(&mut self, sleeper: &mut Z) -> Publish {
        let policy = self.config.surface_policy();
        match readiness::recompute_when_ready(
            &self.session,
            &mut self.surface,
            &mut self.counter,
            policy,
            sleeper,
        ) {
            Readiness::Ready { value, .. } => value,
            Readiness::GaveUp { .. } => Publish::SurfaceNotReady,
        }
    }

    /// Local feature suggestions over the full dataset.
    pub fn search_features(&self, query: &str) -> Vec<Suggestion> {
        search::search_features(
            self.session.features(),
            query,
            &self.config.search_options(),
        )
    }

    /// Report rows for the surface's current data.
    pub fn report(&self) -> Option<Report> {
        Report::from_surface(&self.surface)
    }
}
