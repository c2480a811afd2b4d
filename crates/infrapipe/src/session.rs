//! # Filter Session
//!
//! All mutable filter state lives here: the full dataset and one
//! [`FilterControlSet`] per registry dimension. The session is passed by
//! reference to the engine; there is no ambient state.
//!
//! The session mutates only through its own methods. Recomputing the filtered
//! result after a toggle is the caller's job (see [`crate::api::FilterApi`]),
//! which keeps the session free of any render-surface knowledge.

use crate::controls::FilterControlSet;
use crate::dataset::Dataset;
use crate::dimensions::{distinct_values, infrastructure, ExclusionFilter, Exclusions, Registry};
use crate::error::{InfraError, Result};
use geojson::Feature;

#[derive(Debug, Clone)]
pub struct FilterSession {
    registry: Registry,
    dataset: Option<Dataset>,
    /// Parallel to the registry's dimensions.
    controls: Vec<FilterControlSet>,
}

impl FilterSession {
    pub fn new(registry: Registry) -> Self {
        let controls = registry.keys().map(FilterControlSet::new).collect();
        Self {
            registry,
            dataset: None,
            controls,
        }
    }

    /// A session over the infrastructure pipeline dimensions.
    pub fn infrastructure() -> Self {
        Self::new(infrastructure().clone())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// The full dataset's features, empty before a dataset is loaded.
    pub fn features(&self) -> &[Feature] {
        self.dataset
            .as_ref()
            .map(Dataset::features)
            .unwrap_or_default()
    }

    /// Store the dataset without touching the controls.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
    }

    /// Store the dataset and rebuild every control set from it.
    pub fn load(&mut self, dataset: Dataset) {
        tracing::info!(features = dataset.len(), "dataset loaded");
        self.set_dataset(dataset);
        self.populate_controls();
    }

    /// Rebuild every control set from the current dataset.
    pub fn populate_controls(&mut self) {
        for position in 0..self.controls.len() {
            self.populate_at(position);
        }
    }

    /// Rebuild one dimension's control set from the current dataset.
    pub fn populate(&mut self, key: &str) -> Result<()> {
        let position = self.position(key)?;
        self.populate_at(position);
        Ok(())
    }

    fn populate_at(&mut self, position: usize) {
        let Some(dimension) = self.registry.iter().nth(position) else {
            return;
        };
        let values = distinct_values(self.features(), dimension);
        tracing::debug!(dimension = dimension.key, values = values.len(), "controls built");
        self.controls[position].build(values);
    }

    pub fn controls(&self, key: &str) -> Result<&FilterControlSet> {
        let position = self.position(key)?;
        Ok(&self.controls[position])
    }

    pub fn controls_mut(&mut self, key: &str) -> Result<&mut FilterControlSet> {
        let position = self.position(key)?;
        Ok(&mut self.controls[position])
    }

    /// All control sets in registry order.
    pub fn all_controls(&self) -> &[FilterControlSet] {
        &self.controls
    }

    pub fn toggle(&mut self, key: &str, value: &str) -> Result<bool> {
        self.controls_mut(key)?.toggle(value)
    }

    pub fn toggle_all(&mut self, key: &str) -> Result<bool> {
        Ok(self.controls_mut(key)?.toggle_all())
    }

    pub fn search_controls(&mut self, key: &str, query: &str) -> Result<()> {
        self.controls_mut(key)?.search(query);
        Ok(())
    }

    /// Snapshot of every dimension's Active Selection Set as exclusion rules.
    ///
    /// Unbuilt control sets contribute nothing.
    pub fn exclusions(&self) -> Exclusions {
        Exclusions::new(
            self.registry
                .iter()
                .zip(&self.controls)
                .map(|(dimension, controls)| {
                    ExclusionFilter::new(dimension, controls.active_values())
                }),
        )
    }

    fn position(&self, key: &str) -> Result<usize> {
        self.registry
            .position(key)
            .ok_or_else(|| InfraError::UnknownDimension(key.to_string()))
    }
}
