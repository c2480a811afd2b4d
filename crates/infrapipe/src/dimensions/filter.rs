//! Exclusion filtering.
//!
//! Active selections are exclusionary: a value that is active in a dimension
//! hides every feature carrying that value. An [`ExclusionFilter`] captures
//! one dimension's active set; [`Exclusions`] combines all of them.

use super::Dimension;
use geojson::Feature;
use std::collections::HashSet;

/// The active selection of one dimension.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    pub dimension: Dimension,
    pub excluded: HashSet<String>,
}

impl ExclusionFilter {
    pub fn new(dimension: &Dimension, excluded: impl IntoIterator<Item = String>) -> Self {
        Self {
            dimension: *dimension,
            excluded: excluded.into_iter().collect(),
        }
    }

    /// An empty selection imposes no constraint.
    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }

    /// Check whether the feature's display value is in the excluded set.
    pub fn excludes(&self, feature: &Feature) -> bool {
        if self.excluded.is_empty() {
            return false;
        }
        self.excluded
            .contains(&self.dimension.display_value(feature))
    }
}

/// The joint exclusion rule across every dimension.
///
/// A feature is retained iff no dimension excludes it.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    filters: Vec<ExclusionFilter>,
}

impl Exclusions {
    /// Build from per-dimension filters, dropping the empty ones.
    pub fn new(filters: impl IntoIterator<Item = ExclusionFilter>) -> Self {
        Self {
            filters: filters.into_iter().filter(|f| !f.is_empty()).collect(),
        }
    }

    /// True when no dimension has an active selection.
    pub fn is_unconstrained(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filters(&self) -> &[ExclusionFilter] {
        &self.filters
    }

    pub fn retains(&self, feature: &Feature) -> bool {
        !self.filters.iter().any(|f| f.excludes(feature))
    }
}
