//! # Dataset
//!
//! The full, unfiltered feature collection. It is loaded once and treated as
//! read-only: filtering produces index subsequences and fresh collections,
//! never mutations.
//!
//! The upstream fetch is asynchronous and owned by someone else. It is modelled
//! by [`DatasetSource`], which the readiness loop polls until a non-empty
//! dataset shows up (see [`crate::readiness`]).

use crate::error::{InfraError, Result};
use geojson::{Feature, FeatureCollection, GeoJson};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    features: Vec<Feature>,
}

impl Dataset {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Accept only a `FeatureCollection`; feature order is preserved.
    pub fn from_geojson(geojson: GeoJson) -> Result<Self> {
        match geojson {
            GeoJson::FeatureCollection(collection) => Ok(Self::new(collection.features)),
            GeoJson::Feature(_) => Err(InfraError::NotFeatureCollection("Feature")),
            GeoJson::Geometry(_) => Err(InfraError::NotFeatureCollection("Geometry")),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_geojson(GeoJson::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Build a collection from the features at `indices`, in the given order.
    pub fn collect(&self, indices: &[usize]) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: indices
                .iter()
                .filter_map(|&i| self.features.get(i).cloned())
                .collect(),
            foreign_members: None,
        }
    }
}

impl FromStr for Dataset {
    type Err = InfraError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_geojson(s.parse::<GeoJson>()?)
    }
}

/// Something that may eventually produce the dataset.
///
/// `poll` returns `None` while the data is not available yet.
pub trait DatasetSource {
    fn poll(&mut self) -> Option<Dataset>;
}

/// A dataset that is already in hand (or never arrives, when `None`).
impl DatasetSource for Option<Dataset> {
    fn poll(&mut self) -> Option<Dataset> {
        self.take()
    }
}

/// Reads the dataset from a GeoJSON file on every poll.
///
/// A missing or unparsable file is "not ready yet", not an error.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    fn poll(&mut self) -> Option<Dataset> {
        match Dataset::from_path(&self.path) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "dataset not available");
                None
            }
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use geojson::Geometry;
    use serde_json::{Map, Value};

    /// A point feature with the given properties.
    pub fn feature(props: &[(&str, Value)]) -> Feature {
        let properties: Map<String, Value> = props
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::Point(vec![144.96, -37.81]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// A feature with neither geometry nor properties.
    pub fn bare_feature() -> Feature {
        Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        }
    }

    pub struct DatasetFixture {
        features: Vec<Feature>,
    }

    impl Default for DatasetFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl DatasetFixture {
        pub fn new() -> Self {
            Self {
                features: Vec::new(),
            }
        }

        pub fn with(mut self, props: &[(&str, Value)]) -> Self {
            self.features.push(feature(props));
            self
        }

        pub fn with_project(self, name: &str, category: &str, origin: &str) -> Self {
            self.with(&[
                ("project_name", Value::from(name)),
                ("asset_category", Value::from(category)),
                ("origin", Value::from(origin)),
            ])
        }

        pub fn build(self) -> Dataset {
            Dataset::new(self.features)
        }
    }
}
