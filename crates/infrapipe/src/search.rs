//! Local feature search.
//!
//! Matches the query against project name, description and asset id of every
//! feature in the full dataset (not the filtered subset). Address geocoding is
//! a separate service and not handled here.

use crate::dimensions::scalar_text;
use geojson::Feature;
use serde::Serialize;

const DESCRIPTION_PREVIEW: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Trimmed queries shorter than this yield nothing.
    pub min_query_len: usize,
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_len: 3,
            limit: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Position of the feature in the dataset.
    pub index: usize,
    pub project_name: String,
    pub asset_id: Option<String>,
    pub description: String,
}

fn text(feature: &Feature, name: &str) -> Option<String> {
    scalar_text(feature.property(name))
}

fn preview(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW {
        let head: String = description.chars().take(DESCRIPTION_PREVIEW).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}

fn matches(feature: &Feature, needle: &str) -> bool {
    ["project_name", "project_description", "asset_id"]
        .iter()
        .filter_map(|name| text(feature, name))
        .any(|value| value.to_lowercase().contains(needle))
}

/// Suggestions for `query`, in dataset order, at most `options.limit`.
pub fn search_features(features: &[Feature], query: &str, options: &SearchOptions) -> Vec<Suggestion> {
    let query = query.trim();
    if query.chars().count() < options.min_query_len {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    features
        .iter()
        .enumerate()
        .filter(|(_, feature)| matches(feature, &needle))
        .take(options.limit)
        .map(|(index, feature)| Suggestion {
            index,
            project_name: text(feature, "project_name")
                .unwrap_or_else(|| "Unknown Project Name".to_string()),
            asset_id: text(feature, "asset_id"),
            description: text(feature, "project_description")
                .map(|d| preview(&d))
                .unwrap_or_default(),
        })
        .collect()
}
