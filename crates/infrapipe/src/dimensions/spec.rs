//! Dimension specifications and registry.
//!
//! This module defines the schema of every filterable dimension: which
//! properties feed it and how its values are ordered for display.

use super::value::{scalar_text, BLANK};
use geojson::Feature;
use once_cell::sync::Lazy;
use std::cmp::Ordering;

/// Display-order comparator for a dimension's values.
pub type Comparator = fn(&str, &str) -> Ordering;

/// Specification for a single filterable dimension.
#[derive(Debug, Clone, Copy)]
pub struct Dimension {
    /// Stable key used by the API and CLI (e.g. "origin", "start-year")
    pub key: &'static str,

    /// Human-readable label for filter controls
    pub label: &'static str,

    /// Property aliases consulted in order; the first non-blank one wins
    pub properties: &'static [&'static str],

    /// Custom display ordering.
    ///
    /// `None` means lexicographic ascending with `Blank` forced first.
    pub ordering: Option<Comparator>,
}

impl Dimension {
    /// Create a dimension with the default ordering.
    pub const fn new(
        key: &'static str,
        label: &'static str,
        properties: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            label,
            properties,
            ordering: None,
        }
    }

    /// Set a custom ordering.
    pub const fn ordered_by(mut self, compare: Comparator) -> Self {
        self.ordering = Some(compare);
        self
    }

    /// The raw text of this dimension for a feature, `None` when every alias is blank.
    pub fn raw_value(&self, feature: &Feature) -> Option<String> {
        self.properties
            .iter()
            .find_map(|name| scalar_text(feature.property(*name)))
    }

    /// The normalized display value of this dimension for a feature.
    pub fn display_value(&self, feature: &Feature) -> String {
        self.raw_value(feature)
            .unwrap_or_else(|| BLANK.to_string())
    }
}

/// Start years: `Blank` first, then numerically descending.
///
/// Values that do not parse as numbers sort after the numeric ones.
pub fn start_year_order(a: &str, b: &str) -> Ordering {
    match (a == BLANK, b == BLANK) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => y.total_cmp(&x).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// The infrastructure pipeline dimensions, in control order.
///
/// This is the single source of truth for what can be filtered.
/// Adding a filter means adding an entry here.
pub const DIMENSIONS: &[Dimension] = &[
    Dimension::new("origin", "Origin", &["project_or_program_origin", "origin"]),
    Dimension::new("parent-program", "Parent Program", &["parent_program"]),
    Dimension::new("child-program", "Child Program", &["child_program"]),
    Dimension::new(
        "start-year",
        "Start Year",
        &["project_or_program_start_year", "start_year"],
    )
    .ordered_by(start_year_order),
    Dimension::new("asset-category", "Asset Category", &["asset_category"]),
    Dimension::new("project-name", "Project Name", &["project_name"]),
    Dimension::new("project-sponsor", "Project Sponsor", &["project_sponsor"]),
    Dimension::new("project-owner", "Project Owner", &["project_owner_by_role"]),
    Dimension::new("project-type", "Project Type", &["project_type"]),
    Dimension::new("in-flight", "In Flight", &["committed"]),
    Dimension::new("delivery-agent", "Delivery Agent", &["project_delivery_agent"]),
    Dimension::new(
        "asset-expenditure",
        "Asset Expenditure",
        &["asset_expenditure_type"],
    ),
    Dimension::new("project-manager", "Project Manager", &["project_manager"]),
];

/// An ordered set of dimensions evaluated jointly by the filter engine.
#[derive(Debug, Clone)]
pub struct Registry {
    dimensions: Vec<Dimension>,
}

impl Registry {
    pub fn new(dimensions: Vec<Dimension>) -> Self {
        Self { dimensions }
    }

    /// Look up a dimension by key.
    pub fn get(&self, key: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.key == key)
    }

    /// Position of a dimension in registry order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.dimensions.iter().map(|d| d.key)
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

static INFRASTRUCTURE: Lazy<Registry> = Lazy::new(|| Registry::new(DIMENSIONS.to_vec()));

/// The infrastructure pipeline registry.
pub fn infrastructure() -> &'static Registry {
    &INFRASTRUCTURE
}
