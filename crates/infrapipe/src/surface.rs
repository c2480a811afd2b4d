//! # Render Collaborators
//!
//! The filter engine publishes into two surfaces it does not own:
//!
//! - a [`RenderSurface`] whose backing collection is replaced wholesale on
//!   every successful recompute (the map source), and
//! - a [`CountDisplay`] receiving the `"Total Projects: N"` line.
//!
//! The render surface may not exist yet, e.g. while the map style is still
//! loading or is being rebuilt after a theme change. `is_ready` reports that;
//! the engine skips the cycle instead of failing.
//!
//! [`MemorySurface`] and [`MemoryCounter`] are in-memory implementations used
//! by the CLI and by tests.

use geojson::FeatureCollection;
use std::cell::Cell;

pub trait RenderSurface {
    /// Whether the surface can accept data right now.
    fn is_ready(&self) -> bool;

    /// Replace the backing collection.
    fn set_data(&mut self, collection: FeatureCollection);

    /// The most recently published collection.
    fn current_data(&self) -> Option<&FeatureCollection>;
}

pub trait CountDisplay {
    fn set_text(&mut self, text: String);
}

/// Format a count with `,` thousands separators.
pub fn group_thousands(count: usize) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// The count line shown next to the map.
pub fn count_text(count: usize) -> String {
    format!("Total Projects: {}", group_thousands(count))
}

/// In-memory render surface.
///
/// Uses `Cell` for the readiness countdown so `is_ready(&self)` can simulate a
/// surface that only comes up after a number of checks.
#[derive(Debug, Default)]
pub struct MemorySurface {
    data: Option<FeatureCollection>,
    not_ready_checks: Cell<u32>,
    publishes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that reports not-ready for the first `checks` readiness checks.
    pub fn ready_after(checks: u32) -> Self {
        Self {
            not_ready_checks: Cell::new(checks),
            ..Self::default()
        }
    }

    /// Simulate a teardown, e.g. a style switch that drops every source.
    pub fn tear_down(&mut self, checks: u32) {
        self.data = None;
        self.not_ready_checks.set(checks);
    }

    /// How many times data was published.
    pub fn publishes(&self) -> usize {
        self.publishes
    }

    pub fn feature_count(&self) -> Option<usize> {
        self.data.as_ref().map(|c| c.features.len())
    }
}

impl RenderSurface for MemorySurface {
    fn is_ready(&self) -> bool {
        let remaining = self.not_ready_checks.get();
        if remaining == 0 {
            return true;
        }
        self.not_ready_checks.set(remaining - 1);
        false
    }

    fn set_data(&mut self, collection: FeatureCollection) {
        self.data = Some(collection);
        self.publishes += 1;
    }

    fn current_data(&self) -> Option<&FeatureCollection> {
        self.data.as_ref()
    }
}

/// In-memory count display.
#[derive(Debug, Default, Clone)]
pub struct MemoryCounter {
    text: Option<String>,
}

impl MemoryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl CountDisplay for MemoryCounter {
    fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }
}
