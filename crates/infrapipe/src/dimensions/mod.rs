//! # Dimension System
//!
//! A dimension is one independently filterable feature attribute ("origin",
//! "start-year", ...). Instead of one bespoke code path per attribute, every
//! dimension is a [`Dimension`] descriptor held in an ordered [`Registry`] and
//! the rest of the crate iterates the registry uniformly.
//!
//! - **Specifications**: key, label, property alias chain, optional ordering
//! - **Values**: normalization of raw property values into display values,
//!   with the `"Blank"` sentinel for anything empty or missing
//! - **Filtering**: exclusion predicates built from active selections
//!
//! ## Normalization
//!
//! | Raw property | Display value |
//! |--------------|---------------|
//! | `"Transport "` | `Transport` |
//! | `""`, `"   "` | `Blank` |
//! | `null`, missing key | `Blank` |
//! | `2020` (number) | `2020` |
//!
//! ## Usage
//!
//! ```ignore
//! let registry = infrastructure();
//! let origin = registry.get("origin").unwrap();
//! let values = distinct_values(dataset.features(), origin);
//!
//! let filter = ExclusionFilter::new(origin, ["Council".to_string()]);
//! if filter.excludes(&feature) { ... }
//! ```

mod filter;
mod spec;
mod value;

pub use filter::{ExclusionFilter, Exclusions};
pub use spec::{infrastructure, start_year_order, Comparator, Dimension, Registry, DIMENSIONS};
pub use value::{distinct_values, normalize, scalar_text, BLANK};
