//! Display values and distinct-value extraction.
//!
//! Every feature yields exactly one display value per dimension. Raw values
//! are trimmed; anything empty, whitespace-only, null or missing collapses to
//! the [`BLANK`] sentinel so that all of those land in the same filter group.

use super::Dimension;
use geojson::Feature;
use serde_json::Value;
use std::collections::BTreeSet;

/// Sentinel display value for empty or missing properties.
pub const BLANK: &str = "Blank";

/// Convert a raw property into trimmed text, or `None` when it is blank.
///
/// Strings are trimmed, numbers and booleans are stringified. Null, arrays
/// and objects are not scalar display values and count as blank.
pub fn scalar_text(raw: Option<&Value>) -> Option<String> {
    let text = match raw? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Normalize a raw property value into its display value.
pub fn normalize(raw: Option<&Value>) -> String {
    scalar_text(raw).unwrap_or_else(|| BLANK.to_string())
}

/// Compute the ordered, de-duplicated display values of `dimension` over `features`.
///
/// With a custom comparator the values are sorted by it; otherwise they are
/// sorted lexicographically and `Blank` is moved to the front. The output only
/// depends on the set of values present, so repeated calls are identical.
pub fn distinct_values(features: &[Feature], dimension: &Dimension) -> Vec<String> {
    let unique: BTreeSet<String> = features
        .iter()
        .map(|feature| dimension.display_value(feature))
        .collect();

    // BTreeSet iteration is already lexicographic.
    let mut values: Vec<String> = unique.into_iter().collect();

    match dimension.ordering {
        Some(compare) => values.sort_by(|a, b| compare(a, b)),
        None => {
            if let Some(pos) = values.iter().position(|v| v == BLANK) {
                let blank = values.remove(pos);
                values.insert(0, blank);
            }
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::feature;
    use crate::dimensions::infrastructure;
    use serde_json::json;

    fn dim(key: &str) -> &'static Dimension {
        infrastructure().get(key).unwrap()
    }

    #[test]
    fn normalize_trims_strings() {
        assert_eq!(normalize(Some(&json!("  Transport "))), "Transport");
    }

    #[test]
    fn normalize_blank_variants() {
        assert_eq!(normalize(Some(&json!(""))), BLANK);
        assert_eq!(normalize(Some(&json!("   "))), BLANK);
        assert_eq!(normalize(Some(&Value::Null)), BLANK);
        assert_eq!(normalize(None), BLANK);
    }

    #[test]
    fn normalize_stringifies_scalars() {
        assert_eq!(normalize(Some(&json!(2020))), "2020");
        assert_eq!(normalize(Some(&json!(true))), "true");
    }

    #[test]
    fn normalize_non_scalars_are_blank() {
        assert_eq!(normalize(Some(&json!(["a"]))), BLANK);
        assert_eq!(normalize(Some(&json!({"a": 1}))), BLANK);
    }

    #[test]
    fn single_feature_yields_single_value() {
        let features = vec![feature(&[("asset_category", json!(" Land "))])];
        assert_eq!(distinct_values(&features, dim("asset-category")), vec!["Land"]);

        let features = vec![feature(&[])];
        assert_eq!(distinct_values(&features, dim("asset-category")), vec![BLANK]);
    }

    #[test]
    fn empty_collection_yields_no_values() {
        assert!(distinct_values(&[], dim("origin")).is_empty());
    }

    #[test]
    fn default_ordering_puts_blank_first() {
        let features = vec![
            feature(&[("asset_category", json!("Transport"))]),
            feature(&[("asset_category", json!(""))]),
            feature(&[("asset_category", json!("Buildings"))]),
            feature(&[("asset_category", json!("Transport"))]),
        ];
        assert_eq!(
            distinct_values(&features, dim("asset-category")),
            vec!["Blank", "Buildings", "Transport"]
        );
    }

    #[test]
    fn default_ordering_sorts_lowercase_after_uppercase() {
        let features = vec![
            feature(&[("origin", json!("council"))]),
            feature(&[("origin", json!("Council"))]),
        ];
        assert_eq!(
            distinct_values(&features, dim("origin")),
            vec!["Council", "council"]
        );
    }

    #[test]
    fn start_year_orders_descending_with_blank_first() {
        let features = vec![
            feature(&[("start_year", json!("2020"))]),
            feature(&[("start_year", json!(""))]),
            feature(&[("start_year", json!("2023"))]),
            feature(&[("start_year", json!("2019"))]),
        ];
        assert_eq!(
            distinct_values(&features, dim("start-year")),
            vec!["Blank", "2023", "2020", "2019"]
        );
    }

    #[test]
    fn numeric_and_string_years_collapse() {
        let features = vec![
            feature(&[("start_year", json!(2021))]),
            feature(&[("project_or_program_start_year", json!("2021"))]),
        ];
        assert_eq!(distinct_values(&features, dim("start-year")), vec!["2021"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let features = vec![
            feature(&[("origin", json!("Council"))]),
            feature(&[("origin", json!("State"))]),
            feature(&[]),
        ];
        let first = distinct_values(&features, dim("origin"));
        let second = distinct_values(&features, dim("origin"));
        assert_eq!(first, second);
        assert_eq!(first, vec!["Blank", "Council", "State"]);
    }
}
