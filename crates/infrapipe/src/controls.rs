//! # Filter Controls
//!
//! A [`FilterControlSet`] is the state behind one dimension's dropdown: one
//! toggle per display value plus a synthetic "Select All" toggle. The set of
//! active value toggles is the dimension's Active Selection Set.
//!
//! ## Select All
//!
//! "Select All" is tracked as a toggle of its own. `toggle_all` counts the
//! active toggles *including* select-all; if that equals `values + 1` every
//! toggle is switched off, otherwise every toggle is switched on. Activating
//! each value by hand therefore leaves select-all off, and the next
//! `toggle_all` activates (rather than clears) everything.
//!
//! ## Label Search
//!
//! `search` hides controls whose label does not contain the query
//! (case-insensitive). Hidden controls keep their active state and keep
//! filtering.

use crate::error::{InfraError, Result};

/// Label of the synthetic select-all control.
pub const SELECT_ALL_LABEL: &str = "Select All";

/// One selectable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub value: String,
    pub active: bool,
    pub hidden: bool,
}

impl Control {
    fn new(value: String) -> Self {
        Self {
            value,
            active: false,
            hidden: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterControlSet {
    key: String,
    controls: Vec<Control>,
    select_all: bool,
    select_all_hidden: bool,
    built: bool,
}

impl FilterControlSet {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            controls: Vec::new(),
            select_all: false,
            select_all_hidden: false,
            built: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace all controls with one inactive control per value.
    pub fn build(&mut self, values: Vec<String>) {
        self.controls = values.into_iter().map(Control::new).collect();
        self.select_all = false;
        self.select_all_hidden = false;
        self.built = true;
    }

    /// Whether `build` has run. Unbuilt sets impose no constraint.
    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|c| c.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Active state of one value, `None` when there is no such control.
    pub fn is_active(&self, value: &str) -> Option<bool> {
        self.find(value).map(|i| self.controls[i].active)
    }

    pub fn select_all_active(&self) -> bool {
        self.select_all
    }

    pub fn select_all_hidden(&self) -> bool {
        self.select_all_hidden
    }

    /// Flip one value control. Returns its new state.
    pub fn toggle(&mut self, value: &str) -> Result<bool> {
        let index = self.find(value).ok_or_else(|| InfraError::UnknownValue {
            dimension: self.key.clone(),
            value: value.to_string(),
        })?;
        let control = &mut self.controls[index];
        control.active = !control.active;
        Ok(control.active)
    }

    /// Activate everything, or deactivate everything if it is all active already.
    ///
    /// Returns the new state applied to every control.
    pub fn toggle_all(&mut self) -> bool {
        let fully_active = self.active_count() == self.controls.len() + 1;
        let state = !fully_active;
        for control in &mut self.controls {
            control.active = state;
        }
        self.select_all = state;
        state
    }

    /// Number of active toggles, select-all included.
    pub fn active_count(&self) -> usize {
        self.controls.iter().filter(|c| c.active).count() + usize::from(self.select_all)
    }

    /// The Active Selection Set, in display order.
    pub fn active_values(&self) -> Vec<String> {
        self.controls
            .iter()
            .filter(|c| c.active)
            .map(|c| c.value.clone())
            .collect()
    }

    /// Hide controls whose label does not contain `query`, case-insensitively.
    ///
    /// An empty query shows everything again.
    pub fn search(&mut self, query: &str) {
        let needle = query.to_lowercase();
        for control in &mut self.controls {
            control.hidden = !control.value.to_lowercase().contains(&needle);
        }
        self.select_all_hidden = !SELECT_ALL_LABEL.to_lowercase().contains(&needle);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter().filter(|c| !c.hidden)
    }

    fn find(&self, value: &str) -> Option<usize> {
        self.controls.iter().position(|c| c.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(values: &[&str]) -> FilterControlSet {
        let mut set = FilterControlSet::new("asset-category");
        set.build(values.iter().map(|v| v.to_string()).collect());
        set
    }

    #[test]
    fn build_starts_inactive() {
        let set = built(&["Blank", "X", "Y"]);
        assert!(set.is_built());
        assert_eq!(set.len(), 3);
        assert!(set.active_values().is_empty());
        assert!(!set.select_all_active());
        assert_eq!(set.active_count(), 0);
    }

    #[test]
    fn build_replaces_existing_controls() {
        let mut set = built(&["X", "Y"]);
        set.toggle("X").unwrap();
        set.toggle_all();
        set.build(vec!["Z".to_string()]);
        assert_eq!(set.values().collect::<Vec<_>>(), vec!["Z"]);
        assert_eq!(set.active_count(), 0);
    }

    #[test]
    fn toggle_flips_one_value() {
        let mut set = built(&["X", "Y"]);
        assert!(set.toggle("X").unwrap());
        assert_eq!(set.active_values(), vec!["X"]);
        assert_eq!(set.is_active("Y"), Some(false));
        assert!(!set.toggle("X").unwrap());
        assert!(set.active_values().is_empty());
    }

    #[test]
    fn toggle_unknown_value_is_an_error() {
        let mut set = built(&["X"]);
        match set.toggle("nope") {
            Err(InfraError::UnknownValue { dimension, value }) => {
                assert_eq!(dimension, "asset-category");
                assert_eq!(value, "nope");
            }
            other => panic!("Expected UnknownValue, got {:?}", other),
        }
    }

    #[test]
    fn toggle_all_activates_then_clears() {
        let mut set = built(&["Blank", "X", "Y"]);

        assert!(set.toggle_all());
        assert_eq!(set.active_values(), vec!["Blank", "X", "Y"]);
        assert!(set.select_all_active());
        assert_eq!(set.active_count(), 4);

        assert!(!set.toggle_all());
        assert!(set.active_values().is_empty());
        assert!(!set.select_all_active());
    }

    #[test]
    fn toggle_all_after_manual_activation_still_activates() {
        let mut set = built(&["X", "Y"]);
        set.toggle("X").unwrap();
        set.toggle("Y").unwrap();
        // Every value is on but select-all is not, so this is not "fully active".
        assert!(set.toggle_all());
        assert!(set.select_all_active());
        assert!(!set.toggle_all());
        assert!(set.active_values().is_empty());
    }

    #[test]
    fn toggle_all_with_partial_selection_activates_all() {
        let mut set = built(&["X", "Y", "Z"]);
        set.toggle("Y").unwrap();
        assert!(set.toggle_all());
        assert_eq!(set.active_values(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn deselecting_after_select_all_keeps_select_all_flag() {
        let mut set = built(&["X", "Y"]);
        set.toggle_all();
        set.toggle("X").unwrap();
        assert!(set.select_all_active());
        assert_eq!(set.active_count(), 2);
        // Not fully active, so the next toggle_all re-activates everything.
        assert!(set.toggle_all());
        assert_eq!(set.active_values(), vec!["X", "Y"]);
    }

    #[test]
    fn toggle_all_on_empty_set() {
        let mut set = built(&[]);
        assert!(set.toggle_all());
        assert!(set.active_values().is_empty());
        assert!(!set.toggle_all());
    }

    #[test]
    fn search_hides_without_deactivating() {
        let mut set = built(&["Blank", "Roads", "Bridges"]);
        set.toggle("Bridges").unwrap();

        set.search("ROA");
        let visible: Vec<_> = set.visible().map(|c| c.value.as_str()).collect();
        assert_eq!(visible, vec!["Roads"]);
        assert!(set.select_all_hidden());
        assert_eq!(set.active_values(), vec!["Bridges"]);

        set.search("");
        assert_eq!(set.visible().count(), 3);
        assert!(!set.select_all_hidden());
    }

    #[test]
    fn search_matches_select_all_label() {
        let mut set = built(&["Roads"]);
        set.search("sel");
        assert!(!set.select_all_hidden());
        assert_eq!(set.visible().count(), 0);
    }
}
