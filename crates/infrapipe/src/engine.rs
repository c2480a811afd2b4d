//! # Filter Engine
//!
//! Recomputes the filtered feature collection from the full dataset and every
//! dimension's Active Selection Set, then publishes it.
//!
//! ## Evaluation
//!
//! A feature is retained iff, for every dimension, the dimension's active set
//! is empty or does not contain the feature's display value. Retained features
//! keep their original relative order. Evaluation is a pure function of the
//! session; calling it twice is harmless.
//!
//! ## Publishing
//!
//! The retained features replace the render surface's data wholesale and the
//! count display receives `"Total Projects: N"`. If there is no dataset, or the
//! surface is not ready, the cycle is skipped and logged; nothing is raised.
//! The next toggle, or the readiness retry in [`crate::readiness`], catches up.

use crate::session::FilterSession;
use crate::surface::{count_text, CountDisplay, RenderSurface};

/// Result of evaluating the session against its dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Dataset indices of the retained features, ascending.
    pub retained: Vec<usize>,
}

impl Evaluation {
    pub fn count(&self) -> usize {
        self.retained.len()
    }
}

/// What a recompute did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publish {
    /// The surface and count were updated.
    Published { count: usize },
    /// The render surface was not available; nothing was written.
    SurfaceNotReady,
    /// No dataset is loaded yet; nothing was written.
    NoDataset,
}

/// Evaluate every feature against every dimension's active selection.
pub fn evaluate(session: &FilterSession) -> Evaluation {
    let exclusions = session.exclusions();
    let features = session.features();

    let retained = if exclusions.is_unconstrained() {
        (0..features.len()).collect()
    } else {
        features
            .iter()
            .enumerate()
            .filter(|(_, feature)| exclusions.retains(feature))
            .map(|(i, _)| i)
            .collect()
    };

    Evaluation { retained }
}

/// Evaluate and publish to the render surface and count display.
pub fn recompute<S, C>(session: &FilterSession, surface: &mut S, counter: &mut C) -> Publish
where
    S: RenderSurface + ?Sized,
    C: CountDisplay + ?Sized,
{
    let Some(dataset) = session.dataset() else {
        tracing::warn!("recompute skipped: dataset not loaded");
        return Publish::NoDataset;
    };

    if !surface.is_ready() {
        tracing::warn!("recompute skipped: render surface not ready");
        return Publish::SurfaceNotReady;
    }

    let evaluation = evaluate(session);
    let count = evaluation.count();
    tracing::debug!(retained = count, total = dataset.len(), "filters applied");

    surface.set_data(dataset.collect(&evaluation.retained));
    counter.set_text(count_text(count));

    Publish::Published { count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{bare_feature, DatasetFixture};
    use crate::dataset::Dataset;
    use crate::dimensions::BLANK;
    use crate::surface::{MemoryCounter, MemorySurface};
    use serde_json::json;

    fn three_projects() -> FilterSession {
        let mut session = FilterSession::infrastructure();
        session.load(
            DatasetFixture::new()
                .with(&[("project_name", json!("One")), ("asset_category", json!("Transport"))])
                .with(&[("project_name", json!("Two")), ("asset_category", json!("Land"))])
                .with(&[("project_name", json!("Three")), ("asset_category", json!(""))])
                .build(),
        );
        session
    }

    fn names(surface: &MemorySurface) -> Vec<String> {
        surface
            .current_data()
            .unwrap()
            .features
            .iter()
            .map(|f| f.property("project_name").unwrap().as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn no_selection_retains_everything() {
        let session = three_projects();
        assert_eq!(evaluate(&session).retained, vec![0, 1, 2]);
    }

    #[test]
    fn activating_a_value_excludes_it() {
        let mut session = three_projects();
        session.toggle("asset-category", "Transport").unwrap();
        assert_eq!(evaluate(&session).retained, vec![1, 2]);
    }

    #[test]
    fn select_all_excludes_everything() {
        let mut session = three_projects();
        session.toggle_all("asset-category").unwrap();
        assert_eq!(evaluate(&session).count(), 0);

        session.toggle_all("asset-category").unwrap();
        assert_eq!(evaluate(&session).count(), 3);
    }

    #[test]
    fn blank_selection_excludes_blank_features() {
        let mut session = three_projects();
        session.toggle("asset-category", BLANK).unwrap();
        assert_eq!(evaluate(&session).retained, vec![0, 1]);
    }

    #[test]
    fn malformed_features_are_kept_and_blank() {
        let mut session = FilterSession::infrastructure();
        session.load(Dataset::new(vec![bare_feature(), bare_feature()]));
        assert_eq!(evaluate(&session).count(), 2);

        session.toggle("origin", BLANK).unwrap();
        assert_eq!(evaluate(&session).count(), 0);
    }

    #[test]
    fn recompute_publishes_filtered_collection() {
        let mut session = three_projects();
        session.toggle("asset-category", "Transport").unwrap();

        let mut surface = MemorySurface::new();
        let mut counter = MemoryCounter::new();
        let outcome = recompute(&session, &mut surface, &mut counter);

        assert_eq!(outcome, Publish::Published { count: 2 });
        assert_eq!(names(&surface), vec!["Two", "Three"]);
        assert_eq!(counter.text(), Some("Total Projects: 2"));
    }

    #[test]
    fn recompute_without_surface_is_skipped() {
        let session = three_projects();
        let mut surface = MemorySurface::ready_after(1);
        let mut counter = MemoryCounter::new();

        assert_eq!(
            recompute(&session, &mut surface, &mut counter),
            Publish::SurfaceNotReady
        );
        assert!(surface.current_data().is_none());
        assert!(counter.text().is_none());

        assert_eq!(
            recompute(&session, &mut surface, &mut counter),
            Publish::Published { count: 3 }
        );
    }

    #[test]
    fn recompute_without_dataset_is_skipped() {
        let session = FilterSession::infrastructure();
        let mut surface = MemorySurface::new();
        let mut counter = MemoryCounter::new();
        assert_eq!(
            recompute(&session, &mut surface, &mut counter),
            Publish::NoDataset
        );
        assert_eq!(surface.publishes(), 0);
    }

    #[test]
    fn recompute_is_repeatable() {
        let mut session = three_projects();
        session.toggle("asset-category", "Land").unwrap();
        let mut surface = MemorySurface::new();
        let mut counter = MemoryCounter::new();

        recompute(&session, &mut surface, &mut counter);
        let first = surface.current_data().cloned();
        recompute(&session, &mut surface, &mut counter);
        assert_eq!(surface.current_data().cloned(), first);
        assert_eq!(surface.publishes(), 2);
    }

    #[test]
    fn partially_built_controls_do_not_constrain() {
        let mut session = FilterSession::infrastructure();
        session.set_dataset(
            DatasetFixture::new()
                .with_project("A", "Land", "Council")
                .with_project("B", "Roads", "State")
                .build(),
        );
        session.populate("origin").unwrap();
        session.toggle("origin", "State").unwrap();
        assert_eq!(evaluate(&session).retained, vec![0]);
    }
}
