//! # Readiness
//!
//! Two collaborators become available asynchronously:
//!
//! | Collaborator | Policy | On exhaustion |
//! |--------------|--------|---------------|
//! | Dataset | bounded: fixed interval, `max_attempts` probes | give up for good, log only |
//! | Render surface | unbounded: fixed interval, retried forever | n/a |
//!
//! Both are expressed as a [`RetryPolicy`]; the distinction is only whether
//! `max_attempts` is `Some`. Waiting goes through a [`Sleeper`] so tests can
//! run the loops without real delays.

use crate::dataset::DatasetSource;
use crate::engine::{recompute, Publish};
use crate::session::FilterSession;
use crate::surface::{CountDisplay, RenderSurface};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub const fn bounded(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: Some(max_attempts),
        }
    }

    pub const fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    /// Whether another attempt is allowed after `attempts` have been made.
    pub fn allows(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts < max,
            None => true,
        }
    }
}

pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested sleeps without waiting.
#[derive(Debug, Default, Clone)]
pub struct RecordingSleeper {
    pub sleeps: Vec<Duration>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness<T> {
    Ready { value: T, attempts: u32 },
    GaveUp { attempts: u32 },
}

impl<T> Readiness<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Readiness::Ready { attempts, .. } | Readiness::GaveUp { attempts } => *attempts,
        }
    }
}

/// Probe until `probe` yields a value or the policy runs out.
///
/// The first probe happens immediately; each later one follows a sleep of
/// `policy.interval`. A bounded policy makes at most `max_attempts` probes.
pub fn wait_for<T, S, F>(policy: RetryPolicy, sleeper: &mut S, mut probe: F) -> Readiness<T>
where
    S: Sleeper + ?Sized,
    F: FnMut() -> Option<T>,
{
    let mut attempts = 0;
    while policy.allows(attempts) {
        if attempts > 0 {
            sleeper.sleep(policy.interval);
        }
        attempts += 1;
        if let Some(value) = probe() {
            return Readiness::Ready { value, attempts };
        }
    }
    Readiness::GaveUp { attempts }
}

/// Wait for a non-empty dataset, then load it and build every control set.
///
/// Returns the loaded feature count. Giving up leaves the session untouched.
pub fn initialize<D, S>(
    session: &mut FilterSession,
    source: &mut D,
    policy: RetryPolicy,
    sleeper: &mut S,
) -> Readiness<usize>
where
    D: DatasetSource + ?Sized,
    S: Sleeper + ?Sized,
{
    let outcome = wait_for(policy, sleeper, || {
        source.poll().filter(|dataset| !dataset.is_empty())
    });

    match outcome {
        Readiness::Ready { value, attempts } => {
            let count = value.len();
            session.load(value);
            Readiness::Ready {
                value: count,
                attempts,
            }
        }
        Readiness::GaveUp { attempts } => {
            tracing::warn!(attempts, "dataset never became available; filters not initialized");
            Readiness::GaveUp { attempts }
        }
    }
}

/// Recompute, retrying while the render surface is not ready.
///
/// A missing dataset is not retried: there is nothing to publish yet.
pub fn recompute_when_ready<Sf, C, S>(
    session: &FilterSession,
    surface: &mut Sf,
    counter: &mut C,
    policy: RetryPolicy,
    sleeper: &mut S,
) -> Readiness<Publish>
where
    Sf: RenderSurface + ?Sized,
    C: CountDisplay + ?Sized,
    S: Sleeper + ?Sized,
{
    wait_for(policy, sleeper, || {
        match recompute(session, &mut *surface, &mut *counter) {
            Publish::SurfaceNotReady => None,
            published => Some(published),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::DatasetFixture;
    use crate::dataset::Dataset;
    use crate::surface::{MemoryCounter, MemorySurface};

    const TICK: Duration = Duration::from_millis(500);

    /// Produces the dataset on the n-th poll (1-based).
    struct LateSource {
        polls: u32,
        ready_on: u32,
        dataset: Dataset,
    }

    impl DatasetSource for LateSource {
        fn poll(&mut self) -> Option<Dataset> {
            self.polls += 1;
            (self.polls >= self.ready_on).then(|| self.dataset.clone())
        }
    }

    fn late(ready_on: u32) -> LateSource {
        LateSource {
            polls: 0,
            ready_on,
            dataset: DatasetFixture::new()
                .with_project("A", "Land", "Council")
                .build(),
        }
    }

    #[test]
    fn policy_allows() {
        let bounded = RetryPolicy::bounded(TICK, 2);
        assert!(bounded.allows(0));
        assert!(bounded.allows(1));
        assert!(!bounded.allows(2));
        assert!(RetryPolicy::unbounded(TICK).allows(u32::MAX));
    }

    #[test]
    fn ready_immediately_does_not_sleep() {
        let mut sleeper = RecordingSleeper::default();
        let outcome = wait_for(RetryPolicy::bounded(TICK, 5), &mut sleeper, || Some(7));
        assert_eq!(outcome, Readiness::Ready { value: 7, attempts: 1 });
        assert!(sleeper.sleeps.is_empty());
    }

    #[test]
    fn bounded_wait_gives_up_after_max_attempts() {
        let mut sleeper = RecordingSleeper::default();
        let mut probes = 0;
        let outcome: Readiness<()> = wait_for(RetryPolicy::bounded(TICK, 50), &mut sleeper, || {
            probes += 1;
            None
        });
        assert_eq!(outcome, Readiness::GaveUp { attempts: 50 });
        assert_eq!(probes, 50);
        assert_eq!(sleeper.sleeps, vec![TICK; 49]);
    }

    #[test]
    fn zero_attempts_never_probes() {
        let mut sleeper = RecordingSleeper::default();
        let outcome: Readiness<()> =
            wait_for(RetryPolicy::bounded(TICK, 0), &mut sleeper, || panic!("probed"));
        assert_eq!(outcome.attempts(), 0);
    }

    #[test]
    fn initialize_loads_late_dataset() {
        let mut session = FilterSession::infrastructure();
        let mut source = late(3);
        let mut sleeper = RecordingSleeper::default();

        let outcome = initialize(&mut session, &mut source, RetryPolicy::bounded(TICK, 50), &mut sleeper);

        assert_eq!(outcome, Readiness::Ready { value: 1, attempts: 3 });
        assert_eq!(sleeper.sleeps.len(), 2);
        assert!(session.controls("asset-category").unwrap().is_built());
    }

    #[test]
    fn initialize_gives_up_and_leaves_session_empty() {
        let mut session = FilterSession::infrastructure();
        let mut source = late(10);
        let mut sleeper = RecordingSleeper::default();

        let outcome = initialize(&mut session, &mut source, RetryPolicy::bounded(TICK, 4), &mut sleeper);

        assert_eq!(outcome, Readiness::GaveUp { attempts: 4 });
        assert!(session.dataset().is_none());
        assert!(!session.controls("origin").unwrap().is_built());
    }

    #[test]
    fn initialize_treats_empty_dataset_as_not_ready() {
        let mut session = FilterSession::infrastructure();
        let mut source = Some(Dataset::default());
        let mut sleeper = RecordingSleeper::default();

        let outcome = initialize(&mut session, &mut source, RetryPolicy::bounded(TICK, 3), &mut sleeper);
        assert!(!outcome.is_ready());
        assert!(session.dataset().is_none());
    }

    #[test]
    fn surface_retry_has_no_ceiling() {
        let mut session = FilterSession::infrastructure();
        session.load(DatasetFixture::new().with_project("A", "Land", "Council").build());
        let mut surface = MemorySurface::ready_after(120);
        let mut counter = MemoryCounter::new();
        let mut sleeper = RecordingSleeper::default();
        let policy = RetryPolicy::unbounded(Duration::from_millis(100));

        let outcome = recompute_when_ready(&session, &mut surface, &mut counter, policy, &mut sleeper);

        assert_eq!(
            outcome,
            Readiness::Ready {
                value: Publish::Published { count: 1 },
                attempts: 121
            }
        );
        assert_eq!(sleeper.sleeps.len(), 120);
        assert_eq!(counter.text(), Some("Total Projects: 1"));
    }

    #[test]
    fn surface_retry_stops_on_missing_dataset() {
        let session = FilterSession::infrastructure();
        let mut surface = MemorySurface::new();
        let mut counter = MemoryCounter::new();
        let mut sleeper = RecordingSleeper::default();

        let outcome = recompute_when_ready(
            &session,
            &mut surface,
            &mut counter,
            RetryPolicy::unbounded(TICK),
            &mut sleeper,
        );
        assert_eq!(
            outcome,
            Readiness::Ready {
                value: Publish::NoDataset,
                attempts: 1
            }
        );
    }
}
