use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::{
    collector::registry::CollectorSpec,
    error::{AdapterError, CollectError},
    schema::{CollectionOutcome, MetricSample, Snapshot},
    stats::STATS,
};

/// Runs the enabled collectors and assembles one snapshot per pass.
///
/// DESIGN:
/// - Collectors run one after another, never in parallel, so at
///   most one request is in flight against the node at any time
/// - Every fetch is bounded by `timeout`
/// - Failures are isolated per collector
///
/// CONCURRENCY:
/// - Overlapping `run()` calls queue on `gate`; each still gets a
///   freshly computed snapshot once it is its turn
///
pub struct Orchestrator {
    collectors: Vec<CollectorSpec>,
    timeout: Duration,
    gate: Mutex<()>,
}

impl Orchestrator {
    pub fn new(collectors: Vec<CollectorSpec>, timeout: Duration) -> Self {
        Self {
            collectors,
            timeout,
            gate: Mutex::new(()),
        }
    }

    pub fn collector_names(&self) -> Vec<&str> {
        self.collectors.iter().map(|c| c.name.as_str()).collect()
    }

    /// Executes one complete collection pass.
    ///
    /// Never fails: with every collector down the snapshot is
    /// simply empty.
    pub async fn run(&self) -> Snapshot {
        self.run_detailed().await.0
    }

    /// Same as `run`, also returning one outcome per collector.
    pub async fn run_detailed(&self) -> (Snapshot, Vec<CollectionOutcome>) {
        let _pass = self.gate.lock().await;

        let start = Instant::now();
        debug!("Running collection over {} collectors", self.collectors.len());

        let mut samples = Vec::new();
        let mut outcomes = Vec::with_capacity(self.collectors.len());

        for spec in &self.collectors {
            let started = Instant::now();
            debug!("{}: starting", spec.name);

            let result = match collect_one(spec, self.timeout).await {
                Ok(mut produced) => {
                    let count = produced.len();
                    samples.append(&mut produced);
                    Ok(count)
                }
                Err(e) => Err(e.to_string()),
            };

            let outcome = CollectionOutcome {
                collector: spec.name.clone(),
                elapsed: started.elapsed(),
                result,
            };

            match &outcome.result {
                Ok(count) => {
                    STATS.collector_successes.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        "{}: done in {:?} ({} samples)",
                        outcome.collector, outcome.elapsed, count
                    );
                }
                Err(cause) => {
                    STATS.collector_failures.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        "{}: failed after {:?}: {}",
                        outcome.collector, outcome.elapsed, cause
                    );
                }
            }

            outcomes.push(outcome);
        }

        STATS.passes_completed.fetch_add(1, Ordering::Relaxed);

        let snapshot = Snapshot::new(samples);
        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(
            "Collection complete in {:?}: {} samples, {}/{} collectors failed",
            start.elapsed(),
            snapshot.len(),
            failed,
            outcomes.len()
        );

        (snapshot, outcomes)
    }
}

/// Fetch + normalize for a single collector.
///
/// An adapter reporting "nothing to report" yields zero samples
/// and is still a success.
async fn collect_one(
    spec: &CollectorSpec,
    timeout: Duration,
) -> Result<Vec<MetricSample>, CollectError> {
    let fetched = tokio::time::timeout(timeout, spec.adapter.fetch())
        .await
        .map_err(|_| AdapterError::Timeout(timeout))??;

    match fetched {
        Some(result) => (spec.normalize)(&result),
        None => Ok(Vec::new()),
    }
}
