use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use log::info;
use once_cell::sync::Lazy;
use tokio::time::sleep;

/// Process-wide runtime counters of the exporter itself.
///
/// Purpose:
/// - Track how many passes ran and how collectors fared
/// - Track scrape traffic
///
/// Design:
/// - Lock-free (Atomics)
/// - Diagnostics only; never part of the scrape output
#[derive(Default)]
pub struct RuntimeStats {
    // Collection
    pub passes_completed: AtomicUsize,
    pub collector_successes: AtomicUsize,
    pub collector_failures: AtomicUsize,

    // Scrapes
    pub scrapes_served: AtomicUsize,
    pub scrape_errors: AtomicUsize,
}

impl RuntimeStats {
    pub fn summary_line(&self) -> String {
        format!(
            "[STATS] passes={} ok={} failed={} scrapes={} scrape_err={}",
            self.passes_completed.load(Ordering::Relaxed),
            self.collector_successes.load(Ordering::Relaxed),
            self.collector_failures.load(Ordering::Relaxed),
            self.scrapes_served.load(Ordering::Relaxed),
            self.scrape_errors.load(Ordering::Relaxed),
        )
    }
}

/// Global stats registry (singleton)
pub static STATS: Lazy<Arc<RuntimeStats>> = Lazy::new(|| Arc::new(RuntimeStats::default()));

/// Periodic, low-noise stats log line.
pub fn spawn_reporter(interval: Duration) {
    tokio::spawn(async move {
        loop {
            sleep(interval).await;
            info!("{}", STATS.summary_line());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_reports_every_counter() {
        let stats = RuntimeStats::default();
        stats.passes_completed.fetch_add(2, Ordering::Relaxed);
        stats.collector_failures.fetch_add(1, Ordering::Relaxed);
        stats.scrapes_served.fetch_add(2, Ordering::Relaxed);

        assert_eq!(
            stats.summary_line(),
            "[STATS] passes=2 ok=0 failed=1 scrapes=2 scrape_err=0"
        );
    }
}
