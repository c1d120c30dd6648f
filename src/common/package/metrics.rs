//! Detection counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Events counted by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    /// Every call to `Detector::detect`.
    DetectionCalls,
    /// Detection attempts that ended in an error.
    DetectionErrors,
    /// Package managers created for a resolved family.
    ManagerCreations,
    /// Attempts to read the os-release file.
    OsReleaseReads,
    /// Runs of the `PATH` binary probe.
    FallbackProbes,
}

/// Sink for detector counters.
pub trait MetricsSink: Send + Sync {
    fn incr(&self, counter: Counter);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn incr(&self, _counter: Counter) {}
}

/// Point-in-time copy of [`AtomicMetrics`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub detection_calls: u64,
    pub detection_errors: u64,
    pub manager_creations: u64,
    pub os_release_reads: u64,
    pub fallback_probes: u64,
}

/// Lock-free counters, safe to read and reset while detection runs.
#[derive(Debug, Default)]
pub struct AtomicMetrics {
    detection_calls: AtomicU64,
    detection_errors: AtomicU64,
    manager_creations: AtomicU64,
    os_release_reads: AtomicU64,
    fallback_probes: AtomicU64,
}

impl AtomicMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, counter: Counter) -> &AtomicU64 {
        match counter {
            Counter::DetectionCalls => &self.detection_calls,
            Counter::DetectionErrors => &self.detection_errors,
            Counter::ManagerCreations => &self.manager_creations,
            Counter::OsReleaseReads => &self.os_release_reads,
            Counter::FallbackProbes => &self.fallback_probes,
        }
    }

    pub fn get(&self, counter: Counter) -> u64 {
        self.slot(counter).load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            detection_calls: self.get(Counter::DetectionCalls),
            detection_errors: self.get(Counter::DetectionErrors),
            manager_creations: self.get(Counter::ManagerCreations),
            os_release_reads: self.get(Counter::OsReleaseReads),
            fallback_probes: self.get(Counter::FallbackProbes),
        }
    }

    pub fn reset(&self) {
        for slot in [
            &self.detection_calls,
            &self.detection_errors,
            &self.manager_creations,
            &self.os_release_reads,
            &self.fallback_probes,
        ] {
            slot.store(0, Ordering::Relaxed);
        }
    }
}

impl MetricsSink for AtomicMetrics {
    fn incr(&self, counter: Counter) {
        self.slot(counter).fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_counters_are_independent() {
        let metrics = AtomicMetrics::new();
        metrics.incr(Counter::DetectionCalls);
        metrics.incr(Counter::DetectionCalls);
        metrics.incr(Counter::FallbackProbes);

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                detection_calls: 2,
                fallback_probes: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_reset() {
        let metrics = AtomicMetrics::new();
        metrics.incr(Counter::OsReleaseReads);
        metrics.incr(Counter::DetectionErrors);
        metrics.reset();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let metrics = Arc::new(AtomicMetrics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        metrics.incr(Counter::ManagerCreations);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(metrics.get(Counter::ManagerCreations), 8000);
    }
}
