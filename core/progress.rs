use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Advisory batch-boundary progress report: files processed so far out of
/// the total the run will touch. Monotonically non-decreasing within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Polling-style progress receiver. Reports are advisory and must never
/// affect the run's outcome.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: Progress);
}

impl<F> ProgressSink for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn report(&self, progress: Progress) {
        self(progress);
    }
}

/// Sink that discards all reports.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _progress: Progress) {}
}

/// Cooperative cancellation flag, polled by the engine at batch boundaries.
/// Clones share the same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn fraction_handles_empty_total() {
        assert_eq!(Progress { processed: 0, total: 0 }.fraction(), 1.0);
        assert_eq!(Progress { processed: 1, total: 4 }.fraction(), 0.25);
    }

    #[test]
    fn closures_act_as_sinks() {
        use std::sync::Mutex;
        let seen: Mutex<Vec<Progress>> = Mutex::new(Vec::new());
        let sink = |p: Progress| seen.lock().unwrap().push(p);
        ProgressSink::report(&sink, Progress { processed: 2, total: 10 });
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
