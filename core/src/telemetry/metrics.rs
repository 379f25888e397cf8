use serde::Serialize;
use std::cell::Cell;

/// Counts engine operations. The engine is single-threaded, so plain cells
/// are enough.
pub struct MetricsRecorder {
    created: Cell<usize>,
    processed: Cell<usize>,
    errors: Cell<usize>,
}

/// Point-in-time copy of the recorder's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub created: usize,
    pub processed: usize,
    pub errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            created: Cell::new(0),
            processed: Cell::new(0),
            errors: Cell::new(0),
        }
    }

    pub fn record_created(&self) {
        self.created.set(self.created.get() + 1);
    }

    pub fn record_processed(&self) {
        self.processed.set(self.processed.get() + 1);
    }

    pub fn record_error(&self) {
        self.errors.set(self.errors.get() + 1);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            created: self.created.get(),
            processed: self.processed.get(),
            errors: self.errors.get(),
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_accumulate() {
        let metrics = MetricsRecorder::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
        metrics.record_created();
        metrics.record_processed();
        metrics.record_processed();
        metrics.record_error();
        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                created: 1,
                processed: 2,
                errors: 1
            }
        );
    }
}
