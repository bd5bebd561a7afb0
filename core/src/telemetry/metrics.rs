use std::sync::Mutex;

/// Counters shared by aggregators running in the same pipeline run.
pub struct AggregationMetrics {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub inputs_read: usize,
    pub outputs_written: usize,
    pub failures: usize,
}

impl AggregationMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_inputs(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.inputs_read += count;
        }
    }

    pub fn record_output(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.outputs_written += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failures += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for AggregationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_events() {
        let metrics = AggregationMetrics::new();
        metrics.record_inputs(3);
        metrics.record_inputs(2);
        metrics.record_output();
        metrics.record_failure();
        assert_eq!(
            metrics.snapshot(),
            Metrics {
                inputs_read: 5,
                outputs_written: 1,
                failures: 1,
            }
        );
    }
}
