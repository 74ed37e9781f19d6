use std::sync::Mutex;

/// Session interaction counters surfaced in the console footer.
pub struct InteractionMetrics {
    inner: Mutex<Metrics>,
}

struct Metrics {
    selections: usize,
    view_changes: usize,
}

impl InteractionMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                selections: 0,
                view_changes: 0,
            }),
        }
    }

    pub fn record_selection(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.selections += 1;
        }
    }

    pub fn record_view_change(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.view_changes += 1;
        }
    }

    /// (selections, view changes) recorded so far.
    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.selections, metrics.view_changes)
        } else {
            (0, 0)
        }
    }
}

impl Default for InteractionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let metrics = InteractionMetrics::new();
        metrics.record_selection();
        metrics.record_view_change();
        metrics.record_view_change();
        assert_eq!(metrics.snapshot(), (1, 2));
    }
}
