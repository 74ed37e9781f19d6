use crate::prelude::ObservableState;
use crate::site::detection::{Detection, RiskLevel};
use crate::telemetry::EventLog;

/// Per-risk detection counts for the summary panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskSummary {
    pub critical: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
}

impl RiskSummary {
    pub fn count(&self, risk: RiskLevel) -> usize {
        match risk {
            RiskLevel::Critical => self.critical,
            RiskLevel::High => self.high,
            RiskLevel::Moderate => self.moderate,
            RiskLevel::Low => self.low,
        }
    }
}

/// Holds the immutable detection list for the current site plus the single
/// selected detection, if any.
///
/// Selection is a plain set: re-selecting the current detection is an
/// idempotent no-op, not a toggle, and leaves the revision untouched.
pub struct DetectionStore {
    detections: Vec<Detection>,
    selected: Option<Detection>,
    revision: u64,
    logger: EventLog,
}

impl DetectionStore {
    pub fn new(detections: Vec<Detection>) -> Self {
        let logger = EventLog::new("store");
        logger.record(&format!("loaded {} detections", detections.len()));
        Self {
            detections,
            selected: None,
            revision: 0,
            logger,
        }
    }

    /// The detection list, fixed for the lifetime of the store.
    pub fn list(&self) -> &[Detection] {
        &self.detections
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    /// Sets or clears the selection. Any detection is accepted, including one
    /// absent from `list()`; callers should avoid that, but it is not an
    /// error, only a visible inconsistency.
    pub fn select(&mut self, detection: Option<Detection>) {
        let next_id = detection.as_ref().map(|d| d.id);
        if self.selected.as_ref().map(|d| d.id) == next_id {
            return;
        }
        match next_id {
            Some(id) => self.logger.record(&format!("detection #{} selected", id)),
            None => self.logger.record("selection cleared"),
        }
        self.selected = detection;
        self.revision += 1;
    }

    /// Selects the listed detection with the given id. Used by both the list
    /// panel and the marker overlay so both views resolve to the identical
    /// entity. Returns false (selection untouched) when the id is unknown.
    pub fn select_by_id(&mut self, id: u32) -> bool {
        match self.detections.iter().find(|d| d.id == id).cloned() {
            Some(detection) => {
                self.select(Some(detection));
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<&Detection> {
        self.selected.as_ref()
    }

    /// Per-risk counts over the whole list.
    pub fn summary(&self) -> RiskSummary {
        let mut summary = RiskSummary::default();
        for detection in &self.detections {
            match detection.risk {
                RiskLevel::Critical => summary.critical += 1,
                RiskLevel::High => summary.high += 1,
                RiskLevel::Moderate => summary.moderate += 1,
                RiskLevel::Low => summary.low += 1,
            }
        }
        summary
    }
}

impl ObservableState for DetectionStore {
    type Snapshot = Option<Detection>;

    fn revision(&self) -> u64 {
        self.revision
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.selected.clone()
    }
}
