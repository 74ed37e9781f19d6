use serde::{Deserialize, Serialize};

/// Bounds and step factor for the pan/zoom transform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub initial_scale: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Zoom-in multiplies by this factor; zoom-out divides by it.
    pub zoom_step: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            initial_scale: 1.0,
            min_scale: 0.5,
            max_scale: 4.0,
            zoom_step: 1.25,
        }
    }
}

/// Error type for loading detection fixtures.
#[derive(thiserror::Error, Debug)]
pub enum FixtureError {
    #[error("unreadable fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type FixtureResult<T> = Result<T, FixtureError>;

/// Poll-based observation contract shared by the interactive state holders.
///
/// Consumers re-derive their output whenever `revision` advances; a revision
/// only advances on an actual state change, so an idempotent operation never
/// forces a re-render.
pub trait ObservableState {
    type Snapshot;

    fn revision(&self) -> u64;
    fn snapshot(&self) -> Self::Snapshot;
}
