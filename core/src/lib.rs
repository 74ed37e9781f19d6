//! Detection store and viewport core for the StrataNet rockfall console.
//!
//! The modules mirror the operator dashboard split: `site` holds the
//! detection list and selection state, `viewport` owns the pan/zoom
//! transform and screen projection, `telemetry` carries the ambient
//! logging helpers shared by both.

pub mod math;
pub mod prelude;
pub mod site;
pub mod telemetry;
pub mod viewport;

pub use prelude::{FixtureError, ObservableState, ViewportConfig};
pub use site::{Detection, DetectionStore, RiskLevel, SitePoint};
pub use viewport::{ViewTransform, ViewportController};
