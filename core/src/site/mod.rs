pub mod detection;
pub mod fixture;
pub mod store;

pub use detection::{Detection, RiskLevel, SitePoint};
pub use fixture::{baseline_detections, load_detections};
pub use store::{DetectionStore, RiskSummary};
