use serde::{Deserialize, Serialize};

/// Risk category of a flagged rockfall candidate.
///
/// The set is closed and ordered from most to least severe; the ordering is
/// used for the summary panel and the marker palette.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Critical,
        RiskLevel::High,
        RiskLevel::Moderate,
        RiskLevel::Low,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "Critical",
            RiskLevel::High => "High",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Low => "Low",
        }
    }

    /// Critical markers carry a pulsing halo in the overlay.
    pub fn pulses(&self) -> bool {
        matches!(self, RiskLevel::Critical)
    }
}

/// Normalized site position: percentage offsets in [0, 100] from the image's
/// top-left corner, independent of the viewport transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SitePoint {
    pub x: f32,
    pub y: f32,
}

impl SitePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

/// One flagged rockfall event candidate on the monitored site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Detection {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub risk: RiskLevel,
    /// Opaque display string, never parsed or compared.
    pub timestamp: String,
    /// Opaque display category.
    pub size: String,
}

impl Detection {
    pub fn new(
        id: u32,
        x: f32,
        y: f32,
        risk: RiskLevel,
        timestamp: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            id,
            x,
            y,
            risk,
            timestamp: timestamp.into(),
            size: size.into(),
        }
    }

    pub fn position(&self) -> SitePoint {
        SitePoint::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_round_trip_through_json() {
        let json = r#"{"id":1,"x":45.0,"y":35.0,"risk":"critical","timestamp":"2 min ago","size":"Large"}"#;
        let detection: Detection = serde_json::from_str(json).unwrap();
        assert_eq!(detection.risk, RiskLevel::Critical);
        assert_eq!(detection.position(), SitePoint::new(45.0, 35.0));
    }

    #[test]
    fn site_point_bounds_check() {
        assert!(SitePoint::new(0.0, 100.0).in_bounds());
        assert!(!SitePoint::new(-0.1, 50.0).in_bounds());
        assert!(!SitePoint::new(50.0, 100.5).in_bounds());
    }
}
