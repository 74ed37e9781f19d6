use crate::prelude::FixtureResult;
use crate::site::detection::Detection;
use log::warn;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Built-in detections for the Bingham Canyon reference site, used when no
/// fixture file is supplied.
pub fn baseline_detections() -> Vec<Detection> {
    use crate::site::detection::RiskLevel::*;

    vec![
        Detection::new(1, 45.0, 35.0, Critical, "2 min ago", "Large"),
        Detection::new(2, 62.0, 28.0, High, "5 min ago", "Medium"),
        Detection::new(3, 38.0, 58.0, Moderate, "12 min ago", "Small"),
        Detection::new(4, 72.0, 45.0, Low, "18 min ago", "Minor"),
    ]
}

/// Loads a detection fixture (JSON array of detection records) from disk.
///
/// Out-of-range coordinates and duplicate ids are a producer error; they are
/// logged at ingestion but never rejected, and such markers simply render
/// where the producer put them.
pub fn load_detections<P: AsRef<Path>>(path: P) -> FixtureResult<Vec<Detection>> {
    let contents = fs::read_to_string(path.as_ref())?;
    let detections: Vec<Detection> = serde_json::from_str(&contents)?;

    let mut seen = HashSet::new();
    for detection in &detections {
        if !detection.position().in_bounds() {
            warn!(
                "detection #{} at ({:.1}, {:.1}) is outside the normalized [0, 100] range",
                detection.id, detection.x, detection.y
            );
        }
        if !seen.insert(detection.id) {
            warn!("duplicate detection id #{} in fixture", detection.id);
        }
    }

    Ok(detections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn baseline_ids_are_unique_and_in_bounds() {
        let detections = baseline_detections();
        assert_eq!(detections.len(), 4);

        let mut ids = HashSet::new();
        for detection in &detections {
            assert!(ids.insert(detection.id));
            assert!(detection.position().in_bounds());
        }
    }

    #[test]
    fn fixture_load_reads_json() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            br#"[{"id":9,"x":10.0,"y":20.0,"risk":"high","timestamp":"1 min ago","size":"Small"}]"#,
        )
        .unwrap();
        let path = temp.into_temp_path();
        let detections = load_detections(&path).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].id, 9);
    }

    #[test]
    fn out_of_range_coordinates_load_anyway() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            br#"[{"id":5,"x":140.0,"y":-3.0,"risk":"low","timestamp":"now","size":"Minor"}]"#,
        )
        .unwrap();
        let path = temp.into_temp_path();
        let detections = load_detections(&path).unwrap();
        assert_eq!(detections[0].x, 140.0);
    }

    #[test]
    fn malformed_fixture_is_a_parse_error() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"not json").unwrap();
        let path = temp.into_temp_path();
        assert!(load_detections(&path).is_err());
    }
}
