use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stratacore::ViewportConfig;

/// Console configuration: site identity, base-image pixel dimensions, viewer
/// dimensions, and the pan/zoom bounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub site_name: String,
    pub image_width: f32,
    pub image_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub viewport: ViewportConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            site_name: "Bingham Canyon".into(),
            image_width: 1280.0,
            image_height: 800.0,
            viewport_width: 960.0,
            viewport_height: 600.0,
            viewport: ViewportConfig::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading console config {}", path_ref.display()))?;
        let config: ConsoleConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing console config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn image_size(&self) -> (f32, f32) {
        (self.image_width, self.image_height)
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_matches_reference_site() {
        let config = ConsoleConfig::default();
        assert_eq!(config.site_name, "Bingham Canyon");
        assert_eq!(config.viewport.max_scale, 4.0);
        assert_eq!(config.image_size(), (1280.0, 800.0));
    }

    #[test]
    fn config_load_reads_yaml_with_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"site_name: Test Pit\nimage_width: 640\nimage_height: 480\n")
            .unwrap();
        let path = temp.into_temp_path();
        let config = ConsoleConfig::load(&path).unwrap();
        assert_eq!(config.site_name, "Test Pit");
        assert_eq!(config.image_size(), (640.0, 480.0));
        // Unspecified fields fall back to defaults.
        assert_eq!(config.viewport_size(), (960.0, 600.0));
        assert_eq!(config.viewport.zoom_step, 1.25);
    }
}
