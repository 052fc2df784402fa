//! Command-line render settings.

use anyhow::Context;
use ember_renderer::{RenderConfig, DEFAULT_BUCKET_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    CornellBox,
    Spheres,
}

/// Everything the `ember` binary needs to produce an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scene: SceneKind,
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
    pub bucket_size: u32,
    #[serde(flatten)]
    pub render: RenderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: SceneKind::CornellBox,
            width: 600,
            height: 600,
            output: PathBuf::from("output/render.png"),
            bucket_size: DEFAULT_BUCKET_SIZE,
            render: RenderConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings.scene, SceneKind::CornellBox);
        assert_eq!(settings.width, 600);
        assert_eq!(settings.bucket_size, DEFAULT_BUCKET_SIZE);
        assert_eq!(settings.render.samples_per_pixel, 100);
    }

    #[test]
    fn test_render_fields_are_flattened() {
        let settings = Settings::from_json(
            r#"{ "scene": "spheres", "width": 320, "samples_per_pixel": 16, "seed": 7 }"#,
        )
        .unwrap();

        assert_eq!(settings.scene, SceneKind::Spheres);
        assert_eq!(settings.width, 320);
        assert_eq!(settings.height, 600);
        assert_eq!(settings.render.samples_per_pixel, 16);
        assert_eq!(settings.render.seed, 7);
    }

    #[test]
    fn test_unknown_scene_is_rejected() {
        assert!(Settings::from_json(r#"{ "scene": "teapot" }"#).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Settings::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("does/not/exist.json"));
    }
}
