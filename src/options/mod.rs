//! Viewer options with TOML preset support.
//!
//! Projection defaults (30° fov, canvas aspect, near 1, far 2000) and the
//! interaction constants (Euler sensitivity, arcball radius, pan/zoom
//! rates) all live here instead of inside the formulas that use them.
//! Options serialize to/from TOML so a viewer can ship presets.

mod camera;
mod interaction;

use std::path::Path;

pub use camera::CameraOptions;
pub use interaction::{InteractionOptions, ModifierKey, RotationStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Projection parameters.
    pub camera: CameraOptions,
    /// Pointer, wheel and auto-rotate parameters.
    pub interaction: InteractionOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ViewError> {
        toml::from_str(content)
            .map_err(|e| ViewError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewError> {
        let content = std::fs::read_to_string(path).map_err(ViewError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("Loaded viewer options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_match_welding_viewer_frustum() {
        let opts = Options::default();
        assert_eq!(opts.camera.fov_degrees, 30.0);
        assert_eq!(opts.camera.znear, 1.0);
        assert_eq!(opts.camera.zfar, 2000.0);
        assert_eq!(opts.camera.aspect_for(800, 600), 800.0 / 600.0);
        assert_eq!(opts.interaction.strategy, RotationStrategy::Arcball);
        assert_eq!(opts.interaction.rotate_sensitivity, 10.0);
        assert_eq!(opts.interaction.arcball_radius, 1000.0);
    }

    #[test]
    fn each_camera_field_is_independently_overridable() {
        let opts = Options::from_toml(
            r"
[camera]
fov_degrees = 45.0
aspect = 2.0
",
        )
        .unwrap();
        assert_eq!(opts.camera.fov_degrees, 45.0);
        assert_eq!(opts.camera.aspect_for(800, 600), 2.0);
        // Everything else should be default
        assert_eq!(opts.camera.znear, 1.0);
        assert_eq!(opts.camera.zfar, 2000.0);
        assert_eq!(opts.interaction, InteractionOptions::default());
    }

    #[test]
    fn strategy_and_modifier_parse_snake_case() {
        let opts = Options::from_toml(
            r#"
[interaction]
strategy = "euler"
pan_modifier = "control"
"#,
        )
        .unwrap();
        assert_eq!(opts.interaction.strategy, RotationStrategy::Euler);
        assert_eq!(opts.interaction.pan_modifier, ModifierKey::Control);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera]\nfov_degrees = \"wide\"")
            .unwrap_err();
        assert!(matches!(err, ViewError::OptionsParse(_)));
    }

    #[test]
    fn empty_canvas_falls_back_to_square_aspect() {
        assert_eq!(CameraOptions::default().aspect_for(0, 600), 1.0);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("interaction"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fov_degrees").is_some());
        assert!(camera.get("znear").is_none());

        let interaction = &props["interaction"]["properties"];
        assert!(interaction.get("arcball_radius").is_some());
        assert!(interaction.get("pan_modifier").is_none());
    }
}
