use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Projection parameters. Each field is independently overridable.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 5.0, max = 120.0), extend("step" = 1.0))]
    pub fov_degrees: f32,
    /// Fixed aspect ratio (width / height). `None` follows the canvas.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub aspect: Option<f32>,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Uniform scale applied to a loaded model.
    #[schemars(title = "Model Scale", range(min = 1.0, max = 1000.0), extend("step" = 1.0))]
    pub model_scale: f32,
    /// Eye height along z when framing a loaded model.
    #[schemars(title = "View Distance", range(min = 1.0, max = 2000.0), extend("step" = 1.0))]
    pub view_distance: f32,
}

impl CameraOptions {
    /// Field of view in radians.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Aspect ratio to use for a canvas of the given size.
    ///
    /// A fixed aspect wins; otherwise the canvas ratio is used, falling
    /// back to square for an empty canvas.
    #[must_use]
    pub fn aspect_for(&self, width: u32, height: u32) -> f32 {
        self.aspect.unwrap_or_else(|| {
            if width == 0 || height == 0 {
                1.0
            } else {
                width as f32 / height as f32
            }
        })
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov_degrees: 30.0,
            aspect: None,
            znear: 1.0,
            zfar: 2000.0,
            model_scale: 150.0,
            view_distance: 110.0,
        }
    }
}
