use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// Which orientation model turns drags into rotations.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RotationStrategy {
    /// Virtual-sphere rotation accumulated as a single matrix.
    #[default]
    Arcball,
    /// Independent yaw and pitch angles.
    Euler,
}

/// Modifier key that switches a drag from rotate to pan.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKey {
    /// Either shift key.
    #[default]
    Shift,
    /// Either control key.
    Control,
    /// Either alt/option key.
    Alt,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Interaction", inline)]
#[serde(default)]
/// Pointer, wheel and auto-rotate parameters.
pub struct InteractionOptions {
    /// Orientation model used for rotate drags.
    #[schemars(title = "Rotation")]
    pub strategy: RotationStrategy,
    /// Euler sensitivity: radians per full canvas extent dragged.
    #[schemars(title = "Rotate Sensitivity", range(min = 1.0, max = 30.0), extend("step" = 0.5))]
    pub rotate_sensitivity: f32,
    /// Arcball sphere radius in pixels.
    #[schemars(title = "Arcball Radius", range(min = 100.0, max = 4000.0), extend("step" = 50.0))]
    pub arcball_radius: f32,
    /// Modifier that turns a drag into a pan.
    #[schemars(skip)]
    pub pan_modifier: ModifierKey,
    /// Pan sensitivity multiplier (1.0 keeps the model under the cursor).
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Fraction of the camera distance covered per wheel step.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Closest the camera may dolly toward its target.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest the camera may dolly from its target.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Whether the model turns about the up axis on its own.
    #[schemars(title = "Auto Rotate")]
    pub auto_rotate: bool,
    /// Auto-rotate rate in radians per second.
    #[schemars(title = "Auto Rotate Speed", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub auto_rotate_speed: f32,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            strategy: RotationStrategy::Arcball,
            rotate_sensitivity: 10.0,
            arcball_radius: 1000.0,
            pan_modifier: ModifierKey::Shift,
            pan_speed: 1.0,
            zoom_speed: 0.1,
            min_distance: 1.0,
            max_distance: 2000.0,
            auto_rotate: false,
            auto_rotate_speed: 0.5,
        }
    }
}

impl InteractionOptions {
    /// The `[min_distance, max_distance]` dolly range.
    ///
    /// # Errors
    ///
    /// [`ViewError::Configuration`] unless both bounds are finite and
    /// `0 < min_distance <= max_distance`.
    pub fn distance_range(&self) -> Result<(f32, f32), ViewError> {
        let (min, max) = (self.min_distance, self.max_distance);
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ViewError::Configuration(format!(
                "zoom distance range must satisfy 0 < min <= max (min = \
                 {min}, max = {max})"
            )));
        }
        Ok((min, max))
    }
}
