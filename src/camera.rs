//! Orbit camera state
//!
//! Pure presentation state: the simulation never reads it, but the session
//! owns it so reset can force the third-person view.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::wrap_degrees;

/// View mode for the external renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraMode {
    #[default]
    ThirdPerson,
    FirstPerson,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
        }
    }
}

/// Orbit camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Orbit angle around the arena center (degrees, 0-360 wrapped)
    pub angle: f32,
    /// Orbit radius, clamped to the configured range
    pub radius: f32,
    /// Eye height, clamped to the configured range
    pub elevation: f32,
    pub mode: CameraMode,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            angle: 0.0,
            radius: CAMERA_START_RADIUS,
            elevation: CAMERA_START_ELEVATION,
            mode: CameraMode::ThirdPerson,
        }
    }
}

impl Camera {
    /// Rotate the orbit angle, wrapped mod 360.
    pub fn orbit(&mut self, delta: f32) {
        self.angle = wrap_degrees(self.angle + delta);
    }

    /// Step radius and elevation together, clamped to their ranges.
    pub fn adjust(&mut self, radius_delta: f32, elevation_delta: f32) {
        self.radius = (self.radius + radius_delta).clamp(CAMERA_RADIUS_MIN, CAMERA_RADIUS_MAX);
        self.elevation =
            (self.elevation + elevation_delta).clamp(CAMERA_ELEVATION_MIN, CAMERA_ELEVATION_MAX);
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }
}
