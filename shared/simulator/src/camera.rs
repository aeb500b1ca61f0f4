use nalgebra::{vector, Vector2, Vector3};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SMOOTH: f64 = 10.0;
pub const DEFAULT_ORTHOGRAPHIC_SIZE: f64 = 8.0;
pub const DEFAULT_ASPECT: f64 = 16.0 / 9.0;

/// Fraction of the remaining distance covered in `dt` with exponential
/// smoothing rate `smooth`. Frame-rate independent.
pub fn follow_factor(smooth: f64, dt: f64) -> f64 {
    1.0 - (-smooth * dt.max(0.0)).exp()
}

/// Camera that eases toward a target plus a fixed offset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FollowCamera {
    pub position: Vector3<f64>,
    pub offset: Vector3<f64>,
    pub smooth: f64,
    pub orthographic: bool,
    /// Half of the visible height in world units.
    pub orthographic_size: f64,
    pub aspect: f64,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            position: vector![0.0, 0.0, -10.0],
            offset: vector![0.0, 0.0, -10.0],
            smooth: DEFAULT_SMOOTH,
            orthographic: true,
            orthographic_size: DEFAULT_ORTHOGRAPHIC_SIZE,
            aspect: DEFAULT_ASPECT,
        }
    }
}

impl FollowCamera {
    pub fn update(&mut self, target: Option<Vector3<f64>>, dt: f64) {
        let Some(target) = target else {
            return;
        };
        let desired = target + self.offset;
        self.position = self
            .position
            .lerp(&desired, follow_factor(self.smooth, dt));
    }

    /// Visible world size, if the projection is orthographic.
    pub fn visible_size(&self) -> Option<Vector2<f64>> {
        if !self.orthographic {
            return None;
        }
        let height = self.orthographic_size * 2.0;
        Some(vector![height * self.aspect, height])
    }
}
