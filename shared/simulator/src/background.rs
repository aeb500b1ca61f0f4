use crate::camera::FollowCamera;
use nalgebra::{vector, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Smallest tile size used when dividing by the world tile size.
pub const MIN_TILE_SIZE: f64 = 1e-4;

/// Texture offset for a background tiled every `world_tile_size` units that
/// scrolls at `parallax` times the target's speed.
pub fn uv_offset(
    target: Vector2<f64>,
    parallax: Vector2<f64>,
    world_tile_size: Vector2<f64>,
) -> Vector2<f64> {
    vector![
        target.x * parallax.x / world_tile_size.x.max(MIN_TILE_SIZE),
        target.y * parallax.y / world_tile_size.y.max(MIN_TILE_SIZE)
    ]
}

/// Screen-filling quad whose texture scrolls with the target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfiniteBackground {
    /// World units covered by one texture tile.
    pub world_tile_size: Vector2<f64>,
    /// 0 sticks to the camera, 1 moves with the target.
    pub parallax: Vector2<f64>,
    pub depth_behind_target: f64,
    pub uv_offset: Vector2<f64>,
    pub position: Vector3<f64>,
    pub scale: Vector3<f64>,
}

impl Default for InfiniteBackground {
    fn default() -> Self {
        Self {
            world_tile_size: vector![10.0, 10.0],
            parallax: vector![0.5, 0.5],
            depth_behind_target: 1.0,
            uv_offset: vector![0.0, 0.0],
            position: vector![0.0, 0.0, 0.0],
            scale: vector![1.0, 1.0, 1.0],
        }
    }
}

impl InfiniteBackground {
    /// Scales the quad to cover the camera's view. No-op for perspective
    /// cameras.
    pub fn fit_to_camera(&mut self, camera: &FollowCamera) {
        if let Some(size) = camera.visible_size() {
            self.scale = vector![size.x, size.y, 1.0];
        }
    }

    pub fn update(&mut self, target: Option<Vector3<f64>>, camera: Option<&FollowCamera>) {
        let (Some(target), Some(camera)) = (target, camera) else {
            return;
        };
        self.uv_offset = uv_offset(target.xy(), self.parallax, self.world_tile_size);
        self.position = vector![
            camera.position.x,
            camera.position.y,
            target.z + self.depth_behind_target
        ];
    }
}

/// Tiled sprite sized to the view, drifting at a constant rate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollingBackground {
    pub scroll_speed: Vector2<f64>,
    pub size: Vector2<f64>,
    pub texture_offset: Vector2<f64>,
}

impl ScrollingBackground {
    pub fn new(scroll_speed: Vector2<f64>) -> ScrollingBackground {
        ScrollingBackground {
            scroll_speed,
            ..Default::default()
        }
    }

    pub fn update(&mut self, camera: Option<&FollowCamera>, time: f64) {
        let Some(camera) = camera else {
            return;
        };
        if let Some(size) = camera.visible_size() {
            self.size = size;
        }
        if self.scroll_speed != Vector2::zeros() {
            self.texture_offset = self.scroll_speed * time;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_uv_offset() {
        let uv = uv_offset(vector![20.0, -10.0], vector![0.5, 0.5], vector![10.0, 10.0]);
        assert_abs_diff_eq!(uv, vector![1.0, -0.5]);

        let uv = uv_offset(vector![1.0, 1.0], vector![1.0, 1.0], vector![0.0, 0.0]);
        assert_abs_diff_eq!(uv, vector![1e4, 1e4], epsilon = 1e-6);
    }

    #[test]
    fn test_infinite_background_follows_camera() {
        let camera = FollowCamera {
            position: vector![3.0, 4.0, -10.0],
            orthographic_size: 5.0,
            aspect: 2.0,
            ..Default::default()
        };
        let mut background = InfiniteBackground::default();
        background.fit_to_camera(&camera);
        background.update(Some(vector![10.0, 0.0, 0.0]), Some(&camera));
        assert_eq!(background.scale, vector![20.0, 10.0, 1.0]);
        assert_eq!(background.position, vector![3.0, 4.0, 1.0]);
        assert_abs_diff_eq!(background.uv_offset, vector![0.5, 0.0]);

        background.update(None, Some(&camera));
        assert_abs_diff_eq!(background.uv_offset, vector![0.5, 0.0]);
    }

    #[test]
    fn test_scrolling_background() {
        let camera = FollowCamera {
            orthographic_size: 5.0,
            aspect: 2.0,
            ..Default::default()
        };
        let mut background = ScrollingBackground::new(vector![0.1, 0.2]);
        background.update(Some(&camera), 10.0);
        assert_eq!(background.size, vector![20.0, 10.0]);
        assert_abs_diff_eq!(background.texture_offset, vector![1.0, 2.0], epsilon = 1e-12);

        let mut still = ScrollingBackground::default();
        still.update(Some(&camera), 10.0);
        assert_eq!(still.texture_offset, vector![0.0, 0.0]);
    }
}
