use nalgebra::{vector, Vector2};

/// Squared pointer distance below which the ship keeps its facing.
pub const MIN_AIM_DISTANCE_SQUARED: f64 = 1e-4;

/// Signed shortest angular difference `to - from`, in degrees, in (-180, 180].
pub fn delta_angle(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Rotates `current` toward `target` by at most `max_delta` degrees.
///
/// Never overshoots. The result is wrapped to [0, 360).
pub fn move_towards_angle(current: f64, target: f64, max_delta: f64) -> f64 {
    let delta = delta_angle(current, target);
    let next = if delta.abs() <= max_delta {
        current + delta
    } else {
        current + max_delta.copysign(delta)
    };
    next.rem_euclid(360.0)
}

/// Facing (degrees) that points the ship's nose from `from` at `to`.
///
/// A facing of 0 points the nose along +Y.
pub fn facing_towards(from: Vector2<f64>, to: Vector2<f64>) -> Option<f64> {
    let d = to - from;
    if d.magnitude_squared() <= MIN_AIM_DISTANCE_SQUARED {
        return None;
    }
    Some((d.y.atan2(d.x).to_degrees() - 90.0).rem_euclid(360.0))
}

/// Nose direction for a facing in degrees.
pub fn forward(facing: f64) -> Vector2<f64> {
    let (sin, cos) = facing.to_radians().sin_cos();
    vector![-sin, cos]
}

/// Starboard direction for a facing in degrees.
pub fn right(facing: f64) -> Vector2<f64> {
    let (sin, cos) = facing.to_radians().sin_cos();
    vector![cos, sin]
}

/// Turns the ship toward the pointer at a bounded rate.
#[derive(Clone, Debug)]
pub struct AimController {
    facing: f64,
    turn_speed: f64,
}

impl AimController {
    pub fn new(facing: f64, turn_speed: f64) -> AimController {
        AimController {
            facing: facing.rem_euclid(360.0),
            turn_speed,
        }
    }

    pub fn facing(&self) -> f64 {
        self.facing
    }

    /// Returns true if the facing changed.
    pub fn tick(&mut self, position: Vector2<f64>, pointer: Option<Vector2<f64>>, dt: f64) -> bool {
        let Some(pointer) = pointer else {
            log::debug!("no pointer, keeping facing {:.1}", self.facing);
            return false;
        };
        let Some(target) = facing_towards(position, pointer) else {
            return false;
        };
        let next = move_towards_angle(self.facing, target, self.turn_speed * dt.max(0.0));
        let changed = next != self.facing;
        self.facing = next;
        changed
    }
}
