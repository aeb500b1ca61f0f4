use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Analog thrust values above this count as "held".
pub const THRUST_THRESHOLD: f64 = 0.5;

/// Dash axis values with a magnitude at or below this are ignored.
pub const DASH_DEADZONE: f64 = 0.1;

/// Per-tick view of the player's input devices.
pub trait InputSource {
    /// Pointer position in world space, if a pointer device is present.
    fn pointer_world_position(&self) -> Option<Vector2<f64>>;

    /// Thrust signal in [0, 1]; buttons report 0 or 1.
    fn thrust(&self) -> f64;

    /// Signed dash axis, -1 (left) .. +1 (right).
    fn dash_axis(&self) -> f64;

    /// Optional auxiliary movement vector in ship-local space.
    fn move_axis(&self) -> Option<Vector2<f64>> {
        None
    }

    fn thrusting(&self) -> bool {
        self.thrust() > THRUST_THRESHOLD
    }
}

/// Plain snapshot of the input devices for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub pointer: Option<Vector2<f64>>,
    pub thrust: f64,
    pub dash: f64,
    pub movement: Option<Vector2<f64>>,
}

impl InputFrame {
    pub fn idle() -> InputFrame {
        InputFrame::default()
    }

    pub fn aim_at(pointer: Vector2<f64>) -> InputFrame {
        InputFrame {
            pointer: Some(pointer),
            ..Default::default()
        }
    }

    pub fn with_thrust(self, thrust: f64) -> InputFrame {
        InputFrame { thrust, ..self }
    }

    pub fn with_dash(self, dash: f64) -> InputFrame {
        InputFrame { dash, ..self }
    }

    pub fn with_movement(self, movement: Vector2<f64>) -> InputFrame {
        InputFrame {
            movement: Some(movement),
            ..self
        }
    }
}

impl InputSource for InputFrame {
    fn pointer_world_position(&self) -> Option<Vector2<f64>> {
        self.pointer
    }

    fn thrust(&self) -> f64 {
        self.thrust
    }

    fn dash_axis(&self) -> f64 {
        self.dash
    }

    fn move_axis(&self) -> Option<Vector2<f64>> {
        self.movement
    }
}

/// Turns a level-triggered dash axis into press edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeTrigger {
    was_active: bool,
}

impl EdgeTrigger {
    /// Returns the axis value if it went from inactive to active this tick.
    pub fn update(&mut self, axis: f64) -> Option<f64> {
        let active = axis.abs() > DASH_DEADZONE;
        let pressed = active && !self.was_active;
        self.was_active = active;
        if pressed {
            Some(axis)
        } else {
            None
        }
    }
}
