use crate::aim;
use crate::input::InputSource;
use crate::integrator::MotionIntegrator;
use nalgebra::{Rotation2, Vector2};

/// Squared speed below which the passive brake is not applied.
pub const MIN_BRAKE_SPEED_SQUARED: f64 = 1e-4;

/// Share of `thrust_force` available to the auxiliary movement input.
pub const AUXILIARY_THRUST_FACTOR: f64 = 0.6;

/// Moves `v` toward zero by at most `max_delta`.
pub fn move_towards_zero(v: Vector2<f64>, max_delta: f64) -> Vector2<f64> {
    let magnitude = v.magnitude();
    if magnitude <= max_delta || magnitude == 0.0 {
        Vector2::zeros()
    } else {
        v - v / magnitude * max_delta
    }
}

/// Rescales `v` so its length does not exceed `max_speed`.
pub fn clamp_speed(v: Vector2<f64>, max_speed: f64) -> Vector2<f64> {
    let magnitude = v.magnitude();
    if magnitude > max_speed {
        v / magnitude * max_speed
    } else {
        v
    }
}

#[derive(Clone, Debug)]
pub struct ThrustController {
    pub thrust_force: f64,
    pub max_speed: f64,
    pub passive_brake: f64,
}

impl ThrustController {
    /// Applies thrust, auxiliary impulse, passive brake and the speed clamp.
    ///
    /// Returns the force handed to the integrator.
    pub fn tick(
        &self,
        body: &mut dyn MotionIntegrator,
        input: &dyn InputSource,
        facing: f64,
        dt: f64,
    ) -> Vector2<f64> {
        let dt = dt.max(0.0);
        let thrusting = input.thrusting();
        let mut force = Vector2::zeros();

        if thrusting {
            force = aim::forward(facing) * self.thrust_force;
            body.apply_force(force);
        }

        if let Some(movement) = input.move_axis() {
            let local = movement * self.thrust_force * AUXILIARY_THRUST_FACTOR;
            let world = Rotation2::new(facing.to_radians()) * local;
            body.apply_impulse(world * dt);
        }

        if !thrusting && self.passive_brake > 0.0 {
            let v = body.velocity();
            if v.magnitude_squared() > MIN_BRAKE_SPEED_SQUARED {
                body.set_velocity(move_towards_zero(v, self.passive_brake * dt));
            }
        }

        let v = body.velocity();
        let clamped = clamp_speed(v, self.max_speed);
        if clamped != v {
            body.set_velocity(clamped);
        }

        force
    }
}
