use nalgebra::{vector, UnitComplex, Vector2};
use rapier2d_f64::prelude::*;

/// The rigid-body operations the ship controllers need from a physics engine.
///
/// Forces accumulate until the engine's next integration step.
pub trait MotionIntegrator {
    fn position(&self) -> Vector2<f64>;

    /// Teleports the body. Only the dash uses this.
    fn set_position(&mut self, position: Vector2<f64>);

    fn velocity(&self) -> Vector2<f64>;

    fn set_velocity(&mut self, velocity: Vector2<f64>);

    fn apply_force(&mut self, force: Vector2<f64>);

    fn apply_impulse(&mut self, impulse: Vector2<f64>);

    /// Sets the body orientation in radians.
    fn set_rotation(&mut self, angle: f64);
}

impl MotionIntegrator for RigidBody {
    fn position(&self) -> Vector2<f64> {
        self.position().translation.vector
    }

    fn set_position(&mut self, position: Vector2<f64>) {
        self.set_translation(position, true);
    }

    fn velocity(&self) -> Vector2<f64> {
        *self.linvel()
    }

    fn set_velocity(&mut self, velocity: Vector2<f64>) {
        self.set_linvel(velocity, true);
    }

    fn apply_force(&mut self, force: Vector2<f64>) {
        self.add_force(force, true);
    }

    fn apply_impulse(&mut self, impulse: Vector2<f64>) {
        RigidBody::apply_impulse(self, impulse, true);
    }

    fn set_rotation(&mut self, angle: f64) {
        let mut position = *RigidBody::position(self);
        position.rotation = UnitComplex::new(angle);
        self.set_position(position, true);
        self.set_angvel(0.0, true);
    }
}

/// Frictionless point mass integrated with semi-implicit Euler.
///
/// Used where a full physics world is unnecessary, e.g. control tests.
#[derive(Clone, Debug)]
pub struct PointMass {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub rotation: f64,
    pub mass: f64,
    force: Vector2<f64>,
}

impl PointMass {
    pub fn new(position: Vector2<f64>, mass: f64) -> PointMass {
        PointMass {
            position,
            velocity: vector![0.0, 0.0],
            rotation: 0.0,
            mass,
            force: vector![0.0, 0.0],
        }
    }

    pub fn force(&self) -> Vector2<f64> {
        self.force
    }

    /// Advances by `dt` using the accumulated force, then clears it.
    pub fn integrate(&mut self, dt: f64) {
        if self.mass > 0.0 {
            self.velocity += self.force / self.mass * dt;
        }
        self.position += self.velocity * dt;
        self.force = vector![0.0, 0.0];
    }
}

impl MotionIntegrator for PointMass {
    fn position(&self) -> Vector2<f64> {
        self.position
    }

    fn set_position(&mut self, position: Vector2<f64>) {
        self.position = position;
    }

    fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vector2<f64>) {
        self.velocity = velocity;
    }

    fn apply_force(&mut self, force: Vector2<f64>) {
        self.force += force;
    }

    fn apply_impulse(&mut self, impulse: Vector2<f64>) {
        if self.mass > 0.0 {
            self.velocity += impulse / self.mass;
        }
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}
