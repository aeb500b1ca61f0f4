use crate::aim::{self, AimController};
use crate::config::ShipConfig;
use crate::dash::{DashController, DashSettings, DashState, DashStep};
use crate::input::{InputFrame, InputSource};
use crate::integrator::MotionIntegrator;
use crate::simulation::Simulation;
use crate::thrust::ThrustController;
use crate::trail::{Trail, TrailEffect};
use nalgebra::{vector, Vector2};
use rapier2d_f64::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ShipHandle(pub u32);

impl From<ShipHandle> for u64 {
    fn from(handle: ShipHandle) -> u64 {
        handle.0 as u64
    }
}

/// Aim, thrust/brake and dash for one ship, run in fixed-step order.
#[derive(Clone, Debug)]
pub struct ShipController {
    config: ShipConfig,
    aim: AimController,
    thrust: ThrustController,
    dash: DashController,
    force: Vector2<f64>,
}

impl ShipController {
    pub fn new(config: ShipConfig, facing: f64) -> ShipController {
        let config = config.sanitized();
        ShipController {
            aim: AimController::new(facing, config.turn_speed),
            thrust: ThrustController {
                thrust_force: config.thrust_force,
                max_speed: config.max_speed,
                passive_brake: config.passive_brake,
            },
            dash: DashController::new(DashSettings::from(&config)),
            force: vector![0.0, 0.0],
            config,
        }
    }

    pub fn config(&self) -> &ShipConfig {
        &self.config
    }

    /// Facing in degrees; 0 points the nose along +Y.
    pub fn facing(&self) -> f64 {
        self.aim.facing()
    }

    pub fn forward(&self) -> Vector2<f64> {
        aim::forward(self.facing())
    }

    pub fn right(&self) -> Vector2<f64> {
        aim::right(self.facing())
    }

    pub fn dash_state(&self) -> &DashState {
        self.dash.state()
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.is_dashing()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.dash.is_invulnerable()
    }

    pub fn dash_cooldown_remaining(&self, now: f64) -> f64 {
        self.dash.cooldown_remaining(now)
    }

    /// Force requested from the integrator on the last tick.
    pub fn force(&self) -> Vector2<f64> {
        self.force
    }

    /// Runs one fixed step: aim, then dash, then thrust/brake unless the dash
    /// owned the ship during this tick.
    pub fn tick(
        &mut self,
        body: &mut dyn MotionIntegrator,
        input: &dyn InputSource,
        trail: Option<&mut dyn TrailEffect>,
        now: f64,
        dt: f64,
    ) -> DashStep {
        let dt = dt.max(0.0);

        if self
            .aim
            .tick(body.position(), input.pointer_world_position(), dt)
        {
            body.set_rotation(self.facing().to_radians());
        }

        let step = self
            .dash
            .tick(body, input.dash_axis(), self.facing(), trail, now, dt);

        self.force = if step.active() {
            vector![0.0, 0.0]
        } else {
            self.thrust.tick(body, input, self.facing(), dt)
        };

        step
    }
}

pub struct ShipData {
    pub(crate) body: RigidBodyHandle,
    pub controller: ShipController,
    pub input: InputFrame,
    pub trail: Trail,
}

pub fn create(
    sim: &mut Simulation,
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    facing: f64,
    config: ShipConfig,
) -> ShipHandle {
    let controller = ShipController::new(config, facing);
    let config = controller.config();
    let rigid_body = RigidBodyBuilder::dynamic()
        .translation(position)
        .linvel(velocity)
        .rotation(controller.facing().to_radians())
        .linear_damping(0.0)
        .angular_damping(0.0)
        .lock_rotations()
        .ccd_enabled(true)
        .build();
    let body_handle = sim.bodies.insert(rigid_body);
    let density = config.mass / (PI * config.radius * config.radius);
    let collider = ColliderBuilder::ball(config.radius)
        .density(density)
        .restitution(0.1)
        .build();
    sim.colliders
        .insert_with_parent(collider, body_handle, &mut sim.bodies);

    let handle = sim.allocate_ship_handle();
    sim.ships.insert(
        handle,
        ShipData {
            body: body_handle,
            controller,
            input: InputFrame::default(),
            trail: Trail::default(),
        },
    );
    if sim.focus().is_none() {
        sim.set_focus(Some(handle));
    }
    log::debug!("created ship {:?} at {:?}", handle, position);
    handle
}

pub struct ShipAccessor<'a> {
    pub(crate) simulation: &'a Simulation,
    pub(crate) handle: ShipHandle,
}

impl<'a> ShipAccessor<'a> {
    pub fn exists(&self) -> bool {
        self.simulation.ships.contains_key(&self.handle)
    }

    pub fn data(&self) -> &'a ShipData {
        self.simulation.ships.get(&self.handle).unwrap()
    }

    pub fn body(&self) -> &'a RigidBody {
        self.simulation.bodies.get(self.data().body).unwrap()
    }

    pub fn position(&self) -> Vector2<f64> {
        self.body().position().translation.vector
    }

    pub fn velocity(&self) -> Vector2<f64> {
        *self.body().linvel()
    }

    pub fn facing(&self) -> f64 {
        self.controller().facing()
    }

    pub fn controller(&self) -> &'a ShipController {
        &self.data().controller
    }

    pub fn dash_state(&self) -> &'a DashState {
        self.controller().dash_state()
    }

    pub fn is_dashing(&self) -> bool {
        self.controller().is_dashing()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.controller().is_invulnerable()
    }

    pub fn trail(&self) -> Trail {
        self.data().trail
    }

    pub fn input(&self) -> InputFrame {
        self.data().input
    }
}

pub struct ShipAccessorMut<'a> {
    pub(crate) simulation: &'a mut Simulation,
    pub(crate) handle: ShipHandle,
}

impl<'a: 'b, 'b> ShipAccessorMut<'a> {
    pub fn body(&'b mut self) -> &'b mut RigidBody {
        let body = self.simulation.ships.get(&self.handle).unwrap().body;
        self.simulation.bodies.get_mut(body).unwrap()
    }

    pub fn data_mut(&mut self) -> &mut ShipData {
        self.simulation.ships.get_mut(&self.handle).unwrap()
    }

    /// Input used on the next tick.
    pub fn set_input(&mut self, input: InputFrame) {
        self.data_mut().input = input;
    }

    /// Teleports the ship, bypassing the controllers.
    pub fn teleport(&mut self, position: Vector2<f64>) {
        MotionIntegrator::set_position(self.body(), position);
    }

    /// Runs the ship's controllers once against its rigid body.
    pub fn tick(&mut self, now: f64, dt: f64) -> Option<DashStep> {
        let simulation = &mut *self.simulation;
        let ship = simulation.ships.get_mut(&self.handle)?;
        let Some(body) = simulation.bodies.get_mut(ship.body) else {
            log::warn!("ship {:?} has no rigid body, skipping tick", self.handle);
            return None;
        };
        let input = ship.input;
        Some(
            ship.controller
                .tick(body, &input, Some(&mut ship.trail), now, dt),
        )
    }
}
