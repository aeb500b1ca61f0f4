use crate::background::{InfiniteBackground, ScrollingBackground};
use crate::camera::FollowCamera;
use crate::config::ShipConfig;
use crate::debug;
pub use crate::debug::Line;
use crate::scenario;
use crate::scenario::Scenario;
use crate::ship::{ShipAccessor, ShipAccessorMut, ShipData, ShipHandle};
use crate::snapshot::*;
use instant::Instant;
use nalgebra::{vector, Vector3};
use rapier2d_f64::prelude::*;
use std::collections::BTreeMap;

pub const PHYSICS_TICK_LENGTH: f64 = 1.0 / 60.0;

pub struct Simulation {
    scenario: Option<Box<dyn Scenario>>,
    ship_config: ShipConfig,
    pub(crate) ships: BTreeMap<ShipHandle, ShipData>,
    next_ship_handle: u32,
    focus: Option<ShipHandle>,
    pub(crate) bodies: RigidBodySet,
    pub(crate) impulse_joints: ImpulseJointSet,
    pub(crate) multibody_joints: MultibodyJointSet,
    pub(crate) colliders: ColliderSet,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    pub(crate) island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    pub(crate) events: SimEvents,
    pub camera: FollowCamera,
    pub background: InfiniteBackground,
    pub scrolling: ScrollingBackground,
    tick: u32,
    time: f64,
    seed: u32,
    timing: Timing,
}

impl Simulation {
    pub fn new(scenario_name: &str, seed: u32) -> Box<Simulation> {
        Simulation::with_config(scenario_name, seed, ShipConfig::default())
    }

    /// Like `new`, but scenarios spawn their ships with `ship_config`.
    pub fn with_config(scenario_name: &str, seed: u32, ship_config: ShipConfig) -> Box<Simulation> {
        Simulation::with_scenario(scenario::load(scenario_name), seed, ship_config)
    }

    /// Creates a simulation driven by a scenario not in the registry.
    pub fn with_scenario(
        mut scenario: Box<dyn Scenario>,
        seed: u32,
        ship_config: ShipConfig,
    ) -> Box<Simulation> {
        log::info!("seed {seed}");
        let mut sim = Box::new(Simulation {
            scenario: None,
            ship_config: ship_config.sanitized(),
            ships: BTreeMap::new(),
            next_ship_handle: 0,
            focus: None,
            bodies: RigidBodySet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            colliders: ColliderSet::new(),
            integration_parameters: IntegrationParameters {
                dt: PHYSICS_TICK_LENGTH,
                max_ccd_substeps: 2,
                ..Default::default()
            },
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            events: SimEvents::new(),
            camera: FollowCamera::default(),
            background: InfiniteBackground::default(),
            scrolling: ScrollingBackground::default(),
            tick: 0,
            time: 0.0,
            seed,
            timing: Default::default(),
        });

        scenario.init(&mut sim, seed);
        sim.scenario = Some(scenario);
        sim.background.fit_to_camera(&sim.camera);
        if let Some(target) = sim.focus_position() {
            sim.camera.position = target + sim.camera.offset;
        }

        sim
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Sum of all step lengths so far.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Configuration scenarios use for the ships they spawn.
    pub fn ship_config(&self) -> &ShipConfig {
        &self.ship_config
    }

    pub fn scenario_name(&self) -> String {
        self.scenario
            .as_ref()
            .map(|scenario| scenario.name())
            .unwrap_or_default()
    }

    pub fn status(&self) -> scenario::Status {
        match self.scenario.as_ref() {
            Some(scenario) => scenario.status(self),
            None => scenario::Status::Running,
        }
    }

    pub fn ships(&self) -> impl Iterator<Item = ShipHandle> + '_ {
        self.ships.keys().copied()
    }

    pub fn ship(self: &Simulation, handle: ShipHandle) -> ShipAccessor {
        ShipAccessor {
            simulation: self,
            handle,
        }
    }

    pub fn ship_mut(self: &mut Simulation, handle: ShipHandle) -> ShipAccessorMut {
        ShipAccessorMut {
            simulation: self,
            handle,
        }
    }

    pub(crate) fn allocate_ship_handle(&mut self) -> ShipHandle {
        let handle = ShipHandle(self.next_ship_handle);
        self.next_ship_handle += 1;
        handle
    }

    /// Ship followed by the camera and backgrounds.
    pub fn focus(&self) -> Option<ShipHandle> {
        self.focus
    }

    pub fn set_focus(&mut self, handle: Option<ShipHandle>) {
        self.focus = handle;
    }

    fn focus_position(&self) -> Option<Vector3<f64>> {
        let handle = self.focus?;
        let ship = self.ship(handle);
        if !ship.exists() {
            return None;
        }
        let p = ship.position();
        Some(vector![p.x, p.y, 0.0])
    }

    pub fn step(self: &mut Simulation) {
        self.step_with_dt(PHYSICS_TICK_LENGTH);
    }

    /// Advances by `dt` seconds: integrate the forces from the previous tick,
    /// let the scenario supply input, then run every ship's controllers.
    pub fn step_with_dt(self: &mut Simulation, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.events.clear();

        let physics_start_time = Instant::now();
        if dt > 0.0 {
            self.integration_parameters.dt = dt;
            let gravity = vector![0.0, 0.0];
            let physics_hooks = ();
            let event_handler = ();
            self.physics_pipeline.step(
                &gravity,
                &self.integration_parameters,
                &mut self.island_manager,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                None,
                &physics_hooks,
                &event_handler,
            );
        }
        for ship in self.ships.values() {
            if let Some(body) = self.bodies.get_mut(ship.body) {
                body.reset_forces(false);
            }
        }
        self.timing.physics = (Instant::now() - physics_start_time).as_secs_f64();

        let now = self.time + dt;

        let scenario_start_time = Instant::now();
        let mut scenario = std::mem::take(&mut self.scenario);
        if let Some(scenario) = scenario.as_mut() {
            scenario.tick(self);
        }
        self.scenario = scenario;
        self.timing.scenario = (Instant::now() - scenario_start_time).as_secs_f64();

        let ship_start_time = Instant::now();
        let handle_snapshot: Vec<ShipHandle> = self.ships.keys().cloned().collect();
        for handle in handle_snapshot {
            self.ship_mut(handle).tick(now, dt);
            debug::emit_ship(self, handle);
        }
        self.timing.ship = (Instant::now() - ship_start_time).as_secs_f64();

        let target = self.focus_position();
        self.camera.update(target, dt);
        self.background.fit_to_camera(&self.camera);
        self.background.update(target, Some(&self.camera));
        self.scrolling.update(Some(&self.camera), now);

        self.time = now;
        self.tick += 1;
    }

    pub fn events(&self) -> &SimEvents {
        &self.events
    }

    pub fn emit_debug_lines(&mut self, ship: ShipHandle, lines: Vec<Line>) {
        self.events.debug_lines.push((ship.into(), lines));
    }

    pub fn hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;
        let fixedpoint = |v: f64| (v * 1e9) as i64;
        let mut s = DefaultHasher::new();
        for &handle in self.ships.keys() {
            let ship = self.ship(handle);
            s.write_i64(fixedpoint(ship.position().x));
            s.write_i64(fixedpoint(ship.position().y));
            s.write_i64(fixedpoint(ship.facing()));
            s.write_i64(fixedpoint(ship.velocity().x));
            s.write_i64(fixedpoint(ship.velocity().y));
            s.write_u8(ship.is_dashing() as u8);
        }
        s.finish()
    }

    pub fn snapshot(&self, nonce: u32) -> Snapshot {
        let mut snapshot = Snapshot {
            nonce,
            tick: self.tick,
            time: self.time,
            status: self.status(),
            ships: vec![],
            focus: self.focus.map(|handle| handle.into()),
            camera: self.camera.clone(),
            background: self.background.clone(),
            scrolling: self.scrolling.clone(),
            debug_lines: self.events.debug_lines.clone(),
            timing: self.timing.clone(),
        };

        for &handle in self.ships.keys() {
            let ship = self.ship(handle);
            let controller = ship.controller();
            snapshot.ships.push(ShipSnapshot {
                id: handle.into(),
                position: ship.position().into(),
                velocity: ship.velocity(),
                facing: controller.facing(),
                force: controller.force(),
                dash_phase: ship.dash_state().phase,
                invulnerable: ship.is_invulnerable(),
                dash_cooldown: controller.dash_cooldown_remaining(self.time),
                trail: ship.trail(),
            });
        }

        snapshot
    }
}

pub struct SimEvents {
    pub debug_lines: Vec<(u64, Vec<Line>)>,
}

impl SimEvents {
    pub fn new() -> Self {
        Self {
            debug_lines: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.debug_lines.clear();
    }
}

impl Default for SimEvents {
    fn default() -> Self {
        SimEvents::new()
    }
}
