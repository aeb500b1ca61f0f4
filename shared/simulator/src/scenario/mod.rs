mod dash_drill;
mod fuzz;
mod sandbox;
mod thrust_run;

use crate::config::ShipConfig;
use crate::ship::{self, ShipHandle};
use crate::simulation::Simulation;
use nalgebra::{vector, Vector2};
use serde::{Deserialize, Serialize};

pub mod prelude {
    pub use super::Scenario;
    pub use super::Status;
    pub use super::{check_timeout, player_ship, MAX_TICKS};
    pub use crate::config::ShipConfig;
    pub use crate::input::InputFrame;
    pub use crate::rng::{new_rng, SeededRng};
    pub use crate::ship::{self, ShipHandle};
    pub use crate::simulation::{Simulation, PHYSICS_TICK_LENGTH};
    pub use nalgebra::{vector, Rotation2, Vector2};
    pub use rand::Rng;
    pub use std::f64::consts::{PI, TAU};
}

pub const MAX_TICKS: u32 = 10000;

#[derive(PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Copy, Clone)]
pub enum Status {
    Running,
    Complete,
    Failed,
}

pub trait Scenario {
    fn name(&self) -> String;

    fn init(&mut self, sim: &mut Simulation, seed: u32);

    /// Called once per step, before the ship controllers run. Scenarios feed
    /// ship input from here.
    fn tick(&mut self, _: &mut Simulation) {}

    fn status(&self, _: &Simulation) -> Status {
        Status::Running
    }

    fn max_ticks(&self) -> u32 {
        MAX_TICKS
    }
}

pub fn load_safe(name: &str) -> Option<Box<dyn Scenario>> {
    let scenario: Option<Box<dyn Scenario>> = match name {
        "test" => Some(Box::new(test::TestScenario {})),
        "sandbox" => Some(Box::new(sandbox::Sandbox::new())),
        "dash_drill" => Some(Box::new(dash_drill::DashDrill::new())),
        "thrust_run" => Some(Box::new(thrust_run::ThrustRun::new())),
        "fuzz" => Some(Box::new(fuzz::Fuzz::new())),
        _ => None,
    };
    if let Some(scenario) = scenario.as_ref() {
        assert_eq!(scenario.name(), name);
    }
    scenario
}

pub fn load(name: &str) -> Box<dyn Scenario> {
    match load_safe(name) {
        Some(scenario) => scenario,
        None => panic!("Unknown scenario {name:?}"),
    }
}

pub fn list() -> Vec<String> {
    vec!["sandbox", "dash_drill", "thrust_run", "fuzz"]
        .iter()
        .map(|x| x.to_string())
        .collect()
}

/// Spawns a ship at rest facing +Y.
pub fn player_ship(sim: &mut Simulation, position: Vector2<f64>, config: ShipConfig) -> ShipHandle {
    ship::create(sim, position, vector![0.0, 0.0], 0.0, config)
}

pub fn check_timeout(sim: &Simulation, max_ticks: u32) -> Status {
    if sim.tick() >= max_ticks {
        Status::Failed
    } else {
        Status::Running
    }
}
