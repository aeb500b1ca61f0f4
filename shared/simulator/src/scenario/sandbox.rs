use super::prelude::*;
use crate::background::ScrollingBackground;

const POINTER_DISTANCE: f64 = 5.0;
const POINTER_RATE: f64 = 90.0;

/// A single idle ship whose pointer circles it slowly.
pub struct Sandbox {
    ship: Option<ShipHandle>,
}

impl Sandbox {
    pub fn new() -> Self {
        Self { ship: None }
    }
}

impl Scenario for Sandbox {
    fn name(&self) -> String {
        "sandbox".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) {
        let config = sim.ship_config().clone();
        self.ship = Some(player_ship(sim, vector![0.0, 0.0], config));
        sim.scrolling = ScrollingBackground::new(vector![0.02, 0.01]);
    }

    fn tick(&mut self, sim: &mut Simulation) {
        let Some(handle) = self.ship else {
            return;
        };
        let angle = (sim.time() * POINTER_RATE).to_radians();
        let pointer = sim.ship(handle).position()
            + Rotation2::new(angle) * vector![0.0, POINTER_DISTANCE];
        sim.ship_mut(handle).set_input(InputFrame::aim_at(pointer));
    }
}
