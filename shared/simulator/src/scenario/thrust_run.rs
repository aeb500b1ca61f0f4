use super::prelude::*;

/// Holds thrust straight ahead until the ship reaches its top speed.
pub struct ThrustRun {
    ship: Option<ShipHandle>,
}

impl ThrustRun {
    pub fn new() -> Self {
        Self { ship: None }
    }
}

impl Scenario for ThrustRun {
    fn name(&self) -> String {
        "thrust_run".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) {
        let config = sim.ship_config().clone();
        self.ship = Some(player_ship(sim, vector![0.0, 0.0], config));
    }

    fn tick(&mut self, sim: &mut Simulation) {
        let Some(handle) = self.ship else {
            return;
        };
        let pointer = sim.ship(handle).position() + vector![0.0, 1000.0];
        sim.ship_mut(handle)
            .set_input(InputFrame::aim_at(pointer).with_thrust(1.0));
    }

    fn status(&self, sim: &Simulation) -> Status {
        let Some(handle) = self.ship else {
            return Status::Failed;
        };
        let ship = sim.ship(handle);
        if ship.velocity().magnitude() >= ship.controller().config().max_speed - 1e-6 {
            Status::Complete
        } else {
            check_timeout(sim, self.max_ticks())
        }
    }

    fn max_ticks(&self) -> u32 {
        3 * 60
    }
}
