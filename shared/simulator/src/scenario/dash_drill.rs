use super::prelude::*;

/// Ticks between dash presses; longer than a default dash plus its cooldown.
const PERIOD: u32 = 30;
const HOLD_TICKS: u32 = 3;
const DASHES: u32 = 4;

/// Dashes right and left alternately while aiming straight ahead.
pub struct DashDrill {
    ship: Option<ShipHandle>,
}

impl DashDrill {
    pub fn new() -> Self {
        Self { ship: None }
    }

    /// Dash axis held on the given tick.
    pub fn dash_axis(tick: u32) -> f64 {
        let press = tick / PERIOD;
        if press >= DASHES || tick % PERIOD >= HOLD_TICKS {
            0.0
        } else if press % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

impl Scenario for DashDrill {
    fn name(&self) -> String {
        "dash_drill".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) {
        let config = sim.ship_config().clone();
        self.ship = Some(player_ship(sim, vector![0.0, 0.0], config));
    }

    fn tick(&mut self, sim: &mut Simulation) {
        let Some(handle) = self.ship else {
            return;
        };
        let pointer = sim.ship(handle).position() + vector![0.0, 10.0];
        let input = InputFrame::aim_at(pointer).with_dash(Self::dash_axis(sim.tick()));
        sim.ship_mut(handle).set_input(input);
    }

    fn status(&self, sim: &Simulation) -> Status {
        let Some(handle) = self.ship else {
            return Status::Failed;
        };
        let ship = sim.ship(handle);
        if ship.trail().bursts >= DASHES && !ship.is_dashing() {
            Status::Complete
        } else {
            check_timeout(sim, self.max_ticks())
        }
    }

    fn max_ticks(&self) -> u32 {
        (DASHES + 2) * PERIOD
    }
}
