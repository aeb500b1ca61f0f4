use super::prelude::*;
use crate::dash::TIME_EPSILON;

const NUM_SHIPS: usize = 4;
const SPACING: f64 = 40.0;
const DURATION_TICKS: u32 = 20 * 60;

struct FuzzShip {
    handle: ShipHandle,
    input: InputFrame,
    hold: u32,
    bursts: u32,
    last_dash_end: Option<f64>,
}

/// Several ships driven by random held inputs. Fails as soon as a ship's dash
/// state breaks one of its invariants.
pub struct Fuzz {
    rng: SeededRng,
    ships: Vec<FuzzShip>,
    violations: Vec<String>,
}

impl Fuzz {
    pub fn new() -> Self {
        Self {
            rng: new_rng(0),
            ships: vec![],
            violations: vec![],
        }
    }

    fn random_input(&mut self, position: Vector2<f64>) -> InputFrame {
        let rng = &mut self.rng;
        let pointer = if rng.gen_bool(0.9) {
            Some(position + vector![rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0)])
        } else {
            None
        };
        let dash = match rng.gen_range(0..6) {
            0 => -1.0,
            1 => 1.0,
            2 => rng.gen_range(-1.0..1.0),
            _ => 0.0,
        };
        let movement = if rng.gen_bool(0.2) {
            Some(vector![rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)])
        } else {
            None
        };
        InputFrame {
            pointer,
            thrust: rng.gen_range(0.0..1.0),
            dash,
            movement,
        }
    }

    fn check(&mut self, sim: &Simulation) {
        let now = sim.time();
        for fuzz_ship in self.ships.iter_mut() {
            let ship = sim.ship(fuzz_ship.handle);
            let controller = ship.controller();
            let config = controller.config();
            let dash = ship.dash_state();
            let mut violations = vec![];

            if ship.is_invulnerable() && !ship.is_dashing() {
                violations.push("invulnerable while idle".to_string());
            }
            if ship.is_dashing() && !(0.0..=config.dash_time).contains(&dash.elapsed) {
                violations.push(format!("dash elapsed {} out of range", dash.elapsed));
            }
            let bursts = ship.trail().bursts;
            if bursts > fuzz_ship.bursts {
                // The dash started during the previous step, which ended at `now`.
                if let Some(end) = fuzz_ship.last_dash_end {
                    if now - end < config.dash_cooldown - TIME_EPSILON {
                        violations.push(format!(
                            "dash started {:.4}s after the previous one ended",
                            now - end
                        ));
                    }
                }
            }
            if ship.is_dashing() != ship.trail().emitting {
                violations.push("trail out of sync with dash".to_string());
            }

            for violation in violations {
                log::warn!("ship {:?} at t={now:.3}: {violation}", fuzz_ship.handle);
                self.violations.push(violation);
            }
            fuzz_ship.bursts = bursts;
            fuzz_ship.last_dash_end = dash.last_dash_end;
        }
    }
}

impl Scenario for Fuzz {
    fn name(&self) -> String {
        "fuzz".into()
    }

    fn init(&mut self, sim: &mut Simulation, seed: u32) {
        self.rng = new_rng(seed);
        for i in 0..NUM_SHIPS {
            let position = vector![i as f64 * SPACING, 0.0];
            let facing = self.rng.gen_range(0.0..360.0);
            let config = sim.ship_config().clone();
            let handle = ship::create(sim, position, vector![0.0, 0.0], facing, config);
            self.ships.push(FuzzShip {
                handle,
                input: InputFrame::idle(),
                hold: 0,
                bursts: 0,
                last_dash_end: None,
            });
        }
    }

    fn tick(&mut self, sim: &mut Simulation) {
        self.check(sim);
        for i in 0..self.ships.len() {
            if self.ships[i].hold == 0 {
                let position = sim.ship(self.ships[i].handle).position();
                let input = self.random_input(position);
                let hold = self.rng.gen_range(1..20);
                self.ships[i].input = input;
                self.ships[i].hold = hold;
            }
            let fuzz_ship = &mut self.ships[i];
            fuzz_ship.hold -= 1;
            sim.ship_mut(fuzz_ship.handle).set_input(fuzz_ship.input);
        }
    }

    fn status(&self, sim: &Simulation) -> Status {
        if !self.violations.is_empty() {
            Status::Failed
        } else if sim.tick() >= DURATION_TICKS {
            Status::Complete
        } else {
            Status::Running
        }
    }

    fn max_ticks(&self) -> u32 {
        DURATION_TICKS
    }
}
