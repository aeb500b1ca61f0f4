use approx::assert_abs_diff_eq;
use nalgebra::{vector, Vector2};
use rand::Rng;
use spacefighter_simulator::config::ShipConfig;
use spacefighter_simulator::dash::{
    DashController, DashPhase, DashSettings, DashStep, EXIT_CARRY_FACTOR, EXIT_DASH_SPEED_FACTOR,
};
use spacefighter_simulator::input::InputFrame;
use spacefighter_simulator::integrator::PointMass;
use spacefighter_simulator::rng::new_rng;
use spacefighter_simulator::ship::ShipController;
use spacefighter_simulator::trail::Trail;
use test_log::test;

fn default_dash() -> DashController {
    DashController::new(DashSettings::from(&ShipConfig::default()))
}

struct Rig {
    dash: DashController,
    body: PointMass,
    trail: Trail,
    now: f64,
}

impl Rig {
    fn new(dash: DashController, position: Vector2<f64>) -> Rig {
        Rig {
            dash,
            body: PointMass::new(position, 1.0),
            trail: Trail::default(),
            now: 0.0,
        }
    }

    fn tick(&mut self, axis: f64, facing: f64, dt: f64) -> DashStep {
        self.now += dt;
        self.dash.tick(
            &mut self.body,
            axis,
            facing,
            Some(&mut self.trail),
            self.now,
            dt,
        )
    }
}

#[test]
fn test_dash_with_twenty_ms_ticks() {
    // The entry tick only captures state; six more ticks cover 0.12s.
    let mut rig = Rig::new(default_dash(), vector![0.0, 0.0]);
    rig.body.velocity = vector![0.0, 3.0];

    assert_eq!(rig.tick(1.0, 0.0, 0.02), DashStep::Started);
    assert!(rig.dash.is_dashing());
    assert!(rig.dash.is_invulnerable());
    assert!(rig.trail.emitting);
    assert_eq!(rig.body.velocity, vector![0.0, 0.0]);
    assert_eq!(rig.body.position, vector![0.0, 0.0]);

    for i in 1..=5 {
        assert_eq!(rig.tick(1.0, 0.0, 0.02), DashStep::Dashing, "tick {i}");
        assert!(rig.dash.is_invulnerable(), "tick {i}");
        assert!(rig.body.position.x > 0.0 && rig.body.position.x < 4.0);
    }

    assert_eq!(rig.tick(1.0, 0.0, 0.02), DashStep::Finished);
    assert!(!rig.dash.is_invulnerable());
    assert!(!rig.dash.is_dashing());
    assert!(!rig.trail.emitting);
    assert_abs_diff_eq!(rig.body.position, vector![4.0, 0.0], epsilon = 1e-5);
    assert_eq!(rig.dash.state().last_dash_end, Some(rig.now));

    let drift = 4.0 / 0.12 * EXIT_DASH_SPEED_FACTOR;
    let carry = 3.0 * EXIT_CARRY_FACTOR;
    assert_abs_diff_eq!(rig.body.velocity, vector![drift, carry], epsilon = 1e-9);
}

#[test]
fn test_dash_ends_exactly_for_any_tick_lengths() {
    let mut rng = new_rng(7);
    for _ in 0..50 {
        let start = vector![rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)];
        let facing = rng.gen_range(0.0..360.0);
        let mut rig = Rig::new(default_dash(), start);
        assert_eq!(rig.tick(-1.0, facing, 0.01), DashStep::Started);
        let expected = start + rig.dash.state().dash_vector;

        let mut ticks = 0;
        loop {
            let dt = rng.gen_range(0.001..0.05);
            ticks += 1;
            match rig.tick(0.0, facing, dt) {
                DashStep::Dashing => assert!(ticks < 200),
                DashStep::Finished => break,
                step => panic!("unexpected {step:?}"),
            }
        }
        assert_eq!(rig.body.position, expected);
    }
}

#[test]
fn test_dash_direction() {
    let mut rig = Rig::new(default_dash(), vector![1.0, 1.0]);
    rig.tick(-1.0, 90.0, 0.02);
    assert_abs_diff_eq!(
        rig.dash.state().dash_vector,
        vector![0.0, -4.0],
        epsilon = 1e-12
    );
    while rig.dash.is_dashing() {
        rig.tick(0.0, 90.0, 0.02);
    }
    assert_abs_diff_eq!(rig.body.position, vector![1.0, -3.0], epsilon = 1e-12);
}

#[test]
fn test_dash_ignored_during_cooldown() {
    let mut rig = Rig::new(default_dash(), vector![0.0, 0.0]);
    rig.tick(1.0, 0.0, 0.02);
    while rig.dash.is_dashing() {
        rig.tick(0.0, 0.0, 0.02);
    }
    let end = rig.now;
    let position = rig.body.position;

    assert_eq!(rig.tick(1.0, 0.0, 0.02), DashStep::Idle);
    assert_eq!(rig.dash.state().phase, DashPhase::Idle);
    assert_eq!(rig.body.position, position);
    assert!(rig.dash.cooldown_remaining(rig.now) > 0.0);
    assert_eq!(rig.trail.bursts, 1);

    rig.tick(0.0, 0.0, 0.35 - (rig.now - end));
    assert_abs_diff_eq!(rig.dash.cooldown_remaining(rig.now), 0.0, epsilon = 1e-9);
    assert_eq!(rig.tick(1.0, 0.0, 0.001), DashStep::Started);
    assert_eq!(rig.trail.bursts, 2);
}

#[test]
fn test_dash_ignored_while_dashing() {
    let mut rig = Rig::new(default_dash(), vector![0.0, 0.0]);
    rig.tick(1.0, 0.0, 0.02);
    let vector = rig.dash.state().dash_vector;
    rig.tick(0.0, 0.0, 0.02);
    assert_eq!(rig.tick(-1.0, 0.0, 0.02), DashStep::Dashing);
    assert_eq!(rig.dash.state().dash_vector, vector);
    assert_eq!(rig.trail.bursts, 1);
}

#[test]
fn test_holding_dash_does_not_retrigger() {
    let mut rig = Rig::new(default_dash(), vector![0.0, 0.0]);
    rig.tick(1.0, 0.0, 0.02);
    for _ in 0..100 {
        rig.tick(1.0, 0.0, 0.02);
    }
    assert!(!rig.dash.is_dashing());
    assert_eq!(rig.trail.bursts, 1);
    assert_abs_diff_eq!(rig.body.position, vector![4.0, 0.0], epsilon = 1e-9);
}

#[test]
fn test_deadzone() {
    let mut rig = Rig::new(default_dash(), vector![0.0, 0.0]);
    assert_eq!(rig.tick(0.05, 0.0, 0.02), DashStep::Idle);
    assert_eq!(rig.tick(-0.1, 0.0, 0.02), DashStep::Idle);
    assert_eq!(rig.tick(0.5, 0.0, 0.02), DashStep::Started);
}

#[test]
fn test_zero_dash_time() {
    let settings = DashSettings {
        time: 0.0,
        ..DashSettings::from(&ShipConfig::default())
    };
    let mut rig = Rig::new(DashController::new(settings), vector![2.0, 0.0]);
    rig.body.velocity = vector![10.0, 0.0];
    assert_eq!(rig.tick(1.0, 0.0, 0.02), DashStep::Finished);
    assert!(!rig.dash.is_dashing());
    assert!(!rig.dash.is_invulnerable());
    assert!(!rig.trail.emitting);
    assert_eq!(rig.trail.bursts, 1);
    assert_eq!(rig.body.position, vector![6.0, 0.0]);
    assert_abs_diff_eq!(rig.body.velocity, vector![10.0 * EXIT_CARRY_FACTOR, 0.0]);
}

#[test]
fn test_non_finite_dash_time_still_finishes() {
    let settings = DashSettings {
        time: f64::INFINITY,
        ..DashSettings::from(&ShipConfig::default())
    };
    let mut rig = Rig::new(DashController::new(settings), vector![0.0, 0.0]);
    assert_eq!(rig.tick(1.0, 0.0, 0.02), DashStep::Started);
    let mut ticks = 0;
    while rig.dash.is_dashing() {
        rig.tick(0.0, 0.0, 0.02);
        ticks += 1;
        assert!(ticks <= 6);
    }
    assert_abs_diff_eq!(rig.body.position, vector![4.0, 0.0], epsilon = 1e-9);
}

#[test]
fn test_nan_dash_time_ship_returns_to_idle() {
    let config = ShipConfig {
        dash_time: f64::NAN,
        ..Default::default()
    };
    let mut ship = ShipController::new(config, 0.0);
    assert_eq!(ship.config().dash_time, ShipConfig::default().dash_time);
    let mut body = PointMass::new(vector![0.0, 0.0], 1.0);
    let mut trail = Trail::default();
    let dt = 0.02;
    let mut now = 0.0;

    for i in 0..600 {
        let input = if i == 0 {
            InputFrame::idle().with_dash(1.0)
        } else {
            InputFrame::idle()
        };
        now += dt;
        ship.tick(&mut body, &input, Some(&mut trail), now, dt);
        body.integrate(dt);
    }
    assert!(!ship.is_dashing());
    assert!(!ship.is_invulnerable());
    assert_eq!(trail.bursts, 1);
    assert!(body.position.x.is_finite() && body.position.y.is_finite());
}

#[test]
fn test_no_invulnerability_window() {
    let settings = DashSettings {
        invulnerability: 0.0,
        ..DashSettings::from(&ShipConfig::default())
    };
    let mut rig = Rig::new(DashController::new(settings), vector![0.0, 0.0]);
    rig.tick(1.0, 0.0, 0.02);
    assert!(!rig.dash.is_invulnerable());
    while rig.dash.is_dashing() {
        rig.tick(0.0, 0.0, 0.02);
        assert!(!rig.dash.is_invulnerable());
    }
}

#[test]
fn test_dash_without_trail() {
    let mut dash = default_dash();
    let mut body = PointMass::new(vector![0.0, 0.0], 1.0);
    assert_eq!(
        dash.tick(&mut body, 1.0, 0.0, None, 0.02, 0.02),
        DashStep::Started
    );
    let mut now = 0.02;
    while dash.is_dashing() {
        now += 0.02;
        dash.tick(&mut body, 0.0, 0.0, None, now, 0.02);
    }
    assert_eq!(body.position, vector![4.0, 0.0]);
    assert_eq!(dash.state().last_dash_end, Some(now));
}

#[test]
fn test_ship_motion_suppressed_while_dashing() {
    let mut ship = ShipController::new(ShipConfig::default(), 0.0);
    let mut body = PointMass::new(vector![0.0, 0.0], 1.0);
    let mut trail = Trail::default();
    let dt = 0.02;
    let mut now = 0.0;
    let thrusting = InputFrame::aim_at(vector![0.0, 100.0]).with_thrust(1.0);

    for _ in 0..10 {
        body.integrate(dt);
        now += dt;
        ship.tick(&mut body, &thrusting, Some(&mut trail), now, dt);
    }
    assert!(body.velocity.y > 0.0);

    let mut steps = vec![];
    for i in 0..7 {
        let input = if i == 0 {
            thrusting.with_dash(1.0)
        } else {
            thrusting
        };
        body.integrate(dt);
        now += dt;
        steps.push(ship.tick(&mut body, &input, Some(&mut trail), now, dt));
        if i < 6 {
            assert_eq!(body.velocity, vector![0.0, 0.0]);
            assert_eq!(ship.force(), vector![0.0, 0.0]);
        }
    }
    assert_eq!(steps[0], DashStep::Started);
    assert_eq!(steps[6], DashStep::Finished);
    assert!(!ship.is_invulnerable());

    body.integrate(dt);
    now += dt;
    assert_eq!(
        ship.tick(&mut body, &thrusting, Some(&mut trail), now, dt),
        DashStep::Idle
    );
    assert!(ship.force().y > 0.0);
}
