use crate::ease::Ease;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRUST_FORCE: f64 = 12.0;
pub const DEFAULT_MAX_SPEED: f64 = 10.0;
pub const DEFAULT_TURN_SPEED: f64 = 720.0;
pub const DEFAULT_PASSIVE_BRAKE: f64 = 1.0;
pub const MAX_PASSIVE_BRAKE: f64 = 10.0;
pub const DEFAULT_DASH_DISTANCE: f64 = 4.0;
pub const DEFAULT_DASH_TIME: f64 = 0.12;
pub const DEFAULT_DASH_COOLDOWN: f64 = 0.35;
pub const DEFAULT_DASH_INVULNERABILITY: f64 = 0.10;
pub const DEFAULT_MASS: f64 = 1.0;
pub const DEFAULT_RADIUS: f64 = 0.5;

/// Tunables for a single player ship.
///
/// Speeds are in world units per second, forces in newtons, angles in degrees
/// and times in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub thrust_force: f64,
    pub max_speed: f64,
    pub turn_speed: f64,
    pub passive_brake: f64,
    pub dash_distance: f64,
    pub dash_time: f64,
    pub dash_cooldown: f64,
    pub dash_invulnerability: f64,
    pub dash_ease: Ease,
    pub mass: f64,
    pub radius: f64,
}

impl Default for ShipConfig {
    fn default() -> ShipConfig {
        ShipConfig {
            thrust_force: DEFAULT_THRUST_FORCE,
            max_speed: DEFAULT_MAX_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
            passive_brake: DEFAULT_PASSIVE_BRAKE,
            dash_distance: DEFAULT_DASH_DISTANCE,
            dash_time: DEFAULT_DASH_TIME,
            dash_cooldown: DEFAULT_DASH_COOLDOWN,
            dash_invulnerability: DEFAULT_DASH_INVULNERABILITY,
            dash_ease: Ease::default(),
            mass: DEFAULT_MASS,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl ShipConfig {
    /// Clamps out-of-range values instead of rejecting them.
    ///
    /// Non-finite values fall back to their defaults. A non-positive
    /// `dash_time` is kept; the dash state machine treats it as an
    /// instantaneous dash.
    pub fn sanitized(mut self) -> ShipConfig {
        fn finite(name: &str, value: &mut f64, default: f64) {
            if !value.is_finite() {
                log::warn!("{name} {value} is not finite, using {default}");
                *value = default;
            }
        }

        fn non_negative(name: &str, value: &mut f64) {
            if !(*value >= 0.0) {
                log::warn!("{name} {value} out of range, using 0");
                *value = 0.0;
            }
        }

        finite("thrust_force", &mut self.thrust_force, DEFAULT_THRUST_FORCE);
        finite("max_speed", &mut self.max_speed, DEFAULT_MAX_SPEED);
        finite("turn_speed", &mut self.turn_speed, DEFAULT_TURN_SPEED);
        finite("passive_brake", &mut self.passive_brake, DEFAULT_PASSIVE_BRAKE);
        finite("dash_distance", &mut self.dash_distance, DEFAULT_DASH_DISTANCE);
        finite("dash_time", &mut self.dash_time, DEFAULT_DASH_TIME);
        finite("dash_cooldown", &mut self.dash_cooldown, DEFAULT_DASH_COOLDOWN);
        finite(
            "dash_invulnerability",
            &mut self.dash_invulnerability,
            DEFAULT_DASH_INVULNERABILITY,
        );
        finite("mass", &mut self.mass, DEFAULT_MASS);
        finite("radius", &mut self.radius, DEFAULT_RADIUS);

        non_negative("thrust_force", &mut self.thrust_force);
        non_negative("max_speed", &mut self.max_speed);
        non_negative("turn_speed", &mut self.turn_speed);
        non_negative("dash_distance", &mut self.dash_distance);
        non_negative("dash_cooldown", &mut self.dash_cooldown);
        non_negative("dash_invulnerability", &mut self.dash_invulnerability);
        non_negative("passive_brake", &mut self.passive_brake);
        if self.passive_brake > MAX_PASSIVE_BRAKE {
            log::warn!(
                "passive_brake {} out of range, using {MAX_PASSIVE_BRAKE}",
                self.passive_brake
            );
            self.passive_brake = MAX_PASSIVE_BRAKE;
        }
        if !(self.mass > 0.0) {
            log::warn!("mass {} out of range, using {DEFAULT_MASS}", self.mass);
            self.mass = DEFAULT_MASS;
        }
        if !(self.radius > 0.0) {
            log::warn!("radius {} out of range, using {DEFAULT_RADIUS}", self.radius);
            self.radius = DEFAULT_RADIUS;
        }
        if self.dash_time > 0.0 && self.dash_invulnerability > self.dash_time {
            log::debug!(
                "dash_invulnerability {} exceeds dash_time {}, invulnerable for the whole dash",
                self.dash_invulnerability,
                self.dash_time
            );
        }
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShipConfig::default();
        assert_eq!(config.thrust_force, 12.0);
        assert_eq!(config.max_speed, 10.0);
        assert_eq!(config.turn_speed, 720.0);
        assert_eq!(config.passive_brake, 1.0);
        assert_eq!(config.dash_distance, 4.0);
        assert_eq!(config.dash_time, 0.12);
        assert_eq!(config.dash_cooldown, 0.35);
        assert_eq!(config.dash_invulnerability, 0.10);
        assert_eq!(config.dash_ease, Ease::SmoothStep);
    }

    #[test]
    fn test_sanitized() {
        let config = ShipConfig {
            max_speed: -1.0,
            passive_brake: 50.0,
            dash_cooldown: -1.0,
            mass: 0.0,
            dash_time: -0.5,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.max_speed, 0.0);
        assert_eq!(config.passive_brake, MAX_PASSIVE_BRAKE);
        assert_eq!(config.dash_cooldown, 0.0);
        assert_eq!(config.mass, DEFAULT_MASS);
        assert_eq!(config.dash_time, -0.5);
    }

    #[test]
    fn test_sanitized_non_finite() {
        let config = ShipConfig {
            dash_time: f64::NAN,
            dash_distance: f64::INFINITY,
            max_speed: f64::NAN,
            turn_speed: f64::NEG_INFINITY,
            dash_cooldown: f64::NAN,
            mass: f64::INFINITY,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.dash_time, DEFAULT_DASH_TIME);
        assert_eq!(config.dash_distance, DEFAULT_DASH_DISTANCE);
        assert_eq!(config.max_speed, DEFAULT_MAX_SPEED);
        assert_eq!(config.turn_speed, DEFAULT_TURN_SPEED);
        assert_eq!(config.dash_cooldown, DEFAULT_DASH_COOLDOWN);
        assert_eq!(config.mass, DEFAULT_MASS);

        let infinite = ShipConfig {
            dash_time: f64::INFINITY,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(infinite.dash_time, DEFAULT_DASH_TIME);
    }
}
