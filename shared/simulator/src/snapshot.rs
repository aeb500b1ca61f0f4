use crate::background::{InfiniteBackground, ScrollingBackground};
use crate::camera::FollowCamera;
use crate::dash::DashPhase;
use crate::scenario::Status;
use crate::simulation::Line;
use crate::trail::Trail;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Snapshot {
    pub nonce: u32,
    pub tick: u32,
    pub time: f64,
    pub status: Status,
    pub ships: Vec<ShipSnapshot>,
    pub focus: Option<u64>,
    pub camera: FollowCamera,
    pub background: InfiniteBackground,
    pub scrolling: ScrollingBackground,
    pub debug_lines: Vec<(u64, Vec<Line>)>,
    pub timing: Timing,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShipSnapshot {
    pub id: u64,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    /// Degrees, 0 along +Y.
    pub facing: f64,
    pub force: Vector2<f64>,
    pub dash_phase: DashPhase,
    pub invulnerable: bool,
    pub dash_cooldown: f64,
    pub trail: Trail,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Timing {
    pub physics: f64,
    pub scenario: f64,
    pub ship: f64,
}

impl Timing {
    pub fn total(&self) -> f64 {
        self.physics + self.scenario + self.ship
    }
}

impl std::ops::Add for Timing {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            physics: self.physics + other.physics,
            scenario: self.scenario + other.scenario,
            ship: self.ship + other.ship,
        }
    }
}

impl std::ops::AddAssign for Timing {
    fn add_assign(&mut self, other: Self) {
        *self = self.clone() + other;
    }
}

impl std::ops::Mul<f64> for Timing {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            physics: self.physics * other,
            scenario: self.scenario * other,
            ship: self.ship * other,
        }
    }
}
