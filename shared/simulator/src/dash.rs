use crate::aim;
use crate::config::{ShipConfig, DEFAULT_DASH_DISTANCE, DEFAULT_DASH_TIME};
use crate::ease::Ease;
use crate::input::{EdgeTrigger, DASH_DEADZONE};
use crate::integrator::MotionIntegrator;
use crate::trail::TrailEffect;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Slack used when comparing accumulated tick lengths against dash timings.
pub const TIME_EPSILON: f64 = 1e-9;

/// Share of the average dash speed kept as sideways drift after a dash.
pub const EXIT_DASH_SPEED_FACTOR: f64 = 0.25;

/// Share of the pre-dash velocity restored after a dash.
pub const EXIT_CARRY_FACTOR: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashPhase {
    Idle,
    Dashing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashDirection {
    Left,
    Right,
}

impl DashDirection {
    pub fn from_axis(axis: f64) -> Option<DashDirection> {
        if axis > DASH_DEADZONE {
            Some(DashDirection::Right)
        } else if axis < -DASH_DEADZONE {
            Some(DashDirection::Left)
        } else {
            None
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            DashDirection::Left => -1.0,
            DashDirection::Right => 1.0,
        }
    }
}

/// What the dash state machine did during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashStep {
    Idle,
    Started,
    Dashing,
    Finished,
}

impl DashStep {
    /// True if the dash owned the ship's motion this tick.
    pub fn active(self) -> bool {
        self != DashStep::Idle
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashSettings {
    pub distance: f64,
    pub time: f64,
    pub cooldown: f64,
    pub invulnerability: f64,
    pub ease: Ease,
}

impl From<&ShipConfig> for DashSettings {
    fn from(config: &ShipConfig) -> DashSettings {
        DashSettings {
            distance: config.dash_distance,
            time: config.dash_time,
            cooldown: config.dash_cooldown,
            invulnerability: config.dash_invulnerability,
            ease: config.dash_ease.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    pub phase: DashPhase,
    /// Only meaningful while dashing.
    pub direction: DashDirection,
    pub elapsed: f64,
    pub start_position: Vector2<f64>,
    /// Full displacement of the current dash, fixed when it starts.
    pub dash_vector: Vector2<f64>,
    pub pre_dash_velocity: Vector2<f64>,
    /// `None` until the first dash has finished.
    pub last_dash_end: Option<f64>,
    pub invulnerable: bool,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            phase: DashPhase::Idle,
            direction: DashDirection::Right,
            elapsed: 0.0,
            start_position: Vector2::zeros(),
            dash_vector: Vector2::zeros(),
            pre_dash_velocity: Vector2::zeros(),
            last_dash_end: None,
            invulnerable: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DashController {
    settings: DashSettings,
    state: DashState,
    trigger: EdgeTrigger,
}

impl DashController {
    pub fn new(mut settings: DashSettings) -> DashController {
        if !settings.time.is_finite() {
            log::warn!("dash time {} is not finite, using {DEFAULT_DASH_TIME}", settings.time);
            settings.time = DEFAULT_DASH_TIME;
        }
        if !settings.distance.is_finite() {
            log::warn!(
                "dash distance {} is not finite, using {DEFAULT_DASH_DISTANCE}",
                settings.distance
            );
            settings.distance = DEFAULT_DASH_DISTANCE;
        }
        DashController {
            settings,
            state: DashState::default(),
            trigger: EdgeTrigger::default(),
        }
    }

    pub fn state(&self) -> &DashState {
        &self.state
    }

    pub fn is_dashing(&self) -> bool {
        self.state.phase == DashPhase::Dashing
    }

    pub fn is_invulnerable(&self) -> bool {
        self.state.invulnerable
    }

    /// Seconds until a new dash may start; zero when ready.
    pub fn cooldown_remaining(&self, now: f64) -> f64 {
        match self.state.last_dash_end {
            Some(end) => (end + self.settings.cooldown - now).max(0.0),
            None => 0.0,
        }
    }

    fn cooldown_elapsed(&self, now: f64) -> bool {
        match self.state.last_dash_end {
            Some(end) => now - end >= self.settings.cooldown - TIME_EPSILON,
            None => true,
        }
    }

    /// Runs one tick.
    ///
    /// `axis` is the raw dash axis; presses are detected here so that holding
    /// the input never retriggers. `now` is the simulation time at the end of
    /// this tick.
    pub fn tick(
        &mut self,
        body: &mut dyn MotionIntegrator,
        axis: f64,
        facing: f64,
        trail: Option<&mut dyn TrailEffect>,
        now: f64,
        dt: f64,
    ) -> DashStep {
        let pressed = self.trigger.update(axis);

        if self.is_dashing() {
            return self.advance(body, facing, trail, now, dt);
        }

        let Some(direction) = pressed.and_then(DashDirection::from_axis) else {
            return DashStep::Idle;
        };
        if !self.cooldown_elapsed(now) {
            log::debug!(
                "dash ignored, {:.3}s of cooldown left",
                self.cooldown_remaining(now)
            );
            return DashStep::Idle;
        }

        self.start(body, direction, facing, trail, now)
    }

    fn start(
        &mut self,
        body: &mut dyn MotionIntegrator,
        direction: DashDirection,
        facing: f64,
        mut trail: Option<&mut dyn TrailEffect>,
        now: f64,
    ) -> DashStep {
        let state = &mut self.state;
        state.phase = DashPhase::Dashing;
        state.direction = direction;
        state.elapsed = 0.0;
        state.start_position = body.position();
        state.dash_vector = aim::right(facing) * direction.sign() * self.settings.distance;
        state.pre_dash_velocity = body.velocity();
        state.invulnerable = self.settings.invulnerability > 0.0;
        body.set_velocity(Vector2::zeros());
        match trail.as_deref_mut() {
            Some(trail) => trail.set_emitting(true),
            None => log::debug!("dash started without a trail"),
        }
        log::debug!(
            "dash {:?} from {:?} at t={now:.3}",
            direction,
            state.start_position
        );

        if self.settings.time <= 0.0 {
            self.finish(body, facing, trail, now);
            return DashStep::Finished;
        }
        DashStep::Started
    }

    fn advance(
        &mut self,
        body: &mut dyn MotionIntegrator,
        facing: f64,
        trail: Option<&mut dyn TrailEffect>,
        now: f64,
        dt: f64,
    ) -> DashStep {
        let time = self.settings.time;
        let state = &mut self.state;
        let window_start = state.elapsed;
        state.elapsed = (state.elapsed + dt.max(0.0)).min(time);
        let u = (state.elapsed / time).clamp(0.0, 1.0);
        let eased = self.settings.ease.evaluate(u);
        body.set_position(state.start_position + state.dash_vector * eased);
        state.invulnerable = window_start < self.settings.invulnerability - TIME_EPSILON;

        if state.elapsed >= time - TIME_EPSILON {
            state.elapsed = time;
            self.finish(body, facing, trail, now);
            DashStep::Finished
        } else {
            DashStep::Dashing
        }
    }

    fn finish(
        &mut self,
        body: &mut dyn MotionIntegrator,
        facing: f64,
        trail: Option<&mut dyn TrailEffect>,
        now: f64,
    ) {
        let state = &mut self.state;
        body.set_position(state.start_position + state.dash_vector);

        let drift = if self.settings.time > 0.0 {
            aim::right(facing)
                * state.direction.sign()
                * (self.settings.distance / self.settings.time)
                * EXIT_DASH_SPEED_FACTOR
        } else {
            Vector2::zeros()
        };
        body.set_velocity(drift + state.pre_dash_velocity * EXIT_CARRY_FACTOR);

        match trail {
            Some(trail) => trail.set_emitting(false),
            None => log::debug!("dash finished without a trail"),
        }
        state.phase = DashPhase::Idle;
        state.last_dash_end = Some(now);
        state.invulnerable = false;
        log::debug!("dash finished at {:?} t={now:.3}", body.position());
    }
}
