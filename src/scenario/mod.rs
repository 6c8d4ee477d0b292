//! Scenario Generator
//!
//! Produces synthetic sensor frames for the simulated sensor node. A
//! four-state scenario machine (normal, obstacle, fall, horn) is re-drawn
//! uniformly at random once the active scenario has dwelt longer than the
//! configured duration. Self-transitions are allowed: a re-draw may pick the
//! scenario that is already active, and the dwell timer still restarts.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use rand::prelude::*;
use tracing::info;

use crate::types::{Frame, Motion, RawAlert};

/// Gravity seen on the vertical axis at rest (m/s²).
const GRAVITY: f64 = 9.8;
/// Half-width of the at-rest noise band on every axis.
const QUIET_NOISE: f64 = 0.05;
/// Half-width of tumbling accelerations (m/s²).
const FALL_ACCEL_RANGE: f64 = 8.0;
/// Half-width of tumbling angular rates (deg/s).
const FALL_GYRO_RANGE: f64 = 10.0;
/// Clear-path proximity range (mm).
const CLEAR_PROXIMITY_MM: (u32, u32) = (900, 1500);
/// Obstacle proximity range (mm).
const OBSTACLE_RANGE_MM: (u32, u32) = (300, 700);

// ============================================================================
// Scenario
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Normal,
    Obstacle,
    Fall,
    Horn,
}

impl Scenario {
    pub const ALL: [Self; 4] = [Self::Normal, Self::Obstacle, Self::Fall, Self::Horn];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Obstacle => "obstacle",
            Self::Fall => "fall",
            Self::Horn => "horn",
        }
    }

    pub const fn raw_alert(self) -> RawAlert {
        match self {
            Self::Normal => RawAlert::Clear,
            Self::Obstacle => RawAlert::ObstacleAhead,
            Self::Fall => RawAlert::FallDetected,
            Self::Horn => RawAlert::HornDetected,
        }
    }
}

/// Active scenario and when it was last drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioState {
    pub scenario: Scenario,
    /// Clock reading (seconds) at the last draw
    pub changed_at: f64,
}

// ============================================================================
// Generator
// ============================================================================

pub struct ScenarioGenerator<C: Clock = SystemClock> {
    rng: StdRng,
    clock: C,
    dwell_secs: f64,
    state: ScenarioState,
    frames_generated: u64,
    redraws: u64,
}

impl<C: Clock> ScenarioGenerator<C> {
    /// Start in the `normal` scenario at the clock's current reading.
    pub fn new(clock: C, dwell_secs: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let state = ScenarioState {
            scenario: Scenario::Normal,
            changed_at: clock.now(),
        };

        Self {
            rng,
            clock,
            dwell_secs,
            state,
            frames_generated: 0,
            redraws: 0,
        }
    }

    pub const fn state(&self) -> ScenarioState {
        self.state
    }

    pub const fn frames_generated(&self) -> u64 {
        self.frames_generated
    }

    /// Number of scenario draws after the initial one, including self-transitions.
    pub const fn redraws(&self) -> u64 {
        self.redraws
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one generator tick: re-draw the scenario if the dwell has elapsed,
    /// then build a frame for whichever scenario is active.
    pub fn tick(&mut self) -> Frame {
        let now = self.clock.now();
        self.maybe_redraw(now);
        let scenario = self.state.scenario;
        self.frame_for(scenario, now)
    }

    /// Returns true when a draw happened, even if it picked the same scenario.
    fn maybe_redraw(&mut self, now: f64) -> bool {
        if now - self.state.changed_at <= self.dwell_secs {
            return false;
        }

        let next = Scenario::ALL[self.rng.gen_range(0..Scenario::ALL.len())];
        if next != self.state.scenario {
            info!(from = self.state.scenario.name(), to = next.name(), "Scenario changed");
        }
        self.state = ScenarioState {
            scenario: next,
            changed_at: now,
        };
        self.redraws += 1;
        true
    }

    /// Build a frame for the given scenario, stamped with `timestamp`.
    pub fn frame_for(&mut self, scenario: Scenario, timestamp: f64) -> Frame {
        let proximity_mm = match scenario {
            Scenario::Obstacle => self
                .rng
                .gen_range(OBSTACLE_RANGE_MM.0..=OBSTACLE_RANGE_MM.1),
            Scenario::Normal | Scenario::Fall | Scenario::Horn => self
                .rng
                .gen_range(CLEAR_PROXIMITY_MM.0..=CLEAR_PROXIMITY_MM.1),
        };
        let motion = match scenario {
            Scenario::Fall => self.tumbling_motion(),
            Scenario::Normal | Scenario::Obstacle | Scenario::Horn => self.quiet_motion(),
        };
        self.frames_generated += 1;

        Frame {
            timestamp,
            motion,
            proximity_mm,
            raw_alert: scenario.raw_alert(),
        }
    }

    fn quiet_motion(&mut self) -> Motion {
        let mut noise = || self.rng.gen_range(-QUIET_NOISE..=QUIET_NOISE);
        Motion {
            ax: noise(),
            ay: noise(),
            az: GRAVITY + noise(),
            gx: noise(),
            gy: noise(),
            gz: noise(),
        }
    }

    fn tumbling_motion(&mut self) -> Motion {
        let rng = &mut self.rng;
        Motion {
            ax: rng.gen_range(-FALL_ACCEL_RANGE..=FALL_ACCEL_RANGE),
            ay: rng.gen_range(-FALL_ACCEL_RANGE..=FALL_ACCEL_RANGE),
            az: rng.gen_range(-FALL_ACCEL_RANGE..=FALL_ACCEL_RANGE),
            gx: rng.gen_range(-FALL_GYRO_RANGE..=FALL_GYRO_RANGE),
            gy: rng.gen_range(-FALL_GYRO_RANGE..=FALL_GYRO_RANGE),
            gz: rng.gen_range(-FALL_GYRO_RANGE..=FALL_GYRO_RANGE),
        }
    }
}
