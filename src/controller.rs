//! Per-cycle orchestration: distances, intent, override, fusion, command.

use std::time::Instant;

use crate::config::NavConfig;
use crate::control::{BehaviorState, ControlLaw, SafetyGovernor, TargetOverride};
use crate::error::Result;
use crate::sensing::{DistanceModel, RangeFrame};
use crate::transport::{MotionSink, RangeSource};

/// The sole per-cycle output: forward speed and rotation rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionCommand {
    /// Linear speed (m/s). Negative backs away from an obstacle inside
    /// the hull margin.
    pub speed: f32,
    /// Angular turnrate (rad/s), left positive.
    pub turnrate: f32,
}

/// Everything one cycle produced, for logging and tests.
#[derive(Clone, Copy, Debug)]
pub struct CycleOutput {
    pub command: MotionCommand,
    pub state: BehaviorState,
}

/// Reactive navigation controller.
///
/// Owns all mutable state; nothing is shared. Call [`run`](Self::run) to
/// drive the loop against the injected transport, or [`step`](Self::step)
/// directly with a frame for offline use.
pub struct Controller {
    distances: DistanceModel,
    law: ControlLaw,
    governor: SafetyGovernor,
    /// Optional vision collaborator, selected at construction.
    target: Option<TargetOverride>,
    /// Previous cycle's fused turnrate, seeding the rotate-safety check.
    last_turnrate: f32,
    /// Previous cycle's state, for transition logging only.
    last_state: BehaviorState,
}

impl Controller {
    pub fn new(config: &NavConfig, target: Option<TargetOverride>) -> Self {
        Self {
            distances: DistanceModel::new(config.sensors.clone()),
            law: ControlLaw::new(&config.robot, &config.wall_follow),
            governor: SafetyGovernor::new(&config.robot, &config.wall_follow),
            target,
            last_turnrate: 0.0,
            last_state: BehaviorState::default(),
        }
    }

    /// Run the control loop until the transport fails.
    ///
    /// The blocking read defines the cycle cadence. A transport error on
    /// either side is fatal and propagates; the cycle is not reattempted.
    pub fn run(&mut self, source: &mut dyn RangeSource, sink: &mut dyn MotionSink) -> Result<()> {
        tracing::info!("Controller started");
        loop {
            let frame = match source.read() {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("Sensor read failed: {}", e);
                    return Err(e);
                }
            };

            let output = self.step(frame, Instant::now());

            if let Err(e) = sink.send(&output.command) {
                tracing::error!("Command send failed: {}", e);
                return Err(e);
            }
        }
    }

    /// One full control cycle over a fresh frame.
    ///
    /// Pipeline order is fixed: target override or wall-following intent,
    /// then the collision override, then speed, then the rotate-safety
    /// signal seeded from the previous cycle's fused turnrate. The final
    /// turnrate is the mean of the override stage and the safety signal, a
    /// soft blend that trades a little margin for a smoother trajectory.
    pub fn step(&mut self, frame: RangeFrame, now: Instant) -> CycleOutput {
        self.distances.update(frame);
        let d = self.distances.clearances();

        let (intent, state) = match self.target.as_mut().and_then(|t| t.turnrate(now)) {
            Some(turnrate) => (turnrate, BehaviorState::BallTracking),
            None => self.law.turnrate(&d),
        };

        let (turnrate, state) = self.governor.collision_avoid(intent, state, &d);

        let speed = self.law.speed(&d);

        let rotate_safe = self.governor.check_rotate(self.last_turnrate, &d);
        let fused = (turnrate + rotate_safe) / 2.0;
        self.last_turnrate = fused;

        if state != self.last_state {
            tracing::info!("{} -> {}", self.last_state.as_str(), state.as_str());
            self.last_state = state;
        }
        tracing::debug!(
            "cycle: state={} speed={:.3} turnrate={:.3} (intent={:.3} safe={:.3}) lf={:.2} f={:.2}",
            state.as_str(),
            speed,
            fused,
            turnrate,
            rotate_safe,
            d.left_front,
            d.front,
        );

        CycleOutput {
            command: MotionCommand {
                speed,
                turnrate: fused,
            },
            state,
        }
    }

    /// Minimum clearance over all sectors (diagnostics).
    pub fn min_clearance(&self) -> f32 {
        self.distances.min_clearance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensing::SONAR_COUNT;

    fn frame_uniform(range: f32) -> RangeFrame {
        RangeFrame::uniform(range, NavConfig::default().sensors.laser_beam_count)
    }

    #[test]
    fn test_open_space_goes_straight_at_cruise() {
        let config = NavConfig::default();
        let mut controller = Controller::new(&config, None);

        // All readings at 2.0m: every left clearance is beyond the lost
        // threshold, so the robot searches for a wall by going straight.
        let out = controller.step(frame_uniform(2.0), Instant::now());
        assert_eq!(out.state, BehaviorState::WallSearching);
        assert!(out.command.turnrate.abs() < 1e-6);
        assert!((out.command.speed - config.robot.cruise_speed).abs() < 1e-6);
    }

    #[test]
    fn test_collision_override_wins() {
        let config = NavConfig::default();
        let mut controller = Controller::new(&config, None);

        // Everything close in front: both proxies far below the stop
        // distance.
        let mut frame = frame_uniform(2.0);
        for r in frame.laser.iter_mut() {
            *r = 0.25;
        }
        frame.sonar = [0.25; SONAR_COUNT];

        let out = controller.step(frame, Instant::now());
        assert_eq!(out.state, BehaviorState::CollisionAvoidance);
        // First cycle: previous fused turnrate is 0, so the fused output
        // is half the escape value, already rotating right.
        assert!(out.command.turnrate < 0.0);
        assert!(
            (out.command.turnrate - (-config.robot.escape_turnrate / 2.0)).abs() < 1e-5
        );
    }

    #[test]
    fn test_fusion_converges_to_escape_value() {
        let config = NavConfig::default();
        let mut controller = Controller::new(&config, None);

        // Obstacle ahead, but flanks and rear open so check_rotate
        // passes the previous turnrate through.
        let mut frame = frame_uniform(2.0);
        let n = frame.laser.len();
        for r in frame.laser[n / 3..2 * n / 3].iter_mut() {
            *r = 0.3;
        }
        frame.sonar[3] = 0.3;
        frame.sonar[4] = 0.3;

        let mut last = 0.0;
        for _ in 0..20 {
            let out = controller.step(frame.clone(), Instant::now());
            assert_eq!(out.state, BehaviorState::CollisionAvoidance);
            last = out.command.turnrate;
        }
        // Geometric approach to the fixed escape turnrate
        assert!((last - (-config.robot.escape_turnrate)).abs() < 1e-3);
    }
}
