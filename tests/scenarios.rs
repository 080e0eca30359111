//! End-to-end controller scenarios.
//!
//! Each test drives the full pipeline through `Controller::step` with
//! hand-built frames (or the simulated room) and checks the commanded
//! motion and behavior state.

use std::time::{Duration, Instant};

use bhitti_nav::config::NavConfig;
use bhitti_nav::controller::Controller;
use bhitti_nav::sim::SimWorld;
use bhitti_nav::transport::{MotionSink, RangeSource};
use bhitti_nav::{BehaviorState, RangeFrame, TargetObservation, TargetOverride, TargetTracker};

/// Frame with a left wall: the left-front laser arc reads `left_front_raw`,
/// the left arc reads `left_raw`, everything else is open at 5m.
fn left_wall_frame(config: &NavConfig, left_front_raw: f32, left_raw: f32) -> RangeFrame {
    let beam_count = config.sensors.laser_beam_count;
    let mut frame = RangeFrame::uniform(5.0, beam_count);
    // Left-front arc is 148°..204°, left arc 204°..240° of the 240° fan
    for r in frame.laser[420..579].iter_mut() {
        *r = left_front_raw;
    }
    for r in frame.laser[579..].iter_mut() {
        *r = left_raw;
    }
    frame
}

#[test]
fn wall_at_exact_standoff_goes_straight() {
    let config = NavConfig::default();
    let mut controller = Controller::new(&config, None);

    // Raw left-front range that lands the weighted clearance exactly on
    // the preferred standoff: preferred/cos(calib) + laser offset + margin
    let wall = &config.wall_follow;
    let raw = wall.preferred_dist / wall.calib_angle_rad.cos()
        + config.sensors.diag_offset
        + config.sensors.shape_margin;
    let frame = left_wall_frame(&config, raw, 1.0);

    let out = controller.step(frame, Instant::now());
    assert_eq!(out.state, BehaviorState::WallFollowing);
    assert!(out.command.turnrate.abs() < 1e-3);
    assert!((out.command.speed - config.robot.cruise_speed).abs() < 1e-6);
}

#[test]
fn wall_too_far_steers_toward_it() {
    let config = NavConfig::default();
    let mut controller = Controller::new(&config, None);

    // Left wall visible but beyond the standoff; left arc keeps the wall
    // from reading as lost.
    let frame = left_wall_frame(&config, 1.6, 1.0);
    let out = controller.step(frame, Instant::now());

    assert_eq!(out.state, BehaviorState::WallFollowing);
    assert!(out.command.turnrate > 0.0, "should steer left, toward the wall");
    assert!(out.command.turnrate <= config.robot.max_turnrate);
}

#[test]
fn open_space_searches_straight_at_cruise() {
    let config = NavConfig::default();
    let mut controller = Controller::new(&config, None);

    let frame = RangeFrame::uniform(2.0, config.sensors.laser_beam_count);
    let out = controller.step(frame, Instant::now());

    assert_eq!(out.state, BehaviorState::WallSearching);
    assert!(out.command.turnrate.abs() < 1e-6);
    assert!((out.command.speed - config.robot.cruise_speed).abs() < 1e-6);
}

/// Scripted vision collaborator: one canned answer per poll.
struct Script {
    answers: Vec<Option<TargetObservation>>,
}

impl TargetTracker for Script {
    fn poll(&mut self) -> Option<TargetObservation> {
        if self.answers.is_empty() {
            None
        } else {
            self.answers.remove(0)
        }
    }
}

#[test]
fn target_override_claims_then_releases_authority() {
    let config = NavConfig::default();

    let tracker = Script {
        answers: vec![
            Some(TargetObservation {
                bearing: 0.3,
                distance: 1.2,
            }),
            None,
            None,
        ],
    };
    let target = TargetOverride::new(
        Box::new(tracker),
        Duration::from_millis(100),
        Duration::from_millis(150),
    );
    let mut controller = Controller::new(&config, Some(target));

    // Wall sitting at the exact standoff so the wall follower, once it
    // regains authority, commands zero intent turnrate.
    let wall = &config.wall_follow;
    let raw = wall.preferred_dist / wall.calib_angle_rad.cos()
        + config.sensors.diag_offset
        + config.sensors.shape_margin;
    let frame = left_wall_frame(&config, raw, 1.0);

    let t0 = Instant::now();

    // Detection: bearing drives the turnrate
    let out = controller.step(frame.clone(), t0);
    assert_eq!(out.state, BehaviorState::BallTracking);
    assert!(out.command.turnrate > 0.0);

    // Occlusion within the timeout: still tracking (dead-reckoned)
    let out = controller.step(frame.clone(), t0 + Duration::from_millis(100));
    assert_eq!(out.state, BehaviorState::BallTracking);

    // Timeout elapsed: authority returns to the wall follower
    let out = controller.step(frame, t0 + Duration::from_millis(400));
    assert_eq!(out.state, BehaviorState::WallFollowing);
}

#[test]
fn closed_loop_sim_stays_bounded() {
    let config = NavConfig::default();
    let world = SimWorld::new(config.simulation.clone(), config.sensors.clone());
    let (mut sensor, mut motor) = world.split();
    let mut controller = Controller::new(&config, None);

    let start = sensor.pose();
    let mut states_seen = Vec::new();

    for _ in 0..400 {
        let frame = sensor.read().expect("sim read");
        let out = controller.step(frame, Instant::now());
        motor.send(&out.command).expect("sim send");

        // Commands are always bounded by configuration
        assert!(out.command.speed <= config.robot.cruise_speed + 1e-6);
        assert!(out.command.speed.is_finite() && out.command.turnrate.is_finite());
        assert!(out.command.turnrate.abs() <= config.robot.max_turnrate + 1e-6);

        if !states_seen.contains(&out.state) {
            states_seen.push(out.state);
        }

        // The robot never leaves the room
        let (x, y, _) = sensor.pose();
        assert!(x >= 0.0 && x <= config.simulation.room_width);
        assert!(y >= 0.0 && y <= config.simulation.room_height);
    }

    // It actually went somewhere
    let end = sensor.pose();
    let moved = ((end.0 - start.0).powi(2) + (end.1 - start.1).powi(2)).sqrt();
    assert!(moved > 0.1, "robot barely moved: {:.3}m", moved);
}
