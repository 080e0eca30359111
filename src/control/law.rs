//! Proportional wall-following control law.

use crate::config::{RobotConfig, WallFollowConfig};
use crate::control::BehaviorState;
use crate::sensing::Clearances;

/// Proportional steering toward the preferred wall standoff, plus
/// obstacle-scaled speed.
///
/// Wall following is left-biased by convention: the law watches the left,
/// left-front and left-rear sectors.
pub struct ControlLaw {
    cruise_speed: f32,
    max_turnrate: f32,
    preferred_dist: f32,
    lost_dist: f32,
    kp: f32,
    /// Precomputed cos of the calibration angle weighting the left-front
    /// clearance.
    calib_cos: f32,
}

impl ControlLaw {
    pub fn new(robot: &RobotConfig, wall: &WallFollowConfig) -> Self {
        Self {
            cruise_speed: robot.cruise_speed,
            max_turnrate: robot.max_turnrate,
            preferred_dist: wall.preferred_dist,
            lost_dist: wall.lost_dist,
            kp: wall.kp,
            calib_cos: wall.calib_angle_rad.cos(),
        }
    }

    /// Wall-following turnrate and the behavior it implies.
    ///
    /// Positive error (too far from the wall) turns toward it, negative
    /// turns away. When the left, left-front and left-rear sectors are all
    /// beyond the lost threshold there is no wall to follow: the
    /// proportional result is discarded, the robot goes straight and the
    /// state demotes to [`BehaviorState::WallSearching`].
    pub fn turnrate(&self, d: &Clearances) -> (f32, BehaviorState) {
        let error = self.calib_cos * d.left_front - self.preferred_dist;
        let turnrate = (self.kp * error)
            .atan()
            .clamp(-self.max_turnrate, self.max_turnrate);

        if d.left >= self.lost_dist && d.left_front >= self.lost_dist && d.left_rear >= self.lost_dist
        {
            (0.0, BehaviorState::WallSearching)
        } else {
            (turnrate, BehaviorState::WallFollowing)
        }
    }

    /// Forward speed scaled by obstacle proximity.
    ///
    /// Below the preferred distance the speed shrinks proportionally with
    /// the forward minimum (and goes negative once the hull is inside the
    /// margin, backing the robot out). If front and rear are both inside
    /// the margin and the rear is the tighter of the two, the ratio
    /// `front / (front + rear)` is used instead so the robot does not back
    /// into the closer rear obstacle.
    pub fn speed(&self, d: &Clearances) -> f32 {
        let front = d.forward_min();
        let rear = d.rearward_min();

        if front >= self.preferred_dist {
            return self.cruise_speed;
        }

        let mut speed = self.cruise_speed * (front / self.preferred_dist);
        if front < 0.0 && rear < 0.0 && rear < front {
            speed = self.cruise_speed * front / (front + rear);
        }
        speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn law() -> ControlLaw {
        ControlLaw::new(&RobotConfig::default(), &WallFollowConfig::default())
    }

    fn open(clearance: f32) -> Clearances {
        Clearances {
            left: clearance,
            right: clearance,
            front: clearance,
            back: clearance,
            left_front: clearance,
            right_front: clearance,
            left_rear: clearance,
            right_rear: clearance,
        }
    }

    #[test]
    fn test_turnrate_is_clamped() {
        let law = law();
        let max = RobotConfig::default().max_turnrate;

        for lf in [-1.0, 0.0, 0.3, 0.7, 1.2, 4.9] {
            let mut d = open(1.0);
            d.left_front = lf;
            let (tr, _) = law.turnrate(&d);
            assert!(tr >= -max && tr <= max, "left_front={} gave {}", lf, tr);
        }
    }

    #[test]
    fn test_zero_error_standoff() {
        let law = law();
        let wall = WallFollowConfig::default();

        // Weighted left-front clearance exactly at the preferred standoff
        let mut d = open(1.0);
        d.left_front = wall.preferred_dist / wall.calib_angle_rad.cos();
        let (tr, state) = law.turnrate(&d);
        assert!(tr.abs() < 1e-5);
        assert_eq!(state, BehaviorState::WallFollowing);
    }

    #[test]
    fn test_turn_direction_tracks_error_sign() {
        let law = law();

        // Too far from the wall: steer left (positive), toward it
        let mut d = open(1.0);
        d.left_front = 1.2;
        assert!(law.turnrate(&d).0 > 0.0);

        // Too close: steer right (negative), away from it
        d.left_front = 0.3;
        assert!(law.turnrate(&d).0 < 0.0);
    }

    #[test]
    fn test_wall_lost_forces_straight() {
        let law = law();
        let lost = WallFollowConfig::default().lost_dist;

        let mut d = open(lost + 0.2);
        let (tr, state) = law.turnrate(&d);
        assert_eq!(tr, 0.0);
        assert_eq!(state, BehaviorState::WallSearching);

        // One sector still seeing the wall keeps the law active
        d.left_rear = lost - 0.1;
        let (_, state) = law.turnrate(&d);
        assert_eq!(state, BehaviorState::WallFollowing);
    }

    #[test]
    fn test_speed_cruise_in_open_space() {
        let law = law();
        assert!((law.speed(&open(2.0)) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_speed_scales_with_forward_clearance() {
        let law = law();
        let cruise = RobotConfig::default().cruise_speed;
        let preferred = WallFollowConfig::default().preferred_dist;

        // Front tight, rear open: forward-only ratio
        let mut d = open(2.0);
        d.front = 0.1;
        let speed = law.speed(&d);
        assert!((speed - cruise * 0.1 / preferred).abs() < 1e-6);
        assert!(speed > 0.0 && speed < cruise);
    }

    #[test]
    fn test_speed_rear_biased_when_rear_tighter() {
        let law = law();
        let cruise = RobotConfig::default().cruise_speed;

        // Both inside the margin, rear more constrained
        let mut d = open(1.0);
        d.front = -0.1;
        d.back = -0.3;
        let speed = law.speed(&d);
        let expected = cruise * (-0.1) / (-0.1 + -0.3);
        assert!((speed - expected).abs() < 1e-6);
        assert!(speed > 0.0);
    }

    #[test]
    fn test_speed_forward_ratio_when_front_tighter() {
        let law = law();
        let cruise = RobotConfig::default().cruise_speed;
        let preferred = WallFollowConfig::default().preferred_dist;

        // Both negative but front is the binding constraint: keep the
        // forward-only ratio (negative speed backs away from the front)
        let mut d = open(1.0);
        d.front = -0.3;
        d.back = -0.1;
        let speed = law.speed(&d);
        assert!((speed - cruise * (-0.3) / preferred).abs() < 1e-6);
        assert!(speed < 0.0);
    }
}
