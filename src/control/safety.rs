//! Collision-avoidance override and rotation safety veto.

use crate::config::{RobotConfig, WallFollowConfig};
use crate::control::BehaviorState;
use crate::sensing::Clearances;

/// Safety layer over the control law's turnrate.
///
/// `collision_avoid` has the highest priority in the pipeline and replaces
/// the incoming turnrate unconditionally when triggered. `check_rotate` is
/// a softer veto: it only ever suppresses rotation, never reverses it.
pub struct SafetyGovernor {
    stop_dist: f32,
    escape_turnrate: f32,
}

impl SafetyGovernor {
    pub fn new(robot: &RobotConfig, wall: &WallFollowConfig) -> Self {
        Self {
            stop_dist: wall.stop_dist,
            escape_turnrate: robot.escape_turnrate,
        }
    }

    /// Override turnrate and state when a forward safety proxy drops below
    /// the stop distance.
    ///
    /// The proxies blend the front sector with each diagonal so an
    /// obstacle clipping either shoulder still registers. The escape turn
    /// has a fixed negative sign: away from the left wall being followed.
    pub fn collision_avoid(
        &self,
        turnrate: f32,
        state: BehaviorState,
        d: &Clearances,
    ) -> (f32, BehaviorState) {
        let left_proxy = (d.front + d.left_front) / 2.0;
        let right_proxy = (d.front + d.right_front) / 2.0;

        if left_proxy < self.stop_dist || right_proxy < self.stop_dist {
            (-self.escape_turnrate, BehaviorState::CollisionAvoidance)
        } else {
            (turnrate, state)
        }
    }

    /// Zero a turnrate whose swing would drag the hull into a known
    /// obstacle at the trailing corner.
    ///
    /// Turning right (negative) swings the tail left: vetoed when the
    /// left-rear or right clearance is already negative. Turning left
    /// (non-negative) is the mirror case. The sign is never flipped, only
    /// suppressed.
    pub fn check_rotate(&self, turnrate: f32, d: &Clearances) -> f32 {
        if turnrate < 0.0 {
            if d.left_rear < 0.0 || d.right < 0.0 {
                return 0.0;
            }
        } else if d.right_rear < 0.0 || d.left < 0.0 {
            return 0.0;
        }
        turnrate
    }
}
