//! Behavior state of the controller.

/// Mutually exclusive behavior for one control cycle.
///
/// Re-evaluated every cycle from the [`WallFollowing`](Self::WallFollowing)
/// default; there is no terminal state. Priority when several apply:
/// collision avoidance beats ball tracking beats wall searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BehaviorState {
    /// Steering to hold the preferred standoff from the left wall.
    #[default]
    WallFollowing,

    /// No wall within reach on the left; driving straight until one
    /// reappears.
    WallSearching,

    /// Forward clearance below the stop distance; rotating away from the
    /// followed wall.
    CollisionAvoidance,

    /// Steering authority held by the visual target tracker.
    BallTracking,
}

impl BehaviorState {
    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorState::WallFollowing => "WALL_FOLLOWING",
            BehaviorState::WallSearching => "WALL_SEARCHING",
            BehaviorState::CollisionAvoidance => "COLLISION_AVOIDANCE",
            BehaviorState::BallTracking => "BALL_TRACKING",
        }
    }
}
