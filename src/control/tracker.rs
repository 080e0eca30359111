//! Visual target tracking override.
//!
//! The vision collaborator runs far slower than the control cycle, so the
//! override holds its last turnrate between polls, bridges brief occlusion
//! by dead-reckoning, and releases steering authority back to the wall
//! follower once the timeout elapses with no detection.

use std::time::{Duration, Instant};

/// A detected target as reported by the vision collaborator.
#[derive(Clone, Copy, Debug)]
pub struct TargetObservation {
    /// Signed bearing to the target (radians, left positive).
    pub bearing: f32,
    /// Distance to the target (meters).
    pub distance: f32,
}

/// Vision collaborator seam. "No detection" is a valid answer, not an
/// error.
pub trait TargetTracker {
    fn poll(&mut self) -> Option<TargetObservation>;
}

/// Rate-limited wrapper turning tracker detections into a turnrate
/// override.
pub struct TargetOverride {
    tracker: Box<dyn TargetTracker>,
    poll_interval: Duration,
    timeout: Duration,
    last_poll: Option<Instant>,
    last_found: Option<Instant>,
    /// Currently held override, if steering authority is claimed.
    held: Option<f32>,
    /// Last two held turnrates, for dead-reckoning through occlusion.
    last_value: f32,
    prev_value: f32,
}

impl TargetOverride {
    pub fn new(tracker: Box<dyn TargetTracker>, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            tracker,
            poll_interval,
            timeout,
            last_poll: None,
            last_found: None,
            held: None,
            last_value: 0.0,
            prev_value: 0.0,
        }
    }

    /// The override turnrate for this cycle, or `None` when the wall
    /// follower has authority.
    ///
    /// Cycles inside the poll interval reuse the held value. On a poll: a
    /// detection takes the bearing directly; a miss within the timeout
    /// window continues the last turnrate trend (`last + (last - prev)`);
    /// a miss past the timeout releases the override.
    pub fn turnrate(&mut self, now: Instant) -> Option<f32> {
        if let Some(last_poll) = self.last_poll {
            if now.duration_since(last_poll) < self.poll_interval {
                return self.held;
            }
        }
        self.last_poll = Some(now);

        match self.tracker.poll() {
            Some(obs) => {
                self.last_found = Some(now);
                self.hold(obs.bearing);
            }
            None => {
                let in_window = match self.last_found {
                    Some(found) => now.duration_since(found) <= self.timeout,
                    None => false,
                };
                if in_window && self.held.is_some() {
                    // Bridge the occlusion with the last turnrate delta
                    let extrapolated = self.last_value + (self.last_value - self.prev_value);
                    self.hold(extrapolated);
                } else {
                    self.release();
                }
            }
        }

        self.held
    }

    fn hold(&mut self, turnrate: f32) {
        self.prev_value = self.last_value;
        self.last_value = turnrate;
        self.held = Some(turnrate);
    }

    fn release(&mut self) {
        self.held = None;
        self.last_found = None;
        self.last_value = 0.0;
        self.prev_value = 0.0;
    }
}
