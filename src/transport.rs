//! Collaborator seams for the sensor/actuator transport.
//!
//! The controller never talks to hardware directly; it owns trait objects
//! injected at construction. Transport failure is fatal by design: no
//! retry, no degraded mode, the error propagates and ends the loop.

use crate::controller::MotionCommand;
use crate::error::Result;
use crate::sensing::RangeFrame;

/// Source of range frames. `read` blocks until a fresh frame is available;
/// that blocking wait defines the control cycle.
pub trait RangeSource {
    fn read(&mut self) -> Result<RangeFrame>;
}

/// Sink for motion commands, one per cycle.
pub trait MotionSink {
    fn send(&mut self, command: &MotionCommand) -> Result<()>;
}
