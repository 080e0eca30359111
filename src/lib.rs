//! # BhittiNav
//!
//! Reactive wall-following navigation controller for differential-drive
//! robots, fusing a 16-element sonar ring with a wide-field laser ranger.
//!
//! ## Pipeline
//!
//! Every control cycle runs the same fixed pipeline:
//!
//! 1. A fresh [`RangeFrame`] arrives from the transport (blocking read
//!    defines the cycle cadence)
//! 2. [`DistanceModel`] fuses sonar and laser into per-sector hull
//!    clearances
//! 3. Intent turnrate: the visual [`TargetOverride`] if it holds steering
//!    authority, otherwise the proportional [`ControlLaw`]
//! 4. [`SafetyGovernor`] may replace the turnrate with a fixed escape turn
//! 5. Speed scales with forward clearance
//! 6. The final turnrate is the mean of the override stage and a
//!    rotate-safety signal, smoothing the trajectory
//! 7. One [`MotionCommand`] goes out to the transport
//!
//! ## Quick Start
//!
//! ```rust
//! use bhitti_nav::{Controller, NavConfig, SimWorld};
//!
//! let config = NavConfig::default();
//! let mut controller = Controller::new(&config, None);
//!
//! let world = SimWorld::new(config.simulation.clone(), config.sensors.clone());
//! let (mut sensor, mut motor) = world.split();
//!
//! // controller.run(&mut sensor, &mut motor) drives the loop; or step
//! // frames through by hand:
//! use bhitti_nav::transport::RangeSource;
//! let frame = sensor.read().unwrap();
//! let out = controller.step(frame, std::time::Instant::now());
//! println!("{} -> speed {:.2}", out.state.as_str(), out.command.speed);
//! ```
//!
//! ## Coordinate Conventions
//!
//! Angles are radians, counter-clockwise positive (left turn positive).
//! Clearances are hull clearances in meters and may be negative when the
//! hull is already inside the safety margin.

pub mod config;
pub mod control;
pub mod controller;
pub mod error;
pub mod sensing;
pub mod sim;
pub mod transport;

pub use config::NavConfig;
pub use control::{BehaviorState, ControlLaw, SafetyGovernor, TargetObservation, TargetOverride, TargetTracker};
pub use controller::{Controller, CycleOutput, MotionCommand};
pub use error::{NavError, Result};
pub use sensing::{Clearances, DistanceModel, RangeFrame, Sector};
pub use sim::SimWorld;
