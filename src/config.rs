//! Configuration loading for BhittiNav

use crate::error::{NavError, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub robot: RobotConfig,
    #[serde(default)]
    pub wall_follow: WallFollowConfig,
    #[serde(default)]
    pub sensors: SensorConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub simulation: SimConfig,
}

/// Robot motion limits
#[derive(Clone, Debug, Deserialize)]
pub struct RobotConfig {
    /// Nominal cruise speed in m/s (default: 0.3)
    #[serde(default = "default_cruise_speed")]
    pub cruise_speed: f32,

    /// Maximum wall-following turnrate in rad/s (default: ~40°/s).
    /// Low values give a smoother trajectory but restrict cornering.
    #[serde(default = "default_max_turnrate")]
    pub max_turnrate: f32,

    /// Fixed rotation speed for the collision escape turn in rad/s
    /// (default: ~30°/s). Low values increase maneuverability in narrow
    /// edges, high values can leave the robot stuck.
    #[serde(default = "default_escape_turnrate")]
    pub escape_turnrate: f32,
}

/// Wall-following control parameters
#[derive(Clone, Debug, Deserialize)]
pub struct WallFollowConfig {
    /// Preferred standoff distance from the followed wall (meters)
    #[serde(default = "default_preferred_dist")]
    pub preferred_dist: f32,

    /// Forward clearance below which collision avoidance triggers (meters)
    #[serde(default = "default_stop_dist")]
    pub stop_dist: f32,

    /// Clearance beyond which the wall is considered lost (meters)
    #[serde(default = "default_lost_dist")]
    pub lost_dist: f32,

    /// Proportional gain of the wall-following law (rad per meter of error)
    #[serde(default = "default_kp")]
    pub kp: f32,

    /// Calibration angle weighting the left-front clearance (radians)
    #[serde(default = "default_calib_angle")]
    pub calib_angle_rad: f32,
}

/// Range sensor geometry and calibration
#[derive(Clone, Debug, Deserialize)]
pub struct SensorConfig {
    /// Maximum usable range of the laser, also the fail-open value (meters)
    #[serde(default = "default_max_range")]
    pub max_range: f32,

    /// Readings below this are sensor noise, not obstacles (meters)
    #[serde(default = "default_noise_floor")]
    pub noise_floor: f32,

    /// Distance from the sensor ring to the robot hull (meters).
    /// Subtracted from every sector so clearances are hull clearances.
    #[serde(default = "default_shape_margin")]
    pub shape_margin: f32,

    /// Laser-to-sonar offset for the diagonal sectors (meters)
    #[serde(default = "default_diag_offset")]
    pub diag_offset: f32,

    /// Laser-to-sonar offset for the side sectors (meters)
    #[serde(default = "default_horz_offset")]
    pub horz_offset: f32,

    /// Rear sonar mount offset (meters)
    #[serde(default = "default_mount_offset")]
    pub mount_offset: f32,

    /// Laser field of view (degrees)
    #[serde(default = "default_laser_fov")]
    pub laser_fov_deg: f32,

    /// Number of beams across the laser field of view
    #[serde(default = "default_beam_count")]
    pub laser_beam_count: usize,

    /// Beams averaged per group when scanning an arc.
    /// Rejects single-beam noise spikes while keeping the minimum.
    #[serde(default = "default_beam_group_size")]
    pub beam_group_size: usize,
}

/// Visual target tracking parameters
#[derive(Clone, Debug, Deserialize)]
pub struct TrackingConfig {
    /// Interval between tracker polls in seconds (vision latency is far
    /// above the control period, so most cycles reuse the held value)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_s: f32,

    /// Seconds without a detection before steering authority is released
    #[serde(default = "default_tracking_timeout")]
    pub timeout_s: f32,
}

/// Simulated room transport parameters
#[derive(Clone, Debug, Deserialize)]
pub struct SimConfig {
    /// Room width in meters
    #[serde(default = "default_room_width")]
    pub room_width: f32,

    /// Room height in meters
    #[serde(default = "default_room_height")]
    pub room_height: f32,

    /// Start pose: x, y (meters), theta (radians)
    #[serde(default = "default_start_x")]
    pub start_x: f32,
    #[serde(default = "default_start_y")]
    pub start_y: f32,
    #[serde(default)]
    pub start_theta: f32,

    /// Control cycle period in seconds (default: 0.1 = 10Hz)
    #[serde(default = "default_cycle_period")]
    pub cycle_period_s: f32,

    /// Range noise standard deviation in meters (0 = noise-free)
    #[serde(default)]
    pub noise_std: f32,

    /// RNG seed for reproducible noise
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Sleep each cycle to run at wall-clock rate
    #[serde(default)]
    pub real_time: bool,
}

// Default value functions
fn default_cruise_speed() -> f32 {
    0.3
}
fn default_max_turnrate() -> f32 {
    40.0_f32.to_radians()
}
fn default_escape_turnrate() -> f32 {
    30.0_f32.to_radians()
}
fn default_preferred_dist() -> f32 {
    0.5
}
fn default_stop_dist() -> f32 {
    0.2
}
fn default_lost_dist() -> f32 {
    1.5
}
fn default_kp() -> f32 {
    17.5
}
fn default_calib_angle() -> f32 {
    std::f32::consts::FRAC_PI_4
}
fn default_max_range() -> f32 {
    5.0
}
fn default_noise_floor() -> f32 {
    0.02
}
fn default_shape_margin() -> f32 {
    0.3
}
fn default_diag_offset() -> f32 {
    0.1
}
fn default_horz_offset() -> f32 {
    0.15
}
fn default_mount_offset() -> f32 {
    0.1
}
fn default_laser_fov() -> f32 {
    240.0
}
fn default_beam_count() -> usize {
    682
}
fn default_beam_group_size() -> usize {
    3
}
fn default_poll_interval() -> f32 {
    0.2
}
fn default_tracking_timeout() -> f32 {
    1.5
}
fn default_room_width() -> f32 {
    6.0
}
fn default_room_height() -> f32 {
    4.0
}
fn default_start_x() -> f32 {
    3.0
}
fn default_start_y() -> f32 {
    2.0
}
fn default_cycle_period() -> f32 {
    0.1
}
fn default_seed() -> u64 {
    42
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            cruise_speed: default_cruise_speed(),
            max_turnrate: default_max_turnrate(),
            escape_turnrate: default_escape_turnrate(),
        }
    }
}

impl Default for WallFollowConfig {
    fn default() -> Self {
        Self {
            preferred_dist: default_preferred_dist(),
            stop_dist: default_stop_dist(),
            lost_dist: default_lost_dist(),
            kp: default_kp(),
            calib_angle_rad: default_calib_angle(),
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_range: default_max_range(),
            noise_floor: default_noise_floor(),
            shape_margin: default_shape_margin(),
            diag_offset: default_diag_offset(),
            horz_offset: default_horz_offset(),
            mount_offset: default_mount_offset(),
            laser_fov_deg: default_laser_fov(),
            laser_beam_count: default_beam_count(),
            beam_group_size: default_beam_group_size(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            poll_interval_s: default_poll_interval(),
            timeout_s: default_tracking_timeout(),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            room_width: default_room_width(),
            room_height: default_room_height(),
            start_x: default_start_x(),
            start_y: default_start_y(),
            start_theta: 0.0,
            cycle_period_s: default_cycle_period(),
            noise_std: 0.0,
            seed: default_seed(),
            real_time: false,
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            robot: RobotConfig::default(),
            wall_follow: WallFollowConfig::default(),
            sensors: SensorConfig::default(),
            tracking: TrackingConfig::default(),
            simulation: SimConfig::default(),
        }
    }
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NavError::Config(format!("Failed to read config file: {}", e)))?;
        let config: NavConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
