//! Simulated room transport for hardware-free runs.
//!
//! A rectangular room with ray-cast ranging: the laser fan and the sonar
//! ring are cast from the integrated robot pose against the four walls.
//! The robot pose advances each cycle by differential-drive kinematics
//! from the last motion command, clamped so the hull stays inside the
//! room. Range noise is seeded and reproducible.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{SensorConfig, SimConfig};
use crate::controller::MotionCommand;
use crate::error::Result;
use crate::sensing::{RangeFrame, SONAR_COUNT, SONAR_MOUNT_DEG};
use crate::transport::{MotionSink, RangeSource};

/// Hull radius used for wall-contact clamping (meters).
const HULL_RADIUS: f32 = 0.3;

/// Rectangular-room world shared by the sensor and motor handles.
pub struct SimWorld {
    sim: SimConfig,
    sensors: SensorConfig,
    /// Robot pose: x, y (meters), theta (radians, CCW from +x).
    pub x: f32,
    pub y: f32,
    pub theta: f32,
    command: MotionCommand,
    rng: StdRng,
}

impl SimWorld {
    pub fn new(sim: SimConfig, sensors: SensorConfig) -> Self {
        let x = sim.start_x;
        let y = sim.start_y;
        let theta = sim.start_theta;
        let rng = StdRng::seed_from_u64(sim.seed);
        Self {
            sim,
            sensors,
            x,
            y,
            theta,
            command: MotionCommand {
                speed: 0.0,
                turnrate: 0.0,
            },
            rng,
        }
    }

    /// Split into the two transport handles the controller expects.
    pub fn split(self) -> (SimSensor, SimMotor) {
        let world = Rc::new(RefCell::new(self));
        (
            SimSensor {
                world: Rc::clone(&world),
            },
            SimMotor { world },
        )
    }

    /// Distance from the robot to the nearest wall along `angle`
    /// (absolute, radians), capped at the sensor maximum range.
    fn ray(&self, angle: f32) -> f32 {
        let dx = angle.cos();
        let dy = angle.sin();
        let mut t = f32::INFINITY;

        if dx > 1e-6 {
            t = t.min((self.sim.room_width - self.x) / dx);
        } else if dx < -1e-6 {
            t = t.min(-self.x / dx);
        }
        if dy > 1e-6 {
            t = t.min((self.sim.room_height - self.y) / dy);
        } else if dy < -1e-6 {
            t = t.min(-self.y / dy);
        }

        t.max(0.0).min(self.sensors.max_range)
    }

    fn noisy(&mut self, range: f32) -> f32 {
        if self.sim.noise_std <= 0.0 {
            return range;
        }
        let jitter = (self.rng.gen::<f32>() - 0.5) * 2.0 * self.sim.noise_std;
        (range + jitter).max(0.0)
    }

    /// Integrate the held command over one cycle and render a frame.
    fn step_and_sense(&mut self) -> RangeFrame {
        let dt = self.sim.cycle_period_s;

        self.theta += self.command.turnrate * dt;
        let nx = self.x + self.command.speed * self.theta.cos() * dt;
        let ny = self.y + self.command.speed * self.theta.sin() * dt;
        // Wall contact stops the hull instead of passing through
        self.x = nx.clamp(HULL_RADIUS, self.sim.room_width - HULL_RADIUS);
        self.y = ny.clamp(HULL_RADIUS, self.sim.room_height - HULL_RADIUS);

        let fov = self.sensors.laser_fov_deg.to_radians();
        let beam_count = self.sensors.laser_beam_count;
        let step = fov / beam_count as f32;

        let mut laser = Vec::with_capacity(beam_count);
        for i in 0..beam_count {
            // Beam 0 is the rightmost edge of the fan
            let relative = -fov / 2.0 + (i as f32 + 0.5) * step;
            let range = self.ray(self.theta + relative);
            let range = self.noisy(range);
            laser.push(range);
        }

        let mut sonar = [0.0f32; SONAR_COUNT];
        for (i, mount_deg) in SONAR_MOUNT_DEG.iter().enumerate() {
            let range = self.ray(self.theta + mount_deg.to_radians());
            sonar[i] = self.noisy(range);
        }

        RangeFrame::new(sonar, laser)
    }
}

/// Range side of the simulated transport.
pub struct SimSensor {
    world: Rc<RefCell<SimWorld>>,
}

impl SimSensor {
    /// Current robot pose, for status logging.
    pub fn pose(&self) -> (f32, f32, f32) {
        let w = self.world.borrow();
        (w.x, w.y, w.theta)
    }
}

impl RangeSource for SimSensor {
    fn read(&mut self) -> Result<RangeFrame> {
        let (frame, pace) = {
            let mut world = self.world.borrow_mut();
            let frame = world.step_and_sense();
            let pace = if world.sim.real_time {
                Some(Duration::from_secs_f32(world.sim.cycle_period_s))
            } else {
                None
            };
            (frame, pace)
        };
        if let Some(period) = pace {
            std::thread::sleep(period);
        }
        Ok(frame)
    }
}

/// Motion side of the simulated transport.
pub struct SimMotor {
    world: Rc<RefCell<SimWorld>>,
}

impl MotionSink for SimMotor {
    fn send(&mut self, command: &MotionCommand) -> Result<()> {
        self.world.borrow_mut().command = *command;
        Ok(())
    }
}
