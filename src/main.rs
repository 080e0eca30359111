//! BhittiNav - reactive wall-following controller
//!
//! Runs the controller against the built-in simulated room transport.
//! Pass a TOML config path as the first argument, or rely on
//! `bhitti.toml` / defaults.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use bhitti_nav::config::NavConfig;
use bhitti_nav::controller::Controller;
use bhitti_nav::error::Result;
use bhitti_nav::sim::SimWorld;
use bhitti_nav::transport::{MotionSink, RangeSource};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bhitti_nav=info".parse().unwrap()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config = if args.len() > 1 && !args[1].starts_with("--") {
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        NavConfig::load(config_path)?
    } else if Path::new("bhitti.toml").exists() {
        info!("Loading configuration from bhitti.toml");
        NavConfig::load(Path::new("bhitti.toml"))?
    } else {
        info!("Using default configuration");
        NavConfig::default()
    };

    // Optional cycle limit: --cycles N (default: run until stopped)
    let max_cycles: Option<u64> = args
        .iter()
        .position(|a| a == "--cycles")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok());

    info!("BhittiNav v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Wall standoff: {:.2}m (stop {:.2}m, lost {:.2}m), cruise {:.2}m/s",
        config.wall_follow.preferred_dist,
        config.wall_follow.stop_dist,
        config.wall_follow.lost_dist,
        config.robot.cruise_speed,
    );
    info!(
        "Simulated room: {:.1}x{:.1}m, start ({:.1}, {:.1}), {:.0}Hz",
        config.simulation.room_width,
        config.simulation.room_height,
        config.simulation.start_x,
        config.simulation.start_y,
        1.0 / config.simulation.cycle_period_s,
    );

    let world = SimWorld::new(config.simulation.clone(), config.sensors.clone());
    let (mut sensor, mut motor) = world.split();

    // No vision collaborator in the simulated setup
    let mut controller = Controller::new(&config, None);

    match max_cycles {
        Some(limit) => run_bounded(&mut controller, &mut sensor, &mut motor, limit),
        None => controller.run(&mut sensor, &mut motor),
    }
}

/// Drive a fixed number of cycles with periodic status logging.
fn run_bounded(
    controller: &mut Controller,
    sensor: &mut bhitti_nav::sim::SimSensor,
    motor: &mut bhitti_nav::sim::SimMotor,
    cycles: u64,
) -> Result<()> {
    let started = Instant::now();

    for cycle in 0..cycles {
        let frame = sensor.read()?;
        let output = controller.step(frame, Instant::now());
        motor.send(&output.command)?;

        if cycle % 50 == 0 {
            let (x, y, theta) = sensor.pose();
            info!(
                "cycle {}: {} pose ({:.2}, {:.2}, {:.0}°) speed {:.2} turnrate {:.2} min clearance {:.2}",
                cycle,
                output.state.as_str(),
                x,
                y,
                theta.to_degrees(),
                output.command.speed,
                output.command.turnrate,
                controller.min_clearance(),
            );
        }
    }

    let elapsed = started.elapsed();
    info!(
        "Finished {} cycles in {:?} ({:.1} cycles/s)",
        cycles,
        elapsed,
        cycles as f32 / elapsed.as_secs_f32().max(1e-3),
    );
    Ok(())
}
