//! Directional sectors and their sensor coverage.
//!
//! Eight fixed zones around the robot, each backed by a laser sub-arc
//! (where the laser can see) and a pair of sonars. The rear three sectors
//! are sonar-only: the laser is front-mounted and physically cannot cover
//! them.

use crate::config::SensorConfig;

/// One of the 8 fixed directional zones around the robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sector {
    Left,
    Right,
    Front,
    Back,
    LeftFront,
    RightFront,
    LeftRear,
    RightRear,
}

impl Sector {
    /// All sectors, in table order.
    pub const ALL: [Sector; 8] = [
        Sector::Left,
        Sector::Right,
        Sector::Front,
        Sector::Back,
        Sector::LeftFront,
        Sector::RightFront,
        Sector::LeftRear,
        Sector::RightRear,
    ];

    /// Index into the sector table.
    fn index(self) -> usize {
        match self {
            Sector::Left => 0,
            Sector::Right => 1,
            Sector::Front => 2,
            Sector::Back => 3,
            Sector::LeftFront => 4,
            Sector::RightFront => 5,
            Sector::LeftRear => 6,
            Sector::RightRear => 7,
        }
    }
}

/// Sensor coverage of one sector.
#[derive(Clone, Copy, Debug)]
pub struct SectorSpec {
    /// Laser sub-arc in degrees within the field of view, or `None` for
    /// the sonar-only rear sectors.
    pub arc_deg: Option<(f32, f32)>,
    /// The sonar pair watching this sector.
    pub sonar: (usize, usize),
    /// Laser-to-sonar calibration offset for this sector (meters).
    pub laser_offset: f32,
    /// Mount offset applied to the sonar pair (meters, rear only).
    pub sonar_offset: f32,
}

/// Static mapping from sector to sensor coverage, built once from the
/// sensor configuration. Laser arcs are measured from the right edge of
/// the field of view, matching beam index order.
#[derive(Clone, Debug)]
pub struct SectorTable {
    specs: [SectorSpec; 8],
}

impl SectorTable {
    pub fn new(cfg: &SensorConfig) -> Self {
        let fov = cfg.laser_fov_deg;
        // The five forward arcs split the field of view as
        // right / right-front / front / left-front / left.
        let specs = [
            // Left
            SectorSpec {
                arc_deg: Some((fov * 0.85, fov)),
                sonar: (0, 15),
                laser_offset: cfg.horz_offset,
                sonar_offset: 0.0,
            },
            // Right
            SectorSpec {
                arc_deg: Some((0.0, fov * 0.15)),
                sonar: (7, 8),
                laser_offset: cfg.horz_offset,
                sonar_offset: 0.0,
            },
            // Front
            SectorSpec {
                arc_deg: Some((fov * 0.3833, fov * 0.6167)),
                sonar: (3, 4),
                laser_offset: 0.0,
                sonar_offset: 0.0,
            },
            // Back (sonar only)
            SectorSpec {
                arc_deg: None,
                sonar: (11, 12),
                laser_offset: 0.0,
                sonar_offset: cfg.mount_offset,
            },
            // LeftFront
            SectorSpec {
                arc_deg: Some((fov * 0.6167, fov * 0.85)),
                sonar: (1, 2),
                laser_offset: cfg.diag_offset,
                sonar_offset: 0.0,
            },
            // RightFront
            SectorSpec {
                arc_deg: Some((fov * 0.15, fov * 0.3833)),
                sonar: (5, 6),
                laser_offset: cfg.diag_offset,
                sonar_offset: 0.0,
            },
            // LeftRear (sonar only)
            SectorSpec {
                arc_deg: None,
                sonar: (13, 14),
                laser_offset: 0.0,
                sonar_offset: cfg.mount_offset,
            },
            // RightRear (sonar only)
            SectorSpec {
                arc_deg: None,
                sonar: (9, 10),
                laser_offset: 0.0,
                sonar_offset: cfg.mount_offset,
            },
        ];
        Self { specs }
    }

    pub fn spec(&self, sector: Sector) -> &SectorSpec {
        &self.specs[sector.index()]
    }
}
