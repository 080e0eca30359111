//! Fused clearance model over sonar and laser readings.
//!
//! Converts the raw [`RangeFrame`] into per-sector hull clearances: the
//! laser arc and the sonar pair of a sector are each calibrated, the
//! smaller of the two wins, and the hull shape margin is subtracted. A
//! clearance may be negative when the hull is already inside the margin.

use crate::config::SensorConfig;
use crate::sensing::{RangeFrame, Sector, SectorTable};

/// Per-cycle snapshot of all 8 sector clearances, the working set for the
/// control side. Fields are hull clearances in meters.
#[derive(Clone, Copy, Debug)]
pub struct Clearances {
    pub left: f32,
    pub right: f32,
    pub front: f32,
    pub back: f32,
    pub left_front: f32,
    pub right_front: f32,
    pub left_rear: f32,
    pub right_rear: f32,
}

impl Clearances {
    /// Clearance of one sector.
    pub fn get(&self, sector: Sector) -> f32 {
        match sector {
            Sector::Left => self.left,
            Sector::Right => self.right,
            Sector::Front => self.front,
            Sector::Back => self.back,
            Sector::LeftFront => self.left_front,
            Sector::RightFront => self.right_front,
            Sector::LeftRear => self.left_rear,
            Sector::RightRear => self.right_rear,
        }
    }

    /// Minimum clearance over the three forward sectors.
    pub fn forward_min(&self) -> f32 {
        self.left_front.min(self.front).min(self.right_front)
    }

    /// Minimum clearance over the three rearward sectors.
    pub fn rearward_min(&self) -> f32 {
        self.left_rear.min(self.back).min(self.right_rear)
    }
}

/// Calibrated minimum-clearance model over one sensor frame.
pub struct DistanceModel {
    cfg: SensorConfig,
    table: SectorTable,
    frame: RangeFrame,
    /// Degrees covered by one laser beam.
    deg_per_beam: f32,
}

impl DistanceModel {
    pub fn new(cfg: SensorConfig) -> Self {
        let table = SectorTable::new(&cfg);
        let frame = RangeFrame::uniform(cfg.max_range, cfg.laser_beam_count);
        let deg_per_beam = cfg.laser_fov_deg / cfg.laser_beam_count as f32;
        Self {
            cfg,
            table,
            frame,
            deg_per_beam,
        }
    }

    /// Install the fresh frame for this cycle.
    pub fn update(&mut self, frame: RangeFrame) {
        self.frame = frame;
    }

    /// Clamp one raw reading: below the noise floor means "no return",
    /// which is reported as the maximum range rather than a near obstacle.
    fn calibrated(&self, raw: f32) -> f32 {
        if raw < self.cfg.noise_floor {
            self.cfg.max_range
        } else {
            raw.min(self.cfg.max_range)
        }
    }

    /// Minimum group-averaged laser range over an arc, in meters.
    ///
    /// `min_deg`/`max_deg` are degree bounds within the field of view.
    /// Degenerate or out-of-range bounds are not errors: they resolve to
    /// the maximum range (fail-open, "unmeasurable" reads as "no
    /// obstacle"). Beams are averaged in fixed-size groups so a single
    /// noisy beam cannot fake a near obstacle, while the minimum over
    /// groups keeps the most conservative real clearance.
    pub fn arc_distance(&self, min_deg: f32, max_deg: f32) -> f32 {
        if min_deg >= max_deg || min_deg < 0.0 || max_deg > self.cfg.laser_fov_deg {
            return self.cfg.max_range;
        }

        let lo = (min_deg / self.deg_per_beam) as usize;
        let hi = ((max_deg / self.deg_per_beam) as usize).min(self.frame.laser.len());
        if lo >= hi {
            return self.cfg.max_range;
        }

        let group = self.cfg.beam_group_size.max(1);
        let mut min_dist = self.cfg.max_range;
        for beams in self.frame.laser[lo..hi].chunks(group) {
            let sum: f32 = beams.iter().map(|&r| self.calibrated(r)).sum();
            let average = sum / beams.len() as f32;
            if average < min_dist {
                min_dist = average;
            }
        }
        min_dist
    }

    /// Hull clearance of one sector, in meters. May be negative.
    pub fn clearance(&self, sector: Sector) -> f32 {
        let spec = self.table.spec(sector);

        let (a, b) = spec.sonar;
        let sonar = self.calibrated(self.frame.sonar[a]).min(self.calibrated(self.frame.sonar[b]))
            - spec.sonar_offset;

        let range = match spec.arc_deg {
            Some((lo, hi)) => (self.arc_distance(lo, hi) - spec.laser_offset).min(sonar),
            None => sonar,
        };

        range - self.cfg.shape_margin
    }

    /// Snapshot all 8 sectors for this cycle.
    pub fn clearances(&self) -> Clearances {
        Clearances {
            left: self.clearance(Sector::Left),
            right: self.clearance(Sector::Right),
            front: self.clearance(Sector::Front),
            back: self.clearance(Sector::Back),
            left_front: self.clearance(Sector::LeftFront),
            right_front: self.clearance(Sector::RightFront),
            left_rear: self.clearance(Sector::LeftRear),
            right_rear: self.clearance(Sector::RightRear),
        }
    }

    /// Minimum clearance over all sectors. Re-measures every sector, so
    /// this is for diagnostics, not the control path.
    pub fn min_clearance(&self) -> f32 {
        Sector::ALL
            .iter()
            .map(|&s| self.clearance(s))
            .fold(f32::INFINITY, f32::min)
    }
}
