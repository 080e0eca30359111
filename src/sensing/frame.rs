//! Raw range data produced by the transport collaborator once per cycle.

/// Number of sonar transducers on the ring.
pub const SONAR_COUNT: usize = 16;

/// Mounting angle of each sonar relative to the robot heading (degrees,
/// counter-clockwise positive). Indices 0 and 15 both face left, 7 and 8
/// both face right; 9-14 cover the rear arc.
pub const SONAR_MOUNT_DEG: [f32; SONAR_COUNT] = [
    90.0, 50.0, 30.0, 10.0, -10.0, -30.0, -50.0, -90.0, -90.0, -130.0, -150.0, -170.0, 170.0,
    150.0, 130.0, 90.0,
];

/// One cycle's worth of raw range readings, in meters.
///
/// The frame is read-only within a cycle; noise-floor handling happens in
/// [`DistanceModel`](crate::sensing::DistanceModel), not here.
#[derive(Clone, Debug)]
pub struct RangeFrame {
    /// Sonar ranges indexed by mounting position (see [`SONAR_MOUNT_DEG`]).
    pub sonar: [f32; SONAR_COUNT],
    /// Laser beam ranges across the field of view. Index 0 is the rightmost
    /// beam; the beam count and angular span come from the sensor config.
    pub laser: Vec<f32>,
}

impl RangeFrame {
    pub fn new(sonar: [f32; SONAR_COUNT], laser: Vec<f32>) -> Self {
        Self { sonar, laser }
    }

    /// A frame reporting the same range everywhere. Handy for tests and
    /// startup before real data arrives.
    pub fn uniform(range: f32, beam_count: usize) -> Self {
        Self {
            sonar: [range; SONAR_COUNT],
            laser: vec![range; beam_count],
        }
    }
}
