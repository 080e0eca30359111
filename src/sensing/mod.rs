//! Range sensing: raw frames, directional sectors, and the fused
//! clearance model.

mod distance;
mod frame;
mod sector;

pub use distance::{Clearances, DistanceModel};
pub use frame::{RangeFrame, SONAR_COUNT, SONAR_MOUNT_DEG};
pub use sector::{Sector, SectorSpec, SectorTable};
