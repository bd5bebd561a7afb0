pub mod descriptor;
pub mod intensity;

pub use descriptor::{common_pair_count, TileDescriptor};
pub use intensity::{GlobalIntensityRange, LocalIntensityRange};
