//! Global aggregation stage for the multi-tile stereo pipeline.
//!
//! Per-tile stages leave small local results on disk (pointing corrections per
//! pair, intensity extremes per tile). The aggregators here reduce them to the
//! dataset-wide values consumed by rectification and rendering.

pub mod aggregation;
pub mod io;
pub mod math;
pub mod prelude;
pub mod telemetry;
pub mod tiles;

pub use aggregation::{
    IntensityAggregator, MeanCorrectionEstimator, PointingAggregator, PointingEstimator,
    PointingSummary,
};
pub use prelude::{AggregateError, AggregateResult, AggregatorConfig, ErrorKind, NumericArray};
pub use tiles::{GlobalIntensityRange, LocalIntensityRange, TileDescriptor};
