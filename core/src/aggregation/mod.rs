pub mod estimator;
pub mod intensity;
pub mod pointing;

pub use estimator::{MeanCorrectionEstimator, PointingEstimator};
pub use intensity::IntensityAggregator;
pub use pointing::{PointingAggregator, PointingSummary};
