use crate::prelude::NumericArray;
use ndarray::arr2;
use serde::{Deserialize, Serialize};

/// Extremes pre-computed by a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalIntensityRange {
    pub min: f64,
    pub max: f64,
}

impl LocalIntensityRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Dataset-wide extremes used to normalize tile radiometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalIntensityRange {
    pub min: f64,
    pub max: f64,
}

impl GlobalIntensityRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Min-of-mins and max-of-maxes with one more tile.
    pub fn merge(self, local: LocalIntensityRange) -> Self {
        Self {
            min: self.min.min(local.min),
            max: self.max.max(local.max),
        }
    }

    /// Min on row 0, max on row 1.
    pub fn to_column(&self) -> NumericArray {
        arr2(&[[self.min], [self.max]])
    }
}

impl From<LocalIntensityRange> for GlobalIntensityRange {
    fn from(local: LocalIntensityRange) -> Self {
        Self::new(local.min, local.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_widens_both_ends() {
        let global = GlobalIntensityRange::from(LocalIntensityRange::new(10.0, 200.0))
            .merge(LocalIntensityRange::new(5.0, 150.0))
            .merge(LocalIntensityRange::new(20.0, 250.0));
        assert_eq!(global, GlobalIntensityRange::new(5.0, 250.0));
    }
}
