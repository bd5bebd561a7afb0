use crate::io::read_array;
use crate::math::MatrixHelper;
use crate::prelude::{AggregateError, AggregateResult, NumericArray};
use std::path::PathBuf;

/// Combines the local pointing corrections of one pair into a global one.
///
/// `locations` holds one `<tile>/pair_<i>` entry per tile, in tile order.
pub trait PointingEstimator: Send + Sync {
    fn global_from_local(
        &self,
        locations: &[PathBuf],
        pair: usize,
    ) -> AggregateResult<NumericArray>;
}

impl<F> PointingEstimator for F
where
    F: Fn(&[PathBuf], usize) -> AggregateResult<NumericArray> + Send + Sync,
{
    fn global_from_local(
        &self,
        locations: &[PathBuf],
        pair: usize,
    ) -> AggregateResult<NumericArray> {
        self(locations, pair)
    }
}

/// Averages equally shaped local corrections element by element.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanCorrectionEstimator;

impl PointingEstimator for MeanCorrectionEstimator {
    fn global_from_local(
        &self,
        locations: &[PathBuf],
        pair: usize,
    ) -> AggregateResult<NumericArray> {
        let locals = locations
            .iter()
            .map(read_array)
            .collect::<AggregateResult<Vec<_>>>()?;

        match MatrixHelper::elementwise_mean(&locals) {
            Ok(Some(mean)) => Ok(mean),
            Ok(None) => Err(AggregateError::Estimator(format!(
                "no local corrections for pair {}",
                pair
            ))),
            Err(idx) => Err(AggregateError::MalformedInput {
                path: locations[idx].clone(),
                reason: format!(
                    "shape {:?} differs from {:?}",
                    locals[idx].shape(),
                    locals[0].shape()
                ),
            }),
        }
    }
}
