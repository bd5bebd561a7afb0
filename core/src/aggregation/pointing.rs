use crate::aggregation::estimator::PointingEstimator;
use crate::io::write_array;
use crate::prelude::{AggregateError, AggregateResult, AggregatorConfig};
use crate::telemetry::{AggregationMetrics, LogManager};
use crate::tiles::{common_pair_count, TileDescriptor};
use std::path::PathBuf;
use std::sync::Arc;

/// Global pointing outputs, in pair order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointingSummary {
    pub outputs: Vec<PathBuf>,
}

/// Reduces per-tile pointing corrections to one correction per stereo pair.
///
/// Each pair reads only its own `pair_<i>` inputs and writes only its own
/// output, so `aggregate_pair` may be called for different pairs from
/// different threads.
pub struct PointingAggregator<E> {
    config: AggregatorConfig,
    estimator: E,
    logger: LogManager,
    metrics: Arc<AggregationMetrics>,
}

impl<E: PointingEstimator> PointingAggregator<E> {
    pub fn new(config: AggregatorConfig, estimator: E) -> Self {
        Self {
            config,
            estimator,
            logger: LogManager::new("pointing"),
            metrics: Arc::new(AggregationMetrics::new()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<AggregationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<AggregationMetrics> {
        &self.metrics
    }

    /// Writes `global_pointing_pair_<i>.txt` for every pair 1..=N.
    ///
    /// Stops at the first failing pair; outputs of pairs already done stay.
    pub fn aggregate(&self, tiles: &[TileDescriptor]) -> AggregateResult<PointingSummary> {
        let pairs = common_pair_count(tiles).map_err(|err| {
            self.fail(&err);
            err
        })?;
        let outputs = (1..=pairs)
            .map(|pair| self.aggregate_pair(tiles, pair))
            .collect::<AggregateResult<Vec<_>>>()?;
        self.logger.record(&format!(
            "{} pairs aggregated over {} tiles",
            pairs,
            tiles.len()
        ));
        Ok(PointingSummary { outputs })
    }

    /// Aggregates a single 1-indexed pair and returns the written path.
    pub fn aggregate_pair(
        &self,
        tiles: &[TileDescriptor],
        pair: usize,
    ) -> AggregateResult<PathBuf> {
        self.run_pair(tiles, pair).map_err(|err| {
            let err = err.for_pair(pair);
            self.fail(&err);
            err
        })
    }

    fn run_pair(&self, tiles: &[TileDescriptor], pair: usize) -> AggregateResult<PathBuf> {
        let count = common_pair_count(tiles)?;
        if pair == 0 || pair > count {
            return Err(AggregateError::PairOutOfRange { pair, count });
        }

        let locations = tiles
            .iter()
            .map(|tile| {
                let location = tile.pair_location(pair);
                if location.exists() {
                    Ok(location)
                } else {
                    Err(AggregateError::MissingInput {
                        tile: tile.identifier(),
                        path: location,
                    })
                }
            })
            .collect::<AggregateResult<Vec<_>>>()?;
        self.logger
            .detail(&format!("pair {} combines {} tiles", pair, locations.len()));

        let global = self.estimator.global_from_local(&locations, pair)?;
        if global.is_empty() {
            return Err(AggregateError::Estimator(format!(
                "empty {}x{} correction for pair {}",
                global.nrows(),
                global.ncols(),
                pair
            )));
        }
        self.metrics.record_inputs(locations.len());

        let output = self.config.pointing_output(pair);
        write_array(&output, &global)?;
        self.metrics.record_output();
        self.logger.record(&format!(
            "pair {} -> {} ({}x{})",
            pair,
            output.display(),
            global.nrows(),
            global.ncols()
        ));
        Ok(output)
    }

    fn fail(&self, err: &AggregateError) {
        self.metrics.record_failure();
        self.logger.failure(&err.to_string());
    }
}
