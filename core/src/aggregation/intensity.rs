use crate::io::{read_array, write_array};
use crate::math::StatsHelper;
use crate::prelude::{AggregateError, AggregateResult, AggregatorConfig, NumericArray};
use crate::telemetry::{AggregationMetrics, LogManager};
use crate::tiles::{GlobalIntensityRange, LocalIntensityRange, TileDescriptor};
use std::path::Path;
use std::sync::Arc;

/// Combines per-tile intensity extremes into the dataset-wide range.
pub struct IntensityAggregator {
    config: AggregatorConfig,
    logger: LogManager,
    metrics: Arc<AggregationMetrics>,
}

impl IntensityAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self {
            config,
            logger: LogManager::new("intensity"),
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

    /// Reads every tile, reduces, then writes `global_minmax.txt`.
    ///
    /// Nothing is written unless every tile contributed a valid range.
    pub fn aggregate(&self, tiles: &[TileDescriptor]) -> AggregateResult<GlobalIntensityRange> {
        self.run(tiles).map_err(|err| {
            self.metrics.record_failure();
            self.logger.failure(&err.to_string());
            err
        })
    }

    fn run(&self, tiles: &[TileDescriptor]) -> AggregateResult<GlobalIntensityRange> {
        let locals = tiles
            .iter()
            .map(|tile| self.read_local(tile))
            .collect::<AggregateResult<Vec<_>>>()?;
        self.metrics.record_inputs(locals.len());

        let global = Self::reduce(locals)?;
        let output = self.config.intensity_output();
        write_array(&output, &global.to_column())?;
        self.metrics.record_output();
        self.logger.record(&format!(
            "global range [{}, {}] from {} tiles -> {}",
            global.min,
            global.max,
            tiles.len(),
            output.display()
        ));
        Ok(global)
    }

    /// Reads `<tile>/local_minmax.txt`: two values, min first.
    pub fn read_local(&self, tile: &TileDescriptor) -> AggregateResult<LocalIntensityRange> {
        let path = tile.intensity_location();
        let array = read_array(&path).map_err(|err| match err {
            AggregateError::MissingInput { path, .. } => AggregateError::MissingInput {
                tile: tile.identifier(),
                path,
            },
            other => other,
        })?;
        let [min, max] = two_values(&array, &path)?;
        self.logger
            .detail(&format!("tile {} range [{}, {}]", tile.identifier(), min, max));
        Ok(LocalIntensityRange::new(min, max))
    }

    /// Min-of-mins and max-of-maxes; independent of tile order.
    pub fn reduce<I>(ranges: I) -> AggregateResult<GlobalIntensityRange>
    where
        I: IntoIterator<Item = LocalIntensityRange>,
    {
        StatsHelper::fold_extremes(ranges).ok_or(AggregateError::NoTiles)
    }

    /// Reads back a `global_minmax.txt` written by [`IntensityAggregator::aggregate`].
    pub fn read_global<P: AsRef<Path>>(path: P) -> AggregateResult<GlobalIntensityRange> {
        let path = path.as_ref();
        let [min, max] = two_values(&read_array(path)?, path)?;
        Ok(GlobalIntensityRange::new(min, max))
    }
}

/// Accepts either two rows or one row of two.
fn two_values(array: &NumericArray, path: &Path) -> AggregateResult<[f64; 2]> {
    let values: Vec<f64> = array.iter().copied().collect();
    match values.as_slice() {
        &[min, max] => Ok([min, max]),
        _ => Err(AggregateError::MalformedInput {
            path: path.to_path_buf(),
            reason: format!("expected 2 values (min, max), found {}", values.len()),
        }),
    }
}
