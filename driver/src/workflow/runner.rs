use crate::workflow::config::{EstimatorKind, RunConfig};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use stereoagg::telemetry::{AggregationMetrics, Metrics};
use stereoagg::{
    GlobalIntensityRange, IntensityAggregator, MeanCorrectionEstimator, PointingAggregator,
};
use tokio::runtime::Builder;

/// Which aggregations a run performs.
#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    pub pointing: bool,
    pub intensity: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            pointing: true,
            intensity: true,
        }
    }
}

pub struct RunReport {
    pub pointing_outputs: Vec<PathBuf>,
    pub intensity: Option<GlobalIntensityRange>,
    pub metrics: Metrics,
}

#[derive(Clone)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Runs the selected aggregations concurrently; either failure fails the run.
    pub fn execute(&self, options: RunOptions) -> anyhow::Result<RunReport> {
        let aggregator_config = self.config.to_aggregator_config();
        aggregator_config
            .ensure_out_dir()
            .context("preparing output directory")?;
        let metrics = Arc::new(AggregationMetrics::new());

        let runtime = Builder::new_multi_thread()
            .build()
            .context("creating aggregation runtime")?;

        runtime.block_on(async {
            let pointing = options.pointing.then(|| {
                let tiles = self.config.tiles.clone();
                let aggregator = match self.config.estimator {
                    EstimatorKind::Mean => {
                        PointingAggregator::new(aggregator_config.clone(), MeanCorrectionEstimator)
                    }
                }
                .with_metrics(Arc::clone(&metrics));
                tokio::task::spawn_blocking(move || aggregator.aggregate(&tiles))
            });
            let intensity = options.intensity.then(|| {
                let tiles = self.config.tiles.clone();
                let aggregator = IntensityAggregator::new(aggregator_config.clone())
                    .with_metrics(Arc::clone(&metrics));
                tokio::task::spawn_blocking(move || aggregator.aggregate(&tiles))
            });

            let pointing_outputs = match pointing {
                Some(task) => {
                    task.await
                        .context("joining pointing aggregation")?
                        .context("aggregating global pointing corrections")?
                        .outputs
                }
                None => Vec::new(),
            };
            let intensity = match intensity {
                Some(task) => Some(
                    task.await
                        .context("joining intensity aggregation")?
                        .context("aggregating global intensity range")?,
                ),
                None => None,
            };

            Ok::<RunReport, anyhow::Error>(RunReport {
                pointing_outputs,
                intensity,
                metrics: metrics.snapshot(),
            })
        })
    }
}
