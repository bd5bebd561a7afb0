use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use stereoagg::prelude::AggregatorConfig;
use stereoagg::TileDescriptor;

/// Combination used for the per-pair global pointing correction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    #[default]
    Mean,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    pub out_dir: PathBuf,
    pub tiles: Vec<TileDescriptor>,
    #[serde(default)]
    pub estimator: EstimatorKind,
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading run config {}", path_ref.display()))?;
        let config: RunConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing run config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Every tile directory shares the same pair count.
    pub fn from_args(out_dir: PathBuf, tile_dirs: Vec<PathBuf>, pairs: usize) -> Self {
        Self {
            out_dir,
            tiles: tile_dirs
                .into_iter()
                .map(|dir| TileDescriptor::new(dir, pairs))
                .collect(),
            estimator: EstimatorKind::default(),
        }
    }

    pub fn to_aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig::new(&self.out_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_shares_pair_count() {
        let cfg = RunConfig::from_args(
            PathBuf::from("out"),
            vec![PathBuf::from("tiles/a"), PathBuf::from("tiles/b")],
            3,
        );
        assert_eq!(cfg.tiles.len(), 2);
        assert!(cfg.tiles.iter().all(|t| t.number_of_pairs == 3));
        assert_eq!(cfg.to_aggregator_config().out_dir, PathBuf::from("out"));
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"out_dir: /data/run/out\n\
              tiles:\n\
              \x20 - directory: /data/run/tiles/row_0/col_0\n\
              \x20   number_of_pairs: 2\n\
              \x20 - directory: /data/run/tiles/row_0/col_1\n\
              \x20   number_of_pairs: 2\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = RunConfig::load(&path).unwrap();
        assert_eq!(cfg.out_dir, PathBuf::from("/data/run/out"));
        assert_eq!(cfg.tiles.len(), 2);
        assert_eq!(cfg.estimator, EstimatorKind::Mean);
    }

    #[test]
    fn config_load_reports_bad_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"out_dir: [unterminated\n").unwrap();
        let path = temp.into_temp_path();
        let err = RunConfig::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("parsing run config"));
    }
}
