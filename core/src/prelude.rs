use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Plain-text numeric payload: rows x columns, one-dimensional files are N x 1.
pub type NumericArray = Array2<f64>;

pub const GLOBAL_MINMAX_FILE: &str = "global_minmax.txt";

/// Run-wide settings shared by both aggregators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    pub out_dir: PathBuf,
}

impl AggregatorConfig {
    pub fn new<P: Into<PathBuf>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn pointing_output(&self, pair: usize) -> PathBuf {
        self.out_dir.join(format!("global_pointing_pair_{}.txt", pair))
    }

    pub fn intensity_output(&self) -> PathBuf {
        self.out_dir.join(GLOBAL_MINMAX_FILE)
    }

    /// Creates the output directory tree if needed.
    pub fn ensure_out_dir(&self) -> AggregateResult<&Path> {
        fs::create_dir_all(&self.out_dir).map_err(|source| AggregateError::Io {
            path: self.out_dir.clone(),
            source,
        })?;
        Ok(&self.out_dir)
    }
}

/// Common error type for both aggregations.
#[derive(thiserror::Error, Debug)]
pub enum AggregateError {
    #[error("missing input for tile {tile}: {}", .path.display())]
    MissingInput { tile: String, path: PathBuf },
    #[error("malformed input {}: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },
    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("tile {tile} declares {found} pairs, expected {expected}")]
    ConfigMismatch {
        tile: String,
        expected: usize,
        found: usize,
    },
    #[error("no tiles to aggregate")]
    NoTiles,
    #[error("pair index {pair} outside 1..={count}")]
    PairOutOfRange { pair: usize, count: usize },
    #[error("estimator failure: {0}")]
    Estimator(String),
    #[error("pair {pair}: {source}")]
    Pair {
        pair: usize,
        #[source]
        source: Box<AggregateError>,
    },
}

/// Coarse classification of [`AggregateError`] for callers deciding on reruns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    MalformedInput,
    Io,
    ConfigMismatch,
    Other,
}

impl AggregateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AggregateError::MissingInput { .. } => ErrorKind::MissingInput,
            AggregateError::MalformedInput { .. } => ErrorKind::MalformedInput,
            AggregateError::Io { .. } => ErrorKind::Io,
            AggregateError::ConfigMismatch { .. } => ErrorKind::ConfigMismatch,
            AggregateError::Pair { source, .. } => source.kind(),
            _ => ErrorKind::Other,
        }
    }

    pub(crate) fn for_pair(self, pair: usize) -> Self {
        match self {
            wrapped @ AggregateError::Pair { .. } => wrapped,
            other => AggregateError::Pair {
                pair,
                source: Box::new(other),
            },
        }
    }
}

pub type AggregateResult<T> = Result<T, AggregateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_paths_are_keyed_by_pair() {
        let config = AggregatorConfig::new("/run/out");
        assert_eq!(
            config.pointing_output(3),
            PathBuf::from("/run/out/global_pointing_pair_3.txt")
        );
        assert_eq!(
            config.intensity_output(),
            PathBuf::from("/run/out/global_minmax.txt")
        );
    }

    #[test]
    fn pair_context_preserves_kind() {
        let err = AggregateError::MissingInput {
            tile: "tile_0".into(),
            path: PathBuf::from("tile_0/pair_2"),
        }
        .for_pair(2)
        .for_pair(2);
        assert_eq!(err.kind(), ErrorKind::MissingInput);
        assert!(err.to_string().starts_with("pair 2: missing input"));
    }
}
