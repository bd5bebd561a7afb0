use crate::prelude::{AggregateError, AggregateResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const LOCAL_MINMAX_FILE: &str = "local_minmax.txt";

/// Per-tile record handed over by the tiling stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub directory: PathBuf,
    pub number_of_pairs: usize,
}

impl TileDescriptor {
    pub fn new<P: Into<PathBuf>>(directory: P, number_of_pairs: usize) -> Self {
        Self {
            directory: directory.into(),
            number_of_pairs,
        }
    }

    /// Directory rendered for diagnostics.
    pub fn identifier(&self) -> String {
        self.directory.display().to_string()
    }

    /// Local pointing result for a 1-indexed pair.
    pub fn pair_location(&self, pair: usize) -> PathBuf {
        self.directory.join(format!("pair_{}", pair))
    }

    pub fn intensity_location(&self) -> PathBuf {
        self.directory.join(LOCAL_MINMAX_FILE)
    }
}

/// Dataset-wide pair count; every tile must agree on it.
pub fn common_pair_count(tiles: &[TileDescriptor]) -> AggregateResult<usize> {
    let first = tiles.first().ok_or(AggregateError::NoTiles)?;
    let expected = first.number_of_pairs;
    if let Some(odd) = tiles.iter().find(|t| t.number_of_pairs != expected) {
        return Err(AggregateError::ConfigMismatch {
            tile: odd.identifier(),
            expected,
            found: odd.number_of_pairs,
        });
    }
    Ok(expected)
}
