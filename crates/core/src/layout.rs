//! Layout module - the static description of a level
//!
//! A layout says which cells are playable, the score to reach and the move
//! budget. Reading it from a file is the job of the `fruity-crush-levels` crate;
//! the engine only consumes the record.

use thiserror::Error;

use crate::types::{BoardConfig, ConfigError};

/// Static level definition
///
/// `tiles` is authored top row first, the way it reads in a level file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayout {
    pub tiles: Vec<Vec<bool>>,
    pub target_score: u32,
    pub moves: u32,
}

impl LevelLayout {
    /// Layout with every cell playable
    pub fn full(config: &BoardConfig, target_score: u32, moves: u32) -> Self {
        Self {
            tiles: vec![vec![true; config.columns]; config.rows],
            target_score,
            moves,
        }
    }

    /// Number of playable cells
    pub fn playable_count(&self) -> usize {
        self.tiles
            .iter()
            .map(|row| row.iter().filter(|&&t| t).count())
            .sum()
    }

    /// Check that the tile matrix has exactly the configured shape
    pub fn check_shape(&self, config: &BoardConfig) -> Result<(), LayoutError> {
        if self.tiles.len() != config.rows {
            return Err(LayoutError::RowCount {
                expected: config.rows,
                found: self.tiles.len(),
            });
        }
        for (row, tiles) in self.tiles.iter().enumerate() {
            if tiles.len() != config.columns {
                return Err(LayoutError::ColumnCount {
                    row,
                    expected: config.columns,
                    found: tiles.len(),
                });
            }
        }
        Ok(())
    }
}

/// Layout does not fit the board it is loaded into
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid board configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("layout has {found} rows, board has {expected}")]
    RowCount { expected: usize, found: usize },
    #[error("layout row {row} has {found} columns, board has {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
}
