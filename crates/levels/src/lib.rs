//! Level files - JSON level definitions for the engine
//!
//! Levels are authored as small JSON documents:
//!
//! ```json
//! {
//!   "tiles": [[0, 1, 1, 1, 1, 1, 1, 1, 0],
//!             [1, 1, 1, 1, 1, 1, 1, 1, 1]],
//!   "targetScore": 1000,
//!   "moves": 15
//! }
//! ```
//!
//! - **tiles**: rows of `0` (no tile) or `1` (playable), top row first
//! - **targetScore**: points needed to win
//! - **moves**: move budget
//!
//! Parsing produces a [`LevelLayout`]; the engine flips the rows so that row 0
//! is the bottom of the board.
//!
//! # Example
//!
//! ```
//! use fruity_crush_levels::parse_level;
//!
//! let layout = parse_level(r#"{"tiles": [[1, 0, 1], [1, 1, 1]], "targetScore": 500, "moves": 9}"#).unwrap();
//! assert_eq!(layout.tiles[0], vec![true, false, true]);
//! assert_eq!(layout.target_score, 500);
//! assert_eq!(layout.moves, 9);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fruity_crush_core::{BoardConfig, ConfigError, LevelLayout};

/// Failure to read or interpret a level file
#[derive(Debug, Error)]
pub enum LevelFileError {
    #[error("could not read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level has no tile rows")]
    Empty,
    #[error("tile at row {row}, column {column} is {value}; expected 0 or 1")]
    InvalidTile { row: usize, column: usize, value: u8 },
    #[error("tile row {row} has {found} columns; first row has {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// On-disk shape of a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFile {
    pub tiles: Vec<Vec<u8>>,
    #[serde(rename = "targetScore")]
    pub target_score: u32,
    pub moves: u32,
}

impl LevelFile {
    /// Validate the tile matrix and convert it to a layout
    pub fn into_layout(self) -> Result<LevelLayout, LevelFileError> {
        let expected = self.tiles.first().ok_or(LevelFileError::Empty)?.len();

        let mut tiles = Vec::with_capacity(self.tiles.len());
        for (row, line) in self.tiles.iter().enumerate() {
            if line.len() != expected {
                return Err(LevelFileError::Ragged {
                    row,
                    expected,
                    found: line.len(),
                });
            }
            let converted = line
                .iter()
                .enumerate()
                .map(|(column, &value)| match value {
                    0 => Ok(false),
                    1 => Ok(true),
                    _ => Err(LevelFileError::InvalidTile { row, column, value }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            tiles.push(converted);
        }

        Ok(LevelLayout {
            tiles,
            target_score: self.target_score,
            moves: self.moves,
        })
    }

    /// Convert a layout back to its on-disk shape
    pub fn from_layout(layout: &LevelLayout) -> Self {
        Self {
            tiles: layout
                .tiles
                .iter()
                .map(|row| row.iter().map(|&t| t as u8).collect())
                .collect(),
            target_score: layout.target_score,
            moves: layout.moves,
        }
    }
}

/// Parse a level from JSON text
pub fn parse_level(json: &str) -> Result<LevelLayout, LevelFileError> {
    let file: LevelFile = serde_json::from_str(json)?;
    file.into_layout()
}

/// Read and parse a level file
pub fn load_level(path: impl AsRef<Path>) -> Result<LevelLayout, LevelFileError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LevelFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = parse_level(&json)?;
    debug!(
        "loaded level {}: {}x{}, target {}, {} moves",
        path.display(),
        layout.tiles.first().map_or(0, Vec::len),
        layout.tiles.len(),
        layout.target_score,
        layout.moves
    );
    Ok(layout)
}

/// Serialize a layout as level JSON
pub fn to_json(layout: &LevelLayout) -> Result<String, LevelFileError> {
    Ok(serde_json::to_string(&LevelFile::from_layout(layout))?)
}

/// Board configuration sized to fit `layout`
pub fn board_config_for(
    layout: &LevelLayout,
    fruit_kinds: usize,
) -> Result<BoardConfig, ConfigError> {
    let columns = layout.tiles.first().map_or(0, Vec::len);
    BoardConfig::new(columns, layout.tiles.len(), fruit_kinds)
}
