//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data with no dependency on the board itself, making them
//! usable in any context (engine logic, level loading, presentation).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Columns**: 9 (indexed 0-8, left to right)
//! - **Rows**: 9 (indexed 0-8, bottom to top)
//!
//! Dimensions are not global: every board carries its own [`BoardConfig`], so
//! several boards of different sizes can be alive at once.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_CHAIN_LENGTH` | 3 | Shortest run that counts as a chain |
//! | `CHAIN_BASE_SCORE` | 60 | Points per fruit beyond the second in a chain |
//!
//! A chain of length `n` scores `CHAIN_BASE_SCORE * (n - 2)`: 60, 120, 180, ...
//!
//! # Examples
//!
//! ```
//! use fruity_crush_types::{BoardConfig, Direction, FruitKind, NUM_COLUMNS, NUM_ROWS};
//!
//! // Parse from sprite name (case-insensitive)
//! let parsed = FruitKind::from_str("Apple").unwrap();
//! assert_eq!(parsed, FruitKind::Apple);
//!
//! // Directions map to grid deltas (row 0 is the bottom row)
//! assert_eq!(Direction::Up.delta(), (0, 1));
//!
//! // Default board configuration
//! let config = BoardConfig::default();
//! assert_eq!(config.columns, NUM_COLUMNS);
//! assert_eq!(config.rows, NUM_ROWS);
//! ```

use thiserror::Error;

/// Default number of board columns (9)
pub const NUM_COLUMNS: usize = 9;

/// Default number of board rows (9)
pub const NUM_ROWS: usize = 9;

/// Number of distinct fruit kinds
pub const FRUIT_KIND_COUNT: usize = 6;

/// Fewest fruit kinds a board may be configured with.
///
/// Seeding rejects a kind that would complete a run to the left or below, which
/// can exclude at most two kinds per cell.
pub const MIN_FRUIT_KINDS: usize = 3;

/// Largest supported board dimension
pub const MAX_DIMENSION: usize = 32;

/// Shortest run of equal fruits that forms a chain
pub const MIN_CHAIN_LENGTH: usize = 3;

/// Base points for a chain, multiplied by `length - 2`
pub const CHAIN_BASE_SCORE: u32 = 60;

/// Default number of boards dealt by a shuffle before giving up on finding a legal swap
pub const DEFAULT_SHUFFLE_ATTEMPTS: u32 = 256;

/// The six fruit kinds
///
/// Order matches the sprite atlas: index 0 is `apple`, index 5 is `watermelon`.
/// A board configured with fewer kinds draws from the first `n` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FruitKind {
    Apple,
    Cherry,
    Strawberry,
    Pineapple,
    Grapes,
    Watermelon,
}

impl FruitKind {
    /// Every kind in atlas order
    pub const ALL: [FruitKind; FRUIT_KIND_COUNT] = [
        FruitKind::Apple,
        FruitKind::Cherry,
        FruitKind::Strawberry,
        FruitKind::Pineapple,
        FruitKind::Grapes,
        FruitKind::Watermelon,
    ];

    /// Atlas index of this kind
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse fruit kind from its sprite name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use fruity_crush_types::FruitKind;
    ///
    /// assert_eq!(FruitKind::from_str("cherry"), Some(FruitKind::Cherry));
    /// assert_eq!(FruitKind::from_str("GRAPES"), Some(FruitKind::Grapes));
    /// assert_eq!(FruitKind::from_str("banana"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "apple" => Some(FruitKind::Apple),
            "cherry" => Some(FruitKind::Cherry),
            "strawberry" => Some(FruitKind::Strawberry),
            "pineapple" => Some(FruitKind::Pineapple),
            "grapes" => Some(FruitKind::Grapes),
            "watermelon" => Some(FruitKind::Watermelon),
            _ => None,
        }
    }

    /// Sprite name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Cherry => "cherry",
            FruitKind::Strawberry => "strawberry",
            FruitKind::Pineapple => "pineapple",
            FruitKind::Grapes => "grapes",
            FruitKind::Watermelon => "watermelon",
        }
    }

    /// Single-letter glyph used by text dumps of a board
    pub fn glyph(&self) -> char {
        match self {
            FruitKind::Apple => 'A',
            FruitKind::Cherry => 'C',
            FruitKind::Strawberry => 'S',
            FruitKind::Pineapple => 'P',
            FruitKind::Grapes => 'G',
            FruitKind::Watermelon => 'W',
        }
    }
}

impl std::fmt::Display for FruitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis a chain runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainKind {
    Horizontal,
    Vertical,
}

impl ChainKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainKind::Horizontal => "horizontal",
            ChainKind::Vertical => "vertical",
        }
    }
}

/// Swipe direction decoded by the input layer
///
/// Row 0 is the bottom row, so `Up` increases the row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Column and row delta for one step in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }
}

/// Invalid board configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions {columns}x{rows} out of range (1..={max})", max = MAX_DIMENSION)]
    Dimensions { columns: usize, rows: usize },
    #[error("fruit kind count {0} out of range ({min}..={max})", min = MIN_FRUIT_KINDS, max = FRUIT_KIND_COUNT)]
    FruitKinds(usize),
    #[error("shuffle attempt limit must be at least 1")]
    ShuffleAttempts,
}

/// Per-board configuration
///
/// Threaded into a board at construction instead of module-level constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub columns: usize,
    pub rows: usize,
    /// How many of [`FruitKind::ALL`] the board draws from
    pub fruit_kinds: usize,
    /// Boards dealt by one shuffle before it settles for a board without legal swaps
    pub shuffle_attempts: u32,
}

impl BoardConfig {
    /// Create a validated configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use fruity_crush_types::{BoardConfig, ConfigError};
    ///
    /// assert!(BoardConfig::new(9, 9, 6).is_ok());
    /// assert_eq!(BoardConfig::new(9, 9, 2), Err(ConfigError::FruitKinds(2)));
    /// assert!(BoardConfig::new(0, 9, 6).is_err());
    /// ```
    pub fn new(columns: usize, rows: usize, fruit_kinds: usize) -> Result<Self, ConfigError> {
        let config = Self {
            columns,
            rows,
            fruit_kinds,
            shuffle_attempts: DEFAULT_SHUFFLE_ATTEMPTS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Override the shuffle attempt limit
    pub fn with_shuffle_attempts(mut self, attempts: u32) -> Result<Self, ConfigError> {
        self.shuffle_attempts = attempts;
        self.validate()?;
        Ok(self)
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = 1..=MAX_DIMENSION;
        if !dims.contains(&self.columns) || !dims.contains(&self.rows) {
            return Err(ConfigError::Dimensions {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !(MIN_FRUIT_KINDS..=FRUIT_KIND_COUNT).contains(&self.fruit_kinds) {
            return Err(ConfigError::FruitKinds(self.fruit_kinds));
        }
        if self.shuffle_attempts == 0 {
            return Err(ConfigError::ShuffleAttempts);
        }
        Ok(())
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: NUM_COLUMNS,
            rows: NUM_ROWS,
            fruit_kinds: FRUIT_KIND_COUNT,
            shuffle_attempts: DEFAULT_SHUFFLE_ATTEMPTS,
        }
    }
}
