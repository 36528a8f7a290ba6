//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the matching engine: board state, swap legality, chain
//! detection, scoring and the cascade that follows every move.
//! It has **no dependencies** on rendering, input decoding or file I/O, making it:
//!
//! - **Deterministic**: Same seed deals identical boards and refills
//! - **Testable**: Every state transition is a plain method call
//! - **Portable**: Can run headless, in a terminal, or behind any presenter
//!
//! # Module Structure
//!
//! - [`grid`]: Fixed-size 2D storage used for fruits and the tile mask
//! - [`fruit`]: Fruits with a stable id and a mutable position
//! - [`swap`]: Unordered swap requests
//! - [`chain`]: Runs of three or more equal fruits
//! - [`scoring`]: Chain points
//! - [`layout`]: Static level description consumed by the board
//! - [`level`]: The board and its mutation protocol
//! - [`game`]: Turn sequencing, score and move budget
//! - [`rng`]: Deterministic fruit generation
//!
//! # Game Rules
//!
//! - Swapping two adjacent fruits is allowed only if it creates a chain
//! - A chain of `n` fruits scores `60 * (n - 2)`; crossing chains both score
//! - Removed fruits leave gaps that the fruits above fall into
//! - Empty cells are refilled from the top, and new chains cascade
//! - Every dealt board has at least one legal swap
//!
//! # Example
//!
//! ```
//! use fruity_crush_core::{BoardConfig, Game, Level, LevelLayout, SwapOutcome};
//!
//! let config = BoardConfig::default();
//! let layout = LevelLayout::full(&config, 1000, 15);
//! let mut game = Game::new(Level::load(config, &layout, 12345).unwrap());
//! game.begin();
//!
//! // Play the first legal swap
//! let swap = game.level().legal_swaps_sorted()[0];
//! match game.try_swap(&swap) {
//!     SwapOutcome::Resolved(report) => assert!(report.score_delta >= 60),
//!     SwapOutcome::Rejected => unreachable!(),
//! }
//! assert_eq!(game.moves_left(), 14);
//! ```

pub mod chain;
pub mod fruit;
pub mod game;
pub mod grid;
pub mod layout;
pub mod level;
pub mod rng;
pub mod scoring;
pub mod swap;

pub use fruity_crush_types as types;

// Re-export commonly used types for convenience
pub use chain::Chain;
pub use fruit::{Fruit, FruitId};
pub use game::{resolve_cascade, CascadeStep, Game, GameStatus, SwapOutcome, TurnReport};
pub use grid::Grid;
pub use layout::{LayoutError, LevelLayout};
pub use level::{Fall, Level, Tile};
pub use rng::SimpleRng;
pub use scoring::{chain_score, score_chains};
pub use swap::Swap;
pub use types::{BoardConfig, ChainKind, ConfigError, Direction, FruitKind};
