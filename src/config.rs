//! Autoplay runner configuration
//!
//! Read from environment variables:
//!
//! - `FRUITY_LEVEL`: level file to play (default: a fully playable 9x9 board)
//! - `FRUITY_SEED`: RNG seed (default: 1)
//! - `FRUITY_KINDS`: number of fruit kinds, 3 to 6 (default: 6)
//! - `FRUITY_MAX_TURNS`: stop after this many turns (default: 200)

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::{Game, Level, LevelLayout};
use crate::levels::{board_config_for, load_level};
use crate::types::{BoardConfig, FRUIT_KIND_COUNT};

/// Target score of the built-in level
pub const DEFAULT_TARGET_SCORE: u32 = 1000;

/// Move budget of the built-in level
pub const DEFAULT_MOVES: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub level_path: Option<PathBuf>,
    pub seed: u32,
    pub fruit_kinds: usize,
    pub max_turns: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            level_path: None,
            seed: 1,
            fruit_kinds: FRUIT_KIND_COUNT,
            max_turns: 200,
        }
    }
}

impl RunConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup; unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let level_path = lookup("FRUITY_LEVEL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let seed = lookup("FRUITY_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);
        let fruit_kinds = lookup("FRUITY_KINDS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.fruit_kinds);
        let max_turns = lookup("FRUITY_MAX_TURNS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_turns);

        Self {
            level_path,
            seed,
            fruit_kinds,
            max_turns,
        }
    }

    /// Load the configured level and wrap it in a game (not yet begun)
    pub fn load_game(&self) -> Result<Game> {
        let layout = match &self.level_path {
            Some(path) => load_level(path)
                .with_context(|| format!("loading level {}", path.display()))?,
            None => {
                let config = BoardConfig::default();
                LevelLayout::full(&config, DEFAULT_TARGET_SCORE, DEFAULT_MOVES)
            }
        };

        let config = board_config_for(&layout, self.fruit_kinds)
            .context("level does not fit a supported board")?;
        let level = Level::load(config, &layout, self.seed).context("building level")?;
        Ok(Game::new(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(RunConfig::from_lookup(lookup(&[])), RunConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = RunConfig::from_lookup(lookup(&[
            ("FRUITY_LEVEL", " levels/level_1.json "),
            ("FRUITY_SEED", "77"),
            ("FRUITY_KINDS", "4"),
            ("FRUITY_MAX_TURNS", "12"),
        ]));
        assert_eq!(config.level_path, Some(PathBuf::from("levels/level_1.json")));
        assert_eq!(config.seed, 77);
        assert_eq!(config.fruit_kinds, 4);
        assert_eq!(config.max_turns, 12);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = RunConfig::from_lookup(lookup(&[
            ("FRUITY_LEVEL", "   "),
            ("FRUITY_SEED", "not-a-number"),
        ]));
        assert_eq!(config.level_path, None);
        assert_eq!(config.seed, 1);
    }

    #[test]
    fn default_game_uses_builtin_level() {
        let game = RunConfig::default().load_game().unwrap();
        assert_eq!(game.level().target_score(), DEFAULT_TARGET_SCORE);
        assert_eq!(game.level().maximum_moves(), DEFAULT_MOVES);
    }

    #[test]
    fn unsupported_kind_count_is_an_error() {
        let config = RunConfig {
            fruit_kinds: 2,
            ..RunConfig::default()
        };
        let err = config.load_game().unwrap_err();
        assert!(format!("{err:#}").contains("fruit kind count 2"));
    }
}
