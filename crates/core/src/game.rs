//! Game module - turn sequencing on top of a level
//!
//! Ties the board to the score and the move budget. A turn is one legal swap
//! followed by the full cascade: detect, score, remove, collapse, refill, and
//! again until the board holds no chain. Each round is returned as a
//! [`CascadeStep`] so a presenter can animate it.

use log::{debug, info};

use crate::chain::Chain;
use crate::fruit::Fruit;
use crate::level::{Fall, Level};
use crate::swap::Swap;

/// Where the game stands after the last turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    /// Target score reached
    Won,
    /// Out of moves below the target
    Lost,
    /// Moves left but no legal swap; a reshuffle is needed
    Stalemate,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            GameStatus::Stalemate => "stalemate",
        }
    }
}

/// One round of the cascade
#[derive(Debug, Clone)]
pub struct CascadeStep {
    /// Scored chains removed this round
    pub chains: Vec<Chain>,
    pub score: u32,
    /// Per-column falls, bottom gap first
    pub falls: Vec<Vec<Fall>>,
    /// Per-column new fruits, top-down
    pub new_fruits: Vec<Vec<Fruit>>,
}

/// Everything that happened during one turn
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub steps: Vec<CascadeStep>,
    pub score_delta: u32,
    pub moves_left: u32,
    pub status: GameStatus,
}

/// Result of [`Game::try_swap`]
#[derive(Debug, Clone)]
pub enum SwapOutcome {
    /// Not legal, or the game is over; nothing changed
    Rejected,
    Resolved(TurnReport),
}

/// Run detect/remove/collapse/refill rounds until no chain remains
///
/// Does not recompute legal swaps; call [`Level::detect_legal_swaps`] once the
/// board has settled.
pub fn resolve_cascade(level: &mut Level) -> Vec<CascadeStep> {
    let mut steps = Vec::new();
    loop {
        let (chains, score) = level.remove_matches();
        if chains.is_empty() {
            break;
        }
        let falls = level.collapse();
        let new_fruits = level.refill();
        debug!(
            "cascade round {}: {} chain(s), {} points",
            steps.len() + 1,
            chains.len(),
            score
        );
        steps.push(CascadeStep {
            chains,
            score,
            falls,
            new_fruits,
        });
    }
    steps
}

/// A level being played
#[derive(Debug, Clone)]
pub struct Game {
    level: Level,
    score: u32,
    moves_left: u32,
    turns: u32,
    status: GameStatus,
}

impl Game {
    /// Wrap a loaded level; call [`Game::begin`] to deal
    pub fn new(level: Level) -> Self {
        let moves_left = level.maximum_moves();
        Self {
            level,
            score: 0,
            moves_left,
            turns: 0,
            status: GameStatus::Playing,
        }
    }

    /// Reset score and moves and deal a new board
    pub fn begin(&mut self) -> Vec<Fruit> {
        self.score = 0;
        self.turns = 0;
        self.moves_left = self.level.maximum_moves();
        let fruits = self.level.shuffle();
        self.status = self.evaluate_status();
        debug!(
            "game started: target {}, {} moves, status {}",
            self.level.target_score(),
            self.moves_left,
            self.status.as_str()
        );
        fruits
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Play one swap
    ///
    /// The request is matched by fruit identity against the legal swap set and
    /// played at the fruits' current cells, so a request built before the last
    /// cascade still swaps the fruits it names. Rejected swaps cost nothing. A
    /// legal swap is applied, the cascade is resolved, one move is spent and
    /// the legal swap set is rebuilt.
    pub fn try_swap(&mut self, swap: &Swap) -> SwapOutcome {
        let current = match self.status {
            GameStatus::Playing => self
                .level
                .legal_swap(swap)
                .filter(|legal| self.level.is_current(legal)),
            _ => None,
        };
        let Some(current) = current else {
            debug!("rejected {}", swap);
            return SwapOutcome::Rejected;
        };

        self.level.apply(&current);
        let steps = resolve_cascade(&mut self.level);
        let score_delta = steps
            .iter()
            .fold(0u32, |acc, step| acc.saturating_add(step.score));

        self.score = self.score.saturating_add(score_delta);
        self.moves_left = self.moves_left.saturating_sub(1);
        self.turns += 1;
        self.level.detect_legal_swaps();
        self.status = self.evaluate_status();

        debug!(
            "turn {}: {} round(s), +{} (score {}), {} moves left",
            self.turns,
            steps.len(),
            score_delta,
            self.score,
            self.moves_left
        );
        if self.status.is_over() {
            info!(
                "game {} with {} points after {} turns",
                self.status.as_str(),
                self.score,
                self.turns
            );
        }

        SwapOutcome::Resolved(TurnReport {
            steps,
            score_delta,
            moves_left: self.moves_left,
            status: self.status,
        })
    }

    /// Spend a move to deal a new board
    ///
    /// Returns `None` once the game is over.
    pub fn reshuffle(&mut self) -> Option<Vec<Fruit>> {
        if self.status.is_over() {
            return None;
        }
        self.moves_left = self.moves_left.saturating_sub(1);
        let fruits = self.level.shuffle();
        self.status = self.evaluate_status();
        debug!(
            "reshuffled: {} moves left, status {}",
            self.moves_left,
            self.status.as_str()
        );
        Some(fruits)
    }

    fn evaluate_status(&self) -> GameStatus {
        let target = self.level.target_score();
        if target > 0 && self.score >= target {
            GameStatus::Won
        } else if self.moves_left == 0 {
            GameStatus::Lost
        } else if self.level.possible_swaps().is_empty() {
            GameStatus::Stalemate
        } else {
            GameStatus::Playing
        }
    }
}
