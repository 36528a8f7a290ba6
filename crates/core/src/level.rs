//! Level module - the board and its mutation protocol
//!
//! A level owns the fruit grid, the tile mask, the target score, the move budget
//! and the set of currently legal swaps. It is the only place fruit positions
//! change.
//!
//! A turn is sequenced by the caller (see [`crate::game`]):
//!
//! 1. [`Level::is_legal`] then [`Level::apply`] for the player's swap
//! 2. [`Level::remove_matches`] (detect, score, remove)
//! 3. [`Level::collapse`] then [`Level::refill`]
//! 4. back to 2 until no chains remain, then [`Level::detect_legal_swaps`]
//!
//! Coordinates: (column, row), row 0 at the bottom.

use std::collections::HashSet;
use std::fmt::Write as _;

use arrayvec::ArrayVec;
use log::{debug, trace, warn};

use crate::chain::Chain;
use crate::fruit::{Fruit, FruitId};
use crate::grid::Grid;
use crate::layout::{LayoutError, LevelLayout};
use crate::rng::SimpleRng;
use crate::scoring::score_chains;
use crate::swap::Swap;
use crate::types::{BoardConfig, ChainKind, Direction, FruitKind, MIN_CHAIN_LENGTH};

/// Marker for a playable cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile;

/// A fruit that moved down during [`Level::collapse`]
///
/// `fruit.row` is the row it landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    pub fruit: Fruit,
    pub from_row: usize,
}

impl Fall {
    /// Rows travelled
    pub fn distance(&self) -> usize {
        self.from_row - self.fruit.row
    }
}

/// The game board
#[derive(Debug, Clone)]
pub struct Level {
    config: BoardConfig,
    fruits: Grid<Fruit>,
    tiles: Grid<Tile>,
    target_score: u32,
    maximum_moves: u32,
    possible_swaps: HashSet<Swap>,
    rng: SimpleRng,
    next_id: u32,
}

impl Level {
    /// Build a level from a layout
    ///
    /// Layout row `r` (authored top first) becomes board row `rows - 1 - r`.
    /// The board starts without fruits; call [`Level::shuffle`] to deal.
    pub fn load(config: BoardConfig, layout: &LevelLayout, seed: u32) -> Result<Self, LayoutError> {
        config.validate()?;
        layout.check_shape(&config)?;

        let mut tiles = Grid::new(config.columns, config.rows);
        for (r, line) in layout.tiles.iter().enumerate() {
            let row = config.rows - 1 - r;
            for (column, &playable) in line.iter().enumerate() {
                if playable {
                    tiles.set(column, row, Some(Tile));
                }
            }
        }

        debug!(
            "loaded {}x{} level: {} playable cells, target {}, {} moves",
            config.columns,
            config.rows,
            layout.playable_count(),
            layout.target_score,
            layout.moves
        );

        Ok(Self {
            config,
            fruits: Grid::new(config.columns, config.rows),
            tiles,
            target_score: layout.target_score,
            maximum_moves: layout.moves,
            possible_swaps: HashSet::new(),
            rng: SimpleRng::new(seed),
            next_id: 0,
        })
    }

    /// Level with every cell playable, no target and no move budget
    pub fn full(config: BoardConfig, seed: u32) -> Result<Self, LayoutError> {
        Self::load(config, &LevelLayout::full(&config, 0, 0), seed)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn columns(&self) -> usize {
        self.config.columns
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn maximum_moves(&self) -> u32 {
        self.maximum_moves
    }

    /// Fruit at (column, row), if any
    pub fn fruit_at(&self, column: usize, row: usize) -> Option<Fruit> {
        self.fruits.get(column, row).copied()
    }

    /// Tile at (column, row); `None` means the cell is not playable
    pub fn tile_at(&self, column: usize, row: usize) -> Option<Tile> {
        self.tiles.get(column, row).copied()
    }

    pub fn is_playable(&self, column: usize, row: usize) -> bool {
        self.tiles.is_occupied(column, row)
    }

    fn kind_at(&self, column: usize, row: usize) -> Option<FruitKind> {
        self.fruits.get(column, row).map(|fruit| fruit.kind)
    }

    /// All fruits on the board in row-major order, bottom row first
    pub fn fruits(&self) -> impl Iterator<Item = Fruit> + '_ {
        self.fruits.iter().map(|(_, _, fruit)| *fruit)
    }

    pub fn fruit_count(&self) -> usize {
        self.fruits.occupied_count()
    }

    /// Create a fruit of `kind` at (column, row), replacing any fruit there
    ///
    /// Used to stage specific boards. Panics if the cell is not playable.
    pub fn place_fruit(&mut self, column: usize, row: usize, kind: FruitKind) -> Fruit {
        assert!(
            self.is_playable(column, row),
            "cannot place a fruit on unplayable cell ({}, {})",
            column,
            row
        );
        self.create_fruit(column, row, kind)
    }

    /// Remove every fruit from the board
    pub fn clear_fruits(&mut self) {
        self.fruits.clear();
        self.possible_swaps.clear();
    }

    fn create_fruit(&mut self, column: usize, row: usize, kind: FruitKind) -> Fruit {
        let fruit = Fruit::new(FruitId(self.next_id), column, row, kind);
        self.next_id = self.next_id.wrapping_add(1);
        self.fruits.set(column, row, Some(fruit));
        fruit
    }

    /// Deal a fresh board that has at least one legal swap
    ///
    /// Re-seeds from empty until [`Level::detect_legal_swaps`] finds a move.
    /// After `config.shuffle_attempts` boards without one (only possible on
    /// sparse layouts) a board is built around a planted near-match. If the
    /// layout has no four playable cells in a line even that is impossible:
    /// the last random deal is kept and the legal swap set stays empty.
    pub fn shuffle(&mut self) -> Vec<Fruit> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            self.fruits.clear();
            let fruits = self.fill();
            let legal = self.detect_legal_swaps().len();
            trace!("shuffle attempt {}: {} legal swaps", attempt, legal);

            if legal > 0 {
                debug!(
                    "dealt {} fruits after {} attempt(s), {} legal swaps",
                    fruits.len(),
                    attempt,
                    legal
                );
                return fruits;
            }
            if attempt >= self.config.shuffle_attempts {
                return self.deal_planted(fruits);
            }
        }
    }

    /// Fallback deal: one near-match planted, every other cell chain-free
    fn deal_planted(&mut self, last_deal: Vec<Fruit>) -> Vec<Fruit> {
        let random = self.fruits.clone();
        let (columns, rows) = (self.config.columns as i32, self.config.rows as i32);

        for row in 0..rows {
            for column in 0..columns {
                for (dc, dr) in [(1, 0), (0, 1)] {
                    let line: ArrayVec<(usize, usize), 4> = (0..4)
                        .map(|i| (column + i * dc, row + i * dr))
                        .filter(|&(c, r)| self.fruits.contains(c, r))
                        .map(|(c, r)| (c as usize, r as usize))
                        .filter(|&(c, r)| self.is_playable(c, r))
                        .collect();
                    if line.len() < 4 {
                        continue;
                    }
                    if let Some(fruits) = self.plant_near_match(&line) {
                        let legal = self.detect_legal_swaps().len();
                        debug!(
                            "random deals exhausted; planted a near-match at ({}, {}), {} legal swaps",
                            column, row, legal
                        );
                        return fruits;
                    }
                }
            }
        }

        warn!(
            "no board with a legal swap after {} attempts; keeping the last deal",
            self.config.shuffle_attempts
        );
        self.fruits = random;
        self.detect_legal_swaps();
        last_deal
    }

    /// Deal `K K x K` along `line`, then fill the rest without chains
    ///
    /// Swapping the last two cells of the line completes a run of three.
    fn plant_near_match(&mut self, line: &[(usize, usize)]) -> Option<Vec<Fruit>> {
        let kinds = self.config.fruit_kinds;
        let kind = self.rng.next_kind(kinds);
        let other = self.rng.next_kind_except(kinds, Some(kind));

        self.fruits.clear();
        let mut placed = Vec::with_capacity(self.config.cell_count());
        for (i, &(column, row)) in line.iter().enumerate() {
            let k = if i == 2 { other } else { kind };
            placed.push(self.create_fruit(column, row, k));
        }

        for row in 0..self.config.rows {
            for column in 0..self.config.columns {
                if !self.is_playable(column, row) || self.fruits.is_occupied(column, row) {
                    continue;
                }
                let start = self.rng.next_range(kinds as u32) as usize;
                let kind = (0..kinds)
                    .map(|i| FruitKind::ALL[(start + i) % kinds])
                    .find(|&kind| !self.would_chain(column, row, kind))?;
                placed.push(self.create_fruit(column, row, kind));
            }
        }
        Some(placed)
    }

    /// Seed every empty playable cell
    ///
    /// A kind is re-drawn while the two cells to the left, or the two cells
    /// below, already hold it. Filling in scan order from an empty board
    /// therefore never creates a chain; on a partly filled board new fruits may
    /// still line up with fruits above or to the right. Returns the placed
    /// fruits.
    pub fn fill(&mut self) -> Vec<Fruit> {
        let mut placed = Vec::with_capacity(self.config.cell_count());
        for row in 0..self.config.rows {
            for column in 0..self.config.columns {
                if !self.is_playable(column, row) || self.fruits.is_occupied(column, row) {
                    continue;
                }
                let kind = loop {
                    let kind = self.rng.next_kind(self.config.fruit_kinds);
                    if !self.completes_run_below_or_left(column, row, kind) {
                        break kind;
                    }
                };
                placed.push(self.create_fruit(column, row, kind));
            }
        }
        placed
    }

    fn completes_run_below_or_left(&self, column: usize, row: usize, kind: FruitKind) -> bool {
        let left = column >= 2
            && self.kind_at(column - 1, row) == Some(kind)
            && self.kind_at(column - 2, row) == Some(kind);
        let below = row >= 2
            && self.kind_at(column, row - 1) == Some(kind)
            && self.kind_at(column, row - 2) == Some(kind);
        left || below
    }

    /// Fruits of `kind` in a straight line from (column, row), exclusive, toward (dc, dr)
    fn run_toward(
        &self,
        column: usize,
        row: usize,
        kind: FruitKind,
        (dc, dr): (i32, i32),
    ) -> usize {
        let mut count = 0;
        let (mut c, mut r) = (column as i32 + dc, row as i32 + dr);
        while self.fruits.contains(c, r) && self.kind_at(c as usize, r as usize) == Some(kind) {
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }

    /// Whether a fruit of `kind` at (column, row) would sit in a run of 3+
    fn would_chain(&self, column: usize, row: usize, kind: FruitKind) -> bool {
        let run = |(dc, dr): (i32, i32)| {
            1 + self.run_toward(column, row, kind, (-dc, -dr))
                + self.run_toward(column, row, kind, (dc, dr))
        };
        run((1, 0)) >= MIN_CHAIN_LENGTH || run((0, 1)) >= MIN_CHAIN_LENGTH
    }

    /// Whether the fruit at (column, row) is part of a run of 3+ in its row or column
    pub fn has_chain_at(&self, column: usize, row: usize) -> bool {
        self.kind_at(column, row)
            .map_or(false, |kind| self.would_chain(column, row, kind))
    }

    /// Right and upper neighbours of a cell that lie inside the grid
    fn forward_neighbors(&self, column: usize, row: usize) -> ArrayVec<(usize, usize), 2> {
        let mut out = ArrayVec::new();
        if column + 1 < self.config.columns {
            out.push((column + 1, row));
        }
        if row + 1 < self.config.rows {
            out.push((column, row + 1));
        }
        out
    }

    /// Rebuild the set of swaps that would create at least one chain
    ///
    /// Every occupied cell is tentatively swapped with its right and upper
    /// neighbour; the swap is kept if either cell then sits in a chain. The
    /// board is left exactly as it was.
    pub fn detect_legal_swaps(&mut self) -> &HashSet<Swap> {
        let mut set = HashSet::new();

        for row in 0..self.config.rows {
            for column in 0..self.config.columns {
                let Some(fruit) = self.fruit_at(column, row) else {
                    continue;
                };
                for (nc, nr) in self.forward_neighbors(column, row) {
                    let Some(other) = self.fruit_at(nc, nr) else {
                        continue;
                    };

                    self.fruits.swap((column, row), (nc, nr));
                    let legal = self.has_chain_at(column, row) || self.has_chain_at(nc, nr);
                    self.fruits.swap((column, row), (nc, nr));

                    if legal {
                        set.insert(Swap::new(fruit, other));
                    }
                }
            }
        }

        trace!("{} legal swaps", set.len());
        self.possible_swaps = set;
        &self.possible_swaps
    }

    /// Whether `swap` is in the current legal swap set
    pub fn is_legal(&self, swap: &Swap) -> bool {
        self.possible_swaps.contains(swap)
    }

    /// The stored legal swap with the same two fruits as `swap`
    ///
    /// Its positions are those seen by the last [`Level::detect_legal_swaps`],
    /// so a request built before a cascade resolves to where its fruits are now.
    pub fn legal_swap(&self, swap: &Swap) -> Option<Swap> {
        self.possible_swaps.get(swap).copied()
    }

    /// Whether both fruits of `swap` sit at their recorded cells, side by side
    pub fn is_current(&self, swap: &Swap) -> bool {
        let holds = |fruit: &Fruit| {
            self.fruit_at(fruit.column, fruit.row)
                .map_or(false, |at| at.id == fruit.id)
        };
        swap.fruit_a.is_adjacent_to(&swap.fruit_b)
            && holds(&swap.fruit_a)
            && holds(&swap.fruit_b)
    }

    /// Current legal swap set (as of the last [`Level::detect_legal_swaps`])
    pub fn possible_swaps(&self) -> &HashSet<Swap> {
        &self.possible_swaps
    }

    /// Legal swaps in a stable order: by the bottom-left fruit's row, then column
    pub fn legal_swaps_sorted(&self) -> Vec<Swap> {
        fn anchor(swap: &Swap) -> (usize, usize, usize, usize) {
            let (a, b) = (swap.fruit_a.position(), swap.fruit_b.position());
            let (lo, hi) = if (a.1, a.0) <= (b.1, b.0) { (a, b) } else { (b, a) };
            (lo.1, lo.0, hi.1, hi.0)
        }
        let mut swaps: Vec<Swap> = self.possible_swaps.iter().copied().collect();
        swaps.sort_by_key(anchor);
        swaps
    }

    /// Build the swap of the fruit at (column, row) with its neighbour in `direction`
    ///
    /// Returns `None` if either cell is outside the grid or holds no fruit. This
    /// is the only bounds check on input coordinates.
    pub fn swap_toward(&self, column: i32, row: i32, direction: Direction) -> Option<Swap> {
        let (dc, dr) = direction.delta();
        let (to_column, to_row) = (column + dc, row + dr);
        if !self.fruits.contains(column, row) || !self.fruits.contains(to_column, to_row) {
            return None;
        }
        let from = self.fruit_at(column as usize, row as usize)?;
        let to = self.fruit_at(to_column as usize, to_row as usize)?;
        Some(Swap::new(from, to))
    }

    /// Exchange the two fruits of `swap`
    ///
    /// Swaps the cells recorded in the request and updates each fruit's
    /// position. Performs no legality check; applying the same request again
    /// undoes it. Panics if either cell is empty.
    pub fn apply(&mut self, swap: &Swap) {
        let a = swap.fruit_a.position();
        let b = swap.fruit_b.position();
        assert!(
            self.fruits.is_occupied(a.0, a.1) && self.fruits.is_occupied(b.0, b.1),
            "cannot apply {}: empty cell",
            swap
        );

        self.fruits.swap(a, b);
        for (column, row) in [a, b] {
            if let Some(fruit) = self.fruits.get_mut(column, row) {
                fruit.column = column;
                fruit.row = row;
            }
        }
    }

    /// Find every horizontal and vertical chain on the board
    ///
    /// A fruit in both a horizontal and a vertical run is reported in both
    /// chains. Chains are unscored.
    pub fn detect_matches(&self) -> Vec<Chain> {
        let mut chains = self.detect_horizontal_matches();
        chains.extend(self.detect_vertical_matches());
        chains
    }

    fn detect_horizontal_matches(&self) -> Vec<Chain> {
        let (columns, rows) = (self.config.columns, self.config.rows);
        let mut chains = Vec::new();

        for row in 0..rows {
            let mut column = 0;
            while column + 2 < columns {
                if let Some(kind) = self.kind_at(column, row) {
                    if self.kind_at(column + 1, row) == Some(kind)
                        && self.kind_at(column + 2, row) == Some(kind)
                    {
                        let mut chain = Chain::new(ChainKind::Horizontal);
                        while column < columns && self.kind_at(column, row) == Some(kind) {
                            if let Some(fruit) = self.fruit_at(column, row) {
                                chain.add_fruit(fruit);
                            }
                            column += 1;
                        }
                        chains.push(chain);
                        continue;
                    }
                }
                column += 1;
            }
        }
        chains
    }

    fn detect_vertical_matches(&self) -> Vec<Chain> {
        let (columns, rows) = (self.config.columns, self.config.rows);
        let mut chains = Vec::new();

        for column in 0..columns {
            let mut row = 0;
            while row + 2 < rows {
                if let Some(kind) = self.kind_at(column, row) {
                    if self.kind_at(column, row + 1) == Some(kind)
                        && self.kind_at(column, row + 2) == Some(kind)
                    {
                        let mut chain = Chain::new(ChainKind::Vertical);
                        while row < rows && self.kind_at(column, row) == Some(kind) {
                            if let Some(fruit) = self.fruit_at(column, row) {
                                chain.add_fruit(fruit);
                            }
                            row += 1;
                        }
                        chains.push(chain);
                        continue;
                    }
                }
                row += 1;
            }
        }
        chains
    }

    /// Clear the cell of every fruit in `chains`
    pub fn remove_fruits(&mut self, chains: &[Chain]) {
        for fruit in chains.iter().flat_map(|chain| chain.fruits.iter()) {
            debug_assert!(
                self.fruits
                    .get(fruit.column, fruit.row)
                    .map_or(true, |f| f.id == fruit.id),
                "chain fruit {} is stale",
                fruit
            );
            self.fruits.set(fruit.column, fruit.row, None);
        }
    }

    /// Detect, score and remove all chains
    ///
    /// Returns the scored chains and their total.
    pub fn remove_matches(&mut self) -> (Vec<Chain>, u32) {
        let mut chains = self.detect_matches();
        let score = score_chains(&mut chains);
        self.remove_fruits(&chains);
        (chains, score)
    }

    /// Let fruits fall into the empty playable cells below them
    ///
    /// Each column is scanned bottom-up; every empty playable cell pulls down
    /// the nearest fruit above it. Returns one list per column that moved,
    /// ordered bottom gap first.
    pub fn collapse(&mut self) -> Vec<Vec<Fall>> {
        let (columns, rows) = (self.config.columns, self.config.rows);
        let mut out = Vec::new();

        for column in 0..columns {
            let mut falls = Vec::new();
            for row in 0..rows {
                if !self.is_playable(column, row) || self.fruits.is_occupied(column, row) {
                    continue;
                }
                for lookup in row + 1..rows {
                    if let Some(mut fruit) = self.fruits.take(column, lookup) {
                        fruit.row = row;
                        self.fruits.set(column, row, Some(fruit));
                        falls.push(Fall {
                            fruit,
                            from_row: lookup,
                        });
                        break;
                    }
                }
            }
            if !falls.is_empty() {
                out.push(falls);
            }
        }
        out
    }

    /// Top up every empty playable cell with new fruits
    ///
    /// Each column is scanned top-down. A new fruit never repeats the kind of
    /// the one created just before it in the same column; matches with older
    /// fruits are allowed. Returns one list per column that received fruits,
    /// ordered top-down.
    pub fn refill(&mut self) -> Vec<Vec<Fruit>> {
        let (columns, rows) = (self.config.columns, self.config.rows);
        let mut out = Vec::new();

        for column in 0..columns {
            let mut added = Vec::new();
            let mut previous = None;
            for row in (0..rows).rev() {
                if !self.is_playable(column, row) || self.fruits.is_occupied(column, row) {
                    continue;
                }
                let kind = self
                    .rng
                    .next_kind_except(self.config.fruit_kinds, previous);
                previous = Some(kind);
                added.push(self.create_fruit(column, row, kind));
            }
            if !added.is_empty() {
                out.push(added);
            }
        }
        out
    }

    /// Text picture of the board, top row first
    ///
    /// Fruits print as their glyph, empty playable cells as `.`, unplayable
    /// cells as a space.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity((self.config.columns + 1) * self.config.rows);
        for row in (0..self.config.rows).rev() {
            for column in 0..self.config.columns {
                let ch = match (self.kind_at(column, row), self.is_playable(column, row)) {
                    (Some(kind), _) => kind.glyph(),
                    (None, true) => '.',
                    (None, false) => ' ',
                };
                out.push(ch);
            }
            let _ = writeln!(out);
        }
        out
    }
}
