//! Fruit module - the tokens placed on the board
//!
//! A fruit has a fixed kind and a position that only the owning
//! [`Level`](crate::Level) updates. Identity is the [`FruitId`] handed out when
//! the fruit is created, never its position, so sets keyed by fruits stay valid
//! while fruits are swapped and fall.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::types::FruitKind;

/// Board-scoped fruit identity, unique for the lifetime of one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FruitId(pub u32);

impl fmt::Display for FruitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fruit on the board
#[derive(Debug, Clone, Copy)]
pub struct Fruit {
    pub id: FruitId,
    pub column: usize,
    pub row: usize,
    pub kind: FruitKind,
}

impl Fruit {
    pub fn new(id: FruitId, column: usize, row: usize, kind: FruitKind) -> Self {
        Self {
            id,
            column,
            row,
            kind,
        }
    }

    /// Current (column, row)
    pub fn position(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    /// Whether `other` sits in one of the four orthogonally adjacent cells
    pub fn is_adjacent_to(&self, other: &Fruit) -> bool {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row) == 1
    }
}

impl PartialEq for Fruit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Fruit {}

impl Hash for Fruit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Fruit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at ({}, {})",
            self.kind, self.id, self.column, self.row
        )
    }
}
