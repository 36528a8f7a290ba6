//! Swap module - a candidate exchange of two adjacent fruits
//!
//! A swap is unordered: `{a, b}` and `{b, a}` are the same request and hash the
//! same, which lets the level keep its legal swaps in a `HashSet` and answer
//! [`Level::is_legal`](crate::Level::is_legal) for either order.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::fruit::Fruit;

/// Player move request: exchange two fruits
///
/// The fruits are copies taken when the request was built; their positions are
/// the cells [`Level::apply`](crate::Level::apply) exchanges.
#[derive(Debug, Clone, Copy)]
pub struct Swap {
    pub fruit_a: Fruit,
    pub fruit_b: Fruit,
}

impl Swap {
    pub fn new(fruit_a: Fruit, fruit_b: Fruit) -> Self {
        Self { fruit_a, fruit_b }
    }

    /// The same request with the fruits in the other order
    pub fn reversed(&self) -> Self {
        Self {
            fruit_a: self.fruit_b,
            fruit_b: self.fruit_a,
        }
    }

    /// Ids in ascending order, the order-independent key of the request
    fn key(&self) -> (u32, u32) {
        let (a, b) = (self.fruit_a.id.0, self.fruit_b.id.0);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl PartialEq for Swap {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Swap {}

impl Hash for Swap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap {} with {}", self.fruit_a, self.fruit_b)
    }
}
