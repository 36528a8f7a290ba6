//! Chain module - a run of three or more equal fruits along one axis

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::fruit::Fruit;
use crate::types::ChainKind;

/// A matched run, in scan order (left to right, or bottom to top)
///
/// `score` stays 0 until [`score_chains`](crate::scoring::score_chains) runs.
#[derive(Debug, Clone)]
pub struct Chain {
    pub kind: ChainKind,
    pub fruits: Vec<Fruit>,
    pub score: u32,
}

impl Chain {
    pub fn new(kind: ChainKind) -> Self {
        Self {
            kind,
            fruits: Vec::new(),
            score: 0,
        }
    }

    pub fn add_fruit(&mut self, fruit: Fruit) {
        self.fruits.push(fruit);
    }

    pub fn first_fruit(&self) -> Option<&Fruit> {
        self.fruits.first()
    }

    pub fn len(&self) -> usize {
        self.fruits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fruits.is_empty()
    }

    pub fn contains(&self, fruit: &Fruit) -> bool {
        self.fruits.contains(fruit)
    }
}

// Two chains are the same chain when they hold the same fruits in the same order.
impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.fruits == other.fruits
    }
}

impl Eq for Chain {}

impl Hash for Chain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fruits.hash(state);
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} chain of {} [", self.kind.as_str(), self.len())?;
        for (i, fruit) in self.fruits.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", fruit)?;
        }
        f.write_str("]")
    }
}
