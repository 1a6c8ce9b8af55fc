//! The immutable item catalog shared by every fitness evaluation.

use std::iter;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, genome::Genome};

/// A packable item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub weight: f64,
    pub importance: f64,
}

impl Item {
    #[must_use]
    pub const fn new(weight: f64, importance: f64) -> Self {
        Self { weight, importance }
    }

    fn is_valid(&self) -> bool {
        self.weight.is_finite()
            && self.weight >= 0.0
            && self.importance.is_finite()
            && self.importance >= 0.0
    }
}

/// Summed weight and importance of the items a genome selects.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub weight: f64,
    pub importance: f64,
}

/// A non-empty, validated list of items.
///
/// The catalog length defines the genome length of every candidate evaluated
/// against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    /// Validates and wraps `items`.
    ///
    /// Fails if the list is empty or any weight or importance is negative or
    /// not finite.
    pub fn new(items: Vec<Item>) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some((index, item)) = items.iter().enumerate().find(|(_, item)| !item.is_valid()) {
            return Err(ConfigError::InvalidItem {
                index,
                weight: item.weight,
                importance: item.importance,
            });
        }
        Ok(Self { items })
    }

    /// Genome length required by this catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sums weight and importance over the positions set in `genome`.
    ///
    /// # Panics
    ///
    /// Panics if the genome length differs from the catalog length.
    #[must_use]
    pub fn totals(&self, genome: &Genome) -> Totals {
        assert_eq!(
            genome.len(),
            self.items.len(),
            "genome length must match catalog length"
        );
        iter::zip(genome.bits(), &self.items)
            .filter(|(selected, _)| **selected)
            .fold(Totals::default(), |acc, (_, item)| Totals {
                weight: acc.weight + item.weight,
                importance: acc.importance + item.importance,
            })
    }
}
