//! Candidate solutions and their cached fitness.
//!
//! A [`Candidate`] owns a genome plus a [`Fitness`] that is either
//! [`Fitness::Unset`] or [`Fitness::Computed`]. Mutating the genome always
//! resets the fitness, so a computed value never describes a stale genome.
//!
//! Selection and culling only ever see [`EvaluatedCandidate`]s, whose fitness
//! is a plain `f64` that cannot be missing.
//!
//! # Fitness
//!
//! For a genome selecting items with total weight `w` and total importance `v`
//! against capacity `c`:
//!
//! - `w <= c`: fitness is `v` (never negative)
//! - `w > c`: fitness is `c - w` (strictly negative)
//!
//! Infeasible solutions therefore rank by how far they overflow the knapsack,
//! and always below every feasible one.

use rand::Rng;
use serde::Serialize;

use crate::{genome::Genome, item::ItemCatalog};

/// Cached fitness state of a [`Candidate`].
#[derive(Debug, Clone, Copy, PartialEq, Default, derive_more::IsVariant)]
pub enum Fitness {
    #[default]
    Unset,
    Computed(f64),
}

impl Fitness {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Fitness::Unset => None,
            Fitness::Computed(value) => Some(value),
        }
    }
}

/// Scores a genome against the catalog and capacity.
///
/// # Panics
///
/// Panics if the genome length differs from the catalog length.
#[must_use]
pub fn knapsack_fitness(genome: &Genome, catalog: &ItemCatalog, capacity: f64) -> f64 {
    let totals = catalog.totals(genome);
    if totals.weight > capacity {
        capacity - totals.weight
    } else {
        totals.importance
    }
}

/// A genome under construction, with an optional cached fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    genome: Genome,
    fitness: Fitness,
}

impl Candidate {
    /// Wraps an existing genome. Fitness starts unset.
    #[must_use]
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            fitness: Fitness::Unset,
        }
    }

    /// Creates a candidate with `len` uniformly random bits.
    pub fn random<R>(rng: &mut R, len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(Genome::random(rng, len))
    }

    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    #[must_use]
    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    /// Computes, caches and returns the fitness of the current genome.
    pub fn compute_fitness(&mut self, catalog: &ItemCatalog, capacity: f64) -> f64 {
        let value = knapsack_fitness(&self.genome, catalog, capacity);
        self.fitness = Fitness::Computed(value);
        value
    }

    /// Flips one uniformly chosen bit.
    pub fn single_point_mutation<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.genome.flip_random_bit(rng);
        self.fitness = Fitness::Unset;
    }

    /// Flips each bit independently with probability `rate`.
    pub fn multi_point_mutation<R>(&mut self, rate: f64, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.genome.flip_each_with_probability(rate, rng);
        self.fitness = Fitness::Unset;
    }

    /// Computes the fitness and freezes the candidate.
    #[must_use]
    pub fn evaluate(mut self, catalog: &ItemCatalog, capacity: f64) -> EvaluatedCandidate {
        let fitness = self.compute_fitness(catalog, capacity);
        EvaluatedCandidate {
            genome: self.genome,
            fitness,
        }
    }
}

/// A candidate whose fitness is known to match its genome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedCandidate {
    genome: Genome,
    fitness: f64,
}

impl EvaluatedCandidate {
    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Whether the selected items fit within the capacity used for evaluation.
    ///
    /// Infeasible candidates always carry a negative fitness.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.fitness >= 0.0
    }

    /// Discards the cached fitness and scores the genome again.
    #[must_use]
    pub fn reevaluate(self, catalog: &ItemCatalog, capacity: f64) -> EvaluatedCandidate {
        Candidate::new(self.genome).evaluate(catalog, capacity)
    }

    /// Returns an independent copy that can be mutated as offspring.
    #[must_use]
    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            genome: self.genome.clone(),
            fitness: Fitness::Computed(self.fitness),
        }
    }
}
