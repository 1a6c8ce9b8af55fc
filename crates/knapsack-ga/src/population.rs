//! Population management and the single-generation step.
//!
//! # Generation Step
//!
//! [`PopulationEvolver::evolve`] builds the next generation as follows:
//!
//! 1. **Mating** - Two parents are picked by independent tournaments
//! 2. **Crossover** - With probability `crossover_rate` the parents are
//!    recombined, otherwise both are copied
//! 3. **Mutation** - With probability `mutation_rate` both children are mutated
//! 4. **Evaluation** - Both children get their fitness computed
//! 5. **Culling** - Parents and the first `population_size` offspring are
//!    pooled, and the fittest `population_size` survive
//!
//! Culling is elitist: the best individual of a generation is never lost, so
//! the best fitness never decreases from one generation to the next.
//!
//! # Random Draw Order
//!
//! For each mating event, random numbers are consumed in this order:
//! tournament 1, tournament 2, crossover coin, crossover points, mutation
//! coin, child 1 mutation, child 2 mutation. Fitness evaluation draws nothing.

use rand::Rng;

use crate::{
    ConfigError,
    candidate::{Candidate, EvaluatedCandidate},
    item::ItemCatalog,
    selection::tournament_select,
    variation::{Crossover, Mutation},
};

/// A generation of evaluated individuals.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<EvaluatedCandidate>,
}

impl Population {
    /// Creates `count` individuals with uniformly random genomes and evaluates them.
    pub fn random<R>(catalog: &ItemCatalog, capacity: f64, count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Candidate::random(rng, catalog.len()).evaluate(catalog, capacity))
            .collect();
        Self { individuals }
    }

    /// Evaluates caller-provided candidates.
    ///
    /// Fails if any genome length differs from the catalog length.
    pub fn from_candidates(
        candidates: Vec<Candidate>,
        catalog: &ItemCatalog,
        capacity: f64,
    ) -> Result<Self, ConfigError> {
        if let Some(candidate) = candidates
            .iter()
            .find(|c| c.genome().len() != catalog.len())
        {
            return Err(ConfigError::GenomeLengthMismatch {
                expected: catalog.len(),
                actual: candidate.genome().len(),
            });
        }
        let individuals = candidates
            .into_iter()
            .map(|c| c.evaluate(catalog, capacity))
            .collect();
        Ok(Self { individuals })
    }

    #[must_use]
    pub fn individuals(&self) -> &[EvaluatedCandidate] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// All-possible-pairs diversity.
    ///
    /// Sum of Hamming distances over every unordered pair of individuals.
    /// Zero for populations of fewer than two individuals or of identical
    /// genomes.
    #[must_use]
    pub fn diversity(&self) -> usize {
        self.individuals
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                self.individuals[i + 1..]
                    .iter()
                    .map(move |b| a.genome().hamming_distance(b.genome()))
            })
            .sum()
    }

    /// The first individual with maximal fitness.
    #[must_use]
    pub fn best(&self) -> Option<&EvaluatedCandidate> {
        self.individuals.iter().reduce(|best, ind| {
            if ind.fitness() > best.fitness() {
                ind
            } else {
                best
            }
        })
    }

    /// Mean fitness, or `None` for an empty population.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn average_fitness(&self) -> Option<f64> {
        if self.individuals.is_empty() {
            return None;
        }
        let sum = self
            .individuals
            .iter()
            .map(EvaluatedCandidate::fitness)
            .sum::<f64>();
        Some(sum / self.individuals.len() as f64)
    }
}

/// Validated operators and rates driving one generation step.
///
/// Built by [`GeneticAlgorithmParams::validate`](crate::params::GeneticAlgorithmParams::validate).
#[derive(Debug, Clone)]
pub struct PopulationEvolver<'a> {
    pub(crate) catalog: &'a ItemCatalog,
    pub(crate) capacity: f64,
    pub(crate) population_size: usize,
    pub(crate) tournament_size: usize,
    pub(crate) crossover: Crossover,
    pub(crate) crossover_rate: f64,
    pub(crate) mutation: Mutation,
    pub(crate) mutation_rate: f64,
}

impl PopulationEvolver<'_> {
    #[must_use]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    #[must_use]
    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    #[must_use]
    pub fn crossover(&self) -> Crossover {
        self.crossover
    }

    #[must_use]
    pub fn mutation(&self) -> Mutation {
        self.mutation
    }

    /// Creates a random initial population of the configured size.
    pub fn random_population<R>(&self, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        Population::random(self.catalog, self.capacity, self.population_size, rng)
    }

    /// Checks that `population` can be evolved by this evolver.
    pub fn check_population(&self, population: &Population) -> Result<(), ConfigError> {
        if population.len() != self.population_size {
            return Err(ConfigError::PopulationSizeMismatch {
                expected: self.population_size,
                actual: population.len(),
            });
        }
        if let Some(ind) = population
            .individuals
            .iter()
            .find(|ind| ind.genome().len() != self.catalog.len())
        {
            return Err(ConfigError::GenomeLengthMismatch {
                expected: self.catalog.len(),
                actual: ind.genome().len(),
            });
        }
        Ok(())
    }

    /// Recomputes every fitness against this evolver's catalog and capacity.
    ///
    /// A population built with [`Population::random`] or
    /// [`Population::from_candidates`] may have been scored at another
    /// capacity.
    #[must_use]
    pub fn rescore(&self, population: Population) -> Population {
        let individuals = population
            .individuals
            .into_iter()
            .map(|ind| ind.reevaluate(self.catalog, self.capacity))
            .collect();
        Population { individuals }
    }

    /// Produces the next generation from `population`.
    ///
    /// # Panics
    ///
    /// Panics if the population is smaller than the tournament size.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let parents = &population.individuals;
        let mut offspring = Vec::with_capacity(self.population_size + 1);

        while offspring.len() < self.population_size {
            let p1 = tournament_select(parents, self.tournament_size, rng);
            let p2 = tournament_select(parents, self.tournament_size, rng);

            let (mut child1, mut child2) = if rng.random_bool(self.crossover_rate) {
                self.crossover.apply(p1.genome(), p2.genome(), rng)
            } else {
                (p1.to_candidate(), p2.to_candidate())
            };

            if rng.random_bool(self.mutation_rate) {
                self.mutation.apply(&mut child1, rng);
                self.mutation.apply(&mut child2, rng);
            }

            offspring.push(child1.evaluate(self.catalog, self.capacity));
            offspring.push(child2.evaluate(self.catalog, self.capacity));
        }
        offspring.truncate(self.population_size);

        // stable sort keeps parents ahead of offspring on equal fitness
        let mut pool = parents.clone();
        pool.extend(offspring);
        pool.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
        pool.truncate(self.population_size);

        Population { individuals: pool }
    }
}
