//! The generation loop and its per-generation history.

use rand::Rng;
use serde::Serialize;

use crate::{
    ConfigError,
    candidate::EvaluatedCandidate,
    item::ItemCatalog,
    params::GeneticAlgorithmParams,
    population::{Population, PopulationEvolver},
};

/// Statistics of a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub diversity: usize,
    pub average_fitness: f64,
    pub best_fitness: f64,
}

impl GenerationStats {
    /// # Panics
    ///
    /// Panics if the population is empty.
    #[must_use]
    pub fn compute(generation: usize, population: &Population) -> Self {
        Self {
            generation,
            diversity: population.diversity(),
            average_fitness: population.average_fitness().unwrap(),
            best_fitness: population.best().unwrap().fitness(),
        }
    }
}

/// Per-generation statistics as parallel arrays, generation 0 included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct History {
    pub generations: Vec<usize>,
    pub diversity: Vec<usize>,
    pub average_fitness: Vec<f64>,
    pub best_fitness: Vec<f64>,
}

impl History {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            diversity: Vec::with_capacity(capacity),
            average_fitness: Vec::with_capacity(capacity),
            best_fitness: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats.generation);
        self.diversity.push(stats.diversity);
        self.average_fitness.push(stats.average_fitness);
        self.best_fitness.push(stats.best_fitness);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Iterates over recorded generations in order.
    pub fn iter(&self) -> impl Iterator<Item = GenerationStats> + '_ {
        (0..self.len()).map(|i| GenerationStats {
            generation: self.generations[i],
            diversity: self.diversity[i],
            average_fitness: self.average_fitness[i],
            best_fitness: self.best_fitness[i],
        })
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionOutcome {
    pub best: EvaluatedCandidate,
    pub history: History,
}

/// Evolves `population` for `generations` steps.
///
/// `population` is first rescored against the evolver's catalog and capacity.
/// Generation 0 statistics are taken from it before any step, so the returned
/// history has `generations + 1` entries. The best individual is the first
/// maximal one of the final population.
pub fn evolve<R>(
    population: Population,
    generations: usize,
    evolver: &PopulationEvolver<'_>,
    rng: &mut R,
) -> Result<EvolutionOutcome, ConfigError>
where
    R: Rng + ?Sized,
{
    evolver.check_population(&population)?;
    let mut population = evolver.rescore(population);

    let mut history = History::with_capacity(generations + 1);
    let initial = GenerationStats::compute(0, &population);
    log::debug!(
        "Generation 0: Best Fitness = {}, Average Fitness = {:.3}, Diversity = {}",
        initial.best_fitness,
        initial.average_fitness,
        initial.diversity
    );
    history.record(initial);

    for generation in 1..=generations {
        population = evolver.evolve(&population, rng);
        let stats = GenerationStats::compute(generation, &population);
        log::info!(
            "Generation {generation}: Best Fitness = {}, Average Fitness = {:.3}, Diversity = {}",
            stats.best_fitness,
            stats.average_fitness,
            stats.diversity
        );
        history.record(stats);
    }

    let best = population.best().unwrap().clone();
    Ok(EvolutionOutcome { best, history })
}

/// Validates `params`, draws a random initial population and evolves it.
pub fn run<R>(
    catalog: &ItemCatalog,
    params: &GeneticAlgorithmParams,
    rng: &mut R,
) -> Result<EvolutionOutcome, ConfigError>
where
    R: Rng + ?Sized,
{
    let evolver = params.validate(catalog)?;
    log::debug!(
        "Evolving {} items at capacity {}: population {}, tournament {}, crossover {:?} at {}, \
         mutation {:?} at {}",
        catalog.len(),
        evolver.capacity(),
        evolver.population_size(),
        evolver.tournament_size(),
        evolver.crossover(),
        params.crossover_rate,
        evolver.mutation(),
        params.mutation_rate,
    );
    let population = evolver.random_population(rng);
    evolve(population, params.generations, &evolver, rng)
}
