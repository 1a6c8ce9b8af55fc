//! Genetic algorithm for the 0/1 knapsack problem.
//!
//! Given a catalog of items, each with a weight and an importance, this crate
//! searches for the subset that maximizes total importance without exceeding
//! a weight capacity.
//!
//! # How It Works
//!
//! 1. **Population** - Each individual is a bit string with one bit per item
//! 2. **Fitness** - Total importance when the knapsack fits, otherwise the
//!    (negative) overflow `capacity - total_weight`
//! 3. **Selection** - Parents are chosen by tournament
//! 4. **Variation** - Single- or multi-point crossover, then single- or
//!    multi-point bit-flip mutation
//! 5. **Culling** - Parents and offspring compete and the fittest half survives
//! 6. **Repeat** - For a fixed number of generations, recording diversity and
//!    fitness statistics along the way
//!
//! # Architecture
//!
//! ```text
//! ItemCatalog
//!     ↓ scores
//! Candidate (genome + fitness)
//!     ↓ collected into
//! Population ── diversity, best, average
//!     ↓ stepped by
//! PopulationEvolver (selection, crossover, mutation, culling)
//!     ↓ driven by
//! evolve() ── History + best candidate
//! ```
//!
//! # Example
//!
//! ```
//! use knapsack_ga::{
//!     evolution,
//!     item::{Item, ItemCatalog},
//!     params::GeneticAlgorithmParams,
//! };
//! use rand::SeedableRng as _;
//!
//! let catalog = ItemCatalog::new(vec![
//!     Item::new(10.0, 5.0),
//!     Item::new(20.0, 8.0),
//!     Item::new(30.0, 10.0),
//!     Item::new(15.0, 6.0),
//! ])?;
//! let params = GeneticAlgorithmParams {
//!     population_size: 10,
//!     tournament_size: 3,
//!     generations: 15,
//!     max_weight: 30.0,
//!     ..GeneticAlgorithmParams::default()
//! };
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let outcome = evolution::run(&catalog, &params, &mut rng)?;
//! assert_eq!(outcome.history.len(), 16);
//! assert!(outcome.best.is_feasible());
//! # Ok::<(), knapsack_ga::ConfigError>(())
//! ```
//!
//! # Determinism
//!
//! Every stochastic operation takes the random number generator as an
//! argument. Seeding the generator reproduces a run exactly; the order in
//! which draws are made is documented in [`population`].
//!
//! # Current Limitations
//!
//! - **Single objective**: Importance is the only optimized quantity
//! - **Fixed rates**: Crossover and mutation rates do not adapt during a run
//! - **Sequential**: Fitness evaluation runs on the calling thread

pub mod candidate;
pub mod evolution;
pub mod genome;
pub mod item;
pub mod params;
pub mod population;
pub mod selection;
pub mod variation;

/// Rejected configuration or input data.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("item catalog is empty")]
    EmptyCatalog,
    #[display(
        "item #{index} has invalid weight {weight} or importance {importance} (must be finite and non-negative)"
    )]
    InvalidItem {
        index: usize,
        weight: f64,
        importance: f64,
    },
    #[display("population size must be positive")]
    ZeroPopulationSize,
    #[display("tournament size must be positive")]
    ZeroTournamentSize,
    #[display("tournament size {tournament_size} exceeds population size {population_size}")]
    TournamentTooLarge {
        tournament_size: usize,
        population_size: usize,
    },
    #[display("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[display("number of crossover points must be positive")]
    ZeroCrossoverPoints,
    #[display("capacity must be finite and non-negative, got {capacity}")]
    InvalidCapacity { capacity: f64 },
    #[display("genome length {actual} does not match catalog length {expected}")]
    GenomeLengthMismatch { expected: usize, actual: usize },
    #[display("population has {actual} individuals, expected {expected}")]
    PopulationSizeMismatch { expected: usize, actual: usize },
}
