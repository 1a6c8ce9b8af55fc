//! Run parameters and their validation.
//!
//! [`GeneticAlgorithmParams`] is the raw, serializable configuration. Nothing
//! in it is trusted until [`GeneticAlgorithmParams::validate`] turns it into a
//! [`PopulationEvolver`] with concrete [`Crossover`] and [`Mutation`]
//! operators. All configuration errors surface there, before any generation
//! runs.

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    item::ItemCatalog,
    population::PopulationEvolver,
    variation::{Crossover, Mutation},
};

/// Operator family selector shared by crossover and mutation.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::FromStr,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum OperatorKind {
    #[default]
    #[display("single")]
    Single,
    #[display("multi")]
    Multi,
}

/// Which type flag picks the mutation operator.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum MutationDispatch {
    /// Honor `mutation_type`.
    #[default]
    #[display("independent")]
    Independent,
    /// Ignore `mutation_type` and reuse `crossover_type`, as older runs did.
    #[display("follow-crossover-type")]
    FollowCrossoverType,
}

/// Raw configuration of a run.
///
/// Missing fields deserialize to their [`Default`] values, so a partial JSON
/// document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticAlgorithmParams {
    /// Individuals per generation
    pub population_size: usize,
    /// Competitors sampled per tournament (at most `population_size`)
    pub tournament_size: usize,
    /// Evolution steps after the initial generation
    pub generations: usize,
    pub crossover_type: OperatorKind,
    /// Probability that a mating pair is recombined instead of copied
    pub crossover_rate: f64,
    /// Cut points for multi-point crossover, clamped to `genome_len - 1`
    pub num_crossover_points: usize,
    pub mutation_type: OperatorKind,
    /// Probability that both children of a pair are mutated
    pub mutation_rate: f64,
    /// Per-bit flip probability of multi-point mutation
    pub multi_mutation_rate: f64,
    /// Knapsack capacity
    pub max_weight: f64,
    pub mutation_dispatch: MutationDispatch,
}

impl Default for GeneticAlgorithmParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            tournament_size: 4,
            generations: 20,
            crossover_type: OperatorKind::Single,
            crossover_rate: 0.9,
            num_crossover_points: 2,
            mutation_type: OperatorKind::Multi,
            mutation_rate: 0.9,
            multi_mutation_rate: 0.3,
            max_weight: 250.0,
            mutation_dispatch: MutationDispatch::Independent,
        }
    }
}

impl GeneticAlgorithmParams {
    /// Mutation family actually applied under the configured dispatch.
    #[must_use]
    pub fn effective_mutation_type(&self) -> OperatorKind {
        match self.mutation_dispatch {
            MutationDispatch::Independent => self.mutation_type,
            MutationDispatch::FollowCrossoverType => self.crossover_type,
        }
    }

    /// Checks every parameter and builds the evolver for `catalog`.
    pub fn validate<'a>(
        &self,
        catalog: &'a ItemCatalog,
    ) -> Result<PopulationEvolver<'a>, ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulationSize);
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::ZeroTournamentSize);
        }
        if self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentTooLarge {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        check_rate("multi_mutation_rate", self.multi_mutation_rate)?;
        if self.num_crossover_points == 0 {
            return Err(ConfigError::ZeroCrossoverPoints);
        }
        if !self.max_weight.is_finite() || self.max_weight < 0.0 {
            return Err(ConfigError::InvalidCapacity {
                capacity: self.max_weight,
            });
        }

        let crossover = match self.crossover_type {
            OperatorKind::Single => Crossover::SinglePoint,
            OperatorKind::Multi => Crossover::MultiPoint {
                points: self.num_crossover_points,
            },
        };
        let mutation = match self.effective_mutation_type() {
            OperatorKind::Single => Mutation::SinglePoint,
            OperatorKind::Multi => Mutation::MultiPoint {
                rate: self.multi_mutation_rate,
            },
        };

        Ok(PopulationEvolver {
            catalog,
            capacity: self.max_weight,
            population_size: self.population_size,
            tournament_size: self.tournament_size,
            crossover,
            crossover_rate: self.crossover_rate,
            mutation,
            mutation_rate: self.mutation_rate,
        })
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}
