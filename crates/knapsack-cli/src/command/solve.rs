use std::path::PathBuf;

use anyhow::Context as _;
use knapsack_ga::{
    evolution,
    item::ItemCatalog,
    params::{GeneticAlgorithmParams, MutationDispatch, OperatorKind},
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    schema::{catalog, report::RunReport},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// Item catalog JSON file (array of `{"weight", "importance"}`) [default: built-in 12 boxes]
    #[arg(long)]
    items: Option<PathBuf>,
    /// Run parameters JSON file; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of individuals in each generation
    #[arg(long)]
    population_size: Option<usize>,
    /// Size of tournament for parent selection
    #[arg(long)]
    tournament_size: Option<usize>,
    /// Number of generations to evolve
    #[arg(long)]
    generations: Option<usize>,
    /// Crossover type: `single` or `multi`
    #[arg(long)]
    crossover_type: Option<OperatorKind>,
    /// Probability of crossover between two parents
    #[arg(long)]
    crossover_rate: Option<f64>,
    /// Number of cut points for multi-point crossover
    #[arg(long)]
    crossover_points: Option<usize>,
    /// Mutation type: `single` or `multi`
    #[arg(long)]
    mutation_type: Option<OperatorKind>,
    /// Probability of mutating a pair of offspring
    #[arg(long)]
    mutation_rate: Option<f64>,
    /// Probability of each bit flipping in multi-point mutation
    #[arg(long)]
    multi_mutation_rate: Option<f64>,
    /// Knapsack weight capacity
    #[arg(long)]
    max_weight: Option<f64>,
    /// Pick the mutation operator from the crossover type, ignoring `--mutation-type`
    #[arg(long)]
    couple_mutation_to_crossover: bool,
    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path for the JSON run report
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SolveArg {
    fn params(&self) -> anyhow::Result<GeneticAlgorithmParams> {
        let mut params = match &self.config {
            Some(path) => util::read_params_file(path)?,
            None => GeneticAlgorithmParams::default(),
        };
        override_with(&mut params.population_size, self.population_size);
        override_with(&mut params.tournament_size, self.tournament_size);
        override_with(&mut params.generations, self.generations);
        override_with(&mut params.crossover_type, self.crossover_type);
        override_with(&mut params.crossover_rate, self.crossover_rate);
        override_with(&mut params.num_crossover_points, self.crossover_points);
        override_with(&mut params.mutation_type, self.mutation_type);
        override_with(&mut params.mutation_rate, self.mutation_rate);
        override_with(&mut params.multi_mutation_rate, self.multi_mutation_rate);
        override_with(&mut params.max_weight, self.max_weight);
        if self.couple_mutation_to_crossover {
            params.mutation_dispatch = MutationDispatch::FollowCrossoverType;
        }
        Ok(params)
    }
}

fn override_with<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// The configured mutation type when the crossover type overrides it.
fn ignored_mutation_type(params: &GeneticAlgorithmParams) -> Option<OperatorKind> {
    (params.effective_mutation_type() != params.mutation_type).then_some(params.mutation_type)
}

pub(crate) fn run(arg: &SolveArg) -> anyhow::Result<()> {
    let items = match &arg.items {
        Some(path) => util::read_items_file(path)?,
        None => catalog::default_items(),
    };
    let catalog = ItemCatalog::new(items).context("Invalid item catalog")?;
    let params = arg.params()?;

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    log::info!(
        "Solving {} items with capacity {} (seed {seed})",
        catalog.len(),
        params.max_weight
    );
    if let Some(ignored) = ignored_mutation_type(&params) {
        log::warn!(
            "mutation type `{ignored}` is ignored; using `{}` from the crossover type",
            params.crossover_type
        );
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    let outcome =
        evolution::run(&catalog, &params, &mut rng).context("Invalid run configuration")?;

    let report = RunReport::new(seed, params, &catalog, outcome);
    println!();
    print!("{}", report.best);
    println!();

    if let Some(path) = &arg.output {
        Output::save_json(&report, Some(path.clone()))?;
        log::info!("Run report saved to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    fn write_config(name: &str, json: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("knapsack-{}-{name}.json", process::id()));
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_no_flags_yield_default_params() {
        let params = SolveArg::default().params().unwrap();
        assert_eq!(params, GeneticAlgorithmParams::default());
        assert_eq!(ignored_mutation_type(&params), None);
    }

    #[test]
    fn test_flags_override_partial_config_file() {
        let path = write_config(
            "override",
            r#"{"population_size":30,"generations":5,"crossover_type":"multi"}"#,
        );
        let arg = SolveArg {
            config: Some(path.clone()),
            generations: Some(12),
            max_weight: Some(100.0),
            ..SolveArg::default()
        };
        let params = arg.params().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(params.population_size, 30);
        assert_eq!(params.crossover_type, OperatorKind::Multi);
        assert_eq!(params.generations, 12);
        assert_eq!(params.max_weight, 100.0);
        assert_eq!(params.tournament_size, 4);
        assert_eq!(params.mutation_dispatch, MutationDispatch::Independent);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let arg = SolveArg {
            config: Some(env::temp_dir().join("knapsack-does-not-exist.json")),
            ..SolveArg::default()
        };
        assert!(arg.params().is_err());
    }

    #[test]
    fn test_couple_flag_follows_crossover_type() {
        let arg = SolveArg {
            crossover_type: Some(OperatorKind::Single),
            mutation_type: Some(OperatorKind::Multi),
            couple_mutation_to_crossover: true,
            ..SolveArg::default()
        };
        let params = arg.params().unwrap();
        assert_eq!(params.mutation_dispatch, MutationDispatch::FollowCrossoverType);
        assert_eq!(params.effective_mutation_type(), OperatorKind::Single);
        assert_eq!(ignored_mutation_type(&params), Some(OperatorKind::Multi));

        let same_types = SolveArg {
            mutation_type: Some(OperatorKind::Single),
            ..arg
        };
        assert_eq!(ignored_mutation_type(&same_types.params().unwrap()), None);
    }
}
