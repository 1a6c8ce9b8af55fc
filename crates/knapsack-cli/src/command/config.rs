use std::path::PathBuf;

use knapsack_ga::params::GeneticAlgorithmParams;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ConfigArg) -> anyhow::Result<()> {
    let ConfigArg { output } = arg;
    Output::save_json(&GeneticAlgorithmParams::default(), output.clone())
}
