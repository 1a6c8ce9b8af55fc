use std::path::PathBuf;

use crate::{schema::catalog, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ItemsArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ItemsArg) -> anyhow::Result<()> {
    let ItemsArg { output } = arg;
    Output::save_json(&catalog::default_items(), output.clone())
}
