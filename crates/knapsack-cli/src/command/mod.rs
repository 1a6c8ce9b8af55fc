use clap::{Parser, Subcommand};

use self::{config::ConfigArg, items::ItemsArg, solve::SolveArg};

mod config;
mod items;
mod solve;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Search for the best knapsack packing with a genetic algorithm
    Solve(#[clap(flatten)] SolveArg),
    /// Print the built-in item catalog as JSON
    Items(#[clap(flatten)] ItemsArg),
    /// Print the default run parameters as JSON
    Config(#[clap(flatten)] ConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Solve(SolveArg::default())) {
        Mode::Solve(arg) => solve::run(&arg)?,
        Mode::Items(arg) => items::run(&arg)?,
        Mode::Config(arg) => config::run(&arg)?,
    }
    Ok(())
}
