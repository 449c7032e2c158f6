use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    inspect::{self, InspectArgs},
    run::{self, RunArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "jabeja-sim", about = "Ja-be-Ja graph partitioning simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Partition a METIS graph and write per-round reports.
    Run(RunArgs),
    /// Print size, initial edge cut and hash of a METIS graph as JSON.
    Inspect(InspectArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Inspect(args) => inspect::run(&args),
    }
}
