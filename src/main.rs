use clap::Parser;
use planting_advisor::cli::{run, Cli};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    run(cli)
}
