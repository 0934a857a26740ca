use clap::Parser;
use truefunded::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
