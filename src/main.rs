mod cli;
mod commands;
mod logging;
mod report;

use std::process;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
