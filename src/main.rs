mod cli;
mod commands;
mod merge;
mod outcome;
mod utils;

use clap::Parser;

fn main() {
    let args = cli::Args::parse();

    let result = match args.command {
        cli::Commands::Classify { root } => commands::classify::run(root),
        cli::Commands::Merge { root } => commands::merge::run(root),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
