//! Duffel - Python project bundler
//!
//! A command line tool that resolves a dependency manifest against a local
//! package cache and bundles the cached dependencies together with the
//! project's source files into a single flat archive.

use clap::Parser;

mod archive;
mod cache;
mod cli;
mod collect;
mod commands;
mod config;
mod error;
mod fsops;
mod manifest;
mod minify;
mod progress;
mod resolver;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Bundle(args) => commands::bundle::run(args),
        Commands::Cache(args) => commands::cache::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
