//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Duffel - Python project bundler
///
/// Bundle a Python project and its resolved dependencies into a single flat archive.
#[derive(Parser, Debug)]
#[command(
    name = "duffel",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bundles a Python project and its dependencies into a single flat archive",
    long_about = "Duffel resolves a dependency manifest against a local package cache, then \
                  packs the cached dependency files and the project's own source files into \
                  one deflate-compressed zip with a flat import namespace.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  duffel bundle                          \x1b[90m# Bundle using ./duffel.config.json\x1b[0m\n   \
                  duffel bundle -c build/duffel.json     \x1b[90m# Bundle with an explicit config\x1b[0m\n   \
                  duffel cache                           \x1b[90m# Show dependency cache statistics\x1b[0m\n   \
                  duffel cache clear                     \x1b[90m# Drop all cached packages\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bundle the project and its dependencies into an archive
    Bundle(BundleArgs),

    /// Manage the dependency cache
    #[command(name = "cache")]
    Cache(CacheArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the bundle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Bundle with defaults:\n    duffel bundle\n\n\
                  Bundle with an explicit configuration file:\n    duffel bundle --config ./build/duffel.config.json\n\n\
                  Bundle against a different manifest:\n    duffel bundle --manifest ./Pipfile.ci")]
pub struct BundleArgs {
    /// Path to the bundle configuration file
    #[arg(long, short = 'c', default_value = "duffel.config.json")]
    pub config: PathBuf,

    /// Path to the dependency manifest
    #[arg(long, short = 'm', default_value = "Pipfile")]
    pub manifest: PathBuf,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show cache statistics:\n    duffel cache\n\n\
                  List cached packages:\n    duffel cache list\n\n\
                  Clear all cached packages:\n    duffel cache clear\n\n\
                  Forget a specific package:\n    duffel cache clear --only requests")]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: Option<CacheSubcommand>,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// List cached packages
    List,

    /// Clear cached packages
    Clear(ClearCacheArgs),
}

/// Arguments for cache clear command
#[derive(Parser, Debug)]
pub struct ClearCacheArgs {
    /// Forget only a specific package by name (its files remain until a full clear)
    #[arg(long)]
    pub only: Option<String>,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    duffel completions --shell bash > ~/.bash_completion.d/duffel\n\n\
                  Generate zsh completions:\n    duffel completions --shell zsh > ~/.zfunc/_duffel\n\n\
                  Generate fish completions:\n    duffel completions --shell fish > ~/.config/fish/completions/duffel.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
