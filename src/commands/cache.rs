use crate::cache;
use crate::cli::{CacheArgs, CacheSubcommand};
use crate::error::Result;

pub fn run(args: CacheArgs) -> Result<()> {
    // Handle subcommands
    if let Some(command) = args.command {
        match command {
            CacheSubcommand::List => {
                list_cached_packages()?;
                return Ok(());
            }
            CacheSubcommand::Clear(clear_args) => {
                if let Some(name) = clear_args.only {
                    forget_package(&name)?;
                } else {
                    clear_all_cache()?;
                }
                return Ok(());
            }
        }
    }

    // Default: show only cache statistics
    show_cache_stats()?;

    Ok(())
}

fn show_cache_stats() -> Result<()> {
    let cache_root = cache::cache_dir();
    let stats = cache::cache_stats(&cache_root)?;

    println!("Cache Statistics:");
    println!("  Location: {}", cache_root.display());
    println!("  Packages: {}", stats.packages);
    println!("  Files: {}", stats.files);
    println!("  Size: {}", stats.formatted_size());

    if stats.packages == 0 {
        println!("\nCache is empty.");
    } else {
        println!("\nRun 'duffel cache list' to list cached packages.");
        println!("Run 'duffel cache clear' to remove everything from cache.");
        println!("Run 'duffel cache clear --only <package>' to forget a specific package.");
    }

    Ok(())
}

fn list_cached_packages() -> Result<()> {
    let cache_root = cache::cache_dir();
    let packages = cache::list_cached_packages(&cache_root)?;

    if packages.is_empty() {
        println!("No cached packages.");
        return Ok(());
    }

    println!("Cached packages ({}):", packages.len());
    for package in &packages {
        println!("  {} ({})", package.name, package.version);
    }

    Ok(())
}

fn clear_all_cache() -> Result<()> {
    cache::clear_cache(&cache::cache_dir())?;
    println!("Cache cleared successfully.");
    Ok(())
}

fn forget_package(name: &str) -> Result<()> {
    cache::forget_package(&cache::cache_dir(), name)?;
    println!("Forgot cached package: {}", name);
    Ok(())
}
