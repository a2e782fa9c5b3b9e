//! Command-line interface for rell.
//!
//! Resolves, saves and lists examples the same way the web front end does,
//! which makes it handy for checking a catalog deployment.

use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{self, ResolvedConfig};
use crate::core::Resolver;
use crate::library::{ContentId, SdkVersion};

/// rell - example catalog and saved example resolution
#[derive(Parser, Debug)]
#[command(name = "rell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a path and print the example
    Show {
        /// Request path, e.g. /auth/login or /saved/<id>
        path: String,

        /// SDK version catalog to resolve against
        #[arg(long, value_enum, default_value = "old")]
        sdk: Sdk,

        /// Print metadata as JSON instead of the content
        #[arg(long)]
        json: bool,
    },

    /// Save content to the remote store
    Save {
        /// Identifier to save under (defaults to the content fingerprint)
        #[arg(long)]
        id: Option<String>,

        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List categories and examples
    List {
        /// SDK version catalog to list
        #[arg(long, value_enum, default_value = "old")]
        sdk: Sdk,

        /// Include hidden categories
        #[arg(short, long)]
        all: bool,
    },

    /// Load every catalog and report problems
    Check,

    /// Show resolved configuration (debug)
    Config,
}

/// SDK version for CLI (maps to SdkVersion)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Sdk {
    /// Legacy SDK
    Old,

    /// Current SDK
    Mu,
}

impl From<Sdk> for SdkVersion {
    fn from(s: Sdk) -> Self {
        match s {
            Sdk::Old => SdkVersion::Old,
            Sdk::Mu => SdkVersion::Mu,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let config = config::config()?;

        match self.command {
            Commands::Show { path, sdk, json } => show_example(config, &path, sdk.into(), json),
            Commands::Save { id, input } => save_example(config, id, input),
            Commands::List { sdk, all } => list_catalog(config, sdk.into(), all),
            Commands::Check => check_catalogs(config),
            Commands::Config => show_config(config),
        }
    }
}

/// Build a resolver and load its catalogs before anything is served
fn ready_resolver(config: &ResolvedConfig) -> Result<Resolver> {
    let resolver = config.resolver()?;
    resolver
        .catalogs()
        .preload()
        .context("Examples catalog failed to load")?;
    Ok(resolver)
}

/// Resolve and print one example
fn show_example(config: &ResolvedConfig, path: &str, version: SdkVersion, json: bool) -> Result<()> {
    let resolver = ready_resolver(config)?;
    let example = resolver
        .load(version, path)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.status_code(), e))?;

    if json {
        let value = serde_json::json!({
            "name": example.name,
            "title": example.title,
            "url": example.url,
            "autoRun": example.auto_run,
            "bytes": example.content.len(),
            "contentId": example.content_id().as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        io::stdout()
            .write_all(&example.content)
            .context("Failed to write example to stdout")?;
    }

    Ok(())
}

/// Save stdin or a file and print its URL
fn save_example(config: &ResolvedConfig, id: Option<String>, input: Option<PathBuf>) -> Result<()> {
    let content = if let Some(path) = input {
        std::fs::read(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?
    } else if !io::stdin().is_terminal() {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        anyhow::bail!("No input provided. Use --input <file> or pipe to stdin");
    };

    let id = id.unwrap_or_else(|| ContentId::of_trimmed(&content).into_string());

    // Saving never needs the catalogs
    let resolver = config.resolver()?;
    resolver
        .save(&id, &content)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.status_code(), e))?;

    println!("/saved/{}", id);
    Ok(())
}

/// Print the catalog for a version
fn list_catalog(config: &ResolvedConfig, version: SdkVersion, all: bool) -> Result<()> {
    let resolver = ready_resolver(config)?;
    let catalog = resolver
        .catalogs()
        .catalog(version)
        .map_err(|e| anyhow::anyhow!("{} catalog unavailable: {}", version, e))?;

    for category in &catalog.categories {
        if category.hidden && !all {
            continue;
        }
        let marker = if category.hidden { " (hidden)" } else { "" };
        println!("{}{}", category.name, marker);
        for example in &category.examples {
            println!("  {:<30} {}", example.name, example.url);
        }
    }

    Ok(())
}

/// Load both catalogs and summarize them
fn check_catalogs(config: &ResolvedConfig) -> Result<()> {
    let resolver = ready_resolver(config)?;

    println!("{:<6} {:>10} {:>10} {:>8}  ROOT", "SDK", "CATEGORIES", "EXAMPLES", "HIDDEN");
    for version in SdkVersion::ALL {
        let catalog = resolver
            .catalogs()
            .catalog(version)
            .map_err(|e| anyhow::anyhow!("{} catalog unavailable: {}", version, e))?;
        let hidden = catalog.categories.iter().filter(|c| c.hidden).count();
        println!(
            "{:<6} {:>10} {:>10} {:>8}  {}",
            version,
            catalog.categories.len(),
            catalog.example_count(),
            hidden,
            resolver.catalogs().root(version).display()
        );
    }

    Ok(())
}

/// Show resolved configuration
fn show_config(config: &ResolvedConfig) -> Result<()> {
    println!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["rell", "show", "/auth/login", "--sdk", "mu", "--json"]).unwrap();
        match cli.command {
            Commands::Show { path, sdk, json } => {
                assert_eq!(path, "/auth/login");
                assert_eq!(SdkVersion::from(sdk), SdkVersion::Mu);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["rell", "list"]).unwrap();
        match cli.command {
            Commands::List { sdk, all } => {
                assert_eq!(SdkVersion::from(sdk), SdkVersion::Old);
                assert!(!all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_sdk() {
        assert!(Cli::try_parse_from(["rell", "show", "/", "--sdk", "new"]).is_err());
    }
}
