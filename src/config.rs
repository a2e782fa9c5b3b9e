//! Configuration for catalog roots and the remote store.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (RELL_EXAMPLES_OLD, RELL_EXAMPLES_MU,
//!    RELL_REDIS_URL, RELL_KEY_PREFIX)
//! 2. Config file (.rell/config.yaml)
//! 3. Defaults (./db/old, ./db/mu, local Redis)
//!
//! Config file discovery:
//! - Searches current directory and parents for .rell/config.yaml
//! - Paths in config file are relative to the project root (parent of .rell/)

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::Resolver;
use crate::library::CatalogRegistry;
use crate::store::RedisStore;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Default Redis location
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1/";

/// Default namespace for saved example keys
pub const DEFAULT_KEY_PREFIX: &str = "fbrell_examples";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub examples: ExamplesConfig,
    #[serde(default)]
    pub store: Option<StoreConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamplesConfig {
    /// Catalog root for the old SDK (relative to project root)
    pub old: Option<String>,
    /// Catalog root for the mu SDK (relative to project root)
    pub mu: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub redis_url: Option<String>,
    pub key_prefix: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// Catalog root for SdkVersion::Old
    pub old_examples: PathBuf,
    /// Catalog root for SdkVersion::Mu
    pub mu_examples: PathBuf,
    /// Remote store URL
    pub redis_url: String,
    /// Namespace for saved example keys
    pub key_prefix: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Registry over the configured catalog roots
    pub fn catalog_registry(&self) -> CatalogRegistry {
        CatalogRegistry::new(self.old_examples.clone(), self.mu_examples.clone())
    }

    /// Resolver wired to the configured catalogs and Redis
    pub fn resolver(&self) -> Result<Resolver> {
        let store = RedisStore::open(&self.redis_url)
            .with_context(|| format!("Invalid Redis URL: {}", self.redis_url))?;
        Ok(Resolver::new(
            Arc::new(self.catalog_registry()),
            Arc::new(store),
            self.key_prefix.clone(),
        ))
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".rell").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// First set environment variable, else the config value, else the default
fn layered(env_key: &str, file_value: Option<String>, default: impl FnOnce() -> String) -> String {
    std::env::var(env_key)
        .ok()
        .or(file_value)
        .unwrap_or_else(default)
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config_file = find_config_file();

    let (base_dir, file) = match config_file {
        Some(ref config_path) => {
            let config = load_config_file(config_path)?;
            // Base directory is the parent of .rell/ (i.e., grandparent of config.yaml)
            let base_dir = config_path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(Path::new("."))
                .to_path_buf();
            (base_dir, Some(config))
        }
        None => (cwd, None),
    };

    let (examples, store) = match file {
        Some(config) => (config.examples, config.store),
        None => (ExamplesConfig::default(), None),
    };
    let (redis_url, key_prefix) = match store {
        Some(store) => (store.redis_url, store.key_prefix),
        None => (None, None),
    };

    let old_examples = match std::env::var("RELL_EXAMPLES_OLD") {
        Ok(path) => PathBuf::from(path),
        Err(_) => resolve_path(&base_dir, examples.old.as_deref().unwrap_or("db/old")),
    };
    let mu_examples = match std::env::var("RELL_EXAMPLES_MU") {
        Ok(path) => PathBuf::from(path),
        Err(_) => resolve_path(&base_dir, examples.mu.as_deref().unwrap_or("db/mu")),
    };

    Ok(ResolvedConfig {
        old_examples,
        mu_examples,
        redis_url: layered("RELL_REDIS_URL", redis_url, || DEFAULT_REDIS_URL.to_string()),
        key_prefix: layered("RELL_KEY_PREFIX", key_prefix, || {
            DEFAULT_KEY_PREFIX.to_string()
        }),
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
