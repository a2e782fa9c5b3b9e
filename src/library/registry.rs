//! Per-SDK-version catalogs, loaded lazily and at most once.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::catalog::{Catalog, LoadError};

/// The two recognized catalog namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SdkVersion {
    /// The legacy JavaScript SDK
    #[default]
    Old,

    /// The current JavaScript SDK
    Mu,
}

impl SdkVersion {
    /// Both versions, in preload order
    pub const ALL: [SdkVersion; 2] = [SdkVersion::Old, SdkVersion::Mu];
}

impl std::fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SdkVersion::Old => write!(f, "old"),
            SdkVersion::Mu => write!(f, "mu"),
        }
    }
}

impl std::str::FromStr for SdkVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "old" => Ok(SdkVersion::Old),
            "mu" => Ok(SdkVersion::Mu),
            _ => anyhow::bail!("Unknown SDK version: {}", s),
        }
    }
}

/// A catalog slot: the loaded catalog, or the error that stopped the load.
type Slot = OnceLock<Result<Arc<Catalog>, Arc<LoadError>>>;

/// Owns the catalog for each SDK version.
///
/// The first request for a version walks its directory; concurrent first
/// requests wait on that single load. A failed load is remembered and never
/// retried: a broken catalog directory is a deployment error.
#[derive(Debug)]
pub struct CatalogRegistry {
    old_root: PathBuf,
    mu_root: PathBuf,
    old: Slot,
    mu: Slot,
    loads: AtomicUsize,
}

impl CatalogRegistry {
    /// Create a registry over the two catalog roots. Nothing is read yet.
    pub fn new(old_root: impl Into<PathBuf>, mu_root: impl Into<PathBuf>) -> Self {
        Self {
            old_root: old_root.into(),
            mu_root: mu_root.into(),
            old: OnceLock::new(),
            mu: OnceLock::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Directory backing a version
    pub fn root(&self, version: SdkVersion) -> &Path {
        match version {
            SdkVersion::Old => &self.old_root,
            SdkVersion::Mu => &self.mu_root,
        }
    }

    fn slot(&self, version: SdkVersion) -> &Slot {
        match version {
            SdkVersion::Old => &self.old,
            SdkVersion::Mu => &self.mu,
        }
    }

    /// Get the catalog for a version, loading it on first use
    pub fn catalog(&self, version: SdkVersion) -> Result<Arc<Catalog>, Arc<LoadError>> {
        self.slot(version)
            .get_or_init(|| {
                self.loads.fetch_add(1, Ordering::SeqCst);
                let root = self.root(version);
                match Catalog::load_dir(root) {
                    Ok(catalog) => {
                        info!(
                            %version,
                            root = %root.display(),
                            categories = catalog.categories.len(),
                            examples = catalog.example_count(),
                            "Loaded examples catalog"
                        );
                        Ok(Arc::new(catalog))
                    }
                    Err(e) => {
                        error!(%version, root = %root.display(), "Catalog load failed: {}", e);
                        Err(Arc::new(e))
                    }
                }
            })
            .clone()
    }

    /// Whether a version has been loaded (successfully or not)
    pub fn is_loaded(&self, version: SdkVersion) -> bool {
        self.slot(version).get().is_some()
    }

    /// Number of directory-tree traversals performed so far
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Load every version up front.
    ///
    /// Meant to run before serving traffic; callers should treat an error as
    /// fatal.
    pub fn preload(&self) -> anyhow::Result<()> {
        for version in SdkVersion::ALL {
            self.catalog(version)
                .map_err(|e| anyhow::anyhow!("{} catalog unavailable: {}", version, e))?;
        }
        Ok(())
    }
}
