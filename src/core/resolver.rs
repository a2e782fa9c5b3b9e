//! Turns request paths into examples, and saves user content.
//!
//! Accepted paths:
//! - `/` - the stock welcome example
//! - `/<category>/<name>` - a catalog example
//! - `/raw/<category>/<name>`, `/simple/<category>/<name>` - same example, other display mode
//! - `/saved/<id>` - content previously saved to the remote store

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::library::{empty_example, CatalogRegistry, Example, LoadError, SdkVersion};
use crate::store::{make_key, RemoteStore, StoreError};

/// Largest accepted saved example, in bytes
pub const MAX_SAVED_BYTES: usize = 10_240;

/// Path segment that marks a saved example
const SAVED_MARKER: &str = "saved";

/// Display modes the front end strips before resolution
const DISPLAY_MODES: &[&str] = &["raw", "simple"];

/// Errors surfaced to whoever renders the example
#[derive(Debug, Error)]
pub enum ExampleError {
    #[error("Invalid URL: {path}")]
    InvalidUrl { path: String },

    #[error("Example not found: {path}")]
    SavedNotFound { path: String },

    #[error("Could not find category: {category}")]
    CategoryNotFound { category: String },

    #[error("Could not find example: {example}")]
    ExampleNotFound { example: String },

    #[error("Maximum allowed size is 10 kilobytes: {actual} > {limit}")]
    TooLarge { actual: usize, limit: usize },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Examples for {version} are unavailable: {source}")]
    CatalogUnavailable {
        version: SdkVersion,
        source: Arc<LoadError>,
    },
}

impl ExampleError {
    /// HTTP status the front end should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ExampleError::InvalidUrl { .. }
            | ExampleError::SavedNotFound { .. }
            | ExampleError::CategoryNotFound { .. }
            | ExampleError::ExampleNotFound { .. } => 404,
            ExampleError::TooLarge { .. } => 413,
            ExampleError::Store(_) | ExampleError::CatalogUnavailable { .. } => 500,
        }
    }

    /// True for the not-found class, malformed URLs included
    pub fn is_not_found(&self) -> bool {
        self.status_code() == 404
    }
}

/// Resolves examples against the catalogs and the remote store
pub struct Resolver {
    catalogs: Arc<CatalogRegistry>,
    store: Arc<dyn RemoteStore>,
    key_prefix: String,
}

impl Resolver {
    /// Create a resolver over injected catalogs and store
    pub fn new(
        catalogs: Arc<CatalogRegistry>,
        store: Arc<dyn RemoteStore>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            catalogs,
            store,
            key_prefix: key_prefix.into(),
        }
    }

    /// The catalogs this resolver reads from
    pub fn catalogs(&self) -> &CatalogRegistry {
        &self.catalogs
    }

    /// Resolve a request path for an SDK version
    pub fn load(&self, version: SdkVersion, path: &str) -> Result<Arc<Example>, ExampleError> {
        let mut parts: Vec<&str> = path.split('/').collect();

        if parts.len() == 2 && parts[1].is_empty() {
            return Ok(empty_example());
        } else if parts.len() == 4 {
            if !DISPLAY_MODES.contains(&parts[1]) {
                return Err(ExampleError::InvalidUrl {
                    path: path.to_string(),
                });
            }
            parts = vec!["", parts[2], parts[3]];
        } else if parts.len() != 3 {
            return Err(ExampleError::InvalidUrl {
                path: path.to_string(),
            });
        }

        if parts[1] == SAVED_MARKER {
            return self.load_saved(parts[2], path);
        }

        let catalog = self
            .catalogs
            .catalog(version)
            .map_err(|source| ExampleError::CatalogUnavailable { version, source })?;

        let category = catalog
            .find_category(parts[1])
            .ok_or_else(|| ExampleError::CategoryNotFound {
                category: parts[1].to_string(),
            })?;

        let example = category
            .find_example(parts[2])
            .ok_or_else(|| ExampleError::ExampleNotFound {
                example: parts[2].to_string(),
            })?;

        Ok(Arc::clone(example))
    }

    fn load_saved(&self, id: &str, path: &str) -> Result<Arc<Example>, ExampleError> {
        let key = make_key(&self.key_prefix, id);
        let content = self.store.get(&key).map_err(|e| {
            error!(store = self.store.name(), %key, "Error in store get: {}", e);
            e
        })?;

        match content {
            Some(content) => Ok(Arc::new(Example::stored(path, content))),
            None => Err(ExampleError::SavedNotFound {
                path: path.to_string(),
            }),
        }
    }

    /// Save content under a caller-chosen id.
    ///
    /// Rejects content over [`MAX_SAVED_BYTES`] before touching the store.
    pub fn save(&self, id: &str, content: &[u8]) -> Result<(), ExampleError> {
        if content.len() > MAX_SAVED_BYTES {
            return Err(ExampleError::TooLarge {
                actual: content.len(),
                limit: MAX_SAVED_BYTES,
            });
        }

        let key = make_key(&self.key_prefix, id);
        self.store.set(&key, content).map_err(|e| {
            error!(store = self.store.name(), %key, "Error in store set: {}", e);
            e
        })?;

        debug!(%key, bytes = content.len(), "Saved example");
        Ok(())
    }
}
