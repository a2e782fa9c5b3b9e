//! rell - example resolution for the SDK playground
//!
//! Examples come from two places:
//! - Stock catalogs on disk, one per SDK version, loaded lazily and cached
//!   for the life of the process
//! - A remote key-value store holding user-saved examples
//!
//! Either way the caller gets the same [`Example`].
//!
//! # Modules
//!
//! - `library`: Catalogs, content fingerprints, per-version registry
//! - `store`: Remote store interface (Redis, in-memory)
//! - `core`: Path resolution and saving
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Print a stock example
//! rell show /auth/login --sdk mu
//!
//! # Save a snippet and get its URL
//! echo "FB.init({appId: 1});" | rell save
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod library;
pub mod store;

// Re-export main types at crate root for convenience
pub use crate::core::{ExampleError, Resolver, MAX_SAVED_BYTES};
pub use crate::library::{Catalog, CatalogRegistry, Category, ContentId, Example, SdkVersion};
pub use crate::store::{MemoryStore, RedisStore, RemoteStore, StoreError};
