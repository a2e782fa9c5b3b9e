//! Stock example catalogs.
//!
//! Each SDK version has its own directory of categorized examples. A
//! catalog is loaded from disk on first use and then shared read-only.
//!
//! # Storage Layout
//!
//! ```text
//! db/
//! ├── old/                  # SdkVersion::Old
//! │   └── <category>/
//! │       └── <name>.html   # served at /<category>/<name>
//! └── mu/                   # SdkVersion::Mu
//!     └── <category>/
//!         └── <name>.html
//! ```

pub mod catalog;
pub mod content;
pub mod registry;

pub use catalog::{is_hidden, Catalog, Category, LoadError};
pub use content::{empty_example, ContentId, Example, STORED_TITLE};
pub use registry::{CatalogRegistry, SdkVersion};
