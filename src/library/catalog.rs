//! In-memory catalog of stock examples for one SDK version.
//!
//! The catalog is built once from a directory tree and never mutated
//! afterwards:
//!
//! ```text
//! <root>/
//! ├── auth/                 # category
//! │   ├── login.html        # example "login" -> /auth/login
//! │   └── logout.html
//! └── tests/                # hidden category, still resolvable
//!     └── init.html
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use super::content::{empty_example, ContentId, Example};

/// Categories left out of listings. They still resolve by direct URL.
const HIDDEN_CATEGORIES: &[&str] = &["bugs", "fbml", "hidden", "secret", "tests"];

/// Whether a category name belongs to the hidden set
pub fn is_hidden(category: &str) -> bool {
    HIDDEN_CATEGORIES.contains(&category)
}

/// Errors that abort a catalog load
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read category {}: {source}", .path.display())]
    ReadCategory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read example {}: {source}", .path.display())]
    ReadExample {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A named group of examples, one per directory
#[derive(Debug, Clone)]
pub struct Category {
    /// Directory name
    pub name: String,

    /// Examples in directory listing order
    pub examples: Vec<Arc<Example>>,

    /// Excluded from listings
    pub hidden: bool,
}

impl Category {
    /// Find an example by its name
    pub fn find_example(&self, name: &str) -> Option<&Arc<Example>> {
        self.examples.iter().find(|e| e.name == name)
    }
}

/// All categories for one SDK version plus a fingerprint index
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Categories in directory listing order
    pub categories: Vec<Category>,

    /// Trimmed-content fingerprint to example. Last write wins on duplicates.
    pub reverse: HashMap<ContentId, Arc<Example>>,
}

impl Catalog {
    /// Walk `root` and build a catalog.
    ///
    /// Any unreadable directory or file aborts the whole load.
    pub fn load_dir(root: &Path) -> Result<Self, LoadError> {
        let category_dirs = sorted_entries(root).map_err(|source| LoadError::ReadRoot {
            path: root.to_path_buf(),
            source,
        })?;

        let mut catalog = Self {
            categories: Vec::with_capacity(category_dirs.len()),
            reverse: HashMap::new(),
        };
        let empty = empty_example();
        catalog.reverse.insert(empty.content_id(), empty);

        for (category_name, category_dir, file_type) in category_dirs {
            // Symlinked categories are skipped like any other non-directory
            if !file_type.is_dir() {
                warn!(
                    "Got unexpected file instead of directory for category: {}",
                    category_name
                );
                continue;
            }

            let files = sorted_entries(&category_dir).map_err(|source| LoadError::ReadCategory {
                path: category_dir.clone(),
                source,
            })?;

            let mut category = Category {
                hidden: is_hidden(&category_name),
                examples: Vec::with_capacity(files.len()),
                name: category_name,
            };

            for (file_name, file_path, _) in files {
                let content = fs::read(&file_path).map_err(|source| LoadError::ReadExample {
                    path: file_path.clone(),
                    source,
                })?;

                let example = Arc::new(Example::cataloged(
                    &category.name,
                    strip_extension(&file_name),
                    content,
                ));
                catalog.reverse.insert(example.content_id(), Arc::clone(&example));
                category.examples.push(example);
            }

            catalog.categories.push(category);
        }

        Ok(catalog)
    }

    /// Find a category by its name
    pub fn find_category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Look up an example whose trimmed content matches `content`
    pub fn find_by_content(&self, content: &[u8]) -> Option<&Arc<Example>> {
        self.reverse.get(&ContentId::of_trimmed(content))
    }

    /// Categories shown in listings
    pub fn visible_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| !c.hidden)
    }

    /// Total examples across all categories
    pub fn example_count(&self) -> usize {
        self.categories.iter().map(|c| c.examples.len()).sum()
    }
}

/// Directory entries as `(file name, path, type)`, sorted by file name.
///
/// The type comes from the entry itself and does not follow symlinks.
fn sorted_entries(dir: &Path) -> std::io::Result<Vec<(String, PathBuf, fs::FileType)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, entry.path(), entry.file_type()?));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// `login.html` -> `login`; names without an extension are kept whole
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => &file_name[..pos],
        _ => file_name,
    }
}
