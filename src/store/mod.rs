//! Remote key-value store for user-saved examples.
//!
//! The store is an opaque GET/SET service. Keys are namespaced as
//! `<prefix>:<id>` so saved examples can share a Redis instance with other
//! data.

pub mod memory;
pub mod redis_store;

use thiserror::Error;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Errors from a remote store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Minimal blocking key-value interface
pub trait RemoteStore: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Fetch the bytes under `key`; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// Build the namespaced store key for a saved example id
pub fn make_key(prefix: &str, id: &str) -> String {
    format!("{}:{}", prefix, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        assert_eq!(make_key("fbrell_examples", "abc"), "fbrell_examples:abc");
        assert_eq!(make_key("p", ""), "p:");
    }
}
