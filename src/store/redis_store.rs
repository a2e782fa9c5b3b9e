//! Redis-backed remote store.

use redis::Commands;

use super::{RemoteStore, StoreError};

/// Talks to Redis with plain `GET`/`SET`.
///
/// A connection is opened per call; there is no timeout or retry.
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    /// Create a store for a `redis://` URL. Does not connect yet.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: redis::Client::open(url)?,
        })
    }
}

impl RemoteStore for RedisStore {
    fn name(&self) -> &str {
        "redis"
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.client.get_connection()?;
        let value: Option<Vec<u8>> = conn.get(key)?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut conn = self.client.get_connection()?;
        conn.set::<_, _, ()>(key, value)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_bad_url() {
        assert!(RedisStore::open("not a url").is_err());
    }

    #[test]
    fn test_open_does_not_connect() {
        // Nothing listens here; opening must still succeed
        let store = RedisStore::open("redis://127.0.0.1:1/").unwrap();
        assert_eq!(store.name(), "redis");
    }
}
