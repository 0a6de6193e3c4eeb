//! Time-boxed local cache of the catalog snapshot.
//!
//! Two string keys in the injected key-value store: the serialized
//! games array and the write timestamp in unix milliseconds. A read is
//! a hit only while the snapshot is younger than the TTL; every failure
//! mode (absent keys, unparseable timestamp, undeserializable payload,
//! backend error) is equivalent to a miss. Writes are opportunistic and
//! never fail the caller.

use playnook_core::{Game, KeyValueStore};

/// Store key holding the serialized catalog snapshot.
pub const CACHE_KEY: &str = "catalog_cache";

/// Store key holding the snapshot timestamp (unix millis, decimal).
pub const CACHE_TIME_KEY: &str = "catalog_cache_time";

/// Snapshot validity window: one hour.
const CACHE_TTL_MILLIS: i64 = 60 * 60 * 1000;

/// Catalog cache over a key-value store.
#[derive(Debug, Default)]
pub struct CatalogCache;

impl CatalogCache {
    /// Read the cached snapshot, if present and still valid.
    pub fn read(store: &dyn KeyValueStore) -> Option<Vec<Game>> {
        let written_at = match store.get(CACHE_TIME_KEY) {
            Ok(Some(raw)) => raw.parse::<i64>().ok()?,
            Ok(None) => return None,
            Err(e) => {
                log::debug!("catalog cache timestamp read failed: {e}");
                return None;
            }
        };

        let age = chrono::Utc::now().timestamp_millis() - written_at;
        if age >= CACHE_TTL_MILLIS {
            log::debug!("catalog cache expired ({age} ms old)");
            return None;
        }

        let payload = match store.get(CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::debug!("catalog cache read failed: {e}");
                return None;
            }
        };

        match serde_json::from_str::<Vec<Game>>(&payload) {
            Ok(games) => Some(games),
            Err(e) => {
                log::debug!("catalog cache payload invalid: {e}");
                None
            }
        }
    }

    /// Write a fresh snapshot. Failures are swallowed; a cache that
    /// cannot be written behaves like a cache that always misses.
    pub fn write(store: &dyn KeyValueStore, games: &[Game]) {
        let payload = match serde_json::to_string(games) {
            Ok(p) => p,
            Err(e) => {
                log::debug!("catalog cache serialization failed: {e}");
                return;
            }
        };

        let now = chrono::Utc::now().timestamp_millis();
        if let Err(e) = store.set(CACHE_KEY, &payload) {
            log::debug!("catalog cache write failed: {e}");
            return;
        }
        if let Err(e) = store.set(CACHE_TIME_KEY, &now.to_string()) {
            log::debug!("catalog cache timestamp write failed: {e}");
        }
    }
}
