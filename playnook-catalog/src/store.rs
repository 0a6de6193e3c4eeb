//! The session catalog: cache-first load, immutable snapshot after.

use std::sync::Arc;

use playnook_core::{Game, KeyValueStore};

use crate::{CatalogError, cache::CatalogCache, source::CatalogSource};

/// Holds the resident catalog for a session.
///
/// `load` resolves from the cache when it is still valid, otherwise
/// from the injected [`CatalogSource`]; either way the result is an
/// `Arc<[Game]>` snapshot shared read-only with every consumer
/// (pagination, queries, section picks). A failed load leaves the
/// catalog empty — no partial catalog is ever resident.
pub struct CatalogStore<S> {
    source: S,
    catalog: Option<Arc<[Game]>>,
}

impl<S: CatalogSource> CatalogStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: None,
        }
    }

    /// Load the catalog, cache-first.
    ///
    /// On a cache hit the source is not contacted at all. On a miss the
    /// document is fetched, validated, and written back to the cache
    /// opportunistically (a failed cache write is swallowed).
    pub async fn load(&mut self, store: &dyn KeyValueStore) -> Result<Arc<[Game]>, CatalogError> {
        if let Some(games) = CatalogCache::read(store) {
            log::info!("catalog loaded from cache ({} games)", games.len());
            let catalog: Arc<[Game]> = games.into();
            self.catalog = Some(catalog.clone());
            return Ok(catalog);
        }

        match self.source.fetch().await {
            Ok(doc) => {
                log::info!("catalog fetched ({} games)", doc.games.len());
                CatalogCache::write(store, &doc.games);
                let catalog: Arc<[Game]> = doc.games.into();
                self.catalog = Some(catalog.clone());
                Ok(catalog)
            }
            Err(e) => {
                self.catalog = None;
                Err(e)
            }
        }
    }

    /// The resident snapshot, if a load has succeeded this session.
    pub fn catalog(&self) -> Option<Arc<[Game]>> {
        self.catalog.clone()
    }

    /// Look up a single record in the resident snapshot.
    pub fn game_by_id(&self, id: &str) -> Option<&Game> {
        self.catalog
            .as_deref()
            .and_then(|games| games.iter().find(|g| g.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CatalogDocument;
    use playnook_core::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        payload: Result<&'static str, u16>,
        fetches: AtomicUsize,
    }

    impl StubSource {
        fn ok(payload: &'static str) -> Self {
            Self {
                payload: Ok(payload),
                fetches: AtomicUsize::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                payload: Err(status),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    impl CatalogSource for StubSource {
        async fn fetch(&self) -> Result<CatalogDocument, CatalogError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match self.payload {
                Ok(text) => CatalogDocument::from_json(text),
                Err(status) => Err(CatalogError::Status(status)),
            }
        }
    }

    const TWO_GAMES: &str = r#"{"games": [{"id": "a"}, {"id": "b"}]}"#;

    #[tokio::test]
    async fn test_load_fetches_and_fills_cache() {
        let store = MemoryStore::new();
        let mut cat = CatalogStore::new(StubSource::ok(TWO_GAMES));

        let games = cat.load(&store).await.unwrap();
        assert_eq!(games.len(), 2);
        assert!(store.get(crate::CACHE_KEY).unwrap().is_some());
        assert!(store.get(crate::CACHE_TIME_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_valid_cache_skips_fetch() {
        let store = MemoryStore::new();

        let mut first = CatalogStore::new(StubSource::ok(TWO_GAMES));
        first.load(&store).await.unwrap();

        let source = StubSource::ok(TWO_GAMES);
        let mut second = CatalogStore::new(source);
        let games = second.load(&store).await.unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(second.source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_catalog_empty() {
        let store = MemoryStore::new();
        let mut cat = CatalogStore::new(StubSource::failing(503));

        let err = cat.load(&store).await.unwrap_err();
        assert!(matches!(err, CatalogError::Status(503)));
        assert!(cat.catalog().is_none());
        assert!(cat.game_by_id("a").is_none());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_a_load_error() {
        let store = MemoryStore::new();
        let mut cat = CatalogStore::new(StubSource::ok(r#"{"games": 7}"#));

        let err = cat.load(&store).await.unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
        assert!(cat.catalog().is_none());
    }

    #[tokio::test]
    async fn test_game_by_id() {
        let store = MemoryStore::new();
        let mut cat = CatalogStore::new(StubSource::ok(TWO_GAMES));
        cat.load(&store).await.unwrap();

        assert_eq!(cat.game_by_id("b").map(|g| g.id.as_str()), Some("b"));
        assert!(cat.game_by_id("zzz").is_none());
    }
}
