//! Catalog loading for the Playnook portal.
//!
//! The catalog is a single JSON document holding every game record. It
//! is fetched whole, validated structurally, cached locally with a
//! one-hour TTL, and immutable for the rest of the session. There is no
//! partial or streamed loading and no write path back to the document.

pub mod cache;
pub mod document;
pub mod source;
pub mod store;

pub use cache::{CACHE_KEY, CACHE_TIME_KEY, CatalogCache};
pub use document::CatalogDocument;
pub use source::{CatalogSource, HttpCatalogSource};
pub use store::CatalogStore;

use thiserror::Error;

/// Errors raised while loading the catalog.
///
/// Frontends collapse every variant into one "catalog unavailable"
/// state with a retry affordance; no partial catalog is ever shown.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog endpoint returned HTTP {0}")]
    Status(u16),

    #[error("malformed catalog document: {0}")]
    Malformed(String),
}
