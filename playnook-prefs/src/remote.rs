//! Remote per-identity preference document.
//!
//! One document per authenticated user, mirroring the local record's
//! shape: read whole on first sync, field-updated afterwards. The
//! backing service is injected behind [`RemoteStore`] so this crate
//! never talks to a vendor SDK directly.

use thiserror::Error;

use crate::record::PreferenceRecord;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// No document exists yet for this identity.
    #[error("no remote preference document for this identity")]
    NotFound,

    #[error("remote store unavailable: {0}")]
    Unavailable(String),
}

/// Which document field a mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefField {
    Favorites,
    RecentlyPlayed,
}

impl PrefField {
    /// Wire name of the field in the remote document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::RecentlyPlayed => "recentlyPlayed",
        }
    }
}

/// Backing service for remote preference documents.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// Read the whole document. `Ok(None)` when the identity has none.
    async fn fetch(&self, uid: &str) -> Result<Option<PreferenceRecord>, RemoteError>;

    /// Create or overwrite the whole document.
    async fn put(&self, uid: &str, record: &PreferenceRecord) -> Result<(), RemoteError>;

    /// Update one field of an existing document. Fails with
    /// [`RemoteError::NotFound`] when the document does not exist.
    async fn update(
        &self,
        uid: &str,
        field: PrefField,
        value: &serde_json::Value,
    ) -> Result<(), RemoteError>;
}
