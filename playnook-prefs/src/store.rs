//! The preference store: local-first persistence plus remote sync.

use playnook_core::KeyValueStore;

use crate::outbox::{Mutation, Outbox};
use crate::record::PreferenceRecord;
use crate::remote::{RemoteError, RemoteStore};

/// Store key for the favorites mapping.
pub const FAVORITES_KEY: &str = "favorites";

/// Store key for the recently-played list.
pub const RECENTLY_PLAYED_KEY: &str = "recentlyPlayed";

/// Prefix for one-shot dismissible-prompt flags.
const PROMPT_KEY_PREFIX: &str = "prompt_";

/// Favorites and recently-played, persisted locally on every mutation.
///
/// A store whose backend fails on open simply starts empty and runs
/// in-memory for the session; a backend that fails on write keeps the
/// in-memory state and logs. Remote mirroring only happens once an
/// identity is attached, and always through the outbox.
pub struct PreferenceStore<S: KeyValueStore> {
    store: S,
    record: PreferenceRecord,
    identity: Option<String>,
    synced: bool,
    outbox: Outbox,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Open the store, loading any locally persisted record.
    pub fn open(store: S) -> Self {
        let record = load_record(&store);
        Self {
            store,
            record,
            identity: None,
            synced: false,
            outbox: Outbox::new(),
        }
    }

    pub fn record(&self) -> &PreferenceRecord {
        &self.record
    }

    pub fn is_favorite(&self, game_id: &str) -> bool {
        self.record.is_favorite(game_id)
    }

    /// Flip a game's favorite marker and persist. Returns whether the
    /// game is favorited afterwards.
    pub fn toggle_favorite(&mut self, game_id: &str) -> bool {
        let now_favorite = self.record.toggle_favorite(game_id);
        self.persist_favorites();
        if self.identity.is_some() {
            self.outbox.push(Mutation::favorites(&self.record.favorites));
        }
        now_favorite
    }

    /// Record a game load and persist.
    pub fn add_recently_played(&mut self, game_id: &str) {
        self.record.add_recently_played(game_id);
        self.persist_recently_played();
        if self.identity.is_some() {
            self.outbox
                .push(Mutation::recently_played(&self.record.recently_played));
        }
    }

    /// Attach an authenticated identity. Changing identity re-arms the
    /// one-shot remote sync.
    pub fn attach_identity(&mut self, uid: impl Into<String>) {
        let uid = uid.into();
        if self.identity.as_deref() != Some(uid.as_str()) {
            self.synced = false;
        }
        self.identity = Some(uid);
    }

    /// Detach the identity (logout). Local state is untouched.
    pub fn detach_identity(&mut self) {
        self.identity = None;
        self.synced = false;
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn pending_mutations(&self) -> usize {
        self.outbox.len()
    }

    /// One-shot merge with the remote document for the attached
    /// identity.
    ///
    /// When a remote document exists, local and remote are merged (see
    /// [`PreferenceRecord::merge_remote`]) and the merged record is
    /// written back to both stores so they converge. When none exists,
    /// the local record is uploaded as-is. Runs at most once per
    /// attached identity; with no identity it is a no-op.
    pub async fn sync_from_remote<R: RemoteStore>(&mut self, remote: &R) -> Result<(), RemoteError> {
        let Some(uid) = self.identity.clone() else {
            return Ok(());
        };
        if self.synced {
            return Ok(());
        }

        match remote.fetch(&uid).await? {
            Some(remote_record) => {
                self.record.merge_remote(&remote_record);
                self.persist_favorites();
                self.persist_recently_played();
                remote.put(&uid, &self.record).await?;
            }
            None => {
                remote.put(&uid, &self.record).await?;
            }
        }

        self.synced = true;
        Ok(())
    }

    /// Replay queued remote mutations. No-op without an identity.
    pub async fn flush_outbox<R: RemoteStore>(&mut self, remote: &R) {
        if let Some(uid) = self.identity.clone() {
            self.outbox.flush(remote, &uid).await;
        }
    }

    /// Whether a dismissible prompt has already been shown.
    pub fn was_prompt_shown(&self, name: &str) -> bool {
        matches!(
            self.store.get(&format!("{PROMPT_KEY_PREFIX}{name}")),
            Ok(Some(value)) if value == "true"
        )
    }

    /// Mark a dismissible prompt as shown.
    pub fn mark_prompt_shown(&mut self, name: &str) {
        if let Err(e) = self.store.set(&format!("{PROMPT_KEY_PREFIX}{name}"), "true") {
            log::debug!("prompt flag write failed: {e}");
        }
    }

    fn persist_favorites(&self) {
        match serde_json::to_string(&self.record.favorites) {
            Ok(raw) => {
                if let Err(e) = self.store.set(FAVORITES_KEY, &raw) {
                    log::debug!("favorites write failed, keeping in-memory state: {e}");
                }
            }
            Err(e) => log::debug!("favorites serialization failed: {e}"),
        }
    }

    fn persist_recently_played(&self) {
        match serde_json::to_string(&self.record.recently_played) {
            Ok(raw) => {
                if let Err(e) = self.store.set(RECENTLY_PLAYED_KEY, &raw) {
                    log::debug!("recently-played write failed, keeping in-memory state: {e}");
                }
            }
            Err(e) => log::debug!("recently-played serialization failed: {e}"),
        }
    }
}

/// Load the locally persisted record. Any read or parse failure yields
/// that field's empty default — the session then runs from memory.
fn load_record(store: &impl KeyValueStore) -> PreferenceRecord {
    let mut record = PreferenceRecord::default();

    match store.get(FAVORITES_KEY) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(favorites) => record.favorites = favorites,
            Err(e) => log::debug!("stored favorites invalid, starting empty: {e}"),
        },
        Ok(None) => {}
        Err(e) => log::debug!("favorites read failed, starting empty: {e}"),
    }

    match store.get(RECENTLY_PLAYED_KEY) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(list) => record.recently_played = list,
            Err(e) => log::debug!("stored recently-played invalid, starting empty: {e}"),
        },
        Ok(None) => {}
        Err(e) => log::debug!("recently-played read failed, starting empty: {e}"),
    }

    record
}
