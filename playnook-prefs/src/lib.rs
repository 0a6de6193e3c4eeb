//! User preferences: favorites and recently-played.
//!
//! Local-first by design. Every mutation lands in the injected
//! key-value store synchronously; when an authenticated identity is
//! attached, mutations are also queued for the remote per-identity
//! document and replayed through an outbox with bounded retry. Remote
//! failure never blocks or breaks the local flow.

pub mod outbox;
pub mod record;
pub mod remote;
pub mod store;

pub use outbox::{MAX_ATTEMPTS, Mutation, Outbox};
pub use record::{MAX_RECENTLY_PLAYED, PreferenceRecord};
pub use remote::{PrefField, RemoteError, RemoteStore};
pub use store::{FAVORITES_KEY, PreferenceStore, RECENTLY_PLAYED_KEY};
