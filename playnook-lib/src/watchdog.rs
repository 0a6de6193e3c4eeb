//! Game-player load watchdog.
//!
//! The embedded player emits one load signal when its frame comes up.
//! If no signal arrives within the deadline the player UI flips to an
//! error state with a retry affordance — the one user-facing retry loop
//! in the portal besides the catalog itself.

use tokio::sync::oneshot;
use tokio::time::Duration;

/// How long to wait for the player's load signal.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    TimedOut,
}

/// Wait for the load signal, up to `timeout`.
///
/// A dropped sender counts as a timeout: the player went away without
/// ever loading.
pub async fn await_load(signal: oneshot::Receiver<()>, timeout: Duration) -> LoadOutcome {
    match tokio::time::timeout(timeout, signal).await {
        Ok(Ok(())) => LoadOutcome::Loaded,
        Ok(Err(_)) | Err(_) => LoadOutcome::TimedOut,
    }
}
