//! The preference record and its merge rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cap on the recently-played list.
pub const MAX_RECENTLY_PLAYED: usize = 5;

/// Per-browser (and, once authenticated, per-identity) preference
/// state. Field names match the persisted wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceRecord {
    /// Game id → favorited marker. Absence means not favorited.
    pub favorites: BTreeMap<String, bool>,

    /// Up to [`MAX_RECENTLY_PLAYED`] distinct game ids, most recent
    /// first.
    pub recently_played: Vec<String>,
}

impl PreferenceRecord {
    /// Flip a game's favorite marker. Returns whether the game is
    /// favorited afterwards.
    pub fn toggle_favorite(&mut self, game_id: &str) -> bool {
        if self.favorites.remove(game_id).is_some() {
            false
        } else {
            self.favorites.insert(game_id.to_string(), true);
            true
        }
    }

    pub fn is_favorite(&self, game_id: &str) -> bool {
        self.favorites.get(game_id).copied().unwrap_or(false)
    }

    /// Record a game load: move (or insert) the id at the front and
    /// truncate. An id already present moves without duplicating.
    pub fn add_recently_played(&mut self, game_id: &str) {
        self.recently_played.retain(|id| id != game_id);
        self.recently_played.insert(0, game_id.to_string());
        self.recently_played.truncate(MAX_RECENTLY_PLAYED);
    }

    /// Merge the remote copy into this record.
    ///
    /// Favorites are unioned with remote values winning per key.
    /// Recently-played takes remote entries first, then local, keeping
    /// the first occurrence of each id and truncating. The asymmetry
    /// (remote-wins vs. union) matches the deployed portal's behavior.
    pub fn merge_remote(&mut self, remote: &PreferenceRecord) {
        for (id, marked) in &remote.favorites {
            self.favorites.insert(id.clone(), *marked);
        }

        let mut merged: Vec<String> = Vec::with_capacity(MAX_RECENTLY_PLAYED);
        for id in remote
            .recently_played
            .iter()
            .chain(self.recently_played.iter())
        {
            if merged.len() == MAX_RECENTLY_PLAYED {
                break;
            }
            if !merged.contains(id) {
                merged.push(id.clone());
            }
        }
        self.recently_played = merged;
    }
}
