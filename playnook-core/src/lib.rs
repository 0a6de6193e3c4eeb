//! Core data model for the Playnook game portal.
//!
//! Defines the game record and its localized fields, the supported
//! language list, and the key-value store abstraction used for all
//! local persistence (catalog cache, preferences, prompt flags).
//! Higher layers inject a store implementation instead of reading any
//! ambient global.

pub mod game;
pub mod lang;
pub mod localized;
pub mod store;

pub use game::Game;
pub use lang::{DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES, is_supported};
pub use localized::{Localized, LocalizedTags, LocalizedText};
pub use store::{KeyValueStore, MemoryStore, StoreError};
