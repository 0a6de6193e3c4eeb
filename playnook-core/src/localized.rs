//! Language-keyed record fields and the fallback chain.
//!
//! Every localized field on a game record (title, description, tags)
//! resolves through the same chain: active language → default language
//! → first available translation. The chain lives in one place,
//! [`Localized::resolve`], so display and filtering cannot drift.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lang::DEFAULT_LANGUAGE;

/// A value translated into zero or more languages, keyed by language code.
///
/// Backed by a `BTreeMap` so the "first available" fallback step is
/// deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localized<T>(BTreeMap<String, T>);

/// A localized single string (title, description).
pub type LocalizedText = Localized<String>;

/// A localized ordered tag list.
pub type LocalizedTags = Localized<Vec<String>>;

impl<T> Localized<T> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the value for a language, replacing any previous one.
    pub fn insert(&mut self, lang: impl Into<String>, value: T) -> &mut Self {
        self.0.insert(lang.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve the value for `lang` through the fallback chain:
    /// `lang` → [`DEFAULT_LANGUAGE`] → first available translation.
    ///
    /// Returns `None` only when no translation exists at all; a record
    /// missing the active language falls back silently.
    pub fn resolve(&self, lang: &str) -> Option<&T> {
        self.0
            .get(lang)
            .or_else(|| self.0.get(DEFAULT_LANGUAGE))
            .or_else(|| self.0.values().next())
    }
}

impl LocalizedText {
    /// Resolved text for `lang`, or the empty string when untranslated.
    pub fn text(&self, lang: &str) -> &str {
        self.resolve(lang).map(String::as_str).unwrap_or("")
    }
}

impl LocalizedTags {
    /// Resolved tag list for `lang`, or the empty slice when untranslated.
    pub fn list(&self, lang: &str) -> &[String] {
        self.resolve(lang).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<T, K: Into<String>> FromIterator<(K, T)> for Localized<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
