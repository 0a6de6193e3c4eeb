//! Catalog document schema and structural validation.

use playnook_core::Game;
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// The whole-document shape of the catalog endpoint: one object with a
/// `games` array. There is no schema version field; a document that
/// does not match this shape degrades to a load error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub games: Vec<Game>,
}

impl CatalogDocument {
    /// Parse and validate a catalog payload.
    ///
    /// A missing `games` field, a non-array `games` value, or any
    /// malformed record fails the whole document.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(text).map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_document() {
        let doc = CatalogDocument::from_json(
            r#"{"games": [{"id": "a", "title": {"en": "A"}}, {"id": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.games.len(), 2);
        assert_eq!(doc.games[0].id, "a");
    }

    #[test]
    fn test_empty_games_array_is_valid() {
        let doc = CatalogDocument::from_json(r#"{"games": []}"#).unwrap();
        assert!(doc.games.is_empty());
    }

    #[test]
    fn test_missing_games_field() {
        let err = CatalogDocument::from_json(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn test_non_array_games_field() {
        let err = CatalogDocument::from_json(r#"{"games": "lots"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(CatalogDocument::from_json("not json").is_err());
    }
}
