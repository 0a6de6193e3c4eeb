//! The game record served by the catalog document.

use serde::{Deserialize, Serialize};

use crate::localized::{LocalizedTags, LocalizedText};

/// One entry in the portal catalog.
///
/// Records are externally supplied and read-only to this layer. `id` is
/// assumed unique within a catalog; nothing here deduplicates. Field
/// names follow the catalog document's camelCase wire shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,

    #[serde(default)]
    pub title: LocalizedText,

    #[serde(default)]
    pub description: LocalizedText,

    #[serde(default)]
    pub tags: LocalizedTags,

    #[serde(default)]
    pub thumbnail_url: String,

    #[serde(default)]
    pub iframe_url: String,

    /// Premium-section flag; VIP games are partitioned from the free list.
    #[serde(default)]
    pub vip: bool,

    #[serde(default)]
    pub is_hot: bool,

    #[serde(default)]
    pub is_recommended: bool,
}

impl Game {
    /// Display title for `lang`, via the shared fallback chain.
    pub fn title_in(&self, lang: &str) -> &str {
        self.title.text(lang)
    }

    /// Display description for `lang`, via the shared fallback chain.
    pub fn description_in(&self, lang: &str) -> &str {
        self.description.text(lang)
    }

    /// Tag list for `lang`, via the shared fallback chain. Used for both
    /// display and filtering.
    pub fn tags_in(&self, lang: &str) -> &[String] {
        self.tags.list(lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let json = r#"{
            "id": "bubble-pop",
            "title": {"en": "Bubble Pop"},
            "description": {"en": "Pop them all"},
            "tags": {"en": ["puzzle", "casual"]},
            "thumbnailUrl": "/thumbs/bubble-pop.jpg",
            "iframeUrl": "https://cdn.example/bubble-pop/index.html",
            "vip": false,
            "isHot": true,
            "isRecommended": false
        }"#;

        let game: Game = serde_json::from_str(json).unwrap();
        assert_eq!(game.id, "bubble-pop");
        assert_eq!(game.title_in("en"), "Bubble Pop");
        assert_eq!(game.tags_in("en"), ["puzzle", "casual"]);
        assert!(game.is_hot);
        assert!(!game.vip);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let game: Game = serde_json::from_str(r#"{"id": "minimal"}"#).unwrap();
        assert_eq!(game.title_in("en"), "");
        assert!(game.tags_in("en").is_empty());
        assert!(!game.is_recommended);
    }
}
