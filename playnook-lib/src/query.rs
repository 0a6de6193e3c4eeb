//! Search and tag-filter operations over the catalog.
//!
//! Both are pure functions; the worker in [`crate::engine`] calls them
//! off the UI thread, and frontends may call them directly when no
//! worker is running. Matching always goes through the record's
//! language fallback chain, so a record untranslated for the active
//! language is matched against its fallback text.

use playnook_core::Game;

/// Tag-matching semantics for [`filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterLogic {
    /// Every selected tag must be present.
    And,
    /// At least one selected tag must be present.
    Or,
}

/// Case-insensitive substring search against title, description, or any
/// tag for `lang`. A blank term short-circuits to the full catalog.
pub fn search(games: &[Game], term: &str, lang: &str) -> Vec<Game> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return games.to_vec();
    }

    games
        .iter()
        .filter(|game| {
            game.title_in(lang).to_lowercase().contains(&term)
                || game.description_in(lang).to_lowercase().contains(&term)
                || game
                    .tags_in(lang)
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}

/// Filter by selected tags against each record's tag list for `lang`.
/// An empty selection short-circuits to the full catalog.
pub fn filter(games: &[Game], tags: &[String], logic: FilterLogic, lang: &str) -> Vec<Game> {
    if tags.is_empty() {
        return games.to_vec();
    }

    games
        .iter()
        .filter(|game| {
            let game_tags = game.tags_in(lang);
            match logic {
                FilterLogic::And => tags.iter().all(|tag| game_tags.contains(tag)),
                FilterLogic::Or => tags.iter().any(|tag| game_tags.contains(tag)),
            }
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str, title: &str, description: &str, tags: &[&str]) -> Game {
        let mut g = Game {
            id: id.to_string(),
            ..Game::default()
        };
        g.title.insert("en", title.to_string());
        g.description.insert("en", description.to_string());
        g.tags
            .insert("en", tags.iter().map(|t| t.to_string()).collect());
        g
    }

    fn catalog() -> Vec<Game> {
        vec![
            game("a", "Block Drop", "Stack falling blocks", &["puzzle", "2d"]),
            game("b", "Word Hunt", "Find hidden words", &["puzzle"]),
            game("c", "Sky Racer", "Arcade flying action", &["racing", "3d"]),
        ]
    }

    fn ids(games: &[Game]) -> Vec<&str> {
        games.iter().map(|g| g.id.as_str()).collect()
    }

    #[test]
    fn test_blank_search_returns_full_catalog() {
        let all = catalog();
        assert_eq!(search(&all, "", "en").len(), all.len());
        assert_eq!(search(&all, "   ", "en").len(), all.len());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let all = catalog();
        assert_eq!(ids(&search(&all, "BLOCK", "en")), ["a"]);
    }

    #[test]
    fn test_search_matches_description_and_tags() {
        let all = catalog();
        assert_eq!(ids(&search(&all, "hidden", "en")), ["b"]);
        assert_eq!(ids(&search(&all, "racing", "en")), ["c"]);
    }

    #[test]
    fn test_search_uses_fallback_language() {
        let all = catalog();
        // No Japanese translations exist; matching falls back to English.
        assert_eq!(ids(&search(&all, "word", "ja")), ["b"]);
    }

    #[test]
    fn test_empty_tag_selection_returns_full_catalog() {
        let all = catalog();
        assert_eq!(filter(&all, &[], FilterLogic::And, "en").len(), all.len());
        assert_eq!(filter(&all, &[], FilterLogic::Or, "en").len(), all.len());
    }

    #[test]
    fn test_and_or_example() {
        let all = catalog();
        let tags = vec!["puzzle".to_string(), "2d".to_string()];

        assert_eq!(ids(&filter(&all, &tags, FilterLogic::And, "en")), ["a"]);
        assert_eq!(ids(&filter(&all, &tags, FilterLogic::Or, "en")), ["a", "b"]);
    }

    #[test]
    fn test_and_result_is_subset_of_or_result() {
        let all = catalog();
        let tags = vec!["puzzle".to_string(), "racing".to_string()];

        let and_ids = filter(&all, &tags, FilterLogic::And, "en");
        let or_ids = filter(&all, &tags, FilterLogic::Or, "en");
        for g in &and_ids {
            assert!(or_ids.iter().any(|o| o.id == g.id));
        }
    }

    #[test]
    fn test_filter_with_no_matches() {
        let all = catalog();
        let tags = vec!["vr".to_string()];
        assert!(filter(&all, &tags, FilterLogic::Or, "en").is_empty());
    }
}
