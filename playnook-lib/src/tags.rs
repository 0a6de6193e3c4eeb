//! Tag index: unique tags with occurrence counts for the filter UI.

use std::collections::BTreeMap;

use playnook_core::Game;

/// One tag and how many catalog records carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Collect every tag visible for `lang` (through the fallback chain),
/// counted and sorted by count descending, then tag name.
pub fn tag_index(games: &[Game], lang: &str) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for game in games {
        for tag in game.tags_in(lang) {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut index: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    index.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    index
}
