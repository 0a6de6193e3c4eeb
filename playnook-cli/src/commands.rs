//! Command implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use playnook_catalog::{CACHE_KEY, CACHE_TIME_KEY, CatalogStore, HttpCatalogSource};
use playnook_core::{Game, KeyValueStore, MemoryStore, is_supported};
use playnook_lib::settings;
use playnook_lib::{
    FilterLogic, Paginator, QueryEngine, QueryOp, QueryOutcome, recommended_picks, shuffled_hot,
    tag_index, vip_picks,
};
use playnook_lib::FileStore;
use playnook_prefs::PreferenceStore;

/// Resolved launch context shared by every command.
pub(crate) struct Portal {
    pub catalog_url: String,
    pub lang: String,
    pub storage_root: PathBuf,
}

/// A loaded session catalog.
struct LoadedCatalog {
    store: CatalogStore<HttpCatalogSource>,
    games: Arc<[Game]>,
}

/// Open the local store, falling back to a memory-only session when the
/// filesystem backend is unavailable.
fn open_store(root: &Path) -> Arc<dyn KeyValueStore> {
    match FileStore::open(root) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::warn!("local storage unavailable ({e}); running in-memory for this session");
            Arc::new(MemoryStore::new())
        }
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().expect("Failed to create tokio runtime")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Load the catalog (cache-first). On failure prints the retry prompt
/// and returns `None` — no command ever operates on a partial catalog.
fn load_catalog(
    portal: &Portal,
    store: &Arc<dyn KeyValueStore>,
    rt: &tokio::runtime::Runtime,
) -> Option<LoadedCatalog> {
    rt.block_on(async {
        let pb = spinner("Loading catalog...");

        let source = match HttpCatalogSource::new(&portal.catalog_url) {
            Ok(source) => source,
            Err(e) => {
                pb.finish_and_clear();
                eprintln!(
                    "{} Couldn't set up the catalog client: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    e,
                );
                return None;
            }
        };

        let mut catalog = CatalogStore::new(source);
        match catalog.load(store.as_ref()).await {
            Ok(games) => {
                pb.finish_and_clear();
                Some(LoadedCatalog {
                    store: catalog,
                    games,
                })
            }
            Err(e) => {
                pb.finish_and_clear();
                eprintln!(
                    "{} Couldn't load the game catalog: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    e,
                );
                eprintln!("  Check the catalog URL and your connection, then retry.");
                None
            }
        }
    })
}

fn badge(game: &Game) -> &'static str {
    if game.vip {
        " [VIP]"
    } else if game.is_hot {
        " [HOT]"
    } else if game.is_recommended {
        " [REC]"
    } else {
        ""
    }
}

fn print_game_line(game: &Game, lang: &str) {
    let tags = game.tags_in(lang).join(", ");
    println!(
        "  {}{} [{}]{}",
        game.title_in(lang).if_supports_color(Stdout, |t| t.bold()),
        badge(game),
        game.id.if_supports_color(Stdout, |t| t.cyan()),
        if tags.is_empty() {
            String::new()
        } else {
            format!("  ({tags})")
        },
    );
}

pub(crate) fn run_fetch(portal: &Portal, refresh: bool) {
    let store = open_store(&portal.storage_root);

    if refresh {
        let _ = store.remove(CACHE_KEY);
        let _ = store.remove(CACHE_TIME_KEY);
    }

    let rt = runtime();
    let Some(loaded) = load_catalog(portal, &store, &rt) else {
        return;
    };

    let vip = loaded.games.iter().filter(|g| g.vip).count();
    let hot = loaded.games.iter().filter(|g| g.is_hot).count();
    let recommended = loaded.games.iter().filter(|g| g.is_recommended).count();

    println!(
        "{} Catalog ready: {} games ({} VIP, {} hot, {} recommended)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        loaded.games.len(),
        vip,
        hot,
        recommended,
    );
}

pub(crate) fn run_list(portal: &Portal, page_size: usize, pages: Option<usize>) {
    let store = open_store(&portal.storage_root);
    let rt = runtime();
    let Some(loaded) = load_catalog(portal, &store, &rt) else {
        return;
    };

    let mut paginator = Paginator::new(page_size);
    let mut page = 1;
    let range = paginator.catalog_ready(loaded.games.len());

    println!("{}", format!("--- page {page} ---").if_supports_color(Stdout, |t| t.bold()));
    for game in &loaded.games[range] {
        print_game_line(game, &portal.lang);
    }

    while pages.is_none_or(|limit| page < limit) {
        let Some(range) = paginator.load_more() else {
            break;
        };
        page += 1;
        println!("{}", format!("--- page {page} ---").if_supports_color(Stdout, |t| t.bold()));
        for game in &loaded.games[range] {
            print_game_line(game, &portal.lang);
        }
    }

    if paginator.has_more() {
        println!(
            "  ... {} more (rerun with --pages or a larger --page-size)",
            loaded.games.len() - paginator.revealed(),
        );
    }
}

pub(crate) fn run_search(portal: &Portal, term: &str) {
    let store = open_store(&portal.storage_root);
    let rt = runtime();
    let Some(loaded) = load_catalog(portal, &store, &rt) else {
        return;
    };

    let matches = rt.block_on(async {
        let engine = QueryEngine::spawn();
        let pending = engine.dispatch(
            loaded.games.clone(),
            portal.lang.clone(),
            QueryOp::Search {
                term: term.to_string(),
            },
        );
        pending.outcome().await
    });

    match matches {
        Ok(QueryOutcome::Matches(games)) => print_results(&games, &portal.lang),
        Ok(QueryOutcome::Superseded) => {}
        Err(e) => eprintln!(
            "{} Search failed: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        ),
    }
}

pub(crate) fn run_filter(portal: &Portal, tags: Vec<String>, logic: FilterLogic) {
    let store = open_store(&portal.storage_root);
    let rt = runtime();
    let Some(loaded) = load_catalog(portal, &store, &rt) else {
        return;
    };

    let matches = rt.block_on(async {
        let engine = QueryEngine::spawn();
        let pending = engine.dispatch(
            loaded.games.clone(),
            portal.lang.clone(),
            QueryOp::Filter { tags, logic },
        );
        pending.outcome().await
    });

    match matches {
        Ok(QueryOutcome::Matches(games)) => print_results(&games, &portal.lang),
        Ok(QueryOutcome::Superseded) => {}
        Err(e) => eprintln!(
            "{} Filter failed: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        ),
    }
}

fn print_results(games: &[Game], lang: &str) {
    if games.is_empty() {
        println!("No games matched.");
        return;
    }
    println!("{} match(es):", games.len());
    for game in games {
        print_game_line(game, lang);
    }
}

pub(crate) fn run_tags(portal: &Portal) {
    let store = open_store(&portal.storage_root);
    let rt = runtime();
    let Some(loaded) = load_catalog(portal, &store, &rt) else {
        return;
    };

    for entry in tag_index(&loaded.games, &portal.lang) {
        println!(
            "  {:>4}  {}",
            entry.count,
            entry.tag.if_supports_color(Stdout, |t| t.bold()),
        );
    }
}

pub(crate) fn run_sections(portal: &Portal) {
    let store = open_store(&portal.storage_root);
    let rt = runtime();
    let Some(loaded) = load_catalog(portal, &store, &rt) else {
        return;
    };

    let mut rng = rand::thread_rng();

    println!("{}", "Recommended:".if_supports_color(Stdout, |t| t.bold()));
    for game in recommended_picks(&loaded.games, &mut rng) {
        print_game_line(&game, &portal.lang);
    }

    println!("{}", "VIP:".if_supports_color(Stdout, |t| t.bold()));
    for game in vip_picks(&loaded.games, &mut rng) {
        print_game_line(&game, &portal.lang);
    }

    println!("{}", "Hot:".if_supports_color(Stdout, |t| t.bold()));
    for game in shuffled_hot(&loaded.games, &mut rng) {
        print_game_line(&game, &portal.lang);
    }
}

pub(crate) fn run_show(portal: &Portal, id: &str) {
    let store = open_store(&portal.storage_root);
    let rt = runtime();
    let Some(loaded) = load_catalog(portal, &store, &rt) else {
        return;
    };

    let Some(game) = loaded.store.game_by_id(id) else {
        eprintln!(
            "{} No game with id \"{}\"",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            id,
        );
        return;
    };

    let prefs = PreferenceStore::open(store);

    println!(
        "{}{}",
        game.title_in(&portal.lang)
            .if_supports_color(Stdout, |t| t.bold()),
        badge(game),
    );
    println!("  id:        {}", game.id);
    println!("  about:     {}", game.description_in(&portal.lang));
    println!("  tags:      {}", game.tags_in(&portal.lang).join(", "));
    println!("  thumbnail: {}", game.thumbnail_url);
    println!("  play at:   {}", game.iframe_url);
    println!(
        "  favorite:  {}",
        if prefs.is_favorite(&game.id) { "yes" } else { "no" },
    );
}

pub(crate) fn run_fav_list(portal: &Portal) {
    let store = open_store(&portal.storage_root);
    let rt = runtime();
    let Some(loaded) = load_catalog(portal, &store, &rt) else {
        return;
    };

    let prefs = PreferenceStore::open(store);
    let favorites = &prefs.record().favorites;
    if favorites.is_empty() {
        println!("No favorites yet.");
        return;
    }

    for id in favorites.keys() {
        match loaded.store.game_by_id(id) {
            Some(game) => print_game_line(game, &portal.lang),
            None => println!("  {id} (no longer in the catalog)"),
        }
    }
}

pub(crate) fn run_fav_toggle(portal: &Portal, id: &str) {
    let store = open_store(&portal.storage_root);
    let mut prefs = PreferenceStore::open(store);

    if prefs.toggle_favorite(id) {
        println!(
            "{} Added \"{}\" to favorites",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            id,
        );
    } else {
        println!(
            "{} Removed \"{}\" from favorites",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            id,
        );
    }
}

pub(crate) fn run_recent(portal: &Portal, played: Option<&str>) {
    let store = open_store(&portal.storage_root);
    let rt = runtime();
    let Some(loaded) = load_catalog(portal, &store, &rt) else {
        return;
    };

    let mut prefs = PreferenceStore::open(store);

    if let Some(id) = played {
        if loaded.store.game_by_id(id).is_none() {
            eprintln!(
                "{} No game with id \"{}\"",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                id,
            );
            return;
        }
        prefs.add_recently_played(id);
    }

    let recent = &prefs.record().recently_played;
    if recent.is_empty() {
        println!("Nothing played yet.");
        return;
    }

    for id in recent {
        match loaded.store.game_by_id(id) {
            Some(game) => print_game_line(game, &portal.lang),
            None => println!("  {id} (no longer in the catalog)"),
        }
    }
}

pub(crate) fn run_config_show(portal: &Portal) {
    println!("catalog url:  {}", portal.catalog_url);
    println!("language:     {}", portal.lang);
    println!("storage root: {}", portal.storage_root.display());
    println!("settings:     {}", settings::settings_path().display());
}

pub(crate) fn run_config_set_language(lang: &str) {
    if !is_supported(lang) {
        eprintln!(
            "Note: \"{lang}\" is not in the portal language list; records will fall back per-field."
        );
    }
    match settings::save_language(Some(lang)) {
        Ok(()) => println!(
            "{} Language set to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            lang,
        ),
        Err(e) => eprintln!(
            "{} Couldn't save settings: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        ),
    }
}

pub(crate) fn run_config_set_url(url: &str) {
    match settings::save_catalog_url(Some(url)) {
        Ok(()) => println!(
            "{} Catalog URL set to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            url,
        ),
        Err(e) => eprintln!(
            "{} Couldn't save settings: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        ),
    }
}
