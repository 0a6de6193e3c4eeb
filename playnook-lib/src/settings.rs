//! Shared application settings (catalog URL, language, storage root).
//!
//! Every frontend resolves through the same chain so the settings file
//! is always `~/.config/playnook/settings.toml` and behavior is
//! consistent regardless of how the portal is launched.

use std::io;
use std::path::{Path, PathBuf};

use playnook_core::DEFAULT_LANGUAGE;

use crate::store_fs::default_store_dir;

/// Catalog document used when nothing else is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://playnook.example/games.json";

/// Canonical path to the settings file: `~/.config/playnook/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("playnook").join("settings.toml")
}

/// Resolve the catalog URL using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `portal.catalog_url` in `settings.toml`
/// 3. [`DEFAULT_CATALOG_URL`]
pub fn resolve_catalog_url(cli_override: Option<String>) -> String {
    cli_override
        .or_else(|| load_value(&settings_path(), "portal", "catalog_url"))
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string())
}

/// Resolve the active language: CLI override → saved `portal.language`
/// → [`DEFAULT_LANGUAGE`]. The value is not validated here; records
/// fall back per-field for languages they lack.
pub fn resolve_language(cli_override: Option<String>) -> String {
    cli_override
        .or_else(|| load_value(&settings_path(), "portal", "language"))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// Resolve the local store root: CLI override → saved `storage.root` →
/// the platform data directory.
pub fn resolve_storage_root(cli_override: Option<PathBuf>) -> PathBuf {
    cli_override
        .or_else(|| load_value(&settings_path(), "storage", "root").map(PathBuf::from))
        .unwrap_or_else(default_store_dir)
}

/// Save (or clear) the configured language.
pub fn save_language(lang: Option<&str>) -> io::Result<()> {
    save_value(&settings_path(), "portal", "language", lang)
}

/// Save (or clear) the configured catalog URL.
pub fn save_catalog_url(url: Option<&str>) -> io::Result<()> {
    save_value(&settings_path(), "portal", "catalog_url", url)
}

/// Read one string value from a settings file, if set and non-empty.
fn load_value(path: &Path, section: &str, key: &str) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let value = doc.get(section)?.get(key)?.as_str()?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Surgical single-key update so unrelated sections and keys are
/// preserved. Writes atomically (temp file + rename).
fn save_value(path: &Path, section: &str, key: &str, value: Option<&str>) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(path) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let section_value = table
        .entry(section)
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let section_table = section_value
        .as_table_mut()
        .ok_or_else(|| io::Error::other(format!("[{section}] is not a table")))?;

    match value {
        Some(v) => {
            section_table.insert(key.to_string(), toml::Value::String(v.to_string()));
        }
        None => {
            section_table.remove(key);
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}
