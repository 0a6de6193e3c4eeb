//! playnook CLI
//!
//! Command-line frontend for the Playnook casual-games catalog.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use playnook_lib::FilterLogic;
use playnook_lib::settings;

mod commands;

use commands::Portal;

#[derive(Parser)]
#[command(name = "playnook")]
#[command(about = "Browse the Playnook casual-games catalog", long_about = None)]
struct Cli {
    /// Catalog document URL (overrides settings)
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    /// Display language (e.g., en, zh-CN, fr)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    /// Local data directory for cache and preferences
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and show a summary
    Fetch {
        /// Drop the local cache first and force a network fetch
        #[arg(long)]
        refresh: bool,
    },

    /// List games page by page
    List {
        /// Games revealed per page
        #[arg(long, default_value_t = 20)]
        page_size: usize,

        /// Stop after this many pages
        #[arg(short, long)]
        pages: Option<usize>,
    },

    /// Search games by title, description, or tag
    Search {
        /// Search term (case-insensitive substring)
        term: String,
    },

    /// Filter games by tags
    Filter {
        /// Tags to match (e.g., puzzle,2d)
        #[arg(value_delimiter = ',')]
        tags: Vec<String>,

        /// Require all tags (and) or any tag (or)
        #[arg(long, default_value = "and")]
        logic: LogicArg,
    },

    /// Show every tag with its game count
    Tags,

    /// Show shuffled home-page sections (recommended, VIP, hot)
    Sections,

    /// Show one game's details
    Show {
        /// Game id
        id: String,
    },

    /// Manage favorites
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },

    /// Show or record recently played games
    Recent {
        /// Record this game as just played
        #[arg(long)]
        played: Option<String>,
    },

    /// Manage portal settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum FavAction {
    /// List favorite games
    List,

    /// Toggle a game's favorite marker
    Toggle {
        /// Game id
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the resolved settings
    Show,

    /// Print the settings file path
    Path,

    /// Save the default language
    SetLanguage { lang: String },

    /// Save the catalog document URL
    SetCatalogUrl { url: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogicArg {
    And,
    Or,
}

impl From<LogicArg> for FilterLogic {
    fn from(value: LogicArg) -> Self {
        match value {
            LogicArg::And => FilterLogic::And,
            LogicArg::Or => FilterLogic::Or,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let portal = Portal {
        catalog_url: settings::resolve_catalog_url(cli.catalog_url),
        lang: settings::resolve_language(cli.lang),
        storage_root: settings::resolve_storage_root(cli.data_dir),
    };

    match cli.command {
        Commands::Fetch { refresh } => {
            commands::run_fetch(&portal, refresh);
        }
        Commands::List { page_size, pages } => {
            commands::run_list(&portal, page_size, pages);
        }
        Commands::Search { term } => {
            commands::run_search(&portal, &term);
        }
        Commands::Filter { tags, logic } => {
            commands::run_filter(&portal, tags, logic.into());
        }
        Commands::Tags => {
            commands::run_tags(&portal);
        }
        Commands::Sections => {
            commands::run_sections(&portal);
        }
        Commands::Show { id } => {
            commands::run_show(&portal, &id);
        }
        Commands::Fav { action } => match action {
            FavAction::List => commands::run_fav_list(&portal),
            FavAction::Toggle { id } => commands::run_fav_toggle(&portal, &id),
        },
        Commands::Recent { played } => {
            commands::run_recent(&portal, played.as_deref());
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::run_config_show(&portal),
            ConfigAction::Path => println!("{}", settings::settings_path().display()),
            ConfigAction::SetLanguage { lang } => commands::run_config_set_language(&lang),
            ConfigAction::SetCatalogUrl { url } => commands::run_config_set_url(&url),
        },
    }
}
