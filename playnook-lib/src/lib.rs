//! Engine layer for the Playnook portal: query execution, pagination,
//! home-page sections, and the shared local-storage plumbing.
//!
//! Everything here operates on the immutable catalog snapshot produced
//! by `playnook-catalog`. Nothing in this crate mutates the catalog.

pub mod engine;
pub mod paginate;
pub mod query;
pub mod sections;
pub mod settings;
pub mod store_fs;
pub mod tags;
pub mod watchdog;

pub use engine::{EngineError, PendingQuery, QueryEngine, QueryOp, QueryOutcome};
pub use paginate::{DEFAULT_PAGE_SIZE, PageState, Paginator};
pub use query::{FilterLogic, filter, search};
pub use sections::{recommended_picks, shuffled_hot, vip_picks};
pub use store_fs::{FileStore, default_store_dir};
pub use tags::{TagCount, tag_index};
pub use watchdog::{DEFAULT_LOAD_TIMEOUT, LoadOutcome, await_load};
