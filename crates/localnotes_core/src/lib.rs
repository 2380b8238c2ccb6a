//! Core persistence and query layer for LocalNotes.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod locale;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::AppPaths;
pub use db::{DbError, DbResult};
pub use locale::{translate, Label, Locale};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{ListQuery, Note, NoteId, NoteListItem, SortOrder};
pub use model::stats::{DailyCounts, DailyPoint, DEFAULT_STATS_WINDOW_DAYS};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::export::{export_note, ExportError};
pub use service::note_store::{derive_preview, to_list_item, NoteStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
