//! Note store facade.
//!
//! # Responsibility
//! - Own the single SQLite connection and serialize access to it.
//! - Provide add/update/soft-delete/get/list/aggregate use-case APIs.
//! - Derive single-line list previews for list views.
//!
//! # Invariants
//! - Every mutation is committed before the call returns.
//! - Exactly one operation holds the connection at a time.
//! - Note text is never written to logs.

use crate::config::AppPaths;
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::note::{ListQuery, Note, NoteId, NoteListItem, PREVIEW_MAX_CHARS};
use crate::model::stats::DailyCounts;
use crate::model::timestamp::now_local;
use crate::repo::note_repo::{NoteRepository, RepoResult, SqliteNoteRepository};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Persistence and query facade over the local notes database.
///
/// Shareable across threads; each call takes the connection lock for its
/// whole duration.
pub struct NoteStore {
    conn: Mutex<Connection>,
    location: Option<PathBuf>,
}

impl NoteStore {
    /// Opens (creating if needed) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let conn = open_db(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
            location: Some(path.to_path_buf()),
        })
    }

    /// Opens the store at `<home>/.local_notes_app/notes.db`.
    pub fn open_default() -> DbResult<Self> {
        let paths = AppPaths::resolve()?;
        Self::open(paths.db_path())
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: Mutex::new(open_db_in_memory()?),
            location: None,
        })
    }

    /// Database file backing this store; `None` for in-memory stores.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Inserts a new active note and returns its id.
    ///
    /// Text is stored as given; rejecting empty input is the caller's job.
    pub fn add(&self, text: &str) -> RepoResult<NoteId> {
        let id = self.with_repo(|repo| repo.create_note(text, now_local()))?;
        info!(
            "event=note_add module=store status=ok id={} chars={}",
            id,
            text.chars().count()
        );
        Ok(id)
    }

    /// Replaces note text and refreshes `updated_at`.
    ///
    /// Returns `false` without error when `id` does not exist.
    pub fn update(&self, id: NoteId, new_text: &str) -> RepoResult<bool> {
        let changed =
            self.with_repo(|repo| repo.update_note_text(id, new_text, now_local()))?;
        if changed {
            info!("event=note_update module=store status=ok id={id}");
        } else {
            debug!("event=note_update module=store status=skipped reason=not_found id={id}");
        }
        Ok(changed)
    }

    /// Stamps `deleted_at` with the current time. Re-stamps already deleted notes.
    ///
    /// Returns `false` without error when `id` does not exist.
    pub fn soft_delete(&self, id: NoteId) -> RepoResult<bool> {
        let changed = self.with_repo(|repo| repo.soft_delete_note(id, now_local()))?;
        if changed {
            info!("event=note_soft_delete module=store status=ok id={id}");
        } else {
            debug!("event=note_soft_delete module=store status=skipped reason=not_found id={id}");
        }
        Ok(changed)
    }

    /// Point lookup, including soft-deleted notes.
    pub fn get(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.with_repo(|repo| repo.get_note(id))
    }

    /// Lists notes ordered by `created_at` per `query`.
    pub fn list(&self, query: &ListQuery) -> RepoResult<Vec<Note>> {
        let notes = self.with_repo(|repo| repo.list_notes(query))?;
        debug!(
            "event=note_list module=store status=ok include_deleted={} order={:?} keyword={} count={}",
            query.include_deleted,
            query.order,
            query.keyword.is_some(),
            notes.len()
        );
        Ok(notes)
    }

    /// Same as [`NoteStore::list`] projected to list-view rows.
    pub fn list_items(&self, query: &ListQuery) -> RepoResult<Vec<NoteListItem>> {
        Ok(self.list(query)?.iter().map(to_list_item).collect())
    }

    /// Created/deleted counts per date, each limited to the `window_days`
    /// most recent dates present in storage.
    pub fn counts_by_date(&self, window_days: u32) -> RepoResult<DailyCounts> {
        self.with_repo(|repo| repo.counts_by_date(window_days))
    }

    fn with_repo<T>(
        &self,
        f: impl FnOnce(&mut SqliteNoteRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut guard = self.lock();
        let mut repo = SqliteNoteRepository::new(&mut guard);
        f(&mut repo)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // Mutations are single statements or committed transactions, so a
        // poisoned lock never guards a partial write.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds a list-view row with a single-line preview.
pub fn to_list_item(note: &Note) -> NoteListItem {
    let (preview, truncated) = derive_preview(&note.text);
    NoteListItem {
        id: note.id,
        preview,
        truncated,
        created_at: note.created_at,
        is_deleted: !note.is_active(),
    }
}

/// Collapses whitespace runs and keeps the first [`PREVIEW_MAX_CHARS`] chars.
///
/// Returns the preview and whether it was cut short.
pub fn derive_preview(text: &str) -> (String, bool) {
    let normalized = WHITESPACE_RE.replace_all(text, " ");
    let trimmed = normalized.trim();
    let truncated = trimmed.chars().count() > PREVIEW_MAX_CHARS;
    (trimmed.chars().take(PREVIEW_MAX_CHARS).collect(), truncated)
}
