//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level note functions to the UI shell via FRB.
//! - Validate user input (blank text) before it reaches the store.
//! - Keep error semantics simple: envelopes with `ok` + message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Ids travel as typed integers, never parsed out of display text.
//! - Timestamps travel as the store's sortable ISO-8601 text.

use localnotes_core::model::timestamp::{format_timestamp, now_local};
use localnotes_core::{
    core_version as core_version_inner, export_note, init_logging as init_logging_inner,
    ping as ping_inner, to_list_item, translate, Label, ListQuery, Locale, Note, NoteListItem,
    NoteStore, SortOrder,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

static STORE: Mutex<Option<Arc<NoteStore>>> = Mutex::new(None);
/// Upper bound for chart windows requested over FFI (about ten years).
pub const STATS_WINDOW_MAX_DAYS: u32 = 3660;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.trim()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Opens the process-wide store at `db_path`.
///
/// When never called, the first note operation opens the default
/// `<home>/.local_notes_app/notes.db`.
///
/// # FFI contract
/// - Idempotent for the same path; switching to another path is rejected.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);

    let mut slot = STORE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(store) = slot.as_ref() {
        return match store.location() {
            Some(active) if active == requested.as_path() => String::new(),
            active => format!(
                "store already open at `{}`; refusing to switch to `{}`",
                active.map_or_else(|| "<memory>".to_string(), |path| path.display().to_string()),
                requested.display()
            ),
        };
    }

    match NoteStore::open(&requested) {
        Ok(store) => {
            *slot = Some(Arc::new(store));
            String::new()
        }
        Err(err) => format!("configure_store failed: {err}"),
    }
}

/// Generic action response envelope for note mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected note id, when known.
    pub note_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: i64) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Full note payload for detail panes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    pub id: i64,
    pub text: String,
    pub created_at: String,
    pub updated_at: String,
    /// Set when the note is soft-deleted.
    pub deleted_at: Option<String>,
}

/// Detail lookup envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetailResponse {
    /// `None` when the id does not exist or lookup failed.
    pub note: Option<NoteView>,
    pub message: String,
}

/// List row for note list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListEntry {
    pub id: i64,
    pub preview: String,
    pub truncated: bool,
    pub created_at: String,
    pub deleted: bool,
}

/// List envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub ok: bool,
    pub items: Vec<NoteListEntry>,
    pub message: String,
}

/// One chart point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStatsPoint {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Axis label, `MM-DD`.
    pub label: String,
    pub created: u32,
    pub deleted: u32,
}

/// Chart envelope: dense series ending today, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStatsResponse {
    pub ok: bool,
    pub points: Vec<DailyStatsPoint>,
    pub message: String,
}

/// Creates a note from dialog input.
///
/// # FFI contract
/// - Blank text is rejected with the localized `empty_note_error` message.
/// - Stored text is trimmed.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_add(text: String, locale: String) -> NoteActionResponse {
    let Some(text) = non_blank(&text) else {
        return NoteActionResponse::failure(translate(
            Locale::from_code_or_default(&locale),
            Label::EmptyNoteError,
        ));
    };

    match with_store(|store| store.add(text).map_err(|err| err.to_string())) {
        Ok(id) => NoteActionResponse::success("Note created.", id),
        Err(err) => NoteActionResponse::failure(format!("notes_add failed: {err}")),
    }
}

/// Replaces note text from dialog input.
///
/// # FFI contract
/// - Blank text is rejected with the localized `empty_note_error` message.
/// - Unknown ids succeed as a no-op with `note_id = None`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_update(note_id: i64, text: String, locale: String) -> NoteActionResponse {
    let Some(text) = non_blank(&text) else {
        return NoteActionResponse::failure(translate(
            Locale::from_code_or_default(&locale),
            Label::EmptyNoteError,
        ));
    };

    match with_store(|store| store.update(note_id, text).map_err(|err| err.to_string())) {
        Ok(true) => NoteActionResponse::success("Note updated.", note_id),
        Ok(false) => noop_response(),
        Err(err) => NoteActionResponse::failure(format!("notes_update failed: {err}")),
    }
}

/// Soft-deletes a note. Callers confirm with the user before calling.
///
/// # FFI contract
/// - Unknown ids succeed as a no-op with `note_id = None`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_soft_delete(note_id: i64) -> NoteActionResponse {
    match with_store(|store| store.soft_delete(note_id).map_err(|err| err.to_string())) {
        Ok(true) => NoteActionResponse::success("Note deleted.", note_id),
        Ok(false) => noop_response(),
        Err(err) => NoteActionResponse::failure(format!("notes_soft_delete failed: {err}")),
    }
}

/// Point lookup, including soft-deleted notes.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_get(note_id: i64) -> NoteDetailResponse {
    match with_store(|store| store.get(note_id).map_err(|err| err.to_string())) {
        Ok(Some(note)) => NoteDetailResponse {
            note: Some(to_note_view(&note)),
            message: String::new(),
        },
        Ok(None) => NoteDetailResponse {
            note: None,
            message: "Note not found.".to_string(),
        },
        Err(err) => NoteDetailResponse {
            note: None,
            message: format!("notes_get failed: {err}"),
        },
    }
}

/// Lists notes by `created_at`.
///
/// # FFI contract
/// - `ascending = false` lists newest first.
/// - Blank `keyword` means no filter.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(
    include_deleted: bool,
    ascending: bool,
    keyword: Option<String>,
) -> NotesListResponse {
    let query = ListQuery {
        include_deleted,
        order: if ascending {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        },
        keyword,
    };

    match with_store(|store| store.list(&query).map_err(|err| err.to_string())) {
        Ok(notes) => {
            let items = notes
                .iter()
                .map(|note| to_list_entry(to_list_item(note)))
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No notes.".to_string()
            } else {
                format!("Found {} note(s).", items.len())
            };
            NotesListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => NotesListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("notes_list failed: {err}"),
        },
    }
}

/// Daily created/deleted counts for the last `window_days` days ending today.
///
/// # FFI contract
/// - Returns exactly `window_days` points, zero-filled, oldest first.
/// - Windows above [`STATS_WINDOW_MAX_DAYS`] are clamped to it.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_counts_by_date(window_days: u32) -> DailyStatsResponse {
    let window_days = normalize_stats_window(window_days);
    match with_store(|store| {
        store
            .counts_by_date(window_days)
            .map_err(|err| err.to_string())
    }) {
        Ok(counts) => {
            let today = now_local().date();
            let points = counts
                .series(today, window_days)
                .into_iter()
                .map(|point| DailyStatsPoint {
                    date: point.date.to_string(),
                    label: point.axis_label(),
                    created: point.created,
                    deleted: point.deleted,
                })
                .collect();
            DailyStatsResponse {
                ok: true,
                points,
                message: String::new(),
            }
        }
        Err(err) => DailyStatsResponse {
            ok: false,
            points: Vec::new(),
            message: format!("notes_counts_by_date failed: {err}"),
        },
    }
}

/// Writes a note's raw text to `<dir>/note_<id>.txt`.
///
/// # FFI contract
/// - `dir` must exist.
/// - Message carries the localized `export_done` label and written path.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_export(note_id: i64, dir: String, locale: String) -> NoteActionResponse {
    let result = with_store(|store| {
        let note = store
            .get(note_id)
            .map_err(|err| err.to_string())?
            .ok_or_else(|| format!("note not found: {note_id}"))?;
        export_note(&note, dir.trim()).map_err(|err| err.to_string())
    });

    match result {
        Ok(path) => NoteActionResponse::success(
            format!(
                "{}: {}",
                translate(Locale::from_code_or_default(&locale), Label::ExportDone),
                path.display()
            ),
            note_id,
        ),
        Err(err) => NoteActionResponse::failure(format!("notes_export failed: {err}")),
    }
}

/// Resolves a UI label. Unknown keys are returned unchanged; unknown locales
/// fall back to the default locale.
#[flutter_rust_bridge::frb(sync)]
pub fn locale_label(locale: String, key: String) -> String {
    match Label::from_key(key.trim()) {
        Some(label) => translate(Locale::from_code_or_default(&locale), label).to_string(),
        None => key,
    }
}

fn normalize_stats_window(window_days: u32) -> u32 {
    window_days.min(STATS_WINDOW_MAX_DAYS)
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn noop_response() -> NoteActionResponse {
    NoteActionResponse {
        ok: true,
        note_id: None,
        message: "Note not found; nothing changed.".to_string(),
    }
}

fn with_store<T>(f: impl FnOnce(&NoteStore) -> Result<T, String>) -> Result<T, String> {
    let store = shared_store()?;
    f(&store)
}

fn shared_store() -> Result<Arc<NoteStore>, String> {
    let mut slot = STORE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(store) = slot.as_ref() {
        return Ok(Arc::clone(store));
    }

    let store = NoteStore::open_default().map_err(|err| {
        warn!("event=store_open module=ffi status=error error={err}");
        format!("store open failed: {err}")
    })?;
    let store = Arc::new(store);
    *slot = Some(Arc::clone(&store));
    Ok(store)
}

fn to_note_view(note: &Note) -> NoteView {
    NoteView {
        id: note.id,
        text: note.text.clone(),
        created_at: format_timestamp(note.created_at),
        updated_at: format_timestamp(note.updated_at),
        deleted_at: note.deleted_at.map(format_timestamp),
    }
}

fn to_list_entry(item: NoteListItem) -> NoteListEntry {
    NoteListEntry {
        id: item.id,
        preview: item.preview,
        truncated: item.truncated,
        created_at: format_timestamp(item.created_at),
        deleted: item.is_deleted,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        configure_store, core_version, init_logging, locale_label, notes_add,
        notes_counts_by_date, notes_export, notes_get, notes_list, notes_soft_delete,
        notes_update, ping, STATS_WINDOW_MAX_DAYS,
    };
    use std::path::PathBuf;
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};

    // The store is process-wide and statics are never dropped, so a `TempDir`
    // would outlive its cleanup. One fixed directory is wiped per test run.
    static TEST_DIR: OnceLock<PathBuf> = OnceLock::new();

    fn test_db_path() -> PathBuf {
        TEST_DIR
            .get_or_init(|| {
                let dir = std::env::temp_dir().join("localnotes-ffi-tests");
                if dir.exists() {
                    std::fs::remove_dir_all(&dir).expect("clear stale test dir");
                }
                dir
            })
            .join("notes.db")
    }

    fn ensure_test_store() {
        let error = configure_store(test_db_path().to_string_lossy().into_owned());
        assert!(error.is_empty(), "{error}");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn configure_store_is_idempotent_and_rejects_switching() {
        ensure_test_store();
        ensure_test_store();

        let other = std::env::temp_dir().join("localnotes-ffi-other").join("notes.db");
        let error = configure_store(other.to_string_lossy().into_owned());
        assert!(error.contains("refusing to switch"));
        assert!(!configure_store("  ".to_string()).is_empty());
    }

    #[test]
    fn add_rejects_blank_text_with_localized_message() {
        let response = notes_add("   \n".to_string(), "en".to_string());
        assert!(!response.ok);
        assert_eq!(response.message, "Note text cannot be empty.");

        let response = notes_add(String::new(), "xx".to_string());
        assert_eq!(response.message, "Текст заметки не может быть пустым.");
    }

    #[test]
    fn add_get_update_and_delete_roundtrip() {
        ensure_test_store();
        let token = unique_token("ffi-roundtrip");

        let created = notes_add(format!("  {token}  "), "en".to_string());
        assert!(created.ok, "{}", created.message);
        let id = created.note_id.expect("created note should return note_id");

        let detail = notes_get(id).note.expect("note should exist");
        assert_eq!(detail.text, token);
        assert_eq!(detail.deleted_at, None);

        let updated = notes_update(id, format!("{token} v2"), "en".to_string());
        assert!(updated.ok, "{}", updated.message);
        let detail = notes_get(id).note.unwrap();
        assert_eq!(detail.text, format!("{token} v2"));
        assert!(detail.updated_at > detail.created_at);

        let deleted = notes_soft_delete(id);
        assert!(deleted.ok);
        assert!(notes_get(id).note.unwrap().deleted_at.is_some());

        let active = notes_list(false, false, Some(token.clone()));
        assert!(active.items.iter().all(|item| item.id != id));
        let all = notes_list(true, false, Some(token));
        let entry = all.items.iter().find(|item| item.id == id).unwrap();
        assert!(entry.deleted);
    }

    #[test]
    fn mutations_on_unknown_ids_are_noops() {
        ensure_test_store();

        let updated = notes_update(i64::MAX, "ghost".to_string(), "en".to_string());
        assert!(updated.ok);
        assert_eq!(updated.note_id, None);

        let deleted = notes_soft_delete(i64::MAX);
        assert!(deleted.ok);
        assert_eq!(deleted.note_id, None);

        assert!(notes_get(i64::MAX).note.is_none());
    }

    #[test]
    fn list_search_is_case_insensitive() {
        ensure_test_store();
        let token = unique_token("MiLk");
        let created = notes_add(format!("Buy {token}"), "en".to_string());
        let id = created.note_id.unwrap();

        let listed = notes_list(false, true, Some(token.to_lowercase()));
        assert!(listed.ok, "{}", listed.message);
        assert_eq!(
            listed.items.iter().map(|item| item.id).collect::<Vec<_>>(),
            vec![id]
        );
    }

    #[test]
    fn counts_by_date_returns_dense_window_including_today() {
        ensure_test_store();
        notes_add(unique_token("stats"), "en".to_string());

        let response = notes_counts_by_date(30);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.points.len(), 30);
        assert!(response.points.last().unwrap().created >= 1);
        assert!(response.points.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn counts_by_date_clamps_oversized_window() {
        ensure_test_store();

        let response = notes_counts_by_date(100_000_000);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.points.len(), STATS_WINDOW_MAX_DAYS as usize);

        let empty = notes_counts_by_date(0);
        assert!(empty.ok, "{}", empty.message);
        assert!(empty.points.is_empty());
    }

    #[test]
    fn export_writes_note_file() {
        ensure_test_store();
        let token = unique_token("export");
        let id = notes_add(token.clone(), "en".to_string()).note_id.unwrap();
        let dir = tempfile::tempdir().unwrap();

        let response = notes_export(id, dir.path().to_string_lossy().into_owned(), "en".to_string());
        assert!(response.ok, "{}", response.message);
        assert!(response.message.starts_with("Export completed"));
        let written = std::fs::read_to_string(dir.path().join(format!("note_{id}.txt"))).unwrap();
        assert_eq!(written, token);
    }

    #[test]
    fn locale_label_resolves_and_falls_back() {
        assert_eq!(locale_label("en".to_string(), "stats".to_string()), "Statistics");
        assert_eq!(locale_label("ru".to_string(), "stats".to_string()), "Статистика");
        assert_eq!(locale_label("fr".to_string(), "ok".to_string()), "ОК");
        assert_eq!(locale_label("en".to_string(), "unknown_key".to_string()), "unknown_key");
    }
}
