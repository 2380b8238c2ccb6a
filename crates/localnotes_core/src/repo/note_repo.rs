//! Note repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/soft-delete/get/list/aggregate over `notes`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Rows are never physically deleted; soft delete only stamps `deleted_at`.
//! - `update_note_text` always moves `updated_at` strictly forward.
//! - Missing ids on update/soft-delete are reported as `Ok(false)`, not errors.
//! - Read paths reject unparseable persisted timestamps instead of masking them.

use crate::db::{fold_case, DbError, FOLD_FUNCTION_NAME};
use crate::model::note::{ListQuery, Note, NoteId};
use crate::model::stats::DailyCounts;
use crate::model::timestamp::{format_timestamp, next_stamp_after, parse_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    text,
    created_at,
    updated_at,
    deleted_at
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note operations.
///
/// Mutating calls take the stamp to write so callers control the clock.
pub trait NoteRepository {
    /// Inserts one active note and returns its assigned id.
    fn create_note(&self, text: &str, at: NaiveDateTime) -> RepoResult<NoteId>;
    /// Replaces note text and refreshes `updated_at`. `Ok(false)` when absent.
    fn update_note_text(&mut self, id: NoteId, text: &str, at: NaiveDateTime)
        -> RepoResult<bool>;
    /// Stamps `deleted_at`. `Ok(false)` when absent.
    fn soft_delete_note(&self, id: NoteId, at: NaiveDateTime) -> RepoResult<bool>;
    /// Gets one note by id, including soft-deleted notes.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists notes ordered by `created_at`.
    fn list_notes(&self, query: &ListQuery) -> RepoResult<Vec<Note>>;
    /// Per-date created/deleted counts limited to the most recent dates.
    fn counts_by_date(&self, window_days: u32) -> RepoResult<DailyCounts>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a connection returned by `open_db*`.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, text: &str, at: NaiveDateTime) -> RepoResult<NoteId> {
        let stamp = format_timestamp(at);
        self.conn.execute(
            "INSERT INTO notes (text, created_at, updated_at) VALUES (?1, ?2, ?2);",
            params![text, stamp],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_note_text(
        &mut self,
        id: NoteId,
        text: &str,
        at: NaiveDateTime,
    ) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let previous: Option<String> = tx
            .query_row(
                "SELECT updated_at FROM notes WHERE id = ?1;",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(previous) = previous else {
            return Ok(false);
        };

        let previous = parse_stamp("updated_at", &previous)?;
        let stamp = format_timestamp(next_stamp_after(previous, at));
        tx.execute(
            "UPDATE notes SET text = ?2, updated_at = ?3 WHERE id = ?1;",
            params![id, text, stamp],
        )?;
        tx.commit()?;
        Ok(true)
    }

    fn soft_delete_note(&self, id: NoteId, at: NaiveDateTime) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE notes SET deleted_at = ?2 WHERE id = ?1;",
            params![id, format_timestamp(at)],
        )?;
        Ok(changed > 0)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes(&self, query: &ListQuery) -> RepoResult<Vec<Note>> {
        let mut sql = format!("{NOTE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND deleted_at IS NULL");
        }

        if let Some(keyword) = normalize_keyword(query.keyword.as_deref()) {
            sql.push_str(&format!(
                " AND {FOLD_FUNCTION_NAME}(text) LIKE ? ESCAPE '\\'"
            ));
            bind_values.push(Value::Text(format!(
                "%{}%",
                escape_like(&fold_case(&keyword))
            )));
        }

        let direction = query.order.as_sql();
        sql.push_str(&format!(" ORDER BY created_at {direction}, id {direction}"));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn counts_by_date(&self, window_days: u32) -> RepoResult<DailyCounts> {
        let created = load_daily_counts(
            self.conn,
            "SELECT substr(created_at, 1, 10) AS day, COUNT(*) AS total
             FROM notes
             GROUP BY day
             ORDER BY day DESC
             LIMIT ?1;",
            window_days,
        )?;
        let deleted = load_daily_counts(
            self.conn,
            "SELECT substr(deleted_at, 1, 10) AS day, COUNT(*) AS total
             FROM notes
             WHERE deleted_at IS NOT NULL
             GROUP BY day
             ORDER BY day DESC
             LIMIT ?1;",
            window_days,
        )?;

        Ok(DailyCounts { created, deleted })
    }
}

/// Normalizes a search keyword. Blank input means "no filter".
pub fn normalize_keyword(keyword: Option<&str>) -> Option<String> {
    keyword
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn load_daily_counts(
    conn: &Connection,
    sql: &str,
    window_days: u32,
) -> RepoResult<BTreeMap<NaiveDate, u32>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([i64::from(window_days)])?;
    let mut counts = BTreeMap::new();
    while let Some(row) = rows.next()? {
        let day: String = row.get("day")?;
        let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d").map_err(|_| {
            RepoError::InvalidData(format!("invalid date bucket `{day}` in notes"))
        })?;
        let total: u32 = row.get("total")?;
        counts.insert(date, total);
    }
    Ok(counts)
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    let deleted_at = match row.get::<_, Option<String>>("deleted_at")? {
        Some(value) => Some(parse_stamp("deleted_at", &value)?),
        None => None,
    };

    Ok(Note {
        id: row.get("id")?,
        text: row.get("text")?,
        created_at: parse_stamp("created_at", &created_at)?,
        updated_at: parse_stamp("updated_at", &updated_at)?,
        deleted_at,
    })
}

fn parse_stamp(column: &str, value: &str) -> RepoResult<NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid timestamp `{value}` in notes.{column}"))
    })
}
