//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted record and its list projection.
//! - Carry list parameters explicitly instead of ambient UI state.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused.
//! - `created_at <= updated_at`.
//! - `deleted_at` is the source of truth for tombstone state.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Storage-assigned note identifier (`notes.id`).
pub type NoteId = i64;

/// Maximum number of characters kept in a list preview.
pub const PREVIEW_MAX_CHARS: usize = 80;

/// Canonical persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Raw note text as entered.
    pub text: String,
    /// Set once on creation.
    pub created_at: NaiveDateTime,
    /// Refreshed on every text edit.
    pub updated_at: NaiveDateTime,
    /// Soft delete tombstone; `None` while the note is active.
    pub deleted_at: Option<NaiveDateTime>,
}

impl Note {
    /// Returns whether this note should be considered visible/active.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Sort direction over `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Query options for note list use-cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Include soft-deleted notes.
    pub include_deleted: bool,
    /// Direction over `created_at`. Defaults to newest first.
    pub order: SortOrder,
    /// Optional case-insensitive substring filter. Blank means no filter.
    pub keyword: Option<String>,
}

impl ListQuery {
    /// Active notes, newest first, no filter.
    pub fn active() -> Self {
        Self::default()
    }

    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub fn ordered(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn matching(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

/// Row shape for list views.
///
/// The id travels as a typed field; views must never re-derive it from
/// rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteListItem {
    pub id: NoteId,
    /// Single-line preview, at most [`PREVIEW_MAX_CHARS`] characters.
    pub preview: String,
    /// Whether the preview was cut short.
    pub truncated: bool,
    pub created_at: NaiveDateTime,
    pub is_deleted: bool,
}
