//! UI label translations.
//!
//! # Responsibility
//! - Map a typed label key to its string in each supported locale.
//!
//! # Invariants
//! - Every `Label` has a string in every `Locale` (checked by `match`).
//! - Unknown locale codes resolve to `Locale::DEFAULT`.

use serde::{Deserialize, Serialize};

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    Ru,
    En,
}

impl Locale {
    /// Fallback locale for unknown codes.
    pub const DEFAULT: Locale = Locale::Ru;

    pub const ALL: [Locale; 2] = [Locale::Ru, Locale::En];

    /// Parses a locale code such as `en` or `RU`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ru" => Some(Self::Ru),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Self::DEFAULT)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fixed set of UI labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    AppTitle,
    Add,
    Edit,
    Delete,
    Search,
    SortAsc,
    SortDesc,
    Export,
    Stats,
    Refresh,
    ConfirmDelete,
    EmptyNoteError,
    NoNotes,
    CreatedAt,
    UpdatedAt,
    DeletedMsg,
    ExportDone,
    Language,
    ViewAll,
    SearchPlaceholder,
    Ok,
    Cancel,
}

impl Label {
    pub const ALL: [Label; 22] = [
        Label::AppTitle,
        Label::Add,
        Label::Edit,
        Label::Delete,
        Label::Search,
        Label::SortAsc,
        Label::SortDesc,
        Label::Export,
        Label::Stats,
        Label::Refresh,
        Label::ConfirmDelete,
        Label::EmptyNoteError,
        Label::NoNotes,
        Label::CreatedAt,
        Label::UpdatedAt,
        Label::DeletedMsg,
        Label::ExportDone,
        Label::Language,
        Label::ViewAll,
        Label::SearchPlaceholder,
        Label::Ok,
        Label::Cancel,
    ];

    /// Stable snake_case key, e.g. `confirm_delete`.
    pub fn key(self) -> &'static str {
        match self {
            Self::AppTitle => "app_title",
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Search => "search",
            Self::SortAsc => "sort_asc",
            Self::SortDesc => "sort_desc",
            Self::Export => "export",
            Self::Stats => "stats",
            Self::Refresh => "refresh",
            Self::ConfirmDelete => "confirm_delete",
            Self::EmptyNoteError => "empty_note_error",
            Self::NoNotes => "no_notes",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::DeletedMsg => "deleted_msg",
            Self::ExportDone => "export_done",
            Self::Language => "language",
            Self::ViewAll => "view_all",
            Self::SearchPlaceholder => "search_placeholder",
            Self::Ok => "ok",
            Self::Cancel => "cancel",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.key() == key)
    }
}

/// Resolves `label` in `locale`.
pub fn translate(locale: Locale, label: Label) -> &'static str {
    match locale {
        Locale::Ru => ru(label),
        Locale::En => en(label),
    }
}

fn ru(label: Label) -> &'static str {
    match label {
        Label::AppTitle => "Заметки",
        Label::Add => "Добавить",
        Label::Edit => "Редактировать",
        Label::Delete => "Удалить",
        Label::Search => "Поиск",
        Label::SortAsc => "Сортировка ↑",
        Label::SortDesc => "Сортировка ↓",
        Label::Export => "Экспорт",
        Label::Stats => "Статистика",
        Label::Refresh => "Обновить",
        Label::ConfirmDelete => "Удалить выбранную заметку?",
        Label::EmptyNoteError => "Текст заметки не может быть пустым.",
        Label::NoNotes => "Заметок нет.",
        Label::CreatedAt => "Создано",
        Label::UpdatedAt => "Изменено",
        Label::DeletedMsg => "Заметка перемещена в удалённые.",
        Label::ExportDone => "Экспорт завершён",
        Label::Language => "Язык",
        Label::ViewAll => "Показать все",
        Label::SearchPlaceholder => "Введите ключевое слово для поиска",
        Label::Ok => "ОК",
        Label::Cancel => "Отмена",
    }
}

fn en(label: Label) -> &'static str {
    match label {
        Label::AppTitle => "Notes",
        Label::Add => "Add",
        Label::Edit => "Edit",
        Label::Delete => "Delete",
        Label::Search => "Search",
        Label::SortAsc => "Sort ↑",
        Label::SortDesc => "Sort ↓",
        Label::Export => "Export",
        Label::Stats => "Statistics",
        Label::Refresh => "Refresh",
        Label::ConfirmDelete => "Delete selected note?",
        Label::EmptyNoteError => "Note text cannot be empty.",
        Label::NoNotes => "No notes.",
        Label::CreatedAt => "Created",
        Label::UpdatedAt => "Updated",
        Label::DeletedMsg => "Note deleted.",
        Label::ExportDone => "Export completed",
        Label::Language => "Language",
        Label::ViewAll => "View all",
        Label::SearchPlaceholder => "Enter keyword to search",
        Label::Ok => "OK",
        Label::Cancel => "Cancel",
    }
}
