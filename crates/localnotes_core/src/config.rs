//! On-disk layout for application data.
//!
//! # Responsibility
//! - Resolve the data directory, database file and log directory.
//!
//! # Invariants
//! - The default root is `<home>/.local_notes_app`.
//! - Resolution never touches the file system; directories are created by
//!   `open_db` and `init_logging`.

use crate::db::{DbError, DbResult};
use std::path::{Path, PathBuf};

pub const DATA_DIR_NAME: &str = ".local_notes_app";
pub const DB_FILE_NAME: &str = "notes.db";
pub const LOG_DIR_NAME: &str = "logs";

/// Paths used by one application instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    /// Default layout under the current user's home directory.
    pub fn resolve() -> DbResult<Self> {
        let home = dirs::home_dir().ok_or(DbError::HomeDirUnavailable)?;
        Ok(Self::under(home.join(DATA_DIR_NAME)))
    }

    /// Same layout rooted at an arbitrary directory.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.root
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.join(LOG_DIR_NAME)
    }
}
