//! Plain-text note export.
//!
//! # Responsibility
//! - Write one note's raw text to `<dir>/note_<id>.txt`.
//!
//! # Invariants
//! - Output is UTF-8 and byte-identical to the stored text.
//! - The target directory must already exist; it is never created here.

use crate::model::note::Note;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Export failure for a single note.
#[derive(Debug)]
pub enum ExportError {
    /// Target directory is missing or not a directory.
    NotADirectory(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotADirectory(path) => {
                write!(f, "export target `{}` is not a directory", path.display())
            }
            Self::Io { path, source } => write!(f, "failed to write `{}`: {source}", path.display()),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotADirectory(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// File name used for an exported note.
pub fn export_file_name(note: &Note) -> String {
    format!("note_{}.txt", note.id)
}

/// Writes the note text into `dir`, overwriting an earlier export.
pub fn export_note(note: &Note, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }

    let target = dir.join(export_file_name(note));
    match std::fs::write(&target, note.text.as_bytes()) {
        Ok(()) => {
            info!("event=note_export module=export status=ok id={}", note.id);
            Ok(target)
        }
        Err(source) => {
            error!(
                "event=note_export module=export status=error id={} error={}",
                note.id, source
            );
            Err(ExportError::Io {
                path: target,
                source,
            })
        }
    }
}
