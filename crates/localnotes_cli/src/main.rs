//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `localnotes_core` linkage and the default store location.
//! - Keep output deterministic for quick local sanity checks.

use localnotes_core::{default_log_level, init_logging, AppPaths, ListQuery, NoteStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("localnotes_core ping={}", localnotes_core::ping());
    println!("localnotes_core version={}", localnotes_core::core_version());

    let paths = match AppPaths::resolve() {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("localnotes_core paths error={err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(default_log_level(), paths.log_dir()) {
        eprintln!("localnotes_core logging error={err}");
    }

    let store = match NoteStore::open(paths.db_path()) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("localnotes_core store error={err}");
            return ExitCode::FAILURE;
        }
    };
    println!("localnotes_core db_path={}", paths.db_path().display());

    match store.list(&ListQuery::active()) {
        Ok(notes) => {
            println!("localnotes_core notes_active={}", notes.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("localnotes_core list error={err}");
            ExitCode::FAILURE
        }
    }
}
