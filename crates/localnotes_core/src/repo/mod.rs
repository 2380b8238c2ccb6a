//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic results (`Ok(false)` for missing ids) in
//!   addition to DB transport errors.

pub mod note_repo;
