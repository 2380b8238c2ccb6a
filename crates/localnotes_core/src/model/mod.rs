//! Domain model for notes and their derived projections.
//!
//! # Responsibility
//! - Define canonical data structures used by store and presentation layers.
//!
//! # Invariants
//! - Every note is identified by a storage-assigned `NoteId`.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod note;
pub mod stats;
pub mod timestamp;
