//! FFI bridge crate exposing LocalNotes core use-cases to the UI shell.

pub mod api;
