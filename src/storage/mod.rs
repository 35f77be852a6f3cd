//! Storage Layer
//!
//! Handles data persistence: the SQLite database and its FTS5 index.

pub mod database;

pub use database::*;
