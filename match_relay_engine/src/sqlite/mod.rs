//! SQLite backend for the match relay engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
