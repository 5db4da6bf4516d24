//! SQLite persistence for verses.
//!
//! A single table `verses` holds one row per `(chapter, verse)` pair with
//! the original model output, the polished text, and a description.
//! [`VerseStore::init`] creates the table or adds columns that older
//! databases lack, so the same file can be reused across upgrades.

pub mod error;
mod schema;
mod store;

pub use error::StoreError;
pub use store::VerseStore;
