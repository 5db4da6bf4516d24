//! Core types and configuration for gita.
//!
//! This crate defines the `gita.toml` schema ([`GitaConfig`]), the verse
//! data model ([`VerseRecord`], [`VerseColumn`]), text cleaning, the
//! chapter verse counts, and shared error types.

pub mod canon;
pub mod config;
pub mod error;
pub mod text;
pub mod verse;

pub use canon::{CHAPTER_VERSE_COUNTS, verse_count, verse_refs};
pub use config::{
    BuildConfig, DatabaseConfig, GeminiConfig, GitaConfig, LoggingConfig, MaintenanceConfig,
    ReleaseConfig, ServerConfig,
};
pub use error::{Error, Result};
pub use text::clean_text;
pub use verse::{EnhancedVerse, FetchedVerse, VerseColumn, VerseRecord};
