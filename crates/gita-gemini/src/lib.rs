//! Gemini `generateContent` client.
//!
//! ```text
//! GeminiClient::fetch_verse / enhance_verse
//!   1. prompt      ── labeled-output instructions for one verse
//!   2. transport   ── GenerateTransport::generate (HttpTransport in production)
//!   3. parse       ── split the reply on its labels, clean Telugu text
//! ```
//!
//! The transport is a trait so tests can substitute canned replies.

pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod transport;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use transport::{GenerateTransport, HttpTransport};
