//! Bhagavad Gita verses in Telugu over HTTP(S).
//!
//! # Request flow
//!
//! ```text
//! GET /verse?chapter=2&verse=47
//!   1. Validate   ── both parameters present, integer, positive
//!   2. Database   ── VerseStore::get → polished text preferred
//!   3. Fallback   ── GeminiClient::fetch_verse → VerseStore::insert
//!   4. Respond    ── JSON with `source` naming where the verse came from
//! ```
//!
//! The same [`AppState`] drives the offline [`maintenance`] jobs.
//!
//! ```rust,no_run
//! use gita::{AppState, router, serve};
//! use gita_core::GitaConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GitaConfig::load("gita.toml".as_ref())?;
//! let state = AppState::load(&config).await?;
//! serve(router(state, &config.server), &config.server).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod maintenance;
pub mod middleware;
pub mod routes;
pub mod serve;
pub mod state;

pub use error::{ApiError, LoadError, ServeError};
pub use routes::{VerseResponse, router};
pub use serve::{Listening, bind, serve};
pub use state::AppState;
