use std::fmt;
use std::sync::Arc;

use gita_core::GitaConfig;
use gita_gemini::{GeminiClient, GenerateTransport, HttpTransport};
use gita_store::VerseStore;

use crate::error::LoadError;

/// Shared by every request handler and maintenance job.
///
/// Generic over the Gemini transport so tests can swap in canned replies.
pub struct AppState<T: GenerateTransport = HttpTransport> {
    pub store: VerseStore,
    pub gemini: Arc<GeminiClient<T>>,
}

impl<T: GenerateTransport> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            gemini: Arc::clone(&self.gemini),
        }
    }
}

impl<T: GenerateTransport> fmt::Debug for AppState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<T: GenerateTransport> AppState<T> {
    pub fn new(store: VerseStore, gemini: GeminiClient<T>) -> Self {
        Self {
            store,
            gemini: Arc::new(gemini),
        }
    }
}

impl AppState {
    /// Open and migrate the database, and build the Gemini client from the
    /// environment.
    ///
    /// Locally the API key comes from `.env` via dotenvy, in a container it
    /// is injected into the environment at run time.
    pub async fn load(config: &GitaConfig) -> Result<Self, LoadError> {
        let dotenv_loaded = dotenvy::dotenv().is_ok();
        tracing::debug!(dotenv = dotenv_loaded, "loading AppState");

        let store = VerseStore::connect(&config.database.path).await?;
        store.init().await?;

        let transport = HttpTransport::from_env(&config.gemini)?;
        tracing::debug!(
            database = %config.database.path.display(),
            endpoint = transport.endpoint(),
            api_key_configured = transport.has_api_key(),
            "AppState loaded",
        );

        Ok(Self::new(store, GeminiClient::with_transport(transport)))
    }
}
