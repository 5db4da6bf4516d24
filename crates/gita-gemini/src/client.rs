use gita_core::{EnhancedVerse, FetchedVerse};

use crate::error::GeminiError;
use crate::parse::{parse_enhanced, parse_fetched};
use crate::prompt::{enhance_prompt, fetch_prompt};
use crate::transport::{GenerateTransport, HttpTransport};

/// Verse operations on top of a [`GenerateTransport`].
///
/// Parameterized over the transport for testability.
pub struct GeminiClient<T: GenerateTransport = HttpTransport> {
    transport: T,
}

impl<T: GenerateTransport> GeminiClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch the Sanskrit verse (Telugu script) with a basic Telugu
    /// translation and meaning.
    pub async fn fetch_verse(&self, chapter: u32, verse: u32) -> Result<FetchedVerse, GeminiError> {
        tracing::info!(chapter, verse, "requesting verse from Gemini");
        let reply = self.transport.generate(&fetch_prompt(chapter, verse)).await?;
        tracing::debug!(chapter, verse, reply = %reply, "raw Gemini fetch reply");

        parse_fetched(&reply).inspect_err(|e| {
            tracing::warn!(chapter, verse, error = %e, "could not parse Gemini fetch reply");
        })
    }

    /// Polish the basic translation and meaning and write a short
    /// description.
    pub async fn enhance_verse(
        &self,
        chapter: u32,
        verse: u32,
        sanskrit: &str,
        telugu_verse: &str,
        telugu_meaning: &str,
    ) -> Result<EnhancedVerse, GeminiError> {
        tracing::info!(chapter, verse, "requesting enhancement from Gemini");
        let prompt = enhance_prompt(sanskrit, telugu_verse, telugu_meaning);
        let reply = self.transport.generate(&prompt).await?;
        tracing::debug!(chapter, verse, reply = %reply, "raw Gemini enhance reply");

        parse_enhanced(&reply).inspect_err(|e| {
            tracing::warn!(chapter, verse, error = %e, "could not parse Gemini enhance reply");
        })
    }
}
