#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("Gemini API key is not set; export it in the environment or .env")]
    MissingApiKey,

    #[error("Gemini request failed")]
    Request { source: reqwest::Error },

    #[error("Gemini returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gemini response had no candidate text")]
    EmptyResponse,

    #[error("Gemini response did not follow the requested format: {reason}")]
    UnexpectedFormat { reason: String },
}
