use std::fmt;
use std::num::IntErrorKind;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderValue, Method},
    middleware,
    routing::get,
};
use gita_core::{FetchedVerse, ServerConfig, VerseRecord};
use gita_gemini::GenerateTransport;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::middleware::log_client;
use crate::state::AppState;

pub const INDEX_MESSAGE: &str = "Bhagavath Geetha Telugu API is running!";
pub const SOURCE_DATABASE: &str = "Database";
pub const SOURCE_GEMINI: &str = "Gemini API (Initial Fetch & Cleaned)";

/// Body of a successful `GET /verse`.
///
/// `telugu_verse` and `telugu_meaning` carry the text to display: polished
/// when available, else the original translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseResponse {
    pub chapter: u32,
    pub verse: u32,
    pub sanskrit_verse_telugu_script: Option<String>,
    pub telugu_verse: Option<String>,
    pub telugu_meaning: Option<String>,
    pub polished_telugu_verse: Option<String>,
    pub polished_telugu_meaning: Option<String>,
    pub telugu_description: Option<String>,
    pub source: String,
}

impl VerseResponse {
    pub fn from_record(record: VerseRecord) -> Self {
        Self {
            telugu_verse: record.served_telugu_verse().map(str::to_owned),
            telugu_meaning: record.served_telugu_meaning().map(str::to_owned),
            chapter: record.chapter,
            verse: record.verse,
            sanskrit_verse_telugu_script: record.sanskrit_verse_telugu_script,
            polished_telugu_verse: record.polished_telugu_verse,
            polished_telugu_meaning: record.polished_telugu_meaning,
            telugu_description: record.telugu_description,
            source: SOURCE_DATABASE.to_owned(),
        }
    }

    /// A fresh fetch has no polished text yet, so the cleaned originals
    /// stand in for it.
    pub fn from_fetched(chapter: u32, verse: u32, fetched: FetchedVerse) -> Self {
        Self {
            chapter,
            verse,
            polished_telugu_verse: Some(fetched.telugu_verse.clone()),
            polished_telugu_meaning: Some(fetched.telugu_meaning.clone()),
            sanskrit_verse_telugu_script: Some(fetched.sanskrit_verse_telugu_script),
            telugu_verse: Some(fetched.telugu_verse),
            telugu_meaning: Some(fetched.telugu_meaning),
            telugu_description: None,
            source: SOURCE_GEMINI.to_owned(),
        }
    }
}

pub fn router<T: GenerateTransport + 'static>(state: AppState<T>, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/verse",
            get(get_verse::<T>).layer(middleware::from_fn(log_client)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins))
        .with_state(state)
}

/// Any origin when `origins` is empty, else only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
}

async fn index() -> &'static str {
    tracing::info!("{INDEX_MESSAGE}");
    INDEX_MESSAGE
}

async fn get_verse<T: GenerateTransport>(
    State(state): State<AppState<T>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<VerseResponse>, ApiError> {
    let (chapter, verse) = match (int_param(&params, "chapter"), int_param(&params, "verse")) {
        (Some(chapter), Some(verse)) => (chapter, verse),
        _ => {
            tracing::error!("missing or non-integer chapter/verse parameter");
            return Err(ApiError::MissingParameters);
        }
    };
    if !chapter.is_positive() || !verse.is_positive() {
        tracing::error!(%chapter, %verse, "chapter and verse must be positive");
        return Err(ApiError::NotPositive);
    }

    let (Some(chapter), Some(verse)) = (chapter.to_u32(), verse.to_u32()) else {
        tracing::error!(%chapter, %verse, "chapter or verse out of range");
        return Err(ApiError::Unavailable {
            chapter: chapter.to_string(),
            verse: verse.to_string(),
        });
    };
    let unavailable = move || ApiError::Unavailable {
        chapter: chapter.to_string(),
        verse: verse.to_string(),
    };
    tracing::info!(chapter, verse, "verse requested");

    let stored = state.store.get(chapter, verse).await.map_err(|e| {
        tracing::error!(chapter, verse, error = %e, "database lookup failed");
        unavailable()
    })?;
    if let Some(record) = stored {
        tracing::info!(chapter, verse, "serving verse from database");
        return Ok(Json(VerseResponse::from_record(record)));
    }

    tracing::info!(chapter, verse, "verse not in database; fetching from Gemini");
    let fetched = state.gemini.fetch_verse(chapter, verse).await.map_err(|e| {
        tracing::error!(chapter, verse, error = %e, "Gemini fetch failed");
        unavailable()
    })?;

    match state.store.insert(chapter, verse, &fetched).await {
        Ok(true) => tracing::info!(chapter, verse, "stored verse fetched from Gemini"),
        Ok(false) => tracing::debug!(chapter, verse, "verse stored concurrently; keeping existing row"),
        Err(e) => {
            tracing::error!(chapter, verse, error = %e, "failed to store fetched verse");
            return Err(unavailable());
        }
    }

    Ok(Json(VerseResponse::from_fetched(chapter, verse, fetched)))
}

/// An integer query value. Digits beyond `i64` are kept as text so they
/// can still be echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
enum IntParam {
    Fits(i64),
    Overflow { negative: bool, digits: String },
}

impl IntParam {
    fn is_positive(&self) -> bool {
        match self {
            Self::Fits(n) => *n > 0,
            Self::Overflow { negative, .. } => !negative,
        }
    }

    fn to_u32(&self) -> Option<u32> {
        match self {
            // arch-lint: allow(no-silent-result-drop) reason="a value beyond u32 is reported as unavailable by the caller"
            Self::Fits(n) => u32::try_from(*n).ok(),
            Self::Overflow { .. } => None,
        }
    }
}

impl fmt::Display for IntParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fits(n) => write!(f, "{n}"),
            Self::Overflow { negative: true, digits } => write!(f, "-{digits}"),
            Self::Overflow { negative: false, digits } => f.write_str(digits),
        }
    }
}

/// First value of `name`, parsed as an integer. Later repeats are ignored.
fn int_param(params: &[(String, String)], name: &str) -> Option<IntParam> {
    let (_, raw) = params.iter().find(|(key, _)| key == name)?;
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(n) => Some(IntParam::Fits(n)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Some(IntParam::Overflow {
                negative: *e.kind() == IntErrorKind::NegOverflow,
                digits: raw.trim_start_matches(['+', '-']).trim_start_matches('0').to_owned(),
            }),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn int_param_parses_signed_integers() {
        let p = params(&[("chapter", " 2 "), ("verse", "-3")]);
        assert_eq!(int_param(&p, "chapter"), Some(IntParam::Fits(2)));
        assert_eq!(int_param(&p, "verse"), Some(IntParam::Fits(-3)));
    }

    #[test]
    fn int_param_takes_first_repeat() {
        let p = params(&[("chapter", "1"), ("chapter", "2"), ("verse", "x"), ("verse", "4")]);
        assert_eq!(int_param(&p, "chapter"), Some(IntParam::Fits(1)));
        assert_eq!(int_param(&p, "verse"), None);
    }

    #[test]
    fn int_param_keeps_digits_beyond_i64() {
        let p = params(&[("chapter", "00099999999999999999999"), ("verse", "-99999999999999999999")]);

        let chapter = int_param(&p, "chapter").unwrap();
        assert!(chapter.is_positive());
        assert_eq!(chapter.to_u32(), None);
        assert_eq!(chapter.to_string(), "99999999999999999999");

        let verse = int_param(&p, "verse").unwrap();
        assert!(!verse.is_positive());
        assert_eq!(verse.to_string(), "-99999999999999999999");
    }

    #[test]
    fn int_param_rejects_missing_and_non_integer() {
        let p = params(&[("chapter", "two"), ("verse", "1.5")]);
        assert_eq!(int_param(&p, "chapter"), None);
        assert_eq!(int_param(&p, "verse"), None);
        assert_eq!(int_param(&p, "absent"), None);
    }

    #[test]
    fn record_response_prefers_polished_text() {
        let record = VerseRecord {
            id: 1,
            chapter: 2,
            verse: 47,
            sanskrit_verse_telugu_script: Some("s".to_owned()),
            telugu_verse: Some("original verse".to_owned()),
            telugu_meaning: Some("original meaning".to_owned()),
            polished_telugu_verse: Some("polished verse".to_owned()),
            polished_telugu_meaning: Some(String::new()),
            telugu_description: None,
        };
        let response = VerseResponse::from_record(record);

        assert_eq!(response.telugu_verse.as_deref(), Some("polished verse"));
        assert_eq!(response.telugu_meaning.as_deref(), Some("original meaning"));
        assert_eq!(response.polished_telugu_meaning.as_deref(), Some(""));
        assert_eq!(response.source, SOURCE_DATABASE);
    }

    #[test]
    fn fetched_response_mirrors_originals_as_polished() {
        let fetched = FetchedVerse {
            sanskrit_verse_telugu_script: "s".to_owned(),
            telugu_verse: "v".to_owned(),
            telugu_meaning: "m".to_owned(),
        };
        let response = VerseResponse::from_fetched(1, 1, fetched);

        assert_eq!(response.polished_telugu_verse, response.telugu_verse);
        assert_eq!(response.polished_telugu_meaning, response.telugu_meaning);
        assert_eq!(response.telugu_description, None);
        assert_eq!(response.source, SOURCE_GEMINI);
    }
}
