//! Split labeled model replies into their sections.

use gita_core::{EnhancedVerse, FetchedVerse, clean_text};

use crate::error::GeminiError;
use crate::prompt::{
    DESCRIPTION_LABEL, POLISHED_MEANING_LABEL, POLISHED_VERSE_LABEL, SANSKRIT_LABEL,
    TELUGU_MEANING_LABEL, TELUGU_VERSE_LABEL,
};

/// Parse an initial fetch reply.
///
/// The Telugu verse and meaning are cleaned; the Sanskrit text is kept
/// as returned (trimmed).
pub fn parse_fetched(text: &str) -> Result<FetchedVerse, GeminiError> {
    let [sanskrit, verse, meaning] = split_sections(
        text,
        [SANSKRIT_LABEL, TELUGU_VERSE_LABEL, TELUGU_MEANING_LABEL],
    )?;
    Ok(FetchedVerse {
        sanskrit_verse_telugu_script: sanskrit.to_owned(),
        telugu_verse: clean_text(verse),
        telugu_meaning: clean_text(meaning),
    })
}

/// Parse an enhancement reply. All three sections are cleaned.
pub fn parse_enhanced(text: &str) -> Result<EnhancedVerse, GeminiError> {
    let [verse, meaning, description] = split_sections(
        text,
        [POLISHED_VERSE_LABEL, POLISHED_MEANING_LABEL, DESCRIPTION_LABEL],
    )?;
    Ok(EnhancedVerse {
        polished_verse: clean_text(verse),
        polished_meaning: clean_text(meaning),
        description: clean_text(description),
    })
}

/// Locate the first occurrence of each label and return the trimmed text
/// between consecutive labels (the last section runs to the end).
///
/// Labels must all be present and appear in the given order.
fn split_sections<'a>(text: &'a str, labels: [&str; 3]) -> Result<[&'a str; 3], GeminiError> {
    let mut starts = [0usize; 3];
    for (start, label) in starts.iter_mut().zip(labels) {
        *start = text.find(label).ok_or_else(|| GeminiError::UnexpectedFormat {
            reason: format!("label {label:?} not found"),
        })?;
    }

    if !(starts[0] < starts[1] && starts[1] < starts[2]) {
        return Err(GeminiError::UnexpectedFormat {
            reason: format!("labels out of order: {}", labels.join(" / ")),
        });
    }

    let body = |i: usize| {
        let from = starts[i] + labels[i].len();
        let to = starts.get(i + 1).copied().unwrap_or(text.len());
        // Overlapping labels would leave `from` past `to`.
        text.get(from..to).unwrap_or_default().trim()
    };

    Ok([body(0), body(1), body(2)])
}
