//! Offline jobs over the verse database.
//!
//! Each job walks rows sequentially. Model calls are spaced by a fixed
//! delay to stay under the API rate limit. A failed model call is counted
//! and skipped; a database error aborts the job.

use std::time::Duration;

use gita_core::verse_refs;
use gita_gemini::{GeminiClient, GenerateTransport};
use gita_store::{StoreError, VerseStore};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PopulateReport {
    /// Already stored with Sanskrit text.
    pub skipped: usize,
    pub inserted: usize,
    /// Existing rows that lacked Sanskrit text.
    pub updated: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnhanceReport {
    pub enhanced: usize,
    /// Missing an original text to enhance from.
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub checked: usize,
    pub cleaned: usize,
    pub failed: usize,
}

/// Fetch every verse (or every verse of `chapter`) that is not yet stored
/// with its Sanskrit text.
pub async fn populate<T: GenerateTransport>(
    store: &VerseStore,
    gemini: &GeminiClient<T>,
    delay: Duration,
    chapter: Option<u32>,
) -> Result<PopulateReport, StoreError> {
    let mut report = PopulateReport::default();

    for (ch, verse) in verse_refs().filter(|(ch, _)| chapter.is_none_or(|c| c == *ch)) {
        let existing = store.get(ch, verse).await?;
        if existing
            .as_ref()
            .is_some_and(|r| r.sanskrit_verse_telugu_script.is_some())
        {
            tracing::debug!(chapter = ch, verse, "already stored; skipping");
            report.skipped += 1;
            continue;
        }

        match gemini.fetch_verse(ch, verse).await {
            Ok(fetched) => match existing {
                Some(record) => {
                    // Fetched texts stand in as polished until `enhance` runs.
                    let updated = store
                        .update_enhancements(
                            ch,
                            verse,
                            &fetched.sanskrit_verse_telugu_script,
                            &fetched.telugu_verse,
                            &fetched.telugu_meaning,
                            record.telugu_description.as_deref(),
                        )
                        .await?;
                    if updated {
                        tracing::info!(chapter = ch, verse, "updated verse missing Sanskrit text");
                        report.updated += 1;
                    } else {
                        tracing::warn!(chapter = ch, verse, "verse disappeared before update");
                        report.failed += 1;
                    }
                }
                None => {
                    if store.insert(ch, verse, &fetched).await? {
                        tracing::info!(chapter = ch, verse, "inserted verse");
                        report.inserted += 1;
                    } else {
                        tracing::debug!(chapter = ch, verse, "verse stored concurrently; skipping");
                        report.skipped += 1;
                    }
                }
            },
            Err(e) => {
                tracing::warn!(chapter = ch, verse, error = %e, "fetch failed");
                report.failed += 1;
            }
        }

        tokio::time::sleep(delay).await;
    }

    tracing::info!(?report, "populate finished");
    Ok(report)
}

/// Polish stored verses and add descriptions where either is missing.
pub async fn enhance<T: GenerateTransport>(
    store: &VerseStore,
    gemini: &GeminiClient<T>,
    delay: Duration,
) -> Result<EnhanceReport, StoreError> {
    let mut report = EnhanceReport::default();

    let pending = store.verses_to_enhance().await?;
    if pending.is_empty() {
        tracing::info!("no verses need enhancement");
        return Ok(report);
    }
    tracing::info!(count = pending.len(), "verses to enhance");

    for record in &pending {
        let (chapter, verse) = (record.chapter, record.verse);
        let Some((sanskrit, telugu_verse, telugu_meaning)) = record.enhancement_source() else {
            tracing::warn!(chapter, verse, "original text missing; skipping enhancement");
            report.skipped += 1;
            continue;
        };

        match gemini
            .enhance_verse(chapter, verse, sanskrit, telugu_verse, telugu_meaning)
            .await
        {
            Ok(enhanced) => {
                let updated = store
                    .update_enhancements(
                        chapter,
                        verse,
                        sanskrit,
                        &enhanced.polished_verse,
                        &enhanced.polished_meaning,
                        Some(&enhanced.description),
                    )
                    .await?;
                if updated {
                    tracing::info!(chapter, verse, "enhanced verse");
                    report.enhanced += 1;
                } else {
                    tracing::warn!(chapter, verse, "verse disappeared before enhancement was saved");
                    report.failed += 1;
                }
            }
            Err(e) => {
                tracing::warn!(chapter, verse, error = %e, "enhancement failed");
                report.failed += 1;
            }
        }

        tokio::time::sleep(delay).await;
    }

    tracing::info!(?report, "enhance finished");
    Ok(report)
}

/// Strip markdown emphasis and parenthetical notes from every stored text
/// column. A row whose update fails is counted and left as it was.
pub async fn cleanup(store: &VerseStore) -> Result<CleanupReport, StoreError> {
    let mut report = CleanupReport::default();

    for record in store.all_verses().await? {
        report.checked += 1;
        let changes = record.cleaned_columns();
        if changes.is_empty() {
            continue;
        }

        let columns: Vec<&str> = changes.iter().map(|(c, _)| c.as_str()).collect();
        match store.update_columns(record.id, &changes).await {
            Ok(true) => {
                tracing::info!(chapter = record.chapter, verse = record.verse, ?columns, "cleaned verse");
                report.cleaned += 1;
            }
            Ok(false) => {
                tracing::warn!(chapter = record.chapter, verse = record.verse, "verse disappeared before cleanup");
                report.failed += 1;
            }
            Err(e) => {
                tracing::warn!(chapter = record.chapter, verse = record.verse, error = %e, "cleanup update failed");
                report.failed += 1;
            }
        }
    }

    tracing::info!(?report, "cleanup finished");
    Ok(report)
}
