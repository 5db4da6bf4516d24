use std::time::Duration;

use gita::maintenance::{
    CleanupReport, EnhanceReport, PopulateReport, cleanup, enhance, populate,
};
use gita_core::{FetchedVerse, VerseColumn};
use gita_gemini::{GeminiClient, GeminiError, GenerateTransport};
use gita_store::VerseStore;
use mockall::mock;

mock! {
    Transport {}

    impl GenerateTransport for Transport {
        async fn generate(&self, prompt: &str) -> Result<String, GeminiError>;
    }
}

const FETCH_REPLY: &str = "Sanskrit Verse (Telugu Script):
సంస్కృత శ్లోకం

Telugu Verse:
తెలుగు **శ్లోకం**

Telugu Meaning:
తెలుగు అర్థం (వివరణ)
";

const ENHANCE_REPLY: &str = "Polished Telugu Verse:
మెరుగైన శ్లోకం

Polished Telugu Meaning:
మెరుగైన అర్థం

Description:
చిన్న కథ.
";

async fn store() -> VerseStore {
    let store = VerseStore::in_memory().await.unwrap();
    store.init().await.unwrap();
    store
}

fn fetched(text: &str) -> FetchedVerse {
    FetchedVerse {
        sanskrit_verse_telugu_script: format!("{text} sanskrit"),
        telugu_verse: format!("{text} verse"),
        telugu_meaning: format!("{text} meaning"),
    }
}

// ── populate ──

#[tokio::test]
async fn populate_fills_one_chapter() {
    let store = store().await;
    let mut mock = MockTransport::new();
    mock.expect_generate()
        .times(20)
        .returning(|_| Ok(FETCH_REPLY.to_owned()));
    let gemini = GeminiClient::with_transport(mock);

    let report = populate(&store, &gemini, Duration::ZERO, Some(12)).await.unwrap();

    assert_eq!(
        report,
        PopulateReport {
            skipped: 0,
            inserted: 20,
            updated: 0,
            failed: 0,
        }
    );
    assert_eq!(store.count().await.unwrap(), 20);

    let record = store.get(12, 20).await.unwrap().unwrap();
    assert_eq!(record.sanskrit_verse_telugu_script.as_deref(), Some("సంస్కృత శ్లోకం"));
    assert_eq!(record.telugu_verse.as_deref(), Some("తెలుగు శ్లోకం"));
    assert_eq!(record.telugu_meaning.as_deref(), Some("తెలుగు అర్థం"));
    assert!(store.get(13, 1).await.unwrap().is_none());
}

#[tokio::test]
async fn populate_skips_stored_and_counts_failures() {
    let store = store().await;
    store.insert(15, 1, &fetched("stored")).await.unwrap();

    let mut mock = MockTransport::new();
    mock.expect_generate()
        .withf(|prompt| prompt.contains("Chapter 15, Verse 2."))
        .returning(|_| Err(GeminiError::EmptyResponse));
    mock.expect_generate()
        .returning(|_| Ok(FETCH_REPLY.to_owned()));
    let gemini = GeminiClient::with_transport(mock);

    let report = populate(&store, &gemini, Duration::ZERO, Some(15)).await.unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.inserted, 18);
    assert!(store.get(15, 2).await.unwrap().is_none());
    assert_eq!(
        store.get(15, 1).await.unwrap().unwrap().telugu_verse.as_deref(),
        Some("stored verse")
    );
}

#[tokio::test]
async fn populate_updates_row_missing_sanskrit_and_keeps_description() {
    let store = store().await;
    store.insert(16, 1, &fetched("old")).await.unwrap();
    let id = store.get(16, 1).await.unwrap().unwrap().id;
    store
        .update_column(id, VerseColumn::TeluguDescription, "పాత కథ")
        .await
        .unwrap();
    clear_sanskrit(&store, id).await;

    let mut mock = MockTransport::new();
    mock.expect_generate()
        .times(24)
        .returning(|_| Ok(FETCH_REPLY.to_owned()));
    let gemini = GeminiClient::with_transport(mock);

    let report = populate(&store, &gemini, Duration::ZERO, Some(16)).await.unwrap();

    assert_eq!(report.updated, 1);
    assert_eq!(report.inserted, 23);

    let record = store.get(16, 1).await.unwrap().unwrap();
    assert_eq!(record.sanskrit_verse_telugu_script.as_deref(), Some("సంస్కృత శ్లోకం"));
    assert_eq!(record.polished_telugu_verse.as_deref(), Some("తెలుగు శ్లోకం"));
    assert_eq!(record.polished_telugu_meaning.as_deref(), Some("తెలుగు అర్థం"));
    assert_eq!(record.telugu_description.as_deref(), Some("పాత కథ"));
}

/// Simulate a row written before the Sanskrit column was populated.
async fn clear_sanskrit(store: &VerseStore, id: i64) {
    sqlx::query("UPDATE verses SET sanskrit_verse_telugu_script = NULL WHERE id = ?")
        .bind(id)
        .execute(store.pool())
        .await
        .unwrap();
}

/// Reply that first deletes `(chapter, verse)`, as if the row were removed
/// while the model was answering.
fn reply_after_deleting(
    pool: sqlx::SqlitePool,
    chapter: u32,
    verse: u32,
    reply: &'static str,
) -> impl FnMut(&str) -> Result<String, GeminiError> + Send + 'static {
    move |_| {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(
                sqlx::query("DELETE FROM verses WHERE chapter = ? AND verse = ?")
                    .bind(chapter)
                    .bind(verse)
                    .execute(&pool),
            )
        })
        .unwrap();
        Ok(reply.to_owned())
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn populate_counts_vanished_row_as_failed() {
    let store = store().await;
    store.insert(12, 1, &fetched("old")).await.unwrap();
    let id = store.get(12, 1).await.unwrap().unwrap().id;
    clear_sanskrit(&store, id).await;

    let mut mock = MockTransport::new();
    mock.expect_generate()
        .times(20)
        .returning(reply_after_deleting(store.pool().clone(), 12, 1, FETCH_REPLY));
    let gemini = GeminiClient::with_transport(mock);

    let report = populate(&store, &gemini, Duration::ZERO, Some(12)).await.unwrap();

    assert_eq!(
        report,
        PopulateReport {
            skipped: 0,
            inserted: 19,
            updated: 0,
            failed: 1,
        }
    );
    assert!(store.get(12, 1).await.unwrap().is_none());
}

// ── enhance ──

#[tokio::test]
async fn enhance_updates_pending_rows() {
    let store = store().await;
    store.insert(1, 1, &fetched("a")).await.unwrap();
    store.insert(1, 2, &fetched("b")).await.unwrap();

    let mut mock = MockTransport::new();
    mock.expect_generate()
        .withf(|prompt| prompt.contains("Telugu Verse (Basic): a verse"))
        .times(1)
        .returning(|_| Ok(ENHANCE_REPLY.to_owned()));
    mock.expect_generate()
        .withf(|prompt| prompt.contains("Telugu Verse (Basic): b verse"))
        .times(1)
        .returning(|_| Err(GeminiError::Status {
            status: 503,
            body: "overloaded".to_owned(),
        }));
    let gemini = GeminiClient::with_transport(mock);

    let report = enhance(&store, &gemini, Duration::ZERO).await.unwrap();

    assert_eq!(
        report,
        EnhanceReport {
            enhanced: 1,
            skipped: 0,
            failed: 1,
        }
    );

    let done = store.get(1, 1).await.unwrap().unwrap();
    assert_eq!(done.polished_telugu_verse.as_deref(), Some("మెరుగైన శ్లోకం"));
    assert_eq!(done.polished_telugu_meaning.as_deref(), Some("మెరుగైన అర్థం"));
    assert_eq!(done.telugu_description.as_deref(), Some("చిన్న కథ."));

    let pending = store.verses_to_enhance().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!((pending[0].chapter, pending[0].verse), (1, 2));
}

#[tokio::test]
async fn enhance_skips_rows_without_originals() {
    let store = store().await;
    store
        .insert(
            4,
            7,
            &FetchedVerse {
                sanskrit_verse_telugu_script: "s".to_owned(),
                telugu_verse: String::new(),
                telugu_meaning: "m".to_owned(),
            },
        )
        .await
        .unwrap();

    let mut mock = MockTransport::new();
    mock.expect_generate().never();
    let gemini = GeminiClient::with_transport(mock);

    let report = enhance(&store, &gemini, Duration::ZERO).await.unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.enhanced, 0);
}

#[tokio::test]
async fn enhance_with_nothing_pending_makes_no_calls() {
    let mut mock = MockTransport::new();
    mock.expect_generate().never();
    let gemini = GeminiClient::with_transport(mock);

    let report = enhance(&store().await, &gemini, Duration::ZERO).await.unwrap();

    assert_eq!(report, EnhanceReport::default());
}

#[tokio::test(flavor = "multi_thread")]
async fn enhance_counts_vanished_row_as_failed() {
    let store = store().await;
    store.insert(3, 5, &fetched("gone")).await.unwrap();

    let mut mock = MockTransport::new();
    mock.expect_generate()
        .times(1)
        .returning(reply_after_deleting(store.pool().clone(), 3, 5, ENHANCE_REPLY));
    let gemini = GeminiClient::with_transport(mock);

    let report = enhance(&store, &gemini, Duration::ZERO).await.unwrap();

    assert_eq!(
        report,
        EnhanceReport {
            enhanced: 0,
            skipped: 0,
            failed: 1,
        }
    );
}

// ── cleanup ──

#[tokio::test]
async fn cleanup_strips_markup_from_every_column() {
    let store = store().await;
    store
        .insert(
            2,
            1,
            &FetchedVerse {
                sanskrit_verse_telugu_script: "**ధర్మ**".to_owned(),
                telugu_verse: "శ్లోకం (గమనిక) ఇక్కడ".to_owned(),
                telugu_meaning: "శుభ్రమైన అర్థం".to_owned(),
            },
        )
        .await
        .unwrap();
    store.insert(2, 2, &fetched("clean")).await.unwrap();
    let id = store.get(2, 1).await.unwrap().unwrap().id;
    store
        .update_column(id, VerseColumn::TeluguDescription, " కథ (మూలం) ")
        .await
        .unwrap();

    let report = cleanup(&store).await.unwrap();

    assert_eq!(
        report,
        CleanupReport {
            checked: 2,
            cleaned: 1,
            failed: 0,
        }
    );

    let record = store.get(2, 1).await.unwrap().unwrap();
    assert_eq!(record.sanskrit_verse_telugu_script.as_deref(), Some("ధర్మ"));
    assert_eq!(record.telugu_verse.as_deref(), Some("శ్లోకంఇక్కడ"));
    assert_eq!(record.telugu_meaning.as_deref(), Some("శుభ్రమైన అర్థం"));
    assert_eq!(record.telugu_description.as_deref(), Some("కథ"));

    // A second pass finds nothing left to clean.
    assert_eq!(cleanup(&store).await.unwrap().cleaned, 0);
}
