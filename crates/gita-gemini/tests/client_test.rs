use gita_gemini::{GeminiClient, GeminiError, GenerateTransport};
use mockall::mock;

mock! {
    Transport {}

    impl GenerateTransport for Transport {
        async fn generate(&self, prompt: &str) -> Result<String, GeminiError>;
    }
}

const FETCH_REPLY: &str = "Sanskrit Verse (Telugu Script):
ధర్మక్షేత్రే కురుక్షేత్రే

Telugu Verse:
**ధర్మక్షేత్రమైన** కురుక్షేత్రంలో

Telugu Meaning:
ధృతరాష్ట్రుడు సంజయుని అడిగెను (ప్రశ్న).
";

const ENHANCE_REPLY: &str = "Polished Telugu Verse:
ధర్మభూమి అయిన కురుక్షేత్రంలో

Polished Telugu Meaning:
ధృతరాష్ట్రుడు సంజయుని ఇలా అడిగాడు.

Description:
యుద్ధానికి ముందు **ధృతరాష్ట్రుడు** ఆందోళన చెందాడు.
";

// ── fetch_verse ──

#[tokio::test]
async fn fetch_verse_sends_chapter_and_verse() {
    let mut mock = MockTransport::new();
    mock.expect_generate()
        .withf(|prompt| prompt.contains("Chapter 1, Verse 1"))
        .times(1)
        .returning(|_| Ok(FETCH_REPLY.to_owned()));

    let client = GeminiClient::with_transport(mock);
    let fetched = client.fetch_verse(1, 1).await.unwrap();

    assert_eq!(fetched.sanskrit_verse_telugu_script, "ధర్మక్షేత్రే కురుక్షేత్రే");
    assert_eq!(fetched.telugu_verse, "ధర్మక్షేత్రమైన కురుక్షేత్రంలో");
    assert_eq!(fetched.telugu_meaning, "ధృతరాష్ట్రుడు సంజయుని అడిగెను.");
}

#[tokio::test]
async fn fetch_verse_propagates_transport_error() {
    let mut mock = MockTransport::new();
    mock.expect_generate().returning(|_| {
        Err(GeminiError::Status {
            status: 429,
            body: "quota exceeded".to_owned(),
        })
    });

    let client = GeminiClient::with_transport(mock);
    let err = client.fetch_verse(2, 1).await.unwrap_err();

    assert!(matches!(err, GeminiError::Status { status: 429, .. }));
}

#[tokio::test]
async fn fetch_verse_rejects_unlabeled_reply() {
    let mut mock = MockTransport::new();
    mock.expect_generate()
        .returning(|_| Ok("I cannot help with that.".to_owned()));

    let client = GeminiClient::with_transport(mock);
    let err = client.fetch_verse(2, 1).await.unwrap_err();

    assert!(matches!(err, GeminiError::UnexpectedFormat { .. }));
}

#[tokio::test]
async fn fetch_verse_missing_key() {
    let mut mock = MockTransport::new();
    mock.expect_generate()
        .returning(|_| Err(GeminiError::MissingApiKey));

    let client = GeminiClient::with_transport(mock);
    assert!(matches!(
        client.fetch_verse(1, 1).await,
        Err(GeminiError::MissingApiKey)
    ));
}

// ── enhance_verse ──

#[tokio::test]
async fn enhance_verse_embeds_originals() {
    let mut mock = MockTransport::new();
    mock.expect_generate()
        .withf(|prompt| {
            prompt.contains("Sanskrit Verse (Telugu Script): సంస్కృతం")
                && prompt.contains("Telugu Verse (Basic): శ్లోకం")
                && prompt.contains("Telugu Meaning (Basic): అర్థం")
        })
        .times(1)
        .returning(|_| Ok(ENHANCE_REPLY.to_owned()));

    let client = GeminiClient::with_transport(mock);
    let enhanced = client
        .enhance_verse(1, 1, "సంస్కృతం", "శ్లోకం", "అర్థం")
        .await
        .unwrap();

    assert_eq!(enhanced.polished_verse, "ధర్మభూమి అయిన కురుక్షేత్రంలో");
    assert_eq!(enhanced.polished_meaning, "ధృతరాష్ట్రుడు సంజయుని ఇలా అడిగాడు.");
    assert_eq!(enhanced.description, "యుద్ధానికి ముందు ధృతరాష్ట్రుడు ఆందోళన చెందాడు.");
}

#[tokio::test]
async fn enhance_verse_rejects_fetch_shaped_reply() {
    let mut mock = MockTransport::new();
    mock.expect_generate()
        .returning(|_| Ok(FETCH_REPLY.to_owned()));

    let client = GeminiClient::with_transport(mock);
    let err = client
        .enhance_verse(1, 1, "s", "v", "m")
        .await
        .unwrap_err();

    assert!(matches!(err, GeminiError::UnexpectedFormat { .. }));
}
