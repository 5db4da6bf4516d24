//! Prompt templates. The labels here must match the ones [`crate::parse`]
//! looks for.

pub const SANSKRIT_LABEL: &str = "Sanskrit Verse (Telugu Script):";
pub const TELUGU_VERSE_LABEL: &str = "Telugu Verse:";
pub const TELUGU_MEANING_LABEL: &str = "Telugu Meaning:";

pub const POLISHED_VERSE_LABEL: &str = "Polished Telugu Verse:";
pub const POLISHED_MEANING_LABEL: &str = "Polished Telugu Meaning:";
pub const DESCRIPTION_LABEL: &str = "Description:";

/// Ask for the Sanskrit verse in Telugu script plus a basic Telugu
/// translation and meaning.
pub fn fetch_prompt(chapter: u32, verse: u32) -> String {
    format!(
        "Provide Bhagavad Gita Chapter {chapter}, Verse {verse}.
Provide the original Sanskrit verse transliterated into Telugu script.
Provide a basic Telugu translation of the verse.
Provide a basic Telugu meaning of the verse.

Strictly format as follows, with no extra text, introductions, or commentary outside these labels:
{SANSKRIT_LABEL}
[Original Sanskrit Verse Text in Telugu Script]

{TELUGU_VERSE_LABEL}
[Basic Telugu Verse Translation Text]

{TELUGU_MEANING_LABEL}
[Basic Telugu Meaning Text]
"
    )
}

/// Ask for polished versions of the basic texts and a short description.
pub fn enhance_prompt(sanskrit: &str, telugu_verse: &str, telugu_meaning: &str) -> String {
    format!(
        "Review the following Bhagavad Gita verse (Sanskrit in Telugu script), its basic Telugu translation, and its meaning.
Sanskrit Verse (Telugu Script): {sanskrit}
Telugu Verse (Basic): {telugu_verse}
Telugu Meaning (Basic): {telugu_meaning}

1. Polish the basic Telugu verse translation for clarity, correct grammar, and natural sentence flow. Ensure it aligns with the Sanskrit verse. Remove any markdown like asterisks (**) or notes in parentheses (...).
2. Polish the basic Telugu meaning for clarity, correct grammar, and natural sentence flow. Ensure it accurately reflects the verse's meaning. Remove any markdown like asterisks (**) or notes in parentheses (...).
3. Write a concise, engaging story or description in Telugu (2-4 sentences) that captures the essence and context of this verse. This description should help a reader understand the practical application or deeper meaning. Remove any markdown like asterisks (**) or notes in parentheses (...).

Strictly format the output as follows, with no extra text, introductions, or commentary outside these labels:
{POLISHED_VERSE_LABEL}
[Polished Telugu Verse Text]

{POLISHED_MEANING_LABEL}
[Polished Telugu Meaning Text]

{DESCRIPTION_LABEL}
[Short Telugu Description/Story Text]
"
    )
}
