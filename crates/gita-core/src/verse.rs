use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::text::clean_text;

/// Text columns of the `verses` table.
///
/// Column names that end up in dynamically built SQL are taken from this
/// enum only, never from caller-supplied strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerseColumn {
    SanskritVerseTeluguScript,
    TeluguVerse,
    TeluguMeaning,
    PolishedTeluguVerse,
    PolishedTeluguMeaning,
    TeluguDescription,
}

impl VerseColumn {
    pub const ALL: [VerseColumn; 6] = [
        VerseColumn::SanskritVerseTeluguScript,
        VerseColumn::TeluguVerse,
        VerseColumn::TeluguMeaning,
        VerseColumn::PolishedTeluguVerse,
        VerseColumn::PolishedTeluguMeaning,
        VerseColumn::TeluguDescription,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            VerseColumn::SanskritVerseTeluguScript => "sanskrit_verse_telugu_script",
            VerseColumn::TeluguVerse => "telugu_verse",
            VerseColumn::TeluguMeaning => "telugu_meaning",
            VerseColumn::PolishedTeluguVerse => "polished_telugu_verse",
            VerseColumn::PolishedTeluguMeaning => "polished_telugu_meaning",
            VerseColumn::TeluguDescription => "telugu_description",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl fmt::Display for VerseColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerseColumn {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownColumn { name: s.to_owned() })
    }
}

/// One row of the `verses` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub id: i64,
    pub chapter: u32,
    pub verse: u32,
    /// Original Sanskrit verse transliterated into Telugu script.
    pub sanskrit_verse_telugu_script: Option<String>,
    /// Basic translation as first fetched.
    pub telugu_verse: Option<String>,
    /// Basic meaning as first fetched.
    pub telugu_meaning: Option<String>,
    pub polished_telugu_verse: Option<String>,
    pub polished_telugu_meaning: Option<String>,
    /// Short story or description of the verse.
    pub telugu_description: Option<String>,
}

impl VerseRecord {
    pub fn column(&self, column: VerseColumn) -> Option<&str> {
        let value = match column {
            VerseColumn::SanskritVerseTeluguScript => &self.sanskrit_verse_telugu_script,
            VerseColumn::TeluguVerse => &self.telugu_verse,
            VerseColumn::TeluguMeaning => &self.telugu_meaning,
            VerseColumn::PolishedTeluguVerse => &self.polished_telugu_verse,
            VerseColumn::PolishedTeluguMeaning => &self.polished_telugu_meaning,
            VerseColumn::TeluguDescription => &self.telugu_description,
        };
        value.as_deref()
    }

    /// Polished verse when present and non-empty, else the original.
    pub fn served_telugu_verse(&self) -> Option<&str> {
        non_empty(self.polished_telugu_verse.as_deref()).or(self.telugu_verse.as_deref())
    }

    /// Polished meaning when present and non-empty, else the original.
    pub fn served_telugu_meaning(&self) -> Option<&str> {
        non_empty(self.polished_telugu_meaning.as_deref()).or(self.telugu_meaning.as_deref())
    }

    /// Columns whose text changes under [`clean_text`], with the cleaned value.
    pub fn cleaned_columns(&self) -> Vec<(VerseColumn, String)> {
        VerseColumn::ALL
            .into_iter()
            .filter_map(|column| {
                let original = non_empty(self.column(column))?;
                let cleaned = clean_text(original);
                (cleaned != original).then_some((column, cleaned))
            })
            .collect()
    }

    /// The original Sanskrit, verse, and meaning needed to request an
    /// enhancement. `None` when any of them is missing or empty.
    pub fn enhancement_source(&self) -> Option<(&str, &str, &str)> {
        Some((
            non_empty(self.sanskrit_verse_telugu_script.as_deref())?,
            non_empty(self.telugu_verse.as_deref())?,
            non_empty(self.telugu_meaning.as_deref())?,
        ))
    }
}

/// Texts returned by an initial model fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedVerse {
    pub sanskrit_verse_telugu_script: String,
    pub telugu_verse: String,
    pub telugu_meaning: String,
}

/// Texts returned by an enhancement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedVerse {
    pub polished_verse: String,
    pub polished_meaning: String,
    pub description: String,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> VerseRecord {
        VerseRecord {
            id: 1,
            chapter: 2,
            verse: 47,
            sanskrit_verse_telugu_script: Some("కర్మణ్యేవాధికారస్తే".to_owned()),
            telugu_verse: Some("**నీకు** కర్మ చేయుటయందే అధికారము".to_owned()),
            telugu_meaning: Some("ఫలములయందు కాదు".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn column_names_roundtrip_through_from_str() {
        for column in VerseColumn::ALL {
            assert_eq!(column.as_str().parse::<VerseColumn>().unwrap(), column);
        }
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = "id; DROP TABLE verses".parse::<VerseColumn>().unwrap_err();
        assert!(err.to_string().contains("telugu_description"), "got: {err}");
    }

    #[test]
    fn served_text_prefers_polished() {
        let mut r = record();
        r.polished_telugu_verse = Some("మెరుగైన శ్లోకం".to_owned());
        assert_eq!(r.served_telugu_verse(), Some("మెరుగైన శ్లోకం"));
        assert_eq!(r.served_telugu_meaning(), Some("ఫలములయందు కాదు"));
    }

    #[test]
    fn served_text_falls_back_on_empty_polished() {
        let mut r = record();
        r.polished_telugu_meaning = Some(String::new());
        assert_eq!(r.served_telugu_meaning(), Some("ఫలములయందు కాదు"));
    }

    #[test]
    fn cleaned_columns_reports_only_changes() {
        let changes = record().cleaned_columns();
        assert_eq!(
            changes,
            vec![(
                VerseColumn::TeluguVerse,
                "నీకు కర్మ చేయుటయందే అధికారము".to_owned()
            )]
        );
    }

    #[test]
    fn enhancement_source_requires_all_originals() {
        assert!(record().enhancement_source().is_some());

        let mut r = record();
        r.telugu_meaning = Some(String::new());
        assert!(r.enhancement_source().is_none());

        let mut r = record();
        r.sanskrit_verse_telugu_script = None;
        assert!(r.enhancement_source().is_none());
    }
}
