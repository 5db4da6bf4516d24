use gita_core::VerseColumn;

pub(crate) const CREATE_VERSES: &str = "
CREATE TABLE verses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    chapter INTEGER NOT NULL,
    verse INTEGER NOT NULL,
    sanskrit_verse_telugu_script TEXT,
    telugu_verse TEXT,
    telugu_meaning TEXT,
    polished_telugu_verse TEXT,
    polished_telugu_meaning TEXT,
    telugu_description TEXT,
    UNIQUE(chapter, verse)
)";

pub(crate) const TABLE_EXISTS: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'verses'";

pub(crate) const COLUMN_NAMES: &str = "SELECT name FROM pragma_table_info('verses')";

pub(crate) const SELECT_COLUMNS: &str = "id, chapter, verse, sanskrit_verse_telugu_script, \
    telugu_verse, telugu_meaning, polished_telugu_verse, polished_telugu_meaning, \
    telugu_description";

pub(crate) fn add_column(column: VerseColumn) -> String {
    format!("ALTER TABLE verses ADD COLUMN {column} TEXT")
}

/// `UPDATE` setting each given column, keyed by `id` as the last bind.
pub(crate) fn update_by_id(columns: &[VerseColumn]) -> String {
    let assignments: Vec<String> = columns.iter().map(|c| format!("{c} = ?")).collect();
    format!("UPDATE verses SET {} WHERE id = ?", assignments.join(", "))
}
