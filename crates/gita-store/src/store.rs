use std::path::Path;
use std::str::FromStr;

use gita_core::{FetchedVerse, VerseColumn, VerseRecord};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::{StoreError, query};
use crate::schema;

#[derive(sqlx::FromRow)]
struct VerseRow {
    id: i64,
    chapter: u32,
    verse: u32,
    sanskrit_verse_telugu_script: Option<String>,
    telugu_verse: Option<String>,
    telugu_meaning: Option<String>,
    polished_telugu_verse: Option<String>,
    polished_telugu_meaning: Option<String>,
    telugu_description: Option<String>,
}

impl From<VerseRow> for VerseRecord {
    fn from(row: VerseRow) -> Self {
        Self {
            id: row.id,
            chapter: row.chapter,
            verse: row.verse,
            sanskrit_verse_telugu_script: row.sanskrit_verse_telugu_script,
            telugu_verse: row.telugu_verse,
            telugu_meaning: row.telugu_meaning,
            polished_telugu_verse: row.polished_telugu_verse,
            polished_telugu_meaning: row.polished_telugu_meaning,
            telugu_description: row.telugu_description,
        }
    }
}

/// Verse storage backed by a SQLite connection pool.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct VerseStore {
    pool: SqlitePool,
}

impl VerseStore {
    /// Open the database file at `path`, creating it if missing.
    ///
    /// The schema is not touched; call [`init`](Self::init) afterwards.
    pub async fn connect(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connect {
                path: path.to_path_buf(),
                source: e,
            })?;
        tracing::debug!(path = %path.display(), "opened verse database");
        Ok(Self { pool })
    }

    /// Private in-memory database.
    ///
    /// Limited to one connection that never expires, since every SQLite
    /// in-memory connection is its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let connect_err = |e| StoreError::Connect {
            path: ":memory:".into(),
            source: e,
        };
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(connect_err)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(connect_err)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `verses` table, or add any text column an existing table
    /// is missing. Safe to call on every start.
    pub async fn init(&self) -> Result<(), StoreError> {
        let table: Option<String> = sqlx::query_scalar(schema::TABLE_EXISTS)
            .fetch_optional(&self.pool)
            .await
            .map_err(query("check for verses table"))?;

        if table.is_none() {
            sqlx::query(schema::CREATE_VERSES)
                .execute(&self.pool)
                .await
                .map_err(query("create verses table"))?;
            tracing::info!("created table 'verses'");
            return Ok(());
        }

        let existing: Vec<String> = sqlx::query_scalar(schema::COLUMN_NAMES)
            .fetch_all(&self.pool)
            .await
            .map_err(query("read verses columns"))?;

        for column in VerseColumn::ALL {
            if existing.iter().any(|name| name == column.as_str()) {
                continue;
            }
            tracing::info!(%column, "adding missing column to 'verses'");
            sqlx::query(&schema::add_column(column))
                .execute(&self.pool)
                .await
                .map_err(query("add verses column"))?;
        }

        Ok(())
    }

    pub async fn get(&self, chapter: u32, verse: u32) -> Result<Option<VerseRecord>, StoreError> {
        let sql = format!(
            "SELECT {} FROM verses WHERE chapter = ? AND verse = ?",
            schema::SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, VerseRow>(&sql)
            .bind(chapter)
            .bind(verse)
            .fetch_optional(&self.pool)
            .await
            .map_err(query("select verse"))?;
        Ok(row.map(VerseRecord::from))
    }

    /// Insert a freshly fetched verse.
    ///
    /// Returns `false` when the `(chapter, verse)` pair is already stored;
    /// the existing row is left untouched.
    pub async fn insert(
        &self,
        chapter: u32,
        verse: u32,
        fetched: &FetchedVerse,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO verses (chapter, verse, sanskrit_verse_telugu_script, telugu_verse, telugu_meaning) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(chapter, verse) DO NOTHING",
        )
        .bind(chapter)
        .bind(verse)
        .bind(fetched.sanskrit_verse_telugu_script.as_str())
        .bind(fetched.telugu_verse.as_str())
        .bind(fetched.telugu_meaning.as_str())
        .execute(&self.pool)
        .await
        .map_err(query("insert verse"))?;

        let inserted = result.rows_affected() > 0;
        if inserted {
            tracing::debug!(chapter, verse, "inserted verse");
        } else {
            tracing::debug!(chapter, verse, "verse already stored; insert skipped");
        }
        Ok(inserted)
    }

    /// Overwrite the Sanskrit text, polished texts, and description.
    ///
    /// Returns `false` when no row matches.
    pub async fn update_enhancements(
        &self,
        chapter: u32,
        verse: u32,
        sanskrit_verse_telugu_script: &str,
        polished_verse: &str,
        polished_meaning: &str,
        description: Option<&str>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE verses \
             SET sanskrit_verse_telugu_script = ?, \
                 polished_telugu_verse = ?, \
                 polished_telugu_meaning = ?, \
                 telugu_description = ? \
             WHERE chapter = ? AND verse = ?",
        )
        .bind(sanskrit_verse_telugu_script)
        .bind(polished_verse)
        .bind(polished_meaning)
        .bind(description)
        .bind(chapter)
        .bind(verse)
        .execute(&self.pool)
        .await
        .map_err(query("update verse enhancements"))?;

        Ok(result.rows_affected() > 0)
    }

    /// Rows still lacking polished text or a description.
    pub async fn verses_to_enhance(&self) -> Result<Vec<VerseRecord>, StoreError> {
        let sql = format!(
            "SELECT {} FROM verses \
             WHERE polished_telugu_verse IS NULL OR telugu_description IS NULL \
             ORDER BY chapter, verse",
            schema::SELECT_COLUMNS
        );
        self.fetch_all(&sql, "select verses to enhance").await
    }

    pub async fn all_verses(&self) -> Result<Vec<VerseRecord>, StoreError> {
        let sql = format!(
            "SELECT {} FROM verses ORDER BY chapter, verse",
            schema::SELECT_COLUMNS
        );
        self.fetch_all(&sql, "select all verses").await
    }

    pub async fn update_column(
        &self,
        id: i64,
        column: VerseColumn,
        text: &str,
    ) -> Result<bool, StoreError> {
        self.update_columns(id, &[(column, text.to_owned())]).await
    }

    /// Set several text columns of one row in a single statement.
    ///
    /// Returns `false` when `changes` is empty or no row has this `id`.
    pub async fn update_columns(
        &self,
        id: i64,
        changes: &[(VerseColumn, String)],
    ) -> Result<bool, StoreError> {
        if changes.is_empty() {
            return Ok(false);
        }
        let columns: Vec<VerseColumn> = changes.iter().map(|(c, _)| *c).collect();
        let sql = schema::update_by_id(&columns);

        let mut statement = sqlx::query(&sql);
        for (_, text) in changes {
            statement = statement.bind(text.as_str());
        }
        let result = statement
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query("update verse columns"))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM verses")
            .fetch_one(&self.pool)
            .await
            .map_err(query("count verses"))
    }

    async fn fetch_all(
        &self,
        sql: &str,
        context: &'static str,
    ) -> Result<Vec<VerseRecord>, StoreError> {
        let rows = sqlx::query_as::<_, VerseRow>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(query(context))?;
        Ok(rows.into_iter().map(VerseRecord::from).collect())
    }
}
