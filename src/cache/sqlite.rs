use rusqlite::{Connection, Row, params, params_from_iter};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{CacheEntry, CacheScope, CacheStore};
use crate::error::StoreError;
use crate::paths;

/// Table used when the configuration does not name one.
pub const DEFAULT_TABLE: &str = "translations_cache";

/// Maximum number of digests bound into a single `IN (...)` clause.
const LOOKUP_CHUNK: usize = 500;

pub struct SqliteCacheStore {
    db_path: PathBuf,
    table: String,
}

impl SqliteCacheStore {
    /// Opens the cache database in the user cache directory.
    pub fn new(table: &str) -> Result<Self, StoreError> {
        let cache_dir = paths::cache_dir();

        std::fs::create_dir_all(&cache_dir).map_err(|source| StoreError::CreateDir {
            path: cache_dir.clone(),
            source,
        })?;

        Self::open(cache_dir.join("translations.db"), table)
    }

    /// Opens (and if needed creates) the cache at an explicit path.
    pub fn open(db_path: impl Into<PathBuf>, table: &str) -> Result<Self, StoreError> {
        if !is_valid_identifier(table) {
            return Err(StoreError::InvalidTableName(table.to_string()));
        }

        let store = Self {
            db_path: db_path.into(),
            table: table.to_string(),
        };

        store.init_db()?;

        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn init_db(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let table = &self.table;

        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                text_hash TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                source_lang TEXT NOT NULL,
                target_lang TEXT NOT NULL,
                options TEXT,
                options_hash TEXT NOT NULL,
                detected_source_lang TEXT,
                billed_characters INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS {table}_lookup_index
                ON {table}(text_hash, source_lang, target_lang, options_hash);"
        ))
        .map_err(StoreError::Schema)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.db_path).map_err(|source| StoreError::Open {
            path: self.db_path.clone(),
            source,
        })
    }

    /// Number of rows in the cache table.
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.connect()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
                row.get(0)
            })
            .map_err(StoreError::Lookup)?;
        Ok(count as usize)
    }
}

impl CacheStore for SqliteCacheStore {
    fn lookup(
        &self,
        text_digests: &[String],
        scope: CacheScope<'_>,
    ) -> Result<HashMap<String, CacheEntry>, StoreError> {
        let mut found = HashMap::new();
        if text_digests.is_empty() {
            return Ok(found);
        }

        let conn = self.connect()?;

        for chunk in text_digests.chunks(LOOKUP_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT text, text_hash, translated_text, source_lang, target_lang, options,
                        options_hash, detected_source_lang, billed_characters, created_at, updated_at
                 FROM {}
                 WHERE text_hash IN ({placeholders})
                   AND source_lang = ? AND target_lang = ? AND options_hash = ?
                 ORDER BY id",
                self.table
            );

            let bound = chunk
                .iter()
                .map(String::as_str)
                .chain([scope.source_lang, scope.target_lang, scope.options_digest]);

            let mut stmt = conn.prepare(&sql).map_err(StoreError::Lookup)?;
            let rows = stmt
                .query_map(params_from_iter(bound), entry_from_row)
                .map_err(StoreError::Lookup)?;

            for row in rows {
                let entry = row.map_err(StoreError::Lookup)?;
                found.entry(entry.text_digest.clone()).or_insert(entry);
            }
        }

        debug!(
            requested = text_digests.len(),
            hits = found.len(),
            "cache lookup"
        );

        Ok(found)
    }

    fn insert(&self, entry: &CacheEntry) -> Result<(), StoreError> {
        let conn = self.connect()?;

        conn.execute(
            &format!(
                "INSERT INTO {}
                 (text, text_hash, translated_text, source_lang, target_lang, options,
                  options_hash, detected_source_lang, billed_characters, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                self.table
            ),
            params![
                entry.text,
                entry.text_digest,
                entry.translated_text,
                entry.source_lang,
                entry.target_lang,
                entry.options,
                entry.options_digest,
                entry.detected_source_lang,
                entry.billed_units,
                entry.created_at,
                entry.updated_at,
            ],
        )
        .map_err(StoreError::Insert)?;

        Ok(())
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<CacheEntry> {
    Ok(CacheEntry {
        text: row.get(0)?,
        text_digest: row.get(1)?,
        translated_text: row.get(2)?,
        source_lang: row.get(3)?,
        target_lang: row.get(4)?,
        options: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        options_digest: row.get(6)?,
        detected_source_lang: row.get(7)?,
        billed_units: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
