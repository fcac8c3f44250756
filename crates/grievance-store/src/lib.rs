//! Grievance Storage Layer
//!
//! Implements the `ComplaintStore` trait over SQLite.
//!
//! Schema creation is an explicit, idempotent step performed by
//! [`SqliteStore::new`], invoked once by the process entry point - not a
//! side effect of loading the module. Timestamps are stored as fixed-width
//! RFC 3339 strings so `ORDER BY created_at` sorts chronologically.
//!
//! # Examples
//!
//! ```no_run
//! use grievance_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for complaint operations
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, SecondsFormat, Utc};
use grievance_domain::traits::{ComplaintFilter, ComplaintStore};
use grievance_domain::{
    complaint::DEFAULT_STATUS, Category, CompleteFields, Complaint, ComplaintId, Priority,
};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored row could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of ComplaintStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe; the server wraps the store in a
/// mutex and holds the lock only for the duration of one statement.
pub struct SqliteStore {
    conn: Connection,
}

const COMPLAINT_COLUMNS: &str =
    "id, name, phone_number, text, category, priority, status, created_at, updated_at";

/// How many complaints an unfiltered find returns
const RECENT_LIMIT: usize = 5;

impl SqliteStore {
    /// Open a store at the given database path and apply the schema
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    /// Safe to call on an existing database; the schema statements are
    /// idempotent.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Apply the schema and smoke-test the connection
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;

        self.conn.query_row("SELECT 1", [], |_| Ok(()))?;
        info!("Complaint schema initialized");
        Ok(())
    }

    fn row_to_complaint(row: &Row<'_>) -> rusqlite::Result<Complaint> {
        let id: String = row.get(0)?;
        let category: String = row.get(4)?;
        let priority: String = row.get(5)?;
        let created_at: String = row.get(7)?;
        let updated_at: String = row.get(8)?;

        Ok(Complaint {
            id: ComplaintId::from_string(id),
            name: row.get(1)?,
            phone_number: row.get(2)?,
            text: row.get(3)?,
            category: Self::decode_column(4, Category::parse(&category), &category)?,
            priority: Self::decode_column(5, Priority::parse(&priority), &priority)?,
            status: row.get(6)?,
            created_at: Self::decode_timestamp(7, &created_at)?,
            updated_at: Self::decode_timestamp(8, &updated_at)?,
        })
    }

    fn decode_column<T>(idx: usize, parsed: Option<T>, raw: &str) -> rusqlite::Result<T> {
        parsed.ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!("unknown value: {}", raw))),
            )
        })
    }

    fn decode_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(StoreError::InvalidData(format!("bad timestamp: {}", e))),
                )
            })
    }

    fn encode_timestamp(ts: DateTime<Utc>) -> String {
        // Fixed-width form keeps lexicographic and chronological order aligned
        ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

impl ComplaintStore for SqliteStore {
    type Error = StoreError;

    fn create(&mut self, fields: CompleteFields) -> Result<Complaint, Self::Error> {
        let now = Utc::now();
        let complaint = Complaint {
            id: ComplaintId::new(),
            name: fields.name,
            phone_number: fields.phone_number,
            text: fields.text,
            category: fields.category,
            priority: fields.priority,
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        };

        // Single INSERT, so the write is atomic: readers never see a
        // partial row
        self.conn.execute(
            "INSERT INTO complaints (id, name, phone_number, text, category, priority, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                complaint.id.as_str(),
                &complaint.name,
                &complaint.phone_number,
                &complaint.text,
                complaint.category.as_str(),
                complaint.priority.as_str(),
                &complaint.status,
                Self::encode_timestamp(complaint.created_at),
                Self::encode_timestamp(complaint.updated_at),
            ],
        )?;

        info!(id = %complaint.id, "Complaint stored");
        Ok(complaint)
    }

    fn list_all(&self) -> Result<Vec<Complaint>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM complaints ORDER BY created_at DESC, rowid DESC",
            COMPLAINT_COLUMNS
        ))?;

        let complaints = stmt
            .query_map([], Self::row_to_complaint)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(complaints)
    }

    fn find(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, Self::Error> {
        let mut sql = format!("SELECT {} FROM complaints WHERE 1=1", COMPLAINT_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(phone) = &filter.phone_number {
            sql.push_str(" AND phone_number = ?");
            params.push(Box::new(phone.clone()));
        }

        if let Some(name) = &filter.name {
            // SQLite LIKE is case-insensitive for ASCII
            sql.push_str(" AND name LIKE ?");
            params.push(Box::new(format!("%{}%", name)));
        }

        sql.push_str(" ORDER BY created_at DESC, rowid DESC");

        if filter.is_empty() {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(RECENT_LIMIT as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let complaints = stmt
            .query_map(&param_refs[..], Self::row_to_complaint)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(complaints)
    }
}
