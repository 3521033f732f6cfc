//! Keepsake Storage Layer
//!
//! `LocalMemory` implements the `MemoryStore` trait on SQLite: every fact
//! the extractor hands over lands in a local `memories` table, tagged with
//! the session and turn it came from.
//!
//! The pipeline only ever calls `store_batch`, `get_stats`, and `cleanup`;
//! retrieval and ranking live outside this crate.
//!
//! # Examples
//!
//! ```no_run
//! use keepsake_store::LocalMemory;
//!
//! let store = LocalMemory::new("keepsake.db").unwrap();
//! // Store is ready for batches from the extractor
//! ```

#![warn(missing_docs)]

use async_trait::async_trait;
use keepsake_domain::{MemoryCategory, MemoryFact, MemoryId, MemoryStats, MemoryStore};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data found in the database
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-backed implementation of `MemoryStore`
///
/// # Thread Safety
///
/// The connection sits behind a mutex; batches are small and writes commit
/// before the lock is released, so contention stays short.
pub struct LocalMemory {
    conn: Mutex<Connection>,
}

impl LocalMemory {
    /// Open (or create) a store at the given database path
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use keepsake_store::LocalMemory;
    ///
    /// let store = LocalMemory::new("keepsake.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store (useful for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned lock only means another writer panicked mid-call; the
        // connection rolls back its open transaction and stays usable.
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn memory_id_to_bytes(id: MemoryId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    fn unix_now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

#[async_trait]
impl MemoryStore for LocalMemory {
    type Error = StoreError;

    async fn store_batch(
        &self,
        facts: &[MemoryFact],
        session_id: Option<&str>,
        turn_number: Option<u32>,
    ) -> Result<(), Self::Error> {
        let stored_at = Self::unix_now();

        let mut conn = self.lock_conn();
        let tx = conn.transaction()?;

        for fact in facts {
            tx.execute(
                "INSERT INTO memories (id, content, category, importance, session_id, turn_number, stored_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    Self::memory_id_to_bytes(MemoryId::new()),
                    fact.content,
                    fact.category.as_str(),
                    fact.importance,
                    session_id,
                    turn_number,
                    stored_at,
                ],
            )?;
        }

        tx.commit()?;

        debug!("Stored batch of {} memories", facts.len());
        Ok(())
    }

    async fn get_stats(&self) -> Result<MemoryStats, Self::Error> {
        let conn = self.lock_conn();

        let mut stats = MemoryStats::default();

        let mut stmt =
            conn.prepare("SELECT category, COUNT(*) FROM memories GROUP BY category")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        for row in rows {
            let (category, count) = row?;
            let category = MemoryCategory::parse(&category)
                .ok_or_else(|| StoreError::InvalidData(format!("Unknown category: {}", category)))?;
            stats.by_category.insert(category, count as usize);
            stats.total_memories += count as usize;
        }

        Ok(stats)
    }

    async fn cleanup(&self) -> Result<(), Self::Error> {
        // Writes commit eagerly, so this is a light flush before shutdown
        let conn = self.lock_conn();
        conn.execute_batch("PRAGMA optimize;")?;
        debug!("Memory store flushed");
        Ok(())
    }
}
