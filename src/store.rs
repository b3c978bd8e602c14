//! Snapshot persistence.
//!
//! The rest of the service talks to storage through [`SnapshotStore`] so
//! handlers can be exercised without a database. [`PgSnapshotStore`] is the
//! production implementation on top of the `water_snapshots` table created by
//! [`crate::schema::create_schema`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, types::Json, PgPool, Row};
use thiserror::Error;
use uuid::Uuid;

use crate::engine::PurposeVerdict;
use crate::models::{SafetyStatus, Snapshot};

// ---

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored snapshot is unreadable: {0}")]
    Corrupt(String),
}

/// Append-only snapshot storage.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Durably append one snapshot.
    async fn append(&self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// All snapshots with `timestamp >= lower_bound`, oldest first.
    async fn since(&self, lower_bound: DateTime<Utc>) -> Result<Vec<Snapshot>, StoreError>;
}

/// PostgreSQL-backed [`SnapshotStore`].
#[derive(Debug, Clone)]
pub struct PgSnapshotStore {
    pool: PgPool,
}

impl PgSnapshotStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotStore for PgSnapshotStore {
    async fn append(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        // ---
        sqlx::query(
            r#"
            INSERT INTO water_snapshots (
                id, ph, tds, temperature, vitality_index,
                status, purpose, purpose_analysis, recorded_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(snapshot.ph)
        .bind(snapshot.tds)
        .bind(snapshot.temperature)
        .bind(snapshot.vitality_index)
        .bind(snapshot.status.as_str())
        .bind(&snapshot.purpose)
        .bind(snapshot.purpose_analysis.as_ref().map(Json))
        .bind(snapshot.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn since(&self, lower_bound: DateTime<Utc>) -> Result<Vec<Snapshot>, StoreError> {
        // ---
        let rows = sqlx::query(
            r#"
            SELECT ph, tds, temperature, vitality_index,
                   status, purpose, purpose_analysis, recorded_at
              FROM water_snapshots
             WHERE recorded_at >= $1
             ORDER BY recorded_at ASC
            "#,
        )
        .bind(lower_bound)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Loaded {} snapshots since {}", rows.len(), lower_bound);

        rows.iter().map(snapshot_from_row).collect()
    }
}

fn snapshot_from_row(row: &PgRow) -> Result<Snapshot, StoreError> {
    // ---
    let status: String = row.try_get("status")?;
    let status = status.parse::<SafetyStatus>().map_err(StoreError::Corrupt)?;
    let purpose_analysis: Option<Json<PurposeVerdict>> = row.try_get("purpose_analysis")?;

    Ok(Snapshot {
        ph: row.try_get("ph")?,
        tds: row.try_get("tds")?,
        temperature: row.try_get("temperature")?,
        vitality_index: row.try_get("vitality_index")?,
        status,
        purpose: row.try_get("purpose")?,
        purpose_analysis: purpose_analysis.map(|Json(verdict)| verdict),
        timestamp: row.try_get("recorded_at")?,
    })
}
