//! Database schema management for `biolink-water`.
//!
//! Ensures required tables and indexes exist before serving requests.
//! Applied once on startup from `main.rs` (EMBP: single gateway call).

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create or update the database schema (idempotent).
///
/// Creates the append-only `water_snapshots` table holding one derived
/// snapshot per poll. Safe to call on every startup; no-op if objects already
/// exist.
///
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS water_snapshots (
            id                UUID             PRIMARY KEY,
            ph                DOUBLE PRECISION NOT NULL,
            tds               DOUBLE PRECISION NOT NULL,
            temperature       DOUBLE PRECISION NOT NULL,
            vitality_index    DOUBLE PRECISION NOT NULL,
            status            TEXT             NOT NULL,
            purpose           TEXT             NOT NULL,
            purpose_analysis  JSONB,
            recorded_at       TIMESTAMPTZ      NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // History and analytics both scan by lower timestamp bound
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_water_snapshots_recorded_at
            ON water_snapshots (recorded_at);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
