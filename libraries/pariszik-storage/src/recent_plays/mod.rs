//! Durable recent-plays list
//!
//! Most recent first, one row per content id, trimmed to a capacity on
//! every write. Rows are snapshots and outlive the content they describe.

use crate::{from_millis, to_millis};
use pariszik_core::{error::Result, types::*};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Record a play of `entry.id`, moving it to the front
///
/// Older entries beyond `capacity` are dropped.
pub async fn record(pool: &SqlitePool, entry: &RecentPlayEntry, capacity: usize) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO recent_plays (content_id, title, artist, thumbnail_url, file_url, played_at, seq)
        VALUES (?, ?, ?, ?, ?, ?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM recent_plays))
        ON CONFLICT(content_id) DO UPDATE SET
            title = excluded.title,
            artist = excluded.artist,
            thumbnail_url = excluded.thumbnail_url,
            file_url = excluded.file_url,
            played_at = excluded.played_at,
            seq = excluded.seq
        "#,
    )
    .bind(entry.id.as_str())
    .bind(&entry.title)
    .bind(&entry.artist)
    .bind(&entry.thumbnail_url)
    .bind(&entry.file_url)
    .bind(to_millis(entry.played_at))
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        DELETE FROM recent_plays
        WHERE content_id NOT IN (
            SELECT content_id FROM recent_plays ORDER BY seq DESC LIMIT ?
        )
        "#,
    )
    .bind(capacity as i64)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(())
}

/// Entries, most recent first
pub async fn list(pool: &SqlitePool, capacity: usize) -> Result<Vec<RecentPlayEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT content_id, title, artist, thumbnail_url, file_url, played_at
        FROM recent_plays
        ORDER BY seq DESC
        LIMIT ?
        "#,
    )
    .bind(capacity as i64)
    .fetch_all(pool)
    .await?;

    rows.iter().map(map_row).collect()
}

/// Remove every entry
pub async fn clear(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM recent_plays").execute(pool).await?;
    Ok(())
}

fn map_row(row: &SqliteRow) -> Result<RecentPlayEntry> {
    Ok(RecentPlayEntry {
        id: ContentId::new(row.try_get::<String, _>("content_id")?),
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        thumbnail_url: row.try_get("thumbnail_url")?,
        file_url: row.try_get("file_url")?,
        played_at: from_millis(row.try_get("played_at")?),
    })
}
