//! Content catalog
//!
//! Published media items with their engagement counters. Counter updates
//! are single `UPDATE` statements so concurrent plays never lose a view.
//!
//! # Example
//!
//! ```rust,no_run
//! use pariszik_core::CreateContent;
//! use pariszik_storage::contents;
//! # async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! let item = contents::create(pool, CreateContent::new("Intro", "DJ Seine", "/media/intro.mp3")).await?;
//!
//! contents::increment_views(pool, &item.id).await?;
//! let popular = contents::get_popular(pool, contents::DEFAULT_LIMIT).await?;
//! # Ok(())
//! # }
//! ```

use crate::{from_millis, to_millis};
use chrono::Utc;
use pariszik_core::{error::Result, types::*, ZikError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Default page size for popular/latest listings
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum number of search results
pub const SEARCH_LIMIT: u32 = 20;

const COLUMNS: &str = "id, title, artist, description, thumbnail_url, file_url, \
     views, likes, comments, is_favorite, is_live, is_published, \
     uploaded_by, uploaded_at, updated_at";

/// Get all items, newest upload first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<MediaItem>> {
    let sql = format!(
        "SELECT {} FROM contents ORDER BY uploaded_at DESC, rowid DESC",
        COLUMNS
    );
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    rows.iter().map(map_row).collect()
}

/// Get a single item
pub async fn get_by_id(pool: &SqlitePool, id: &ContentId) -> Result<Option<MediaItem>> {
    let sql = format!("SELECT {} FROM contents WHERE id = ?", COLUMNS);
    let row = sqlx::query(&sql)
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_row).transpose()
}

/// Most viewed items first
pub async fn get_popular(pool: &SqlitePool, limit: u32) -> Result<Vec<MediaItem>> {
    let sql = format!(
        "SELECT {} FROM contents ORDER BY views DESC, uploaded_at DESC, rowid DESC LIMIT ?",
        COLUMNS
    );
    let rows = sqlx::query(&sql)
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

    rows.iter().map(map_row).collect()
}

/// Newest uploads first
pub async fn get_latest(pool: &SqlitePool, limit: u32) -> Result<Vec<MediaItem>> {
    let sql = format!(
        "SELECT {} FROM contents ORDER BY uploaded_at DESC, rowid DESC LIMIT ?",
        COLUMNS
    );
    let rows = sqlx::query(&sql)
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

    rows.iter().map(map_row).collect()
}

/// Items flagged as live streams, newest first
pub async fn get_live(pool: &SqlitePool) -> Result<Vec<MediaItem>> {
    let sql = format!(
        "SELECT {} FROM contents WHERE is_live = 1 ORDER BY uploaded_at DESC, rowid DESC",
        COLUMNS
    );
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    rows.iter().map(map_row).collect()
}

/// Items whose title starts with `query` (case-sensitive)
///
/// A blank query matches nothing. At most [`SEARCH_LIMIT`] results,
/// ordered by title.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<MediaItem>> {
    let prefix = query.trim();
    if prefix.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT {} FROM contents WHERE substr(title, 1, ?) = ? ORDER BY title LIMIT ?",
        COLUMNS
    );
    let rows = sqlx::query(&sql)
        .bind(prefix.chars().count() as i64)
        .bind(prefix)
        .bind(i64::from(SEARCH_LIMIT))
        .fetch_all(pool)
        .await?;

    rows.iter().map(map_row).collect()
}

/// Create a new item with zeroed counters
pub async fn create(pool: &SqlitePool, content: CreateContent) -> Result<MediaItem> {
    require_text("title", &content.title)?;
    require_text("artist", &content.artist)?;
    require_text("file_url", &content.file_url)?;

    let item = MediaItem {
        id: ContentId::generate(),
        title: content.title,
        artist: content.artist,
        description: content.description,
        thumbnail_url: content.thumbnail_url,
        file_url: content.file_url,
        views: 0,
        likes: 0,
        comments: 0,
        is_favorite: false,
        is_live: content.is_live,
        is_published: true,
        uploaded_by: content.uploaded_by,
        uploaded_at: Utc::now(),
        updated_at: None,
    };

    sqlx::query(
        r#"
        INSERT INTO contents (
            id, title, artist, description, thumbnail_url, file_url,
            views, likes, comments, is_favorite, is_live, is_published,
            uploaded_by, uploaded_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, 0, 0, 0, 0, ?, 1, ?, ?, NULL)
        "#,
    )
    .bind(item.id.as_str())
    .bind(&item.title)
    .bind(&item.artist)
    .bind(&item.description)
    .bind(&item.thumbnail_url)
    .bind(&item.file_url)
    .bind(item.is_live)
    .bind(&item.uploaded_by)
    .bind(to_millis(item.uploaded_at))
    .execute(pool)
    .await?;

    tracing::debug!(id = %item.id, title = %item.title, "Content created");

    Ok(item)
}

/// Apply a partial update
pub async fn update(pool: &SqlitePool, id: &ContentId, changes: UpdateContent) -> Result<MediaItem> {
    let mut item = get_by_id(pool, id)
        .await?
        .ok_or_else(|| ZikError::not_found("Content", id.as_str()))?;

    if changes.is_empty() {
        return Ok(item);
    }

    if let Some(title) = changes.title {
        require_text("title", &title)?;
        item.title = title;
    }
    if let Some(artist) = changes.artist {
        require_text("artist", &artist)?;
        item.artist = artist;
    }
    if let Some(file_url) = changes.file_url {
        require_text("file_url", &file_url)?;
        item.file_url = file_url;
    }
    if let Some(description) = changes.description {
        item.description = Some(description);
    }
    if let Some(thumbnail_url) = changes.thumbnail_url {
        item.thumbnail_url = Some(thumbnail_url);
    }
    if let Some(is_live) = changes.is_live {
        item.is_live = is_live;
    }
    if let Some(is_published) = changes.is_published {
        item.is_published = is_published;
    }
    item.updated_at = Some(Utc::now());

    sqlx::query(
        r#"
        UPDATE contents
        SET title = ?, artist = ?, description = ?, thumbnail_url = ?, file_url = ?,
            is_live = ?, is_published = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&item.title)
    .bind(&item.artist)
    .bind(&item.description)
    .bind(&item.thumbnail_url)
    .bind(&item.file_url)
    .bind(item.is_live)
    .bind(item.is_published)
    .bind(item.updated_at.map(to_millis))
    .bind(id.as_str())
    .execute(pool)
    .await?;

    Ok(item)
}

/// Delete an item together with its comments
pub async fn delete(pool: &SqlitePool, id: &ContentId) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM comments WHERE content_id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM contents WHERE id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ZikError::not_found("Content", id.as_str()));
    }

    tx.commit().await?;
    tracing::debug!(id = %id, "Content deleted");

    Ok(())
}

/// Count one more view
pub async fn increment_views(pool: &SqlitePool, id: &ContentId) -> Result<()> {
    let result = sqlx::query("UPDATE contents SET views = views + 1 WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ZikError::not_found("Content", id.as_str()));
    }

    Ok(())
}

/// Count one more like, returning the new total
pub async fn add_like(pool: &SqlitePool, id: &ContentId) -> Result<u64> {
    let row = sqlx::query("UPDATE contents SET likes = likes + 1 WHERE id = ? RETURNING likes")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ZikError::not_found("Content", id.as_str()))?;

    let likes: i64 = row.try_get(0)?;
    Ok(likes as u64)
}

/// Flip the favorite flag, returning the new value
pub async fn toggle_favorite(pool: &SqlitePool, id: &ContentId) -> Result<bool> {
    let row = sqlx::query(
        "UPDATE contents SET is_favorite = 1 - is_favorite WHERE id = ? RETURNING is_favorite",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ZikError::not_found("Content", id.as_str()))?;

    let is_favorite: i64 = row.try_get(0)?;
    Ok(is_favorite != 0)
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ZikError::invalid_input(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn map_row(row: &SqliteRow) -> Result<MediaItem> {
    let views: i64 = row.try_get("views")?;
    let likes: i64 = row.try_get("likes")?;
    let comments: i64 = row.try_get("comments")?;
    let updated_at: Option<i64> = row.try_get("updated_at")?;

    Ok(MediaItem {
        id: ContentId::new(row.try_get::<String, _>("id")?),
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        description: row.try_get("description")?,
        thumbnail_url: row.try_get("thumbnail_url")?,
        file_url: row.try_get("file_url")?,
        views: views as u64,
        likes: likes as u64,
        comments: comments as u64,
        is_favorite: row.try_get("is_favorite")?,
        is_live: row.try_get("is_live")?,
        is_published: row.try_get("is_published")?,
        uploaded_by: row.try_get("uploaded_by")?,
        uploaded_at: from_millis(row.try_get("uploaded_at")?),
        updated_at: updated_at.map(from_millis),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text("title", "  ").is_err());
        assert!(require_text("title", "Intro").is_ok());
    }
}
