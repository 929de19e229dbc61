//! Listener comments
//!
//! Comments belong to one content record. Adding a comment bumps the
//! record's `comments` counter in the same transaction.

use crate::{from_millis, to_millis};
use chrono::Utc;
use pariszik_core::{error::Result, types::*, ZikError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Add a comment to `content_id`
pub async fn add(pool: &SqlitePool, content_id: &ContentId, comment: CreateComment) -> Result<Comment> {
    let author = comment.author.trim();
    let text = comment.text.trim();
    if text.is_empty() {
        return Err(ZikError::invalid_input("comment text must not be empty"));
    }

    let comment = Comment {
        id: CommentId::generate(),
        content_id: content_id.clone(),
        author: if author.is_empty() {
            "anonymous".to_string()
        } else {
            author.to_string()
        },
        text: text.to_string(),
        created_at: Utc::now(),
    };

    let mut tx = pool.begin().await?;

    let result = sqlx::query("UPDATE contents SET comments = comments + 1 WHERE id = ?")
        .bind(content_id.as_str())
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ZikError::not_found("Content", content_id.as_str()));
    }

    sqlx::query(
        "INSERT INTO comments (id, content_id, author, text, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(comment.id.as_str())
    .bind(content_id.as_str())
    .bind(&comment.author)
    .bind(&comment.text)
    .bind(to_millis(comment.created_at))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(comment)
}

/// Comments of `content_id`, newest first
pub async fn list(pool: &SqlitePool, content_id: &ContentId) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        r#"
        SELECT id, content_id, author, text, created_at
        FROM comments
        WHERE content_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(content_id.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(map_row).collect()
}

fn map_row(row: &SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: CommentId::new(row.try_get::<String, _>("id")?),
        content_id: ContentId::new(row.try_get::<String, _>("content_id")?),
        author: row.try_get("author")?,
        text: row.try_get("text")?,
        created_at: from_millis(row.try_get("created_at")?),
    })
}
