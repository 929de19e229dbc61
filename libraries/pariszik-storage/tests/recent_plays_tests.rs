//! Durable recent plays and the trait adapter

mod test_helpers;

use chrono::Utc;
use pariszik_core::{
    ContentId, ContentRepository, MediaItem, PlaybackHistoryStore, RecentPlayEntry,
};
use pariszik_storage::{contents, recent_plays, LocalStorageContext};
use test_helpers::{create_test_content, TestDb};

fn create_entry(id: &str) -> RecentPlayEntry {
    let item = MediaItem::new(format!("Track {}", id), "Artist", format!("/media/{}.mp3", id))
        .with_id(id);
    RecentPlayEntry::from_item(&item, Utc::now())
}

fn ids(entries: &[RecentPlayEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.id.as_str()).collect()
}

#[tokio::test]
async fn most_recent_first_without_duplicates() {
    let db = TestDb::new().await;

    recent_plays::record(db.pool(), &create_entry("a"), 10).await.unwrap();
    recent_plays::record(db.pool(), &create_entry("b"), 10).await.unwrap();
    recent_plays::record(db.pool(), &create_entry("a"), 10).await.unwrap();

    let entries = recent_plays::list(db.pool(), 10).await.unwrap();
    assert_eq!(ids(&entries), vec!["a", "b"]);
}

#[tokio::test]
async fn capacity_drops_oldest() {
    let db = TestDb::new().await;

    for i in 0..12 {
        recent_plays::record(db.pool(), &create_entry(&format!("t{}", i)), 10)
            .await
            .unwrap();
    }

    let entries = recent_plays::list(db.pool(), 10).await.unwrap();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0].id.as_str(), "t11");
    assert_eq!(entries[9].id.as_str(), "t2");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recent_plays")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(rows, 10);
}

#[tokio::test]
async fn survives_reopening_the_database() {
    let temp_dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("nested/history.db").display());

    {
        let pool = pariszik_storage::create_pool(&url).await.unwrap();
        pariszik_storage::run_migrations(&pool).await.unwrap();
        let store = LocalStorageContext::new(pool.clone());
        store.record_play(create_entry("kept")).await.unwrap();
        pool.close().await;
    }

    let pool = pariszik_storage::create_pool(&url).await.unwrap();
    pariszik_storage::run_migrations(&pool).await.unwrap();
    let store = LocalStorageContext::new(pool);

    let entries = store.recent_plays().await.unwrap();
    assert_eq!(ids(&entries), vec!["kept"]);
}

#[tokio::test]
async fn clear_empties_history() {
    let db = TestDb::new().await;
    let store = LocalStorageContext::new(db.pool().clone());

    store.record_play(create_entry("a")).await.unwrap();
    store.clear().await.unwrap();

    assert!(store.recent_plays().await.unwrap().is_empty());
}

#[tokio::test]
async fn custom_history_capacity() {
    let db = TestDb::new().await;
    let store = LocalStorageContext::new(db.pool().clone()).with_history_capacity(3);

    for id in ["a", "b", "c", "d"] {
        store.record_play(create_entry(id)).await.unwrap();
    }

    let entries = store.recent_plays().await.unwrap();
    assert_eq!(ids(&entries), vec!["d", "c", "b"]);
}

#[tokio::test]
async fn history_capacity_is_capped_at_ten() {
    let db = TestDb::new().await;
    let store = LocalStorageContext::new(db.pool().clone()).with_history_capacity(50);
    assert_eq!(store.history_capacity(), RecentPlayEntry::CAPACITY);

    for i in 0..20 {
        store.record_play(create_entry(&format!("id-{}", i))).await.unwrap();
    }

    let entries = store.recent_plays().await.unwrap();
    assert_eq!(entries.len(), RecentPlayEntry::CAPACITY);
    assert_eq!(entries[0].id.as_str(), "id-19");
}

#[tokio::test]
async fn entries_outlive_deleted_content() {
    let db = TestDb::new().await;
    let store = LocalStorageContext::new(db.pool().clone());
    let item = create_test_content(db.pool(), "ephemeral").await;

    store
        .record_play(RecentPlayEntry::from_item(&item, Utc::now()))
        .await
        .unwrap();
    contents::delete(db.pool(), &item.id).await.unwrap();

    let entries = store.recent_plays().await.unwrap();
    assert_eq!(entries[0].title, "ephemeral");
}

#[tokio::test]
async fn content_repository_adapter() {
    let db = TestDb::new().await;
    let store = LocalStorageContext::new(db.pool().clone());
    let item = create_test_content(db.pool(), "adapted").await;

    store.increment_views(&item.id).await.unwrap();
    assert!(store.toggle_favorite(&item.id).await.unwrap());

    let stored = store.get_by_id(&item.id).await.unwrap().unwrap();
    assert_eq!(stored.views, 1);
    assert!(stored.is_favorite);

    assert!(store
        .get_by_id(&ContentId::new("missing"))
        .await
        .unwrap()
        .is_none());
    assert!(store
        .increment_views(&ContentId::new("missing"))
        .await
        .unwrap_err()
        .is_not_found());
}
