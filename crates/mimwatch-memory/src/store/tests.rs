use super::*;
use chrono::{TimeZone, Utc};
use mimwatch_core::{
    seen::SEEN_CAPACITY, state::Snapshot, stats::BotStats, traits::Persistence, AppState,
};

fn sample_stats() -> BotStats {
    let start = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap();
    let mut stats = BotStats::new(start);
    stats.total_news_sent = 5;
    stats.total_commands_processed = 17;
    stats.last_news_time = Some(Utc.with_ymd_and_hms(2026, 10, 1, 9, 30, 0).unwrap());
    stats
}

#[tokio::test]
async fn test_empty_store_loads_default_snapshot() {
    let store = Store::in_memory().await.unwrap();
    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot, Snapshot::default());
}

#[tokio::test]
async fn test_save_then_load() {
    let store = Store::in_memory().await.unwrap();
    let snapshot = Snapshot {
        subscribers: vec![42, -100, 7],
        seen: vec!["/news/b".to_string(), "/news/a".to_string()],
        stats: Some(sample_stats()),
    };
    store.save(&snapshot).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.subscribers, vec![-100, 7, 42]);
    assert_eq!(loaded.seen, vec!["/news/b", "/news/a"]);
    assert_eq!(loaded.stats, Some(sample_stats()));
}

#[tokio::test]
async fn test_save_replaces_previous_state() {
    let store = Store::in_memory().await.unwrap();
    store
        .save(&Snapshot {
            subscribers: vec![1, 2, 3],
            seen: vec!["/old".to_string()],
            stats: Some(sample_stats()),
        })
        .await
        .unwrap();

    let mut stats = sample_stats();
    stats.total_commands_processed = 18;
    store
        .save(&Snapshot {
            subscribers: vec![2, 4],
            seen: vec!["/new".to_string(), "/old".to_string()],
            stats: Some(stats.clone()),
        })
        .await
        .unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.subscribers, vec![2, 4]);
    assert_eq!(loaded.seen, vec!["/new", "/old"]);
    assert_eq!(loaded.stats.unwrap().total_commands_processed, 18);
}

#[tokio::test]
async fn test_seen_history_capped_on_save() {
    let store = Store::in_memory().await.unwrap();
    let seen: Vec<String> = (0..SEEN_CAPACITY + 10).map(|i| format!("/n/{i}")).collect();
    store
        .save(&Snapshot {
            subscribers: vec![],
            seen,
            stats: None,
        })
        .await
        .unwrap();

    let loaded = store.get_seen().await.unwrap();
    assert_eq!(loaded.len(), SEEN_CAPACITY);
    assert_eq!(loaded[0], "/n/0");
    assert_eq!(loaded[SEEN_CAPACITY - 1], format!("/n/{}", SEEN_CAPACITY - 1));
}

#[tokio::test]
async fn test_save_without_stats_keeps_stored_row() {
    let store = Store::in_memory().await.unwrap();
    store
        .save(&Snapshot {
            stats: Some(sample_stats()),
            ..Snapshot::default()
        })
        .await
        .unwrap();
    store.save(&Snapshot::default()).await.unwrap();

    assert_eq!(store.get_stats().await.unwrap(), Some(sample_stats()));
}

#[tokio::test]
async fn test_corrupt_timestamp_is_memory_error() {
    let store = Store::in_memory().await.unwrap();
    sqlx::query("INSERT INTO bot_stats (id, start_time) VALUES (1, 'yesterday')")
        .execute(store.pool())
        .await
        .unwrap();

    let err = store.get_stats().await.unwrap_err();
    assert!(matches!(err, WatchError::Memory(_)));
}

#[tokio::test]
async fn test_corrupt_stats_keep_subscribers_across_restart() {
    let store = Store::in_memory().await.unwrap();
    store
        .save(&Snapshot {
            subscribers: vec![42, 43],
            seen: vec!["/news/a".to_string()],
            stats: None,
        })
        .await
        .unwrap();
    sqlx::query("INSERT INTO bot_stats (id, start_time) VALUES (1, 'yesterday')")
        .execute(store.pool())
        .await
        .unwrap();

    let snapshot = store.load().await.unwrap();
    assert_eq!(snapshot.subscribers, vec![42, 43]);
    assert_eq!(snapshot.seen, vec!["/news/a"]);
    assert!(snapshot.stats.is_none());

    // Startup restore followed by the first detection save.
    let now = Utc.with_ymd_and_hms(2026, 10, 2, 8, 0, 0).unwrap();
    let state = AppState::restore(snapshot, now);
    assert!(state.seen.mark_seen("/news/b"));
    store.save(&state.snapshot()).await.unwrap();

    assert_eq!(store.get_subscribers().await.unwrap(), vec![42, 43]);
    assert_eq!(store.get_seen().await.unwrap(), vec!["/news/b", "/news/a"]);
    let stats = store.get_stats().await.unwrap().unwrap();
    assert_eq!(stats.start_time, now);
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = MemoryConfig {
        db_path: dir
            .path()
            .join("nested/state.db")
            .to_string_lossy()
            .into_owned(),
    };

    {
        let store = Store::new(&config).await.unwrap();
        store
            .save(&Snapshot {
                subscribers: vec![42],
                seen: vec!["/news/avviso-1".to_string()],
                stats: Some(sample_stats()),
            })
            .await
            .unwrap();
        store.pool().close().await;
    }

    // Reopening must not re-run the initial migration.
    let store = Store::new(&config).await.unwrap();
    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.subscribers, vec![42]);
    assert_eq!(loaded.seen, vec!["/news/avviso-1"]);

    let (applied,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _migrations")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(applied, 1);
}
