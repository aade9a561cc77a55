//! Load and save of the whole daemon state.

use super::Store;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mimwatch_core::{
    error::WatchError,
    seen::SEEN_CAPACITY,
    state::Snapshot,
    stats::BotStats,
    traits::Persistence,
};
use std::collections::HashSet;
use tracing::warn;

type StatsRow = (String, i64, i64, Option<String>, Option<String>);

fn parse_time(column: &str, raw: &str) -> Result<DateTime<Utc>, WatchError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| WatchError::Memory(format!("bad {column} timestamp {raw:?}: {e}")))
}

impl Store {
    /// Subscribed chats in ascending order.
    pub async fn get_subscribers(&self) -> Result<Vec<i64>, WatchError> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT chat_id FROM subscribers ORDER BY chat_id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| WatchError::Memory(format!("query failed: {e}")))?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Seen keys, most recent first, capped at the seen-set capacity.
    pub async fn get_seen(&self) -> Result<Vec<String>, WatchError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT news_key FROM seen_news ORDER BY position ASC LIMIT ?")
                .bind(SEEN_CAPACITY as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| WatchError::Memory(format!("query failed: {e}")))?;

        Ok(rows.into_iter().map(|(key,)| key).collect())
    }

    pub async fn get_stats(&self) -> Result<Option<BotStats>, WatchError> {
        let row: Option<StatsRow> = sqlx::query_as(
            "SELECT start_time, total_news_sent, total_commands_processed, \
             last_news_time, last_error_time FROM bot_stats WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| WatchError::Memory(format!("query failed: {e}")))?;

        let Some((start, sent, commands, last_news, last_error)) = row else {
            return Ok(None);
        };

        Ok(Some(BotStats {
            start_time: parse_time("start_time", &start)?,
            total_news_sent: sent.max(0) as u64,
            total_commands_processed: commands.max(0) as u64,
            last_news_time: last_news
                .as_deref()
                .map(|t| parse_time("last_news_time", t))
                .transpose()?,
            last_error_time: last_error
                .as_deref()
                .map(|t| parse_time("last_error_time", t))
                .transpose()?,
        }))
    }
}

#[async_trait]
impl Persistence for Store {
    /// Load the stored state.
    ///
    /// An unreadable stats row only resets the counters; subscribers and the
    /// seen history must load or the whole call fails.
    async fn load(&self) -> Result<Snapshot, WatchError> {
        let subscribers = self.get_subscribers().await?;
        let seen = self.get_seen().await?;
        let stats = self.get_stats().await.unwrap_or_else(|e| {
            warn!("discarding stored stats: {e}");
            None
        });

        Ok(Snapshot {
            subscribers,
            seen,
            stats,
        })
    }

    /// Replace the stored state with `snapshot` in one transaction.
    ///
    /// Chats that stay subscribed keep their original `subscribed_at`.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), WatchError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| WatchError::Memory(format!("begin failed: {e}")))?;

        let wanted: HashSet<i64> = snapshot.subscribers.iter().copied().collect();
        let existing: Vec<(i64,)> = sqlx::query_as("SELECT chat_id FROM subscribers")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| WatchError::Memory(format!("query failed: {e}")))?;

        for (chat_id,) in existing {
            if !wanted.contains(&chat_id) {
                sqlx::query("DELETE FROM subscribers WHERE chat_id = ?")
                    .bind(chat_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| WatchError::Memory(format!("delete subscriber failed: {e}")))?;
            }
        }
        for chat_id in wanted {
            sqlx::query("INSERT OR IGNORE INTO subscribers (chat_id) VALUES (?)")
                .bind(chat_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| WatchError::Memory(format!("insert subscriber failed: {e}")))?;
        }

        sqlx::query("DELETE FROM seen_news")
            .execute(&mut *tx)
            .await
            .map_err(|e| WatchError::Memory(format!("clear seen failed: {e}")))?;
        for (position, key) in snapshot.seen.iter().take(SEEN_CAPACITY).enumerate() {
            sqlx::query("INSERT OR IGNORE INTO seen_news (news_key, position) VALUES (?, ?)")
                .bind(key)
                .bind(position as i64)
                .execute(&mut *tx)
                .await
                .map_err(|e| WatchError::Memory(format!("insert seen failed: {e}")))?;
        }

        if let Some(ref stats) = snapshot.stats {
            sqlx::query(
                "INSERT INTO bot_stats (id, start_time, total_news_sent, total_commands_processed, \
                 last_news_time, last_error_time) VALUES (1, ?, ?, ?, ?, ?) \
                 ON CONFLICT(id) DO UPDATE SET start_time = excluded.start_time, \
                 total_news_sent = excluded.total_news_sent, \
                 total_commands_processed = excluded.total_commands_processed, \
                 last_news_time = excluded.last_news_time, \
                 last_error_time = excluded.last_error_time",
            )
            .bind(stats.start_time.to_rfc3339())
            .bind(stats.total_news_sent as i64)
            .bind(stats.total_commands_processed as i64)
            .bind(stats.last_news_time.map(|t| t.to_rfc3339()))
            .bind(stats.last_error_time.map(|t| t.to_rfc3339()))
            .execute(&mut *tx)
            .await
            .map_err(|e| WatchError::Memory(format!("upsert stats failed: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| WatchError::Memory(format!("commit failed: {e}")))?;

        Ok(())
    }
}
