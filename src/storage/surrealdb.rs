use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use surrealdb::{
    Surreal,
    engine::any::{Any, connect},
    opt::auth::Root,
};

use crate::config::config::DatabaseConfig;
use crate::error::{AppError, Result};
use crate::models::entry::JournalEntry;
use crate::sentiment::MoodLabel;
use crate::storage::repository::Repository;

const TABLE: &str = "entry";

/// SurrealDB 连接
#[derive(Clone)]
pub struct SurrealPool {
    db: Surreal<Any>,
}

impl SurrealPool {
    /// 建立连接，用户名为空时跳过登录（如 `mem://`）
    pub async fn new(config: DatabaseConfig) -> std::result::Result<Self, surrealdb::Error> {
        let db: Surreal<Any> = connect(&config.url).await?;

        if !config.username.is_empty() {
            db.signin(Root {
                username: &config.username,
                password: &config.password,
            })
            .await?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        Ok(Self { db })
    }

    /// 获取内部数据库实例
    pub fn inner(&self) -> Surreal<Any> {
        self.db.clone()
    }

    pub async fn health(&self) -> Result<()> {
        self.db.health().await?;
        Ok(())
    }
}

/// 存储行。SurrealDB 会附加 Thing 类型的 `id` 字段，反序列化时忽略。
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryRecord {
    entry_id: String,
    content: String,
    mood: MoodLabel,
    sentiment: i64,
    comparative: f64,
    timestamp: i64,
}

impl From<&JournalEntry> for EntryRecord {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            entry_id: entry.id.clone(),
            content: entry.content.clone(),
            mood: entry.mood,
            sentiment: entry.sentiment,
            comparative: entry.comparative,
            timestamp: entry.timestamp_ms(),
        }
    }
}

impl TryFrom<EntryRecord> for JournalEntry {
    type Error = AppError;

    fn try_from(record: EntryRecord) -> Result<Self> {
        let timestamp = chrono::DateTime::from_timestamp_millis(record.timestamp).ok_or_else(|| {
            AppError::Database(format!("Invalid timestamp for entry {}", record.entry_id))
        })?;

        Ok(JournalEntry {
            id: record.entry_id,
            content: record.content,
            mood: record.mood,
            sentiment: record.sentiment,
            comparative: record.comparative,
            timestamp,
        })
    }
}

#[derive(Deserialize)]
struct CountRow {
    count: u64,
}

/// SurrealDB 日记仓储
#[derive(Clone)]
pub struct SurrealEntryRepository {
    pool: SurrealPool,
    db: Surreal<Any>,
}

impl SurrealEntryRepository {
    pub fn new(pool: &SurrealPool) -> Self {
        Self {
            pool: pool.clone(),
            db: pool.inner(),
        }
    }
}

#[async_trait]
impl Repository<JournalEntry> for SurrealEntryRepository {
    async fn create(&self, entry: &JournalEntry) -> Result<JournalEntry> {
        let created: Option<EntryRecord> = self
            .db
            .create((TABLE, entry.id.clone()))
            .content(EntryRecord::from(entry))
            .await?;

        created
            .ok_or_else(|| AppError::Database(format!("Failed to create entry: {}", entry.id)))?
            .try_into()
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<JournalEntry>> {
        let record: Option<EntryRecord> = self.db.select((TABLE, id.to_string())).await?;
        record.map(JournalEntry::try_from).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let removed: Option<EntryRecord> = self.db.delete((TABLE, id.to_string())).await?;
        Ok(removed.is_some())
    }

    async fn list(&self, limit: usize, start: usize) -> Result<Vec<JournalEntry>> {
        let records: Vec<EntryRecord> = self
            .db
            .query("SELECT * FROM entry ORDER BY timestamp DESC LIMIT $limit START $start")
            .bind(("limit", limit))
            .bind(("start", start))
            .await?
            .take(0)?;

        records.into_iter().map(JournalEntry::try_from).collect()
    }

    async fn count(&self) -> Result<u64> {
        let rows: Vec<CountRow> = self
            .db
            .query("SELECT count() FROM entry GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.first().map(|row| row.count).unwrap_or(0))
    }

    async fn health(&self) -> Result<()> {
        self.pool.health().await
    }
}
