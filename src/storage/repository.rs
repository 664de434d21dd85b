use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{AppError, Result};
use crate::models::entry::JournalEntry;

/// 仓储 trait
#[async_trait]
pub trait Repository<T: Clone + Send + Sync>: Send + Sync {
    /// 创建实体
    async fn create(&self, entity: &T) -> Result<T>;

    /// 根据 ID 获取实体
    async fn get_by_id(&self, id: &str) -> Result<Option<T>>;

    /// 删除实体
    async fn delete(&self, id: &str) -> Result<bool>;

    /// 按时间倒序列出实体
    async fn list(&self, limit: usize, start: usize) -> Result<Vec<T>>;

    /// 统计数量
    async fn count(&self) -> Result<u64>;

    /// 存储是否可用，默认以一次计数探测
    async fn health(&self) -> Result<()> {
        self.count().await.map(|_| ())
    }
}

/// 内存日记仓储
///
/// 额外记录写入序号，同一毫秒内创建的条目仍按写入顺序倒序返回。
#[derive(Default)]
pub struct MemoryEntryRepository {
    entries: DashMap<String, (u64, JournalEntry)>,
    sequence: AtomicU64,
}

impl MemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<JournalEntry> for MemoryEntryRepository {
    async fn create(&self, entry: &JournalEntry) -> Result<JournalEntry> {
        match self.entries.entry(entry.id.clone()) {
            Entry::Occupied(_) => Err(AppError::Database(format!(
                "Entry already exists: {}",
                entry.id
            ))),
            Entry::Vacant(slot) => {
                let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
                slot.insert((seq, entry.clone()));
                Ok(entry.clone())
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<JournalEntry>> {
        Ok(self.entries.get(id).map(|item| item.value().1.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.entries.remove(id).is_some())
    }

    async fn list(&self, limit: usize, start: usize) -> Result<Vec<JournalEntry>> {
        let mut items: Vec<(u64, JournalEntry)> = self
            .entries
            .iter()
            .map(|item| item.value().clone())
            .collect();

        items.sort_by(|(seq_a, a), (seq_b, b)| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| seq_b.cmp(seq_a))
        });

        Ok(items
            .into_iter()
            .skip(start)
            .take(limit)
            .map(|(_, entry)| entry)
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.entries.len() as u64)
    }
}
