//! 日记服务
//!
//! 负责日记条目的创建、查询与删除。心情和情感分在写入前由打分核心计算。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::entry::JournalEntry;
use crate::sentiment::SentimentScorer;
use crate::storage::factory::EntryStore;

/// 每页数量上限
pub const MAX_PAGE_SIZE: usize = 100;

/// 分页参数
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Pagination {
    /// 页码（从 1 开始）
    pub page: usize,
    /// 每页数量
    pub page_size: usize,
}

impl Pagination {
    /// 创建新分页参数
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// 计算偏移量，超大页码饱和到 `usize::MAX`
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// 检查分页参数是否有效
    pub fn is_valid(&self) -> bool {
        self.page > 0 && self.page_size > 0
    }
}

/// 日记服务 trait
#[async_trait]
pub trait JournalService: Send + Sync {
    /// 为正文打分并保存
    async fn create(&self, content: &str) -> Result<JournalEntry>;

    /// 根据 ID 获取条目
    async fn get_by_id(&self, id: &str) -> Result<Option<JournalEntry>>;

    /// 按时间倒序列出条目
    async fn list(&self, pagination: Pagination) -> Result<Vec<JournalEntry>>;

    /// 统计条目数量
    async fn count(&self) -> Result<u64>;

    /// 删除条目，不存在时返回 NotFound
    async fn delete(&self, id: &str) -> Result<()>;
}

/// 日记服务实现
pub struct JournalServiceImpl {
    store: EntryStore,
    max_entry_length: usize,
}

impl JournalServiceImpl {
    pub fn new(store: EntryStore, max_entry_length: usize) -> Self {
        Self {
            store,
            max_entry_length,
        }
    }

    fn validate_content(&self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "Entry content cannot be empty".to_string(),
            ));
        }

        let length = content.trim().chars().count();
        if length > self.max_entry_length {
            return Err(AppError::Validation(format!(
                "Entry content is too long (max: {}, got: {})",
                self.max_entry_length, length
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl JournalService for JournalServiceImpl {
    async fn create(&self, content: &str) -> Result<JournalEntry> {
        self.validate_content(content)?;

        let entry = JournalEntry::compose_with(&SentimentScorer::default(), content);
        debug!(
            "Saving entry {}: mood={}, sentiment={}",
            entry.id, entry.mood, entry.sentiment
        );

        self.store.create(&entry).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<JournalEntry>> {
        self.store.get_by_id(id).await
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<JournalEntry>> {
        if !pagination.is_valid() {
            return Err(AppError::Validation(
                "page and page_size must be greater than 0".to_string(),
            ));
        }

        if pagination.page_size > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "page_size is too large (max: {}, got: {})",
                MAX_PAGE_SIZE, pagination.page_size
            )));
        }

        self.store
            .list(pagination.page_size, pagination.offset())
            .await
    }

    async fn count(&self) -> Result<u64> {
        self.store.count().await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Entry not found: {}", id)))
        }
    }
}

/// 创建日记服务
pub fn create_journal_service(
    store: EntryStore,
    max_entry_length: usize,
) -> Box<dyn JournalService> {
    Box::new(JournalServiceImpl::new(store, max_entry_length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::MoodLabel;
    use crate::storage::repository::MemoryEntryRepository;
    use std::sync::Arc;

    fn service() -> JournalServiceImpl {
        JournalServiceImpl::new(Arc::new(MemoryEntryRepository::new()), 50)
    }

    #[test]
    fn test_pagination_offset() {
        assert_eq!(Pagination::new(1, 20).offset(), 0);
        assert_eq!(Pagination::new(3, 20).offset(), 40);
        assert!(!Pagination::new(0, 20).is_valid());
        assert!(!Pagination::new(1, 0).is_valid());
        assert_eq!(Pagination::new(usize::MAX / 2, 3).offset(), usize::MAX);
    }

    #[tokio::test]
    async fn test_create_scores_entry() {
        let service = service();

        let entry = service.create("  I am very sad  ").await.unwrap();
        assert_eq!(entry.content, "I am very sad");
        assert_eq!(entry.sentiment, -3);
        assert_eq!(entry.mood, MoodLabel::Negative);

        let stored = service.get_by_id(&entry.id).await.unwrap().unwrap();
        assert_eq!(stored, entry);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_and_long_content() {
        let service = service();

        assert!(matches!(
            service.create("   ").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.create(&"a".repeat(51)).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let service = service();
        let first = service.create("first entry").await.unwrap();
        let second = service.create("second entry").await.unwrap();

        let listed = service.list(Pagination::new(1, 10)).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);

        service.delete(&first.id).await.unwrap();
        assert_eq!(service.count().await.unwrap(), 1);
        assert!(matches!(
            service.delete(&first.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_rejects_invalid_pagination() {
        let service = service();
        assert!(matches!(
            service.list(Pagination::new(0, 10)).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.list(Pagination::new(1, MAX_PAGE_SIZE + 1)).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_list_far_past_last_page_is_empty() {
        let service = service();
        service.create("only entry").await.unwrap();

        let listed = service
            .list(Pagination::new(usize::MAX / 2, 3))
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}
