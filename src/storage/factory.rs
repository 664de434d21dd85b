//! 存储工厂模块
//!
//! 根据配置创建相应的日记仓储实例。

use std::sync::Arc;

use crate::config::config::{DatabaseConfig, StorageBackend};
use crate::error::{AppError, Result};
use crate::models::entry::JournalEntry;
use crate::storage::repository::{MemoryEntryRepository, Repository};

#[cfg(feature = "surrealdb")]
use crate::storage::surrealdb::{SurrealEntryRepository, SurrealPool};

/// 日记仓储的共享句柄
pub type EntryStore = Arc<dyn Repository<JournalEntry>>;

/// 存储工厂
pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置创建仓储
    pub async fn create(config: &DatabaseConfig) -> Result<EntryStore> {
        match config.backend {
            StorageBackend::Memory => Ok(Arc::new(MemoryEntryRepository::new())),
            #[cfg(feature = "surrealdb")]
            StorageBackend::Surrealdb => {
                let pool = SurrealPool::new(config.clone())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(Arc::new(SurrealEntryRepository::new(&pool)))
            }
            #[cfg(not(feature = "surrealdb"))]
            StorageBackend::Surrealdb => Err(AppError::Config(
                "SurrealDB feature is not enabled. Enable 'surrealdb' feature to use it.".into(),
            )),
        }
    }
}
