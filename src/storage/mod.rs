//! 存储层模块
//!
//! 日记条目的持久化，支持进程内存与 SurrealDB。

pub mod factory;
pub mod repository;

#[cfg(feature = "surrealdb")]
pub mod surrealdb;

pub use factory::{EntryStore, StorageFactory};
pub use repository::{MemoryEntryRepository, Repository};
