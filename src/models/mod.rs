//! 核心数据模型模块
//!
//! 定义日记条目 JournalEntry。

pub mod entry;

pub use entry::JournalEntry;
