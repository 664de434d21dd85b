//! 日记条目 DTO
//!
//! 定义日记条目相关的请求和响应数据结构。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::JournalEntry;
use crate::sentiment::MoodLabel;

/// 创建条目请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    /// 正文，空白与长度上限由服务层按配置校验
    #[validate(length(min = 1, message = "content cannot be empty"))]
    pub content: String,
}

/// 条目响应
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: String,
    pub content: String,
    pub mood: MoodLabel,
    pub sentiment: i64,
    pub comparative: f64,
    /// 毫秒时间戳
    pub timestamp: i64,
    pub created_at: DateTime<Utc>,
}

impl From<JournalEntry> for EntryResponse {
    fn from(entry: JournalEntry) -> Self {
        Self {
            timestamp: entry.timestamp_ms(),
            created_at: entry.timestamp,
            id: entry.id,
            content: entry.content,
            mood: entry.mood,
            sentiment: entry.sentiment,
            comparative: entry.comparative,
        }
    }
}

/// 条目列表查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ListEntriesParams {
    /// 页码
    pub page: Option<usize>,
    /// 每页数量
    pub page_size: Option<usize>,
}

/// 条目列表响应
#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub entries: Vec<EntryResponse>,
    pub total: u64,
    pub page: usize,
    pub page_size: usize,
}

/// 删除条目响应
#[derive(Debug, Serialize)]
pub struct DeleteEntryResponse {
    pub id: String,
    pub message: String,
}
