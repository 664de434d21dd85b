//! Mood Diary - 情绪日记服务
//!
//! 基于词典的情感打分核心，为日记条目计算情感分与心情标签，
//! 并提供条目存储、歌曲/动图推荐与 REST API。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod security;
pub mod sentiment;
pub mod services;
pub mod storage;
