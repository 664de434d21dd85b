use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// 进程内存（重启后丢失）
    #[default]
    Memory,
    /// SurrealDB
    Surrealdb,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 存储后端
    pub backend: StorageBackend,
    /// SurrealDB 连接地址，如 `mem://` 或 `http://localhost:8000`
    pub url: String,
    /// 命名空间
    pub namespace: String,
    /// 数据库名称
    pub database: String,
    /// 用户名（为空时跳过登录）
    pub username: String,
    /// 密码
    pub password: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
    /// 最大请求体大小（字节）
    pub max_request_size: usize,
    /// 允许的跨域来源，`*` 表示任意
    pub allowed_origins: Vec<String>,
}

/// 安全配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// API 密钥，为空表示不启用认证
    pub api_key: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化（JSON）日志格式
    pub structured: bool,
    /// 日志文件目录，按天滚动
    pub log_dir: Option<PathBuf>,
}

/// 日记配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JournalConfig {
    /// 单篇日记最大字符数
    pub max_entry_length: usize,
    /// 草稿预览触发分析的最少字符数
    pub draft_min_chars: usize,
    /// 列表默认每页数量
    pub default_page_size: usize,
}

/// 歌曲 / 动图推荐配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecommendationConfig {
    /// 推荐歌曲的歌手
    pub artist: String,
    /// OpenAI API 密钥
    pub openai_api_key: String,
    /// OpenAI 接口地址
    pub openai_base_url: String,
    /// 对话模型
    pub model: String,
    /// 采样温度
    pub temperature: f32,
    /// 回复最大 token 数
    pub max_tokens: u32,
    /// Giphy API 密钥
    pub giphy_api_key: String,
    /// Giphy 接口地址
    pub giphy_base_url: String,
    /// 每次搜索返回的动图数
    pub gif_search_limit: usize,
    /// 从前 N 个结果中随机挑选
    pub gif_pick_window: usize,
    /// 外部请求超时（秒）
    pub timeout_secs: u64,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 服务器配置
    pub server: ServerConfig,
    /// 安全配置
    pub security: SecurityConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 日记配置
    pub journal: JournalConfig,
    /// 推荐配置
    pub recommendation: RecommendationConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            database: DatabaseConfig {
                backend: StorageBackend::Memory,
                url: "mem://".into(),
                namespace: "mood_diary".into(),
                database: "journal".into(),
                username: String::new(),
                password: String::new(),
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                request_timeout: 30,
                max_request_size: 1024 * 1024,
                allowed_origins: vec!["*".into()],
            },
            security: SecurityConfig {
                api_key: String::new(),
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            journal: JournalConfig {
                max_entry_length: 10_000,
                draft_min_chars: 10,
                default_page_size: 20,
            },
            recommendation: RecommendationConfig {
                artist: "Taylor Swift".into(),
                openai_api_key: String::new(),
                openai_base_url: "https://api.openai.com/v1".into(),
                model: "gpt-3.5-turbo".into(),
                temperature: 0.8,
                max_tokens: 300,
                giphy_api_key: String::new(),
                giphy_base_url: "https://api.giphy.com/v1".into(),
                gif_search_limit: 10,
                gif_pick_window: 5,
                timeout_secs: 30,
            },
            app_name: "mood-diary".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.database.backend = StorageBackend::Surrealdb;
        config.database.url = "http://localhost:8000".into();
        config
    }
}
