use crate::config::config::{AppConfig, StorageBackend};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序（后者覆盖前者）：
    /// 1. 开发环境默认值
    /// 2. `MOOD_DIARY_CONFIG` 指定的文件，否则 ./config.toml
    /// 3. `MOOD_DIARY_` 前缀环境变量，`__` 表示嵌套，如 `MOOD_DIARY_SERVER__PORT`
    /// 4. `OPENAI_API_KEY` / `GIPHY_API_KEY`（仅当对应配置为空）
    pub fn load() -> Result<AppConfig, figment::Error> {
        let path = std::env::var("MOOD_DIARY_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path());
        Self::load_from(path)
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        let mut config: AppConfig = Self::figment(path.as_ref()).extract()?;
        Self::apply_key_fallbacks(&mut config);
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("MOOD_DIARY_").split("__"))
    }

    fn apply_key_fallbacks(config: &mut AppConfig) {
        let recommendation = &mut config.recommendation;
        if recommendation.openai_api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                recommendation.openai_api_key = key;
            }
        }
        if recommendation.giphy_api_key.is_empty() {
            if let Ok(key) = std::env::var("GIPHY_API_KEY") {
                recommendation.giphy_api_key = key;
            }
        }
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.database.backend == StorageBackend::Surrealdb && config.database.url.is_empty()
        {
            return Err(ConfigValidationError::MissingDatabaseUrl);
        }

        if config.journal.max_entry_length == 0 {
            return Err(ConfigValidationError::InvalidEntryLength);
        }

        if config.recommendation.gif_pick_window == 0 {
            return Err(ConfigValidationError::InvalidPickWindow);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("数据库连接 URL 未配置")]
    MissingDatabaseUrl,

    #[error("日记最大长度无效，必须大于 0")]
    InvalidEntryLength,

    #[error("动图挑选窗口无效，必须大于 0")]
    InvalidPickWindow,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// 检查配置文件是否存在
pub fn config_exists() -> bool {
    default_config_path().exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = ConfigLoader::load_from("does-not-exist.toml")?;
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.database.backend, StorageBackend::Memory);
            assert_eq!(config.recommendation.model, "gpt-3.5-turbo");
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "diary.toml",
                r#"
                [server]
                port = 9000

                [database]
                backend = "surrealdb"
                url = "mem://"

                [recommendation]
                artist = "Phoebe Bridgers"
                "#,
            )?;
            jail.set_env("MOOD_DIARY_JOURNAL__MAX_ENTRY_LENGTH", "500");
            jail.set_env("OPENAI_API_KEY", "sk-test");

            let config = ConfigLoader::load_from("diary.toml")?;
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.database.backend, StorageBackend::Surrealdb);
            assert_eq!(config.recommendation.artist, "Phoebe Bridgers");
            assert_eq!(config.journal.max_entry_length, 500);
            assert_eq!(config.recommendation.openai_api_key, "sk-test");
            // 文件中未出现的字段保留默认值
            assert_eq!(config.journal.draft_min_chars, 10);
            Ok(())
        });
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::development();
        assert!(ConfigLoader::validate(&config).is_ok());

        config.server.port = 0;
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidPort)
        );

        let mut config = AppConfig::production();
        config.database.url.clear();
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::MissingDatabaseUrl)
        );

        let mut config = AppConfig::development();
        config.journal.max_entry_length = 0;
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidEntryLength)
        );
    }
}
