use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
const ENV_PREFIX: &str = "MINDMIRROR_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序（后者覆盖前者）：
    /// 1. 开发环境默认值
    /// 2. ./config.toml
    /// 3. 环境变量（MINDMIRROR_JOURNAL_API__BASE_URL）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.journal_api.base_url.trim().is_empty() {
            return Err(ConfigValidationError::MissingJournalApiUrl);
        }

        if config.reflection.enabled && config.reflection.base_url.trim().is_empty() {
            return Err(ConfigValidationError::MissingReflectionUrl);
        }

        if config.insights.top_n == 0 {
            return Err(ConfigValidationError::InvalidTopN);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("日记服务地址未配置")]
    MissingJournalApiUrl,

    #[error("反思服务已启用但地址未配置")]
    MissingReflectionUrl,

    #[error("排行条目数无效，必须大于 0")]
    InvalidTopN,
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
    fn test_load_defaults_without_file() {
        figment::Jail::expect_with(|_jail| {
            let config = ConfigLoader::load_from("missing.toml")?;
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.insights.top_n, 7);
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                environment = "staging"

                [journal_api]
                base_url = "http://journal.internal"

                [insights]
                top_n = 5
                "#,
            )?;
            jail.set_env("MINDMIRROR_SERVER__PORT", "9090");

            let config = ConfigLoader::load()?;
            assert_eq!(config.environment, "staging");
            assert_eq!(config.journal_api.base_url, "http://journal.internal");
            assert_eq!(config.journal_api.timeout_secs, 30);
            assert_eq!(config.insights.top_n, 5);
            assert_eq!(config.server.port, 9090);
            Ok(())
        });
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::development();
        assert!(ConfigLoader::validate(&config).is_ok());

        config.insights.top_n = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidTopN)
        ));

        let mut config = AppConfig::development();
        config.journal_api.base_url = " ".into();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::MissingJournalApiUrl)
        ));

        let mut config = AppConfig::development();
        config.reflection.base_url.clear();
        assert!(ConfigLoader::validate(&config).is_err());
        config.reflection.enabled = false;
        assert!(ConfigLoader::validate(&config).is_ok());
    }
}
