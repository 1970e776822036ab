use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 日记服务（上游 REST API）配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JournalApiConfig {
    /// 服务基础地址
    pub base_url: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

/// 反思生成服务配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReflectionConfig {
    /// 服务基础地址
    pub base_url: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
    /// 是否启用反思生成
    pub enabled: bool,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
}

/// 安全配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// 允许跨域的来源，"*" 表示任意来源
    pub cors_origins: Vec<String>,
    /// 凭证过期判断的容忍时间（秒）
    pub leeway_secs: u64,
}

/// 洞察计算配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InsightsConfig {
    /// 情绪均值与关注点排行保留的条目数
    pub top_n: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 日记服务配置
    pub journal_api: JournalApiConfig,
    /// 反思服务配置
    pub reflection: ReflectionConfig,
    /// 安全配置
    pub security: SecurityConfig,
    /// 洞察配置
    pub insights: InsightsConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 3000,
            },
            journal_api: JournalApiConfig {
                base_url: "http://localhost:8080".into(),
                timeout_secs: 30,
            },
            reflection: ReflectionConfig {
                base_url: "http://localhost:5000".into(),
                timeout_secs: 60,
                enabled: true,
            },
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:5173".into()],
                leeway_secs: 30,
            },
            insights: InsightsConfig { top_n: 7 },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "mindmirror".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.logging.log_dir = Some(PathBuf::from("./logs"));
        config.security.cors_origins = Vec::new();
        config
    }
}
