//! # Config 模块
//!
//! 宿主配置，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）
//!
//! ```json
//! {
//!   "theme": { "hover_color": "#1e3a8a", "icon_class": "text-white" },
//!   "site": { "base_path": "/rescue" },
//!   "replay": { "frame_ms": 16, "until_ms": 1000 },
//!   "log": { "level": "debug" }
//! }
//! ```

use std::fs;
use std::path::Path;

use rescue_ui::Theme;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 主题默认值（遮罩颜色、图标类）
    #[serde(default)]
    pub theme: Theme,

    /// 站点配置
    #[serde(default)]
    pub site: SiteConfig,

    /// 回放配置
    #[serde(default)]
    pub replay: ReplayConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 站点配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// 站点挂载路径，拼接到以 `/` 开头的链接前
    ///
    /// 为空表示部署在根路径。
    #[serde(default)]
    pub base_path: String,
}

/// 回放配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// 帧间隔（毫秒）
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u32,

    /// 脚本未指定结束时间时的回放时长（毫秒）
    #[serde(default = "default_until_ms")]
    pub until_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// 最高日志级别：off / error / warn / info / debug / trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

// 默认值函数
fn default_frame_ms() -> u32 {
    16
}

fn default_until_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 回放时长上限（毫秒）
pub(crate) const MAX_UNTIL_MS: u64 = 10 * 60 * 1000;

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            until_ms: default_until_ms(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 文件不存在时返回默认配置；存在但无法读取或解析时返回错误。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("{}: {}", path.display(), e)))
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.hover_color.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "theme.hover_color 不能为空".to_string(),
            ));
        }

        let base = &self.site.base_path;
        if !base.is_empty() && !base.starts_with('/') {
            return Err(ConfigError::ValidationFailed(format!(
                "site.base_path 必须以 / 开头: {}",
                base
            )));
        }

        if self.replay.frame_ms == 0 || self.replay.frame_ms > 1000 {
            return Err(ConfigError::ValidationFailed(
                "replay.frame_ms 必须在 1 - 1000 之间".to_string(),
            ));
        }

        if self.replay.until_ms > MAX_UNTIL_MS {
            return Err(ConfigError::ValidationFailed(format!(
                "replay.until_ms 不能超过 {}",
                MAX_UNTIL_MS
            )));
        }

        self.log.level_filter()?;

        Ok(())
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_level(&self.level)
    }
}

/// 解析日志级别（大小写不敏感）
pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| ConfigError::ValidationFailed(format!("未知日志级别: {}", level)))
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// 解析失败
    #[error("配置解析失败: {0}")]
    ParseFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.theme.hover_color, "black");
        assert_eq!(config.replay.frame_ms, 16);
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "theme": { "hover_color": "teal" } }"#).unwrap();
        assert_eq!(config.theme.hover_color, "teal");
        assert_eq!(config.theme.icon_class, "text-white");
        assert_eq!(config.replay.until_ms, 1000);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = AppConfig::default();
        config.site.base_path = "/rescue".to_string();
        let json = serde_json::to_string_pretty(&config).unwrap();

        let loaded: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.replay.frame_ms = 0;
        assert!(config.validate().is_err());
        config.replay.frame_ms = 16;

        config.site.base_path = "rescue".to_string();
        assert!(config.validate().is_err());
        config.site.base_path = "/rescue".to_string();

        config.log.level = "loud".to_string();
        assert!(config.validate().is_err());
        config.log.level = "DEBUG".to_string();

        config.theme.hover_color = " ".to_string();
        assert!(config.validate().is_err());
        config.theme.hover_color = "black".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("warn"), Ok(LevelFilter::WARN));
        assert_eq!(parse_level("off"), Ok(LevelFilter::OFF));
        assert!(parse_level("verbose").is_err());
    }
}
