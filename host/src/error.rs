//! 宿主层错误

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum HostError {
    /// 读取文件失败
    #[error("读取 {} 失败: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 文件解析失败
    #[error("解析 {} 失败: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 回放脚本无效
    #[error("回放脚本无效: {0}")]
    InvalidScript(String),

    /// 输出序列化失败
    #[error("输出序列化失败: {0}")]
    Output(#[from] serde_json::Error),
}

pub type HostResult<T> = Result<T, HostError>;
