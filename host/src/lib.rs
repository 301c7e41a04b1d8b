//! # Host 层
//!
//! 行动按钮组件的宿主层实现。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 配置加载与校验
//! - 日志初始化
//! - 站点导航元素（子路径前缀）
//! - 按固定帧率回放指针事件
//! - CLI 命令的输出
//!
//! Host 层不包含过渡逻辑，状态机和动画都在 `rescue-ui` 中。

pub mod commands;
pub mod config;
pub mod error;
pub mod link;
pub mod logging;
pub mod replay;

pub use config::{AppConfig, ConfigError, LogConfig, ReplayConfig, SiteConfig};
pub use error::{HostError, HostResult};
pub use link::BasePathLink;
pub use replay::{FrameSample, PointerScript, ReplayReport, ScriptAction, ScriptEvent};
