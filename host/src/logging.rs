//! 日志初始化

use tracing::level_filters::LevelFilter;

/// 安装 fmt 订阅者，输出到 stderr
///
/// 重复调用时保留第一次安装的订阅者。
pub fn init(level: LevelFilter) {
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = %level, "日志初始化完成");
    }
}
