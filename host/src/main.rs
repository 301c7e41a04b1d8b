//! # Rescue Host
//!
//! 行动按钮宿主 CLI。
//!
//! ## 用法
//!
//! ```bash
//! rescue-host render demos/adopt.json
//! rescue-host render demos/adopt.json --static
//! rescue-host replay demos/adopt.json demos/hover.json --pretty
//! rescue-host effects
//! rescue-host --config host/config.json --log-level debug replay demos/adopt.json demos/hover.json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use rescue_host::config::{self, AppConfig};
use rescue_host::{HostResult, commands, logging};

#[derive(Parser)]
#[command(name = "rescue-host")]
#[command(about = "行动按钮宿主 - 渲染元素、回放悬停过渡、查看效果表")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件（不存在时使用默认配置）
    #[arg(short, long, default_value = "host/config.json", global = true)]
    config: PathBuf,

    /// 日志级别，覆盖配置文件
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 输出元素 HTML
    Render {
        /// 元素属性 JSON
        props: PathBuf,

        /// 输出水合前的静态链接
        #[arg(long = "static")]
        static_only: bool,
    },

    /// 回放指针事件，输出逐帧采样
    Replay {
        /// 元素属性 JSON
        props: PathBuf,

        /// 回放脚本 JSON
        script: PathBuf,

        /// 格式化输出
        #[arg(long)]
        pretty: bool,
    },

    /// 列出所有悬停效果
    Effects,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> HostResult<()> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    config.validate()?;

    logging::init(config::parse_level(&config.log.level)?);
    info!(config = %cli.config.display(), "配置加载完成");

    let output = match cli.command {
        Commands::Render { props, static_only } => commands::render(&props, &config, static_only)?,
        Commands::Replay {
            props,
            script,
            pretty,
        } => commands::replay(&props, &script, &config, pretty)?,
        Commands::Effects => commands::effects(),
    };
    println!("{}", output);

    Ok(())
}
