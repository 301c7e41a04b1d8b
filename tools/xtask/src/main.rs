//! # xtask
//!
//! 本地门禁与属性文件检查。
//!
//! - `check-all`: fmt 检查、clippy、全部测试
//! - `cov-runtime`: rescue-ui 的覆盖率报告
//! - `cov-workspace`: 除 xtask 以外的覆盖率报告
//! - `props-check`: 检查元素属性 JSON

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use rescue_ui::{EffectKind, ElementProps, resolve_effect};
use walkdir::WalkDir;

/// `check-all` 依次执行的 cargo 命令
const GATES: [&[&str]; 3] = [
    &["fmt", "--all", "--", "--check"],
    &["clippy", "--workspace", "--all-targets"],
    &["test", "--workspace"],
];

/// 执行一条 cargo 命令，非零退出视为失败
fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let step = format!("cargo {}", args.join(" "));
    eprintln!("\n==> {step}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{step} 失败: {status}");
    }
    Ok(())
}

/// 生成 HTML 覆盖率报告，`scope` 为包选择参数
fn coverage(scope: &[&str]) -> anyhow::Result<()> {
    let available = Command::new("cargo")
        .args(["llvm-cov", "--version"])
        .status()
        .is_ok_and(|s| s.success());
    if !available {
        anyhow::bail!(
            "找不到 cargo llvm-cov，先执行 `cargo install cargo-llvm-cov` 和 \
             `rustup component add llvm-tools-preview`"
        );
    }

    let mut args = vec!["llvm-cov"];
    args.extend_from_slice(scope);
    args.extend(["--all-features", "--html"]);
    cargo(&args)?;

    eprintln!("\n报告: target/llvm-cov/html/index.html");
    Ok(())
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_default();

    match sub.as_str() {
        "check-all" => GATES.iter().try_for_each(|gate| cargo(gate))?,
        "cov-runtime" => coverage(&["-p", "rescue-ui"])?,
        "cov-workspace" => coverage(&["--workspace", "--exclude", "xtask"])?,
        "props-check" => props_check(args.next().as_deref())?,
        "" | "help" | "-h" | "--help" => print_help(),
        other => anyhow::bail!("未知子命令: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"cargo xtask <command>

  check-all              fmt 检查、clippy、测试
  cov-runtime            rescue-ui 覆盖率
  cov-workspace          workspace 覆盖率（不含 xtask）
  props-check [path]     检查属性 JSON，默认目录 demos/props/

props-check 报错：JSON 语法错误、字段类型或变体/尺寸名不合法
props-check 警告：未知效果名、空文字、reveal-icon 缺图标

.cargo/config.toml 中的别名：cargo check-all / cov-runtime / cov-workspace / props-check"#
    );
}

//=============================================================================
// props-check 命令实现
//=============================================================================

/// 默认属性目录（相对于 workspace root）
const DEFAULT_PROPS_DIR: &str = "demos/props";

/// 检查结果
#[derive(Default)]
struct PropsCheckResult {
    files_checked: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// 执行属性文件检查
fn props_check(path: Option<&str>) -> anyhow::Result<()> {
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                collect_json_files(&path)
            } else {
                anyhow::bail!("路径不存在: {}", p);
            }
        }
        None => {
            let dir = Path::new(DEFAULT_PROPS_DIR);
            if !dir.exists() {
                anyhow::bail!(
                    "默认属性目录不存在: {}\n请在 workspace 根目录运行，或指定路径",
                    dir.display()
                );
            }
            collect_json_files(dir)
        }
    };

    if files.is_empty() {
        eprintln!("未找到属性文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个属性文件...\n", files.len());

    let mut result = PropsCheckResult::default();
    for file in &files {
        check_props_file(file, &mut result);
    }

    print_check_result(&result);

    if !result.errors.is_empty() {
        anyhow::bail!("属性检查发现错误");
    }
    Ok(())
}

/// 收集目录下的所有 JSON 文件
fn collect_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// 检查单个文件
fn check_props_file(file: &Path, result: &mut PropsCheckResult) {
    let id = file.display().to_string();
    result.files_checked += 1;

    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            result.errors.push(format!("{}: 无法读取文件 - {}", id, e));
            return;
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            result.errors.push(format!("{}: JSON 语法错误 - {}", id, e));
            return;
        }
    };

    // 效果名在反序列化时会被静默降级，先看原始字符串
    let raw_effect = value.get("effect").and_then(|v| v.as_str());
    if let Some(raw) = raw_effect
        && is_unknown_effect(raw)
    {
        result
            .warnings
            .push(format!("{}: 未知悬停效果 '{}'，将降级为 none", id, raw));
    }

    let props: ElementProps = match serde_json::from_value(value) {
        Ok(p) => p,
        Err(e) => {
            result.errors.push(format!("{}: 属性结构错误 - {}", id, e));
            return;
        }
    };

    if props.label.trim().is_empty() {
        result.warnings.push(format!("{}: 文字为空", id));
    }
    if props.effect == EffectKind::RevealIcon && props.icon.is_none() {
        result
            .warnings
            .push(format!("{}: reveal-icon 未提供 icon，不会显示遮罩", id));
    }
}

fn is_unknown_effect(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty()
        && !trimmed.eq_ignore_ascii_case("none")
        && resolve_effect(trimmed) == EffectKind::None
}

/// 输出检查结果
fn print_check_result(result: &PropsCheckResult) {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个文件", result.files_checked);
    eprintln!();

    for error in &result.errors {
        eprintln!("[ERROR] {}", error);
    }
    for warning in &result.warnings {
        eprintln!("[WARN] {}", warning);
    }

    eprintln!();
    if !result.errors.is_empty() {
        eprintln!(
            "❌ {} 个错误, {} 个警告",
            result.errors.len(),
            result.warnings.len()
        );
    } else if !result.warnings.is_empty() {
        eprintln!("⚠️  0 个错误, {} 个警告", result.warnings.len());
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}
