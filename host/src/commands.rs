//! CLI 子命令的实现
//!
//! 每个命令返回要打印到标准输出的文本，便于测试。

use std::fs;
use std::path::Path;

use rescue_ui::effect::{EffectSpec, OverlayLayout, TrackSpec};
use rescue_ui::{EffectKind, ElementProps, ProgressiveButton};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{HostError, HostResult};
use crate::link::BasePathLink;
use crate::replay::{self, PointerScript};

/// 读取并解析 JSON 文件
pub fn read_json<T: DeserializeOwned>(path: &Path) -> HostResult<T> {
    let content = fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| HostError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// `render`：输出元素 HTML
///
/// `static_only` 为真时输出水合前的静态链接。
pub fn render(props_path: &Path, config: &AppConfig, static_only: bool) -> HostResult<String> {
    let props: ElementProps = read_json(props_path)?;
    info!(label = %props.label, effect = %props.effect, static_only = static_only, "渲染元素");

    let link = BasePathLink::new(&config.site.base_path);
    let mut button = ProgressiveButton::with_theme(props, config.theme.clone());
    if !static_only {
        button.hydrate();
    }
    let html = button.render_with(&link).to_html();
    button.unmount();
    Ok(html)
}

/// `replay`：按脚本回放指针事件，输出逐帧采样 JSON
pub fn replay(
    props_path: &Path,
    script_path: &Path,
    config: &AppConfig,
    pretty: bool,
) -> HostResult<String> {
    let props: ElementProps = read_json(props_path)?;
    let script: PointerScript = read_json(script_path)?;
    debug!(events = script.events.len(), "回放脚本加载完成");

    let report = replay::run(props, config.theme.clone(), &script, &config.replay)?;
    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}

/// `effects`：输出效果表
pub fn effects() -> String {
    let mut lines = vec![format!(
        "{:<14}{:<18}{:<24}{}",
        "effect", "targets", "enter", "leave"
    )];
    for kind in EffectKind::ALL {
        let line = match kind.spec() {
            Some(spec) => format!(
                "{:<14}{:<18}{:<24}{}",
                kind.name(),
                describe_targets(spec),
                describe_tracks(spec.enter_duration(), spec.enter),
                describe_tracks(spec.leave_duration(), spec.leave)
            ),
            None => format!("{:<14}{:<18}{:<24}{}", kind.name(), "-", "-", "-"),
        };
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn describe_targets(spec: &EffectSpec) -> String {
    let targets = spec
        .geometry
        .targets()
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join("+");
    match spec.layout {
        OverlayLayout::Fill { origin } => format!("{} ({})", targets, origin),
        OverlayLayout::Trailing { width_px } => format!("{} ({}px)", targets, width_px),
        OverlayLayout::None => targets,
    }
}

fn describe_tracks(total: f32, tracks: &[TrackSpec]) -> String {
    let easing = tracks.first().map(|t| t.easing.name()).unwrap_or("-");
    format!("{}ms {}", (total * 1000.0).round() as u32, easing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_table() {
        let table = effects();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), EffectKind::ALL.len() + 1);
        assert!(lines[0].starts_with("effect"));
        assert!(lines[1].starts_with("none"));
        assert!(table.contains(
            "fill-up       overlay (bottom)  500ms easeOutQuad       300ms easeInCubic"
        ));
        assert!(table.contains("overlay+label (32px)"));
    }
}
