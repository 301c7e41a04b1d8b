//! # 无头回放
//!
//! 按固定帧率驱动一个 [`ProgressiveButton`]，在指定时刻注入指针事件，
//! 逐帧采样阶段与各部件变换。
//!
//! 事件在到达时刻之后的第一个帧边界生效；每帧先注入事件再采样，然后推进 `frame_ms`。
//!
//! ```json
//! {
//!   "events": [
//!     { "at_ms": 0, "action": "hydrate" },
//!     { "at_ms": 100, "action": "enter" },
//!     { "at_ms": 700, "action": "leave" }
//!   ],
//!   "until_ms": 1200
//! }
//! ```

use rescue_ui::{
    AnimationTarget, EffectKind, ElementProps, PointerEvent, ProgressiveButton, Theme,
    TransitionPhase,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{MAX_UNTIL_MS, ReplayConfig};
use crate::error::{HostError, HostResult};

/// 回放动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptAction {
    Hydrate,
    Enter,
    Leave,
    Unmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub at_ms: u64,
    pub action: ScriptAction,
}

/// 回放脚本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerScript {
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
    /// 回放结束时间，缺省使用配置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_ms: Option<u64>,
}

impl PointerScript {
    /// 事件时间必须单调不减，且不超过回放时长上限
    pub fn validate(&self) -> HostResult<()> {
        if let Some(until_ms) = self.until_ms
            && until_ms > MAX_UNTIL_MS
        {
            return Err(HostError::InvalidScript(format!(
                "until_ms 不能超过 {}: {}",
                MAX_UNTIL_MS, until_ms
            )));
        }
        if let Some(event) = self.events.iter().find(|e| e.at_ms > MAX_UNTIL_MS) {
            return Err(HostError::InvalidScript(format!(
                "事件时间不能超过 {}: {}ms",
                MAX_UNTIL_MS, event.at_ms
            )));
        }
        for pair in self.events.windows(2) {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(HostError::InvalidScript(format!(
                    "事件时间倒序: {}ms 之后出现 {}ms",
                    pair[0].at_ms, pair[1].at_ms
                )));
            }
        }
        Ok(())
    }

    /// 回放结束时间：至少覆盖最后一个事件
    pub fn end_ms(&self, config: &ReplayConfig) -> u64 {
        let last = self.events.last().map(|e| e.at_ms).unwrap_or(0);
        self.until_ms.unwrap_or(config.until_ms).max(last)
    }
}

/// 单帧采样
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub t_ms: u64,
    pub hydrated: bool,
    pub phase: TransitionPhase,
    pub live_animations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// 回放结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub effect: EffectKind,
    pub frame_ms: u32,
    pub frames: Vec<FrameSample>,
}

impl ReplayReport {
    /// 最后一帧
    pub fn last(&self) -> Option<&FrameSample> {
        self.frames.last()
    }

    /// 指定时刻（或之前最近）的帧
    pub fn at(&self, t_ms: u64) -> Option<&FrameSample> {
        self.frames.iter().take_while(|f| f.t_ms <= t_ms).last()
    }
}

/// 执行回放
pub fn run(
    props: ElementProps,
    theme: Theme,
    script: &PointerScript,
    config: &ReplayConfig,
) -> HostResult<ReplayReport> {
    script.validate()?;

    let effect = props.effect;
    let frame_ms = config.frame_ms.max(1);
    let dt = frame_ms as f32 / 1000.0;
    let end_ms = script.end_ms(config);
    info!(effect = %effect, frame_ms = frame_ms, end_ms = end_ms, "开始回放");

    let mut button = ProgressiveButton::with_theme(props, theme);
    let mut pending = script.events.iter().peekable();
    let mut frames = Vec::new();
    let mut t_ms = 0;

    loop {
        while let Some(event) = pending.next_if(|e| e.at_ms <= t_ms) {
            apply(&mut button, event.action);
            debug!(t_ms = t_ms, action = ?event.action, "注入事件");
        }

        frames.push(sample(&button, t_ms));
        if t_ms >= end_ms {
            break;
        }

        button.tick(dt);
        match t_ms.checked_add(u64::from(frame_ms)) {
            Some(next) => t_ms = next,
            None => break,
        }
    }

    button.unmount();
    Ok(ReplayReport {
        effect,
        frame_ms,
        frames,
    })
}

fn apply(button: &mut ProgressiveButton, action: ScriptAction) {
    match action {
        ScriptAction::Hydrate => {
            button.hydrate();
        }
        ScriptAction::Enter => {
            button.dispatch(PointerEvent::Enter);
        }
        ScriptAction::Leave => {
            button.dispatch(PointerEvent::Leave);
        }
        ScriptAction::Unmount => button.unmount(),
    }
}

fn sample(button: &ProgressiveButton, t_ms: u64) -> FrameSample {
    match button.element() {
        Some(element) => FrameSample {
            t_ms,
            hydrated: true,
            phase: element.phase(),
            live_animations: element.live_animation_count(),
            root: element.transform_css(AnimationTarget::Root),
            overlay: element.transform_css(AnimationTarget::Overlay),
            label: element.transform_css(AnimationTarget::Label),
        },
        None => FrameSample {
            t_ms,
            hydrated: false,
            phase: TransitionPhase::Idle,
            live_animations: 0,
            root: None,
            overlay: None,
            label: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(events: &[(u64, ScriptAction)], until_ms: Option<u64>) -> PointerScript {
        PointerScript {
            events: events
                .iter()
                .map(|&(at_ms, action)| ScriptEvent { at_ms, action })
                .collect(),
            until_ms,
        }
    }

    fn config(frame_ms: u32) -> ReplayConfig {
        ReplayConfig {
            frame_ms,
            until_ms: 1000,
        }
    }

    #[test]
    fn test_out_of_order_script_is_rejected() {
        let script = script(&[(100, ScriptAction::Enter), (50, ScriptAction::Leave)], None);
        assert!(matches!(script.validate(), Err(HostError::InvalidScript(_))));
    }

    #[test]
    fn test_script_beyond_max_duration_is_rejected() {
        let long = script(&[], Some(MAX_UNTIL_MS + 1));
        assert!(matches!(long.validate(), Err(HostError::InvalidScript(_))));

        let unbounded = script(&[], Some(u64::MAX));
        assert!(matches!(unbounded.validate(), Err(HostError::InvalidScript(_))));

        let late = script(&[(MAX_UNTIL_MS + 1, ScriptAction::Enter)], None);
        assert!(matches!(late.validate(), Err(HostError::InvalidScript(_))));

        let at_limit = script(&[(MAX_UNTIL_MS, ScriptAction::Leave)], Some(MAX_UNTIL_MS));
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_run_rejects_script_beyond_max_duration() {
        let props = ElementProps::new("Adopt").effect(EffectKind::FillIn);
        let script = script(&[(0, ScriptAction::Hydrate)], Some(2 * MAX_UNTIL_MS));
        let result = run(props, Theme::default(), &script, &config(1000));
        assert!(matches!(result, Err(HostError::InvalidScript(_))));
    }

    #[test]
    fn test_end_covers_last_event() {
        let script = script(&[(1500, ScriptAction::Leave)], Some(200));
        assert_eq!(script.end_ms(&config(16)), 1500);
        assert_eq!(PointerScript::default().end_ms(&config(16)), 1000);
    }

    #[test]
    fn test_events_before_hydration_do_nothing() {
        let props = ElementProps::new("Adopt").effect(EffectKind::FillIn);
        let script = script(
            &[(0, ScriptAction::Enter), (50, ScriptAction::Hydrate)],
            Some(100),
        );
        let report = run(props, Theme::default(), &script, &config(50)).unwrap();

        assert_eq!(report.frames.len(), 3);
        assert!(!report.frames[0].hydrated);
        assert_eq!(report.frames[1].phase, TransitionPhase::Idle);
        assert_eq!(report.frames[1].overlay.as_deref(), Some("scaleY(0)"));
        assert_eq!(report.frames[2].live_animations, 0);
    }

    #[test]
    fn test_fill_in_replay() {
        let props = ElementProps::new("Adopt").effect(EffectKind::FillIn);
        let script = script(
            &[
                (0, ScriptAction::Hydrate),
                (0, ScriptAction::Enter),
                (500, ScriptAction::Leave),
            ],
            Some(1000),
        );
        let report = run(props, Theme::default(), &script, &config(50)).unwrap();

        assert_eq!(report.effect, EffectKind::FillIn);
        assert_eq!(report.frames.len(), 21);
        assert_eq!(report.frames[0].phase, TransitionPhase::Entering);
        assert_eq!(report.at(300).map(|f| f.phase), Some(TransitionPhase::Entered));
        assert_eq!(report.at(300).and_then(|f| f.overlay.as_deref()), Some("scaleY(1)"));
        assert_eq!(report.at(500).map(|f| f.phase), Some(TransitionPhase::Leaving));

        let last = report.last().unwrap();
        assert_eq!(last.phase, TransitionPhase::Idle);
        assert_eq!(last.overlay.as_deref(), Some("scaleY(0)"));
        assert_eq!(last.live_animations, 0);
    }

    #[test]
    fn test_unmount_stops_sampling_transforms() {
        let props = ElementProps::new("Adopt").effect(EffectKind::Slide);
        let script = script(
            &[
                (0, ScriptAction::Hydrate),
                (0, ScriptAction::Enter),
                (100, ScriptAction::Unmount),
            ],
            Some(400),
        );
        let report = run(props, Theme::default(), &script, &config(50)).unwrap();

        let frozen = report.at(100).and_then(|f| f.overlay.clone());
        assert_eq!(report.last().and_then(|f| f.overlay.clone()), frozen);
        assert_eq!(report.last().map(|f| f.phase), Some(TransitionPhase::Entering));
        assert_eq!(report.last().map(|f| f.live_animations), Some(0));
    }
}
