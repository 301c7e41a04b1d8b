//! 交互状态

use std::fmt;

use serde::{Deserialize, Serialize};

/// 指针事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvent {
    Enter,
    Leave,
}

impl fmt::Display for PointerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enter => "enter",
            Self::Leave => "leave",
        })
    }
}

/// 过渡阶段
///
/// ```text
/// Idle --enter--> Entering --完成--> Entered
///   ^                |                  |
///   |              leave              leave
///   |                v                  |
///   +--完成---- Leaving <---------------+
/// ```
///
/// 任意阶段收到新事件都会先中止进行中的过渡，最后一个事件生效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    #[default]
    Idle,
    Entering,
    Entered,
    Leaving,
}

impl fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Entering => "entering",
            Self::Entered => "entered",
            Self::Leaving => "leaving",
        })
    }
}

/// 单个元素实例的交互状态
///
/// 只由进入/离开处理和完成回调修改。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub phase: TransitionPhase,
    /// 是否有过渡在进行
    pub in_flight: bool,
}

impl InteractionState {
    /// 开始一次过渡
    pub fn begin(&mut self, event: PointerEvent) {
        self.phase = match event {
            PointerEvent::Enter => TransitionPhase::Entering,
            PointerEvent::Leave => TransitionPhase::Leaving,
        };
        self.in_flight = true;
    }

    /// 过渡自然结束
    pub fn complete(&mut self) {
        self.phase = match self.phase {
            TransitionPhase::Entering => TransitionPhase::Entered,
            TransitionPhase::Leaving => TransitionPhase::Idle,
            settled => settled,
        };
        self.in_flight = false;
    }

    /// 过渡被放弃（启动失败或卸载），阶段保持不变
    pub fn abandon(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_then_complete() {
        let mut state = InteractionState::default();
        state.begin(PointerEvent::Enter);
        assert_eq!(state.phase, TransitionPhase::Entering);
        assert!(state.in_flight);

        state.complete();
        assert_eq!(state.phase, TransitionPhase::Entered);
        assert!(!state.in_flight);
    }

    #[test]
    fn test_leave_interrupts_enter() {
        let mut state = InteractionState::default();
        state.begin(PointerEvent::Enter);
        state.begin(PointerEvent::Leave);
        assert_eq!(state.phase, TransitionPhase::Leaving);

        state.complete();
        assert_eq!(state.phase, TransitionPhase::Idle);
    }

    #[test]
    fn test_complete_on_settled_phase_is_noop() {
        let mut state = InteractionState::default();
        state.complete();
        assert_eq!(state.phase, TransitionPhase::Idle);
    }

    #[test]
    fn test_abandon_keeps_phase() {
        let mut state = InteractionState::default();
        state.begin(PointerEvent::Enter);
        state.abandon();
        assert_eq!(state.phase, TransitionPhase::Entering);
        assert!(!state.in_flight);
    }

    #[test]
    fn test_serde_names() {
        let event: PointerEvent = serde_json::from_str("\"leave\"").unwrap();
        assert_eq!(event, PointerEvent::Leave);
        assert_eq!(
            serde_json::to_string(&TransitionPhase::Entered).unwrap(),
            "\"entered\""
        );
    }
}
