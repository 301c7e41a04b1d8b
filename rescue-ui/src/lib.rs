//! # Rescue UI
//!
//! 救助站网站的行动按钮组件：带悬停过渡的按钮或链接。
//!
//! ## 架构概述
//!
//! `rescue-ui` 是纯逻辑核心，不做 IO、不依赖浏览器。
//! 宿主负责采集指针事件、按帧推进时间，并把渲染出的节点树输出为 HTML：
//!
//! ```text
//! Host                               Element
//!   │                                   │
//!   │──── dispatch(PointerEvent) ──────►│ 中止旧过渡，开始新过渡
//!   │──── tick(dt) ────────────────────►│ 推进动画
//!   │◄─── render() -> Node ─────────────│
//!   │                                   │
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! use rescue_ui::{ElementProps, EffectKind, PointerEvent, ProgressiveButton};
//!
//! let props = ElementProps::new("Adopt").href("/adopt").effect(EffectKind::FillUp);
//! let mut button = ProgressiveButton::new(props);
//! let first_paint = button.render().to_html();
//!
//! button.hydrate();
//! button.dispatch(PointerEvent::Enter);
//! button.tick(1.0 / 60.0);
//! ```
//!
//! ## 模块结构
//!
//! - [`animation`]：补间、时间轴、动画系统
//! - [`effect`]：悬停效果表与名称解析
//! - [`element`]：元素状态机与渐进增强包装
//! - [`markup`]：节点树、导航元素、图标内容
//! - [`style`]：变体/尺寸类表与主题
//! - [`error`]：错误类型

pub mod animation;
pub mod effect;
pub mod element;
pub mod error;
pub mod markup;
pub mod style;

// 重导出核心类型
pub use animation::{AnimationEvent, AnimationHandle, EasingFunction, Transform};
pub use effect::{AnimationTarget, EffectKind, resolve as resolve_effect};
pub use element::{
    AnimatedActionElement, ElementProps, Lifecycle, PointerEvent, ProgressiveButton, RenderMode,
    TransitionPhase,
};
pub use error::{AnimationError, UiError, UiResult};
pub use markup::{AnchorLink, Element, IconContent, LinkAttrs, LinkPrimitive, Node};
pub use style::{ButtonSize, ButtonVariant, Theme};
