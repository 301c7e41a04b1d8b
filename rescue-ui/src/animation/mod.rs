//! # Animation 模块
//!
//! 通用补间/时间轴引擎，按帧推进，驱动元素各部件的 CSS 变换。
//!
//! ## 核心设计理念
//!
//! 动画系统只负责 **时间轴管理**：
//! - 知道某个属性从 A 到 B 需要在 duration 内变化
//! - 通过 `Animatable` 把当前值写回对象
//! - **不假设对象类型**，对象自己决定如何使用这些值
//!
//! ## 核心概念
//!
//! - `Tween`: 单个 f32 值的补间
//! - `Timeline`: 多条轨道按偏移组合，可附带完成回调
//! - `AnimationSystem`: 播放、暂停、中止时间轴，返回 `AnimationHandle`
//! - `EasingFunction`: 缓动曲线
//! - `Transform`: 带单位的 CSS 变换通道

mod easing;
mod system;
mod timeline;
mod traits;
mod transform;
mod tween;

pub use easing::EasingFunction;
pub use system::{AnimationHandle, AnimationSystem};
pub use timeline::{ScheduledTrack, Timeline, TimelineOffset, Track};
pub use traits::{AnimPropertyKey, Animatable, ObjectId};
pub use transform::{Length, LengthUnit, Transform, TransformProperty};
pub use tween::{Tween, TweenState};

/// 动画事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// 时间轴开始
    Started(AnimationHandle),
    /// 时间轴自然结束
    Completed(AnimationHandle),
    /// 时间轴被中止（被新的过渡打断、被抢占或卸载）
    Halted(AnimationHandle),
}
