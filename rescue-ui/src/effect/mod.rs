//! # Effect 模块
//!
//! 悬停效果：类型定义、静态效果表、名称解析。
//!
//! - [`registry`]：`EffectKind` 与效果表（几何状态、轨道参数、默认值）
//! - [`resolver`]：名称 → `EffectKind`

pub mod registry;
mod resolver;

pub use registry::{
    AnimationTarget, EFFECTS, EffectKind, EffectSpec, OverlayGeometry, OverlayLayout, PartValue,
    TrackSpec, defaults,
};
pub use resolver::resolve;
