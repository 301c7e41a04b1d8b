//! # Error 模块
//!
//! rescue-ui 内部使用的错误类型。
//!
//! 组件边界不向调用方抛出错误：元素遇到这些错误时记录日志并降级为静态样式。

use thiserror::Error;

use crate::animation::{AnimationHandle, ObjectId, TransformProperty};
use crate::effect::{AnimationTarget, EffectKind};

/// 动画系统错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// 对象未注册
    #[error("对象 {object_id} 未注册")]
    ObjectNotRegistered { object_id: ObjectId },

    /// 对象没有该属性
    #[error("对象 {object_id} 没有属性 '{property}'")]
    UnknownProperty {
        object_id: ObjectId,
        property: TransformProperty,
    },

    /// 句柄不存在（已完成、已中止或从未创建）
    #[error("动画句柄 {handle} 不存在")]
    UnknownHandle { handle: AnimationHandle },
}

/// rescue-ui 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// 动画错误
    #[error("动画错误: {0}")]
    Animation(#[from] AnimationError),

    /// 效果轨道指向了元素中不存在的部件
    #[error("效果 {effect} 缺少部件 {target}")]
    MissingPart {
        effect: EffectKind,
        target: AnimationTarget,
    },
}

/// Result 类型别名
pub type UiResult<T> = Result<T, UiError>;
