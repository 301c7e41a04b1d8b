//! # Effect Registry
//!
//! 悬停效果类型与效果表。
//! 这是所有效果名称、几何状态、时长、缓动的**唯一来源**。
//!
//! 每个效果由三部分组成：
//! - `OverlayGeometry`：各部件在静止/展开两种状态下的变换
//! - `enter`：指针进入时的轨道列表
//! - `leave`：指针离开时的轨道列表
//!
//! 新增效果只需要在 [`EFFECTS`] 里追加一项。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::animation::{EasingFunction, Length, TimelineOffset, Transform, TransformProperty};

use AnimationTarget::{Label, Overlay, Root};
use TransformProperty::{Scale, ScaleY, TranslateX, TranslateY};
use defaults::*;

/// 悬停效果类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EffectKind {
    /// 无效果
    #[default]
    None,
    /// 遮罩从顶部向下展开
    FillIn,
    /// 遮罩从底部向上升起
    FillUp,
    /// 整个元素轻微放大
    Pulse,
    /// 遮罩从左侧滑入
    Slide,
    /// 右侧滑出箭头，文字左移
    RevealArrow,
    /// 右侧滑出自定义图标，文字左移
    RevealIcon,
}

impl EffectKind {
    pub const ALL: &'static [EffectKind] = &[
        Self::None,
        Self::FillIn,
        Self::FillUp,
        Self::Pulse,
        Self::Slide,
        Self::RevealArrow,
        Self::RevealIcon,
    ];

    /// kebab-case 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FillIn => "fill-in",
            Self::FillUp => "fill-up",
            Self::Pulse => "pulse",
            Self::Slide => "slide",
            Self::RevealArrow => "reveal-arrow",
            Self::RevealIcon => "reveal-icon",
        }
    }

    /// 查效果表，`None` 没有表项
    pub fn spec(&self) -> Option<&'static EffectSpec> {
        EFFECTS.iter().find(|spec| spec.kind == *self)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for EffectKind {
    fn from(name: String) -> Self {
        super::resolve(&name)
    }
}

impl From<EffectKind> for String {
    fn from(kind: EffectKind) -> Self {
        kind.name().to_string()
    }
}

/// 元素中可被动画的部件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationTarget {
    /// 元素本身
    Root,
    /// 装饰遮罩（填充色块或图标容器）
    Overlay,
    /// 文字
    Label,
}

impl fmt::Display for AnimationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Root => "root",
            Self::Overlay => "overlay",
            Self::Label => "label",
        })
    }
}

/// 遮罩布局
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayLayout {
    /// 不渲染遮罩
    None,
    /// 铺满元素的填充色块
    Fill {
        /// CSS `transform-origin`
        origin: &'static str,
    },
    /// 右侧固定宽度的图标容器
    Trailing {
        /// 容器宽度（px）
        width_px: f32,
    },
}

/// 某个部件某个属性的取值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartValue {
    pub target: AnimationTarget,
    pub property: TransformProperty,
    pub value: Length,
}

impl PartValue {
    const fn new(target: AnimationTarget, property: TransformProperty, value: Length) -> Self {
        Self {
            target,
            property,
            value,
        }
    }
}

/// 静止/展开状态的几何描述
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    pub resting: &'static [PartValue],
    pub revealed: &'static [PartValue],
}

impl OverlayGeometry {
    /// 某个部件的静止变换
    pub fn resting_transform(&self, target: AnimationTarget) -> Transform {
        collect_transform(self.resting, target)
    }

    /// 某个部件的展开变换
    pub fn revealed_transform(&self, target: AnimationTarget) -> Transform {
        collect_transform(self.revealed, target)
    }

    /// 参与动画的部件
    pub fn targets(&self) -> Vec<AnimationTarget> {
        let mut targets = Vec::new();
        for value in self.resting {
            if !targets.contains(&value.target) {
                targets.push(value.target);
            }
        }
        targets
    }
}

fn collect_transform(values: &[PartValue], target: AnimationTarget) -> Transform {
    values
        .iter()
        .filter(|v| v.target == target)
        .fold(Transform::identity(), |t, v| t.with(v.property, v.value))
}

/// 一条轨道的参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSpec {
    pub target: AnimationTarget,
    pub property: TransformProperty,
    /// 目标值（单位与几何描述中的同名通道一致）
    pub to: f32,
    /// 时长（秒）
    pub duration: f32,
    pub easing: EasingFunction,
    pub offset: TimelineOffset,
}

/// 效果表项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSpec {
    pub kind: EffectKind,
    pub layout: OverlayLayout,
    pub geometry: OverlayGeometry,
    pub enter: &'static [TrackSpec],
    pub leave: &'static [TrackSpec],
    /// 遮罩内容必须由调用方提供图标
    pub requires_icon: bool,
}

impl EffectSpec {
    /// 过渡总时长（秒）
    pub fn enter_duration(&self) -> f32 {
        total_duration(self.enter)
    }

    pub fn leave_duration(&self) -> f32 {
        total_duration(self.leave)
    }

    /// 是否渲染遮罩节点
    pub fn has_overlay(&self) -> bool {
        !matches!(self.layout, OverlayLayout::None)
    }
}

fn total_duration(tracks: &[TrackSpec]) -> f32 {
    let mut end: f32 = 0.0;
    let mut previous_end: f32 = 0.0;
    for track in tracks {
        let start = match track.offset {
            TimelineOffset::AfterPrevious => previous_end,
            TimelineOffset::Relative(delta) => previous_end + delta,
            TimelineOffset::At(at) => at,
        }
        .max(0.0);
        previous_end = start + track.duration;
        end = end.max(previous_end);
    }
    end
}

/// 效果参数默认值
pub mod defaults {
    /// 默认遮罩颜色
    pub const HOVER_COLOR: &str = "black";
    /// 未指定图标颜色时图标使用的类
    pub const ICON_CLASS: &str = "text-white";
    /// 右侧图标容器宽度（px）
    pub const TRAILING_WIDTH_PX: f32 = 32.0;
    /// 展开时文字左移距离（px）
    pub const LABEL_SHIFT_PX: f32 = 10.0;
    /// pulse 放大倍数
    pub const PULSE_SCALE: f32 = 1.1;

    pub const FILL_IN_ENTER: f32 = 0.25;
    pub const FILL_IN_LEAVE: f32 = 0.3;
    pub const FILL_UP_ENTER: f32 = 0.5;
    pub const FILL_UP_LEAVE: f32 = 0.3;
    pub const SLIDE_ENTER: f32 = 0.3;
    pub const SLIDE_LEAVE: f32 = 0.2;
    pub const PULSE_DURATION: f32 = 0.2;
    pub const REVEAL_DURATION: f32 = 0.2;
}

const fn track(
    target: AnimationTarget,
    property: TransformProperty,
    to: f32,
    duration: f32,
    easing: EasingFunction,
    offset: TimelineOffset,
) -> TrackSpec {
    TrackSpec {
        target,
        property,
        to,
        duration,
        easing,
        offset,
    }
}

const REVEAL_GEOMETRY: OverlayGeometry = OverlayGeometry {
    resting: &[
        PartValue::new(Overlay, TranslateX, Length::px(TRAILING_WIDTH_PX)),
        PartValue::new(Label, TranslateX, Length::px(0.0)),
    ],
    revealed: &[
        PartValue::new(Overlay, TranslateX, Length::px(0.0)),
        PartValue::new(Label, TranslateX, Length::px(-LABEL_SHIFT_PX)),
    ],
};

// 文字轨道与遮罩轨道完全重叠：相对遮罩结束时刻提前一个遮罩时长
const REVEAL_ENTER: &[TrackSpec] = &[
    track(
        Overlay,
        TranslateX,
        0.0,
        REVEAL_DURATION,
        EasingFunction::EaseOutQuad,
        TimelineOffset::AfterPrevious,
    ),
    track(
        Label,
        TranslateX,
        -LABEL_SHIFT_PX,
        REVEAL_DURATION,
        EasingFunction::EaseOutQuad,
        TimelineOffset::Relative(-REVEAL_DURATION),
    ),
];

const REVEAL_LEAVE: &[TrackSpec] = &[
    track(
        Overlay,
        TranslateX,
        TRAILING_WIDTH_PX,
        REVEAL_DURATION,
        EasingFunction::EaseInQuad,
        TimelineOffset::AfterPrevious,
    ),
    track(
        Label,
        TranslateX,
        0.0,
        REVEAL_DURATION,
        EasingFunction::EaseInQuad,
        TimelineOffset::Relative(-REVEAL_DURATION),
    ),
];

/// 效果表
pub static EFFECTS: &[EffectSpec] = &[
    EffectSpec {
        kind: EffectKind::FillIn,
        layout: OverlayLayout::Fill { origin: "top" },
        geometry: OverlayGeometry {
            resting: &[PartValue::new(Overlay, ScaleY, Length::number(0.0))],
            revealed: &[PartValue::new(Overlay, ScaleY, Length::number(1.0))],
        },
        enter: &[track(
            Overlay,
            ScaleY,
            1.0,
            FILL_IN_ENTER,
            EasingFunction::EaseOutQuad,
            TimelineOffset::AfterPrevious,
        )],
        leave: &[track(
            Overlay,
            ScaleY,
            0.0,
            FILL_IN_LEAVE,
            EasingFunction::EaseInQuart,
            TimelineOffset::AfterPrevious,
        )],
        requires_icon: false,
    },
    EffectSpec {
        kind: EffectKind::FillUp,
        layout: OverlayLayout::Fill { origin: "bottom" },
        geometry: OverlayGeometry {
            resting: &[
                PartValue::new(Overlay, ScaleY, Length::number(0.0)),
                PartValue::new(Overlay, TranslateY, Length::percent(100.0)),
            ],
            revealed: &[
                PartValue::new(Overlay, ScaleY, Length::number(1.0)),
                PartValue::new(Overlay, TranslateY, Length::percent(0.0)),
            ],
        },
        enter: &[
            track(
                Overlay,
                ScaleY,
                1.0,
                FILL_UP_ENTER,
                EasingFunction::EaseOutQuad,
                TimelineOffset::AfterPrevious,
            ),
            track(
                Overlay,
                TranslateY,
                0.0,
                FILL_UP_ENTER,
                EasingFunction::EaseOutQuad,
                TimelineOffset::At(0.0),
            ),
        ],
        leave: &[
            track(
                Overlay,
                ScaleY,
                0.0,
                FILL_UP_LEAVE,
                EasingFunction::EaseInCubic,
                TimelineOffset::AfterPrevious,
            ),
            track(
                Overlay,
                TranslateY,
                100.0,
                FILL_UP_LEAVE,
                EasingFunction::EaseInCubic,
                TimelineOffset::At(0.0),
            ),
        ],
        requires_icon: false,
    },
    EffectSpec {
        kind: EffectKind::Pulse,
        layout: OverlayLayout::None,
        geometry: OverlayGeometry {
            resting: &[PartValue::new(Root, Scale, Length::number(1.0))],
            revealed: &[PartValue::new(Root, Scale, Length::number(PULSE_SCALE))],
        },
        enter: &[track(
            Root,
            Scale,
            PULSE_SCALE,
            PULSE_DURATION,
            EasingFunction::EaseInOutQuad,
            TimelineOffset::AfterPrevious,
        )],
        leave: &[track(
            Root,
            Scale,
            1.0,
            PULSE_DURATION,
            EasingFunction::EaseInOutQuad,
            TimelineOffset::AfterPrevious,
        )],
        requires_icon: false,
    },
    EffectSpec {
        kind: EffectKind::Slide,
        layout: OverlayLayout::Fill { origin: "left" },
        geometry: OverlayGeometry {
            resting: &[PartValue::new(Overlay, TranslateX, Length::percent(-100.0))],
            revealed: &[PartValue::new(Overlay, TranslateX, Length::percent(0.0))],
        },
        enter: &[track(
            Overlay,
            TranslateX,
            0.0,
            SLIDE_ENTER,
            EasingFunction::EaseOutCubic,
            TimelineOffset::AfterPrevious,
        )],
        leave: &[track(
            Overlay,
            TranslateX,
            -100.0,
            SLIDE_LEAVE,
            EasingFunction::EaseInCubic,
            TimelineOffset::AfterPrevious,
        )],
        requires_icon: false,
    },
    EffectSpec {
        kind: EffectKind::RevealArrow,
        layout: OverlayLayout::Trailing {
            width_px: TRAILING_WIDTH_PX,
        },
        geometry: REVEAL_GEOMETRY,
        enter: REVEAL_ENTER,
        leave: REVEAL_LEAVE,
        requires_icon: false,
    },
    EffectSpec {
        kind: EffectKind::RevealIcon,
        layout: OverlayLayout::Trailing {
            width_px: TRAILING_WIDTH_PX,
        },
        geometry: REVEAL_GEOMETRY,
        enter: REVEAL_ENTER,
        leave: REVEAL_LEAVE,
        requires_icon: true,
    },
];
