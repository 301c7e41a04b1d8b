//! # Timeline 模块
//!
//! 把多条属性轨道按相对偏移组合成一次完整的过渡。
//!
//! 偏移语义：
//! - `AfterPrevious`：紧接上一条轨道结束（第一条轨道从 0 开始）
//! - `Relative(d)`：相对上一条轨道结束时刻偏移 `d` 秒，负数表示重叠
//! - `At(t)`：从时间轴的绝对时刻 `t` 开始
//!
//! ```rust,ignore
//! // 遮罩滑入，同时文字左移（文字轨道与遮罩完全重叠）
//! let timeline = Timeline::new()
//!     .add(Track::to(overlay, TransformProperty::TranslateX, 0.0, 0.2), TimelineOffset::AfterPrevious)
//!     .add(Track::to(label, TransformProperty::TranslateX, -10.0, 0.2), TimelineOffset::Relative(-0.2))
//!     .on_complete(|| println!("done"));
//! ```

use std::fmt;

use super::{EasingFunction, ObjectId, TransformProperty};

/// 轨道偏移
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineOffset {
    /// 紧接上一条轨道
    AfterPrevious,
    /// 相对上一条轨道结束时刻（秒，可为负）
    Relative(f32),
    /// 绝对时刻（秒）
    At(f32),
}

/// 单条属性轨道
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// 目标对象
    pub object_id: ObjectId,
    /// 目标属性
    pub property: TransformProperty,
    /// 起始值，`None` 表示从属性当前值开始
    pub from: Option<f32>,
    /// 目标值
    pub to: f32,
    /// 时长（秒）
    pub duration: f32,
    /// 缓动函数
    pub easing: EasingFunction,
}

impl Track {
    /// 从当前值过渡到 `to`
    pub fn to(object_id: ObjectId, property: TransformProperty, to: f32, duration: f32) -> Self {
        Self {
            object_id,
            property,
            from: None,
            to,
            duration,
            easing: EasingFunction::default(),
        }
    }

    /// 指定起始值
    pub fn from(mut self, from: f32) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }
}

/// 已排定开始时刻的轨道
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTrack {
    pub track: Track,
    /// 相对时间轴起点的开始时刻（秒）
    pub start: f32,
}

impl ScheduledTrack {
    pub fn end(&self) -> f32 {
        self.start + self.track.duration.max(0.0)
    }
}

/// 时间轴
///
/// 只描述"要做什么"，交给 `AnimationSystem::play` 之后才开始运行。
#[derive(Default)]
pub struct Timeline {
    tracks: Vec<ScheduledTrack>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("tracks", &self.tracks)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加轨道
    ///
    /// 开始时刻在添加时立即确定，结果不会小于 0。
    pub fn add(mut self, track: Track, offset: TimelineOffset) -> Self {
        let previous_end = self.tracks.last().map(ScheduledTrack::end).unwrap_or(0.0);
        let start = match offset {
            TimelineOffset::AfterPrevious => previous_end,
            TimelineOffset::Relative(delta) => previous_end + delta,
            TimelineOffset::At(at) => at,
        }
        .max(0.0);

        self.tracks.push(ScheduledTrack { track, start });
        self
    }

    /// 设置完成回调
    ///
    /// 只在时间轴自然结束时调用一次；被中止（halt）时回调直接丢弃。
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// 时间轴总时长（秒）
    pub fn duration(&self) -> f32 {
        self.tracks
            .iter()
            .map(ScheduledTrack::end)
            .fold(0.0, f32::max)
    }

    pub fn tracks(&self) -> &[ScheduledTrack] {
        &self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// 拆分为轨道和回调（供 AnimationSystem 使用）
    pub(crate) fn into_parts(self) -> (Vec<ScheduledTrack>, Option<Box<dyn FnOnce()>>) {
        (self.tracks, self.on_complete)
    }
}
