//! # Tween 模块
//!
//! 单个 f32 值的补间：在 `duration` 秒内从 `from` 变化到 `to`。
//! 时间轴里的每条轨道对应一个 Tween，轨道偏移量体现为 `delay`。

use super::EasingFunction;

/// 补间状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenState {
    /// 等待开始（延迟中）
    #[default]
    Pending,
    /// 正在播放
    Playing,
    /// 已完成
    Completed,
}

impl TweenState {
    /// 是否为活跃状态（需要更新）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Playing)
    }
}

/// 补间实例
#[derive(Debug, Clone)]
pub struct Tween {
    /// 起始值
    pub from: f32,
    /// 目标值
    pub to: f32,
    /// 时长（秒）
    pub duration: f32,
    /// 延迟启动（秒）
    pub delay: f32,
    /// 缓动函数
    pub easing: EasingFunction,
    /// 当前状态
    pub state: TweenState,
    /// 当前进度（0.0 - 1.0，已应用缓动）
    pub progress: f32,
    /// 暂停时不推进时间，但保留状态
    paused: bool,
    /// 当前阶段（延迟或播放）已经过的时间
    elapsed: f32,
}

impl Tween {
    /// 创建补间
    ///
    /// 时长为 0 时直接进入完成状态。
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        let state = if duration <= 0.0 {
            TweenState::Completed
        } else {
            TweenState::Pending
        };

        Self {
            from,
            to,
            duration: duration.max(0.0),
            delay: 0.0,
            easing: EasingFunction::default(),
            state,
            progress: if state == TweenState::Completed { 1.0 } else { 0.0 },
            paused: false,
            elapsed: 0.0,
        }
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 设置延迟
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// 推进时间
    ///
    /// 返回 `true` 表示仍在进行中。延迟结束后剩余的时间会计入播放阶段。
    pub fn update(&mut self, dt: f32) -> bool {
        if self.paused {
            return self.state.is_active();
        }

        match self.state {
            TweenState::Pending => {
                self.elapsed += dt;
                if self.elapsed >= self.delay {
                    self.state = TweenState::Playing;
                    self.elapsed -= self.delay;
                    self.update_playing()
                } else {
                    true
                }
            }
            TweenState::Playing => {
                self.elapsed += dt;
                self.update_playing()
            }
            TweenState::Completed => false,
        }
    }

    fn update_playing(&mut self) -> bool {
        let raw_progress = self.elapsed / self.duration;
        if raw_progress >= 1.0 {
            self.finish();
            false
        } else {
            self.progress = self.easing.apply(raw_progress);
            true
        }
    }

    /// 直接跳到终点
    pub fn finish(&mut self) {
        self.progress = 1.0;
        self.state = TweenState::Completed;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// 是否已经开始（延迟已结束）
    pub fn has_started(&self) -> bool {
        self.state != TweenState::Pending
    }

    /// 当前值
    ///
    /// 完成时精确返回 `to`，不受浮点误差影响。
    pub fn current_value(&self) -> f32 {
        if self.state == TweenState::Completed {
            self.to
        } else {
            self.from + (self.to - self.from) * self.progress
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn is_finished(&self) -> bool {
        self.state == TweenState::Completed
    }
}
