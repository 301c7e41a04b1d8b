//! # System 模块
//!
//! 动画系统：持有已注册对象和正在运行的时间轴，按帧推进并把数值直接写回对象。
//!
//! ```rust,ignore
//! let overlay_id = system.register(overlay.clone());
//! let handle = system.play(
//!     Timeline::new().add(
//!         Track::to(overlay_id, TransformProperty::ScaleY, 1.0, 0.25),
//!         TimelineOffset::AfterPrevious,
//!     ),
//! )?;
//!
//! // 每帧
//! for event in system.update(dt) { /* ... */ }
//!
//! // 中止：数值停在当前位置，完成回调不会被调用
//! system.halt(handle);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::traits::{AnimPropertyKey, Animatable, ObjectId};
use super::tween::Tween;
use super::{AnimationEvent, Timeline, TransformProperty};
use crate::error::AnimationError;

/// 动画句柄
///
/// 标识一条正在运行的时间轴。时间轴完成或被中止后句柄失效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 运行中的轨道
struct RunningTrack {
    key: AnimPropertyKey,
    tween: Tween,
}

/// 运行中的时间轴
struct RunningTimeline {
    handle: AnimationHandle,
    tracks: Vec<RunningTrack>,
    paused: bool,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl RunningTimeline {
    fn is_finished(&self) -> bool {
        self.tracks.iter().all(|t| t.tween.is_finished())
    }
}

/// 动画系统
///
/// 只负责时间轴管理：
/// 1. 知道某个属性要在多长时间内从 A 变到 B
/// 2. 通过 `Animatable` 直接写回对象属性
/// 3. 保证同一属性同一时刻只被一条轨道驱动
pub struct AnimationSystem {
    /// 已注册的对象
    objects: HashMap<ObjectId, Rc<dyn Animatable>>,
    /// 运行中的时间轴（按启动顺序）
    timelines: Vec<RunningTimeline>,
    next_handle: u64,
    next_object_id: u64,
    /// 待取走的事件
    events: Vec<AnimationEvent>,
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AnimationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationSystem")
            .field("objects", &self.objects.len())
            .field("timelines", &self.timelines.len())
            .finish()
    }
}

impl AnimationSystem {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            timelines: Vec::new(),
            next_handle: 1,
            next_object_id: 1,
            events: Vec::new(),
        }
    }

    // ========== 对象管理 ==========

    /// 注册可动画对象，返回系统分配的 `ObjectId`
    pub fn register<T: Animatable>(&mut self, object: Rc<T>) -> ObjectId {
        let id = ObjectId::new(self.next_object_id);
        self.next_object_id += 1;
        self.objects.insert(id, object as Rc<dyn Animatable>);
        id
    }

    /// 注销对象
    ///
    /// 该对象上的轨道一并移除；因此变空的时间轴视为被中止。
    pub fn unregister(&mut self, object_id: ObjectId) {
        self.objects.remove(&object_id);
        for timeline in &mut self.timelines {
            timeline.tracks.retain(|t| t.key.object_id != object_id);
        }
        self.drop_empty_timelines();
    }

    pub fn is_registered(&self, object_id: ObjectId) -> bool {
        self.objects.contains_key(&object_id)
    }

    pub fn registered_count(&self) -> usize {
        self.objects.len()
    }

    // ========== 时间轴控制 ==========

    /// 启动时间轴
    ///
    /// 所有轨道先校验（对象已注册、属性存在），任何一条失败则整条时间轴不启动。
    /// 未指定起始值的轨道从属性当前值开始。
    /// 其它时间轴上驱动相同属性的轨道会被移除。
    pub fn play(&mut self, timeline: Timeline) -> Result<AnimationHandle, AnimationError> {
        let (scheduled, on_complete) = timeline.into_parts();

        let mut tracks = Vec::with_capacity(scheduled.len());
        for item in scheduled {
            let track = item.track;
            let object = self.objects.get(&track.object_id).ok_or(
                AnimationError::ObjectNotRegistered {
                    object_id: track.object_id,
                },
            )?;
            let current = object.get_property(track.property).ok_or(
                AnimationError::UnknownProperty {
                    object_id: track.object_id,
                    property: track.property,
                },
            )?;

            let tween = Tween::new(track.from.unwrap_or(current), track.to, track.duration)
                .with_easing(track.easing)
                .with_delay(item.start);
            tracks.push(RunningTrack {
                key: AnimPropertyKey::new(track.object_id, track.property),
                tween,
            });
        }

        // 接管属性
        for track in &tracks {
            for timeline in &mut self.timelines {
                timeline.tracks.retain(|t| t.key != track.key);
            }
        }
        self.drop_empty_timelines();

        // 无延迟的轨道立即写入起始值
        for track in tracks.iter().filter(|t| t.tween.delay <= 0.0) {
            self.apply(track.key, track.tween.current_value());
        }

        let handle = AnimationHandle(self.next_handle);
        self.next_handle += 1;
        self.timelines.push(RunningTimeline {
            handle,
            tracks,
            paused: false,
            on_complete,
        });
        self.events.push(AnimationEvent::Started(handle));

        Ok(handle)
    }

    /// 中止时间轴
    ///
    /// 同步生效：属性停在当前值，完成回调被丢弃。句柄不存在时返回 `false`。
    pub fn halt(&mut self, handle: AnimationHandle) -> bool {
        match self.timelines.iter().position(|t| t.handle == handle) {
            Some(index) => {
                self.timelines.remove(index);
                self.events.push(AnimationEvent::Halted(handle));
                true
            }
            None => false,
        }
    }

    /// 暂停时间轴（时间不再推进，句柄仍然有效）
    pub fn pause(&mut self, handle: AnimationHandle) -> Result<(), AnimationError> {
        let timeline = self.timeline_mut(handle)?;
        timeline.paused = true;
        timeline.tracks.iter_mut().for_each(|t| t.tween.pause());
        Ok(())
    }

    /// 恢复被暂停的时间轴
    pub fn resume(&mut self, handle: AnimationHandle) -> Result<(), AnimationError> {
        let timeline = self.timeline_mut(handle)?;
        timeline.paused = false;
        timeline.tracks.iter_mut().for_each(|t| t.tween.resume());
        Ok(())
    }

    /// 推进所有时间轴
    ///
    /// 自然结束的时间轴在这里移除并调用完成回调，返回本次累积的事件。
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        for timeline in &mut self.timelines {
            if timeline.paused {
                continue;
            }
            for track in &mut timeline.tracks {
                if !track.tween.is_active() {
                    continue;
                }
                track.tween.update(dt);
                if track.tween.has_started()
                    && let Some(object) = self.objects.get(&track.key.object_id)
                {
                    object.set_property(track.key.property, track.tween.current_value());
                }
            }
        }

        let mut callbacks = Vec::new();
        let mut index = 0;
        while index < self.timelines.len() {
            if !self.timelines[index].paused && self.timelines[index].is_finished() {
                let finished = self.timelines.remove(index);
                self.events.push(AnimationEvent::Completed(finished.handle));
                if let Some(callback) = finished.on_complete {
                    callbacks.push(callback);
                }
            } else {
                index += 1;
            }
        }

        for callback in callbacks {
            callback();
        }

        std::mem::take(&mut self.events)
    }

    /// 中止全部时间轴（卸载时使用）
    pub fn clear(&mut self) {
        for timeline in self.timelines.drain(..) {
            self.events.push(AnimationEvent::Halted(timeline.handle));
        }
    }

    /// 取走尚未返回的事件
    pub fn drain_events(&mut self) -> Vec<AnimationEvent> {
        std::mem::take(&mut self.events)
    }

    // ========== 查询方法 ==========

    /// 句柄是否仍在运行（包括暂停中）
    pub fn is_live(&self, handle: AnimationHandle) -> bool {
        self.timelines.iter().any(|t| t.handle == handle)
    }

    pub fn is_paused(&self, handle: AnimationHandle) -> bool {
        self.timelines
            .iter()
            .any(|t| t.handle == handle && t.paused)
    }

    /// 运行中的时间轴数量
    pub fn live_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn has_active_animations(&self) -> bool {
        !self.timelines.is_empty()
    }

    /// 时间轴正在驱动的属性
    pub fn live_keys(&self, handle: AnimationHandle) -> Vec<AnimPropertyKey> {
        self.timelines
            .iter()
            .filter(|t| t.handle == handle)
            .flat_map(|t| t.tracks.iter().map(|track| track.key))
            .collect()
    }

    /// 读取对象属性的当前值
    pub fn get_property(&self, object_id: ObjectId, property: TransformProperty) -> Option<f32> {
        self.objects.get(&object_id)?.get_property(property)
    }

    /// 直接设置对象属性（不经过动画）
    pub fn set_property(
        &mut self,
        object_id: ObjectId,
        property: TransformProperty,
        value: f32,
    ) -> bool {
        self.objects
            .get(&object_id)
            .is_some_and(|o| o.set_property(property, value))
    }

    // ========== 内部 ==========

    fn apply(&self, key: AnimPropertyKey, value: f32) {
        if let Some(object) = self.objects.get(&key.object_id) {
            object.set_property(key.property, value);
        }
    }

    fn timeline_mut(
        &mut self,
        handle: AnimationHandle,
    ) -> Result<&mut RunningTimeline, AnimationError> {
        self.timelines
            .iter_mut()
            .find(|t| t.handle == handle)
            .ok_or(AnimationError::UnknownHandle { handle })
    }

    /// 轨道被抢占或对象被注销后变空的时间轴按中止处理
    fn drop_empty_timelines(&mut self) {
        let events = &mut self.events;
        self.timelines.retain(|t| {
            if t.tracks.is_empty() {
                events.push(AnimationEvent::Halted(t.handle));
                false
            } else {
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{EasingFunction, Length, TimelineOffset, Track, Transform};
    use std::cell::{Cell, RefCell};

    /// 测试用的可动画对象
    struct TestPart {
        transform: RefCell<Transform>,
    }

    impl TestPart {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                transform: RefCell::new(
                    Transform::identity()
                        .with(TransformProperty::TranslateX, Length::px(32.0))
                        .with(TransformProperty::Scale, Length::number(1.0)),
                ),
            })
        }

        fn value(&self, property: TransformProperty) -> f32 {
            self.transform.borrow().value(property).unwrap_or(f32::NAN)
        }
    }

    impl Animatable for TestPart {
        fn get_property(&self, property: TransformProperty) -> Option<f32> {
            self.transform.borrow().value(property)
        }

        fn set_property(&self, property: TransformProperty, value: f32) -> bool {
            self.transform.borrow_mut().set_value(property, value)
        }

        fn property_list(&self) -> Vec<TransformProperty> {
            self.transform.borrow().properties()
        }
    }

    fn slide_in(id: ObjectId) -> Timeline {
        Timeline::new().add(
            Track::to(id, TransformProperty::TranslateX, 0.0, 0.2)
                .with_easing(EasingFunction::Linear),
            TimelineOffset::AfterPrevious,
        )
    }

    #[test]
    fn test_register_and_unregister() {
        let mut system = AnimationSystem::new();
        let id1 = system.register(TestPart::new());
        let id2 = system.register(TestPart::new());

        assert_ne!(id1, id2);
        assert_eq!(system.registered_count(), 2);

        system.unregister(id1);
        assert!(!system.is_registered(id1));
        assert!(system.is_registered(id2));
    }

    #[test]
    fn test_play_runs_to_completion() {
        let mut system = AnimationSystem::new();
        let part = TestPart::new();
        let id = system.register(part.clone());

        let handle = system.play(slide_in(id)).unwrap();
        assert!(system.is_live(handle));

        let events = system.update(0.1);
        assert_eq!(events, vec![AnimationEvent::Started(handle)]);
        assert!((part.value(TransformProperty::TranslateX) - 16.0).abs() < 1e-3);

        let events = system.update(0.15);
        assert_eq!(events, vec![AnimationEvent::Completed(handle)]);
        assert_eq!(part.value(TransformProperty::TranslateX), 0.0);
        assert!(!system.is_live(handle));
    }

    #[test]
    fn test_completion_callback_runs_once() {
        let mut system = AnimationSystem::new();
        let id = system.register(TestPart::new());
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        system
            .play(slide_in(id).on_complete(move || counter.set(counter.get() + 1)))
            .unwrap();

        system.update(0.5);
        system.update(0.5);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_halt_keeps_value_and_drops_callback() {
        let mut system = AnimationSystem::new();
        let part = TestPart::new();
        let id = system.register(part.clone());
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let handle = system
            .play(slide_in(id).on_complete(move || counter.set(counter.get() + 1)))
            .unwrap();
        system.update(0.1);
        let halfway = part.value(TransformProperty::TranslateX);

        assert!(system.halt(handle));
        assert!(!system.halt(handle));

        let events = system.update(1.0);
        assert_eq!(events, vec![AnimationEvent::Halted(handle)]);
        assert_eq!(part.value(TransformProperty::TranslateX), halfway);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_explicit_from_value_is_applied_immediately() {
        let mut system = AnimationSystem::new();
        let part = TestPart::new();
        let id = system.register(part.clone());

        system
            .play(Timeline::new().add(
                Track::to(id, TransformProperty::Scale, 1.1, 0.2).from(0.5),
                TimelineOffset::AfterPrevious,
            ))
            .unwrap();
        assert_eq!(part.value(TransformProperty::Scale), 0.5);
    }

    #[test]
    fn test_delayed_track_waits() {
        let mut system = AnimationSystem::new();
        let part = TestPart::new();
        let id = system.register(part.clone());

        system
            .play(Timeline::new().add(
                Track::to(id, TransformProperty::Scale, 2.0, 0.2),
                TimelineOffset::At(0.3),
            ))
            .unwrap();

        system.update(0.2);
        assert_eq!(part.value(TransformProperty::Scale), 1.0);

        system.update(0.4);
        assert_eq!(part.value(TransformProperty::Scale), 2.0);
    }

    #[test]
    fn test_new_timeline_takes_over_property() {
        let mut system = AnimationSystem::new();
        let part = TestPart::new();
        let id = system.register(part.clone());

        let first = system.play(slide_in(id)).unwrap();
        system.update(0.1);
        let second = system.play(slide_in(id)).unwrap();

        // 第一条时间轴失去唯一的轨道，被视为中止
        assert!(!system.is_live(first));
        assert!(system.is_live(second));
        assert_eq!(system.live_count(), 1);

        let events = system.drain_events();
        assert!(events.contains(&AnimationEvent::Halted(first)));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut system = AnimationSystem::new();
        let part = TestPart::new();
        let id = system.register(part.clone());

        let handle = system.play(slide_in(id)).unwrap();
        system.update(0.1);
        system.pause(handle).unwrap();
        assert!(system.is_paused(handle));

        let frozen = part.value(TransformProperty::TranslateX);
        system.update(1.0);
        assert_eq!(part.value(TransformProperty::TranslateX), frozen);
        assert!(system.is_live(handle));

        system.resume(handle).unwrap();
        system.update(1.0);
        assert_eq!(part.value(TransformProperty::TranslateX), 0.0);
        assert!(!system.is_live(handle));
    }

    #[test]
    fn test_play_rejects_invalid_tracks() {
        let mut system = AnimationSystem::new();
        let id = system.register(TestPart::new());

        let result = system.play(Timeline::new().add(
            Track::to(id, TransformProperty::ScaleY, 1.0, 0.2),
            TimelineOffset::AfterPrevious,
        ));
        assert_eq!(
            result,
            Err(AnimationError::UnknownProperty {
                object_id: id,
                property: TransformProperty::ScaleY,
            })
        );

        let missing = ObjectId::new(999);
        assert!(matches!(
            system.play(slide_in(missing)),
            Err(AnimationError::ObjectNotRegistered { .. })
        ));
        assert_eq!(system.live_count(), 0);
    }

    #[test]
    fn test_unknown_handle() {
        let mut system = AnimationSystem::new();
        let id = system.register(TestPart::new());
        let handle = system.play(slide_in(id)).unwrap();
        system.update(1.0);

        assert_eq!(
            system.pause(handle),
            Err(AnimationError::UnknownHandle { handle })
        );
    }

    #[test]
    fn test_clear_halts_everything() {
        let mut system = AnimationSystem::new();
        let id = system.register(TestPart::new());
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        system
            .play(slide_in(id).on_complete(move || counter.set(counter.get() + 1)))
            .unwrap();
        system.clear();

        assert!(!system.has_active_animations());
        system.update(1.0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_unregister_removes_tracks() {
        let mut system = AnimationSystem::new();
        let id = system.register(TestPart::new());
        let handle = system.play(slide_in(id)).unwrap();

        system.unregister(id);
        assert!(!system.is_live(handle));
        assert!(system.live_keys(handle).is_empty());
    }

    #[test]
    fn test_empty_timeline_completes_on_next_update() {
        let mut system = AnimationSystem::new();
        let handle = system.play(Timeline::new()).unwrap();

        let events = system.update(0.0);
        assert!(events.contains(&AnimationEvent::Completed(handle)));
    }
}
