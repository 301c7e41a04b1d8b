//! # Element 模块
//!
//! 带悬停过渡的行动元素（按钮或包装的链接）。
//!
//! ## 生命周期
//!
//! ```text
//! new() ──mount()──> Mounted ──unmount()/drop──> Unmounted
//! ```
//!
//! - 挂载时为可用效果挂上 enter/leave 两个监听
//! - 卸载时中止进行中的过渡（完成回调不会执行）并摘除监听
//!
//! ## 过渡
//!
//! 每个实例拥有独立的 [`AnimationSystem`]，同一时间最多一个活动句柄。
//! 新的指针事件先同步中止旧句柄，再从各属性的当前值出发播放新时间轴。

mod interaction;
mod part;
mod progressive;
mod props;


use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::animation::{
    AnimationEvent, AnimationHandle, AnimationSystem, ObjectId, Timeline, Track, Transform,
};
use crate::effect::{AnimationTarget, EffectKind, EffectSpec, OverlayLayout, TrackSpec};
use crate::error::{UiError, UiResult};
use crate::markup::{
    AnchorLink, Element, IconContent, LinkAttrs, LinkPrimitive, Node, Style, arrow_icon,
};
use crate::style::{Theme, class_list, interactive_classes};

pub use interaction::{InteractionState, PointerEvent, TransitionPhase};
pub use part::VisualPart;
pub use progressive::{ProgressiveButton, RenderMode};
pub use props::ElementProps;

/// 文字节点的类
pub const LABEL_CLASSES: &str = "relative z-10 button-text";
/// 铺满型遮罩的类
pub const FILL_OVERLAY_CLASSES: &str = "absolute inset-0 pointer-events-none transform";
/// 内置箭头尺寸类
pub const ARROW_ICON_CLASSES: &str = "w-4 h-4";

/// 生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

struct PartSlot {
    id: ObjectId,
    part: Rc<VisualPart>,
}

/// 带悬停过渡的行动元素
pub struct AnimatedActionElement {
    props: ElementProps,
    theme: Theme,
    /// 可用的效果；`None` 表示静态（无遮罩、无监听）
    effect: Option<&'static EffectSpec>,
    system: AnimationSystem,
    parts: Vec<PartSlot>,
    interaction: Rc<RefCell<InteractionState>>,
    live: Option<AnimationHandle>,
    listeners: Vec<PointerEvent>,
    lifecycle: Lifecycle,
}

impl AnimatedActionElement {
    pub fn new(props: ElementProps) -> Self {
        Self::with_theme(props, Theme::default())
    }

    pub fn with_theme(props: ElementProps, theme: Theme) -> Self {
        let effect = active_effect(&props);
        let mut system = AnimationSystem::new();
        let mut parts = Vec::new();

        if let Some(spec) = effect {
            for target in spec.geometry.targets() {
                let part = VisualPart::new(target, spec.geometry.resting_transform(target));
                let id = system.register(part.clone());
                parts.push(PartSlot { id, part });
            }
        }

        Self {
            props,
            theme,
            effect,
            system,
            parts,
            interaction: Rc::new(RefCell::new(InteractionState::default())),
            live: None,
            listeners: Vec::new(),
            lifecycle: Lifecycle::Created,
        }
    }

    // ========== 生命周期 ==========

    /// 挂载：为可用效果挂上监听
    pub fn mount(&mut self) {
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Mounted => return,
            Lifecycle::Unmounted => {
                warn!(label = %self.props.label, "元素已卸载，忽略重新挂载");
                return;
            }
        }

        self.lifecycle = Lifecycle::Mounted;
        if let Some(spec) = self.effect {
            self.listeners = vec![PointerEvent::Enter, PointerEvent::Leave];
            debug!(effect = %spec.kind, label = %self.props.label, "挂载悬停监听");
        }
    }

    /// 卸载：中止进行中的过渡并摘除监听，可重复调用
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }

        if let Some(handle) = self.live.take() {
            self.system.halt(handle);
            trace!(handle = %handle, "卸载时中止过渡");
        }
        self.system.clear();
        self.listeners.clear();
        self.interaction.borrow_mut().abandon();
        self.lifecycle = Lifecycle::Unmounted;
    }

    // ========== 事件 ==========

    /// 派发指针事件，没有对应监听时返回 `false`
    pub fn dispatch(&mut self, event: PointerEvent) -> bool {
        if !self.listeners.contains(&event) {
            return false;
        }

        match self.start_transition(event) {
            Ok(handle) => {
                trace!(event = %event, handle = %handle, "开始过渡");
                true
            }
            Err(e) => {
                warn!(error = %e, event = %event, "启动过渡失败，保持静态样式");
                self.interaction.borrow_mut().abandon();
                false
            }
        }
    }

    fn start_transition(&mut self, event: PointerEvent) -> UiResult<AnimationHandle> {
        let Some(spec) = self.effect else {
            return Err(UiError::MissingPart {
                effect: self.props.effect,
                target: AnimationTarget::Overlay,
            });
        };

        // 先中止，再开始
        if let Some(previous) = self.live.take() {
            self.system.halt(previous);
        }

        let tracks = match event {
            PointerEvent::Enter => spec.enter,
            PointerEvent::Leave => spec.leave,
        };
        let timeline = self.build_timeline(spec, tracks)?;

        self.interaction.borrow_mut().begin(event);
        let handle = self.system.play(timeline)?;
        self.live = Some(handle);
        Ok(handle)
    }

    fn build_timeline(&self, spec: &EffectSpec, tracks: &[TrackSpec]) -> UiResult<Timeline> {
        let mut timeline = Timeline::new();
        for track in tracks {
            let id = self
                .part_slot(track.target)
                .map(|slot| slot.id)
                .ok_or(UiError::MissingPart {
                    effect: spec.kind,
                    target: track.target,
                })?;
            timeline = timeline.add(
                Track::to(id, track.property, track.to, track.duration).with_easing(track.easing),
                track.offset,
            );
        }

        let interaction = Rc::downgrade(&self.interaction);
        Ok(timeline.on_complete(move || {
            if let Some(interaction) = interaction.upgrade() {
                interaction.borrow_mut().complete();
            }
        }))
    }

    /// 推进动画，返回本帧的动画事件
    pub fn tick(&mut self, dt: f32) -> Vec<AnimationEvent> {
        if self.lifecycle != Lifecycle::Mounted {
            return Vec::new();
        }

        let events = self.system.update(dt);
        if let Some(handle) = self.live
            && !self.system.is_live(handle)
        {
            self.live = None;
        }
        events
    }

    // ========== 查询 ==========

    pub fn props(&self) -> &ElementProps {
        &self.props
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// 实际生效的效果（未知名称、reveal-icon 缺图标时为 `None`）
    pub fn effect(&self) -> EffectKind {
        self.effect.map(|spec| spec.kind).unwrap_or_default()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.interaction.borrow().phase
    }

    pub fn is_animating(&self) -> bool {
        self.interaction.borrow().in_flight
    }

    pub fn live_handle(&self) -> Option<AnimationHandle> {
        self.live
    }

    /// 正在运行的时间轴数量（不超过 1）
    pub fn live_animation_count(&self) -> usize {
        self.system.live_count()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// 部件当前变换
    pub fn transform(&self, target: AnimationTarget) -> Option<Transform> {
        self.part_slot(target).map(|slot| slot.part.transform())
    }

    /// 部件当前变换的 CSS
    pub fn transform_css(&self, target: AnimationTarget) -> Option<String> {
        self.part_slot(target).map(|slot| slot.part.css())
    }

    /// 各部件是否都处于静止状态
    pub fn is_at_rest(&self) -> bool {
        match self.effect {
            Some(spec) => self.parts.iter().all(|slot| {
                slot.part.transform() == spec.geometry.resting_transform(slot.part.target())
            }),
            None => true,
        }
    }

    fn part_slot(&self, target: AnimationTarget) -> Option<&PartSlot> {
        self.parts.iter().find(|slot| slot.part.target() == target)
    }

    // ========== 渲染 ==========

    pub fn render(&self) -> Node {
        self.render_with(&AnchorLink)
    }

    /// 用指定的导航元素渲染
    pub fn render_with(&self, link: &dyn LinkPrimitive) -> Node {
        let mut style = base_style(&self.props);
        if let Some(css) = self.transform_css(AnimationTarget::Root) {
            style.set("transform", css);
        }

        let mut root = shell(&self.props, link)
            .attr(
                "class",
                interactive_classes(
                    self.props.variant,
                    self.props.size,
                    caller_classes(&self.props).as_deref(),
                ),
            )
            .opt_attr("style", style.to_attr());
        pass_through(&mut root, &self.props);

        let mut label = Element::new("span")
            .attr("class", LABEL_CLASSES)
            .attr("data-part", "label");
        if let Some(css) = self.transform_css(AnimationTarget::Label) {
            label.set_attr("style", format!("transform: {}", css));
        }
        root = root.child(label.child(Node::text(self.props.label.as_str())));

        if let Some(overlay) = self.render_overlay() {
            root = root.child(overlay);
        }
        root.into()
    }

    fn render_overlay(&self) -> Option<Element> {
        let spec = self.effect?;
        let hover_color = self
            .props
            .hover_color
            .as_deref()
            .unwrap_or(&self.theme.hover_color);
        let transform = self.transform_css(AnimationTarget::Overlay)?;
        let icon_color = self.props.icon_color.as_deref();

        let overlay = match spec.layout {
            OverlayLayout::None => return None,
            OverlayLayout::Fill { origin } => Element::new("div")
                .attr("class", FILL_OVERLAY_CLASSES)
                .attr("data-part", "overlay")
                .attr(
                    "style",
                    Style::new()
                        .with("background-color", hover_color)
                        .with("transform", transform)
                        .with("transform-origin", origin)
                        .to_attr()
                        .unwrap_or_default(),
                ),
            OverlayLayout::Trailing { width_px } => {
                let icon = match spec.kind {
                    EffectKind::RevealIcon => self.props.icon.as_ref()?.colored(icon_color),
                    _ => {
                        let class = match icon_color {
                            Some(_) => ARROW_ICON_CLASSES.to_string(),
                            None => class_list([ARROW_ICON_CLASSES, self.theme.icon_class.as_str()]),
                        };
                        IconContent::node(arrow_icon(&class)).colored(icon_color)
                    }
                };
                Element::new("div")
                    .attr(
                        "class",
                        format!(
                            "absolute top-0 right-0 h-full w-[{w}px] flex items-center justify-center transform translate-x-[{w}px]",
                            w = width_px
                        ),
                    )
                    .attr("data-part", "overlay")
                    .attr(
                        "style",
                        Style::new()
                            .with("background-color", hover_color)
                            .with("transform", transform)
                            .to_attr()
                            .unwrap_or_default(),
                    )
                    .child(icon)
            }
        };
        Some(overlay)
    }
}

impl Drop for AnimatedActionElement {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for AnimatedActionElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedActionElement")
            .field("label", &self.props.label)
            .field("effect", &self.effect())
            .field("lifecycle", &self.lifecycle)
            .field("phase", &self.phase())
            .field("live", &self.live)
            .finish()
    }
}

/// 可用的效果
///
/// reveal-icon 没有图标时遮罩目标不存在，整个效果禁用。
fn active_effect(props: &ElementProps) -> Option<&'static EffectSpec> {
    let spec = props.effect.spec()?;
    if spec.requires_icon && props.icon.is_none() {
        debug!(effect = %spec.kind, "未提供图标，禁用悬停效果");
        return None;
    }
    Some(spec)
}

/// 由元素自己计算、透传属性不能整体覆盖的属性
const MERGED_ATTRS: [&str; 3] = ["class", "style", "href"];

/// 外壳元素：有 href 时交给导航元素，否则渲染原生按钮
pub(crate) fn shell(props: &ElementProps, link: &dyn LinkPrimitive) -> Element {
    match &props.href {
        Some(href) => link.link(&LinkAttrs::new(
            href.as_str(),
            props.target.clone(),
            props.rel.clone(),
        )),
        None => Element::new("button").attr("type", "button"),
    }
}

/// 调用方类：`class_name` 加上透传的 `class`
pub(crate) fn caller_classes(props: &ElementProps) -> Option<String> {
    let classes = class_list([
        props.class_name.as_deref().unwrap_or(""),
        props.attrs.get("class").map(String::as_str).unwrap_or(""),
    ]);
    (!classes.is_empty()).then_some(classes)
}

/// 调用方样式 + 透传的 `style` + 背景色
pub(crate) fn base_style(props: &ElementProps) -> Style {
    let mut style = Style::new();
    for (name, value) in &props.style {
        style.set(name.as_str(), value.as_str());
    }
    if let Some(css) = props.attrs.get("style") {
        style.merge_css(css);
    }
    if let Some(bg) = &props.bg_color {
        style.set("background-color", bg.as_str());
    }
    style
}

/// 透传属性覆盖同名属性（如按钮的 `type`）
///
/// `class`、`style` 已在计算时合并；`href` 由 `href` 输入和导航元素决定。
pub(crate) fn pass_through(element: &mut Element, props: &ElementProps) {
    for (name, value) in &props.attrs {
        if MERGED_ATTRS.contains(&name.as_str()) {
            continue;
        }
        element.set_attr(name.as_str(), value.as_str());
    }
}
