//! # 渐进增强
//!
//! 首次渲染输出普通链接（无监听、无遮罩、无动画），
//! `hydrate()` 之后一次性、单向切换为可交互元素。

use tracing::debug;

use super::{
    AnimatedActionElement, ElementProps, PointerEvent, base_style, caller_classes, pass_through,
    shell,
};
use crate::animation::AnimationEvent;
use crate::markup::{AnchorLink, LinkPrimitive, Node};
use crate::style::{Theme, static_classes};

/// 渲染模式
#[derive(Debug)]
pub enum RenderMode {
    /// 水合前
    Static,
    /// 水合后
    Interactive(Box<AnimatedActionElement>),
}

/// 渐进增强的行动元素
#[derive(Debug)]
pub struct ProgressiveButton {
    props: ElementProps,
    theme: Theme,
    mode: RenderMode,
    torn_down: bool,
}

impl ProgressiveButton {
    pub fn new(props: ElementProps) -> Self {
        Self::with_theme(props, Theme::default())
    }

    pub fn with_theme(props: ElementProps, theme: Theme) -> Self {
        Self {
            props,
            theme,
            mode: RenderMode::Static,
            torn_down: false,
        }
    }

    pub fn mode(&self) -> &RenderMode {
        &self.mode
    }

    pub fn is_hydrated(&self) -> bool {
        matches!(self.mode, RenderMode::Interactive(_))
    }

    /// 切换到交互模式
    ///
    /// 只生效一次；已水合或已卸载时返回 `false`。
    pub fn hydrate(&mut self) -> bool {
        if self.is_hydrated() || self.torn_down {
            return false;
        }

        let mut element =
            AnimatedActionElement::with_theme(self.props.clone(), self.theme.clone());
        element.mount();
        debug!(label = %self.props.label, effect = %element.effect(), "水合完成");
        self.mode = RenderMode::Interactive(Box::new(element));
        true
    }

    /// 水合后的元素
    pub fn element(&self) -> Option<&AnimatedActionElement> {
        match &self.mode {
            RenderMode::Interactive(element) => Some(element),
            RenderMode::Static => None,
        }
    }

    /// 水合前为空操作
    pub fn dispatch(&mut self, event: PointerEvent) -> bool {
        match &mut self.mode {
            RenderMode::Interactive(element) => element.dispatch(event),
            RenderMode::Static => false,
        }
    }

    pub fn tick(&mut self, dt: f32) -> Vec<AnimationEvent> {
        match &mut self.mode {
            RenderMode::Interactive(element) => element.tick(dt),
            RenderMode::Static => Vec::new(),
        }
    }

    pub fn unmount(&mut self) {
        if let RenderMode::Interactive(element) = &mut self.mode {
            element.unmount();
        }
        self.torn_down = true;
    }

    pub fn render(&self) -> Node {
        self.render_with(&AnchorLink)
    }

    pub fn render_with(&self, link: &dyn LinkPrimitive) -> Node {
        match &self.mode {
            RenderMode::Interactive(element) => element.render_with(link),
            RenderMode::Static => self.render_static(link),
        }
    }

    fn render_static(&self, link: &dyn LinkPrimitive) -> Node {
        let mut root = shell(&self.props, link)
            .attr(
                "class",
                static_classes(
                    self.props.variant,
                    self.props.size,
                    self.props.effect,
                    caller_classes(&self.props).as_deref(),
                ),
            )
            .opt_attr("style", base_style(&self.props).to_attr());
        pass_through(&mut root, &self.props);
        root.child(Node::text(self.props.label.as_str())).into()
    }
}
