//! 元素输入属性

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::effect::EffectKind;
use crate::markup::IconContent;
use crate::style::{ButtonSize, ButtonVariant};

/// 调用方提供的元素属性
///
/// 除类型外不做校验：未知效果名降级为 `none`，缺省字段使用主题默认值。
///
/// ```json
/// {
///   "label": "Adopt a pet",
///   "href": "/adopt",
///   "variant": "outline",
///   "effect": "reveal-arrow",
///   "hover_color": "#f97316"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementProps {
    /// 文字
    pub label: String,
    /// 导航目标；为空时渲染原生按钮
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub variant: ButtonVariant,
    pub size: ButtonSize,
    pub effect: EffectKind,
    /// 遮罩颜色，缺省使用主题
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_color: Option<String>,
    /// reveal-icon 的图标
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    /// 背景色，合并进内联样式
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    /// 追加的 class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// 内联样式
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    /// 透传属性（如 `type`、`aria-label`）
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
}

impl ElementProps {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn effect(mut self, effect: EffectKind) -> Self {
        self.effect = effect;
        self
    }

    pub fn hover_color(mut self, color: impl Into<String>) -> Self {
        self.hover_color = Some(color.into());
        self
    }

    pub fn icon(mut self, icon: IconContent) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn icon_color(mut self, color: impl Into<String>) -> Self {
        self.icon_color = Some(color.into());
        self
    }

    pub fn bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(name.into(), value.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}
