//! # 样式
//!
//! 变体/尺寸到 class 列表的静态映射，以及可由宿主覆盖的主题默认值。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effect::{EffectKind, defaults};

/// 所有元素共享的基础类
pub const BASE_CLASSES: &str = "inline-flex items-center justify-center whitespace-nowrap rounded-md text-sm font-medium ring-offset-background transition-colors focus-visible:outline-none focus-visible:ring-2 focus-visible:ring-ring focus-visible:ring-offset-2 disabled:pointer-events-none disabled:opacity-50 overflow-hidden relative";

/// 交互模式下追加的分组类
pub const GROUP_CLASS: &str = "group";

/// 视觉变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
}

impl ButtonVariant {
    pub fn classes(&self) -> &'static str {
        match self {
            Self::Default => "bg-primary text-primary-foreground shadow",
            Self::Destructive => {
                "bg-destructive text-destructive-foreground shadow-sm hover:bg-destructive/90"
            }
            Self::Outline => {
                "border border-input bg-background shadow-sm hover:bg-accent hover:text-accent-foreground"
            }
            Self::Secondary => "bg-secondary text-secondary-foreground shadow-sm hover:bg-secondary/80",
            Self::Ghost => "hover:bg-accent hover:text-accent-foreground",
            Self::Link => "text-primary underline-offset-4 hover:underline",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Destructive => "destructive",
            Self::Outline => "outline",
            Self::Secondary => "secondary",
            Self::Ghost => "ghost",
            Self::Link => "link",
        }
    }
}

impl fmt::Display for ButtonVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 尺寸预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    #[default]
    Default,
    Sm,
    Lg,
    Icon,
    Custom,
    Grid,
}

impl ButtonSize {
    pub fn classes(&self) -> &'static str {
        match self {
            Self::Default => "h-9 px-4 py-2",
            Self::Sm => "h-8 rounded-md px-3 text-xs",
            Self::Lg => "h-10 rounded-md px-8",
            Self::Icon => "h-9 w-9",
            Self::Custom => "h-14 px-8 py-4 text-base",
            Self::Grid => "h-12 px-6 py-2 text-sm sm:px-8",
        }
    }
}

/// 效果对应的布局类（静态路径也要保留，避免水合前后尺寸跳变）
pub fn effect_classes(kind: EffectKind) -> &'static str {
    match kind {
        EffectKind::None | EffectKind::Pulse => "",
        EffectKind::FillIn | EffectKind::FillUp | EffectKind::Slide => "relative",
        EffectKind::RevealArrow | EffectKind::RevealIcon => "relative w-fit",
    }
}

/// 拼接 class 列表，跳过空片段
pub fn class_list<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// 交互模式：基础 + 变体 + 尺寸 + 调用方类 + 分组类
pub fn interactive_classes(
    variant: ButtonVariant,
    size: ButtonSize,
    extra: Option<&str>,
) -> String {
    class_list([
        BASE_CLASSES,
        variant.classes(),
        size.classes(),
        extra.unwrap_or(""),
        GROUP_CLASS,
    ])
}

/// 静态路径：基础 + 变体 + 尺寸 + 效果布局类 + 调用方类
pub fn static_classes(
    variant: ButtonVariant,
    size: ButtonSize,
    effect: EffectKind,
    extra: Option<&str>,
) -> String {
    class_list([
        BASE_CLASSES,
        variant.classes(),
        size.classes(),
        effect_classes(effect),
        extra.unwrap_or(""),
    ])
}

/// 主题默认值
///
/// 元素属性未指定时使用；宿主可以从配置覆盖。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// 遮罩颜色
    pub hover_color: String,
    /// 内置箭头在未指定图标颜色时的类
    pub icon_class: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            hover_color: defaults::HOVER_COLOR.to_string(),
            icon_class: defaults::ICON_CLASS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_skips_empty_parts() {
        assert_eq!(class_list(["a b", "", "  c  ", "d"]), "a b c d");
    }

    #[test]
    fn test_interactive_classes_end_with_group() {
        let classes = interactive_classes(ButtonVariant::Outline, ButtonSize::Sm, Some("mt-4"));
        assert!(classes.starts_with("inline-flex"));
        assert!(classes.contains("border border-input"));
        assert!(classes.contains("h-8 rounded-md px-3 text-xs"));
        assert!(classes.ends_with("mt-4 group"));
    }

    #[test]
    fn test_static_classes_keep_effect_layout() {
        let classes = static_classes(
            ButtonVariant::Default,
            ButtonSize::Lg,
            EffectKind::RevealArrow,
            None,
        );
        assert!(classes.ends_with("h-10 rounded-md px-8 relative w-fit"));
        assert!(!classes.contains("group"));

        let classes = static_classes(
            ButtonVariant::Default,
            ButtonSize::Default,
            EffectKind::Pulse,
            Some("w-full"),
        );
        assert!(classes.ends_with("h-9 px-4 py-2 w-full"));
    }

    #[test]
    fn test_variant_serde_names() {
        let v: ButtonVariant = serde_json::from_str("\"ghost\"").unwrap();
        assert_eq!(v, ButtonVariant::Ghost);
        let s: ButtonSize = serde_json::from_str("\"grid\"").unwrap();
        assert_eq!(s, ButtonSize::Grid);
        assert!(serde_json::from_str::<ButtonSize>("\"huge\"").is_err());
    }

    #[test]
    fn test_theme_defaults() {
        let theme: Theme = serde_json::from_str("{}").unwrap();
        assert_eq!(theme.hover_color, "black");
        assert_eq!(theme.icon_class, "text-white");
    }
}
