//! # Transform 模块
//!
//! CSS 变换状态：按顺序排列的若干变换通道（`translateX`、`scaleY` 等），
//! 每个通道带有数值和单位。
//!
//! 通道顺序即渲染顺序，`scaleY(0) translateY(100%)` 与
//! `translateY(100%) scaleY(0)` 在浏览器里是两种不同的变换。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 可动画的变换属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformProperty {
    /// 水平位移
    TranslateX,
    /// 垂直位移
    TranslateY,
    /// 均匀缩放
    Scale,
    /// 垂直缩放
    ScaleY,
}

impl TransformProperty {
    /// CSS 函数名
    pub fn css_name(&self) -> &'static str {
        match self {
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::Scale => "scale",
            Self::ScaleY => "scaleY",
        }
    }
}

impl fmt::Display for TransformProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// 长度单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// 像素
    Px,
    /// 百分比（相对于元素自身尺寸）
    Percent,
    /// 无单位（缩放因子）
    Number,
}

impl LengthUnit {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
            Self::Number => "",
        }
    }
}

/// 带单位的数值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    pub const fn percent(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Percent,
        }
    }

    pub const fn number(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Number,
        }
    }

    /// 保留单位，替换数值
    pub fn with_value(self, value: f32) -> Self {
        Self { value, ..self }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // -0 在 CSS 里合法但不好看，统一成 0
        let value = if self.value == 0.0 { 0.0 } else { self.value };
        write!(f, "{}{}", value, self.unit.suffix())
    }
}

/// 变换状态
///
/// 通道未出现时视为该属性未被设置（不会出现在 CSS 中）。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    channels: Vec<(TransformProperty, Length)>,
}

impl Transform {
    /// 空变换
    pub fn identity() -> Self {
        Self::default()
    }

    /// 追加或覆盖一个通道（构建用）
    pub fn with(mut self, property: TransformProperty, length: Length) -> Self {
        self.insert(property, length);
        self
    }

    /// 追加或覆盖一个通道
    ///
    /// 已存在的通道保持原位置，只替换数值和单位。
    pub fn insert(&mut self, property: TransformProperty, length: Length) {
        match self.channels.iter_mut().find(|(p, _)| *p == property) {
            Some((_, slot)) => *slot = length,
            None => self.channels.push((property, length)),
        }
    }

    /// 获取通道
    pub fn get(&self, property: TransformProperty) -> Option<Length> {
        self.channels
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, l)| *l)
    }

    /// 获取通道数值
    pub fn value(&self, property: TransformProperty) -> Option<f32> {
        self.get(property).map(|l| l.value)
    }

    /// 设置已存在通道的数值（单位不变）
    ///
    /// 通道不存在时返回 `false`。
    pub fn set_value(&mut self, property: TransformProperty, value: f32) -> bool {
        match self.channels.iter_mut().find(|(p, _)| *p == property) {
            Some((_, slot)) => {
                *slot = slot.with_value(value);
                true
            }
            None => false,
        }
    }

    /// 已设置的属性列表（按渲染顺序）
    pub fn properties(&self) -> Vec<TransformProperty> {
        self.channels.iter().map(|(p, _)| *p).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// 渲染为 CSS `transform` 值
    pub fn to_css(&self) -> String {
        self.channels
            .iter()
            .map(|(p, l)| format!("{}({})", p.css_name(), l))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_display() {
        assert_eq!(Length::px(32.0).to_string(), "32px");
        assert_eq!(Length::percent(-100.0).to_string(), "-100%");
        assert_eq!(Length::number(1.1).to_string(), "1.1");
        assert_eq!(Length::px(-0.0).to_string(), "0px");
    }

    #[test]
    fn test_css_keeps_insertion_order() {
        let t = Transform::identity()
            .with(TransformProperty::ScaleY, Length::number(0.0))
            .with(TransformProperty::TranslateY, Length::percent(100.0));
        assert_eq!(t.to_css(), "scaleY(0) translateY(100%)");
    }

    #[test]
    fn test_set_value_keeps_unit() {
        let mut t = Transform::identity().with(TransformProperty::TranslateX, Length::px(32.0));
        assert!(t.set_value(TransformProperty::TranslateX, 12.5));
        assert_eq!(t.get(TransformProperty::TranslateX), Some(Length::px(12.5)));

        // 不存在的通道不会被隐式创建
        assert!(!t.set_value(TransformProperty::Scale, 2.0));
        assert_eq!(t.properties(), vec![TransformProperty::TranslateX]);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut t = Transform::identity()
            .with(TransformProperty::ScaleY, Length::number(0.0))
            .with(TransformProperty::TranslateY, Length::percent(100.0));
        t.insert(TransformProperty::ScaleY, Length::number(1.0));
        assert_eq!(t.to_css(), "scaleY(1) translateY(100%)");
    }

    #[test]
    fn test_empty_transform() {
        let t = Transform::identity();
        assert!(t.is_empty());
        assert_eq!(t.to_css(), "");
    }
}
