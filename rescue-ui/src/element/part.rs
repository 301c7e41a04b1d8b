//! # 可动画部件
//!
//! 元素中被动画驱动的节点（根、遮罩、文字）。
//!
//! 用 `RefCell` 包住变换，元素与动画系统共享同一个 `Rc<VisualPart>`：
//! 动画系统写值，渲染时读值。

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::{Animatable, Transform, TransformProperty};
use crate::effect::AnimationTarget;

#[derive(Debug)]
pub struct VisualPart {
    target: AnimationTarget,
    transform: RefCell<Transform>,
}

impl VisualPart {
    pub fn new(target: AnimationTarget, transform: Transform) -> Rc<Self> {
        Rc::new(Self {
            target,
            transform: RefCell::new(transform),
        })
    }

    pub fn target(&self) -> AnimationTarget {
        self.target
    }

    /// 当前变换的快照
    pub fn transform(&self) -> Transform {
        self.transform.borrow().clone()
    }

    pub fn css(&self) -> String {
        self.transform.borrow().to_css()
    }
}

impl Animatable for VisualPart {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Length;

    #[test]
    fn test_part_keeps_units() {
        let part = VisualPart::new(
            AnimationTarget::Overlay,
            Transform::identity()
                .with(TransformProperty::ScaleY, Length::number(0.0))
                .with(TransformProperty::TranslateY, Length::percent(100.0)),
        );

        assert!(part.set_property(TransformProperty::TranslateY, 40.0));
        assert_eq!(part.css(), "scaleY(0) translateY(40%)");
        assert_eq!(part.get_property(TransformProperty::ScaleY), Some(0.0));
    }

    #[test]
    fn test_part_rejects_missing_channel() {
        let part = VisualPart::new(
            AnimationTarget::Label,
            Transform::identity().with(TransformProperty::TranslateX, Length::px(0.0)),
        );

        assert!(!part.set_property(TransformProperty::Scale, 2.0));
        assert_eq!(part.get_property(TransformProperty::Scale), None);
        assert_eq!(part.property_list(), vec![TransformProperty::TranslateX]);
    }
}
