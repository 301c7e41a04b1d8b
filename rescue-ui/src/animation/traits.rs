//! # Traits 模块
//!
//! 动画系统与被动画对象之间的接口。
//!
//! - `ObjectId`: 由 AnimationSystem 分配的对象标识符
//! - `AnimPropertyKey`: 对象 + 变换属性，唯一确定一条动画通道
//! - `Animatable`: 可动画对象接口

use std::fmt;

use super::TransformProperty;

/// 对象唯一标识符
///
/// 由 `AnimationSystem` 在对象注册时分配，同一系统内不会重复。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

/// 属性键
///
/// 同一时刻一个键最多只被一条轨道驱动。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimPropertyKey {
    /// 对象实例 ID
    pub object_id: ObjectId,
    /// 变换属性
    pub property: TransformProperty,
}

impl AnimPropertyKey {
    pub fn new(object_id: ObjectId, property: TransformProperty) -> Self {
        Self {
            object_id,
            property,
        }
    }
}

impl fmt::Display for AnimPropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_id, self.property)
    }
}

/// 可动画对象接口
///
/// 动画系统通过此接口直接读写对象的属性值。
/// 实现方通常用 `RefCell` 做内部可变性，所以方法只需要 `&self`。
///
/// ```rust,ignore
/// impl Animatable for Overlay {
///     fn get_property(&self, property: TransformProperty) -> Option<f32> {
///         self.transform.borrow().value(property)
///     }
///
///     fn set_property(&self, property: TransformProperty, value: f32) -> bool {
///         self.transform.borrow_mut().set_value(property, value)
///     }
///
///     fn property_list(&self) -> Vec<TransformProperty> {
///         self.transform.borrow().properties()
///     }
/// }
/// ```
pub trait Animatable: 'static {
    /// 获取属性的当前值，属性不存在时返回 `None`
    fn get_property(&self, property: TransformProperty) -> Option<f32>;

    /// 设置属性的新值，属性不存在时返回 `false`
    fn set_property(&self, property: TransformProperty, value: f32) -> bool;

    /// 可动画属性列表（用于调试和校验）
    fn property_list(&self) -> Vec<TransformProperty>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_object_id() {
        let id1 = ObjectId::new(1);
        let id2 = ObjectId::new(2);

        assert_eq!(id1, ObjectId::new(1));
        assert_ne!(id1, id2);
        assert_eq!(id1.value(), 1);
        assert_eq!(id2.to_string(), "ObjectId(2)");
    }

    #[test]
    fn test_property_key_identity() {
        let id = ObjectId::new(7);
        let mut keys = HashSet::new();
        keys.insert(AnimPropertyKey::new(id, TransformProperty::ScaleY));
        keys.insert(AnimPropertyKey::new(id, TransformProperty::ScaleY));
        keys.insert(AnimPropertyKey::new(id, TransformProperty::TranslateY));

        assert_eq!(keys.len(), 2);
        assert_eq!(
            AnimPropertyKey::new(id, TransformProperty::TranslateX).to_string(),
            "ObjectId(7):translateX"
        );
    }
}
