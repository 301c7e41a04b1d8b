//! 站点导航元素
//!
//! 站点挂载在子路径下时，为以 `/` 开头的站内链接补上前缀。

use rescue_ui::{AnchorLink, Element, LinkAttrs, LinkPrimitive};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePathLink {
    /// 规范化后的前缀：空，或以 `/` 开头且不以 `/` 结尾
    base: String,
}

impl BasePathLink {
    pub fn new(base: impl AsRef<str>) -> Self {
        let trimmed = base.as_ref().trim().trim_end_matches('/');
        let base = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// 站内绝对路径加前缀；外链、协议相对链接、锚点保持不变
    pub fn resolve(&self, href: &str) -> String {
        if self.base.is_empty() || !href.starts_with('/') || href.starts_with("//") {
            return href.to_string();
        }
        format!("{}{}", self.base, href)
    }
}

impl LinkPrimitive for BasePathLink {
    fn link(&self, attrs: &LinkAttrs) -> Element {
        AnchorLink.link(&LinkAttrs {
            href: self.resolve(&attrs.href),
            ..attrs.clone()
        })
    }
}
