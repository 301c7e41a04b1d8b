//! # Markup 模块
//!
//! 组件输出的轻量节点树，可序列化为 HTML。
//!
//! 外部协作者也在这里定义：
//! - [`LinkPrimitive`]：宿主路由层提供的导航元素
//! - [`IconContent`]：调用方提供的图标内容

use std::fmt;

use serde::{Deserialize, Serialize};

/// 节点
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// 文本（输出时转义）
    Text(String),
    /// 原样输出的可信标记（调用方提供的图标等）
    Raw(String),
}

/// 元素节点
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    /// 按插入顺序输出
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 设置属性（已存在则原位覆盖）
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// 值为 `None` 或空字符串时跳过
    pub fn opt_attr(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value.map(Into::into) {
            Some(value) if !value.is_empty() => self.attr(name, value),
            _ => self,
        }
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        Node::Raw(markup.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// 序列化为 HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.write_html(out),
            Node::Text(t) => out.push_str(&escape_text(t)),
            Node::Raw(r) => out.push_str(r),
        }
    }

    /// 深度优先收集满足条件的元素（包括自身）
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(predicate, &mut found);
        found
    }

    fn collect<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let Node::Element(e) = self {
            if predicate(e) {
                found.push(e);
            }
            for child in &e.children {
                child.collect(predicate, found);
            }
        }
    }

    /// 按 `data-part` 查找
    pub fn find_part(&self, part: &str) -> Option<&Element> {
        self.find_all(&|e| e.get_attr("data-part") == Some(part))
            .into_iter()
            .next()
    }

    /// 纯文本内容（用于断言）
    pub fn text_content(&self) -> String {
        match self {
            Node::Element(e) => e.children.iter().map(Node::text_content).collect(),
            Node::Text(t) => t.clone(),
            Node::Raw(_) => String::new(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// 内联样式列表
///
/// 按声明顺序输出 `name: value; name: value`。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    declarations: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置声明（已存在则原位覆盖）
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.declarations.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// 合并 `k: v; k: v` 形式的内联样式，格式不对的声明被跳过
    pub fn merge_css(&mut self, css: &str) {
        for declaration in css.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                let (name, value) = (name.trim(), value.trim());
                if !name.is_empty() && !value.is_empty() {
                    self.set(name, value);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// 作为 `style` 属性值，空样式返回 `None`
    pub fn to_attr(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(
            self.declarations
                .iter()
                .map(|(n, v)| format!("{}: {}", n, v))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// 导航目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAttrs {
    pub href: String,
    pub target: Option<String>,
    pub rel: Option<String>,
}

impl LinkAttrs {
    /// `target="_blank"` 时强制 `rel="noopener noreferrer"`
    pub fn new(href: impl Into<String>, target: Option<String>, rel: Option<String>) -> Self {
        let rel = if target.as_deref() == Some("_blank") {
            Some("noopener noreferrer".to_string())
        } else {
            rel
        };
        Self {
            href: href.into(),
            target,
            rel,
        }
    }
}

/// 导航元素（由宿主路由层提供）
///
/// 返回带导航属性的外壳元素，组件随后追加 class、style 与子节点。
pub trait LinkPrimitive {
    fn link(&self, attrs: &LinkAttrs) -> Element;
}

/// 默认实现：普通 `<a>`
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorLink;

impl LinkPrimitive for AnchorLink {
    fn link(&self, attrs: &LinkAttrs) -> Element {
        Element::new("a")
            .attr("href", attrs.href.as_str())
            .opt_attr("target", attrs.target.as_deref())
            .opt_attr("rel", attrs.rel.as_deref())
    }
}

/// 图标内容（由调用方提供）
///
/// JSON 中以标记字符串表示。组件只负责定位和着色。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct IconContent(Node);

impl IconContent {
    /// 可信标记（如内联 SVG）
    pub fn markup(markup: impl Into<String>) -> Self {
        Self(Node::raw(markup))
    }

    pub fn node(node: impl Into<Node>) -> Self {
        Self(node.into())
    }

    /// 着色后的节点
    ///
    /// 元素节点直接追加 `color`，其它内容包一层 `<span>`。
    pub fn colored(&self, color: Option<&str>) -> Node {
        let Some(color) = color else {
            return self.0.clone();
        };
        match &self.0 {
            Node::Element(e) => {
                let mut e = e.clone();
                let style = match e.get_attr("style") {
                    Some(existing) if !existing.is_empty() => {
                        format!("{}; color: {}", existing.trim_end_matches(';'), color)
                    }
                    _ => format!("color: {}", color),
                };
                e.set_attr("style", style);
                Node::Element(e)
            }
            other => Element::new("span")
                .attr("style", format!("color: {}", color))
                .child(other.clone())
                .into(),
        }
    }
}

impl From<String> for IconContent {
    fn from(markup: String) -> Self {
        Self::markup(markup)
    }
}

impl From<IconContent> for String {
    fn from(icon: IconContent) -> Self {
        icon.0.to_html()
    }
}

/// 内置的右上箭头图标
pub fn arrow_icon(class: &str) -> Node {
    Element::new("svg")
        .attr("class", class)
        .attr("viewBox", "0 0 24 24")
        .attr("fill", "none")
        .attr("stroke", "currentColor")
        .attr("stroke-width", "2")
        .child(Element::new("path").attr("d", "M7 17L17 7M9 7h8v8"))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_markup() {
        let node: Node = Element::new("a")
            .attr("href", "/adopt?pet=1&size=s")
            .child(Element::new("span").child(Node::text("Cats <3 Dogs")))
            .into();

        assert_eq!(
            node.to_html(),
            "<a href=\"/adopt?pet=1&amp;size=s\"><span>Cats &lt;3 Dogs</span></a>"
        );
        assert_eq!(node.text_content(), "Cats <3 Dogs");
    }

    #[test]
    fn test_attr_overwrites_in_place() {
        let e = Element::new("button")
            .attr("type", "button")
            .attr("class", "a")
            .attr("type", "submit");
        assert_eq!(e.attrs[0], ("type".to_string(), "submit".to_string()));
        assert_eq!(e.attrs.len(), 2);
    }

    #[test]
    fn test_opt_attr_skips_empty() {
        let e = Element::new("a")
            .opt_attr("rel", None::<String>)
            .opt_attr("target", Some(""))
            .opt_attr("title", Some("x"));
        assert_eq!(e.attrs, vec![("title".to_string(), "x".to_string())]);
    }

    #[test]
    fn test_style_rendering() {
        let style = Style::new()
            .with("background-color", "black")
            .with("transform", "scaleY(0)")
            .with("background-color", "red");
        assert_eq!(
            style.to_attr().as_deref(),
            Some("background-color: red; transform: scaleY(0)")
        );
        assert_eq!(Style::new().to_attr(), None);
    }

    #[test]
    fn test_merge_css() {
        let mut style = Style::new().with("color", "red");
        style.merge_css("margin: 0 auto; ; color:blue;bogus; background: url(https://a.png)");
        assert_eq!(
            style.to_attr().as_deref(),
            Some("color: blue; margin: 0 auto; background: url(https://a.png)")
        );
    }

    #[test]
    fn test_blank_target_forces_rel() {
        let link = LinkAttrs::new("/donate", Some("_blank".into()), Some("me".into()));
        assert_eq!(link.rel.as_deref(), Some("noopener noreferrer"));

        let link = LinkAttrs::new("/donate", None, Some("me".into()));
        assert_eq!(link.rel.as_deref(), Some("me"));
    }

    #[test]
    fn test_anchor_link() {
        let a = AnchorLink.link(&LinkAttrs::new("/adopt", None, None));
        assert_eq!(Node::from(a).to_html(), "<a href=\"/adopt\"></a>");
    }

    #[test]
    fn test_icon_coloring() {
        let raw = IconContent::markup("<svg></svg>");
        assert_eq!(
            raw.colored(Some("#fff")).to_html(),
            "<span style=\"color: #fff\"><svg></svg></span>"
        );
        assert_eq!(raw.colored(None).to_html(), "<svg></svg>");

        let element = IconContent::node(Element::new("i").attr("style", "width: 1em;"));
        assert_eq!(
            element.colored(Some("red")).to_html(),
            "<i style=\"width: 1em; color: red\"></i>"
        );
    }

    #[test]
    fn test_find_part() {
        let node: Node = Element::new("div")
            .child(Element::new("span").attr("data-part", "label"))
            .into();
        assert!(node.find_part("label").is_some());
        assert!(node.find_part("overlay").is_none());
    }
}
