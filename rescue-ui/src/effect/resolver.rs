//! # Effect Resolver
//!
//! 效果名称 → `EffectKind` 的**唯一转换入口**。
//!
//! | 名称 | EffectKind |
//! |------|------------|
//! | `none` / 空字符串 | `None` |
//! | `fill-in` | `FillIn` |
//! | `fill-up` | `FillUp` |
//! | `pulse` | `Pulse` |
//! | `slide` | `Slide` |
//! | `reveal-arrow` | `RevealArrow` |
//! | `reveal-icon` | `RevealIcon` |
//! | 其他 | `None`（降级） |
//!
//! 名称大小写不敏感，下划线与连字符等价。

use super::registry::EffectKind;

/// 解析效果名称
///
/// 未知名称降级为 `EffectKind::None` 并记录警告，不会失败。
pub fn resolve(name: &str) -> EffectKind {
    let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
    if normalized.is_empty() {
        return EffectKind::None;
    }

    match EffectKind::ALL
        .iter()
        .find(|kind| kind.name() == normalized)
    {
        Some(kind) => *kind,
        None => {
            tracing::warn!(name = %name, "未知悬停效果，降级为 none");
            EffectKind::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_names() {
        assert_eq!(resolve("fill-in"), EffectKind::FillIn);
        assert_eq!(resolve("fill-up"), EffectKind::FillUp);
        assert_eq!(resolve("pulse"), EffectKind::Pulse);
        assert_eq!(resolve("slide"), EffectKind::Slide);
        assert_eq!(resolve("reveal-arrow"), EffectKind::RevealArrow);
        assert_eq!(resolve("reveal-icon"), EffectKind::RevealIcon);
        assert_eq!(resolve("none"), EffectKind::None);
    }

    #[test]
    fn test_resolve_is_lenient() {
        assert_eq!(resolve("Reveal-Icon"), EffectKind::RevealIcon);
        assert_eq!(resolve(" FILL_UP "), EffectKind::FillUp);
    }

    #[test]
    fn test_unknown_and_empty_fall_back_to_none() {
        assert_eq!(resolve(""), EffectKind::None);
        assert_eq!(resolve("wobble"), EffectKind::None);
        assert_eq!(resolve("fill"), EffectKind::None);
    }

    #[test]
    fn test_every_name_resolves_to_itself() {
        for kind in EffectKind::ALL {
            assert_eq!(resolve(kind.name()), *kind);
        }
    }
}
