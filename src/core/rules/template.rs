//! Query templates for ad-hoc marker selection
//!
//! A template mirrors the marker's own fields, with every field optional:
//! an absent field is a wildcard, a present field must match exactly.
//! "All public static methods without overrides" is a template with three
//! concrete fields and everything else absent.

use serde::{Deserialize, Serialize};
use tidytree_marker::{Access, Marker, MarkerFlags, MarkerKind};

use crate::core::error::{Result, TidyError};

use super::MarkerRule;

/// Tri-state view of the modifier flags: absent means "don't care"
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FlagTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_abstract: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sealed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_virtual: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_override: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_partial: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_extern: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_unsafe: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_async: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_readonly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ref: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_explicit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_implicit: Option<bool>,
}

impl FlagTemplate {
    /// Check whether concrete flags satisfy every present constraint
    pub fn admits(&self, flags: &MarkerFlags) -> bool {
        fn ok(want: Option<bool>, have: bool) -> bool {
            want.map_or(true, |w| w == have)
        }
        ok(self.is_static, flags.is_static)
            && ok(self.is_abstract, flags.is_abstract)
            && ok(self.is_sealed, flags.is_sealed)
            && ok(self.is_virtual, flags.is_virtual)
            && ok(self.is_override, flags.is_override)
            && ok(self.is_partial, flags.is_partial)
            && ok(self.is_extern, flags.is_extern)
            && ok(self.is_unsafe, flags.is_unsafe)
            && ok(self.is_async, flags.is_async)
            && ok(self.is_readonly, flags.is_readonly)
            && ok(self.is_ref, flags.is_ref)
            && ok(self.is_new, flags.is_new)
            && ok(self.is_explicit, flags.is_explicit)
            && ok(self.is_implicit, flags.is_implicit)
    }

    fn is_empty(&self) -> bool {
        *self == FlagTemplate::default()
    }
}

/// A wildcard-capable query over marker metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QueryTemplate {
    /// Required kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MarkerKind>,

    /// Required exact name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Required enclosing namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Required nesting level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,

    /// Required access-modifier set (exact match)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,

    /// Required base type or interface. Only meaningful on type markers;
    /// combining it with a member kind is rejected at validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implements: Option<String>,

    /// Modifier-flag constraints
    #[serde(default, skip_serializing_if = "FlagTemplate::is_empty")]
    pub flags: FlagTemplate,
}

impl QueryTemplate {
    /// Create an all-wildcard template (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: require a kind
    pub fn with_kind(mut self, kind: MarkerKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Builder pattern: require an exact name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder pattern: require a namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Builder pattern: require a nesting level
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// Builder pattern: require an exact access set
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = Some(access);
        self
    }

    /// Builder pattern: require a base type or interface
    pub fn with_implements(mut self, base: impl Into<String>) -> Self {
        self.implements = Some(base.into());
        self
    }

    /// Builder pattern: set the flag constraints
    pub fn with_flags(mut self, flags: FlagTemplate) -> Self {
        self.flags = flags;
        self
    }

    /// Fail fast on contradictory templates: an inheritance constraint
    /// combined with a kind that cannot inherit is a programming mistake,
    /// not bad input data.
    pub fn validate(&self) -> Result<()> {
        if self.implements.is_some() {
            if let Some(kind) = self.kind {
                if !kind.is_type() {
                    return Err(TidyError::invalid_config(format!(
                        "inheritance constraint cannot apply to kind '{}'",
                        kind.as_str()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Check a marker against every present field.
    ///
    /// A field that cannot apply to the marker (an inheritance constraint
    /// on a non-type marker) counts as "no match" rather than an error.
    pub fn matches(&self, marker: &Marker) -> bool {
        if self.kind.map_or(false, |k| marker.kind != k) {
            return false;
        }
        if self.name.as_deref().map_or(false, |n| marker.name != n) {
            return false;
        }
        if self
            .namespace
            .as_deref()
            .map_or(false, |ns| marker.namespace.as_deref() != Some(ns))
        {
            return false;
        }
        if self.level.map_or(false, |l| marker.level != l) {
            return false;
        }
        if self.access.map_or(false, |a| marker.access != a) {
            return false;
        }
        if let Some(base) = self.implements.as_deref() {
            if !marker.is_type() {
                return false;
            }
            if !marker.inheritance.iter().any(|b| b == base) {
                return false;
            }
        }
        self.flags.admits(&marker.flags)
    }
}

impl MarkerRule for QueryTemplate {
    fn is_valid(&self, marker: &Marker) -> bool {
        self.matches(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidytree_marker::Span;

    fn method(name: &str, is_static: bool) -> Marker {
        Marker::new(name, MarkerKind::Method, Span::new(0, 10, 1, 1)).with_flags(MarkerFlags {
            is_static,
            ..Default::default()
        })
    }

    #[test]
    fn test_wildcard_matches_everything() {
        let template = QueryTemplate::new();
        assert!(template.matches(&method("A", true)));
        assert!(template.matches(&method("B", false)));
    }

    #[test]
    fn test_static_flag_constraint() {
        let template = QueryTemplate::new().with_flags(FlagTemplate {
            is_static: Some(true),
            ..Default::default()
        });
        assert!(template.matches(&method("A", true)));
        assert!(!template.matches(&method("B", false)));
    }

    #[test]
    fn test_public_static_without_override() {
        let template = QueryTemplate::new()
            .with_kind(MarkerKind::Method)
            .with_access(Access::PUBLIC)
            .with_flags(FlagTemplate {
                is_static: Some(true),
                is_override: Some(false),
                ..Default::default()
            });

        let candidate = method("A", true).with_access(Access::PUBLIC);
        assert!(template.matches(&candidate));

        let overriding = {
            let mut m = method("B", true).with_access(Access::PUBLIC);
            m.flags.is_override = true;
            m
        };
        assert!(!template.matches(&overriding));

        let internal = method("C", true).with_access(Access::INTERNAL);
        assert!(!template.matches(&internal));
    }

    #[test]
    fn test_access_is_exact() {
        let template = QueryTemplate::new().with_access(Access::PROTECTED | Access::INTERNAL);
        let exact = method("A", false).with_access(Access::PROTECTED | Access::INTERNAL);
        let partial = method("B", false).with_access(Access::PROTECTED);
        assert!(template.matches(&exact));
        assert!(!template.matches(&partial));
    }

    #[test]
    fn test_implements_on_type() {
        let template = QueryTemplate::new().with_implements("IDisposable");
        let mut class = Marker::new("Widget", MarkerKind::Class, Span::new(0, 10, 1, 1));
        class.inheritance.push("IDisposable".to_string());
        assert!(template.matches(&class));

        let plain = Marker::new("Plain", MarkerKind::Class, Span::new(0, 10, 1, 1));
        assert!(!template.matches(&plain));
    }

    #[test]
    fn test_implements_on_non_type_is_no_match() {
        let template = QueryTemplate::new().with_implements("IDisposable");
        assert!(!template.matches(&method("A", false)));
    }

    #[test]
    fn test_validate_rejects_member_kind_with_implements() {
        let bad = QueryTemplate::new()
            .with_kind(MarkerKind::Method)
            .with_implements("IDisposable");
        assert!(bad.validate().is_err());

        let good = QueryTemplate::new()
            .with_kind(MarkerKind::Class)
            .with_implements("IDisposable");
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_template_serde() {
        let template = QueryTemplate::new()
            .with_kind(MarkerKind::Method)
            .with_flags(FlagTemplate {
                is_static: Some(true),
                ..Default::default()
            });
        let json = serde_json::to_string(&template).unwrap();
        let parsed: QueryTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, Some(MarkerKind::Method));
        assert_eq!(parsed.flags.is_static, Some(true));
        assert_eq!(parsed.flags.is_async, None);
    }
}
