use super::naming::is_upper_snake;
use super::{Finding, Rule, RuleContext};
use crate::diagnostic::Severity;
use crate::parser::{Category, DeclNode, EnumDecl};

pub struct EnumClass;

impl Rule for EnumClass {
    fn id(&self) -> &'static str {
        "enum-class"
    }

    fn description(&self) -> &'static str {
        "Prefer `enum class` over plain `enum` outside C interop"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Enum]
    }

    fn check(&self, node: &DeclNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let marker = ctx.heuristics.c_interop_marker.as_str();
        let marked = !marker.is_empty()
            && node
                .leading_comment
                .as_deref()
                .is_some_and(|comment| comment.contains(marker));
        if node.extern_c || marked {
            return Vec::new();
        }
        let subject = if node.name.is_empty() {
            "anonymous enum".to_string()
        } else {
            format!("`{}`", node.name)
        };
        vec![Finding::new(
            node.span.start,
            format!("use `enum class` instead of a plain `enum` for {subject}"),
        )]
    }
}

pub struct EnumeratorNaming;

impl Rule for EnumeratorNaming {
    fn id(&self) -> &'static str {
        "enumerator-naming"
    }

    fn description(&self) -> &'static str {
        "Enumerators are UPPER_CASE_WITH_UNDERSCORES"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Enum, Category::EnumClass]
    }

    fn check(&self, node: &DeclNode, _ctx: &RuleContext<'_>) -> Vec<Finding> {
        let Some(decl) = node.as_enum() else {
            return Vec::new();
        };
        decl.enumerators
            .iter()
            .filter(|e| !is_upper_snake(&e.name))
            .map(|e| {
                Finding::new(
                    e.pos,
                    format!("enumerator `{}` should be UPPER_CASE", e.name),
                )
            })
            .collect()
    }
}

pub struct EnumUnderlyingType;

impl Rule for EnumUnderlyingType {
    fn id(&self) -> &'static str {
        "enum-underlying-type"
    }

    fn description(&self) -> &'static str {
        "Underlying types are only given to enums used for low-level work"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Enum, Category::EnumClass]
    }

    fn check(&self, node: &DeclNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let Some(decl) = node.as_enum() else {
            return Vec::new();
        };
        let Some(underlying) = &decl.underlying else {
            return Vec::new();
        };
        if looks_low_level(&node.name, decl, &ctx.heuristics.low_level_enum_hints) {
            return Vec::new();
        }
        vec![Finding::new(
            node.name_pos,
            format!(
                "enum `{}` specifies underlying type `{underlying}` without a low-level need",
                node.name
            ),
        )]
    }
}

/// Hint words in the enum or enumerator names, or bit-pattern values.
fn looks_low_level(name: &str, decl: &EnumDecl, hints: &[String]) -> bool {
    let has_hint = |text: &str| {
        let lower = text.to_ascii_lowercase();
        hints.iter().any(|hint| lower.contains(&hint.to_ascii_lowercase()))
    };
    has_hint(name)
        || decl.enumerators.iter().any(|e| {
            has_hint(&e.name)
                || e.value.as_deref().is_some_and(|v| {
                    let v = v.trim_start();
                    v.starts_with("0x") || v.starts_with("0X") || v.contains("<<")
                })
        })
}

#[cfg(test)]
#[path = "enums_tests.rs"]
mod tests;
