use super::naming::{is_lower_camel, is_upper_snake, looks_like_constant};
use super::{Finding, Rule, RuleContext};
use crate::parser::{Category, DeclNode, VarScope};

const GLOBAL_PREFIX: &str = "g_";

pub struct VariableNaming;

impl Rule for VariableNaming {
    fn id(&self) -> &'static str {
        "variable-naming"
    }

    fn description(&self) -> &'static str {
        "Locals are lowerCamelCase, globals g_lowerCamelCase, UPPER_CASE only for constants"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Variable]
    }

    fn check(&self, node: &DeclNode, _ctx: &RuleContext<'_>) -> Vec<Finding> {
        let Some(var) = node.as_variable() else {
            return Vec::new();
        };
        let name = node.name.as_str();
        if name.is_empty() {
            return Vec::new();
        }
        if looks_like_constant(name) {
            if var.is_constant() {
                return Vec::new();
            }
            return vec![Finding::new(
                node.name_pos,
                format!("`{name}` is named like a constant but is not declared const or constexpr"),
            )];
        }
        let message = match var.scope {
            VarScope::Local if !is_lower_camel(name) => {
                format!("local variable `{name}` should be lowerCamelCase")
            }
            VarScope::Global if var.is_constant() => {
                let bare = name.strip_prefix(GLOBAL_PREFIX).unwrap_or(name);
                if is_lower_camel(bare) || is_upper_snake(bare) {
                    return Vec::new();
                }
                format!("global constant `{name}` should be lowerCamelCase or UPPER_CASE")
            }
            VarScope::Global => match name.strip_prefix(GLOBAL_PREFIX) {
                None => format!("global variable `{name}` should be prefixed with `{GLOBAL_PREFIX}`"),
                Some(rest) if !is_lower_camel(rest) => {
                    format!("global variable `{name}` should be `{GLOBAL_PREFIX}` followed by lowerCamelCase")
                }
                Some(_) => return Vec::new(),
            },
            VarScope::Member => {
                let bare = name.strip_suffix('_').unwrap_or(name);
                if is_lower_camel(bare) || (var.is_constant() && is_upper_snake(bare)) {
                    return Vec::new();
                }
                format!("data member `{name}` should be lowerCamelCase")
            }
            VarScope::Local => return Vec::new(),
        };
        vec![Finding::new(node.name_pos, message)]
    }
}

#[cfg(test)]
#[path = "variables_tests.rs"]
mod tests;
