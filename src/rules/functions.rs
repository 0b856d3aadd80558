//! Function names and how parameters are passed.

use super::naming::is_lower_camel;
use super::{Finding, Rule, RuleContext};
use crate::parser::{Category, DeclNode, FunctionDecl, FunctionRole, Param, Passing, SyntaxTree};

/// Words that make up the built-in arithmetic types.
const BUILTIN_TYPE_WORDS: &[&str] = &[
    "void", "bool", "char", "wchar_t", "char8_t", "char16_t", "char32_t", "short", "int", "long",
    "signed", "unsigned", "float", "double",
];

const SIZE_TYPES: &[&str] = &[
    "size_t",
    "ssize_t",
    "ptrdiff_t",
    "intptr_t",
    "uintptr_t",
    "intmax_t",
    "uintmax_t",
    "nullptr_t",
    "byte",
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "uint8_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
];

pub struct FunctionNaming;

impl Rule for FunctionNaming {
    fn id(&self) -> &'static str {
        "function-naming"
    }

    fn description(&self) -> &'static str {
        "Function names are lowerCamelCase"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Function]
    }

    fn check(&self, node: &DeclNode, _ctx: &RuleContext<'_>) -> Vec<Finding> {
        let Some(decl) = node.as_function() else {
            return Vec::new();
        };
        if !matches!(decl.role, FunctionRole::Free | FunctionRole::Method)
            || node.name == "main"
            || node.extern_c
            || is_lower_camel(&node.name)
        {
            return Vec::new();
        }
        vec![Finding::new(
            node.name_pos,
            format!("function `{}` should be lowerCamelCase", node.name),
        )]
    }
}

pub struct ParameterPassing;

impl Rule for ParameterPassing {
    fn id(&self) -> &'static str {
        "parameter-passing"
    }

    fn description(&self) -> &'static str {
        "POD by value, other types by const reference, non-const references only when modified"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Function]
    }

    fn check(&self, node: &DeclNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let Some(decl) = node.as_function() else {
            return Vec::new();
        };
        decl.params
            .iter()
            .filter(|param| !decl.template_params.contains(&param.base_type))
            .filter_map(|param| check_param(param, decl, ctx))
            .collect()
    }
}

fn check_param(param: &Param, decl: &FunctionDecl, ctx: &RuleContext<'_>) -> Option<Finding> {
    let ty = param.base_type.as_str();
    if ty == "auto" || ty.is_empty() {
        return None;
    }
    let label = param
        .name
        .as_ref()
        .map_or_else(|| format!("of type `{ty}`"), |name| format!("`{name}` of type `{ty}`"));
    let modified = || {
        param
            .name
            .as_ref()
            .is_some_and(|name| decl.body.as_ref().is_some_and(|body| body.modifies(name)))
    };
    let written_through = || {
        param.name.as_ref().is_some_and(|name| {
            decl.body
                .as_ref()
                .is_some_and(|body| body.modifies(name) || body.passes_to_call(name))
        })
    };
    let pod = is_pod(ty, ctx.heuristics.pod_types.as_slice(), ctx.tree);
    let message = match param.passing {
        Passing::ConstRef if pod => {
            format!("parameter {label} is plain data and should be passed by value")
        }
        Passing::Value if !pod && !is_sink(ty, &ctx.heuristics.sink_types) && !modified() => {
            format!("parameter {label} is not modified and should be passed by const reference")
        }
        Passing::Ref if decl.body.is_some() && !written_through() => {
            let instead = if pod { "by value" } else { "by const reference" };
            format!("non-const reference parameter {label} is never modified; pass it {instead}")
        }
        _ => return None,
    };
    Some(Finding::new(param.pos, message))
}

/// Plain data: built-in arithmetic types, fixed-width and size types,
/// configured types and enums declared in the same file.
fn is_pod(ty: &str, extra: &[String], tree: &SyntaxTree) -> bool {
    if extra.iter().any(|t| t == ty) {
        return true;
    }
    let bare = ty.strip_prefix("std::").unwrap_or(ty);
    if SIZE_TYPES.contains(&bare) {
        return true;
    }
    if ty.split_whitespace().all(|word| BUILTIN_TYPE_WORDS.contains(&word)) {
        return true;
    }
    let unqualified = ty.rsplit("::").next().unwrap_or(ty);
    tree.enum_names().any(|name| name == unqualified)
}

/// Types meant to be moved in or cheap to copy, matched without template
/// arguments.
fn is_sink(ty: &str, sinks: &[String]) -> bool {
    let head = ty.split('<').next().unwrap_or(ty).trim();
    sinks.iter().any(|sink| sink == head)
}

#[cfg(test)]
#[path = "functions_tests.rs"]
mod tests;
