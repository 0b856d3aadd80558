//! Include hygiene, `using` in headers and macro names.

use std::collections::HashSet;

use super::naming::is_upper_snake;
use super::{Finding, Rule, RuleContext};
use crate::diagnostic::Severity;
use crate::lexer::TokenKind;
use crate::parser::{Category, DeclKind, DeclNode};

/// Symbols a standard header is included for. A header-only include whose
/// symbols never appear in the file belongs in the implementation file.
const STANDARD_HEADER_SYMBOLS: &[(&str, &[&str])] = &[
    ("algorithm", &[
        "sort", "stable_sort", "find", "find_if", "count", "count_if", "transform", "copy",
        "copy_if", "min", "max", "minmax", "clamp", "any_of", "all_of", "none_of", "remove",
        "remove_if", "reverse", "unique", "lower_bound", "upper_bound", "fill", "for_each",
        "max_element", "min_element", "equal",
    ]),
    ("array", &["array"]),
    ("atomic", &["atomic", "atomic_flag", "memory_order"]),
    ("bitset", &["bitset"]),
    ("cassert", &["assert"]),
    ("assert.h", &["assert"]),
    ("chrono", &["chrono"]),
    ("cmath", &["sqrt", "pow", "abs", "fabs", "floor", "ceil", "round", "sin", "cos", "tan", "exp", "log"]),
    ("math.h", &["sqrt", "pow", "fabs", "floor", "ceil", "round", "sin", "cos", "tan", "exp", "log"]),
    ("condition_variable", &["condition_variable"]),
    ("cstddef", &["size_t", "ptrdiff_t", "nullptr_t", "byte", "max_align_t", "offsetof"]),
    ("stddef.h", &["size_t", "ptrdiff_t", "offsetof"]),
    ("cstdint", &[
        "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t",
        "uint64_t", "intptr_t", "uintptr_t", "intmax_t", "uintmax_t", "SIZE_MAX",
        "INT32_MAX", "UINT32_MAX", "INT64_MAX",
    ]),
    ("stdint.h", &[
        "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t",
        "uint64_t", "intptr_t", "uintptr_t", "SIZE_MAX",
    ]),
    ("cstdio", &["printf", "fprintf", "snprintf", "FILE", "fopen", "fclose", "puts"]),
    ("stdio.h", &["printf", "fprintf", "snprintf", "FILE", "fopen", "fclose", "puts"]),
    ("cstdlib", &["malloc", "free", "exit", "abort", "atoi", "getenv", "EXIT_SUCCESS", "EXIT_FAILURE"]),
    ("stdlib.h", &["malloc", "free", "exit", "abort", "atoi", "getenv"]),
    ("cstring", &["memcpy", "memset", "memcmp", "strlen", "strcmp", "strcpy"]),
    ("string.h", &["memcpy", "memset", "memcmp", "strlen", "strcmp", "strcpy"]),
    ("deque", &["deque"]),
    ("exception", &["exception", "exception_ptr", "terminate", "rethrow_exception"]),
    ("filesystem", &["filesystem", "path"]),
    ("fstream", &["ifstream", "ofstream", "fstream", "filebuf"]),
    ("functional", &["function", "bind", "hash", "reference_wrapper", "invoke", "ref", "cref", "less", "greater"]),
    ("initializer_list", &["initializer_list"]),
    ("iomanip", &["setw", "setprecision", "setfill", "hex", "fixed"]),
    ("iostream", &["cout", "cin", "cerr", "clog", "ostream", "istream", "endl"]),
    ("istream", &["istream", "iostream"]),
    ("ostream", &["ostream", "endl"]),
    ("iterator", &["iterator", "iterator_traits", "back_inserter", "advance", "distance", "next", "prev"]),
    ("limits", &["numeric_limits"]),
    ("list", &["list"]),
    ("map", &["map", "multimap"]),
    ("memory", &["unique_ptr", "shared_ptr", "weak_ptr", "make_unique", "make_shared", "allocator", "enable_shared_from_this"]),
    ("mutex", &["mutex", "recursive_mutex", "lock_guard", "unique_lock", "scoped_lock", "once_flag", "call_once"]),
    ("numeric", &["accumulate", "iota", "reduce", "inner_product", "gcd", "lcm"]),
    ("optional", &["optional", "nullopt", "make_optional"]),
    ("queue", &["queue", "priority_queue"]),
    ("set", &["set", "multiset"]),
    ("span", &["span"]),
    ("sstream", &["stringstream", "ostringstream", "istringstream"]),
    ("stack", &["stack"]),
    ("stdexcept", &["runtime_error", "logic_error", "invalid_argument", "out_of_range", "domain_error", "overflow_error"]),
    ("string", &["string", "wstring", "basic_string", "to_string", "stoi", "stol", "stod", "getline", "char_traits"]),
    ("string_view", &["string_view", "basic_string_view"]),
    ("thread", &["thread", "this_thread", "jthread"]),
    ("tuple", &["tuple", "tie", "make_tuple", "get", "apply", "tuple_size"]),
    ("type_traits", &[
        "is_same", "is_same_v", "enable_if", "enable_if_t", "decay", "decay_t",
        "remove_reference", "remove_reference_t", "is_integral", "is_integral_v",
        "conditional", "conditional_t", "integral_constant", "true_type", "false_type",
    ]),
    ("typeinfo", &["type_info", "typeid"]),
    ("unordered_map", &["unordered_map", "unordered_multimap"]),
    ("unordered_set", &["unordered_set", "unordered_multiset"]),
    ("utility", &["pair", "make_pair", "move", "forward", "swap", "exchange", "declval", "index_sequence"]),
    ("variant", &["variant", "visit", "monostate", "get_if", "holds_alternative"]),
    ("vector", &["vector"]),
];

pub struct HeaderHygiene;

impl Rule for HeaderHygiene {
    fn id(&self) -> &'static str {
        "header-hygiene"
    }

    fn description(&self) -> &'static str {
        "Interface files include only what they use; umbrella headers are never included"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Include]
    }

    fn check(&self, node: &DeclNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let DeclKind::Include { header, system } = &node.kind else {
            return Vec::new();
        };
        let shown = if *system {
            format!("<{header}>")
        } else {
            format!("\"{header}\"")
        };
        if ctx.heuristics.umbrella_headers.iter().any(|h| h == header) {
            return vec![Finding::new(
                node.name_pos,
                format!("umbrella header {shown} must not be included; include the specific headers instead"),
            )];
        }
        if !ctx.is_interface() {
            return Vec::new();
        }
        let Some(symbols) = header_symbols(header, ctx) else {
            return Vec::new();
        };
        let used = identifiers(ctx);
        let uses_header = symbols.iter().any(|symbol| {
            let last = symbol.rsplit("::").next().unwrap_or(symbol);
            used.contains(last)
        });
        if uses_header {
            return Vec::new();
        }
        vec![Finding::new(
            node.name_pos,
            format!(
                "{shown} is not used by this interface; include it in the implementation file instead"
            ),
        )]
    }
}

/// Known symbols of `header`; configured entries take precedence over the
/// built-in table. `None` for headers nothing is known about.
fn header_symbols<'c>(header: &str, ctx: &RuleContext<'c>) -> Option<Vec<&'c str>> {
    if let Some(symbols) = ctx.heuristics.header_symbols.get(header) {
        return Some(symbols.iter().map(String::as_str).collect());
    }
    STANDARD_HEADER_SYMBOLS
        .iter()
        .find(|(name, _)| *name == header)
        .map(|(_, symbols)| symbols.to_vec())
}

/// Every word of the file outside comments, including macro bodies but not
/// other `#include` lines.
fn identifiers<'a>(ctx: &RuleContext<'a>) -> HashSet<&'a str> {
    let mut words = HashSet::new();
    for token in ctx.tokens {
        match token.kind {
            kind if kind.is_word() => {
                words.insert(token.text);
            }
            TokenKind::Directive if !token.text.contains("include") => {
                words.extend(
                    token
                        .text
                        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                        .filter(|w| !w.is_empty()),
                );
            }
            _ => {}
        }
    }
    words
}

pub struct NamespaceUsing;

impl Rule for NamespaceUsing {
    fn id(&self) -> &'static str {
        "namespace-using"
    }

    fn description(&self) -> &'static str {
        "No `using namespace` or namespace-scope using-declarations in interface files"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::UsingDirective, Category::UsingDeclaration]
    }

    fn check(&self, node: &DeclNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        if !ctx.is_interface() {
            return Vec::new();
        }
        let finding = match &node.kind {
            DeclKind::UsingDirective => Finding::new(
                node.span.start,
                format!("`using namespace {}` in an interface file", node.name),
            ),
            DeclKind::UsingDeclaration { target, .. } => {
                let at_namespace_scope = ctx.tree.parent(node.id).is_some_and(|parent| {
                    matches!(
                        parent.category(),
                        Category::TranslationUnit | Category::Namespace
                    )
                });
                if !at_namespace_scope {
                    return Vec::new();
                }
                Finding::new(
                    node.span.start,
                    format!("using-declaration `using {target}` at namespace scope in an interface file"),
                )
            }
            _ => return Vec::new(),
        };
        vec![finding]
    }
}

pub struct MacroNaming;

impl Rule for MacroNaming {
    fn id(&self) -> &'static str {
        "macro-naming"
    }

    fn description(&self) -> &'static str {
        "Macro names are UPPER_CASE with underscores between words"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Macro]
    }

    fn check(&self, node: &DeclNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let name = node.name.as_str();
        if name.chars().any(|c| c.is_lowercase()) {
            return vec![Finding::new(
                node.name_pos,
                format!("macro `{name}` should be UPPER_CASE"),
            )];
        }
        let limit = ctx.heuristics.macro_max_word_length;
        if limit > 0 && is_upper_snake(name) && !name.contains('_') && name.len() > limit {
            return vec![Finding::new(
                node.name_pos,
                format!(
                    "macro `{name}` is {} characters without an underscore; separate its words",
                    name.len()
                ),
            )];
        }
        Vec::new()
    }
}

#[cfg(test)]
#[path = "headers_tests.rs"]
mod tests;
