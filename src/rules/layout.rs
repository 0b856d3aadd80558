//! Line width and brace placement.

use super::{Finding, Rule, RuleContext};
use crate::lexer::Position;
use crate::parser::{BraceInfo, Category, ControlBlock, DeclKind, DeclNode, FunctionDecl};

/// Control keywords whose braces stay even around a single statement.
const BRACES_REQUIRED: &[&str] = &["do", "switch", "try", "catch"];

pub struct LineWidth;

impl Rule for LineWidth {
    fn id(&self) -> &'static str {
        "line-width"
    }

    fn description(&self) -> &'static str {
        "Lines fit within the maximum width; signatures are split only when they must be"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::TranslationUnit, Category::Function]
    }

    fn check(&self, node: &DeclNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        match &node.kind {
            DeclKind::TranslationUnit => long_lines(ctx),
            DeclKind::Function(decl) => unnecessary_split(node, decl, ctx).into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

fn long_lines(ctx: &RuleContext<'_>) -> Vec<Finding> {
    let max = ctx.max_line_width;
    let mut findings = Vec::new();
    let mut offset = 0;
    for (idx, raw) in ctx.source.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let width = line.chars().count();
        if width > max {
            let overflow = line.char_indices().nth(max).map_or(0, |(byte, _)| byte);
            findings.push(Finding::new(
                Position::new(idx + 1, max + 1, offset + overflow),
                format!("line is {width} characters long (maximum {max})"),
            ));
        }
        offset += raw.len() + 1;
    }
    findings
}

fn unnecessary_split(
    node: &DeclNode,
    decl: &FunctionDecl,
    ctx: &RuleContext<'_>,
) -> Option<Finding> {
    let layout = &decl.signature;
    if !layout.is_multiline() {
        return None;
    }
    let joined = layout.joined_width?;
    if joined > ctx.max_line_width {
        return None;
    }
    if layout.split_at_return_type && ctx.heuristics.allow_return_type_split {
        return None;
    }
    let lines = layout.end.line - layout.start.line + 1;
    Some(Finding::new(
        layout.start,
        format!(
            "signature of `{}` spans {lines} lines but fits in {joined} columns on one line",
            node.name
        ),
    ))
}

pub struct BraceStyle;

impl Rule for BraceStyle {
    fn id(&self) -> &'static str {
        "brace-style"
    }

    fn description(&self) -> &'static str {
        "Allman braces for multi-line bodies, no braces around single statements, one space around control parentheses"
    }

    fn categories(&self) -> &'static [Category] {
        &[
            Category::Namespace,
            Category::Class,
            Category::Struct,
            Category::Union,
            Category::Enum,
            Category::EnumClass,
            Category::Function,
        ]
    }

    fn check(&self, node: &DeclNode, _ctx: &RuleContext<'_>) -> Vec<Finding> {
        let what = node.category();
        match &node.kind {
            DeclKind::Namespace { body: Some(brace) } => {
                allman(*brace, what.as_str(), &node.name).into_iter().collect()
            }
            DeclKind::Record(record) => allman(record.body, what.as_str(), &node.name)
                .into_iter()
                .collect(),
            DeclKind::Enum(decl) => allman(decl.body, "enum", &node.name).into_iter().collect(),
            DeclKind::Function(decl) => function_braces(node, decl),
            _ => Vec::new(),
        }
    }
}

/// A brace opening a multi-line body must start its own line.
fn allman(brace: BraceInfo, what: &str, name: &str) -> Option<Finding> {
    if brace.own_line || brace.is_single_line() {
        return None;
    }
    let subject = if name.is_empty() {
        what.to_string()
    } else {
        format!("{what} `{name}`")
    };
    Some(Finding::new(
        brace.open,
        format!("opening brace of {subject} should be on its own line"),
    ))
}

fn function_braces(node: &DeclNode, decl: &FunctionDecl) -> Vec<Finding> {
    let Some(body) = &decl.body else {
        return Vec::new();
    };
    let mut findings: Vec<Finding> = allman(body.brace, "function", &node.name)
        .into_iter()
        .collect();
    findings.extend(body.blocks.iter().filter_map(control_block));
    for spacing in &body.spacing {
        let keyword = &spacing.keyword;
        if let Some(gap) = &spacing.before_paren
            && gap.text != " "
        {
            findings.push(Finding::new(
                gap.pos,
                format!("expected exactly one space between `{keyword}` and `(`"),
            ));
        }
        if let Some(gap) = &spacing.after_paren
            && gap.text != " "
        {
            findings.push(Finding::new(
                gap.pos,
                format!("expected exactly one space after the `)` of `{keyword}`"),
            ));
        }
    }
    findings
}

fn control_block(block: &ControlBlock) -> Option<Finding> {
    let keyword = block.keyword.as_str();
    if block.statement_count == 1
        && !block.single_statement_is_if
        && !BRACES_REQUIRED.contains(&keyword)
    {
        return Some(Finding::new(
            block.brace.open,
            format!("unnecessary braces around the single statement of `{keyword}`"),
        ));
    }
    if block.statement_count > 1 {
        return allman(block.brace, &format!("`{keyword}` block"), "");
    }
    None
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
