use std::path::Path;

use super::{Finding, Rule, RuleContext, apply};
use crate::config::Config;
use crate::language::SourceKind;
use crate::lexer::tokenize;
use crate::parser::parse;

pub fn check_with(rule: &dyn Rule, src: &str, kind: SourceKind, config: &Config) -> Vec<Finding> {
    let stream = tokenize(src);
    let tree = parse(&stream.tokens);
    let path = match kind {
        SourceKind::Interface => Path::new("test.hpp"),
        SourceKind::Implementation => Path::new("test.cpp"),
    };
    let ctx = RuleContext {
        path,
        source: src,
        kind,
        tokens: &stream.tokens,
        tree: &tree,
        max_line_width: config.max_line_width,
        heuristics: &config.heuristics,
    };
    apply(rule, &ctx)
}

pub fn check_source(rule: &dyn Rule, src: &str) -> Vec<Finding> {
    check_with(rule, src, SourceKind::Implementation, &Config::default())
}

pub fn check_header(rule: &dyn Rule, src: &str) -> Vec<Finding> {
    check_with(rule, src, SourceKind::Interface, &Config::default())
}

pub fn messages(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.message.as_str()).collect()
}

/// `(line, column)` of every finding.
pub fn positions(findings: &[Finding]) -> Vec<(usize, usize)> {
    findings.iter().map(|f| (f.pos.line, f.pos.column)).collect()
}
