//! Statement-level walk of function bodies.

use super::{
    ControlBlock, FunctionBody, Gap, KeywordSpacing, Parser, ScopeCtx, VarScope, VariableDecl,
    declarator::TYPE_KEYWORDS,
};
use crate::lexer::TokenKind;

const ASSIGNMENT_OPS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=",
];

/// Calls whose first argument is treated as modified.
const MUTATING_CALLS: &[&str] = &["move", "swap", "exchange", "forward", "getline"];

/// Keywords followed by a parenthesised expression that is not a call.
const NON_CALL_KEYWORDS: &[&str] = &[
    "if",
    "while",
    "for",
    "switch",
    "return",
    "catch",
    "sizeof",
    "alignof",
    "decltype",
    "noexcept",
    "typeid",
    "static_assert",
];

const LOCAL_SPECIFIERS: &[&str] = &[
    "const",
    "constexpr",
    "static",
    "volatile",
    "thread_local",
    "register",
    "constinit",
];

#[derive(Debug, Default)]
struct BodyState {
    blocks: Vec<ControlBlock>,
    spacing: Vec<KeywordSpacing>,
}

#[derive(Debug, Clone, Copy)]
struct BlockInfo {
    close: usize,
    count: usize,
    single_is_if: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stmt {
    If,
    Other,
    /// Labels, `case` and empty statements do not count
    Uncounted,
}

impl Parser<'_, '_> {
    /// Parse the body opened at `open`. `ctx.parent` is the function node
    /// that receives local variables.
    pub(super) fn parse_function_body(
        &mut self,
        open: usize,
        ctx: &ScopeCtx,
    ) -> (FunctionBody, usize) {
        let mut state = BodyState::default();
        let block = self.parse_block(open, ctx, &mut state);
        let body = FunctionBody {
            brace: self.brace_info(open, block.close),
            statement_count: block.count,
            blocks: state.blocks,
            spacing: state.spacing,
            modified: self.modified_names(open, block.close),
            call_arguments: self.call_argument_names(open, block.close),
        };
        (body, block.close)
    }

    fn parse_block(&mut self, open: usize, ctx: &ScopeCtx, state: &mut BodyState) -> BlockInfo {
        let mut i = open + 1;
        let mut count = 0;
        let mut first = None;
        while i < self.len() && !self.is(i, "}") {
            let (next, stmt) = self.parse_statement(i, ctx, state);
            if stmt != Stmt::Uncounted {
                count += 1;
                first.get_or_insert(stmt);
            }
            i = next.max(i + 1);
        }
        BlockInfo {
            close: i,
            count,
            single_is_if: count == 1 && first == Some(Stmt::If),
        }
    }

    fn parse_statement(&mut self, i: usize, ctx: &ScopeCtx, state: &mut BodyState) -> (usize, Stmt) {
        match self.text(i) {
            "{" => (self.parse_block(i, ctx, state).close + 1, Stmt::Other),
            "if" => (self.parse_if(i, ctx, state), Stmt::If),
            "for" | "while" | "switch" => (self.parse_loop(i, ctx, state), Stmt::Other),
            "do" => (self.parse_do(i, ctx, state), Stmt::Other),
            "try" => (self.parse_try(i, ctx, state), Stmt::Other),
            ";" => (i + 1, Stmt::Uncounted),
            "case" | "default" if !self.is(i + 1, ";") => {
                let mut j = i + 1;
                while j < self.len() && !self.is(j, ":") && !self.is(j, "}") {
                    j += 1;
                }
                (j + 1, Stmt::Uncounted)
            }
            "public" | "private" | "protected" if self.is(i + 1, ":") => (i + 2, Stmt::Uncounted),
            _ if self.is_ident(i) && self.is(i + 1, ":") => (i + 2, Stmt::Uncounted),
            _ => {
                let end = self.statement_end(i);
                self.parse_locals(i, end, ctx);
                let next = if self.is(end, ";") { end + 1 } else { end };
                (next, Stmt::Other)
            }
        }
    }

    /// Record spacing around the parenthesized header of the control
    /// keyword at `kw` and return the index of its `)`.
    fn control_header(&self, kw: usize, state: &mut BodyState) -> Option<usize> {
        let mut open = kw + 1;
        if self.is(open, "constexpr") {
            open += 1;
        }
        if !self.is(open, "(") {
            return None;
        }
        let close = self.matching(open)?;
        let after_paren = if self.is(close + 1, ";") {
            None
        } else {
            self.gap(close, close + 1)
        };
        state.spacing.push(KeywordSpacing {
            keyword: self.text(kw).to_string(),
            keyword_pos: self.pos(kw),
            before_paren: self.gap(open - 1, open),
            after_paren,
        });
        Some(close)
    }

    /// Text between two significant tokens on the same line.
    fn gap(&self, a: usize, b: usize) -> Option<Gap> {
        let (first, second) = (self.tok(a)?, self.tok(b)?);
        if first.end().line != second.pos.line {
            return None;
        }
        let text = self.tokens[self.sig[a] + 1..self.sig[b]]
            .iter()
            .map(|t| t.text)
            .collect();
        Some(Gap {
            pos: first.end(),
            text,
        })
    }

    /// Parse the statement governed by the keyword at `kw`, starting at
    /// `body`. Braced bodies are recorded as control blocks.
    fn control_body(
        &mut self,
        kw: usize,
        body: usize,
        ctx: &ScopeCtx,
        state: &mut BodyState,
    ) -> usize {
        if !self.is(body, "{") {
            return self.parse_statement(body, ctx, state).0;
        }
        let block = self.parse_block(body, ctx, state);
        state.blocks.push(ControlBlock {
            keyword: self.text(kw).to_string(),
            keyword_pos: self.pos(kw),
            brace: self.brace_info(body, block.close),
            statement_count: block.count,
            single_statement_is_if: block.single_is_if,
        });
        block.close + 1
    }

    fn parse_if(&mut self, i: usize, ctx: &ScopeCtx, state: &mut BodyState) -> usize {
        let Some(close) = self.control_header(i, state) else {
            return self.statement_end(i) + 1;
        };
        let next = self.control_body(i, close + 1, ctx, state);
        if !self.is(next, "else") {
            return next;
        }
        if self.is(next + 1, "if") {
            return self.parse_if(next + 1, ctx, state);
        }
        self.control_body(next, next + 1, ctx, state)
    }

    fn parse_loop(&mut self, i: usize, ctx: &ScopeCtx, state: &mut BodyState) -> usize {
        let Some(close) = self.control_header(i, state) else {
            return self.statement_end(i) + 1;
        };
        if self.is(i, "for") {
            let init_end = (i + 2..close)
                .find(|&k| self.is(k, ";") || self.is(k, ":"))
                .unwrap_or(close);
            self.parse_locals(i + 2, init_end, ctx);
        }
        self.control_body(i, close + 1, ctx, state)
    }

    fn parse_do(&mut self, i: usize, ctx: &ScopeCtx, state: &mut BodyState) -> usize {
        let next = self.control_body(i, i + 1, ctx, state);
        if !self.is(next, "while") {
            return next;
        }
        match self.control_header(next, state) {
            Some(close) if self.is(close + 1, ";") => close + 2,
            Some(close) => close + 1,
            None => self.statement_end(next) + 1,
        }
    }

    fn parse_try(&mut self, i: usize, ctx: &ScopeCtx, state: &mut BodyState) -> usize {
        let mut next = self.control_body(i, i + 1, ctx, state);
        while self.is(next, "catch") {
            let Some(close) = self.control_header(next, state) else {
                return next + 1;
            };
            next = self.control_body(next, close + 1, ctx, state);
        }
        next
    }

    /// Add local variable nodes when `[from, to)` is a declaration.
    fn parse_locals(&mut self, from: usize, to: usize, ctx: &ScopeCtx) {
        let Some((name, type_start)) = self.local_declarator(from, to) else {
            return;
        };
        let type_idxs: Vec<usize> = (type_start..name)
            .filter(|&k| !LOCAL_SPECIFIERS[1..].contains(&self.text(k)))
            .collect();
        let template = VariableDecl {
            ty: self.join(type_idxs),
            scope: VarScope::Local,
            is_const: self.declares_const(from, name),
            is_constexpr: (from..name).any(|k| self.is(k, "constexpr")),
            is_static: (from..name).any(|k| self.is(k, "static")),
        };
        let (ids, _) = self.add_declarators(from, name, &template, ctx);
        for id in ids {
            self.finish_node(id, to.saturating_sub(1).max(name));
        }
    }

    /// Name index and type start of a local declaration in `[from, to)`.
    fn local_declarator(&self, from: usize, to: usize) -> Option<(usize, usize)> {
        let mut j = from;
        while j < to && LOCAL_SPECIFIERS.contains(&self.text(j)) {
            j += 1;
        }
        let type_start = j;
        let first = self.tok(j)?;
        match first.kind {
            TokenKind::Keyword if TYPE_KEYWORDS.contains(&first.text) => {
                while j < to && TYPE_KEYWORDS.contains(&self.text(j)) {
                    if self.is(j, "decltype") && self.is(j + 1, "(") {
                        j = self.matching(j + 1)?;
                    }
                    j += 1;
                }
            }
            TokenKind::Identifier => j = self.skip_type_name(j, to)?,
            _ => return None,
        }
        while j < to && matches!(self.text(j), "const" | "volatile" | "*" | "&" | "&&") {
            j += 1;
        }
        if j >= to || !self.is_ident(j) {
            return None;
        }
        let follows = j + 1 == to
            || matches!(self.text(j + 1), "=" | ";" | "{" | "(" | "[" | "," | ":");
        follows.then_some((j, type_start))
    }

    /// Skip `A::B<C>::D`, returning the index after it.
    fn skip_type_name(&self, mut j: usize, to: usize) -> Option<usize> {
        loop {
            if !self.is_ident(j) {
                return None;
            }
            j += 1;
            if self.is(j, "<") {
                let close = self.skip_angles(j)?;
                if close >= to {
                    return None;
                }
                j = close + 1;
            }
            if self.is(j, "::") && j + 1 < to {
                j += 1;
            } else {
                return Some(j);
            }
        }
    }

    /// Names assigned, incremented, moved, read into or mutated through a
    /// member call anywhere in `(open, close)`.
    fn modified_names(&self, open: usize, close: usize) -> Vec<String> {
        let mut names = Vec::new();
        for k in open + 1..close {
            let text = self.text(k);
            let target = if ASSIGNMENT_OPS.contains(&text) && self.kind(k) == Some(TokenKind::Punct) {
                self.lvalue_base(k.checked_sub(1))
            } else {
                match text {
                    "++" | "--" if self.is_ident(k + 1) && !self.ends_operand(k - 1) => {
                        Some(k + 1)
                    }
                    "++" | "--" => self.lvalue_base(k.checked_sub(1)),
                    ">>" if self.is_ident(k + 1) => Some(k + 1),
                    "." | "->" if self.is_ident(k + 1) && self.is(k + 2, "(") => {
                        self.lvalue_base(k.checked_sub(1))
                    }
                    "&" if self.is_ident(k + 1)
                        && matches!(self.text(k - 1), "(" | "," | "=" | "return") =>
                    {
                        Some(k + 1)
                    }
                    _ if MUTATING_CALLS.contains(&text)
                        && self.is(k + 1, "(")
                        && self.is_ident(k + 2) =>
                    {
                        Some(k + 2)
                    }
                    _ => None,
                }
            };
            if let Some(t) = target {
                let name = self.text(t).to_string();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names.sort();
        names
    }

    /// Identifiers passed as a complete argument to a call or constructor
    /// anywhere in `(open, close)`.
    fn call_argument_names(&self, open: usize, close: usize) -> Vec<String> {
        let mut names = Vec::new();
        for k in open + 1..close {
            if !self.is_ident(k)
                || !matches!(self.text(k - 1), "(" | ",")
                || !matches!(self.text(k + 1), ")" | ",")
            {
                continue;
            }
            let Some(paren) = self.enclosing_paren(k, open) else {
                continue;
            };
            let callee = paren - 1;
            let is_call = (self.is_ident(callee) || self.is(callee, ">"))
                && !NON_CALL_KEYWORDS.contains(&self.text(callee));
            let name = self.text(k).to_string();
            if is_call && !names.contains(&name) {
                names.push(name);
            }
        }
        names.sort();
        names
    }

    /// The `(` of the argument list directly containing `k`, if any.
    fn enclosing_paren(&self, k: usize, floor: usize) -> Option<usize> {
        let mut depth = 0usize;
        for j in (floor + 1..k).rev() {
            match self.text(j) {
                ")" | "]" => depth += 1,
                "[" if depth > 0 => depth -= 1,
                "(" if depth > 0 => depth -= 1,
                "(" => return Some(j),
                "[" | "{" | "}" | ";" => return None,
                _ => {}
            }
        }
        None
    }

    fn ends_operand(&self, k: usize) -> bool {
        self.is_ident(k) || self.is(k, ")") || self.is(k, "]")
    }

    /// Root identifier of `a.b[i]->c` ending at `k`.
    fn lvalue_base(&self, k: Option<usize>) -> Option<usize> {
        let mut k = k?;
        loop {
            if self.is(k, "]") || self.is(k, ")") {
                k = self.matching_back(k)?.checked_sub(1)?;
                continue;
            }
            if !self.is_ident(k) {
                return None;
            }
            if k >= 2 && (self.is(k - 1, ".") || self.is(k - 1, "->")) {
                k -= 2;
                continue;
            }
            return Some(k);
        }
    }
}

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;
