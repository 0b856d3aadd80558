//! Declaration skeleton builder.
//!
//! Works on the significant tokens of a file (no trivia, no directives) and
//! keeps the full token list around to look at comments and gaps. Anything it
//! does not understand becomes an [`DeclKind::Unparsed`] node and parsing
//! resumes at the next `;` or balanced block.

mod ast;
mod body;
mod declarator;

pub use ast::{
    AccessSection, AliasForm, BraceInfo, Category, ControlBlock, DeclKind, DeclNode, EnumDecl,
    Enumerator, FunctionBody, FunctionDecl, FunctionRole, Gap, KeywordSpacing, NodeId, Param,
    Passing, RecordDecl, RecordKey, SignatureLayout, Span, SyntaxTree, VarScope, VariableDecl,
    Visibility,
};

use crate::lexer::{Position, Token, TokenKind};

/// Build the declaration tree for one file.
#[must_use]
pub fn parse(tokens: &[Token<'_>]) -> SyntaxTree {
    let mut parser = Parser::new(tokens);
    parser.run();
    parser.tree
}

#[derive(Debug, Clone)]
enum ScopeKind {
    File,
    Namespace,
    Record(String),
    Function,
}

#[derive(Debug, Clone)]
struct ScopeCtx {
    parent: NodeId,
    kind: ScopeKind,
    extern_c: bool,
}

impl ScopeCtx {
    fn nested(&self, parent: NodeId, kind: ScopeKind) -> Self {
        Self {
            parent,
            kind,
            extern_c: self.extern_c,
        }
    }

    fn record_name(&self) -> Option<&str> {
        match &self.kind {
            ScopeKind::Record(name) => Some(name),
            _ => None,
        }
    }
}

struct Parser<'s, 't> {
    tokens: &'t [Token<'s>],
    /// Indices into `tokens` of every significant token
    sig: Vec<usize>,
    directives: Vec<usize>,
    next_directive: usize,
    eof: Position,
    tree: SyntaxTree,
    template_params: Vec<String>,
}

impl<'s, 't> Parser<'s, 't> {
    fn new(tokens: &'t [Token<'s>]) -> Self {
        let mut sig = Vec::new();
        let mut directives = Vec::new();
        for (idx, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Directive => directives.push(idx),
                kind if kind.is_trivia() => {}
                _ => sig.push(idx),
            }
        }
        let eof = tokens.last().map_or_else(Position::start, Token::end);
        Self {
            tokens,
            sig,
            directives,
            next_directive: 0,
            eof,
            tree: SyntaxTree::new(Span::new(Position::start(), eof)),
            template_params: Vec::new(),
        }
    }

    fn run(&mut self) {
        let ctx = ScopeCtx {
            parent: NodeId::ROOT,
            kind: ScopeKind::File,
            extern_c: false,
        };
        let mut i = 0;
        while i < self.len() {
            i = self.parse_scope(i, &ctx);
            // Stray closing brace at file scope
            i += 1;
        }
        self.flush_directives(NodeId::ROOT, self.tokens.len());
    }

    // ---- token access -------------------------------------------------

    fn len(&self) -> usize {
        self.sig.len()
    }

    fn tok(&self, i: usize) -> Option<Token<'s>> {
        self.sig.get(i).map(|&t| self.tokens[t])
    }

    fn text(&self, i: usize) -> &'s str {
        self.tok(i).map_or("", |t| t.text)
    }

    fn is(&self, i: usize, text: &str) -> bool {
        self.tok(i).is_some_and(|t| t.is(text))
    }

    fn kind(&self, i: usize) -> Option<TokenKind> {
        self.tok(i).map(|t| t.kind)
    }

    fn is_ident(&self, i: usize) -> bool {
        self.kind(i) == Some(TokenKind::Identifier)
    }

    fn pos(&self, i: usize) -> Position {
        self.tok(i).map_or(self.eof, |t| t.pos)
    }

    fn end_pos(&self, i: usize) -> Position {
        self.tok(i).map_or(self.eof, |t| t.end())
    }

    /// Index of the bracket closing the one at `open`, any of `(`, `[`, `{`.
    fn matching(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for j in open..self.len() {
            match self.text(j) {
                "(" | "[" | "{" if self.kind(j) == Some(TokenKind::Punct) => depth += 1,
                ")" | "]" | "}" if self.kind(j) == Some(TokenKind::Punct) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(j);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Index of the bracket opening the one at `close`, searching backwards.
    fn matching_back(&self, close: usize) -> Option<usize> {
        let mut depth = 0usize;
        for j in (0..=close).rev() {
            match self.text(j) {
                ")" | "]" | "}" => depth += 1,
                "(" | "[" | "{" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(j);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Index of the `>` closing a template argument list opened at `open`.
    fn skip_angles(&self, open: usize) -> Option<usize> {
        let mut depth = 0i32;
        let mut j = open;
        while j < self.len() {
            match self.text(j) {
                "<" => depth += 1,
                ">" => depth -= 1,
                ">>" => depth -= 2,
                "(" | "[" => j = self.matching(j)?,
                ";" | "{" | "}" => return None,
                _ => {}
            }
            if depth <= 0 {
                return Some(j);
            }
            j += 1;
        }
        None
    }

    /// Index of the `;` ending the statement at `i`, skipping balanced
    /// groups. Stops at an unbalanced `}` or the end of input.
    fn statement_end(&self, mut i: usize) -> usize {
        while i < self.len() {
            match self.text(i) {
                ";" | "}" => return i,
                "(" | "[" | "{" => match self.matching(i) {
                    Some(close) => i = close,
                    None => return self.len(),
                },
                _ => {}
            }
            i += 1;
        }
        self.len()
    }

    /// Index just past an arbitrary declaration: up to a `;`, or a balanced
    /// block plus an optional `;`.
    fn skip_declaration(&self, mut i: usize) -> usize {
        while i < self.len() {
            match self.text(i) {
                ";" => return i + 1,
                "}" => return i,
                "{" => {
                    let Some(close) = self.matching(i) else {
                        return self.len();
                    };
                    return if self.is(close + 1, ";") {
                        close + 2
                    } else {
                        close + 1
                    };
                }
                "(" | "[" => match self.matching(i) {
                    Some(close) => i = close,
                    None => return self.len(),
                },
                _ => {}
            }
            i += 1;
        }
        self.len()
    }

    /// Join token texts, with a space only between adjacent words.
    fn join(&self, idxs: impl IntoIterator<Item = usize>) -> String {
        let mut out = String::new();
        let mut prev_word = false;
        for i in idxs {
            let Some(token) = self.tok(i) else { continue };
            let word = token.kind.is_word() || token.kind == TokenKind::Number;
            if word && prev_word {
                out.push(' ');
            }
            out.push_str(token.text);
            prev_word = word;
        }
        out
    }

    /// True when only whitespace precedes token index `t` on its line.
    fn starts_line(&self, t: usize) -> bool {
        self.tokens[..t]
            .iter()
            .rev()
            .find(|tok| tok.kind != TokenKind::Whitespace)
            .is_none_or(|tok| tok.kind == TokenKind::Newline)
    }

    fn brace_info(&self, open: usize, close: usize) -> BraceInfo {
        BraceInfo {
            open: self.pos(open),
            close: self.pos(close),
            own_line: self.sig.get(open).is_some_and(|&t| self.starts_line(t)),
        }
    }

    /// Comment block directly above token index `t`. A blank line or code
    /// in between detaches it.
    fn leading_comment(&self, t: usize) -> Option<String> {
        let mut comments = Vec::new();
        let mut newlines = 0;
        for k in (0..t).rev() {
            let token = self.tokens[k];
            match token.kind {
                TokenKind::Whitespace => {}
                TokenKind::Newline => {
                    newlines += 1;
                    if newlines > 1 {
                        break;
                    }
                }
                kind if kind.is_comment() => {
                    if !self.starts_line(k) {
                        break;
                    }
                    comments.push(token.text);
                    newlines = 0;
                }
                _ => break,
            }
        }
        if comments.is_empty() {
            return None;
        }
        comments.reverse();
        Some(comments.join("\n"))
    }

    // ---- node construction --------------------------------------------

    fn add_node(
        &mut self,
        ctx: &ScopeCtx,
        start: usize,
        name: String,
        name_pos: Position,
        kind: DeclKind,
    ) -> NodeId {
        let leading_comment = self
            .sig
            .get(start)
            .and_then(|&t| self.leading_comment(t));
        let start_pos = self.pos(start);
        self.tree.push(
            ctx.parent,
            DeclNode {
                id: NodeId::ROOT,
                name,
                kind,
                visibility: None,
                span: Span::new(start_pos, start_pos),
                name_pos,
                parent: None,
                children: Vec::new(),
                leading_comment,
                extern_c: ctx.extern_c,
            },
        )
    }

    fn finish_node(&mut self, id: NodeId, end: usize) {
        let end = self.end_pos(end.min(self.len().saturating_sub(1)));
        self.tree.get_mut(id).span.end = end;
    }

    fn add_unparsed(&mut self, ctx: &ScopeCtx, start: usize, next: usize) -> usize {
        let next = next.max(start + 1);
        let id = self.add_node(ctx, start, String::new(), self.pos(start), DeclKind::Unparsed);
        self.finish_node(id, next - 1);
        next
    }

    /// Turn directives before token index `upto` into macro and include nodes.
    fn flush_directives(&mut self, parent: NodeId, upto: usize) {
        while let Some(&t) = self.directives.get(self.next_directive) {
            if t >= upto {
                break;
            }
            self.next_directive += 1;
            self.add_directive(parent, t);
        }
    }

    fn add_directive(&mut self, parent: NodeId, t: usize) {
        let token = self.tokens[t];
        let body = token.text.trim_start_matches('#').trim_start();
        let (name, name_byte, kind) = if let Some(rest) = body.strip_prefix("define") {
            let def = rest.trim_start();
            let name: String = def
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if name.is_empty() || rest.len() == def.len() {
                return;
            }
            let params = def[name.len()..].strip_prefix('(').map(|p| {
                p.split(')')
                    .next()
                    .unwrap_or_default()
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            });
            let name_byte = token.text.len() - def.len();
            (name, name_byte, DeclKind::Macro { params })
        } else if let Some(rest) = body.strip_prefix("include") {
            let spec = rest.trim();
            let (system, close) = match spec.chars().next() {
                Some('<') => (true, '>'),
                Some('"') => (false, '"'),
                _ => return,
            };
            let header: String = spec[1..].chars().take_while(|c| *c != close).collect();
            (header.clone(), 0, DeclKind::Include { header, system })
        } else {
            return;
        };
        let column = token.pos.column + token.text[..name_byte].chars().count();
        let name_pos = Position::new(token.pos.line, column, token.pos.offset + name_byte);
        let leading_comment = self.leading_comment(t);
        self.tree.push(
            parent,
            DeclNode {
                id: NodeId::ROOT,
                name,
                kind,
                visibility: None,
                span: Span::new(token.pos, token.end()),
                name_pos,
                parent: None,
                children: Vec::new(),
                leading_comment,
                extern_c: false,
            },
        );
    }

    // ---- scopes -------------------------------------------------------

    /// Parse members until the `}` closing this scope; returns its index.
    fn parse_scope(&mut self, mut i: usize, ctx: &ScopeCtx) -> usize {
        while i < self.len() && !self.is(i, "}") {
            self.flush_directives(ctx.parent, self.sig[i]);
            let next = self.parse_member(i, ctx);
            i = next.max(i + 1);
        }
        self.flush_directives(ctx.parent, self.sig.get(i).copied().unwrap_or(usize::MAX));
        i
    }

    fn parse_member(&mut self, i: usize, ctx: &ScopeCtx) -> usize {
        let next = self.dispatch(i, i, ctx);
        self.template_params.clear();
        next
    }

    /// Parse the declaration whose first significant token is `start` and
    /// whose own keyword sits at `i` (after any template header).
    fn dispatch(&mut self, start: usize, i: usize, ctx: &ScopeCtx) -> usize {
        match self.text(i) {
            ";" => i + 1,
            "namespace" => self.parse_namespace(start, i, ctx),
            "inline" | "export" if self.is(i + 1, "namespace") => {
                self.parse_namespace(start, i + 1, ctx)
            }
            "extern" if self.is_c_linkage(i + 1) => self.parse_extern_c(start, i, ctx),
            "template" => self.parse_template(start, i, ctx),
            "using" => self.parse_using(start, i, ctx),
            "typedef" => self.parse_typedef(start, i, ctx),
            "class" | "struct" | "union" => self.parse_record(start, i, ctx),
            "enum" => self.parse_enum(start, i, ctx),
            "friend" | "static_assert" => self.skip_declaration(i),
            _ => self.parse_declaration(start, i, ctx),
        }
    }

    fn is_c_linkage(&self, i: usize) -> bool {
        self.kind(i) == Some(TokenKind::String) && self.text(i) == "\"C\""
    }

    fn parse_namespace(&mut self, start: usize, i: usize, ctx: &ScopeCtx) -> usize {
        let mut j = i + 1;
        let name_start = j;
        while self.is_ident(j) || self.is(j, "::") || self.is(j, "inline") {
            j += 1;
        }
        let name = self.join(name_start..j);
        if self.is(j, "[") {
            j = self.matching(j).map_or(j, |close| close + 1);
        }
        if !self.is(j, "{") {
            // Namespace alias or something unexpected
            return self.skip_declaration(i);
        }
        let name_pos = if name.is_empty() {
            self.pos(i)
        } else {
            self.pos(name_start)
        };
        let id = self.add_node(ctx, start, name, name_pos, DeclKind::Namespace { body: None });
        let inner = ctx.nested(id, ScopeKind::Namespace);
        let close = self.parse_scope(j + 1, &inner);
        let body = self.brace_info(j, close);
        self.tree.get_mut(id).kind = DeclKind::Namespace { body: Some(body) };
        self.finish_node(id, close);
        close + 1
    }

    fn parse_extern_c(&mut self, start: usize, i: usize, ctx: &ScopeCtx) -> usize {
        let inner = ScopeCtx {
            extern_c: true,
            ..ctx.clone()
        };
        if self.is(i + 2, "{") {
            return self.parse_scope(i + 3, &inner) + 1;
        }
        self.dispatch(start, i + 2, &inner)
    }

    fn parse_template(&mut self, start: usize, i: usize, ctx: &ScopeCtx) -> usize {
        if !self.is(i + 1, "<") {
            // Explicit instantiation
            return self.skip_declaration(i);
        }
        let Some(close) = self.skip_angles(i + 1) else {
            return self.add_unparsed(ctx, start, self.skip_declaration(i));
        };
        for j in i + 2..close {
            if (self.is(j, "typename") || self.is(j, "class")) && self.is_ident(j + 1) {
                self.template_params.push(self.text(j + 1).to_string());
            } else if self.is(j, "...") && self.is_ident(j + 1) {
                self.template_params.push(self.text(j + 1).to_string());
            }
        }
        let mut next = close + 1;
        if self.is(next, "requires") {
            next = self.skip_requires(next + 1);
        }
        self.dispatch(start, next, ctx)
    }

    /// Skip a requires-clause: a primary expression or a chain of them.
    fn skip_requires(&self, mut j: usize) -> usize {
        loop {
            if self.is(j, "(") {
                j = self.matching(j).map_or(self.len(), |c| c + 1);
            } else {
                while self.is_ident(j) || self.is(j, "::") {
                    j += 1;
                }
                if self.is(j, "<") {
                    j = self.skip_angles(j).map_or(self.len(), |c| c + 1);
                }
            }
            if self.is(j, "&&") || self.is(j, "||") {
                j += 1;
            } else {
                return j;
            }
        }
    }

    fn parse_using(&mut self, start: usize, i: usize, ctx: &ScopeCtx) -> usize {
        let end = self.statement_end(i);
        if self.is(i + 1, "namespace") {
            let name = self.join(i + 2..end);
            let id = self.add_node(ctx, start, name, self.pos(i + 2), DeclKind::UsingDirective);
            self.finish_node(id, end);
            return end + 1;
        }
        let mut j = i + 1;
        if self.is_ident(j) {
            let name_idx = j;
            j += 1;
            if self.is(j, "[") {
                j = self.matching(j).map_or(j, |close| close + 1);
            }
            if self.is(j, "=") {
                let kind = DeclKind::Alias {
                    form: AliasForm::Using,
                    target: self.join(j + 1..end),
                };
                let name = self.text(name_idx).to_string();
                let id = self.add_node(ctx, start, name, self.pos(name_idx), kind);
                self.finish_node(id, end);
                return end + 1;
            }
        }
        let first = if self.is(i + 1, "typename") { i + 2 } else { i + 1 };
        let target = self.join(first..end);
        let segments: Vec<&str> = target
            .split("::")
            .map(|s| s.split('<').next().unwrap_or(s))
            .collect();
        let name = segments.last().copied().unwrap_or_default().to_string();
        let inherits_constructor = ctx.record_name().is_some()
            && segments.len() >= 2
            && segments[segments.len() - 1] == segments[segments.len() - 2];
        let name_pos = self.pos(end.saturating_sub(1));
        let kind = DeclKind::UsingDeclaration {
            target,
            inherits_constructor,
        };
        let id = self.add_node(ctx, start, name, name_pos, kind);
        self.finish_node(id, end);
        end + 1
    }

    fn parse_typedef(&mut self, start: usize, i: usize, ctx: &ScopeCtx) -> usize {
        let end = self.statement_end(i);
        let name_idx = (i + 1..end)
            .find(|&j| self.is(j, "(") && self.is(j + 1, "*") && self.is_ident(j + 2))
            .map(|j| j + 2)
            .or_else(|| self.last_identifier_before(i + 1, end));
        let Some(name_idx) = name_idx else {
            return self.add_unparsed(ctx, start, end + 1);
        };
        let target = self.join((i + 1..end).filter(|&j| j != name_idx));
        let kind = DeclKind::Alias {
            form: AliasForm::Typedef,
            target,
        };
        let name = self.text(name_idx).to_string();
        let id = self.add_node(ctx, start, name, self.pos(name_idx), kind);
        self.finish_node(id, end);
        end + 1
    }

    /// Last identifier in `[from, to)`, skipping trailing array extents.
    fn last_identifier_before(&self, from: usize, to: usize) -> Option<usize> {
        let mut j = to;
        while j > from {
            j -= 1;
            if self.is(j, "]") {
                j = self.matching_back(j)?;
            } else if self.is_ident(j) {
                return Some(j);
            } else {
                return None;
            }
        }
        None
    }

    /// Skip `[[...]]`, `alignas(...)` and compiler attribute groups.
    fn skip_attributes(&self, mut j: usize) -> usize {
        loop {
            if self.is(j, "[") && self.is(j + 1, "[") {
                j = self.matching(j).map_or(self.len(), |c| c + 1);
            } else if matches!(self.text(j), "alignas" | "__attribute__" | "__declspec")
                && self.is(j + 1, "(")
            {
                j = self.matching(j + 1).map_or(self.len(), |c| c + 1);
            } else {
                return j;
            }
        }
    }

    fn parse_record(&mut self, start: usize, i: usize, ctx: &ScopeCtx) -> usize {
        let Some(key) = RecordKey::from_keyword(self.text(i)) else {
            return self.parse_declaration(start, i, ctx);
        };
        let mut j = self.skip_attributes(i + 1);
        let mut name_idx = None;
        loop {
            let ends_head = self.is(j + 1, "{") || self.is(j + 1, ":");
            if self.is(j, "final") && name_idx.is_some() && ends_head {
                j += 1;
                break;
            }
            if self.is_ident(j) {
                name_idx = Some(j);
                j += 1;
            } else if self.is(j, "::") {
                j += 1;
            } else if self.is(j, "<") && name_idx.is_some() {
                match self.skip_angles(j) {
                    Some(close) => j = close + 1,
                    None => return self.add_unparsed(ctx, start, self.skip_declaration(i)),
                }
            } else {
                break;
            }
        }
        if self.is(j, ";") {
            // Forward declaration
            return j + 1;
        }
        let mut bases = Vec::new();
        if self.is(j, ":") {
            let (list_end, names) = self.parse_bases(j + 1);
            j = list_end;
            bases = names;
        }
        if !self.is(j, "{") {
            return self.parse_declaration(start, i, ctx);
        }
        let (name, name_pos) = name_idx.map_or_else(
            || (String::new(), self.pos(i)),
            |n| (self.text(n).to_string(), self.pos(n)),
        );
        let placeholder = self.brace_info(j, j);
        let kind = DeclKind::Record(RecordDecl {
            key,
            bases,
            sections: Vec::new(),
            body: placeholder,
        });
        let id = self.add_node(ctx, start, name.clone(), name_pos, kind);
        let inner = ctx.nested(id, ScopeKind::Record(name));
        let (close, sections) = self.parse_record_body(j + 1, key, &inner);
        let body = self.brace_info(j, close);
        if let DeclKind::Record(record) = &mut self.tree.get_mut(id).kind {
            record.sections = sections;
            record.body = body;
        }
        let end = if self.is(close + 1, ";") {
            close + 1
        } else {
            self.statement_end(close + 1)
        };
        self.finish_node(id, end);
        end + 1
    }

    /// Base-specifier list up to the opening brace.
    fn parse_bases(&self, mut j: usize) -> (usize, Vec<String>) {
        let mut bases = Vec::new();
        let mut current = Vec::new();
        while j < self.len() && !self.is(j, "{") && !self.is(j, ";") {
            match self.text(j) {
                "," => bases.push(self.join(current.drain(..))),
                "public" | "private" | "protected" | "virtual" => {}
                "<" => {
                    let close = self.skip_angles(j).unwrap_or(j);
                    current.extend(j..=close);
                    j = close;
                }
                _ => current.push(j),
            }
            j += 1;
        }
        if !current.is_empty() {
            bases.push(self.join(current));
        }
        (j, bases)
    }

    fn parse_record_body(
        &mut self,
        mut i: usize,
        key: RecordKey,
        ctx: &ScopeCtx,
    ) -> (usize, Vec<AccessSection>) {
        let mut sections = vec![AccessSection {
            visibility: key.default_visibility(),
            label: None,
            members: Vec::new(),
            exempt: false,
        }];
        while i < self.len() && !self.is(i, "}") {
            self.flush_directives(ctx.parent, self.sig[i]);
            if let Some(visibility) = Visibility::from_keyword(self.text(i))
                && self.is(i + 1, ":")
            {
                sections.push(AccessSection {
                    visibility,
                    label: Some(self.pos(i)),
                    members: Vec::new(),
                    exempt: false,
                });
                i += 2;
                continue;
            }
            let before = self.tree.get(ctx.parent).children.len();
            let next = self.parse_member(i, ctx);
            let added: Vec<NodeId> = self.tree.get(ctx.parent).children[before..].to_vec();
            if let Some(section) = sections.last_mut() {
                for child in added {
                    let node = self.tree.get_mut(child);
                    if is_section_member(node.category()) {
                        node.visibility = Some(section.visibility);
                        section.members.push(child);
                    }
                }
            }
            i = next.max(i + 1);
        }
        self.flush_directives(ctx.parent, self.sig.get(i).copied().unwrap_or(usize::MAX));
        if sections[0].members.is_empty() && sections.len() > 1 {
            sections.remove(0);
        }
        for section in &mut sections {
            section.exempt = section.members.iter().all(|&m| {
                matches!(
                    self.tree.get(m).kind,
                    DeclKind::Alias { .. }
                        | DeclKind::UsingDeclaration {
                            inherits_constructor: true,
                            ..
                        }
                )
            });
        }
        (i, sections)
    }

    fn parse_enum(&mut self, start: usize, i: usize, ctx: &ScopeCtx) -> usize {
        let mut j = i + 1;
        let scoped = self.is(j, "class") || self.is(j, "struct");
        if scoped {
            j += 1;
        }
        j = self.skip_attributes(j);
        let name_idx = self.is_ident(j).then_some(j);
        if name_idx.is_some() {
            j += 1;
        }
        let mut underlying = None;
        if self.is(j, ":") {
            let from = j + 1;
            while j < self.len() && !self.is(j, "{") && !self.is(j, ";") {
                j += 1;
            }
            underlying = Some(self.join(from..j));
        }
        if self.is(j, ";") && name_idx.is_some() {
            // Opaque declaration
            return j + 1;
        }
        if !self.is(j, "{") {
            return self.parse_declaration(start, i, ctx);
        }
        let close = self.matching(j).unwrap_or(self.len());
        let enumerators = self.parse_enumerators(j + 1, close);
        let (name, name_pos) = name_idx.map_or_else(
            || (String::new(), self.pos(i)),
            |n| (self.text(n).to_string(), self.pos(n)),
        );
        let kind = DeclKind::Enum(EnumDecl {
            scoped,
            underlying,
            enumerators,
            body: self.brace_info(j, close),
        });
        let id = self.add_node(ctx, start, name, name_pos, kind);
        let end = if self.is(close + 1, ";") {
            close + 1
        } else {
            self.statement_end(close + 1)
        };
        self.finish_node(id, end);
        end + 1
    }

    fn parse_enumerators(&self, from: usize, to: usize) -> Vec<Enumerator> {
        let mut enumerators = Vec::new();
        let mut j = from;
        while j < to {
            let mut end = j;
            while end < to && !self.is(end, ",") {
                if matches!(self.text(end), "(" | "[" | "{") {
                    end = self.matching(end).unwrap_or(to);
                }
                end += 1;
            }
            if self.is_ident(j) {
                let value = self
                    .is(j + 1, "=")
                    .then(|| self.join(j + 2..end.min(to)));
                enumerators.push(Enumerator {
                    name: self.text(j).to_string(),
                    pos: self.pos(j),
                    value,
                });
            }
            j = end + 1;
        }
        enumerators
    }
}

const fn is_section_member(category: Category) -> bool {
    !matches!(
        category,
        Category::Macro | Category::Include | Category::Unparsed | Category::UsingDirective
    )
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
