//! Functions and variables: everything that is not introduced by its own
//! keyword.

use super::{
    DeclKind, FunctionDecl, FunctionRole, NodeId, Param, Parser, Passing, ScopeCtx, ScopeKind,
    SignatureLayout, VarScope, VariableDecl,
};
use crate::lexer::TokenKind;

/// Declaration specifiers that are not part of a type.
const SPECIFIERS: &[&str] = &[
    "static",
    "extern",
    "inline",
    "virtual",
    "explicit",
    "constexpr",
    "consteval",
    "constinit",
    "friend",
    "thread_local",
    "mutable",
    "register",
];

pub(super) const TYPE_KEYWORDS: &[&str] = &[
    "void", "bool", "char", "char8_t", "char16_t", "char32_t", "wchar_t", "short", "int", "long",
    "float", "double", "signed", "unsigned", "auto", "decltype",
];

const CV_AND_TAGS: &[&str] = &["const", "volatile", "struct", "class", "enum", "typename"];

/// The declarator part of a declaration head.
#[derive(Debug, Clone, Copy)]
struct Declarator {
    /// `operator` keyword or the identifier being declared
    name: usize,
    /// First token of the qualified name, `~` included
    name_start: usize,
    operator: bool,
    destructor: bool,
}

impl Parser<'_, '_> {
    pub(super) fn parse_declaration(&mut self, start: usize, i: usize, ctx: &ScopeCtx) -> usize {
        let (stop, operator) = self.scan_head(i);
        let name = operator.or_else(|| self.declarator_name(i, stop));
        let Some(name) = name else {
            return self.add_unparsed(ctx, start, self.skip_declaration(i));
        };
        let destructor = name > i && self.is(name - 1, "~");
        let declarator = Declarator {
            name,
            name_start: self.qualified_start(i, name),
            operator: operator.is_some(),
            destructor,
        };
        if self.is(stop, "(") {
            if self.is(stop + 1, "*") || self.is(stop + 1, "&") || self.is(stop + 1, "^") {
                // Function pointer variable
                return self.add_unparsed(ctx, start, self.skip_declaration(i));
            }
            return self.parse_function(start, i, declarator, stop, ctx);
        }
        if matches!(self.text(stop), ";" | "=" | "," | "{" | "[" | ":") {
            return self.parse_variables(start, i, declarator, ctx);
        }
        self.add_unparsed(ctx, start, self.skip_declaration(i))
    }

    /// Scan forward to the token that ends the declaration head. Returns it
    /// and the index of an `operator` keyword if one names the declaration.
    fn scan_head(&self, i: usize) -> (usize, Option<usize>) {
        let mut j = i;
        while j < self.len() {
            match self.text(j) {
                ";" | "{" | "}" | "=" | "," | ":" => break,
                "operator" => return (self.skip_operator_name(j), Some(j)),
                "(" if j > i
                    && matches!(
                        self.text(j - 1),
                        "decltype" | "alignas" | "__attribute__" | "__declspec"
                    ) =>
                {
                    match self.matching(j) {
                        Some(close) => j = close,
                        None => return (self.len(), None),
                    }
                }
                "[" if self.is(j + 1, "[") => match self.matching(j) {
                    Some(close) => j = close,
                    None => return (self.len(), None),
                },
                "(" | "[" => break,
                "<" if j > i && self.is_ident(j - 1) => match self.skip_angles(j) {
                    Some(close) => j = close,
                    None => break,
                },
                _ => {}
            }
            j += 1;
        }
        (j, None)
    }

    /// Index of the `(` opening the parameters of `operator...`.
    fn skip_operator_name(&self, op: usize) -> usize {
        let mut k = op + 1;
        if self.is(k, "(") && self.is(k + 1, ")") {
            return k + 2;
        }
        while k < self.len() && !self.is(k, "(") && !self.is(k, ";") {
            k += 1;
        }
        k
    }

    /// Identifier right before `stop`, skipping a template argument list.
    fn declarator_name(&self, i: usize, stop: usize) -> Option<usize> {
        let mut k = stop.checked_sub(1)?;
        if k < i {
            return None;
        }
        if (self.is(k, ">") || self.is(k, ">>")) && k > i {
            k = self.angles_back(i, k)?.checked_sub(1)?;
        }
        (k >= i && self.is_ident(k)).then_some(k)
    }

    fn angles_back(&self, floor: usize, close: usize) -> Option<usize> {
        let mut depth = 0i32;
        for k in (floor..=close).rev() {
            match self.text(k) {
                ">" => depth += 1,
                ">>" => depth += 2,
                "<" => {
                    depth -= 1;
                    if depth <= 0 {
                        return Some(k);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Walk back over `A::B::` qualifiers and a destructor `~`.
    fn qualified_start(&self, floor: usize, name: usize) -> usize {
        let mut k = name;
        if k > floor && self.is(k - 1, "~") {
            k -= 1;
        }
        while k >= floor + 2 && self.is(k - 1, "::") {
            let mut q = k - 2;
            if self.is(q, ">") {
                match self.angles_back(floor, q).and_then(|lt| lt.checked_sub(1)) {
                    Some(before) if before >= floor => q = before,
                    _ => break,
                }
            }
            if !self.is_ident(q) {
                break;
            }
            k = q;
        }
        k
    }

    /// Token indices in `[from, to)` that belong to a type: specifiers and
    /// attributes removed.
    fn type_tokens(&self, from: usize, to: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut k = from;
        while k < to {
            let skipped = self.skip_attributes(k);
            if skipped > k {
                k = skipped;
                continue;
            }
            if !SPECIFIERS.contains(&self.text(k)) {
                out.push(k);
            }
            k += 1;
        }
        out
    }

    fn parse_function(
        &mut self,
        start: usize,
        i: usize,
        d: Declarator,
        open: usize,
        ctx: &ScopeCtx,
    ) -> usize {
        let Some(close) = self.matching(open) else {
            return self.add_unparsed(ctx, start, self.len());
        };
        let decl_idx = if d.destructor { d.name - 1 } else { d.name };
        let qualifier = (d.name_start < decl_idx).then(|| self.join(d.name_start..decl_idx - 1));
        let type_idxs = self.type_tokens(i, d.name_start);
        let Some(role) = self.function_role(&d, qualifier.as_deref(), type_idxs.is_empty(), ctx)
        else {
            return self.add_unparsed(ctx, start, self.skip_declaration(i));
        };
        if matches!(role, FunctionRole::Free | FunctionRole::Method)
            && !self.looks_like_parameter_list(open + 1, close)
        {
            return self.parse_variables(start, i, d, ctx);
        }
        let (k, trailing_return) = self.skip_function_suffix(close + 1);
        let (sig_end, body_open, end) = match self.text(k) {
            ";" => (k - 1, None, k),
            "=" => {
                let end = self.statement_end(k);
                (end - 1, None, end)
            }
            "{" => (k - 1, Some(k), k),
            ":" if role == FunctionRole::Constructor => match self.skip_ctor_initializers(k + 1) {
                Some(body) if self.is(body, "{") => (k - 1, Some(body), body),
                _ => return self.add_unparsed(ctx, start, self.skip_declaration(i)),
            },
            _ => return self.add_unparsed(ctx, start, self.skip_declaration(i)),
        };
        let name = if d.operator {
            self.join(d.name..open)
        } else if d.destructor {
            format!("~{}", self.text(d.name))
        } else {
            self.text(d.name).to_string()
        };
        let return_type = trailing_return.or_else(|| {
            let text = self.join(type_idxs.iter().copied());
            (!text.is_empty()).then_some(text)
        });
        let decl = FunctionDecl {
            qualifier,
            role,
            return_type,
            params: self.parse_params(open + 1, close),
            template_params: std::mem::take(&mut self.template_params),
            signature: self.signature_layout(i, d.name_start, sig_end, body_open.is_none()),
            body: None,
        };
        let name_pos = self.pos(decl_idx);
        let id = self.add_node(ctx, start, name, name_pos, DeclKind::Function(Box::new(decl)));
        let Some(body_open) = body_open else {
            self.finish_node(id, end);
            return end + 1;
        };
        let inner = ctx.nested(id, ScopeKind::Function);
        let (body, body_close) = self.parse_function_body(body_open, &inner);
        if let DeclKind::Function(decl) = &mut self.tree.get_mut(id).kind {
            decl.body = Some(body);
        }
        self.finish_node(id, body_close);
        body_close + 1
    }

    fn function_role(
        &self,
        d: &Declarator,
        qualifier: Option<&str>,
        untyped: bool,
        ctx: &ScopeCtx,
    ) -> Option<FunctionRole> {
        let name = self.text(d.name);
        let owner = qualifier
            .map(|q| q.rsplit("::").next().unwrap_or(q))
            .map(|q| q.split('<').next().unwrap_or(q));
        let record = ctx.record_name();
        let role = if d.operator {
            FunctionRole::Operator
        } else if d.destructor {
            FunctionRole::Destructor
        } else if (qualifier.is_none() && record == Some(name)) || owner == Some(name) {
            FunctionRole::Constructor
        } else if untyped {
            // A macro invocation rather than a declaration
            return None;
        } else if record.is_some() || qualifier.is_some() {
            FunctionRole::Method
        } else {
            FunctionRole::Free
        };
        Some(role)
    }

    /// Skip cv/ref qualifiers, exception specs, `override`, `final`,
    /// attributes and trailing return types after the parameter list.
    fn skip_function_suffix(&self, mut k: usize) -> (usize, Option<String>) {
        let mut trailing_return = None;
        loop {
            match self.text(k) {
                "const" | "volatile" | "&" | "&&" | "override" | "final" | "mutable"
                | "constexpr" => k += 1,
                "noexcept" | "throw" => {
                    k += 1;
                    if self.is(k, "(") {
                        k = self.matching(k).map_or(self.len(), |c| c + 1);
                    }
                }
                "[" if self.is(k + 1, "[") => {
                    k = self.matching(k).map_or(self.len(), |c| c + 1);
                }
                "->" => {
                    let from = k + 1;
                    k = from;
                    while k < self.len() && !matches!(self.text(k), "{" | ";" | "=" | "}") {
                        if matches!(self.text(k), "(" | "[") {
                            k = self.matching(k).unwrap_or(self.len());
                        }
                        k += 1;
                    }
                    trailing_return = Some(self.join(from..k));
                }
                "requires" => k = self.skip_requires(k + 1),
                _ => return (k, trailing_return),
            }
        }
    }

    /// Skip `member(args), other{args}` up to the constructor body.
    fn skip_ctor_initializers(&self, mut m: usize) -> Option<usize> {
        loop {
            while self.is_ident(m) || self.is(m, "::") {
                m += 1;
            }
            if self.is(m, "<") {
                m = self.skip_angles(m)? + 1;
            }
            if self.is(m, "(") || self.is(m, "{") {
                m = self.matching(m)? + 1;
            } else {
                return Some(m);
            }
            if self.is(m, "...") {
                m += 1;
            }
            if !self.is(m, ",") {
                return Some(m);
            }
            m += 1;
        }
    }

    fn signature_layout(
        &self,
        from: usize,
        name_start: usize,
        to: usize,
        terminated: bool,
    ) -> SignatureLayout {
        let start = self.pos(from);
        let end = self.end_pos(to);
        let name_line = self.pos(name_start).line;
        let split_at_return_type = name_start > from
            && name_line != start.line
            && self.pos(name_start - 1).line == start.line
            && end.line == name_line;
        SignatureLayout {
            start,
            end,
            name_line,
            split_at_return_type,
            joined_width: self.joined_width(from, to, terminated),
        }
    }

    /// Width of `[from, to]` written on one line: every run of trivia
    /// becomes one space, none after `(` or before `)` and `,`.
    fn joined_width(&self, from: usize, to: usize, terminated: bool) -> Option<usize> {
        let mut width = self.pos(from).column - 1;
        for k in from..=to {
            width += self.text(k).chars().count();
            if k == to {
                break;
            }
            let between = &self.tokens[self.sig[k] + 1..self.sig[k + 1]];
            if between
                .iter()
                .any(|t| t.kind.is_comment() || t.kind == TokenKind::Directive)
            {
                return None;
            }
            let tight = self.is(k, "(") || self.is(k + 1, ")") || self.is(k + 1, ",");
            if !between.is_empty() && !tight {
                width += 1;
            }
        }
        Some(width + usize::from(terminated))
    }

    /// Split `[from, to)` at top-level commas.
    pub(super) fn split_top_level(&self, from: usize, to: usize) -> Vec<(usize, usize)> {
        let mut groups = Vec::new();
        let mut group_start = from;
        let mut angle = 0i32;
        let mut j = from;
        while j < to {
            match self.text(j) {
                "(" | "[" | "{" => j = self.matching(j).unwrap_or(to).min(to),
                "<" if j > from && self.is_ident(j - 1) => angle += 1,
                ">" if angle > 0 => angle -= 1,
                ">>" if angle > 0 => angle = (angle - 2).max(0),
                "," if angle == 0 => {
                    groups.push((group_start, j));
                    group_start = j + 1;
                }
                _ => {}
            }
            j += 1;
        }
        groups.push((group_start, to));
        groups
    }

    /// Whether the parenthesized tokens read as parameters rather than
    /// constructor arguments.
    fn looks_like_parameter_list(&self, from: usize, to: usize) -> bool {
        from >= to
            || self
                .split_top_level(from, to)
                .into_iter()
                .all(|(a, b)| self.is_param_like(a, b))
    }

    fn is_param_like(&self, a: usize, b: usize) -> bool {
        let mut k = a;
        while k < b && CV_AND_TAGS.contains(&self.text(k)) {
            k += 1;
        }
        let k = self.skip_attributes(k);
        let Some(token) = self.tok(k).filter(|_| k < b) else {
            return false;
        };
        match token.kind {
            TokenKind::Keyword => TYPE_KEYWORDS.contains(&token.text),
            TokenKind::Identifier if k + 1 >= b => token.text.starts_with(char::is_uppercase),
            TokenKind::Identifier => {
                self.is_ident(k + 1)
                    || matches!(
                        self.text(k + 1),
                        "*" | "&" | "&&" | "::" | "<" | "..." | "const" | "volatile"
                    )
            }
            TokenKind::Punct => token.text == "...",
            _ => false,
        }
    }

    fn parse_params(&self, from: usize, to: usize) -> Vec<Param> {
        if from >= to {
            return Vec::new();
        }
        self.split_top_level(from, to)
            .into_iter()
            .filter_map(|(a, b)| self.parse_param(a, b))
            .collect()
    }

    fn parse_param(&self, a: usize, b: usize) -> Option<Param> {
        let mut end = b;
        let mut k = a;
        while k < b {
            if self.is(k, "=") {
                end = k;
                break;
            }
            if matches!(self.text(k), "(" | "[" | "{") {
                k = self.matching(k).unwrap_or(b);
            }
            k += 1;
        }
        if end == a || (end == a + 1 && (self.is(a, "void") || self.is(a, "..."))) {
            return None;
        }
        if let Some(p) = (a..end).find(|&k| self.is(k, "(") && self.is(k + 1, "*")) {
            let name = (p + 2 < end && self.is_ident(p + 2)).then_some(p + 2);
            return Some(Param {
                name: name.map(|n| self.text(n).to_string()),
                base_type: self.join(a..p),
                passing: Passing::Pointer,
                pos: self.pos(name.unwrap_or(a)),
            });
        }
        let array = (a..end).find(|&k| self.is(k, "["));
        if let Some(bracket) = array {
            end = bracket;
        }
        let last = end - 1;
        let named = last > a
            && self.is_ident(last)
            && !self.is(last - 1, "::")
            && (a..last).any(|k| !self.is_type_decoration(k));
        let type_end = if named { last } else { end };
        let idxs: Vec<usize> = self.type_tokens(a, type_end);
        let has = |text: &str| idxs.iter().any(|&k| self.is(k, text));
        let passing = if array.is_some() {
            Passing::Pointer
        } else if has("&&") {
            Passing::RvalueRef
        } else if has("&") {
            if has("const") {
                Passing::ConstRef
            } else {
                Passing::Ref
            }
        } else if has("*") {
            Passing::Pointer
        } else {
            Passing::Value
        };
        let base_type = self.join(idxs.into_iter().filter(|&k| !self.is_type_decoration(k)));
        Some(Param {
            name: named.then(|| self.text(last).to_string()),
            base_type,
            passing,
            pos: self.pos(if named { last } else { a }),
        })
    }

    fn is_type_decoration(&self, k: usize) -> bool {
        matches!(self.text(k), "&" | "&&" | "*" | "...") || CV_AND_TAGS.contains(&self.text(k))
    }

    /// Whether the variable itself is const: `const` after the last `*`, or
    /// anywhere when there is no pointer.
    pub(super) fn declares_const(&self, from: usize, to: usize) -> bool {
        let last_star = (from..to).rev().find(|&k| self.is(k, "*"));
        match last_star {
            Some(star) => (star + 1..to).any(|k| self.is(k, "const")),
            None => (from..to).any(|k| self.is(k, "const")),
        }
    }

    fn parse_variables(&mut self, start: usize, i: usize, d: Declarator, ctx: &ScopeCtx) -> usize {
        let ty = self.join(self.type_tokens(i, d.name_start));
        if ty.is_empty() || !self.is_ident(d.name) {
            return self.add_unparsed(ctx, start, self.skip_declaration(i));
        }
        let template = VariableDecl {
            ty,
            scope: if ctx.record_name().is_some() {
                VarScope::Member
            } else {
                VarScope::Global
            },
            is_const: self.declares_const(i, d.name_start),
            is_constexpr: (i..d.name_start).any(|k| self.is(k, "constexpr")),
            is_static: (i..d.name_start).any(|k| self.is(k, "static")),
        };
        self.template_params.clear();
        let (ids, end) = self.add_declarators(start, d.name, &template, ctx);
        for id in ids {
            self.finish_node(id, end);
        }
        end + 1
    }

    /// Add one variable node per declarator of a list starting at `name`.
    /// Returns the nodes and the index of the terminating `;`.
    pub(super) fn add_declarators(
        &mut self,
        start: usize,
        mut name: usize,
        template: &VariableDecl,
        ctx: &ScopeCtx,
    ) -> (Vec<NodeId>, usize) {
        let mut ids = Vec::new();
        loop {
            let kind = DeclKind::Variable(template.clone());
            let text = self.text(name).to_string();
            ids.push(self.add_node(ctx, start, text, self.pos(name), kind));
            let k = self.skip_initializer(name + 1);
            if !self.is(k, ",") {
                return (ids, self.statement_end(k));
            }
            let mut m = k + 1;
            while m < self.len()
                && !matches!(self.text(m), "=" | "," | ";" | "[" | "{" | "(" | ":" | "}")
            {
                m += 1;
            }
            match self.last_identifier_before(k + 1, m) {
                Some(next) => name = next,
                None => return (ids, self.statement_end(k)),
            }
        }
    }

    /// Skip array extents and an initializer after a declarator name.
    pub(super) fn skip_initializer(&self, mut k: usize) -> usize {
        while self.is(k, "[") {
            k = self.matching(k).map_or(self.len(), |c| c + 1);
        }
        match self.text(k) {
            "{" | "(" => self.matching(k).map_or(self.len(), |c| c + 1),
            "=" | ":" => {
                k += 1;
                while k < self.len() && !matches!(self.text(k), "," | ";" | "}" | ")") {
                    if matches!(self.text(k), "(" | "[" | "{") {
                        k = self.matching(k).unwrap_or(self.len());
                    }
                    k += 1;
                }
                k
            }
            _ => k,
        }
    }
}
