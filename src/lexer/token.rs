use serde::Serialize;

/// A location in source text.
///
/// `line` and `column` are 1-indexed; `column` counts characters, not bytes.
/// `offset` is the byte offset from the start of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Start of a file.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Spaces, tabs and backslash line continuations
    Whitespace,
    /// `\n` or `\r\n`
    Newline,
    /// `// ...` up to (not including) the line break
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// A `#` line, including backslash continuations
    Directive,
    Identifier,
    Keyword,
    Number,
    String,
    Char,
    RawString,
    Punct,
}

impl TokenKind {
    /// Trivia carries no syntax: whitespace, line breaks and comments.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::Newline | Self::LineComment | Self::BlockComment
        )
    }

    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(self, Self::Number | Self::String | Self::Char | Self::RawString)
    }

    #[must_use]
    pub const fn is_word(self) -> bool {
        matches!(self, Self::Identifier | Self::Keyword)
    }
}

/// A lexical token borrowing its text from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub pos: Position,
}

impl<'a> Token<'a> {
    #[must_use]
    pub const fn new(kind: TokenKind, text: &'a str, pos: Position) -> Self {
        Self { kind, text, pos }
    }

    /// True for a keyword, identifier or punctuator spelled exactly `text`.
    #[must_use]
    pub fn is(&self, text: &str) -> bool {
        matches!(
            self.kind,
            TokenKind::Keyword | TokenKind::Identifier | TokenKind::Punct
        ) && self.text == text
    }

    /// Position just past the last character of the token.
    #[must_use]
    pub fn end(&self) -> Position {
        let offset = self.pos.offset + self.text.len();
        match self.text.rfind('\n') {
            Some(last_break) => {
                let breaks = self.text.matches('\n').count();
                let tail = self.text[last_break + 1..].chars().count();
                Position::new(self.pos.line + breaks, tail + 1, offset)
            }
            None => Position::new(
                self.pos.line,
                self.pos.column + self.text.chars().count(),
                offset,
            ),
        }
    }
}

const KEYWORDS: &[&str] = &[
    "alignas",
    "alignof",
    "asm",
    "auto",
    "bool",
    "break",
    "case",
    "catch",
    "char",
    "char8_t",
    "char16_t",
    "char32_t",
    "class",
    "co_await",
    "co_return",
    "co_yield",
    "concept",
    "const",
    "const_cast",
    "consteval",
    "constexpr",
    "constinit",
    "continue",
    "decltype",
    "default",
    "delete",
    "do",
    "double",
    "dynamic_cast",
    "else",
    "enum",
    "explicit",
    "export",
    "extern",
    "false",
    "float",
    "for",
    "friend",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "mutable",
    "namespace",
    "new",
    "noexcept",
    "nullptr",
    "operator",
    "private",
    "protected",
    "public",
    "register",
    "reinterpret_cast",
    "requires",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "static_assert",
    "static_cast",
    "struct",
    "switch",
    "template",
    "this",
    "thread_local",
    "throw",
    "true",
    "try",
    "typedef",
    "typeid",
    "typename",
    "union",
    "unsigned",
    "using",
    "virtual",
    "void",
    "volatile",
    "wchar_t",
    "while",
];

#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}
