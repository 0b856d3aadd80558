//! Lossless C++ tokenizer.
//!
//! Every byte of the input belongs to exactly one token, so concatenating the
//! token texts reproduces the source. Comments, whitespace and preprocessor
//! lines are kept as tokens for the rules that inspect layout.

mod token;

pub use token::{Position, Token, TokenKind, is_keyword};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("unterminated raw string literal")]
    UnterminatedRawString,
}

/// Malformed input. Always the last item a [`Lexer`] yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} starting at line {}, column {}", pos.line, pos.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub pos: Position,
}

const MULTI_CHAR_PUNCT: &[&str] = &[
    "<=>", "->*", "...", "<<=", ">>=", "::", "->", "++", "--", "<<", ">>", "<=", ">=", "==", "!=",
    "&&", "||", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", ".*", "##",
];

const STRING_PREFIXES: &[&str] = &["L", "u", "U", "u8"];
const RAW_STRING_PREFIXES: &[&str] = &["R", "LR", "uR", "UR", "u8R"];

/// Maximum length of a raw string delimiter.
const MAX_RAW_DELIMITER: usize = 16;

/// Lazy token iterator over a source string.
///
/// Cloning a lexer (or creating a new one) restarts the sequence. After an
/// error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    at_line_start: bool,
    done: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            line: 1,
            column: 1,
            at_line_start: true,
            done: false,
        }
    }

    const fn current_position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn bump_str(&mut self, s: &str) {
        for _ in s.chars() {
            self.bump();
        }
    }

    /// Advance until `target` byte offset.
    fn advance_to(&mut self, target: usize) {
        while self.offset < target && self.bump().is_some() {}
    }

    fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    fn at_line_break(&self) -> bool {
        self.starts_with("\n") || self.starts_with("\r\n")
    }

    fn scan_token(&mut self) -> Result<TokenKind, LexErrorKind> {
        let Some(c) = self.peek() else {
            return Ok(TokenKind::Whitespace);
        };
        match c {
            '\n' => {
                self.bump();
                Ok(TokenKind::Newline)
            }
            '\r' if self.starts_with("\r\n") => {
                self.bump_str("\r\n");
                Ok(TokenKind::Newline)
            }
            ' ' | '\t' | '\r' | '\x0b' | '\x0c' => {
                self.scan_whitespace();
                Ok(TokenKind::Whitespace)
            }
            '\\' if self.rest()[1..].starts_with('\n') || self.rest()[1..].starts_with("\r\n") => {
                self.scan_whitespace();
                Ok(TokenKind::Whitespace)
            }
            '/' if self.starts_with("//") => {
                self.scan_line_comment();
                Ok(TokenKind::LineComment)
            }
            '/' if self.starts_with("/*") => self.scan_block_comment(),
            '#' if self.at_line_start => {
                self.scan_directive();
                Ok(TokenKind::Directive)
            }
            '"' => self.scan_quoted('"').map(|()| TokenKind::String),
            '\'' => self.scan_quoted('\'').map(|()| TokenKind::Char),
            c if is_ident_start(c) => self.scan_word(),
            c if c.is_ascii_digit() => {
                self.scan_number();
                Ok(TokenKind::Number)
            }
            '.' if self.peek_nth(1).is_some_and(|n| n.is_ascii_digit()) => {
                self.scan_number();
                Ok(TokenKind::Number)
            }
            _ => {
                self.scan_punct();
                Ok(TokenKind::Punct)
            }
        }
    }

    fn scan_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\x0b' | '\x0c') => {
                    self.bump();
                }
                Some('\r') if !self.starts_with("\r\n") => {
                    self.bump();
                }
                Some('\\') if self.rest()[1..].starts_with('\n') => self.bump_str("\\\n"),
                Some('\\') if self.rest()[1..].starts_with("\r\n") => self.bump_str("\\\r\n"),
                _ => break,
            }
        }
    }

    fn scan_line_comment(&mut self) {
        while !self.at_line_break() && self.bump().is_some() {}
    }

    fn scan_block_comment(&mut self) -> Result<TokenKind, LexErrorKind> {
        let Some(end) = self.rest()[2..].find("*/") else {
            return Err(LexErrorKind::UnterminatedBlockComment);
        };
        let target = self.offset + 2 + end + 2;
        self.advance_to(target);
        Ok(TokenKind::BlockComment)
    }

    /// Preprocessor line. Stops before a trailing comment so comment rules
    /// still see it; quotes inside the line are skipped leniently.
    fn scan_directive(&mut self) {
        loop {
            match self.peek() {
                None | Some('\n') => break,
                Some('\r') if self.starts_with("\r\n") => break,
                Some('\\') if self.rest()[1..].starts_with('\n') => self.bump_str("\\\n"),
                Some('\\') if self.rest()[1..].starts_with("\r\n") => self.bump_str("\\\r\n"),
                Some('/') if self.starts_with("//") || self.starts_with("/*") => break,
                Some(quote @ ('"' | '\'')) => {
                    self.bump();
                    self.skip_directive_quote(quote);
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn skip_directive_quote(&mut self, quote: char) {
        while let Some(c) = self.peek() {
            if c == '\n' || self.starts_with("\r\n") {
                return;
            }
            self.bump();
            if c == '\\' && !self.at_line_break() {
                self.bump();
            } else if c == quote {
                return;
            }
        }
    }

    /// Ordinary string or character literal starting at the opening quote.
    fn scan_quoted(&mut self, quote: char) -> Result<(), LexErrorKind> {
        let error = if quote == '"' {
            LexErrorKind::UnterminatedString
        } else {
            LexErrorKind::UnterminatedChar
        };
        self.bump();
        loop {
            match self.peek() {
                None | Some('\n') => return Err(error),
                Some('\r') if self.starts_with("\r\n") => return Err(error),
                Some('\\') => {
                    self.bump();
                    if self.starts_with("\r\n") {
                        self.bump_str("\r\n");
                    } else if self.bump().is_none() {
                        return Err(error);
                    }
                }
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Raw string starting at the opening quote: `"delim( ... )delim"`.
    fn scan_raw_string(&mut self) -> Result<(), LexErrorKind> {
        let body = &self.rest()[1..];
        let Some(open) = body.find('(') else {
            return Err(LexErrorKind::UnterminatedRawString);
        };
        let delimiter = &body[..open];
        if delimiter.len() > MAX_RAW_DELIMITER
            || delimiter
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '\\' | ')' | '"'))
        {
            return Err(LexErrorKind::UnterminatedRawString);
        }
        let terminator = format!("){delimiter}\"");
        let search_from = 1 + open + 1;
        let Some(close) = self.rest()[search_from..].find(&terminator) else {
            return Err(LexErrorKind::UnterminatedRawString);
        };
        let target = self.offset + search_from + close + terminator.len();
        self.advance_to(target);
        Ok(())
    }

    fn scan_word(&mut self) -> Result<TokenKind, LexErrorKind> {
        let start = self.offset;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        let word = &self.src[start..self.offset];
        match self.peek() {
            Some('"') if RAW_STRING_PREFIXES.contains(&word) => {
                self.scan_raw_string().map(|()| TokenKind::RawString)
            }
            Some('"') if STRING_PREFIXES.contains(&word) => {
                self.scan_quoted('"').map(|()| TokenKind::String)
            }
            Some('\'') if STRING_PREFIXES.contains(&word) => {
                self.scan_quoted('\'').map(|()| TokenKind::Char)
            }
            _ if is_keyword(word) => Ok(TokenKind::Keyword),
            _ => Ok(TokenKind::Identifier),
        }
    }

    /// Numbers, including digit separators, suffixes and signed exponents.
    fn scan_number(&mut self) {
        let mut prev = '\0';
        while let Some(c) = self.peek() {
            let take = c.is_ascii_alphanumeric()
                || c == '_'
                || c == '.'
                || (c == '\'' && self.peek_nth(1).is_some_and(|n| n.is_ascii_alphanumeric()))
                || (matches!(c, '+' | '-') && matches!(prev, 'e' | 'E' | 'p' | 'P'));
            if !take {
                break;
            }
            prev = c;
            self.bump();
        }
    }

    fn scan_punct(&mut self) {
        if let Some(op) = MULTI_CHAR_PUNCT.iter().find(|op| self.starts_with(op)) {
            self.bump_str(op);
        } else {
            self.bump();
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.src.len() {
            self.done = true;
            return None;
        }
        let start = self.current_position();
        match self.scan_token() {
            Ok(kind) => {
                match kind {
                    TokenKind::Newline => self.at_line_start = true,
                    TokenKind::Whitespace | TokenKind::BlockComment => {}
                    _ => self.at_line_start = false,
                }
                let text = &self.src[start.offset..self.offset];
                Some(Ok(Token::new(kind, text, start)))
            }
            Err(kind) => {
                self.done = true;
                Some(Err(LexError { kind, pos: start }))
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// All tokens of a file plus the malformed-input error that ended it, if any.
#[derive(Debug, Clone, Default)]
pub struct TokenStream<'a> {
    pub tokens: Vec<Token<'a>>,
    pub error: Option<LexError>,
}

impl TokenStream<'_> {
    /// Concatenated token texts. Equals the source when `error` is `None`.
    #[must_use]
    pub fn reconstruct(&self) -> String {
        self.tokens.iter().map(|t| t.text).collect()
    }
}

/// Tokenize a whole source string, keeping the recognized prefix on error.
#[must_use]
pub fn tokenize(src: &str) -> TokenStream<'_> {
    let mut stream = TokenStream::default();
    for item in Lexer::new(src) {
        match item {
            Ok(token) => stream.tokens.push(token),
            Err(error) => stream.error = Some(error),
        }
    }
    stream
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
