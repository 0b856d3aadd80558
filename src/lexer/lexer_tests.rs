use super::*;

fn kinds(src: &str) -> Vec<(TokenKind, &str)> {
    tokenize(src)
        .tokens
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Newline))
        .map(|t| (t.kind, t.text))
        .collect()
}

#[test]
fn reconstructs_source_exactly() {
    let src = r#"#include <vector>
#define MAX_SIZE(a, b) \
    ((a) > (b) ? (a) : (b))

namespace demo
{
/* block
   comment */
class Example
{
public:
    int value() const { return value_; } // trailing
private:
    int value_ = 0x1F'FF;
    const char* name_ = u8"na\"me";
    char quote_ = '\'';
};
}
"#;
    let stream = tokenize(src);
    assert!(stream.error.is_none());
    assert_eq!(stream.reconstruct(), src);
}

#[test]
fn reconstructs_crlf_and_tabs() {
    let src = "int\tmain()\r\n{\r\n\treturn 0;\r\n}\r\n";
    let stream = tokenize(src);
    assert!(stream.error.is_none());
    assert_eq!(stream.reconstruct(), src);
    let newlines = stream
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Newline)
        .count();
    assert_eq!(newlines, 4);
}

#[test]
fn classifies_comments() {
    let toks = kinds("a // line\n/* block */ b");
    assert_eq!(
        toks,
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::LineComment, "// line"),
            (TokenKind::BlockComment, "/* block */"),
            (TokenKind::Identifier, "b"),
        ]
    );
}

#[test]
fn directive_stops_before_trailing_comment() {
    let toks = kinds("#include \"widget.h\" // for Widget\nint x;");
    assert_eq!(toks[0], (TokenKind::Directive, "#include \"widget.h\" "));
    assert_eq!(toks[1], (TokenKind::LineComment, "// for Widget"));
    assert_eq!(toks[2], (TokenKind::Keyword, "int"));
}

#[test]
fn directive_spans_continuation_lines() {
    let src = "#define SQUARE(x) \\\n    ((x) * (x))\nint y;";
    let toks = kinds(src);
    assert_eq!(toks[0].0, TokenKind::Directive);
    assert!(toks[0].1.ends_with("((x) * (x))"));
    assert_eq!(toks[1], (TokenKind::Keyword, "int"));
}

#[test]
fn hash_inside_line_is_punct() {
    let toks = kinds("a # b");
    assert_eq!(toks[1], (TokenKind::Punct, "#"));
}

#[test]
fn directive_with_apostrophe_does_not_fail() {
    let stream = tokenize("#error don't do this\nint x;\n");
    assert!(stream.error.is_none());
    assert_eq!(stream.tokens[0].kind, TokenKind::Directive);
}

#[test]
fn keywords_inside_literals_are_not_keywords() {
    let toks = kinds(r#"s = "if { while }"; c = '{';"#);
    assert!(toks.iter().all(|(k, _)| *k != TokenKind::Keyword));
    assert!(toks.contains(&(TokenKind::String, r#""if { while }""#)));
    assert!(toks.contains(&(TokenKind::Char, "'{'")));
}

#[test]
fn string_prefixes_and_raw_strings() {
    let toks = kinds(r#"L"wide" u8"utf" R"xy(a ) " b)xy" U'c'"#);
    assert_eq!(toks[0], (TokenKind::String, r#"L"wide""#));
    assert_eq!(toks[1], (TokenKind::String, r#"u8"utf""#));
    assert_eq!(toks[2], (TokenKind::RawString, r#"R"xy(a ) " b)xy""#));
    assert_eq!(toks[3], (TokenKind::Char, "U'c'"));
}

#[test]
fn raw_string_may_span_lines() {
    let src = "auto s = R\"(line one\nline two)\";\nint after;";
    let stream = tokenize(src);
    assert!(stream.error.is_none());
    let after = stream.tokens.iter().find(|t| t.text == "after").unwrap();
    assert_eq!(after.pos.line, 3);
}

#[test]
fn multi_char_punctuators() {
    let toks = kinds("a->b::c <=> d >>= e ... f");
    let puncts: Vec<_> = toks
        .iter()
        .filter(|(k, _)| *k == TokenKind::Punct)
        .map(|(_, t)| *t)
        .collect();
    assert_eq!(puncts, vec!["->", "::", "<=>", ">>=", "..."]);
}

#[test]
fn numbers_with_exponents_and_separators() {
    let toks = kinds("1'000'000 3.5e-2 0x1p+3 .5f");
    assert_eq!(
        toks,
        vec![
            (TokenKind::Number, "1'000'000"),
            (TokenKind::Number, "3.5e-2"),
            (TokenKind::Number, "0x1p+3"),
            (TokenKind::Number, ".5f"),
        ]
    );
}

#[test]
fn positions_are_one_indexed_characters() {
    let stream = tokenize("ab\n  héllo x");
    let hello = stream.tokens.iter().find(|t| t.text == "héllo").unwrap();
    assert_eq!(hello.pos, Position::new(2, 3, 5));
    let x = stream.tokens.iter().find(|t| t.text == "x").unwrap();
    assert_eq!(x.pos.column, 9);
}

#[test]
fn token_end_tracks_multiline_text() {
    let stream = tokenize("/* a\n bc */x");
    let comment = stream.tokens[0];
    assert_eq!(comment.end().line, 2);
    assert_eq!(comment.end().column, 7);
    assert_eq!(stream.tokens[1].pos.column, 7);
}

#[test]
fn unterminated_block_comment_ends_sequence() {
    let src = "int a;\n/* never closed\nint b;";
    let items: Vec<_> = Lexer::new(src).collect();
    let last = items.last().unwrap();
    let err = last.as_ref().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedBlockComment);
    assert_eq!(err.pos.line, 2);
    assert_eq!(items.iter().filter(|i| i.is_err()).count(), 1);
}

#[test]
fn unterminated_string_stops_at_line_break() {
    let stream = tokenize("auto s = \"oops\nint b;");
    let err = stream.error.unwrap();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.pos.column, 10);
    assert!(stream.tokens.iter().all(|t| t.pos.line == 1));
}

#[test]
fn unterminated_char_and_raw_string() {
    assert_eq!(
        tokenize("char c = 'x").error.unwrap().kind,
        LexErrorKind::UnterminatedChar
    );
    assert_eq!(
        tokenize("auto r = R\"(open").error.unwrap().kind,
        LexErrorKind::UnterminatedRawString
    );
}

#[test]
fn lexer_is_restartable_and_fused() {
    let lexer = Lexer::new("int x;");
    let first: Vec<_> = lexer.clone().collect();
    let second: Vec<_> = lexer.collect();
    assert_eq!(first, second);

    let mut broken = Lexer::new("/*");
    assert!(broken.next().unwrap().is_err());
    assert!(broken.next().is_none());
    assert!(broken.next().is_none());
}

#[test]
fn backslash_continuation_outside_directive_is_whitespace() {
    let stream = tokenize("a \\\nb");
    assert_eq!(stream.tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(stream.tokens[2].pos.line, 2);
}
