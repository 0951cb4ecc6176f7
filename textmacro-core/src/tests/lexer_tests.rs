use crate::lexer::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_tokenize_directives() {
    let tokens = tokenize("@def @inc @x_1");
    assert_eq!(tokens[0].directive_name(), Some("def"));
    assert_eq!(tokens[2].directive_name(), Some("inc"));
    assert_eq!(tokens[4].directive_name(), Some("x_1"));
}

#[test]
fn test_bare_at_names_empty_directive() {
    let tokens = tokenize("@ x");
    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].text, "@");
    assert_eq!(tokens[0].directive_name(), Some(""));
    assert_eq!(tokens[2].directive_name(), None);
}

#[test]
fn test_tokenize_quoted_strings() {
    let tokens = tokenize(r#""hello world" 'single q'"#);
    assert_eq!(tokens[0].kind, TokenKind::Quoted);
    assert_eq!(tokens[0].text, "\"hello world\"");
    assert_eq!(tokens[2].kind, TokenKind::Quoted);
    assert_eq!(tokens[2].text, "'single q'");
}

#[test]
fn test_quoted_string_is_non_greedy() {
    let tokens = tokenize(r#""a" "b""#);
    assert_eq!(tokens[0].text, "\"a\"");
    assert_eq!(tokens[2].text, "\"b\"");
}

#[test]
fn test_quoted_string_does_not_cross_lines() {
    // No closing quote on the line: the quote is a lone character
    let tokens = tokenize("\"a\nb\"");
    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].text, "\"");
    assert_eq!(tokens[1].text, "a");
}

#[test]
fn test_tokenize_words() {
    let tokens = tokenize("foo_bar $el x1");
    assert_eq!(tokens[0].kind, TokenKind::Word);
    assert_eq!(tokens[0].text, "foo_bar");
    assert_eq!(tokens[2].text, "$el");
    assert_eq!(tokens[4].text, "x1");
}

#[test]
fn test_punctuation_splits_into_chars() {
    assert_eq!(
        kinds("a.b(c)"),
        vec![
            TokenKind::Word,
            TokenKind::Char,
            TokenKind::Word,
            TokenKind::Char,
            TokenKind::Word,
            TokenKind::Char,
        ]
    );
}

#[test]
fn test_non_ascii_is_single_chars() {
    let tokens = tokenize("é€");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text, "é");
    assert_eq!(tokens[1].text, "€");
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Char));
}

#[test]
fn test_non_breaking_space_is_not_whitespace() {
    let tokens = tokenize("\u{a0}");
    assert_eq!(tokens.len(), 1);
    assert!(!tokens[0].is_whitespace());
}

#[test]
fn test_tokens_reassemble_source() {
    let source = "@def  NAME \"x y\" {a b}\n@inc 'f.txt'";
    let joined: String = tokenize(source).into_iter().map(|t| t.text).collect();
    assert_eq!(joined, source);
}
