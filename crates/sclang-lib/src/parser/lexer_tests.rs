use crate::{Error, Result};

use super::kind::NodeKind;
use super::lexer::{Leaf, scan};
use super::node::Node;
use super::reader::Reader;

/// Runs one leaf parser against `input`, returning the result and the
/// cursor position afterwards.
fn run(leaf: Leaf, input: &str) -> (Result<Option<Node>>, usize) {
    let mut r = Reader::new(input);
    let result = scan(leaf, &mut r);
    (result, r.pos())
}

fn ok(leaf: Leaf, input: &str) -> (Node, usize) {
    let (result, pos) = run(leaf, input);
    let node = result.expect("no fatal error").expect("leaf should match");
    (node, pos)
}

fn miss(leaf: Leaf, input: &str) {
    let (result, pos) = run(leaf, input);
    assert!(result.expect("no fatal error").is_none());
    assert_eq!(pos, 0, "failed leaf must restore the cursor to entry");
}

fn fatal(leaf: Leaf, input: &str) -> Error {
    let (result, _) = run(leaf, input);
    result.expect_err("leaf should fail fatally")
}

const SEMI: Leaf = Leaf::Marker {
    text: ";",
    kind: NodeKind::Semi,
    is_op: true,
};

const KW_JMP: Leaf = Leaf::Marker {
    text: "jmp",
    kind: NodeKind::KwJmp,
    is_op: false,
};

// --- identifiers ---

#[test]
fn ident_basic() {
    let (node, pos) = ok(Leaf::Ident, "foo bar");
    assert_eq!(node.kind(), NodeKind::Ident);
    assert_eq!(node.as_text(), "foo");
    assert_eq!(pos, 3);
}

#[test]
fn ident_includes_leading_trivia_in_consumption() {
    let (node, pos) = ok(Leaf::Ident, "  // c\n foo");
    assert_eq!(node.as_text(), "foo");
    assert_eq!(pos, 11);
}

#[test]
fn ident_underscore_and_digits() {
    let (node, _) = ok(Leaf::Ident, "_a1b2+");
    assert_eq!(node.as_text(), "_a1b2");
}

#[test]
fn ident_pushes_back_the_stop_byte() {
    let (_, pos) = ok(Leaf::Ident, "abc+");
    assert_eq!(pos, 3);
}

#[test]
fn ident_cannot_start_with_a_digit() {
    miss(Leaf::Ident, "9abc");
    miss(Leaf::Ident, "  9abc");
}

#[test]
fn ident_rejects_reserved_words() {
    miss(Leaf::Ident, "ret");
    miss(Leaf::Ident, "jmp x");
    miss(Leaf::Ident, "extern");
}

#[test]
fn ident_accepts_reserved_prefixes() {
    let (node, _) = ok(Leaf::Ident, "retx");
    assert_eq!(node.as_text(), "retx");
}

#[test]
fn ident_at_the_length_limit() {
    let input = "a".repeat(1024);
    let (node, _) = ok(Leaf::Ident, &input);
    assert_eq!(node.as_text().len(), 1024);
}

#[test]
fn ident_over_the_length_limit_is_fatal() {
    let input = "a".repeat(1025);
    match fatal(Leaf::Ident, &input) {
        Error::TokenTooLong { what, .. } => assert_eq!(what, "identifier"),
        other => panic!("expected TokenTooLong, got {other:?}"),
    }
}

// --- integers ---

#[test]
fn int_basic() {
    let (node, pos) = ok(Leaf::Int, "42 ");
    assert_eq!(node.as_int(), 42);
    assert_eq!(pos, 2);
}

#[test]
fn int_pushes_back_the_stop_byte() {
    let (node, pos) = ok(Leaf::Int, "10x");
    assert_eq!(node.as_int(), 10);
    assert_eq!(pos, 2);
}

#[test]
fn int_defers_to_float_on_dot_or_suffix() {
    miss(Leaf::Int, "3.0");
    miss(Leaf::Int, "10f");
}

#[test]
fn int_requires_a_digit() {
    miss(Leaf::Int, "x");
}

#[test]
fn int_out_of_range_is_fatal() {
    match fatal(Leaf::Int, "99999999999999999999") {
        Error::IntegerOutOfRange { .. } => {}
        other => panic!("expected IntegerOutOfRange, got {other:?}"),
    }
}

// --- floats ---

#[test]
fn float_with_suffix() {
    let (node, pos) = ok(Leaf::Float, "10f");
    assert_eq!(node.as_float(), 10.0);
    assert_eq!(pos, 3);
}

#[test]
fn float_with_decimal_point() {
    let (node, pos) = ok(Leaf::Float, "3.14;");
    assert_eq!(node.as_float(), 3.14);
    assert_eq!(pos, 4);
}

#[test]
fn float_needs_digits_after_the_point() {
    miss(Leaf::Float, "10.");
    miss(Leaf::Float, "10.x");
}

#[test]
fn float_needs_suffix_or_point() {
    miss(Leaf::Float, "10");
    miss(Leaf::Float, "10q");
}

#[test]
fn float_suffix_leaves_the_rest_for_the_next_token() {
    // `123fid` reads as float 123 followed by identifier `id`
    let mut r = Reader::new("123fid");
    let float = scan(Leaf::Float, &mut r).unwrap().unwrap();
    assert_eq!(float.as_float(), 123.0);
    let ident = scan(Leaf::Ident, &mut r).unwrap().unwrap();
    assert_eq!(ident.as_text(), "id");
}

// --- character literals ---

#[test]
fn char_basic() {
    let (node, pos) = ok(Leaf::Char, "'a'");
    assert_eq!(node.as_byte(), b'a');
    assert_eq!(pos, 3);
}

#[test]
fn char_escapes() {
    assert_eq!(ok(Leaf::Char, r"'\n'").0.as_byte(), b'\n');
    assert_eq!(ok(Leaf::Char, r"'\t'").0.as_byte(), b'\t');
    assert_eq!(ok(Leaf::Char, r"'\r'").0.as_byte(), b'\r');
    assert_eq!(ok(Leaf::Char, r"'\''").0.as_byte(), b'\'');
    assert_eq!(ok(Leaf::Char, r"'\\'").0.as_byte(), b'\\');
}

#[test]
fn char_unknown_escape_is_fatal() {
    match fatal(Leaf::Char, r"'\q'") {
        Error::UnknownEscape { escape, .. } => assert_eq!(escape, 'q'),
        other => panic!("expected UnknownEscape, got {other:?}"),
    }
}

#[test]
fn char_unterminated_is_fatal() {
    assert!(matches!(
        fatal(Leaf::Char, "'a"),
        Error::UnterminatedChar { .. }
    ));
    assert!(matches!(
        fatal(Leaf::Char, "'ab'"),
        Error::UnterminatedChar { .. }
    ));
}

#[test]
fn char_soft_fails_without_a_quote() {
    miss(Leaf::Char, "a");
}

// --- string literals ---

#[test]
fn str_basic() {
    let (node, pos) = ok(Leaf::Str, "\"hi\" ");
    assert_eq!(node.as_text(), "hi");
    assert_eq!(pos, 4);
}

#[test]
fn str_empty() {
    let (node, _) = ok(Leaf::Str, "\"\"");
    assert_eq!(node.as_text(), "");
}

#[test]
fn str_escaped_quote_does_not_terminate() {
    let (node, pos) = ok(Leaf::Str, r#""a\"b""#);
    assert_eq!(node.as_text(), r#"a\"b"#);
    assert_eq!(pos, 6);
}

#[test]
fn str_unterminated_is_fatal() {
    assert!(matches!(
        fatal(Leaf::Str, "\"abc"),
        Error::UnterminatedString { .. }
    ));
}

#[test]
fn str_rejects_unprintable_bytes() {
    match fatal(Leaf::Str, "\"a\nb\"") {
        Error::InvalidStringByte { byte, .. } => assert_eq!(byte, b'\n'),
        other => panic!("expected InvalidStringByte, got {other:?}"),
    }
}

// --- fixed markers ---

#[test]
fn operator_marker() {
    let arrow = Leaf::Marker {
        text: "->",
        kind: NodeKind::Arrow,
        is_op: true,
    };
    let (node, pos) = ok(arrow, "-> x");
    assert_eq!(node.kind(), NodeKind::Arrow);
    assert_eq!(pos, 2);
    miss(arrow, "- >");
}

#[test]
fn keyword_marker_requires_a_word_boundary() {
    let (node, _) = ok(KW_JMP, "jmp x");
    assert_eq!(node.kind(), NodeKind::KwJmp);
    let (_, pos) = ok(KW_JMP, "jmp;");
    assert_eq!(pos, 3);
    miss(KW_JMP, "jmpx");
    miss(KW_JMP, "jm");
}

#[test]
fn marker_restores_cursor_on_partial_match() {
    miss(SEMI, ":");
}

// --- end of input ---

#[test]
fn eof_matches_only_at_the_end() {
    let (node, _) = ok(Leaf::Eof, "");
    assert_eq!(node.kind(), NodeKind::Eof);
    let (_, pos) = ok(Leaf::Eof, "  // trailing\n");
    assert_eq!(pos, 14);
    miss(Leaf::Eof, "x");
    miss(Leaf::Eof, "  x");
}
