//! Leaf parsers: the terminals of the grammar.
//!
//! Each leaf parser skips whitespace/comments first, then matches at the
//! byte level. Failure restores the cursor to call entry (including the
//! skipped trivia) and returns `Ok(None)`; malformed literals are fatal.
//!
//! Keywords are matched before identifiers would be tried by the grammar,
//! and the identifier parser rejects reserved words outright, so `ret` can
//! never be read as a plain identifier.

use crate::{Error, MAX_TOKEN_LEN, Result};

use super::kind::NodeKind;
use super::node::Node;
use super::reader::Reader;

/// Reserved words the identifier parser refuses to produce.
const RESERVED: [&str; 3] = ["extern", "jmp", "ret"];

/// A terminal of the grammar, scanned by [`scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf {
    /// `[A-Za-z_][A-Za-z0-9_]*`, excluding reserved words.
    Ident,
    /// `[0-9]+` not followed by `.` or `f`.
    Int,
    /// `[0-9]+f` or `[0-9]+.[0-9]+`.
    Float,
    /// `'c'` with escapes `\n \t \r \' \\`.
    Char,
    /// `"..."` of printable bytes, `\"` does not terminate.
    Str,
    /// A fixed operator or keyword. Keywords additionally require that the
    /// following byte cannot continue an identifier.
    Marker {
        text: &'static str,
        kind: NodeKind,
        is_op: bool,
    },
    /// Succeeds only at end of input.
    Eof,
}

#[inline]
fn is_num(byte: u8) -> bool {
    byte.is_ascii_digit()
}

#[inline]
fn is_alpha(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

#[inline]
fn is_alpha_num(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Printable range allowed inside string literals.
#[inline]
fn is_str_byte(byte: u8) -> bool {
    (32..=126).contains(&byte)
}

/// Runs a leaf parser against the reader.
///
/// On success the cursor sits after the recognized lexeme (trivia
/// included); on soft failure it is restored to exactly where it was.
pub(super) fn scan(leaf: Leaf, r: &mut Reader<'_>) -> Result<Option<Node>> {
    let entry = r.pos();
    r.skip()?;

    let result = match leaf {
        Leaf::Ident => scan_ident(r),
        Leaf::Int => scan_int(r),
        Leaf::Float => scan_float(r),
        Leaf::Char => scan_char(r),
        Leaf::Str => scan_str(r),
        Leaf::Marker { text, kind, is_op } => scan_marker(r, text, kind, is_op),
        Leaf::Eof => Ok(if r.peek().is_none() {
            Some(Node::marker(NodeKind::Eof))
        } else {
            None
        }),
    }?;

    if result.is_none() {
        r.rewind(r.pos() - entry);
    }
    Ok(result)
}

fn scan_ident(r: &mut Reader<'_>) -> Result<Option<Node>> {
    let start = r.pos();
    let mut text = String::new();

    match r.next() {
        Some(byte) if is_alpha(byte) => text.push(byte as char),
        Some(_) => {
            r.rewind(1);
            return Ok(None);
        }
        None => return Ok(None),
    }

    while let Some(byte) = r.next() {
        if !is_alpha_num(byte) {
            r.rewind(1);
            break;
        }
        if text.len() >= MAX_TOKEN_LEN {
            return Err(Error::TokenTooLong {
                what: "identifier",
                offset: start,
            });
        }
        text.push(byte as char);
    }

    if RESERVED.contains(&text.as_str()) {
        return Ok(None);
    }
    Ok(Some(Node::text(NodeKind::Ident, text)))
}

/// Collects a run of `[0-9]`, leaving the cursor on the stop byte.
fn digit_run(r: &mut Reader<'_>, what: &'static str) -> Result<String> {
    let start = r.pos();
    let mut digits = String::new();
    while let Some(byte) = r.next() {
        if !is_num(byte) {
            r.rewind(1);
            break;
        }
        if digits.len() >= MAX_TOKEN_LEN {
            return Err(Error::TokenTooLong {
                what,
                offset: start,
            });
        }
        digits.push(byte as char);
    }
    Ok(digits)
}

fn scan_int(r: &mut Reader<'_>) -> Result<Option<Node>> {
    let start = r.pos();
    let digits = digit_run(r, "integer literal")?;
    if digits.is_empty() {
        return Ok(None);
    }
    // a digit run continuing as `.` or `f` belongs to the float parser
    if matches!(r.peek(), Some(b'.') | Some(b'f')) {
        return Ok(None);
    }
    let value = digits
        .parse::<i64>()
        .map_err(|_| Error::IntegerOutOfRange { offset: start })?;
    Ok(Some(Node::int(value)))
}

fn scan_float(r: &mut Reader<'_>) -> Result<Option<Node>> {
    let whole = digit_run(r, "float literal")?;
    if whole.is_empty() {
        return Ok(None);
    }

    let text = match r.next() {
        Some(b'f') => whole,
        Some(b'.') => {
            let frac = digit_run(r, "float literal")?;
            if frac.is_empty() {
                return Ok(None);
            }
            format!("{whole}.{frac}")
        }
        Some(_) => {
            r.rewind(1);
            return Ok(None);
        }
        None => return Ok(None),
    };

    let value = text
        .parse::<f64>()
        .expect("digit runs always parse as f64");
    Ok(Some(Node::float(value)))
}

fn scan_char(r: &mut Reader<'_>) -> Result<Option<Node>> {
    let start = r.pos();
    match r.next() {
        Some(b'\'') => {}
        Some(_) => {
            r.rewind(1);
            return Ok(None);
        }
        None => return Ok(None),
    }

    let value = match r.next() {
        Some(b'\\') => match r.next() {
            Some(b'n') => b'\n',
            Some(b't') => b'\t',
            Some(b'r') => b'\r',
            Some(b'\'') => b'\'',
            Some(b'\\') => b'\\',
            Some(other) => {
                return Err(Error::UnknownEscape {
                    escape: other as char,
                    offset: start,
                });
            }
            None => return Err(Error::UnterminatedChar { offset: start }),
        },
        Some(byte) => byte,
        None => return Err(Error::UnterminatedChar { offset: start }),
    };

    match r.next() {
        Some(b'\'') => Ok(Some(Node::byte(NodeKind::Char, value))),
        _ => Err(Error::UnterminatedChar { offset: start }),
    }
}

fn scan_str(r: &mut Reader<'_>) -> Result<Option<Node>> {
    let start = r.pos();
    match r.next() {
        Some(b'"') => {}
        Some(_) => {
            r.rewind(1);
            return Ok(None);
        }
        None => return Ok(None),
    }

    let mut bytes: Vec<u8> = Vec::new();
    loop {
        match r.next() {
            None => return Err(Error::UnterminatedString { offset: start }),
            Some(b'"') if bytes.last() != Some(&b'\\') => break,
            Some(byte) if !is_str_byte(byte) => {
                return Err(Error::InvalidStringByte {
                    byte,
                    offset: r.pos() - 1,
                });
            }
            Some(byte) => {
                if bytes.len() >= MAX_TOKEN_LEN {
                    return Err(Error::TokenTooLong {
                        what: "string literal",
                        offset: start,
                    });
                }
                bytes.push(byte);
            }
        }
    }

    let text = String::from_utf8(bytes).expect("printable ASCII is valid UTF-8");
    Ok(Some(Node::text(NodeKind::Str, text)))
}

fn scan_marker(
    r: &mut Reader<'_>,
    text: &'static str,
    kind: NodeKind,
    is_op: bool,
) -> Result<Option<Node>> {
    for &expected in text.as_bytes() {
        match r.next() {
            Some(byte) if byte == expected => {}
            Some(_) => {
                r.rewind(1);
                return Ok(None);
            }
            None => return Ok(None),
        }
    }
    // `jmpx` must not match the keyword `jmp`
    if !is_op && r.peek().is_some_and(is_alpha_num) {
        return Ok(None);
    }
    Ok(Some(Node::marker(kind)))
}
