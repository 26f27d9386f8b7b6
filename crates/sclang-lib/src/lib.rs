//! SC-Lang: a small curly-brace language compiled to C by textual translation.
//!
//! # Example
//!
//! ```
//! let source = "add ( a : i32 , b : i32 ) -> i32 { ret a ; }";
//!
//! let mut out = Vec::new();
//! let emitted = sclang_lib::translate(source, "#include <stdint.h>\n", &mut out)
//!     .expect("valid program");
//!
//! assert_eq!(emitted, 1);
//! let c = String::from_utf8(out).unwrap();
//! assert!(c.contains("i32 add(i32 a , i32 b ) {"));
//! ```
//!
//! The pipeline is character stream → leaf parsers → combinator graph →
//! AST → C text. See [`parser`] for the front half and [`emit`] for the
//! back half; [`translate`] ties them together.

pub mod diagnostics;
pub mod emit;
pub mod parser;

mod driver;


pub use diagnostics::ErrorPrinter;
pub use driver::{parse, translate};
pub use emit::Emitter;
pub use parser::{Grammar, Node, NodeKind, Parser, Payload};

/// Longest accepted identifier, digit run, or string literal, in bytes.
pub const MAX_TOKEN_LEN: usize = 1024;

/// Errors that can occur while compiling a source file.
///
/// Soft parse failures (a combinator that did not match) are not errors;
/// they surface as `Ok(None)` inside the engine and never escape it. Every
/// variant here is fatal for the compilation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `Expect` combinator failed: the grammar is past the point of no
    /// return and the input does not continue as required.
    #[error("expected {what}")]
    Expected { what: &'static str, offset: usize },

    /// No top-level form matched and input bytes remain.
    #[error("unable to parse declaration")]
    Unparsed { offset: usize },

    /// Input nested too deeply for the evaluator.
    #[error("nesting too deep")]
    RecursionLimitExceeded { offset: usize },

    /// A `/* ... */` comment ran past end of input.
    #[error("unterminated block comment")]
    UnterminatedComment { offset: usize },

    /// A string literal ran past end of input.
    #[error("unterminated string literal")]
    UnterminatedString { offset: usize },

    /// A byte outside the printable range 32..=126 inside a string literal.
    #[error("invalid byte {byte:#04x} in string literal")]
    InvalidStringByte { byte: u8, offset: usize },

    /// A character literal missing its closing quote.
    #[error("unterminated character literal")]
    UnterminatedChar { offset: usize },

    /// An escape other than `\n \t \r \' \\` in a character literal.
    #[error("unknown escape '\\{escape}' in character literal")]
    UnknownEscape { escape: char, offset: usize },

    /// Identifier, digit run, or string longer than [`MAX_TOKEN_LEN`].
    #[error("{what} longer than {MAX_TOKEN_LEN} bytes")]
    TokenTooLong { what: &'static str, offset: usize },

    /// Integer literal that does not fit a signed 64-bit value.
    #[error("integer literal out of range")]
    IntegerOutOfRange { offset: usize },

    /// The output sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Byte offset into the source the error points at, when it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Expected { offset, .. }
            | Error::Unparsed { offset }
            | Error::RecursionLimitExceeded { offset }
            | Error::UnterminatedComment { offset }
            | Error::UnterminatedString { offset }
            | Error::InvalidStringByte { offset, .. }
            | Error::UnterminatedChar { offset }
            | Error::UnknownEscape { offset, .. }
            | Error::TokenTooLong { offset, .. }
            | Error::IntegerOutOfRange { offset } => Some(*offset),
            Error::Io(_) => None,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
