//! The compilation loop: parse one top-level form, emit it, repeat.
//!
//! Parsing and emission share nothing but the cursor and the sink, both
//! threaded explicitly; a declaration's subtree is released as soon as it
//! has been emitted.

use std::io::Write;

use crate::emit::Emitter;
use crate::parser::{Grammar, Node, NodeKind, Parser};
use crate::{Error, Result};

/// Translates a whole SC source to C, writing the prelude first and then
/// each declaration in input order. Returns the number of declarations
/// emitted.
///
/// A root-combinator miss with input remaining is fatal: partial output may
/// already be in the sink and the caller must treat it as invalid.
pub fn translate<W: Write>(source: &str, prelude: &str, out: W) -> Result<usize> {
    let grammar = Grammar::new();
    let mut parser = Parser::new(&grammar, source);
    let mut emitter = Emitter::new(out);

    emitter.prelude(prelude)?;

    let mut emitted = 0;
    loop {
        match parser.parse_root()? {
            Some(node) if node.kind() == NodeKind::Eof => return Ok(emitted),
            Some(node) => {
                emitter.declaration(&node)?;
                emitted += 1;
            }
            None => {
                return Err(Error::Unparsed {
                    offset: parser.offset_after_trivia(),
                });
            }
        }
    }
}

/// Parses a whole SC source into its top-level declarations without
/// emitting anything. Backs the CLI's AST dump.
pub fn parse(source: &str) -> Result<Vec<Node>> {
    let grammar = Grammar::new();
    let mut parser = Parser::new(&grammar, source);

    let mut declarations = Vec::new();
    loop {
        match parser.parse_root()? {
            Some(node) if node.kind() == NodeKind::Eof => return Ok(declarations),
            Some(node) => declarations.push(node),
            None => {
                return Err(Error::Unparsed {
                    offset: parser.offset_after_trivia(),
                });
            }
        }
    }
}
