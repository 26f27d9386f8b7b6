//! Combinator arena and recursive evaluator.
//!
//! Combinators are stored in a flat `Vec` and reference each other by
//! [`CombinatorId`]. The grammar is a graph, not a tree: the expression
//! rule is a child of the call rule and vice versa. Index edges give
//! sharing and recursion with a single owner and a single lifetime.
//!
//! Evaluation is single-threaded recursive descent parameterized by the
//! byte cursor. Every path that returns `Ok(None)` restores the cursor to
//! where the combinator entered; the whole backtracking discipline rests
//! on that one rule.

use crate::{Error, Result};

use super::kind::NodeKind;
use super::lexer::{Leaf, scan};
use super::node::Node;
use super::reader::Reader;

/// Index into [`Grammar`]'s arena.
pub type CombinatorId = u32;

/// Maximum evaluator nesting before parsing fails.
const DEPTH_LIMIT: u32 = 512;

/// A parser expressed as a composition of simpler parsers.
#[derive(Debug, Clone)]
pub enum Combinator {
    /// Delegates to a leaf parser.
    Just(Leaf),
    /// Tries children in order; first success wins.
    Or { children: Vec<CombinatorId> },
    /// All children in sequence, or rewind everything.
    And {
        kind: NodeKind,
        children: Vec<CombinatorId>,
    },
    /// `elem (sep elem)* sep?` list with the trailing separator either
    /// forbidden or required. Separator markers are retained as children.
    Opt {
        kind: NodeKind,
        element: CombinatorId,
        separator: Option<CombinatorId>,
        require_trailing: bool,
    },
    /// Propagates its child's success; turns its failure into a fatal
    /// diagnostic carrying `what`.
    Expect {
        child: CombinatorId,
        what: &'static str,
    },
}

/// An immutable combinator graph. Built once, evaluated many times; parsing
/// is a pure function of the graph and the cursor position.
#[derive(Debug)]
pub struct Grammar {
    nodes: Vec<Combinator>,
    root: CombinatorId,
}

impl Grammar {
    #[inline]
    pub fn root(&self) -> CombinatorId {
        self.root
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: CombinatorId) -> &Combinator {
        &self.nodes[id as usize]
    }
}

/// Append-only builder for [`Grammar`]. Cyclic rules reserve a slot first
/// and fill it once the referenced pieces exist.
pub(super) struct GrammarBuilder {
    nodes: Vec<Combinator>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn add(&mut self, combinator: Combinator) -> CombinatorId {
        let id = self.nodes.len() as CombinatorId;
        self.nodes.push(combinator);
        id
    }

    pub fn just(&mut self, leaf: Leaf) -> CombinatorId {
        self.add(Combinator::Just(leaf))
    }

    pub fn op(&mut self, text: &'static str, kind: NodeKind) -> CombinatorId {
        self.just(Leaf::Marker {
            text,
            kind,
            is_op: true,
        })
    }

    pub fn keyword(&mut self, text: &'static str, kind: NodeKind) -> CombinatorId {
        self.just(Leaf::Marker {
            text,
            kind,
            is_op: false,
        })
    }

    pub fn or(&mut self, children: Vec<CombinatorId>) -> CombinatorId {
        self.add(Combinator::Or { children })
    }

    pub fn and(&mut self, kind: NodeKind, children: Vec<CombinatorId>) -> CombinatorId {
        self.add(Combinator::And { kind, children })
    }

    pub fn opt(
        &mut self,
        kind: NodeKind,
        element: CombinatorId,
        separator: Option<CombinatorId>,
        require_trailing: bool,
    ) -> CombinatorId {
        self.add(Combinator::Opt {
            kind,
            element,
            separator,
            require_trailing,
        })
    }

    pub fn expect(&mut self, child: CombinatorId, what: &'static str) -> CombinatorId {
        self.add(Combinator::Expect { child, what })
    }

    /// Reserves a slot for a rule that participates in a cycle.
    pub fn reserve(&mut self) -> CombinatorId {
        self.add(Combinator::Or {
            children: Vec::new(),
        })
    }

    /// Fills a reserved slot.
    pub fn fill(&mut self, id: CombinatorId, combinator: Combinator) {
        let slot = &mut self.nodes[id as usize];
        assert!(
            matches!(slot, Combinator::Or { children } if children.is_empty()),
            "fill: slot {} is not a reserved placeholder",
            id
        );
        *slot = combinator;
    }

    pub fn finish(self, root: CombinatorId) -> Grammar {
        Grammar {
            nodes: self.nodes,
            root,
        }
    }
}

/// Evaluator state: the cursor plus a nesting guard. The grammar is
/// borrowed, so one graph serves any number of parses.
pub struct Parser<'g, 'src> {
    grammar: &'g Grammar,
    reader: Reader<'src>,
    depth: u32,
}

impl<'g, 'src> Parser<'g, 'src> {
    pub fn new(grammar: &'g Grammar, source: &'src str) -> Self {
        Self {
            grammar,
            reader: Reader::new(source),
            depth: 0,
        }
    }

    /// Current byte offset of the cursor.
    #[inline]
    pub fn offset(&self) -> usize {
        self.reader.pos()
    }

    /// Skips trivia and reports the offset of the next significant byte.
    /// Used for error reporting after a failed parse.
    pub fn offset_after_trivia(&mut self) -> usize {
        let _ = self.reader.skip();
        self.reader.pos()
    }

    /// Evaluates the root combinator at the current position.
    pub fn parse_root(&mut self) -> Result<Option<Node>> {
        self.eval(self.grammar.root())
    }

    pub(super) fn eval(&mut self, id: CombinatorId) -> Result<Option<Node>> {
        if self.depth >= DEPTH_LIMIT {
            return Err(Error::RecursionLimitExceeded {
                offset: self.reader.pos(),
            });
        }
        self.depth += 1;
        let result = self.eval_inner(id);
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, id: CombinatorId) -> Result<Option<Node>> {
        let grammar: &'g Grammar = self.grammar;
        match grammar.node(id) {
            Combinator::Just(leaf) => scan(*leaf, &mut self.reader),

            Combinator::Or { children } => {
                // each failed child has already restored the cursor
                for &child in children {
                    if let Some(node) = self.eval(child)? {
                        return Ok(Some(node));
                    }
                }
                Ok(None)
            }

            Combinator::And { kind, children } => {
                let entry = self.reader.pos();
                let mut collected = Vec::with_capacity(children.len());
                for &child in children {
                    match self.eval(child)? {
                        Some(node) => collected.push(node),
                        None => {
                            self.reader.rewind(self.reader.pos() - entry);
                            return Ok(None);
                        }
                    }
                }
                Ok(Some(Node::tree(*kind, collected)))
            }

            Combinator::Opt {
                kind,
                element,
                separator,
                require_trailing,
            } => self.eval_opt(*kind, *element, *separator, *require_trailing),

            Combinator::Expect { child, what } => match self.eval(*child)? {
                Some(node) => Ok(Some(node)),
                None => Err(Error::Expected {
                    what: *what,
                    offset: self.offset_after_trivia(),
                }),
            },
        }
    }

    fn eval_opt(
        &mut self,
        kind: NodeKind,
        element: CombinatorId,
        separator: Option<CombinatorId>,
        require_trailing: bool,
    ) -> Result<Option<Node>> {
        let entry = self.reader.pos();
        let mut collected = Vec::new();
        let mut after_separator = false;

        loop {
            match self.eval(element)? {
                Some(node) => collected.push(node),
                None => {
                    // A consumed separator promised another element. When no
                    // trailing separator is allowed that promise is broken and
                    // the whole list unwinds; with a required trailing
                    // separator this is the well-formed end of the list.
                    if after_separator && !require_trailing {
                        self.reader.rewind(self.reader.pos() - entry);
                        return Ok(None);
                    }
                    break;
                }
            }

            let Some(separator) = separator else {
                continue;
            };
            match self.eval(separator)? {
                Some(node) => {
                    collected.push(node);
                    after_separator = true;
                }
                None => {
                    if require_trailing {
                        self.reader.rewind(self.reader.pos() - entry);
                        return Ok(None);
                    }
                    break;
                }
            }
        }

        Ok(Some(Node::tree(kind, collected)))
    }
}
