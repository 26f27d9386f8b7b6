//! Per-kind emission routines.
//!
//! Types emit in two passes: `type_head` writes everything that belongs
//! before the declared identifier, `type_tail` everything after. C's
//! declarator syntax puts the name in the middle of pointer, array, and
//! function types, so a single recursive walk cannot produce it; the split
//! is what reproduces `i32 * buf [(10)]` from `buf : [*i32; 10]`.
//!
//! Expressions always emit wrapped in parentheses, which keeps the output
//! correct without precedence tracking.

use std::io::{self, Write};

use crate::parser::{Node, NodeKind};

/// Writes translated declarations to a sink.
pub struct Emitter<W: Write> {
    out: W,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes the macro prelude verbatim. The caller owns the text; the
    /// driver writes it once, before the first declaration.
    pub fn prelude(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    /// Emits one top-level declaration.
    pub fn declaration(&mut self, node: &Node) -> io::Result<()> {
        match node.kind() {
            NodeKind::Struct => self.structure(node),
            NodeKind::StructDecl => self.structure_decl(node),
            NodeKind::VarDef => self.var_def(node),
            NodeKind::VarDecl => self.var_decl(node),
            NodeKind::FunDecl => self.fun_decl(node),
            NodeKind::Fun => self.fun(node),
            other => panic!("declaration: {:?} is not a top-level form", other),
        }
    }

    /// `X { a : T ; ... }` becomes a forward typedef plus the struct body,
    /// each member terminated with `;`.
    fn structure(&mut self, node: &Node) -> io::Result<()> {
        let name = node.child(0).as_text();
        writeln!(self.out, "typedef struct {name} {name};")?;
        writeln!(self.out, "typedef struct {name} {{")?;
        for member in node.child(2).children() {
            if member.kind() != NodeKind::Var {
                continue;
            }
            self.var(member)?;
            writeln!(self.out, ";")?;
        }
        writeln!(self.out, "}} {name};")
    }

    /// `X ;` becomes only the forward typedef.
    fn structure_decl(&mut self, node: &Node) -> io::Result<()> {
        let name = node.child(0).as_text();
        writeln!(self.out, "typedef struct {name} {name};")
    }

    /// `id : type` as a declarator: head, name, tail.
    fn var(&mut self, node: &Node) -> io::Result<()> {
        let ty = node.child(2);
        self.type_head(ty)?;
        write!(self.out, " {} ", node.child(0).as_text())?;
        self.type_tail(ty)
    }

    /// `extern id : type ;`
    fn var_decl(&mut self, node: &Node) -> io::Result<()> {
        write!(self.out, "extern ")?;
        self.var(node.child(1))?;
        writeln!(self.out, ";")
    }

    /// `id : type = exp ;`
    fn var_def(&mut self, node: &Node) -> io::Result<()> {
        self.var(node.child(0))?;
        write!(self.out, "= ")?;
        self.exp(node.child(2))?;
        writeln!(self.out, ";")
    }

    /// `id (type, ...) -> type ;` becomes a C prototype with unnamed
    /// parameter types.
    fn fun_decl(&mut self, node: &Node) -> io::Result<()> {
        let fun_type = node.child(1);
        let ret = fun_type.child(4);
        self.type_head(ret)?;
        write!(self.out, " {}(", node.child(0).as_text())?;
        let mut first = true;
        for param in fun_type.child(1).children() {
            if !param.kind().is_type() {
                continue;
            }
            if !first {
                write!(self.out, ", ")?;
            }
            first = false;
            self.type_full(param)?;
        }
        write!(self.out, ")")?;
        self.type_tail(ret)?;
        writeln!(self.out, ";")
    }

    /// Signature, local definitions, statements, closing brace.
    fn fun(&mut self, node: &Node) -> io::Result<()> {
        let ret = node.child(5);
        self.type_head(ret)?;
        write!(self.out, " {}(", node.child(0).as_text())?;
        let mut first = true;
        for param in node.child(2).children() {
            if param.kind() != NodeKind::Var {
                continue;
            }
            if !first {
                write!(self.out, ", ")?;
            }
            first = false;
            self.var(param)?;
        }
        write!(self.out, ")")?;
        self.type_tail(ret)?;
        writeln!(self.out, " {{")?;
        for def in node.child(6).children() {
            self.var_def(def)?;
        }
        for stm in node.child(8).children() {
            self.stm(stm)?;
        }
        writeln!(self.out, "}}")
    }

    /// Everything of the type that precedes the declared name.
    fn type_head(&mut self, ty: &Node) -> io::Result<()> {
        match ty.kind() {
            NodeKind::IdType => write!(self.out, "{}", ty.child(0).as_text()),
            NodeKind::PtrType => {
                self.type_head(ty.child(1))?;
                write!(self.out, " *")
            }
            NodeKind::ArrType => self.type_head(ty.child(1)),
            NodeKind::FunType => {
                self.type_head(ty.child(4))?;
                write!(self.out, "(*")
            }
            other => panic!("type_head: {:?} is not a type", other),
        }
    }

    /// Everything of the type that follows the declared name.
    fn type_tail(&mut self, ty: &Node) -> io::Result<()> {
        match ty.kind() {
            NodeKind::IdType => Ok(()),
            NodeKind::PtrType => self.type_tail(ty.child(1)),
            NodeKind::ArrType => {
                write!(self.out, "[")?;
                self.exp(ty.child(3))?;
                write!(self.out, "]")?;
                self.type_tail(ty.child(1))
            }
            NodeKind::FunType => {
                write!(self.out, ")(")?;
                let mut first = true;
                for param in ty.child(1).children() {
                    if !param.kind().is_type() {
                        continue;
                    }
                    if !first {
                        write!(self.out, ", ")?;
                    }
                    first = false;
                    self.type_full(param)?;
                }
                write!(self.out, ")")?;
                self.type_tail(ty.child(4))
            }
            other => panic!("type_tail: {:?} is not a type", other),
        }
    }

    /// Head immediately followed by tail: a type with no declared name, as
    /// in prototype parameter lists.
    fn type_full(&mut self, ty: &Node) -> io::Result<()> {
        self.type_head(ty)?;
        self.type_tail(ty)
    }

    fn stm(&mut self, node: &Node) -> io::Result<()> {
        match node.kind() {
            // the empty statement emits nothing
            NodeKind::Semi => Ok(()),
            NodeKind::ExpStm => {
                self.exp(node.child(0))?;
                writeln!(self.out, ";")
            }
            NodeKind::LabelStm => {
                writeln!(self.out, "{} :", node.child(0).as_text())
            }
            NodeKind::JmpStm => {
                writeln!(self.out, "goto {};", node.child(1).as_text())
            }
            NodeKind::CondJmpStm => {
                write!(self.out, "if(")?;
                self.exp(node.child(1))?;
                writeln!(self.out, ") goto {};", node.child(2).as_text())
            }
            NodeKind::RetStm => {
                write!(self.out, "return ")?;
                self.exp(node.child(1))?;
                writeln!(self.out, ";")
            }
            other => panic!("stm: {:?} is not a statement", other),
        }
    }

    fn exp(&mut self, node: &Node) -> io::Result<()> {
        write!(self.out, "(")?;
        match node.kind() {
            NodeKind::Int => write!(self.out, "{}", node.as_int())?,
            NodeKind::Float => write!(self.out, "{:?}", node.as_float())?,
            NodeKind::Str => write!(self.out, "\"{}\"", node.as_text())?,
            NodeKind::Ident => write!(self.out, "{}", node.as_text())?,
            NodeKind::CallExp => {
                let exps = node.child(1).children();
                match exps.split_first() {
                    None => write!(self.out, "()")?,
                    Some((head, args)) => {
                        self.exp(head)?;
                        write!(self.out, "(")?;
                        for (i, arg) in args.iter().enumerate() {
                            if i > 0 {
                                write!(self.out, ", ")?;
                            }
                            self.exp(arg)?;
                        }
                        write!(self.out, ")")?;
                    }
                }
            }
            other => panic!("exp: {:?} is not an expression", other),
        }
        write!(self.out, ")")
    }
}
