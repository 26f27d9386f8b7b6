//! Node tags shared by leaf parsers, the grammar, and the emitter.
//!
//! `NodeKind` serves dual roles: tags on leaf/marker nodes produced by the
//! lexer and tags on composite nodes produced by `And`/`Opt` combinators.
//! The emitter dispatches on the tag alone; the shape of each composite
//! (which child index means what) is fixed by the grammar rule that
//! produced it.

use serde::Serialize;

/// All node tags: leaves, syntactic markers, and composites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NodeKind {
    // --- Leaves ---
    Ident,
    Int,
    Float,
    Str,
    Char,
    Eof,

    // --- Markers: punctuation ---
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Arrow,
    Colon,
    Semi,
    Comma,
    Equals,
    Star,

    // --- Markers: keywords ---
    KwJmp,
    KwRet,
    KwExtern,

    // --- Composites: types ---
    IdType,
    PtrType,
    FunType,
    ArrType,
    TypeList,

    // --- Composites: declarations ---
    Var,
    VarList,
    VarDecl,
    VarDef,
    VarDefList,
    ParamList,
    StructDecl,
    Struct,
    FunDecl,
    Fun,

    // --- Composites: statements ---
    ExpStm,
    LabelStm,
    JmpStm,
    CondJmpStm,
    RetStm,
    StmList,

    // --- Composites: expressions ---
    CallExp,
    ExpList,
}

use NodeKind::*;

impl NodeKind {
    /// Type forms that can appear in a `TypeList` or as a declarator.
    #[inline]
    pub fn is_type(self) -> bool {
        matches!(self, IdType | PtrType | FunType | ArrType)
    }
}
