//! The SC-Lang grammar as a combinator graph.
//!
//! Top-level forms, tried in order: structure forward declaration,
//! structure definition, variable definition, variable declaration,
//! function forward declaration, function definition, end of input.
//!
//! ```text
//! type      = arr-type | fun-type | ptr-type | id-type
//! id-type   = id
//! ptr-type  = '*' type
//! fun-type  = '(' (type (',' type)*)? ')' '->' type
//! arr-type  = '[' type ';' exp ']'
//! var       = id ':' type
//! struct    = id '{' (var ';')* '}'
//! var-def   = var '=' exp ';'
//! var-decl  = 'extern' var ';'
//! fun-decl  = id fun-type ';'
//! fun       = id '(' (var (',' var)*)? ')' '->' type var-def* '{' stm* '}'
//! stm       = ';' | exp ';' | id ':' | 'jmp' id ';' | 'jmp' exp id ';'
//!           | 'ret' exp ';'
//! exp       = int | id | str | float | '(' exp* ')'
//! ```
//!
//! `Or` commits to the first match, so alternatives go most-specific first
//! (array before function before pointer before identifier types). `Expect`
//! appears only where the consumed prefix rules out every other top-level
//! alternative; everything on a shared prefix fails softly.

use super::core::{Combinator, Grammar, GrammarBuilder};
use super::kind::NodeKind;
use super::lexer::Leaf;

impl Grammar {
    /// Builds the SC-Lang grammar. Constructed once and reused across
    /// parses; evaluation never mutates it.
    pub fn new() -> Grammar {
        let mut g = GrammarBuilder::new();

        // terminals
        let ident = g.just(Leaf::Ident);
        let integer = g.just(Leaf::Int);
        let float = g.just(Leaf::Float);
        let string = g.just(Leaf::Str);
        let eof = g.just(Leaf::Eof);

        let lbrace = g.op("{", NodeKind::LBrace);
        let rbrace = g.op("}", NodeKind::RBrace);
        let lparen = g.op("(", NodeKind::LParen);
        let rparen = g.op(")", NodeKind::RParen);
        let lbracket = g.op("[", NodeKind::LBracket);
        let rbracket = g.op("]", NodeKind::RBracket);
        let arrow = g.op("->", NodeKind::Arrow);
        let colon = g.op(":", NodeKind::Colon);
        let semi = g.op(";", NodeKind::Semi);
        let comma = g.op(",", NodeKind::Comma);
        let equals = g.op("=", NodeKind::Equals);
        let star = g.op("*", NodeKind::Star);

        let kw_jmp = g.keyword("jmp", NodeKind::KwJmp);
        let kw_ret = g.keyword("ret", NodeKind::KwRet);
        let kw_extern = g.keyword("extern", NodeKind::KwExtern);

        // `exp` and `type` recurse through call/array/function forms, so
        // their slots exist before the rules that reference them.
        let exp = g.reserve();
        let ty = g.reserve();

        // types, most specific first
        let id_type = g.and(NodeKind::IdType, vec![ident]);
        let ptr_type = g.and(NodeKind::PtrType, vec![star, ty]);
        let type_list = g.opt(NodeKind::TypeList, ty, Some(comma), false);
        let fun_type = g.and(
            NodeKind::FunType,
            vec![lparen, type_list, rparen, arrow, ty],
        );
        let arr_type = g.and(
            NodeKind::ArrType,
            vec![lbracket, ty, semi, exp, rbracket],
        );
        g.fill(
            ty,
            Combinator::Or {
                children: vec![arr_type, fun_type, ptr_type, id_type],
            },
        );

        // expressions; the integer leaf refuses digit runs continuing as
        // `.` or `f`, which is what lets the float alternative see them
        let exp_list = g.opt(NodeKind::ExpList, exp, None, false);
        let call_exp = g.and(NodeKind::CallExp, vec![lparen, exp_list, rparen]);
        g.fill(
            exp,
            Combinator::Or {
                children: vec![integer, ident, string, float, call_exp],
            },
        );

        // variables
        let var = g.and(NodeKind::Var, vec![ident, colon, ty]);
        let member_semi = g.expect(semi, "';' after member declaration");
        let var_list = g.opt(NodeKind::VarList, var, Some(member_semi), true);
        let param_list = g.opt(NodeKind::ParamList, var, Some(comma), false);

        let def_exp = g.expect(exp, "expression after '='");
        let def_semi = g.expect(semi, "';' after definition");
        let var_def = g.and(NodeKind::VarDef, vec![var, equals, def_exp, def_semi]);
        let var_def_list = g.opt(NodeKind::VarDefList, var_def, None, false);

        let extern_var = g.expect(var, "variable after 'extern'");
        let extern_semi = g.expect(semi, "';' after declaration");
        let var_decl = g.and(
            NodeKind::VarDecl,
            vec![kw_extern, extern_var, extern_semi],
        );

        // structures
        let struct_decl = g.and(NodeKind::StructDecl, vec![ident, semi]);
        let struct_close = g.expect(rbrace, "'}' to close structure");
        let struct_def = g.and(
            NodeKind::Struct,
            vec![ident, lbrace, var_list, struct_close],
        );

        // statements
        let exp_stm = g.and(NodeKind::ExpStm, vec![exp, semi]);
        let label_stm = g.and(NodeKind::LabelStm, vec![ident, colon]);
        let jmp_stm = g.and(NodeKind::JmpStm, vec![kw_jmp, ident, semi]);
        let cond_jmp_stm = g.and(NodeKind::CondJmpStm, vec![kw_jmp, exp, ident, semi]);
        let ret_exp = g.expect(exp, "expression after 'ret'");
        let ret_semi = g.expect(semi, "';' after return statement");
        let ret_stm = g.and(NodeKind::RetStm, vec![kw_ret, ret_exp, ret_semi]);
        let stm = g.or(vec![
            semi,
            exp_stm,
            label_stm,
            jmp_stm,
            cond_jmp_stm,
            ret_stm,
        ]);
        let stm_list = g.opt(NodeKind::StmList, stm, None, false);

        // functions
        let fun_decl = g.and(NodeKind::FunDecl, vec![ident, fun_type, semi]);
        let body_close = g.expect(rbrace, "'}' to close function body");
        let fun = g.and(
            NodeKind::Fun,
            vec![
                ident,
                lparen,
                param_list,
                rparen,
                arrow,
                ty,
                var_def_list,
                lbrace,
                stm_list,
                body_close,
            ],
        );

        let root = g.or(vec![
            struct_decl,
            struct_def,
            var_def,
            var_decl,
            fun_decl,
            fun,
            eof,
        ]);

        g.finish(root)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::new()
    }
}
