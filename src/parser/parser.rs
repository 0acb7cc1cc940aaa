//! Recursive descent parser
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: every token,
//! trivia included, ends up in the tree, and malformed input is wrapped in
//! `ERROR` nodes instead of aborting.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse a compilation unit into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Binding power of binary operators, loosest first.
fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    let prec = match kind {
        SyntaxKind::PIPE_PIPE => 1,
        SyntaxKind::AMP_AMP => 2,
        SyntaxKind::PIPE => 3,
        SyntaxKind::CARET => 4,
        SyntaxKind::AMP => 5,
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => 6,
        SyntaxKind::LT
        | SyntaxKind::GT
        | SyntaxKind::LT_EQ
        | SyntaxKind::GT_EQ
        | SyntaxKind::INSTANCEOF_KW => 7,
        SyntaxKind::LT_LT | SyntaxKind::GT_GT | SyntaxKind::GT_GT_GT => 8,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 9,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 10,
        _ => return None,
    };
    Some(prec)
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (trivia is invisible to lookahead)
    // =========================================================================

    /// Index of the n-th significant token at or after `from`.
    fn significant_index(&self, from: usize, n: usize) -> Option<usize> {
        let mut count = 0;
        let mut idx = from;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return Some(idx);
                }
                count += 1;
            }
            idx += 1;
        }
        None
    }

    fn kind_at(&self, idx: Option<usize>) -> SyntaxKind {
        idx.and_then(|i| self.tokens.get(i))
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.kind_at(self.significant_index(self.pos, n))
    }

    fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.significant_index(self.pos, 0).is_none()
    }

    /// The operator at the cursor and the number of tokens it spans.
    ///
    /// Adjacent `>` tokens are joined into `>>`, `>>>` and their
    /// assignment forms; a space between them keeps them apart.
    fn operator(&self) -> (SyntaxKind, usize) {
        let Some(start) = self.significant_index(self.pos, 0) else {
            return (SyntaxKind::ERROR, 1);
        };
        let kinds: Vec<SyntaxKind> = self.tokens[start..].iter().take(3).map(|t| t.kind).collect();
        match kinds.as_slice() {
            [SyntaxKind::GT, SyntaxKind::GT, SyntaxKind::GT_EQ, ..] => (SyntaxKind::GT_GT_GT_EQ, 3),
            [SyntaxKind::GT, SyntaxKind::GT, SyntaxKind::GT, ..] => (SyntaxKind::GT_GT_GT, 3),
            [SyntaxKind::GT, SyntaxKind::GT_EQ, ..] => (SyntaxKind::GT_GT_EQ, 2),
            [SyntaxKind::GT, SyntaxKind::GT, ..] => (SyntaxKind::GT_GT, 2),
            [kind, ..] => (*kind, 1),
            [] => (SyntaxKind::ERROR, 1),
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume `width` adjacent tokens as a single token of `kind`.
    fn bump_joined(&mut self, kind: SyntaxKind, width: usize) {
        self.skip_trivia();
        let end = (self.pos + width).min(self.tokens.len());
        let text: String = self.tokens[self.pos..end].iter().map(|t| t.text).collect();
        self.builder.token(kind.into(), &text);
        self.pos = end;
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}, found {:?}", kind, self.current_kind()));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .significant_index(self.pos, 0)
            .and_then(|i| self.tokens.get(i))
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    // =========================================================================
    // Speculative scanning (no tree building)
    // =========================================================================

    /// Scan a type starting at significant-token offset `n`.
    /// Returns the offset just after the type.
    fn scan_type(&self, mut n: usize) -> Option<usize> {
        let kind = self.nth(n);
        if kind.is_primitive_type() {
            n += 1;
        } else if kind == SyntaxKind::IDENT {
            n += 1;
            if self.nth(n) == SyntaxKind::LT {
                n = self.scan_type_args(n)?;
            }
            while self.nth(n) == SyntaxKind::DOT && self.nth(n + 1) == SyntaxKind::IDENT {
                n += 2;
                if self.nth(n) == SyntaxKind::LT {
                    n = self.scan_type_args(n)?;
                }
            }
        } else {
            return None;
        }
        while self.nth(n) == SyntaxKind::L_BRACKET && self.nth(n + 1) == SyntaxKind::R_BRACKET {
            n += 2;
        }
        Some(n)
    }

    /// Scan a `<...>` type argument list starting at offset `n` (which is `<`).
    fn scan_type_args(&self, mut n: usize) -> Option<usize> {
        let mut depth = 0usize;
        loop {
            match self.nth(n) {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::GT => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(n + 1);
                    }
                }
                SyntaxKind::IDENT
                | SyntaxKind::DOT
                | SyntaxKind::COMMA
                | SyntaxKind::QUESTION
                | SyntaxKind::EXTENDS_KW
                | SyntaxKind::SUPER_KW
                | SyntaxKind::AMP
                | SyntaxKind::L_BRACKET
                | SyntaxKind::R_BRACKET => {}
                kind if kind.is_primitive_type() => {}
                _ => return None,
            }
            n += 1;
        }
    }

    /// `Type Ident` at the current position starts a local variable declaration.
    fn at_local_var_decl(&self) -> bool {
        match self.scan_type(0) {
            Some(after) => self.nth(after) == SyntaxKind::IDENT,
            None => false,
        }
    }

    /// `( Type )` followed by an operand starts a cast.
    fn at_cast(&self) -> bool {
        if !self.at(SyntaxKind::L_PAREN) {
            return false;
        }
        let Some(after) = self.scan_type(1) else {
            return false;
        };
        if self.nth(after) != SyntaxKind::R_PAREN {
            return false;
        }
        if self.nth(1).is_primitive_type() {
            return true;
        }
        let next = self.nth(after + 1);
        next == SyntaxKind::IDENT
            || next.is_literal()
            || matches!(
                next,
                SyntaxKind::L_PAREN
                    | SyntaxKind::THIS_KW
                    | SyntaxKind::SUPER_KW
                    | SyntaxKind::NEW_KW
                    | SyntaxKind::BANG
                    | SyntaxKind::TILDE
            )
    }

    // =========================================================================
    // Compilation unit
    // =========================================================================

    /// SourceFile = PackageDecl? ImportDecl* TypeDecl*
    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());

        if self.at_package_decl() {
            self.parse_package_decl();
        }

        while !self.at_eof() {
            let pos_before = self.pos;
            match self.current_kind() {
                SyntaxKind::IMPORT_KW => self.parse_import_decl(),
                SyntaxKind::SEMICOLON => self.bump(),
                _ => self.parse_member_or_type(true),
            }
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error_recover(
                    format!("unexpected token: {:?}", self.current_kind()),
                    &[SyntaxKind::IMPORT_KW, SyntaxKind::CLASS_KW, SyntaxKind::INTERFACE_KW],
                );
            }
        }

        self.skip_trivia();
        self.finish_node();
    }

    fn at_package_decl(&self) -> bool {
        let mut n = 0;
        while self.nth(n) == SyntaxKind::AT {
            // annotations on a package declaration
            n += 2;
            while self.nth(n) == SyntaxKind::DOT {
                n += 2;
            }
        }
        self.nth(n) == SyntaxKind::PACKAGE_KW
    }

    /// PackageDecl = Annotation* 'package' Path ';'
    fn parse_package_decl(&mut self) {
        self.start_node(SyntaxKind::PACKAGE_DECL);
        while self.at(SyntaxKind::AT) {
            self.parse_annotation();
        }
        self.expect(SyntaxKind::PACKAGE_KW);
        self.parse_path(false);
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// ImportDecl = 'import' 'static'? Path ('.' '*')? ';'
    fn parse_import_decl(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DECL);
        self.bump(); // import
        self.eat(SyntaxKind::STATIC_KW);
        self.parse_path(true);
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Path = Ident ('.' Ident)*, optionally ending in `.*`
    fn parse_path(&mut self, allow_star: bool) {
        self.start_node(SyntaxKind::PATH);
        self.expect(SyntaxKind::IDENT);
        while self.at(SyntaxKind::DOT) {
            match self.nth(1) {
                SyntaxKind::IDENT => {
                    self.bump();
                    self.bump();
                }
                SyntaxKind::STAR if allow_star => {
                    self.bump();
                    self.bump();
                    break;
                }
                _ => break,
            }
        }
        self.finish_node();
    }

    // =========================================================================
    // Modifiers and annotations
    // =========================================================================

    fn parse_modifiers(&mut self) {
        self.start_node(SyntaxKind::MODIFIERS);
        loop {
            let kind = self.current_kind();
            if kind == SyntaxKind::AT && self.nth(1) != SyntaxKind::INTERFACE_KW {
                self.parse_annotation();
            } else if kind.is_modifier() {
                self.bump();
            } else {
                break;
            }
        }
        self.finish_node();
    }

    /// Annotation = '@' Path ('(' balanced ')')?
    fn parse_annotation(&mut self) {
        self.start_node(SyntaxKind::ANNOTATION);
        self.bump(); // @
        self.parse_path(false);
        if self.at(SyntaxKind::L_PAREN) {
            self.skip_balanced_parens();
        }
        self.finish_node();
    }

    fn skip_balanced_parens(&mut self) {
        let mut depth = 0usize;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN => {
                    depth -= 1;
                    if depth == 0 {
                        self.bump();
                        return;
                    }
                }
                _ => {}
            }
            self.bump();
        }
    }

    // =========================================================================
    // Type declarations and members
    // =========================================================================

    /// Parses modifiers, then whichever declaration follows them.
    fn parse_member_or_type(&mut self, top_level: bool) {
        let checkpoint = self.checkpoint();
        self.parse_modifiers();

        match self.current_kind() {
            SyntaxKind::CLASS_KW => self.parse_class_decl(checkpoint),
            SyntaxKind::INTERFACE_KW => self.parse_interface_decl(checkpoint),
            SyntaxKind::AT if self.nth(1) == SyntaxKind::INTERFACE_KW => {
                // annotation type declarations are treated as interfaces
                self.bump();
                self.parse_interface_decl(checkpoint);
            }
            SyntaxKind::ENUM_KW => self.parse_enum_decl(checkpoint),
            _ if top_level => {
                self.start_node_at(checkpoint, SyntaxKind::ERROR);
                self.error("expected a type declaration");
                if !self.at_any(&[SyntaxKind::IMPORT_KW, SyntaxKind::R_BRACE]) && !self.at_eof() {
                    self.bump();
                }
                self.finish_node();
            }
            SyntaxKind::L_BRACE => {
                self.start_node_at(checkpoint, SyntaxKind::INITIALIZER);
                self.parse_block();
                self.finish_node();
            }
            SyntaxKind::SEMICOLON => {
                self.bump();
            }
            _ => self.parse_method_ctor_or_field(checkpoint),
        }
    }

    /// ClassDecl = Modifiers 'class' Name TypeParams? Extends? Implements? ClassBody
    fn parse_class_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::CLASS_DECL);
        self.bump(); // class
        self.parse_name();
        if self.at(SyntaxKind::LT) {
            self.parse_type_params();
        }
        if self.at(SyntaxKind::EXTENDS_KW) {
            self.parse_type_list_clause(SyntaxKind::EXTENDS_CLAUSE);
        }
        if self.at(SyntaxKind::IMPLEMENTS_KW) {
            self.parse_type_list_clause(SyntaxKind::IMPLEMENTS_CLAUSE);
        }
        self.parse_class_body();
        self.finish_node();
    }

    /// InterfaceDecl = Modifiers 'interface' Name TypeParams? Extends? ClassBody
    fn parse_interface_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::INTERFACE_DECL);
        self.bump(); // interface
        self.parse_name();
        if self.at(SyntaxKind::LT) {
            self.parse_type_params();
        }
        if self.at(SyntaxKind::EXTENDS_KW) {
            self.parse_type_list_clause(SyntaxKind::EXTENDS_CLAUSE);
        }
        self.parse_class_body();
        self.finish_node();
    }

    /// EnumDecl = Modifiers 'enum' Name Implements? EnumBody
    fn parse_enum_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::ENUM_DECL);
        self.bump(); // enum
        self.parse_name();
        if self.at(SyntaxKind::IMPLEMENTS_KW) {
            self.parse_type_list_clause(SyntaxKind::IMPLEMENTS_CLAUSE);
        }
        self.parse_enum_body();
        self.finish_node();
    }

    fn parse_name(&mut self) {
        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected a name");
        }
    }

    fn parse_name_ref(&mut self) {
        self.start_node(SyntaxKind::NAME_REF);
        self.expect(SyntaxKind::IDENT);
        self.finish_node();
    }

    /// TypeParams = '<' TypeParam (',' TypeParam)* '>'
    fn parse_type_params(&mut self) {
        self.start_node(SyntaxKind::TYPE_PARAMS);
        self.bump(); // <
        loop {
            self.parse_type_param();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::GT);
        self.finish_node();
    }

    /// TypeParam = Annotation* Name ('extends' ClassType ('&' ClassType)*)?
    fn parse_type_param(&mut self) {
        self.start_node(SyntaxKind::TYPE_PARAM);
        while self.at(SyntaxKind::AT) {
            self.parse_annotation();
        }
        self.parse_name();
        if self.eat(SyntaxKind::EXTENDS_KW) {
            self.parse_type();
            while self.eat(SyntaxKind::AMP) {
                self.parse_type();
            }
        }
        self.finish_node();
    }

    /// ('extends' | 'implements') Type (',' Type)*
    fn parse_type_list_clause(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump(); // keyword
        loop {
            self.parse_type();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.finish_node();
    }

    /// ClassBody = '{' Member* '}'
    fn parse_class_body(&mut self) {
        self.start_node(SyntaxKind::CLASS_BODY);
        if self.expect(SyntaxKind::L_BRACE) {
            self.parse_members_until_r_brace();
        }
        self.finish_node();
    }

    fn parse_members_until_r_brace(&mut self) {
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.parse_member_or_type(false);
            if self.pos == pos_before && !self.at_eof() {
                self.error_recover(
                    format!("unexpected token in body: {:?}", self.current_kind()),
                    &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE],
                );
            }
        }
        self.expect(SyntaxKind::R_BRACE);
    }

    /// EnumBody = '{' (EnumConstant (',' EnumConstant)*)? ','? (';' Member*)? '}'
    fn parse_enum_body(&mut self) {
        self.start_node(SyntaxKind::ENUM_BODY);
        if !self.expect(SyntaxKind::L_BRACE) {
            self.finish_node();
            return;
        }
        while self.at_any(&[SyntaxKind::IDENT, SyntaxKind::AT]) {
            self.parse_enum_constant();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        if self.eat(SyntaxKind::SEMICOLON) {
            self.parse_members_until_r_brace();
        } else {
            self.expect(SyntaxKind::R_BRACE);
        }
        self.finish_node();
    }

    /// EnumConstant = Annotation* Name Arguments? ClassBody?
    fn parse_enum_constant(&mut self) {
        self.start_node(SyntaxKind::ENUM_CONSTANT);
        while self.at(SyntaxKind::AT) {
            self.parse_annotation();
        }
        self.parse_name();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_arg_list();
        }
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_class_body();
        }
        self.finish_node();
    }

    /// Method, constructor or field after the modifiers have been parsed.
    fn parse_method_ctor_or_field(&mut self, checkpoint: Checkpoint) {
        if self.at(SyntaxKind::LT) {
            self.parse_type_params();
        }

        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN {
            self.start_node_at(checkpoint, SyntaxKind::CONSTRUCTOR_DECL);
            self.parse_name();
            self.parse_param_list();
            if self.at(SyntaxKind::THROWS_KW) {
                self.parse_throws_clause();
            }
            self.parse_block();
            self.finish_node();
            return;
        }

        if self.scan_type(0).is_none() && !self.at(SyntaxKind::VOID_KW) {
            self.start_node_at(checkpoint, SyntaxKind::ERROR);
            self.error(format!("expected a member, found {:?}", self.current_kind()));
            while !self.at_eof() && !self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]) {
                self.bump();
            }
            self.eat(SyntaxKind::SEMICOLON);
            self.finish_node();
            return;
        }

        self.parse_type();

        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN {
            self.start_node_at(checkpoint, SyntaxKind::METHOD_DECL);
            self.parse_name();
            self.parse_param_list();
            if self.at(SyntaxKind::L_BRACKET) {
                self.parse_dims();
            }
            if self.at(SyntaxKind::THROWS_KW) {
                self.parse_throws_clause();
            }
            if self.eat(SyntaxKind::DEFAULT_KW) {
                // annotation element default value
                self.parse_expr();
            }
            if self.at(SyntaxKind::L_BRACE) {
                self.parse_block();
            } else {
                self.expect(SyntaxKind::SEMICOLON);
            }
            self.finish_node();
        } else {
            self.start_node_at(checkpoint, SyntaxKind::FIELD_DECL);
            self.parse_var_declarators();
            self.expect(SyntaxKind::SEMICOLON);
            self.finish_node();
        }
    }

    /// VarDeclarator (',' VarDeclarator)*
    fn parse_var_declarators(&mut self) {
        loop {
            self.parse_var_declarator();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    /// VarDeclarator = Name Dims? ('=' (Expr | ArrayInit))?
    fn parse_var_declarator(&mut self) {
        self.start_node(SyntaxKind::VAR_DECLARATOR);
        self.parse_name();
        if self.at(SyntaxKind::L_BRACKET) {
            self.parse_dims();
        }
        if self.eat(SyntaxKind::EQ) {
            if self.at(SyntaxKind::L_BRACE) {
                self.parse_array_init();
            } else {
                self.parse_expr();
            }
        }
        self.finish_node();
    }

    /// Dims = ('[' ']')+
    fn parse_dims(&mut self) {
        self.start_node(SyntaxKind::DIMS);
        while self.at(SyntaxKind::L_BRACKET) {
            self.bump();
            self.expect(SyntaxKind::R_BRACKET);
        }
        self.finish_node();
    }

    /// ParamList = '(' (Param (',' Param)*)? ')'
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        self.expect(SyntaxKind::L_PAREN);
        if !self.at(SyntaxKind::R_PAREN) {
            loop {
                self.parse_param();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Param = Modifiers Type '...'? Name Dims?
    fn parse_param(&mut self) {
        self.start_node(SyntaxKind::PARAM);
        self.parse_modifiers();
        self.parse_type();
        self.eat(SyntaxKind::ELLIPSIS);
        self.parse_name();
        if self.at(SyntaxKind::L_BRACKET) {
            self.parse_dims();
        }
        self.finish_node();
    }

    /// ThrowsClause = 'throws' Type (',' Type)*
    fn parse_throws_clause(&mut self) {
        self.parse_type_list_clause(SyntaxKind::THROWS_CLAUSE);
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Type = (PrimitiveType | 'void' | ClassType | Wildcard) ('[' ']')*
    fn parse_type(&mut self) {
        let checkpoint = self.checkpoint();
        match self.current_kind() {
            kind if kind.is_primitive_type() => {
                self.start_node(SyntaxKind::PRIMITIVE_TYPE);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::VOID_KW => {
                self.start_node(SyntaxKind::VOID_TYPE);
                self.bump();
                self.finish_node();
                return;
            }
            SyntaxKind::QUESTION => {
                self.start_node(SyntaxKind::WILDCARD_TYPE);
                self.bump();
                if self.at_any(&[SyntaxKind::EXTENDS_KW, SyntaxKind::SUPER_KW]) {
                    self.bump();
                    self.parse_type();
                }
                self.finish_node();
                return;
            }
            SyntaxKind::IDENT => self.parse_class_type(checkpoint),
            _ => {
                self.error(format!("expected a type, found {:?}", self.current_kind()));
                return;
            }
        }
        while self.at(SyntaxKind::L_BRACKET) && self.nth(1) == SyntaxKind::R_BRACKET {
            self.start_node_at(checkpoint, SyntaxKind::ARRAY_TYPE);
            self.bump();
            self.bump();
            self.finish_node();
        }
    }

    /// ClassType = NameRef TypeArgs? ('.' NameRef TypeArgs?)*
    ///
    /// Qualified types nest: `Map.Entry` is a CLASS_TYPE whose scope is the
    /// CLASS_TYPE `Map`.
    fn parse_class_type(&mut self, checkpoint: Checkpoint) {
        self.start_node(SyntaxKind::CLASS_TYPE);
        self.parse_name_ref();
        if self.at(SyntaxKind::LT) {
            self.parse_type_args();
        }
        self.finish_node();
        while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
            self.start_node_at(checkpoint, SyntaxKind::CLASS_TYPE);
            self.bump(); // .
            self.parse_name_ref();
            if self.at(SyntaxKind::LT) {
                self.parse_type_args();
            }
            self.finish_node();
        }
    }

    /// TypeArgs = '<' (Type (',' Type)*)? '>'
    fn parse_type_args(&mut self) {
        self.start_node(SyntaxKind::TYPE_ARGS);
        self.bump(); // <
        if !self.at(SyntaxKind::GT) {
            loop {
                self.parse_type();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::GT);
        self.finish_node();
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Block = '{' Statement* '}'
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        if self.expect(SyntaxKind::L_BRACE) {
            while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                let pos_before = self.pos;
                self.parse_statement();
                if self.pos == pos_before && !self.at_eof() {
                    self.error_recover(
                        format!("unexpected token in block: {:?}", self.current_kind()),
                        &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE],
                    );
                }
            }
            self.expect(SyntaxKind::R_BRACE);
        }
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.current_kind() {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::SEMICOLON => {
                self.start_node(SyntaxKind::EMPTY_STMT);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IF_KW => self.parse_if_stmt(),
            SyntaxKind::WHILE_KW => self.parse_while_stmt(),
            SyntaxKind::FOR_KW => self.parse_for_stmt(),
            SyntaxKind::RETURN_KW => self.parse_keyword_stmt(SyntaxKind::RETURN_STMT, true),
            SyntaxKind::THROW_KW => self.parse_keyword_stmt(SyntaxKind::THROW_STMT, true),
            SyntaxKind::BREAK_KW => self.parse_jump_stmt(SyntaxKind::BREAK_STMT),
            SyntaxKind::CONTINUE_KW => self.parse_jump_stmt(SyntaxKind::CONTINUE_STMT),
            SyntaxKind::TRY_KW => self.parse_try_stmt(),
            SyntaxKind::CLASS_KW
            | SyntaxKind::INTERFACE_KW
            | SyntaxKind::ENUM_KW
            | SyntaxKind::ABSTRACT_KW => self.parse_member_or_type(true),
            SyntaxKind::FINAL_KW | SyntaxKind::AT => {
                if self.local_class_follows_modifiers() {
                    self.parse_member_or_type(true);
                } else {
                    self.parse_local_var_decl(true);
                }
            }
            kind if kind.is_primitive_type() => self.parse_local_var_decl(true),
            SyntaxKind::IDENT if self.at_local_var_decl() => self.parse_local_var_decl(true),
            _ => {
                self.start_node(SyntaxKind::EXPR_STMT);
                self.parse_expr();
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
        }
    }

    fn local_class_follows_modifiers(&self) -> bool {
        let mut n = 0;
        loop {
            match self.nth(n) {
                SyntaxKind::AT => {
                    n += 2;
                    while self.nth(n) == SyntaxKind::DOT {
                        n += 2;
                    }
                }
                kind if kind.is_modifier() => n += 1,
                SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW | SyntaxKind::ENUM_KW => {
                    return true;
                }
                _ => return false,
            }
        }
    }

    /// LocalVarDecl = Modifiers Type VarDeclarator (',' VarDeclarator)* ';'
    fn parse_local_var_decl(&mut self, with_semicolon: bool) {
        self.start_node(SyntaxKind::LOCAL_VAR_DECL);
        self.parse_modifiers();
        self.parse_type();
        self.parse_var_declarators();
        if with_semicolon {
            self.expect(SyntaxKind::SEMICOLON);
        }
        self.finish_node();
    }

    /// IfStmt = 'if' '(' Expr ')' Statement ('else' Statement)?
    fn parse_if_stmt(&mut self) {
        self.start_node(SyntaxKind::IF_STMT);
        self.bump();
        self.expect(SyntaxKind::L_PAREN);
        self.parse_expr();
        self.expect(SyntaxKind::R_PAREN);
        self.parse_statement();
        if self.eat(SyntaxKind::ELSE_KW) {
            self.parse_statement();
        }
        self.finish_node();
    }

    /// WhileStmt = 'while' '(' Expr ')' Statement
    fn parse_while_stmt(&mut self) {
        self.start_node(SyntaxKind::WHILE_STMT);
        self.bump();
        self.expect(SyntaxKind::L_PAREN);
        self.parse_expr();
        self.expect(SyntaxKind::R_PAREN);
        self.parse_statement();
        self.finish_node();
    }

    /// ForStmt = 'for' '(' ForInit? ';' Expr? ';' ForUpdate? ')' Statement
    /// ForEachStmt = 'for' '(' Modifiers Type VarDeclarator ':' Expr ')' Statement
    fn parse_for_stmt(&mut self) {
        let checkpoint = self.checkpoint();
        self.bump(); // for
        self.expect(SyntaxKind::L_PAREN);

        if self.at_for_each_header() {
            self.start_node_at(checkpoint, SyntaxKind::FOR_EACH_STMT);
            self.parse_modifiers();
            self.parse_type();
            self.start_node(SyntaxKind::VAR_DECLARATOR);
            self.parse_name();
            self.finish_node();
            self.expect(SyntaxKind::COLON);
            self.parse_expr();
            self.expect(SyntaxKind::R_PAREN);
            self.parse_statement();
            self.finish_node();
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::FOR_STMT);
        if !self.at(SyntaxKind::SEMICOLON) {
            self.start_node(SyntaxKind::FOR_INIT);
            if self.current_kind().is_primitive_type()
                || self.at(SyntaxKind::FINAL_KW)
                || (self.at(SyntaxKind::IDENT) && self.at_local_var_decl())
            {
                self.parse_local_var_decl(false);
            } else {
                self.parse_expr_list();
            }
            self.finish_node();
        }
        self.expect(SyntaxKind::SEMICOLON);
        if !self.at(SyntaxKind::SEMICOLON) {
            self.parse_expr();
        }
        self.expect(SyntaxKind::SEMICOLON);
        if !self.at(SyntaxKind::R_PAREN) {
            self.start_node(SyntaxKind::FOR_UPDATE);
            self.parse_expr_list();
            self.finish_node();
        }
        self.expect(SyntaxKind::R_PAREN);
        self.parse_statement();
        self.finish_node();
    }

    fn at_for_each_header(&self) -> bool {
        let mut n = 0;
        while self.nth(n).is_modifier() {
            n += 1;
        }
        match self.scan_type(n) {
            Some(after) => {
                self.nth(after) == SyntaxKind::IDENT && self.nth(after + 1) == SyntaxKind::COLON
            }
            None => false,
        }
    }

    fn parse_expr_list(&mut self) {
        loop {
            self.parse_expr();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    /// ('return' | 'throw') Expr? ';'
    fn parse_keyword_stmt(&mut self, kind: SyntaxKind, allow_expr: bool) {
        self.start_node(kind);
        self.bump();
        if allow_expr && !self.at(SyntaxKind::SEMICOLON) {
            self.parse_expr();
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// ('break' | 'continue') Ident? ';'
    fn parse_jump_stmt(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.eat(SyntaxKind::IDENT);
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// TryStmt = 'try' Block CatchClause* FinallyClause?
    fn parse_try_stmt(&mut self) {
        self.start_node(SyntaxKind::TRY_STMT);
        self.bump();
        self.parse_block();
        while self.at(SyntaxKind::CATCH_KW) {
            self.start_node(SyntaxKind::CATCH_CLAUSE);
            self.bump();
            self.expect(SyntaxKind::L_PAREN);
            self.parse_param();
            self.expect(SyntaxKind::R_PAREN);
            self.parse_block();
            self.finish_node();
        }
        if self.at(SyntaxKind::FINALLY_KW) {
            self.start_node(SyntaxKind::FINALLY_CLAUSE);
            self.bump();
            self.parse_block();
            self.finish_node();
        }
        self.finish_node();
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expr(&mut self) {
        self.parse_assignment();
    }

    /// Assignment = Conditional (AssignOp Assignment)?
    fn parse_assignment(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_conditional();
        let (op, width) = self.operator();
        if op.is_assign_op() {
            self.start_node_at(checkpoint, SyntaxKind::ASSIGN_EXPR);
            self.bump_joined(op, width);
            if self.at(SyntaxKind::L_BRACE) {
                self.parse_array_init();
            } else {
                self.parse_assignment();
            }
            self.finish_node();
        }
    }

    /// Conditional = Binary ('?' Expr ':' Conditional)?
    fn parse_conditional(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_binary(1);
        if self.at(SyntaxKind::QUESTION) {
            self.start_node_at(checkpoint, SyntaxKind::CONDITIONAL_EXPR);
            self.bump();
            self.parse_expr();
            self.expect(SyntaxKind::COLON);
            self.parse_conditional();
            self.finish_node();
        }
    }

    /// Precedence climbing over the binary operators.
    fn parse_binary(&mut self, min_precedence: u8) {
        let checkpoint = self.checkpoint();
        self.parse_unary();
        loop {
            let (kind, width) = self.operator();
            let Some(precedence) = binary_precedence(kind) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            if kind == SyntaxKind::INSTANCEOF_KW {
                self.start_node_at(checkpoint, SyntaxKind::INSTANCEOF_EXPR);
                self.bump();
                self.eat(SyntaxKind::FINAL_KW);
                self.parse_type();
                // pattern variable, e.g. `o instanceof String s`
                if self.at(SyntaxKind::IDENT) {
                    self.start_node(SyntaxKind::VAR_DECLARATOR);
                    self.parse_name();
                    self.finish_node();
                }
                self.finish_node();
                continue;
            }
            self.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
            self.bump_joined(kind, width);
            self.parse_binary(precedence + 1);
            self.finish_node();
        }
    }

    /// Unary = ('!' | '~' | '+' | '-' | '++' | '--') Unary | Cast | Postfix
    fn parse_unary(&mut self) {
        match self.current_kind() {
            SyntaxKind::BANG
            | SyntaxKind::TILDE
            | SyntaxKind::PLUS
            | SyntaxKind::MINUS
            | SyntaxKind::PLUS_PLUS
            | SyntaxKind::MINUS_MINUS => {
                self.start_node(SyntaxKind::UNARY_EXPR);
                self.bump();
                self.parse_unary();
                self.finish_node();
            }
            SyntaxKind::L_PAREN if self.at_cast() => {
                self.start_node(SyntaxKind::CAST_EXPR);
                self.bump(); // (
                self.parse_type();
                self.expect(SyntaxKind::R_PAREN);
                self.parse_unary();
                self.finish_node();
            }
            _ => self.parse_postfix(),
        }
    }

    /// Postfix = Primary Suffix* ('++' | '--')?
    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary();
        loop {
            match self.current_kind() {
                SyntaxKind::DOT if self.nth(1) == SyntaxKind::IDENT => {
                    let is_call = self.nth(2) == SyntaxKind::L_PAREN;
                    let kind = if is_call {
                        SyntaxKind::METHOD_CALL_EXPR
                    } else {
                        SyntaxKind::FIELD_ACCESS_EXPR
                    };
                    self.start_node_at(checkpoint, kind);
                    self.bump(); // .
                    self.parse_name_ref();
                    if is_call {
                        self.parse_arg_list();
                    }
                    self.finish_node();
                }
                SyntaxKind::L_BRACKET => {
                    self.start_node_at(checkpoint, SyntaxKind::ARRAY_ACCESS_EXPR);
                    self.bump();
                    self.parse_expr();
                    self.expect(SyntaxKind::R_BRACKET);
                    self.finish_node();
                }
                SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                    self.start_node_at(checkpoint, SyntaxKind::POSTFIX_EXPR);
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_primary(&mut self) {
        match self.current_kind() {
            kind if kind.is_literal() => {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IDENT => {
                if self.nth(1) == SyntaxKind::L_PAREN {
                    self.start_node(SyntaxKind::METHOD_CALL_EXPR);
                    self.parse_name_ref();
                    self.parse_arg_list();
                } else {
                    self.start_node(SyntaxKind::NAME_EXPR);
                    self.parse_name_ref();
                }
                self.finish_node();
            }
            SyntaxKind::THIS_KW | SyntaxKind::SUPER_KW => {
                if self.nth(1) == SyntaxKind::L_PAREN {
                    self.start_node(SyntaxKind::CTOR_CALL_EXPR);
                    self.bump();
                    self.parse_arg_list();
                } else if self.at(SyntaxKind::THIS_KW) {
                    self.start_node(SyntaxKind::THIS_EXPR);
                    self.bump();
                } else {
                    self.start_node(SyntaxKind::SUPER_EXPR);
                    self.bump();
                }
                self.finish_node();
            }
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                self.bump();
                self.parse_expr();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            SyntaxKind::NEW_KW => self.parse_new_expr(),
            _ => {
                self.start_node(SyntaxKind::ERROR);
                self.error(format!("expected an expression, found {:?}", self.current_kind()));
                if !self.at_eof()
                    && !self.at_any(&[
                        SyntaxKind::SEMICOLON,
                        SyntaxKind::R_BRACE,
                        SyntaxKind::R_PAREN,
                        SyntaxKind::COMMA,
                    ])
                {
                    self.bump();
                }
                self.finish_node();
            }
        }
    }

    /// NewExpr = 'new' ClassType Arguments ClassBody?
    /// ArrayCreationExpr = 'new' (PrimitiveType | ClassType) DimExpr+ ArrayInit?
    fn parse_new_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.bump(); // new
        let type_checkpoint = self.checkpoint();
        if self.current_kind().is_primitive_type() {
            self.start_node(SyntaxKind::PRIMITIVE_TYPE);
            self.bump();
            self.finish_node();
        } else if self.at(SyntaxKind::IDENT) {
            self.parse_class_type(type_checkpoint);
        } else {
            self.start_node_at(checkpoint, SyntaxKind::NEW_EXPR);
            self.error("expected a type after `new`");
            self.finish_node();
            return;
        }

        if self.at(SyntaxKind::L_BRACKET) {
            self.start_node_at(checkpoint, SyntaxKind::ARRAY_CREATION_EXPR);
            while self.at(SyntaxKind::L_BRACKET) {
                self.start_node(SyntaxKind::DIM_EXPR);
                self.bump();
                if !self.at(SyntaxKind::R_BRACKET) {
                    self.parse_expr();
                }
                self.expect(SyntaxKind::R_BRACKET);
                self.finish_node();
            }
            if self.at(SyntaxKind::L_BRACE) {
                self.parse_array_init();
            }
            self.finish_node();
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::NEW_EXPR);
        self.parse_arg_list();
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_class_body();
        }
        self.finish_node();
    }

    /// ArrayInit = '{' (VariableInit (',' VariableInit)*)? ','? '}'
    fn parse_array_init(&mut self) {
        self.start_node(SyntaxKind::ARRAY_INIT);
        self.bump(); // {
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            if self.at(SyntaxKind::L_BRACE) {
                self.parse_array_init();
            } else {
                self.parse_expr();
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// Arguments = '(' (Expr (',' Expr)*)? ')'
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.expect(SyntaxKind::L_PAREN);
        if !self.at(SyntaxKind::R_PAREN) {
            self.parse_expr_list();
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }
}
