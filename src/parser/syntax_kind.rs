//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of the Java-like source language.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, statements, expressions, types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,        // identifier
    INT_NUMBER,   // 42, 0xFF
    LONG_NUMBER,  // 42L
    FLOAT_NUMBER, // 1.5f
    DOUBLE_NUMBER, // 1.5, 1e3, 2d
    CHAR_LIT,     // 'c'
    STRING_LIT,   // "hello"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_PAREN,     // (
    R_PAREN,     // )
    SEMICOLON,   // ;
    COLON,       // :
    COLON_COLON, // ::
    DOT,         // .
    ELLIPSIS,    // ...
    COMMA,       // ,
    AT,          // @
    QUESTION,    // ?
    EQ,          // =
    EQ_EQ,       // ==
    BANG_EQ,     // !=
    LT,          // <
    GT,          // >
    LT_EQ,       // <=
    GT_EQ,       // >=
    AMP_AMP,     // &&
    PIPE_PIPE,   // ||
    AMP,         // &
    PIPE,        // |
    CARET,       // ^
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    PERCENT,     // %
    BANG,        // !
    TILDE,       // ~
    PLUS_PLUS,   // ++
    MINUS_MINUS, // --
    PLUS_EQ,     // +=
    MINUS_EQ,    // -=
    STAR_EQ,     // *=
    SLASH_EQ,    // /=
    PERCENT_EQ,  // %=
    AMP_EQ,      // &=
    PIPE_EQ,     // |=
    CARET_EQ,    // ^=
    LT_LT,       // <<
    LT_LT_EQ,    // <<=
    GT_GT,       // >> (joined by the parser)
    GT_GT_GT,    // >>> (joined by the parser)
    GT_GT_EQ,    // >>= (joined by the parser)
    GT_GT_GT_EQ, // >>>= (joined by the parser)
    ARROW,       // ->

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    PACKAGE_KW,
    IMPORT_KW,
    CLASS_KW,
    INTERFACE_KW,
    ENUM_KW,
    EXTENDS_KW,
    IMPLEMENTS_KW,
    PUBLIC_KW,
    PROTECTED_KW,
    PRIVATE_KW,
    STATIC_KW,
    FINAL_KW,
    ABSTRACT_KW,
    NATIVE_KW,
    SYNCHRONIZED_KW,
    TRANSIENT_KW,
    VOLATILE_KW,
    STRICTFP_KW,
    DEFAULT_KW,
    THROWS_KW,
    VOID_KW,
    BOOLEAN_KW,
    BYTE_KW,
    SHORT_KW,
    CHAR_KW,
    INT_KW,
    LONG_KW,
    FLOAT_KW,
    DOUBLE_KW,
    IF_KW,
    ELSE_KW,
    WHILE_KW,
    FOR_KW,
    RETURN_KW,
    BREAK_KW,
    CONTINUE_KW,
    THROW_KW,
    TRY_KW,
    CATCH_KW,
    FINALLY_KW,
    NEW_KW,
    THIS_KW,
    SUPER_KW,
    INSTANCEOF_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,

    // =========================================================================
    // NODES - Compilation unit
    // =========================================================================
    SOURCE_FILE,
    PACKAGE_DECL,
    IMPORT_DECL,
    PATH,
    MODIFIERS,
    ANNOTATION,

    // Names
    NAME,     // a declared name
    NAME_REF, // a referenced name

    // Type declarations
    CLASS_DECL,
    INTERFACE_DECL,
    ENUM_DECL,
    TYPE_PARAMS,
    TYPE_PARAM,
    EXTENDS_CLAUSE,
    IMPLEMENTS_CLAUSE,
    CLASS_BODY,
    ENUM_BODY,
    ENUM_CONSTANT,

    // Members
    FIELD_DECL,
    VAR_DECLARATOR,
    DIMS,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    PARAM_LIST,
    PARAM,
    THROWS_CLAUSE,
    INITIALIZER,

    // Types
    PRIMITIVE_TYPE,
    VOID_TYPE,
    CLASS_TYPE,
    ARRAY_TYPE,
    WILDCARD_TYPE,
    TYPE_ARGS,

    // Statements
    BLOCK,
    LOCAL_VAR_DECL,
    EXPR_STMT,
    IF_STMT,
    WHILE_STMT,
    FOR_STMT,
    FOR_INIT,
    FOR_UPDATE,
    FOR_EACH_STMT,
    RETURN_STMT,
    THROW_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    TRY_STMT,
    CATCH_CLAUSE,
    FINALLY_CLAUSE,
    EMPTY_STMT,

    // Expressions
    LITERAL,
    NAME_EXPR,
    THIS_EXPR,
    SUPER_EXPR,
    PAREN_EXPR,
    FIELD_ACCESS_EXPR,
    METHOD_CALL_EXPR,
    CTOR_CALL_EXPR,
    ARG_LIST,
    NEW_EXPR,
    ARRAY_CREATION_EXPR,
    DIM_EXPR,
    ARRAY_INIT,
    ARRAY_ACCESS_EXPR,
    CAST_EXPR,
    INSTANCEOF_EXPR,
    UNARY_EXPR,
    POSTFIX_EXPR,
    BINARY_EXPR,
    CONDITIONAL_EXPR,
    ASSIGN_EXPR,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PACKAGE_KW as u16) && (self as u16) <= (Self::NULL_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::ARROW as u16)
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INT_NUMBER
                | Self::LONG_NUMBER
                | Self::FLOAT_NUMBER
                | Self::DOUBLE_NUMBER
                | Self::CHAR_LIT
                | Self::STRING_LIT
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// Check if this is a primitive type keyword
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            Self::BOOLEAN_KW
                | Self::BYTE_KW
                | Self::SHORT_KW
                | Self::CHAR_KW
                | Self::INT_KW
                | Self::LONG_KW
                | Self::FLOAT_KW
                | Self::DOUBLE_KW
        )
    }

    /// Check if this is a declaration modifier keyword
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW
                | Self::PROTECTED_KW
                | Self::PRIVATE_KW
                | Self::STATIC_KW
                | Self::FINAL_KW
                | Self::ABSTRACT_KW
                | Self::NATIVE_KW
                | Self::SYNCHRONIZED_KW
                | Self::TRANSIENT_KW
                | Self::VOLATILE_KW
                | Self::STRICTFP_KW
                | Self::DEFAULT_KW
        )
    }

    /// Check if this is an assignment operator token
    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            Self::EQ
                | Self::PLUS_EQ
                | Self::MINUS_EQ
                | Self::STAR_EQ
                | Self::SLASH_EQ
                | Self::PERCENT_EQ
                | Self::AMP_EQ
                | Self::PIPE_EQ
                | Self::CARET_EQ
                | Self::LT_LT_EQ
                | Self::GT_GT_EQ
                | Self::GT_GT_GT_EQ
        )
    }

    /// Check if this is a type declaration node
    pub fn is_type_decl(self) -> bool {
        matches!(self, Self::CLASS_DECL | Self::INTERFACE_DECL | Self::ENUM_DECL)
    }

    /// Check if this is a type node
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::PRIMITIVE_TYPE
                | Self::VOID_TYPE
                | Self::CLASS_TYPE
                | Self::ARRAY_TYPE
                | Self::WILDCARD_TYPE
        )
    }

    /// Check if this is an expression node
    pub fn is_expr(self) -> bool {
        matches!(
            self,
            Self::LITERAL
                | Self::NAME_EXPR
                | Self::THIS_EXPR
                | Self::SUPER_EXPR
                | Self::PAREN_EXPR
                | Self::FIELD_ACCESS_EXPR
                | Self::METHOD_CALL_EXPR
                | Self::CTOR_CALL_EXPR
                | Self::NEW_EXPR
                | Self::ARRAY_CREATION_EXPR
                | Self::ARRAY_ACCESS_EXPR
                | Self::CAST_EXPR
                | Self::INSTANCEOF_EXPR
                | Self::UNARY_EXPR
                | Self::POSTFIX_EXPR
                | Self::BINARY_EXPR
                | Self::CONDITIONAL_EXPR
                | Self::ASSIGN_EXPR
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JavaLanguage {}

impl rowan::Language for JavaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<JavaLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<JavaLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<JavaLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<JavaLanguage>;
