//! Logos-based lexer
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up
//! in exactly one token, trivia included, so the CST stays lossless.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*|0[xX][0-9a-fA-F_]+")]
    Int,

    #[regex(r"([0-9][0-9_]*|0[xX][0-9a-fA-F_]+)[lL]")]
    Long,

    #[regex(r"([0-9]+\.[0-9]*|\.[0-9]+|[0-9]+)([eE][+-]?[0-9]+)?[fF]")]
    Float,

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?[dD]?|\.[0-9]+([eE][+-]?[0-9]+)?[dD]?|[0-9]+[eE][+-]?[0-9]+[dD]?|[0-9]+[dD]")]
    Double,

    #[regex(r"'([^'\\\n]|\\[^\n])+'")]
    Char,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    Ellipsis,

    #[token("::")]
    ColonColon,

    #[token("->")]
    Arrow,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token("<<")]
    LtLt,

    #[token("<<=")]
    LtLtEq,

    #[token(">=")]
    GtEq,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token("%=")]
    PercentEq,

    #[token("&=")]
    AmpEq,

    #[token("|=")]
    PipeEq,

    #[token("^=")]
    CaretEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token("@")]
    At,

    #[token("?")]
    Question,

    #[token("=")]
    Eq,

    #[token("<")]
    Lt,

    // `>` is never merged into `>>` so nested type arguments close cleanly;
    // the parser joins adjacent `>` into shifts inside expressions
    #[token(">")]
    Gt,

    #[token("&")]
    Amp,

    #[token("|")]
    Pipe,

    #[token("^")]
    Caret,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("!")]
    Bang,

    #[token("~")]
    Tilde,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("package")]
    PackageKw,
    #[token("import")]
    ImportKw,
    #[token("class")]
    ClassKw,
    #[token("interface")]
    InterfaceKw,
    #[token("enum")]
    EnumKw,
    #[token("extends")]
    ExtendsKw,
    #[token("implements")]
    ImplementsKw,
    #[token("public")]
    PublicKw,
    #[token("protected")]
    ProtectedKw,
    #[token("private")]
    PrivateKw,
    #[token("static")]
    StaticKw,
    #[token("final")]
    FinalKw,
    #[token("abstract")]
    AbstractKw,
    #[token("native")]
    NativeKw,
    #[token("synchronized")]
    SynchronizedKw,
    #[token("transient")]
    TransientKw,
    #[token("volatile")]
    VolatileKw,
    #[token("strictfp")]
    StrictfpKw,
    #[token("default")]
    DefaultKw,
    #[token("throws")]
    ThrowsKw,
    #[token("void")]
    VoidKw,
    #[token("boolean")]
    BooleanKw,
    #[token("byte")]
    ByteKw,
    #[token("short")]
    ShortKw,
    #[token("char")]
    CharKw,
    #[token("int")]
    IntKw,
    #[token("long")]
    LongKw,
    #[token("float")]
    FloatKw,
    #[token("double")]
    DoubleKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("while")]
    WhileKw,
    #[token("for")]
    ForKw,
    #[token("return")]
    ReturnKw,
    #[token("break")]
    BreakKw,
    #[token("continue")]
    ContinueKw,
    #[token("throw")]
    ThrowKw,
    #[token("try")]
    TryKw,
    #[token("catch")]
    CatchKw,
    #[token("finally")]
    FinallyKw,
    #[token("new")]
    NewKw,
    #[token("this")]
    ThisKw,
    #[token("super")]
    SuperKw,
    #[token("instanceof")]
    InstanceofKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken as T;
        match token {
            T::Whitespace => SyntaxKind::WHITESPACE,
            T::LineComment => SyntaxKind::LINE_COMMENT,
            T::BlockComment => SyntaxKind::BLOCK_COMMENT,
            T::Ident => SyntaxKind::IDENT,
            T::Int => SyntaxKind::INT_NUMBER,
            T::Long => SyntaxKind::LONG_NUMBER,
            T::Float => SyntaxKind::FLOAT_NUMBER,
            T::Double => SyntaxKind::DOUBLE_NUMBER,
            T::Char => SyntaxKind::CHAR_LIT,
            T::String => SyntaxKind::STRING_LIT,
            T::Ellipsis => SyntaxKind::ELLIPSIS,
            T::ColonColon => SyntaxKind::COLON_COLON,
            T::Arrow => SyntaxKind::ARROW,
            T::EqEq => SyntaxKind::EQ_EQ,
            T::BangEq => SyntaxKind::BANG_EQ,
            T::LtEq => SyntaxKind::LT_EQ,
            T::LtLt => SyntaxKind::LT_LT,
            T::LtLtEq => SyntaxKind::LT_LT_EQ,
            T::GtEq => SyntaxKind::GT_EQ,
            T::AmpAmp => SyntaxKind::AMP_AMP,
            T::PipePipe => SyntaxKind::PIPE_PIPE,
            T::PlusPlus => SyntaxKind::PLUS_PLUS,
            T::MinusMinus => SyntaxKind::MINUS_MINUS,
            T::PlusEq => SyntaxKind::PLUS_EQ,
            T::MinusEq => SyntaxKind::MINUS_EQ,
            T::StarEq => SyntaxKind::STAR_EQ,
            T::SlashEq => SyntaxKind::SLASH_EQ,
            T::PercentEq => SyntaxKind::PERCENT_EQ,
            T::AmpEq => SyntaxKind::AMP_EQ,
            T::PipeEq => SyntaxKind::PIPE_EQ,
            T::CaretEq => SyntaxKind::CARET_EQ,
            T::LBrace => SyntaxKind::L_BRACE,
            T::RBrace => SyntaxKind::R_BRACE,
            T::LBracket => SyntaxKind::L_BRACKET,
            T::RBracket => SyntaxKind::R_BRACKET,
            T::LParen => SyntaxKind::L_PAREN,
            T::RParen => SyntaxKind::R_PAREN,
            T::Semicolon => SyntaxKind::SEMICOLON,
            T::Colon => SyntaxKind::COLON,
            T::Dot => SyntaxKind::DOT,
            T::Comma => SyntaxKind::COMMA,
            T::At => SyntaxKind::AT,
            T::Question => SyntaxKind::QUESTION,
            T::Eq => SyntaxKind::EQ,
            T::Lt => SyntaxKind::LT,
            T::Gt => SyntaxKind::GT,
            T::Amp => SyntaxKind::AMP,
            T::Pipe => SyntaxKind::PIPE,
            T::Caret => SyntaxKind::CARET,
            T::Plus => SyntaxKind::PLUS,
            T::Minus => SyntaxKind::MINUS,
            T::Star => SyntaxKind::STAR,
            T::Slash => SyntaxKind::SLASH,
            T::Percent => SyntaxKind::PERCENT,
            T::Bang => SyntaxKind::BANG,
            T::Tilde => SyntaxKind::TILDE,
            T::PackageKw => SyntaxKind::PACKAGE_KW,
            T::ImportKw => SyntaxKind::IMPORT_KW,
            T::ClassKw => SyntaxKind::CLASS_KW,
            T::InterfaceKw => SyntaxKind::INTERFACE_KW,
            T::EnumKw => SyntaxKind::ENUM_KW,
            T::ExtendsKw => SyntaxKind::EXTENDS_KW,
            T::ImplementsKw => SyntaxKind::IMPLEMENTS_KW,
            T::PublicKw => SyntaxKind::PUBLIC_KW,
            T::ProtectedKw => SyntaxKind::PROTECTED_KW,
            T::PrivateKw => SyntaxKind::PRIVATE_KW,
            T::StaticKw => SyntaxKind::STATIC_KW,
            T::FinalKw => SyntaxKind::FINAL_KW,
            T::AbstractKw => SyntaxKind::ABSTRACT_KW,
            T::NativeKw => SyntaxKind::NATIVE_KW,
            T::SynchronizedKw => SyntaxKind::SYNCHRONIZED_KW,
            T::TransientKw => SyntaxKind::TRANSIENT_KW,
            T::VolatileKw => SyntaxKind::VOLATILE_KW,
            T::StrictfpKw => SyntaxKind::STRICTFP_KW,
            T::DefaultKw => SyntaxKind::DEFAULT_KW,
            T::ThrowsKw => SyntaxKind::THROWS_KW,
            T::VoidKw => SyntaxKind::VOID_KW,
            T::BooleanKw => SyntaxKind::BOOLEAN_KW,
            T::ByteKw => SyntaxKind::BYTE_KW,
            T::ShortKw => SyntaxKind::SHORT_KW,
            T::CharKw => SyntaxKind::CHAR_KW,
            T::IntKw => SyntaxKind::INT_KW,
            T::LongKw => SyntaxKind::LONG_KW,
            T::FloatKw => SyntaxKind::FLOAT_KW,
            T::DoubleKw => SyntaxKind::DOUBLE_KW,
            T::IfKw => SyntaxKind::IF_KW,
            T::ElseKw => SyntaxKind::ELSE_KW,
            T::WhileKw => SyntaxKind::WHILE_KW,
            T::ForKw => SyntaxKind::FOR_KW,
            T::ReturnKw => SyntaxKind::RETURN_KW,
            T::BreakKw => SyntaxKind::BREAK_KW,
            T::ContinueKw => SyntaxKind::CONTINUE_KW,
            T::ThrowKw => SyntaxKind::THROW_KW,
            T::TryKw => SyntaxKind::TRY_KW,
            T::CatchKw => SyntaxKind::CATCH_KW,
            T::FinallyKw => SyntaxKind::FINALLY_KW,
            T::NewKw => SyntaxKind::NEW_KW,
            T::ThisKw => SyntaxKind::THIS_KW,
            T::SuperKw => SyntaxKind::SUPER_KW,
            T::InstanceofKw => SyntaxKind::INSTANCEOF_KW,
            T::TrueKw => SyntaxKind::TRUE_KW,
            T::FalseKw => SyntaxKind::FALSE_KW,
            T::NullKw => SyntaxKind::NULL_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_keywords_and_idents() {
        assert_eq!(
            kinds("class Foo extends Bar"),
            vec![
                SyntaxKind::CLASS_KW,
                SyntaxKind::IDENT,
                SyntaxKind::EXTENDS_KW,
                SyntaxKind::IDENT
            ]
        );
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(
            kinds("1 2L 3.0 4f 5e2 0xFF"),
            vec![
                SyntaxKind::INT_NUMBER,
                SyntaxKind::LONG_NUMBER,
                SyntaxKind::DOUBLE_NUMBER,
                SyntaxKind::FLOAT_NUMBER,
                SyntaxKind::DOUBLE_NUMBER,
                SyntaxKind::INT_NUMBER
            ]
        );
    }

    #[test]
    fn test_nested_generics_close_separately() {
        assert_eq!(
            kinds("List<List<String>>"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::LT,
                SyntaxKind::IDENT,
                SyntaxKind::LT,
                SyntaxKind::IDENT,
                SyntaxKind::GT,
                SyntaxKind::GT
            ]
        );
    }

    #[test]
    fn test_lexer_is_lossless() {
        let input = "int x = 1; // trailing\n/* block */ String s = \"a\\\"b\";";
        let rebuilt: String = tokenize(input).iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn test_offsets_are_monotonic() {
        let tokens = tokenize("a  b");
        assert_eq!(tokens[0].offset, TextSize::new(0));
        assert_eq!(tokens[2].offset, TextSize::new(3));
    }
}
