//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for the syntax nodes the
//! resolver cares about. Each struct wraps a SyntaxNode and provides methods
//! to access children. Accessors return `Option` because the tree may contain
//! error nodes in place of missing pieces.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use smol_str::SmolStr;

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros and functions
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + use<> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    tokens(node).any(|t| t.kind() == kind)
}

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    tokens(node).find(|t| t.kind() == kind)
}

fn nth_child<N: AstNode>(node: &SyntaxNode, n: usize) -> Option<N> {
    node.children().filter_map(N::cast).nth(n)
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn package_decl(&self) -> Option<PackageDecl> {
        self.0.children().find_map(PackageDecl::cast)
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportDecl> + use<> {
        self.0.children().filter_map(ImportDecl::cast)
    }

    pub fn type_decls(&self) -> impl Iterator<Item = TypeDecl> + use<> {
        self.0.children().filter_map(TypeDecl::cast)
    }
}

ast_node!(PackageDecl, PACKAGE_DECL);

impl PackageDecl {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }
}

ast_node!(ImportDecl, IMPORT_DECL);

impl ImportDecl {
    pub fn is_static(&self) -> bool {
        has_token(&self.0, SyntaxKind::STATIC_KW)
    }

    /// Check if this is an on-demand import (`.*`)
    pub fn is_on_demand(&self) -> bool {
        self.path().is_some_and(|p| p.has_star())
    }

    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }
}

ast_node!(Path, PATH);

impl Path {
    /// Identifier segments, excluding a trailing `*`
    pub fn segments(&self) -> Vec<SmolStr> {
        tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| SmolStr::new(t.text()))
            .collect()
    }

    pub fn has_star(&self) -> bool {
        has_token(&self.0, SyntaxKind::STAR)
    }

    /// Dotted form of the identifier segments
    pub fn qualified(&self) -> String {
        self.segments().join(".")
    }
}

// ============================================================================
// Names and modifiers
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::IDENT)
    }

    pub fn text(&self) -> Option<SmolStr> {
        self.ident().map(|t| SmolStr::new(t.text()))
    }
}

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn ident(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::IDENT)
    }

    pub fn text(&self) -> Option<SmolStr> {
        self.ident().map(|t| SmolStr::new(t.text()))
    }
}

ast_node!(Modifiers, MODIFIERS);

impl Modifiers {
    pub fn has(&self, kind: SyntaxKind) -> bool {
        has_token(&self.0, kind)
    }

    pub fn is_static(&self) -> bool {
        self.has(SyntaxKind::STATIC_KW)
    }

    pub fn is_abstract(&self) -> bool {
        self.has(SyntaxKind::ABSTRACT_KW)
    }

    pub fn is_final(&self) -> bool {
        self.has(SyntaxKind::FINAL_KW)
    }

    pub fn is_private(&self) -> bool {
        self.has(SyntaxKind::PRIVATE_KW)
    }

    pub fn annotations(&self) -> impl Iterator<Item = Annotation> + use<> {
        self.0.children().filter_map(Annotation::cast)
    }
}

ast_node!(Annotation, ANNOTATION);

impl Annotation {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }
}

fn modifiers_of(node: &SyntaxNode) -> Option<Modifiers> {
    node.children().find_map(Modifiers::cast)
}

fn name_text_of(node: &SyntaxNode) -> Option<SmolStr> {
    node.children().find_map(Name::cast).and_then(|n| n.text())
}

// ============================================================================
// Type declarations
// ============================================================================

/// A class, interface or enum declaration, or a `new` expression carrying
/// an anonymous class body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDecl(SyntaxNode);

impl AstNode for TypeDecl {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_type_decl()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self(node))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl TypeDecl {
    /// View an anonymous class as a declaration with no name, header or
    /// type parameters.
    pub fn anonymous(new: &NewExpr) -> Option<Self> {
        new.anonymous_body()?;
        Some(Self(new.syntax().clone()))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    pub fn is_interface(&self) -> bool {
        self.kind() == SyntaxKind::INTERFACE_DECL
    }

    pub fn is_enum(&self) -> bool {
        self.kind() == SyntaxKind::ENUM_DECL
    }

    pub fn name(&self) -> Option<SmolStr> {
        name_text_of(&self.0)
    }

    pub fn modifiers(&self) -> Option<Modifiers> {
        modifiers_of(&self.0)
    }

    pub fn type_params(&self) -> Vec<TypeParam> {
        self.0
            .children()
            .find_map(TypeParams::cast)
            .map(|tp| tp.params().collect())
            .unwrap_or_default()
    }

    /// Types listed after `extends`
    pub fn extends_types(&self) -> Vec<Type> {
        self.clause_types(SyntaxKind::EXTENDS_CLAUSE)
    }

    /// Types listed after `implements`
    pub fn implements_types(&self) -> Vec<Type> {
        self.clause_types(SyntaxKind::IMPLEMENTS_CLAUSE)
    }

    fn clause_types(&self, kind: SyntaxKind) -> Vec<Type> {
        self.0
            .children()
            .find(|c| c.kind() == kind)
            .map(|clause| clause.children().filter_map(Type::cast).collect())
            .unwrap_or_default()
    }

    /// The `CLASS_BODY` or `ENUM_BODY` node
    pub fn body(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|c| matches!(c.kind(), SyntaxKind::CLASS_BODY | SyntaxKind::ENUM_BODY))
    }

    pub fn members(&self) -> Vec<Member> {
        self.body()
            .map(|body| body.children().filter_map(Member::cast).collect())
            .unwrap_or_default()
    }

    pub fn enum_constants(&self) -> Vec<EnumConstant> {
        self.body()
            .map(|body| body.children().filter_map(EnumConstant::cast).collect())
            .unwrap_or_default()
    }
}

ast_node!(TypeParams, TYPE_PARAMS);

impl TypeParams {
    pub fn params(&self) -> impl Iterator<Item = TypeParam> + use<> {
        self.0.children().filter_map(TypeParam::cast)
    }
}

ast_node!(TypeParam, TYPE_PARAM);

impl TypeParam {
    pub fn name(&self) -> Option<SmolStr> {
        name_text_of(&self.0)
    }

    /// Bounds after `extends`, joined by `&`
    pub fn bounds(&self) -> Vec<Type> {
        self.0.children().filter_map(Type::cast).collect()
    }
}

fn type_params_of(node: &SyntaxNode) -> Vec<TypeParam> {
    node.children()
        .find_map(TypeParams::cast)
        .map(|tp| tp.params().collect())
        .unwrap_or_default()
}

ast_node!(EnumConstant, ENUM_CONSTANT);

impl EnumConstant {
    pub fn name(&self) -> Option<SmolStr> {
        name_text_of(&self.0)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }
}

// ============================================================================
// Members
// ============================================================================

/// Any member of a class body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Type(TypeDecl),
    Initializer(Initializer),
}

impl AstNode for Member {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_type_decl()
            || matches!(
                kind,
                SyntaxKind::FIELD_DECL
                    | SyntaxKind::METHOD_DECL
                    | SyntaxKind::CONSTRUCTOR_DECL
                    | SyntaxKind::INITIALIZER
            )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::FIELD_DECL => Some(Self::Field(FieldDecl(node))),
            SyntaxKind::METHOD_DECL => Some(Self::Method(MethodDecl(node))),
            SyntaxKind::CONSTRUCTOR_DECL => Some(Self::Constructor(ConstructorDecl(node))),
            SyntaxKind::INITIALIZER => Some(Self::Initializer(Initializer(node))),
            kind if kind.is_type_decl() => Some(Self::Type(TypeDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Field(n) => n.syntax(),
            Self::Method(n) => n.syntax(),
            Self::Constructor(n) => n.syntax(),
            Self::Type(n) => n.syntax(),
            Self::Initializer(n) => n.syntax(),
        }
    }
}

ast_node!(FieldDecl, FIELD_DECL);

impl FieldDecl {
    pub fn modifiers(&self) -> Option<Modifiers> {
        modifiers_of(&self.0)
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VarDeclarator> + use<> {
        self.0.children().filter_map(VarDeclarator::cast)
    }
}

ast_node!(VarDeclarator, VAR_DECLARATOR);

impl VarDeclarator {
    pub fn name(&self) -> Option<SmolStr> {
        name_text_of(&self.0)
    }

    /// Extra `[]` pairs after the name (`int a[]`)
    pub fn extra_dims(&self) -> usize {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::DIMS)
            .map(|d| tokens(&d).filter(|t| t.kind() == SyntaxKind::L_BRACKET).count())
            .unwrap_or(0)
    }

    pub fn initializer(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn array_init(&self) -> Option<ArrayInit> {
        self.0.children().find_map(ArrayInit::cast)
    }
}

ast_node!(MethodDecl, METHOD_DECL);

impl MethodDecl {
    pub fn modifiers(&self) -> Option<Modifiers> {
        modifiers_of(&self.0)
    }

    pub fn type_params(&self) -> Vec<TypeParam> {
        type_params_of(&self.0)
    }

    pub fn return_type(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn name(&self) -> Option<SmolStr> {
        name_text_of(&self.0)
    }

    pub fn params(&self) -> Vec<Param> {
        params_of(&self.0)
    }

    pub fn throws_types(&self) -> Vec<Type> {
        throws_of(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

ast_node!(ConstructorDecl, CONSTRUCTOR_DECL);

impl ConstructorDecl {
    pub fn modifiers(&self) -> Option<Modifiers> {
        modifiers_of(&self.0)
    }

    pub fn type_params(&self) -> Vec<TypeParam> {
        type_params_of(&self.0)
    }

    pub fn name(&self) -> Option<SmolStr> {
        name_text_of(&self.0)
    }

    pub fn params(&self) -> Vec<Param> {
        params_of(&self.0)
    }

    pub fn throws_types(&self) -> Vec<Type> {
        throws_of(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

/// Types listed after `throws`
fn throws_of(node: &SyntaxNode) -> Vec<Type> {
    node.children()
        .find(|c| c.kind() == SyntaxKind::THROWS_CLAUSE)
        .map(|clause| clause.children().filter_map(Type::cast).collect())
        .unwrap_or_default()
}

fn params_of(node: &SyntaxNode) -> Vec<Param> {
    node.children()
        .find(|c| c.kind() == SyntaxKind::PARAM_LIST)
        .map(|list| list.children().filter_map(Param::cast).collect())
        .unwrap_or_default()
}

ast_node!(Initializer, INITIALIZER);

impl Initializer {
    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

ast_node!(Param, PARAM);

impl Param {
    pub fn modifiers(&self) -> Option<Modifiers> {
        modifiers_of(&self.0)
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn is_varargs(&self) -> bool {
        has_token(&self.0, SyntaxKind::ELLIPSIS)
    }

    pub fn name(&self) -> Option<SmolStr> {
        name_text_of(&self.0)
    }

    pub fn extra_dims(&self) -> usize {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::DIMS)
            .map(|d| tokens(&d).filter(|t| t.kind() == SyntaxKind::L_BRACKET).count())
            .unwrap_or(0)
    }
}

// ============================================================================
// Types
// ============================================================================

/// A type reference as written in source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(PrimitiveType),
    Void(VoidType),
    Class(ClassType),
    Array(ArrayType),
    Wildcard(WildcardType),
}

impl AstNode for Type {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_type()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PRIMITIVE_TYPE => Some(Self::Primitive(PrimitiveType(node))),
            SyntaxKind::VOID_TYPE => Some(Self::Void(VoidType(node))),
            SyntaxKind::CLASS_TYPE => Some(Self::Class(ClassType(node))),
            SyntaxKind::ARRAY_TYPE => Some(Self::Array(ArrayType(node))),
            SyntaxKind::WILDCARD_TYPE => Some(Self::Wildcard(WildcardType(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Primitive(n) => n.syntax(),
            Self::Void(n) => n.syntax(),
            Self::Class(n) => n.syntax(),
            Self::Array(n) => n.syntax(),
            Self::Wildcard(n) => n.syntax(),
        }
    }
}

ast_node!(PrimitiveType, PRIMITIVE_TYPE);

impl PrimitiveType {
    /// The primitive keyword token kind
    pub fn keyword(&self) -> Option<SyntaxKind> {
        tokens(&self.0).map(|t| t.kind()).find(|k| k.is_primitive_type())
    }
}

ast_node!(VoidType, VOID_TYPE);

ast_node!(ClassType, CLASS_TYPE);

impl ClassType {
    /// The qualifying type on the left of the last dot, if any
    pub fn scope(&self) -> Option<ClassType> {
        self.0.children().find_map(ClassType::cast)
    }

    pub fn name_ref(&self) -> Option<NameRef> {
        self.0.children().find_map(NameRef::cast)
    }

    pub fn name(&self) -> Option<SmolStr> {
        self.name_ref().and_then(|n| n.text())
    }

    pub fn type_args(&self) -> Option<TypeArgs> {
        self.0.children().find_map(TypeArgs::cast)
    }

    /// Segment names from the outermost scope inward
    pub fn segments(&self) -> Vec<SmolStr> {
        let mut segments = self.scope().map(|s| s.segments()).unwrap_or_default();
        if let Some(name) = self.name() {
            segments.push(name);
        }
        segments
    }
}

ast_node!(ArrayType, ARRAY_TYPE);

impl ArrayType {
    pub fn component(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

ast_node!(WildcardType, WILDCARD_TYPE);

impl WildcardType {
    pub fn is_extends(&self) -> bool {
        has_token(&self.0, SyntaxKind::EXTENDS_KW)
    }

    pub fn is_super(&self) -> bool {
        has_token(&self.0, SyntaxKind::SUPER_KW)
    }

    pub fn bound(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

ast_node!(TypeArgs, TYPE_ARGS);

impl TypeArgs {
    pub fn types(&self) -> Vec<Type> {
        self.0.children().filter_map(Type::cast).collect()
    }
}

// ============================================================================
// Statements
// ============================================================================

ast_node!(Block, BLOCK);

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.children()
    }
}

ast_node!(LocalVarDecl, LOCAL_VAR_DECL);

impl LocalVarDecl {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VarDeclarator> + use<> {
        self.0.children().filter_map(VarDeclarator::cast)
    }
}

ast_node!(ForStmt, FOR_STMT);

impl ForStmt {
    /// Variables declared in the init section
    pub fn init_declarators(&self) -> Vec<VarDeclarator> {
        self.0
            .children()
            .find(|c| c.kind() == SyntaxKind::FOR_INIT)
            .and_then(|init| init.children().find_map(LocalVarDecl::cast))
            .map(|decl| decl.declarators().collect())
            .unwrap_or_default()
    }
}

ast_node!(ForEachStmt, FOR_EACH_STMT);

impl ForEachStmt {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn declarator(&self) -> Option<VarDeclarator> {
        self.0.children().find_map(VarDeclarator::cast)
    }

    pub fn iterable(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(CatchClause, CATCH_CLAUSE);

impl CatchClause {
    pub fn param(&self) -> Option<Param> {
        self.0.children().find_map(Param::cast)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Any expression node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expr(SyntaxNode);

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_expr()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self(node))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl Expr {
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }
}

ast_node!(Literal, LITERAL);

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next()
    }
}

ast_node!(NameExpr, NAME_EXPR);

impl NameExpr {
    pub fn name(&self) -> Option<SmolStr> {
        self.0.children().find_map(NameRef::cast).and_then(|n| n.text())
    }
}

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(FieldAccessExpr, FIELD_ACCESS_EXPR);

impl FieldAccessExpr {
    pub fn receiver(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn name(&self) -> Option<SmolStr> {
        self.0.children().find_map(NameRef::cast).and_then(|n| n.text())
    }
}

ast_node!(MethodCallExpr, METHOD_CALL_EXPR);

impl MethodCallExpr {
    /// The expression before the dot, absent for unqualified calls
    pub fn receiver(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn name(&self) -> Option<SmolStr> {
        self.0.children().find_map(NameRef::cast).and_then(|n| n.text())
    }

    pub fn args(&self) -> Vec<Expr> {
        args_of(&self.0)
    }
}

ast_node!(CtorCallExpr, CTOR_CALL_EXPR);

impl CtorCallExpr {
    /// `super(...)` rather than `this(...)`
    pub fn is_super(&self) -> bool {
        has_token(&self.0, SyntaxKind::SUPER_KW)
    }

    pub fn args(&self) -> Vec<Expr> {
        args_of(&self.0)
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    pub fn args(&self) -> Vec<Expr> {
        self.0.children().filter_map(Expr::cast).collect()
    }
}

fn args_of(node: &SyntaxNode) -> Vec<Expr> {
    node.children()
        .find_map(ArgList::cast)
        .map(|list| list.args())
        .unwrap_or_default()
}

ast_node!(NewExpr, NEW_EXPR);

impl NewExpr {
    pub fn class_type(&self) -> Option<ClassType> {
        self.0.children().find_map(ClassType::cast)
    }

    pub fn args(&self) -> Vec<Expr> {
        args_of(&self.0)
    }

    /// Body of an anonymous class
    pub fn anonymous_body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind() == SyntaxKind::CLASS_BODY)
    }
}

ast_node!(ArrayCreationExpr, ARRAY_CREATION_EXPR);

impl ArrayCreationExpr {
    pub fn element_type(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn dimensions(&self) -> usize {
        self.0
            .children()
            .filter(|c| c.kind() == SyntaxKind::DIM_EXPR)
            .count()
    }
}

ast_node!(ArrayInit, ARRAY_INIT);

ast_node!(ArrayAccessExpr, ARRAY_ACCESS_EXPR);

impl ArrayAccessExpr {
    pub fn array(&self) -> Option<Expr> {
        nth_child(&self.0, 0)
    }

    pub fn index(&self) -> Option<Expr> {
        nth_child(&self.0, 1)
    }
}

ast_node!(CastExpr, CAST_EXPR);

impl CastExpr {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(InstanceofExpr, INSTANCEOF_EXPR);

impl InstanceofExpr {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

/// Operator token of a unary, binary, postfix or assignment expression
fn operator_of(node: &SyntaxNode) -> Option<SyntaxKind> {
    tokens(node).map(|t| t.kind()).next()
}

ast_node!(UnaryExpr, UNARY_EXPR);

impl UnaryExpr {
    pub fn op(&self) -> Option<SyntaxKind> {
        operator_of(&self.0)
    }

    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(PostfixExpr, POSTFIX_EXPR);

impl PostfixExpr {
    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(BinaryExpr, BINARY_EXPR);

impl BinaryExpr {
    pub fn op(&self) -> Option<SyntaxKind> {
        operator_of(&self.0)
    }

    pub fn lhs(&self) -> Option<Expr> {
        nth_child(&self.0, 0)
    }

    pub fn rhs(&self) -> Option<Expr> {
        nth_child(&self.0, 1)
    }
}

ast_node!(ConditionalExpr, CONDITIONAL_EXPR);

impl ConditionalExpr {
    pub fn condition(&self) -> Option<Expr> {
        nth_child(&self.0, 0)
    }

    pub fn then_branch(&self) -> Option<Expr> {
        nth_child(&self.0, 1)
    }

    pub fn else_branch(&self) -> Option<Expr> {
        nth_child(&self.0, 2)
    }
}

ast_node!(AssignExpr, ASSIGN_EXPR);

impl AssignExpr {
    pub fn target(&self) -> Option<Expr> {
        nth_child(&self.0, 0)
    }

    pub fn value(&self) -> Option<Expr> {
        nth_child(&self.0, 1)
    }
}
