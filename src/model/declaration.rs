//! Declarations: everything a name can refer to.
//!
//! Each declaration wraps a [`NodeHandle`] into its source unit and answers
//! the structural queries that need no symbol lookup. Queries that need
//! lookups (ancestors, inherited members, declared types) live in
//! [`crate::resolve`] and take a `&dyn TypeSolver`.

use crate::base::{Name, join_qualified};
use crate::error::{ResolveError, ResolveResult};
use crate::parser::ast::{self, Member};
use crate::parser::{AstNode, SyntaxKind, SyntaxNode};
use crate::syntax::{NodeHandle, SourceUnit};

/// Nearest type enclosing `node` (excluding `node` itself): a type
/// declaration, or a `new` expression whose anonymous body holds `node`.
pub(crate) fn enclosing_type_node(node: &SyntaxNode) -> Option<SyntaxNode> {
    let mut child = node.clone();
    for ancestor in node.ancestors().skip(1) {
        if ancestor.kind().is_type_decl()
            || (ancestor.kind() == SyntaxKind::NEW_EXPR && child.kind() == SyntaxKind::CLASS_BODY)
        {
            return Some(ancestor);
        }
        child = ancestor;
    }
    None
}

fn is_anonymous_class(node: &SyntaxNode) -> bool {
    ast::NewExpr::cast(node.clone()).is_some_and(|new| new.anonymous_body().is_some())
}

/// Anonymous classes are numbered per enclosing type, in source order:
/// the first one in `app.Outer` is `app.Outer$1`.
fn type_qualified_name(node: &SyntaxNode, unit: &SourceUnit) -> Option<String> {
    let outer = enclosing_type_node(node);
    if is_anonymous_class(node) {
        let outer = outer?;
        let index = outer
            .descendants()
            .filter(|n| is_anonymous_class(n) && enclosing_type_node(n).as_ref() == Some(&outer))
            .position(|n| &n == node)?;
        return Some(format!("{}${}", type_qualified_name(&outer, unit)?, index + 1));
    }
    let name = ast::TypeDecl::cast(node.clone())?.name()?;
    let prefix = match outer {
        Some(outer) => type_qualified_name(&outer, unit)?,
        None => unit.package_name().unwrap_or_default(),
    };
    Some(join_qualified(&prefix, &name))
}

fn missing_name(node: &SyntaxNode) -> ResolveError {
    ResolveError::unexpected_node("a named declaration", node.kind())
}

fn modifiers_have(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children()
        .find_map(ast::Modifiers::cast)
        .is_some_and(|m| m.has(kind))
}

// ============================================================================
// TYPE DECLARATIONS
// ============================================================================

/// What sort of type a [`TypeDecl`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    /// A type parameter seen as a type
    TypeVariable,
    /// A class body given inline in a `new` expression
    Anonymous,
}

/// A class, interface, enum or type variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDecl {
    handle: NodeHandle,
    name: Name,
    qualified_name: Name,
    kind: TypeKind,
}

impl TypeDecl {
    /// Wrap a `CLASS_DECL`, `INTERFACE_DECL`, `ENUM_DECL` or `TYPE_PARAM`
    /// node, or a `NEW_EXPR` with an anonymous class body.
    pub fn from_handle(handle: NodeHandle) -> ResolveResult<Self> {
        let node = handle.node()?;
        let kind = match node.kind() {
            SyntaxKind::CLASS_DECL => TypeKind::Class,
            SyntaxKind::INTERFACE_DECL => TypeKind::Interface,
            SyntaxKind::ENUM_DECL => TypeKind::Enum,
            SyntaxKind::NEW_EXPR if is_anonymous_class(&node) => TypeKind::Anonymous,
            SyntaxKind::TYPE_PARAM => {
                return TypeParameterDecl::from_handle(handle).map(|tp| tp.as_type_decl());
            }
            other => return Err(ResolveError::unexpected_node("type declaration", other)),
        };
        let qualified_name =
            type_qualified_name(&node, handle.unit()).ok_or_else(|| missing_name(&node))?;
        let name = if kind == TypeKind::Anonymous {
            Name::new(qualified_name.rsplit('.').next().unwrap_or_default())
        } else {
            ast::TypeDecl::cast(node.clone())
                .and_then(|d| d.name())
                .ok_or_else(|| missing_name(&node))?
        };
        Ok(Self {
            handle,
            name,
            qualified_name: Name::new(qualified_name),
            kind,
        })
    }

    /// The type whose body contains `node`.
    pub fn enclosing(handle: &NodeHandle, node: &SyntaxNode) -> ResolveResult<Self> {
        let outer = enclosing_type_node(node)
            .ok_or_else(|| ResolveError::unexpected_node("member of a type", node.kind()))?;
        Self::from_handle(handle.sibling(&outer))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_type_variable(&self) -> bool {
        self.kind == TypeKind::TypeVariable
    }

    pub fn is_anonymous(&self) -> bool {
        self.kind == TypeKind::Anonymous
    }

    /// Package of the declaring unit; empty for the default package.
    pub fn package_name(&self) -> String {
        self.handle.unit().package_name().unwrap_or_default()
    }

    /// The type parameter this type variable stands for.
    pub fn as_type_parameter(&self) -> Option<TypeParameterDecl> {
        if !self.is_type_variable() {
            return None;
        }
        Some(TypeParameterDecl {
            handle: self.handle.clone(),
            name: self.name.clone(),
            qualified_name: self.qualified_name.clone(),
        })
    }

    /// Typed view of the declaration node. Undefined for type variables.
    pub fn ast(&self, query: &'static str) -> ResolveResult<ast::TypeDecl> {
        if self.is_type_variable() {
            return Err(ResolveError::malformed(query, "type variable"));
        }
        let node = self.handle.node()?;
        let kind = node.kind();
        let decl = if self.is_anonymous() {
            ast::NewExpr::cast(node).and_then(|new| ast::TypeDecl::anonymous(&new))
        } else {
            ast::TypeDecl::cast(node)
        };
        decl.ok_or(ResolveError::unexpected_node("type declaration", kind))
    }

    pub fn is_static(&self) -> ResolveResult<bool> {
        if self.is_type_variable() {
            return Ok(false);
        }
        let node = self.handle.node()?;
        Ok(modifiers_have(&node, SyntaxKind::STATIC_KW) || self.is_interface() || self.is_enum())
    }

    pub fn is_abstract(&self) -> ResolveResult<bool> {
        if self.is_type_variable() {
            return Ok(false);
        }
        let node = self.handle.node()?;
        Ok(self.is_interface() || modifiers_have(&node, SyntaxKind::ABSTRACT_KW))
    }

    /// Type parameters declared on this type, in order.
    pub fn type_parameters(&self) -> ResolveResult<Vec<TypeParameterDecl>> {
        if self.is_type_variable() {
            return Ok(Vec::new());
        }
        self.ast("type_parameters")?
            .type_params()
            .into_iter()
            .map(|tp| TypeParameterDecl::from_handle(self.handle.sibling(tp.syntax())))
            .collect()
    }

    /// Fields declared directly in this type, enum constants first.
    pub fn declared_fields(&self) -> ResolveResult<Vec<FieldDecl>> {
        if self.is_type_variable() {
            return Ok(Vec::new());
        }
        let decl = self.ast("declared_fields")?;
        let mut fields = Vec::new();
        for constant in decl.enum_constants() {
            let name = constant.name().ok_or_else(|| missing_name(constant.syntax()))?;
            fields.push(FieldDecl {
                handle: self.handle.sibling(constant.syntax()),
                name,
                declaring_type: self.clone(),
            });
        }
        for member in decl.members() {
            if let Member::Field(field) = member {
                for declarator in field.declarators() {
                    let Some(name) = declarator.name() else {
                        continue;
                    };
                    fields.push(FieldDecl {
                        handle: self.handle.sibling(declarator.syntax()),
                        name,
                        declaring_type: self.clone(),
                    });
                }
            }
        }
        Ok(fields)
    }

    /// Field declared directly in this type.
    pub fn declared_field(&self, name: &str) -> ResolveResult<Option<FieldDecl>> {
        Ok(self
            .declared_fields()?
            .into_iter()
            .find(|f| f.name() == name))
    }

    /// Methods declared directly in this type.
    pub fn declared_methods(&self) -> ResolveResult<Vec<MethodDecl>> {
        if self.is_type_variable() {
            return Ok(Vec::new());
        }
        let mut methods = Vec::new();
        for member in self.ast("declared_methods")?.members() {
            if let Member::Method(method) = member {
                let Some(name) = method.name() else {
                    continue;
                };
                methods.push(MethodDecl {
                    handle: self.handle.sibling(method.syntax()),
                    name,
                    declaring_type: self.clone(),
                });
            }
        }
        Ok(methods)
    }

    /// Declared constructors, or the implicit no-argument one for classes
    /// and enums that declare none.
    pub fn constructors(&self) -> ResolveResult<Vec<ConstructorDecl>> {
        if self.is_type_variable() || self.is_interface() {
            return Ok(Vec::new());
        }
        let constructors: Vec<_> = self
            .ast("constructors")?
            .members()
            .into_iter()
            .filter_map(|member| match member {
                Member::Constructor(ctor) => Some(ConstructorDecl {
                    handle: Some(self.handle.sibling(ctor.syntax())),
                    declaring_type: self.clone(),
                }),
                _ => None,
            })
            .collect();
        if constructors.is_empty() {
            return Ok(vec![ConstructorDecl {
                handle: None,
                declaring_type: self.clone(),
            }]);
        }
        Ok(constructors)
    }

    /// Member types declared directly in this type.
    pub fn member_types(&self) -> ResolveResult<Vec<TypeDecl>> {
        if self.is_type_variable() {
            return Ok(Vec::new());
        }
        self.ast("member_types")?
            .members()
            .into_iter()
            .filter_map(|member| match member {
                Member::Type(inner) => Some(TypeDecl::from_handle(self.handle.sibling(inner.syntax()))),
                _ => None,
            })
            .collect()
    }

    pub fn member_type(&self, name: &str) -> ResolveResult<Option<TypeDecl>> {
        Ok(self.member_types()?.into_iter().find(|t| t.name() == name))
    }

    /// The type this one is nested in, if any.
    pub fn enclosing_type(&self) -> ResolveResult<Option<TypeDecl>> {
        let node = self.handle.node()?;
        let owner = if self.is_type_variable() {
            node.ancestors().skip(1).find(|n| n.kind().is_type_decl())
        } else {
            enclosing_type_node(&node)
        };
        owner
            .map(|n| TypeDecl::from_handle(self.handle.sibling(&n)))
            .transpose()
    }
}

// ============================================================================
// MEMBERS
// ============================================================================

/// A field or enum constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDecl {
    handle: NodeHandle,
    name: Name,
    declaring_type: TypeDecl,
}

impl FieldDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    pub fn declaring_type(&self) -> &TypeDecl {
        &self.declaring_type
    }

    pub fn qualified_name(&self) -> String {
        join_qualified(self.declaring_type.qualified_name(), &self.name)
    }

    pub fn is_enum_constant(&self) -> bool {
        self.handle.kind() == SyntaxKind::ENUM_CONSTANT
    }

    pub fn is_static(&self) -> ResolveResult<bool> {
        if self.is_enum_constant() || self.declaring_type.is_interface() {
            return Ok(true);
        }
        let node = self.handle.node()?;
        Ok(node
            .parent()
            .is_some_and(|field| modifiers_have(&field, SyntaxKind::STATIC_KW)))
    }

    /// Declared type as written, `None` for enum constants.
    pub fn type_node(&self) -> ResolveResult<Option<ast::Type>> {
        if self.is_enum_constant() {
            return Ok(None);
        }
        let node = self.handle.node()?;
        Ok(node
            .parent()
            .and_then(ast::FieldDecl::cast)
            .and_then(|f| f.ty()))
    }

    /// `[]` pairs written after the field name.
    pub fn extra_dims(&self) -> ResolveResult<usize> {
        let node = self.handle.node()?;
        Ok(ast::VarDeclarator::cast(node).map_or(0, |d| d.extra_dims()))
    }
}

/// A method declared in a type body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDecl {
    handle: NodeHandle,
    name: Name,
    declaring_type: TypeDecl,
}

impl MethodDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    pub fn declaring_type(&self) -> &TypeDecl {
        &self.declaring_type
    }

    pub fn qualified_name(&self) -> String {
        join_qualified(self.declaring_type.qualified_name(), &self.name)
    }

    fn ast(&self) -> ResolveResult<ast::MethodDecl> {
        let node = self.handle.node()?;
        let kind = node.kind();
        ast::MethodDecl::cast(node).ok_or(ResolveError::unexpected_node("method", kind))
    }

    pub fn params(&self) -> ResolveResult<Vec<ParameterDecl>> {
        self.ast()?
            .params()
            .into_iter()
            .map(|p| ParameterDecl::from_handle(self.handle.sibling(p.syntax())))
            .collect()
    }

    pub fn arity(&self) -> ResolveResult<usize> {
        Ok(self.ast()?.params().len())
    }

    pub fn type_parameters(&self) -> ResolveResult<Vec<TypeParameterDecl>> {
        self.ast()?
            .type_params()
            .into_iter()
            .map(|tp| TypeParameterDecl::from_handle(self.handle.sibling(tp.syntax())))
            .collect()
    }

    pub fn return_type_node(&self) -> ResolveResult<Option<ast::Type>> {
        Ok(self.ast()?.return_type())
    }

    pub fn throws_nodes(&self) -> ResolveResult<Vec<ast::Type>> {
        Ok(self.ast()?.throws_types())
    }

    pub fn is_static(&self) -> ResolveResult<bool> {
        let node = self.handle.node()?;
        Ok(modifiers_have(&node, SyntaxKind::STATIC_KW))
    }

    /// Abstract methods have no body: explicitly `abstract`, or interface
    /// methods that are neither `default` nor `static`.
    pub fn is_abstract(&self) -> ResolveResult<bool> {
        let method = self.ast()?;
        let node = method.syntax();
        if modifiers_have(node, SyntaxKind::ABSTRACT_KW) {
            return Ok(true);
        }
        Ok(self.declaring_type.is_interface()
            && method.body().is_none()
            && !modifiers_have(node, SyntaxKind::DEFAULT_KW)
            && !modifiers_have(node, SyntaxKind::STATIC_KW))
    }

    pub fn is_varargs(&self) -> ResolveResult<bool> {
        Ok(self
            .ast()?
            .params()
            .last()
            .is_some_and(|p| p.is_varargs()))
    }
}

/// A constructor; `handle` is `None` for the implicit default constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructorDecl {
    handle: Option<NodeHandle>,
    declaring_type: TypeDecl,
}

impl ConstructorDecl {
    pub fn name(&self) -> &str {
        self.declaring_type.name()
    }

    pub fn handle(&self) -> Option<&NodeHandle> {
        self.handle.as_ref()
    }

    pub fn declaring_type(&self) -> &TypeDecl {
        &self.declaring_type
    }

    pub fn is_implicit(&self) -> bool {
        self.handle.is_none()
    }

    fn ast(&self) -> ResolveResult<Option<ast::ConstructorDecl>> {
        let Some(handle) = &self.handle else {
            return Ok(None);
        };
        let node = handle.node()?;
        let kind = node.kind();
        ast::ConstructorDecl::cast(node)
            .map(Some)
            .ok_or(ResolveError::unexpected_node("constructor", kind))
    }

    pub fn params(&self) -> ResolveResult<Vec<ParameterDecl>> {
        let (Some(handle), Some(ctor)) = (&self.handle, self.ast()?) else {
            return Ok(Vec::new());
        };
        ctor.params()
            .into_iter()
            .map(|p| ParameterDecl::from_handle(handle.sibling(p.syntax())))
            .collect()
    }

    pub fn type_parameters(&self) -> ResolveResult<Vec<TypeParameterDecl>> {
        let (Some(handle), Some(ctor)) = (&self.handle, self.ast()?) else {
            return Ok(Vec::new());
        };
        ctor.type_params()
            .into_iter()
            .map(|tp| TypeParameterDecl::from_handle(handle.sibling(tp.syntax())))
            .collect()
    }

    pub fn throws_nodes(&self) -> ResolveResult<Vec<ast::Type>> {
        Ok(self.ast()?.map(|c| c.throws_types()).unwrap_or_default())
    }

    pub fn is_varargs(&self) -> ResolveResult<bool> {
        Ok(self
            .ast()?
            .is_some_and(|c| c.params().last().is_some_and(|p| p.is_varargs())))
    }
}

// ============================================================================
// VALUES AND TYPE PARAMETERS
// ============================================================================

/// A method, constructor or catch-clause parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterDecl {
    handle: NodeHandle,
    name: Name,
}

impl ParameterDecl {
    pub fn from_handle(handle: NodeHandle) -> ResolveResult<Self> {
        let node = handle.node()?;
        let param = ast::Param::cast(node.clone())
            .ok_or(ResolveError::unexpected_node("parameter", node.kind()))?;
        let name = param.name().ok_or_else(|| missing_name(&node))?;
        Ok(Self { handle, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    fn ast(&self) -> ResolveResult<ast::Param> {
        let node = self.handle.node()?;
        let kind = node.kind();
        ast::Param::cast(node).ok_or(ResolveError::unexpected_node("parameter", kind))
    }

    pub fn is_varargs(&self) -> ResolveResult<bool> {
        Ok(self.ast()?.is_varargs())
    }

    pub fn is_catch_parameter(&self) -> bool {
        self.handle
            .node()
            .ok()
            .and_then(|n| n.parent())
            .is_some_and(|p| p.kind() == SyntaxKind::CATCH_CLAUSE)
    }

    pub fn type_node(&self) -> ResolveResult<Option<ast::Type>> {
        Ok(self.ast()?.ty())
    }

    pub fn extra_dims(&self) -> ResolveResult<usize> {
        Ok(self.ast()?.extra_dims())
    }
}

/// A type parameter of a type, method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameterDecl {
    handle: NodeHandle,
    name: Name,
    qualified_name: Name,
}

impl TypeParameterDecl {
    pub fn from_handle(handle: NodeHandle) -> ResolveResult<Self> {
        let node = handle.node()?;
        let param = ast::TypeParam::cast(node.clone())
            .ok_or(ResolveError::unexpected_node("type parameter", node.kind()))?;
        let name = param.name().ok_or_else(|| missing_name(&node))?;
        let owner = node
            .ancestors()
            .skip(1)
            .find(|n| {
                n.kind().is_type_decl()
                    || matches!(n.kind(), SyntaxKind::METHOD_DECL | SyntaxKind::CONSTRUCTOR_DECL)
            });
        let owner_name = match owner {
            Some(owner) if owner.kind().is_type_decl() => {
                type_qualified_name(&owner, handle.unit()).unwrap_or_default()
            }
            Some(owner) => {
                let callable = owner
                    .children()
                    .find_map(ast::Name::cast)
                    .and_then(|n| n.text())
                    .unwrap_or_default();
                let declaring = enclosing_type_node(&owner)
                    .and_then(|t| type_qualified_name(&t, handle.unit()))
                    .unwrap_or_default();
                join_qualified(&declaring, &callable)
            }
            None => String::new(),
        };
        let qualified_name = Name::new(join_qualified(&owner_name, &name));
        Ok(Self {
            handle,
            name,
            qualified_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owner-qualified name, e.g. `java.util.List.E` or `a.A.max.T`
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    /// Declared bounds as written, in order.
    pub fn bound_nodes(&self) -> ResolveResult<Vec<ast::Type>> {
        let node = self.handle.node()?;
        Ok(ast::TypeParam::cast(node).map(|tp| tp.bounds()).unwrap_or_default())
    }

    /// Declared on a method or constructor rather than a type.
    pub fn is_method_level(&self) -> bool {
        self.handle
            .node()
            .ok()
            .and_then(|n| n.parent())
            .and_then(|params| params.parent())
            .is_some_and(|owner| {
                matches!(owner.kind(), SyntaxKind::METHOD_DECL | SyntaxKind::CONSTRUCTOR_DECL)
            })
    }

    /// View this parameter as a type declaration of kind `TypeVariable`.
    pub fn as_type_decl(&self) -> TypeDecl {
        TypeDecl {
            handle: self.handle.clone(),
            name: self.name.clone(),
            qualified_name: self.qualified_name.clone(),
            kind: TypeKind::TypeVariable,
        }
    }
}

/// A local variable, `for` variable or enhanced-`for` variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalVariableDecl {
    handle: NodeHandle,
    name: Name,
}

impl LocalVariableDecl {
    pub fn from_handle(handle: NodeHandle) -> ResolveResult<Self> {
        let node = handle.node()?;
        let declarator = ast::VarDeclarator::cast(node.clone())
            .ok_or(ResolveError::unexpected_node("variable declarator", node.kind()))?;
        let name = declarator.name().ok_or_else(|| missing_name(&node))?;
        Ok(Self { handle, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    fn declarator(&self) -> ResolveResult<ast::VarDeclarator> {
        let node = self.handle.node()?;
        let kind = node.kind();
        ast::VarDeclarator::cast(node).ok_or(ResolveError::unexpected_node("variable declarator", kind))
    }

    /// Declared in an enhanced `for` header.
    pub fn is_for_each(&self) -> bool {
        self.handle
            .node()
            .ok()
            .and_then(|n| n.parent())
            .is_some_and(|p| p.kind() == SyntaxKind::FOR_EACH_STMT)
    }

    /// Declared type as written (`var` included).
    pub fn type_node(&self) -> ResolveResult<Option<ast::Type>> {
        let node = self.handle.node()?;
        Ok(node
            .parent()
            .and_then(|p| p.children().find_map(ast::Type::cast)))
    }

    pub fn extra_dims(&self) -> ResolveResult<usize> {
        Ok(self.declarator()?.extra_dims())
    }

    pub fn initializer(&self) -> ResolveResult<Option<ast::Expr>> {
        Ok(self.declarator()?.initializer())
    }

    /// The iterated expression of an enhanced `for`.
    pub fn iterable(&self) -> ResolveResult<Option<ast::Expr>> {
        let node = self.handle.node()?;
        Ok(node
            .parent()
            .and_then(ast::ForEachStmt::cast)
            .and_then(|f| f.iterable()))
    }
}

// ============================================================================
// DECLARATION
// ============================================================================

/// Anything a name can resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Declaration {
    Type(TypeDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Field(FieldDecl),
    Parameter(ParameterDecl),
    TypeParameter(TypeParameterDecl),
    LocalVariable(LocalVariableDecl),
}

impl Declaration {
    /// Wrap whichever declaration `handle` points at.
    pub fn from_handle(handle: NodeHandle) -> ResolveResult<Self> {
        let node = handle.node()?;
        match node.kind() {
            kind if kind.is_type_decl() => TypeDecl::from_handle(handle).map(Self::Type),
            SyntaxKind::TYPE_PARAM => {
                TypeParameterDecl::from_handle(handle).map(Self::TypeParameter)
            }
            SyntaxKind::PARAM => ParameterDecl::from_handle(handle).map(Self::Parameter),
            SyntaxKind::METHOD_DECL => {
                let declaring_type = TypeDecl::enclosing(&handle, &node)?;
                let name = ast::MethodDecl::cast(node.clone())
                    .and_then(|m| m.name())
                    .ok_or_else(|| missing_name(&node))?;
                Ok(Self::Method(MethodDecl {
                    handle,
                    name,
                    declaring_type,
                }))
            }
            SyntaxKind::CONSTRUCTOR_DECL => {
                let declaring_type = TypeDecl::enclosing(&handle, &node)?;
                Ok(Self::Constructor(ConstructorDecl {
                    handle: Some(handle),
                    declaring_type,
                }))
            }
            SyntaxKind::ENUM_CONSTANT => {
                let declaring_type = TypeDecl::enclosing(&handle, &node)?;
                let name = ast::EnumConstant::cast(node.clone())
                    .and_then(|c| c.name())
                    .ok_or_else(|| missing_name(&node))?;
                Ok(Self::Field(FieldDecl {
                    handle,
                    name,
                    declaring_type,
                }))
            }
            SyntaxKind::VAR_DECLARATOR => {
                let parent = node.parent().map(|p| p.kind());
                if parent == Some(SyntaxKind::FIELD_DECL) {
                    let declaring_type = TypeDecl::enclosing(&handle, &node)?;
                    let name = ast::VarDeclarator::cast(node.clone())
                        .and_then(|d| d.name())
                        .ok_or_else(|| missing_name(&node))?;
                    Ok(Self::Field(FieldDecl {
                        handle,
                        name,
                        declaring_type,
                    }))
                } else {
                    LocalVariableDecl::from_handle(handle).map(Self::LocalVariable)
                }
            }
            other => Err(ResolveError::unexpected_node("declaration", other)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Type(d) => d.name(),
            Self::Method(d) => d.name(),
            Self::Constructor(d) => d.name(),
            Self::Field(d) => d.name(),
            Self::Parameter(d) => d.name(),
            Self::TypeParameter(d) => d.name(),
            Self::LocalVariable(d) => d.name(),
        }
    }

    /// Qualified name for members and types; the simple name for
    /// parameters and locals.
    pub fn qualified_name(&self) -> String {
        match self {
            Self::Type(d) => d.qualified_name().to_string(),
            Self::Method(d) => d.qualified_name(),
            Self::Constructor(d) => d.declaring_type().qualified_name().to_string(),
            Self::Field(d) => d.qualified_name(),
            Self::TypeParameter(d) => d.qualified_name().to_string(),
            Self::Parameter(d) => d.name().to_string(),
            Self::LocalVariable(d) => d.name().to_string(),
        }
    }

    /// Back-reference to the wrapped node, absent for implicit declarations.
    pub fn handle(&self) -> Option<&NodeHandle> {
        match self {
            Self::Type(d) => Some(d.handle()),
            Self::Method(d) => Some(d.handle()),
            Self::Constructor(d) => d.handle(),
            Self::Field(d) => Some(d.handle()),
            Self::Parameter(d) => Some(d.handle()),
            Self::TypeParameter(d) => Some(d.handle()),
            Self::LocalVariable(d) => Some(d.handle()),
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Type(_) => "type",
            Self::Method(_) => "method",
            Self::Constructor(_) => "constructor",
            Self::Field(_) => "field",
            Self::Parameter(_) => "parameter",
            Self::TypeParameter(_) => "type parameter",
            Self::LocalVariable(_) => "local variable",
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type(_))
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Self::Method(_))
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field(_))
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    pub fn is_type_parameter(&self) -> bool {
        matches!(self, Self::TypeParameter(_))
    }

    pub fn is_local_variable(&self) -> bool {
        matches!(self, Self::LocalVariable(_))
    }

    /// Fields, parameters and locals have a value type.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Self::Field(_) | Self::Parameter(_) | Self::LocalVariable(_)
        )
    }

    pub fn as_type(&self) -> Option<&TypeDecl> {
        match self {
            Self::Type(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDecl> {
        match self {
            Self::Method(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldDecl> {
        match self {
            Self::Field(d) => Some(d),
            _ => None,
        }
    }

    /// Fields declared by this declaration. Empty for type parameters,
    /// undefined for members and values.
    pub fn fields(&self) -> ResolveResult<Vec<FieldDecl>> {
        match self {
            Self::Type(d) => d.declared_fields(),
            Self::TypeParameter(_) => Ok(Vec::new()),
            other => Err(ResolveError::malformed("fields", other.variant_name())),
        }
    }

    /// Methods declared by this declaration. Empty for type parameters,
    /// undefined for members and values.
    pub fn methods(&self) -> ResolveResult<Vec<MethodDecl>> {
        match self {
            Self::Type(d) => d.declared_methods(),
            Self::TypeParameter(_) => Ok(Vec::new()),
            other => Err(ResolveError::malformed("methods", other.variant_name())),
        }
    }

    /// The declaration this one is nested in: the declaring type for
    /// members, the owning method or type for parameters and locals.
    pub fn enclosing(&self) -> ResolveResult<Option<Declaration>> {
        match self {
            Self::Type(d) => Ok(d.enclosing_type()?.map(Self::Type)),
            Self::Method(d) => Ok(Some(Self::Type(d.declaring_type().clone()))),
            Self::Constructor(d) => Ok(Some(Self::Type(d.declaring_type().clone()))),
            Self::Field(d) => Ok(Some(Self::Type(d.declaring_type().clone()))),
            Self::Parameter(_) | Self::TypeParameter(_) | Self::LocalVariable(_) => {
                let Some(handle) = self.handle() else {
                    return Ok(None);
                };
                let node = handle.node()?;
                let owner = node.ancestors().skip(1).find(|n| {
                    n.kind().is_type_decl()
                        || matches!(
                            n.kind(),
                            SyntaxKind::METHOD_DECL | SyntaxKind::CONSTRUCTOR_DECL
                        )
                });
                owner
                    .map(|n| Declaration::from_handle(handle.sibling(&n)))
                    .transpose()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn unit(text: &str) -> Arc<SourceUnit> {
        SourceUnit::parse(text)
    }

    fn type_decl(unit: &Arc<SourceUnit>, path: &[&str]) -> TypeDecl {
        TypeDecl::from_handle(unit.find_type(path).unwrap()).unwrap()
    }

    #[test]
    fn test_qualified_names() {
        let unit = unit("package a.b; class Outer { interface Inner {} enum E { X } }");
        let outer = type_decl(&unit, &["Outer"]);
        assert_eq!(outer.qualified_name(), "a.b.Outer");
        assert!(outer.is_class());
        let inner = type_decl(&unit, &["Outer", "Inner"]);
        assert_eq!(inner.qualified_name(), "a.b.Outer.Inner");
        assert!(inner.is_interface());
        assert_eq!(
            inner.enclosing_type().unwrap().unwrap().qualified_name(),
            "a.b.Outer"
        );
        assert!(type_decl(&unit, &["Outer", "E"]).is_enum());
    }

    #[test]
    fn test_declared_members() {
        let unit = unit("class A { int x, y; static String s; void m(int a) {} A() {} class B {} }");
        let a = type_decl(&unit, &["A"]);
        let fields: Vec<_> = a
            .declared_fields()
            .unwrap()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        assert_eq!(fields, vec!["x", "y", "s"]);
        assert!(a.declared_field("s").unwrap().unwrap().is_static().unwrap());
        let methods = a.declared_methods().unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].qualified_name(), "A.m");
        assert_eq!(methods[0].params().unwrap()[0].name(), "a");
        let ctors = a.constructors().unwrap();
        assert_eq!(ctors.len(), 1);
        assert!(!ctors[0].is_implicit());
        assert_eq!(a.member_types().unwrap()[0].name(), "B");
    }

    #[test]
    fn test_implicit_constructor() {
        let unit = unit("class A { } interface I { }");
        let ctors = type_decl(&unit, &["A"]).constructors().unwrap();
        assert_eq!(ctors.len(), 1);
        assert!(ctors[0].is_implicit());
        assert!(ctors[0].params().unwrap().is_empty());
        assert!(type_decl(&unit, &["I"]).constructors().unwrap().is_empty());
    }

    #[test]
    fn test_enum_constants_are_static_fields() {
        let unit = unit("enum Color { RED, GREEN; int rgb; }");
        let color = type_decl(&unit, &["Color"]);
        let fields = color.declared_fields().unwrap();
        assert_eq!(fields.len(), 3);
        assert!(fields[0].is_enum_constant());
        assert!(fields[0].is_static().unwrap());
        assert!(!fields[2].is_static().unwrap());
        assert!(fields[0].type_node().unwrap().is_none());
    }

    #[test]
    fn test_type_variable_queries() {
        let unit = unit("class Box<T extends Number> { <U> U id(U u) { return u; } }");
        let boxed = type_decl(&unit, &["Box"]);
        let params = boxed.type_parameters().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].qualified_name(), "Box.T");
        assert!(!params[0].is_method_level());
        let var = params[0].as_type_decl();
        assert!(var.is_type_variable());
        assert!(var.declared_fields().unwrap().is_empty());
        assert!(var.declared_methods().unwrap().is_empty());
        assert!(matches!(
            var.ast("members"),
            Err(ResolveError::MalformedQuery { .. })
        ));
        let method_params = boxed.declared_methods().unwrap()[0].type_parameters().unwrap();
        assert_eq!(method_params[0].qualified_name(), "Box.id.U");
        assert!(method_params[0].is_method_level());
    }

    #[test]
    fn test_fields_query_by_variant() {
        let unit = unit("class A<T> { int x; void m() {} }");
        let a = type_decl(&unit, &["A"]);
        assert_eq!(Declaration::Type(a.clone()).fields().unwrap().len(), 1);
        let tp = a.type_parameters().unwrap().remove(0);
        assert!(Declaration::TypeParameter(tp).fields().unwrap().is_empty());
        let method = a.declared_methods().unwrap().remove(0);
        assert_eq!(
            Declaration::Method(method).fields(),
            Err(ResolveError::malformed("fields", "method"))
        );
    }

    #[test]
    fn test_from_handle_dispatch() {
        let unit = unit("class A { int f; void m(String p) { int local = 0; for (String s : xs) {} } }");
        let root = unit.syntax();
        let kinds: Vec<_> = root
            .descendants()
            .filter(|n| {
                matches!(
                    n.kind(),
                    SyntaxKind::VAR_DECLARATOR | SyntaxKind::PARAM | SyntaxKind::METHOD_DECL
                )
            })
            .map(|n| Declaration::from_handle(unit.handle(&n)).unwrap().variant_name())
            .collect();
        assert_eq!(
            kinds,
            vec!["field", "method", "parameter", "local variable", "local variable"]
        );
    }

    #[test]
    fn test_enclosing_declaration_of_parameter() {
        let unit = unit("class A { void m(int p) {} }");
        let param = unit
            .syntax()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::PARAM)
            .unwrap();
        let decl = Declaration::from_handle(unit.handle(&param)).unwrap();
        let owner = decl.enclosing().unwrap().unwrap();
        assert!(owner.is_method());
        assert_eq!(owner.qualified_name(), "A.m");
    }

    #[test]
    fn test_stale_declaration() {
        let unit = unit("class A { int x; }");
        let a = type_decl(&unit, &["A"]);
        unit.replace_text("interface Other {}");
        assert!(matches!(
            a.declared_fields(),
            Err(ResolveError::StaleNode { .. })
        ));
    }
}
