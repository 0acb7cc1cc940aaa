//! Typing expressions.
//!
//! Dispatch is by node kind. Compound expressions type their operands
//! first; member accesses look the member up in the operand's type, not in
//! the scope the access appears in.

use std::sync::Arc;

use crate::base::constants::STRING_TYPE;
use crate::base::join_qualified;
use crate::error::{ResolveError, ResolveResult};
use crate::model::{
    ConstructorUsage, Declaration, FieldDecl, MethodUsage, PrimitiveType, ReferenceType,
    ResolvedType, SymbolReference, TypeDecl, enclosing_type_node,
};
use crate::parser::ast::{self, Expr};
use crate::parser::{AstNode, SyntaxKind, SyntaxNode};
use crate::solver::TypeSolver;
use crate::syntax::SourceUnit;

use super::context::context_for;
use super::convert::{class_type_decl, convert_or_unsolved, convert_type};
use super::members::{receiver_field, receiver_methods, root_or_unsolved};
use super::method_resolution::resolve_overload;

/// Type of `expr`; names that cannot be resolved give
/// [`ResolvedType::Unsolved`].
pub(crate) fn type_of_expr(
    unit: &Arc<SourceUnit>,
    expr: &Expr,
    solver: &dyn TypeSolver,
) -> ResolveResult<ResolvedType> {
    match ExprTyper::new(unit, solver).type_of(expr) {
        Err(ResolveError::UnsolvedSymbol { name }) => Ok(ResolvedType::Unsolved(name.into())),
        other => other,
    }
}

/// What a name or a dotted name chain denotes.
#[derive(Debug, Clone)]
pub(crate) enum Target {
    /// A value; the declaration is absent for values with no declaration
    /// (`array.length`, `this`, calls).
    Value(ResolvedType, Option<Declaration>),
    Type(TypeDecl),
    /// A package prefix such as `java.util` in `java.util.List`.
    Package(String),
}

pub(crate) struct ExprTyper<'a> {
    unit: &'a Arc<SourceUnit>,
    solver: &'a dyn TypeSolver,
}

impl<'a> ExprTyper<'a> {
    pub(crate) fn new(unit: &'a Arc<SourceUnit>, solver: &'a dyn TypeSolver) -> Self {
        Self { unit, solver }
    }

    pub(crate) fn type_of(&self, expr: &Expr) -> ResolveResult<ResolvedType> {
        let node = expr.syntax();
        match expr.kind() {
            SyntaxKind::LITERAL => self.literal(node),
            SyntaxKind::NAME_EXPR | SyntaxKind::FIELD_ACCESS_EXPR => match self.classify(expr)? {
                Target::Value(ty, _) => Ok(ty),
                Target::Type(decl) => Err(ResolveError::unsolved(decl.name())),
                Target::Package(name) => Err(ResolveError::unsolved(name)),
            },
            SyntaxKind::THIS_EXPR => self.this_type(node),
            SyntaxKind::SUPER_EXPR => self.super_type(node),
            SyntaxKind::PAREN_EXPR => {
                let inner = child(ast::ParenExpr::cast(node.clone()).and_then(|p| p.inner()), node)?;
                self.type_of(&inner)
            }
            SyntaxKind::METHOD_CALL_EXPR => {
                let call = cast::<ast::MethodCallExpr>(node)?;
                match self.solve_call(&call)? {
                    SymbolReference::Solved(usage) => Ok(usage.return_type().clone()),
                    _ => Err(ResolveError::unsolved(call.name().unwrap_or_default())),
                }
            }
            SyntaxKind::CTOR_CALL_EXPR => Ok(ResolvedType::Void),
            SyntaxKind::NEW_EXPR => {
                let new = cast::<ast::NewExpr>(node)?;
                let class = child(new.class_type(), node)?;
                convert_type(self.unit, &ast::Type::Class(class), self.solver)
            }
            SyntaxKind::ARRAY_CREATION_EXPR => {
                let creation = cast::<ast::ArrayCreationExpr>(node)?;
                let element = child(creation.element_type(), node)?;
                let element = convert_type(self.unit, &element, self.solver)?;
                Ok(element.with_dims(creation.dimensions()))
            }
            SyntaxKind::ARRAY_ACCESS_EXPR => {
                let access = cast::<ast::ArrayAccessExpr>(node)?;
                let array = self.type_of(&child(access.array(), node)?)?;
                match array {
                    ResolvedType::Array(element) => Ok(*element),
                    ResolvedType::Unsolved(name) => Ok(ResolvedType::Unsolved(name)),
                    other => Err(ResolveError::unsolved(format!("{other}[]"))),
                }
            }
            SyntaxKind::CAST_EXPR => {
                let cast_expr = cast::<ast::CastExpr>(node)?;
                convert_type(self.unit, &child(cast_expr.ty(), node)?, self.solver)
            }
            SyntaxKind::INSTANCEOF_EXPR => Ok(ResolvedType::Primitive(PrimitiveType::Boolean)),
            SyntaxKind::UNARY_EXPR => self.unary(node),
            SyntaxKind::POSTFIX_EXPR => {
                let postfix = cast::<ast::PostfixExpr>(node)?;
                self.type_of(&child(postfix.operand(), node)?)
            }
            SyntaxKind::BINARY_EXPR => self.binary(node),
            SyntaxKind::CONDITIONAL_EXPR => self.conditional(node),
            SyntaxKind::ASSIGN_EXPR => {
                let assign = cast::<ast::AssignExpr>(node)?;
                self.type_of(&child(assign.target(), node)?)
            }
            other => Err(ResolveError::unexpected_node("expression", other)),
        }
    }

    fn literal(&self, node: &SyntaxNode) -> ResolveResult<ResolvedType> {
        let token = child(cast::<ast::Literal>(node)?.token(), node)?;
        let primitive = match token.kind() {
            SyntaxKind::INT_NUMBER => PrimitiveType::Int,
            SyntaxKind::LONG_NUMBER => PrimitiveType::Long,
            SyntaxKind::FLOAT_NUMBER => PrimitiveType::Float,
            SyntaxKind::DOUBLE_NUMBER => PrimitiveType::Double,
            SyntaxKind::CHAR_LIT => PrimitiveType::Char,
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => PrimitiveType::Boolean,
            SyntaxKind::NULL_KW => return Ok(ResolvedType::Null),
            SyntaxKind::STRING_LIT => return Ok(self.string_type()),
            other => return Err(ResolveError::unexpected_node("literal", other)),
        };
        Ok(ResolvedType::Primitive(primitive))
    }

    fn string_type(&self) -> ResolvedType {
        match self.solver.try_solve_type(STRING_TYPE).into_solved() {
            Some(decl) => ResolvedType::Reference(ReferenceType::raw(decl)),
            None => ResolvedType::Unsolved(STRING_TYPE.into()),
        }
    }

    // ------------------------------------------------------------------
    // Names
    // ------------------------------------------------------------------

    /// What a name expression or field access denotes. Other expressions
    /// are values.
    pub(crate) fn classify(&self, expr: &Expr) -> ResolveResult<Target> {
        let node = expr.syntax();
        match expr.kind() {
            SyntaxKind::NAME_EXPR => {
                let name = child(cast::<ast::NameExpr>(node)?.name(), node)?;
                self.classify_simple(node, &name)
            }
            SyntaxKind::FIELD_ACCESS_EXPR => {
                let access = cast::<ast::FieldAccessExpr>(node)?;
                let name = child(access.name(), node)?;
                let receiver = child(access.receiver(), node)?;
                self.classify_member(self.classify(&receiver)?, &name)
            }
            _ => Ok(Target::Value(self.type_of(expr)?, None)),
        }
    }

    /// A simple name: a variable first, then a type, then a package.
    fn classify_simple(&self, node: &SyntaxNode, name: &str) -> ResolveResult<Target> {
        let context = context_for(self.unit, node, self.solver);
        if let SymbolReference::Solved(decl) = context.resolve_value(name)? {
            let ty = match &decl {
                Declaration::Field(field) => self.implicit_field_type(node, field)?,
                other => other.declared_type(self.solver)?,
            };
            return Ok(Target::Value(ty, Some(decl)));
        }
        if let SymbolReference::Solved(decl) = context.resolve_type(name)? {
            return Ok(Target::Type(decl));
        }
        Ok(Target::Package(name.to_string()))
    }

    fn classify_member(&self, receiver: Target, name: &str) -> ResolveResult<Target> {
        match receiver {
            Target::Value(ty, _) => {
                if ty.is_array() && name == "length" {
                    return Ok(Target::Value(ResolvedType::Primitive(PrimitiveType::Int), None));
                }
                if let ResolvedType::Unsolved(base) = &ty {
                    return Err(ResolveError::unsolved(join_qualified(base, name)));
                }
                match receiver_field(&ty, name, self.solver)? {
                    Some((field, ty)) => Ok(Target::Value(ty, Some(Declaration::Field(field)))),
                    None => Err(ResolveError::unsolved(join_qualified(&ty.describe(), name))),
                }
            }
            Target::Type(decl) => {
                if let Some(field) = decl.find_field(name, self.solver)? {
                    let ty = field.declared_type(self.solver)?;
                    return Ok(Target::Value(ty, Some(Declaration::Field(field))));
                }
                if let Some(member) = decl.member_type(name)? {
                    return Ok(Target::Type(member));
                }
                match decl.find_member_type(name, self.solver)? {
                    Some(member) => Ok(Target::Type(member)),
                    None => Err(ResolveError::unsolved(join_qualified(decl.qualified_name(), name))),
                }
            }
            Target::Package(package) => {
                let qualified = join_qualified(&package, name);
                match self.solver.try_solve_type(&qualified) {
                    SymbolReference::Solved(decl) => Ok(Target::Type(decl)),
                    _ => Ok(Target::Package(qualified)),
                }
            }
        }
    }

    /// Type of a field named without a receiver, as a member of the
    /// innermost enclosing type that inherits it.
    fn implicit_field_type(&self, node: &SyntaxNode, field: &FieldDecl) -> ResolveResult<ResolvedType> {
        let declared = field.declared_type(self.solver)?;
        let mut current = enclosing_type_node(node);
        while let Some(outer) = current {
            let owner = TypeDecl::from_handle(self.unit.handle(&outer))?;
            for link in owner.member_chain(self.solver)? {
                if link.decl() == field.declaring_type() {
                    return Ok(declared.substitute(&link.type_parameter_map()?));
                }
            }
            current = enclosing_type_node(&outer);
        }
        Ok(declared)
    }

    fn enclosing_type(&self, node: &SyntaxNode) -> ResolveResult<TypeDecl> {
        let outer = enclosing_type_node(node).ok_or_else(|| ResolveError::unsolved("this"))?;
        TypeDecl::from_handle(self.unit.handle(&outer))
    }

    fn this_type(&self, node: &SyntaxNode) -> ResolveResult<ResolvedType> {
        let decl = self.enclosing_type(node)?;
        Ok(ResolvedType::Reference(ReferenceType::declared(decl)?))
    }

    /// The superclass of the enclosing type, or the root type.
    fn super_type(&self, node: &SyntaxNode) -> ResolveResult<ResolvedType> {
        let decl = self.enclosing_type(node)?;
        Ok(superclass(&decl, self.solver)?
            .map(ResolvedType::Reference)
            .unwrap_or_else(|| root_or_unsolved(self.solver)))
    }

    // ------------------------------------------------------------------
    // Calls
    // ------------------------------------------------------------------

    /// Argument types; an argument that cannot be typed is unsolved.
    fn arg_types(&self, args: &[Expr]) -> ResolveResult<Vec<ResolvedType>> {
        args.iter().map(|arg| type_of_expr(self.unit, arg, self.solver)).collect()
    }

    pub(crate) fn solve_call(&self, call: &ast::MethodCallExpr) -> ResolveResult<SymbolReference<MethodUsage>> {
        let node = call.syntax();
        let name = child(call.name(), node)?;
        let args = self.arg_types(&call.args())?;
        let Some(receiver) = call.receiver() else {
            return context_for(self.unit, node, self.solver).solve_method(&name, &args);
        };
        let candidates = match self.classify(&receiver) {
            Ok(Target::Value(ty, _)) => receiver_methods(&ty, &name, self.solver)?,
            Ok(Target::Type(decl)) => decl.methods_named(&name, self.solver)?,
            Ok(Target::Package(_)) | Err(ResolveError::UnsolvedSymbol { .. }) => {
                return Ok(SymbolReference::Unsolved);
            }
            Err(err) => return Err(err),
        };
        resolve_overload(candidates, &args, self.solver)
    }

    /// The constructor a `new` expression or `this(...)`/`super(...)` call
    /// invokes.
    pub(crate) fn solve_constructor(&self, node: &SyntaxNode) -> ResolveResult<SymbolReference<ConstructorUsage>> {
        let (target, args) = match node.kind() {
            SyntaxKind::NEW_EXPR => {
                let new = cast::<ast::NewExpr>(node)?;
                let class = child(new.class_type(), node)?;
                match convert_or_unsolved(self.unit, &ast::Type::Class(class), self.solver)? {
                    ResolvedType::Reference(reference) => (reference, new.args()),
                    _ => return Ok(SymbolReference::Unsolved),
                }
            }
            SyntaxKind::CTOR_CALL_EXPR => {
                let call = cast::<ast::CtorCallExpr>(node)?;
                let own = self.enclosing_type(node)?;
                let target = if call.is_super() {
                    match superclass(&own, self.solver)? {
                        Some(superclass) => superclass,
                        None => return Ok(SymbolReference::Unsolved),
                    }
                } else {
                    ReferenceType::declared(own)?
                };
                (target, call.args())
            }
            other => return Err(ResolveError::unexpected_node("object creation", other)),
        };
        let args = self.arg_types(&args)?;
        let map = target.type_parameter_map()?;
        let candidates = target
            .decl()
            .constructor_usages(self.solver)?
            .into_iter()
            .map(|usage| usage.substitute(&map))
            .collect();
        resolve_overload(candidates, &args, self.solver)
    }

    /// The declaration a name, member access, call or type reference
    /// refers to.
    pub(crate) fn declaration_of(&self, node: &SyntaxNode) -> ResolveResult<SymbolReference<Declaration>> {
        match node.kind() {
            SyntaxKind::NAME_EXPR | SyntaxKind::FIELD_ACCESS_EXPR => {
                let expr = cast::<Expr>(node)?;
                match self.classify(&expr) {
                    Ok(Target::Value(_, Some(decl))) => Ok(SymbolReference::Solved(decl)),
                    Ok(Target::Type(decl)) => Ok(SymbolReference::Solved(Declaration::Type(decl))),
                    Ok(_) | Err(ResolveError::UnsolvedSymbol { .. }) => Ok(SymbolReference::Unsolved),
                    Err(err) => Err(err),
                }
            }
            SyntaxKind::METHOD_CALL_EXPR => {
                let call = cast::<ast::MethodCallExpr>(node)?;
                Ok(self.solve_call(&call)?.map(|usage| Declaration::Method(usage.decl().clone())))
            }
            SyntaxKind::NEW_EXPR | SyntaxKind::CTOR_CALL_EXPR => {
                Ok(self.solve_constructor(node)?.map(|usage| Declaration::Constructor(usage.into_decl())))
            }
            SyntaxKind::CLASS_TYPE => {
                let class = cast::<ast::ClassType>(node)?;
                Ok(match class_type_decl(self.unit, &class, self.solver)? {
                    Some(decl) => SymbolReference::Solved(Declaration::Type(decl)),
                    None => SymbolReference::Unsolved,
                })
            }
            other => Err(ResolveError::unexpected_node("name or reference", other)),
        }
    }

    // ------------------------------------------------------------------
    // Operators
    // ------------------------------------------------------------------

    fn unary(&self, node: &SyntaxNode) -> ResolveResult<ResolvedType> {
        let unary = cast::<ast::UnaryExpr>(node)?;
        let operand = self.type_of(&child(unary.operand(), node)?)?;
        match unary.op() {
            Some(SyntaxKind::BANG) => Ok(ResolvedType::Primitive(PrimitiveType::Boolean)),
            Some(SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS) => Ok(operand),
            _ => Ok(match operand.unboxed() {
                Some(p) if p.is_numeric() => ResolvedType::Primitive(p.unary_promotion()),
                _ => operand,
            }),
        }
    }

    fn binary(&self, node: &SyntaxNode) -> ResolveResult<ResolvedType> {
        let binary = cast::<ast::BinaryExpr>(node)?;
        let op = child(binary.op(), node)?;
        if matches!(
            op,
            SyntaxKind::EQ_EQ
                | SyntaxKind::BANG_EQ
                | SyntaxKind::LT
                | SyntaxKind::GT
                | SyntaxKind::LT_EQ
                | SyntaxKind::GT_EQ
                | SyntaxKind::AMP_AMP
                | SyntaxKind::PIPE_PIPE
        ) {
            return Ok(ResolvedType::Primitive(PrimitiveType::Boolean));
        }
        let lhs = self.type_of(&child(binary.lhs(), node)?)?;
        if matches!(op, SyntaxKind::LT_LT | SyntaxKind::GT_GT | SyntaxKind::GT_GT_GT) {
            // Only the left operand decides the type of a shift.
            return match lhs.unboxed() {
                Some(p) if p.is_numeric() => Ok(ResolvedType::Primitive(p.unary_promotion())),
                _ if lhs.is_unsolved() => Ok(lhs),
                _ => Err(ResolveError::unsolved(format!("{lhs} {op:?}"))),
            };
        }
        let rhs = self.type_of(&child(binary.rhs(), node)?)?;
        if op == SyntaxKind::PLUS && (is_string(&lhs) || is_string(&rhs)) {
            return Ok(self.string_type());
        }
        match (lhs.unboxed(), rhs.unboxed()) {
            (Some(PrimitiveType::Boolean), Some(PrimitiveType::Boolean))
                if matches!(op, SyntaxKind::AMP | SyntaxKind::PIPE | SyntaxKind::CARET) =>
            {
                Ok(ResolvedType::Primitive(PrimitiveType::Boolean))
            }
            (Some(l), Some(r)) if l.is_numeric() && r.is_numeric() => {
                Ok(ResolvedType::Primitive(l.binary_promotion(r)))
            }
            _ if lhs.is_unsolved() => Ok(lhs),
            _ if rhs.is_unsolved() => Ok(rhs),
            _ => Err(ResolveError::unsolved(format!("{lhs} {op:?} {rhs}"))),
        }
    }

    fn conditional(&self, node: &SyntaxNode) -> ResolveResult<ResolvedType> {
        let conditional = cast::<ast::ConditionalExpr>(node)?;
        let then_ty = self.type_of(&child(conditional.then_branch(), node)?)?;
        let else_ty = self.type_of(&child(conditional.else_branch(), node)?)?;
        if then_ty == else_ty {
            return Ok(then_ty);
        }
        if then_ty.is_null() {
            return Ok(else_ty);
        }
        if else_ty.is_null() {
            return Ok(then_ty);
        }
        if let (Some(t), Some(e)) = (then_ty.unboxed(), else_ty.unboxed()) {
            if t.is_numeric() && e.is_numeric() {
                return Ok(ResolvedType::Primitive(t.binary_promotion(e)));
            }
        }
        if then_ty.is_assignable_by(&else_ty, self.solver)? {
            return Ok(then_ty);
        }
        if else_ty.is_assignable_by(&then_ty, self.solver)? {
            return Ok(else_ty);
        }
        Ok(then_ty)
    }
}

fn is_string(ty: &ResolvedType) -> bool {
    ty.as_reference().is_some_and(|r| r.qualified_name() == STRING_TYPE)
}

/// The first class among the direct supertypes of `decl`.
fn superclass(decl: &TypeDecl, solver: &dyn TypeSolver) -> ResolveResult<Option<ReferenceType>> {
    Ok(decl
        .ancestors(solver, true)?
        .into_iter()
        .find(|a| a.decl().is_class() || a.decl().is_enum()))
}

fn cast<N: AstNode>(node: &SyntaxNode) -> ResolveResult<N> {
    N::cast(node.clone()).ok_or(ResolveError::unexpected_node("typed node", node.kind()))
}

/// A required child; absent only in trees with syntax errors.
fn child<T>(value: Option<T>, node: &SyntaxNode) -> ResolveResult<T> {
    value.ok_or(ResolveError::unexpected_node("complete expression", node.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{CombinedTypeSolver, SourceSetTypeSolver};

    fn type_of_initializer(text: &str, var: &str) -> ResolvedType {
        let mut sources = SourceSetTypeSolver::new();
        let unit = sources.add_source(text);
        let solver = CombinedTypeSolver::with_builtins([Arc::new(sources) as Arc<dyn TypeSolver>]);
        let init = unit
            .syntax()
            .descendants()
            .filter_map(ast::VarDeclarator::cast)
            .find(|d| d.name().as_deref() == Some(var))
            .and_then(|d| d.initializer())
            .unwrap();
        type_of_expr(&unit, &init, &solver).unwrap()
    }

    #[test]
    fn test_literals_and_operators() {
        let text = r#"class A { void m() {
            int a = 1; long b = 2L; double c = a * 1.5; long d = a + b; String s = "x" + a;
            boolean e = a < b; char ch = 'c'; int f = -ch; Object n = null; boolean g = !e;
        } }"#;
        assert_eq!(type_of_initializer(text, "c").to_string(), "double");
        assert_eq!(type_of_initializer(text, "d").to_string(), "long");
        assert_eq!(type_of_initializer(text, "s").to_string(), "java.lang.String");
        assert_eq!(type_of_initializer(text, "e").to_string(), "boolean");
        assert_eq!(type_of_initializer(text, "f").to_string(), "int");
        assert_eq!(type_of_initializer(text, "n"), ResolvedType::Null);
        assert_eq!(type_of_initializer(text, "g").to_string(), "boolean");
    }

    #[test]
    fn test_names_fields_and_calls() {
        let text = r#"import java.util.*;
        class A {
            List<String> names;
            int[] counts;
            static int total;
            void m(Map<String, Integer> map) {
                String first = names.get(0);
                int n = counts.length;
                Integer v = map.get("k");
                int t = A.total;
                int len = first.length();
                Object o = this.names;
                String joined = String.valueOf(n);
            }
        }"#;
        assert_eq!(type_of_initializer(text, "first").to_string(), "java.lang.String");
        assert_eq!(type_of_initializer(text, "n").to_string(), "int");
        assert_eq!(type_of_initializer(text, "v").to_string(), "java.lang.Integer");
        assert_eq!(type_of_initializer(text, "t").to_string(), "int");
        assert_eq!(type_of_initializer(text, "len").to_string(), "int");
        assert_eq!(
            type_of_initializer(text, "o").to_string(),
            "java.util.List<java.lang.String>"
        );
        assert_eq!(type_of_initializer(text, "joined").to_string(), "java.lang.String");
    }

    #[test]
    fn test_creation_cast_and_conditional() {
        let text = r#"import java.util.ArrayList;
        class A { void m(boolean flag, Object x) {
            ArrayList<String> list = new ArrayList<String>();
            int[][] grid = new int[3][];
            String s = (String) x;
            long pick = flag ? 1 : 2L;
            String maybe = flag ? null : "y";
            int cell = grid[0][1];
        } }"#;
        assert_eq!(
            type_of_initializer(text, "list").to_string(),
            "java.util.ArrayList<java.lang.String>"
        );
        assert_eq!(type_of_initializer(text, "grid").to_string(), "int[][]");
        assert_eq!(type_of_initializer(text, "s").to_string(), "java.lang.String");
        assert_eq!(type_of_initializer(text, "pick").to_string(), "long");
        assert_eq!(type_of_initializer(text, "maybe").to_string(), "java.lang.String");
        assert_eq!(type_of_initializer(text, "cell").to_string(), "int");
    }

    #[test]
    fn test_fully_qualified_static_access() {
        let text = "class A { int max = java.lang.Integer.MAX_VALUE; }";
        assert_eq!(type_of_initializer(text, "max").to_string(), "int");
    }

    #[test]
    fn test_unknown_names_are_unsolved() {
        let text = "class A { void m() { int x = missing + 1; Object y = nothing.here(); } }";
        assert!(type_of_initializer(text, "x").is_unsolved());
        assert!(type_of_initializer(text, "y").is_unsolved());
    }
}
