//! Resolved types: types as used, with generic arguments applied.

use std::fmt;

use crate::base::Name;
use crate::error::{ResolveError, ResolveResult};
use crate::parser::SyntaxKind;

use super::declaration::{TypeDecl, TypeParameterDecl};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// The eight primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Char,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    pub fn from_keyword(kind: SyntaxKind) -> Option<Self> {
        let prim = match kind {
            SyntaxKind::BOOLEAN_KW => Self::Boolean,
            SyntaxKind::BYTE_KW => Self::Byte,
            SyntaxKind::SHORT_KW => Self::Short,
            SyntaxKind::CHAR_KW => Self::Char,
            SyntaxKind::INT_KW => Self::Int,
            SyntaxKind::LONG_KW => Self::Long,
            SyntaxKind::FLOAT_KW => Self::Float,
            SyntaxKind::DOUBLE_KW => Self::Double,
            _ => return None,
        };
        Some(prim)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Qualified name of the wrapper class.
    pub fn boxed_name(self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Short => "java.lang.Short",
            Self::Char => "java.lang.Character",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
        }
    }

    /// The primitive a wrapper class unboxes to.
    pub fn from_boxed_name(qualified_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.boxed_name() == qualified_name)
    }

    pub fn is_numeric(self) -> bool {
        self != Self::Boolean
    }

    /// Identity or widening primitive conversion from `self` to `target`.
    pub fn widens_to(self, target: PrimitiveType) -> bool {
        use PrimitiveType::*;
        if self == target {
            return true;
        }
        match self {
            Byte => matches!(target, Short | Int | Long | Float | Double),
            Short | Char => matches!(target, Int | Long | Float | Double),
            Int => matches!(target, Long | Float | Double),
            Long => matches!(target, Float | Double),
            Float => target == Double,
            Double | Boolean => false,
        }
    }

    /// `byte`, `short` and `char` promote to `int`.
    pub fn unary_promotion(self) -> Self {
        match self {
            Self::Byte | Self::Short | Self::Char => Self::Int,
            other => other,
        }
    }

    /// Result type of an arithmetic operation on two numeric operands.
    pub fn binary_promotion(self, other: Self) -> Self {
        use PrimitiveType::*;
        if self == Double || other == Double {
            Double
        } else if self == Float || other == Float {
            Float
        } else if self == Long || other == Long {
            Long
        } else {
            Int
        }
    }
}

// ============================================================================
// REFERENCE TYPES
// ============================================================================

/// A class, interface or enum with its type arguments.
///
/// An empty argument list on a generic declaration is a raw use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceType {
    decl: TypeDecl,
    type_args: Vec<ResolvedType>,
}

impl ReferenceType {
    /// Build a reference type, checking the argument count against the
    /// declaration's type parameters. Raw uses (no arguments) are allowed.
    pub fn new(decl: TypeDecl, type_args: Vec<ResolvedType>) -> ResolveResult<Self> {
        if !type_args.is_empty() {
            let expected = decl.type_parameters()?.len();
            if expected != type_args.len() {
                return Err(ResolveError::TypeArgumentArity {
                    type_name: decl.qualified_name().to_string(),
                    expected,
                    found: type_args.len(),
                });
            }
        }
        Ok(Self { decl, type_args })
    }

    /// Raw use of a declaration.
    pub fn raw(decl: TypeDecl) -> Self {
        Self {
            decl,
            type_args: Vec::new(),
        }
    }

    /// The declaration parameterized by its own type variables
    /// (`List<E>` inside `List`).
    pub fn declared(decl: TypeDecl) -> ResolveResult<Self> {
        let type_args = decl
            .type_parameters()?
            .into_iter()
            .map(ResolvedType::TypeVariable)
            .collect();
        Ok(Self { decl, type_args })
    }

    pub fn decl(&self) -> &TypeDecl {
        &self.decl
    }

    pub fn qualified_name(&self) -> &str {
        self.decl.qualified_name()
    }

    pub fn type_args(&self) -> &[ResolvedType] {
        &self.type_args
    }

    pub fn is_raw(&self) -> bool {
        self.type_args.is_empty()
    }

    /// Pairs each declared type parameter with its argument.
    /// Raw types map nothing.
    pub fn type_parameter_map(&self) -> ResolveResult<TypeParameterMap> {
        let mut map = TypeParameterMap::new();
        if self.type_args.is_empty() {
            return Ok(map);
        }
        for (param, arg) in self.decl.type_parameters()?.into_iter().zip(&self.type_args) {
            map.insert(param, arg.clone());
        }
        Ok(map)
    }

    pub fn substitute(&self, map: &TypeParameterMap) -> Self {
        Self {
            decl: self.decl.clone(),
            type_args: self.type_args.iter().map(|t| t.substitute(map)).collect(),
        }
    }
}

/// Bound of a wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Wildcard {
    Unbounded,
    Extends(Box<ResolvedType>),
    Super(Box<ResolvedType>),
}

// ============================================================================
// RESOLVED TYPE
// ============================================================================

/// A type as used at some point in the program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedType {
    Primitive(PrimitiveType),
    Array(Box<ResolvedType>),
    Reference(ReferenceType),
    TypeVariable(TypeParameterDecl),
    Wildcard(Wildcard),
    Void,
    Null,
    /// A type whose name could not be resolved
    Unsolved(Name),
}

impl ResolvedType {
    pub fn array_of(element: ResolvedType) -> Self {
        Self::Array(Box::new(element))
    }

    /// Wrap in `dims` array levels.
    pub fn with_dims(self, dims: usize) -> Self {
        (0..dims).fold(self, |t, _| Self::array_of(t))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_reference_type(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    pub fn is_type_variable(&self) -> bool {
        matches!(self, Self::TypeVariable(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_unsolved(&self) -> bool {
        matches!(self, Self::Unsolved(_))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            Self::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn element_type(&self) -> Option<&ResolvedType> {
        match self {
            Self::Array(e) => Some(e),
            _ => None,
        }
    }

    pub fn array_level(&self) -> usize {
        match self {
            Self::Array(e) => 1 + e.array_level(),
            _ => 0,
        }
    }

    /// The primitive this type denotes directly or by unboxing.
    pub fn unboxed(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(p) => Some(*p),
            Self::Reference(r) => PrimitiveType::from_boxed_name(r.qualified_name()),
            _ => None,
        }
    }

    /// Replace type variables bound in `map`.
    pub fn substitute(&self, map: &TypeParameterMap) -> ResolvedType {
        if map.is_empty() {
            return self.clone();
        }
        match self {
            Self::TypeVariable(tp) => map.get(tp).cloned().unwrap_or_else(|| self.clone()),
            Self::Reference(r) => Self::Reference(r.substitute(map)),
            Self::Array(e) => Self::array_of(e.substitute(map)),
            Self::Wildcard(Wildcard::Extends(b)) => {
                Self::Wildcard(Wildcard::Extends(Box::new(b.substitute(map))))
            }
            Self::Wildcard(Wildcard::Super(b)) => {
                Self::Wildcard(Wildcard::Super(Box::new(b.substitute(map))))
            }
            other => other.clone(),
        }
    }

    /// Type with type arguments dropped, used for signatures.
    pub fn erasure(&self) -> String {
        match self {
            Self::Reference(r) => r.qualified_name().to_string(),
            Self::Array(e) => format!("{}[]", e.erasure()),
            Self::TypeVariable(tp) => tp.name().to_string(),
            Self::Wildcard(_) => "?".to_string(),
            other => other.describe(),
        }
    }

    /// Java-like rendering, e.g. `java.util.List<java.lang.String>`.
    pub fn describe(&self) -> String {
        match self {
            Self::Primitive(p) => p.name().to_string(),
            Self::Array(e) => format!("{}[]", e.describe()),
            Self::Reference(r) => {
                if r.type_args.is_empty() {
                    r.qualified_name().to_string()
                } else {
                    let args: Vec<_> = r.type_args.iter().map(|a| a.describe()).collect();
                    format!("{}<{}>", r.qualified_name(), args.join(", "))
                }
            }
            Self::TypeVariable(tp) => tp.name().to_string(),
            Self::Wildcard(Wildcard::Unbounded) => "?".to_string(),
            Self::Wildcard(Wildcard::Extends(b)) => format!("? extends {}", b.describe()),
            Self::Wildcard(Wildcard::Super(b)) => format!("? super {}", b.describe()),
            Self::Void => "void".to_string(),
            Self::Null => "null".to_string(),
            Self::Unsolved(name) => name.to_string(),
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// ============================================================================
// TYPE PARAMETER MAP
// ============================================================================

/// Bindings from type parameters to type arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeParameterMap {
    entries: Vec<(TypeParameterDecl, ResolvedType)>,
}

impl TypeParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `param`, replacing an existing binding.
    pub fn insert(&mut self, param: TypeParameterDecl, ty: ResolvedType) {
        match self.entries.iter_mut().find(|(p, _)| *p == param) {
            Some(entry) => entry.1 = ty,
            None => self.entries.push((param, ty)),
        }
    }

    pub fn get(&self, param: &TypeParameterDecl) -> Option<&ResolvedType> {
        self.entries
            .iter()
            .find(|(p, _)| p == param)
            .map(|(_, t)| t)
    }

    pub fn contains(&self, param: &TypeParameterDecl) -> bool {
        self.get(param).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeParameterDecl, &ResolvedType)> {
        self.entries.iter().map(|(p, t)| (p, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SourceUnit;
    use rstest::rstest;

    #[rstest]
    #[case(PrimitiveType::Byte, PrimitiveType::Int, true)]
    #[case(PrimitiveType::Char, PrimitiveType::Int, true)]
    #[case(PrimitiveType::Char, PrimitiveType::Short, false)]
    #[case(PrimitiveType::Int, PrimitiveType::Double, true)]
    #[case(PrimitiveType::Long, PrimitiveType::Int, false)]
    #[case(PrimitiveType::Boolean, PrimitiveType::Int, false)]
    #[case(PrimitiveType::Float, PrimitiveType::Float, true)]
    fn test_widening(
        #[case] from: PrimitiveType,
        #[case] to: PrimitiveType,
        #[case] expected: bool,
    ) {
        assert_eq!(from.widens_to(to), expected);
    }

    #[test]
    fn test_promotion() {
        assert_eq!(PrimitiveType::Char.unary_promotion(), PrimitiveType::Int);
        assert_eq!(
            PrimitiveType::Int.binary_promotion(PrimitiveType::Long),
            PrimitiveType::Long
        );
        assert_eq!(
            PrimitiveType::Float.binary_promotion(PrimitiveType::Long),
            PrimitiveType::Float
        );
        assert_eq!(
            PrimitiveType::Short.binary_promotion(PrimitiveType::Byte),
            PrimitiveType::Int
        );
    }

    #[test]
    fn test_boxing_names() {
        assert_eq!(PrimitiveType::Char.boxed_name(), "java.lang.Character");
        assert_eq!(
            PrimitiveType::from_boxed_name("java.lang.Integer"),
            Some(PrimitiveType::Int)
        );
        assert_eq!(PrimitiveType::from_boxed_name("java.lang.String"), None);
    }

    fn decl(unit: &std::sync::Arc<SourceUnit>, name: &str) -> TypeDecl {
        TypeDecl::from_handle(unit.find_type(&[name]).unwrap()).unwrap()
    }

    #[test]
    fn test_reference_arity() {
        let unit = SourceUnit::parse("class Pair<A, B> {} class S {}");
        let pair = decl(&unit, "Pair");
        let s = ResolvedType::Reference(ReferenceType::raw(decl(&unit, "S")));
        assert!(ReferenceType::new(pair.clone(), vec![]).unwrap().is_raw());
        assert!(ReferenceType::new(pair.clone(), vec![s.clone(), s.clone()]).is_ok());
        assert_eq!(
            ReferenceType::new(pair, vec![s]),
            Err(ResolveError::TypeArgumentArity {
                type_name: "Pair".into(),
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_substitution_and_describe() {
        let unit = SourceUnit::parse("package p; class Box<T> {} class S {}");
        let boxed = ReferenceType::declared(decl(&unit, "Box")).unwrap();
        let generic = ResolvedType::array_of(ResolvedType::Reference(boxed.clone()));
        assert_eq!(generic.describe(), "p.Box<T>[]");

        let s = ResolvedType::Reference(ReferenceType::raw(decl(&unit, "S")));
        let concrete = ReferenceType::new(boxed.decl().clone(), vec![s]).unwrap();
        let map = concrete.type_parameter_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(generic.substitute(&map).describe(), "p.Box<p.S>[]");
        assert_eq!(generic.substitute(&map).erasure(), "p.Box[]");
    }

    #[test]
    fn test_wildcard_describe() {
        let wildcard = ResolvedType::Wildcard(Wildcard::Extends(Box::new(
            ResolvedType::Primitive(PrimitiveType::Int),
        )));
        assert_eq!(wildcard.describe(), "? extends int");
        assert_eq!(
            ResolvedType::Primitive(PrimitiveType::Int)
                .with_dims(2)
                .to_string(),
            "int[][]"
        );
    }
}
