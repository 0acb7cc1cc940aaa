//! Methods and constructors seen through a concrete receiver type.

use super::declaration::{ConstructorDecl, MethodDecl, TypeDecl};
use super::types::{ResolvedType, TypeParameterMap};

/// A method with its parameter and return types expressed for a particular
/// receiver, e.g. `List<String>.get(int)` returning `String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodUsage {
    decl: MethodDecl,
    param_types: Vec<ResolvedType>,
    return_type: ResolvedType,
    varargs: bool,
}

impl MethodUsage {
    pub fn new(
        decl: MethodDecl,
        param_types: Vec<ResolvedType>,
        return_type: ResolvedType,
        varargs: bool,
    ) -> Self {
        Self {
            decl,
            param_types,
            return_type,
            varargs,
        }
    }

    pub fn decl(&self) -> &MethodDecl {
        &self.decl
    }

    pub fn name(&self) -> &str {
        self.decl.name()
    }

    pub fn declaring_type(&self) -> &TypeDecl {
        self.decl.declaring_type()
    }

    pub fn param_types(&self) -> &[ResolvedType] {
        &self.param_types
    }

    pub fn return_type(&self) -> &ResolvedType {
        &self.return_type
    }

    pub fn is_varargs(&self) -> bool {
        self.varargs
    }

    /// Name and erased parameter types, the key for override matching.
    pub fn signature(&self) -> String {
        let params: Vec<_> = self.param_types.iter().map(|t| t.erasure()).collect();
        format!("{}({})", self.name(), params.join(", "))
    }

    pub fn substitute(&self, map: &TypeParameterMap) -> Self {
        Self {
            decl: self.decl.clone(),
            param_types: self.param_types.iter().map(|t| t.substitute(map)).collect(),
            return_type: self.return_type.substitute(map),
            varargs: self.varargs,
        }
    }
}

/// A constructor with parameter types expressed for the instantiated type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructorUsage {
    decl: ConstructorDecl,
    param_types: Vec<ResolvedType>,
    varargs: bool,
}

impl ConstructorUsage {
    pub fn new(decl: ConstructorDecl, param_types: Vec<ResolvedType>, varargs: bool) -> Self {
        Self {
            decl,
            param_types,
            varargs,
        }
    }

    pub fn decl(&self) -> &ConstructorDecl {
        &self.decl
    }

    pub fn into_decl(self) -> ConstructorDecl {
        self.decl
    }

    pub fn param_types(&self) -> &[ResolvedType] {
        &self.param_types
    }

    pub fn is_varargs(&self) -> bool {
        self.varargs
    }

    pub fn substitute(&self, map: &TypeParameterMap) -> Self {
        Self {
            decl: self.decl.clone(),
            param_types: self.param_types.iter().map(|t| t.substitute(map)).collect(),
            varargs: self.varargs,
        }
    }
}
