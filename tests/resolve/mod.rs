//! Resolution tests
//!
//! End-to-end behaviour of the resolver over parsed sources:
//! - Scope escalation and shadowing
//! - Ancestors, implicit roots and type-variable bounds
//! - Overload selection and ambiguity
//! - Expression typing through the facade

pub mod tests_ancestors;
pub mod tests_expressions;
pub mod tests_overloads;
pub mod tests_scopes;
