//! Language constants shared by the parser, the symbol sources and the resolver.

/// Qualified name of the canonical root type every reference type extends.
pub const ROOT_TYPE: &str = "java.lang.Object";

/// Package whose types are visible in every compilation unit without an import.
pub const IMPLICIT_IMPORT_PACKAGE: &str = "java.lang";

/// Qualified name of the implicit superclass of every enum.
pub const ENUM_BASE_TYPE: &str = "java.lang.Enum";

/// Qualified name of the type every string literal has.
pub const STRING_TYPE: &str = "java.lang.String";

/// Qualified name of the interface enhanced `for` loops iterate over.
pub const ITERABLE_TYPE: &str = "java.lang.Iterable";

/// File extension handled by the directory-backed symbol source.
pub const SOURCE_EXTENSION: &str = "java";

/// Identifier that requests local variable type inference.
pub const INFERRED_LOCAL_TYPE: &str = "var";

/// Separator between the segments of a qualified name.
pub const QUALIFIED_SEPARATOR: char = '.';
